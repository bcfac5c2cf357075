//! HTTP client for the marketplace availability API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::availability::{AvailabilityOverride, BulkOverrideRequest, OverrideUpsert};
use crate::config::RentcalConfig;
use crate::date_range::DateRange;
use crate::error::{RentCalError, RentCalResult};
use crate::reservation::{ReservationInterval, ReservationStatus, StatusPatch};
use crate::store::AvailabilityStore;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// HTTP client for the availability and reservation collections
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> RentCalResult<Self> {
        Url::parse(base_url).map_err(|e| RentCalError::Config(format!("Invalid api_url '{base_url}': {e}")))?;

        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(ApiClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn from_config(config: &RentcalConfig) -> RentCalResult<Self> {
        Self::new(
            &config.api_url,
            config.api_token.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> RentCalResult<Response> {
        let resp = self.authorize(request).send().await?;
        let status = resp.status();
        debug!(status = status.as_u16(), url = %resp.url(), "api response");

        if status.is_success() {
            return Ok(resp);
        }

        let message = match resp.json::<ErrorResponse>().await {
            Ok(err) => err.error,
            Err(_) => status.canonical_reason().unwrap_or("Request failed").to_string(),
        };
        Err(RentCalError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn get_window<T: DeserializeOwned>(
        &self,
        collection: &str,
        listing_id: &str,
        window: DateRange,
    ) -> RentCalResult<Vec<T>> {
        let request = self
            .http
            .get(format!("{}/{}", self.base_url, collection))
            .query(&[
                ("listing_id", listing_id.to_string()),
                ("start_date", window.start().format(DATE_FORMAT).to_string()),
                ("end_date", window.end().format(DATE_FORMAT).to_string()),
            ]);

        let resp = self.send(request).await?;
        resp.json()
            .await
            .map_err(|e| RentCalError::Serialization(format!("Unexpected {collection} response: {e}")))
    }
}

#[async_trait]
impl AvailabilityStore for ApiClient {
    /// GET /availability
    #[tracing::instrument(skip(self))]
    async fn fetch_overrides(&self, listing_id: &str, window: DateRange) -> RentCalResult<Vec<AvailabilityOverride>> {
        self.get_window("availability", listing_id, window).await
    }

    /// GET /reservations
    #[tracing::instrument(skip(self))]
    async fn fetch_reservations(&self, listing_id: &str, window: DateRange) -> RentCalResult<Vec<ReservationInterval>> {
        self.get_window("reservations", listing_id, window).await
    }

    /// POST /availability
    #[tracing::instrument(skip_all, fields(listing_id = %request.listing_id, date = %request.date))]
    async fn upsert_override(&self, request: &OverrideUpsert) -> RentCalResult<()> {
        let req = self
            .http
            .post(format!("{}/availability", self.base_url))
            .json(request);
        self.send(req).await?;
        Ok(())
    }

    /// POST /availability/bulk
    #[tracing::instrument(skip_all, fields(listing_id = %request.listing_id, count = request.updates.len()))]
    async fn bulk_upsert(&self, request: &BulkOverrideRequest) -> RentCalResult<()> {
        let req = self
            .http
            .post(format!("{}/availability/bulk", self.base_url))
            .json(request);
        self.send(req).await?;
        Ok(())
    }

    /// PATCH /reservations/:id
    #[tracing::instrument(skip(self))]
    async fn update_reservation_status(&self, reservation_id: &str, status: ReservationStatus) -> RentCalResult<()> {
        let req = self
            .http
            .patch(format!("{}/reservations/{}", self.base_url, reservation_id))
            .json(&StatusPatch { status });
        self.send(req).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::availability::OverrideUpdate;
    use crate::date_range::Month;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    fn client(server: &MockServer) -> ApiClient {
        ApiClient::new(&server.uri(), None, Duration::from_secs(5)).expect("client")
    }

    #[tokio::test]
    async fn test_fetch_overrides_sends_month_window() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/availability"))
            .and(query_param("listing_id", "villa-1"))
            .and(query_param("start_date", "2024-06-01"))
            .and(query_param("end_date", "2024-06-30"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"listing_id": "villa-1", "date": "2024-06-15", "is_available": false, "notes": "maintenance"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let overrides = client(&server)
            .fetch_overrides("villa-1", Month::new(2024, 6).unwrap().window())
            .await
            .unwrap();

        assert_eq!(overrides.len(), 1);
        assert_eq!(overrides[0].date, d(15));
        assert!(!overrides[0].is_available);
        assert_eq!(overrides[0].notes.as_deref(), Some("maintenance"));
    }

    #[tokio::test]
    async fn test_fetch_reservations_parses_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/reservations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "r-1", "listing_id": "villa-1", "start_date": "2024-06-05",
                 "end_date": "2024-06-07", "status": "pending"}
            ])))
            .mount(&server)
            .await;

        let reservations = client(&server)
            .fetch_reservations("villa-1", DateRange::single(d(6)))
            .await
            .unwrap();

        assert_eq!(reservations[0].status, ReservationStatus::Pending);
        assert_eq!(reservations[0].end_date, d(7));
    }

    #[tokio::test]
    async fn test_bulk_upsert_posts_all_dates_once() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/availability/bulk"))
            .and(body_json(json!({
                "listing_id": "villa-1",
                "updates": [
                    {"date": "2024-06-01", "is_available": false},
                    {"date": "2024-06-02", "is_available": false}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"updated": 2})))
            .expect(1)
            .mount(&server)
            .await;

        let request = BulkOverrideRequest {
            listing_id: "villa-1".to_string(),
            updates: vec![
                OverrideUpdate { date: d(1), is_available: false },
                OverrideUpdate { date: d(2), is_available: false },
            ],
        };
        client(&server).bulk_upsert(&request).await.unwrap();
    }

    #[tokio::test]
    async fn test_single_upsert_and_status_patch() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/availability"))
            .and(body_json(json!({"listing_id": "villa-1", "date": "2024-06-09", "is_available": true})))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/reservations/r-1"))
            .and(body_json(json!({"status": "confirmed"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let api = client(&server);
        api.upsert_override(&OverrideUpsert {
            listing_id: "villa-1".to_string(),
            date: d(9),
            is_available: true,
        })
        .await
        .unwrap();
        api.update_reservation_status("r-1", ReservationStatus::Confirmed)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_server_error_message_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/availability/bulk"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({"error": "Listing not found"})))
            .mount(&server)
            .await;

        let request = BulkOverrideRequest {
            listing_id: "ghost".to_string(),
            updates: vec![],
        };
        let err = client(&server).bulk_upsert(&request).await.unwrap_err();

        assert!(matches!(err, RentCalError::Api { status: 422, .. }));
        assert_eq!(err.to_string(), "Server error (422): Listing not found");
    }

    #[tokio::test]
    async fn test_error_without_body_falls_back_to_status_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client(&server)
            .fetch_overrides("villa-1", DateRange::single(d(1)))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Server error (503): Service Unavailable");
    }

    #[tokio::test]
    async fn test_bearer_token_is_sent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("authorization", "Bearer s3cret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(2)
            .mount(&server)
            .await;

        let api = ApiClient::new(&format!("{}/", server.uri()), Some("s3cret".into()), Duration::from_secs(5)).unwrap();
        let window = DateRange::single(d(1));
        assert!(api.fetch_overrides("villa-1", window).await.unwrap().is_empty());
        assert!(api.fetch_reservations("villa-1", window).await.unwrap().is_empty());
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        let result = ApiClient::new("not a url", None, Duration::from_secs(1));
        assert!(matches!(result, Err(RentCalError::Config(_))));
    }
}
