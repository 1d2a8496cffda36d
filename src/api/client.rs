//! Customer API client implementation.
//!
//! This module provides the client for the two customer endpoints: a list
//! endpoint returning every record, and a create endpoint accepting a draft.
//! Failures are never retried; each call reports exactly one outcome.

use std::time::Duration;

use reqwest::{header, Client, StatusCode};
use tracing::{debug, info, instrument, warn};

use super::error::{ApiError, Result};
use super::types::{CreateResponse, CustomerDraft, Record};
use crate::config::ApiConfig;

/// The customer API client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct CustomerClient {
    /// The HTTP client.
    client: Client,
    /// Endpoint returning the customer collection.
    list_url: String,
    /// Endpoint accepting new customers.
    create_url: String,
}

impl CustomerClient {
    /// Create a client from the API configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    #[instrument(skip(config), fields(list_url = %config.list_url))]
    pub fn new(config: &ApiConfig) -> Result<Self> {
        info!("Creating customer API client");
        Self::with_endpoints(
            &config.list_url,
            &config.create_url,
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Create a client for explicit endpoints.
    pub fn with_endpoints(list_url: &str, create_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Network)?;

        Ok(Self {
            client,
            list_url: normalize_endpoint(list_url),
            create_url: normalize_endpoint(create_url),
        })
    }

    /// Fetch the full customer collection.
    ///
    /// A non-success status fails regardless of the body content.
    #[instrument(skip(self), fields(url = %self.list_url))]
    pub async fn list_customers(&self) -> Result<Vec<Record>> {
        debug!("Fetching customers");

        let response = self
            .client
            .get(&self.list_url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("Error response body: {}", body);
            return Err(ApiError::from_status(status));
        }

        let body = response.text().await?;
        let records = parse_collection(&body)?;
        debug!("Fetched {} customers", records.len());
        Ok(records)
    }

    /// Submit a new customer.
    ///
    /// Returns the backend's confirmation message.
    #[instrument(skip(self, draft), fields(url = %self.create_url))]
    pub async fn create_customer(&self, draft: &CustomerDraft) -> Result<String> {
        debug!("Submitting new customer");

        let response = self
            .client
            .post(&self.create_url)
            .header(header::ACCEPT, "application/json")
            .json(draft)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let message = interpret_create_response(status, &body)?;

        info!("Customer created");
        Ok(message)
    }

    /// Get the list endpoint.
    pub fn list_url(&self) -> &str {
        &self.list_url
    }

    /// Get the create endpoint.
    pub fn create_url(&self) -> &str {
        &self.create_url
    }
}

/// Parse the list endpoint body into records.
fn parse_collection(body: &str) -> Result<Vec<Record>> {
    serde_json::from_str(body)
        .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse customer list: {}", e)))
}

/// Decide whether a create response confirms the creation.
///
/// Confirmation requires both a success status and a `mensaje` field.
fn interpret_create_response(status: StatusCode, body: &str) -> Result<String> {
    let parsed: CreateResponse = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!(status = %status, "Create response is not valid JSON: {}", e);
            CreateResponse::default()
        }
    };

    match parsed.confirmation() {
        Some(message) if status.is_success() => Ok(message.to_string()),
        _ => {
            debug!(status = %status, "Creation not confirmed");
            Err(ApiError::rejected(parsed.error_text()))
        }
    }
}

/// Normalize an endpoint URL by trimming surrounding whitespace.
fn normalize_endpoint(url: &str) -> String {
    let url = url.trim();

    if !url.starts_with("https://") {
        debug!("Endpoint does not use HTTPS: {}", url);
    }

    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::GENERIC_SUBMIT_ERROR;
    use crate::api::types::{DraftField, Scalar};
    use wiremock::matchers::{body_json, header as header_matcher, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> CustomerClient {
        CustomerClient::with_endpoints(
            &format!("{}/get_data.php", server.uri()),
            &format!("{}/add_data.php", server.uri()),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    fn complete_draft() -> CustomerDraft {
        let mut draft = CustomerDraft::default();
        draft.set(DraftField::Nombre, "Ana");
        draft.set(DraftField::Apellidos, "Rios");
        draft.set(DraftField::Ci, "1234567");
        draft
    }

    #[test]
    fn test_normalize_endpoint_trims_whitespace() {
        assert_eq!(
            normalize_endpoint("  http://api.test/get_data.php \n"),
            "http://api.test/get_data.php"
        );
    }

    #[test]
    fn test_parse_collection_empty() {
        assert!(parse_collection("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_collection_not_an_array() {
        let err = parse_collection(r#"{"nombre":"Ana"}"#).unwrap_err();
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_interpret_create_success() {
        let result = interpret_create_response(StatusCode::OK, r#"{"mensaje":"ok"}"#);
        assert_eq!(result.unwrap(), "ok");
    }

    #[test]
    fn test_interpret_create_error_status_with_mensaje() {
        let err = interpret_create_response(StatusCode::BAD_REQUEST, r#"{"mensaje":"ok"}"#)
            .unwrap_err();
        assert_eq!(err.to_string(), GENERIC_SUBMIT_ERROR);
    }

    #[test]
    fn test_interpret_create_non_json_body() {
        let err = interpret_create_response(StatusCode::OK, "<html>oops</html>").unwrap_err();
        assert!(matches!(err, ApiError::Rejected(_)));
        assert_eq!(err.to_string(), GENERIC_SUBMIT_ERROR);
    }

    #[tokio::test]
    async fn test_list_customers_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/get_data.php"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"[{"cod_cliente":1,"nombre":"Ana","estado":1},{"cod_cliente":2,"nombre":"Luis","estado":0}]"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let records = client.list_customers().await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].keys().collect::<Vec<_>>(),
            vec!["cod_cliente", "nombre", "estado"]
        );
        assert_eq!(records[1].get("nombre"), Some(&Scalar::Text("Luis".to_string())));
    }

    #[tokio::test]
    async fn test_list_customers_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/get_data.php"))
            .respond_with(ResponseTemplate::new(503).set_body_string("[]"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.list_customers().await.unwrap_err();

        match err {
            ApiError::Http { status, reason } => {
                assert_eq!(status, 503);
                assert_eq!(reason, "Service Unavailable");
            }
            other => panic!("Expected Http error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_list_customers_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/get_data.php"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.list_customers().await.unwrap_err();
        assert!(err.is_parse_error());
    }

    #[tokio::test]
    async fn test_create_customer_posts_draft_json() {
        let server = MockServer::start().await;
        let draft = complete_draft();

        Mock::given(method("POST"))
            .and(path("/add_data.php"))
            .and(header_matcher("content-type", "application/json"))
            .and(body_json(serde_json::to_value(&draft).unwrap()))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "mensaje": "Cliente añadido" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let message = client.create_customer(&draft).await.unwrap();
        assert_eq!(message, "Cliente añadido");
    }

    #[tokio::test]
    async fn test_create_customer_missing_confirmation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/add_data.php"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.create_customer(&complete_draft()).await.unwrap_err();
        assert_eq!(err.to_string(), GENERIC_SUBMIT_ERROR);
    }

    #[tokio::test]
    async fn test_create_customer_backend_error_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/add_data.php"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(serde_json::json!({ "error": "El CI ya existe" })),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.create_customer(&complete_draft()).await.unwrap_err();
        assert!(matches!(err, ApiError::Rejected(ref msg) if msg == "El CI ya existe"));
    }

    #[tokio::test]
    async fn test_list_customers_timeout_is_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/get_data.php"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("[]")
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let client = CustomerClient::with_endpoints(
            &format!("{}/get_data.php", server.uri()),
            &format!("{}/add_data.php", server.uri()),
            Duration::from_millis(100),
        )
        .unwrap();
        let err = client.list_customers().await.unwrap_err();

        match err {
            ApiError::Network(e) => assert!(e.is_timeout()),
            other => panic!("expected a network error, got {:?}", other),
        }
    }
}
