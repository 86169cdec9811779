//! HTTP client for the EmailSpan backend.
//!
//! All calls are JSON over HTTP against a single base URL. Every request is
//! logged before it is sent, and every failure is logged with enough detail
//! to tell an unreachable backend from an error response.

mod envelope;

use reqwest::{Client, Method, Response, StatusCode, Url};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, error, info, warn};

use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::model::{SpamTest, SpamTestPatch};

/// Parameters for dispatching one probe email.
///
/// Only the first non-empty entry of `recipients` is used.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendEmailRequest {
    /// Test code the email correlates with.
    pub test_code: Option<String>,
    /// Subject line.
    pub subject: Option<String>,
    /// Plain-text body.
    pub body: Option<String>,
    /// Optional HTML body.
    pub html: Option<String>,
    /// Candidate recipients.
    pub recipients: Vec<String>,
    /// Display name of the sender.
    pub from_name: Option<String>,
}

impl SendEmailRequest {
    /// Returns the recipient that will receive the email.
    #[must_use]
    pub fn recipient(&self) -> Option<&str> {
        self.recipients
            .iter()
            .map(|r| r.trim())
            .find(|r| !r.is_empty())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SendEmailBody<'a> {
    to: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    subject: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    test_code: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    from_name: Option<&'a str>,
}

/// Client for the deliverability backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    http_client: Client,
}

impl ApiClient {
    /// Creates a client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot
    /// be built.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "{} cannot be used as an API base URL",
                config.base_url
            )));
        }

        let http_client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            base_url,
            http_client,
        })
    }

    /// Base URL requests are made against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Registers or identifies the user by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn identify(&self, email: &str) -> Result<()> {
        self.request(Method::POST, &["auth", "identify"], Some(&json!({ "email": email })))
            .await?;
        Ok(())
    }

    /// Creates a new pending test for the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response has no test.
    pub async fn create_test(&self, user_email: &str) -> Result<SpamTest> {
        let body = self
            .request_json(
                Method::POST,
                &["tests", "create"],
                Some(&json!({ "userEmail": user_email })),
            )
            .await?;
        let test = envelope::full_test(body)?;
        info!("Created test {}", test.test_code);
        Ok(test)
    }

    /// Identifies the user and then creates a test for them.
    ///
    /// The test is only created once the identify call succeeded.
    ///
    /// # Errors
    ///
    /// Returns the first error of either call.
    pub async fn start_test(&self, email: &str) -> Result<SpamTest> {
        self.identify(email).await?;
        self.create_test(email).await
    }

    /// Fetches the current state of a test.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response has no test.
    pub async fn get_test(&self, test_code: &str) -> Result<SpamTest> {
        let body = self
            .request_json(Method::GET, &["tests", test_code], None)
            .await?;
        envelope::full_test(body)
    }

    /// Asks the backend to evaluate the test and returns what it reported.
    ///
    /// Returns `None` when the response carried neither a `data` nor a
    /// `result` payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload is malformed.
    pub async fn process_test(&self, test_code: &str) -> Result<Option<SpamTestPatch>> {
        let body = self
            .request_json(
                Method::POST,
                &["tests", "process"],
                Some(&json!({ "testCode": test_code })),
            )
            .await?;
        let update = envelope::process_update(&body)?;
        if update.is_none() {
            warn!("Process response for {} carried no payload", test_code);
        }
        Ok(update)
    }

    /// Triggers the backend to send one probe email.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingRecipient`] without touching the network if no
    /// recipient is set, otherwise any request error.
    pub async fn send_test_email(&self, request: &SendEmailRequest) -> Result<()> {
        let to = request.recipient().ok_or(Error::MissingRecipient)?;

        let body = SendEmailBody {
            to,
            subject: request.subject.as_deref(),
            text: request.body.as_deref(),
            html: request.html.as_deref(),
            test_code: request.test_code.as_deref(),
            from_name: request.from_name.as_deref(),
        };

        self.request(
            Method::POST,
            &["tests", "send-email"],
            Some(&serde_json::to_value(&body)?),
        )
        .await?;
        info!("Test email dispatched to {}", to);
        Ok(())
    }

    /// Probes the health endpoint. Never fails; errors count as unhealthy.
    pub async fn check_connection(&self) -> bool {
        match self.request(Method::GET, &["health"], None).await {
            Ok(response) => response.status() == StatusCode::OK,
            Err(e) => {
                error!("Health check failed: {}", e);
                false
            }
        }
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::Config(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn request_json(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&Value>,
    ) -> Result<Value> {
        let response = self.request(method, segments, body).await?;
        let path = response.url().path().to_string();
        let text = response
            .text()
            .await
            .map_err(|e| transport_error(&path, e))?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn request(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&Value>,
    ) -> Result<Response> {
        let url = self.endpoint(segments)?;
        debug!("{} {}", method, url.path());

        let mut builder = self.http_client.request(method, url.clone());
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| transport_error(url.path(), e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Response error on {}: {} {}", url.path(), status, body);
            return Err(Error::Status {
                status,
                message: envelope::error_message(&body),
                body,
            });
        }

        Ok(response)
    }
}

/// Classifies a failed send and logs it.
fn transport_error(path: &str, e: reqwest::Error) -> Error {
    if e.is_connect() {
        error!("Connection refused on {}: is the backend running?", path);
        Error::Unreachable(e)
    } else if e.is_timeout() || e.is_request() {
        error!("No response on {}: {}", path, e);
        Error::NoResponse(e)
    } else {
        error!("Request to {} failed: {}", path, e);
        Error::Http(e)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(&ApiConfig::new(base).unwrap()).unwrap()
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let api = client("https://backend.example.com/api");
        assert_eq!(
            api.endpoint(&["tests", "create"]).unwrap().as_str(),
            "https://backend.example.com/api/tests/create"
        );

        let api = client("https://backend.example.com/api/");
        assert_eq!(
            api.endpoint(&["health"]).unwrap().as_str(),
            "https://backend.example.com/api/health"
        );
    }

    #[test]
    fn test_endpoint_encodes_test_code() {
        let api = client("https://backend.example.com/api");
        assert_eq!(
            api.endpoint(&["tests", "a/b c"]).unwrap().path(),
            "/api/tests/a%2Fb%20c"
        );
    }

    #[test]
    fn test_rejects_non_base_url() {
        let config = ApiConfig {
            base_url: "mailto:someone@example.com".to_string(),
            ..ApiConfig::default()
        };
        assert!(matches!(ApiClient::new(&config), Err(Error::Config(_))));
    }

    #[test]
    fn test_recipient_skips_blank_entries() {
        let request = SendEmailRequest {
            recipients: vec![String::new(), "  ".to_string(), " first@example.com ".into()],
            ..SendEmailRequest::default()
        };
        assert_eq!(request.recipient(), Some("first@example.com"));
        assert_eq!(SendEmailRequest::default().recipient(), None);
    }

    #[tokio::test]
    async fn test_send_without_recipient_fails_locally() {
        // Port 9 (discard) is never contacted: validation runs first.
        let api = client("http://127.0.0.1:9/api");
        let request = SendEmailRequest {
            test_code: Some("ES-1".to_string()),
            recipients: vec![String::new()],
            ..SendEmailRequest::default()
        };
        assert!(matches!(
            api.send_test_email(&request).await,
            Err(Error::MissingRecipient)
        ));
    }
}
