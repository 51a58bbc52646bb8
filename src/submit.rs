use crate::errors::{InvalidEndpoint, SubmitError};
use crate::models::{SubscribeResponse, SubscriptionPayload};
use crate::page::Page;
use reqwest::{Client, Url, header};
use serde_json::Value;
use tracing::{info, warn};

/// Joined onto the configured base URL, below any path prefix it carries.
pub const SUBSCRIBE_PATH: &str = "api/subscribe";

#[derive(Debug, Clone)]
pub struct SubscribeClient {
    http_client: Client,
    endpoint: Url,
}

impl SubscribeClient {
    pub fn new(base_url: &str) -> Result<Self, InvalidEndpoint> {
        let endpoint = Url::parse(base_url)
            .and_then(|mut base| {
                if !base.path().ends_with('/') {
                    let path = format!("{}/", base.path());
                    base.set_path(&path);
                }
                base.join(SUBSCRIBE_PATH)
            })
            .map_err(|_| InvalidEndpoint {
                url: base_url.to_string(),
            })?;

        Ok(Self {
            http_client: Client::new(),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Sends one subscribe request. Any 2xx is a success; the body is handed
    /// back as JSON, or `Value::Null` when it is not JSON.
    pub async fn post(&self, payload: &SubscriptionPayload) -> Result<Value, SubmitError> {
        let response = self
            .http_client
            .post(self.endpoint.clone())
            .header(header::ACCEPT, "application/json")
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SubmitError::Status { status, body });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }
}

/// Handles a submission of the `subscription` form for `page`.
///
/// There is no guard against overlapping submissions and no retry.
pub async fn submit(page: &mut Page, client: &SubscribeClient) -> Result<Value, SubmitError> {
    page.begin_submission();

    let payload = page.payload();
    let outcome = client.post(&payload).await;

    match &outcome {
        Ok(body) => {
            let response: SubscribeResponse =
                serde_json::from_value(body.clone()).unwrap_or_default();
            info!(
                timezone = %payload.timezone,
                subscribed = response.subscribed,
                "subscription accepted"
            );
        }
        Err(err) => warn!("subscription failed: {err}"),
    }

    page.finish_submission(&outcome);
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timezone::FixedTimezone;
    use chrono::Weekday;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_string, header, method, path},
    };

    fn page_with(number: &str, timezone: &str) -> Page {
        let mut page = Page::load(Weekday::Mon, &FixedTimezone(Some(timezone.to_string())));
        page.number.set_value(number);
        page
    }

    #[test]
    fn endpoint_is_fixed_path_on_base() {
        for (base, expected) in [
            ("http://backend.test:8081", "http://backend.test:8081/api/subscribe"),
            ("http://backend.test:8081/", "http://backend.test:8081/api/subscribe"),
            ("http://backend.test/app", "http://backend.test/app/api/subscribe"),
            ("http://backend.test/app/", "http://backend.test/app/api/subscribe"),
        ] {
            let client = SubscribeClient::new(base).unwrap();
            assert_eq!(client.endpoint().as_str(), expected);
        }
        assert!(SubscribeClient::new("not a url").is_err());
    }

    #[tokio::test]
    async fn submit_posts_exact_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/subscribe"))
            .and(header("content-type", "application/json"))
            .and(body_string(
                r#"{"timezone":"America/New_York","number":"+15551234567"}"#,
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "number": "+15551234567",
                "timezone": "America/New_York",
                "subscribed": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = SubscribeClient::new(&server.uri()).unwrap();
        let mut page = page_with("+1 555 123 4567", "America/New_York");
        let outcome = submit(&mut page, &client).await;

        let body = outcome.expect("2xx should succeed");
        assert_eq!(body["subscribed"], true);
        assert!(page.checkmark_visible);
        assert!(page.loader_complete);
        assert!(page.subscribe_form_hidden);
    }

    #[tokio::test]
    async fn any_2xx_is_success_even_without_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = SubscribeClient::new(&server.uri()).unwrap();
        let mut page = page_with("5551234567", "UTC");
        let outcome = submit(&mut page, &client).await;

        assert_eq!(outcome.unwrap(), Value::Null);
        assert!(page.checkmark_visible);
    }

    #[tokio::test]
    async fn non_2xx_restores_the_form() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(412).set_body_json(serde_json::json!({
                "subscribed": false,
                "error": "Invalid phone number."
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = SubscribeClient::new(&server.uri()).unwrap();
        let mut page = page_with("12", "UTC");
        let outcome = submit(&mut page, &client).await;

        match outcome {
            Err(SubmitError::Status { status, body }) => {
                assert_eq!(status.as_u16(), 412);
                assert!(body.contains("Invalid phone number."));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(!page.subscribe_form_hidden);
        assert!(page.progress_indicator_hidden);
        assert!(!page.checkmark_visible);
        assert!(!page.loader_complete);
    }

    #[tokio::test]
    async fn unreachable_backend_restores_the_form() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = SubscribeClient::new(&format!("http://127.0.0.1:{port}")).unwrap();
        let mut page = page_with("5551234567", "UTC");
        let outcome = submit(&mut page, &client).await;

        assert!(matches!(outcome, Err(SubmitError::Transport(_))));
        assert!(!page.subscribe_form_hidden);
        assert!(page.progress_indicator_hidden);
    }
}
