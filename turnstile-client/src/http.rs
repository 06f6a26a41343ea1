// turnstile-client/src/http.rs
// HTTP transport - bearer auth, status mapping, JSON decoding

use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{AccessToken, ClientConfig, ClientError, ClientResult, Operation};

/// Error body produced by the backend (`{"detail": ...}`)
#[derive(serde::Deserialize)]
struct ApiErrorResponse {
    detail: serde_json::Value,
}

/// Network HTTP client for the admin API
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: Url,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let mut builder = Client::builder();
        if let Some(seconds) = config.timeout {
            builder = builder.timeout(std::time::Duration::from_secs(seconds));
        }
        let client = builder.build()?;

        let base_url = Url::parse(config.base_url.trim_end_matches('/'))
            .map_err(|e| ClientError::Config(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "{} cannot be used as a base URL",
                config.base_url
            )));
        }

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Build an endpoint URL; segments are percent-encoded
    pub fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Config("base URL cannot carry a path".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        url: Url,
        token: &AccessToken,
        operation: Operation,
    ) -> ClientResult<T> {
        let req = self.client.get(url);
        let body = self.send(authorized(req, token), operation).await?;
        decode(&body)
    }

    pub async fn patch<B: Serialize + ?Sized>(
        &self,
        url: Url,
        body: &B,
        token: &AccessToken,
        operation: Operation,
    ) -> ClientResult<String> {
        let req = self.client.patch(url).json(body);
        self.send(authorized(req, token), operation).await
    }

    pub async fn delete(
        &self,
        url: Url,
        token: &AccessToken,
        operation: Operation,
    ) -> ClientResult<String> {
        let req = self.client.delete(url);
        self.send(authorized(req, token), operation).await
    }

    /// Unauthenticated form POST (the login endpoint)
    pub async fn post_form<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        url: Url,
        form: &B,
        operation: Operation,
    ) -> ClientResult<T> {
        let req = self.client.post(url).form(form);
        let body = self.send(req, operation).await?;
        decode(&body)
    }

    async fn send(&self, req: RequestBuilder, operation: Operation) -> ClientResult<String> {
        let response = req.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            return Ok(text);
        }

        tracing::debug!(%status, %operation, "admin API request failed");
        if status == StatusCode::UNAUTHORIZED && operation != Operation::Login {
            return Err(ClientError::Unauthorized);
        }
        Err(operation.failure(status.as_u16(), error_message(status, &text)))
    }
}

fn authorized(req: RequestBuilder, token: &AccessToken) -> RequestBuilder {
    req.header(reqwest::header::AUTHORIZATION, token.bearer())
}

fn decode<T: DeserializeOwned>(body: &str) -> ClientResult<T> {
    serde_json::from_str(body).map_err(|e| ClientError::InvalidResponse(e.to_string()))
}

/// Prefer the backend's `detail` text, fall back to the raw body or reason
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(body) {
        return match api_err.detail {
            serde_json::Value::String(detail) => detail,
            other => other.to_string(),
        };
    }
    let body = body.trim();
    if body.is_empty() {
        status.canonical_reason().unwrap_or("request failed").to_string()
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> NetworkHttpClient {
        NetworkHttpClient::new(&ClientConfig::new(base)).unwrap()
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let http = client("http://localhost:8000/");
        let url = http.endpoint(&["admin", "employees"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/admin/employees");
    }

    #[test]
    fn test_endpoint_keeps_base_path_and_encodes_ids() {
        let http = client("http://gate.local/api");
        let url = http.endpoint(&["admin", "employees", "a b/c", "status"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://gate.local/api/admin/employees/a%20b%2Fc/status"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = NetworkHttpClient::new(&ClientConfig::new("not a url")).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn test_error_message_prefers_detail() {
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, r#"{"detail":"Employee not found"}"#),
            "Employee not found"
        );
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, ""), "Bad Gateway");
        assert_eq!(error_message(StatusCode::INTERNAL_SERVER_ERROR, "oops"), "oops");
    }
}
