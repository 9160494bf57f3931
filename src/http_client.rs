// src/http_client.rs
//! Outbound HTTP collaborator for the Magic admin API.
//!
//! A thin wrapper around a shared `reqwest::Client`: it attaches the
//! secret-key and user-agent headers, issues the request, and maps the
//! response status onto the SDK error taxonomy. The DID token codec and
//! verifier never touch this layer; only the resource operations do.

use reqwest::{Method, StatusCode};
use serde_json::{json, Value};

use crate::config::Config;
use crate::error::MagicError;

/// A successful (2xx) response from the Magic API.
#[derive(Clone, Debug)]
pub struct MagicResponse {
    /// HTTP status code of the response.
    pub status_code: u16,
    /// Parsed JSON body, `Null` if the body was empty or not JSON.
    pub data: Value,
}

/// HTTP client for the Magic admin API.
///
/// Reuses one underlying connection pool across requests. Cheap to clone;
/// resource handles share a single instance.
#[derive(Clone, Debug)]
pub struct HttpClient {
    http: reqwest::Client,
    base_url: String,
    api_secret_key: String,
}

impl HttpClient {
    /// Builds a client from the SDK configuration.
    ///
    /// # Errors
    /// [`MagicError::ApiConnection`] if the underlying client cannot be
    /// constructed.
    pub fn new(config: &Config) -> Result<Self, MagicError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(HttpClient {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_secret_key: config.api_secret_key.clone(),
        })
    }

    /// Issues a request against the API.
    ///
    /// # Arguments
    /// * `method` - HTTP method
    /// * `path` - API path, e.g. `/v1/admin/auth/user/get`
    /// * `params` - Optional query parameters
    /// * `body` - Optional JSON body
    ///
    /// # Errors
    /// - [`MagicError::ApiConnection`] on transport failure
    /// - the status-specific [`MagicError`] variant on a non-2xx response
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        params: Option<&[(&str, &str)]>,
        body: Option<&Value>,
    ) -> Result<MagicResponse, MagicError> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method, &url)
            .header("X-Magic-Secret-Key", &self.api_secret_key)
            .header(reqwest::header::USER_AGENT, user_agent());

        if let Some(params) = params {
            request = request.query(params);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        Self::parse_response(response).await
    }

    async fn parse_response(
        response: reqwest::Response,
    ) -> Result<MagicResponse, MagicError> {
        let status = response.status();
        let data: Value = response.json().await.unwrap_or(Value::Null);

        if status.is_success() {
            return Ok(MagicResponse {
                status_code: status.as_u16(),
                data,
            });
        }

        let message = data
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("<empty message>")
            .to_string();

        Err(match status {
            StatusCode::TOO_MANY_REQUESTS => MagicError::RateLimiting(message),
            StatusCode::BAD_REQUEST => MagicError::BadRequest(message),
            StatusCode::UNAUTHORIZED => MagicError::Authentication(message),
            StatusCode::FORBIDDEN => MagicError::Forbidden(message),
            other => MagicError::Api {
                status: other.as_u16(),
                message,
            },
        })
    }
}

fn user_agent() -> String {
    json!({
        "language": "rust",
        "sdk_version": env!("CARGO_PKG_VERSION"),
        "publisher": "magic",
        "http_lib": "reqwest",
        "platform": std::env::consts::OS,
        "arch": std::env::consts::ARCH,
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> HttpClient {
        let config = Config::new("sk_test_key").with_base_url(mockito::server_url());
        HttpClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn request_sends_secret_key_header_and_parses_body() {
        let _m = mockito::mock("GET", "/v1/ping")
            .match_header("x-magic-secret-key", "sk_test_key")
            .with_status(200)
            .with_body(r#"{"data": {"ok": true}, "status": "ok"}"#)
            .create();

        let response = client()
            .request(Method::GET, "/v1/ping", None, None)
            .await
            .unwrap();

        assert_eq!(response.status_code, 200);
        assert_eq!(response.data["data"]["ok"], true);
    }

    #[tokio::test]
    async fn request_forwards_query_params_and_json_body() {
        let _m = mockito::mock("POST", "/v1/echo")
            .match_query(mockito::Matcher::UrlEncoded("a".into(), "b".into()))
            .match_body(mockito::Matcher::Json(json!({"k": "v"})))
            .with_status(200)
            .with_body("{}")
            .create();

        client()
            .request(
                Method::POST,
                "/v1/echo",
                Some(&[("a", "b")]),
                Some(&json!({"k": "v"})),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn status_codes_map_to_error_kinds() {
        for (status, check) in [
            (400u16, MagicError::BadRequest(String::new())),
            (401, MagicError::Authentication(String::new())),
            (403, MagicError::Forbidden(String::new())),
            (429, MagicError::RateLimiting(String::new())),
        ] {
            let _m = mockito::mock("GET", "/v1/fail")
                .with_status(status as usize)
                .with_body(r#"{"message": "nope"}"#)
                .create();

            let err = client()
                .request(Method::GET, "/v1/fail", None, None)
                .await
                .unwrap_err();

            assert_eq!(
                std::mem::discriminant(&err),
                std::mem::discriminant(&check),
                "status {status} mapped to {err:?}"
            );
        }
    }

    #[tokio::test]
    async fn unexpected_status_maps_to_api_error() {
        let _m = mockito::mock("GET", "/v1/boom")
            .with_status(500)
            .with_body(r#"{"message": "server fell over"}"#)
            .create();

        let err = client()
            .request(Method::GET, "/v1/boom", None, None)
            .await
            .unwrap_err();

        match err {
            MagicError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "server fell over");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
