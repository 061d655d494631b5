use reqwest::header::AUTHORIZATION;
use std::time::Duration;

use crate::config::EditorConfig;
use crate::model::AuthContext;
use crate::store::traits::{Method, RawResponse, Request, Transport, TransportError};

pub const CLIENT_AUTHORIZATION: &str = "Client-Authorization";

/// `Transport` backed by a pooled reqwest client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    api_base: String,
}

impl HttpTransport {
    /// `api_base` is the store endpoint with the API version appended,
    /// e.g. `https://core.kg.ebrains.eu/v3-beta`
    pub fn new(api_base: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &EditorConfig) -> anyhow::Result<Self> {
        Self::new(config.api_base(), config.timeout())
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn execute(
        &self,
        request: &Request,
        auth: &AuthContext,
    ) -> Result<RawResponse, TransportError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self
            .client
            .request(method, self.url(&request.path))
            .query(request.query.pairs())
            .header(AUTHORIZATION, &auth.authorization);
        if let Some(client_token) = &auth.client_authorization {
            builder = builder.header(CLIENT_AUTHORIZATION, client_token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(send_error)?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Unavailable(e.to_string()))?;

        Ok(RawResponse { status, body })
    }
}

fn send_error(err: reqwest::Error) -> TransportError {
    if err.is_builder() {
        TransportError::InvalidRequest(err.to_string())
    } else {
        TransportError::Unavailable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let transport =
            HttpTransport::new("http://localhost:8000/v3-beta/", Duration::from_secs(5)).unwrap();
        assert_eq!(transport.api_base(), "http://localhost:8000/v3-beta");
        assert_eq!(
            transport.url("instances/abc"),
            "http://localhost:8000/v3-beta/instances/abc"
        );
        assert_eq!(transport.url("/users/me"), "http://localhost:8000/v3-beta/users/me");
    }
}
