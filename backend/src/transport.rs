use tripgen_shared::bridge::{ChatRequest, HttpReply, HttpTransport, TransportError};

/// reqwest-backed transport for the AI bridge.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl HttpTransport for ReqwestTransport {
    async fn post_json(
        &self,
        endpoint: &str,
        api_key: &str,
        payload: &ChatRequest,
    ) -> Result<HttpReply, TransportError> {
        let response = self
            .client
            .post(endpoint)
            .bearer_auth(api_key)
            .json(payload)
            .send()
            .await
            .map_err(|err| TransportError(err.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| TransportError(err.to_string()))?;
        tracing::debug!(status, bytes = body.len(), "AI endpoint replied");
        Ok(HttpReply { status, body })
    }
}
