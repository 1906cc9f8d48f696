use crate::destination::Headers;
use crate::error::ForwardError;
use crate::http_gateway::HttpGateway;
use reqwest::Method;
use serde_json::Value;
use tracing::instrument;

/// How a stored method token maps onto an outbound request. Anything outside
/// GET/POST/PUT is an explicit failure instead of a silent no-op.
#[derive(Debug, Clone, PartialEq)]
pub enum ForwardMethod {
    Get,
    PostLike(Method),
    Unsupported(String),
}

impl ForwardMethod {
    pub fn classify(method: &str) -> Self {
        match method.to_lowercase().as_str() {
            "get" => ForwardMethod::Get,
            "post" => ForwardMethod::PostLike(Method::POST),
            "put" => ForwardMethod::PostLike(Method::PUT),
            _ => ForwardMethod::Unsupported(method.to_string()),
        }
    }
}

pub struct Forwarder;

impl Forwarder {
    /// Performs a single outbound call and returns the decoded json body.
    ///
    /// GET sends `params` as query-string pairs, POST/PUT send them as json
    /// body. The gateway timeout bounds the call, there are no retries.
    #[instrument(skip_all, name = "forward")]
    pub async fn forward(
        gateway: &HttpGateway,
        url: &str,
        method: &str,
        headers: Option<&Headers>,
        params: &Value,
    ) -> Result<Value, ForwardError> {
        let mut request = match ForwardMethod::classify(method) {
            ForwardMethod::Get => gateway.client.get(url).query(&Self::query_pairs(params)),
            ForwardMethod::PostLike(post_like) => gateway.client.request(post_like, url).json(params),
            ForwardMethod::Unsupported(unsupported) => return Err(ForwardError::UnsupportedMethod(unsupported)),
        };

        if let Some(headers) = headers {
            for (key, value) in headers {
                if let Some(value) = value.as_str() {
                    request = request.header(key, value);
                } else {
                    request = request.header(key, value.to_string());
                }
            }
        }

        let response = request.send().await.map_err(|error| ForwardError::Unreachable(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or("unknown".to_string());
            return Err(ForwardError::UpstreamStatus { status: status.as_u16(), body });
        }

        response
            .json::<Value>()
            .await
            .map_err(|error| ForwardError::InvalidResponseBody(error.to_string()))
    }

    fn query_pairs(params: &Value) -> Vec<(String, String)> {
        let Some(params) = params.as_object() else {
            return vec![];
        };

        params
            .iter()
            .map(|(key, value)| match value.as_str() {
                Some(text) => (key.clone(), text.to_string()),
                None => (key.clone(), value.to_string()),
            })
            .collect()
    }
}
