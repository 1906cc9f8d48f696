use std::time::Duration;

use crate::error::ForwardError;
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};

/// Outbound HTTP client shared by the ad-hoc forwarder and the batch runner.
///
/// The request timeout bounds every forwarded call, so one unreachable
/// destination cannot stall a batch indefinitely.
#[derive(Clone)]
pub struct HttpGateway {
    pub client: ClientWithMiddleware,
}

impl HttpGateway {
    pub fn new(request_timeout_in_millis: u64) -> Result<Self, ForwardError> {
        let client = ClientBuilder::new(
            Client::builder()
                .timeout(Duration::from_millis(request_timeout_in_millis))
                .build()
                .map_err(|error| ForwardError::Internal(format!("Failed to create http gateway client: {error}")))?,
        )
        .build();

        Ok(Self { client })
    }
}
