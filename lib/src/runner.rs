use crate::app_state::AppState;
use crate::destination_repository::DestinationRepository;
use crate::error::ForwardError;
use crate::error::StoreError;
use crate::forwarder::Forwarder;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use tokio::task::JoinSet;
use tracing::instrument;
use tracing::log::error;
use uuid::Uuid;

#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Success,
    Failure,
}

/// Outcome of replaying one destination.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DestinationOutcome {
    pub destination_id: Uuid,
    pub status: RunStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DestinationOutcome {
    pub fn success(destination_id: Uuid) -> Self {
        Self {
            destination_id,
            status: RunStatus::Success,
            error: None,
        }
    }

    pub fn failure(
        destination_id: Uuid,
        error: String,
    ) -> Self {
        Self {
            destination_id,
            status: RunStatus::Failure,
            error: Some(error),
        }
    }
}

/// One entry per destination, in the store's listing order. A batch over zero
/// destinations is empty, never an error.
#[derive(Debug, Serialize, Default, Clone, PartialEq)]
pub struct BatchResult {
    pub outcomes: Vec<DestinationOutcome>,
}

impl BatchResult {
    pub fn successes(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.status == RunStatus::Success).count()
    }

    pub fn failures(&self) -> usize {
        self.outcomes.len() - self.successes()
    }
}

pub struct DestinationRunner;

impl DestinationRunner {
    /// Replays every destination owned by `owner_id` with the given runtime
    /// params. Calls run concurrently, each bounded by the gateway timeout;
    /// one failed call never aborts the rest.
    #[instrument(skip_all, name = "run_destinations")]
    pub async fn run_all(
        app_state: &AppState,
        owner_id: Uuid,
        params: Value,
    ) -> Result<BatchResult, StoreError> {
        let destinations = DestinationRepository::list_by_owner(&app_state.postgres_pool, owner_id).await?;
        if destinations.is_empty() {
            return Ok(BatchResult::default());
        }

        let mut join_set = JoinSet::new();
        for destination in destinations.clone() {
            let gateway = app_state.http_gateway.clone();
            let params = params.clone();
            join_set.spawn(async move {
                let result = Forwarder::forward(
                    &gateway,
                    &destination.url,
                    &destination.http_method,
                    destination.headers.as_ref().map(|headers| &headers.0),
                    &params,
                )
                .await;
                (destination.id, result)
            });
        }

        let mut results: HashMap<Uuid, Result<Value, ForwardError>> = HashMap::new();
        while let Some(joined) = join_set.join_next().await {
            if let Ok((destination_id, result)) = joined {
                results.insert(destination_id, result);
            }
        }

        // Outcomes keep the listing order regardless of completion order; a
        // task that never reported (aborted join) still yields a failure entry.
        let outcomes = destinations
            .iter()
            .map(|destination| match results.remove(&destination.id) {
                Some(Ok(_)) => DestinationOutcome::success(destination.id),
                Some(Err(forward_error)) => {
                    error!("Failed to run destination {} cause {}", destination.id, forward_error);
                    DestinationOutcome::failure(destination.id, forward_error.to_string())
                },
                None => DestinationOutcome::failure(destination.id, "Forward task aborted".to_string()),
            })
            .collect();

        Ok(BatchResult { outcomes })
    }
}
