//! Star action dispatch.
//!
//! One call, one POST. No retry, no deduplication, no idempotency key:
//! two clicks on the same message send two requests, and the server decides
//! what that means. Failures are returned, never swallowed.

use std::sync::Arc;

use board_protocol::{ActionRequest, DEFAULT_STAR_PREFIX, Url};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::errors::ClientError;
use crate::transport::Transport;

/// A completed star request.
#[derive(Debug, Clone)]
pub struct ActionReceipt {
    pub request: ActionRequest,
    /// Whatever JSON the server replied with. Not interpreted.
    pub body: serde_json::Value,
}

/// Builds and sends star requests. Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct ActionDispatcher {
    transport: Arc<dyn Transport>,
    base_url: Url,
    prefix: String,
}

impl ActionDispatcher {
    pub fn new(transport: Arc<dyn Transport>, base_url: Url) -> Self {
        Self {
            transport,
            base_url,
            prefix: DEFAULT_STAR_PREFIX.to_string(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// The request `subject_id` would produce, without sending it.
    pub fn request_for(&self, subject_id: &str) -> Result<ActionRequest, ClientError> {
        Ok(ActionRequest::star(
            &self.base_url,
            &self.prefix,
            subject_id,
        )?)
    }

    /// Send one star request and wait for the reply.
    pub async fn star(&self, subject_id: &str) -> Result<ActionReceipt, ClientError> {
        let request = self.request_for(subject_id)?;

        info!(
            event = "client.star.dispatch_started",
            subject_id = subject_id,
            url = %request.endpoint_url(),
        );

        match self.transport.post_action(request.endpoint_url()).await {
            Ok(body) => {
                info!(event = "client.star.dispatch_completed", subject_id = subject_id);
                Ok(ActionReceipt { request, body })
            }
            Err(e) => {
                warn!(
                    event = "client.star.dispatch_failed",
                    subject_id = subject_id,
                    error = %e,
                    error_code = e.error_code(),
                );
                Err(e)
            }
        }
    }

    /// Fire a star request in the background and return immediately.
    ///
    /// The request is sent whether or not the handle is kept. Await
    /// [`DispatchHandle::wait`] to learn how it went.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn dispatch_star(&self, subject_id: &str) -> DispatchHandle {
        let dispatcher = self.clone();
        let subject = subject_id.to_string();
        let task = tokio::spawn(async move { dispatcher.star(&subject).await });
        DispatchHandle {
            subject_id: subject_id.to_string(),
            task,
        }
    }
}

/// Completion signal for one background dispatch.
pub struct DispatchHandle {
    subject_id: String,
    task: JoinHandle<Result<ActionReceipt, ClientError>>,
}

impl DispatchHandle {
    pub fn subject_id(&self) -> &str {
        &self.subject_id
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub async fn wait(self) -> Result<ActionReceipt, ClientError> {
        self.task
            .await
            .map_err(|e| ClientError::TaskAborted(e.to_string()))?
    }
}
