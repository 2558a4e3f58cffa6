// ── Request handles ──
//
// A spawned operation's own view of itself: status, cancellation, and
// the eventual result. Independent of the shared `RequestState`.

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::error::CoreError;

/// Lifecycle of one spawned operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestStatus {
    Pending,
    Succeeded,
    Failed { message: String },
    Cancelled,
}

impl RequestStatus {
    pub(crate) fn from_result<T>(result: &Result<T, CoreError>) -> Self {
        match result {
            Ok(_) => Self::Succeeded,
            Err(CoreError::Cancelled) => Self::Cancelled,
            Err(err) => Self::Failed {
                message: err.request_message(),
            },
        }
    }
}

/// Handle to an operation started with [`Coordinator::spawn`](crate::Coordinator::spawn).
///
/// Dropping the handle does not cancel the operation.
pub struct RequestHandle<T> {
    task: JoinHandle<Result<T, CoreError>>,
    status: watch::Receiver<RequestStatus>,
    cancel: CancellationToken,
}

impl<T> RequestHandle<T> {
    pub(crate) fn new(
        task: JoinHandle<Result<T, CoreError>>,
        status: watch::Receiver<RequestStatus>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            task,
            status,
            cancel,
        }
    }

    /// Current status snapshot.
    pub fn status(&self) -> RequestStatus {
        self.status.borrow().clone()
    }

    /// Receiver for status changes.
    pub fn watch_status(&self) -> watch::Receiver<RequestStatus> {
        self.status.clone()
    }

    /// Cancel this operation only. Its failure is not recorded as `last_error`.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the operation to settle.
    pub async fn join(self) -> Result<T, CoreError> {
        match self.task.await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Err(CoreError::Cancelled),
            Err(e) => Err(CoreError::Internal(format!("request task failed: {e}"))),
        }
    }
}

impl<T> std::fmt::Debug for RequestHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestHandle")
            .field("status", &*self.status.borrow())
            .field("cancelled", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}
