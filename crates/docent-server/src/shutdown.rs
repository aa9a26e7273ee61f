//! Shutdown signal shared by the serve loop and every live session.
//!
//! One `CancellationToken` fans out to the axum accept loop and each
//! WebSocket session task. Cancelling it makes sessions send a Close
//! frame and run their normal teardown, so registry rows are removed
//! on the way down rather than orphaned.

use tokio_util::sync::CancellationToken;

/// Owns the shutdown token and hands out listeners.
pub struct ShutdownCoordinator {
    token: CancellationToken,
}

impl ShutdownCoordinator {
    /// A coordinator that has not been triggered.
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// A token clone for a task that should stop on shutdown.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Trigger shutdown. Safe to call more than once.
    pub fn shutdown(&self) {
        self.token.cancel();
    }

    /// Whether shutdown has been triggered.
    pub fn is_shutting_down(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once shutdown is triggered.
    pub async fn cancelled(&self) {
        self.token.cancelled().await;
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
