use tokio_util::sync::CancellationToken;

/// Cancellation token for exactly one outstanding provider call.
///
/// Clones share the same token: invalidating any clone invalidates them all.
#[derive(Debug, Clone)]
pub struct RequestHandle {
    sequence: u64,
    token: CancellationToken,
}

impl RequestHandle {
    pub(crate) fn new(sequence: u64) -> Self {
        Self {
            sequence,
            token: CancellationToken::new(),
        }
    }

    /// Issue order within the owning orchestrator.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn invalidate(&self) {
        self.token.cancel();
    }

    pub fn is_valid(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Resolves once the handle has been invalidated.
    pub async fn invalidated(&self) {
        self.token.cancelled().await
    }

    pub(crate) fn is_same(&self, other: &RequestHandle) -> bool {
        self.sequence == other.sequence
    }
}
