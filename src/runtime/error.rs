use thiserror::Error;

/// Errors returned by [`RuntimeHandle`](super::RuntimeHandle) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// The runtime loop has stopped; the request could not be delivered or
    /// answered.
    #[error("Runtime is no longer mounted")]
    Unmounted,
}
