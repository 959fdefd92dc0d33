use thiserror::Error;

use super::lens::KeyPath;

/// Errors raised when navigating a state value along a path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// The path does not resolve in the current value (wrong variant,
    /// index out of bounds).
    #[error("Path '{path}' does not exist in the current state")]
    Missing { path: KeyPath },
}
