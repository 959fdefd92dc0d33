//! Base trait for messages in the update loop.

use std::fmt::Debug;

/// Marker trait for message types.
///
/// Messages represent:
/// - User actions dispatched from a view
/// - Results of asynchronous commands
/// - Messages re-tagged from an embedded child component
///
/// Each component declares one closed enum of messages; `update` matches
/// it exhaustively.
pub trait Message: Debug + Send + 'static {}
