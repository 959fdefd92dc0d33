//! Model-Update-View primitives.
//!
//! # Architecture
//!
//! ```text
//! Message ──→ update ──→ State ──→ view
//!    ↑          │                   │
//!    │          └──→ Command ───────┤
//!    └──────────────────────────────┘
//! ```
//!
//! - **State**: an [`Immutable`](crate::state::Immutable) snapshot
//! - **Message**: user actions or command results
//! - **update**: the only place state transitions happen; returns the next
//!   snapshot plus zero or more [`Command`]s
//! - **Command**: asynchronous work that ends in a [`Transform`] applied to
//!   whatever state is current when it resolves

mod command;
mod component;
mod message;
mod update;

pub use command::{Command, Transform};
pub use component::Component;
pub use message::Message;
pub use update::Update;
