//! Session-scoped product selection funnel
//!
//! A conversation walks blueprint -> print provider -> variant. Each turn
//! is one call on [`SelectionStateMachine`] against the caller's
//! [`SessionContext`]; the reply is always a structured [`Reply`], with
//! upstream failures, bad indices and out-of-order calls folded into it.

pub mod context;
pub mod dispatch;
pub mod machine;
pub mod reply;
pub mod store;

pub use context::{Selection, SessionContext, Stage};
pub use dispatch::ToolCall;
pub use machine::SelectionStateMachine;
pub use reply::{Outcome, ProductSummary, Reply, REPLY_TYPE};
pub use store::{InMemorySessionStore, SessionContextStore};
