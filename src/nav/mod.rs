//! Route classification and the auth-driven navigation guard.

pub mod guard;

pub use guard::{GuardDecision, NavGuard, decide};
