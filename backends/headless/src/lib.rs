//! Recording headless backend for Estuary.
//!
//! Implements the toolkit boundary with no real widgets behind it: every
//! call is recorded in an operation log, properties land in an in-memory
//! store, and signals fire only when a test emits them. The op log is the
//! ground truth integration tests assert against.

pub use crate::op::Op;
pub use crate::toolkit::Headless;

mod op;
mod toolkit;
