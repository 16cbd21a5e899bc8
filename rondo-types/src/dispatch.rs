//! Dispatch abstraction over the control entry point.

use crate::{Query, QueryResult};

/// Trait for issuing control queries against an input.
///
/// Implementations must accept calls from any thread; queries take `&self`
/// so a controller can be shared behind an `Arc`.
pub trait Controller: Send + Sync {
    /// Dispatch a query and return its reply or failure.
    fn dispatch(&self, query: Query) -> QueryResult;
}
