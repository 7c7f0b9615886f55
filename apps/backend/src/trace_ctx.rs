//! Request-scoped trace id.
//!
//! `RequestTrace` scopes the id around the handler future; error rendering,
//! security events and DB error mapping read it back from here so every
//! log line and problem body for a request carries the same id.

use std::future::Future;
use std::sync::Arc;

use tokio::task_local;

/// Reported when code runs outside any request scope (startup, migrations).
pub const UNKNOWN_TRACE_ID: &str = "unknown";

task_local! {
    static TRACE_ID: Arc<str>;
}

/// Trace id as stored in request extensions by `RequestTrace`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceId(pub Arc<str>);

impl TraceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The trace id of the request being served, if any.
pub fn current() -> Option<Arc<str>> {
    TRACE_ID.try_with(Arc::clone).ok()
}

pub fn trace_id() -> String {
    current()
        .map(|id| id.to_string())
        .unwrap_or_else(|| UNKNOWN_TRACE_ID.to_string())
}

pub async fn with_trace_id<F, R>(trace_id: impl Into<Arc<str>>, future: F) -> R
where
    F: Future<Output = R>,
{
    TRACE_ID.scope(trace_id.into(), future).await
}
