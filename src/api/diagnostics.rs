//! Human readable hints for failed requests.
//!
//! The observer only reports; it never changes the error returned to the caller.

use std::fmt;

use crate::api::http::TransportFailure;

/// Hint emitted for selected HTTP failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// 401 response
    Unauthorized,
    /// 400 response, with the server message or the status code
    BadRequest(String),
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Unauthorized => {
                write!(f, "Unauthorized: Please check your API key or organization ID")
            }
            Diagnostic::BadRequest(detail) => write!(f, "Bad Request: {}", detail),
        }
    }
}

/// Receives diagnostics. Implementations must not panic; if one does, the
/// panic is caught and logged and the request error is returned unchanged.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: &Diagnostic);
}

/// Default sink, logs through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        tracing::error!("{}", diagnostic);
    }
}

/// Drops every diagnostic
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSink;

impl DiagnosticSink for SilentSink {
    fn report(&self, _diagnostic: &Diagnostic) {}
}

/// Map a failure to a diagnostic. Only 401 and 400 responses produce one.
pub fn diagnose(failure: &TransportFailure) -> Option<Diagnostic> {
    match failure.status_code()? {
        401 => Some(Diagnostic::Unauthorized),
        400 => Some(Diagnostic::BadRequest(
            failure
                .response_message()
                .map(str::to_string)
                .unwrap_or_else(|| "400".to_string()),
        )),
        _ => None,
    }
}
