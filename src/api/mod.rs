pub mod diagnostics;
pub mod http;

pub use diagnostics::{Diagnostic, DiagnosticSink, SilentSink, TracingSink};
pub use http::{HttpClient, RequestError, Transport, TransportFailure};
