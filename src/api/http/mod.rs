pub mod client;
pub mod models;
pub mod transport;

pub use client::{HttpClient, API_KEY_HEADER, ORGANIZATION_ID_HEADER};
pub use models::{FailureBody, FailureResponse, RequestError, TransportFailure};
pub use transport::{OutgoingRequest, ReqwestTransport, Transport};
