// roster-api: HTTP client for the student records service.
//
// One round-trip per call, no caching, no retries. Higher-level state
// management lives in `roster-core`.

pub mod client;
pub mod error;
pub mod models;
mod students;
pub mod transport;

pub use client::StudentClient;
pub use error::Error;
pub use models::{CreateStudentRequest, StudentResponse, WireId};
pub use transport::{TlsMode, TransportConfig};
