//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, CORS, body limit, request ID, tracing)
//!     → request.rs (request ID generation, lenient JSON body)
//!     → routing table → problem handlers
//!     → Send to client
//! ```

pub mod request;
pub mod server;

pub use request::{JsonBody, MakeRequestUuidV4, X_REQUEST_ID};
pub use server::{AppState, HttpServer, ALLOWED_ORIGINS};
