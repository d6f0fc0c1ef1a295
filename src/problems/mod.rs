//! Problem record operations: list, get-one, create, update, delete.
//!
//! # Data Flow
//! ```text
//! routing table
//!     → handlers.rs (one or two upstream calls, response shaping)
//!     → upstream client
//!     → error.rs (404 / generic 500 with {message})
//! ```

pub mod error;
pub mod handlers;
pub mod types;

pub use error::ProblemError;
pub use types::{Message, NewProblem, ProblemDetail, WorkNoteFilter};
