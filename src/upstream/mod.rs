//! Upstream ITSM table API.
//!
//! # Data Flow
//! ```text
//! problems handler
//!     → client.rs (URL, basic auth, send)
//!     → {base}/api/now/table/{table}[/{id}]
//!     → types.rs ({result} envelope, empty-result detection, errors)
//! ```
//!
//! # Design Decisions
//! - One shared reqwest client; pooling is whatever reqwest does by default
//! - Status codes are not interpreted beyond success vs. failure
//! - Credentials come from an immutable config captured at construction

pub mod client;
pub mod types;

pub use client::UpstreamClient;
pub use types::{is_falsy, UpstreamError, UpstreamResult, JOURNAL_TABLE, PROBLEM_TABLE};
