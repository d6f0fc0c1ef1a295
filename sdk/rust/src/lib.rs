//! Rust client for the problem gateway API.

pub mod client;

pub use client::{ProblemClient, ProblemDetail, SdkError};
