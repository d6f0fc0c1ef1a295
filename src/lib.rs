//! Problem Gateway Library
//!
//! A thin HTTP backend that exposes CRUD over an ITSM platform's problem
//! table, forwarding each call to the upstream table API with basic-auth
//! credentials.
//!
//! # Architecture Overview
//!
//! ```text
//!     Frontend                 ┌──────────────────────────────────────────────┐
//!     ─────────────────────────┼─▶ http::server  (CORS, body limit, req ID)   │
//!                              │        │                                     │
//!                              │        ▼                                     │
//!                              │   routing  (/api route table)                │
//!                              │        │                                     │
//!                              │        ▼                                     │
//!                              │   problems::handlers  (1-2 calls per op)     │
//!                              │        │                                     │
//!                              │        ▼                                     │
//!                              │   upstream::client  ──────────────────────── ┼──▶ {base}/api/now/table/...
//!                              │                                              │
//!                              │   config · observability · lifecycle         │
//!                              └──────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod problems;
pub mod routing;
pub mod upstream;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
