//! Blocking client for the Clever v3.0 REST API with a client-side request gate.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod output;
pub mod rate;
pub mod resources;
pub mod types;

pub use client::CleverClient;
pub use config::Config;
pub use error::{ClientError, OutputError, TransportError};
pub use resources::{ListParams, ResourceKind};
pub use types::{QueryValue, RequestSpec};
