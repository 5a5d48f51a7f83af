//! Endpoint registry for the media backup backend.
//!
//! The registry is a compile-time table: the set of endpoints is a closed
//! enum and the default base address is a constant. Unknown endpoint names
//! can only enter through [`Endpoint::from_str`](std::str::FromStr), which
//! rejects them.

mod api_config;
pub mod constants;
mod endpoint;

pub use api_config::{ApiConfig, ApiConfigBuilder, ApiConfigError, api_url};
pub use endpoint::{Endpoint, UnknownEndpointError};
