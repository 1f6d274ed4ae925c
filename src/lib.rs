//! Shoe Size Converter Library
//!
//! Converts a shoe size between the US, EU, UK and CM scales using static
//! men's and women's reference charts, served over HTTP with Axum.

// Core
pub mod sizing;
pub mod http;

// Cross-cutting concerns
pub mod config;
pub mod lifecycle;
pub mod observability;

pub use config::schema::ConverterConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use sizing::{find_closest, Gender, MatchError, Scale, SizeChart, SizeInput, SizeRow};
