//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (assign/propagate request ID)
//!     → convert.rs (validate fields, pick chart, match size)
//!     → response.rs (JSON success body or mapped error)
//!     → Send to client
//! ```

pub mod convert;
pub mod request;
pub mod response;
pub mod server;

pub use convert::ConvertRequest;
pub use request::{MakeRequestUuid, RequestIdExt, X_REQUEST_ID};
pub use response::{ConversionInput, ConvertError, ConvertResponse};
pub use server::{AppState, HttpServer};
