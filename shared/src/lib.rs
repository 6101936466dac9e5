//! Shared types for the Comanda platform
//!
//! Wire models and request/response DTOs used by the server and by API
//! clients. Everything here is plain serde data: no persistence types, no
//! framework types.

pub mod client;
pub mod models;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::Role;
pub use response::{ApiResponse, FieldError};
