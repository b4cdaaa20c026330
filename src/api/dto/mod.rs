//! Data Transfer Objects for REST request/response serialization.
//!
//! Response field names follow the sensor-facing wire contract
//! (`avg_7days`, `displayMonth`, ...) rather than Rust naming.

pub mod consumption_dto;
pub mod payment_dto;
pub mod reading_dto;
pub mod usage_dto;

pub use consumption_dto::*;
pub use payment_dto::*;
pub use reading_dto::*;
pub use usage_dto::*;
