//! Batch processing: validate → lock → (metadata → dispatch) per request →
//! aggregate → unlock.

pub mod dispatch;
pub mod metadata;
pub mod results;
pub mod service;
pub mod validate;

pub use service::Service;
