//! pet-core: stable foundation for the porous-electrode simulation stack.
//!
//! Contains:
//! - ids (electrode/region labels and particle references)
//! - numeric (Real + float helpers)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use ids::*;
pub use numeric::*;
