//! Primitive value generators.
//!
//! These are the building blocks the domain catalogs compose: templated
//! strings, numeric ranges, dates, UUIDs, and the type-driven fallback for
//! columns nothing is registered for.

pub mod fallback;
pub mod numeric;
pub mod pattern;
pub mod timestamp;
pub mod uuid;

pub use fallback::{generate_for_type, generate_key_for_type};
pub use pattern::generate_pattern;
