//! Generator catalogs for the four FSI domains.
//!
//! Domain registrations come first so they shadow the shared generators in
//! [`common`] for the tables they own.

pub mod common;
pub mod consumer_banking;
pub mod enterprise;
pub mod mortgage_servicing;
pub mod small_business_banking;

use crate::registry::GeneratorRegistry;
use fsi_core::GeneratorError;

/// Registry with every domain catalog loaded.
pub fn default_registry() -> Result<GeneratorRegistry, GeneratorError> {
    let mut registry = GeneratorRegistry::new();
    consumer_banking::register(&mut registry)?;
    enterprise::register(&mut registry)?;
    mortgage_servicing::register(&mut registry)?;
    small_business_banking::register(&mut registry)?;
    common::register(&mut registry)?;
    Ok(registry)
}
