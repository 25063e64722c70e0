//! # Application Module
//!
//! Domain registration and per-domain contract storage.

pub mod multi_domain;
pub mod registry;

pub use multi_domain::MultiDomainApp;
pub use registry::DomainRegistry;
