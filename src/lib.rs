//! Vitrine Application Library
//!
//! This library provides the catalog and blog modules and shared utilities.

pub mod modules;
pub mod utils;
