//! BikeStore
//!
//! Core domain library for the BikeStore Pro storefront: product catalog,
//! shopping cart, invoice arithmetic with the fixed 13% IVA, and assembly of
//! mocked Salvadoran electronic tax documents (DTE) with JSON/XML/PDF
//! renderings.

pub mod artifacts;
pub mod cart;
pub mod catalog;
pub mod dte;
pub mod fixtures;
pub mod invoice;
pub mod money;
