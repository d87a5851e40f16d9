//! BikeStore App
//!
//! Application services for the storefront: session state with key-value
//! persistence, demo authentication, checkout, invoice and DTE-record
//! lifecycles, the simulated mail transport and artifact downloads.

pub mod auth;
pub mod checkout;
pub mod downloads;
pub mod mailer;
pub mod records;
pub mod session;
pub mod store;
