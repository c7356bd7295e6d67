//! Core tax engine for freelancers filing under India's income-tax regimes.
//!
//! [`calculations`] holds the slab calculator and everything built on it,
//! [`vault`] reports on money set aside for tax, and [`format`] renders
//! amounts for people to read.

pub mod calculations;
pub mod error;
pub mod format;
pub mod models;
pub mod vault;

pub use error::InvalidInput;
pub use models::*;
