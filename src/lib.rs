//! Rate and date computation engine for household goods moves.
//!
//! This crate classifies dates into tariff performance and rate periods,
//! plans pack, pickup, transit and delivery dates on a US federal business
//! calendar, and looks up banded linehaul rates with diagnostics for
//! queries that match no tariff row.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod route;
pub mod store;
