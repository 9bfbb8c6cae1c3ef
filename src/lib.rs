//! Aisler core: slug-addressed shopping lists with checked-state
//! reconciliation, aisle grouping and version polling.
//!
//! The natural-language categorization and edit interpretation live upstream;
//! this crate receives already-parsed candidate items and owns persistence.

pub mod catalog;
pub mod config;
pub mod db;
pub mod models;
pub mod reconcile;
pub mod server;
pub mod slug;
pub mod view;
