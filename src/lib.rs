//! Core of the lithium/cobalt trade viewer: loading, normalizing and querying
//! UN Comtrade-derived net weight records.
//!
//! The egui front-end (`src/main.rs`) and the `trade-query` CLI both sit on top
//! of this crate; neither does any data work of its own.

pub mod config;
pub mod data;
pub mod error;

pub use error::{Result, TradeError};
