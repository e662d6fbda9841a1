//! Globe map and season charts of a club's player transfers.
//!
//! The [`data`] layer loads and aggregates the transfer table, [`series`]
//! shapes the aggregates for plotting, [`controller`] owns the selected
//! season, and [`ui`] draws everything with egui.

pub mod app;
pub mod color;
pub mod config;
pub mod controller;
pub mod data;
pub mod geo;
pub mod series;
pub mod state;
pub mod ui;
