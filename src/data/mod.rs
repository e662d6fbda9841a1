//! Data layer: core types, loading, validation and aggregation.
//!
//! Architecture:
//! ```text
//!  .json / .csv / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse + validate rows → Dataset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  Dataset  │  Vec<TransferRecord>, season index
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ aggregate  │  season filter, fee totals, direction counts
//!   └───────────┘
//! ```

pub mod aggregate;
pub mod error;
pub mod export;
pub mod loader;
pub mod model;
