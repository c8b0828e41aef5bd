//! Lookup engine: quantities, table compilation, and range queries.
//!
//! Architecture:
//! ```text
//!  tableContents (row_N / col_M JSON)      "0.5 V", [1, "V"], 500 ...
//!        │                                        │
//!        ▼                                        ▼
//!   ┌──────────┐                            ┌──────────┐
//!   │  table    │  grid → Vec<Cell>          │  units    │  Quantity → f64
//!   └──────────┘                            └──────────┘
//!        │                                        │
//!        └──────────────┬─────────────────────────┘
//!                       ▼
//!                 ┌──────────┐
//!                 │  query    │  matching cells → min z
//!                 └──────────┘
//! ```
//!
//! `cache` sits in front of `table` when the same text is looked up often.

pub mod cache;
pub mod model;
pub mod query;
pub mod table;
pub mod units;
