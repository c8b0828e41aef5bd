//! Calibration uncertainty lookup over KCDB CMC uncertainty tables.
//!
//! A table maps (voltage range, frequency) to a stated uncertainty. Queries
//! arrive with arbitrary SI-prefixed units and resolve to the lowest
//! uncertainty among the table regions containing them.

pub mod config;
pub mod data;
pub mod error;
pub mod registry;
pub mod store;

pub use data::cache::TableCache;
pub use data::model::{BaseUnit, Cell, Interval, Quantity};
pub use data::query::{lookup, lookup_cells, min_uncertainty_at};
pub use data::table::{compile_table, TableGrid};
pub use data::units::{convert_with_unit, parse_quantity, parse_quantity_str};
pub use error::{FormatError, LookupError, UnitError, ValidationError};
