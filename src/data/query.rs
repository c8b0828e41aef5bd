use log::debug;

use super::model::{BaseUnit, Cell, Quantity};
use super::table::compile_table;
use super::units::parse_quantity;
use crate::error::Result;

/// Lowest uncertainty among the cells containing (`x` volts, `y` hertz).
///
/// A cell matches when both coordinates fall inside its intervals, bounds
/// inclusive. Frequency intervals are single breakpoints, so `y` must equal
/// a tabulated column exactly. `None` when nothing matches.
pub fn min_uncertainty_at(cells: &[Cell], x: f64, y: f64) -> Option<f64> {
    cells
        .iter()
        .filter(|cell| cell.contains(x, y))
        .map(|cell| cell.z)
        .min_by(f64::total_cmp)
}

/// Normalize both query quantities and resolve them against compiled cells.
pub fn lookup_cells(x: &Quantity, y: &Quantity, cells: &[Cell]) -> Result<Option<f64>> {
    let xv = parse_quantity(x, BaseUnit::Volt)?;
    let yv = parse_quantity(y, BaseUnit::Hertz)?;
    let result = min_uncertainty_at(cells, xv, yv);
    debug!("lookup x={xv} V, y={yv} Hz over {} cells -> {result:?}", cells.len());
    Ok(result)
}

/// Compile `raw_table` and look up the uncertainty at (`x`, `y`).
pub fn lookup(x: &Quantity, y: &Quantity, raw_table: &str) -> Result<Option<f64>> {
    let cells = compile_table(raw_table)?;
    lookup_cells(x, y, &cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Interval;

    fn cell(v0: f64, v1: f64, f: f64, z: f64) -> Cell {
        Cell {
            x_range: Interval::closed(v0, v1),
            y_range: Interval::degenerate(f),
            z,
            priority: 0,
        }
    }

    fn cells() -> Vec<Cell> {
        vec![
            cell(0.1, 1.0, 1e4, 30.0),
            cell(1.0, 10.0, 1e4, 7.0),
            cell(1.0, 10.0, 5e4, 8.0),
            cell(10.0, 100.0, 1e4, 12.0),
        ]
    }

    #[test]
    fn overlapping_cells_resolve_to_minimum() {
        assert_eq!(min_uncertainty_at(&cells(), 1.0, 1e4), Some(7.0));
        assert_eq!(min_uncertainty_at(&cells(), 10.0, 1e4), Some(7.0));
        assert_eq!(min_uncertainty_at(&cells(), 0.5, 1e4), Some(30.0));
    }

    #[test]
    fn frequency_must_hit_breakpoint_exactly() {
        assert_eq!(min_uncertainty_at(&cells(), 2.0, 5e4), Some(8.0));
        assert_eq!(min_uncertainty_at(&cells(), 2.0, 5e4 + 1e-6), None);
        assert_eq!(min_uncertainty_at(&cells(), 2.0, 3e4), None);
    }

    #[test]
    fn out_of_range_is_absent() {
        assert_eq!(min_uncertainty_at(&cells(), 0.05, 1e4), None);
        assert_eq!(min_uncertainty_at(&cells(), 150.0, 1e4), None);
        assert_eq!(min_uncertainty_at(&[], 1.0, 1e4), None);
    }

    #[test]
    fn result_does_not_depend_on_cell_order() {
        let forward = cells();
        let mut reversed = cells();
        reversed.reverse();
        let mut rotated = cells();
        rotated.rotate_left(2);

        for (x, y) in [(1.0, 1e4), (10.0, 1e4), (0.5, 1e4), (5.0, 5e4), (0.01, 1e4)] {
            let expected = min_uncertainty_at(&forward, x, y);
            assert_eq!(min_uncertainty_at(&reversed, x, y), expected);
            assert_eq!(min_uncertainty_at(&rotated, x, y), expected);
        }
    }

    #[test]
    fn lookup_normalizes_units_first() {
        let got = lookup_cells(&Quantity::from("1000 mV"), &Quantity::from("10 kHz"), &cells());
        assert_eq!(got.unwrap(), Some(7.0));
    }

    #[test]
    fn lookup_propagates_unit_errors() {
        let err = lookup_cells(&Quantity::from("1 kHz"), &Quantity::from("10 kHz"), &cells());
        assert!(err.is_err());
    }
}
