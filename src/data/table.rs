use log::debug;
use serde_json::Value as JsonValue;

use super::model::{Cell, Interval};
use super::units::coerce_number;
use crate::error::FormatError;

/// Units accepted inside table labels. Deliberately narrower than the SI
/// prefix table used for queries.
const TABLE_UNITS: [(&str, f64); 6] = [
    ("Hz", 1.0),
    ("kHz", 1e3),
    ("MHz", 1e6),
    ("V", 1.0),
    ("mV", 1e-3),
    ("kV", 1e3),
];

/// Marks a grid position with no stated uncertainty.
const NO_DATA: &str = "-";

// ---------------------------------------------------------------------------
// TableGrid – bounds-checked view of the `row_N` / `col_M` wire format
// ---------------------------------------------------------------------------

/// Raw uncertainty table as an ordered 2-D grid, addressed 1-based.
///
/// The wire format is a JSON object of row objects:
///
/// ```json
/// {
///   "row_1": {"col_1": "Voltage", "col_2": "10 kHz", "col_3": "20 kHz"},
///   "row_2": {"col_1": "0.1 V to 1 V", "col_2": "30", "col_3": "-"}
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TableGrid {
    rows: Vec<GridRow>,
}

#[derive(Debug, Clone, PartialEq)]
struct GridRow {
    /// Cells by column index - 1. `None` where the column key was absent.
    cells: Vec<Option<String>>,
    /// Number of column keys present in the row.
    width: usize,
}

impl TableGrid {
    pub fn parse(raw: &str) -> Result<Self, FormatError> {
        let root: JsonValue = serde_json::from_str(raw)?;
        let obj = root.as_object().ok_or(FormatError::NotAGrid)?;

        let entries = obj
            .iter()
            .map(|(key, row_val)| Ok((grid_index(key, "row_")?, row_val)))
            .collect::<Result<Vec<_>, FormatError>>()?;
        // An index past the key count means some lower row is absent.
        let row_indices: Vec<usize> = entries.iter().map(|&(row, _)| row).collect();
        if row_indices.iter().any(|&row| row > obj.len()) {
            return Err(FormatError::MissingRow(first_gap(&row_indices)));
        }

        let mut slots: Vec<Option<GridRow>> = vec![None; obj.len()];
        for (row, row_val) in entries {
            let row_obj = row_val.as_object().ok_or(FormatError::NotAGrid)?;

            let columns = row_obj
                .iter()
                .map(|(col_key, cell_val)| Ok((grid_index(col_key, "col_")?, cell_val)))
                .collect::<Result<Vec<_>, FormatError>>()?;
            let col_indices: Vec<usize> = columns.iter().map(|&(col, _)| col).collect();
            if col_indices.iter().any(|&col| col > row_obj.len()) {
                let col = first_gap(&col_indices);
                return Err(FormatError::MissingColumn { row, col });
            }

            let mut cells: Vec<Option<String>> = vec![None; row_obj.len()];
            for (col, cell_val) in columns {
                let text = cell_val
                    .as_str()
                    .ok_or(FormatError::NonStringCell { row, col })?;
                cells[col - 1] = Some(text.to_string());
            }

            slots[row - 1] = Some(GridRow {
                cells,
                width: row_obj.len(),
            });
        }

        let rows = slots
            .into_iter()
            .enumerate()
            .map(|(i, slot)| slot.ok_or(FormatError::MissingRow(i + 1)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TableGrid { rows })
    }

    /// Number of rows, header included.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns declared by `row`.
    pub fn width(&self, row: usize) -> Result<usize, FormatError> {
        self.row(row).map(|r| r.width)
    }

    /// Text at (`row`, `col`), both 1-based.
    pub fn cell(&self, row: usize, col: usize) -> Result<&str, FormatError> {
        self.row(row)?
            .cells
            .get(col.wrapping_sub(1))
            .and_then(|c| c.as_deref())
            .ok_or(FormatError::MissingColumn { row, col })
    }

    fn row(&self, row: usize) -> Result<&GridRow, FormatError> {
        self.rows
            .get(row.wrapping_sub(1))
            .ok_or(FormatError::MissingRow(row))
    }
}

fn grid_index(key: &str, prefix: &str) -> Result<usize, FormatError> {
    key.strip_prefix(prefix)
        .and_then(|n| n.parse::<usize>().ok())
        .filter(|&n| n >= 1)
        .ok_or_else(|| FormatError::InvalidKey(key.to_string()))
}

/// Lowest index in `1..=indices.len()` that no key claims.
fn first_gap(indices: &[usize]) -> usize {
    let mut seen = vec![false; indices.len()];
    for &i in indices {
        if let Some(slot) = seen.get_mut(i - 1) {
            *slot = true;
        }
    }
    seen.iter().position(|&s| !s).map_or(indices.len() + 1, |p| p + 1)
}

// ---------------------------------------------------------------------------
// Compilation
// ---------------------------------------------------------------------------

/// Compile raw table text into its validity cells, in row-major order.
///
/// Any malformed label, key or cell fails the whole table.
pub fn compile_table(raw: &str) -> Result<Vec<Cell>, FormatError> {
    let grid = TableGrid::parse(raw)?;
    compile_grid(&grid)
}

pub fn compile_grid(grid: &TableGrid) -> Result<Vec<Cell>, FormatError> {
    let frequencies = (2..=grid.width(1)?)
        .map(|col| parse_table_value(grid.cell(1, col)?))
        .collect::<Result<Vec<f64>, _>>()?;

    let mut cells = Vec::new();
    for row in 2..=grid.row_count() {
        let voltage = parse_voltage_label(grid.cell(row, 1)?)?;

        for (offset, &frequency) in frequencies.iter().enumerate() {
            let col = offset + 2;
            let text = grid.cell(row, col)?;
            if text.trim() == NO_DATA {
                continue;
            }
            let z = coerce_number(text).map_err(|_| FormatError::InvalidNumber {
                row,
                col,
                value: text.to_string(),
            })?;
            cells.push(Cell {
                x_range: voltage,
                y_range: Interval::degenerate(frequency),
                z,
                priority: 0,
            });
        }
    }

    debug!(
        "compiled {} cells from {} data rows x {} frequency columns",
        cells.len(),
        grid.row_count().saturating_sub(1),
        frequencies.len()
    );
    Ok(cells)
}

/// `"1 V to 10 V"` becomes `[1, 10]`; a single value becomes `[v, v]`.
fn parse_voltage_label(label: &str) -> Result<Interval, FormatError> {
    if !label.contains("to") {
        let v = parse_table_value(label)?;
        return Ok(Interval::degenerate(v));
    }
    match label.split("to").collect::<Vec<_>>().as_slice() {
        [start, end] => {
            let (start, end) = (parse_table_value(start)?, parse_table_value(end)?);
            if start > end {
                return Err(FormatError::InvalidLabel(label.to_string()));
            }
            Ok(Interval::closed(start, end))
        }
        _ => Err(FormatError::InvalidLabel(label.to_string())),
    }
}

/// Parse `"<number> <unit>"` (space optional) against [`TABLE_UNITS`].
fn parse_table_value(label: &str) -> Result<f64, FormatError> {
    let s = label.trim();
    let (number, unit) = if s.contains(char::is_whitespace) {
        match s.split_whitespace().collect::<Vec<_>>().as_slice() {
            [number, unit] => (number.to_string(), unit.to_string()),
            _ => return Err(FormatError::InvalidLabel(label.to_string())),
        }
    } else {
        let number: String = s
            .chars()
            .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ','))
            .collect();
        if number.is_empty() {
            return Err(FormatError::InvalidLabel(label.to_string()));
        }
        let unit = s.replace(&number, "");
        (number, unit)
    };

    let value = coerce_number(&number).map_err(|_| FormatError::InvalidLabel(label.to_string()))?;
    let multiplier = TABLE_UNITS
        .iter()
        .find(|(u, _)| *u == unit)
        .map(|&(_, m)| m)
        .ok_or(FormatError::UnknownUnit(unit))?;
    Ok(value * multiplier)
}
