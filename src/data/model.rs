use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

// ---------------------------------------------------------------------------
// BaseUnit – the two SI base units a query can resolve to
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BaseUnit {
    #[serde(rename = "V")]
    Volt,
    #[serde(rename = "Hz")]
    Hertz,
}

impl BaseUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            BaseUnit::Volt => "V",
            BaseUnit::Hertz => "Hz",
        }
    }
}

impl fmt::Display for BaseUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for BaseUnit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "V" => Ok(BaseUnit::Volt),
            "Hz" => Ok(BaseUnit::Hertz),
            other => Err(ValidationError::InvalidBase(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Quantity – a caller-supplied value awaiting normalization
// ---------------------------------------------------------------------------

/// A value the caller wants normalized to volts or hertz.
///
/// Deserializes from the JSON shapes accepted on the wire:
///
/// ```json
/// 500
/// [1, "V"]
/// {"value": 10, "unit": "V"}
/// "0.5 V"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    /// Already expressed in the base unit.
    Number(f64),
    Pair(f64, String),
    KeyValue { value: f64, unit: String },
    /// Free text such as `"500mV"` or `"0,5 V"`.
    Text(String),
}

impl Quantity {
    /// Read a quantity out of an arbitrary JSON value.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, ValidationError> {
        Quantity::deserialize(value)
            .map_err(|_| ValidationError::UnsupportedShape(value.to_string()))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Number(n) => write!(f, "{n}"),
            Quantity::Pair(n, unit) | Quantity::KeyValue { value: n, unit } => {
                write!(f, "{n} {unit}")
            }
            Quantity::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<f64> for Quantity {
    fn from(n: f64) -> Self {
        Quantity::Number(n)
    }
}

impl From<&str> for Quantity {
    fn from(s: &str) -> Self {
        Quantity::Text(s.to_string())
    }
}

impl From<(f64, &str)> for Quantity {
    fn from((n, unit): (f64, &str)) -> Self {
        Quantity::Pair(n, unit.to_string())
    }
}

// ---------------------------------------------------------------------------
// Interval / Cell – compiled validity regions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Interval {
    pub start: f64,
    pub end: f64,
    pub left_closed: bool,
    pub right_closed: bool,
}

impl Interval {
    /// `[start, end]`, both bounds inclusive.
    pub fn closed(start: f64, end: f64) -> Self {
        Interval {
            start,
            end,
            left_closed: true,
            right_closed: true,
        }
    }

    /// A single breakpoint, `[point, point]`.
    pub fn degenerate(point: f64) -> Self {
        Interval::closed(point, point)
    }

    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, v: f64) -> bool {
        let above = if self.left_closed {
            self.start <= v
        } else {
            self.start < v
        };
        let below = if self.right_closed {
            v <= self.end
        } else {
            v < self.end
        };
        above && below
    }
}

/// One rectangular region of an uncertainty table: a voltage range crossed
/// with a single frequency breakpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    /// Voltage interval, volts.
    #[serde(rename = "x")]
    pub x_range: Interval,
    /// Frequency interval, hertz. Always degenerate.
    #[serde(rename = "y")]
    pub y_range: Interval,
    /// Stated uncertainty.
    pub z: f64,
    /// Always 0; kept for diagnostic output.
    pub priority: i32,
}

impl Cell {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.x_range.contains(x) && self.y_range.contains(y)
    }
}
