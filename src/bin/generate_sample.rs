use anyhow::{Context, Result};
use serde_json::{json, Map, Value as JsonValue};

/// Frequency breakpoints of the sample AC voltage table.
const FREQUENCIES: [&str; 8] = [
    "10 kHz", "20 kHz", "50 kHz", "70 kHz", "200 kHz", "500 kHz", "700 kHz", "1 MHz",
];

/// (voltage label, uncertainty per frequency column). `-` means no data.
const ROWS: [(&str, [&str; 8]); 6] = [
    ("0.1 mV to 1 mV", ["30", "30", "35", "40", "80", "90", "100", "120"]),
    ("0.1 V to 1 V", ["30", "30", "35", "40", "80", "90", "100", "120"]),
    ("1 V to 10 V", ["7", "7", "8", "15", "20", "30", "45", "60"]),
    ("10 V to 100 V", ["12", "12", "14", "18", "25", "-", "-", "-"]),
    ("100 V to 1000 V", ["25", "30", "35", "40", "-", "-", "-", "-"]),
    ("1000 V", ["20", "-", "-", "-", "-", "-", "-", "-"]),
];

/// Build the `row_N` / `col_M` grid for the sample table.
fn table_contents() -> JsonValue {
    let mut grid = Map::new();

    let mut header = Map::new();
    header.insert("col_1".into(), json!("Voltage / Frequency"));
    for (i, freq) in FREQUENCIES.iter().enumerate() {
        header.insert(format!("col_{}", i + 2), json!(freq));
    }
    grid.insert("row_1".into(), JsonValue::Object(header));

    for (r, (voltage, values)) in ROWS.iter().enumerate() {
        let mut row = Map::new();
        row.insert("col_1".into(), json!(voltage));
        for (i, value) in values.iter().enumerate() {
            row.insert(format!("col_{}", i + 2), json!(value));
        }
        grid.insert(format!("row_{}", r + 2), JsonValue::Object(row));
    }

    JsonValue::Object(grid)
}

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_response.json".to_string());

    let response = json!({
        "totalElements": 2,
        "data": [
            {
                "id": 1001,
                "kcdbCode": "AR-EM-SAMPLE-1",
                "quantityValue": "AC voltage source",
                "uncertaintyTable": {
                    "tableContents": table_contents().to_string()
                }
            },
            {
                "id": 1002,
                "kcdbCode": "AR-EM-SAMPLE-2",
                "quantityValue": "AC voltage meter",
                "uncertaintyTable": {
                    "tableContents": "<masked>"
                }
            }
        ]
    });

    let text = serde_json::to_string_pretty(&response)?;
    std::fs::write(&output_path, text).with_context(|| format!("writing {output_path}"))?;

    println!(
        "Wrote sample response ({} voltage rows x {} frequencies) to {output_path}",
        ROWS.len(),
        FREQUENCIES.len()
    );
    Ok(())
}
