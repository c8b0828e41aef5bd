use cmc_lookup::registry::{RegistryResponse, TableSummary};
use cmc_lookup::store::{self, ResponseStore, DEFAULT_PREFIX};
use cmc_lookup::{lookup, Quantity};
use serde_json::json;

const TABLE: &str = include_str!("fixtures/reference_table.json");

fn response() -> serde_json::Value {
    json!({
        "data": [
            {
                "id": 1001,
                "kcdbCode": "AR-EM-1",
                "quantityValue": "AC voltage source",
                "uncertaintyTable": {"tableContents": TABLE}
            },
            {
                "id": 1002,
                "kcdbCode": "AR-EM-2",
                "quantityValue": "AC voltage meter",
                "uncertaintyTable": {"tableContents": "<masked>"}
            }
        ]
    })
}

#[test]
fn stored_response_can_be_queried_by_id() {
    let dir = tempfile::tempdir().unwrap();
    let store = ResponseStore::new(dir.path());
    let path = store.save(DEFAULT_PREFIX, &response().to_string()).unwrap();

    let loaded = store::load(&path).unwrap();
    assert_eq!(
        loaded.candidate_tables(),
        vec![TableSummary {
            id: Some(1001),
            kcdb_code: "AR-EM-1".into(),
            quantity_value: "AC voltage source".into(),
        }]
    );

    let table = loaded.table_contents(1001).unwrap();
    let result = lookup(&Quantity::from("0.5 V"), &Quantity::from("10 kHz"), table).unwrap();
    assert_eq!(result, Some(30.0));
}

#[test]
fn masked_table_cannot_be_queried() {
    let resp = RegistryResponse::from_json(&response()).unwrap();
    assert!(resp.table_contents(1002).is_err());
}

#[test]
fn stored_file_keeps_original_key_order() {
    let dir = tempfile::tempdir().unwrap();
    let store = ResponseStore::new(dir.path());
    let raw = r#"{"zeta": 1, "data": [{"uncertaintyTable": {"tableContents": "<masked>"}, "id": 5}]}"#;

    let first = store.save(DEFAULT_PREFIX, raw).unwrap();
    let second = store.save(DEFAULT_PREFIX, raw).unwrap();
    assert_ne!(first, second);
    assert_eq!(std::fs::read_to_string(&first).unwrap(), raw);
    assert_eq!(store.list().unwrap(), vec![first, second]);
}
