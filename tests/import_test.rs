//! スプレッドシート取込の統合テスト

use chrono::NaiveDate;
use tempfile::tempdir;
use wms_qr::import;
use wms_qr_common::{parse_payload, to_payload, Amount};

const HEADER: &str = "PONumber,ReceivingNo,Supplier,ItemNo,Description,Quantity,SerialNumber,InvoiceNo,Location,ReceivingDate,Amount";

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

#[test]
fn test_csv_groups_by_po_number() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("po.csv");
    let content = format!(
        "{}\nPO-1,R-1,ACME,A-1,Bolt,10,,INV-1,A-01,2024-05-01,120.5\nPO-2,R-2,Globex,B-1,Nut,3,SN-9,INV-2,,,\nPO-1,R-1x,Other,A-2,Washer,5,,INV-1,A-02,2024-05-02,\n",
        HEADER
    );
    std::fs::write(&path, content).unwrap();

    let records = import::load_records(Some(&path), today()).unwrap();
    assert_eq!(records.len(), 2);

    let first = &records[0];
    assert_eq!(first.po_number, "PO-1");
    assert_eq!(first.receiving_no, "R-1");
    assert_eq!(first.supplier, "ACME");
    assert_eq!(first.item_count(), 2);
    assert_eq!(first.total_quantity(), 15.0);
    assert_eq!(first.items[0].amount, Amount::Number(wms_qr_common::JsonNumber(120.5)));
    assert_eq!(first.items[1].amount, Amount::unknown());

    let second = &records[1];
    assert_eq!(second.po_number, "PO-2");
    assert_eq!(second.items[0].serial_number, "SN-9");
    assert_eq!(second.items[0].location, "Unknown");
    assert_eq!(second.items[0].receiving_date, "2024-06-01");
}

#[test]
fn test_header_only_csv_gives_no_records() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("header.csv");
    std::fs::write(&path, format!("{}\n", HEADER)).unwrap();

    let records = import::load_records(Some(&path), today()).unwrap();
    assert!(records.is_empty());
}

#[test]
fn test_imported_record_payload_round_trip() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("po.csv");
    std::fs::write(&path, format!("{}\nPO-7,R-7,ACME,X,Widget,2,,INV,B-1,2024-01-05,9\n", HEADER)).unwrap();

    let records = import::load_records(Some(&path), today()).unwrap();
    let payload = to_payload(&records[0]).unwrap();
    assert!(payload.starts_with(r#"[{"PONumber":"PO-7""#));
    assert!(payload.contains(r#""Quantity":2,"#));

    let parsed = parse_payload(&payload).unwrap();
    assert_eq!(parsed, vec![records[0].clone()]);
}
