//! QRコード出力の統合テスト

use std::fs::File;
use tempfile::tempdir;
use wms_qr::error::WmsQrError;
use wms_qr::export::{bulk, single};
use wms_qr_common::export::{MarginStyle, QrStyle};
use wms_qr_common::{Item, PurchaseOrderRecord};

fn create_test_record(index: usize) -> PurchaseOrderRecord {
    let mut record = PurchaseOrderRecord::new(
        format!("PO-{}", index),
        format!("RCV-{}", index),
        "ACME",
    );
    record.items.push(Item {
        item_no: format!("ITEM-{}", index).into(),
        description: format!("テスト品{}", index).into(),
        quantity: wms_qr_common::JsonNumber(index as f64),
        serial_number: "Default-SN".into(),
        invoice_no: "INV-1".into(),
        location: "A-01".into(),
        receiving_date: "2024-06-01".into(),
        amount: wms_qr_common::Amount::unknown(),
    });
    record
}

#[test]
fn test_single_png_has_margin() {
    let dir = tempdir().expect("Failed to create temp dir");
    let record = create_test_record(1);
    let payload = wms_qr_common::to_payload(&record).unwrap();

    let path = single::save_single(&payload, dir.path(), &QrStyle::single(), &MarginStyle::default())
        .expect("単票PNGの保存に失敗");

    assert_eq!(path, dir.path().join("barcode.png"));

    let image = image::open(&path).expect("PNGを開けない").to_rgba8();
    assert_eq!(image.dimensions(), (296, 296));
    // 角は余白色
    assert_eq!(image.get_pixel(0, 0).0, [0xcc, 0xcc, 0xcc, 0xff]);
}

#[test]
fn test_single_explicit_file_name() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("labels").join("po-1.png");

    let path = single::save_single("[]", &output, &QrStyle::single(), &MarginStyle::default()).unwrap();
    assert_eq!(path, output);
    assert!(output.exists());
}

#[tokio::test]
async fn test_archive_contains_every_record() {
    let dir = tempdir().expect("Failed to create temp dir");
    let records: Vec<PurchaseOrderRecord> = (1..=4).map(create_test_record).collect();

    let summary = bulk::save_archive(&records, dir.path(), QrStyle::bulk())
        .await
        .expect("ZIP生成に失敗");

    assert_eq!(summary.path, dir.path().join("barcodes.zip"));
    assert_eq!(summary.entries, 4);
    assert!(summary.skipped.is_empty());

    let mut archive = zip::ZipArchive::new(File::open(&summary.path).unwrap()).unwrap();
    assert_eq!(archive.len(), 4);
    for i in 0..4 {
        let name = format!("barcode-{}.png", i + 1);
        assert!(archive.by_name(&name).is_ok(), "{} がない", name);
    }
}

#[tokio::test]
async fn test_archive_of_empty_list() {
    let dir = tempdir().expect("Failed to create temp dir");
    let summary = bulk::save_archive(&[], dir.path(), QrStyle::bulk()).await.unwrap();
    assert_eq!(summary.entries, 0);
    assert!(summary.path.exists());
}

#[tokio::test]
async fn test_save_each_writes_numbered_files() {
    let dir = tempdir().expect("Failed to create temp dir");
    let records: Vec<PurchaseOrderRecord> = (1..=3).map(create_test_record).collect();

    let paths = bulk::save_each(&records, dir.path(), QrStyle::bulk()).await.unwrap();
    assert_eq!(paths.len(), 3);
    assert!(dir.path().join("barcode-3.png").exists());

    let image = image::open(dir.path().join("barcode-1.png")).unwrap();
    assert_eq!((image.width(), image.height()), (150, 150));
}

#[test]
fn test_save_record_by_number() {
    let dir = tempdir().expect("Failed to create temp dir");
    let records: Vec<PurchaseOrderRecord> = (1..=3).map(create_test_record).collect();

    let path = bulk::save_record(&records, 2, dir.path(), &QrStyle::bulk()).unwrap();
    assert_eq!(path, dir.path().join("barcode-2.png"));
    assert!(path.exists());
}

#[test]
fn test_save_record_out_of_range() {
    let dir = tempdir().expect("Failed to create temp dir");
    let records = vec![create_test_record(1)];

    for number in [0, 2] {
        let err = bulk::save_record(&records, number, dir.path(), &QrStyle::bulk()).unwrap_err();
        assert!(matches!(err, WmsQrError::RecordOutOfRange { count: 1, .. }));
    }
}
