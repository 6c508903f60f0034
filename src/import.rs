//! 一括取込（ファイル → レコード）

use crate::error::{Result, WmsQrError};
use chrono::NaiveDate;
use std::path::Path;
use wms_qr_common::{import_bytes, Error as CommonError, PurchaseOrderRecord};

/// スプレッドシートを読み込んで発注番号ごとのレコードにする
///
/// ファイル未指定は「No file selected.」、読めない・空のファイルは
/// 共通ライブラリの取込エラーをそのまま返す。
pub fn load_records(path: Option<&Path>, today: NaiveDate) -> Result<Vec<PurchaseOrderRecord>> {
    let path = path.ok_or(CommonError::NoFileSelected)?;

    if !path.exists() {
        return Err(WmsQrError::FileNotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let records = import_bytes(&bytes, &file_name, today).inspect_err(|e| {
        if let CommonError::Unparseable { detail } = e {
            tracing::debug!(file = %path.display(), %detail, "spreadsheet could not be parsed");
        }
    })?;

    tracing::info!(file = %path.display(), records = records.len(), "spreadsheet imported");
    Ok(records)
}

/// 一覧表示用の1行
pub fn record_summary(index: usize, record: &PurchaseOrderRecord) -> String {
    format!(
        "Record {}: {} / {} / {} ({}明細)",
        index + 1,
        record.po_number,
        if record.receiving_no.is_empty() {
            "-".to_string()
        } else {
            record.receiving_no.to_string()
        },
        record.supplier,
        record.item_count()
    )
}
