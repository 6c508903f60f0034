//! QRペイロード
//!
//! QRコードに埋め込む文字列は「レコード1件を要素に持つJSON配列」。
//! 単票・一括どちらも同じ形にそろえる。

use crate::error::Result;
use crate::types::PurchaseOrderRecord;

/// レコード1件をペイロード文字列に変換
pub fn to_payload(record: &PurchaseOrderRecord) -> Result<String> {
    Ok(serde_json::to_string(std::slice::from_ref(record))?)
}

/// ペイロード文字列をレコード列に戻す
pub fn parse_payload(payload: &str) -> Result<Vec<PurchaseOrderRecord>> {
    Ok(serde_json::from_str(payload)?)
}

/// 一括取込分のペイロードを位置順に生成
pub fn bulk_payloads(records: &[PurchaseOrderRecord]) -> Result<Vec<String>> {
    records.iter().map(to_payload).collect()
}
