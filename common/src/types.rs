//! 入荷レコードの型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - Item: 入荷明細1行
//! - PurchaseOrderRecord: 発注番号(PONumber)単位にまとめたレコード
//!
//! JSONキーはQRコードを読む側(WMS)との取り決めなので変更しないこと。

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// 発注番号が空のときのグループキー
pub const DEFAULT_PO_NUMBER: &str = "Unknown-PO";
pub const DEFAULT_SUPPLIER: &str = "Unknown Supplier";
pub const DEFAULT_SERIAL_NUMBER: &str = "Default-SN";
pub const DEFAULT_INVOICE_NO: &str = "Default Invoice";
pub const DEFAULT_LOCATION: &str = "Unknown";
pub const DEFAULT_AMOUNT: &str = "Unknown";

/// 入荷日の書式 (yyyy-mm-dd)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// JSON数値
///
/// 小数部がなければ `12.0` ではなく `12` として出力する。
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct JsonNumber(pub f64);

/// 2^53: 整数として誤差なく表せる上限
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

impl JsonNumber {
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl From<f64> for JsonNumber {
    fn from(value: f64) -> Self {
        JsonNumber(value)
    }
}

impl Serialize for JsonNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let v = self.0;
        if v.is_finite() && v.fract() == 0.0 && v.abs() < MAX_SAFE_INTEGER {
            serializer.serialize_i64(v as i64)
        } else {
            serializer.serialize_f64(v)
        }
    }
}

impl<'de> Deserialize<'de> for JsonNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(JsonNumber)
    }
}

impl fmt::Display for JsonNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// セルから受け取った値
///
/// 入力セルの型をそのまま保持する（数値セルは数値、真偽値は真偽値、文字列は文字列）。
/// QRペイロードでも同じ型で出力する。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(JsonNumber),
    Bool(bool),
    Text(String),
}

/// 金額列も同じ値型
pub type Amount = FieldValue;

impl FieldValue {
    pub fn text(s: impl Into<String>) -> Self {
        FieldValue::Text(s.into())
    }

    /// 金額なし
    pub fn unknown() -> Self {
        FieldValue::text(DEFAULT_AMOUNT)
    }

    /// 空文字か
    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Text(s) if s.is_empty())
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::text(s)
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(JsonNumber(n))
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// 表示文字列での比較
impl PartialEq<str> for FieldValue {
    fn eq(&self, other: &str) -> bool {
        match self {
            FieldValue::Text(s) => s == other,
            other_value => other_value.to_string() == other,
        }
    }
}

impl PartialEq<&str> for FieldValue {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

/// 入荷明細
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Item {
    pub item_no: FieldValue,
    pub description: FieldValue,
    pub quantity: JsonNumber,
    pub serial_number: FieldValue,
    pub invoice_no: FieldValue,
    pub location: FieldValue,
    pub receiving_date: String,
    pub amount: Amount,
}

/// 発注番号単位の入荷レコード
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrderRecord {
    #[serde(rename = "PONumber")]
    pub po_number: FieldValue,

    #[serde(rename = "ReceivingNo")]
    pub receiving_no: FieldValue,

    #[serde(rename = "Supplier")]
    pub supplier: FieldValue,

    pub items: Vec<Item>,
}

impl PurchaseOrderRecord {
    pub fn new(
        po_number: impl Into<FieldValue>,
        receiving_no: impl Into<FieldValue>,
        supplier: impl Into<FieldValue>,
    ) -> Self {
        Self {
            po_number: po_number.into(),
            receiving_no: receiving_no.into(),
            supplier: supplier.into(),
            items: Vec::new(),
        }
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// 明細の数量合計
    pub fn total_quantity(&self) -> f64 {
        self.items.iter().map(|i| i.quantity.value()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_item() -> Item {
        Item {
            item_no: "ITM-1".into(),
            description: "Pallet jack".into(),
            quantity: JsonNumber(3.0),
            serial_number: DEFAULT_SERIAL_NUMBER.into(),
            invoice_no: "INV-9".into(),
            location: "A-01".into(),
            receiving_date: "2024-03-15".to_string(),
            amount: Amount::Number(JsonNumber(120.5)),
        }
    }

    #[test]
    fn test_json_number_integer_has_no_fraction() {
        assert_eq!(serde_json::to_string(&JsonNumber(12.0)).unwrap(), "12");
        assert_eq!(serde_json::to_string(&JsonNumber(0.0)).unwrap(), "0");
        assert_eq!(serde_json::to_string(&JsonNumber(-4.0)).unwrap(), "-4");
    }

    #[test]
    fn test_json_number_fraction_kept() {
        assert_eq!(serde_json::to_string(&JsonNumber(1.5)).unwrap(), "1.5");
    }

    #[test]
    fn test_amount_untagged() {
        assert_eq!(serde_json::to_string(&Amount::Number(JsonNumber(99.0))).unwrap(), "99");
        assert_eq!(serde_json::to_string(&Amount::unknown()).unwrap(), "\"Unknown\"");

        let number: Amount = serde_json::from_str("42.25").unwrap();
        assert_eq!(number, Amount::Number(JsonNumber(42.25)));
        let text: Amount = serde_json::from_str("\"USD 10\"").unwrap();
        assert_eq!(text, Amount::Text("USD 10".to_string()));
    }

    #[test]
    fn test_field_value_untagged() {
        assert_eq!(serde_json::to_string(&FieldValue::from(900.0)).unwrap(), "900");
        assert_eq!(serde_json::to_string(&FieldValue::from(true)).unwrap(), "true");
        assert_eq!(serde_json::to_string(&FieldValue::from("900")).unwrap(), "\"900\"");

        let flag: FieldValue = serde_json::from_str("false").unwrap();
        assert_eq!(flag, FieldValue::Bool(false));
    }

    #[test]
    fn test_field_value_compares_by_display() {
        assert_eq!(FieldValue::from(1001.0), "1001");
        assert_eq!(FieldValue::from("PO-1"), "PO-1");
        assert!(FieldValue::default().is_empty());
        assert!(!FieldValue::from(0.0).is_empty());
    }

    #[test]
    fn test_numeric_record_fields_stay_numbers() {
        let mut record = PurchaseOrderRecord::new(900.0, 55.0, "ACME");
        record.items.push(Item {
            item_no: 1001.0.into(),
            ..sample_item()
        });

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.starts_with(r#"{"PONumber":900,"ReceivingNo":55,"Supplier":"ACME","items":[{"ItemNo":1001,"#));
    }

    #[test]
    fn test_item_serialize_keys_in_order() {
        let json = serde_json::to_string(&sample_item()).unwrap();
        assert_eq!(
            json,
            r#"{"ItemNo":"ITM-1","Description":"Pallet jack","Quantity":3,"SerialNumber":"Default-SN","InvoiceNo":"INV-9","Location":"A-01","ReceivingDate":"2024-03-15","Amount":120.5}"#
        );
    }

    #[test]
    fn test_record_serialize_keys() {
        let mut record = PurchaseOrderRecord::new("PO-1", "RCV-1", "ACME");
        record.items.push(sample_item());

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.starts_with(r#"{"PONumber":"PO-1","ReceivingNo":"RCV-1","Supplier":"ACME","items":["#));
    }

    #[test]
    fn test_total_quantity() {
        let mut record = PurchaseOrderRecord::new("PO-1", "", DEFAULT_SUPPLIER);
        record.items.push(sample_item());
        record.items.push(Item {
            quantity: JsonNumber(2.5),
            ..sample_item()
        });
        assert_eq!(record.item_count(), 2);
        assert!((record.total_quantity() - 5.5).abs() < f64::EPSILON);
    }
}
