//! 単票入力フォーム
//!
//! 1件の発注・1明細を手入力してQRコード化するための状態。
//! 入力値はすべて文字列で持ち、送信時にデフォルト値を補う。

use crate::error::Result;
use crate::payload::to_payload;
use crate::sheet::Cell;
use crate::types::{
    Amount, FieldValue, Item, JsonNumber, PurchaseOrderRecord, DATE_FORMAT, DEFAULT_INVOICE_NO,
    DEFAULT_LOCATION, DEFAULT_SERIAL_NUMBER, DEFAULT_SUPPLIER,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// フォームの項目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    PoNumber,
    ReceivingNo,
    Supplier,
    ItemNo,
    Description,
    Quantity,
    SerialNumber,
    InvoiceNo,
    Location,
    ReceivingDate,
    Amount,
}

impl FormField {
    pub const ALL: [FormField; 11] = [
        FormField::PoNumber,
        FormField::ReceivingNo,
        FormField::Supplier,
        FormField::ItemNo,
        FormField::Description,
        FormField::Quantity,
        FormField::SerialNumber,
        FormField::InvoiceNo,
        FormField::Location,
        FormField::ReceivingDate,
        FormField::Amount,
    ];

    /// 表示ラベル（JSONキーと同じ）
    pub fn label(&self) -> &'static str {
        match self {
            FormField::PoNumber => "PONumber",
            FormField::ReceivingNo => "ReceivingNo",
            FormField::Supplier => "Supplier",
            FormField::ItemNo => "ItemNo",
            FormField::Description => "Description",
            FormField::Quantity => "Quantity",
            FormField::SerialNumber => "SerialNumber",
            FormField::InvoiceNo => "InvoiceNo",
            FormField::Location => "Location",
            FormField::ReceivingDate => "ReceivingDate",
            FormField::Amount => "Amount",
        }
    }

    /// 必須マーク
    pub fn is_required(&self) -> bool {
        matches!(
            self,
            FormField::PoNumber
                | FormField::ReceivingNo
                | FormField::Supplier
                | FormField::ItemNo
                | FormField::Description
                | FormField::Quantity
                | FormField::InvoiceNo
        )
    }

    /// 空欄時に補う値の見本（placeholder）
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            FormField::Supplier => Some(DEFAULT_SUPPLIER),
            FormField::SerialNumber => Some(DEFAULT_SERIAL_NUMBER),
            FormField::InvoiceNo => Some(DEFAULT_INVOICE_NO),
            FormField::Location => Some(DEFAULT_LOCATION),
            FormField::Amount => Some(crate::types::DEFAULT_AMOUNT),
            _ => None,
        }
    }

    /// 数値入力欄か
    pub fn is_numeric(&self) -> bool {
        matches!(self, FormField::Quantity | FormField::Amount)
    }
}

/// フォーム状態
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SingleForm {
    pub po_number: String,
    pub receiving_no: String,
    pub supplier: String,
    pub item_no: String,
    pub description: String,
    pub quantity: String,
    pub serial_number: String,
    pub invoice_no: String,
    pub location: String,
    pub receiving_date: String,
    pub amount: String,
}

impl SingleForm {
    /// 入荷日を当日で初期化したフォーム
    pub fn new(today: NaiveDate) -> Self {
        Self {
            receiving_date: today.format(DATE_FORMAT).to_string(),
            ..Default::default()
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::PoNumber => &self.po_number,
            FormField::ReceivingNo => &self.receiving_no,
            FormField::Supplier => &self.supplier,
            FormField::ItemNo => &self.item_no,
            FormField::Description => &self.description,
            FormField::Quantity => &self.quantity,
            FormField::SerialNumber => &self.serial_number,
            FormField::InvoiceNo => &self.invoice_no,
            FormField::Location => &self.location,
            FormField::ReceivingDate => &self.receiving_date,
            FormField::Amount => &self.amount,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::PoNumber => self.po_number = value,
            FormField::ReceivingNo => self.receiving_no = value,
            FormField::Supplier => self.supplier = value,
            FormField::ItemNo => self.item_no = value,
            FormField::Description => self.description = value,
            FormField::Quantity => self.quantity = value,
            FormField::SerialNumber => self.serial_number = value,
            FormField::InvoiceNo => self.invoice_no = value,
            FormField::Location => self.location = value,
            FormField::ReceivingDate => self.receiving_date = value,
            FormField::Amount => self.amount = value,
        }
    }

    /// 必須項目のうち未入力のもの
    pub fn missing_required(&self) -> Vec<FormField> {
        FormField::ALL
            .iter()
            .copied()
            .filter(|f| f.is_required() && self.get(*f).is_empty())
            .collect()
    }

    /// デフォルト値を補ってレコード化
    pub fn to_record(&self, today: NaiveDate) -> PurchaseOrderRecord {
        let mut record = PurchaseOrderRecord::new(
            self.po_number.clone(),
            self.receiving_no.clone(),
            or_default(&self.supplier, DEFAULT_SUPPLIER),
        );

        record.items.push(Item {
            item_no: self.item_no.as_str().into(),
            description: self.description.as_str().into(),
            quantity: JsonNumber(Cell::Text(self.quantity.clone()).to_number()),
            serial_number: or_default(&self.serial_number, DEFAULT_SERIAL_NUMBER),
            invoice_no: or_default(&self.invoice_no, DEFAULT_INVOICE_NO),
            location: or_default(&self.location, DEFAULT_LOCATION),
            receiving_date: if self.receiving_date.is_empty() {
                today.format(DATE_FORMAT).to_string()
            } else {
                self.receiving_date.clone()
            },
            amount: if self.amount.is_empty() {
                Amount::unknown()
            } else {
                Amount::Text(self.amount.clone())
            },
        });

        record
    }

    /// 送信: QRコードに埋め込むペイロードを生成
    pub fn submit(&self, today: NaiveDate) -> Result<String> {
        to_payload(&self.to_record(today))
    }
}

fn or_default(value: &str, default: &str) -> FieldValue {
    if value.is_empty() {
        FieldValue::text(default)
    } else {
        FieldValue::text(value)
    }
}
