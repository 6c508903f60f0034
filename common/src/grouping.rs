//! 行グループ化
//!
//! スプレッドシートの行を発注番号(PONumber)ごとにまとめる。
//!
//! 列の並び（0始まり）:
//!
//! | 列 | 項目 |
//! |----|------|
//! | 0 | PONumber |
//! | 1 | ReceivingNo |
//! | 2 | Supplier |
//! | 3 | ItemNo |
//! | 4 | Description |
//! | 5 | Quantity |
//! | 6 | SerialNumber |
//! | 7 | InvoiceNo |
//! | 8 | Location |
//! | 9 | ReceivingDate |
//! | 10 | Amount |

use crate::error::{Error, Result};
use crate::sheet::{cell_at, is_blank_row, Cell};
use crate::types::{
    Item, JsonNumber, PurchaseOrderRecord, DATE_FORMAT, DEFAULT_AMOUNT, DEFAULT_INVOICE_NO,
    DEFAULT_LOCATION, DEFAULT_PO_NUMBER, DEFAULT_SERIAL_NUMBER, DEFAULT_SUPPLIER,
};
use chrono::NaiveDate;
use indexmap::IndexMap;

pub const COL_PO_NUMBER: usize = 0;
pub const COL_RECEIVING_NO: usize = 1;
pub const COL_SUPPLIER: usize = 2;
pub const COL_ITEM_NO: usize = 3;
pub const COL_DESCRIPTION: usize = 4;
pub const COL_QUANTITY: usize = 5;
pub const COL_SERIAL_NUMBER: usize = 6;
pub const COL_INVOICE_NO: usize = 7;
pub const COL_LOCATION: usize = 8;
pub const COL_RECEIVING_DATE: usize = 9;
pub const COL_AMOUNT: usize = 10;

/// 取込全体: 先頭行（ヘッダー）を除いてグループ化
///
/// 行が1つもなければ [`Error::NoData`]。ヘッダーのみなら空の結果を返す。
pub fn import_rows(rows: &[Vec<Cell>], today: NaiveDate) -> Result<Vec<PurchaseOrderRecord>> {
    let Some((_header, data_rows)) = rows.split_first() else {
        return Err(Error::NoData);
    };

    let records = group_rows(data_rows, today);
    tracing::debug!(
        rows = data_rows.len(),
        records = records.len(),
        "rows grouped by PONumber"
    );
    Ok(records)
}

/// データ行を発注番号ごとにまとめる
///
/// グループの順序・グループ内の明細順序はどちらも初出順。
/// ReceivingNo と Supplier はグループの最初の行の値を使う。
/// グループのキーは文字列（数値 900 と文字列 "900" は同じグループ）、
/// レコードにはセルの型のまま入れる。
pub fn group_rows(rows: &[Vec<Cell>], today: NaiveDate) -> Vec<PurchaseOrderRecord> {
    let mut grouped: IndexMap<String, PurchaseOrderRecord> = IndexMap::new();

    for row in rows.iter().filter(|r| !is_blank_row(r)) {
        let po_cell = cell_at(row, COL_PO_NUMBER);
        let key = po_cell.text_or(DEFAULT_PO_NUMBER);

        let record = grouped.entry(key).or_insert_with(|| {
            PurchaseOrderRecord::new(
                po_cell.value_or(DEFAULT_PO_NUMBER),
                cell_at(row, COL_RECEIVING_NO).value_or(""),
                cell_at(row, COL_SUPPLIER).value_or(DEFAULT_SUPPLIER),
            )
        });

        record.items.push(item_from_row(row, today));
    }

    grouped.into_values().collect()
}

/// 1行から明細を組み立てる
pub fn item_from_row(row: &[Cell], today: NaiveDate) -> Item {
    let receiving_date = cell_at(row, COL_RECEIVING_DATE);
    let amount = cell_at(row, COL_AMOUNT);

    Item {
        item_no: cell_at(row, COL_ITEM_NO).value_or(""),
        description: cell_at(row, COL_DESCRIPTION).value_or(""),
        quantity: JsonNumber(cell_at(row, COL_QUANTITY).to_number()),
        serial_number: cell_at(row, COL_SERIAL_NUMBER).value_or(DEFAULT_SERIAL_NUMBER),
        invoice_no: cell_at(row, COL_INVOICE_NO).value_or(DEFAULT_INVOICE_NO),
        location: cell_at(row, COL_LOCATION).value_or(DEFAULT_LOCATION),
        receiving_date: if receiving_date.is_present() {
            receiving_date.to_date_text()
        } else {
            today.format(DATE_FORMAT).to_string()
        },
        amount: amount.value_or(DEFAULT_AMOUNT),
    }
}
