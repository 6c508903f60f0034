//! スプレッドシート読み込み
//!
//! xlsx/xls/xlsm/ods は calamine、csv は csv クレートで読み、
//! 先頭シートを [`Row`] の列に変換する。ファイルではなくバイト列を受け取るので
//! CLI・WASMどちらからも使える。

use crate::error::{Error, Result};
use crate::grouping::import_rows;
use crate::sheet::{Cell, Row};
use crate::types::PurchaseOrderRecord;
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use chrono::NaiveDate;
use std::io::Cursor;

/// 受け付ける拡張子（ファイル選択ダイアログ用）
pub const ACCEPTED_EXTENSIONS: &[&str] = &["xlsx", "xls", "xlsm", "xlsb", "ods", "csv"];

/// 入力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Workbook,
}

impl SourceFormat {
    /// ファイル名の拡張子から判定（不明ならブック扱い）
    pub fn from_file_name(file_name: &str) -> Self {
        let ext = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "csv" | "txt" => SourceFormat::Csv,
            _ => SourceFormat::Workbook,
        }
    }
}

/// バイト列 → レコード列（取込の一連の処理）
pub fn import_bytes(
    bytes: &[u8],
    file_name: &str,
    today: NaiveDate,
) -> Result<Vec<PurchaseOrderRecord>> {
    let rows = read_rows(bytes, file_name)?;
    import_rows(&rows, today)
}

/// バイト列を行の列に変換
pub fn read_rows(bytes: &[u8], file_name: &str) -> Result<Vec<Row>> {
    let format = SourceFormat::from_file_name(file_name);
    tracing::debug!(file_name, ?format, size = bytes.len(), "reading spreadsheet");

    match format {
        SourceFormat::Csv => read_csv(bytes),
        SourceFormat::Workbook => read_workbook(bytes),
    }
}

/// ブック形式（先頭シートのみ）
pub fn read_workbook(bytes: &[u8]) -> Result<Vec<Row>> {
    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes.to_vec())).map_err(Error::unparseable)?;

    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range.map_err(Error::unparseable)?,
        None => return Ok(Vec::new()),
    };

    // 使用範囲がA列から始まらない場合も列位置を保つ
    let col_offset = range.start().map(|(_, col)| col as usize).unwrap_or(0);

    Ok(range
        .rows()
        .map(|cells| {
            let mut row = vec![Cell::Empty; col_offset];
            row.extend(cells.iter().map(cell_from_data));
            row
        })
        .collect())
}

/// CSV形式
///
/// 数値・真偽値らしいフィールドはその型のセルにする。
pub fn read_csv(bytes: &[u8]) -> Result<Vec<Row>> {
    let data = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data);

    let mut rows = Vec::new();
    for record in reader.byte_records() {
        let record = record.map_err(Error::unparseable)?;
        rows.push(
            record
                .iter()
                .map(|field| cell_from_csv_field(&String::from_utf8_lossy(field)))
                .collect(),
        );
    }
    Ok(rows)
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::String(s) if s.is_empty() => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => Cell::Date(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(_) | Data::Empty => Cell::Empty,
    }
}

fn cell_from_csv_field(field: &str) -> Cell {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return Cell::Empty;
    }
    if let Some(n) = csv_number(trimmed) {
        return Cell::Number(n);
    }
    if trimmed.eq_ignore_ascii_case("true") {
        return Cell::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return Cell::Bool(false);
    }
    Cell::Text(field.to_string())
}

fn csv_number(s: &str) -> Option<f64> {
    let looks_numeric = s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'));
    if !looks_numeric || !s.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    s.parse::<f64>().ok().filter(|n| n.is_finite())
}
