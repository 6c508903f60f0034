//! スプレッドシートのセル値
//!
//! 読み込み元(xlsx/xls/csv)に依存しないセル表現と、
//! 列ごとの型変換（文字列化・数値化・日付書式化）をまとめる。

use crate::types::FieldValue;
use chrono::{Days, NaiveDate};

/// セル値
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    /// 日付シリアル値（1900年方式）
    Date(f64),
}

/// 1行分のセル（列位置で意味が決まる）
pub type Row = Vec<Cell>;

static EMPTY: Cell = Cell::Empty;

/// 行から列を取り出す。範囲外は空セル扱い
pub fn cell_at(row: &[Cell], index: usize) -> &Cell {
    row.get(index).unwrap_or(&EMPTY)
}

/// 全セルが空の行か（空白だけの文字列は値として扱う）
pub fn is_blank_row(row: &[Cell]) -> bool {
    row.iter().all(|c| match c {
        Cell::Empty => true,
        Cell::Text(s) => s.is_empty(),
        _ => false,
    })
}

impl Cell {
    /// 値として「ある」か
    ///
    /// 空セル・空文字・0・NaN・false は「なし」としてデフォルト値に置き換える。
    pub fn is_present(&self) -> bool {
        match self {
            Cell::Empty => false,
            Cell::Text(s) => !s.is_empty(),
            Cell::Number(n) | Cell::Date(n) => *n != 0.0 && !n.is_nan(),
            Cell::Bool(b) => *b,
        }
    }

    /// 文字列として取り出す（なしの場合は `default`）
    pub fn text_or(&self, default: &str) -> String {
        if self.is_present() {
            self.to_text()
        } else {
            default.to_string()
        }
    }

    /// セルの型のまま取り出す（なしの場合は `default` の文字列）
    pub fn value_or(&self, default: &str) -> FieldValue {
        if !self.is_present() {
            return FieldValue::text(default);
        }
        match self {
            Cell::Number(n) | Cell::Date(n) => FieldValue::from(*n),
            Cell::Bool(b) => FieldValue::Bool(*b),
            Cell::Text(s) => FieldValue::text(s.as_str()),
            Cell::Empty => FieldValue::text(default),
        }
    }

    /// 文字列化
    pub fn to_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) | Cell::Date(n) => format_number(*n),
            Cell::Bool(b) => b.to_string(),
        }
    }

    /// 数値化。変換できなければ0
    pub fn to_number(&self) -> f64 {
        let n = match self {
            Cell::Empty => 0.0,
            Cell::Text(s) => parse_number(s),
            Cell::Number(n) | Cell::Date(n) => *n,
            Cell::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
        };
        if n.is_finite() {
            n
        } else {
            0.0
        }
    }

    /// 日付として書式化（yyyy-mm-dd）
    ///
    /// 数値・日付セルはシリアル値として変換し、文字列はそのまま返す。
    pub fn to_date_text(&self) -> String {
        match self {
            Cell::Number(n) | Cell::Date(n) => {
                serial_to_date_string(*n).unwrap_or_else(|| format_number(*n))
            }
            Cell::Bool(b) => b.to_string().to_uppercase(),
            other => other.to_text(),
        }
    }
}

/// 数値の文字列化（整数は小数点なし）
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// 数値文字列のパース。前後の空白は無視し、空文字は0
fn parse_number(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    // "inf" や "nan" は数値として扱わない
    if trimmed.chars().any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E')) {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(0.0)
}

/// 日付シリアル値 → yyyy-mm-dd
///
/// 1900年方式。Excel互換のため 60 は存在しない 1900-02-29 になる。
pub fn serial_to_date_string(serial: f64) -> Option<String> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }

    // 0.5秒未満の誤差は繰り上げ
    let days = (serial + 0.5 / 86_400.0).floor() as u64;
    if days == 60 {
        return Some("1900-02-29".to_string());
    }

    let base = if days < 60 {
        NaiveDate::from_ymd_opt(1899, 12, 31)?
    } else {
        NaiveDate::from_ymd_opt(1899, 12, 30)?
    };

    base.checked_add_days(Days::new(days))
        .map(|d| d.format(crate::types::DATE_FORMAT).to_string())
}
