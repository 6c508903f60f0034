//! WMS QR Common Library
//!
//! CLIとWeb(WASM)で共有される型とユーティリティ

pub mod types;
pub mod sheet;
pub mod grouping;
pub mod form;
pub mod payload;
pub mod error;
pub mod export;

#[cfg(feature = "spreadsheet")]
pub mod reader;

pub use types::{Amount, FieldValue, Item, JsonNumber, PurchaseOrderRecord};
pub use sheet::{Cell, Row};
pub use grouping::{group_rows, import_rows};
pub use form::{FormField, SingleForm};
pub use payload::{bulk_payloads, parse_payload, to_payload};
pub use error::{Error, Result};

#[cfg(feature = "spreadsheet")]
pub use reader::{import_bytes, read_rows};
