//! エラー型定義

use thiserror::Error;

/// 共通エラー型
///
/// 取込エラー3種のDisplayは画面にそのまま表示する文言。
#[derive(Error, Debug)]
pub enum Error {
    #[error("No file selected.")]
    NoFileSelected,

    #[error("No data found in the file.")]
    NoData,

    /// 詳細はログ用。表示文言は固定
    #[error("Error parsing file. Please ensure it is a valid Excel or CSV file.")]
    Unparseable { detail: String },

    #[error("QR encode error: {0}")]
    QrEncode(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    pub fn unparseable(detail: impl std::fmt::Display) -> Self {
        Error::Unparseable {
            detail: detail.to_string(),
        }
    }

    /// ファイル取込時のエラーか
    pub fn is_import_error(&self) -> bool {
        matches!(
            self,
            Error::NoFileSelected | Error::NoData | Error::Unparseable { .. }
        )
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
