use thiserror::Error;

#[derive(Error, Debug)]
pub enum WmsQrError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("必須項目が未入力です: {0}")]
    MissingRequired(String),

    #[error("レコード番号が範囲外です: {index} (1〜{count})")]
    RecordOutOfRange { index: usize, count: usize },

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    /// 取込エラーなどはメッセージをそのまま表示する
    #[error(transparent)]
    Common(#[from] wms_qr_common::Error),
}

pub type Result<T> = std::result::Result<T, WmsQrError>;

/// 終了時に表示する文言（Debug表記ではなくDisplay）
pub fn report(err: &WmsQrError) -> String {
    format!("エラー: {}", err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_uses_display_message() {
        let msg = report(&WmsQrError::Common(wms_qr_common::Error::NoFileSelected));
        assert_eq!(msg, "エラー: No file selected.");
        assert!(!msg.contains("NoFileSelected"));

        let msg = report(&wms_qr_common::Error::NoData.into());
        assert_eq!(msg, "エラー: No data found in the file.");

        let msg = report(&wms_qr_common::Error::unparseable("bad zip").into());
        assert_eq!(
            msg,
            "エラー: Error parsing file. Please ensure it is a valid Excel or CSV file."
        );
        assert!(!msg.contains("bad zip"));
    }

    #[test]
    fn test_report_local_errors() {
        let msg = report(&WmsQrError::RecordOutOfRange { index: 5, count: 2 });
        assert_eq!(msg, "エラー: レコード番号が範囲外です: 5 (1〜2)");
    }
}
