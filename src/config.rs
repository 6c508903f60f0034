use crate::error::{WmsQrError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use wms_qr_common::export::margin::{DEFAULT_MARGIN, DEFAULT_MARGIN_COLOR, MAX_MARGIN};
use wms_qr_common::export::qr::{BULK_QR_SIZE, MAX_QR_SIZE, SINGLE_QR_SIZE};
use wms_qr_common::export::{ErrorCorrection, MarginStyle, QrStyle};

/// 出力先を上書きする環境変数
pub const OUTPUT_DIR_ENV: &str = "WMS_QR_OUTPUT_DIR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub qr_size: u32,
    pub bulk_qr_size: u32,
    pub margin: u32,
    pub margin_color: String,
    pub error_correction: ErrorCorrection,
    pub output_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            qr_size: SINGLE_QR_SIZE,
            bulk_qr_size: BULK_QR_SIZE,
            margin: DEFAULT_MARGIN,
            margin_color: DEFAULT_MARGIN_COLOR.into(),
            error_correction: ErrorCorrection::default(),
            output_dir: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| WmsQrError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("wms-qr").join("config.json"))
    }

    /// 出力先ディレクトリ（環境変数 > 設定 > カレント）
    pub fn output_dir(&self) -> PathBuf {
        if let Ok(dir) = std::env::var(OUTPUT_DIR_ENV) {
            if !dir.is_empty() {
                return PathBuf::from(dir);
            }
        }
        self.output_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn single_style(&self) -> QrStyle {
        QrStyle {
            size: self.qr_size,
            error_correction: self.error_correction,
        }
    }

    pub fn bulk_style(&self) -> QrStyle {
        QrStyle {
            size: self.bulk_qr_size,
            error_correction: self.error_correction,
        }
    }

    pub fn margin_style(&self) -> Result<MarginStyle> {
        Ok(MarginStyle::new(self.margin, &self.margin_color)?)
    }

    /// 値の妥当性チェック（読込時・保存前に呼ぶ）
    pub fn validate(&self) -> Result<()> {
        for size in [self.qr_size, self.bulk_qr_size] {
            if size == 0 || size > MAX_QR_SIZE {
                return Err(WmsQrError::Config(format!(
                    "QRサイズは1〜{}を指定してください: {}",
                    MAX_QR_SIZE, size
                )));
            }
        }
        if self.margin > MAX_MARGIN {
            return Err(WmsQrError::Config(format!(
                "余白は0〜{}を指定してください: {}",
                MAX_MARGIN, self.margin
            )));
        }
        self.margin_style()?;
        Ok(())
    }
}
