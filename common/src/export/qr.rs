//! QRコード描画
//!
//! ペイロード文字列をQRコード画像（グレースケール）にし、PNGに変換する。
//! 余白(quiet zone)なし、白地に黒モジュール。

use crate::error::{Error, Result};
use crate::payload::to_payload;
use crate::types::PurchaseOrderRecord;
use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, ImageFormat, Luma};
use qrcode::{EcLevel, QrCode};
use serde::{Deserialize, Serialize};
use std::io::Cursor;

/// 単票プレビューの一辺(px)
pub const SINGLE_QR_SIZE: u32 = 256;
/// 一括カードの一辺(px)
pub const BULK_QR_SIZE: u32 = 150;
/// 出力サイズの上限(px)
pub const MAX_QR_SIZE: u32 = 4096;

/// 誤り訂正レベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ErrorCorrection {
    #[default]
    L,
    M,
    Q,
    H,
}

impl ErrorCorrection {
    fn to_ec_level(self) -> EcLevel {
        match self {
            ErrorCorrection::L => EcLevel::L,
            ErrorCorrection::M => EcLevel::M,
            ErrorCorrection::Q => EcLevel::Q,
            ErrorCorrection::H => EcLevel::H,
        }
    }
}

impl std::str::FromStr for ErrorCorrection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "L" => Ok(ErrorCorrection::L),
            "M" => Ok(ErrorCorrection::M),
            "Q" => Ok(ErrorCorrection::Q),
            "H" => Ok(ErrorCorrection::H),
            _ => Err(format!("Unknown error correction level: {}. Use L, M, Q or H", s)),
        }
    }
}

impl std::fmt::Display for ErrorCorrection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self {
            ErrorCorrection::L => "L",
            ErrorCorrection::M => "M",
            ErrorCorrection::Q => "Q",
            ErrorCorrection::H => "H",
        };
        write!(f, "{}", level)
    }
}

/// 描画設定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrStyle {
    pub size: u32,
    pub error_correction: ErrorCorrection,
}

impl QrStyle {
    pub fn single() -> Self {
        Self {
            size: SINGLE_QR_SIZE,
            error_correction: ErrorCorrection::default(),
        }
    }

    pub fn bulk() -> Self {
        Self {
            size: BULK_QR_SIZE,
            error_correction: ErrorCorrection::default(),
        }
    }

    pub fn with_size(self, size: u32) -> Self {
        Self { size, ..self }
    }
}

impl Default for QrStyle {
    fn default() -> Self {
        Self::single()
    }
}

/// ペイロードをQRコード画像にする
///
/// 出力は常に `size` × `size`。データ量がQRの容量を超えると [`Error::QrEncode`]。
pub fn render_qr(payload: &str, style: &QrStyle) -> Result<GrayImage> {
    let code = QrCode::with_error_correction_level(
        payload.as_bytes(),
        style.error_correction.to_ec_level(),
    )
    .map_err(|e| Error::QrEncode(e.to_string()))?;

    let image = code
        .render::<Luma<u8>>()
        .quiet_zone(false)
        .min_dimensions(style.size, style.size)
        .build();

    if image.width() == style.size && image.height() == style.size {
        Ok(image)
    } else {
        Ok(imageops::resize(&image, style.size, style.size, FilterType::Nearest))
    }
}

/// レコードを直接QRコード画像にする
pub fn render_record(record: &PurchaseOrderRecord, style: &QrStyle) -> Result<GrayImage> {
    let payload = to_payload(record)?;
    render_qr(&payload, style)
}

/// PNGバイト列に変換
pub fn encode_png(image: impl Into<DynamicImage>) -> Result<Vec<u8>> {
    let image: DynamicImage = image.into();
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

    #[test]
    fn test_render_qr_exact_size() {
        for size in [SINGLE_QR_SIZE, BULK_QR_SIZE, 64] {
            let image = render_qr("[{\"PONumber\":\"PO-1\"}]", &QrStyle::single().with_size(size)).unwrap();
            assert_eq!(image.dimensions(), (size, size));
        }
    }

    #[test]
    fn test_render_qr_has_dark_and_light_modules() {
        let image = render_qr("hello", &QrStyle::bulk()).unwrap();
        let pixels: Vec<u8> = image.pixels().map(|p| p.0[0]).collect();
        assert!(pixels.contains(&0));
        assert!(pixels.contains(&255));
        // quiet zone なし: 左上はファインダーパターンの黒
        assert_eq!(image.get_pixel(0, 0).0[0], 0);
    }

    #[test]
    fn test_render_qr_too_large() {
        let payload = "x".repeat(8000);
        let result = render_qr(&payload, &QrStyle::single());
        assert!(matches!(result, Err(Error::QrEncode(_))));
    }

    #[test]
    fn test_encode_png_signature() {
        let image = render_qr("hello", &QrStyle::bulk()).unwrap();
        let png = encode_png(image).unwrap();
        assert!(png.starts_with(PNG_SIGNATURE));
    }

    #[test]
    fn test_encode_png_decodes_back() {
        let image = render_qr("hello", &QrStyle::bulk()).unwrap();
        let png = encode_png(image.clone()).unwrap();
        let decoded = image::load_from_memory(&png).unwrap().to_luma8();
        assert_eq!(decoded.dimensions(), image.dimensions());
    }

    #[test]
    fn test_error_correction_from_str() {
        assert_eq!("l".parse::<ErrorCorrection>().unwrap(), ErrorCorrection::L);
        assert_eq!("H".parse::<ErrorCorrection>().unwrap(), ErrorCorrection::H);
        assert!("X".parse::<ErrorCorrection>().is_err());
        assert_eq!(ErrorCorrection::Q.to_string(), "Q");
    }
}
