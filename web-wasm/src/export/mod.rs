//! ブラウザ側の出力（プレビュー・ダウンロード）

pub mod download;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::NaiveDate;
use wms_qr_common::export::{add_margin, encode_png, render_qr, MarginStyle, QrStyle};

pub const PNG_MIME: &str = "image/png";
pub const ZIP_MIME: &str = "application/zip";

/// PNGを `<img src>` 用のdata URLにする
pub fn png_data_url(png: &[u8]) -> String {
    format!("data:{};base64,{}", PNG_MIME, STANDARD.encode(png))
}

/// 画面表示・一括ダウンロード用（余白なし）
pub fn render_png(payload: &str, style: &QrStyle) -> Result<Vec<u8>, String> {
    let qr = render_qr(payload, style).map_err(|e| e.to_string())?;
    encode_png(qr).map_err(|e| e.to_string())
}

/// 単票ダウンロード用（灰色の余白付き）
pub fn render_framed_png(payload: &str, style: &QrStyle, margin: &MarginStyle) -> Result<Vec<u8>, String> {
    let qr = render_qr(payload, style).map_err(|e| e.to_string())?;
    let framed = add_margin(&qr, margin).map_err(|e| e.to_string())?;
    encode_png(framed).map_err(|e| e.to_string())
}

/// ブラウザのローカル日付
pub fn today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_data_url() {
        let url = png_data_url(&[0x89, b'P', b'N', b'G']);
        assert_eq!(url, "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn test_framed_png_is_larger() {
        let style = QrStyle::single();
        let plain = image::load_from_memory(&render_png("[]", &style).unwrap()).unwrap();
        let framed = image::load_from_memory(
            &render_framed_png("[]", &style, &MarginStyle::default()).unwrap(),
        )
        .unwrap();
        assert_eq!(plain.width(), 256);
        assert_eq!(framed.width(), 296);
    }
}
