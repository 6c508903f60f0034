//! 単票ダウンロード
//!
//! QRコードに灰色の余白を付けてPNG保存する。

use super::{ensure_parent, output_path_for_file};
use crate::error::Result;
use std::path::{Path, PathBuf};
use wms_qr_common::export::{add_margin, encode_png, render_qr, MarginStyle, QrStyle, SINGLE_FILE_NAME};

/// 余白付きPNGのバイト列
pub fn render_framed_png(payload: &str, style: &QrStyle, margin: &MarginStyle) -> Result<Vec<u8>> {
    let qr = render_qr(payload, style)?;
    let framed = add_margin(&qr, margin)?;
    Ok(encode_png(framed)?)
}

/// 余白付きPNGを保存し、保存先を返す
pub fn save_single(
    payload: &str,
    output: &Path,
    style: &QrStyle,
    margin: &MarginStyle,
) -> Result<PathBuf> {
    let path = output_path_for_file(output, SINGLE_FILE_NAME);
    let png = render_framed_png(payload, style, margin)?;

    ensure_parent(&path)?;
    std::fs::write(&path, png)?;

    tracing::debug!(path = %path.display(), size = style.size, margin = margin.width, "single barcode saved");
    Ok(path)
}
