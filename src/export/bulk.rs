//! 一括ダウンロード
//!
//! - レコード単位: QR画像をそのまま barcode-<n>.png で保存
//! - まとめて: 全レコードのPNG変換を並列に走らせ、揃ってから barcodes.zip にする

use super::ensure_parent;
use crate::error::{Result, WmsQrError};
use futures::FutureExt;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use wms_qr_common::export::{
    collect_archive, encode_png, entry_file_name, render_qr, QrStyle, ARCHIVE_FILE_NAME,
};
use wms_qr_common::{bulk_payloads, PurchaseOrderRecord};

/// ZIP出力結果
#[derive(Debug, Clone)]
pub struct ArchiveSummary {
    pub path: PathBuf,
    pub entries: usize,
    pub skipped: Vec<usize>,
}

/// ペイロード → PNG
pub fn render_png(payload: &str, style: &QrStyle) -> wms_qr_common::Result<Vec<u8>> {
    let qr = render_qr(payload, style)?;
    encode_png(qr)
}

fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::with_template("  [{bar:30}] {pos}/{len} {msg}") {
        pb.set_style(style.progress_chars("=> "));
    }
    pb
}

/// PNG変換タスクを1件ずつ起動する。描画できなかったレコードは `None`
fn spawn_conversions(
    records: &[PurchaseOrderRecord],
    style: QrStyle,
    pb: &ProgressBar,
) -> Result<Vec<impl std::future::Future<Output = Option<Vec<u8>>>>> {
    let payloads = bulk_payloads(records)?;

    Ok(payloads
        .into_iter()
        .enumerate()
        .map(|(index, payload)| {
            let pb = pb.clone();
            tokio::task::spawn_blocking(move || render_png(&payload, &style)).map(move |joined| {
                pb.inc(1);
                match joined {
                    Ok(Ok(png)) => Some(png),
                    Ok(Err(e)) => {
                        tracing::warn!(record = index + 1, error = %e, "QR rendering failed, skipped");
                        None
                    }
                    Err(e) => {
                        tracing::warn!(record = index + 1, error = %e, "render task aborted, skipped");
                        None
                    }
                }
            })
        })
        .collect())
}

/// 全レコードをZIPにまとめて保存
pub async fn save_archive(
    records: &[PurchaseOrderRecord],
    output_dir: &Path,
    style: QrStyle,
) -> Result<ArchiveSummary> {
    let pb = progress_bar(records.len());
    let conversions = spawn_conversions(records, style, &pb)?;

    let output = collect_archive(conversions).await?;
    pb.finish_and_clear();

    let path = output_dir.join(ARCHIVE_FILE_NAME);
    ensure_parent(&path)?;
    std::fs::write(&path, &output.bytes)?;

    Ok(ArchiveSummary {
        path,
        entries: output.entry_count(),
        skipped: output.skipped,
    })
}

/// 全レコードを個別PNGで保存。描画できなかったものは飛ばす
pub async fn save_each(
    records: &[PurchaseOrderRecord],
    output_dir: &Path,
    style: QrStyle,
) -> Result<Vec<PathBuf>> {
    let pb = progress_bar(records.len());
    let conversions = spawn_conversions(records, style, &pb)?;
    let images = futures::future::join_all(conversions).await;
    pb.finish_and_clear();

    std::fs::create_dir_all(output_dir)?;

    let mut paths = Vec::new();
    for (index, png) in images.into_iter().enumerate() {
        let Some(png) = png else { continue };
        let path = output_dir.join(entry_file_name(index));
        std::fs::write(&path, png)?;
        paths.push(path);
    }
    Ok(paths)
}

/// 指定レコード(1始まり)だけを保存
pub fn save_record(
    records: &[PurchaseOrderRecord],
    number: usize,
    output_dir: &Path,
    style: &QrStyle,
) -> Result<PathBuf> {
    let record = number
        .checked_sub(1)
        .and_then(|index| records.get(index))
        .ok_or(WmsQrError::RecordOutOfRange {
            index: number,
            count: records.len(),
        })?;

    let payload = wms_qr_common::to_payload(record)?;
    let png = render_png(&payload, style)?;

    let path = output_dir.join(entry_file_name(number - 1));
    ensure_parent(&path)?;
    std::fs::write(&path, png)?;
    Ok(path)
}
