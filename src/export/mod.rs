pub mod single;
pub mod bulk;

use crate::cli::BulkMode;
use crate::error::Result;
use std::path::{Path, PathBuf};
use wms_qr_common::export::QrStyle;
use wms_qr_common::PurchaseOrderRecord;

/// 出力先がディレクトリ（または拡張子なし）ならファイル名を付ける
pub fn output_path_for_file(output: &Path, default_name: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(default_name)
    } else {
        output.to_path_buf()
    }
}

/// 親ディレクトリを用意
pub(crate) fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// 一括出力のディスパッチ
pub async fn export_records(
    records: &[PurchaseOrderRecord],
    mode: BulkMode,
    output_dir: &Path,
    style: QrStyle,
) -> Result<()> {
    match mode {
        BulkMode::Zip => {
            println!("- ZIPを生成中... ({}件)", records.len());
            let summary = bulk::save_archive(records, output_dir, style).await?;
            if !summary.skipped.is_empty() {
                println!("  スキップ: {}件", summary.skipped.len());
            }
            println!("✔ ZIP出力: {} ({}件)", summary.path.display(), summary.entries);
        }
        BulkMode::Each => {
            println!("- PNGを生成中... ({}件)", records.len());
            let paths = bulk::save_each(records, output_dir, style).await?;
            println!("✔ PNG出力: {} ({}件)", output_dir.display(), paths.len());
        }
        BulkMode::None => {}
    }

    Ok(())
}
