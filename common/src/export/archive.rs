//! 一括ダウンロード用ZIP
//!
//! 各レコードのPNG変換を個別の非同期タスクとして走らせ、
//! すべて揃ってからZIPを組み立てる（fan-out / fan-in）。
//! 画像が用意できなかったレコードは黙ってスキップする。

use crate::error::Result;
use std::future::Future;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// ZIPのファイル名
pub const ARCHIVE_FILE_NAME: &str = "barcodes.zip";
/// 単票ダウンロードのファイル名
pub const SINGLE_FILE_NAME: &str = "barcode.png";

/// レコード位置(0始まり)からエントリ名を作る: barcode-1.png, barcode-2.png, ...
pub fn entry_file_name(index: usize) -> String {
    format!("barcode-{}.png", index + 1)
}

/// ZIP生成結果
#[derive(Debug, Clone)]
pub struct ArchiveOutput {
    pub bytes: Vec<u8>,
    /// 格納したエントリ名（位置順）
    pub entries: Vec<String>,
    /// 画像がなくスキップしたレコード位置
    pub skipped: Vec<usize>,
}

impl ArchiveOutput {
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

/// 位置順のPNG列からZIPを作る。`None` の位置はスキップ
pub fn build_archive<I>(images: I) -> Result<ArchiveOutput>
where
    I: IntoIterator<Item = Option<Vec<u8>>>,
{
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut entries = Vec::new();
    let mut skipped = Vec::new();

    for (index, png) in images.into_iter().enumerate() {
        let Some(png) = png else {
            tracing::debug!(index, "image not available, skipped");
            skipped.push(index);
            continue;
        };

        let name = entry_file_name(index);
        zip.start_file(name.as_str(), options)?;
        zip.write_all(&png)?;
        entries.push(name);
    }

    let bytes = zip.finish()?.into_inner();
    tracing::info!(
        entries = entries.len(),
        skipped = skipped.len(),
        size = bytes.len(),
        "archive built"
    );

    Ok(ArchiveOutput {
        bytes,
        entries,
        skipped,
    })
}

/// 変換タスクをすべて待ってからZIPを作る
///
/// 各タスクはレコード位置順に並べること。同時実行数の上限はない。
pub async fn collect_archive<I, F>(conversions: I) -> Result<ArchiveOutput>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Option<Vec<u8>>>,
{
    let images = futures::future::join_all(conversions).await;
    build_archive(images)
}
