//! 一括取込エリアコンポーネント
//!
//! Excel/CSVを読み込み、発注番号ごとのレコードに置き換えてから
//! QRコードを1件ずつ描画する。

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, File, HtmlInputElement};
use crate::app::QrEntry;
use crate::export;
use wms_qr_common::export::QrStyle;
use wms_qr_common::{bulk_payloads, import_bytes, Error as CommonError};

/// ファイル選択ダイアログの accept
const ACCEPT: &str = ".xlsx,.xls,.xlsm,.xlsb,.ods,.csv";

#[component]
pub fn BulkUpload(
    entries: RwSignal<Vec<QrEntry>>,
    set_import_error: WriteSignal<Option<String>>,
) -> impl IntoView {
    let (is_dragover, set_is_dragover) = signal(false);
    // アップロードごとに進める。古い描画ループを止めるのに使う
    let generation = StoredValue::new(0u32);

    let handle_file = move |file: Option<File>| {
        let current = generation.get_value().wrapping_add(1);
        generation.set_value(current);

        let Some(file) = file else {
            set_import_error.set(Some(CommonError::NoFileSelected.to_string()));
            return;
        };

        wasm_bindgen_futures::spawn_local(async move {
            let file_name = file.name();
            let file = gloo::file::File::from(file);
            let read = gloo::file::futures::read_as_bytes(&file).await;
            // 読込中に次のファイルが選ばれていたら結果を捨てる
            if is_stale(generation.get_value(), current) {
                return;
            }
            let bytes = match read {
                Ok(bytes) => bytes,
                Err(_) => {
                    set_import_error.set(Some(CommonError::unparseable("read failed").to_string()));
                    return;
                }
            };

            let loaded = import_bytes(&bytes, &file_name, export::today()).and_then(|records| {
                let payloads = bulk_payloads(&records)?;
                Ok(records
                    .into_iter()
                    .zip(payloads)
                    .enumerate()
                    .map(|(i, (record, payload))| QrEntry::new(i, record, payload))
                    .collect::<Vec<_>>())
            });

            match loaded {
                Ok(new_entries) => {
                    set_import_error.set(None);
                    entries.set(new_entries);
                    render_entries(entries, generation, current).await;
                }
                Err(e) => {
                    set_import_error.set(Some(e.to_string()));
                    entries.set(Vec::new());
                }
            }
        });
    };

    let on_change = move |ev: leptos::ev::Event| {
        let file = ev
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        handle_file(file);
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(false);
        let file = ev
            .data_transfer()
            .and_then(|dt| dt.files())
            .and_then(|files| files.get(0));
        handle_file(file);
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(true);
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    view! {
        <div
            class=move || if is_dragover.get() { "upload-area dragover" } else { "upload-area" }
            on:drop=on_drop
            on:dragover=on_dragover
            on:dragleave=on_dragleave
        >
            <div class="upload-icon">"📄"</div>
            <p>"Excel/CSVをドラッグ&ドロップ または 選択"</p>
            <input type="file" accept=ACCEPT on:change=on_change />
            <p class="text-muted">"対応形式: xlsx, xls, csv（1行目は見出し）"</p>
        </div>
    }
}

/// 1件描画するごとに画面へ返す。新しいアップロードが来たら中断
/// 開始後に新しいアップロードが始まっていれば true
fn is_stale(latest: u32, started: u32) -> bool {
    latest != started
}

async fn render_entries(entries: RwSignal<Vec<QrEntry>>, generation: StoredValue<u32>, current: u32) {
    let total = entries.with_untracked(|e| e.len());
    let style = QrStyle::bulk();

    for index in 0..total {
        gloo::timers::future::TimeoutFuture::new(0).await;
        if is_stale(generation.get_value(), current) {
            return;
        }

        let Some(payload) = entries.with_untracked(|e| e.get(index).map(|entry| entry.payload.clone())) else {
            return;
        };

        match export::render_png(&payload, &style) {
            Ok(png) => {
                let data_url = export::png_data_url(&png);
                entries.update(|e| {
                    if let Some(entry) = e.get_mut(index) {
                        entry.png = Some(png);
                        entry.data_url = Some(data_url);
                    }
                });
            }
            Err(e) => {
                web_sys::console::warn_1(&format!("record {} could not be rendered: {}", index + 1, e).into());
                entries.update(|e| {
                    if let Some(entry) = e.get_mut(index) {
                        entry.failed = true;
                    }
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_earlier_upload_is_stale() {
        let first = 1u32;
        let second = first.wrapping_add(1);

        assert!(!is_stale(first, first));
        assert!(is_stale(second, first));
        assert!(!is_stale(second, second));
    }

    #[test]
    fn test_generation_wraps() {
        let last = u32::MAX;
        let next = last.wrapping_add(1);
        assert_eq!(next, 0);
        assert!(is_stale(next, last));
    }
}
