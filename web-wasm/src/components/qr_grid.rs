//! QRコード一覧コンポーネント

use leptos::prelude::*;
use crate::app::QrEntry;
use crate::export::{download::download_or_log, PNG_MIME, ZIP_MIME};
use wms_qr_common::export::{collect_archive, ARCHIVE_FILE_NAME};

#[component]
pub fn QrGrid(entries: RwSignal<Vec<QrEntry>>) -> impl IntoView {
    let (is_zipping, set_is_zipping) = signal(false);

    // 描画済みのものだけZIPに入れる。未描画は飛ばす
    let on_download_all = move |_| {
        let snapshot = entries.get_untracked();
        set_is_zipping.set(true);

        wasm_bindgen_futures::spawn_local(async move {
            let conversions = snapshot
                .into_iter()
                .map(|entry| futures::future::ready(entry.png));

            match collect_archive(conversions).await {
                Ok(output) => download_or_log(&output.bytes, ARCHIVE_FILE_NAME, ZIP_MIME),
                Err(e) => web_sys::console::error_1(&format!("archive failed: {}", e).into()),
            }
            set_is_zipping.set(false);
        });
    };

    view! {
        <div class="qr-grid-actions">
            <button
                class="btn btn-primary"
                disabled=move || is_zipping.get()
                on:click=on_download_all
            >
                {move || if is_zipping.get() { "ZIP作成中..." } else { "すべてZIPでダウンロード" }}
            </button>
            <span class="text-muted">
                {move || format!("{}件", entries.with(|e| e.len()))}
            </span>
        </div>

        <div class="qr-grid">
            <For
                each=move || entries.get()
                key=|entry| (entry.index, entry.record.po_number.to_string(), entry.is_settled())
                children=move |entry| view! { <QrCard entry=entry /> }
            />
        </div>
    }
}

#[component]
fn QrCard(entry: QrEntry) -> impl IntoView {
    let file_name = entry.file_name();
    let png = entry.png.clone();
    let has_image = png.is_some();

    let on_download = move |_| {
        if let Some(png) = &png {
            download_or_log(png, &file_name, PNG_MIME);
        }
    };

    let image = match (&entry.data_url, entry.failed) {
        (Some(url), _) => view! { <img src=url.clone() alt="QR code" /> }.into_any(),
        (None, true) => view! { <p class="error-message">"描画できません"</p> }.into_any(),
        (None, false) => view! { <p class="text-muted">"生成中..."</p> }.into_any(),
    };

    view! {
        <div class="qr-card">
            <h3>{format!("Record {}", entry.index + 1)}</h3>
            {image}
            <p class="qr-meta">
                {format!("{} / {}", entry.record.po_number, entry.record.supplier)}
                <br />
                {format!("{}明細", entry.record.item_count())}
            </p>
            <button class="btn btn-secondary" disabled=!has_image on:click=on_download>
                "ダウンロード"
            </button>
        </div>
    }
}
