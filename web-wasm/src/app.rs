//! メインアプリケーションコンポーネント

use leptos::prelude::*;
use crate::components::{
    bulk_upload::BulkUpload,
    header::Header,
    progress_bar::ProgressBar,
    qr_grid::QrGrid,
    single_form::SingleFormPanel,
};
use wms_qr_common::PurchaseOrderRecord;

/// 入力モード
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Single,
    Bulk,
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Single => "単票入力",
            Mode::Bulk => "一括取込",
        }
    }
}

/// 一括取込の1レコード分
#[derive(Clone, Debug, PartialEq)]
pub struct QrEntry {
    pub index: usize,
    pub record: PurchaseOrderRecord,
    pub payload: String,
    /// 描画済みPNG。未描画・描画失敗は `None`
    pub png: Option<Vec<u8>>,
    pub data_url: Option<String>,
    pub failed: bool,
}

impl QrEntry {
    pub fn new(index: usize, record: PurchaseOrderRecord, payload: String) -> Self {
        Self {
            index,
            record,
            payload,
            png: None,
            data_url: None,
            failed: false,
        }
    }

    pub fn file_name(&self) -> String {
        wms_qr_common::export::entry_file_name(self.index)
    }

    pub fn is_rendered(&self) -> bool {
        self.png.is_some()
    }

    /// 描画が終わった（成功・失敗とも）
    pub fn is_settled(&self) -> bool {
        self.is_rendered() || self.failed
    }
}

/// 描画が終わった割合
pub fn rendered_ratio(entries: &[QrEntry]) -> f32 {
    if entries.is_empty() {
        return 0.0;
    }
    entries.iter().filter(|e| e.is_rendered()).count() as f32 / entries.len() as f32
}

#[component]
pub fn App() -> impl IntoView {
    let (mode, set_mode) = signal(Mode::default());

    // 一括取込の状態（アップロードごとに丸ごと置き換える）
    let entries = RwSignal::new(Vec::<QrEntry>::new());
    let (import_error, set_import_error) = signal(None::<String>);

    let progress = Memo::new(move |_| entries.with(|e| rendered_ratio(e)));
    let is_rendering = move || {
        let p = progress.get();
        !entries.with(|e| e.is_empty()) && p < 1.0
    };

    view! {
        <div class="container">
            <Header />

            <div class="mode-toggle">
                {[Mode::Single, Mode::Bulk]
                    .into_iter()
                    .map(|m| {
                        view! {
                            <button
                                class=move || if mode.get() == m { "btn btn-primary" } else { "btn btn-secondary" }
                                on:click=move |_| set_mode.set(m)
                            >
                                {m.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>

            <Show
                when=move || mode.get() == Mode::Bulk
                fallback=|| view! { <SingleFormPanel /> }
            >
                <BulkUpload entries=entries set_import_error=set_import_error />

                <Show when=move || import_error.get().is_some()>
                    <p class="error-message">{move || import_error.get().unwrap_or_default()}</p>
                </Show>

                <Show when=is_rendering>
                    <ProgressBar progress=progress />
                </Show>

                <Show
                    when=move || !entries.with(|e| e.is_empty())
                    fallback=|| view! { <p class="text-muted">"Excel/CSVファイルを選択すると発注番号ごとにQRコードを生成します"</p> }
                >
                    <QrGrid entries=entries />
                </Show>
            </Show>
        </div>
    }
}
