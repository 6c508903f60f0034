//! プログレスバーコンポーネント

use leptos::prelude::*;

#[component]
pub fn ProgressBar(progress: Memo<f32>) -> impl IntoView {
    view! {
        <div class="progress-container">
            <div class="progress-bar">
                <div
                    class="progress-fill"
                    style=move || format!("width: {}%", progress.get() * 100.0)
                />
            </div>
            <p class="progress-text">
                {move || format!("QRコード生成中... {:.0}%", progress.get() * 100.0)}
            </p>
        </div>
    }
}
