//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"WMS QR - 入荷ラベル生成"</h1>
        </header>
    }
}
