//! 単票入力フォーム
//!
//! 送信するとペイロードをQRコードにしてプレビューし、
//! 余白付きPNGとしてダウンロードできる。

use leptos::prelude::*;
use crate::export::{self, download::download_or_log, PNG_MIME};
use wms_qr_common::export::{MarginStyle, QrStyle, SINGLE_FILE_NAME};
use wms_qr_common::{FormField, SingleForm};

#[component]
pub fn SingleFormPanel() -> impl IntoView {
    let form = RwSignal::new(SingleForm::new(export::today()));
    let (payload, set_payload) = signal(None::<String>);
    let (preview, set_preview) = signal(None::<String>);
    let (error, set_error) = signal(None::<String>);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let result = form
            .get_untracked()
            .submit(export::today())
            .map_err(|e| e.to_string())
            .and_then(|p| export::render_png(&p, &QrStyle::single()).map(|png| (p, png)));

        match result {
            Ok((p, png)) => {
                set_preview.set(Some(export::png_data_url(&png)));
                set_payload.set(Some(p));
                set_error.set(None);
            }
            Err(e) => set_error.set(Some(e)),
        }
    };

    let on_download = move |_| {
        let Some(p) = payload.get_untracked() else { return };
        match export::render_framed_png(&p, &QrStyle::single(), &MarginStyle::default()) {
            Ok(png) => download_or_log(&png, SINGLE_FILE_NAME, PNG_MIME),
            Err(e) => set_error.set(Some(e)),
        }
    };

    view! {
        <form class="single-form" on:submit=on_submit>
            <div class="form-grid">
                {FormField::ALL
                    .into_iter()
                    .map(|field| view! { <FieldInput form=form field=field /> })
                    .collect_view()}
            </div>
            <button type="submit" class="btn btn-primary">"QRコード生成"</button>
        </form>

        <Show when=move || error.get().is_some()>
            <p class="error-message">{move || error.get().unwrap_or_default()}</p>
        </Show>

        <Show when=move || preview.get().is_some()>
            <div class="qr-preview">
                <img src=move || preview.get().unwrap_or_default() alt="QR code" />
                <div>
                    <button class="btn btn-secondary" on:click=on_download>
                        "PNGダウンロード"
                    </button>
                </div>
            </div>
        </Show>
    }
}

#[component]
fn FieldInput(form: RwSignal<SingleForm>, field: FormField) -> impl IntoView {
    let id = format!("field-{}", field.label());

    view! {
        <div class="form-group">
            <label for=id.clone()>
                {field.label()}
                {field.is_required().then(|| view! { <span class="required">" *"</span> })}
            </label>
            <input
                id=id
                type="text"
                inputmode=if field.is_numeric() { "decimal" } else { "text" }
                required=field.is_required()
                placeholder=field.placeholder().unwrap_or_default()
                prop:value=move || form.with(|f| f.get(field).to_string())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    form.update(|f| f.set(field, value));
                }
            />
        </div>
    }
}
