//! クライアント側ファイル保存
//!
//! Blob → Object URL → `<a download>` をクリックして保存させる。

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// バイト列をファイルとしてダウンロードさせる
pub fn download_bytes(bytes: &[u8], file_name: &str, mime: &str) -> Result<(), JsValue> {
    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::of1(&array);

    let options = BlobPropertyBag::new();
    options.set_type(mime);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("document is not available"))?;
    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    Url::revoke_object_url(&url)?;
    Ok(())
}

/// 失敗はコンソールに出すだけ
pub fn download_or_log(bytes: &[u8], file_name: &str, mime: &str) {
    if let Err(e) = download_bytes(bytes, file_name, mime) {
        web_sys::console::error_2(&JsValue::from_str("download failed:"), &e);
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_download_png() {
        let result = download_bytes(&[0x89, b'P', b'N', b'G'], "barcode.png", "image/png");
        assert!(result.is_ok());
    }
}
