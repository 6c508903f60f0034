//! 対話式フォーム入力
//!
//! 単票フォームの全項目を順に尋ねる。既に値がある項目はその値を初期値にし、
//! 必須項目（*）は空のままでは先に進めない。

use crate::error::{Result, WmsQrError};
use dialoguer::Input;
use wms_qr_common::{FormField, SingleForm};

/// プロンプト文字列
pub fn prompt_label(field: FormField) -> String {
    let mut label = field.label().to_string();
    if field.is_required() {
        label.push_str(" *");
    }
    if let Some(placeholder) = field.placeholder() {
        label.push_str(&format!(" (空欄: {})", placeholder));
    }
    label
}

/// 全項目を対話入力
pub fn prompt_form(mut form: SingleForm) -> Result<SingleForm> {
    println!("項目を入力してください（* は必須）\n");

    for field in FormField::ALL {
        let value = prompt_field(field, form.get(field))?;
        form.set(field, value);
    }

    println!();
    Ok(form)
}

fn prompt_field(field: FormField, current: &str) -> Result<String> {
    let mut input = Input::<String>::new()
        .with_prompt(prompt_label(field))
        .allow_empty(!field.is_required());

    if !current.is_empty() {
        input = input.default(current.to_string());
    }

    if field.is_numeric() {
        input = input.validate_with(|v: &String| -> std::result::Result<(), &str> {
            if v.trim().is_empty() || v.trim().parse::<f64>().is_ok() {
                Ok(())
            } else {
                Err("数値を入力してください")
            }
        });
    }

    let value = input
        .interact_text()
        .map_err(|e| WmsQrError::Prompt(e.to_string()))?;

    Ok(value.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_label_required() {
        assert_eq!(prompt_label(FormField::PoNumber), "PONumber *");
        assert_eq!(prompt_label(FormField::Quantity), "Quantity *");
    }

    #[test]
    fn test_prompt_label_placeholder() {
        assert_eq!(prompt_label(FormField::Location), "Location (空欄: Unknown)");
        assert_eq!(
            prompt_label(FormField::Supplier),
            "Supplier * (空欄: Unknown Supplier)"
        );
        assert_eq!(prompt_label(FormField::ReceivingDate), "ReceivingDate");
    }
}
