//! 単票ダウンロード用の余白付け
//!
//! QRコード画像を一回り大きいキャンバスに貼り、周囲を灰色で塗る。

use crate::error::{Error, Result};
use image::imageops;
use image::{DynamicImage, GrayImage, Rgba, RgbaImage};

pub const DEFAULT_MARGIN: u32 = 20;
pub const DEFAULT_MARGIN_COLOR: &str = "#cccccc";
/// 余白幅の上限(px)
pub const MAX_MARGIN: u32 = 1024;

/// 余白設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarginStyle {
    pub width: u32,
    pub color: Rgba<u8>,
}

impl MarginStyle {
    pub fn new(width: u32, color: &str) -> Result<Self> {
        Ok(Self {
            width,
            color: parse_hex_color(color)?,
        })
    }
}

impl Default for MarginStyle {
    fn default() -> Self {
        Self {
            width: DEFAULT_MARGIN,
            color: Rgba([0xcc, 0xcc, 0xcc, 0xff]),
        }
    }
}

/// `#rgb` / `#rrggbb` / `#rrggbbaa` を解釈
pub fn parse_hex_color(s: &str) -> Result<Rgba<u8>> {
    let hex = s.trim().trim_start_matches('#');
    let invalid = || Error::Config(format!("invalid color: {}", s));

    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 | 8 => hex.to_string(),
        _ => return Err(invalid()),
    };

    let channel = |i: usize| {
        expanded
            .get(i..i + 2)
            .and_then(|h| u8::from_str_radix(h, 16).ok())
            .ok_or_else(invalid)
    };

    let alpha = if expanded.len() == 8 { channel(6)? } else { 0xff };
    Ok(Rgba([channel(0)?, channel(2)?, channel(4)?, alpha]))
}

/// 余白を付けたRGBA画像を返す
pub fn add_margin(image: &GrayImage, style: &MarginStyle) -> Result<RgbaImage> {
    let framed = |side: u32| {
        style
            .width
            .checked_mul(2)
            .and_then(|border| side.checked_add(border))
            .ok_or_else(|| Error::Config(format!("margin too large: {}", style.width)))
    };
    let width = framed(image.width())?;
    let height = framed(image.height())?;

    let mut canvas = RgbaImage::from_pixel(width, height, style.color);
    let qr = DynamicImage::ImageLuma8(image.clone()).to_rgba8();
    imageops::overlay(&mut canvas, &qr, i64::from(style.width), i64::from(style.width));
    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#cccccc").unwrap(), Rgba([0xcc, 0xcc, 0xcc, 0xff]));
        assert_eq!(parse_hex_color("ccc").unwrap(), Rgba([0xcc, 0xcc, 0xcc, 0xff]));
        assert_eq!(parse_hex_color("#10203040").unwrap(), Rgba([0x10, 0x20, 0x30, 0x40]));
        assert!(parse_hex_color("#zzzzzz").is_err());
        assert!(parse_hex_color("#12345").is_err());
    }

    #[test]
    fn test_add_margin_dimensions() {
        let qr = GrayImage::from_pixel(256, 256, Luma([0]));
        let framed = add_margin(&qr, &MarginStyle::default()).unwrap();
        assert_eq!(framed.dimensions(), (296, 296));
    }

    #[test]
    fn test_add_margin_colors() {
        let qr = GrayImage::from_pixel(10, 10, Luma([0]));
        let style = MarginStyle::default();
        let framed = add_margin(&qr, &style).unwrap();

        // 四隅は余白色
        for (x, y) in [(0, 0), (49, 0), (0, 49), (49, 49)] {
            assert_eq!(*framed.get_pixel(x, y), style.color);
        }
        // 中央はQR画像
        assert_eq!(*framed.get_pixel(20, 20), Rgba([0, 0, 0, 255]));
        assert_eq!(*framed.get_pixel(29, 29), Rgba([0, 0, 0, 255]));
        // 境界のすぐ外は余白
        assert_eq!(*framed.get_pixel(19, 20), style.color);
        assert_eq!(*framed.get_pixel(30, 30), style.color);
    }

    #[test]
    fn test_zero_margin() {
        let qr = GrayImage::from_pixel(8, 8, Luma([255]));
        let style = MarginStyle::new(0, "#000").unwrap();
        let framed = add_margin(&qr, &style).unwrap();
        assert_eq!(framed.dimensions(), (8, 8));
        assert_eq!(*framed.get_pixel(0, 0), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_add_margin_overflow_is_error() {
        let qr = GrayImage::from_pixel(4, 4, Luma([0]));
        let style = MarginStyle::new(u32::MAX, "#ccc").unwrap();
        let err = add_margin(&qr, &style).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let style = MarginStyle::new(u32::MAX / 2, "#ccc").unwrap();
        assert!(add_margin(&qr, &style).is_err());
    }
}
