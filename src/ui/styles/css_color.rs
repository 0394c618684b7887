// SPDX-License-Identifier: MPL-2.0
//! CSS color string parsing.
//!
//! Configuration colors are stored as CSS color strings (the format the
//! source platform persists). This module converts them into Iced colors.
//! Supported forms: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`,
//! `rgb(r, g, b)`, `rgba(r, g, b, a)`, and a small set of named colors.

use iced::Color;

/// Parses a CSS color string. Returns `None` for anything unparsable so the
/// caller can fall back to a theme value instead of rendering garbage.
#[must_use]
pub fn parse(input: &str) -> Option<Color> {
    let value = input.trim().to_ascii_lowercase();

    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }

    if let Some(args) = value
        .strip_prefix("rgba(")
        .or_else(|| value.strip_prefix("rgb("))
    {
        return parse_rgb_args(args.strip_suffix(')')?);
    }

    parse_named(&value)
}

fn parse_hex(hex: &str) -> Option<Color> {
    let expand = |c: u8| c * 17; // 0xf -> 0xff

    match hex.len() {
        3 | 4 => {
            let mut channels = [0u8; 4];
            for (i, c) in hex.chars().enumerate() {
                channels[i] = expand(c.to_digit(16)? as u8);
            }
            let a = if hex.len() == 4 { channels[3] } else { 255 };
            Some(rgba8(channels[0], channels[1], channels[2], a))
        }
        6 | 8 => {
            let mut channels = [0u8; 4];
            for (i, chunk) in hex.as_bytes().chunks(2).enumerate() {
                let pair = std::str::from_utf8(chunk).ok()?;
                channels[i] = u8::from_str_radix(pair, 16).ok()?;
            }
            let a = if hex.len() == 8 { channels[3] } else { 255 };
            Some(rgba8(channels[0], channels[1], channels[2], a))
        }
        _ => None,
    }
}

fn parse_rgb_args(args: &str) -> Option<Color> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }

    let r: u8 = parts[0].parse().ok()?;
    let g: u8 = parts[1].parse().ok()?;
    let b: u8 = parts[2].parse().ok()?;
    let a: f32 = if parts.len() == 4 {
        let alpha: f32 = parts[3].parse().ok()?;
        if !(0.0..=1.0).contains(&alpha) {
            return None;
        }
        alpha
    } else {
        1.0
    };

    Some(Color {
        a,
        ..rgba8(r, g, b, 255)
    })
}

fn parse_named(name: &str) -> Option<Color> {
    // The handful of keywords the source widget's configs actually used.
    match name {
        "black" => Some(Color::BLACK),
        "white" => Some(Color::WHITE),
        "red" => Some(rgba8(255, 0, 0, 255)),
        "green" => Some(rgba8(0, 128, 0, 255)),
        "blue" => Some(rgba8(0, 0, 255, 255)),
        "gray" | "grey" => Some(rgba8(128, 128, 128, 255)),
        "transparent" => Some(Color::TRANSPARENT),
        _ => None,
    }
}

fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Color {
    Color::from_rgba(
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
        f32::from(a) / 255.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1.0 / 255.0,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn parses_six_digit_hex() {
        let color = parse("#123456").expect("color");
        assert_close(color.r, 0x12 as f32 / 255.0);
        assert_close(color.g, 0x34 as f32 / 255.0);
        assert_close(color.b, 0x56 as f32 / 255.0);
        assert_close(color.a, 1.0);
    }

    #[test]
    fn parses_three_digit_hex() {
        let color = parse("#fff").expect("color");
        assert_close(color.r, 1.0);
        assert_close(color.g, 1.0);
        assert_close(color.b, 1.0);
    }

    #[test]
    fn parses_eight_digit_hex_with_alpha() {
        let color = parse("#00000080").expect("color");
        assert_close(color.a, 128.0 / 255.0);
    }

    #[test]
    fn parses_rgb_function() {
        let color = parse("rgb(255, 0, 0)").expect("color");
        assert_close(color.r, 1.0);
        assert_close(color.g, 0.0);
    }

    #[test]
    fn parses_rgba_function() {
        let color = parse("rgba(0, 0, 0, 0.6)").expect("color");
        assert_close(color.a, 0.6);
        assert_close(color.r, 0.0);
    }

    #[test]
    fn parses_named_colors() {
        assert_eq!(parse("white"), Some(Color::WHITE));
        assert_eq!(parse("transparent"), Some(Color::TRANSPARENT));
    }

    #[test]
    fn is_case_and_whitespace_insensitive() {
        assert!(parse("  #ABCDEF ").is_some());
        assert!(parse("RGBA(1, 2, 3, 0.5)").is_some());
        assert_eq!(parse("White"), Some(Color::WHITE));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("#12345"), None);
        assert_eq!(parse("#zzzzzz"), None);
        assert_eq!(parse("rgb(1,2)"), None);
        assert_eq!(parse("rgba(0,0,0,1.5)"), None);
        assert_eq!(parse("bleu"), None);
    }
}
