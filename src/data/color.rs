//! Label color helpers.

use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;

static COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^#[0-9A-F]{6}$").expect("color pattern is valid"));

/// Text color that stays readable on top of a label background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontColor {
    Black,
    White,
}

impl FontColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::White => "white",
        }
    }
}

/// Pick black or white text for a `#RRGGBB` background.
///
/// Uses perceived luminance (0.299 R + 0.587 G + 0.114 B). Anything that
/// does not parse falls through to white.
pub fn font_color(color: &str) -> FontColor {
    match rgb(color) {
        Some((r, g, b)) => {
            let luminance = (r as f64 * 0.299 + g as f64 * 0.587 + b as f64 * 0.114) / 255.0;
            if luminance >= 0.5 {
                FontColor::Black
            } else {
                FontColor::White
            }
        }
        None => FontColor::White,
    }
}

/// `#` followed by exactly six hex digits, any case.
pub fn is_valid_color(color: &str) -> bool {
    COLOR_RE.is_match(color)
}

/// A random `#rrggbb` color, always six digits.
pub fn random_color() -> String {
    let value: u32 = rand::thread_rng().gen_range(0..=0xFF_FFFF);
    format!("#{:06x}", value)
}

/// Split a `#RRGGBB` string into its components.
pub fn rgb(color: &str) -> Option<(u8, u8, u8)> {
    if !is_valid_color(color) {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&color[range], 16).ok();
    Some((channel(1..3)?, channel(3..5)?, channel(5..7)?))
}
