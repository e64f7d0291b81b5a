//! Text measurement for the two fonts invoices use.
//!
//! Widths are the Adobe AFM advance widths for Helvetica and Helvetica-Bold,
//! printable ASCII only, in 1/1000 em.

use super::style::{FontWeight, TextStyle};

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Width used for anything outside printable ASCII.
const FALLBACK_WIDTH: u16 = 556;

pub fn char_width(weight: FontWeight, ch: char) -> u16 {
    let code = ch as u32;
    if !(32..=126).contains(&code) {
        return FALLBACK_WIDTH;
    }
    let index = (code - 32) as usize;
    match weight {
        FontWeight::Regular => HELVETICA[index],
        FontWeight::Bold => HELVETICA_BOLD[index],
    }
}

/// Width of `text` in points.
pub fn text_width(text: &str, style: &TextStyle) -> f64 {
    let units: u32 = text
        .chars()
        .map(|ch| char_width(style.weight, ch) as u32)
        .sum();
    units as f64 * style.size / 1000.0
}

/// Longest prefix of `text` that fits in `max_width` points.
///
/// Text is cut at a character boundary; nothing is appended.
pub fn clip_to_width<'a>(text: &'a str, style: &TextStyle, max_width: f64) -> &'a str {
    let mut used = 0.0;
    for (idx, ch) in text.char_indices() {
        used += char_width(style.weight, ch) as f64 * style.size / 1000.0;
        if used > max_width {
            return &text[..idx];
        }
    }
    text
}
