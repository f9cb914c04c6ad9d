//! Width and height text conversions.
//!
//! Widths are stored in feet. They are displayed either as feet with
//! quarter fractions ("5½'") or as meters ("1.65 m"), and typed text in either
//! system is converted back to feet.

use serde::{Deserialize, Serialize};

/// Meters per foot used by the street editor (a rounded, editor-wide value).
pub const METERS_PER_FOOT: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UnitSystem {
    #[default]
    Imperial,
    Metric,
}

/// Rounds a value to the nearest multiple of `resolution`.
pub fn round_to_resolution(value: f64, resolution: f64) -> f64 {
    if resolution <= 0.0 || !value.is_finite() {
        return value;
    }
    (value / resolution).round() * resolution
}

/// Formats a width for display, with its unit decoration.
pub fn prettify_width(width: f64, units: UnitSystem) -> String {
    match units {
        UnitSystem::Imperial => {
            let quarters = (width * 4.0).round() as i64;
            let whole = quarters / 4;
            let fraction = match quarters % 4 {
                1 => "¼",
                2 => "½",
                3 => "¾",
                _ => "",
            };
            if whole == 0 && !fraction.is_empty() {
                format!("{fraction}'")
            } else {
                format!("{whole}{fraction}'")
            }
        }
        UnitSystem::Metric => format!("{} m", trim_number(width * METERS_PER_FOOT)),
    }
}

/// Formats a width the way it should appear while being edited: a bare number.
pub fn undecorate_width(width: f64, units: UnitSystem) -> String {
    match units {
        UnitSystem::Imperial => trim_number(width),
        UnitSystem::Metric => trim_number(width * METERS_PER_FOOT),
    }
}

/// Formats a building height: "3 floors (35')".
pub fn prettify_height(floors: u32, real_height: f64, units: UnitSystem) -> String {
    let noun = if floors > 1 { "floors" } else { "floor" };
    format!("{} {} ({})", floors, noun, prettify_width(real_height, units))
}

/// Converts typed width text to feet.
///
/// Accepts a bare number (interpreted in `units`), feet and inches
/// (`5'`, `5ft`, `5' 6"`, `18in`), meters (`1.8m`, `180cm`) and the quarter
/// fraction glyphs. Returns `None` when no number can be read.
pub fn process_width_input(text: &str, units: UnitSystem) -> Option<f64> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect::<String>().to_lowercase();
    let (value, rest) = read_number(&compact)?;

    let feet = match unit_suffix(rest) {
        (Suffix::None, _) => match units {
            UnitSystem::Imperial => value,
            UnitSystem::Metric => value / METERS_PER_FOOT,
        },
        (Suffix::Feet, after) => {
            let inches = read_number(after)
                .filter(|(_, tail)| matches!(unit_suffix(tail).0, Suffix::Inches | Suffix::None))
                .map(|(inches, _)| inches)
                .unwrap_or(0.0);
            value + inches / 12.0
        }
        (Suffix::Inches, _) => value / 12.0,
        (Suffix::Meters, _) => value / METERS_PER_FOOT,
        (Suffix::Centimeters, _) => value / 100.0 / METERS_PER_FOOT,
        (Suffix::Unknown, _) => value,
    };

    feet.is_finite().then_some(feet)
}

#[derive(Clone, Copy)]
enum Suffix {
    None,
    Feet,
    Inches,
    Meters,
    Centimeters,
    Unknown,
}

fn unit_suffix(rest: &str) -> (Suffix, &str) {
    const TABLE: [(&str, Suffix); 10] = [
        ("feet", Suffix::Feet),
        ("ft", Suffix::Feet),
        ("'", Suffix::Feet),
        ("’", Suffix::Feet),
        ("′", Suffix::Feet),
        ("in", Suffix::Inches),
        ("\"", Suffix::Inches),
        ("″", Suffix::Inches),
        ("cm", Suffix::Centimeters),
        ("m", Suffix::Meters),
    ];

    if rest.is_empty() {
        return (Suffix::None, rest);
    }
    for (token, suffix) in TABLE {
        if let Some(after) = rest.strip_prefix(token) {
            return (suffix, after);
        }
    }
    (Suffix::Unknown, rest)
}

/// Reads a leading decimal number, optionally followed by a fraction glyph.
fn read_number(text: &str) -> Option<(f64, &str)> {
    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in text.char_indices() {
        match c {
            '0'..='9' => end = i + 1,
            '.' | ',' if !seen_dot => {
                seen_dot = true;
                end = i + 1;
            }
            _ => break,
        }
    }

    let digits = text[..end].replace(',', ".");
    let mut value = if digits.chars().any(|c| c.is_ascii_digit()) {
        digits.parse::<f64>().ok()?
    } else {
        0.0
    };

    let mut rest = &text[end..];
    let fraction = match rest.chars().next() {
        Some('¼') => Some(0.25),
        Some('½') => Some(0.5),
        Some('¾') => Some(0.75),
        _ => None,
    };
    if let Some(fraction) = fraction {
        value += fraction;
        rest = &rest[rest.chars().next().map(char::len_utf8).unwrap_or(0)..];
    } else if !digits.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    Some((value, rest))
}

fn trim_number(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    let text = format!("{rounded:.3}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
