use crate::error::ColorError;
use lazy_regex::regex_is_match;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}

/// Decodes `rrggbb` or the `rgb` shorthand, with or without a leading `#`.
pub fn hex_to_rgb(hex: &str) -> Result<Rgb, ColorError> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);

    if !regex_is_match!(r"^[0-9a-fA-F]*$", digits) {
        return Err(ColorError::InvalidDigit(hex.to_string()));
    }

    let expanded = match digits.len() {
        6 => digits.to_string(),
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        len => {
            return Err(ColorError::InvalidLength {
                hex: hex.to_string(),
                len,
            })
        }
    };

    let channel = |i: usize| {
        u8::from_str_radix(&expanded[i..i + 2], 16)
            .map_err(|_| ColorError::InvalidDigit(hex.to_string()))
    };

    Ok(Rgb {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}
