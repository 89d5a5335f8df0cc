// ♿ Accessibility helpers
// WCAG 2.x contrast math for badge/legend colors, plus screen-reader labels

use crate::error::{DashboardError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Relative luminance (WCAG 2.x definition)
    pub fn luminance(&self) -> f64 {
        fn channel(c: u8) -> f64 {
            let c = c as f64 / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }

        0.2126 * channel(self.r) + 0.7152 * channel(self.g) + 0.0722 * channel(self.b)
    }
}

/// Parse `#RRGGBB` or `#RGB` (leading `#` optional)
pub fn parse_hex_color(hex: &str) -> Result<Rgb> {
    let digits = hex.trim().trim_start_matches('#');
    let invalid = || DashboardError::InvalidColor(hex.to_string());

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return Err(invalid()),
    };

    let byte = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).map_err(|_| invalid());

    Ok(Rgb {
        r: byte(0)?,
        g: byte(2)?,
        b: byte(4)?,
    })
}

/// Contrast ratio between two colors, from 1.0 (none) to 21.0 (black on white)
pub fn contrast_ratio(a: &str, b: &str) -> Result<f64> {
    let la = parse_hex_color(a)?.luminance();
    let lb = parse_hex_color(b)?.luminance();
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };

    Ok((lighter + 0.05) / (darker + 0.05))
}

/// Black or white, whichever reads better on `background`
pub fn readable_text_on(background: &str) -> Result<&'static str> {
    let on_black = contrast_ratio(background, "#000000")?;
    let on_white = contrast_ratio(background, "#FFFFFF")?;

    Ok(if on_black >= on_white { "#000000" } else { "#FFFFFF" })
}

/// `"Portfolio allocation: Bitcoin 45%, Ethereum 30%"`
pub fn chart_aria_label<'a>(
    title: &str,
    entries: impl IntoIterator<Item = (&'a str, u32)>,
) -> String {
    let parts: Vec<String> = entries
        .into_iter()
        .map(|(label, pct)| format!("{} {}%", label, pct))
        .collect();

    if parts.is_empty() {
        title.to_string()
    } else {
        format!("{}: {}", title, parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#F7931A").unwrap(), Rgb { r: 0xF7, g: 0x93, b: 0x1A });
        assert_eq!(parse_hex_color("fff").unwrap(), Rgb { r: 255, g: 255, b: 255 });
        assert!(parse_hex_color("#12345").is_err());
        assert!(parse_hex_color("#GGGGGG").is_err());
    }

    #[test]
    fn test_contrast_black_on_white() {
        let ratio = contrast_ratio("#000000", "#FFFFFF").unwrap();
        assert!((ratio - 21.0).abs() < 1e-9);

        let same = contrast_ratio("#627EEA", "#627EEA").unwrap();
        assert!((same - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_contrast_is_symmetric() {
        let a = contrast_ratio("#F7931A", "#1F2937").unwrap();
        let b = contrast_ratio("#1F2937", "#F7931A").unwrap();
        assert!((a - b).abs() < 1e-12);
    }

    #[test]
    fn test_readable_text_on() {
        assert_eq!(readable_text_on("#FFFFFF").unwrap(), "#000000");
        assert_eq!(readable_text_on("#111827").unwrap(), "#FFFFFF");
        assert!(readable_text_on("not-a-color").is_err());
    }

    #[test]
    fn test_chart_aria_label() {
        let label = chart_aria_label("Portfolio allocation", [("Bitcoin", 45), ("Ethereum", 30)]);
        assert_eq!(label, "Portfolio allocation: Bitcoin 45%, Ethereum 30%");
        assert_eq!(chart_aria_label("Empty", Vec::<(&str, u32)>::new()), "Empty");
    }
}
