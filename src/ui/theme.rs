//! Colors for the embedded wallet modal.
//!
//! Two palettes, picked by name from the settings file. Anything other than
//! `"light"` falls back to dark.

use eframe::egui::{self, Color32};

#[derive(Clone, Debug)]
pub struct ModalTheme {
    pub name: String,
    /// Dim layer painted over the host page while the modal is open
    pub backdrop: Color32,
    /// Modal card background
    pub surface: Color32,
    pub border: Color32,
    pub accent: Color32,
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,
}

impl ModalTheme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            backdrop: Color32::from_black_alpha(160),
            surface: Color32::from_rgb(28, 28, 38),
            border: Color32::from_rgb(47, 49, 54),
            accent: Color32::from_rgb(88, 101, 242),
            text_primary: Color32::WHITE,
            text_secondary: Color32::from_rgb(185, 187, 190),
            text_muted: Color32::from_rgb(114, 118, 125),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            backdrop: Color32::from_black_alpha(100),
            surface: Color32::from_rgb(255, 255, 255),
            border: Color32::from_rgb(220, 221, 222),
            accent: Color32::from_rgb(88, 101, 242),
            text_primary: Color32::from_rgb(6, 6, 7),
            text_secondary: Color32::from_rgb(79, 86, 96),
            text_muted: Color32::from_rgb(116, 127, 141),
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Matching egui visuals for the host page.
    pub fn visuals(&self) -> egui::Visuals {
        if self.name == "light" {
            egui::Visuals::light()
        } else {
            egui::Visuals::dark()
        }
    }
}

/// Parse `#rgb` / `#rrggbb` fill attributes from the markup.
pub fn parse_hex_color(value: &str) -> Option<Color32> {
    let hex = value.strip_prefix('#').filter(|h| h.is_ascii())?;
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some(Color32::from_rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        3 => {
            let expand = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
            Some(Color32::from_rgb(expand(0)?, expand(1)?, expand(2)?))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_falls_back_to_dark() {
        assert_eq!(ModalTheme::from_name("light").name, "light");
        assert_eq!(ModalTheme::from_name("dark").name, "dark");
        assert_eq!(ModalTheme::from_name("solarized").name, "dark");
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#4CAF50"), Some(Color32::from_rgb(76, 175, 80)));
        assert_eq!(parse_hex_color("#a0a0a0"), Some(Color32::from_rgb(160, 160, 160)));
        assert_eq!(parse_hex_color("#fff"), Some(Color32::WHITE));
        assert_eq!(parse_hex_color("4CAF50"), None);
        assert_eq!(parse_hex_color("#zzzzzz"), None);
        assert_eq!(parse_hex_color("#12345"), None);
    }
}
