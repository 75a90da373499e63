//! Theme support for the trace player.
//!
//! Provides the built-in color schemes (Light, Dark, Dracula, One Dark Pro),
//! a theme manager, and CSS color parsing for the process colors carried in
//! traces.
//!
//! # Examples
//!
//! ```
//! use rsched::theme::{ThemeManager, parse_css_color};
//!
//! let manager = ThemeManager::new();
//! let dracula = manager.get_theme("Dracula").unwrap();
//! println!("Dracula canvas: {:?}", dracula.colors.canvas);
//! assert!(parse_css_color("#f00").is_ok());
//! ```

use egui::Color32;
use std::collections::HashMap;

/// Palette assigned to processes in order of pid, matching the reference simulator.
pub const PROCESS_PALETTE: [&str; 10] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEEAD",
    "#D4A5A5", "#9B59B6", "#3498DB", "#E74C3C", "#2ECC71",
];

/// Color palette for a theme, covering the player's panels and canvases
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeColors {
    pub panel_background: Color32,
    /// Fill behind the scene and timeline canvases
    pub canvas: Color32,

    pub text: Color32,
    pub text_dim: Color32,

    /// Timeline baseline and tick marks
    pub axis: Color32,
    /// Outline drawn around process indicators and blocks
    pub outline: Color32,
    pub selection: Color32,
    pub hover: Color32,

    pub accent: Color32,
    pub error: Color32,
    pub warning: Color32,
}

/// A complete theme definition with metadata and color palette
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub description: String,
    pub dark: bool,
    pub colors: ThemeColors,
}

/// Centralized theme manager providing access to all available themes
pub struct ThemeManager {
    themes: HashMap<String, Theme>,
}

impl ThemeManager {
    /// Creates a new ThemeManager initialized with all built-in themes
    pub fn new() -> Self {
        let mut themes = HashMap::new();
        for theme in [light_theme(), dark_theme(), dracula_theme(), one_dark_pro_theme()] {
            themes.insert(theme.name.clone(), theme);
        }
        Self { themes }
    }

    /// Retrieves a theme by name
    pub fn get_theme(&self, name: &str) -> Option<&Theme> {
        self.themes.get(name)
    }

    /// Retrieves a theme by name, falling back to the default dark theme
    pub fn theme_or_default(&self, name: &str) -> &Theme {
        self.themes
            .get(name)
            .or_else(|| self.themes.get(DEFAULT_THEME))
            .unwrap_or_else(|| fallback_theme())
    }

    /// Returns a list of all available theme names
    pub fn list_themes(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.themes.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }

    /// Applies a theme's colors to egui visuals
    pub fn apply_theme(&self, theme: &Theme, visuals: &mut egui::Visuals) {
        let colors = &theme.colors;

        visuals.panel_fill = colors.panel_background;
        visuals.extreme_bg_color = colors.canvas;
        visuals.faint_bg_color = colors.hover;
        visuals.override_text_color = Some(colors.text);

        visuals.selection.bg_fill = colors.selection;
        visuals.selection.stroke.color = colors.accent;

        visuals.widgets.noninteractive.bg_fill = colors.panel_background;
        visuals.widgets.inactive.bg_fill = colors.hover;
        visuals.widgets.hovered.bg_fill = colors.hover;
        visuals.widgets.active.bg_fill = colors.selection;

        visuals.hyperlink_color = colors.accent;
        visuals.error_fg_color = colors.error;
        visuals.warn_fg_color = colors.warning;
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Name of the theme used when no preference is stored
pub const DEFAULT_THEME: &str = "Dark";

fn fallback_theme() -> &'static Theme {
    static FALLBACK: std::sync::OnceLock<Theme> = std::sync::OnceLock::new();
    FALLBACK.get_or_init(dark_theme)
}

fn light_theme() -> Theme {
    Theme {
        name: "Light".to_string(),
        description: "Light theme with egui default colors".to_string(),
        dark: false,
        colors: ThemeColors {
            panel_background: Color32::from_rgb(248, 248, 248),
            canvas: Color32::from_rgb(255, 255, 255),
            text: Color32::from_rgb(0, 0, 0),
            text_dim: Color32::from_rgb(120, 120, 120),
            axis: Color32::from_rgb(0, 0, 0),
            outline: Color32::from_rgb(90, 90, 90),
            selection: Color32::from_rgb(180, 200, 255),
            hover: Color32::from_rgb(220, 220, 220),
            accent: Color32::from_rgb(40, 100, 200),
            error: Color32::from_rgb(200, 40, 40),
            warning: Color32::from_rgb(230, 120, 20),
        },
    }
}

fn dark_theme() -> Theme {
    Theme {
        name: "Dark".to_string(),
        description: "Dark theme with egui default colors".to_string(),
        dark: true,
        colors: ThemeColors {
            panel_background: Color32::from_rgb(39, 39, 39),
            canvas: Color32::from_rgb(16, 16, 16),
            text: Color32::from_rgb(255, 255, 255),
            text_dim: Color32::from_rgb(160, 160, 160),
            axis: Color32::from_rgb(200, 200, 200),
            outline: Color32::from_rgb(100, 100, 100),
            selection: Color32::from_rgb(50, 80, 120),
            hover: Color32::from_rgb(70, 70, 70),
            accent: Color32::from_rgb(52, 152, 219),
            error: Color32::from_rgb(231, 76, 60),
            warning: Color32::from_rgb(243, 156, 18),
        },
    }
}

/// Official colors from: https://draculatheme.com/spec
fn dracula_theme() -> Theme {
    Theme {
        name: "Dracula".to_string(),
        description: "Official Dracula theme color palette".to_string(),
        dark: true,
        colors: ThemeColors {
            panel_background: hex_to_color32("#282a36"),
            canvas: hex_to_color32("#21222c"),
            text: hex_to_color32("#f8f8f2"),
            text_dim: hex_to_color32("#6272a4"),
            axis: hex_to_color32("#f8f8f2"),
            outline: hex_to_color32("#6272a4"),
            selection: hex_to_color32("#44475a"),
            hover: hex_to_color32("#44475a"),
            accent: hex_to_color32("#bd93f9"),
            error: hex_to_color32("#ff5555"),
            warning: hex_to_color32("#ffb86c"),
        },
    }
}

/// Official colors from: https://github.com/Binaryify/OneDark-Pro
fn one_dark_pro_theme() -> Theme {
    Theme {
        name: "One Dark Pro".to_string(),
        description: "VSCode One Dark Pro color palette".to_string(),
        dark: true,
        colors: ThemeColors {
            panel_background: hex_to_color32("#282c34"),
            canvas: hex_to_color32("#21252b"),
            text: hex_to_color32("#abb2bf"),
            text_dim: hex_to_color32("#5c6370"),
            axis: hex_to_color32("#abb2bf"),
            outline: hex_to_color32("#5c6370"),
            selection: hex_to_color32("#4b5263"),
            hover: hex_to_color32("#4b5263"),
            accent: hex_to_color32("#61afef"),
            error: hex_to_color32("#e06c75"),
            warning: hex_to_color32("#d19a66"),
        },
    }
}

/// Error returned when a trace carries a color the player cannot draw.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color {0:?}: expected #rgb, #rrggbb, a CSS color name or rgb()")]
pub struct ColorParseError(pub String);

/// Parses a CSS color: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, a named color
/// such as `red`, or a functional form such as `rgb(255 0 0)`.
pub fn parse_css_color(text: &str) -> Result<Color32, ColorParseError> {
    let err = || ColorParseError(text.to_string());
    let text = text.trim();
    if let Some(hex) = text.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(err);
    }
    // Hex digits without the leading '#' are not a CSS color.
    if text.is_empty() || text.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(err());
    }

    let [r, g, b, a] = csscolorparser::parse(text).map_err(|_| err())?.to_rgba8();
    Ok(Color32::from_rgba_unmultiplied(r, g, b, a))
}

fn parse_hex(hex: &str) -> Option<Color32> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    // #rgb expands each nibble: "f" -> "ff"
    let short = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);

    match hex.len() {
        3 => Some(Color32::from_rgb(short(0)?, short(1)?, short(2)?)),
        4 => Some(Color32::from_rgba_unmultiplied(short(0)?, short(1)?, short(2)?, short(3)?)),
        6 => Some(Color32::from_rgb(channel(0)?, channel(2)?, channel(4)?)),
        8 => Some(Color32::from_rgba_unmultiplied(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
        _ => None,
    }
}

/// Converts a hex color string (like "#282a36") to Color32, black if invalid
pub fn hex_to_color32(hex: &str) -> Color32 {
    parse_css_color(hex).unwrap_or(Color32::BLACK)
}

/// Adjusts the brightness of a color by a factor (1.0 = no change, >1.0 = brighter, <1.0 = darker)
pub fn adjust_brightness(color: Color32, factor: f32) -> Color32 {
    let r = (color.r() as f32 * factor).min(255.0) as u8;
    let g = (color.g() as f32 * factor).min(255.0) as u8;
    let b = (color.b() as f32 * factor).min(255.0) as u8;
    Color32::from_rgb(r, g, b)
}

/// Picks black or white label text for legibility on the given fill.
pub fn label_color_for(fill: Color32) -> Color32 {
    let luma = 0.299 * fill.r() as f32 + 0.587 * fill.g() as f32 + 0.114 * fill.b() as f32;
    if luma > 170.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_and_long_hex_agree() {
        assert_eq!(parse_css_color("#f00").unwrap(), Color32::from_rgb(255, 0, 0));
        assert_eq!(parse_css_color("#FF0000").unwrap(), Color32::from_rgb(255, 0, 0));
        assert_eq!(parse_css_color(" #0f0 ").unwrap(), Color32::from_rgb(0, 255, 0));
        assert_eq!(parse_css_color("#4ECDC4").unwrap(), Color32::from_rgb(0x4e, 0xcd, 0xc4));
    }

    #[test]
    fn test_invalid_colors_are_rejected() {
        for bad in ["", "#", "#ff", "#gggggg", "#12345", "#ééé", "#+f+0+0", "##f00", "f00", "ff0000", "notacolor"] {
            assert!(parse_css_color(bad).is_err(), "{bad:?} should not parse");
        }
        assert_eq!(hex_to_color32("nonsense"), Color32::BLACK);
    }

    #[test]
    fn test_named_and_functional_colors() {
        assert_eq!(parse_css_color("red").unwrap(), Color32::from_rgb(255, 0, 0));
        assert_eq!(parse_css_color("rebeccapurple").unwrap(), Color32::from_rgb(102, 51, 153));
        assert_eq!(parse_css_color("rgb(0, 128, 255)").unwrap(), Color32::from_rgb(0, 128, 255));
        assert_eq!(parse_css_color("#f008").unwrap().a(), 0x88);
    }

    #[test]
    fn test_every_process_palette_entry_parses() {
        for hex in PROCESS_PALETTE {
            assert!(parse_css_color(hex).is_ok());
        }
    }

    #[test]
    fn test_theme_fallback() {
        let manager = ThemeManager::new();
        assert_eq!(manager.list_themes(), vec!["Dark", "Dracula", "Light", "One Dark Pro"]);
        assert_eq!(manager.theme_or_default("Missing").name, "Dark");
        assert!(!manager.theme_or_default("Light").dark);
    }

    #[test]
    fn test_label_color_contrast() {
        assert_eq!(label_color_for(Color32::from_rgb(255, 238, 173)), Color32::BLACK);
        assert_eq!(label_color_for(Color32::from_rgb(155, 89, 182)), Color32::WHITE);
    }
}
