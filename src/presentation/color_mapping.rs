//! Colors for canvas elements that do not come from the trace itself.

use egui::Color32;
use rsched::{adjust_brightness, ThemeColors, ThemeManager};

/// Returns the current theme's color palette, falling back to the default theme.
pub fn theme_colors<'a>(
    theme_manager: &'a ThemeManager,
    current_theme_name: &str,
) -> &'a ThemeColors {
    &theme_manager.theme_or_default(current_theme_name).colors
}

/// Outline drawn around a process indicator or timeline block.
pub fn outline_for(fill: Color32, colors: &ThemeColors) -> Color32 {
    if colors.canvas.r() < 128 {
        adjust_brightness(fill, 1.3)
    } else {
        adjust_brightness(fill, 0.7)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_theme_falls_back() {
        let manager = ThemeManager::new();
        let colors = theme_colors(&manager, "No Such Theme");
        assert_eq!(colors, &manager.theme_or_default(rsched::theme::DEFAULT_THEME).colors);
    }

    #[test]
    fn test_outline_differs_from_fill() {
        let manager = ThemeManager::new();
        let dark = theme_colors(&manager, "Dark");
        let fill = Color32::from_rgb(100, 100, 100);
        assert_ne!(outline_for(fill, dark), fill);
    }
}
