use egui::{Context, Visuals, Style, Color32, Rounding, Stroke, FontId, FontFamily, TextStyle};
use serde::{Serialize, Deserialize};
use std::collections::BTreeMap;

/// Theme configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub dark_mode: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "Dashboard Dark".to_string(),
            dark_mode: true,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "Dashboard Light".to_string(),
            dark_mode: false,
        }
    }

    /// The other of dark and light
    pub fn toggled(&self) -> Self {
        if self.dark_mode {
            Self::light()
        } else {
            Self::dark()
        }
    }
}

/// Apply the application theme
pub fn apply_theme(ctx: &Context, theme: &Theme) {
    let mut style = Style::default();
    let mut visuals = if theme.dark_mode {
        dark_visuals()
    } else {
        Visuals::light()
    };

    let accent = accent_color();
    visuals.selection.bg_fill = accent.linear_multiply(0.3);
    visuals.selection.stroke = Stroke::new(1.0, accent);
    visuals.hyperlink_color = accent;
    visuals.error_fg_color = error_color();

    // Spacing
    style.spacing.item_spacing = egui::vec2(8.0, 4.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    style.spacing.menu_margin = egui::Margin::same(8.0);
    style.spacing.indent = 20.0;

    // Font sizes
    let mut font_sizes = BTreeMap::new();
    font_sizes.insert(TextStyle::Small, FontId::new(11.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Body, FontId::new(13.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Button, FontId::new(13.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Heading, FontId::new(18.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Monospace, FontId::new(12.0, FontFamily::Monospace));
    style.text_styles = font_sizes;

    ctx.set_style(style);
    ctx.set_visuals(visuals);
    tracing::debug!("Applied theme {}", theme.name);
}

fn dark_visuals() -> Visuals {
    let mut visuals = Visuals::dark();

    let bg_color = Color32::from_rgb(23, 23, 23);
    let panel_bg = Color32::from_rgb(31, 31, 31);
    let widget_bg = Color32::from_rgb(40, 40, 40);
    let text_color = Color32::from_rgb(220, 220, 220);

    visuals.window_fill = panel_bg;
    visuals.panel_fill = panel_bg;
    visuals.extreme_bg_color = bg_color;
    visuals.faint_bg_color = widget_bg;

    for (widget, bg, border) in [
        (&mut visuals.widgets.noninteractive, widget_bg, 60),
        (&mut visuals.widgets.inactive, widget_bg, 70),
        (&mut visuals.widgets.hovered, Color32::from_rgb(50, 50, 50), 80),
        (&mut visuals.widgets.active, Color32::from_rgb(60, 60, 60), 90),
    ] {
        widget.bg_fill = bg;
        widget.bg_stroke = Stroke::new(1.0, Color32::from_gray(border));
        widget.fg_stroke = Stroke::new(1.0, text_color);
        widget.rounding = Rounding::same(4.0);
    }

    visuals.code_bg_color = Color32::from_rgb(35, 35, 35);
    visuals.window_shadow.extrusion = 8.0;
    visuals.popup_shadow.extrusion = 4.0;
    visuals
}

/// Get the accent color for the theme
pub fn accent_color() -> Color32 {
    Color32::from_rgb(100, 150, 250)
}

/// Get the error color for the theme
pub fn error_color() -> Color32 {
    Color32::from_rgb(230, 80, 80)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips_mode() {
        let theme = Theme::default();
        assert!(theme.dark_mode);
        assert!(!theme.toggled().dark_mode);
        assert_eq!(theme.toggled().toggled(), theme);
    }

    #[test]
    fn test_theme_serializes() {
        let json = serde_json::to_value(Theme::light()).unwrap();
        assert_eq!(json["dark_mode"], false);
    }
}
