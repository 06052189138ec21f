//! User interface chrome for the COVID statistics dashboard
//! 
//! This crate provides the theme and the menu/status bars wrapped around
//! whichever view the router currently shows.

pub mod theme;
pub mod shell;

pub use shell::{menu_bar, status_bar, nav_entries, ShellConfig};
pub use theme::{Theme, apply_theme};

// Widget creation helpers
pub fn icon_button(ui: &mut egui::Ui, icon: &str, tooltip: &str) -> egui::Response {
    ui.add(egui::Button::new(icon))
        .on_hover_text(tooltip)
}

// Common icon definitions
pub mod icons {
    pub const HOME: &str = "🏠";
    pub const BACK: &str = "⬅";
    pub const CHART: &str = "📊";
    pub const THEME: &str = "🌓";
}
