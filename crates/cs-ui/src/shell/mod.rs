use egui::{Context, TopBottomPanel};
use cs_core::{Entity, Route, Router};

use crate::{icons, theme::Theme};

/// Shell configuration
#[derive(Debug, Clone)]
pub struct ShellConfig {
    pub show_menu_bar: bool,
    pub show_status_bar: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            show_menu_bar: true,
            show_status_bar: true,
        }
    }
}

/// Entries of the Navigate menu
pub fn nav_entries() -> [(&'static str, Route); 3] {
    [
        ("Home", Route::Home),
        ("World statistics", Route::stats(Entity::World)),
        ("India statistics", Route::stats(Entity::India)),
    ]
}

/// Render the main menu bar
pub fn menu_bar(ctx: &Context, router: &Router, theme: &mut Theme) {
    TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Exit").clicked() {
                    ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("Navigate", |ui| {
                for (label, route) in nav_entries() {
                    let current = router.current() == route;
                    if ui.add_enabled(!current, egui::Button::new(label)).clicked() {
                        router.push(route);
                        ui.close_menu();
                    }
                }

                ui.separator();

                if ui.add_enabled(router.can_go_back(), egui::Button::new("Back")).clicked() {
                    router.back();
                    ui.close_menu();
                }
            });

            ui.menu_button("View", |ui| {
                let label = if theme.dark_mode { "Light theme" } else { "Dark theme" };
                if ui.button(format!("{} {}", icons::THEME, label)).clicked() {
                    *theme = theme.toggled();
                    crate::apply_theme(ui.ctx(), theme);
                    ui.close_menu();
                }
            });

            ui.separator();

            if crate::icon_button(ui, icons::HOME, "Home").clicked() {
                router.home();
            }
            if ui
                .add_enabled(router.can_go_back(), egui::Button::new(icons::BACK))
                .on_hover_text("Back")
                .clicked()
            {
                router.back();
            }
        });
    });
}

/// Render the bottom status bar: current path and data source
pub fn status_bar(ctx: &Context, route: &Route, source: &str) {
    TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(route.path()).monospace());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("{} {}", icons::CHART, source));
            });
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_entries_cover_each_screen_root() {
        let entries = nav_entries();
        assert_eq!(entries[0].1, Route::Home);
        assert_eq!(entries[1].1.path(), "/world/stats/countries");
        assert_eq!(entries[2].1.path(), "/india/stats/india");
    }
}
