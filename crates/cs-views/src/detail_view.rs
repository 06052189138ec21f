//! Drill-down screen for one clicked country or state

use egui::{Ui, RichText};
use serde_json::{json, Value};
use cs_core::{
    detail_query,
    rows::{country_detail, district_rows, DistrictRow},
    DetailKind, Entity, NumericPolicy,
};

use crate::tables::{format_count, Paginator};
use crate::{FetchHandle, SpaceView, SpaceViewId, ViewerContext};

/// Country figures (world) or the district table of a state (India)
pub struct DetailView {
    id: SpaceViewId,
    title: String,
    entity: Entity,
    target: String,
    kind: DetailKind,
    fetch: FetchHandle,
    pub paginator: Paginator,
}

impl DetailView {
    pub fn new(id: SpaceViewId, entity: Entity, target: String, page_size: usize) -> Self {
        Self {
            id,
            title: target.clone(),
            entity,
            kind: DetailKind::drill_for(entity),
            target,
            fetch: FetchHandle::pending(),
            paginator: Paginator::new(page_size),
        }
    }

    pub fn kind(&self) -> DetailKind {
        self.kind
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Districts on the current page
    pub fn district_page(&mut self, payload: &Value, policy: &NumericPolicy) -> Vec<DistrictRow> {
        let mut rows = district_rows(payload, policy);
        self.paginator.clamp(rows.len());
        let range = self.paginator.page_range(rows.len());
        rows.truncate(range.end);
        rows.drain(..range.start);
        rows
    }

    fn country_ui(&self, ui: &mut Ui, payload: &Value, policy: &NumericPolicy) {
        let Some(country) = country_detail(payload, policy) else {
            ui.label(RichText::new("No figures for this country").weak());
            return;
        };

        egui::Grid::new(format!("country_{}", self.id))
            .num_columns(2)
            .spacing([24.0, 4.0])
            .striped(true)
            .show(ui, |ui| {
                for (label, value) in [
                    ("Confirmed", country.counts.confirmed),
                    ("Recovered", country.counts.recovered),
                    ("Deaths", country.counts.deaths),
                ] {
                    ui.label(label);
                    ui.strong(format_count(value));
                    ui.end_row();
                }
            });
    }

    fn district_ui(&mut self, ui: &mut Ui, payload: &Value, policy: &NumericPolicy) {
        use egui_extras::{TableBuilder, Column};

        let total = district_rows(payload, policy).len();
        let page = self.district_page(payload, policy);
        if total == 0 {
            ui.label(RichText::new("No district data").weak());
            return;
        }

        TableBuilder::new(ui)
            .striped(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::initial(200.0).at_least(80.0).clip(true))
            .column(Column::initial(100.0).at_least(60.0))
            .column(Column::remainder())
            .min_scrolled_height(0.0)
            .header(20.0, |mut header| {
                for title in ["District", "Confirmed", "Last updated"] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|body| {
                body.rows(24.0, page.len(), |row_index, mut row| {
                    let district = &page[row_index];
                    row.col(|ui| {
                        ui.label(&district.district);
                    });
                    row.col(|ui| {
                        ui.label(format_count(district.confirmed));
                    });
                    row.col(|ui| {
                        ui.label(district.last_updated.as_deref().unwrap_or("-"));
                    });
                });
            });

        ui.add_space(4.0);
        ui.horizontal(|ui| {
            if ui.add_enabled(self.paginator.has_prev(), egui::Button::new("◀")).clicked() {
                self.paginator.prev();
            }
            ui.label(format!(
                "Page {} of {}",
                self.paginator.page() + 1,
                self.paginator.page_count(total).max(1)
            ));
            if ui.add_enabled(self.paginator.has_next(total), egui::Button::new("▶")).clicked() {
                self.paginator.next(total);
            }
        });
    }
}

impl SpaceView for DetailView {
    fn id(&self) -> SpaceViewId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn view_type(&self) -> &str {
        "DetailView"
    }

    fn on_mount(&mut self, ctx: &ViewerContext, egui_ctx: &egui::Context) {
        let query = detail_query(self.kind, &self.target);
        tracing::debug!("Detail query: {}", query.inline_text());
        self.fetch = FetchHandle::spawn(ctx, query, egui_ctx.clone());
    }

    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) {
        crate::breadcrumb(ui, ctx, &self.title);
        if ctx.router.can_go_back() && ui.small_button("⬅ Back").clicked() {
            ctx.router.back();
        }
        ui.add_space(8.0);

        let state = self.fetch.state();
        if state.is_error() {
            crate::error_message(ui, "Failed to load details");
            return;
        }
        let Some(payload) = state.data() else {
            ui.add(egui::Spinner::new());
            return;
        };

        ui.heading(format!("{} ({})", self.target, self.entity));
        ui.add_space(8.0);
        match self.kind {
            DetailKind::Country => self.country_ui(ui, payload, &ctx.numeric),
            DetailKind::State | DetailKind::District => {
                self.district_ui(ui, payload, &ctx.numeric)
            }
        }
    }

    fn save_config(&self) -> Value {
        json!({
            "page_size": self.paginator.page_size(),
        })
    }

    fn load_config(&mut self, config: Value) {
        if let Some(page_size) = config.get("page_size").and_then(|v| v.as_u64()) {
            self.paginator.set_page_size(page_size as usize);
        }
    }
}
