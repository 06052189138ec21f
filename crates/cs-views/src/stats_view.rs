//! Stats view: searchable table and composed chart over one catalog query

use egui::{Ui, RichText};
use serde_json::{json, Value};
use tracing::warn;
use cs_core::{
    normalize_rows, rows::total_row, Entity, FetchState, NormalizedRow, NumericPolicy, QueryName,
};

use crate::tables::{format_count, StatsTableView};
use crate::plots::ComposedChartView;
use crate::{FetchHandle, SpaceView, SpaceViewId, ViewerContext};

/// Table + chart over the rows of `query`, filtered by a live search string
pub struct StatsView {
    id: SpaceViewId,
    title: String,
    entity: Entity,
    query: QueryName,

    // State
    search: String,
    fetch: FetchHandle,
    pub table: StatsTableView,
    pub chart: ComposedChartView,
}

impl StatsView {
    /// Create a new stats view
    pub fn new(id: SpaceViewId, entity: Entity, query: QueryName, page_size: usize) -> Self {
        let title = match entity {
            Entity::World => "World Statistics",
            Entity::India => "India Statistics",
        };

        Self {
            id,
            title: title.to_string(),
            entity,
            query,
            search: String::new(),
            fetch: FetchHandle::pending(),
            table: StatsTableView::new(page_size),
            chart: ComposedChartView::new(id.to_string()),
        }
    }

    pub fn entity(&self) -> Entity {
        self.entity
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Replace the search string; a new search starts on the first page
    pub fn set_search(&mut self, search: impl Into<String>) {
        let search = search.into();
        if search != self.search {
            self.search = search;
            self.table.paginator.reset();
        }
    }

    /// The explicit reset action; always returns to the first page
    pub fn reset_search(&mut self) {
        self.search.clear();
        self.table.paginator.reset();
    }

    /// Rows for the current search; recomputed on every call
    pub fn rows(&self, payload: &Value, policy: &NumericPolicy) -> Vec<NormalizedRow> {
        normalize_rows(payload, self.entity, &self.search, policy)
    }

    /// Inject a fetch outcome directly
    pub fn set_fetch(&mut self, fetch: FetchHandle) {
        self.fetch = fetch;
    }

    fn search_box(&mut self, ui: &mut Ui) {
        let mut search = self.search.clone();
        ui.horizontal(|ui| {
            ui.label("🔍");
            ui.add(
                egui::TextEdit::singleline(&mut search)
                    .hint_text("Search")
                    .desired_width(ui.available_width() - 32.0),
            )
            .on_hover_text("Search on name");
            if !search.is_empty() && ui.small_button("✖").on_hover_text("Clear").clicked() {
                search.clear();
            }
        });
        self.set_search(search);
    }

    fn list_panel(&mut self, ui: &mut Ui, ctx: &ViewerContext, rows: &[NormalizedRow], payload: &Value) {
        ui.heading(self.entity.list_heading());
        ui.add_space(8.0);

        if self.entity == Entity::India {
            if let Some(total) = total_row(payload, &ctx.numeric) {
                ui.label(
                    RichText::new(format!(
                        "Total: {} confirmed, {} recovered, {} deaths",
                        format_count(total.confirmed),
                        format_count(total.recovered),
                        format_count(total.deaths),
                    ))
                    .weak(),
                );
            }
        }

        self.search_box(ui);
        ui.add_space(8.0);

        if let Some(route) = self.table.ui(ui, rows) {
            ctx.navigate(route);
        }
    }

    fn chart_panel(&mut self, ui: &mut Ui, rows: &[NormalizedRow], loading: bool) {
        ui.horizontal(|ui| {
            ui.heading(self.entity.chart_heading());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("⟲").on_hover_text("Reset search").clicked() {
                    self.reset_search();
                }
            });
        });
        ui.add_space(8.0);
        self.chart.ui(ui, rows, loading);
    }
}

impl SpaceView for StatsView {
    fn id(&self) -> SpaceViewId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn view_type(&self) -> &str {
        "StatsView"
    }

    fn on_mount(&mut self, ctx: &ViewerContext, egui_ctx: &egui::Context) {
        match ctx.catalog.get(self.query, self.entity) {
            Ok(query) => {
                self.fetch = FetchHandle::spawn(ctx, query.clone(), egui_ctx.clone());
            }
            Err(e) => {
                warn!("No query for {} / {}: {}", self.query, self.entity, e);
                self.fetch.resolve(FetchState::Failed(e.to_string()));
            }
        }
    }

    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) {
        crate::breadcrumb(ui, ctx, &self.title);
        ui.add_space(8.0);

        let state = self.fetch.state();
        if state.is_error() {
            crate::error_message(ui, "Failed to load statistics");
            return;
        }

        let loading = state.is_loading();
        let payload = state.data().cloned();
        let rows = payload
            .as_deref()
            .map(|payload| self.rows(payload, &ctx.numeric))
            .unwrap_or_default();
        tracing::trace!("{} rows for search {:?}", rows.len(), self.search);

        ui.columns(2, |columns| {
            egui::Frame::group(columns[0].style()).show(&mut columns[0], |ui| {
                match payload.as_deref() {
                    Some(payload) => self.list_panel(ui, ctx, &rows, payload),
                    None => {
                        ui.heading(self.entity.list_heading());
                        ui.centered_and_justified(|ui| {
                            ui.add(egui::Spinner::new());
                        });
                    }
                }
            });
            egui::Frame::group(columns[1].style()).show(&mut columns[1], |ui| {
                self.chart_panel(ui, &rows, loading);
            });
        });
    }

    fn save_config(&self) -> Value {
        json!({
            "entity": self.entity.as_str(),
            "query": self.query.as_str(),
            "table": self.table.save_config(),
            "chart": self.chart.save_config(),
        })
    }

    fn load_config(&mut self, config: Value) {
        if let Some(table) = config.get("table") {
            self.table.load_config(table);
        }
        if let Some(chart) = config.get("chart") {
            self.chart.load_config(chart);
        }
    }
}
