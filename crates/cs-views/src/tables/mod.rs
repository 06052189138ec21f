//! Paginated stats table

use std::ops::Range;
use egui::Ui;
use serde_json::{json, Value};
use cs_core::{NormalizedRow, Route, StatAccessor};

mod paginator;

pub use paginator::Paginator;

/// Configuration for table views
#[derive(Debug, Clone)]
pub struct TableConfig {
    pub striped_rows: bool,
    pub resizable_columns: bool,
    pub name_column_width: f32,
    pub value_column_width: f32,
    pub row_height: f32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            striped_rows: true,
            resizable_columns: true,
            name_column_width: 200.0,
            value_column_width: 100.0,
            row_height: 24.0,
        }
    }
}

/// Column headers, fixed
pub const COLUMNS: [&str; 4] = ["Name", "Confirmed", "Recovered", "Deaths"];

/// Display text for a count; NaN rows stay visible as `-`
pub fn format_count(value: f64) -> String {
    if value.is_nan() {
        "-".to_string()
    } else {
        format!("{:.0}", value)
    }
}

/// Fixed-column table over normalized rows with client-side pagination
pub struct StatsTableView {
    pub config: TableConfig,
    pub paginator: Paginator,
}

impl StatsTableView {
    pub fn new(page_size: usize) -> Self {
        Self {
            config: TableConfig::default(),
            paginator: Paginator::new(page_size),
        }
    }

    /// Cell texts of the rows on the current page
    pub fn page_cells(&mut self, rows: &[NormalizedRow]) -> Vec<[String; 4]> {
        let range = self.visible_range(rows.len());
        rows[range]
            .iter()
            .map(|row| {
                [
                    row.name().to_string(),
                    format_count(row.confirmed()),
                    format_count(row.recovered()),
                    format_count(row.deaths()),
                ]
            })
            .collect()
    }

    fn visible_range(&mut self, total: usize) -> Range<usize> {
        self.paginator.clamp(total);
        self.paginator.page_range(total)
    }

    /// Draw the table; returns the drill-down route of a clicked name
    pub fn ui(&mut self, ui: &mut Ui, rows: &[NormalizedRow]) -> Option<Route> {
        use egui_extras::{TableBuilder, Column};

        let range = self.visible_range(rows.len());
        let page = &rows[range];
        let mut clicked = None;

        TableBuilder::new(ui)
            .striped(self.config.striped_rows)
            .resizable(self.config.resizable_columns)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::initial(self.config.name_column_width).at_least(80.0).clip(true))
            .columns(Column::initial(self.config.value_column_width).at_least(60.0), 3)
            .min_scrolled_height(0.0)
            .header(20.0, |mut header| {
                for title in COLUMNS {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|body| {
                body.rows(self.config.row_height, page.len(), |row_index, mut row| {
                    let item = &page[row_index];
                    row.col(|ui| {
                        if ui.link(item.name()).clicked() {
                            clicked = Some(Route::detail(item.entity(), item.name()));
                        }
                    });
                    for value in [item.confirmed(), item.recovered(), item.deaths()] {
                        row.col(|ui| {
                            ui.label(format_count(value));
                        });
                    }
                });
            });

        ui.add_space(4.0);
        self.pagination_controls(ui, rows.len());

        clicked
    }

    fn pagination_controls(&mut self, ui: &mut Ui, total: usize) {
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
            ui.separator();
            ui.label(format!("{} rows", total));
        });
    }

    pub fn save_config(&self) -> Value {
        json!({
            "striped_rows": self.config.striped_rows,
            "resizable_columns": self.config.resizable_columns,
            "page_size": self.paginator.page_size(),
        })
    }

    pub fn load_config(&mut self, config: &Value) {
        if let Some(striped) = config.get("striped_rows").and_then(|v| v.as_bool()) {
            self.config.striped_rows = striped;
        }
        if let Some(resizable) = config.get("resizable_columns").and_then(|v| v.as_bool()) {
            self.config.resizable_columns = resizable;
        }
        if let Some(page_size) = config.get("page_size").and_then(|v| v.as_u64()) {
            self.paginator.set_page_size(page_size as usize);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use cs_core::{normalize_rows, Entity, NumericPolicy};

    fn rows(entity: Entity, payload: Value) -> Vec<NormalizedRow> {
        normalize_rows(&payload, entity, "", &NumericPolicy::default())
    }

    #[test]
    fn test_cells_read_nested_and_flat_counts_alike() {
        let world = rows(Entity::World, json!({
            "countries": [{ "name": "Brazil", "mostRecent": { "confirmed": 10, "recovered": 5, "deaths": 1 } }]
        }));
        let india = rows(Entity::India, json!({
            "india": { "statewise": [{ "state": "Kerala", "confirmed": "10", "recovered": "5", "deaths": "1" }] }
        }));

        let mut table = StatsTableView::new(10);
        assert_eq!(table.page_cells(&world)[0][1..], ["10", "5", "1"]);
        assert_eq!(table.page_cells(&india)[0], ["Kerala", "10", "5", "1"]);
    }

    #[test]
    fn test_cells_are_paged() {
        let countries: Vec<Value> = (0..25)
            .map(|i| json!({ "name": format!("C{i}"), "mostRecent": { "confirmed": i } }))
            .collect();
        let rows = rows(Entity::World, json!({ "countries": countries }));

        let mut table = StatsTableView::new(10);
        table.paginator.next(rows.len());
        table.paginator.next(rows.len());
        let cells = table.page_cells(&rows);
        assert_eq!(cells.len(), 5);
        assert_eq!(cells[0][0], "C20");

        // shrinking the list pulls the page back into range
        let cells = table.page_cells(&rows[..3]);
        assert_eq!(table.paginator.page(), 0);
        assert_eq!(cells.len(), 3);
    }

    #[test]
    fn test_nan_is_displayed_as_dash() {
        assert_eq!(format_count(f64::NAN), "-");
        assert_eq!(format_count(1234.0), "1234");
    }

    #[test]
    fn test_config_round_trip() {
        let mut table = StatsTableView::new(10);
        table.load_config(&json!({ "striped_rows": false, "page_size": 50 }));
        assert!(!table.config.striped_rows);
        assert_eq!(table.save_config()["page_size"], 50);
    }
}
