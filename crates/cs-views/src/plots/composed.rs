//! Composed chart: recovered area, confirmed bars, deaths line

use egui::{Ui, Color32};
use egui_plot::{Plot, Bar, BarChart, Legend, Line, PlotPoints};
use serde_json::{json, Value};
use cs_core::{NormalizedRow, StatAccessor};

const RECOVERED_FILL: Color32 = Color32::from_rgb(0x71, 0xc0, 0x77);
const CONFIRMED_FILL: Color32 = Color32::from_rgb(0x00, 0x70, 0xdd);
const DEATHS_STROKE: Color32 = Color32::from_rgb(0xd9, 0x37, 0x37);

/// Composed chart configuration
#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// Whether to show legend
    pub show_legend: bool,

    /// Whether to show grid
    pub show_grid: bool,

    /// Bar width factor (0.0 to 1.0)
    pub bar_width: f64,

    /// Plot height in points
    pub height: f32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            show_legend: true,
            show_grid: true,
            bar_width: 0.6,
            height: 250.0,
        }
    }
}

/// The three series plotted against the row index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSeries {
    /// X axis labels, one per row
    pub labels: Vec<String>,
    pub recovered: Vec<[f64; 2]>,
    pub confirmed: Vec<[f64; 2]>,
    pub deaths: Vec<[f64; 2]>,
}

impl ChartSeries {
    /// Build the series from rows; non-finite counts leave a gap
    pub fn from_rows(rows: &[NormalizedRow]) -> Self {
        let mut series = Self {
            labels: Vec::with_capacity(rows.len()),
            ..Default::default()
        };

        for (i, row) in rows.iter().enumerate() {
            let x = i as f64;
            series.labels.push(row.name().to_string());

            let counts = row.counts();
            for (target, value) in [
                (&mut series.recovered, counts.recovered),
                (&mut series.confirmed, counts.confirmed),
                (&mut series.deaths, counts.deaths),
            ] {
                if value.is_finite() {
                    target.push([x, value]);
                }
            }
        }

        series
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label under an integral X position
    pub fn label_at(&self, x: f64) -> Option<&str> {
        if x < 0.0 || x.fract() != 0.0 {
            return None;
        }
        self.labels.get(x as usize).map(String::as_str)
    }
}

/// Area + bar + line chart keyed by row name
pub struct ComposedChartView {
    id: String,
    pub config: ChartConfig,
}

impl ComposedChartView {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            config: ChartConfig::default(),
        }
    }

    /// Draw the chart; a spinner replaces it while `loading`
    pub fn ui(&self, ui: &mut Ui, rows: &[NormalizedRow], loading: bool) {
        if loading {
            ui.allocate_ui(egui::vec2(ui.available_width(), self.config.height), |ui| {
                ui.centered_and_justified(|ui| {
                    ui.add(egui::Spinner::new().size(32.0));
                });
            });
            return;
        }

        let series = ChartSeries::from_rows(rows);
        tracing::trace!("Charting {} rows", series.labels.len());

        let labels = series.labels.clone();
        let mut plot = Plot::new(format!("composed_{}", self.id))
            .height(self.config.height)
            .show_grid(self.config.show_grid)
            .allow_scroll(false)
            .x_axis_formatter(move |value, _digits, _range| {
                if value < 0.0 || value.fract() != 0.0 {
                    return String::new();
                }
                labels.get(value as usize).cloned().unwrap_or_default()
            });

        if self.config.show_legend {
            plot = plot.legend(Legend::default());
        }

        plot.show(ui, |plot_ui| {
            if series.is_empty() {
                return;
            }

            plot_ui.line(
                Line::new(PlotPoints::new(series.recovered.clone()))
                    .name("Recovered")
                    .color(RECOVERED_FILL)
                    .fill(0.0),
            );

            let bars = series
                .confirmed
                .iter()
                .map(|&[x, y]| {
                    Bar::new(x, y)
                        .width(self.config.bar_width)
                        .fill(CONFIRMED_FILL)
                        .name(series.label_at(x).unwrap_or_default())
                })
                .collect();
            plot_ui.bar_chart(BarChart::new(bars).name("Confirmed").color(CONFIRMED_FILL));

            plot_ui.line(
                Line::new(PlotPoints::new(series.deaths.clone()))
                    .name("Deaths")
                    .color(DEATHS_STROKE)
                    .width(2.0),
            );
        });
    }

    pub fn save_config(&self) -> Value {
        json!({
            "show_legend": self.config.show_legend,
            "show_grid": self.config.show_grid,
            "bar_width": self.config.bar_width,
        })
    }

    pub fn load_config(&mut self, config: &Value) {
        if let Some(show_legend) = config.get("show_legend").and_then(|v| v.as_bool()) {
            self.config.show_legend = show_legend;
        }
        if let Some(show_grid) = config.get("show_grid").and_then(|v| v.as_bool()) {
            self.config.show_grid = show_grid;
        }
        if let Some(bar_width) = config.get("bar_width").and_then(|v| v.as_f64()) {
            self.config.bar_width = bar_width.clamp(0.05, 1.0);
        }
    }
}
