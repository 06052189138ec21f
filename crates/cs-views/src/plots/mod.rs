//! Chart views

mod composed;

pub use composed::{ChartConfig, ChartSeries, ComposedChartView};
