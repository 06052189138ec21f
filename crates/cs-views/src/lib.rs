//! View system for the COVID statistics dashboard

mod space_view;
mod fetch;
mod stats_view;
mod summary_view;
mod detail_view;
pub mod plots;
pub mod tables;

pub use space_view::{SpaceView, SpaceViewId, ViewConfigStore};
pub use fetch::FetchHandle;
pub use stats_view::StatsView;
pub use summary_view::SummaryView;
pub use detail_view::DetailView;
pub use tables::{Paginator, StatsTableView, TableConfig};
pub use plots::{ChartConfig, ChartSeries, ComposedChartView};

use std::sync::Arc;
use cs_core::{NumericPolicy, QueryCatalog, Route, Router};
use cs_data::StatsTransport;

/// Context passed to views during rendering
#[derive(Clone)]
pub struct ViewerContext {
    /// Query registry, built once at startup
    pub catalog: Arc<QueryCatalog>,

    /// Transport executing the queries
    pub transport: Arc<dyn StatsTransport>,

    /// Router the views navigate through
    pub router: Router,

    /// Coercion of string-typed counts
    pub numeric: NumericPolicy,

    /// Rows per table page
    pub page_size: usize,

    /// Tokio runtime handle
    pub runtime_handle: tokio::runtime::Handle,
}

impl ViewerContext {
    /// Navigate to `route`
    pub fn navigate(&self, route: Route) {
        self.router.push(route);
    }
}

/// Build the view for a route
pub fn view_for_route(route: &Route, ctx: &ViewerContext) -> Box<dyn SpaceView> {
    match route {
        Route::Home => Box::new(SummaryView::new(SpaceViewId::new_v4())),
        Route::Stats { entity, query } => {
            Box::new(StatsView::new(SpaceViewId::new_v4(), *entity, *query, ctx.page_size))
        }
        Route::Detail { entity, id } => {
            Box::new(DetailView::new(SpaceViewId::new_v4(), *entity, id.clone(), ctx.page_size))
        }
    }
}

/// `HOME / title` trail shown above each screen
pub(crate) fn breadcrumb(ui: &mut egui::Ui, ctx: &ViewerContext, title: &str) {
    ui.horizontal(|ui| {
        if ui.link("HOME").clicked() {
            ctx.router.home();
        }
        ui.label("/");
        ui.label(egui::RichText::new(title).strong());
    });
}

/// Generic failure notice; the cause is already in the log
pub(crate) fn error_message(ui: &mut egui::Ui, text: &str) {
    ui.label(egui::RichText::new(text).color(ui.visuals().error_fg_color));
}
