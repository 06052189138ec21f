//! Home screen with the world and India headline figures

use egui::{Ui, RichText};
use serde_json::{json, Value};
use tracing::warn;
use cs_core::{rows::summary_figures, Counts, Entity, FetchState, NumericPolicy, QueryName, Route};

use crate::tables::format_count;
use crate::{FetchHandle, SpaceView, SpaceViewId, ViewerContext};

/// Summary cards, one per entity, each linking to its stats view
pub struct SummaryView {
    id: SpaceViewId,
    world: FetchHandle,
    india: FetchHandle,
}

impl SummaryView {
    pub fn new(id: SpaceViewId) -> Self {
        Self {
            id,
            world: FetchHandle::pending(),
            india: FetchHandle::pending(),
        }
    }

    fn handle(&self, entity: Entity) -> &FetchHandle {
        match entity {
            Entity::World => &self.world,
            Entity::India => &self.india,
        }
    }

    /// Figures for `entity`, if its summary has arrived
    pub fn figures(&self, entity: Entity, policy: &NumericPolicy) -> FetchState<Option<Counts>> {
        self.handle(entity)
            .state()
            .map(|payload| summary_figures(&payload, entity, policy))
    }

    fn card(&self, ui: &mut Ui, ctx: &ViewerContext, entity: Entity) {
        let heading = match entity {
            Entity::World => "World",
            Entity::India => "India",
        };

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_min_width(240.0);
            ui.heading(heading);
            ui.add_space(6.0);

            match self.figures(entity, &ctx.numeric) {
                FetchState::Pending => {
                    ui.add(egui::Spinner::new());
                }
                FetchState::Failed(_) => crate::error_message(ui, "Failed to load summary"),
                FetchState::Ready(None) => {
                    ui.label(RichText::new("No summary available").weak());
                }
                FetchState::Ready(Some(counts)) => {
                    egui::Grid::new(format!("summary_{}_{}", self.id, entity))
                        .num_columns(2)
                        .spacing([24.0, 4.0])
                        .show(ui, |ui| {
                            for (label, value) in [
                                ("Confirmed", counts.confirmed),
                                ("Recovered", counts.recovered),
                                ("Deaths", counts.deaths),
                            ] {
                                ui.label(label);
                                ui.strong(format_count(value));
                                ui.end_row();
                            }
                        });
                }
            }

            ui.add_space(6.0);
            if ui.button(format!("{} statistics", heading)).clicked() {
                ctx.navigate(Route::stats(entity));
            }
        });
    }
}

impl SpaceView for SummaryView {
    fn id(&self) -> SpaceViewId {
        self.id
    }

    fn display_name(&self) -> &str {
        "Summary"
    }

    fn view_type(&self) -> &str {
        "SummaryView"
    }

    fn on_mount(&mut self, ctx: &ViewerContext, egui_ctx: &egui::Context) {
        for entity in [Entity::World, Entity::India] {
            let handle = match ctx.catalog.get(QueryName::Summary, entity) {
                Ok(query) => FetchHandle::spawn(ctx, query.clone(), egui_ctx.clone()),
                Err(e) => {
                    warn!("No summary query for {}: {}", entity, e);
                    let handle = FetchHandle::pending();
                    handle.resolve(FetchState::Failed(e.to_string()));
                    handle
                }
            };
            match entity {
                Entity::World => self.world = handle,
                Entity::India => self.india = handle,
            }
        }
    }

    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) {
        ui.heading("COVID-19 Statistics");
        ui.add_space(12.0);

        ui.horizontal_wrapped(|ui| {
            self.card(ui, ctx, Entity::World);
            self.card(ui, ctx, Entity::India);
        });
    }

    fn save_config(&self) -> Value {
        json!({})
    }

    fn load_config(&mut self, _config: Value) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_figures_per_entity() {
        let view = SummaryView::new(SpaceViewId::new_v4());
        let policy = NumericPolicy::default();
        assert!(view.figures(Entity::World, &policy).is_loading());

        view.world.resolve(FetchState::Ready(Arc::new(json!({
            "summary": { "confirmed": 10, "recovered": 7, "deaths": 1 }
        }))));
        view.india.resolve(FetchState::Ready(Arc::new(json!({
            "country": { "mostRecent": { "confirmed": "4", "recovered": "3", "deaths": "0" } }
        }))));

        let world = view.figures(Entity::World, &policy);
        assert_eq!(world.data().cloned().flatten().map(|c| c.confirmed), Some(10.0));
        let india = view.figures(Entity::India, &policy);
        assert_eq!(india.data().cloned().flatten().map(|c| c.recovered), Some(3.0));
    }

    #[test]
    fn test_missing_summary_is_ready_but_empty() {
        let view = SummaryView::new(SpaceViewId::new_v4());
        view.india.resolve(FetchState::Ready(Arc::new(json!({}))));
        assert_eq!(view.figures(Entity::India, &NumericPolicy::default()), FetchState::Ready(None));
    }
}
