//! Space view abstraction - base trait for every screen

use std::collections::BTreeMap;
use egui::Ui;
use serde::{Serialize, Deserialize};
use serde_json::Value;
use uuid::Uuid;

use crate::ViewerContext;

/// Unique identifier for a space view
pub type SpaceViewId = Uuid;

/// Base trait for all space views (stats, summary, detail)
pub trait SpaceView: Send + Sync {
    /// Get the unique ID of this view
    fn id(&self) -> SpaceViewId;

    /// Get the display name
    fn display_name(&self) -> &str;

    /// Get the view type (for serialization)
    fn view_type(&self) -> &str;

    /// Called once before the first frame; views start their fetch here
    fn on_mount(&mut self, ctx: &ViewerContext, egui_ctx: &egui::Context);

    /// Draw the UI
    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui);

    /// Save configuration
    fn save_config(&self) -> Value;

    /// Load configuration
    fn load_config(&mut self, config: Value);
}

/// Saved view configuration, one entry per view type.
///
/// A view swapped out by navigation leaves its settings here and the next
/// view of the same type picks them up; the app persists the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewConfigStore {
    configs: BTreeMap<String, Value>,
}

impl ViewConfigStore {
    /// Record the settings of `view`
    pub fn stash(&mut self, view: &dyn SpaceView) {
        self.configs.insert(view.view_type().to_string(), view.save_config());
    }

    /// Apply previously stashed settings to `view`, if any
    pub fn restore(&self, view: &mut dyn SpaceView) {
        if let Some(config) = self.configs.get(view.view_type()) {
            view.load_config(config.clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use cs_core::{Entity, QueryName};
    use crate::StatsView;

    fn stats_view() -> StatsView {
        StatsView::new(SpaceViewId::new_v4(), Entity::World, QueryName::Countries, 10)
    }

    #[test]
    fn test_settings_carry_over_to_next_view() {
        let mut store = ViewConfigStore::default();
        let mut first = stats_view();
        first.table.paginator.set_page_size(50);
        first.chart.config.show_legend = false;
        store.stash(&first);

        let mut next = stats_view();
        store.restore(&mut next);
        assert_eq!(next.table.paginator.page_size(), 50);
        assert!(!next.chart.config.show_legend);
    }

    #[test]
    fn test_store_survives_serialization() {
        let mut store = ViewConfigStore::default();
        assert!(store.is_empty());
        store.stash(&stats_view());

        let saved = serde_json::to_value(&store).unwrap();
        assert!(saved["configs"]["StatsView"]["table"].is_object());
        let loaded: ViewConfigStore = serde_json::from_value(saved).unwrap();
        assert_eq!(loaded, store);
    }

    #[test]
    fn test_unknown_view_type_is_left_alone() {
        let store: ViewConfigStore =
            serde_json::from_value(json!({ "configs": { "DetailView": { "page_size": 3 } } })).unwrap();
        let mut view = stats_view();
        store.restore(&mut view);
        assert_eq!(view.table.paginator.page_size(), 10);
    }
}
