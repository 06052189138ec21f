//! Main application entry point

use std::sync::Arc;
use eframe::egui::{self, Context};
use anyhow::{Context as _, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cs_core::{QueryCatalog, Router};
use cs_data::{DashboardConfig, FixtureTransport, GraphQlClient, StatsTransport};
use cs_ui::{ShellConfig, Theme};
use cs_views::{view_for_route, SpaceView, ViewConfigStore, ViewerContext};

mod cli;

use cli::Cli;

const THEME_KEY: &str = "theme";
const VIEW_CONFIGS_KEY: &str = "view_configs";

/// Main application state
struct DashboardApp {
    /// Context shared with every view
    viewer_context: ViewerContext,

    /// View of the current route
    view: Box<dyn SpaceView>,

    /// Router generation the view was built for
    view_generation: u64,

    /// Table and chart settings carried across views and restarts
    view_configs: ViewConfigStore,

    shell: ShellConfig,
    theme: Theme,

    /// Keeps the fetch tasks alive
    _runtime: tokio::runtime::Runtime,
}

impl DashboardApp {
    fn new(
        cc: &eframe::CreationContext<'_>,
        runtime: tokio::runtime::Runtime,
        transport: Arc<dyn StatsTransport>,
        config: &DashboardConfig,
    ) -> Self {
        let theme = cc
            .storage
            .and_then(|storage| eframe::get_value::<Theme>(storage, THEME_KEY))
            .unwrap_or_default();
        cs_ui::apply_theme(&cc.egui_ctx, &theme);
        let view_configs = cc
            .storage
            .and_then(|storage| eframe::get_value::<ViewConfigStore>(storage, VIEW_CONFIGS_KEY))
            .unwrap_or_default();

        let router = Router::new(config.initial_route());
        let viewer_context = ViewerContext {
            catalog: Arc::new(QueryCatalog::standard()),
            transport,
            router: router.clone(),
            numeric: config.numeric.clone(),
            page_size: config.page_size,
            runtime_handle: runtime.handle().clone(),
        };

        let mut view = view_for_route(&router.current(), &viewer_context);
        view_configs.restore(view.as_mut());
        view.on_mount(&viewer_context, &cc.egui_ctx);

        Self {
            viewer_context,
            view,
            view_generation: router.generation(),
            view_configs,
            shell: ShellConfig::default(),
            theme,
            _runtime: runtime,
        }
    }

    /// Swap in the view of the current route after a navigation
    fn sync_view(&mut self, ctx: &Context) {
        let router = &self.viewer_context.router;
        let generation = router.generation();
        if generation == self.view_generation {
            return;
        }

        let route = router.current();
        self.view_configs.stash(self.view.as_ref());
        self.view = view_for_route(&route, &self.viewer_context);
        self.view_configs.restore(self.view.as_mut());
        info!("Showing {} at {}", self.view.display_name(), route);
        self.view.on_mount(&self.viewer_context, ctx);
        self.view_generation = generation;
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.sync_view(ctx);

        if self.shell.show_menu_bar {
            cs_ui::menu_bar(ctx, &self.viewer_context.router, &mut self.theme);
        }
        if self.shell.show_status_bar {
            cs_ui::status_bar(
                ctx,
                &self.viewer_context.router.current(),
                self.viewer_context.transport.source_name(),
            );
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    self.view.ui(&self.viewer_context, ui);
                });
        });
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.view_configs.stash(self.view.as_ref());
        eframe::set_value(storage, THEME_KEY, &self.theme);
        eframe::set_value(storage, VIEW_CONFIGS_KEY, &self.view_configs);
    }
}

/// Fixture when configured, else the GraphQL endpoint
fn build_transport(config: &DashboardConfig, runtime: &tokio::runtime::Runtime) -> Result<Arc<dyn StatsTransport>> {
    if let Some(path) = &config.fixture {
        let fixture = runtime
            .block_on(FixtureTransport::load(path.clone()))
            .with_context(|| format!("Failed to load fixture {:?}", path))?;
        return Ok(Arc::new(fixture));
    }

    if let Some(endpoint) = &config.endpoint {
        let client = GraphQlClient::new(endpoint.clone(), config.request_timeout())?;
        info!("Using GraphQL endpoint {}", client.endpoint());
        return Ok(Arc::new(client));
    }

    anyhow::bail!("No data source: pass --endpoint <url> or --fixture <path>")
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    info!("Starting COVID statistics dashboard");

    let runtime = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;
    let transport = build_transport(&config, &runtime)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0]),
        default_theme: eframe::Theme::Dark,
        ..Default::default()
    };

    eframe::run_native(
        "COVID-19 Statistics",
        options,
        Box::new(move |cc| {
            Box::new(DashboardApp::new(cc, runtime, transport, &config))
        }),
    ).map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}
