mod bootstrap;

use anyhow::{Context, Result};
use insights_core::settings::Settings;
use insights_runtime::data_manager::DataManager;
use insights_runtime::reports::{DashboardReport, ReportOptions};
use insights_ui::app::App;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("Content Insights v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Tab: {}, Theme: {}, Top N: {}, Holiday window: {}",
        settings.tab,
        settings.theme,
        settings.top_n,
        settings.holiday_window
    );

    let data_path = bootstrap::discover_data_path(settings.data_file.as_deref())?;

    let mut manager = DataManager::new();
    let table = manager
        .get_table(&data_path)
        .with_context(|| format!("loading {}", data_path.display()))?;
    if table.is_empty() {
        tracing::warn!("{} has no data rows", data_path.display());
    }

    let options = ReportOptions {
        top_n: usize::from(settings.top_n),
        holiday_window: settings.holiday_window,
        holidays: settings.holiday_anchors(),
    };
    let report = DashboardReport::build(&table, &options);

    let source = data_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| data_path.display().to_string());

    let app = App::new(&settings.theme, report, source, settings.initial_tab_index());
    app.run()?;

    tracing::info!("Content Insights exiting");
    Ok(())
}
