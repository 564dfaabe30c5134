mod bootstrap;

use anyhow::{Context, Result};
use tracing::{info, warn};
use trending_core::settings::Settings;
use trending_data::analysis::{analyze, AnalysisOptions};
use trending_data::cleaner::Cleaner;
use trending_data::filter::RecordFilter;
use trending_ui::app::{App, ViewMode};

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    info!("Trending Dashboard v{} starting", env!("CARGO_PKG_VERSION"));
    info!(
        "Data: {}, Categories: {}, View: {}, Theme: {}",
        settings.data_file.display(),
        settings.category_file.display(),
        settings.view,
        settings.theme
    );

    let options = analysis_options(&settings)?;
    let result = analyze(&options).with_context(|| {
        format!(
            "Could not load the dataset from {} and {}",
            options.data_file.display(),
            options.category_file.display()
        )
    })?;
    info!(
        "Loaded {} rows in {:.2}s, transformed in {:.2}s",
        result.metadata.rows_loaded,
        result.metadata.load_time_seconds,
        result.metadata.transform_time_seconds
    );

    let view_mode = ViewMode::from_name(&settings.view).unwrap_or_else(|| {
        warn!("Unknown view '{}', showing overview", settings.view);
        ViewMode::Overview
    });

    let app = App::new(
        &settings.theme,
        view_mode,
        &result,
        options.filter.describe(),
        usize::from(settings.histogram_bins),
        usize::from(settings.top_channels),
    );
    app.run()?;

    info!("Trending Dashboard exiting");
    Ok(())
}

/// Translate CLI settings into pipeline options.
fn analysis_options(settings: &Settings) -> trending_core::error::Result<AnalysisOptions> {
    let filter = RecordFilter::new(
        settings.categories.clone(),
        settings.min_viral_score,
        settings.parsed_weekdays()?,
    );
    Ok(AnalysisOptions {
        data_file: settings.data_file.clone(),
        category_file: settings.category_file.clone(),
        cleaner: Cleaner::new(
            settings.trending_date_format.as_str(),
            settings.publish_time_format.as_str(),
        ),
        filter,
    })
}
