// src/main.rs
mod config;
mod drivers;
mod gui;
mod recorder;
mod types;
use std::io::{self, Write};
use std::path::PathBuf;
use anyhow::{anyhow, Context, Result};
use log::info;
use config::{AppConfig, SourceKind};
use drivers::{
    render_figure_png, CapturePipeline, FigureLayout, LineSource, PlotStyle, SerialLineSource,
    SimulatedDevice,
};
use types::Recording;
fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}
fn wait_for_enter(config: &AppConfig) -> Result<()> {
    print!(
        "🔁 Press Enter to start {:.0}s recording (button falling edge triggers)...",
        config.duration_secs
    );
    io::stdout().flush()?;
    io::stdin().read_line(&mut String::new())?;
    Ok(())
}
fn record<S: LineSource>(source: S, config: &AppConfig) -> Result<Recording> {
    let mut pipeline = CapturePipeline::new(source, config.sampling_period_secs);
    pipeline.capture_for(config.duration());
    let (recording, stats) = pipeline
        .finish(config.smoothing_window)
        .context("captured too little data to smooth")?;
    if !stats.rejected.is_empty() {
        info!("Dropped lines by reason: {:?}", stats.rejected);
    }
    info!(
        "{} samples, {} button releases",
        recording.len(),
        recording.button_fall_events.len()
    );
    Ok(recording)
}
fn main() -> Result<()> {
    init_logging();
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = AppConfig::load_or_default(config_path.as_deref())?;
    let recording = match config.source {
        SourceKind::Serial => {
            wait_for_enter(&config)?;
            let source = SerialLineSource::open(
                &config.port,
                config.baud_rate,
                config.read_timeout(),
            )?;
            record(source, &config)?
        }
        SourceKind::Simulation => {
            wait_for_enter(&config)?;
            let source = SimulatedDevice::new(config.sampling_period_secs)
                .with_glitches(config.simulation_glitch_rate);
            record(source, &config)?
        }
    };
    if let Some(path) = &config.csv_output {
        recorder::export_csv(&recording, path)?;
    }
    let layout = FigureLayout::from_recording(&recording);
    if let Some(path) = &config.png_output {
        let png = render_figure_png(&layout, PlotStyle::default())?;
        std::fs::write(path, png)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("Figure saved: {}", path.display());
    }
    if config.show_viewer {
        gui::show(layout).map_err(|e| anyhow!("plot window failed: {e}"))?;
    }
    Ok(())
}
