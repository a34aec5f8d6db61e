use anyhow::{anyhow, Context, Result};
use eframe::egui;
use shared::domain::MalformedPolicy;
use tracing_subscriber::EnvFilter;

mod ui;

use ui::{ConverterApp, StartupConfig, WINDOW_TITLE};

const ENV_ON_MALFORMED: &str = "IMGTAG__ON_MALFORMED";

fn startup_config_from_env(value: Option<String>) -> StartupConfig {
    let on_malformed = match value {
        Some(raw) => raw.parse::<MalformedPolicy>().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "ignoring invalid {}", ENV_ON_MALFORMED);
            MalformedPolicy::default()
        }),
        None => MalformedPolicy::default(),
    };
    StartupConfig { on_malformed }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let startup = startup_config_from_env(std::env::var(ENV_ON_MALFORMED).ok());
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("imgtag-timer")
        .enable_time()
        .build()
        .context("failed to build background runtime")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([900.0, 640.0])
            .with_min_inner_size([520.0, 420.0]),
        ..Default::default()
    };
    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(ConverterApp::new(cc, runtime, startup)))),
    )
    .map_err(|err| anyhow!("desktop converter exited with an error: {err}"))
}
