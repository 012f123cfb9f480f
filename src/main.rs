#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod app;
mod cli;
mod interaction;
mod io;
mod layout;
mod model;
mod scene;
mod schedule;
mod settings;
mod transform;
mod ui;

fn install_tracing() {
    // RUST_LOG overrides; INFO otherwise.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    install_tracing();

    let mut store = settings::SettingsStore::open();
    if let Some(zoom) = cli.zoom {
        store.settings.zoom = zoom;
    }

    if cli.is_headless() {
        let settings = &store.settings;
        return match cli::run_headless(&cli, &settings.chart, &settings.chart_options(), settings.zoom) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!(error = %e, "export failed");
                eprintln!("gantt-timeline: {e}");
                ExitCode::FAILURE
            }
        };
    }

    let launch = app::Launch {
        source: cli.source(),
        today: cli.today,
    };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 400.0])
            .with_title("Gantt Timeline"),
        ..Default::default()
    };

    let result = eframe::run_native(
        "Gantt Timeline",
        options,
        Box::new(move |cc| Ok(Box::new(app::GanttApp::new(cc, store, launch)))),
    );
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "window closed with an error");
            ExitCode::FAILURE
        }
    }
}
