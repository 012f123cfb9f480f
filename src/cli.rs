//! Command-line surface and the headless export path.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

use crate::io::{export_csv, save_svg, ExportError, LoadError, Source};
use crate::model::{GanttConfig, ZoomLevel};
use crate::scene::ChartOptions;
use crate::schedule::Schedule;

/// Interactive Gantt timeline for task schedules.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "gantt-timeline", version, about)]
pub struct Cli {
    /// Schedule JSON file to open.
    pub file: Option<PathBuf>,

    /// Initial zoom level (day, week or month).
    #[arg(long)]
    pub zoom: Option<ZoomLevel>,

    /// Reference date used as "today" (YYYY-MM-DD).
    #[arg(long)]
    pub today: Option<NaiveDate>,

    /// Write the chart as SVG and exit.
    #[arg(long, value_name = "PATH")]
    pub export_svg: Option<PathBuf>,

    /// Write the schedule as CSV and exit.
    #[arg(long, value_name = "PATH")]
    pub export_csv: Option<PathBuf>,

    /// Use the built-in sample schedule.
    #[arg(long, conflicts_with = "file")]
    pub sample: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("no input: pass a schedule file or --sample")]
    NoInput,

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

impl Cli {
    /// Any export flag turns the run headless.
    pub fn is_headless(&self) -> bool {
        self.export_svg.is_some() || self.export_csv.is_some()
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    /// Source named on the command line, if any.
    pub fn source(&self) -> Option<Source> {
        if self.sample {
            return Some(Source::Sample(self.reference_date()));
        }
        self.file.clone().map(Source::File)
    }
}

/// Load, lay out and write the requested exports without opening a window.
pub fn run_headless(cli: &Cli, config: &GanttConfig, options: &ChartOptions, default_zoom: ZoomLevel) -> Result<(), CliError> {
    let source = cli.source().ok_or(CliError::NoInput)?;
    let today = cli.reference_date();
    let schedule = Schedule::from_response(&source.load()?);
    tracing::info!(source = %source.describe(), tasks = schedule.tasks.len(), "headless export");

    if let Some(path) = &cli.export_svg {
        if schedule.is_empty() {
            return Err(ExportError::Empty.into());
        }
        let scene = schedule.render(cli.zoom.unwrap_or(default_zoom), config, options, today);
        save_svg(&scene, path)?;
    }
    if let Some(path) = &cli.export_csv {
        export_csv(&schedule.tasks, today, path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    #[test]
    fn parses_file_and_flags() {
        let cli = Cli::parse_from([
            "gantt-timeline",
            "plan.json",
            "--zoom",
            "month",
            "--today",
            "2024-03-05",
            "--export-svg",
            "out.svg",
        ]);
        assert_eq!(cli.file, Some(PathBuf::from("plan.json")));
        assert_eq!(cli.zoom, Some(ZoomLevel::Month));
        assert_eq!(cli.today, NaiveDate::from_ymd_opt(2024, 3, 5));
        assert!(cli.is_headless());
        assert_eq!(cli.source(), Some(Source::File(PathBuf::from("plan.json"))));
    }

    #[test]
    fn sample_conflicts_with_file() {
        assert!(Cli::try_parse_from(["gantt-timeline", "plan.json", "--sample"]).is_err());
        let cli = Cli::parse_from(["gantt-timeline", "--sample", "--today", "2024-01-01"]);
        assert!(!cli.is_headless());
        assert!(matches!(cli.source(), Some(Source::Sample(_))));
    }

    #[test]
    fn bad_zoom_is_rejected() {
        assert!(Cli::try_parse_from(["gantt-timeline", "--zoom", "year"]).is_err());
    }

    #[test]
    fn headless_writes_both_exports() {
        let dir = tempfile::tempdir().unwrap();
        let svg = dir.path().join("chart.svg");
        let csv = dir.path().join("chart.csv");
        let cli = Cli::parse_from([
            OsString::from("gantt-timeline"),
            "--sample".into(),
            "--today".into(),
            "2024-06-10".into(),
            "--export-svg".into(),
            svg.clone().into_os_string(),
            "--export-csv".into(),
            csv.clone().into_os_string(),
        ]);

        run_headless(&cli, &GanttConfig::default(), &ChartOptions::default(), ZoomLevel::Week).unwrap();
        assert!(std::fs::read_to_string(&svg).unwrap().contains("Security Audit"));
        assert!(std::fs::read_to_string(&csv).unwrap().starts_with("ID;Task"));
    }

    #[test]
    fn headless_without_input_fails() {
        let cli = Cli::parse_from(["gantt-timeline", "--export-csv", "x.csv"]);
        let err = run_headless(&cli, &GanttConfig::default(), &ChartOptions::default(), ZoomLevel::Week).unwrap_err();
        assert!(matches!(err, CliError::NoInput));
    }

    #[test]
    fn headless_svg_refuses_empty_schedule() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("empty.json");
        let svg = dir.path().join("chart.svg");
        std::fs::write(&input, r#"{"tasks":[]}"#).unwrap();
        let cli = Cli::parse_from([
            OsString::from("gantt-timeline"),
            input.into_os_string(),
            "--export-svg".into(),
            svg.clone().into_os_string(),
        ]);

        let err = run_headless(&cli, &GanttConfig::default(), &ChartOptions::default(), ZoomLevel::Week).unwrap_err();
        assert!(matches!(err, CliError::Export(ExportError::Empty)));
        assert!(!svg.exists());
    }
}
