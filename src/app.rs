use std::path::PathBuf;

use chrono::NaiveDate;

use crate::interaction::{ChartController, ZoomState};
use crate::io::{Fetcher, Source};
use crate::schedule::Schedule;
use crate::settings::SettingsStore;
use crate::ui;
use crate::ui::gantt_chart::ChartData;

/// Where the current schedule stands.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

/// Startup choices resolved from the command line and saved settings.
pub struct Launch {
    pub source: Option<Source>,
    pub today: Option<NaiveDate>,
}

/// Main application state.
pub struct GanttApp {
    pub settings: SettingsStore,
    pub schedule: Schedule,
    /// Bumped whenever `schedule` is replaced, so cached layouts go stale.
    pub revision: u64,
    pub source: Option<Source>,
    pub load_state: LoadState,
    pub controller: ChartController,
    fetcher: Fetcher,

    /// Date treated as "today"; follows the clock unless pinned.
    pub reference_date: NaiveDate,
    pub pin_reference_date: bool,

    pub status_message: String,
}

impl GanttApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: SettingsStore, launch: Launch) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let zoom = ZoomState::controlled(settings.settings.zoom);
        let mut app = Self {
            settings,
            schedule: Schedule::default(),
            revision: 0,
            source: None,
            load_state: LoadState::Idle,
            controller: ChartController::new(zoom),
            fetcher: Fetcher::new(),
            reference_date: launch.today.unwrap_or_else(|| chrono::Local::now().date_naive()),
            pin_reference_date: launch.today.is_some(),
            status_message: "Ready".to_string(),
        };

        let source = launch.source.or_else(|| {
            app.settings
                .settings
                .last_file
                .clone()
                .filter(|p| p.exists())
                .map(Source::File)
        });
        let today = app.today();
        app.load(source.unwrap_or(Source::Sample(today)));
        app
    }

    pub fn today(&self) -> NaiveDate {
        if self.pin_reference_date {
            self.reference_date
        } else {
            chrono::Local::now().date_naive()
        }
    }

    // --- Loading ---

    pub fn load(&mut self, source: Source) {
        self.status_message = format!("Loading {}…", source.describe());
        self.load_state = LoadState::Loading;
        self.fetcher.request(source.clone());
        self.source = Some(source);
    }

    pub fn reload(&mut self) {
        if let Some(source) = self.source.clone() {
            self.load(source);
        }
    }

    pub fn load_sample(&mut self) {
        self.load(Source::Sample(self.today()));
    }

    pub fn open_file(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Schedule JSON", &["json"])
            .pick_file()
        {
            self.load(Source::File(path));
        }
    }

    /// Apply whatever the fetcher delivered since the last frame.
    fn poll_fetch(&mut self) {
        let Some(fetched) = self.fetcher.poll() else {
            return;
        };
        match fetched.result {
            Ok(response) => {
                self.schedule = Schedule::from_response(&response);
                self.revision += 1;
                self.controller.data_replaced();
                self.load_state = LoadState::Loaded;
                self.status_message = format!(
                    "Loaded {} tasks from {}",
                    self.schedule.tasks.len(),
                    fetched.source.describe()
                );
                if let Source::File(path) = &fetched.source {
                    self.remember_file(path.clone());
                }
            }
            Err(e) => {
                tracing::warn!(source = %fetched.source.describe(), error = %e, "load failed");
                self.schedule = Schedule::default();
                self.revision += 1;
                self.load_state = LoadState::Failed(e.to_string());
                self.status_message = "Load failed".to_string();
            }
        }
    }

    fn remember_file(&mut self, path: PathBuf) {
        if self.settings.settings.last_file.as_ref() != Some(&path) {
            self.settings.settings.last_file = Some(path);
            self.settings.save();
        }
    }

    // --- Export ---

    pub fn export_svg(&mut self) {
        if self.schedule.is_empty() {
            self.status_message = "Nothing to export: the schedule has no tasks".to_string();
            return;
        }
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("SVG Image", &["svg"])
            .set_file_name("timeline.svg")
            .save_file()
        {
            let settings = &self.settings.settings;
            let scene = self.schedule.render(
                self.controller.zoom.value(),
                &settings.chart,
                &settings.chart_options(),
                self.today(),
            );
            self.status_message = match crate::io::save_svg(&scene, &path) {
                Ok(()) => format!("Exported chart to {}", path.display()),
                Err(e) => format!("SVG export failed: {}", e),
            };
        }
    }

    pub fn export_csv(&mut self) {
        if self.schedule.is_empty() {
            self.status_message = "Nothing to export: the schedule has no tasks".to_string();
            return;
        }
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name("timeline.csv")
            .save_file()
        {
            self.status_message = match crate::io::export_csv(&self.schedule.tasks, self.today(), &path) {
                Ok(count) => format!("Exported {} tasks to CSV", count),
                Err(e) => format!("CSV export failed: {}", e),
            };
        }
    }

    /// Persist a view toggle or zoom change.
    pub fn settings_changed(&mut self) {
        self.settings.save();
    }
}

impl eframe::App for GanttApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        self.poll_fetch();
        if self.fetcher.is_loading() {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        }

        // Handle keyboard shortcuts outside closures to avoid borrow issues
        let should_open = ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::O));
        let should_reload = ctx.input(|i| i.key_pressed(egui::Key::F5));
        if should_open {
            self.open_file();
        }
        if should_reload {
            self.reload();
        }

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(24.0)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .font(ui::theme::font_status())
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!("Tasks: {}", self.schedule.tasks.len()))
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(egui::RichText::new(" · ").size(10.5).color(ui::theme::TEXT_DIM));
                        ui.label(
                            egui::RichText::new(format!("Zoom: {}", self.controller.zoom.value().label()))
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        // Central panel: Gantt chart
        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::same(6.0));
        egui::CentralPanel::default().frame(chart_frame).show(ctx, |ui| {
            match &self.load_state {
                LoadState::Failed(message) => {
                    let message = message.clone();
                    if ui::gantt_chart::show_error_panel(ui, &message) {
                        self.reload();
                    }
                    return;
                }
                LoadState::Loading if self.schedule.is_empty() => {
                    ui.centered_and_justified(|ui| {
                        ui.spinner();
                    });
                    return;
                }
                LoadState::Idle => {
                    ui::gantt_chart::show_message_panel(
                        ui,
                        egui_phosphor::regular::FOLDER_OPEN,
                        "No schedule loaded",
                        "Open a schedule file to get started.",
                    );
                    return;
                }
                _ => {}
            }

            let today = self.today();
            let data = ChartData {
                tasks: &self.schedule.tasks,
                dependencies: &self.schedule.dependencies,
                revision: self.revision,
                today,
            };
            let settings = &self.settings.settings;
            let interaction = ui::gantt_chart::show_gantt_chart(
                ui,
                &mut self.controller,
                &data,
                &settings.chart,
                &settings.chart_options(),
            );

            if let Some(task) = interaction.clicked_task {
                self.status_message = format!(
                    "#{} {} · {} · {}",
                    task.id,
                    task.subject,
                    task.display_status(today).label(),
                    task.assigned_to.as_deref().unwrap_or("Unassigned"),
                );
            }
            if let Some(zoom) = interaction.zoom_changed {
                self.controller.zoom.sync(zoom);
                self.settings.settings.zoom = zoom;
                self.settings_changed();
            }
        });
    }
}
