use crate::app::GanttApp;
use crate::model::ZoomLevel;
use crate::ui::theme;
use egui::{menu, RichText, Ui};
use egui_phosphor::regular as icons;

/// Render the top toolbar / menu bar.
pub fn show_toolbar(app: &mut GanttApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui.button(format!("{}  Open...        Ctrl+O", icons::FOLDER_OPEN)).clicked() {
                app.open_file();
                ui.close_menu();
            }
            if ui
                .add_enabled(app.source.is_some(), egui::Button::new(format!("{}  Reload          F5", icons::ARROW_CLOCKWISE)))
                .clicked()
            {
                app.reload();
                ui.close_menu();
            }
            if ui.button(format!("{}  Load Sample", icons::SPARKLE)).clicked() {
                app.load_sample();
                ui.close_menu();
            }
            ui.separator();
            if ui.button(format!("{}  Export SVG...", icons::IMAGE)).clicked() {
                app.export_svg();
                ui.close_menu();
            }
            if ui.button(format!("{}  Export CSV...", icons::TABLE)).clicked() {
                app.export_csv();
                ui.close_menu();
            }
            ui.separator();
            if ui.button(format!("{}  Open Settings Folder", icons::GEAR)).clicked() {
                if let Some(dir) = app.settings.path().and_then(|p| p.parent()) {
                    let _ = std::fs::create_dir_all(dir);
                    if let Err(e) = open::that(dir) {
                        app.status_message = format!("Could not open {}: {}", dir.display(), e);
                    }
                }
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_menu()), |ui| {
            let mut changed = false;
            ui.label(RichText::new("Timeline Scale").small().weak());
            for zoom in ZoomLevel::ALL {
                let selected = app.controller.zoom.value() == zoom;
                if ui.radio(selected, zoom.label()).clicked() {
                    if let Some(zoom) = app.controller.zoom.request(zoom) {
                        app.controller.zoom.sync(zoom);
                        app.settings.settings.zoom = zoom;
                        changed = true;
                    }
                    ui.close_menu();
                }
            }
            ui.separator();
            let settings = &mut app.settings.settings;
            changed |= ui.checkbox(&mut settings.show_dependencies, "Dependency arrows").changed();
            changed |= ui.checkbox(&mut settings.show_today_marker, "Today marker").changed();
            changed |= ui.checkbox(&mut settings.show_progress, "Progress").changed();
            if changed {
                app.settings_changed();
            }
        });

        // Right-aligned reference date and source name
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if app.pin_reference_date
                && ui
                    .small_button(icons::X)
                    .on_hover_text("Follow the clock again")
                    .clicked()
            {
                app.pin_reference_date = false;
                app.reference_date = chrono::Local::now().date_naive();
            }
            let picker = ui.add(
                egui_extras::DatePickerButton::new(&mut app.reference_date)
                    .id_salt("reference_date")
                    .calendar_week(true),
            );
            if picker.changed() {
                app.pin_reference_date = true;
            }
            ui.label(RichText::new("Today:").size(11.0).weak());

            if let Some(source) = &app.source {
                ui.separator();
                ui.label(RichText::new(source.describe()).size(11.0).weak());
            }
        });
    });
}
