use egui::{Color32, Context, RichText, Window};

use crate::app::PlanifyApp;
use crate::model::TaskColor;
use crate::ui::theme;

/// Render the add/edit task dialog. The same form serves both modes; the
/// app decides which on submit.
pub fn show_task_dialog(app: &mut PlanifyApp, ctx: &Context) {
    let mut should_close = false;
    let title = if app.editing_task.is_some() {
        "Edit Task"
    } else {
        "Add Task"
    };

    Window::new(RichText::new(title).strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([320.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(4.0);

            egui::Grid::new("task_dialog_grid")
                .num_columns(2)
                .striped(false)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Name").color(theme::TEXT_SECONDARY));
                    ui.add_sized(
                        [220.0, 24.0],
                        egui::TextEdit::singleline(&mut app.form_name)
                            .hint_text("Task name...")
                            .text_color(theme::TEXT_PRIMARY),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Start").color(theme::TEXT_SECONDARY));
                    ui.add(
                        egui_extras::DatePickerButton::new(&mut app.form_start)
                            .id_salt("dlg_dp_start"),
                    );
                    ui.end_row();

                    ui.label(RichText::new("End").color(theme::TEXT_SECONDARY));
                    ui.add(
                        egui_extras::DatePickerButton::new(&mut app.form_end)
                            .id_salt("dlg_dp_end"),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Color").color(theme::TEXT_SECONDARY));
                    egui::ComboBox::from_id_salt("dlg_task_color")
                        .selected_text(app.form_color.as_str())
                        .show_ui(ui, |ui| {
                            for color in TaskColor::PICKABLE {
                                ui.selectable_value(&mut app.form_color, color, color.as_str());
                            }
                        });
                    ui.end_row();
                });

            if let Some(error) = &app.form_error {
                ui.add_space(4.0);
                ui.label(RichText::new(error).color(theme::ERROR_TEXT).size(11.5));
            }

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                let save_btn = egui::Button::new(RichText::new("Save").color(Color32::WHITE))
                    .fill(theme::ACCENT)
                    .rounding(egui::Rounding::same(4.0));
                if ui.add_sized([80.0, 28.0], save_btn).clicked() {
                    // Stays open with an inline error when validation fails.
                    should_close = app.submit_task_dialog();
                }
                if ui
                    .add_sized([80.0, 28.0], egui::Button::new("Cancel"))
                    .clicked()
                {
                    should_close = true;
                }
            });
            ui.add_space(2.0);
        });

    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.close_task_dialog();
    }
}
