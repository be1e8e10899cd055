use egui::{RichText, Ui};

use crate::app::PlanifyApp;
use crate::ui::theme;

/// Render the top toolbar: zoom controls and the AI prompt row.
pub fn show_toolbar(app: &mut PlanifyApp, ui: &mut Ui) {
    ui.horizontal(|ui| {
        let zoom_out = egui::Button::new(
            RichText::new(egui_phosphor::regular::MAGNIFYING_GLASS_MINUS).size(14.0),
        );
        if ui.add(zoom_out).on_hover_text("Zoom out (-10 px/day)").clicked() {
            app.zoom.zoom_out();
        }

        let zoom_in = egui::Button::new(
            RichText::new(egui_phosphor::regular::MAGNIFYING_GLASS_PLUS).size(14.0),
        );
        if ui.add(zoom_in).on_hover_text("Zoom in (+10 px/day)").clicked() {
            app.zoom.zoom_in();
        }

        let fit_label = format!("{}  Fit", egui_phosphor::regular::ARROWS_HORIZONTAL);
        if ui
            .selectable_label(app.zoom.fit, RichText::new(fit_label).size(12.0))
            .on_hover_text("Fit the whole plan to the window")
            .clicked()
        {
            app.zoom.toggle_fit();
        }

        ui.separator();

        let generating = app.is_generating();
        let prompt_edit = egui::TextEdit::singleline(&mut app.prompt_input)
            .hint_text("Describe your project...")
            .desired_width(320.0);
        ui.add_enabled(!generating, prompt_edit);

        let generate_btn = egui::Button::new(
            RichText::new(format!("{}  Generate", egui_phosphor::regular::SPARKLE))
                .color(egui::Color32::WHITE)
                .size(12.0),
        )
        .fill(theme::ACCENT)
        .rounding(egui::Rounding::same(5.0));
        if ui.add_enabled(!generating, generate_btn).clicked() {
            app.start_generation();
        }
        if generating {
            ui.add(egui::Spinner::new().size(14.0));
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(RichText::new("Planify").size(11.0).weak());
        });
    });
}
