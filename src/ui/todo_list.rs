use egui::{Color32, RichText, Ui};

use crate::model::TodoItem;
use crate::ui::theme;

/// Actions the checklist panel can request.
pub enum TodoAction {
    None,
    Toggle(u64, bool),
    Edit(u64),
    Delete(u64),
    Add,
}

/// Render the to-do checklist panel.
pub fn show_todo_list(items: &[TodoItem], ui: &mut Ui) -> TodoAction {
    let mut action = TodoAction::None;

    ui.add_space(2.0);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("To-Do")
                .strong()
                .size(15.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.add_space(4.0);
        ui.label(
            RichText::new(format!("({})", items.len()))
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
    });
    ui.add_space(4.0);

    let btn = egui::Button::new(
        RichText::new(format!("{}  Add Task", egui_phosphor::regular::PLUS))
            .color(Color32::WHITE)
            .size(12.0),
    )
    .fill(theme::ACCENT)
    .rounding(egui::Rounding::same(5.0));
    if ui.add_sized([ui.available_width(), 30.0], btn).clicked() {
        action = TodoAction::Add;
    }

    ui.add_space(6.0);
    ui.separator();
    ui.add_space(2.0);

    if items.is_empty() {
        ui.label(
            RichText::new("No tasks yet. Add one!")
                .color(theme::TEXT_SECONDARY)
                .size(12.0),
        );
        return action;
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for item in items {
                ui.horizontal(|ui| {
                    let mut completed = item.completed;
                    if ui.checkbox(&mut completed, "").changed() {
                        action = TodoAction::Toggle(item.id, completed);
                    }

                    let text = if item.completed {
                        RichText::new(&item.name)
                            .strikethrough()
                            .color(theme::TEXT_SECONDARY)
                    } else {
                        RichText::new(&item.name).color(theme::TEXT_PRIMARY)
                    };
                    ui.label(text.size(13.0));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let trash = egui::Button::new(
                            RichText::new(egui_phosphor::regular::TRASH).size(13.0),
                        )
                        .frame(false);
                        if ui.add(trash).on_hover_text("Delete task").clicked() {
                            action = TodoAction::Delete(item.id);
                        }

                        let pencil = egui::Button::new(
                            RichText::new(egui_phosphor::regular::PENCIL_SIMPLE).size(13.0),
                        )
                        .frame(false);
                        if ui.add(pencil).on_hover_text("Edit task").clicked() {
                            action = TodoAction::Edit(item.id);
                        }
                    });
                });
                ui.separator();
            }
        });

    action
}
