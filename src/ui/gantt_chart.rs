use egui::{Align2, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};

use crate::layout::{ChartGeometry, ChartLayout, ChartWidth};
use crate::ui::theme;

const HEADER_HEIGHT: f32 = theme::HEADER_HEIGHT;
const BAR_HEIGHT: f32 = theme::BAR_HEIGHT;
const NAME_COLUMN_WIDTH: f32 = theme::NAME_COLUMN_WIDTH;

/// Minimum unit column width before day/week labels are dropped to avoid
/// overlap.
const MIN_LABEL_UNIT_WIDTH: f32 = 24.0;

/// Render the Gantt chart area from precomputed geometry. The renderer
/// never touches the task store; everything it needs is in the layout
/// value.
pub fn show_gantt_chart(layout: &ChartLayout, ui: &mut Ui) {
    match layout {
        ChartLayout::Empty => {
            placeholder(ui, "No tasks yet. Add one or generate a plan!", false);
        }
        ChartLayout::NoValidDates => {
            placeholder(ui, "No valid task dates to display.", false);
        }
        ChartLayout::Invalid(err) => {
            placeholder(ui, &format!("Cannot lay out the timeline: {err}"), true);
        }
        ChartLayout::Ready(geometry) => draw_chart(geometry, ui),
    }
}

fn placeholder(ui: &mut Ui, message: &str, is_error: bool) {
    let color = if is_error {
        theme::ERROR_TEXT
    } else {
        theme::TEXT_SECONDARY
    };
    ui.centered_and_justified(|ui| {
        ui.label(egui::RichText::new(message).color(color).size(13.0));
    });
}

fn draw_chart(geometry: &ChartGeometry, ui: &mut Ui) {
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.horizontal_top(|ui| {
                ui.spacing_mut().item_spacing.x = 0.0;
                draw_name_column(geometry, ui);
                egui::ScrollArea::horizontal()
                    .auto_shrink([false, false])
                    .id_salt("gantt_hscroll")
                    .show(ui, |ui| {
                        draw_chart_area(geometry, ui);
                    });
            });
        });
}

/// Fixed task-name column to the left of the scrolling chart.
fn draw_name_column(geometry: &ChartGeometry, ui: &mut Ui) {
    let height = HEADER_HEIGHT + geometry.total_height();
    let (response, painter) =
        ui.allocate_painter(Vec2::new(NAME_COLUMN_WIDTH, height), Sense::hover());
    let origin = response.rect.min;

    painter.rect_filled(response.rect, 0.0, theme::BG_PANEL);
    painter.line_segment(
        [
            Pos2::new(response.rect.right(), origin.y),
            Pos2::new(response.rect.right(), origin.y + height),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    for (i, row) in geometry.rows.iter().enumerate() {
        let y = origin.y + HEADER_HEIGHT + i as f32 * geometry.row_height;
        let row_rect = Rect::from_min_size(
            Pos2::new(origin.x, y),
            Vec2::new(NAME_COLUMN_WIDTH, geometry.row_height),
        );
        let clipped = painter.with_clip_rect(row_rect);
        clipped.text(
            Pos2::new(origin.x + 10.0, y + geometry.row_height / 2.0),
            Align2::LEFT_CENTER,
            &row.name,
            theme::font_bar(),
            theme::TEXT_PRIMARY,
        );
    }
}

fn draw_chart_area(geometry: &ChartGeometry, ui: &mut Ui) {
    let available_width = ui.available_width();
    let chart_width = match geometry.width {
        ChartWidth::Fixed(px) => px,
        ChartWidth::Fill => available_width,
    };
    let height = HEADER_HEIGHT + geometry.total_height();

    let (response, painter) =
        ui.allocate_painter(Vec2::new(chart_width, height.max(ui.available_height())), Sense::hover());
    let origin = response.rect.min;

    painter.rect_filled(response.rect, 0.0, theme::BG_DARK);

    // Timeline header band.
    painter.rect_filled(
        Rect::from_min_size(origin, Vec2::new(chart_width, HEADER_HEIGHT)),
        0.0,
        theme::BG_HEADER,
    );
    painter.line_segment(
        [
            Pos2::new(origin.x, origin.y + HEADER_HEIGHT),
            Pos2::new(origin.x + chart_width, origin.y + HEADER_HEIGHT),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    // One division per timeline unit: grid line plus header label.
    let unit_width = chart_width / geometry.headers.len() as f32;
    for (i, label) in geometry.headers.iter().enumerate() {
        let x = origin.x + i as f32 * unit_width;
        if i > 0 {
            painter.line_segment(
                [Pos2::new(x, origin.y), Pos2::new(x, origin.y + height)],
                Stroke::new(0.5, theme::GRID_LINE),
            );
        }
        if unit_width >= MIN_LABEL_UNIT_WIDTH {
            painter.text(
                Pos2::new(x + unit_width / 2.0, origin.y + HEADER_HEIGHT / 2.0),
                Align2::CENTER_CENTER,
                label,
                theme::font_header(),
                theme::TEXT_SECONDARY,
            );
        }
    }

    // Rows. A row whose bar was skipped stays reserved but empty.
    for (i, row) in geometry.rows.iter().enumerate() {
        let y = origin.y + HEADER_HEIGHT + i as f32 * geometry.row_height;
        if i % 2 == 0 {
            painter.rect_filled(
                Rect::from_min_size(
                    Pos2::new(origin.x, y),
                    Vec2::new(chart_width, geometry.row_height),
                ),
                0.0,
                theme::BG_ROW_EVEN,
            );
        }

        let Some(bar) = row.bar else { continue };

        let bar_x = origin.x + bar.offset_pct / 100.0 * chart_width;
        let bar_width = (bar.width_pct / 100.0 * chart_width).max(4.0);
        let bar_rect = Rect::from_min_size(
            Pos2::new(bar_x, y + (geometry.row_height - BAR_HEIGHT) / 2.0),
            Vec2::new(bar_width, BAR_HEIGHT),
        );
        painter.rect_filled(
            bar_rect,
            Rounding::same(theme::BAR_ROUNDING),
            theme::bar_color(row.color),
        );

        if bar_width > 30.0 {
            let clipped = painter.with_clip_rect(bar_rect.shrink(2.0));
            clipped.text(
                Pos2::new(bar_rect.left() + 6.0, bar_rect.center().y),
                Align2::LEFT_CENTER,
                &row.name,
                theme::font_bar(),
                theme::TEXT_ON_BAR,
            );
        }
    }
}
