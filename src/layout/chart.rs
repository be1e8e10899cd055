use chrono::Datelike;
use tracing::debug;

use crate::model::date;
use crate::model::store::TaskStore;
use crate::model::task::{Task, TaskColor};
use crate::model::timeline::{self, ComputationError, Timeline, TimelineSpan, TimelineUnit};

use super::zoom::ZoomState;

/// Height of one chart row in pixels.
pub const ROW_HEIGHT: f32 = 48.0;

/// Horizontal extent of the chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChartWidth {
    /// Absolute width in pixels (fixed-scale mode).
    Fixed(f32),
    /// Fill the container (fit mode).
    Fill,
}

/// Position of a task bar inside its row, as percentages of the chart
/// width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaskBar {
    pub offset_pct: f32,
    pub width_pct: f32,
}

/// One chart row. `bar` is `None` when the task's dates could not be laid
/// out; the row itself is still reserved.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRow {
    pub id: u64,
    pub name: String,
    pub color: TaskColor,
    pub completed: bool,
    pub bar: Option<TaskBar>,
}

/// Renderable chart geometry. A plain value object: the renderer consumes
/// it without ever touching the store.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartGeometry {
    pub timeline: Timeline,
    pub width: ChartWidth,
    /// One label per timeline unit, left to right. Also the grid division
    /// count.
    pub headers: Vec<String>,
    pub rows: Vec<ChartRow>,
    pub row_height: f32,
}

impl ChartGeometry {
    pub fn total_height(&self) -> f32 {
        self.rows.len() as f32 * self.row_height
    }
}

/// Full layout result, including the explicit degenerate states the UI
/// must render as placeholders.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartLayout {
    /// No tasks; show the "add one" placeholder.
    Empty,
    /// Tasks exist but no date survived parsing.
    NoValidDates,
    /// The span computation failed; chart blocked, checklist unaffected.
    Invalid(ComputationError),
    Ready(ChartGeometry),
}

/// Compute the whole chart from the store and zoom state. Pure; called in
/// full on every mutation (and cheap enough to run per frame).
pub fn compute_chart(store: &TaskStore, zoom: &ZoomState) -> ChartLayout {
    let span = match timeline::compute(store.tasks(), zoom.fit) {
        Ok(span) => span,
        Err(err) => return ChartLayout::Invalid(err),
    };
    let timeline = match span {
        TimelineSpan::Empty => return ChartLayout::Empty,
        TimelineSpan::NoValidDates => return ChartLayout::NoValidDates,
        TimelineSpan::Span(t) => t,
    };

    let width = if zoom.fit {
        ChartWidth::Fill
    } else {
        // Fixed mode is always day-granular, so days are the unit count.
        ChartWidth::Fixed(timeline.total_days as f32 * zoom.pixels_per_day)
    };

    let headers = timeline
        .unit_dates()
        .into_iter()
        .map(|d| match timeline.unit {
            TimelineUnit::Day => d.format("%d.%m").to_string(),
            TimelineUnit::Week => format!("KW{}", d.iso_week().week()),
            TimelineUnit::Month => d.format("%b %y").to_string(),
        })
        .collect();

    let rows = store
        .sorted()
        .into_iter()
        .map(|task| ChartRow {
            id: task.id,
            name: task.name.clone(),
            color: task.color,
            completed: task.completed,
            bar: bar_for(task, &timeline),
        })
        .collect();

    ChartLayout::Ready(ChartGeometry {
        timeline,
        width,
        headers,
        rows,
        row_height: ROW_HEIGHT,
    })
}

/// Bar geometry for one task, or `None` when the task cannot be laid out.
/// A silent skip: logged for diagnostics, never surfaced to the user.
fn bar_for(task: &Task, timeline: &Timeline) -> Option<TaskBar> {
    if timeline.total_days <= 0 {
        return None;
    }
    let (Some(start), Some(end)) = (task.start_date(), task.end_date()) else {
        debug!(id = task.id, name = %task.name, "skipping bar: unparsable dates");
        return None;
    };
    if start > end {
        debug!(id = task.id, name = %task.name, "skipping bar: start after end");
        return None;
    }

    let start_offset_days = (start - timeline.start).num_days();
    let duration_days = date::days_inclusive(start, end);
    if duration_days <= 0 || start_offset_days < 0 {
        debug!(
            id = task.id,
            name = %task.name,
            start_offset_days,
            duration_days,
            "skipping bar: outside timeline bounds"
        );
        return None;
    }

    let total = timeline.total_days as f32;
    Some(TaskBar {
        offset_pct: start_offset_days as f32 / total * 100.0,
        width_pct: duration_days as f32 / total * 100.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::store::TaskStore;
    use crate::model::Task;

    const EPS: f32 = 1e-4;

    fn raw_task(id: u64, start: &str, end: &str) -> Task {
        Task {
            id,
            name: format!("task {id}"),
            start: start.to_string(),
            end: end.to_string(),
            color: TaskColor::Blue,
            completed: false,
            dependencies: Vec::new(),
        }
    }

    fn ready(layout: ChartLayout) -> ChartGeometry {
        match layout {
            ChartLayout::Ready(g) => g,
            other => panic!("expected Ready, got {other:?}"),
        }
    }

    #[test]
    fn scenario_two_tasks_day_mode_fixed_scale() {
        let mut store = TaskStore::new();
        store.add("kickoff", "2024-07-01", "2024-07-01", TaskColor::Blue).unwrap();
        store.add("design", "2024-07-02", "2024-07-10", TaskColor::Green).unwrap();

        let geometry = ready(compute_chart(&store, &ZoomState::default()));
        assert_eq!(geometry.timeline.total_days, 10);
        assert_eq!(geometry.width, ChartWidth::Fixed(500.0));
        assert_eq!(geometry.headers.len(), 10);
        assert_eq!(geometry.headers[0], "01.07");
        assert_eq!(geometry.headers[9], "10.07");

        let first = geometry.rows[0].bar.unwrap();
        assert!((first.offset_pct - 0.0).abs() < EPS);
        assert!((first.width_pct - 10.0).abs() < EPS);

        let second = geometry.rows[1].bar.unwrap();
        assert!((second.offset_pct - 10.0).abs() < EPS);
        assert!((second.width_pct - 90.0).abs() < EPS);
    }

    #[test]
    fn bars_stay_inside_the_chart() {
        let mut store = TaskStore::new();
        store.add("a", "2024-03-03", "2024-04-11", TaskColor::Blue).unwrap();
        store.add("b", "2024-03-20", "2024-06-30", TaskColor::Red).unwrap();
        store.add("c", "2024-06-30", "2024-06-30", TaskColor::Green).unwrap();

        for fit in [false, true] {
            let zoom = ZoomState {
                fit,
                ..ZoomState::default()
            };
            let geometry = ready(compute_chart(&store, &zoom));
            for row in &geometry.rows {
                let bar = row.bar.expect("all tasks have valid dates");
                assert!(bar.offset_pct >= 0.0);
                assert!(bar.offset_pct + bar.width_pct <= 100.0 + EPS);
            }
        }
    }

    #[test]
    fn recompute_without_mutation_is_idempotent() {
        let mut store = TaskStore::new();
        store.add("a", "2024-07-01", "2024-07-04", TaskColor::Blue).unwrap();
        store.add("b", "2024-07-02", "2024-07-09", TaskColor::Red).unwrap();

        let zoom = ZoomState::default();
        assert_eq!(compute_chart(&store, &zoom), compute_chart(&store, &zoom));
    }

    #[test]
    fn rows_follow_ascending_start_order() {
        let mut store = TaskStore::new();
        store.add("late", "2024-07-20", "2024-07-22", TaskColor::Blue).unwrap();
        store.add("early", "2024-07-01", "2024-07-02", TaskColor::Red).unwrap();

        let geometry = ready(compute_chart(&store, &ZoomState::default()));
        let names: Vec<&str> = geometry.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["early", "late"]);
    }

    #[test]
    fn empty_store_yields_empty_layout() {
        let layout = compute_chart(&TaskStore::new(), &ZoomState::default());
        assert_eq!(layout, ChartLayout::Empty);
    }

    #[test]
    fn unparsable_date_reserves_an_empty_row() {
        let store = TaskStore::from_tasks(vec![
            raw_task(1, "2024-07-01", "2024-07-05"),
            raw_task(2, "sometime", "2024-07-09"),
        ]);

        let geometry = ready(compute_chart(&store, &ZoomState::default()));
        // Dates are excluded one by one: the broken start contributes
        // nothing, but the task's valid end still stretches the span.
        assert_eq!(geometry.timeline.total_days, 9);
        assert_eq!(geometry.rows.len(), 2);

        let broken = geometry.rows.iter().find(|r| r.id == 2).unwrap();
        assert!(broken.bar.is_none());
        let ok = geometry.rows.iter().find(|r| r.id == 1).unwrap();
        assert!(ok.bar.is_some());
    }

    #[test]
    fn start_after_end_skips_the_bar_only() {
        let store = TaskStore::from_tasks(vec![
            raw_task(1, "2024-07-01", "2024-07-05"),
            raw_task(2, "2024-07-09", "2024-07-02"),
        ]);

        let geometry = ready(compute_chart(&store, &ZoomState::default()));
        assert_eq!(geometry.rows.len(), 2);
        assert!(geometry.rows.iter().any(|r| r.bar.is_none()));
        assert!(geometry.rows.iter().any(|r| r.bar.is_some()));
    }

    #[test]
    fn fit_mode_fills_the_container() {
        let mut store = TaskStore::new();
        store.add("a", "2024-07-01", "2024-07-04", TaskColor::Blue).unwrap();
        let zoom = ZoomState {
            fit: true,
            ..ZoomState::default()
        };
        let geometry = ready(compute_chart(&store, &zoom));
        assert_eq!(geometry.width, ChartWidth::Fill);
    }

    #[test]
    fn month_granularity_headers_in_fit_mode() {
        let mut store = TaskStore::new();
        store.add("long", "2024-03-10", "2024-08-06", TaskColor::Blue).unwrap();
        let zoom = ZoomState {
            fit: true,
            ..ZoomState::default()
        };
        let geometry = ready(compute_chart(&store, &zoom));
        assert_eq!(geometry.timeline.unit, TimelineUnit::Month);
        assert_eq!(geometry.headers.len(), 6);
        assert_eq!(geometry.headers[0], "Mar 24");
        assert_eq!(geometry.headers[5], "Aug 24");
    }

    #[test]
    fn week_headers_carry_iso_week_numbers() {
        let mut store = TaskStore::new();
        store.add("mid", "2024-07-01", "2024-08-14", TaskColor::Blue).unwrap();
        let zoom = ZoomState {
            fit: true,
            ..ZoomState::default()
        };
        let geometry = ready(compute_chart(&store, &zoom));
        assert_eq!(geometry.timeline.unit, TimelineUnit::Week);
        // 2024-07-01 is ISO week 27.
        assert_eq!(geometry.headers[0], "KW27");
    }

    #[test]
    fn total_height_is_row_count_times_row_height() {
        let mut store = TaskStore::new();
        store.add("a", "2024-07-01", "2024-07-04", TaskColor::Blue).unwrap();
        store.add("b", "2024-07-02", "2024-07-09", TaskColor::Red).unwrap();
        let geometry = ready(compute_chart(&store, &ZoomState::default()));
        assert_eq!(geometry.total_height(), 2.0 * ROW_HEIGHT);
    }
}
