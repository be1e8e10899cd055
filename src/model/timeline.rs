use chrono::{Duration, NaiveDate};
use thiserror::Error;

use super::date;
use super::task::Task;

/// Granularity of one header column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineUnit {
    Day,
    Week,
    Month,
}

/// Span thresholds for fit-mode granularity selection, in days.
const WEEK_THRESHOLD: i64 = 30;
const MONTH_THRESHOLD: i64 = 120;

/// The computed timeline the chart is laid out against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeline {
    /// Leftmost rendered date (expanded to a whole unit in week/month mode).
    pub start: NaiveDate,
    /// Rightmost rendered date (expanded to a whole unit in week/month mode).
    pub end: NaiveDate,
    pub unit: TimelineUnit,
    /// Header column count against the expanded bounds.
    pub total_units: i64,
    /// Inclusive day span of the expanded bounds; the denominator for
    /// percentage positioning.
    pub total_days: i64,
}

impl Timeline {
    /// Start date of every unit column, in order.
    pub fn unit_dates(&self) -> Vec<NaiveDate> {
        let mut dates = Vec::with_capacity(self.total_units as usize);
        let mut current = self.start;
        while current <= self.end {
            dates.push(current);
            current = match self.unit {
                TimelineUnit::Day => current + Duration::days(1),
                TimelineUnit::Week => current + Duration::days(7),
                TimelineUnit::Month => date::next_month_start(current),
            };
        }
        dates
    }
}

/// A span that came out non-positive. Blocks chart rendering; the to-do
/// list is unaffected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid timeline span: {days} days between {start} and {end}")]
pub struct ComputationError {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: i64,
}

/// Outcome of the timeline calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimelineSpan {
    /// No tasks at all — a valid "no timeline" state, not an error.
    Empty,
    /// Tasks exist but none carries a parseable date; consumers must show
    /// an explicit "no valid data" state rather than guessing a span.
    NoValidDates,
    Span(Timeline),
}

/// Compute the timeline for a task collection.
///
/// In fit mode the granularity follows the project span (months beyond 120
/// days, weeks beyond 30, days otherwise) and the bounds are expanded to
/// whole units. In fixed mode the granularity is always day-level.
pub fn compute(tasks: &[Task], fit: bool) -> Result<TimelineSpan, ComputationError> {
    if tasks.is_empty() {
        return Ok(TimelineSpan::Empty);
    }

    // Unparsable dates are excluded here, not fatal; the affected bars are
    // skipped later at layout time.
    let dates: Vec<NaiveDate> = tasks
        .iter()
        .flat_map(|t| [t.start_date(), t.end_date()])
        .flatten()
        .collect();

    let (Some(&project_start), Some(&project_end)) = (dates.iter().min(), dates.iter().max())
    else {
        return Ok(TimelineSpan::NoValidDates);
    };

    let project_days = date::days_inclusive(project_start, project_end);
    let unit = if !fit {
        TimelineUnit::Day
    } else if project_days > MONTH_THRESHOLD {
        TimelineUnit::Month
    } else if project_days > WEEK_THRESHOLD {
        TimelineUnit::Week
    } else {
        TimelineUnit::Day
    };

    let (start, end) = match unit {
        TimelineUnit::Day => (project_start, project_end),
        TimelineUnit::Week => (date::week_start(project_start), date::week_end(project_end)),
        TimelineUnit::Month => (date::month_start(project_start), date::month_end(project_end)),
    };

    let total_days = date::days_inclusive(start, end);
    let total_units = match unit {
        TimelineUnit::Day => total_days,
        TimelineUnit::Week => (total_days + 6) / 7,
        TimelineUnit::Month => date::months_inclusive(start, end),
    };

    if total_days <= 0 || total_units <= 0 {
        return Err(ComputationError {
            start,
            end,
            days: total_days,
        });
    }

    Ok(TimelineSpan::Span(Timeline {
        start,
        end,
        unit,
        total_units,
        total_days,
    }))
}
