pub mod chart;
pub mod zoom;

pub use chart::{compute_chart, ChartGeometry, ChartLayout, ChartRow, ChartWidth, TaskBar};
pub use zoom::ZoomState;
