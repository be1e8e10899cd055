pub mod date;
pub mod store;
pub mod task;
pub mod timeline;
pub mod todo;

pub use store::{StoreError, TaskEdit, TaskStore};
pub use task::{Task, TaskColor};
pub use timeline::{Timeline, TimelineSpan, TimelineUnit};
pub use todo::{todo_items, TodoItem};
