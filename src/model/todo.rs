use super::store::TaskStore;

/// One checklist entry, derived from a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    pub id: u64,
    pub name: String,
    pub completed: bool,
}

/// Project the store onto the checklist view, in the same ascending
/// start-date order the chart uses. No independent state.
pub fn todo_items(store: &TaskStore) -> Vec<TodoItem> {
    store
        .sorted()
        .into_iter()
        .map(|t| TodoItem {
            id: t.id,
            name: t.name.clone(),
            completed: t.completed,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::TaskColor;

    #[test]
    fn projection_follows_chart_sort_order() {
        let mut store = TaskStore::new();
        store.add("later", "2024-07-10", "2024-07-12", TaskColor::Blue).unwrap();
        store.add("first", "2024-07-01", "2024-07-02", TaskColor::Green).unwrap();
        store.set_completed(2, true).unwrap();

        let items = todo_items(&store);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "first");
        assert!(items[0].completed);
        assert_eq!(items[1].name, "later");
        assert!(!items[1].completed);
    }

    #[test]
    fn empty_store_projects_to_nothing() {
        assert!(todo_items(&TaskStore::new()).is_empty());
    }
}
