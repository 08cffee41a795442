use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct Task {
    pub text: String,
}

impl Task {
    pub fn new(text: String) -> Self {
        Self { text }
    }
}

/// Governs whether delete/save act on the single current item or on the
/// explicitly marked subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    Single,
    Multi,
}

#[derive(Debug, Clone)]
pub struct TaskList {
    items: Vec<Task>,
    selection_mode: SelectionMode,
    selected: HashSet<usize>,
}

impl TaskList {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            selection_mode: SelectionMode::Single,
            selected: HashSet::new(),
        }
    }

    pub fn add(&mut self, text: String) -> Result<(), TaskError> {
        if text.trim().is_empty() {
            return Err(TaskError::EmptyInput);
        }
        self.items.push(Task::new(text));
        Ok(())
    }

    pub fn edit(&mut self, index: Option<usize>, new_text: String) -> Result<(), TaskError> {
        let index = index
            .filter(|&i| i < self.items.len())
            .ok_or(TaskError::NoSelection)?;
        if new_text.trim().is_empty() {
            return Err(TaskError::EmptyInput);
        }
        self.items[index].text = new_text;
        Ok(())
    }

    /// Removes every designated item in one batch. Membership is checked
    /// against the original positions, so removing one item never shifts a
    /// sibling index pending in the same call.
    pub fn delete(&mut self, indices: &HashSet<usize>) -> Result<usize, TaskError> {
        if indices.is_empty() {
            return Err(TaskError::NoSelection);
        }
        let before = self.items.len();
        let mut position = 0;
        self.items.retain(|_| {
            let keep = !indices.contains(&position);
            position += 1;
            keep
        });
        self.selected.clear();
        Ok(before - self.items.len())
    }

    pub fn clear_all(&mut self) -> Result<(), TaskError> {
        if self.items.is_empty() {
            return Err(TaskError::Empty);
        }
        self.items.clear();
        self.selected.clear();
        Ok(())
    }

    /// Wholesale replacement used by load. Marks would dangle, so they are
    /// dropped; the selection mode is left as-is.
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.items = tasks;
        self.selected.clear();
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.items
    }

    pub fn task_at(&self, index: usize) -> Option<&Task> {
        self.items.get(index)
    }

    pub fn selection_mode(&self) -> SelectionMode {
        self.selection_mode
    }

    pub fn enter_multi_select(&mut self) {
        self.selection_mode = SelectionMode::Multi;
    }

    pub fn exit_multi_select(&mut self) {
        self.selection_mode = SelectionMode::Single;
        self.selected.clear();
    }

    /// No-op outside multi-select mode and for out-of-range indices.
    pub fn toggle_selected(&mut self, index: usize) {
        if self.selection_mode != SelectionMode::Multi || index >= self.items.len() {
            return;
        }
        if !self.selected.remove(&index) {
            self.selected.insert(index);
        }
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    pub fn clear_selected(&mut self) {
        self.selected.clear();
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Marked indices in list order, not the order they were marked in.
    pub fn selected_indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self.selected.iter().cloned().collect();
        indices.sort_unstable();
        indices
    }
}

#[derive(Debug, PartialEq)]
pub enum TaskError {
    EmptyInput,
    NoSelection,
    Empty,
    NoDestination,
    Io(String),
}

impl std::fmt::Display for TaskError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskError::EmptyInput => write!(f, "Task text cannot be empty"),
            TaskError::NoSelection => write!(f, "No task is selected"),
            TaskError::Empty => write!(f, "The task list is empty"),
            TaskError::NoDestination => write!(f, "No file was chosen"),
            TaskError::Io(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for TaskError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(texts: &[&str]) -> TaskList {
        let mut list = TaskList::new();
        for text in texts {
            list.add(text.to_string()).unwrap();
        }
        list
    }

    #[test]
    fn test_add_appends_to_end() {
        let mut list = TaskList::new();
        list.add("Buy milk".to_string()).unwrap();
        list.add("Walk dog".to_string()).unwrap();

        assert_eq!(list.count(), 2);
        assert_eq!(list.task_at(1).unwrap().text, "Walk dog");
    }

    #[test]
    fn test_add_rejects_empty_input() {
        let mut list = TaskList::new();
        assert_eq!(list.add("".to_string()), Err(TaskError::EmptyInput));
        assert_eq!(list.add("   ".to_string()), Err(TaskError::EmptyInput));
        assert_eq!(list.count(), 0);
    }

    #[test]
    fn test_add_keeps_surrounding_whitespace() {
        let mut list = TaskList::new();
        list.add("  padded task  ".to_string()).unwrap();
        assert_eq!(list.task_at(0).unwrap().text, "  padded task  ");
    }

    #[test]
    fn test_edit_replaces_in_place() {
        let mut list = list_of(&["a", "b", "c"]);
        list.edit(Some(1), "b2".to_string()).unwrap();

        assert_eq!(list.count(), 3);
        assert_eq!(list.task_at(0).unwrap().text, "a");
        assert_eq!(list.task_at(1).unwrap().text, "b2");
        assert_eq!(list.task_at(2).unwrap().text, "c");
    }

    #[test]
    fn test_edit_without_designated_index() {
        let mut list = list_of(&["a"]);
        assert_eq!(
            list.edit(None, "x".to_string()),
            Err(TaskError::NoSelection)
        );
        assert_eq!(
            list.edit(Some(5), "x".to_string()),
            Err(TaskError::NoSelection)
        );
        assert_eq!(list.task_at(0).unwrap().text, "a");
    }

    #[test]
    fn test_edit_rejects_empty_text() {
        let mut list = list_of(&["a"]);
        assert_eq!(
            list.edit(Some(0), "  ".to_string()),
            Err(TaskError::EmptyInput)
        );
        assert_eq!(list.task_at(0).unwrap().text, "a");
    }

    #[test]
    fn test_delete_batch_preserves_remaining_order() {
        let mut list = list_of(&["a", "b", "c", "d", "e"]);
        let indices: HashSet<usize> = [0, 2, 4].into_iter().collect();

        let removed = list.delete(&indices).unwrap();

        assert_eq!(removed, 3);
        assert_eq!(list.count(), 2);
        assert_eq!(list.task_at(0).unwrap().text, "b");
        assert_eq!(list.task_at(1).unwrap().text, "d");
    }

    #[test]
    fn test_delete_empty_set_is_rejected() {
        let mut list = list_of(&["a"]);
        assert_eq!(list.delete(&HashSet::new()), Err(TaskError::NoSelection));
        assert_eq!(list.count(), 1);
    }

    #[test]
    fn test_delete_clears_marks() {
        let mut list = list_of(&["a", "b", "c"]);
        list.enter_multi_select();
        list.toggle_selected(1);
        list.toggle_selected(2);

        let indices: HashSet<usize> = [1].into_iter().collect();
        list.delete(&indices).unwrap();

        assert_eq!(list.selected_count(), 0);
    }

    #[test]
    fn test_clear_all() {
        let mut list = list_of(&["a", "b"]);
        list.clear_all().unwrap();
        assert_eq!(list.count(), 0);

        assert_eq!(list.clear_all(), Err(TaskError::Empty));
    }

    #[test]
    fn test_toggle_selected_only_in_multi_mode() {
        let mut list = list_of(&["a", "b"]);

        list.toggle_selected(0);
        assert_eq!(list.selected_count(), 0);

        list.enter_multi_select();
        list.toggle_selected(0);
        assert!(list.is_selected(0));
        list.toggle_selected(0);
        assert!(!list.is_selected(0));

        // Out-of-range marks are ignored
        list.toggle_selected(9);
        assert_eq!(list.selected_count(), 0);
    }

    #[test]
    fn test_exit_multi_select_clears_marks() {
        let mut list = list_of(&["a", "b"]);
        list.enter_multi_select();
        list.toggle_selected(0);
        list.toggle_selected(1);

        list.exit_multi_select();

        assert_eq!(list.selection_mode(), SelectionMode::Single);
        assert_eq!(list.selected_count(), 0);
    }

    #[test]
    fn test_selected_indices_are_in_list_order() {
        let mut list = list_of(&["a", "b", "c", "d"]);
        list.enter_multi_select();
        list.toggle_selected(3);
        list.toggle_selected(0);
        list.toggle_selected(2);

        assert_eq!(list.selected_indices(), vec![0, 2, 3]);
    }

    #[test]
    fn test_replace_all_clears_marks_but_keeps_mode() {
        let mut list = list_of(&["a", "b"]);
        list.enter_multi_select();
        list.toggle_selected(0);

        list.replace_all(vec![Task::new("x".to_string())]);

        assert_eq!(list.count(), 1);
        assert_eq!(list.selected_count(), 0);
        assert_eq!(list.selection_mode(), SelectionMode::Multi);
    }
}
