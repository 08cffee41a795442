use super::models::{Task, TaskError, TaskList};
use super::{reader, writer};
use std::path::Path;

/// Tracks whether a previous save invocation armed subset selection. Kept
/// as its own tagged state, in lockstep with the list's selection mode,
/// rather than being inferred from UI widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveFlow {
    Idle,
    AwaitingSubsetSelection,
}

/// What a save invocation decided to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveScope {
    Single,
    All,
    Subset(Vec<usize>),
}

/// Answer to the "save all or choose tasks?" question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChoice {
    All,
    Choose,
    Cancel,
}

/// What the collaborator has to do next to move the save workflow along.
#[derive(Debug, PartialEq)]
pub enum SaveStep {
    /// Nothing can be saved this invocation; report and stop.
    Rejected(TaskError),
    /// The user backed out of the mode question.
    Cancelled,
    /// Ask the three-way All / Choose / Cancel question.
    PromptMode,
    /// Multi-select is now armed; the user marks tasks and saves again.
    AwaitSelection,
    /// Ask for a destination, then call `destination_chosen`.
    PromptDestination(SaveScope),
}

#[derive(Debug)]
pub struct PersistenceController {
    state: SaveFlow,
}

impl PersistenceController {
    pub fn new() -> Self {
        Self {
            state: SaveFlow::Idle,
        }
    }

    pub fn state(&self) -> SaveFlow {
        self.state
    }

    /// Entry point for every save invocation. The count checks run before
    /// the subset check, so a list that shrank to a single task saves
    /// directly even while a subset selection is still armed.
    pub fn begin_save(&self, tasks: &TaskList) -> SaveStep {
        if tasks.count() == 0 {
            return SaveStep::Rejected(TaskError::Empty);
        }
        if tasks.count() == 1 {
            return SaveStep::PromptDestination(SaveScope::Single);
        }
        match self.state {
            SaveFlow::AwaitingSubsetSelection => {
                let marked = tasks.selected_indices();
                if marked.is_empty() {
                    SaveStep::Rejected(TaskError::NoSelection)
                } else {
                    SaveStep::PromptDestination(SaveScope::Subset(marked))
                }
            }
            SaveFlow::Idle => SaveStep::PromptMode,
        }
    }

    /// Feeds the answer to the mode question back in. `Choose` arms subset
    /// selection and returns without writing; the next `begin_save` picks
    /// the armed branch up.
    pub fn mode_chosen(&mut self, tasks: &mut TaskList, choice: ModeChoice) -> SaveStep {
        match choice {
            ModeChoice::Cancel => SaveStep::Cancelled,
            ModeChoice::All => SaveStep::PromptDestination(SaveScope::All),
            ModeChoice::Choose => {
                tasks.enter_multi_select();
                self.state = SaveFlow::AwaitingSubsetSelection;
                SaveStep::AwaitSelection
            }
        }
    }

    /// Performs the write once the collaborator has (or has not) chosen a
    /// destination. Returns the number of tasks written. A subset attempt
    /// with a destination disarms multi-select whether the write succeeds
    /// or fails; backing out of the path prompt leaves it armed.
    pub fn destination_chosen(
        &mut self,
        tasks: &mut TaskList,
        scope: &SaveScope,
        destination: Option<&Path>,
    ) -> Result<usize, TaskError> {
        let Some(path) = destination else {
            return Err(TaskError::NoDestination);
        };
        let (line_count, write_result) = {
            let to_save: Vec<&Task> = match scope {
                SaveScope::Single => tasks.tasks().iter().take(1).collect(),
                SaveScope::All => tasks.tasks().iter().collect(),
                SaveScope::Subset(indices) => {
                    indices.iter().filter_map(|&i| tasks.task_at(i)).collect()
                }
            };
            (to_save.len(), writer::write_task_file(path, &to_save))
        };
        if let SaveScope::Subset(_) = scope {
            tasks.exit_multi_select();
            self.state = SaveFlow::Idle;
        }
        write_result
            .map(|_| line_count)
            .map_err(|e| TaskError::Io(e.to_string()))
    }

    /// All-or-nothing replace from a line-delimited file. The list is left
    /// untouched when no source is chosen or the read fails.
    pub fn load(&self, tasks: &mut TaskList, source: Option<&Path>) -> Result<usize, TaskError> {
        let Some(path) = source else {
            return Err(TaskError::NoDestination);
        };
        let loaded = reader::read_task_file(path).map_err(|e| TaskError::Io(e.to_string()))?;
        let count = loaded.len();
        tasks.replace_all(loaded);
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::models::SelectionMode;
    use std::fs;

    fn list_of(texts: &[&str]) -> TaskList {
        let mut list = TaskList::new();
        for text in texts {
            list.add(text.to_string()).unwrap();
        }
        list
    }

    #[test]
    fn test_save_empty_list_is_rejected() {
        let controller = PersistenceController::new();
        let tasks = TaskList::new();

        assert_eq!(
            controller.begin_save(&tasks),
            SaveStep::Rejected(TaskError::Empty)
        );
    }

    #[test]
    fn test_single_task_saves_without_mode_question() {
        let controller = PersistenceController::new();
        let tasks = list_of(&["Buy milk"]);

        assert_eq!(
            controller.begin_save(&tasks),
            SaveStep::PromptDestination(SaveScope::Single)
        );
    }

    #[test]
    fn test_single_task_writes_one_line() {
        let temp_file = "/tmp/taskpad_test_save_single.txt";
        let mut controller = PersistenceController::new();
        let mut tasks = list_of(&["Buy milk"]);

        let written = controller
            .destination_chosen(
                &mut tasks,
                &SaveScope::Single,
                Some(Path::new(temp_file)),
            )
            .unwrap();

        assert_eq!(written, 1);
        assert_eq!(fs::read_to_string(temp_file).unwrap(), "Buy milk\n");

        fs::remove_file(temp_file).ok();
    }

    #[test]
    fn test_multiple_tasks_ask_the_mode_question() {
        let controller = PersistenceController::new();
        let tasks = list_of(&["a", "b", "c"]);

        assert_eq!(controller.begin_save(&tasks), SaveStep::PromptMode);
    }

    #[test]
    fn test_cancel_changes_nothing() {
        let mut controller = PersistenceController::new();
        let mut tasks = list_of(&["a", "b", "c"]);

        let step = controller.mode_chosen(&mut tasks, ModeChoice::Cancel);

        assert_eq!(step, SaveStep::Cancelled);
        assert_eq!(controller.state(), SaveFlow::Idle);
        assert_eq!(tasks.selection_mode(), SelectionMode::Single);
    }

    #[test]
    fn test_save_all_writes_every_task_in_order() {
        let temp_file = "/tmp/taskpad_test_save_all.txt";
        let mut controller = PersistenceController::new();
        let mut tasks = list_of(&["t1", "t2", "t3"]);

        let step = controller.mode_chosen(&mut tasks, ModeChoice::All);
        assert_eq!(step, SaveStep::PromptDestination(SaveScope::All));

        let written = controller
            .destination_chosen(&mut tasks, &SaveScope::All, Some(Path::new(temp_file)))
            .unwrap();

        assert_eq!(written, 3);
        assert_eq!(fs::read_to_string(temp_file).unwrap(), "t1\nt2\nt3\n");

        fs::remove_file(temp_file).ok();
    }

    #[test]
    fn test_choose_arms_subset_selection_without_writing() {
        let mut controller = PersistenceController::new();
        let mut tasks = list_of(&["a", "b", "c"]);

        let step = controller.mode_chosen(&mut tasks, ModeChoice::Choose);

        assert_eq!(step, SaveStep::AwaitSelection);
        assert_eq!(controller.state(), SaveFlow::AwaitingSubsetSelection);
        assert_eq!(tasks.selection_mode(), SelectionMode::Multi);
    }

    #[test]
    fn test_armed_save_with_nothing_marked_stays_armed() {
        let mut controller = PersistenceController::new();
        let mut tasks = list_of(&["a", "b", "c"]);
        controller.mode_chosen(&mut tasks, ModeChoice::Choose);

        let step = controller.begin_save(&tasks);

        assert_eq!(step, SaveStep::Rejected(TaskError::NoSelection));
        assert_eq!(controller.state(), SaveFlow::AwaitingSubsetSelection);
        assert_eq!(tasks.selection_mode(), SelectionMode::Multi);
    }

    #[test]
    fn test_subset_save_writes_marked_tasks_in_list_order() {
        let temp_file = "/tmp/taskpad_test_save_subset.txt";
        let mut controller = PersistenceController::new();
        let mut tasks = list_of(&["t1", "t2", "t3"]);
        controller.mode_chosen(&mut tasks, ModeChoice::Choose);

        // Marked out of order; the file follows list order regardless
        tasks.toggle_selected(2);
        tasks.toggle_selected(0);

        let step = controller.begin_save(&tasks);
        assert_eq!(step, SaveStep::PromptDestination(SaveScope::Subset(vec![0, 2])));

        let written = controller
            .destination_chosen(
                &mut tasks,
                &SaveScope::Subset(vec![0, 2]),
                Some(Path::new(temp_file)),
            )
            .unwrap();

        assert_eq!(written, 2);
        assert_eq!(fs::read_to_string(temp_file).unwrap(), "t1\nt3\n");
        assert_eq!(controller.state(), SaveFlow::Idle);
        assert_eq!(tasks.selection_mode(), SelectionMode::Single);

        fs::remove_file(temp_file).ok();
    }

    #[test]
    fn test_subset_save_resets_mode_even_when_the_write_fails() {
        let mut controller = PersistenceController::new();
        let mut tasks = list_of(&["a", "b", "c"]);
        controller.mode_chosen(&mut tasks, ModeChoice::Choose);
        tasks.toggle_selected(1);

        let result = controller.destination_chosen(
            &mut tasks,
            &SaveScope::Subset(vec![1]),
            Some(Path::new("/tmp/taskpad_missing_dir/out.txt")),
        );

        assert!(matches!(result, Err(TaskError::Io(_))));
        assert_eq!(controller.state(), SaveFlow::Idle);
        assert_eq!(tasks.selection_mode(), SelectionMode::Single);
        // The list itself is untouched by a failed write
        assert_eq!(tasks.count(), 3);
    }

    #[test]
    fn test_backing_out_of_the_path_prompt_keeps_subset_armed() {
        let mut controller = PersistenceController::new();
        let mut tasks = list_of(&["a", "b", "c"]);
        controller.mode_chosen(&mut tasks, ModeChoice::Choose);
        tasks.toggle_selected(1);

        let result = controller.destination_chosen(&mut tasks, &SaveScope::Subset(vec![1]), None);

        assert_eq!(result, Err(TaskError::NoDestination));
        assert_eq!(controller.state(), SaveFlow::AwaitingSubsetSelection);
        assert_eq!(tasks.selection_mode(), SelectionMode::Multi);
        assert!(tasks.is_selected(1));
    }

    #[test]
    fn test_one_remaining_task_saves_directly_even_while_armed() {
        let mut controller = PersistenceController::new();
        let mut tasks = list_of(&["a", "b"]);
        controller.mode_chosen(&mut tasks, ModeChoice::Choose);

        let indices = [0].into_iter().collect();
        tasks.delete(&indices).unwrap();

        assert_eq!(
            controller.begin_save(&tasks),
            SaveStep::PromptDestination(SaveScope::Single)
        );
    }

    #[test]
    fn test_save_all_then_load_roundtrip() {
        let temp_file = "/tmp/taskpad_test_save_load_roundtrip.txt";
        let mut controller = PersistenceController::new();
        let mut tasks = list_of(&["t1", "t2", "t3"]);

        controller
            .destination_chosen(&mut tasks, &SaveScope::All, Some(Path::new(temp_file)))
            .unwrap();

        let mut fresh = TaskList::new();
        let loaded = controller
            .load(&mut fresh, Some(Path::new(temp_file)))
            .unwrap();

        assert_eq!(loaded, 3);
        assert_eq!(fresh.count(), 3);
        assert_eq!(fresh.task_at(0).unwrap().text, "t1");
        assert_eq!(fresh.task_at(1).unwrap().text, "t2");
        assert_eq!(fresh.task_at(2).unwrap().text, "t3");

        fs::remove_file(temp_file).ok();
    }

    #[test]
    fn test_load_replaces_existing_tasks() {
        let temp_file = "/tmp/taskpad_test_load_replaces.txt";
        fs::write(temp_file, "new\n").unwrap();

        let controller = PersistenceController::new();
        let mut tasks = list_of(&["old1", "old2"]);

        controller
            .load(&mut tasks, Some(Path::new(temp_file)))
            .unwrap();

        assert_eq!(tasks.count(), 1);
        assert_eq!(tasks.task_at(0).unwrap().text, "new");

        fs::remove_file(temp_file).ok();
    }

    #[test]
    fn test_load_keeps_blank_lines() {
        let temp_file = "/tmp/taskpad_test_load_blanks.txt";
        fs::write(temp_file, "a\n\nb\n").unwrap();

        let controller = PersistenceController::new();
        let mut tasks = TaskList::new();

        controller
            .load(&mut tasks, Some(Path::new(temp_file)))
            .unwrap();

        assert_eq!(tasks.count(), 3);
        assert_eq!(tasks.task_at(1).unwrap().text, "");

        fs::remove_file(temp_file).ok();
    }

    #[test]
    fn test_load_without_source_leaves_list_alone() {
        let controller = PersistenceController::new();
        let mut tasks = list_of(&["a"]);

        let result = controller.load(&mut tasks, None);

        assert_eq!(result, Err(TaskError::NoDestination));
        assert_eq!(tasks.count(), 1);
    }

    #[test]
    fn test_failed_load_leaves_list_alone() {
        let controller = PersistenceController::new();
        let mut tasks = list_of(&["a", "b"]);

        let result = controller.load(
            &mut tasks,
            Some(Path::new("/tmp/taskpad_no_such_file.txt")),
        );

        assert!(matches!(result, Err(TaskError::Io(_))));
        assert_eq!(tasks.count(), 2);
        assert_eq!(tasks.task_at(0).unwrap().text, "a");
    }
}
