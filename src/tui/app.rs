use crate::config::Config;
use crate::tasks::models::{SelectionMode, TaskError, TaskList};
use crate::tasks::persistence::{ModeChoice, PersistenceController, SaveScope, SaveStep};
use crate::tui::handlers::{
    ConfirmAction, HelpModeAction, InputModeAction, KeyHandler, NormalModeAction, SaveModeAction,
};
use crate::tui::input::InputState;
use anyhow::Result;
use crossterm::event::KeyEvent;
use std::collections::HashSet;
use std::path::PathBuf;

/// Modal prompt currently shown over the list, if any. Only one can be
/// open at a time; every other key press goes to the list itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Prompt {
    AddTask,
    EditTask,
    SaveMode,
    SavePath(SaveScope),
    LoadPath,
    ConfirmDelete(HashSet<usize>),
    ConfirmClear,
}

#[derive(Debug)]
pub struct App {
    pub tasks: TaskList,
    pub controller: PersistenceController,
    pub config: Config,
    /// The single "current" item the cursor sits on. Distinct from the
    /// marked set inside TaskList, which only exists while choosing a
    /// subset to save.
    pub cursor: usize,
    pub scroll_offset: usize,
    pub should_quit: bool,
    pub help_mode: bool,
    pub prompt: Option<Prompt>,
    pub input: InputState,
    pub status: String,
}

impl App {
    pub fn new(tasks: TaskList, config: Config) -> Self {
        Self {
            tasks,
            controller: PersistenceController::new(),
            config,
            cursor: 0,
            scroll_offset: 0,
            should_quit: false,
            help_mode: false,
            prompt: None,
            input: InputState::new(),
            status: String::new(),
        }
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> Result<()> {
        if self.help_mode {
            self.handle_help_mode_key(key_event);
            return Ok(());
        }
        match self.prompt.clone() {
            None => self.handle_normal_mode_key(key_event),
            Some(Prompt::SaveMode) => self.handle_save_mode_key(key_event),
            Some(Prompt::ConfirmDelete(indices)) => {
                self.handle_confirm_delete_key(key_event, &indices)
            }
            Some(Prompt::ConfirmClear) => self.handle_confirm_clear_key(key_event),
            Some(
                Prompt::AddTask | Prompt::EditTask | Prompt::SavePath(_) | Prompt::LoadPath,
            ) => self.handle_input_prompt_key(key_event),
        }
        Ok(())
    }

    fn handle_normal_mode_key(&mut self, key_event: KeyEvent) {
        match KeyHandler::handle_normal_mode_key(key_event) {
            NormalModeAction::Quit => self.should_quit = true,
            NormalModeAction::ClearMarks => self.tasks.clear_selected(),
            NormalModeAction::MoveCursorUp => self.move_cursor_up(),
            NormalModeAction::MoveCursorDown => self.move_cursor_down(),
            NormalModeAction::AddTask => {
                self.input.reset();
                self.prompt = Some(Prompt::AddTask);
            }
            NormalModeAction::EditTask => self.begin_edit(),
            NormalModeAction::DeleteTask => self.begin_delete(),
            NormalModeAction::ClearAll => self.begin_clear_all(),
            NormalModeAction::Save => {
                let step = self.controller.begin_save(&self.tasks);
                self.apply_save_step(step);
            }
            NormalModeAction::Load => {
                let prefill = self.path_prefill();
                self.input.open(prefill);
                self.prompt = Some(Prompt::LoadPath);
            }
            NormalModeAction::ToggleMark => self.toggle_mark(),
            NormalModeAction::ToggleHelpMode => self.help_mode = true,
            NormalModeAction::None => {}
        }
    }

    fn handle_help_mode_key(&mut self, key_event: KeyEvent) {
        if KeyHandler::handle_help_mode_key(key_event) == HelpModeAction::ExitHelpMode {
            self.help_mode = false;
        }
    }

    fn handle_save_mode_key(&mut self, key_event: KeyEvent) {
        let choice = match KeyHandler::handle_save_mode_key(key_event) {
            SaveModeAction::All => ModeChoice::All,
            SaveModeAction::Choose => ModeChoice::Choose,
            SaveModeAction::Cancel => ModeChoice::Cancel,
            SaveModeAction::None => return,
        };
        self.prompt = None;
        let step = self.controller.mode_chosen(&mut self.tasks, choice);
        self.apply_save_step(step);
    }

    fn handle_confirm_delete_key(&mut self, key_event: KeyEvent, indices: &HashSet<usize>) {
        match KeyHandler::handle_confirm_key(key_event) {
            ConfirmAction::Yes => {
                self.prompt = None;
                match self.tasks.delete(indices) {
                    Ok(removed) => {
                        self.cursor = self.cursor.min(self.tasks.count().saturating_sub(1));
                        self.status = format!("Deleted {} task(s).", removed);
                    }
                    Err(err) => self.status = err.to_string(),
                }
            }
            ConfirmAction::No => {
                self.prompt = None;
                self.status = "Delete cancelled.".to_string();
            }
            ConfirmAction::None => {}
        }
    }

    fn handle_confirm_clear_key(&mut self, key_event: KeyEvent) {
        match KeyHandler::handle_confirm_key(key_event) {
            ConfirmAction::Yes => {
                self.prompt = None;
                match self.tasks.clear_all() {
                    Ok(()) => {
                        self.cursor = 0;
                        self.scroll_offset = 0;
                        self.status = "All tasks cleared.".to_string();
                    }
                    Err(err) => self.status = err.to_string(),
                }
            }
            ConfirmAction::No => {
                self.prompt = None;
                self.status = "Clear cancelled.".to_string();
            }
            ConfirmAction::None => {}
        }
    }

    fn handle_input_prompt_key(&mut self, key_event: KeyEvent) {
        match KeyHandler::handle_input_mode_key(key_event) {
            InputModeAction::Confirm => self.confirm_input_prompt(),
            InputModeAction::Cancel => self.cancel_input_prompt(),
            InputModeAction::Backspace => self.input.backspace(),
            InputModeAction::Delete => self.input.delete(),
            InputModeAction::MoveCursorLeft => self.input.move_cursor_left(),
            InputModeAction::MoveCursorRight => self.input.move_cursor_right(),
            InputModeAction::MoveCursorHome => self.input.move_cursor_home(),
            InputModeAction::MoveCursorEnd => self.input.move_cursor_end(),
            InputModeAction::InsertChar(c) => self.input.insert_char(c),
            InputModeAction::None => {}
        }
    }

    fn confirm_input_prompt(&mut self) {
        match self.prompt.clone() {
            Some(Prompt::AddTask) => match self.tasks.add(self.input.buffer.clone()) {
                Ok(()) => {
                    self.input.reset();
                    self.prompt = None;
                    self.cursor = self.tasks.count() - 1;
                    self.update_scroll();
                    self.status = "Task added.".to_string();
                }
                // Rejected input stays in the prompt so the user can fix it
                Err(err) => self.status = err.to_string(),
            },
            Some(Prompt::EditTask) => {
                match self.tasks.edit(Some(self.cursor), self.input.buffer.clone()) {
                    Ok(()) => {
                        self.input.reset();
                        self.prompt = None;
                        self.status = "Task updated.".to_string();
                    }
                    Err(TaskError::EmptyInput) => {
                        self.status = TaskError::EmptyInput.to_string();
                    }
                    Err(err) => {
                        self.input.reset();
                        self.prompt = None;
                        self.status = err.to_string();
                    }
                }
            }
            Some(Prompt::SavePath(scope)) => {
                let destination = self.chosen_path();
                self.finish_save(&scope, destination);
            }
            Some(Prompt::LoadPath) => {
                let source = self.chosen_path();
                self.finish_load(source);
            }
            _ => {}
        }
    }

    fn cancel_input_prompt(&mut self) {
        match self.prompt.clone() {
            // Backing out of a path prompt still goes through the
            // controller: a subset save must stay armed.
            Some(Prompt::SavePath(scope)) => self.finish_save(&scope, None),
            Some(Prompt::LoadPath) => self.finish_load(None),
            _ => {
                self.input.reset();
                self.prompt = None;
            }
        }
    }

    fn begin_edit(&mut self) {
        match self.tasks.task_at(self.cursor) {
            Some(task) => {
                let text = task.text.clone();
                self.input.open(text);
                self.prompt = Some(Prompt::EditTask);
            }
            None => self.status = "Select a task to edit.".to_string(),
        }
    }

    fn begin_delete(&mut self) {
        let targets: HashSet<usize> = if self.tasks.selection_mode() == SelectionMode::Multi
            && self.tasks.selected_count() > 0
        {
            self.tasks.selected_indices().into_iter().collect()
        } else if self.cursor < self.tasks.count() {
            [self.cursor].into_iter().collect()
        } else {
            HashSet::new()
        };
        if targets.is_empty() {
            self.status = "Select a task to delete.".to_string();
        } else {
            self.prompt = Some(Prompt::ConfirmDelete(targets));
        }
    }

    fn begin_clear_all(&mut self) {
        if self.tasks.count() == 0 {
            self.status = "There are no tasks to clear.".to_string();
        } else {
            self.prompt = Some(Prompt::ConfirmClear);
        }
    }

    fn toggle_mark(&mut self) {
        if self.tasks.selection_mode() == SelectionMode::Multi {
            self.tasks.toggle_selected(self.cursor);
        } else {
            self.status = "Marking is only available while choosing tasks to save.".to_string();
        }
    }

    fn apply_save_step(&mut self, step: SaveStep) {
        match step {
            SaveStep::Rejected(TaskError::Empty) => {
                self.status = "There are no tasks to save.".to_string();
            }
            SaveStep::Rejected(TaskError::NoSelection) => {
                self.status = "Select at least one task to save.".to_string();
            }
            SaveStep::Rejected(err) => self.status = err.to_string(),
            SaveStep::Cancelled => {
                self.status = "Save cancelled.".to_string();
            }
            SaveStep::PromptMode => {
                self.prompt = Some(Prompt::SaveMode);
            }
            SaveStep::AwaitSelection => {
                self.status = "Mark tasks with Space, then press s again.".to_string();
            }
            SaveStep::PromptDestination(scope) => {
                let prefill = self.path_prefill();
                self.input.open(prefill);
                self.prompt = Some(Prompt::SavePath(scope));
            }
        }
    }

    fn finish_save(&mut self, scope: &SaveScope, destination: Option<PathBuf>) {
        self.input.reset();
        self.prompt = None;
        let result = self
            .controller
            .destination_chosen(&mut self.tasks, scope, destination.as_deref());
        match (result, destination) {
            (Ok(written), Some(path)) => {
                self.status = format!("Saved {} task(s) to {}.", written, path.display());
            }
            (Err(TaskError::NoDestination), _) | (Ok(_), None) => {
                self.status = "No file name given.".to_string();
            }
            (Err(err), _) => self.status = err.to_string(),
        }
    }

    fn finish_load(&mut self, source: Option<PathBuf>) {
        self.input.reset();
        self.prompt = None;
        let result = self.controller.load(&mut self.tasks, source.as_deref());
        match (result, source) {
            (Ok(loaded), Some(path)) => {
                self.cursor = 0;
                self.scroll_offset = 0;
                self.status = format!("Loaded {} task(s) from {}.", loaded, path.display());
            }
            (Err(TaskError::NoDestination), _) | (Ok(_), None) => {
                self.status = "No file chosen.".to_string();
            }
            (Err(err), _) => self.status = err.to_string(),
        }
    }

    fn chosen_path(&self) -> Option<PathBuf> {
        let trimmed = self.input.buffer.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(PathBuf::from(trimmed))
        }
    }

    fn path_prefill(&self) -> String {
        let dir = self.config.default_dir.trim_end_matches('/');
        if dir.is_empty() {
            String::new()
        } else {
            format!("{}/", dir)
        }
    }

    fn move_cursor_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.update_scroll();
        }
    }

    fn move_cursor_down(&mut self) {
        if self.cursor < self.tasks.count().saturating_sub(1) {
            self.cursor += 1;
            self.update_scroll();
        }
    }

    fn update_scroll(&mut self) {
        // Simple scroll logic - keep the cursor visible
        const VISIBLE_ITEMS: usize = 20;

        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.cursor >= self.scroll_offset + VISIBLE_ITEMS {
            self.scroll_offset = self.cursor.saturating_sub(VISIBLE_ITEMS - 1);
        }
    }
}
