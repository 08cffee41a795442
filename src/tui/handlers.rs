use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub struct KeyHandler;

impl KeyHandler {
    pub fn handle_normal_mode_key(key_event: KeyEvent) -> NormalModeAction {
        match key_event.code {
            KeyCode::Char('q') => NormalModeAction::Quit,
            KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                NormalModeAction::Quit
            }
            KeyCode::Esc => NormalModeAction::ClearMarks,
            KeyCode::Up | KeyCode::Char('k') => NormalModeAction::MoveCursorUp,
            KeyCode::Down | KeyCode::Char('j') => NormalModeAction::MoveCursorDown,
            KeyCode::Char('a') => NormalModeAction::AddTask,
            KeyCode::Char('e') => NormalModeAction::EditTask,
            KeyCode::Char('d') => NormalModeAction::DeleteTask,
            KeyCode::Char('c') => NormalModeAction::ClearAll,
            KeyCode::Char('s') => NormalModeAction::Save,
            KeyCode::Char('o') => NormalModeAction::Load,
            KeyCode::Char(' ') => NormalModeAction::ToggleMark,
            KeyCode::Char('?') => NormalModeAction::ToggleHelpMode,
            _ => NormalModeAction::None,
        }
    }

    pub fn handle_help_mode_key(key_event: KeyEvent) -> HelpModeAction {
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc | KeyCode::Char('?') => {
                HelpModeAction::ExitHelpMode
            }
            _ => HelpModeAction::None,
        }
    }

    pub fn handle_input_mode_key(key_event: KeyEvent) -> InputModeAction {
        match key_event.code {
            KeyCode::Esc => InputModeAction::Cancel,
            KeyCode::Enter => InputModeAction::Confirm,
            KeyCode::Backspace => InputModeAction::Backspace,
            KeyCode::Delete => InputModeAction::Delete,
            KeyCode::Left => InputModeAction::MoveCursorLeft,
            KeyCode::Right => InputModeAction::MoveCursorRight,
            KeyCode::Home => InputModeAction::MoveCursorHome,
            KeyCode::End => InputModeAction::MoveCursorEnd,
            KeyCode::Char(c) => InputModeAction::InsertChar(c),
            _ => InputModeAction::None,
        }
    }

    pub fn handle_confirm_key(key_event: KeyEvent) -> ConfirmAction {
        match key_event.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => ConfirmAction::Yes,
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => ConfirmAction::No,
            _ => ConfirmAction::None,
        }
    }

    pub fn handle_save_mode_key(key_event: KeyEvent) -> SaveModeAction {
        match key_event.code {
            KeyCode::Char('a') | KeyCode::Char('A') => SaveModeAction::All,
            KeyCode::Char('s') | KeyCode::Char('S') => SaveModeAction::Choose,
            KeyCode::Esc => SaveModeAction::Cancel,
            _ => SaveModeAction::None,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum NormalModeAction {
    None,
    Quit,
    ClearMarks,
    MoveCursorUp,
    MoveCursorDown,
    AddTask,
    EditTask,
    DeleteTask,
    ClearAll,
    Save,
    Load,
    ToggleMark,
    ToggleHelpMode,
}

#[derive(Debug, PartialEq)]
pub enum HelpModeAction {
    None,
    ExitHelpMode,
}

#[derive(Debug, PartialEq)]
pub enum InputModeAction {
    None,
    Cancel,
    Confirm,
    Backspace,
    Delete,
    MoveCursorLeft,
    MoveCursorRight,
    MoveCursorHome,
    MoveCursorEnd,
    InsertChar(char),
}

#[derive(Debug, PartialEq)]
pub enum ConfirmAction {
    None,
    Yes,
    No,
}

#[derive(Debug, PartialEq)]
pub enum SaveModeAction {
    None,
    All,
    Choose,
    Cancel,
}
