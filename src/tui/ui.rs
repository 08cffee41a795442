use crate::tasks::models::SelectionMode;
use crate::tui::app::{App, Prompt};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Task list
            Constraint::Length(3), // Footer
        ])
        .split(frame.size());

    draw_header(frame, chunks[0], app);
    draw_task_list(frame, chunks[1], app);
    draw_footer(frame, chunks[2], app);

    if app.help_mode {
        draw_help_window(frame);
        return;
    }

    match &app.prompt {
        Some(Prompt::AddTask) => draw_input_prompt(frame, app, " New Task "),
        Some(Prompt::EditTask) => draw_input_prompt(frame, app, " Edit Task "),
        Some(Prompt::SavePath(_)) => draw_input_prompt(frame, app, " Save Tasks To "),
        Some(Prompt::LoadPath) => draw_input_prompt(frame, app, " Load Tasks From "),
        Some(Prompt::SaveMode) => draw_save_mode_dialog(frame),
        Some(Prompt::ConfirmDelete(indices)) => draw_confirm_dialog(
            frame,
            " Delete Task ",
            &format!("Delete {} task(s)?", indices.len()),
        ),
        Some(Prompt::ConfirmClear) => {
            draw_confirm_dialog(frame, " Clear All ", "Clear all tasks?")
        }
        None => {}
    }
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let mode_label = match app.tasks.selection_mode() {
        SelectionMode::Single => String::new(),
        SelectionMode::Multi => format!(" | choosing tasks ({} marked)", app.tasks.selected_count()),
    };
    let header_text = format!("Tasks: {}{}", app.tasks.count(), mode_label);
    let header = Paragraph::new(header_text)
        .block(Block::default().borders(Borders::ALL).title("Taskpad"))
        .style(Style::default().fg(Color::Cyan));

    frame.render_widget(header, area);
}

fn draw_task_list(frame: &mut Frame, area: Rect, app: &mut App) {
    let multi = app.tasks.selection_mode() == SelectionMode::Multi;

    let items: Vec<ListItem> = app
        .tasks
        .tasks()
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let mark = if multi {
                if app.tasks.is_selected(i) { "● " } else { "  " }
            } else {
                ""
            };
            let style = if multi && app.tasks.is_selected(i) {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let line = Line::from(Span::styled(format!("{}{}", mark, task.text), style));
            ListItem::new(line)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Items"))
        .highlight_style(
            Style::default()
                .bg(Color::Yellow)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        );

    let mut list_state = ListState::default();
    if app.tasks.count() > 0 {
        list_state.select(Some(app.cursor));
    }

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let footer_text = if app.status.is_empty() {
        "a: add | e: edit | d: delete | c: clear | s: save | o: load | Space: mark | ?: help | q: quit"
            .to_string()
    } else {
        app.status.clone()
    };

    let footer = Paragraph::new(footer_text)
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Yellow));

    frame.render_widget(footer, area);
}

fn draw_input_prompt(frame: &mut Frame, app: &App, title: &str) {
    let (before_cursor, after_cursor) = app.input.buffer.split_at(app.input.cursor);
    let content = format!("{}█{}", before_cursor, after_cursor);

    let prompt = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    let area = centered_rect(60, 3, frame.size());
    frame.render_widget(Clear, area);
    frame.render_widget(prompt, area);
}

fn draw_save_mode_dialog(frame: &mut Frame) {
    let lines = vec![
        "Save all tasks, or choose which ones to save?",
        "",
        "  a     save all tasks",
        "  s     choose tasks to save",
        "  Esc   cancel",
    ];

    let dialog = Paragraph::new(lines.join("\n"))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Save Tasks ")
                .style(Style::default().fg(Color::Yellow)),
        )
        .style(Style::default().fg(Color::White));

    let area = centered_rect(60, 7, frame.size());
    frame.render_widget(Clear, area);
    frame.render_widget(dialog, area);
}

fn draw_confirm_dialog(frame: &mut Frame, title: &str, question: &str) {
    let content = format!("{}\n\ny: yes   n: no", question);

    let dialog = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .style(Style::default().fg(Color::Yellow)),
        )
        .style(Style::default().fg(Color::White));

    let area = centered_rect(50, 5, frame.size());
    frame.render_widget(Clear, area);
    frame.render_widget(dialog, area);
}

fn draw_help_window(frame: &mut Frame) {
    let help_text = vec![
        "Taskpad - Keyboard Commands",
        "",
        "NAVIGATION:",
        "  ↑↓ / j/k          Move the cursor up/down",
        "",
        "TASKS:",
        "  a                 Add a new task",
        "  e                 Edit the current task",
        "  d                 Delete the current task (or marked tasks)",
        "  c                 Clear all tasks",
        "",
        "FILES:",
        "  s                 Save tasks (all, or a chosen subset)",
        "  o                 Load tasks from a file",
        "",
        "CHOOSING TASKS TO SAVE:",
        "  Space             Mark/unmark the current task",
        "  Esc               Unmark everything",
        "",
        "OTHER:",
        "  ?                 Show this help (press ? or Esc to close)",
        "  q / Ctrl+C        Quit",
    ];

    let help_paragraph = Paragraph::new(help_text.join("\n"))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help - Keyboard Commands ")
                .style(Style::default().fg(Color::Yellow)),
        )
        .style(Style::default().fg(Color::White))
        .wrap(ratatui::widgets::Wrap { trim: true });

    let area = centered_rect(70, 24, frame.size());
    frame.render_widget(Clear, area);
    frame.render_widget(help_paragraph, area);
}

/// Fixed-height box centered in `r`, `percent_x` wide.
fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let vertical_pad = r.height.saturating_sub(height) / 2;
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(vertical_pad),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
