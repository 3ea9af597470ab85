use crate::ops::tasks::Task;
use crate::pomodoro::ui::theme::{COMPLETED, Palette, importance_color};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span, Text},
};

const MARKER: &str = "● ";
const HORIZONTAL_PADDING: usize = 1;

fn checkbox(completed: bool) -> &'static str {
    if completed { "[x] " } else { "[ ] " }
}

/// Splits `text` into lines of at most `max_chars` characters.
/// Always returns at least one line.
pub fn wrap_task_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars
        .chunks(max_chars)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// Formats a task for the to-do list: importance dot, checkbox and text,
/// wrapped to `max_width`. Completed tasks are struck through and grayed.
pub fn format_task(task: &Task, max_width: u16, palette: &Palette) -> Text<'static> {
    let prefix_width = MARKER.chars().count() + checkbox(task.completed).len();
    let effective_width = (max_width as usize)
        .saturating_sub(prefix_width + HORIZONTAL_PADDING * 2)
        .max(1);

    let text_style = if task.completed {
        Style::default()
            .fg(COMPLETED)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(palette.text)
    };

    let mut lines = Vec::new();
    for (i, chunk) in wrap_task_text(&task.text, effective_width)
        .into_iter()
        .enumerate()
    {
        let lead = if i == 0 {
            vec![
                Span::raw(" ".repeat(HORIZONTAL_PADDING)),
                Span::styled(MARKER, Style::default().fg(importance_color(task.importance))),
                Span::styled(checkbox(task.completed), Style::default().fg(palette.muted)),
            ]
        } else {
            vec![Span::raw(" ".repeat(HORIZONTAL_PADDING + prefix_width))]
        };

        let mut spans = lead;
        spans.push(Span::styled(chunk, text_style));
        lines.push(Line::from(spans));
    }

    Text::from(lines)
}
