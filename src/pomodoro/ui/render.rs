use crate::ops::timer::{TimerMode, format_time};
use crate::pomodoro::models::{App, InputMode};
use crate::pomodoro::ui::popups::{draw_add_task_popup, draw_name_popup, draw_toast};
use crate::pomodoro::ui::task_formatter::format_task;
use crate::pomodoro::ui::theme::{Palette, palette};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph},
};

/// Below this width the three panels stack vertically.
const WIDE_LAYOUT_MIN_WIDTH: u16 = 100;

/// Draws the whole widget: header, greeting, the three panels, help line,
/// then any popup and the toast on top.
pub fn draw_ui(f: &mut Frame, app: &App) {
    let size = f.area();
    let palette = palette(app.dark_mode);

    f.render_widget(
        Block::default().style(Style::default().bg(palette.background).fg(palette.text)),
        size,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(1), // theme toggle
                Constraint::Length(2), // greeting
                Constraint::Min(0),    // panels
                Constraint::Length(1), // help
            ]
            .as_ref(),
        )
        .split(size);

    let theme_toggle = Paragraph::new(if app.dark_mode { "[t] ☀ " } else { "[t] ☾ " })
        .alignment(Alignment::Right)
        .style(Style::default().fg(palette.muted));
    f.render_widget(theme_toggle, chunks[0]);

    let greeting = Paragraph::new(format!("{} 👋", app.greeting()))
        .alignment(Alignment::Center)
        .style(Style::default().fg(palette.text).add_modifier(Modifier::BOLD));
    f.render_widget(greeting, chunks[1]);

    let [tasks_area, timer_area, stats_area] = panel_areas(chunks[2]);
    draw_tasks_panel(f, app, tasks_area, &palette);
    draw_timer_panel(f, app, timer_area, &palette);
    draw_stats_panel(f, app, stats_area, &palette);

    let help = Paragraph::new(help_text(app.input_mode))
        .style(Style::default().fg(palette.muted))
        .alignment(Alignment::Center);
    f.render_widget(help, chunks[3]);

    match app.input_mode {
        InputMode::AddingTask => draw_add_task_popup(f, app, size, &palette),
        InputMode::EditingName => draw_name_popup(f, app, size, &palette),
        InputMode::Normal => {}
    }

    if let Some(toast) = &app.toast {
        draw_toast(f, toast, size, &palette);
    }
}

/// Splits the panel area into (tasks, timer, stats). Side by side when the
/// terminal is wide enough, stacked otherwise.
pub fn panel_areas(area: Rect) -> [Rect; 3] {
    let layout = if area.width >= WIDE_LAYOUT_MIN_WIDTH {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(36),
                Constraint::Percentage(32),
                Constraint::Percentage(32),
            ])
            .split(area)
    } else {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(5),
                Constraint::Length(8),
                Constraint::Length(5),
            ])
            .split(area)
    };
    [layout[0], layout[1], layout[2]]
}

pub fn help_text(mode: InputMode) -> &'static str {
    match mode {
        InputMode::Normal => {
            "space start/pause | r reset | 1/2/3 mode | a add | j/k select | x done | d delete | n name | t theme | q quit"
        }
        InputMode::AddingTask => "Type the task | Tab importance | Enter to add | Esc to cancel",
        InputMode::EditingName => "Type your name | Enter or Esc to close",
    }
}

fn panel_block(title: &str, palette: &Palette) -> Block<'static> {
    Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .style(Style::default().bg(palette.panel).fg(palette.text))
}

fn draw_tasks_panel(f: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let block = panel_block(" To-Do List ✅ ", palette);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.tasks.is_empty() {
        let empty = Paragraph::new("No tasks yet. Press 'a' to add one.")
            .style(Style::default().fg(palette.muted));
        f.render_widget(empty, inner);
        return;
    }

    // Leave room for the highlight symbol
    let text_width = inner.width.saturating_sub(2);
    let items: Vec<ListItem> = app
        .tasks
        .iter()
        .map(|task| ListItem::new(format_task(task, text_width, palette)))
        .collect();

    let list = List::new(items)
        .highlight_symbol("> ")
        .highlight_style(Style::default().bg(palette.input).add_modifier(Modifier::BOLD));

    let mut state = ListState::default().with_selected(app.selected_task);
    f.render_stateful_widget(list, inner, &mut state);
}

fn draw_timer_panel(f: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let block = panel_block(" Timer ", palette);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // mode tabs
            Constraint::Length(1),
            Constraint::Length(1), // time
            Constraint::Length(1), // gauge
            Constraint::Length(1),
            Constraint::Length(1), // controls
            Constraint::Min(0),
        ])
        .split(inner);

    let mut tabs = Vec::new();
    for mode in TimerMode::ALL {
        let style = if mode == app.timer.mode() {
            Style::default()
                .fg(ratatui::style::Color::White)
                .bg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.muted)
        };
        tabs.push(Span::styled(format!(" {} ", mode.label()), style));
    }
    f.render_widget(
        Paragraph::new(Line::from(tabs)).alignment(Alignment::Center),
        rows[0],
    );

    let time = Paragraph::new(format_time(app.timer.remaining()))
        .alignment(Alignment::Center)
        .style(Style::default().fg(palette.text).add_modifier(Modifier::BOLD));
    f.render_widget(time, rows[2]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(palette.success).bg(palette.input))
        .ratio(app.timer.progress().clamp(0.0, 1.0))
        .label("");
    f.render_widget(gauge, rows[3]);

    let controls = Paragraph::new(if app.timer.is_running() {
        "[space] Pause   [r] Reset"
    } else {
        "[space] Start   [r] Reset"
    })
    .alignment(Alignment::Center)
    .style(Style::default().fg(palette.muted));
    f.render_widget(controls, rows[5]);
}

fn draw_stats_panel(f: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let block = panel_block(" Your Statistics ", palette);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines = vec![
        Line::from(Span::styled(
            format!("You have completed {} tasks.", app.completed_count),
            Style::default().fg(palette.muted),
        )),
        Line::from(Span::styled(
            format!("Session started at {}", app.started_at.format("%H:%M")),
            Style::default().fg(palette.muted),
        )),
    ];
    f.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pomodoro::models::Action;
    use ratatui::{Terminal, backend::TestBackend};
    use std::time::{Duration, Instant};

    fn render_to_string(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw_ui(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();

        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn add(app: &mut App, text: &str) {
        app.apply(Action::OpenAddTask);
        for c in text.chars() {
            app.apply(Action::InputChar(c));
        }
        app.apply(Action::SubmitTask);
    }

    #[test]
    fn test_initial_screen() {
        let app = App::new("", true);
        let screen = render_to_string(&app, 120, 30);
        assert!(screen.contains("Hello, user!"));
        assert!(screen.contains("25:00"));
        assert!(screen.contains("[space] Start"));
        assert!(screen.contains("You have completed 0 tasks."));
        assert!(screen.contains("No tasks yet."));
    }

    #[test]
    fn test_tasks_and_running_timer_are_shown() {
        let mut app = App::new("Ada", false);
        add(&mut app, "Buy milk");
        app.apply(Action::ToggleComplete(0));
        app.apply(Action::SetMode(TimerMode::ShortBreak));
        app.apply(Action::Start);
        app.apply(Action::Tick);

        let screen = render_to_string(&app, 120, 30);
        assert!(screen.contains("Hello, Ada!"));
        assert!(screen.contains("[x] Buy milk"));
        assert!(screen.contains("04:59"));
        assert!(screen.contains("[space] Pause"));
        assert!(screen.contains("You have completed 1 tasks."));
    }

    #[test]
    fn test_narrow_terminal_stacks_panels() {
        let area = Rect::new(0, 0, 60, 40);
        let [tasks, timer, stats] = panel_areas(area);
        assert_eq!(tasks.x, timer.x);
        assert!(tasks.y < timer.y && timer.y < stats.y);

        let wide = panel_areas(Rect::new(0, 0, 120, 40));
        assert!(wide[0].x < wide[1].x && wide[1].x < wide[2].x);
    }

    #[test]
    fn test_add_task_popup_and_toast() {
        let mut app = App::new("", true);
        app.apply(Action::OpenAddTask);
        app.apply(Action::InputChar('t'));
        app.apply(Action::CycleImportance);
        app.show_toast("Task completed!", Instant::now(), Duration::from_secs(3));

        let screen = render_to_string(&app, 120, 30);
        assert!(screen.contains("Add your task"));
        assert!(screen.contains("< Medium >"));
        assert!(screen.contains("Task completed!"));
        assert!(screen.contains("Enter to add"));
    }
}
