use crate::pomodoro::models::{App, Toast};
use crate::pomodoro::ui::theme::{Palette, importance_color};
use ratatui::{
    Frame,
    layout::{Alignment, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const TOAST_WIDTH: u16 = 30;
const TOAST_HEIGHT: u16 = 3;

fn centered(size: Rect, width: u16, height: u16) -> Rect {
    Rect::new(
        (size.width.saturating_sub(width)) / 2,
        (size.height.saturating_sub(height)) / 2,
        width.min(size.width),
        height.min(size.height),
    )
}

/// Draw a simple input popup with a title and input field
pub fn draw_input_popup(
    f: &mut Frame,
    size: Rect,
    title: &str,
    value: &str,
    palette: &Palette,
    width: u16,
    height: u16,
) -> Rect {
    let popup_area = centered(size, width, height);

    f.render_widget(Clear, popup_area);

    let popup_block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .style(Style::default().bg(palette.panel).fg(palette.text));

    f.render_widget(&popup_block, popup_area);

    let input_area = popup_block.inner(popup_area);
    if input_area.is_empty() {
        return input_area;
    }

    let input = Paragraph::new(value.to_string())
        .style(Style::default().bg(palette.input).fg(palette.text))
        .wrap(Wrap { trim: true });

    f.render_widget(input, Rect::new(input_area.x, input_area.y, input_area.width, 1));

    f.set_cursor_position(Position {
        x: input_area.x + (Line::from(value).width() as u16).min(input_area.width - 1),
        y: input_area.y,
    });

    input_area
}

/// Draw the add-task popup: text field plus the importance selector
pub fn draw_add_task_popup(f: &mut Frame, app: &App, size: Rect, palette: &Palette) {
    let input_area = draw_input_popup(
        f,
        size,
        "Add your task",
        &app.input_text,
        palette,
        60,
        5,
    );

    if input_area.height < 3 {
        return;
    }

    let importance = Line::from(vec![
        Span::styled("Importance: ", Style::default().fg(palette.muted)),
        Span::styled(
            format!("< {} >", app.new_importance.label()),
            Style::default()
                .fg(importance_color(app.new_importance))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  (tab to change)", Style::default().fg(palette.muted)),
    ]);

    f.render_widget(
        Paragraph::new(importance),
        Rect::new(input_area.x, input_area.y + 2, input_area.width, 1),
    );
}

/// Draw the name popup; the greeting updates while typing
pub fn draw_name_popup(f: &mut Frame, app: &App, size: Rect, palette: &Palette) {
    draw_input_popup(f, size, "Enter your name", &app.user_name, palette, 40, 3);
}

/// Draw the transient notification in the bottom-right corner
pub fn draw_toast(f: &mut Frame, toast: &Toast, size: Rect, palette: &Palette) {
    let width = TOAST_WIDTH.min(size.width);
    let height = TOAST_HEIGHT.min(size.height);
    let area = Rect::new(
        size.x + size.width - width,
        // Keep the help line visible
        (size.y + size.height).saturating_sub(height + 1),
        width,
        height,
    );

    f.render_widget(Clear, area);

    let toast_widget = Paragraph::new(toast.message.clone())
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(palette.success)
                .bg(palette.panel)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.success)),
        );

    f.render_widget(toast_widget, area);
}
