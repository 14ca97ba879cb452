use ratatui::layout::{Alignment, Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Paragraph, Wrap};
use ratatui::Frame;

use crate::domain::MAX_PROMPT_LENGTH;

use super::app::{App, QueryState};

pub const PROMPT_LABEL: &str =
    "Ask ScapeGPT anything! Enter text and press Shift+Enter to submit:";
const HELP_LINE: &str = "Shift+Enter / Alt+Enter submit | Enter newline | Ctrl+U clear | Esc quit";
const CURSOR_MARK: char = '▏';
const BRAND_ORANGE: Color = Color::Rgb(220, 138, 0);

pub fn render(frame: &mut Frame, app: &App) {
    let [label_area, input_area, counter_area, response_area, help_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(8),
        Constraint::Length(1),
        Constraint::Min(5),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    frame.render_widget(
        Paragraph::new(PROMPT_LABEL).wrap(Wrap { trim: true }),
        label_area,
    );

    let input = Paragraph::new(with_cursor(app.surface().current_text(), app.cursor()))
        .wrap(Wrap { trim: false })
        .block(Block::bordered().border_style(Style::new().fg(BRAND_ORANGE)));
    frame.render_widget(input, input_area);

    let counter_style = if app.surface().remaining() == 0 {
        Style::new().fg(Color::Red)
    } else {
        Style::new().fg(Color::DarkGray)
    };
    frame.render_widget(
        Paragraph::new(format!("{}/{}", app.surface().len_utf16(), MAX_PROMPT_LENGTH))
            .alignment(Alignment::Right)
            .style(counter_style),
        counter_area,
    );

    let title = match app.state() {
        QueryState::Idle => " Response ",
        QueryState::InFlight => " Response (waiting) ",
    };
    let response = Paragraph::new(app.response())
        .wrap(Wrap { trim: false })
        .block(Block::bordered().title(title));
    frame.render_widget(response, response_area);

    frame.render_widget(
        Paragraph::new(HELP_LINE).style(Style::new().add_modifier(Modifier::DIM)),
        help_area,
    );
}

fn with_cursor(text: &str, cursor: usize) -> String {
    let mut out = String::with_capacity(text.len() + CURSOR_MARK.len_utf8());
    let mut placed = false;
    for (i, c) in text.chars().enumerate() {
        if i == cursor {
            out.push(CURSOR_MARK);
            placed = true;
        }
        out.push(c);
    }
    if !placed {
        out.push(CURSOR_MARK);
    }
    out
}
