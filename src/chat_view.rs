// src/chat_view.rs

use crate::app::App;
use crate::conversation::{Conversation, Message, Sender};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
    Frame,
};
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

const HEADER_TITLE: &str = "🌙 LunarChat 💎";

pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(f.area());

    draw_header(f, chunks[0]);
    draw_messages(f, app, chunks[1]);

    app.status_indicator.update_spinner();
    app.status_indicator.render(f, chunks[2]);

    draw_input(f, app, chunks[3]);
}

fn draw_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(Span::styled(
        HEADER_TITLE,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(Block::default().style(Style::default().bg(Color::Black)));

    f.render_widget(header, area);
}

fn draw_messages(f: &mut Frame, app: &mut App, area: Rect) {
    let lines = conversation_lines(&app.conversation, area.width);

    // Newest messages sit at the bottom; the view sticks there until the
    // user scrolls away and re-sticks once scrolled back down.
    let total_lines = lines.len() as u16;
    let max_scroll = total_lines.saturating_sub(area.height);
    if app.stick_to_bottom || app.scroll >= max_scroll {
        app.scroll = max_scroll;
        app.stick_to_bottom = true;
    }

    let msgs_para = Paragraph::new(lines)
        .block(Block::default())
        .wrap(Wrap { trim: false });
    f.render_widget(msgs_para.scroll((app.scroll, 0)), area);
}

/// Renders the whole log as styled lines. Pure with respect to the
/// conversation: the same log always yields the same lines.
pub fn conversation_lines(conversation: &Conversation, width: u16) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for message in conversation.messages() {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.extend(bubble_lines(message, width));
    }
    lines
}

/// One bubble per message: user bubbles hug the right edge, bot bubbles the
/// left, capped at roughly 80% of the view width.
fn bubble_lines(message: &Message, width: u16) -> Vec<Line<'static>> {
    let style = match message.sender {
        Sender::User => Style::default().fg(Color::Rgb(0, 122, 255)),
        Sender::Bot => Style::default().fg(Color::Rgb(229, 229, 234)),
    };

    let wrap_width = ((width as usize) * 4 / 5).saturating_sub(2).max(8);
    let wrapped = wrap(&message.text, wrap_width);
    let content_width = wrapped.iter().map(|l| l.width()).max().unwrap_or(0);

    // "│ " prefix on every content row.
    let bubble_width = content_width + 2;
    let indent = match message.sender {
        Sender::User => " ".repeat((width as usize).saturating_sub(bubble_width)),
        Sender::Bot => String::new(),
    };

    let mut lines = Vec::with_capacity(wrapped.len() + 2);
    lines.push(Line::from(vec![
        Span::raw(indent.clone()),
        Span::styled("┌─", style),
    ]));
    for row in &wrapped {
        lines.push(Line::from(vec![
            Span::raw(indent.clone()),
            Span::styled("│ ", style),
            Span::styled(row.to_string(), style),
        ]));
    }
    lines.push(Line::from(vec![
        Span::raw(indent),
        Span::styled("╰─", style),
    ]));
    lines
}

fn draw_input(f: &mut Frame, app: &App, area: Rect) {
    let separator = "─".repeat(area.width as usize);
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            separator.clone(),
            Style::default().fg(Color::DarkGray),
        ))),
        Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height: 1,
        },
    );

    let prefix_style = if app.is_pending() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Yellow)
    };
    let input = Line::from(vec![
        Span::styled("→ ", prefix_style),
        Span::styled(app.input.clone(), Style::default().fg(Color::White)),
    ]);

    let visible_width = area.width.saturating_sub(2);
    let text_width = app.input.width() as u16;
    let scroll_offset = text_width.saturating_sub(visible_width);

    f.render_widget(
        Paragraph::new(input).scroll((0, scroll_offset)),
        Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: 1,
        },
    );

    // Mirrors the send control: while a fetch is pending the submit key is
    // dead and the corner shows the loading label instead of the hint.
    let hint_text = if app.is_pending() {
        " Loading... "
    } else {
        " Enter to send "
    };
    let hint = Paragraph::new(Line::from(Span::styled(
        hint_text,
        Style::default().fg(Color::DarkGray),
    )));
    let hint_width = hint_text.width() as u16;
    if area.width > hint_width {
        f.render_widget(
            hint,
            Rect {
                x: area.x + area.width - hint_width,
                y: area.y + 1,
                width: hint_width,
                height: 1,
            },
        );
    }

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            separator,
            Style::default().fg(Color::DarkGray),
        ))),
        Rect {
            x: area.x,
            y: area.y + 2,
            width: area.width,
            height: 1,
        },
    );

    let cursor_x = area.x + 2 + text_width - scroll_offset;
    f.set_cursor_position((cursor_x, area.y + 1));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn rendering_the_same_conversation_twice_is_identical() {
        let mut conversation = Conversation::new();
        conversation.push("hello there", Sender::User);
        conversation.push("Hello!", Sender::Bot);

        let first = conversation_lines(&conversation, 60);
        let second = conversation_lines(&conversation, 60);
        assert_eq!(first, second);
    }

    #[test]
    fn bot_bubbles_hug_the_left_edge() {
        let mut conversation = Conversation::new();
        conversation.push("a reply", Sender::Bot);

        let lines = conversation_lines(&conversation, 60);
        assert!(line_text(&lines[0]).starts_with('┌'));
        assert!(line_text(&lines[1]).starts_with('│'));
    }

    #[test]
    fn user_bubbles_are_pushed_to_the_right_edge() {
        let mut conversation = Conversation::new();
        conversation.push("hi", Sender::User);

        let lines = conversation_lines(&conversation, 60);
        let content = line_text(&lines[1]);
        assert!(content.starts_with(' '));
        assert_eq!(content.width(), 60);
        assert!(content.trim_start().starts_with('│'));
    }

    #[test]
    fn long_messages_wrap_inside_the_bubble() {
        let mut conversation = Conversation::new();
        conversation.push("word ".repeat(40).trim_end().to_string(), Sender::Bot);

        let lines = conversation_lines(&conversation, 40);
        assert!(lines.len() > 3, "expected multiple wrapped rows");
        for line in &lines {
            assert!(line_text(line).width() <= 40);
        }
    }

    #[test]
    fn messages_are_separated_by_blank_lines_in_order() {
        let mut conversation = Conversation::new();
        conversation.push("one", Sender::User);
        conversation.push("two", Sender::Bot);

        let lines = conversation_lines(&conversation, 60);
        let rendered: Vec<String> = lines.iter().map(line_text).collect();
        let one_at = rendered.iter().position(|l| l.contains("one")).unwrap();
        let two_at = rendered.iter().position(|l| l.contains("two")).unwrap();
        assert!(one_at < two_at);
        assert!(rendered.contains(&String::new()));
    }
}
