pub mod components;
pub mod page;
pub mod views;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::models::MessageLevel;
use crate::state::AppState;
use crate::strings::layout;
use crate::ui::page::{Target, page_offset};

const CONSOLE_LINES: usize = 3;
const MAX_MESSAGE_LINES: usize = 3;

pub fn draw(frame: &mut Frame, state: &AppState) {
    let message_rows = state.messages.len().min(MAX_MESSAGE_LINES) as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(message_rows),
            Constraint::Min(3),
            Constraint::Length(CONSOLE_LINES as u16 + 2),
            Constraint::Length(2),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_line(state)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    if message_rows > 0 {
        frame.render_widget(Paragraph::new(message_lines(state)), chunks[1]);
    }

    render_body(frame, chunks[2], state);
    render_console(frame, chunks[3], state);

    let footer = Paragraph::new(footer_line(state)).block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[4]);

    if state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_line(state: &AppState) -> Line<'static> {
    let mut spans = vec![Span::styled(
        format!(" {} ", layout::APP_NAME),
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];
    let title = state
        .rendered
        .as_ref()
        .and_then(|r| r.title.clone())
        .unwrap_or_else(|| state.current_path.clone());
    spans.push(Span::styled(format!("  {title}"), Style::default().fg(Color::White)));

    let user = state
        .viewer
        .as_ref()
        .filter(|v| v.is_authenticated)
        .and_then(|v| v.current_user.as_ref());
    match user {
        Some(user) => {
            spans.push(Span::styled(
                format!("  |  {} · {} pts", user.username, user.score),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(
                format!("  [o] {}", layout::LOGOUT_BUTTON_TEXT),
                Style::default().fg(Color::DarkGray),
            ));
        }
        None => spans.push(Span::styled(
            format!("  |  [l] {}", layout::LOGIN_BUTTON_TEXT),
            Style::default().fg(Color::DarkGray),
        )),
    }

    if let Some(path) = &state.loading {
        spans.push(Span::styled(
            format!("  {} {path}…", layout::LOADING),
            Style::default().fg(Color::Yellow),
        ));
    }
    if state.offline {
        spans.push(Span::styled(
            format!("  [{}]", layout::OFFLINE_BADGE),
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        ));
    }
    Line::from(spans)
}

fn message_lines(state: &AppState) -> Vec<Line<'static>> {
    state
        .messages
        .iter()
        .take(MAX_MESSAGE_LINES)
        .map(|msg| {
            let color = match msg.level {
                MessageLevel::Success => Color::Green,
                MessageLevel::Warning => Color::Yellow,
                MessageLevel::Error => Color::Red,
                MessageLevel::Debug => Color::DarkGray,
                MessageLevel::Info => Color::Cyan,
            };
            Line::from(Span::styled(
                format!(" ● {}", msg.text),
                Style::default().fg(color),
            ))
        })
        .collect()
}

fn render_body(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut page = state.page();
    let focus_line = page.line_of(state.focus);
    if let Some(line_idx) = focus_line {
        let typed = state.focused_widget().is_some_and(|w| w.is_typed());
        if let Some(line) = page.lines.get_mut(line_idx) {
            let highlighted = std::mem::take(line).patch_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            );
            *line = highlighted;
            if typed && matches!(state.focused_target(), Some(Target::Field(_))) {
                line.spans.push(Span::styled("▏", Style::default().fg(Color::Yellow)));
            }
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", state.current_path));
    let inner_height = block.inner(area).height as usize;
    let offset = page_offset(page.lines.len(), inner_height, focus_line, state.scroll);
    let body = Paragraph::new(page.lines)
        .block(block)
        .scroll((offset as u16, 0));
    frame.render_widget(body, area);
}

fn render_console(frame: &mut Frame, area: Rect, state: &AppState) {
    let skip = state.logs.len().saturating_sub(CONSOLE_LINES);
    let lines: Vec<Line> = state
        .logs
        .iter()
        .skip(skip)
        .map(|log| {
            let style = if log.starts_with("[WARN]") {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Line::from(Span::styled(log.clone(), style))
        })
        .collect();
    let console = Paragraph::new(lines)
        .block(Block::default().title("Console").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(console, area);
}

fn footer_line(state: &AppState) -> Line<'static> {
    let keys = if state.focused_widget().is_some() {
        "Tab Next | Shift-Tab Prev | ←/→ Choice | Space Toggle | Enter Next/Submit | Esc Back | ? Help"
    } else {
        "j/k Move | Enter Open | b Back | h Home | r Reload | PgUp/PgDn Scroll | ? Help | q Quit"
    };
    Line::from(vec![
        Span::raw(format!("{keys}  ")),
        Span::styled(layout::FOOTER_TEXT, Style::default().fg(Color::DarkGray)),
    ])
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Matchday - Help",
        "",
        "Navigation:",
        "  Tab / j / ↓      Next link or field",
        "  Shift-Tab / k / ↑  Previous link or field",
        "  Enter            Open link / submit form",
        "  b / Esc          Back",
        "  h                Home",
        "  r                Reload page",
        "  PgUp / PgDn      Scroll",
        "",
        "Account:",
        "  l                Log in",
        "  o                Log out",
        "",
        "Forms:",
        "  type             Edit focused field",
        "  ← / →            Change choice",
        "  Space            Toggle checkbox",
        "",
        "  ?                Toggle help",
        "  q / Ctrl-C       Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
