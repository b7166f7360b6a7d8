use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Link(String),
    Field(usize),
    Submit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Focusable {
    pub target: Target,
    pub line: usize,
}

/// A view rendered as styled lines plus the targets the user can focus.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub lines: Vec<Line<'static>>,
    pub focusables: Vec<Focusable>,
}

pub fn muted() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn accent() -> Style {
    Style::default().fg(Color::Cyan)
}

pub fn error() -> Style {
    Style::default().fg(Color::Red)
}

pub fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: Line<'static>) {
        self.lines.push(line);
    }

    pub fn text(&mut self, text: impl Into<String>) {
        self.lines.push(Line::from(text.into()));
    }

    pub fn styled(&mut self, text: impl Into<String>, style: Style) {
        self.lines.push(Line::from(Span::styled(text.into(), style)));
    }

    pub fn muted(&mut self, text: impl Into<String>) {
        self.styled(format!("  {}", text.into()), muted());
    }

    pub fn blank(&mut self) {
        self.lines.push(Line::default());
    }

    /// Card heading: bold title over a rule.
    pub fn card(&mut self, title: &str) {
        if !self.lines.is_empty() {
            self.blank();
        }
        self.styled(title.to_string(), bold().fg(Color::White));
        self.rule();
    }

    pub fn rule(&mut self) {
        self.styled("─".repeat(48), muted());
    }

    pub fn focusable(&mut self, target: Target, line: Line<'static>) {
        self.focusables.push(Focusable {
            target,
            line: self.lines.len(),
        });
        self.lines.push(line);
    }

    pub fn link(&mut self, href: impl Into<String>, line: Line<'static>) {
        self.focusable(Target::Link(href.into()), line);
    }

    pub fn line_of(&self, focus: usize) -> Option<usize> {
        self.focusables.get(focus).map(|f| f.line)
    }

    pub fn target(&self, focus: usize) -> Option<&Target> {
        self.focusables.get(focus).map(|f| &f.target)
    }

    pub fn plain_lines(&self) -> Vec<String> {
        self.lines.iter().map(line_text).collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line_text(line).contains(needle))
    }
}

pub fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}

/// Top line of the viewport: keep the focused line near the middle, or use
/// the manual scroll when nothing is focusable.
pub fn page_offset(total: usize, height: usize, focus_line: Option<usize>, manual: usize) -> usize {
    if height == 0 || total <= height {
        return 0;
    }
    let max_start = total - height;
    match focus_line {
        Some(line) => line.saturating_sub(height / 2).min(max_start),
        None => manual.min(max_start),
    }
}
