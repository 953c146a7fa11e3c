use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::app::App;

pub struct HeroWidget;

impl HeroWidget {
    /// Cover view: the lane title and the first memory as a teaser
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        frame.render_widget(Block::default().style(Style::default().bg(theme.background)), area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(30),
                Constraint::Length(3), // Title
                Constraint::Length(1), // Spacer
                Constraint::Length(3), // First memory
                Constraint::Min(0),
                Constraint::Length(1), // Hint
            ])
            .split(area);

        let title = Paragraph::new(vec![
            Line::from(Span::styled(
                "M E M O R Y   L A N E",
                Style::default()
                    .fg(theme.title)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!("{} memories", app.store.len()),
                Style::default().fg(theme.muted),
            )),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(title, chunks[1]);

        if let Some(first) = app.store.get_index(0) {
            let teaser = Paragraph::new(vec![
                Line::from(Span::styled(
                    first.title.as_str(),
                    Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(first.long_date(), Style::default().fg(theme.text))),
            ])
            .alignment(Alignment::Center);
            frame.render_widget(teaser, chunks[3]);
        }

        let hint = Paragraph::new(Line::from(Span::styled(
            "scroll down, click or press Enter to begin",
            Style::default().fg(theme.muted),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(hint, chunks[5]);
    }
}
