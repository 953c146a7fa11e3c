use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::centered_rect;
use crate::app::{App, ComposeField};

pub struct ComposeWidget;

impl ComposeWidget {
    /// New-memory form
    pub fn render(frame: &mut Frame, app: &App) {
        let Some(form) = app.compose.as_ref() else {
            return;
        };
        let theme = &app.theme;
        let popup_area = centered_rect(64, 18, frame.area());
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" New Memory ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.card));
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let mut lines = Vec::new();
        for field in ComposeField::ALL {
            let active = field == form.field && !form.uploading;
            let label_style = if active {
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.muted)
            };
            lines.push(Line::from(Span::styled(field.label(), label_style)));

            let mut value = vec![Span::styled(
                format!("  {}", form.value(field)),
                Style::default().fg(theme.text),
            )];
            if active {
                value.push(Span::styled("▏", Style::default().fg(theme.accent)));
            }
            lines.push(Line::from(value));
            lines.push(Line::from(""));
        }

        if form.uploading {
            lines.push(Line::from(Span::styled(
                "Uploading image...",
                Style::default().fg(theme.accent),
            )));
        } else if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.as_str(),
                Style::default().fg(theme.error),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Tab next field  Enter save  Esc cancel",
                Style::default().fg(theme.muted),
            )));
        }

        frame.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: false }),
            Rect::new(inner.x + 1, inner.y, inner.width.saturating_sub(2), inner.height),
        );
    }
}
