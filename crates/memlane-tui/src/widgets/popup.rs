use memlane_core::config::KeymapConfig;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::{centered_rect, truncate_str};
use crate::theme::Theme;

pub struct PopupWidget;

impl PopupWidget {
    /// Render a confirmation popup dialog
    pub fn render_confirm(frame: &mut Frame, title: &str, message: &str, theme: &Theme) {
        let area = frame.area();

        let popup_width = 50u16.min(area.width.saturating_sub(4));
        let popup_height = 7u16.min(area.height.saturating_sub(2));
        let popup_area = centered_rect(popup_width, popup_height, area);

        // Clear the background area
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(format!(" {} ", title))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.error))
            .style(Style::default().bg(theme.card));

        let inner_area = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Message
                Constraint::Length(1), // Spacer
                Constraint::Length(1), // Hint
            ])
            .split(inner_area);

        let message_paragraph = Paragraph::new(Line::from(vec![Span::styled(
            message,
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )]))
        .alignment(Alignment::Center);
        frame.render_widget(message_paragraph, chunks[0]);

        let hint_paragraph = Paragraph::new(Line::from(vec![
            Span::styled("[", Style::default().fg(theme.muted)),
            Span::styled(
                "y",
                Style::default().fg(theme.success).add_modifier(Modifier::BOLD),
            ),
            Span::styled("]es  [", Style::default().fg(theme.muted)),
            Span::styled(
                "n",
                Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
            ),
            Span::styled("]o", Style::default().fg(theme.muted)),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(hint_paragraph, chunks[2]);
    }

    /// Render a delete confirmation popup for one memory
    pub fn render_delete_confirm(frame: &mut Frame, title: &str, theme: &Theme) {
        let message = format!("Delete memory \"{}\"?", truncate_str(title, 30));
        Self::render_confirm(frame, "Confirm Delete", &message, theme);
    }

    /// Key reference built from the active keymap
    pub fn render_help(frame: &mut Frame, keymap: &KeymapConfig, theme: &Theme) {
        let rows: [(&str, String); 17] = [
            ("Next / previous memory", format!("{} / {}  or  ← →", keymap.next, keymap.prev)),
            ("Scroll like the wheel", "↑ ↓".to_string()),
            ("Jump to chapter", "1-9  Home  End".to_string()),
            ("Open memory / begin", keymap.open_detail.clone()),
            ("Add a memory", keymap.compose.clone()),
            ("Toggle autoplay", keymap.toggle_autoplay.clone()),
            ("Cycle carousel style", keymap.cycle_style.clone()),
            ("Cycle theme", keymap.cycle_theme.clone()),
            ("Polaroid / borderless", keymap.toggle_card_style.clone()),
            ("Back to cover", keymap.show_hero.clone()),
            ("Export memory", keymap.export.clone()),
            ("Share memory", keymap.share.clone()),
            ("Open image", keymap.open_image.clone()),
            ("Delete memory", keymap.delete.clone()),
            ("Mouse", "wheel scrolls, click selects".to_string()),
            ("Help", keymap.help.clone()),
            ("Quit", keymap.quit.clone()),
        ];

        let area = frame.area();
        let popup_area = centered_rect(56, rows.len() as u16 + 4, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.card));

        let mut lines: Vec<Line> = rows
            .iter()
            .map(|(what, keys)| {
                Line::from(vec![
                    Span::styled(format!(" {:<24}", what), Style::default().fg(theme.text)),
                    Span::styled(
                        keys.clone(),
                        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
                    ),
                ])
            })
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            " press any key to close",
            Style::default().fg(theme.muted),
        )));

        frame.render_widget(Paragraph::new(lines).block(block), popup_area);
    }
}
