use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::{centered_rect, truncate_str};
use crate::app::App;

pub struct DetailWidget;

impl DetailWidget {
    /// Modal with the whole focused memory and its actions
    pub fn render(frame: &mut Frame, app: &App) {
        let Some(memory) = app.current_memory() else {
            return;
        };
        let theme = &app.theme;
        let area = frame.area();
        let popup_area = centered_rect(
            (area.width * 7 / 10).max(40),
            (area.height * 7 / 10).max(12),
            area,
        );
        frame.render_widget(Clear, popup_area);

        let title = match memory.chapter {
            Some(chapter) => format!(" Chapter {} ", chapter),
            None => " Memory ".to_string(),
        };
        let block = Block::default()
            .title(title)
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.card));
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Title + date
                Constraint::Min(1),    // Story
                Constraint::Length(1), // Image reference
                Constraint::Length(1), // Hint
            ])
            .split(inner);

        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                memory.title.as_str(),
                Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(memory.long_date(), Style::default().fg(theme.muted))),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(header, chunks[0]);

        let story = if memory.story.is_empty() {
            Span::styled("(no story)", Style::default().fg(theme.muted))
        } else {
            Span::styled(memory.story.as_str(), Style::default().fg(theme.text))
        };
        frame.render_widget(
            Paragraph::new(Line::from(story)).wrap(Wrap { trim: true }),
            chunks[1],
        );

        let image = if let Some(url) = memory.image_url() {
            truncate_str(url.as_str(), chunks[2].width as usize)
        } else if memory.image_is_embedded() {
            format!("embedded image ({} KB)", memory.image.len() * 3 / 4 / 1024)
        } else {
            "no image".to_string()
        };
        frame.render_widget(
            Paragraph::new(Span::styled(image, Style::default().fg(theme.muted))),
            chunks[2],
        );

        let keymap = &app.config.keymap;
        let hint = format!(
            "{} export  {} share  {} open image  {} delete  {}/{} prev/next  Esc close",
            keymap.export, keymap.share, keymap.open_image, keymap.delete, keymap.prev, keymap.next
        );
        frame.render_widget(
            Paragraph::new(Span::styled(hint, Style::default().fg(theme.muted)))
                .alignment(Alignment::Center),
            chunks[3],
        );
    }
}
