use memlane_core::carousel::Mode as ViewMode;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::truncate_str;
use crate::app::{App, Mode};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let mode_str = match &app.mode {
            Mode::Normal => match app.view_mode() {
                ViewMode::Hero => "COVER",
                ViewMode::Carousel => "LANE",
            },
            Mode::Detail => "MEMORY",
            Mode::Compose => "NEW",
            Mode::DeleteConfirm(_) => "DELETE?",
            Mode::Help => "HELP",
        };

        let autoplay = if app.navigator.autoplay_enabled() {
            " | ▶ autoplay"
        } else {
            ""
        };
        let position = if app.store.is_empty() {
            "0/0".to_string()
        } else {
            format!("{}/{}", app.navigator.focused_index() + 1, app.store.len())
        };

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else {
            format!(
                " {} | {} | {} | {}{}",
                mode_str,
                app.navigator.style().name(),
                app.theme.name,
                position,
                autoplay
            )
        };

        let help_hint = format!(" {}:quit {}:help ", app.config.keymap.quit, app.config.keymap.help);
        let width = area.width as usize;
        let status_text = truncate_str(&status_text, width.saturating_sub(help_hint.width()));
        let padding_len = width.saturating_sub(status_text.width() + help_hint.width());

        let bar = Style::default().fg(theme.text).bg(theme.border);
        let line = Line::from(vec![
            Span::styled(status_text, bar),
            Span::styled(" ".repeat(padding_len), bar),
            Span::styled(help_hint, Style::default().fg(theme.muted).bg(theme.border)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
