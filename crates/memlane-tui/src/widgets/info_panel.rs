use memlane_core::config::CarouselStyle;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::theme::Theme;

pub struct InfoPanelWidget;

impl InfoPanelWidget {
    /// Title, date and story of the focused memory
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(theme.border))
            .style(Style::default().bg(theme.background));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(memory) = app.current_memory() else {
            return;
        };

        let show_progress =
            app.navigator.style() == CarouselStyle::Stories || app.navigator.autoplay_enabled();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(if show_progress { 1 } else { 0 }),
                Constraint::Min(0),
            ])
            .split(inner);

        if show_progress {
            let line = progress_line(
                app.store.len(),
                app.navigator.focused_index(),
                app.navigator.engine().autoplay_progress(),
                chunks[0].width as usize,
                theme,
            );
            frame.render_widget(Paragraph::new(line), chunks[0]);
        }

        let mut heading = vec![Span::styled(
            memory.title.as_str(),
            Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
        )];
        if let Some(chapter) = memory.chapter {
            heading.push(Span::styled(
                format!("  Chapter {}", chapter),
                Style::default().fg(theme.accent),
            ));
        }
        let text = vec![
            Line::from(heading),
            Line::from(Span::styled(memory.long_date(), Style::default().fg(theme.muted))),
            Line::from(""),
            Line::from(Span::styled(memory.story.as_str(), Style::default().fg(theme.text))),
        ];
        let paragraph = Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, chunks[1]);
    }
}

/// One segment per memory: past ones full, the focused one filled by
/// `progress`, later ones empty
fn progress_line(count: usize, focused: usize, progress: f64, width: usize, theme: &Theme) -> Line<'static> {
    if count == 0 || width < count * 2 {
        return Line::from("");
    }
    let segment = (width - (count - 1)) / count;
    let mut spans = Vec::with_capacity(count * 2);
    for i in 0..count {
        let filled = match i.cmp(&focused) {
            std::cmp::Ordering::Less => segment,
            std::cmp::Ordering::Equal => (segment as f64 * progress.clamp(0.0, 1.0)).round() as usize,
            std::cmp::Ordering::Greater => 0,
        };
        spans.push(Span::styled("━".repeat(filled), Style::default().fg(theme.accent)));
        spans.push(Span::styled(
            "━".repeat(segment - filled),
            Style::default().fg(theme.border),
        ));
        if i + 1 < count {
            spans.push(Span::raw(" "));
        }
    }
    Line::from(spans)
}
