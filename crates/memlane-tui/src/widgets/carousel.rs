use memlane_core::carousel::CardLayout;
use memlane_core::config::{CardStyle, CarouselStyle};
use memlane_core::memory::Memory;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph},
    Frame,
};

use super::truncate_str;
use crate::app::App;
use crate::theme::Theme;

/// Layout units spanned by the full width of the carousel area
const VIEW_SPAN_X: f64 = 1400.0;
/// Layout units spanned by the full height of the carousel area
const VIEW_SPAN_Y: f64 = 900.0;
/// Cards fainter than this are not drawn
const MIN_VISIBLE_OPACITY: f64 = 0.05;
/// Blur above which a card only shows its picture
const TEXT_BLUR_LIMIT: f64 = 4.0;

pub struct CarouselWidget;

impl CarouselWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
        app.card_hits.clear();
        frame.render_widget(
            Block::default().style(Style::default().bg(app.theme.background)),
            area,
        );

        if app.store.is_empty() {
            let hint = Paragraph::new(Line::from(Span::styled(
                "No memories yet. Press 'a' to add one.",
                Style::default().fg(app.theme.muted),
            )))
            .alignment(Alignment::Center);
            frame.render_widget(hint, Rect::new(area.x, area.y + area.height / 2, area.width, 1));
            return;
        }

        let (base_width, base_height) = card_size(area, app.navigator.style());
        // Back to front
        for (index, layout) in app.navigator.layouts() {
            if layout.opacity < MIN_VISIBLE_OPACITY {
                continue;
            }
            let Some(memory) = app.store.get_index(index) else {
                continue;
            };

            let width = base_width as f64 * layout.scale;
            let height = base_height as f64 * layout.scale;
            let center_x =
                area.x as f64 + area.width as f64 / 2.0 + layout.offset_x / VIEW_SPAN_X * area.width as f64;
            let center_y =
                area.y as f64 + area.height as f64 / 2.0 + layout.offset_y / VIEW_SPAN_Y * area.height as f64;

            let Some(rect) = place_card(area, center_x, center_y, width, height) else {
                continue;
            };
            render_card(frame, rect, memory, &layout, app.card_style, &app.theme);
            app.card_hits.push((index, rect));
        }
    }
}

/// Unscaled card size for a style
fn card_size(area: Rect, style: CarouselStyle) -> (u16, u16) {
    match style {
        CarouselStyle::Stories => (
            area.width.saturating_sub(8).max(10),
            area.height.saturating_sub(2).max(5),
        ),
        _ => (
            (area.width / 4).clamp(14, 40),
            (area.height * 3 / 4).clamp(6, 22),
        ),
    }
}

/// Card rectangle centered on `(center_x, center_y)`, clipped to `area`.
/// `None` when nothing of it is visible.
fn place_card(area: Rect, center_x: f64, center_y: f64, width: f64, height: f64) -> Option<Rect> {
    let left = (center_x - width / 2.0).round();
    let top = (center_y - height / 2.0).round();
    let right = left + width.round();
    let bottom = top + height.round();

    let left = left.max(area.left() as f64);
    let top = top.max(area.top() as f64);
    let right = right.min(area.right() as f64);
    let bottom = bottom.min(area.bottom() as f64);
    if right - left < 3.0 || bottom - top < 2.0 {
        return None;
    }
    Some(Rect::new(
        left as u16,
        top as u16,
        (right - left) as u16,
        (bottom - top) as u16,
    ))
}

fn render_card(
    frame: &mut Frame,
    rect: Rect,
    memory: &Memory,
    layout: &CardLayout,
    card_style: CardStyle,
    theme: &Theme,
) {
    let opacity = layout.opacity;
    let surface = theme.fade(theme.card, opacity);
    let edge = if layout.is_focused() {
        theme.accent
    } else {
        theme.border
    };

    let block = match card_style {
        CardStyle::Polaroid => Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Thick)
            .border_style(Style::default().fg(theme.fade(edge, opacity)))
            .padding(Padding::horizontal(1)),
        CardStyle::Borderless => Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.fade(edge, opacity * 0.6))),
    }
    .style(Style::default().bg(surface));

    frame.render_widget(Clear, rect);
    let inner = block.inner(rect);
    frame.render_widget(block, rect);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let show_text = layout.blur < TEXT_BLUR_LIMIT && inner.height >= 3;
    let caption_height = match (show_text, card_style) {
        (false, _) => 0,
        (true, CardStyle::Polaroid) => 3.min(inner.height - 1),
        (true, CardStyle::Borderless) => 2.min(inner.height - 1),
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(caption_height)])
        .split(inner);

    render_photo(frame, chunks[0], memory, layout, theme);
    if caption_height > 0 {
        render_caption(frame, chunks[1], memory, opacity, theme);
    }
}

/// Shaded block standing in for the picture
fn render_photo(frame: &mut Frame, area: Rect, memory: &Memory, layout: &CardLayout, theme: &Theme) {
    let shade = if !memory.has_image() {
        ' '
    } else if layout.blur >= TEXT_BLUR_LIMIT {
        '░'
    } else if layout.is_focused() {
        '▓'
    } else {
        '▒'
    };
    let color = theme.fade(theme.accent, layout.opacity * 0.5);
    let row: String = std::iter::repeat(shade).take(area.width as usize).collect();
    let mut lines: Vec<Line> = (0..area.height)
        .map(|_| Line::from(Span::styled(row.clone(), Style::default().fg(color))))
        .collect();

    if let Some(chapter) = memory.chapter {
        if let Some(first) = lines.first_mut() {
            let label = format!(" {} ", chapter);
            *first = Line::from(vec![
                Span::styled(
                    label.clone(),
                    Style::default()
                        .fg(theme.fade(theme.title, layout.opacity))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    row.chars().skip(label.len()).collect::<String>(),
                    Style::default().fg(color),
                ),
            ]);
        }
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_caption(frame: &mut Frame, area: Rect, memory: &Memory, opacity: f64, theme: &Theme) {
    let width = area.width as usize;
    let lines = vec![
        Line::from(Span::styled(
            truncate_str(&memory.title, width),
            Style::default()
                .fg(theme.fade(theme.text, opacity))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            truncate_str(&memory.long_date(), width),
            Style::default().fg(theme.fade(theme.muted, opacity)),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}
