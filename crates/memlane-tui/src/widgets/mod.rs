mod carousel;
mod compose;
mod detail;
mod hero;
mod info_panel;
mod popup;
mod status_bar;

pub use carousel::CarouselWidget;
pub use compose::ComposeWidget;
pub use detail::DetailWidget;
pub use hero::HeroWidget;
pub use info_panel::InfoPanelWidget;
pub use popup::PopupWidget;
pub use status_bar::StatusBarWidget;

use ratatui::layout::Rect;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Helper function to create a centered rect
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

/// Truncate a string to a display width, ending in an ellipsis when cut
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut width = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w + 1 > max_width {
            break;
        }
        out.push(c);
        width += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(10, 5, 40, 10);
        assert_eq!(centered_rect(20, 4, area), Rect::new(20, 8, 20, 4));
        assert_eq!(centered_rect(100, 100, area), area);
    }

    #[test]
    fn test_truncate_str_by_width() {
        assert_eq!(truncate_str("Golden Hour", 20), "Golden Hour");
        assert_eq!(truncate_str("Golden Hour", 7), "Golden…");
        assert_eq!(truncate_str("日本の思い出", 5), "日本…");
        assert_eq!(truncate_str("abc", 0), "");
    }
}
