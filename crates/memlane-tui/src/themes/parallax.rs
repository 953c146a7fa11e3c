//! Parallax theme
//! Night-sky layers

use ratatui::style::Color;
use crate::theme::Theme;

pub fn default() -> Theme {
    Theme {
        name: "parallax",
        background: Color::Rgb(0x1a, 0x1a, 0x2e),
        card: Color::Rgb(0x16, 0x21, 0x3e),
        border: Color::Rgb(0x0f, 0x34, 0x60),
        title: Color::Rgb(0xff, 0xff, 0xff),
        text: Color::Rgb(0xcc, 0xcc, 0xcc),
        muted: Color::Rgb(0x6b, 0x6b, 0x85),
        accent: Color::Rgb(0xe9, 0x45, 0x60),
        error: Color::Rgb(0xe9, 0x45, 0x60),
        success: Color::Rgb(0x4e, 0xcd, 0xc4),
    }
}
