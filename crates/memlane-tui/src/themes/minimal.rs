//! Minimal theme
//! White page, hairline borders, system blue

use ratatui::style::Color;
use crate::theme::Theme;

pub fn default() -> Theme {
    Theme {
        name: "minimal",
        background: Color::Rgb(0xff, 0xff, 0xff),
        card: Color::Rgb(0xf5, 0xf5, 0xf5),
        border: Color::Rgb(0xe6, 0xe6, 0xe6),
        title: Color::Rgb(0x00, 0x00, 0x00),
        text: Color::Rgb(0x33, 0x33, 0x33),
        muted: Color::Rgb(0x8e, 0x8e, 0x93),
        accent: Color::Rgb(0x00, 0x7a, 0xff),
        error: Color::Rgb(0xff, 0x3b, 0x30),
        success: Color::Rgb(0x34, 0xc7, 0x59),
    }
}
