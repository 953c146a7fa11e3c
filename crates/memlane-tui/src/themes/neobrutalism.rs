//! Neobrutalism theme
//! Flat red page, white slabs, heavy black borders

use ratatui::style::Color;
use crate::theme::Theme;

pub fn default() -> Theme {
    Theme {
        name: "neobrutalism",
        background: Color::Rgb(0xff, 0x5c, 0x5c),
        card: Color::Rgb(0xff, 0xff, 0xff),
        border: Color::Rgb(0x00, 0x00, 0x00),
        title: Color::Rgb(0xff, 0xff, 0xff),
        text: Color::Rgb(0x00, 0x00, 0x00),
        muted: Color::Rgb(0x33, 0x33, 0x33),
        accent: Color::Rgb(0xff, 0xe1, 0x56),
        error: Color::Rgb(0x00, 0x00, 0x00),
        success: Color::Rgb(0x5c, 0xff, 0x8f),
    }
}
