//! Gradient Wave theme

use ratatui::style::Color;
use crate::theme::Theme;

pub fn default() -> Theme {
    Theme {
        name: "gradient-wave",
        background: Color::Rgb(0x0d, 0x24, 0x38),
        card: Color::Rgb(0x1e, 0x36, 0x49),
        border: Color::Rgb(0x3a, 0x4f, 0x60),
        title: Color::Rgb(0xff, 0xff, 0xff),
        text: Color::Rgb(0xdb, 0xdf, 0xe2),
        muted: Color::Rgb(0x2c, 0x5f, 0x7a),
        accent: Color::Rgb(0x4a, 0x9e, 0xff),
        error: Color::Rgb(0xc9, 0x4b, 0x4b),
        success: Color::Rgb(0x4e, 0xcd, 0xc4),
    }
}
