//! Stage Lights theme
//! Black stage, gold spotlight

use ratatui::style::Color;
use crate::theme::Theme;

pub fn default() -> Theme {
    Theme {
        name: "stage-lights",
        background: Color::Rgb(0x00, 0x00, 0x00),
        card: Color::Rgb(0x1a, 0x1a, 0x1a),
        border: Color::Rgb(0x33, 0x33, 0x33),
        title: Color::Rgb(0xff, 0xff, 0xff),
        text: Color::Rgb(0xe6, 0xe6, 0xe6),
        muted: Color::Rgb(0x80, 0x80, 0x80),
        accent: Color::Rgb(0xff, 0xd7, 0x00),
        error: Color::Rgb(0xe9, 0x45, 0x60),
        success: Color::Rgb(0x5c, 0xff, 0x8f),
    }
}
