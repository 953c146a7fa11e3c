//! Perplexity theme
//! Cinematic dark blue with floating memories

use ratatui::style::Color;
use crate::theme::Theme;

pub fn default() -> Theme {
    Theme {
        name: "perplexity",
        background: Color::Rgb(0x12, 0x2a, 0x3a),
        card: Color::Rgb(0x1f, 0x35, 0x44),
        border: Color::Rgb(0x2f, 0x45, 0x53),
        title: Color::Rgb(0xff, 0xff, 0xff),
        text: Color::Rgb(0xe7, 0xea, 0xeb),
        muted: Color::Rgb(0x8a, 0x9b, 0xa6),
        accent: Color::Rgb(0x4a, 0x9e, 0xff),
        error: Color::Rgb(0xff, 0x6b, 0x6b),
        success: Color::Rgb(0x5c, 0xff, 0x8f),
    }
}
