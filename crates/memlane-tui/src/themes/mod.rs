//! Theme registry and loader
//!
//! Six built-in themes with user color overrides.

mod gradient_wave;
pub(crate) mod minimal;
mod neobrutalism;
mod parallax;
mod perplexity;
mod stage_lights;

use memlane_core::config::{ThemeColorOverrides, ThemeConfig};
use ratatui::style::Color;
use tracing::warn;

use crate::theme::Theme;

/// Parse a hex color string into a ratatui Color
/// Accepts formats: "#RRGGBB", "RRGGBB", "#RGB", "RGB"
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }

    match hex.len() {
        // Short form: RGB -> RRGGBB
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

/// Built-in theme by name, without overrides
fn base_theme(name: &str) -> Option<Theme> {
    let theme = match name.to_lowercase().as_str() {
        "perplexity" => perplexity::default(),
        "neobrutalism" => neobrutalism::default(),
        "gradient-wave" | "gradientwave" => gradient_wave::default(),
        "stage-lights" | "stagelights" => stage_lights::default(),
        "parallax" => parallax::default(),
        "minimal" => minimal::default(),
        _ => return None,
    };
    Some(theme)
}

/// Load a theme by name from config
pub fn load_theme(config: &ThemeConfig) -> Theme {
    let base = base_theme(&config.name).unwrap_or_else(|| {
        warn!("Unknown theme '{}', falling back to minimal", config.name);
        minimal::default()
    });

    apply_overrides(base, &config.colors)
}

/// The theme after `current` in [`available_themes`] order
pub fn next_theme(current: &str) -> Theme {
    let names = available_themes();
    let position = names.iter().position(|n| *n == current).unwrap_or(0);
    let next = names[(position + 1) % names.len()];
    base_theme(next).unwrap_or_default()
}

/// Apply user color overrides to a base theme
fn apply_overrides(mut theme: Theme, overrides: &ThemeColorOverrides) -> Theme {
    let slots = [
        (&overrides.background, &mut theme.background),
        (&overrides.card, &mut theme.card),
        (&overrides.border, &mut theme.border),
        (&overrides.title, &mut theme.title),
        (&overrides.text, &mut theme.text),
        (&overrides.accent, &mut theme.accent),
        (&overrides.muted, &mut theme.muted),
    ];
    for (hex, slot) in slots {
        if let Some(color) = hex.as_deref().and_then(parse_hex_color) {
            *slot = color;
        }
    }

    theme
}

/// Get list of available theme names
pub fn available_themes() -> Vec<&'static str> {
    vec![
        "minimal",
        "perplexity",
        "neobrutalism",
        "gradient-wave",
        "stage-lights",
        "parallax",
    ]
}
