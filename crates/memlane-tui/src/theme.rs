use ratatui::style::Color;

/// Runtime theme with configurable colors
#[derive(Debug, Clone)]
pub struct Theme {
    /// Theme identifier as written in the config
    pub name: &'static str,

    // Surfaces
    pub background: Color,
    pub card: Color,
    pub border: Color,

    // Text
    pub title: Color,
    pub text: Color,
    pub muted: Color,

    // Semantic colors
    pub accent: Color,
    pub error: Color,
    pub success: Color,
}

impl Default for Theme {
    fn default() -> Self {
        crate::themes::minimal::default()
    }
}

impl Theme {
    /// Color a card is painted with at the given opacity, blended toward
    /// the page background
    pub fn fade(&self, color: Color, opacity: f64) -> Color {
        blend(self.background, color, opacity)
    }
}

/// Linear mix of two RGB colors; `t = 0` is `from`, `t = 1` is `to`.
/// Non-RGB colors snap at the halfway point.
pub fn blend(from: Color, to: Color, t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    match (from, to) {
        (Color::Rgb(r0, g0, b0), Color::Rgb(r1, g1, b1)) => {
            let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
            Color::Rgb(mix(r0, r1), mix(g0, g1), mix(b0, b1))
        }
        _ if t < 0.5 => from,
        _ => to,
    }
}
