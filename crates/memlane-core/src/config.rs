use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable that overrides `upload.imgbb_api_key`
pub const IMGBB_KEY_ENV: &str = "MEMLANE_IMGBB_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub autoplay: AutoplayConfig,
    #[serde(default)]
    pub hero: HeroConfig,
    #[serde(default)]
    pub carousel: CarouselOverrides,
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (exports and log file live here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Presentation style of the carousel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CarouselStyle {
    /// Cards placed on a rotating ring
    #[default]
    Orbit,
    /// Cards laid out on a horizontal line with a spring-driven position
    Timeline,
    /// Cards piled on top of each other, top card focused
    Stack,
    /// One full-screen card at a time
    Stories,
    /// Horizontal strip of cards with a decaying scroll
    Flow,
}

impl CarouselStyle {
    pub const ALL: [CarouselStyle; 5] = [
        CarouselStyle::Orbit,
        CarouselStyle::Timeline,
        CarouselStyle::Stack,
        CarouselStyle::Stories,
        CarouselStyle::Flow,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CarouselStyle::Orbit => "orbit",
            CarouselStyle::Timeline => "timeline",
            CarouselStyle::Stack => "stack",
            CarouselStyle::Stories => "stories",
            CarouselStyle::Flow => "flow",
        }
    }

    /// Next style in display order, wrapping around
    pub fn next(&self) -> Self {
        let i = Self::ALL.iter().position(|s| s == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

impl std::str::FromStr for CarouselStyle {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|style| style.name() == s.trim().to_lowercase())
            .ok_or_else(|| crate::Error::Config(format!("unknown carousel style '{}'", s)))
    }
}

/// Card frame drawn around each photo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardStyle {
    Polaroid,
    #[default]
    Borderless,
}

impl CardStyle {
    pub fn toggle(&self) -> Self {
        match self {
            CardStyle::Polaroid => CardStyle::Borderless,
            CardStyle::Borderless => CardStyle::Polaroid,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds (one animation frame)
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Initial carousel presentation style
    #[serde(default)]
    pub carousel_style: CarouselStyle,
    /// Card frame style
    #[serde(default)]
    pub card_style: CardStyle,
    /// Theme configuration
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            carousel_style: CarouselStyle::default(),
            card_style: CardStyle::default(),
            theme: ThemeConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoplayConfig {
    /// Start with autoplay on
    #[serde(default)]
    pub enabled: bool,
    /// Time each memory stays in focus
    #[serde(default = "default_autoplay_duration")]
    pub duration_ms: u64,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            duration_ms: default_autoplay_duration(),
        }
    }
}

impl AutoplayConfig {
    pub const MIN_DURATION_MS: u64 = 3000;
    pub const MAX_DURATION_MS: u64 = 12000;

    /// Configured duration clamped to the supported range
    pub fn effective_duration_ms(&self) -> u64 {
        self.duration_ms
            .clamp(Self::MIN_DURATION_MS, Self::MAX_DURATION_MS)
    }
}

/// Cover view <-> carousel transition settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroConfig {
    /// Start on the cover view
    #[serde(default = "default_true")]
    pub start_in_hero: bool,
    /// Forward input magnitude that leaves the cover view
    #[serde(default = "default_hero_threshold")]
    pub enter_threshold: f64,
    /// Backward input magnitude at the first memory that returns to it
    #[serde(default = "default_hero_threshold")]
    pub exit_threshold: f64,
    #[serde(default = "default_enter_delay")]
    pub enter_delay_ms: u64,
    #[serde(default = "default_enter_cooldown")]
    pub enter_cooldown_ms: u64,
    #[serde(default = "default_exit_delay")]
    pub exit_delay_ms: u64,
    #[serde(default = "default_exit_cooldown")]
    pub exit_cooldown_ms: u64,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            start_in_hero: default_true(),
            enter_threshold: default_hero_threshold(),
            exit_threshold: default_hero_threshold(),
            enter_delay_ms: default_enter_delay(),
            enter_cooldown_ms: default_enter_cooldown(),
            exit_delay_ms: default_exit_delay(),
            exit_cooldown_ms: default_exit_cooldown(),
        }
    }
}

/// How the display position follows the target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Smoothing {
    /// `display += (target - display) * factor` per 60fps frame; snaps once
    /// within `epsilon`
    Decay { factor: f64, epsilon: f64 },
    /// Mass-spring-damper integration
    Spring {
        stiffness: f64,
        damping: f64,
        mass: f64,
    },
}

/// How continuous (wheel) input is turned into motion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum InputMode {
    /// Clamp, scale and add the delta to the target position
    Continuous,
    /// Any delta beyond `threshold` is a whole one-item step
    Discrete { threshold: f64 },
}

/// Numeric tuning of one carousel engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineTuning {
    /// Minimum spacing between accepted continuous input events
    pub min_interval_ms: u64,
    /// Lower clamp applied to a single input delta
    pub delta_min: f64,
    /// Upper clamp applied to a single input delta
    pub delta_max: f64,
    /// Items moved per unit of clamped delta
    pub sensitivity: f64,
    pub smoothing: Smoothing,
    pub input: InputMode,
}

impl EngineTuning {
    /// Built-in tuning for a presentation style
    pub fn for_style(style: CarouselStyle) -> Self {
        match style {
            // 0.1 degree per delta unit at 60 degrees per card
            CarouselStyle::Orbit => Self {
                min_interval_ms: 50,
                delta_min: -80.0,
                delta_max: 80.0,
                sensitivity: 1.0 / 600.0,
                smoothing: Smoothing::Decay {
                    factor: 0.06,
                    epsilon: 0.002,
                },
                input: InputMode::Continuous,
            },
            CarouselStyle::Timeline => Self {
                min_interval_ms: 60,
                delta_min: -80.0,
                delta_max: 80.0,
                sensitivity: 0.006,
                smoothing: Smoothing::Spring {
                    stiffness: 50.0,
                    damping: 18.0,
                    mass: 1.0,
                },
                input: InputMode::Continuous,
            },
            CarouselStyle::Stack => Self {
                min_interval_ms: 250,
                delta_min: -80.0,
                delta_max: 80.0,
                sensitivity: 1.0,
                smoothing: Smoothing::Spring {
                    stiffness: 260.0,
                    damping: crate::carousel::critical_damping(260.0, 1.0),
                    mass: 1.0,
                },
                input: InputMode::Discrete { threshold: 30.0 },
            },
            CarouselStyle::Stories => Self {
                min_interval_ms: 500,
                delta_min: -80.0,
                delta_max: 80.0,
                sensitivity: 1.0,
                smoothing: Smoothing::Decay {
                    factor: 0.2,
                    epsilon: 0.01,
                },
                input: InputMode::Discrete { threshold: 30.0 },
            },
            CarouselStyle::Flow => Self {
                min_interval_ms: 80,
                delta_min: -60.0,
                delta_max: 60.0,
                sensitivity: 0.008,
                smoothing: Smoothing::Decay {
                    factor: 0.1,
                    epsilon: 0.005,
                },
                input: InputMode::Continuous,
            },
        }
    }

    /// Check that the numbers describe a usable engine
    pub fn validate(&self) -> std::result::Result<(), String> {
        let positive = |name: &str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(format!("{} must be a positive number, got {}", name, value))
            }
        };
        let non_negative = |name: &str, value: f64| {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(format!("{} must be zero or more, got {}", name, value))
            }
        };

        if !self.delta_min.is_finite() || !self.delta_max.is_finite() {
            return Err("delta_min and delta_max must be finite".to_string());
        }
        if self.delta_min > self.delta_max {
            return Err(format!(
                "delta_min ({}) is greater than delta_max ({})",
                self.delta_min, self.delta_max
            ));
        }
        positive("sensitivity", self.sensitivity)?;

        match self.smoothing {
            Smoothing::Decay { factor, epsilon } => {
                positive("smoothing.factor", factor)?;
                if factor > 1.0 {
                    return Err(format!("smoothing.factor must be at most 1, got {}", factor));
                }
                non_negative("smoothing.epsilon", epsilon)?;
            }
            Smoothing::Spring {
                stiffness,
                damping,
                mass,
            } => {
                positive("smoothing.stiffness", stiffness)?;
                positive("smoothing.mass", mass)?;
                non_negative("smoothing.damping", damping)?;
            }
        }

        if let InputMode::Discrete { threshold } = self.input {
            non_negative("input.threshold", threshold)?;
        }
        Ok(())
    }
}

/// Per-style tuning overrides, keyed by style name in TOML:
///
/// ```toml
/// [carousel.flow]
/// min_interval_ms = 40
/// delta_min = -60.0
/// delta_max = 60.0
/// sensitivity = 0.01
/// smoothing = { kind = "decay", factor = 0.12, epsilon = 0.005 }
/// input = { kind = "continuous" }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CarouselOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orbit: Option<EngineTuning>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<EngineTuning>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<EngineTuning>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stories: Option<EngineTuning>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow: Option<EngineTuning>,
}

impl CarouselOverrides {
    /// Tuning for `style`: the override if configured, else the built-in preset
    pub fn tuning(&self, style: CarouselStyle) -> EngineTuning {
        let configured = match style {
            CarouselStyle::Orbit => self.orbit,
            CarouselStyle::Timeline => self.timeline,
            CarouselStyle::Stack => self.stack,
            CarouselStyle::Stories => self.stories,
            CarouselStyle::Flow => self.flow,
        };
        configured.unwrap_or_else(|| EngineTuning::for_style(style))
    }

    /// Validate every configured override
    pub fn validate(&self) -> crate::Result<()> {
        for style in CarouselStyle::ALL {
            self.tuning(style).validate().map_err(|e| {
                crate::Error::Config(format!("[carousel.{}] {}", style.name(), e))
            })?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// ImgBB API key; when unset images are embedded as data URLs
    #[serde(default)]
    pub imgbb_api_key: Option<String>,
    /// Upload endpoint
    #[serde(default = "default_upload_endpoint")]
    pub endpoint: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            imgbb_api_key: None,
            endpoint: default_upload_endpoint(),
            timeout_secs: default_timeout(),
        }
    }
}

impl UploadConfig {
    /// API key from the environment, falling back to the config file
    pub fn api_key(&self) -> Option<String> {
        std::env::var(IMGBB_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.imgbb_api_key.clone().filter(|k| !k.trim().is_empty()))
    }
}

/// Theme configuration
/// Can be specified as a simple string (theme name) or as a full struct with overrides
#[derive(Debug, Clone, Serialize)]
pub struct ThemeConfig {
    /// Theme name (e.g., "minimal", "neobrutalism")
    pub name: String,
    /// Optional color overrides for semantic colors
    pub colors: ThemeColorOverrides,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
            colors: ThemeColorOverrides::default(),
        }
    }
}

// Custom deserializer to accept either a string or a struct
impl<'de> Deserialize<'de> for ThemeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};
        use std::fmt;

        struct ThemeConfigVisitor;

        impl<'de> Visitor<'de> for ThemeConfigVisitor {
            type Value = ThemeConfig;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string (theme name) or a map with 'name' and optional 'colors'")
            }

            fn visit_str<E>(self, value: &str) -> Result<ThemeConfig, E>
            where
                E: de::Error,
            {
                Ok(ThemeConfig {
                    name: value.to_string(),
                    colors: ThemeColorOverrides::default(),
                })
            }

            fn visit_map<M>(self, mut map: M) -> Result<ThemeConfig, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut name: Option<String> = None;
                let mut colors: Option<ThemeColorOverrides> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "name" => {
                            name = Some(map.next_value()?);
                        }
                        "colors" => {
                            colors = Some(map.next_value()?);
                        }
                        _ => {
                            let _: serde::de::IgnoredAny = map.next_value()?;
                        }
                    }
                }

                Ok(ThemeConfig {
                    name: name.unwrap_or_else(default_theme_name),
                    colors: colors.unwrap_or_default(),
                })
            }
        }

        deserializer.deserialize_any(ThemeConfigVisitor)
    }
}

fn default_theme_name() -> String {
    "minimal".to_string()
}

/// Optional color overrides for theme customization
/// Each color is a hex string (e.g., "#ff0000" or "ff0000")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeColorOverrides {
    /// Page background
    pub background: Option<String>,
    /// Card surface
    pub card: Option<String>,
    /// Card border
    pub border: Option<String>,
    /// Title text
    pub title: Option<String>,
    /// Body text
    pub text: Option<String>,
    /// Accent (timeline line, progress bar, focus ring)
    pub accent: Option<String>,
    /// Muted text (dates, hints)
    pub muted: Option<String>,
}

/// Keymap configuration using Vim-style notation
/// Format: "j", "k", "<C-j>" (Ctrl+j), "<S-g>" (Shift+g), "<CR>" (Enter), "<Esc>", "<Tab>", "<Space>"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    /// Quit the application
    #[serde(default = "default_key_quit")]
    pub quit: String,
    /// Step to the next memory
    #[serde(default = "default_key_next")]
    pub next: String,
    /// Step to the previous memory
    #[serde(default = "default_key_prev")]
    pub prev: String,
    /// Open the detail modal for the focused memory
    #[serde(default = "default_key_open_detail")]
    pub open_detail: String,
    /// Open the new-memory form
    #[serde(default = "default_key_compose")]
    pub compose: String,
    /// Toggle autoplay
    #[serde(default = "default_key_toggle_autoplay")]
    pub toggle_autoplay: String,
    /// Cycle the carousel style
    #[serde(default = "default_key_cycle_style")]
    pub cycle_style: String,
    /// Cycle the theme
    #[serde(default = "default_key_cycle_theme")]
    pub cycle_theme: String,
    /// Toggle polaroid / borderless cards
    #[serde(default = "default_key_toggle_card_style")]
    pub toggle_card_style: String,
    /// Return to the cover view
    #[serde(default = "default_key_show_hero")]
    pub show_hero: String,
    /// Export the focused memory as JSON
    #[serde(default = "default_key_export")]
    pub export: String,
    /// Share the focused memory
    #[serde(default = "default_key_share")]
    pub share: String,
    /// Open the focused memory's image externally
    #[serde(default = "default_key_open_image")]
    pub open_image: String,
    /// Delete the focused memory
    #[serde(default = "default_key_delete")]
    pub delete: String,
    /// Show help overlay
    #[serde(default = "default_key_help")]
    pub help: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            next: default_key_next(),
            prev: default_key_prev(),
            open_detail: default_key_open_detail(),
            compose: default_key_compose(),
            toggle_autoplay: default_key_toggle_autoplay(),
            cycle_style: default_key_cycle_style(),
            cycle_theme: default_key_cycle_theme(),
            toggle_card_style: default_key_toggle_card_style(),
            show_hero: default_key_show_hero(),
            export: default_key_export(),
            share: default_key_share(),
            open_image: default_key_open_image(),
            delete: default_key_delete(),
            help: default_key_help(),
        }
    }
}

// Default keymap values (Vim-style notation)
fn default_key_quit() -> String { "q".to_string() }
fn default_key_next() -> String { "l".to_string() }
fn default_key_prev() -> String { "h".to_string() }
fn default_key_open_detail() -> String { "<CR>".to_string() }
fn default_key_compose() -> String { "a".to_string() }
fn default_key_toggle_autoplay() -> String { "p".to_string() }
fn default_key_cycle_style() -> String { "s".to_string() }
fn default_key_cycle_theme() -> String { "t".to_string() }
fn default_key_toggle_card_style() -> String { "c".to_string() }
fn default_key_show_hero() -> String { "H".to_string() }
fn default_key_export() -> String { "e".to_string() }
fn default_key_share() -> String { "y".to_string() }
fn default_key_open_image() -> String { "o".to_string() }
fn default_key_delete() -> String { "d".to_string() }
fn default_key_help() -> String { "?".to_string() }

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("memlane")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_tick_rate() -> u64 {
    16 // ~60fps
}

fn default_autoplay_duration() -> u64 {
    6000
}

fn default_hero_threshold() -> f64 {
    30.0
}

fn default_enter_delay() -> u64 {
    100
}

fn default_enter_cooldown() -> u64 {
    1000
}

fn default_exit_delay() -> u64 {
    50
}

fn default_exit_cooldown() -> u64 {
    1200
}

fn default_upload_endpoint() -> String {
    "https://api.imgbb.com/1/upload".to_string()
}

fn default_timeout() -> u64 {
    30
}

/// Expand tilde (~) in path to user's home directory
pub fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, defaults when it is missing
    pub fn load_from(config_path: &std::path::Path) -> crate::Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.carousel.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/memlane/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("memlane")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Log file used while the TUI owns the terminal
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("memlane.log")
    }

    /// Directory exported memories are written to
    pub fn export_dir(&self) -> PathBuf {
        self.data_dir().join("exports")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.ui.tick_rate_ms, 16);
        assert_eq!(config.ui.carousel_style, CarouselStyle::Orbit);
        assert_eq!(config.ui.theme.name, "minimal");
        assert!(!config.autoplay.enabled);
        assert_eq!(config.autoplay.duration_ms, 6000);
        assert!(config.hero.start_in_hero);
        assert_eq!(config.hero.exit_cooldown_ms, 1200);
        assert_eq!(config.keymap.next, "l");
    }

    #[test]
    fn test_theme_as_string_or_table() {
        let config = AppConfig::from_toml("[ui]\ntheme = \"neobrutalism\"\n").unwrap();
        assert_eq!(config.ui.theme.name, "neobrutalism");

        let config = AppConfig::from_toml(
            "[ui.theme]\nname = \"perplexity\"\n[ui.theme.colors]\naccent = \"#ff0000\"\n",
        )
        .unwrap();
        assert_eq!(config.ui.theme.name, "perplexity");
        assert_eq!(config.ui.theme.colors.accent.as_deref(), Some("#ff0000"));
    }

    #[test]
    fn test_style_override_parsing() {
        let config = AppConfig::from_toml(
            r#"
[ui]
carousel_style = "flow"

[carousel.flow]
min_interval_ms = 40
delta_min = -60.0
delta_max = 60.0
sensitivity = 0.01
smoothing = { kind = "decay", factor = 0.12, epsilon = 0.005 }
input = { kind = "continuous" }
"#,
        )
        .unwrap();
        assert_eq!(config.ui.carousel_style, CarouselStyle::Flow);
        let flow = config.carousel.tuning(CarouselStyle::Flow);
        assert_eq!(flow.min_interval_ms, 40);
        assert_eq!(
            flow.smoothing,
            Smoothing::Decay {
                factor: 0.12,
                epsilon: 0.005
            }
        );
        // Styles without an override keep their preset
        assert_eq!(
            config.carousel.tuning(CarouselStyle::Orbit),
            EngineTuning::for_style(CarouselStyle::Orbit)
        );
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AppConfig::from_toml("[ui\n").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_autoplay_duration_clamped() {
        let mut autoplay = AutoplayConfig::default();
        autoplay.duration_ms = 500;
        assert_eq!(autoplay.effective_duration_ms(), 3000);
        autoplay.duration_ms = 60_000;
        assert_eq!(autoplay.effective_duration_ms(), 12_000);
    }

    #[test]
    fn test_style_parse_and_cycle() {
        assert_eq!("Timeline".parse::<CarouselStyle>().unwrap(), CarouselStyle::Timeline);
        assert!("carousel".parse::<CarouselStyle>().is_err());
        assert_eq!(CarouselStyle::Flow.next(), CarouselStyle::Orbit);
    }

    #[test]
    fn test_presets_are_sane() {
        for style in CarouselStyle::ALL {
            let t = EngineTuning::for_style(style);
            assert!(t.delta_min < 0.0 && t.delta_max > 0.0, "{:?}", style);
            assert!(t.sensitivity > 0.0);
            assert!((50..=500).contains(&t.min_interval_ms));
            assert_eq!(t.validate(), Ok(()), "{:?}", style);
        }
    }

    #[test]
    fn test_inverted_delta_range_rejected() {
        let err = AppConfig::from_toml(
            r#"
[carousel.orbit]
min_interval_ms = 50
delta_min = 80.0
delta_max = -80.0
sensitivity = 0.01
smoothing = { kind = "decay", factor = 0.06, epsilon = 0.002 }
input = { kind = "continuous" }
"#,
        )
        .unwrap_err();
        match err {
            crate::Error::Config(msg) => {
                assert!(msg.contains("carousel.orbit"), "{}", msg);
                assert!(msg.contains("delta_min"), "{}", msg);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_tuning_validate_rejects_bad_numbers() {
        let mut t = EngineTuning::for_style(CarouselStyle::Timeline);
        t.sensitivity = 0.0;
        assert!(t.validate().is_err());

        let mut t = EngineTuning::for_style(CarouselStyle::Timeline);
        t.delta_max = f64::NAN;
        assert!(t.validate().is_err());

        let mut t = EngineTuning::for_style(CarouselStyle::Timeline);
        t.smoothing = Smoothing::Spring {
            stiffness: 50.0,
            damping: 18.0,
            mass: 0.0,
        };
        assert!(t.validate().unwrap_err().contains("mass"));

        let mut t = EngineTuning::for_style(CarouselStyle::Orbit);
        t.smoothing = Smoothing::Decay {
            factor: 1.5,
            epsilon: 0.002,
        };
        assert!(t.validate().is_err());
    }
}
