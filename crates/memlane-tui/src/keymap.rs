use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use memlane_core::config::KeymapConfig;
use tracing::warn;

use crate::input::Action;

/// Parsed key binding (key code + modifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn simple(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub fn shift(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::SHIFT)
    }

    /// Binding for a key event as delivered by the terminal.
    /// Terminals disagree on whether shifted characters carry SHIFT:
    /// uppercase letters always get it, symbols never do.
    pub fn from_event(key: &KeyEvent) -> Self {
        let mut modifiers = key.modifiers & (KeyModifiers::CONTROL | KeyModifiers::SHIFT);
        if let KeyCode::Char(c) = key.code {
            if c.is_ascii_uppercase() {
                modifiers.insert(KeyModifiers::SHIFT);
            } else if !c.is_ascii_alphabetic() {
                modifiers.remove(KeyModifiers::SHIFT);
            }
        }
        Self::new(key.code, modifiers)
    }
}

/// Runtime keymap for efficient key-to-action lookup
pub struct Keymap {
    bindings: HashMap<KeyBinding, Action>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::from_config(&KeymapConfig::default())
    }
}

impl Keymap {
    /// Create a keymap from configuration
    pub fn from_config(config: &KeymapConfig) -> Self {
        let mut bindings = HashMap::new();

        // Helper to add binding with conflict detection
        let mut add_binding = |key_str: &str, action: Action| {
            if let Some(binding) = parse_key_binding(key_str) {
                if let Some(existing) = bindings.get(&binding) {
                    warn!(
                        "Key conflict: '{}' already bound to {:?}, ignoring binding to {:?}",
                        key_str, existing, action
                    );
                } else {
                    bindings.insert(binding, action);
                }
            } else {
                warn!("Invalid key binding: '{}', ignoring", key_str);
            }
        };

        add_binding(&config.quit, Action::Quit);
        add_binding(&config.next, Action::Next);
        add_binding(&config.prev, Action::Prev);
        add_binding(&config.open_detail, Action::OpenDetail);
        add_binding(&config.compose, Action::Compose);
        add_binding(&config.toggle_autoplay, Action::ToggleAutoplay);
        add_binding(&config.cycle_style, Action::CycleStyle);
        add_binding(&config.cycle_theme, Action::CycleTheme);
        add_binding(&config.toggle_card_style, Action::ToggleCardStyle);
        add_binding(&config.show_hero, Action::ShowHero);
        add_binding(&config.export, Action::Export);
        add_binding(&config.share, Action::Share);
        add_binding(&config.open_image, Action::OpenImage);
        add_binding(&config.delete, Action::Delete);
        add_binding(&config.help, Action::Help);

        // Hardcoded bindings that shouldn't be configurable
        // Ctrl+C always quits
        bindings.insert(KeyBinding::ctrl(KeyCode::Char('c')), Action::Quit);
        // Arrow keys step discretely, Up/Down behave like the wheel
        bindings.entry(KeyBinding::simple(KeyCode::Left)).or_insert(Action::Prev);
        bindings.entry(KeyBinding::simple(KeyCode::Right)).or_insert(Action::Next);
        bindings.entry(KeyBinding::simple(KeyCode::Up)).or_insert(Action::ScrollBack);
        bindings.entry(KeyBinding::simple(KeyCode::Down)).or_insert(Action::ScrollForward);
        bindings.entry(KeyBinding::simple(KeyCode::Home)).or_insert(Action::First);
        bindings.entry(KeyBinding::simple(KeyCode::End)).or_insert(Action::Last);
        bindings.insert(KeyBinding::simple(KeyCode::Esc), Action::ExitMode);

        Self { bindings }
    }

    /// Get action for a key binding
    pub fn get(&self, binding: &KeyBinding) -> Option<&Action> {
        self.bindings.get(binding)
    }

    /// Action for a raw key event
    pub fn action_for(&self, key: &KeyEvent) -> Option<&Action> {
        self.get(&KeyBinding::from_event(key))
    }
}

/// Parse Vim-style key notation into KeyBinding
/// Supported formats:
/// - Single char: "h", "l", "q", etc.
/// - Uppercase (Shift): "H", "G", etc.
/// - Special chars: "/", "?", etc.
/// - Ctrl: "<C-j>", "<C-k>", etc.
/// - Shift: "<S-Tab>", "<S-g>", etc.
/// - Special keys: "<CR>", "<Enter>", "<Esc>", "<Tab>", "<Space>", "<Left>", "<Right>", "<Up>", "<Down>"
pub fn parse_key_binding(s: &str) -> Option<KeyBinding> {
    let s = s.trim();

    // Handle special notation <...>
    if let Some(inner) = s.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
        return parse_special_key(inner);
    }

    // Single character
    if s.chars().count() == 1 {
        let c = s.chars().next()?;
        // Uppercase letters are Shift+lowercase
        if c.is_ascii_uppercase() {
            return Some(KeyBinding::shift(KeyCode::Char(c)));
        }
        return Some(KeyBinding::simple(KeyCode::Char(c)));
    }

    None
}

/// Parse special key notation (content inside <...>)
fn parse_special_key(inner: &str) -> Option<KeyBinding> {
    // Handle modifiers: C- (Ctrl), S- (Shift), A-/M- (Alt)
    if let Some(rest) = inner.strip_prefix("C-") {
        let key = parse_key_name(rest)?;
        return Some(KeyBinding::ctrl(key));
    }

    if let Some(rest) = inner.strip_prefix("S-") {
        let key = parse_key_name(rest)?;
        return Some(KeyBinding::shift(key));
    }

    // Handle special key names without modifiers
    parse_key_name(inner).map(KeyBinding::simple)
}

/// Parse a key name (without modifiers)
fn parse_key_name(name: &str) -> Option<KeyCode> {
    match name.to_lowercase().as_str() {
        "cr" | "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "tab" => Some(KeyCode::Tab),
        "backtab" => Some(KeyCode::BackTab),
        "space" | "spc" => Some(KeyCode::Char(' ')),
        "bs" | "backspace" => Some(KeyCode::Backspace),
        "del" | "delete" => Some(KeyCode::Delete),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "home" => Some(KeyCode::Home),
        "end" => Some(KeyCode::End),
        "pageup" | "pgup" => Some(KeyCode::PageUp),
        "pagedown" | "pgdn" => Some(KeyCode::PageDown),
        "insert" | "ins" => Some(KeyCode::Insert),
        f if f.len() > 1 && f.starts_with('f') => f[1..]
            .parse::<u8>()
            .ok()
            .filter(|n| (1..=12).contains(n))
            .map(KeyCode::F),
        _ => {
            // Single character after modifier (e.g., "j" in "<C-j>")
            if name.chars().count() == 1 {
                let c = name.chars().next()?;
                Some(KeyCode::Char(c.to_ascii_lowercase()))
            } else {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_keys() {
        assert_eq!(
            parse_key_binding("l"),
            Some(KeyBinding::simple(KeyCode::Char('l')))
        );
        assert_eq!(
            parse_key_binding("?"),
            Some(KeyBinding::simple(KeyCode::Char('?')))
        );
    }

    #[test]
    fn test_parse_uppercase_keys() {
        assert_eq!(
            parse_key_binding("H"),
            Some(KeyBinding::shift(KeyCode::Char('H')))
        );
    }

    #[test]
    fn test_parse_ctrl_keys() {
        assert_eq!(
            parse_key_binding("<C-j>"),
            Some(KeyBinding::ctrl(KeyCode::Char('j')))
        );
        assert_eq!(
            parse_key_binding("<C-D>"),
            Some(KeyBinding::ctrl(KeyCode::Char('d')))
        );
    }

    #[test]
    fn test_parse_special_keys() {
        assert_eq!(
            parse_key_binding("<CR>"),
            Some(KeyBinding::simple(KeyCode::Enter))
        );
        assert_eq!(
            parse_key_binding("<Esc>"),
            Some(KeyBinding::simple(KeyCode::Esc))
        );
        assert_eq!(
            parse_key_binding("<Space>"),
            Some(KeyBinding::simple(KeyCode::Char(' ')))
        );
        assert_eq!(
            parse_key_binding("<S-Tab>"),
            Some(KeyBinding::shift(KeyCode::Tab))
        );
        assert_eq!(
            parse_key_binding("<F5>"),
            Some(KeyBinding::simple(KeyCode::F(5)))
        );
        assert_eq!(parse_key_binding("<F13>"), None);
        assert_eq!(parse_key_binding("<nope>"), None);
        assert_eq!(parse_key_binding("ab"), None);
    }

    #[test]
    fn test_keymap_from_config() {
        let keymap = Keymap::from_config(&KeymapConfig::default());

        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Char('q'))),
            Some(&Action::Quit)
        );
        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Char('l'))),
            Some(&Action::Next)
        );
        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Enter)),
            Some(&Action::OpenDetail)
        );
        assert_eq!(
            keymap.get(&KeyBinding::shift(KeyCode::Char('H'))),
            Some(&Action::ShowHero)
        );
        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Down)),
            Some(&Action::ScrollForward)
        );
    }

    #[test]
    fn test_conflicting_binding_keeps_first() {
        let config = KeymapConfig {
            prev: "l".to_string(),
            ..KeymapConfig::default()
        };
        let keymap = Keymap::from_config(&config);
        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Char('l'))),
            Some(&Action::Next)
        );
        // Arrow fallback is still there
        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Left)),
            Some(&Action::Prev)
        );
    }

    #[test]
    fn test_shifted_symbol_events_match() {
        let keymap = Keymap::default();
        let question = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT);
        assert_eq!(keymap.action_for(&question), Some(&Action::Help));
        let hero = KeyEvent::new(KeyCode::Char('H'), KeyModifiers::SHIFT);
        assert_eq!(keymap.action_for(&hero), Some(&Action::ShowHero));
    }
}
