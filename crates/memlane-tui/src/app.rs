use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use memlane_core::carousel::{Mode as ViewMode, Navigator, NavigatorEvent};
use memlane_core::config::{expand_tilde, AppConfig, CardStyle};
use memlane_core::memory::{export_to_dir, share_text, Memory, MemoryDraft, MemoryId, MemoryStore};
use memlane_core::upload::{upload_or_embed, ImageUploader};
use ratatui::layout::{Position, Rect};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::event::UploadResult;
use crate::input::Action;
use crate::theme::Theme;
use crate::themes::next_theme;

/// Wheel delta reported per mouse wheel event (one browser wheel line)
pub const SCROLL_DELTA: f64 = 80.0;

/// Application mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Browsing the hero or the carousel
    Normal,
    /// Detail modal for the focused memory
    Detail,
    /// New-memory form
    Compose,
    /// Delete confirmation
    DeleteConfirm(MemoryId),
    /// Help overlay
    Help,
}

/// Field of the compose form that receives typed text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeField {
    Title,
    Date,
    Story,
    Image,
}

impl ComposeField {
    pub const ALL: [ComposeField; 4] = [
        ComposeField::Title,
        ComposeField::Date,
        ComposeField::Story,
        ComposeField::Image,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ComposeField::Title => "Title",
            ComposeField::Date => "Date (YYYY-MM-DD)",
            ComposeField::Story => "Story",
            ComposeField::Image => "Image (file path or URL)",
        }
    }

    fn position(&self) -> usize {
        Self::ALL.iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// State of the compose form
#[derive(Debug, Clone)]
pub struct ComposeForm {
    pub draft: MemoryDraft,
    /// What the user typed in the image field
    pub image_input: String,
    pub field: ComposeField,
    /// An upload is in flight; input is frozen until it lands
    pub uploading: bool,
    pub error: Option<String>,
}

impl Default for ComposeForm {
    fn default() -> Self {
        Self {
            draft: MemoryDraft::default(),
            image_input: String::new(),
            field: ComposeField::Title,
            uploading: false,
            error: None,
        }
    }
}

impl ComposeForm {
    pub fn value(&self, field: ComposeField) -> &str {
        match field {
            ComposeField::Title => &self.draft.title,
            ComposeField::Date => &self.draft.date,
            ComposeField::Story => &self.draft.story,
            ComposeField::Image => &self.image_input,
        }
    }

    fn value_mut(&mut self, field: ComposeField) -> &mut String {
        match field {
            ComposeField::Title => &mut self.draft.title,
            ComposeField::Date => &mut self.draft.date,
            ComposeField::Story => &mut self.draft.story,
            ComposeField::Image => &mut self.image_input,
        }
    }

    pub fn push(&mut self, c: char) {
        let field = self.field;
        self.value_mut(field).push(c);
        self.error = None;
    }

    pub fn backspace(&mut self) {
        let field = self.field;
        self.value_mut(field).pop();
        self.error = None;
    }
}

/// Application state
pub struct App {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// The memories being shown
    pub store: MemoryStore,
    /// Hero/carousel session driven by input and ticks
    pub navigator: Navigator,
    pub theme: Theme,
    pub card_style: CardStyle,
    /// Current application mode
    pub mode: Mode,
    pub compose: Option<ComposeForm>,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Status message
    pub status_message: Option<String>,
    /// Card hit boxes from the last frame, topmost last
    pub card_hits: Vec<(usize, Rect)>,
    uploader: Option<Arc<dyn ImageUploader>>,
    upload_tx: Option<mpsc::UnboundedSender<UploadResult>>,
    started: Instant,
}

impl App {
    pub fn new(config: Arc<AppConfig>, store: MemoryStore, theme: Theme) -> Self {
        let navigator = Navigator::new(store.len(), store.collection_id(), &config);
        Self {
            card_style: config.ui.card_style,
            config,
            store,
            navigator,
            theme,
            mode: Mode::Normal,
            compose: None,
            should_quit: false,
            status_message: None,
            card_hits: Vec::new(),
            uploader: None,
            upload_tx: None,
            started: Instant::now(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_samples(config: AppConfig) -> Self {
        Self::new(Arc::new(config), MemoryStore::samples(), Theme::default())
    }

    /// Route finished compose uploads through `tx`, hosting images with
    /// `uploader` when one is configured
    pub fn set_upload_channel(
        &mut self,
        tx: mpsc::UnboundedSender<UploadResult>,
        uploader: Option<Arc<dyn ImageUploader>>,
    ) {
        self.upload_tx = Some(tx);
        self.uploader = uploader;
    }

    /// Milliseconds since the app started; the clock the navigator runs on
    pub fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    pub fn view_mode(&self) -> ViewMode {
        self.navigator.mode()
    }

    /// The memory in focus
    pub fn current_memory(&self) -> Option<&Memory> {
        self.store.get_index(self.navigator.focused_index())
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Advance animations by `dt`
    pub fn tick(&mut self, dt: Duration) {
        self.tick_at(dt, self.now_ms());
    }

    fn tick_at(&mut self, dt: Duration, now_ms: u64) {
        self.navigator.tick(dt, now_ms);
        for event in self.navigator.drain_events() {
            match event {
                NavigatorEvent::IndexChanged(index) => {
                    debug!(index, "focused memory changed");
                }
                NavigatorEvent::ModeChanged(mode) => {
                    info!("View mode changed to {:?}", mode);
                    if mode == ViewMode::Hero && self.mode == Mode::Detail {
                        self.mode = Mode::Normal;
                    }
                }
            }
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        let now = self.now_ms();
        self.apply_action(action, now);
    }

    fn apply_action(&mut self, action: Action, now_ms: u64) {
        let in_hero = self.view_mode() == ViewMode::Hero;
        match action {
            Action::Quit => self.should_quit = true,
            Action::Next if in_hero => {
                self.navigator.handle_click(now_ms);
            }
            Action::Next => self.navigator.step(1),
            Action::Prev if !in_hero => self.navigator.step(-1),
            Action::First => self.select(0, now_ms),
            Action::Last => self.select(self.store.len().saturating_sub(1), now_ms),
            Action::ScrollForward => self.scroll(SCROLL_DELTA, now_ms),
            Action::ScrollBack => self.scroll(-SCROLL_DELTA, now_ms),
            Action::SelectIndex(index) => self.select(index, now_ms),
            Action::OpenDetail if in_hero => {
                self.navigator.handle_click(now_ms);
            }
            Action::OpenDetail => {
                if self.current_memory().is_some() {
                    self.mode = Mode::Detail;
                }
            }
            Action::Compose => {
                self.compose = Some(ComposeForm::default());
                self.mode = Mode::Compose;
            }
            Action::ToggleAutoplay => {
                let enabled = !self.navigator.autoplay_enabled();
                self.navigator
                    .set_autoplay(enabled, self.config.autoplay.effective_duration_ms());
                self.set_status(if enabled { "Autoplay on" } else { "Autoplay off" });
            }
            Action::CycleStyle => {
                let style = self.navigator.style().next();
                self.navigator.set_style(style);
                self.set_status(format!("Style: {}", style.name()));
            }
            Action::CycleTheme => {
                self.theme = next_theme(self.theme.name);
                self.set_status(format!("Theme: {}", self.theme.name));
            }
            Action::ToggleCardStyle => {
                self.card_style = self.card_style.toggle();
            }
            Action::ShowHero => {
                self.mode = Mode::Normal;
                self.navigator.show(ViewMode::Hero, now_ms);
            }
            Action::Export => self.export_current(),
            Action::Share => self.share_current(),
            Action::OpenImage => self.open_current_image(),
            Action::Delete => {
                if let Some(memory) = self.current_memory() {
                    self.mode = Mode::DeleteConfirm(memory.id);
                }
            }
            Action::Help => self.mode = Mode::Help,
            Action::ExitMode => {
                self.mode = Mode::Normal;
                self.clear_status();
            }
            Action::Confirm => match self.mode {
                Mode::DeleteConfirm(id) => self.delete(id),
                Mode::Compose => self.submit_compose(),
                _ => {}
            },
            Action::Cancel => {
                if self.compose.as_ref().is_some_and(|f| f.uploading) {
                    self.set_status("Upload in progress");
                    return;
                }
                self.compose = None;
                self.mode = Mode::Normal;
            }
            Action::InputChar(c) => {
                if let Some(form) = self.compose.as_mut().filter(|f| !f.uploading) {
                    form.push(c);
                }
            }
            Action::Backspace => {
                if let Some(form) = self.compose.as_mut().filter(|f| !f.uploading) {
                    form.backspace();
                }
            }
            Action::NextField => {
                if let Some(form) = self.compose.as_mut() {
                    form.field = form.field.next();
                }
            }
            Action::PrevField => {
                if let Some(form) = self.compose.as_mut() {
                    form.field = form.field.prev();
                }
            }
            Action::Prev | Action::None => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let now = self.now_ms();
        self.apply_mouse(mouse, now);
    }

    fn apply_mouse(&mut self, mouse: MouseEvent, now_ms: u64) {
        if self.mode != Mode::Normal {
            return;
        }
        match mouse.kind {
            MouseEventKind::ScrollDown | MouseEventKind::ScrollRight => {
                self.scroll(SCROLL_DELTA, now_ms)
            }
            MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft => {
                self.scroll(-SCROLL_DELTA, now_ms)
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.click(Position::new(mouse.column, mouse.row), now_ms)
            }
            _ => {}
        }
    }

    fn scroll(&mut self, delta: f64, now_ms: u64) {
        let outcome = self.navigator.handle_scroll(delta, now_ms);
        debug!(delta, ?outcome, "scroll");
    }

    fn click(&mut self, position: Position, now_ms: u64) {
        if self.view_mode() == ViewMode::Hero {
            self.navigator.handle_click(now_ms);
            return;
        }
        let hit = self
            .card_hits
            .iter()
            .rev()
            .find(|(_, rect)| rect.contains(position))
            .map(|(index, _)| *index);
        match hit {
            Some(index) if index == self.navigator.focused_index() => self.mode = Mode::Detail,
            Some(index) => self.navigator.select(index),
            None => {}
        }
    }

    fn select(&mut self, index: usize, now_ms: u64) {
        if index >= self.store.len() {
            return;
        }
        if self.view_mode() == ViewMode::Hero {
            self.navigator.show(ViewMode::Carousel, now_ms);
        }
        self.navigator.select(index);
    }

    fn export_current(&mut self) {
        let Some(memory) = self.current_memory() else {
            return;
        };
        match export_to_dir(memory, &self.config.export_dir()) {
            Ok(path) => self.set_status(format!("Exported to {}", path.display())),
            Err(e) => {
                warn!("Export failed: {}", e);
                self.set_status(format!("Export failed: {}", e));
            }
        }
    }

    fn share_current(&mut self) {
        let Some(memory) = self.current_memory() else {
            return;
        };
        let text = share_text(memory);
        info!("Share text for memory {}:\n{}", memory.id, text);
        self.set_status(text.replace("\n\n", " | "));
    }

    fn open_current_image(&mut self) {
        let Some(memory) = self.current_memory() else {
            return;
        };
        if let Some(url) = memory.image_url() {
            match open::that(url.as_str()) {
                Ok(()) => self.set_status("Opened image"),
                Err(e) => self.set_status(format!("Failed to open image: {}", e)),
            }
        } else if memory.image_is_embedded() {
            self.set_status("Image is embedded; export the memory to keep it");
        } else {
            self.set_status("This memory has no image");
        }
    }

    fn delete(&mut self, id: MemoryId) {
        self.mode = Mode::Normal;
        match self.store.remove(id) {
            Ok(removed) => {
                let start = self
                    .navigator
                    .focused_index()
                    .min(self.store.len().saturating_sub(1));
                self.navigator
                    .replace_collection(self.store.len(), self.store.collection_id(), start);
                self.set_status(format!("Deleted \"{}\"", removed.title));
            }
            Err(e) => self.set_status(format!("Delete failed: {}", e)),
        }
    }

    fn submit_compose(&mut self) {
        let Some(form) = self.compose.as_mut() else {
            return;
        };
        if form.uploading {
            return;
        }
        if let Err(e) = form.draft.validate() {
            form.error = Some(e.to_string());
            return;
        }

        let input = form.image_input.trim().to_string();
        if input.is_empty() || is_image_reference(&input) {
            form.draft.image = input;
            self.finish_compose();
            return;
        }

        let Some(tx) = self.upload_tx.clone() else {
            form.error = Some("Image uploads are not available".to_string());
            return;
        };
        let path = expand_tilde(Path::new(&input));
        let uploader = self.uploader.clone();
        form.uploading = true;
        form.error = None;
        info!("Reading image {} for new memory", path.display());
        tokio::spawn(async move {
            let result = match tokio::fs::read(&path).await {
                Ok(bytes) => match upload_or_embed(uploader.as_deref(), &bytes).await {
                    Ok(image) => UploadResult::Ready { image },
                    Err(e) => UploadResult::Failure {
                        error: format!("{}: {}", path.display(), e),
                    },
                },
                Err(e) => UploadResult::Failure {
                    error: format!("Cannot read {}: {}", path.display(), e),
                },
            };
            let _ = tx.send(result);
        });
    }

    /// Apply a finished background upload to the compose form
    pub fn handle_upload_result(&mut self, result: UploadResult) {
        let Some(form) = self.compose.as_mut().filter(|f| f.uploading) else {
            debug!("Dropping upload result with no form waiting");
            return;
        };
        form.uploading = false;
        match result {
            UploadResult::Ready { image } => {
                form.draft.image = image;
                self.finish_compose();
            }
            UploadResult::Failure { error } => {
                warn!("{}", error);
                form.error = Some(error);
            }
        }
    }

    fn finish_compose(&mut self) {
        let Some(form) = self.compose.as_mut() else {
            return;
        };
        let new = match form.draft.validate() {
            Ok(new) => new,
            Err(e) => {
                form.error = Some(e.to_string());
                return;
            }
        };

        let title = self.store.add(new).title.clone();
        let index = self.store.len() - 1;
        self.navigator
            .replace_collection(self.store.len(), self.store.collection_id(), index);
        if self.view_mode() == ViewMode::Hero {
            let now = self.now_ms();
            self.navigator.show(ViewMode::Carousel, now);
        }
        self.compose = None;
        self.mode = Mode::Normal;
        self.set_status(format!("Added \"{}\"", title));
    }
}

/// Values the compose image field accepts without touching the disk
fn is_image_reference(input: &str) -> bool {
    input.starts_with("data:image/") || input.starts_with("http://") || input.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    const FRAME: Duration = Duration::from_millis(16);

    fn carousel_app() -> App {
        let mut config = AppConfig::default();
        config.hero.start_in_hero = false;
        App::with_samples(config)
    }

    fn settle(app: &mut App, mut now_ms: u64) -> u64 {
        for _ in 0..60 * 10 {
            now_ms += 16;
            app.tick_at(FRAME, now_ms);
        }
        now_ms
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.apply_action(Action::InputChar(c), 0);
        }
    }

    #[test]
    fn test_enter_from_hero_then_step() {
        let mut app = App::with_samples(AppConfig::default());
        assert_eq!(app.view_mode(), ViewMode::Hero);

        app.apply_action(Action::OpenDetail, 0);
        let now = settle(&mut app, 0);
        assert_eq!(app.view_mode(), ViewMode::Carousel);
        assert_eq!(app.mode, Mode::Normal);

        app.apply_action(Action::Next, now);
        settle(&mut app, now);
        assert_eq!(app.navigator.focused_index(), 1);
        assert_eq!(app.current_memory().unwrap().title, "City of Dreams");
    }

    #[test]
    fn test_digit_selects_and_ignores_out_of_range() {
        let mut app = carousel_app();
        app.apply_action(Action::SelectIndex(3), 0);
        let now = settle(&mut app, 0);
        assert_eq!(app.navigator.focused_index(), 3);
        app.apply_action(Action::SelectIndex(9), now);
        settle(&mut app, now);
        assert_eq!(app.navigator.focused_index(), 3);
    }

    #[test]
    fn test_click_selects_then_opens_focused_card() {
        let mut app = carousel_app();
        app.card_hits = vec![(2, Rect::new(50, 5, 10, 5)), (0, Rect::new(20, 5, 10, 5))];

        app.apply_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 55, 7), 0);
        let now = settle(&mut app, 0);
        assert_eq!(app.navigator.focused_index(), 2);
        assert_eq!(app.mode, Mode::Normal);

        app.apply_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 55, 7), now);
        assert_eq!(app.mode, Mode::Detail);
    }

    #[test]
    fn test_wheel_up_on_first_card_returns_to_hero() {
        let mut app = carousel_app();
        app.apply_mouse(mouse(MouseEventKind::ScrollUp, 0, 0), 5_000);
        settle(&mut app, 5_000);
        assert_eq!(app.view_mode(), ViewMode::Hero);
    }

    #[test]
    fn test_compose_adds_and_focuses_memory() {
        let mut app = carousel_app();
        app.apply_action(Action::Compose, 0);
        assert_eq!(app.mode, Mode::Compose);

        type_text(&mut app, "Road Trip");
        app.apply_action(Action::NextField, 0);
        let form = app.compose.as_mut().unwrap();
        form.draft.date.clear();
        type_text(&mut app, "2025-06-01");
        app.apply_action(Action::NextField, 0);
        app.apply_action(Action::NextField, 0);
        type_text(&mut app, "https://example.com/road.jpg");
        app.apply_action(Action::Confirm, 0);

        assert_eq!(app.mode, Mode::Normal);
        assert!(app.compose.is_none());
        assert_eq!(app.store.len(), 7);
        assert_eq!(app.navigator.focused_index(), 6);
        let memory = app.current_memory().unwrap();
        assert_eq!(memory.title, "Road Trip");
        assert_eq!(memory.image, "https://example.com/road.jpg");
        assert_eq!(memory.chapter, Some(7));
    }

    #[test]
    fn test_compose_validation_error_keeps_form() {
        let mut app = carousel_app();
        app.apply_action(Action::Compose, 0);
        app.apply_action(Action::Confirm, 0);
        assert_eq!(app.mode, Mode::Compose);
        assert!(app.compose.as_ref().unwrap().error.is_some());
        assert_eq!(app.store.len(), 6);
    }

    #[test]
    fn test_compose_file_without_channel_reports_error() {
        let mut app = carousel_app();
        app.apply_action(Action::Compose, 0);
        type_text(&mut app, "Local");
        app.compose.as_mut().unwrap().image_input = "~/photo.png".to_string();
        app.apply_action(Action::Confirm, 0);
        let form = app.compose.as_ref().unwrap();
        assert!(!form.uploading);
        assert!(form.error.is_some());
    }

    #[tokio::test]
    async fn test_compose_rejects_file_that_is_not_an_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "shopping list").unwrap();

        let mut app = carousel_app();
        let (tx, mut rx) = mpsc::unbounded_channel();
        app.set_upload_channel(tx, None);
        app.apply_action(Action::Compose, 0);
        type_text(&mut app, "Not a photo");
        app.compose.as_mut().unwrap().image_input = path.display().to_string();
        app.apply_action(Action::Confirm, 0);
        assert!(app.compose.as_ref().unwrap().uploading);

        let result = rx.recv().await.unwrap();
        app.handle_upload_result(result);

        let form = app.compose.as_ref().unwrap();
        assert!(!form.uploading);
        let error = form.error.as_deref().unwrap();
        assert!(error.contains("Not an image"), "{}", error);
        assert_eq!(app.store.len(), 6);
    }

    #[test]
    fn test_upload_result_completes_form() {
        let mut app = carousel_app();
        app.apply_action(Action::Compose, 0);
        type_text(&mut app, "Embedded");
        app.compose.as_mut().unwrap().uploading = true;

        app.handle_upload_result(UploadResult::Ready {
            image: "data:image/png;base64,AAAA".to_string(),
        });
        assert_eq!(app.store.len(), 7);
        assert!(app.current_memory().unwrap().image_is_embedded());

        // Nobody waiting
        app.handle_upload_result(UploadResult::Failure {
            error: "late".to_string(),
        });
        assert!(app.compose.is_none());
    }

    #[test]
    fn test_delete_confirm_flow() {
        let mut app = carousel_app();
        app.apply_action(Action::SelectIndex(5), 0);
        let now = settle(&mut app, 0);
        app.apply_action(Action::Delete, now);
        assert_eq!(app.mode, Mode::DeleteConfirm(MemoryId(6)));
        app.apply_action(Action::Confirm, now);

        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.store.len(), 5);
        assert_eq!(app.navigator.focused_index(), 4);
        assert!(app.status_message.as_deref().unwrap().contains("Winter Magic"));
    }

    #[test]
    fn test_export_writes_into_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.general.data_dir = dir.path().to_path_buf();
        config.hero.start_in_hero = false;
        let mut app = App::with_samples(config);

        app.apply_action(Action::Export, 0);
        let expected = dir.path().join("exports").join("memory-The-Beginning.json");
        assert!(expected.exists());
        assert!(app.status_message.unwrap().starts_with("Exported to"));
    }

    #[test]
    fn test_share_and_style_cycle_update_status() {
        let mut app = carousel_app();
        app.apply_action(Action::Share, 0);
        assert!(app
            .status_message
            .as_deref()
            .unwrap()
            .starts_with("The Beginning (January 15, 2024) | Every journey"));

        app.apply_action(Action::CycleStyle, 0);
        assert_eq!(app.status_message.as_deref(), Some("Style: timeline"));
        app.apply_action(Action::CycleTheme, 0);
        assert_eq!(app.theme.name, "perplexity");
    }
}
