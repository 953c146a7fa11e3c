pub mod app;
pub mod event;
pub mod input;
pub mod keymap;
pub mod theme;
pub mod themes;
pub mod widgets;

pub use app::App;
pub use theme::Theme;
pub use themes::{available_themes, load_theme};

use memlane_core::carousel::Mode as ViewMode;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::Mode;
use crate::widgets::{
    CarouselWidget, ComposeWidget, DetailWidget, HeroWidget, InfoPanelWidget, PopupWidget,
    StatusBarWidget,
};

/// Draw one frame of the whole UI
pub fn draw(frame: &mut Frame, app: &mut App) {
    let size = frame.area();

    // Main layout: content + status bar
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(size);

    match app.view_mode() {
        ViewMode::Hero => {
            app.card_hits.clear();
            HeroWidget::render(frame, main_layout[0], app);
        }
        ViewMode::Carousel => {
            let content = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
                .split(main_layout[0]);
            CarouselWidget::render(frame, content[0], app);
            InfoPanelWidget::render(frame, content[1], app);
        }
    }
    StatusBarWidget::render(frame, main_layout[1], app);

    // Overlays on top
    match &app.mode {
        Mode::Detail => DetailWidget::render(frame, app),
        Mode::Compose => ComposeWidget::render(frame, app),
        Mode::DeleteConfirm(id) => {
            let title = app
                .store
                .get(*id)
                .map(|m| m.title.as_str())
                .unwrap_or("Unknown");
            PopupWidget::render_delete_confirm(frame, title, &app.theme);
        }
        Mode::Help => PopupWidget::render_help(frame, &app.config.keymap, &app.theme),
        Mode::Normal => {}
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use memlane_core::{AppConfig, MemoryStore};
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::input::Action;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn carousel_app() -> App {
        let mut config = AppConfig::default();
        config.hero.start_in_hero = false;
        App::new(Arc::new(config), MemoryStore::samples(), Theme::default())
    }

    #[test]
    fn test_draw_hero() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut app = App::new(
            Arc::new(AppConfig::default()),
            MemoryStore::samples(),
            Theme::default(),
        );
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("M E M O R Y"));
        assert!(text.contains("The Beginning"));
        assert!(text.contains("COVER"));
        assert!(app.card_hits.is_empty());
    }

    #[test]
    fn test_draw_carousel_records_hits_for_every_style() {
        let mut app = carousel_app();
        for _ in 0..5 {
            let mut terminal = Terminal::new(TestBackend::new(120, 36)).unwrap();
            terminal.draw(|frame| draw(frame, &mut app)).unwrap();
            let text = buffer_text(&terminal);
            assert!(text.contains("January 15, 2024"), "{:?}", app.navigator.style());
            // Focused card is painted last
            assert_eq!(app.card_hits.last().map(|(i, _)| *i), Some(0));
            app.handle_action(Action::CycleStyle);
            app.tick(Duration::from_millis(16));
        }
    }

    #[test]
    fn test_draw_overlays() {
        let mut app = carousel_app();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        app.handle_action(Action::OpenDetail);
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();
        assert!(buffer_text(&terminal).contains("Chapter 1"));

        app.handle_action(Action::Delete);
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();
        assert!(buffer_text(&terminal).contains("Delete memory"));

        app.handle_action(Action::Cancel);
        app.handle_action(Action::Compose);
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();
        assert!(buffer_text(&terminal).contains("New Memory"));

        app.handle_action(Action::Cancel);
        app.handle_action(Action::Help);
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();
        assert!(buffer_text(&terminal).contains("Cycle carousel style"));
    }

    #[test]
    fn test_draw_empty_collection() {
        let mut config = AppConfig::default();
        config.hero.start_in_hero = false;
        let mut app = App::new(Arc::new(config), MemoryStore::new(), Theme::default());
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();
        assert!(buffer_text(&terminal).contains("No memories yet"));
        assert!(buffer_text(&terminal).contains("0/0"));
    }
}
