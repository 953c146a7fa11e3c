use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::Backend, backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::{info, warn};

use memlane_core::upload::{ImageUploader, ImgbbUploader};
use memlane_core::AppConfig;
use memlane_tui::{
    app::{App, Mode},
    draw,
    event::{AppEvent, EventHandler, UploadResult},
    input::handle_key_event,
    keymap::Keymap,
    load_theme,
};

use super::load_store;

pub async fn run(config: Arc<AppConfig>, memories: Option<&Path>) -> Result<()> {
    let store = load_store(memories)?;
    info!("Starting viewer with {} memories", store.len());

    // Create keymap from config
    let keymap = Keymap::from_config(&config.keymap);

    let uploader: Option<Arc<dyn ImageUploader>> = match ImgbbUploader::from_config(&config.upload) {
        Ok(Some(uploader)) => Some(Arc::new(uploader)),
        Ok(None) => None,
        Err(e) => {
            warn!("Image host disabled: {}", e);
            None
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("Memlane"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Load theme from config
    let theme = load_theme(&config.ui.theme);
    let mut app = App::new(config.clone(), store, theme);

    // Channel for background image uploads from the compose form
    let (upload_tx, mut upload_rx) = mpsc::unbounded_channel::<UploadResult>();
    app.set_upload_channel(upload_tx, uploader);

    let event_handler = EventHandler::new(config.ui.tick_rate_ms);
    let result = main_loop(&mut terminal, &mut app, &event_handler, &keymap, &mut upload_rx);

    app.navigator.teardown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn main_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_handler: &EventHandler,
    keymap: &Keymap,
    upload_rx: &mut mpsc::UnboundedReceiver<UploadResult>,
) -> Result<()> {
    let mut last_frame = Instant::now();

    loop {
        // Process any finished uploads (non-blocking)
        while let Ok(result) = upload_rx.try_recv() {
            app.handle_upload_result(result);
        }

        let now = Instant::now();
        app.tick(now - last_frame);
        last_frame = now;

        terminal.draw(|frame| draw(frame, app))?;

        if let Some(event) = event_handler.next()? {
            match event {
                AppEvent::Key(key) => {
                    if app.mode != Mode::Compose {
                        app.clear_status();
                    }
                    let action = handle_key_event(key, app, keymap);
                    app.handle_action(action);
                }
                AppEvent::Mouse(mouse) => app.handle_mouse(mouse),
                AppEvent::Resize(_, _) | AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            info!("Quitting");
            return Ok(());
        }
    }
}
