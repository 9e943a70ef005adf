//! Terminal UI: main entry point and event loop.

pub mod app;
pub mod event;
pub mod theme;
pub mod ui;
pub mod widgets;

use std::io;

use crossterm::event::{poll as ct_poll, read as ct_read, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;

use self::app::App;
use crate::config::Config;
use crate::runtime::{ClientRuntime, RuntimeSettings};

/// Run the TUI application. Blocks until the user quits.
pub fn run_tui(config: Config) -> anyhow::Result<()> {
    crate::runtime::connection::validate_url(&config.server.url)?;

    // Network and file I/O run here; the UI thread only drains events
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()?;

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let client = ClientRuntime::spawn(runtime.handle(), RuntimeSettings::from(&config), events_tx);
    let mut app = App::new(&config, client, events_rx);
    app.start();

    // Setup terminal (alternate screen)
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_event_loop(&mut terminal, app);

    // Restore terminal (always, even on error)
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    runtime.shutdown_background();
    tracing::info!("Session ended");

    result
}

/// Main event loop: render → poll → handle → tick.
fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|frame| {
            ui::render(frame, &app);
        })?;

        if ct_poll(app.tick_rate)? {
            if let Event::Key(key) = ct_read()? {
                event::handle_key_event(&mut app, key)?;
            }
        }

        // Apply network events and fire timers
        app.tick();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
