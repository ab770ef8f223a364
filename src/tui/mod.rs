mod app;
mod edit_mode;
mod input;
mod message;
mod ui;

use crate::api::IssueApi;
use crate::config::Config;
use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;

pub use app::{App, ModalState, RefreshResult};
pub use edit_mode::EditMode;
pub use message::Message;

pub async fn run(config: Config, api: Arc<dyn IssueApi>) -> Result<()> {
    if !std::io::IsTerminal::is_terminal(&io::stdout()) {
        anyhow::bail!("issuedeck requires an interactive terminal");
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let tick_rate = Duration::from_millis(config.ui.tick_rate_ms.max(50));
    let mut app = App::new(config, api);

    // Non-blocking: the UI shows immediately with a loading state
    app.start();

    let result = run_app(&mut terminal, &mut app, tick_rate).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tick_rate: Duration,
) -> Result<()> {
    let mut last_tick = std::time::Instant::now();
    let mut input_state = input::InputState::new();

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let msg = input::dispatch(app, &mut input_state, key);
                    if app.update(msg) {
                        return Ok(());
                    }
                }
            }
        }

        if input_state.has_timed_out() {
            input_state.clear();
        }

        // Results are drained every loop so typing never waits on a tick
        app.poll_refresh();

        if last_tick.elapsed() >= tick_rate {
            app.tick_spinner();
            last_tick = std::time::Instant::now();
        }

        tokio::task::yield_now().await;
    }
}
