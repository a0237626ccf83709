mod actions;
mod app;
mod ui;

use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context as _, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::actions::{apply_completions, execute_action};
use crate::app::App;
use recpanel_client::{BackgroundDispatcher, HttpTransport, TransportOptions};
use recpanel_config as config;

#[derive(Debug, Parser)]
#[command(name = "recpanel-tui", version, about = "recommendations admin panel")]
struct Args {
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    base_url: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut app_config = config::load(args.config).with_context(|| "load config")?;
    if let Some(base_url) = args.base_url {
        app_config.base_url = config::validate_base_url(&base_url)?;
    }

    let transport = HttpTransport::new(
        &app_config.base_url,
        TransportOptions {
            timeout: Duration::from_secs(app_config.timeout_secs),
            user_agent: app_config.user_agent.clone(),
        },
    )
    .with_context(|| format!("connect to {}", app_config.base_url))?;
    let dispatcher = BackgroundDispatcher::new(Arc::new(transport));

    let mut app = App::new(app_config.base_url);
    let mut terminal = TerminalGuard::new()?;
    run_app(&mut terminal, &dispatcher, &mut app)
}

fn run_app(
    terminal: &mut TerminalGuard,
    dispatcher: &BackgroundDispatcher,
    app: &mut App,
) -> Result<()> {
    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    loop {
        while let Some(action) = app.next_action() {
            execute_action(app, dispatcher, action);
        }
        apply_completions(app, dispatcher);

        terminal.terminal_mut().draw(|frame| ui::draw(frame, app))?;

        if app.should_quit {
            break;
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::from_secs(0));
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => app.handle_key(key),
                Event::Resize(_, _) => {}
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }

    Ok(())
}

struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = restore_terminal();
            original_hook(info);
        }));

        Ok(Self { terminal })
    }

    fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}
