mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::{Duration, Instant},
};
use tapr::{
    config::{ConfigStore, FileConfigStore},
    runtime::{CrosstermEvents, Runner, SessionEvent},
    session::Session,
    words,
};

const TICK_RATE_MS: u64 = 100;

// Delay between reaching the results screen and exiting on our own.
const EXIT_DELAY_MS: u64 = 500;

/// minimal typing trainer tui: bring your own text, watch your wpm
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A minimal typing trainer TUI. Reads a text file (or a bundled sample), streams its words through a fixed-width window, and reports words per minute and accuracy when the text runs out."
)]
pub struct Cli {
    /// text file to practice on (bundled sample text when omitted)
    #[clap(short = 'i', long)]
    input_file: Option<PathBuf>,

    /// width of the word window in columns (persisted for later runs)
    #[clap(short = 'w', long)]
    width: Option<u16>,
}

#[derive(Debug)]
pub struct App {
    pub session: Session,
    pub width_budget: u16,
}

impl App {
    pub fn new(session: Session, width_budget: u16) -> Self {
        Self {
            session,
            width_budget,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let mut config = store.load();
    if let Some(width) = cli.width {
        if width == 0 {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::InvalidValue, "width must be greater than zero")
                .exit();
        }
        config.width = width;
        let _ = store.save(&config);
    }

    let words = match words::load(cli.input_file.as_deref(), config.width as usize) {
        Ok(words) => words,
        Err(err) => {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::Io, format!("unable to read input: {err}"))
                .exit();
        }
    };
    if words.is_empty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::InvalidValue, "input contains no words to type")
            .exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(Session::new(words), config.width);
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEvents::new(),
        Duration::from_millis(TICK_RATE_MS),
    );
    let exit_ticks = (EXIT_DELAY_MS / TICK_RATE_MS).max(1);
    let mut ticks_since_finish: u64 = 0;

    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    loop {
        match runner.step() {
            SessionEvent::Tick => {
                if app.session.has_finished() {
                    ticks_since_finish += 1;
                    if ticks_since_finish >= exit_ticks {
                        break;
                    }
                }
            }
            SessionEvent::Resize => {
                terminal.draw(|f| f.render_widget(&*app, f.area()))?;
            }
            SessionEvent::Key(key) => {
                match key.code {
                    KeyCode::Esc => break,
                    KeyCode::Enter => app.session.restart_word(),
                    KeyCode::Char(c) => {
                        if key.modifiers.contains(KeyModifiers::CONTROL) && c == 'c' {
                            break;
                        }
                        app.session.handle_keystroke(c, Instant::now());
                    }
                    _ => {}
                }
                terminal.draw(|f| f.render_widget(&*app, f.area()))?;
            }
        }
    }

    Ok(())
}
