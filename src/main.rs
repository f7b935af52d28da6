use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
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
};

use typing_sprint::{
    app::App,
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    runtime::{CrosstermEventSource, Runner},
    session::Session,
    theme::Theme,
    timer::ThreadScheduler,
};

/// two-passage typing sprint with live wpm and accuracy
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type two short passages as fast and accurately as you can. Speed, accuracy and elapsed time update live; a summary is shown once both passages are done."
)]
pub struct Cli {
    /// display mode to start in (overrides the config file)
    #[clap(short = 't', long, value_enum)]
    theme: Option<Theme>,

    /// path to a JSON config file
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// where to write logs (filtered by RUST_LOG)
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Command line flags win over the config file
    fn apply(&self, mut config: Config) -> Config {
        if let Some(theme) = self.theme {
            config.theme = theme;
        }
        config
    }

    fn config_store(&self) -> FileConfigStore {
        self.config
            .as_ref()
            .map(FileConfigStore::with_path)
            .unwrap_or_default()
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let log_path = cli.log_file.clone().unwrap_or_else(AppDirs::log_path);
    // reported before raw mode so the message stays readable
    let _log_guard = match logging::init(&log_path) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("typing-sprint: logging disabled: {err}");
            None
        }
    };

    let store = cli.config_store();
    let config = cli.apply(store.load_or_default());
    tracing::info!(theme = %config.theme, config = %store.path().display(), "startup");

    install_panic_hook();
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &config);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        tracing::error!(%err, "exited_with_error");
    }
    result
}

fn install_panic_hook() {
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        // leave the alternate screen so the panic message is readable
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        tracing::error!(%info, "panic");
        default_panic(info);
    }));
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, config: &Config) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new(), config.redraw_interval());
    let scheduler = ThreadScheduler::new(runner.sender());
    let mut app = App::new(Session::new(Box::new(scheduler)), config.theme);

    terminal.draw(|f| f.render_widget(&app, f.area()))?;

    loop {
        let redraw = app.on_event(runner.step());

        if app.should_quit() {
            break;
        }

        if redraw {
            terminal.draw(|f| f.render_widget(&app, f.area()))?;
        }
    }

    // dropping the app cancels any running timer
    tracing::info!(
        completed = app.session.is_completed(),
        elapsed_secs = app.session.elapsed_secs(),
        "shutdown"
    );
    Ok(())
}
