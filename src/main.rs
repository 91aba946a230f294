use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use qpace::{
    analysis::gemini::{api_key_from_env, GeminiClient},
    app::{self, App, Start, Theme},
    app_dirs::AppDirs,
    clock::ThreadScheduler,
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    runtime::{FixedFrameClock, Runner, TerminalEventSource},
    session::Subject,
    setup::SetupForm,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    rc::Rc,
    sync::Arc,
    time::Duration,
};
use tracing::{info, warn};

const FRAME_RATE_MS: u64 = 250;

/// terminal study timer for practice questions
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Times every practice question, records whether you got it right, charts the session, and can ask a generative model for feedback on your pacing."
)]
pub struct Cli {
    /// run the standalone stopwatch instead of a study session
    #[clap(long)]
    stopwatch: bool,

    /// subject to preselect on the setup screen
    #[clap(short = 's', long, value_enum)]
    subject: Option<Subject>,

    /// chapter or topic; a non-blank value skips the setup screen
    #[clap(short = 'c', long)]
    chapter: Option<String>,

    /// start in dark mode
    #[clap(long)]
    dark: bool,

    /// generative model used for session feedback
    #[clap(long)]
    model: Option<String>,

    /// config file to use instead of the platform default
    #[clap(long)]
    config: Option<PathBuf>,

    /// write the effective config file and exit
    #[clap(long)]
    init_config: bool,
}

impl Cli {
    /// Command line flags take precedence over the config file
    fn apply_to(&self, mut config: Config) -> Config {
        if let Some(subject) = self.subject {
            config.default_subject = subject;
        }
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if self.dark {
            config.dark_mode = true;
        }
        config
    }

    fn start(&self, config: &Config) -> Start {
        if self.stopwatch {
            return Start::Stopwatch;
        }
        let form = SetupForm::new(config.default_subject)
            .with_chapter(self.chapter.clone().unwrap_or_default());
        Start::Session(form)
    }

    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Some(path) = AppDirs::log_path() {
        // logging is best effort; the app works without it
        let _ = logging::init(&path);
    }

    let store = cli.config_store();
    let config = cli.apply_to(store.load());

    if cli.init_config {
        store.save(&config)?;
        println!("wrote {}", store.path().display());
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let client = GeminiClient::new(
        config.api_base.clone(),
        config.model.clone(),
        api_key_from_env(),
    );
    if !client.has_api_key() {
        warn!("no API key in the environment; AI feedback will fall back to an error message");
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = TerminalEventSource::new();
    let mut app = App::new(
        cli.start(&config),
        Theme::from_dark(config.dark_mode),
        Rc::new(ThreadScheduler::new(events.sender())),
        Arc::new(client),
        events.sender(),
    );
    if cli.chapter.is_some() {
        app.submit_setup();
    }
    info!(stopwatch = cli.stopwatch, model = %config.model, "qpace started");

    let runner = Runner::new(events, FixedFrameClock::new(Duration::from_millis(FRAME_RATE_MS)));
    let result = app::run(&mut terminal, &mut app, &runner);
    // stops any tick source still running before the terminal is handed back
    drop(app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;
    info!("qpace exited");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use clap::Parser;

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["qpace"]);

        assert!(!cli.stopwatch);
        assert_eq!(cli.subject, None);
        assert_eq!(cli.chapter, None);
        assert!(!cli.dark);
        assert_eq!(cli.model, None);
        assert!(!cli.init_config);
    }

    #[test]
    fn test_cli_subject() {
        let cli = Cli::parse_from(["qpace", "-s", "chemistry"]);
        assert_eq!(cli.subject, Some(Subject::Chemistry));

        let cli = Cli::parse_from(["qpace", "--subject", "mathematics"]);
        assert_eq!(cli.subject, Some(Subject::Mathematics));

        assert!(Cli::try_parse_from(["qpace", "-s", "biology"]).is_err());
    }

    #[test]
    fn test_cli_chapter() {
        let cli = Cli::parse_from(["qpace", "-c", "Electrostatics"]);
        assert_eq!(cli.chapter.as_deref(), Some("Electrostatics"));
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from(["qpace", "-s", "mathematics", "--dark", "--model", "gemini-x"]);
        let config = cli.apply_to(Config::default());

        assert_eq!(config.default_subject, Subject::Mathematics);
        assert!(config.dark_mode);
        assert_eq!(config.model, "gemini-x");
    }

    #[test]
    fn test_config_kept_without_flags() {
        let cli = Cli::parse_from(["qpace"]);
        let file_config = Config {
            dark_mode: true,
            default_subject: Subject::Chemistry,
            ..Config::default()
        };
        assert_eq!(cli.apply_to(file_config.clone()), file_config);
    }

    #[test]
    fn test_start_stopwatch() {
        let cli = Cli::parse_from(["qpace", "--stopwatch"]);
        assert_eq!(cli.start(&Config::default()), Start::Stopwatch);
    }

    #[test]
    fn test_start_session_prefills_form() {
        let cli = Cli::parse_from(["qpace", "-s", "chemistry", "-c", "Aldehydes"]);
        let config = cli.apply_to(Config::default());
        assert_matches!(
            cli.start(&config),
            Start::Session(form) if form.subject == Subject::Chemistry && form.chapter == "Aldehydes"
        );
    }

    #[test]
    fn test_frame_rate_constant() {
        const _: () = assert!(FRAME_RATE_MS > 0);
        const _: () = assert!(FRAME_RATE_MS < 1000); // redraw more often than the clocks tick
    }
}
