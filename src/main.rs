mod app;
mod domain;
mod input;
mod persistence;
mod ticker;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use persistence::{
    ensure_data_dir, init_data_dir, FileStore, KeyValueStore, TaskStore, LOG_FILE_NAME,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sixfocus")]
#[command(about = "Six daily task slots and a 25-minute focus timer", long_about = None)]
struct Cli {
    /// Use this directory for task storage instead of .sixfocus lookup
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .sixfocus directory in the current directory (or --data-dir)
    Init,
    /// Print the six tasks without starting the UI
    List,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let current_dir =
                std::env::current_dir().context("Could not determine current directory")?;
            let data_dir = init_data_dir(cli.data_dir.as_deref(), &current_dir)?;
            println!("Initialized sixfocus directory: {}", data_dir.display());
            println!();
            println!("sixfocus will now keep its tasks in this directory.");
            println!("Run 'sixfocus' to start.");
            Ok(())
        }
        Some(Commands::List) => {
            let data_dir = ensure_data_dir(cli.data_dir.as_deref())?;
            let stdout = io::stdout();
            write_tasks(FileStore::new(&data_dir), &mut stdout.lock())?;
            Ok(())
        }
        None => {
            let data_dir = ensure_data_dir(cli.data_dir.as_deref())?;
            let _guard = init_logging(&data_dir)?;
            run_tui(&data_dir)
        }
    }
}

/// Send tracing output to a file in the data directory; the TUI owns the terminal
fn init_logging(data_dir: &Path) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::never(data_dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sixfocus=info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(guard)
}

/// Headless listing of the persisted tasks, one line per slot
fn write_tasks<S: KeyValueStore, W: Write>(storage: S, out: &mut W) -> io::Result<()> {
    let mut store = TaskStore::new(storage);
    for task in store.load() {
        let flag = if task.is_revenue_generating { "$" } else { " " };
        writeln!(out, "{} [{}] {}", task.id, flag, task.name)?;
    }
    Ok(())
}

fn run_tui(data_dir: &Path) -> Result<()> {
    eprintln!("Using sixfocus directory: {}", data_dir.display());
    tracing::info!(dir = %data_dir.display(), "starting");

    let mut app = AppState::new(FileStore::new(data_dir));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        tracing::error!(error = %err, "exited with error");
    }
    result
}

fn run_app<S: KeyValueStore>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState<S>,
) -> Result<()> {
    let tick_rate = ticker::tick_duration();

    // First frame shows the defaults, then storage is loaded
    terminal.draw(|f| ui::render(f, app))?;
    app.hydrate();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key)? {
                    tracing::info!("quit");
                    return Ok(());
                }
            }
        }

        app.tick(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use persistence::{MemoryStore, STORAGE_KEY};

    fn listing(storage: MemoryStore) -> Vec<String> {
        let mut out = Vec::new();
        write_tasks(storage, &mut out).unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_list_defaults() {
        let lines = listing(MemoryStore::new());
        assert_eq!(
            lines,
            vec!["1 [ ] ", "2 [ ] ", "3 [ ] ", "4 [ ] ", "5 [ ] ", "6 [ ] "]
        );
    }

    #[test]
    fn test_list_persisted_tasks() {
        let json = r#"[
            {"id":1,"name":"Call client","isRGA":true},
            {"id":2,"name":"","isRGA":false},
            {"id":3,"name":"Write report","isRGA":false},
            {"id":4,"name":"","isRGA":false},
            {"id":5,"name":"Invoice","isRGA":true},
            {"id":6,"name":"","isRGA":false}
        ]"#;
        let lines = listing(MemoryStore::with_entry(STORAGE_KEY, json));

        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "1 [$] Call client");
        assert_eq!(lines[2], "3 [ ] Write report");
        assert_eq!(lines[4], "5 [$] Invoice");
    }

    #[test]
    fn test_cli_parses_data_dir_after_subcommand() {
        let cli =
            Cli::try_parse_from(["sixfocus", "init", "--data-dir", "/tmp/elsewhere"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Init)));
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/elsewhere")));
    }

    #[test]
    fn test_init_with_data_dir_creates_that_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let target = temp_dir.path().join("target_dd");
        let target_arg = target.to_string_lossy().into_owned();
        let cli =
            Cli::try_parse_from(["sixfocus", "--data-dir", target_arg.as_str(), "init"]).unwrap();

        let dir = init_data_dir(cli.data_dir.as_deref(), temp_dir.path()).unwrap();
        assert_eq!(dir, target);
        assert!(target.is_dir());
        assert!(!temp_dir.path().join(persistence::files::DATA_DIR_NAME).exists());
    }
}
