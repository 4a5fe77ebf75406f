use anyhow::Context;
use crossterm::event::{
    self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::{backend::CrosstermBackend, Terminal};
use skyhop::config::GameConfig;
use skyhop::core::constants::PHYSICS_TICK_MS;
use skyhop::input::{handle_key, InputResult};
use skyhop::utils::{logging, persistence};
use skyhop::world::GameSession;
use skyhop::{build_info, ui};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

const LOG_FILENAME: &str = "skyhop.log";

type Tui = Terminal<CrosstermBackend<Stdout>>;

fn print_help() {
    println!("Skyhop - terminal endless platformer\n");
    println!("Usage: skyhop [options] [command]\n");
    println!("Commands:");
    println!("  init-config  Write the default config to ~/.skyhop/config.json");
    println!("\nOptions:");
    println!("  --seed <n>   Fixed seed for reproducible platform layouts");
    println!("  --version    Show version information");
    println!("  --help       Show this help message");
    println!(
        "\nLogs go to ~/.skyhop/{}; filter with {}.",
        LOG_FILENAME,
        logging::LOG_ENV_VAR
    );
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut seed: Option<u64> = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--version" | "-v" => {
                println!("{}", build_info::version_line());
                return Ok(());
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "init-config" => return init_config(),
            "--seed" => {
                let value = iter.next().context("--seed needs a value")?;
                seed = Some(
                    value
                        .parse()
                        .with_context(|| format!("invalid seed: {value}"))?,
                );
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Run 'skyhop --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    logging::init_file_logging(&persistence::data_path(LOG_FILENAME)?)?;
    tracing::info!(version = %build_info::version_line(), "starting");

    let config_path = GameConfig::default_path()?;
    let mut config = GameConfig::load_from(&config_path)?;
    tracing::info!(path = %config_path.display(), "config loaded");
    if seed.is_some() {
        config.seed = seed;
    }

    let session = GameSession::new(config).context("invalid config")?;

    let mut terminal = setup_terminal()?;
    let reports_releases = enable_release_events(&mut terminal);
    tracing::info!(reports_releases, "terminal ready");

    let result = run(&mut terminal, session, reports_releases);

    // Restore the terminal before any error is printed
    if reports_releases {
        let _ = terminal.backend_mut().execute(PopKeyboardEnhancementFlags);
    }
    restore_terminal(&mut terminal)?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "exited with error");
    }
    result
}

fn init_config() -> anyhow::Result<()> {
    let path = GameConfig::default_path()?;
    if path.exists() {
        anyhow::bail!("{} already exists", path.display());
    }
    GameConfig::default().save_to(&path)?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn setup_terminal() -> anyhow::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(e) = stdout.execute(EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e.into());
    }
    match Terminal::new(CrosstermBackend::new(stdout)) {
        Ok(terminal) => Ok(terminal),
        Err(e) => {
            // Leave the shell usable for the error message
            let _ = io::stdout().execute(LeaveAlternateScreen);
            let _ = disable_raw_mode();
            Err(e.into())
        }
    }
}

fn restore_terminal(terminal: &mut Tui) -> anyhow::Result<()> {
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Ask the terminal for press/release events. Returns true if granted.
fn enable_release_events(terminal: &mut Tui) -> bool {
    if !matches!(supports_keyboard_enhancement(), Ok(true)) {
        return false;
    }
    terminal
        .backend_mut()
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok()
}

fn run(
    terminal: &mut Tui,
    mut session: GameSession,
    reports_releases: bool,
) -> anyhow::Result<()> {
    let frame_time = Duration::from_millis(PHYSICS_TICK_MS);
    let mut last_frame = Instant::now();

    loop {
        terminal.draw(|frame| ui::draw(frame, &session))?;

        let timeout = frame_time.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            // Drain everything queued so held keys don't lag behind
            loop {
                if let Event::Key(key) = event::read()? {
                    if handle_key(key, &mut session, reports_releases) == InputResult::Exit {
                        tracing::info!(runs = session.runs, best = session.best_score, "quit");
                        return Ok(());
                    }
                }
                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }

        let now = Instant::now();
        let dt_ms = now.duration_since(last_frame).as_millis() as u64;
        if dt_ms > 0 {
            session.update(dt_ms);
            last_frame += Duration::from_millis(dt_ms);
        }
    }
}
