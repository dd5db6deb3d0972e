//! pplayer CLI: Command-line interface for the progress player

use clap::{Parser, Subcommand};
use pplayer_engine::{Player, PlayerConfig, ScheduledAdvance};
use pplayer_tui::UiConfig;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "PPLAYER_LOG";

/// Progress player with marks, playback and seeking in the terminal
#[derive(Parser)]
#[command(name = "pplayer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Player config to open when no command is given
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a player config in the TUI
    Open {
        /// Path to the config file
        config: PathBuf,
    },

    /// Open the TUI with built-in demo marks
    Demo,

    /// Print the playback schedule of a config
    Schedule {
        /// Path to the config file
        config: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a starter config
    Init {
        /// Where to write the config
        #[arg(default_value = "pplayer.json")]
        path: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let tui = !matches!(
        cli.command,
        Some(Commands::Schedule { .. } | Commands::Init { .. })
    );
    if let Err(e) = init_logging(cli.log_file.as_deref(), tui) {
        eprintln!("Failed to open log file: {e}");
        std::process::exit(1);
    }

    let result = match cli.command {
        None => match cli.config {
            Some(path) => run_tui(TuiSource::File(path)),
            None => run_tui(TuiSource::Demo),
        },
        Some(Commands::Open { config }) => run_tui(TuiSource::File(config)),
        Some(Commands::Demo) => run_tui(TuiSource::Demo),
        Some(Commands::Schedule { config, json }) => cmd_schedule(&config, json),
        Some(Commands::Init { path }) => cmd_init(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Install the tracing subscriber.
///
/// Logs go to `log_file` when given. Otherwise they go to stderr, except
/// while the TUI owns the terminal, where they are dropped.
fn init_logging(log_file: Option<&Path>, tui: bool) -> std::io::Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None if !tui => builder.with_writer(std::io::stderr).init(),
        None => {}
    }
    Ok(())
}

enum TuiSource {
    File(PathBuf),
    Demo,
}

fn run_tui(source: TuiSource) -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    let ui = UiConfig::from_env();
    match source {
        TuiSource::File(path) => rt.block_on(pplayer_tui::run_config_file(&path, ui))?,
        TuiSource::Demo => rt.block_on(pplayer_tui::run_player(PlayerConfig::demo(), ui))?,
    }
    Ok(())
}

fn cmd_schedule(path: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = PlayerConfig::load(path)?;
    let player = Player::new(&config);
    let schedule = player.schedule_preview();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&schedule_json(&player, &schedule))?
        );
        return Ok(());
    }

    print!("{}", format_schedule(&player, &schedule));
    Ok(())
}

fn schedule_json(player: &Player, schedule: &[ScheduledAdvance]) -> serde_json::Value {
    let steps: Vec<serde_json::Value> = schedule
        .iter()
        .map(|step| {
            let mark = step.target.and_then(|i| player.marks().get(i));
            serde_json::json!({
                "at_secs": step.at.as_secs_f64(),
                "index": step.target,
                "percent": mark.map(|m| m.percent),
                "label": mark.map(|m| m.label.as_str()),
            })
        })
        .collect();

    serde_json::json!({
        "start_percent": player.current_percent(),
        "finish_to_start": player.finish_to_start(),
        "steps": steps,
    })
}

fn format_schedule(player: &Player, schedule: &[ScheduledAdvance]) -> String {
    if schedule.is_empty() {
        return "No marks to play\n".to_string();
    }

    let mut out = format!("Playback from {}%\n\n", player.current_percent());
    for step in schedule {
        let at = step.at.as_secs_f64();
        match step.target.and_then(|i| player.marks().get(i)) {
            Some(mark) => {
                out.push_str(&format!("  {at:>7.2}s  {:>6.1}%  {}\n", mark.percent, mark.label));
            }
            None => {
                let end = if player.finish_to_start() {
                    "finish, back to start"
                } else {
                    "finish"
                };
                out.push_str(&format!("  {at:>7.2}s  {end}\n"));
            }
        }
    }
    out
}

fn cmd_init(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if path.exists() {
        println!("Config already exists at {}", path.display());
        return Ok(());
    }

    PlayerConfig::demo().save(path)?;
    info!(path = %path.display(), "Wrote starter config");
    println!("Created {}", path.display());
    println!("Run `pplayer open {}` to try it", path.display());
    Ok(())
}
