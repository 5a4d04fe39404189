use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use winit::event_loop::EventLoop;

use soundboard::cli::{default_name, position_to_index, CliArgs, CliCommand};
use soundboard::config_paths;
use soundboard::library::JsonEntryStore;
use soundboard::playback::{KiraBackend, PlaybackManager};
use soundboard::status::StatusLine;
use soundboard::{AppConfig, SoundBoard, SoundEntry};

mod runtime;

use runtime::App;

const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "m4a", "aac", "ogg", "flac"];

fn main() -> Result<()> {
    let args = CliArgs::parse();

    // Must happen before anything resolves a config path
    if let Some(dir) = &args.config_dir {
        std::env::set_var(config_paths::CONFIG_DIR_ENV, dir);
    }

    soundboard::tracing::init();
    let config = load_config();

    match args.command() {
        CliCommand::Run => run_window(&config, !args.no_global),
        CliCommand::List => list(&config),
        CliCommand::Add { name, file, key } => add(&config, name, file, key),
        CliCommand::Edit {
            index,
            name,
            file,
            key,
        } => edit(&config, index, name, file, key),
        CliCommand::Remove { index } => remove(&config, index),
        CliCommand::Play { index } => play(&config, index),
    }
}

/// Load the config, writing the defaults on first run so they can be edited
fn load_config() -> AppConfig {
    let config = AppConfig::load();
    let first_run = config_paths::config_file().is_some_and(|path| !path.exists());
    if first_run {
        if let Err(e) = config.save() {
            tracing::warn!("Could not write default config: {}", e);
        }
    }
    config
}

fn run_window(config: &AppConfig, global_hotkeys: bool) -> Result<()> {
    let event_loop = EventLoop::new()?;
    let mut app = App::new(config, global_hotkeys && config.global_hotkeys)?;

    event_loop.run_app(&mut app)?;
    app.shutdown();

    Ok(())
}

fn open_board(config: &AppConfig) -> Result<SoundBoard<JsonEntryStore>> {
    let store = JsonEntryStore::default_location().context("Cannot locate sound library")?;
    let mut board = SoundBoard::new(store, StatusLine::new("", config.status_timeout()));
    board.registry().set_stop_all(config.stop_all_combination());
    board.load();
    Ok(board)
}

fn list(config: &AppConfig) -> Result<()> {
    let board = open_board(config)?;
    if board.is_empty() {
        println!("No sounds yet. Add one with `soundboard add --key <KEYS>`.");
        return Ok(());
    }

    for (i, entry) in board.entries().iter().enumerate() {
        println!(
            "{:>3}. {:<24} {:<20} {}",
            i + 1,
            entry.name,
            entry.keybind,
            entry.resource_path
        );
    }
    if let Some(stop_all) = config.stop_all_combination() {
        println!("\nStop all sounds: {}", stop_all);
    }
    if let Some(log) = config_paths::log_file() {
        println!("Log file: {}", log.display());
    }
    Ok(())
}

fn add(config: &AppConfig, name: Option<String>, file: Option<PathBuf>, key: String) -> Result<()> {
    let file = match file {
        Some(file) => file,
        None => pick_audio_file().ok_or_else(|| anyhow!("No file selected"))?,
    };
    let name = name.or_else(|| default_name(&file)).unwrap_or_default();

    let mut board = open_board(config)?;
    let index = board.add(SoundEntry::new(name, file.to_string_lossy(), key))?;

    println!("{}", board.status().text());
    println!("{:>3}. {}", index + 1, board.entries()[index]);
    Ok(())
}

fn edit(
    config: &AppConfig,
    position: usize,
    name: Option<String>,
    file: Option<PathBuf>,
    key: Option<String>,
) -> Result<()> {
    let index = position_to_index(position).map_err(|e| anyhow!(e))?;
    let mut board = open_board(config)?;
    let current = board
        .get(index)
        .cloned()
        .with_context(|| format!("No sound at position {}", position))?;

    let draft = SoundEntry::new(
        name.unwrap_or(current.name),
        file.map(|f| f.to_string_lossy().to_string())
            .unwrap_or(current.resource_path),
        key.unwrap_or(current.keybind),
    );
    board.edit(index, draft)?;

    println!("{}", board.status().text());
    Ok(())
}

fn remove(config: &AppConfig, position: usize) -> Result<()> {
    let index = position_to_index(position).map_err(|e| anyhow!(e))?;
    let mut board = open_board(config)?;
    board.remove(index)?;

    println!("{}", board.status().text());
    Ok(())
}

/// Play one sound through the same manager the window uses, until it ends
fn play(config: &AppConfig, position: usize) -> Result<()> {
    let index = position_to_index(position).map_err(|e| anyhow!(e))?;
    let board = open_board(config)?;
    let entry = board
        .get(index)
        .cloned()
        .with_context(|| format!("No sound at position {}", position))?;

    let backend = KiraBackend::new().context("Cannot open the audio output")?;
    let (mut playback, events) = PlaybackManager::with_channel(backend);
    playback.play(&entry)?;
    println!("Playing: {}", entry.name);

    if let Ok(event) = events.recv() {
        if let Some(error) = event.error() {
            return Err(error.into());
        }
    }

    playback.dispose();
    Ok(())
}

fn pick_audio_file() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Select Audio File")
        .add_filter("Audio Files", AUDIO_EXTENSIONS)
        .add_filter("All Files", &["*"])
        .pick_file()
}
