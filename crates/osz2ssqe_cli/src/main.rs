//! Command-line front-end for the osz2ssqe converter.
//!
//! All conversion logic lives in `osz2ssqe_core`; this binary wires the
//! persisted configuration, logging, and progress output around it.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use directories::{ProjectDirs, UserDirs};
use tracing_subscriber::EnvFilter;

use osz2ssqe_core::config::{ConfigManager, ConfigSection, Settings};
use osz2ssqe_core::pipeline::{BatchOutcome, Converter, ProgressCallback};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert { archives } => run_convert(archives),
        Commands::Batch { dir } => run_batch(&dir),
        Commands::SetEditor { path } => run_set_editor(&path),
        Commands::Recent => run_recent(),
    }
}

fn run_convert(archives: Vec<PathBuf>) -> anyhow::Result<()> {
    let mut config = load_config()?;
    let converter = converter_from_settings(config.settings())?;

    for archive in &archives {
        config
            .settings_mut()
            .remember_archive(archive.to_string_lossy());
    }
    config.update_section(ConfigSection::History)?;

    let outcomes = converter.convert_batch(&archives, Some(progress_printer()));
    report(&outcomes)
}

fn run_batch(dir: &Path) -> anyhow::Result<()> {
    let archives =
        scan_archives(dir).with_context(|| format!("Could not scan {}", dir.display()))?;
    if archives.is_empty() {
        bail!("No .osz archives found in {}", dir.display());
    }

    tracing::info!("Found {} archives in {}", archives.len(), dir.display());
    run_convert(archives)
}

fn run_set_editor(path: &Path) -> anyhow::Result<()> {
    if !path.is_dir() {
        tracing::warn!("{} is not an existing directory", path.display());
    }

    let mut config = load_config()?;
    config.settings_mut().paths.editor_root = path.to_string_lossy().into_owned();
    config.update_section(ConfigSection::Paths)?;

    println!("Editor root set to {}", path.display());
    Ok(())
}

fn run_recent() -> anyhow::Result<()> {
    let config = load_config()?;

    let recent = &config.settings().history.recent_archives;
    if recent.is_empty() {
        println!("No archives converted yet");
    } else {
        for path in recent {
            println!("{}", path);
        }
    }
    Ok(())
}

/// Build the converter from the persisted settings.
///
/// The editor root must be configured (the audio cache lives under it);
/// the output root falls back to the platform downloads directory.
fn converter_from_settings(settings: &Settings) -> anyhow::Result<Converter> {
    let editor_root = settings.paths.editor_root.as_str();
    if editor_root.is_empty() {
        bail!("No editor root configured; run `osz2ssqe set-editor <PATH>` first");
    }

    let output_root = if settings.paths.output_root.is_empty() {
        downloads_dir()?
    } else {
        PathBuf::from(&settings.paths.output_root)
    };

    Ok(Converter::new(output_root, editor_root))
}

/// Archives in `dir` (non-recursive), sorted by name for a stable order.
fn scan_archives(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut archives = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_osz = path
            .file_name()
            .map(|name| name.to_string_lossy().to_lowercase().ends_with(".osz"))
            .unwrap_or(false);
        if is_osz && path.is_file() {
            archives.push(path);
        }
    }

    archives.sort();
    Ok(archives)
}

fn progress_printer() -> ProgressCallback {
    Box::new(|done, total, archive| {
        println!("[{}/{}] {}", done, total, archive.display());
    })
}

fn report(outcomes: &[BatchOutcome]) -> anyhow::Result<()> {
    let mut failed = 0;

    for outcome in outcomes {
        match &outcome.result {
            Ok(bundle) => {
                println!(
                    "{} -> {}",
                    outcome.archive.display(),
                    bundle.bundle_dir.display()
                );
            }
            Err(e) => {
                failed += 1;
                eprintln!("{}: {}", outcome.archive.display(), e);
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} archives failed", failed, outcomes.len());
    }

    tracing::info!("Converted {} archives", outcomes.len());
    Ok(())
}

fn load_config() -> anyhow::Result<ConfigManager> {
    let mut manager = ConfigManager::new(config_path()?);
    manager.load_or_create()?;
    Ok(manager)
}

fn config_path() -> anyhow::Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "osz2ssqe").context("Could not determine the config directory")?;
    Ok(dirs.config_dir().join("settings.toml"))
}

/// Downloads directory, falling back to `~/Downloads` when the platform
/// does not advertise one.
fn downloads_dir() -> anyhow::Result<PathBuf> {
    let dirs = UserDirs::new().context("Could not determine the user's home directory")?;
    Ok(dirs
        .download_dir()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| dirs.home_dir().join("Downloads")))
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(
    author,
    version = osz2ssqe_core::version(),
    about = "Convert beatmap archives into editor project bundles",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert one or more beatmap archives.
    Convert {
        /// Archive files to convert.
        #[arg(required = true)]
        archives: Vec<PathBuf>,
    },
    /// Convert every archive found in a directory.
    Batch {
        /// Directory scanned (non-recursively) for `.osz` files.
        dir: PathBuf,
    },
    /// Persist the editing tool's root directory.
    SetEditor {
        /// Directory the editing tool lives in.
        path: PathBuf,
    },
    /// Print the recently converted archives.
    Recent,
}
