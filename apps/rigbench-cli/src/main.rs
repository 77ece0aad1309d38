mod report;
mod ui;

use std::{collections::BTreeMap, fs, path::PathBuf, sync::mpsc};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use futures::StreamExt;
use rigbench_advisor::{Analyzer, CannedAdvisor, GeminiClient, SpecLookup, Translator};
use rigbench_bus::{EventBus, LocalBus};
use rigbench_ops::{ensure_data_dir, init_tracing, JsonFileStore, TranslationStore};
use rigbench_orchestrator::{AnalysisSession, Localizer, MatrixOrchestrator, MatrixRunner};
use rigbench_ranking::{select_by_ids, ComparisonTable, SortKey, SortState};
use rigbench_types::{config::RigbenchConfig, hardware::HardwareSpec, matrix::MatrixJob};
use tracing::info;

use crate::ui::UiMessage;

#[derive(Debug, Parser)]
#[command(name = "rigbench", version, about = "AI-estimated game performance for your hardware")]
struct Cli {
    /// TOML config file; built-in defaults are used when missing or invalid.
    #[arg(long, env = "RIGBENCH_CONFIG")]
    config: Option<PathBuf>,
    /// Use the deterministic offline advisor instead of the Gemini API.
    #[arg(long)]
    offline: bool,
    /// Response language passed to the advisor.
    #[arg(long)]
    language: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve a device name into CPU, GPU and RAM.
    Lookup { device: String },
    /// Estimate one game on one device.
    Analyze(AnalyzeArgs),
    /// Run every device x game combination and rank the results.
    Matrix(MatrixArgs),
    /// Manage saved analyses.
    #[command(subcommand)]
    Saved(SavedCommand),
    /// Add a UI language by translating a base string table.
    Translate {
        /// Language name, e.g. "Deutsch"; its first two letters become the key.
        language: String,
        /// JSON object of key -> English text.
        #[arg(long)]
        base: PathBuf,
    },
}

#[derive(Debug, Args)]
struct AnalyzeArgs {
    #[arg(long)]
    game: String,
    /// Look the hardware up from a device name instead of giving it directly.
    #[arg(long, conflicts_with_all = ["cpu", "gpu", "ram"])]
    device: Option<String>,
    #[arg(long)]
    cpu: Option<String>,
    #[arg(long)]
    gpu: Option<String>,
    #[arg(long)]
    ram: Option<String>,
    #[arg(long)]
    ram_mhz: Option<String>,
    #[arg(long)]
    virtual_ram: Option<String>,
    /// Keep the result for later comparison.
    #[arg(long)]
    save: bool,
    /// Device label stored in place of the CPU name.
    #[arg(long, requires = "save")]
    label: Option<String>,
}

#[derive(Debug, Args)]
struct MatrixArgs {
    #[arg(long = "device", required = true)]
    devices: Vec<String>,
    #[arg(long = "game", required = true)]
    games: Vec<String>,
    /// Column to sort by; repeating a column flips its direction.
    #[arg(long = "sort", value_enum)]
    sort: Vec<SortColumn>,
    /// Print the outcome as JSON instead of tables.
    #[arg(long, conflicts_with = "tui")]
    json: bool,
    /// Follow progress in a terminal UI.
    #[arg(long)]
    tui: bool,
}

#[derive(Debug, Subcommand)]
enum SavedCommand {
    List,
    Delete { id: String },
    Compare {
        #[arg(num_args = 2.., required = true)]
        ids: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SortColumn {
    Rank,
    Game,
    Device,
    Score,
    Fps,
}

impl From<SortColumn> for SortKey {
    fn from(column: SortColumn) -> Self {
        match column {
            SortColumn::Rank => SortKey::Rank,
            SortColumn::Game => SortKey::GameName,
            SortColumn::Device => SortKey::DeviceLabel,
            SortColumn::Score => SortKey::PerformanceScore,
            SortColumn::Fps => SortKey::PrimaryScenarioFps,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_ref());
    if let Some(language) = &cli.language {
        config.advisor.language = language.clone();
    }
    init_tracing(&config.ops)?;

    if cli.offline {
        dispatch(cli.command, &config, CannedAdvisor::new()).await
    } else {
        let client = GeminiClient::new(&config.advisor)
            .context("pass --offline to run without an API key")?;
        dispatch(cli.command, &config, client).await
    }
}

async fn dispatch<A>(command: Command, config: &RigbenchConfig, advisor: A) -> Result<()>
where
    A: SpecLookup + Analyzer + Translator + Clone + 'static,
{
    let data_dir = ensure_data_dir(&config.ops.data_dir)?;
    let language = config.advisor.language.as_str();

    match command {
        Command::Lookup { device } => {
            let session = AnalysisSession::new(
                advisor.clone(),
                advisor,
                JsonFileStore::in_dir(&data_dir),
                language,
            );
            let spec = session.lookup_specs(&device).await?;
            print!("{}", report::spec(&spec));
        }
        Command::Analyze(args) => {
            let session = AnalysisSession::new(
                advisor.clone(),
                advisor,
                JsonFileStore::in_dir(&data_dir),
                language,
            );
            let spec = match &args.device {
                Some(device) => session.lookup_specs(device).await?,
                None => manual_spec(&args),
            };
            let record = session.analyze(&spec, &args.game).await?;
            print!("{}", report::analysis(&spec, &args.game, &record));
            if args.save {
                let saved = session.save(args.label.as_deref(), &spec, &args.game, record)?;
                println!("Saved as {}", saved.id);
            }
        }
        Command::Matrix(args) => run_matrix(args, config, advisor).await?,
        Command::Saved(saved) => {
            let session = AnalysisSession::new(
                advisor.clone(),
                advisor,
                JsonFileStore::in_dir(&data_dir),
                language,
            );
            match saved {
                SavedCommand::List => print!("{}", report::saved_list(&session.saved()?)),
                SavedCommand::Delete { id } => {
                    let removed = session.delete(&id)?;
                    println!(
                        "Deleted {} ({} on {})",
                        removed.id,
                        removed.game_name,
                        removed.device_label()
                    );
                }
                SavedCommand::Compare { ids } => {
                    let saved = session.saved()?;
                    let picked = select_by_ids(&saved, &ids)?;
                    print!("{}", report::comparison(&ComparisonTable::build(&picked)?));
                }
            }
        }
        Command::Translate { language, base } => {
            let raw = fs::read_to_string(&base)
                .with_context(|| format!("reading base strings from {}", base.display()))?;
            let base: BTreeMap<String, String> = serde_json::from_str(&raw)
                .with_context(|| format!("{} is not a flat JSON object", base.display()))?;
            let localizer = Localizer::new(advisor, TranslationStore::in_dir(&data_dir));
            let key = localizer.add_language(&base, &language).await?;
            let translated = localizer.strings(&key)?.map_or(0, |strings| strings.len());
            println!(
                "Added language '{}' ({translated} strings)",
                key.to_uppercase()
            );
            println!("Available: {}", localizer.languages()?.join(", "));
        }
    }
    Ok(())
}

async fn run_matrix<A>(args: MatrixArgs, config: &RigbenchConfig, advisor: A) -> Result<()>
where
    A: SpecLookup + Analyzer + Clone + 'static,
{
    let job = MatrixJob::new(&args.devices, &args.games)?;
    let mut sort = SortState::new();
    for column in &args.sort {
        sort.select((*column).into());
    }

    let orchestrator = MatrixOrchestrator::new(
        advisor.clone(),
        advisor,
        LocalBus::new(config.matrix.event_capacity),
        config.advisor.language.clone(),
    );
    let mut events = orchestrator.bus().subscribe();

    let outcome = if args.tui {
        let (tx, rx) = mpsc::channel();
        let summary = format!(
            "{} devices x {} games",
            job.devices().len(),
            job.games().len()
        );
        let screen = tokio::task::spawn_blocking(move || ui::run(rx, summary));
        let forward_tx = tx.clone();
        let forward = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                if forward_tx.send(UiMessage::Event(event)).is_err() {
                    break;
                }
            }
        });

        let outcome = orchestrator.run(&job).await;
        drop(orchestrator);
        forward.await?;
        let _ = tx.send(UiMessage::Finished);
        drop(tx);
        screen.await??;
        outcome
    } else {
        let forward = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                if let Some(progress) = event.as_progress() {
                    eprintln!("[{:>3.0}%] {}", progress.percent, progress.status);
                }
            }
        });
        let outcome = orchestrator.run(&job).await;
        drop(orchestrator);
        forward.await?;
        outcome
    };

    info!(
        "Matrix finished with {} results and {} errors",
        outcome.results.len(),
        outcome.errors.len()
    );
    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print!("{}", report::matrix(&outcome, &sort));
    }
    Ok(())
}

fn manual_spec(args: &AnalyzeArgs) -> HardwareSpec {
    HardwareSpec {
        cpu: args.cpu.clone().unwrap_or_default(),
        gpu: args.gpu.clone().unwrap_or_default(),
        ram: args.ram.clone().unwrap_or_default(),
        ram_mhz: args.ram_mhz.clone(),
        virtual_ram: args.virtual_ram.clone(),
    }
}

fn load_config(path: Option<&PathBuf>) -> RigbenchConfig {
    let Some(path) = path else {
        return RigbenchConfig::default();
    };
    match RigbenchConfig::from_file(path) {
        Ok(cfg) => {
            if let Err(err) = cfg.validate() {
                eprintln!(
                    "Invalid config in '{}': {err}. Falling back to internal defaults.",
                    path.display()
                );
                RigbenchConfig::default()
            } else {
                cfg
            }
        }
        Err(err) => {
            eprintln!(
                "Failed to load config from '{}': {err}. Falling back to internal defaults.",
                path.display()
            );
            RigbenchConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_matrix_with_repeated_flags() {
        let cli = Cli::try_parse_from([
            "rigbench",
            "--offline",
            "matrix",
            "--device",
            "Galaxy S23",
            "--device",
            "Pixel 8",
            "--game",
            "PUBG Mobile",
            "--sort",
            "fps",
            "--sort",
            "fps",
        ])
        .expect("parse");
        assert!(cli.offline);
        let Command::Matrix(args) = cli.command else {
            panic!("expected matrix command");
        };
        assert_eq!(args.devices, ["Galaxy S23", "Pixel 8"]);
        assert_eq!(args.games, ["PUBG Mobile"]);
        assert_eq!(args.sort, [SortColumn::Fps, SortColumn::Fps]);
    }

    #[test]
    fn device_conflicts_with_manual_hardware() {
        let parsed = Cli::try_parse_from([
            "rigbench", "analyze", "--game", "Valorant", "--device", "Pixel 8", "--cpu", "Ryzen",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn compare_needs_two_ids() {
        assert!(Cli::try_parse_from(["rigbench", "saved", "compare", "only-one"]).is_err());
        assert!(Cli::try_parse_from(["rigbench", "saved", "compare", "a", "b"]).is_ok());
    }

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let config = load_config(Some(&PathBuf::from("/nonexistent/rigbench.toml")));
        assert!(config.validate().is_ok());
        assert!(load_config(None).validate().is_ok());
    }
}
