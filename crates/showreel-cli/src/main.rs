mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use showreel_core::config::AppConfig;
use showreel_core::models::ProjectRecord;
use showreel_core::projection::{ActionKind, Category};
use showreel_core::video_id;
use showreel_runtime::HttpRuntime;

#[derive(Debug, Parser)]
#[command(name = "showreel", version, about)]
struct Cli {
    /// Config file to use instead of the user config.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the published sheet CSV URL.
    #[arg(long, global = true)]
    sheet_url: Option<String>,

    /// Override the YouTube Data API key.
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Also write logs to a daily rotating file in this directory.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load the gallery and print its cards.
    List {
        #[arg(short, long, default_value = "all")]
        filter: Category,
        /// Print display records as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Open the N-th card (1-based) of a filtered view.
    Open {
        index: usize,
        #[arg(short, long, default_value = "all")]
        filter: Category,
        /// Print the action instead of opening it.
        #[arg(long)]
        print: bool,
    },
    /// Extract the video id from a URL.
    Extract { url: String },
    /// Show configuration.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Print the user config file path.
    Path,
    /// Print the effective configuration.
    Show,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.verbose, cli.log_dir.as_deref());

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

/// Install the fmt subscriber; the returned guard flushes the file writer.
fn init_logging(
    verbose: bool,
    log_dir: Option<&std::path::Path>,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let level = if verbose { "debug" } else { "info" };
    let default_filter = format!(
        "showreel={level},showreel_core={level},showreel_api={level},showreel_runtime={level}"
    );
    let filter = || {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter))
    };

    match log_dir {
        Some(dir) => {
            use tracing_subscriber::layer::SubscriberExt;
            use tracing_subscriber::util::SubscriberInitExt;
            use tracing_subscriber::Layer;

            let appender = tracing_appender::rolling::daily(dir, "showreel.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_filter(filter()),
                )
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(writer)
                        .with_filter(filter()),
                )
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(filter())
                .init();
            None
        }
    }
}

fn load_config(cli: &Cli) -> Result<AppConfig, String> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    }
    .map_err(|e| e.to_string())?;

    if let Some(url) = &cli.sheet_url {
        config.source.sheet_csv_url = url.clone();
    }
    if let Some(key) = &cli.api_key {
        config.youtube.api_key = key.clone();
    }
    Ok(config)
}

async fn run(cli: Cli) -> Result<(), String> {
    match &cli.command {
        Command::Extract { url } => match video_id::extract(url) {
            Some(id) => {
                println!("{id}");
                Ok(())
            }
            None => Err(format!("no video id found in {url:?}")),
        },
        Command::Config { action } => {
            match action {
                ConfigAction::Path => println!("{}", AppConfig::config_path().display()),
                ConfigAction::Show => {
                    let config = load_config(&cli)?;
                    print!("{}", render::config_summary(&config));
                }
            }
            Ok(())
        }
        Command::List { filter, json } => {
            let runtime = HttpRuntime::from_config(load_config(&cli)?);
            let records = load(&runtime).await?;
            let cards = runtime.filter(&records, *filter);

            if *json {
                let out = serde_json::to_string_pretty(&cards).map_err(|e| e.to_string())?;
                println!("{out}");
            } else {
                print!("{}", render::gallery(&cards, *filter));
                if let Some(admin) = runtime.config().admin_url() {
                    println!("\nAdmin: {admin}");
                }
            }
            Ok(())
        }
        Command::Open {
            index,
            filter,
            print,
        } => {
            let runtime = HttpRuntime::from_config(load_config(&cli)?);
            let records = load(&runtime).await?;
            let cards = runtime.filter(&records, *filter);

            let card = index
                .checked_sub(1)
                .and_then(|i| cards.get(i))
                .ok_or_else(|| format!("no card #{index} ({} in view)", cards.len()))?;
            let action = runtime.resolve_click_action(&card.record);

            if *print {
                println!("{}", render::action(&action));
                return Ok(());
            }
            if action.kind == ActionKind::External {
                tracing::info!(url = %action.target, "Link is not embeddable, opening as-is");
            }
            open::that(&action.target).map_err(|e| format!("failed to open {}: {e}", action.target))
        }
    }
}

/// Load the gallery, turning fatal errors into the static message.
async fn load(runtime: &HttpRuntime) -> Result<Vec<ProjectRecord>, String> {
    runtime
        .load_and_process()
        .await
        .map_err(|e| format!("{}\n({e})", e.user_message()))
}
