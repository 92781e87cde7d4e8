use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tracing::info;

use go_mocker::config::MockerConfig;
use go_mocker::logging::init_logging;
use go_mocker::mocker::Mocker;
use go_mocker::server::run_server;
use go_mocker::service::locator::find_mock_dir;
use go_mocker::service::sink::DirSink;
use go_mocker::service::{BatchRequest, MockService};

#[derive(Parser)]
#[command(name = "go-mocker")]
#[command(version, about = "Generate stub implementations of Go interfaces")]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Also log to stderr
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate mock files for interfaces found on disk
    Generate {
        /// Go file declaring the interfaces (".go" is appended when missing)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Interface to mock; repeat for several
        #[arg(short, long = "interface")]
        interfaces: Vec<String>,

        /// Directory searched for interfaces and mock folders
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Directory mocks are written to
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Generate per-method hook fields
        #[arg(long)]
        hooks: bool,
    },
    /// Serve `POST /mock` over HTTP
    Serve {
        /// Listen address, e.g. localhost:8080
        #[arg(long)]
        address: Option<String>,
    },
}

async fn generate(
    mut config: MockerConfig,
    file: Option<PathBuf>,
    interfaces: Vec<String>,
    root: PathBuf,
    output: Option<PathBuf>,
    hooks: bool,
) -> anyhow::Result<()> {
    if hooks {
        config.template.hooks = true;
    }
    let request = BatchRequest::from_args(file, interfaces)?;

    let output_dir = output
        .or_else(|| config.output_dir.clone())
        .unwrap_or_else(|| find_mock_dir(&root));
    info!("Writing mocks to {}", output_dir.display());

    let service = MockService::new(Mocker::from_config(&config), root);
    let report = service
        .process(&request, Arc::new(DirSink::new(output_dir)))
        .await?;

    for mock in &report.generated {
        println!("{}", mock.output.display());
    }
    for failure in &report.failed {
        eprintln!("{}: {}", failure.interface, failure.error);
    }

    if report.generated.is_empty() {
        bail!("no mock generated");
    }
    Ok(())
}

async fn serve(config: MockerConfig, address: Option<String>) -> anyhow::Result<()> {
    let address = address.unwrap_or_else(|| config.server.address.clone());
    let root = std::env::current_dir().context("failed to read current directory")?;
    let service = Arc::new(MockService::new(Mocker::from_config(&config), root));

    run_server(&address, service)
        .await
        .with_context(|| format!("failed to serve on {}", address))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = MockerConfig::load(cli.config.as_deref())?;
    let _guard = init_logging(cli.verbose);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    match cli.command {
        Command::Generate {
            file,
            interfaces,
            root,
            output,
            hooks,
        } => runtime.block_on(generate(config, file, interfaces, root, output, hooks)),
        Command::Serve { address } => runtime.block_on(serve(config, address)),
    }
}
