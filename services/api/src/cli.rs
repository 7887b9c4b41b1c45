use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use purchase_desk::config::AppConfig;
use purchase_desk::error::AppError;
use purchase_desk::names::{first_last, normalize};
use purchase_desk::purchasing::PurchaseDeskService;

use crate::infra::SqlitePurchaseGateway;
use crate::server;

#[derive(Parser, Debug)]
#[command(
    name = "Purchase Desk",
    about = "Browse the purchasing ledger and normalize employee names from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Canonicalize a free-text name and print the result
    Normalize(NormalizeArgs),
    /// Write the top ledger rows as CSV to a file or stdout
    Export(ExportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug)]
pub(crate) struct NormalizeArgs {
    /// The name to canonicalize
    pub(crate) name: String,
    /// Print only "FIRST LAST" instead of the full canonical form
    #[arg(long)]
    pub(crate) first_last: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    /// Maximum rows to export (capped at 100)
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    /// Destination file; stdout when omitted
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Normalize(args) => run_normalize(args),
        Command::Export(args) => run_export(args),
    }
}

fn run_normalize(args: NormalizeArgs) -> Result<(), AppError> {
    let rendered = if args.first_last {
        first_last(&args.name)
    } else {
        normalize(&args.name)
    };
    println!("{rendered}");
    Ok(())
}

fn run_export(args: ExportArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let gateway = Arc::new(SqlitePurchaseGateway::new(&config.database));
    let desk = PurchaseDeskService::new(gateway, &config.matching);

    let csv = desk.export_csv(args.limit)?;
    match args.output {
        Some(path) => {
            std::fs::write(&path, csv.as_bytes())?;
            println!("wrote {}", path.display());
        }
        None => print!("{csv}"),
    }
    Ok(())
}
