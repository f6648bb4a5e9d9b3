use crate::demo::{run_assessment, run_demo, AssessArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use underwriter::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Restaurant Underwriter",
    about = "Score, decide, and price restaurant insurance applications",
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
    /// Assess a single application read from a JSON file and print the result
    Assess(AssessArgs),
    /// Run the mock enrichment profiles end to end and print their assessments
    Demo,
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

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Assess(args) => run_assessment(args),
        Command::Demo => run_demo(),
    }
}
