use crate::demo::{run_categories, run_demo, run_score, DemoArgs, ScoreArgs};
use crate::server;
use archetype_assessment::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Archetype Assessment",
    about = "Score archetype resistance assessments and serve them over HTTP",
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
    /// List the assessment categories available to the catalog
    Categories,
    /// Score a saved response set (JSON array or CSV export)
    Score(ScoreArgs),
    /// Score a synthetic, fully answered assessment and print the profile
    Demo(DemoArgs),
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
        Command::Categories => run_categories(),
        Command::Score(args) => run_score(args),
        Command::Demo(args) => run_demo(args),
    }
}
