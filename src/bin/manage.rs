use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;

use topic_planner::config::Config;
use topic_planner::telemetry::{self};
use topic_planner::{init, templates, topics};

#[derive(Parser)]
#[command(name = "manage", about = "Inspect and extend content_plan")]
struct Cli {
    #[arg(global = true, short, long)]
    dsn: Option<String>,
    /// Emit a single JSON envelope to stdout; logs go to stderr
    #[arg(global = true, long, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List planned topics, newest first (latest 20 unless a status is given)
    List {
        /// Status to filter on; `all` lists everything
        status: Option<String>,
    },
    /// Plan one topic from a weighted, cooled-down template
    Generate,
    /// Apply database migrations
    Init,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    telemetry::config::set_json_mode(cli.json);
    telemetry::config::init_tracing();

    let cfg = Config::from_env()?.with_dsn(cli.dsn);
    let pool = init::connect(&cfg).await?;

    match cli.command {
        Commands::List { status } => topics::run(&pool, &cfg, status).await?,
        Commands::Generate => { templates::run(&pool, &cfg).await?; }
        Commands::Init => init::run(&pool).await?,
    }

    pool.close().await;
    Ok(())
}
