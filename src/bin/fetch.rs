use anyhow::Result;
use clap::Parser;
use dotenvy::dotenv;

use topic_planner::config::Config;
use topic_planner::telemetry::{self};
use topic_planner::{ingestion, init};

/// Poll enabled RSS sources and plan their new entries.
#[derive(Parser)]
#[command(name = "fetch", about = "Poll RSS sources into content_plan")]
struct Cli {
    #[arg(short, long)]
    dsn: Option<String>,
    /// Emit a single JSON envelope to stdout; logs go to stderr
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    telemetry::config::set_json_mode(cli.json);
    telemetry::config::init_tracing();

    let cfg = Config::from_env()?.with_dsn(cli.dsn);
    let pool = init::connect(&cfg).await?;

    // feed and store failures never fail the job; the transaction is rolled back
    if let Err(err) = ingestion::run(&pool, &cfg).await {
        telemetry::fetch().error(format!("⚠️  오류: {err:#}"));
    }
    pool.close().await;
    Ok(())
}
