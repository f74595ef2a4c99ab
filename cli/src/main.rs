use std::path::PathBuf;

use clap::{Parser, Subcommand};
use industry_strength::{
    api::AnalysisBuilder,
    models::IndexList,
    services::ReportStatus,
    utils::{init_logger, today_exchange, trailing_window_strings},
};

#[derive(Parser)]
#[command(name = "industry-strength")]
#[command(about = "Rank NSE index constituents by price relative to SMA/EMA and summarise by industry")]
pub struct Cli {
    /// Provider root URL
    #[arg(long, global = true, default_value = industry_strength::services::DEFAULT_BASE_URL)]
    pub base_url: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download one symbol's historical series
    Fetch {
        #[arg(short, long)]
        symbol: String,
        /// Start date (dd-mm-yyyy), defaults to 366 days ago
        #[arg(long)]
        from: Option<String>,
        /// End date (dd-mm-yyyy), defaults to today
        #[arg(long)]
        to: Option<String>,
        /// Directory receiving the CSV
        #[arg(long, default_value = "temporary")]
        keep_dir: PathBuf,
    },
    /// Compute the latest SMA/EMA for one symbol
    Indicators {
        #[arg(short, long)]
        symbol: String,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
        #[arg(short, long, default_value_t = 14)]
        period: usize,
    },
    /// Rank every symbol of a constituent list
    Rank {
        /// CSV with `Company Name`, `Industry` and `Symbol` columns
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        output_dir: PathBuf,
        #[arg(short, long, default_value_t = 14)]
        period: usize,
    },
    /// Summarise a ranking file by industry
    Report {
        #[arg(short, long)]
        ranking: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Rank an index list and write its industry report
    Run {
        #[arg(short, long, value_enum, default_value_t = IndexList::Nifty50)]
        index: IndexList,
        #[arg(short, long, default_value_t = 14)]
        period: usize,
        /// Folder chosen for output; reports land in its RelativeStrength subfolder
        #[arg(short, long)]
        output_dir: PathBuf,
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
    },
}

fn window(from: Option<String>, to: Option<String>) -> (String, String) {
    let (default_from, default_to) = trailing_window_strings(today_exchange());
    (from.unwrap_or(default_from), to.unwrap_or(default_to))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger()?;

    let cli = Cli::parse();
    let builder = AnalysisBuilder::new().with_base_url(cli.base_url);

    match cli.command {
        Commands::Fetch { symbol, from, to, keep_dir } => {
            let analyzer = builder.with_transient_dir(keep_dir).build()?;
            let (from, to) = window(from, to);
            match analyzer.fetch_series(&symbol, &from, &to).await? {
                Some(path) => println!("{}", path.display()),
                None => anyhow::bail!("no data available for {}", symbol),
            }
        }
        Commands::Indicators { symbol, from, to, period } => {
            let analyzer = builder.build()?;
            let (from, to) = window(from, to);
            match analyzer.compute_indicators(&symbol, &from, &to, period).await? {
                Some(result) => println!("{}", serde_json::to_string_pretty(&result)?),
                None => println!("Not enough data to calculate {}-day SMA/EMA for {}", period, symbol),
            }
        }
        Commands::Rank { input, output_dir, period } => {
            let analyzer = builder.build()?;
            let path = analyzer.build_ranking(&input, &output_dir, period).await?;
            println!("{}", path.display());
        }
        Commands::Report { ranking, output } => {
            let analyzer = builder.build()?;
            match analyzer.build_industry_report(&ranking, &output) {
                ReportStatus::Written { path, .. } => println!("{}", path.display()),
                ReportStatus::Failed { message } => eprintln!("{}", message),
            }
        }
        Commands::Run { index, period, output_dir, data_dir } => {
            let analyzer = builder
                .with_data_dir(data_dir)
                .with_output_dir(output_dir.join("RelativeStrength"))
                .build()?;
            let run = analyzer
                .run_industry_strength(index, period, |progress| {
                    tracing::info!(
                        "RUN: {}/{} {} ({} ranked)",
                        progress.processed,
                        progress.total,
                        progress.symbol,
                        progress.ranked
                    );
                })
                .await?;

            println!("Ranking: {}", run.ranking_path.display());
            match &run.report {
                ReportStatus::Written { path, .. } => println!("Industry report: {}", path.display()),
                ReportStatus::Failed { message } => eprintln!("Industry report failed: {}", message),
            }
        }
    }

    Ok(())
}
