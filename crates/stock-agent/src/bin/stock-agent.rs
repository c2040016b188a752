//! Stock Analysis Agent CLI
//!
//! Prompts for tickers and prints a moving-average check, ROI projections and
//! a recommendation for each one.
//!
//! # Usage
//!
//! ```bash
//! # Optional: real fundamentals instead of N/A
//! export ALPHA_VANTAGE_API_KEY=your_key_here
//!
//! # Interactive
//! cargo run --bin stock-agent
//!
//! # One-shot
//! cargo run --bin stock-agent -- --ticker AAPL --json
//! ```

use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

use stock_agent::config::LOG_DIR_ENV;
use stock_agent::{
    AnalysisJournal, FormatterFactory, HistoryPeriod, MarketData, Session, StockAnalyzer,
    StockConfig,
};
use stock_utils::LogFormat;

#[derive(Parser, Debug)]
#[command(name = "stock-agent")]
#[command(about = "Moving-average check and recommendation for a ticker", long_about = None)]
#[command(version)]
struct Args {
    /// Analyze one ticker and exit instead of prompting
    #[arg(short, long)]
    ticker: Option<String>,

    /// Directory for the daily markdown journal
    #[arg(long, env = LOG_DIR_ENV)]
    log_dir: Option<PathBuf>,

    /// History look-back (1d, 5d, 1mo, 3mo, 6mo, 1y, 2y, 5y, 10y, ytd, max)
    #[arg(long, default_value = "1mo")]
    period: HistoryPeriod,

    /// Do not write the journal
    #[arg(long)]
    no_log: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Diagnostic output format (pretty or json)
    #[arg(long, default_value = "pretty")]
    log_format: LogFormat,
}

fn print_banner() {
    println!("Welcome to the Stock Analysis Agent!");
    println!("Enter a stock ticker to receive a quick analysis and recommendation.");
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    stock_utils::init_tracing(args.log_format, "warn");

    let mut builder = StockConfig::builder().history_period(args.period);
    if let Some(dir) = args.log_dir {
        builder = builder.log_dir(dir);
    }
    let config = builder.with_env().build()?;

    info!(period = %config.history_period, "Configuration loaded");

    let market = MarketData::new(&config)?;
    info!(fundamentals = market.has_fundamentals(), "Market data ready");
    let analyzer = StockAnalyzer::new(market).with_period(config.history_period);
    let formatter = FormatterFactory::create(args.json);

    let stdin = io::stdin();
    let mut session = Session::new(analyzer, formatter, stdin.lock(), io::stdout());
    if !args.no_log {
        let journal = AnalysisJournal::new(&config.log_dir);
        info!(log_dir = %journal.log_dir().display(), "Journal enabled");
        session = session.with_journal(journal);
    }

    if let Some(ticker) = args.ticker {
        let succeeded = session.run_once(&ticker).await?;
        return Ok(if succeeded {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    print_banner();
    let analyzed = session.run().await?;
    info!(analyzed, "Session finished");

    Ok(ExitCode::SUCCESS)
}
