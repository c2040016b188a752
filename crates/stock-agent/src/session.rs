//! Interactive prompt loop

use std::io::{BufRead, Write};
use tracing::{info, warn};

use crate::analysis::{StockAnalyzer, normalize_ticker};
use crate::error::Result;
use crate::journal::AnalysisJournal;
use crate::market::MarketDataSource;
use crate::report::Formatter;

pub const PROMPT: &str = "Enter Stock Ticker (or type 'exit' to quit): ";
pub const GOODBYE: &str = "Exiting Stock Agent. Have a great day!";

/// One line of user input, interpreted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `exit`, in any case
    Exit,
    /// Blank line
    Skip,
    /// Anything else, uppercased
    Analyze(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            Self::Skip
        } else if line.eq_ignore_ascii_case("exit") {
            Self::Exit
        } else {
            Self::Analyze(normalize_ticker(line))
        }
    }
}

/// Prompt, analyze, print, journal; repeat until `exit` or end of input
pub struct Session<S, R, W> {
    analyzer: StockAnalyzer<S>,
    journal: Option<AnalysisJournal>,
    formatter: Box<dyn Formatter>,
    input: R,
    output: W,
}

impl<S, R, W> Session<S, R, W>
where
    S: MarketDataSource,
    R: BufRead,
    W: Write,
{
    pub fn new(
        analyzer: StockAnalyzer<S>,
        formatter: Box<dyn Formatter>,
        input: R,
        output: W,
    ) -> Self {
        Self {
            analyzer,
            journal: None,
            formatter,
            input,
            output,
        }
    }

    /// Record every successful analysis in `journal`
    pub fn with_journal(mut self, journal: AnalysisJournal) -> Self {
        self.journal = Some(journal);
        self
    }

    /// Run until `exit` or end of input. Returns the number of tickers
    /// analyzed, successful or not.
    pub async fn run(&mut self) -> Result<usize> {
        let mut analyzed = 0;

        loop {
            write!(self.output, "\n{PROMPT}")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                info!("End of input");
                writeln!(self.output)?;
                break;
            }

            match Command::parse(&line) {
                Command::Exit => break,
                Command::Skip => {}
                Command::Analyze(ticker) => {
                    self.handle(&ticker).await?;
                    analyzed += 1;
                }
            }
        }

        writeln!(self.output, "\n{GOODBYE}")?;
        Ok(analyzed)
    }

    /// Analyze a single ticker. Returns whether the analysis succeeded.
    pub async fn run_once(&mut self, ticker: &str) -> Result<bool> {
        self.handle(&normalize_ticker(ticker)).await
    }

    async fn handle(&mut self, ticker: &str) -> Result<bool> {
        let result = match self.analyzer.analyze(ticker).await {
            Ok(result) => result,
            Err(e) => {
                writeln!(self.output, "{}", self.formatter.format_error(&e))?;
                return Ok(false);
            }
        };

        writeln!(self.output, "\n{}", self.formatter.format_analysis(&result))?;

        if let Some(journal) = &self.journal {
            match journal.append(&result) {
                Ok(path) => writeln!(self.output, "\nAnalysis logged to: {}", path.display())?,
                Err(e) => {
                    warn!(error = %e, "Could not write journal entry");
                    writeln!(self.output, "\nWarning: analysis not logged: {e}")?;
                }
            }
        }

        Ok(true)
    }

    /// Consume the session, returning the output sink
    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::MockMarketDataSource;
    use crate::report::TextFormatter;
    use crate::result::Fundamentals;
    use std::io::Cursor;

    fn session(
        source: MockMarketDataSource,
        input: &str,
    ) -> Session<MockMarketDataSource, Cursor<Vec<u8>>, Vec<u8>> {
        Session::new(
            StockAnalyzer::new(source),
            Box::new(TextFormatter),
            Cursor::new(input.as_bytes().to_vec()),
            Vec::new(),
        )
    }

    fn healthy_source() -> MockMarketDataSource {
        let mut source = MockMarketDataSource::new();
        source.expect_current_price().returning(|_| Ok(100.0));
        source
            .expect_historical_closes()
            .returning(|_, _| Ok(vec![100.0; 20]));
        source
            .expect_fundamentals()
            .returning(|_| Ok(Fundamentals::unavailable()));
        source
    }

    fn output_of(session: Session<MockMarketDataSource, Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(session.into_output()).unwrap()
    }

    #[test]
    fn test_command_parse() {
        assert_eq!(Command::parse("exit\n"), Command::Exit);
        assert_eq!(Command::parse("  EXIT "), Command::Exit);
        assert_eq!(Command::parse("ExIt"), Command::Exit);
        assert_eq!(Command::parse("   \n"), Command::Skip);
        assert_eq!(Command::parse("aapl\n"), Command::Analyze("AAPL".to_string()));
        assert_eq!(Command::parse("exits"), Command::Analyze("EXITS".to_string()));
    }

    #[tokio::test]
    async fn test_exit_never_analyzes() {
        let mut source = MockMarketDataSource::new();
        source.expect_current_price().never();
        source.expect_historical_closes().never();
        source.expect_fundamentals().never();

        let mut session = session(source, "Exit\nAAPL\n");
        assert_eq!(session.run().await.unwrap(), 0);

        let output = output_of(session);
        assert!(output.contains(PROMPT));
        assert!(output.contains(GOODBYE));
    }

    #[tokio::test]
    async fn test_end_of_input_stops() {
        let mut session = session(MockMarketDataSource::new(), "");
        assert_eq!(session.run().await.unwrap(), 0);
        assert!(output_of(session).contains(GOODBYE));
    }

    #[tokio::test]
    async fn test_error_does_not_stop_loop() {
        let mut source = MockMarketDataSource::new();
        source
            .expect_current_price()
            .returning(|t| Ok(if t == "BAD" { 0.0 } else { 100.0 }));
        source
            .expect_historical_closes()
            .times(1)
            .returning(|_, _| Ok(vec![100.0; 20]));
        source
            .expect_fundamentals()
            .returning(|_| Ok(Fundamentals::unavailable()));

        let mut session = session(source, "bad\n\nmsft\nexit\n");
        assert_eq!(session.run().await.unwrap(), 2);

        let output = output_of(session);
        assert!(output.contains("Error: Failed to fetch current price. Check ticker symbol."));
        assert!(output.contains("Analysis for MSFT:"));
        assert!(output.contains("Recommendation: Hold/Watch"));
        assert!(!output.contains("Analysis logged to"));
    }

    #[tokio::test]
    async fn test_successful_analysis_is_journaled() {
        let tmp = tempfile::tempdir().unwrap();
        let journal = AnalysisJournal::new(tmp.path());

        let mut session = session(healthy_source(), "aapl\nexit\n").with_journal(journal);
        session.run().await.unwrap();

        let output = output_of(session);
        assert!(output.contains("Analysis logged to: "));

        let entries: Vec<_> = std::fs::read_dir(tmp.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        let contents = std::fs::read_to_string(entries[0].as_ref().unwrap().path()).unwrap();
        assert!(contents.contains("**Ticker:** AAPL"));
    }

    #[tokio::test]
    async fn test_journal_failure_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("logs");
        std::fs::write(&blocker, "file").unwrap();

        let mut session =
            session(healthy_source(), "").with_journal(AnalysisJournal::new(&blocker));
        assert!(session.run_once("aapl").await.unwrap());

        let output = output_of(session);
        assert!(output.contains("Analysis for AAPL:"));
        assert!(output.contains("Warning: analysis not logged"));
    }

    #[tokio::test]
    async fn test_run_once_reports_failure() {
        let mut source = MockMarketDataSource::new();
        source.expect_current_price().returning(|_| Ok(50.0));
        source
            .expect_historical_closes()
            .returning(|_, _| Ok(Vec::new()));

        let mut session = session(source, "");
        assert!(!session.run_once("tsla").await.unwrap());
        assert!(output_of(session).contains("Error: Failed to fetch historical prices."));
    }
}
