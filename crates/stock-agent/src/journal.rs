//! Append-only markdown journal of analyses, one file per day

use chrono::{DateTime, Local};
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write as _;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::Result;
use crate::result::{AnalysisResult, format_number};

/// Writes analysis entries to `<log_dir>/<YYYY-MM-DD>-stock-log.md`
#[derive(Debug, Clone)]
pub struct AnalysisJournal {
    log_dir: PathBuf,
}

impl AnalysisJournal {
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_dir: log_dir.into(),
        }
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Journal file covering the day of `at`
    pub fn path_for(&self, at: &DateTime<Local>) -> PathBuf {
        self.log_dir.join(format!("{}-stock-log.md", at.format("%Y-%m-%d")))
    }

    /// Append an entry stamped with the current local time
    pub fn append(&self, result: &AnalysisResult) -> Result<PathBuf> {
        self.append_at(result, Local::now())
    }

    /// Append an entry stamped with `at`, creating the directory if needed.
    ///
    /// The file is opened and closed within the call.
    pub fn append_at(&self, result: &AnalysisResult, at: DateTime<Local>) -> Result<PathBuf> {
        fs::create_dir_all(&self.log_dir)?;

        let path = self.path_for(&at);
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        file.write_all(render_entry(result, &at).as_bytes())?;

        debug!(path = %path.display(), ticker = %result.ticker, "Journal entry appended");
        Ok(path)
    }
}

/// Markdown block for one analysis
pub fn render_entry(result: &AnalysisResult, at: &DateTime<Local>) -> String {
    Entry { result, at }.to_string()
}

struct Entry<'a> {
    result: &'a AnalysisResult,
    at: &'a DateTime<Local>,
}

impl fmt::Display for Entry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.result;
        writeln!(f)?;
        writeln!(
            f,
            "## Stock Analysis - {}",
            self.at.format("%Y-%m-%dT%H:%M:%S%.6f")
        )?;
        writeln!(f, "**Ticker:** {}", result.ticker)?;
        writeln!(
            f,
            "**Current Price:** ${}",
            format_number(result.current_price)
        )?;
        writeln!(
            f,
            "**20-Day Moving Average:** ${}",
            format_number(result.moving_average)
        )?;
        writeln!(f, "**Price Assessment:** {}", result.price_assessment)?;
        writeln!(
            f,
            "**Projected ROI (5% Gain):** {}",
            result.roi_5_percent_gain()
        )?;
        writeln!(
            f,
            "**Projected ROI (10% Gain):** {}",
            result.roi_10_percent_gain()
        )?;
        writeln!(f, "**Fundamentals:** {}", result.fundamentals)?;
        writeln!(f, "**Recommendation:** {}", result.recommendation)?;
        writeln!(f, "---")
    }
}
