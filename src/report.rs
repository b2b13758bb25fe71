//! Output formatters for harness results.
//!
//! - [`OutputFormat::Summary`]: aligned human-readable tables (default)
//! - [`OutputFormat::Tsv`]: tab-separated values
//! - [`OutputFormat::Json`]: JSON for programmatic use
//!
//! Rendering goes to any [`Write`] through [`Report`].

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use serde::Serialize;

use crate::collision::CollisionReport;
use crate::detection::DetectionReport;
use crate::error::{DigestLabError, Result};
use crate::harness::{Evaluator, HarnessReport, SectionReport};
use crate::pattern::PatternReport;
use crate::throughput::ThroughputReport;

/// Output format for harness results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned tables (default).
    #[default]
    Summary,
    /// Tab-separated values.
    Tsv,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    /// Lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Tsv => "tsv",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = DigestLabError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "summary" | "text" | "human" => Ok(Self::Summary),
            "tsv" | "tab" => Ok(Self::Tsv),
            "json" => Ok(Self::Json),
            _ => Err(DigestLabError::UnknownFormat(s.to_string())),
        }
    }
}

const fn marker(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

/// A simple table of string cells.
///
/// # Example
///
/// ```rust
/// use digestlab::report::{OutputFormat, Table};
///
/// let mut table = Table::new(["name", "bits"]);
/// table.push_row(["crc-32", "32"]);
/// let mut out = Vec::new();
/// table.write(&mut out, OutputFormat::Tsv)?;
/// assert_eq!(String::from_utf8(out).unwrap(), "name\tbits\ncrc-32\t32\n");
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Table with the given column headers.
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row.
    pub fn push_row<S: Into<String>>(&mut self, cells: impl IntoIterator<Item = S>) {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    /// Number of data rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// `true` if there are no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                let len = cell.chars().count();
                match widths.get_mut(i) {
                    Some(w) => *w = (*w).max(len),
                    None => widths.push(len),
                }
            }
        }
        widths
    }

    /// Write as space-aligned columns.
    ///
    /// # Errors
    ///
    /// Propagates writer errors.
    pub fn write_aligned<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<()> {
        let widths = self.widths();
        let write_line = |w: &mut W, cells: &[String]| -> io::Result<()> {
            let mut line = String::new();
            for (i, cell) in cells.iter().enumerate() {
                if i > 0 {
                    line.push_str("  ");
                }
                let width = widths.get(i).copied().unwrap_or(0);
                line.push_str(&format!("{cell:<width$}"));
            }
            writeln!(w, "{}", line.trim_end())
        };

        write_line(w, &self.headers)?;
        let rule: Vec<String> = widths.iter().map(|&n| "-".repeat(n)).collect();
        write_line(w, &rule)?;
        for row in &self.rows {
            write_line(w, row)?;
        }
        Ok(())
    }

    /// Write as tab-separated values with a header row.
    ///
    /// # Errors
    ///
    /// Propagates writer errors.
    pub fn write_tsv<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<()> {
        writeln!(w, "{}", self.headers.join("\t"))?;
        for row in &self.rows {
            writeln!(w, "{}", row.join("\t"))?;
        }
        Ok(())
    }

    /// Write in the given format. JSON renders an array of header-keyed
    /// objects.
    ///
    /// # Errors
    ///
    /// Propagates writer errors.
    pub fn write<W: Write + ?Sized>(&self, w: &mut W, format: OutputFormat) -> io::Result<()> {
        match format {
            OutputFormat::Summary => self.write_aligned(w),
            OutputFormat::Tsv => self.write_tsv(w),
            OutputFormat::Json => {
                let objects: Vec<serde_json::Map<String, serde_json::Value>> = self
                    .rows
                    .iter()
                    .map(|row| {
                        self.headers
                            .iter()
                            .cloned()
                            .zip(row.iter().cloned().map(serde_json::Value::String))
                            .collect()
                    })
                    .collect();
                serde_json::to_writer_pretty(&mut *w, &objects)?;
                writeln!(w)
            }
        }
    }
}

/// Detection matrix: one row per algorithm, one column per corruption.
#[must_use]
pub fn detection_table(report: &DetectionReport) -> Table {
    let matrix = &report.matrix;
    let mut table = Table::new(
        std::iter::once("algorithm".to_string()).chain(matrix.case_labels.iter().cloned()),
    );
    for row in &matrix.rows {
        table.push_row(
            std::iter::once(row.algorithm.clone())
                .chain(row.differs.iter().map(|&d| marker(d).to_string())),
        );
    }
    table
}

/// Pattern matrix: one row per pattern, one column per algorithm.
#[must_use]
pub fn pattern_table(report: &PatternReport) -> Table {
    let matrix = &report.matrix;
    let mut table = Table::new(
        std::iter::once("pattern".to_string())
            .chain(matrix.rows.iter().map(|r| r.algorithm.clone())),
    );
    for (column, label) in matrix.case_labels.iter().enumerate() {
        table.push_row(
            std::iter::once(label.clone())
                .chain(matrix.rows.iter().map(|r| marker(r.differs[column]).to_string())),
        );
    }
    table
}

/// Throughput samples.
#[must_use]
pub fn throughput_table(report: &ThroughputReport) -> Table {
    let mut table = Table::new(["algorithm", "trials", "time_us", "mib_per_sec", "digest"]);
    for sample in &report.samples {
        table.push_row([
            sample.algorithm.clone(),
            sample.trials.to_string(),
            sample.elapsed_micros.to_string(),
            sample
                .mib_per_sec
                .map_or_else(|| "-".to_string(), |rate| format!("{rate:.1}")),
            sample.digest.to_string(),
        ]);
    }
    table
}

/// Collision statistics.
#[must_use]
pub fn collision_table(report: &CollisionReport) -> Table {
    let mut table = Table::new(["algorithm", "bits", "collisions", "distinct", "rate", "expected"]);
    for stats in &report.stats {
        table.push_row([
            stats.algorithm.clone(),
            stats.width.bits().to_string(),
            stats.excess_collisions.to_string(),
            stats.distinct_digests.to_string(),
            format!("{:.3}%", stats.collision_rate),
            format!("{:.1}", stats.expected_collisions),
        ]);
    }
    table
}

/// `key=value` run parameters a section's numbers depend on.
fn parameters(section: &SectionReport) -> Vec<String> {
    match section {
        SectionReport::Detection(r) => vec![format!("baseline_len={}", r.baseline_len)],
        SectionReport::Throughput(r) => vec![
            format!("buffer_len={}", r.buffer_len),
            format!("trials={}", r.trials),
        ],
        SectionReport::Collision(r) => vec![
            format!("trials={}", r.config.trials),
            format!("buffer_len={}", r.config.buffer_len),
            format!("seed={}", r.seed),
        ],
        SectionReport::Pattern(_) => Vec::new(),
    }
}

const fn title(evaluator: Evaluator) -> &'static str {
    match evaluator {
        Evaluator::Detection => "Error detection",
        Evaluator::Throughput => "Throughput",
        Evaluator::Collision => "Collisions",
        Evaluator::Pattern => "Pattern sensitivity",
    }
}

#[derive(Serialize)]
struct JsonSection<'a> {
    evaluator: Evaluator,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<&'a SectionReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    algorithms: &'a [String],
    sections: Vec<JsonSection<'a>>,
}

/// Report generator for harness results.
pub struct Report<W: Write> {
    writer: W,
    format: OutputFormat,
}

impl<W: Write> Report<W> {
    /// Create a new report generator.
    pub const fn new(writer: W, format: OutputFormat) -> Self {
        Self { writer, format }
    }

    /// Consume the report, returning the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Write a complete harness report.
    ///
    /// # Errors
    ///
    /// Returns [`DigestLabError::Io`] or [`DigestLabError::Json`] if the
    /// output cannot be written.
    pub fn write(&mut self, report: &HarnessReport) -> Result<()> {
        match self.format {
            OutputFormat::Json => self.write_json(report),
            OutputFormat::Summary | OutputFormat::Tsv => {
                for (i, section) in report.sections.iter().enumerate() {
                    if i > 0 && self.format == OutputFormat::Summary {
                        writeln!(self.writer)?;
                    }
                    match &section.outcome {
                        Ok(result) => self.write_section(result)?,
                        Err(e) => self.write_failure(section.evaluator, e)?,
                    }
                }
                Ok(())
            }
        }
    }

    /// Write one evaluator's output.
    ///
    /// # Errors
    ///
    /// Returns [`DigestLabError::Io`] or [`DigestLabError::Json`] if the
    /// output cannot be written.
    pub fn write_section(&mut self, section: &SectionReport) -> Result<()> {
        if self.format == OutputFormat::Json {
            serde_json::to_writer_pretty(&mut self.writer, section)?;
            writeln!(self.writer)?;
            return Ok(());
        }

        let (evaluator, table) = match section {
            SectionReport::Detection(r) => (Evaluator::Detection, detection_table(r)),
            SectionReport::Throughput(r) => (Evaluator::Throughput, throughput_table(r)),
            SectionReport::Collision(r) => (Evaluator::Collision, collision_table(r)),
            SectionReport::Pattern(r) => (Evaluator::Pattern, pattern_table(r)),
        };

        match self.format {
            OutputFormat::Summary => {
                writeln!(self.writer, "=== {} ===", title(evaluator))?;
                match section {
                    SectionReport::Detection(r) => {
                        writeln!(self.writer, "Baseline: {} bytes", r.baseline_len)?;
                    }
                    SectionReport::Throughput(r) => {
                        writeln!(
                            self.writer,
                            "Buffer: {} bytes, mean of {} trial(s)",
                            r.buffer_len, r.trials
                        )?;
                    }
                    SectionReport::Collision(r) => {
                        writeln!(
                            self.writer,
                            "Trials: {} x {} bytes, seed {}",
                            r.config.trials, r.config.buffer_len, r.seed
                        )?;
                    }
                    SectionReport::Pattern(_) => {}
                }
            }
            OutputFormat::Tsv => {
                let mut header = format!("# {evaluator}");
                for parameter in parameters(section) {
                    header.push('\t');
                    header.push_str(&parameter);
                }
                writeln!(self.writer, "{header}")?;
            }
            OutputFormat::Json => {}
        }
        table.write(&mut self.writer, self.format)?;
        Ok(())
    }

    fn write_failure(&mut self, evaluator: Evaluator, error: &DigestLabError) -> Result<()> {
        match self.format {
            OutputFormat::Summary => {
                writeln!(self.writer, "=== {} ===", title(evaluator))?;
                writeln!(self.writer, "FAILED: {error}")?;
            }
            _ => writeln!(self.writer, "# {evaluator}\tFAILED\t{error}")?,
        }
        Ok(())
    }

    fn write_json(&mut self, report: &HarnessReport) -> Result<()> {
        let sections = report
            .sections
            .iter()
            .map(|s| JsonSection {
                evaluator: s.evaluator,
                report: s.outcome.as_ref().ok(),
                error: s.outcome.as_ref().err().map(ToString::to_string),
            })
            .collect();
        let json = JsonReport {
            algorithms: &report.algorithms,
            sections,
        };
        serde_json::to_writer_pretty(&mut self.writer, &json)?;
        writeln!(self.writer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::{HarnessBuilder, Section};

    fn render(report: &HarnessReport, format: OutputFormat) -> String {
        let mut out = Report::new(Vec::new(), format);
        out.write(report).unwrap();
        String::from_utf8(out.into_inner()).unwrap()
    }

    fn quick(evaluators: &[Evaluator]) -> HarnessReport {
        HarnessBuilder::new()
            .evaluators(evaluators.iter().copied())
            .collision_trials(500)
            .seed(3)
            .throughput_buffer_len(1024)
            .build()
            .unwrap()
            .run()
    }

    // ==========================================================================
    // FORMAT PARSING
    // ==========================================================================

    #[test]
    fn format_parse() {
        assert_eq!("summary".parse::<OutputFormat>().unwrap(), OutputFormat::Summary);
        assert_eq!("TSV".parse::<OutputFormat>().unwrap(), OutputFormat::Tsv);
        assert_eq!(" json ".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!(matches!(
            "xml".parse::<OutputFormat>(),
            Err(DigestLabError::UnknownFormat(_))
        ));
        assert_eq!(OutputFormat::default(), OutputFormat::Summary);
    }

    // ==========================================================================
    // TABLES
    // ==========================================================================

    #[test]
    fn aligned_table_pads_columns() {
        let mut table = Table::new(["a", "long-header"]);
        table.push_row(["wide-cell", "x"]);
        let mut out = Vec::new();
        table.write_aligned(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "a          long-header");
        assert_eq!(lines[1], "---------  -----------");
        assert_eq!(lines[2], "wide-cell  x");
    }

    #[test]
    fn json_table_is_array_of_objects() {
        let mut table = Table::new(["name", "bits"]);
        table.push_row(["xor", "8"]);
        let mut out = Vec::new();
        table.write(&mut out, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["name"], "xor");
        assert_eq!(value[0]["bits"], "8");
    }

    #[test]
    fn detection_table_shape() {
        let report = quick(&[Evaluator::Detection]);
        let table = detection_table(report.detection().unwrap());
        assert_eq!(table.len(), 9);
        assert_eq!(table.headers.len(), 8);
        assert_eq!(table.rows[0][0], "simple-sum");
        assert_eq!(table.rows[0][1], "no");
    }

    #[test]
    fn pattern_table_is_transposed() {
        let report = quick(&[Evaluator::Pattern]);
        let table = pattern_table(report.pattern().unwrap());
        assert_eq!(table.len(), 6);
        assert_eq!(table.headers.len(), 10);
        assert_eq!(table.rows[0][0], "all-zero");
    }

    // ==========================================================================
    // FULL REPORTS
    // ==========================================================================

    #[test]
    fn summary_has_every_section() {
        let text = render(&quick(&Evaluator::ALL), OutputFormat::Summary);
        assert!(text.contains("=== Error detection ==="));
        assert!(text.contains("=== Throughput ==="));
        assert!(text.contains("=== Collisions ==="));
        assert!(text.contains("=== Pattern sensitivity ==="));
        assert!(text.contains("seed 3"));
        assert!(text.contains("adjacent-swap"));
    }

    #[test]
    fn tsv_sections_are_tagged() {
        let text = render(&quick(&[Evaluator::Detection, Evaluator::Pattern]), OutputFormat::Tsv);
        assert!(text.starts_with("# detection\tbaseline_len=8\nalgorithm\tadjacent-swap\t"));
        assert!(text.contains("# pattern\npattern\tsimple-sum\t"));
    }

    #[test]
    fn tsv_headers_carry_run_parameters() {
        let report = HarnessBuilder::new()
            .evaluators([Evaluator::Throughput, Evaluator::Collision])
            .throughput_buffer_len(2048)
            .throughput_trials(7)
            .collision_trials(300)
            .collision_buffer_len(5)
            .seed(41)
            .build()
            .unwrap()
            .run();
        let text = render(&report, OutputFormat::Tsv);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "# throughput\tbuffer_len=2048\ttrials=7");
        assert_eq!(lines[1], "algorithm\ttrials\ttime_us\tmib_per_sec\tdigest");
        assert!(lines[2].starts_with("simple-sum\t7\t"));

        let collision = lines
            .iter()
            .find(|l| l.starts_with("# collision"))
            .unwrap();
        assert_eq!(*collision, "# collision\ttrials=300\tbuffer_len=5\tseed=41");
    }

    #[test]
    fn json_report_parses() {
        let text = render(&quick(&[Evaluator::Collision]), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["algorithms"].as_array().unwrap().len(), 9);
        assert_eq!(value["sections"][0]["evaluator"], "collision");
        assert_eq!(value["sections"][0]["report"]["seed"], 3);
        assert!(value["sections"][0].get("error").is_none());
    }

    #[test]
    fn failed_section_rendered() {
        let report = HarnessReport {
            algorithms: vec!["xor".to_string()],
            sections: vec![Section {
                evaluator: Evaluator::Throughput,
                outcome: Err(DigestLabError::Clock("stalled".to_string())),
            }],
        };
        let summary = render(&report, OutputFormat::Summary);
        assert!(summary.contains("FAILED: Clock error: stalled"));

        let json: serde_json::Value =
            serde_json::from_str(&render(&report, OutputFormat::Json)).unwrap();
        assert_eq!(json["sections"][0]["error"], "Clock error: stalled");
        assert!(json["sections"][0].get("report").is_none());
    }
}
