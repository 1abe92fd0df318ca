// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Collecting puzzle answers and writing them out

use std::fmt::{self, Display};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// One labelled answer, or the reason there isn't one
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ReportLine {
    /// Day of the puzzle, in December
    pub day: u8,
    /// Which part of the day's puzzle
    pub part: u8,
    /// The answer, or an error message
    pub outcome: Result<i64, String>,
}

impl Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/12 part {}: ", self.day, self.part)?;
        match &self.outcome {
            Ok(answer) => write!(f, "{answer}"),
            Err(msg) => write!(f, "error: {msg}"),
        }
    }
}

/// An ordered collection of answers
///
/// # Example
///
/// ```
/// use gravity_assist::report::Report;
/// let mut report = Report::new();
/// report.push(1, 1, Ok::<_, String>(34241));
/// report.push(2, 2, Err("no register pair produces 19690720"));
///
/// let mut out = Vec::new();
/// report.write_to(&mut out).unwrap();
/// assert_eq!(
///     String::from_utf8(out).unwrap(),
///     "1/12 part 1: 34241\n2/12 part 2: error: no register pair produces 19690720\n"
/// );
/// assert!(report.has_failures());
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Report {
    lines: Vec<ReportLine>,
}

impl Report {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the outcome of a computation. Failures are logged as they're added.
    pub fn push<E: Display>(&mut self, day: u8, part: u8, outcome: Result<i64, E>) {
        let outcome = outcome.map_err(|e| {
            tracing::error!(day, part, "computation failed: {e}");
            e.to_string()
        });
        self.lines.push(ReportLine { day, part, outcome });
    }

    /// The answers so far, in the order they were added
    pub fn lines(&self) -> &[ReportLine] {
        &self.lines
    }

    /// Whether any computation failed
    pub fn has_failures(&self) -> bool {
        self.lines.iter().any(|line| line.outcome.is_err())
    }

    /// Write every line to `writer`
    pub fn write_to(&self, writer: &mut impl Write) -> io::Result<()> {
        for line in &self.lines {
            writeln!(writer, "{line}")?;
        }
        writer.flush()
    }

    /// Write the report to standard output, and to the file at `path`.
    ///
    /// If the file can't be written, that's logged and the report is still printed.
    pub fn emit(&self, path: &Path) -> io::Result<()> {
        let file_result = File::create(path)
            .and_then(|file| self.write_to(&mut BufWriter::new(file)));
        if let Err(e) = file_result {
            tracing::warn!(path = %path.display(), "could not write report file: {e}");
        }
        self.write_to(&mut io::stdout().lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_format() {
        let line = ReportLine {
            day: 2,
            part: 1,
            outcome: Ok(3500),
        };
        assert_eq!(line.to_string(), "2/12 part 1: 3500");
        let line = ReportLine {
            day: 2,
            part: 2,
            outcome: Err("program is empty".into()),
        };
        assert_eq!(line.to_string(), "2/12 part 2: error: program is empty");
    }

    #[test]
    fn keeps_order() {
        let mut report = Report::new();
        report.push(1, 2, Ok::<_, String>(966));
        report.push(1, 1, Ok::<_, String>(654));
        let days: Vec<_> = report.lines().iter().map(|l| (l.day, l.part)).collect();
        assert_eq!(days, [(1, 2), (1, 1)]);
        assert!(!report.has_failures());
    }

    #[test]
    fn emit_writes_the_file() {
        let path = std::env::temp_dir().join(format!(
            "gravity-assist-report-{}.txt",
            std::process::id()
        ));
        let mut report = Report::new();
        report.push(1, 1, Ok::<_, String>(2));
        report.push(2, 1, Err(crate::InterpreterError::InvalidProgram));
        report.emit(&path).unwrap();
        let written = std::fs::read_to_string(&path);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(
            written.unwrap(),
            "1/12 part 1: 2\n2/12 part 1: error: program is empty\n"
        );
    }
}
