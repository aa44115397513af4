//! Report values describing the outcome of migrating one file, and the
//! aggregate over a directory run.

use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use logstash_conf_core::PluginCategory;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ParseError,
    TransformationError,
    ValidationError,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::ParseError => "parse_error",
            ErrorKind::TransformationError => "transformation_error",
            ErrorKind::ValidationError => "validation_error",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recorded failure; never aborts the rest of the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationError {
    pub kind: ErrorKind,
    pub message: String,
    /// 1-indexed line, or 0 when the error is not tied to a line.
    pub line: usize,
    pub file_path: PathBuf,
}

impl MigrationError {
    pub fn new(kind: ErrorKind, file_path: &Path, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            line: 0,
            file_path: file_path.to_path_buf(),
        }
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }
}

impl Display for MigrationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.line > 0 {
            write!(f, "{}:{}: {}", self.file_path.display(), self.line, self.message)
        } else {
            write!(f, "{}: {}", self.file_path.display(), self.message)
        }
    }
}

impl std::error::Error for MigrationError {}

/// A plugin that was translated into one or more target components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupportedPluginRecord {
    pub plugin_name: String,
    pub category: PluginCategory,
    pub line: usize,
    pub components: Vec<String>,
    pub notes: String,
}

/// A plugin no transformer claimed, with everything needed to port it by
/// hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnsupportedPluginRecord {
    pub plugin_name: String,
    pub category: PluginCategory,
    pub line: usize,
    pub original_config: String,
    pub guidance: String,
    pub alternatives: Vec<String>,
}

/// Outcome of migrating one source file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MigrationReport {
    pub source_file: PathBuf,
    pub target_file: PathBuf,
    pub timestamp: DateTime<Utc>,
    pub supported: Vec<SupportedPluginRecord>,
    pub unsupported: Vec<UnsupportedPluginRecord>,
    pub errors: Vec<MigrationError>,
    pub warnings: Vec<String>,
}

impl MigrationReport {
    pub fn new(source_file: &Path, target_file: &Path) -> Self {
        Self {
            source_file: source_file.to_path_buf(),
            target_file: target_file.to_path_buf(),
            timestamp: Utc::now(),
            supported: Vec::new(),
            unsupported: Vec::new(),
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Percentage of plugins translated automatically; 0 when the file had
    /// no plugins at all.
    pub fn success_rate(&self) -> f64 {
        let total = self.supported.len() + self.unsupported.len();
        if total == 0 {
            return 0.0;
        }
        self.supported.len() as f64 / total as f64 * 100.0
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: MigrationError) {
        self.errors.push(error);
    }
}

/// Aggregate over a directory run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MigrationResult {
    pub reports: Vec<MigrationReport>,
    pub total_files: usize,
    pub success_count: usize,
    pub failure_count: usize,
}

impl MigrationResult {
    pub fn add_report(&mut self, report: MigrationReport) {
        self.total_files += 1;
        if report.has_errors() {
            self.failure_count += 1;
        } else {
            self.success_count += 1;
        }
        self.reports.push(report);
    }

    pub fn total_supported(&self) -> usize {
        self.reports.iter().map(|r| r.supported.len()).sum()
    }

    pub fn total_unsupported(&self) -> usize {
        self.reports.iter().map(|r| r.unsupported.len()).sum()
    }

    pub fn total_errors(&self) -> usize {
        self.reports.iter().map(|r| r.errors.len()).sum()
    }

    pub fn is_success(&self) -> bool {
        self.failure_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ErrorKind, MigrationError, MigrationReport, MigrationResult, SupportedPluginRecord,
        UnsupportedPluginRecord,
    };
    use logstash_conf_core::PluginCategory;
    use std::path::Path;

    fn supported(name: &str) -> SupportedPluginRecord {
        SupportedPluginRecord {
            plugin_name: name.to_string(),
            category: PluginCategory::Input,
            line: 1,
            components: vec![format!("{name}_source_0")],
            notes: String::new(),
        }
    }

    fn unsupported(name: &str) -> UnsupportedPluginRecord {
        UnsupportedPluginRecord {
            plugin_name: name.to_string(),
            category: PluginCategory::Filter,
            line: 4,
            original_config: String::new(),
            guidance: "port it".to_string(),
            alternatives: Vec::new(),
        }
    }

    #[test]
    fn success_rate_is_zero_without_plugins() {
        let report = MigrationReport::new(Path::new("a.conf"), Path::new("a.toml"));
        assert_eq!(report.success_rate(), 0.0);
    }

    #[test]
    fn success_rate_counts_supported_over_all_plugins() {
        let mut report = MigrationReport::new(Path::new("a.conf"), Path::new("a.toml"));
        report.supported.push(supported("file"));
        report.supported.push(supported("beats"));
        report.supported.push(supported("grok"));
        report.unsupported.push(unsupported("ruby"));
        assert_eq!(report.success_rate(), 75.0);
    }

    #[test]
    fn error_display_includes_line_only_when_known() {
        let err = MigrationError::new(ErrorKind::ParseError, Path::new("p.conf"), "bad");
        assert_eq!(err.to_string(), "p.conf: bad");
        assert_eq!(err.at_line(7).to_string(), "p.conf:7: bad");
        assert_eq!(ErrorKind::TransformationError.to_string(), "transformation_error");
    }

    #[test]
    fn add_report_counts_success_and_failure() {
        let mut result = MigrationResult::default();
        let ok = MigrationReport::new(Path::new("a.conf"), Path::new("a.toml"));
        let mut failed = MigrationReport::new(Path::new("b.conf"), Path::new("b.toml"));
        failed.add_error(MigrationError::new(
            ErrorKind::ValidationError,
            Path::new("b.toml"),
            "invalid",
        ));

        result.add_report(ok);
        result.add_report(failed);

        assert_eq!(result.total_files, 2);
        assert_eq!(result.success_count, 1);
        assert_eq!(result.failure_count, 1);
        assert_eq!(result.total_errors(), 1);
        assert!(!result.is_success());
    }
}
