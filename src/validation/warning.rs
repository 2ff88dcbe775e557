//! Catalog findings and their collection.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// The catalog works but is probably not what was meant.
    Warning,
    /// Some images cannot be packed with this catalog.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        })
    }
}

/// One finding about a catalog.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Stable code such as `brickify::check::duplicate-colour`.
    pub code: String,
    pub message: String,
    pub help: Option<String>,
}

impl Diagnostic {
    fn with_severity(
        severity: Severity,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            code: code.into(),
            message: message.into(),
            help: None,
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Error, code, message)
    }

    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Warning, code, message)
    }

    pub fn with_help(self, help: impl Into<String>) -> Self {
        Self {
            help: Some(help.into()),
            ..self
        }
    }
}

/// Findings in the order the checks reported them.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn merge(&mut self, other: ValidationResult) {
        self.extend(other.diagnostics);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Findings of one severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.iter().filter(|d| d.severity == severity).count()
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    /// Blocks packing.
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Nothing to report, not even warnings.
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

impl Extend<Diagnostic> for ValidationResult {
    fn extend<I: IntoIterator<Item = Diagnostic>>(&mut self, iter: I) {
        self.diagnostics.extend(iter);
    }
}

impl FromIterator<Diagnostic> for ValidationResult {
    fn from_iter<I: IntoIterator<Item = Diagnostic>>(iter: I) -> Self {
        Self {
            diagnostics: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result() {
        let result = ValidationResult::new();
        assert!(result.is_ok());
        assert!(!result.has_errors());
        assert_eq!(result.count(Severity::Error), 0);
        assert_eq!(result.count(Severity::Warning), 0);
    }

    #[test]
    fn test_warnings_alone_do_not_block() {
        let result: ValidationResult = [Diagnostic::warning("brickify::w", "tried twice")]
            .into_iter()
            .collect();
        assert!(!result.is_ok());
        assert!(!result.has_errors());
    }

    #[test]
    fn test_merge_keeps_order() {
        let mut a: ValidationResult = [Diagnostic::error("brickify::a", "first")]
            .into_iter()
            .collect();
        a.merge([Diagnostic::warning("brickify::b", "second")].into_iter().collect());

        let codes: Vec<&str> = a.iter().map(|d| d.code.as_str()).collect();
        assert_eq!(codes, ["brickify::a", "brickify::b"]);
        assert_eq!(a.error_count(), 1);
        assert_eq!(a.warning_count(), 1);
    }

    #[test]
    fn test_with_help() {
        let d = Diagnostic::error("brickify::test", "no 1x1").with_help("Add 1x1");
        assert_eq!(d.help.as_deref(), Some("Add 1x1"));
        assert_eq!(d.severity.to_string(), "error");
        assert!(Severity::Error > Severity::Warning);
    }
}
