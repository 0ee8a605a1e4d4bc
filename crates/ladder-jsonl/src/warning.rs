//! Warning types for non-fatal errors during JSONL reading.
//!
//! A [`Warning`] describes a line that was skipped while the rest of the
//! file kept loading.
//!
//! # Examples
//!
//! ```
//! use ladder_jsonl::Warning;
//!
//! let warning = Warning::MalformedJson {
//!     line_number: 5,
//!     error: "unexpected end of input".to_string(),
//! };
//! assert_eq!(warning.line_number(), 5);
//! assert_eq!(warning.kind(), "malformed_json");
//! ```

/// A non-fatal warning that occurred during JSONL reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A line contained JSON that is not syntactically valid.
    ///
    /// The line is skipped and reading continues with the next line.
    MalformedJson {
        /// The 1-based line number where the error occurred.
        line_number: usize,
        /// A description of the JSON parsing error.
        error: String,
    },

    /// A line held valid JSON that did not match the expected record shape.
    SkippedLine {
        /// The 1-based line number that was skipped.
        line_number: usize,
        /// The reason the line was skipped.
        reason: String,
    },
}

impl Warning {
    /// Returns the line number associated with this warning.
    #[must_use]
    pub fn line_number(&self) -> usize {
        match self {
            Self::MalformedJson { line_number, .. } | Self::SkippedLine { line_number, .. } => {
                *line_number
            }
        }
    }

    /// Returns a human-readable description of the warning.
    ///
    /// # Examples
    ///
    /// ```
    /// use ladder_jsonl::Warning;
    ///
    /// let warning = Warning::SkippedLine {
    ///     line_number: 3,
    ///     reason: "missing field `id`".to_string(),
    /// };
    /// assert_eq!(warning.description(), "line 3: skipped: missing field `id`");
    /// ```
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::MalformedJson { line_number, error } => {
                format!("line {line_number}: malformed JSON: {error}")
            }
            Self::SkippedLine {
                line_number,
                reason,
            } => {
                format!("line {line_number}: skipped: {reason}")
            }
        }
    }

    /// Returns a static string identifying the warning kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedJson { .. } => "malformed_json",
            Self::SkippedLine { .. } => "skipped_line",
        }
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl std::error::Error for Warning {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::malformed(
        Warning::MalformedJson { line_number: 42, error: "unexpected token".to_string() },
        42,
        "malformed_json"
    )]
    #[case::skipped(
        Warning::SkippedLine { line_number: 7, reason: "invalid type".to_string() },
        7,
        "skipped_line"
    )]
    fn warning_reports_line_and_kind(
        #[case] warning: Warning,
        #[case] line: usize,
        #[case] kind: &str,
    ) {
        assert_eq!(warning.line_number(), line);
        assert_eq!(warning.kind(), kind);
    }

    #[test]
    fn display_matches_description() {
        let warning = Warning::MalformedJson {
            line_number: 2,
            error: "key must be a string".to_string(),
        };
        assert_eq!(warning.to_string(), warning.description());
        assert!(warning.to_string().contains("line 2"));
    }
}
