/// Appended to the summary when the operator did not ask for verbose output.
pub const VERBOSE_HINT: &str = " For more details, use --verbose command.";

const NAME_SEPARATOR: &str = ", ";

/// The result of one filter pass: names excluded and kept, in enumeration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    pub excluded: Vec<String>,
    pub kept: Vec<String>,
}

impl FilterOutcome {
    pub fn total(&self) -> usize {
        self.excluded.len() + self.kept.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Verbose-channel report; empty when nothing was classified.
    pub fn detail_lines(&self) -> Vec<String> {
        if self.is_empty() {
            return Vec::new();
        }

        vec![
            "Pre-deployment unit summary:".to_string(),
            format!(
                "Excluded {} unit(s): {}",
                self.excluded.len(),
                self.excluded.join(NAME_SEPARATOR)
            ),
            format!(
                "Included {} unit(s): {}",
                self.kept.len(),
                self.kept.join(NAME_SEPARATOR)
            ),
        ]
    }

    /// The always-on summary, with the verbose hint when `verbose` is off.
    pub fn summary_line(&self, verbose: bool) -> String {
        let summary = format!(
            "Excluded {} unit(s) from deployment, deploying {} of {} unit(s).",
            self.excluded.len(),
            self.kept.len(),
            self.total()
        );
        if verbose {
            summary
        } else {
            summary + VERBOSE_HINT
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(excluded: &[&str], kept: &[&str]) -> FilterOutcome {
        FilterOutcome {
            excluded: excluded.iter().map(|s| s.to_string()).collect(),
            kept: kept.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn summary_counts_add_up() {
        let out = outcome(&["a"], &["b", "c"]);
        assert_eq!(
            out.summary_line(true),
            "Excluded 1 unit(s) from deployment, deploying 2 of 3 unit(s)."
        );
        assert_eq!(
            out.summary_line(false),
            "Excluded 1 unit(s) from deployment, deploying 2 of 3 unit(s). For more details, use --verbose command."
        );
    }

    #[test]
    fn detail_lines_join_names_in_order() {
        let out = outcome(&["cron", "debug"], &["api"]);
        assert_eq!(
            out.detail_lines(),
            vec![
                "Pre-deployment unit summary:",
                "Excluded 2 unit(s): cron, debug",
                "Included 1 unit(s): api",
            ]
        );
    }

    #[test]
    fn detail_lines_keep_shape_when_one_side_is_empty() {
        let out = outcome(&[], &["api"]);
        assert_eq!(out.detail_lines()[1], "Excluded 0 unit(s): ");
        assert!(outcome(&[], &[]).detail_lines().is_empty());
    }
}
