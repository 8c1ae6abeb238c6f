use crate::ConfigError;
use regex::Regex;

/// A compiled set of regular expressions matched against whole strings
///
/// A candidate matches the set when it matches at least one pattern from its
/// first to its last character; substring hits do not count.
///
/// # Examples
///
/// ```
/// use word_ripple::url::PatternSet;
///
/// let set = PatternSet::compile(&[r".*\.pdf".to_string()]).unwrap();
/// assert!(set.matches("https://example.com/report.pdf"));
/// assert!(!set.matches("https://example.com/report.pdf?download=1"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<Regex>,
}

impl PatternSet {
    /// Compiles every pattern, anchoring it at both ends
    ///
    /// # Returns
    ///
    /// * `Ok(PatternSet)` - All patterns compiled
    /// * `Err(ConfigError::InvalidPattern)` - The first pattern that failed
    pub fn compile(patterns: &[String]) -> Result<Self, ConfigError> {
        let patterns = patterns
            .iter()
            .map(|pattern| {
                Regex::new(&format!("^(?:{})$", pattern)).map_err(|source| {
                    ConfigError::InvalidPattern {
                        pattern: pattern.clone(),
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    /// Returns true if `candidate` fully matches any pattern
    pub fn matches(&self, candidate: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(candidate))
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
