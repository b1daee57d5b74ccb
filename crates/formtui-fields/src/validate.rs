#![forbid(unsafe_code)]

//! Synchronous field-level validation.
//!
//! Rules are data: a [`ValidationRules`] set is attached to a field config
//! and evaluated in a fixed order — minimum length, maximum length,
//! pattern, custom — with the first failing rule short-circuiting. A pass
//! clears the error and marks the outcome valid. Lengths are counted in
//! grapheme clusters, matching the editing model of the text input.

use std::fmt;
use std::sync::Arc;

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

/// A caller-supplied rule returning an error message, or `None` to pass.
pub type CustomRule = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// An ordered set of validation constraints for a text value.
#[derive(Clone, Default)]
pub struct ValidationRules {
    min_length: Option<usize>,
    max_length: Option<usize>,
    pattern: Option<Regex>,
    custom: Option<CustomRule>,
}

impl fmt::Debug for ValidationRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationRules")
            .field("min_length", &self.min_length)
            .field("max_length", &self.max_length)
            .field("pattern", &self.pattern.as_ref().map(Regex::as_str))
            .field("custom", &self.custom.is_some())
            .finish()
    }
}

impl ValidationRules {
    /// Create an empty rule set (always passes).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require at least `n` grapheme clusters (builder).
    #[must_use]
    pub fn min_length(mut self, n: usize) -> Self {
        self.min_length = Some(n);
        self
    }

    /// Allow at most `n` grapheme clusters (builder).
    #[must_use]
    pub fn max_length(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }

    /// Require the value to match `pattern` somewhere (builder).
    ///
    /// Matching uses `Regex::is_match`, i.e. an unanchored search.
    #[must_use]
    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Attach a custom rule returning an error message on failure (builder).
    #[must_use]
    pub fn custom(mut self, rule: impl Fn(&str) -> Option<String> + Send + Sync + 'static) -> Self {
        self.custom = Some(Arc::new(rule));
        self
    }

    /// Whether no constraint is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min_length.is_none()
            && self.max_length.is_none()
            && self.pattern.is_none()
            && self.custom.is_none()
    }

    /// Evaluate the rules against `value`.
    ///
    /// Returns the first failing rule's message, or `None` when all pass.
    #[must_use]
    pub fn check(&self, value: &str) -> Option<String> {
        let len = value.graphemes(true).count();

        if let Some(min) = self.min_length
            && len < min
        {
            return Some(format!("Minimum {min} characters required"));
        }
        if let Some(max) = self.max_length
            && len > max
        {
            return Some(format!("Maximum {max} characters allowed"));
        }
        if let Some(pattern) = &self.pattern
            && !pattern.is_match(value)
        {
            return Some("Input format is invalid".to_string());
        }
        if let Some(custom) = &self.custom {
            return custom(value);
        }
        None
    }

    /// Evaluate the rules into a full [`ValidationOutcome`].
    #[must_use]
    pub fn run(&self, value: &str) -> ValidationOutcome {
        match self.check(value) {
            Some(message) => ValidationOutcome::fail(message),
            None => ValidationOutcome::pass(),
        }
    }
}

/// The result of running validation: an error message or a valid mark.
///
/// `error` and `valid` are mutually exclusive by construction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationOutcome {
    /// The failing rule's message, if any.
    pub error: Option<String>,
    /// True when validation ran and every rule passed.
    pub valid: bool,
}

impl ValidationOutcome {
    /// An outcome for a value that passed every rule.
    #[must_use]
    pub fn pass() -> Self {
        Self {
            error: None,
            valid: true,
        }
    }

    /// An outcome for a value that failed a rule.
    #[must_use]
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            valid: false,
        }
    }

    /// The not-yet-validated outcome (no error, not valid).
    #[must_use]
    pub fn unset() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_rules_always_pass() {
        let rules = ValidationRules::new();
        assert!(rules.is_empty());
        assert_eq!(rules.check(""), None);
        assert_eq!(rules.check("anything"), None);
        assert!(rules.run("x").valid);
    }

    #[test]
    fn min_length_message() {
        let rules = ValidationRules::new().min_length(5);
        assert_eq!(
            rules.check("ab").as_deref(),
            Some("Minimum 5 characters required")
        );
        assert_eq!(rules.check("abcde"), None);
    }

    #[test]
    fn max_length_message() {
        let rules = ValidationRules::new().max_length(3);
        assert_eq!(
            rules.check("abcd").as_deref(),
            Some("Maximum 3 characters allowed")
        );
        assert_eq!(rules.check("abc"), None);
    }

    #[test]
    fn pattern_message() {
        let rules = ValidationRules::new().pattern(Regex::new(r"^\d+$").unwrap());
        assert_eq!(rules.check("12a").as_deref(), Some("Input format is invalid"));
        assert_eq!(rules.check("123"), None);
    }

    #[test]
    fn pattern_is_unanchored_search() {
        let rules = ValidationRules::new().pattern(Regex::new(r"\d").unwrap());
        assert_eq!(rules.check("abc1def"), None);
    }

    #[test]
    fn custom_rule_message() {
        let rules = ValidationRules::new().custom(|value| {
            (!value.contains('@')).then(|| "Enter a valid email address".to_string())
        });
        assert_eq!(
            rules.check("nobody").as_deref(),
            Some("Enter a valid email address")
        );
        assert_eq!(rules.check("a@b"), None);
    }

    #[test]
    fn first_failure_wins_in_fixed_order() {
        // A value that violates min-length, pattern, and custom at once
        // reports only the min-length message.
        let rules = ValidationRules::new()
            .min_length(5)
            .max_length(10)
            .pattern(Regex::new(r"^\d+$").unwrap())
            .custom(|_| Some("custom always fails".to_string()));
        assert_eq!(
            rules.check("ab").as_deref(),
            Some("Minimum 5 characters required")
        );

        // Satisfying min/max leaves the pattern failure.
        assert_eq!(
            rules.check("abcdef").as_deref(),
            Some("Input format is invalid")
        );

        // Satisfying everything else leaves the custom failure.
        assert_eq!(rules.check("123456").as_deref(), Some("custom always fails"));
    }

    #[test]
    fn lengths_count_graphemes_not_bytes() {
        let rules = ValidationRules::new().max_length(4);
        // "café" is 4 graphemes but 5 bytes.
        assert_eq!(rules.check("café"), None);
    }

    #[test]
    fn outcome_exclusivity() {
        let pass = ValidationOutcome::pass();
        assert!(pass.valid && pass.error.is_none());

        let fail = ValidationOutcome::fail("nope");
        assert!(!fail.valid && fail.error.is_some());

        let unset = ValidationOutcome::unset();
        assert!(!unset.valid && unset.error.is_none());
    }

    #[test]
    fn rules_debug_does_not_leak_closures() {
        let rules = ValidationRules::new()
            .min_length(1)
            .custom(|_| None);
        let dbg = format!("{rules:?}");
        assert!(dbg.contains("min_length"));
        assert!(dbg.contains("custom: true"));
    }
}
