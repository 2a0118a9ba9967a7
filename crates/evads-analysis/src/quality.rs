//! Content quality gating for annotation text.
//!
//! One filter type serves both granularities: the record gate (whole
//! annotation, boilerplate phrases, 30-character floor, substantive keyword
//! required) and the section gate (single section body, "not specified"
//! placeholders, 15-character floor, no keyword requirement). Their phrase
//! lists stay separate because they come from separate taxonomy entries.

use evads_core::{QualityRules, Taxonomy};

/// Why a text was accepted or rejected. Rules are checked in declaration
/// order and the first failure wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QualityVerdict {
    Accepted,
    Empty,
    RejectedPhrase(String),
    TooShort { length: usize, min_length: usize },
    NoKeyword,
}

impl QualityVerdict {
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, QualityVerdict::Accepted)
    }
}

#[derive(Debug, Clone)]
pub struct QualityFilter {
    min_length: usize,
    reject_phrases: Vec<String>,
    required_keywords: Vec<String>,
}

impl QualityFilter {
    #[must_use]
    pub fn new(rules: &QualityRules) -> Self {
        let lower = |items: &[String]| -> Vec<String> {
            items.iter().map(|s| s.to_lowercase()).collect()
        };
        Self {
            min_length: rules.min_length,
            reject_phrases: lower(&rules.reject_phrases),
            required_keywords: lower(&rules.required_keywords),
        }
    }

    /// Record-level gate with the built-in tables.
    #[must_use]
    pub fn record_default() -> Self {
        Self::new(&Taxonomy::default().record_quality)
    }

    /// Section-level gate with the built-in tables.
    #[must_use]
    pub fn section_default() -> Self {
        Self::new(&Taxonomy::default().section_quality)
    }

    #[must_use]
    pub fn evaluate(&self, text: &str) -> QualityVerdict {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return QualityVerdict::Empty;
        }

        let lower = trimmed.to_lowercase();
        if let Some(phrase) = self
            .reject_phrases
            .iter()
            .find(|p| lower.contains(p.as_str()))
        {
            return QualityVerdict::RejectedPhrase(phrase.clone());
        }

        let length = trimmed.chars().count();
        if length < self.min_length {
            return QualityVerdict::TooShort {
                length,
                min_length: self.min_length,
            };
        }

        if !self.required_keywords.is_empty()
            && !self
                .required_keywords
                .iter()
                .any(|k| lower.contains(k.as_str()))
        {
            return QualityVerdict::NoKeyword;
        }

        QualityVerdict::Accepted
    }

    #[must_use]
    pub fn is_substantive(&self, text: &str) -> bool {
        self.evaluate(text).is_accepted()
    }

    /// Absent text is never substantive.
    #[must_use]
    pub fn admits(&self, text: Option<&str>) -> bool {
        text.is_some_and(|t| self.is_substantive(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_whitespace_are_rejected() {
        let filter = QualityFilter::record_default();
        assert_eq!(filter.evaluate(""), QualityVerdict::Empty);
        assert_eq!(filter.evaluate(" \n\t "), QualityVerdict::Empty);
        assert!(!filter.admits(None));
    }

    #[test]
    fn twenty_nine_characters_is_too_short() {
        let filter = QualityFilter::record_default();
        let text = "Premium battery range at last";
        assert_eq!(text.chars().count(), 29);
        assert_eq!(
            filter.evaluate(text),
            QualityVerdict::TooShort {
                length: 29,
                min_length: 30
            }
        );
    }

    #[test]
    fn thirty_characters_with_battery_is_accepted() {
        let filter = QualityFilter::record_default();
        let text = "Huge battery for longer trips!";
        assert_eq!(text.chars().count(), 30);
        assert!(filter.is_substantive(text));
    }

    #[test]
    fn boilerplate_rejects_regardless_of_length() {
        let filter = QualityFilter::record_default();
        let text = format!(
            "The advertisement DOES NOT INCLUDE SPECIFIC DETAILS about the vehicle. {}",
            "Premium electric car with great range. ".repeat(10)
        );
        assert_eq!(
            filter.evaluate(&text),
            QualityVerdict::RejectedPhrase("does not include specific details".to_string())
        );
    }

    #[test]
    fn long_text_without_keyword_is_rejected() {
        let filter = QualityFilter::record_default();
        assert_eq!(
            filter.evaluate("Bold colours, big smiles, sunny beach photo shoot."),
            QualityVerdict::NoKeyword
        );
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let filter = QualityFilter::section_default();
        // 14 characters, 18 bytes.
        assert!(!filter.is_substantive("Ökologisch äöü"));
    }

    #[test]
    fn section_gate_rejects_placeholders() {
        let filter = QualityFilter::section_default();
        assert!(matches!(
            filter.evaluate("Not specified in the advertisement at all."),
            QualityVerdict::RejectedPhrase(_)
        ));
        assert!(matches!(
            filter.evaluate("Charging speed is unclear from the creative."),
            QualityVerdict::RejectedPhrase(_)
        ));
    }

    #[test]
    fn section_gate_needs_fifteen_characters_but_no_keyword() {
        let filter = QualityFilter::section_default();
        assert!(!filter.is_substantive("N/A"));
        assert!(filter.is_substantive("Blazing acceleration and instant torque."));
    }

    #[test]
    fn custom_rules_are_lowercased() {
        let filter = QualityFilter::new(&QualityRules {
            min_length: 5,
            reject_phrases: vec!["LOREM".to_string()],
            required_keywords: vec!["Torque".to_string()],
        });
        assert!(!filter.is_substantive("lorem ipsum torque"));
        assert!(filter.is_substantive("TORQUE vectoring"));
    }
}
