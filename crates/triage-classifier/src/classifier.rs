// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyword-vote issue classification.
//!
//! Each configured category owns a set of lowercase keywords. A category's
//! score is the number of its keywords found as substrings of the
//! lowercased text. No model, no network, no latency.

use triage_config::model::ClassifierConfig;
use triage_core::Category;
use tracing::debug;

/// One category and the keywords that vote for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordRule {
    category: Category,
    keywords: Vec<String>,
}

impl KeywordRule {
    /// Builds a rule, lowercasing keywords and dropping blanks and duplicates.
    pub fn new<I, S>(category: impl Into<Category>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for keyword in keywords {
            let keyword = keyword.as_ref().trim().to_lowercase();
            if !keyword.is_empty() && !normalized.contains(&keyword) {
                normalized.push(keyword);
            }
        }
        Self {
            category: category.into(),
            keywords: normalized,
        }
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    fn matches<'a>(&'a self, lowered: &str) -> Vec<&'a str> {
        self.keywords
            .iter()
            .filter(|k| lowered.contains(k.as_str()))
            .map(String::as_str)
            .collect()
    }
}

/// Per-category match detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryScore {
    pub category: Category,
    /// Keywords found in the text, in rule order.
    pub matched: Vec<String>,
}

impl CategoryScore {
    pub fn count(&self) -> usize {
        self.matched.len()
    }
}

/// Result of classifying an issue description.
#[derive(Debug, Clone)]
pub struct ClassificationResult {
    /// The selected category.
    pub category: Category,
    /// Scores for every keyword rule, in configured order.
    pub scores: Vec<CategoryScore>,
    /// Human-readable reason for the selection.
    pub reason: &'static str,
}

/// Keyword classifier over an ordered rule list.
///
/// Rule order is the tie-break order: when several categories share the
/// highest score, the one configured first wins.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    rules: Vec<KeywordRule>,
    default_category: Category,
}

impl KeywordClassifier {
    /// Create a classifier from a default category and ordered rules.
    ///
    /// A rule naming the default category is kept for ordering but never
    /// scores; the default category has no keywords.
    pub fn new(default_category: impl Into<Category>, rules: Vec<KeywordRule>) -> Self {
        let default_category = default_category.into();
        let rules = rules
            .into_iter()
            .filter(|rule| rule.category != default_category)
            .collect();
        Self {
            rules,
            default_category,
        }
    }

    /// Build the classifier from the `[classifier]` config section.
    pub fn from_config(config: &ClassifierConfig) -> Self {
        let rules = config
            .categories
            .iter()
            .map(|rule| KeywordRule::new(rule.name.as_str(), &rule.keywords))
            .collect();
        Self::new(config.default_category.as_str(), rules)
    }

    pub fn default_category(&self) -> &Category {
        &self.default_category
    }

    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    /// Every category this classifier can return: keyword rules in order, then the default.
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.rules
            .iter()
            .map(KeywordRule::category)
            .chain(std::iter::once(&self.default_category))
    }

    /// Classify issue text into a category. Never fails.
    pub fn classify(&self, text: &str) -> Category {
        self.classify_detailed(text).category
    }

    /// Classify and report how each category scored.
    pub fn classify_detailed(&self, text: &str) -> ClassificationResult {
        let lowered = text.to_lowercase();

        let scores: Vec<CategoryScore> = self
            .rules
            .iter()
            .map(|rule| CategoryScore {
                category: rule.category.clone(),
                matched: rule.matches(&lowered).into_iter().map(String::from).collect(),
            })
            .collect();

        // Strictly greater keeps the earliest rule on ties.
        let mut best: Option<&CategoryScore> = None;
        for score in &scores {
            if score.count() > best.map_or(0, CategoryScore::count) {
                best = Some(score);
            }
        }

        let tied = best.is_some_and(|b| {
            scores
                .iter()
                .filter(|s| s.count() == b.count())
                .count()
                > 1
        });

        let (category, reason) = match best {
            None => (self.default_category.clone(), "no keyword matches"),
            Some(b) if tied => (b.category.clone(), "tie broken by configured order"),
            Some(b) => (b.category.clone(), "highest keyword count"),
        };

        debug!(
            category = %category,
            matches = best.map_or(0, CategoryScore::count),
            reason,
            "issue classified"
        );

        ClassificationResult {
            category,
            scores,
            reason,
        }
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::from_config(&ClassifierConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn classifier() -> KeywordClassifier {
        KeywordClassifier::default()
    }

    #[test]
    fn no_keywords_falls_back_to_default() {
        let c = classifier();
        assert_eq!(c.classify("hello, how do I reach sales?").as_str(), "General Inquiry");
    }

    #[test]
    fn empty_and_blank_text_is_default() {
        let c = classifier();
        assert_eq!(c.classify("").as_str(), "General Inquiry");
        assert_eq!(c.classify("   \n\t").as_str(), "General Inquiry");
    }

    #[test]
    fn single_category_match() {
        let c = classifier();
        assert_eq!(
            c.classify("I was charged twice for my subscription").as_str(),
            "Billing"
        );
        assert_eq!(c.classify("App crashes on launch").as_str(), "Technical Support");
        assert_eq!(c.classify("Cannot LOGIN").as_str(), "Account Management");
    }

    #[test]
    fn higher_count_wins() {
        let c = classifier();
        // Billing: invoice, refund. Technical Support: error.
        let result = c.classify_detailed("error on my invoice, I want a refund");
        assert_eq!(result.category.as_str(), "Billing");
        assert_eq!(result.reason, "highest keyword count");
    }

    #[test]
    fn tie_goes_to_first_configured_category() {
        let c = classifier();
        let result = c.classify_detailed("My login is broken and password reset failed");
        assert_eq!(result.category.as_str(), "Technical Support");
        assert_eq!(result.reason, "tie broken by configured order");

        let counts: Vec<usize> = result.scores.iter().map(CategoryScore::count).collect();
        assert_eq!(counts, [2, 0, 2]);
    }

    #[test]
    fn tie_order_follows_configuration_not_names() {
        let c = KeywordClassifier::new(
            "Other",
            vec![
                KeywordRule::new("Zebra", ["stripe"]),
                KeywordRule::new("Apple", ["core"]),
            ],
        );
        assert_eq!(c.classify("stripe core").as_str(), "Zebra");

        let reversed = KeywordClassifier::new(
            "Other",
            vec![
                KeywordRule::new("Apple", ["core"]),
                KeywordRule::new("Zebra", ["stripe"]),
            ],
        );
        assert_eq!(reversed.classify("stripe core").as_str(), "Apple");
    }

    #[test]
    fn default_position_does_not_matter() {
        let c = KeywordClassifier::new(
            "Other",
            vec![
                KeywordRule::new("Other", Vec::<String>::new()),
                KeywordRule::new("Hardware", ["printer"]),
            ],
        );
        assert_eq!(c.classify("nothing relevant").as_str(), "Other");
        assert_eq!(c.classify("printer jam").as_str(), "Hardware");
    }

    #[test]
    fn keywords_are_normalized() {
        let rule = KeywordRule::new("Billing", ["Invoice", " invoice ", "", "REFUND"]);
        assert_eq!(rule.keywords(), ["invoice", "refund"]);
    }

    #[test]
    fn multi_word_keyword_matches_as_substring() {
        let c = classifier();
        let result = c.classify_detailed("the export is not working");
        assert_eq!(result.category.as_str(), "Technical Support");
        assert_eq!(result.scores[0].matched, ["not working"]);
    }

    #[test]
    fn categories_lists_default_last() {
        let c = classifier();
        let names: Vec<&str> = c.categories().map(Category::as_str).collect();
        assert_eq!(
            names,
            ["Technical Support", "Billing", "Account Management", "General Inquiry"]
        );
    }

    proptest! {
        #[test]
        fn text_without_letters_is_always_default(text in "[0-9 .,!?#@-]{0,64}") {
            let c = classifier();
            let category = c.classify(&text);
            prop_assert_eq!(category.as_str(), "General Inquiry");
        }

        #[test]
        fn only_billing_keywords_classify_as_billing(
            words in proptest::sample::subsequence(
                vec!["payment", "invoice", "charge", "bill", "subscription", "price", "cost", "refund"],
                1..=8,
            ),
            filler in "[0-9 ]{0,16}",
        ) {
            let c = classifier();
            let text = format!("{filler} {}", words.join(" "));
            let category = c.classify(&text);
            prop_assert_eq!(category.as_str(), "Billing");
        }

        #[test]
        fn classification_is_deterministic(text in ".{0,80}") {
            let c = classifier();
            prop_assert_eq!(c.classify(&text), c.classify(&text));
        }
    }
}
