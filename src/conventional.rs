use regex::Regex;

use crate::config::ConventionalCommitsConfig;
use crate::error::{ReleaseError, Result};
use crate::version::ChangeClass;

/// A single classification rule: commits matching `pattern` carry at least `class`.
#[derive(Debug)]
pub struct ClassificationRule {
    pub pattern: Regex,
    pub class: ChangeClass,
}

/// Builds the classification rule table from configuration.
///
/// Breaking indicators match anywhere in the message (subject or footer),
/// feature types match a conventional-commit header on the subject line,
/// with or without a parenthesized scope.
pub fn classification_rules(config: &ConventionalCommitsConfig) -> Result<Vec<ClassificationRule>> {
    let mut rules = Vec::new();

    for indicator in &config.breaking_change_indicators {
        let pattern = Regex::new(&regex::escape(indicator))
            .map_err(|e| ReleaseError::config(format!("Invalid breaking indicator: {}", e)))?;
        rules.push(ClassificationRule {
            pattern,
            class: ChangeClass::Breaking,
        });
    }

    for commit_type in &config.feature_types {
        let pattern = Regex::new(&format!(
            r"^{}(\([^)]+\))?:\s",
            regex::escape(commit_type)
        ))
        .map_err(|e| ReleaseError::config(format!("Invalid feature type: {}", e)))?;
        rules.push(ClassificationRule {
            pattern,
            class: ChangeClass::Feature,
        });
    }

    Ok(rules)
}

/// Classifies a commit range into the single most severe change class.
///
/// Each message is the commit's subject and body as one string. Returns
/// `None` when the range holds no non-empty commit, which callers treat as
/// "nothing to release" rather than forcing a patch bump.
pub fn classify_commits(
    messages: &[String],
    rules: &[ClassificationRule],
) -> Option<ChangeClass> {
    let mut class: Option<ChangeClass> = None;

    for message in messages {
        if message.trim().is_empty() {
            continue;
        }

        // Any non-empty commit is at least a patch
        let mut commit_class = ChangeClass::Patch;
        for rule in rules {
            if rule.pattern.is_match(message) {
                commit_class = commit_class.max(rule.class);
            }
        }

        class = Some(class.map_or(commit_class, |c| c.max(commit_class)));

        // Breaking dominates everything else, no point scanning further
        if class == Some(ChangeClass::Breaking) {
            break;
        }
    }

    class
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> Vec<ClassificationRule> {
        classification_rules(&ConventionalCommitsConfig::default()).unwrap()
    }

    fn classify(messages: &[&str]) -> Option<ChangeClass> {
        let messages: Vec<String> = messages.iter().map(|m| m.to_string()).collect();
        classify_commits(&messages, &rules())
    }

    #[test]
    fn test_breaking_footer_detected() {
        let class = classify(&["refactor: drop old API\n\nBREAKING CHANGE: removed old API"]);
        assert_eq!(class, Some(ChangeClass::Breaking));
    }

    #[test]
    fn test_breaking_dominates_features() {
        let class = classify(&[
            "feat(parser): add X",
            "fix: Y",
            "chore: Z\n\nBREAKING CHANGE: config format changed",
        ]);
        assert_eq!(class, Some(ChangeClass::Breaking));
    }

    #[test]
    fn test_commit_with_both_signals_is_breaking() {
        let class = classify(&["feat: new API\n\nBREAKING CHANGE: replaces the old one"]);
        assert_eq!(class, Some(ChangeClass::Breaking));
    }

    #[test]
    fn test_feature_header_without_scope() {
        assert_eq!(classify(&["feat: add X"]), Some(ChangeClass::Feature));
    }

    #[test]
    fn test_feature_header_with_scope() {
        assert_eq!(
            classify(&["feat(parser): add X", "fix: Y"]),
            Some(ChangeClass::Feature)
        );
    }

    #[test]
    fn test_deprecate_header_counts_as_feature() {
        assert_eq!(
            classify(&["deprecate(api): retire v1 endpoints"]),
            Some(ChangeClass::Feature)
        );
    }

    #[test]
    fn test_feature_word_in_body_is_not_a_header() {
        // "feat" only counts on the subject line header
        assert_eq!(
            classify(&["fix: stop crash\n\nfeat: mentioned in body"]),
            Some(ChangeClass::Patch)
        );
    }

    #[test]
    fn test_fix_commits_are_patch() {
        assert_eq!(classify(&["fix: null check"]), Some(ChangeClass::Patch));
    }

    #[test]
    fn test_non_conventional_commits_are_patch() {
        assert_eq!(classify(&["Update README"]), Some(ChangeClass::Patch));
    }

    #[test]
    fn test_empty_range_yields_none() {
        assert_eq!(classify(&[]), None);
    }

    #[test]
    fn test_whitespace_only_commits_yield_none() {
        assert_eq!(classify(&["", "   \n"]), None);
    }

    #[test]
    fn test_custom_feature_types() {
        let config = ConventionalCommitsConfig {
            feature_types: vec!["minor".to_string()],
            ..ConventionalCommitsConfig::default()
        };
        let rules = classification_rules(&config).unwrap();
        let messages = vec!["minor: widen API".to_string(), "feat: ignored".to_string()];
        // "feat" is no longer configured, "minor" is
        assert_eq!(
            classify_commits(&messages[..1], &rules),
            Some(ChangeClass::Feature)
        );
        assert_eq!(
            classify_commits(&messages[1..], &rules),
            Some(ChangeClass::Patch)
        );
    }
}
