//! Single-pass `{name}` substitution.

use crate::error::ComposeError;
use core_types::{MetricsProfile, PlaceholderPolicy};
use regex_lite::{Captures, Regex};
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z0-9_]+)\}").unwrap());

/// The result of filling one template string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hydrated {
    pub text: String,
    /// Names that had no value in the profile, in order of appearance.
    pub unresolved: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Hydrator {
    policy: PlaceholderPolicy,
}

impl Hydrator {
    pub fn new(policy: PlaceholderPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> PlaceholderPolicy {
        self.policy
    }

    /// Replaces every `{name}` with the display form of `profile[name]`.
    ///
    /// Substituted text is never rescanned, so a value that itself looks like a
    /// placeholder is emitted as-is.
    pub fn fill(&self, template: &str, profile: &MetricsProfile) -> Result<Hydrated, ComposeError> {
        let mut unresolved = Vec::new();

        let text = PLACEHOLDER.replace_all(template, |caps: &Captures<'_>| {
            let name = &caps[1];
            match profile.get(name) {
                Some(value) => value.to_string(),
                None => {
                    unresolved.push(name.to_string());
                    caps[0].to_string()
                }
            }
        });

        if self.policy == PlaceholderPolicy::Strict {
            if let Some(name) = unresolved.first() {
                return Err(ComposeError::UnresolvedPlaceholder {
                    name: name.clone(),
                    text: template.to_string(),
                });
            }
        }

        Ok(Hydrated {
            text: text.into_owned(),
            unresolved,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::MetricValue;

    fn profile() -> MetricsProfile {
        let mut p = MetricsProfile::new();
        p.insert("fund_name", "Horizon Stable Income Fund");
        p.insert("sharpe_ratio", MetricValue::rounded(1.2345, 2));
        p.insert("kurtosis", MetricValue::Unavailable);
        p.insert("has_income_stream", true);
        p.insert("echo", "{fund_name}");
        p
    }

    #[test]
    fn substitutes_known_names() {
        let h = Hydrator::default()
            .fill("{fund_name} Quarterly Report", &profile())
            .unwrap();
        assert_eq!(h.text, "Horizon Stable Income Fund Quarterly Report");
        assert!(h.unresolved.is_empty());
    }

    #[test]
    fn values_print_as_rounded() {
        let h = Hydrator::default()
            .fill("Sharpe {sharpe_ratio}, kurtosis {kurtosis}, income {has_income_stream}", &profile())
            .unwrap();
        assert_eq!(h.text, "Sharpe 1.23, kurtosis N/A, income true");
    }

    #[test]
    fn unknown_names_pass_through() {
        let h = Hydrator::default()
            .fill("Value: {nonexistent_key} for {fund_name}", &profile())
            .unwrap();
        assert_eq!(h.text, "Value: {nonexistent_key} for Horizon Stable Income Fund");
        assert_eq!(h.unresolved, vec!["nonexistent_key"]);
    }

    #[test]
    fn strict_policy_rejects_unknown_names() {
        let err = Hydrator::new(PlaceholderPolicy::Strict)
            .fill("Value: {nonexistent_key}", &profile())
            .unwrap_err();
        match err {
            ComposeError::UnresolvedPlaceholder { name, .. } => assert_eq!(name, "nonexistent_key"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn substitution_is_not_recursive() {
        let h = Hydrator::default().fill("{echo}", &profile()).unwrap();
        assert_eq!(h.text, "{fund_name}");
        assert!(h.unresolved.is_empty());
    }

    #[test]
    fn non_identifier_braces_are_left_alone() {
        let h = Hydrator::default().fill("{not a name} {fund-name}", &profile()).unwrap();
        assert_eq!(h.text, "{not a name} {fund-name}");
        assert!(h.unresolved.is_empty());
    }

    #[test]
    fn filling_twice_changes_nothing() {
        let hydrator = Hydrator::default();
        let once = hydrator.fill("{fund_name}: {nonexistent_key}", &profile()).unwrap();
        let twice = hydrator.fill(&once.text, &profile()).unwrap();
        assert_eq!(once.text, twice.text);
    }
}
