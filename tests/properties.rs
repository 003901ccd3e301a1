//! Property tests for the extract -> score pipeline.

use phishsense_lib::core::scoring::SCORING_RULES;
use phishsense_lib::core::{analyze_url, extract, score};
use phishsense_lib::models::{Feature, FeatureVector, RiskLevel, FEATURE_COUNT};
use proptest::prelude::*;

fn url_strategy() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just("http"), Just("https")],
        prop::string::string_regex("[a-z0-9-]{1,20}(\\.[a-z0-9-]{1,12}){0,4}").unwrap(),
        prop::string::string_regex("(/[a-zA-Z0-9._~%@=&?-]{0,15}){0,6}").unwrap(),
    )
        .prop_map(|(scheme, host, path)| format!("{}://{}{}", scheme, host, path))
}

fn vector_strategy() -> impl Strategy<Value = FeatureVector> {
    prop::array::uniform20(0u32..120).prop_map(|mut values| {
        for feature in Feature::ALL.iter().filter(|f| f.is_flag()) {
            values[feature.index()] %= 2;
        }
        values[Feature::DomainAgeDays.index()] = 0;
        FeatureVector::from_array(values)
    })
}

proptest! {
    #[test]
    fn extraction_is_deterministic(url in url_strategy()) {
        let first = analyze_url(&url);
        let second = analyze_url(&url);
        prop_assert_eq!(&first, &second);
        if let Ok(a) = first {
            prop_assert_eq!(a.risk_score.to_bits(), second.unwrap().risk_score.to_bits());
        }
    }

    #[test]
    fn schema_is_complete(url in url_strategy()) {
        if let Ok(f) = extract(&url) {
            prop_assert_eq!(f.iter().count(), FEATURE_COUNT);
            prop_assert_eq!(f[Feature::DomainAgeDays], 0);
            for feature in Feature::ALL.iter().filter(|f| f.is_flag()) {
                prop_assert!(f[*feature] <= 1);
            }
        }
    }

    #[test]
    fn score_is_bounded(v in vector_strategy()) {
        let a = score(&v);
        prop_assert!(a.risk_score >= 0.0);
        prop_assert!(a.risk_score <= 0.99);
    }

    #[test]
    fn verdict_matches_threshold(v in vector_strategy()) {
        let a = score(&v);
        prop_assert_eq!(a.is_phishing, a.risk_score >= 0.5);
    }

    #[test]
    fn level_partitions_score(v in vector_strategy()) {
        let a = score(&v);
        let expected = if a.risk_score < 0.3 {
            RiskLevel::Low
        } else if a.risk_score < 0.6 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        };
        prop_assert_eq!(a.risk_level, expected);
    }

    #[test]
    fn matching_another_rule_never_lowers_score(v in vector_strategy(), pick in 0usize..12) {
        let rule = &SCORING_RULES[pick];
        let triggering = match rule.feature {
            Feature::HasHttps => 0,
            f if f.is_flag() => 1,
            _ => v[rule.feature].max(200),
        };
        let before = score(&v);
        let after = score(&v.with(rule.feature, triggering));
        prop_assert!(after.risk_score >= before.risk_score);
    }

    #[test]
    fn realistic_urls_score_within_bounds(url in url_strategy()) {
        if let Ok(a) = analyze_url(&url) {
            prop_assert!(a.risk_score <= 0.99);
            prop_assert_eq!(a.is_phishing, a.risk_score >= 0.5);
            prop_assert_eq!(a.features[Feature::HasHttps] == 1, url.starts_with("https://"));
        }
    }
}
