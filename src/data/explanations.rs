use crate::models::Feature;

/// One-sentence rationale for why a feature matters.
pub fn explanation(feature: Feature) -> &'static str {
    match feature {
        Feature::UrlLength => "Unusually long URLs may indicate hidden malicious content",
        Feature::HostnameLength => "Extremely long hostnames are often suspicious",
        Feature::DomainInPath => "Domain name repeated in URL path may indicate deception",
        Feature::DomainAgeDays => "Newly registered domains are more likely to be malicious",
        Feature::NumDots => "Excessive dots may indicate subdomain abuse",
        Feature::NumHyphens => "Multiple hyphens are common in phishing URLs",
        Feature::NumAt => "The @ symbol in URLs can be used to obscure the actual destination",
        Feature::NumQuestionMarks => "Multiple query parameters may hide malicious code",
        Feature::NumAnd => "Numerous parameters might indicate suspicious data collection",
        Feature::NumEqual => "Many parameters could suggest data harvesting",
        Feature::NumUnderscore => "Uncommon in legitimate URLs",
        Feature::NumTilde => "Rarely used in legitimate URLs",
        Feature::NumPercent => "Encoded characters may hide malicious content",
        Feature::NumSlash => "Deep directory structures might hide malicious content",
        Feature::HasIpAddress => "IP addresses instead of domain names are suspicious",
        Feature::HasHttps => "Lack of HTTPS indicates poor security",
        Feature::HasSuspiciousWords => "Contains terms commonly used in phishing",
        Feature::DirCount => "Excessive directories may hide true purpose",
        Feature::PathLength => "Extremely long paths may hide malicious content",
        Feature::HasDoubleSlash => "Double slashes in path may indicate URL manipulation",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_feature_is_explained_distinctly() {
        let texts: HashSet<&str> = Feature::ALL.iter().map(|&f| explanation(f)).collect();
        assert_eq!(texts.len(), Feature::ALL.len());
        assert!(texts.iter().all(|t| !t.is_empty() && !t.ends_with('.')));
    }
}
