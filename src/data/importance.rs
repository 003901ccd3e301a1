use crate::models::Feature;

/// Display weights used to rank signals in reports.
///
/// Not used by the scorer, and allowed to drift from `SCORING_RULES`
/// (e.g. hyphens rank here but never add to a score).
pub static FEATURE_IMPORTANCE: [(Feature, f64); 16] = [
    (Feature::HasIpAddress, 0.15),
    (Feature::HasSuspiciousWords, 0.12),
    (Feature::DomainInPath, 0.10),
    (Feature::HasHttps, 0.10),
    (Feature::UrlLength, 0.08),
    (Feature::NumDots, 0.07),
    (Feature::NumAt, 0.07),
    (Feature::HasDoubleSlash, 0.06),
    (Feature::HostnameLength, 0.05),
    (Feature::PathLength, 0.05),
    (Feature::NumHyphens, 0.05),
    (Feature::NumSlash, 0.04),
    (Feature::NumEqual, 0.02),
    (Feature::NumAnd, 0.02),
    (Feature::NumUnderscore, 0.01),
    (Feature::NumTilde, 0.01),
];

pub fn importance(feature: Feature) -> Option<f64> {
    FEATURE_IMPORTANCE
        .iter()
        .find(|(f, _)| *f == feature)
        .map(|&(_, weight)| weight)
}

/// The `n` highest-weighted features, descending. Ties keep table order.
pub fn top_features(n: usize) -> Vec<(Feature, f64)> {
    let mut ranked = FEATURE_IMPORTANCE.to_vec();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scoring::SCORING_RULES;

    #[test]
    fn top_ten_in_descending_order() {
        let top = top_features(10);
        assert_eq!(top.len(), 10);
        assert_eq!(top[0], (Feature::HasIpAddress, 0.15));
        assert!(top.windows(2).all(|w| w[0].1 >= w[1].1));
        // ties keep declaration order
        assert_eq!(top[2].0, Feature::DomainInPath);
        assert_eq!(top[3].0, Feature::HasHttps);
        assert_eq!(top[9].0, Feature::PathLength);
    }

    #[test]
    fn top_features_saturates() {
        assert_eq!(top_features(100).len(), FEATURE_IMPORTANCE.len());
        assert!(top_features(0).is_empty());
    }

    #[test]
    fn unranked_features() {
        assert_eq!(importance(Feature::DomainAgeDays), None);
        assert_eq!(importance(Feature::NumPercent), None);
        assert_eq!(importance(Feature::NumHyphens), Some(0.05));
    }

    #[test]
    fn diverges_from_scoring_rules() {
        let scored: Vec<Feature> = SCORING_RULES.iter().map(|r| r.feature).collect();
        assert!(!scored.contains(&Feature::NumHyphens));
        assert!(importance(Feature::NumHyphens).is_some());
    }
}
