use tracing::debug;

use crate::models::{Feature, FeatureVector, RiskAssessment, RiskLevel};

/// Score at or above which a URL is reported as phishing, in hundredths.
pub const PHISHING_THRESHOLD_POINTS: u32 = 50;
/// Upper clamp on the score, in hundredths. A score never reaches 1.0.
pub const MAX_SCORE_POINTS: u32 = 99;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// Flag equals 1.
    Set,
    /// Flag equals 0.
    Unset,
    /// Value strictly greater than the bound.
    Above(u32),
}

impl Condition {
    pub fn holds(self, value: u32) -> bool {
        match self {
            Condition::Set => value == 1,
            Condition::Unset => value == 0,
            Condition::Above(bound) => value > bound,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringRule {
    pub feature: Feature,
    pub condition: Condition,
    /// Weight in hundredths of a score point.
    pub points: u32,
}

impl ScoringRule {
    pub fn weight(&self) -> f64 {
        f64::from(self.points) / 100.0
    }

    pub fn matches(&self, features: &FeatureVector) -> bool {
        self.condition.holds(features.get(self.feature))
    }
}

const fn rule(feature: Feature, condition: Condition, points: u32) -> ScoringRule {
    ScoringRule { feature, condition, points }
}

/// Risk rules. Independent of the display weights in `data::importance`.
pub static SCORING_RULES: [ScoringRule; 12] = [
    rule(Feature::HasIpAddress, Condition::Set, 15),
    rule(Feature::HasSuspiciousWords, Condition::Set, 12),
    rule(Feature::DomainInPath, Condition::Set, 10),
    rule(Feature::HasHttps, Condition::Unset, 10),
    rule(Feature::UrlLength, Condition::Above(75), 8),
    rule(Feature::NumDots, Condition::Above(3), 7),
    rule(Feature::NumAt, Condition::Above(0), 7),
    rule(Feature::HasDoubleSlash, Condition::Set, 6),
    rule(Feature::HostnameLength, Condition::Above(30), 5),
    rule(Feature::PathLength, Condition::Above(50), 5),
    rule(Feature::NumSlash, Condition::Above(4), 4),
    rule(Feature::NumEqual, Condition::Above(2), 2),
];

/// Rules whose condition holds for `features`, in table order.
pub fn triggered_rules(features: &FeatureVector) -> impl Iterator<Item = &'static ScoringRule> + '_ {
    SCORING_RULES.iter().filter(move |r| r.matches(features))
}

/// Turn a feature vector into a risk assessment. Never fails.
pub fn score(features: &FeatureVector) -> RiskAssessment {
    let raw_points: u32 = triggered_rules(features).map(|r| r.points).sum();
    let points = raw_points.min(MAX_SCORE_POINTS);
    let risk_score = f64::from(points) / 100.0;

    let assessment = RiskAssessment {
        is_phishing: points >= PHISHING_THRESHOLD_POINTS,
        risk_score,
        risk_level: RiskLevel::from_score(risk_score),
        features: *features,
    };

    debug!(
        raw_points,
        risk_score,
        level = %assessment.risk_level,
        phishing = assessment.is_phishing,
        "scored feature vector"
    );
    assessment
}
