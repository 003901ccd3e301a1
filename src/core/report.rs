//! Human-facing rendering of an assessment: verdict, the high-impact
//! signals that fired, tips, and the importance ranking.

use serde::Serialize;
use std::fmt;

use crate::core::scoring::triggered_rules;
use crate::data::{explanation, importance, top_features};
use crate::models::{Feature, RiskAssessment};

/// Signals always called out in the security analysis section.
const HIGH_IMPACT: [Feature; 4] = [
    Feature::HasIpAddress,
    Feature::HasHttps,
    Feature::HasSuspiciousWords,
    Feature::DomainInPath,
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    pub feature: Feature,
    pub label: String,
    pub explanation: &'static str,
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedFeature {
    pub feature: Feature,
    pub label: String,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriggeredRule {
    pub feature: Feature,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelReport {
    pub url: String,
    pub headline: &'static str,
    pub score_percent: u32,
    pub assessment: RiskAssessment,
    pub findings: Vec<Finding>,
    pub tips: Vec<&'static str>,
    pub top_features: Vec<RankedFeature>,
    pub triggered: Vec<TriggeredRule>,
}

impl PanelReport {
    pub fn build(url: &str, assessment: &RiskAssessment, top_n: usize) -> Self {
        let features = &assessment.features;

        let findings = HIGH_IMPACT
            .iter()
            .filter(|&&f| indicates_risk(f, features.get(f)))
            .map(|&f| Finding {
                feature: f,
                label: f.label(),
                explanation: explanation(f),
                weight: importance(f),
            })
            .collect();

        let mut tips = Vec::new();
        if assessment.is_phishing {
            if features[Feature::HasHttps] == 0 {
                tips.push("This website does not use HTTPS encryption");
            }
            if features[Feature::HasIpAddress] > 0 {
                tips.push("URL contains an IP address instead of a domain name");
            }
            if features[Feature::HasSuspiciousWords] > 0 {
                tips.push("URL contains suspicious keywords");
            }
            if features[Feature::DomainInPath] > 0 {
                tips.push("Domain name is suspiciously repeated in the URL");
            }
        } else {
            if features[Feature::HasHttps] > 0 {
                tips.push("Website uses secure HTTPS encryption");
            }
            tips.push("No suspicious patterns detected in URL structure");
            if features[Feature::UrlLength] < 75 {
                tips.push("URL length is within normal range");
            }
        }

        PanelReport {
            url: url.to_string(),
            headline: if assessment.is_phishing {
                "Potential Phishing Website"
            } else {
                "Likely Legitimate Website"
            },
            score_percent: (assessment.risk_score * 100.0).round() as u32,
            assessment: assessment.clone(),
            findings,
            tips,
            top_features: top_features(top_n)
                .into_iter()
                .map(|(feature, weight)| RankedFeature {
                    feature,
                    label: feature.label(),
                    weight,
                })
                .collect(),
            triggered: triggered_rules(features)
                .map(|r| TriggeredRule {
                    feature: r.feature,
                    weight: r.weight(),
                })
                .collect(),
        }
    }
}

// https is the one signal that is risky when absent
fn indicates_risk(feature: Feature, value: u32) -> bool {
    match feature {
        Feature::HasHttps => value == 0,
        _ => value > 0,
    }
}

impl fmt::Display for PanelReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.assessment.is_phishing { "⚠️" } else { "✅" };
        writeln!(f, "{} {}", marker, self.headline)?;
        writeln!(f, "  URL:        {}", self.url)?;
        writeln!(f, "  Risk score: {}%", self.score_percent)?;
        writeln!(f, "  Risk level: {}", self.assessment.risk_level)?;

        if !self.findings.is_empty() {
            writeln!(f, "\nSecurity analysis:")?;
            for finding in &self.findings {
                match finding.weight {
                    Some(weight) => writeln!(f, "  {} ({:.2})", finding.label, weight)?,
                    None => writeln!(f, "  {}", finding.label)?,
                }
                writeln!(f, "    {}", finding.explanation)?;
            }
        }

        if self.assessment.is_phishing {
            writeln!(f, "\nWarning signs detected:")?;
        } else {
            writeln!(f, "\nSecurity features:")?;
        }
        for tip in &self.tips {
            writeln!(f, "  - {}", tip)?;
        }

        if !self.triggered.is_empty() {
            writeln!(f, "\nTriggered rules:")?;
            for rule in &self.triggered {
                writeln!(f, "  {:<22} +{:.2}", rule.feature.name(), rule.weight)?;
            }
        }

        if !self.top_features.is_empty() {
            writeln!(f, "\nTop impacting features:")?;
            for ranked in &self.top_features {
                let bar = "#".repeat((ranked.weight * 100.0).round() as usize);
                writeln!(f, "  {:<22} {:<15} {:.2}", ranked.label, bar, ranked.weight)?;
            }
        }
        Ok(())
    }
}
