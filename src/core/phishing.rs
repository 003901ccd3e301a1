use tracing::debug;

use crate::core::features::extract;
use crate::core::scoring::score;
use crate::error::AnalysisError;
use crate::models::RiskAssessment;

/// Extract then score. The entry point every collaborator goes through.
pub fn analyze_url(url: &str) -> Result<RiskAssessment, AnalysisError> {
    let features = extract(url)?;
    let assessment = score(&features);
    debug!(url, score = assessment.risk_score, "analyzed url");
    Ok(assessment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RiskLevel;

    #[test]
    fn composes_extract_and_score() {
        let a = analyze_url("http://example.com/").unwrap();
        assert_eq!(a.risk_score, 0.10);
        assert_eq!(a.risk_level, RiskLevel::Low);
        assert!(!a.is_phishing);
    }

    #[test]
    fn invalid_input_is_not_scored() {
        assert!(matches!(
            analyze_url("not a url"),
            Err(AnalysisError::InvalidUrl { .. })
        ));
    }
}
