//! URL -> feature vector.
//!
//! Character counts run over the raw input; host and path come from the
//! WHATWG-parsed URL, so the host is lowercased/punycoded and the path is
//! percent-encoded the same way a browser reports them.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;
use url::Url;

use crate::error::AnalysisError;
use crate::models::{Feature, FeatureVector};

const SUSPICIOUS_KEYWORDS: &[&str] = &[
    "secure", "login", "signin", "bank", "account", "update", "verify",
];

// Dotted quad right after the scheme. Octets are not range checked.
static IP_HOST_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(http|https)://([0-9]{1,3}\.){3}[0-9]{1,3}").expect("valid IP prefix pattern")
});

/// Extract the 20-feature vector from a URL string.
///
/// Fails with [`AnalysisError::InvalidUrl`] when the input is not an absolute
/// URL with a host. Callers must treat that as "cannot assess", never as benign.
pub fn extract(raw: &str) -> Result<FeatureVector, AnalysisError> {
    // 1. Parse
    let parsed = Url::parse(raw).map_err(|e| AnalysisError::invalid(raw, e.to_string()))?;
    let host = match parsed.host_str() {
        Some(h) if !h.is_empty() => h,
        _ => return Err(AnalysisError::invalid(raw, "missing host")),
    };
    let path = parsed.path();

    // 2. Lengths and structure
    let lowered = raw.to_ascii_lowercase();
    let domain_in_path = path.to_lowercase().contains(&host.to_lowercase());
    let dir_count = path.split('/').filter(|segment| !segment.is_empty()).count();

    // 3. Security indicators
    let has_ip_address = IP_HOST_PREFIX.is_match(raw);
    let has_https = parsed.scheme() == "https";
    let has_suspicious_words = SUSPICIOUS_KEYWORDS.iter().any(|kw| lowered.contains(kw));

    let features = FeatureVector::default()
        .with(Feature::UrlLength, len(raw.chars().count()))
        .with(Feature::HostnameLength, len(host.chars().count()))
        .with(Feature::DomainInPath, flag(domain_in_path))
        .with(Feature::DomainAgeDays, 0)
        .with(Feature::NumDots, count(raw, '.'))
        .with(Feature::NumHyphens, count(raw, '-'))
        .with(Feature::NumAt, count(raw, '@'))
        .with(Feature::NumQuestionMarks, count(raw, '?'))
        .with(Feature::NumAnd, count(raw, '&'))
        .with(Feature::NumEqual, count(raw, '='))
        .with(Feature::NumUnderscore, count(raw, '_'))
        .with(Feature::NumTilde, count(raw, '~'))
        .with(Feature::NumPercent, count(raw, '%'))
        .with(Feature::NumSlash, count(raw, '/'))
        .with(Feature::HasIpAddress, flag(has_ip_address))
        .with(Feature::HasHttps, flag(has_https))
        .with(Feature::HasSuspiciousWords, flag(has_suspicious_words))
        .with(Feature::DirCount, len(dir_count))
        .with(Feature::PathLength, len(path.chars().count()))
        .with(Feature::HasDoubleSlash, flag(path.contains("//")));

    trace!(url = raw, ?features, "extracted features");
    Ok(features)
}

fn count(raw: &str, needle: char) -> u32 {
    len(raw.chars().filter(|&c| c == needle).count())
}

fn len(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

fn flag(set: bool) -> u32 {
    u32::from(set)
}
