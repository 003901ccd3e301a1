use phishsense_lib::core::{analyze_url, extract, score};
use phishsense_lib::error::AnalysisError;
use phishsense_lib::models::{Feature, FeatureVector, RiskLevel, FEATURE_COUNT};

#[test]
fn plain_http_site() {
    let a = analyze_url("http://example.com/").unwrap();
    assert_eq!(a.risk_score, 0.10);
    assert_eq!(a.risk_level, RiskLevel::Low);
    assert!(!a.is_phishing);
}

#[test]
fn ip_host_with_login_path() {
    let a = analyze_url("https://192.168.1.1/login").unwrap();
    assert_eq!(a.features[Feature::HasIpAddress], 1);
    assert_eq!(a.features[Feature::HasSuspiciousWords], 1);
    assert_eq!(a.risk_score, 0.27);
    assert_eq!(a.risk_level, RiskLevel::Low);
    assert!(!a.is_phishing);
}

#[test]
fn lookalike_credentials_url() {
    let url = "http://secure-bank-login.com/verify/account@evil.com//update?x=1&y=2";
    let a = analyze_url(url).unwrap();
    let f = &a.features;
    assert_eq!(f[Feature::HasHttps], 0);
    assert_eq!(f[Feature::HasSuspiciousWords], 1);
    assert_eq!(f[Feature::NumAt], 1);
    assert_eq!(f[Feature::HasDoubleSlash], 1);
    // six slashes also trip the slash rule: 0.10 + 0.12 + 0.07 + 0.06 + 0.04
    assert_eq!(f[Feature::NumSlash], 6);
    assert_eq!(f[Feature::NumEqual], 2);
    assert_eq!(f[Feature::UrlLength], 68);
    assert_eq!(a.risk_score, 0.39);
    assert_eq!(a.risk_level, RiskLevel::Medium);
    assert!(!a.is_phishing);
}

#[test]
fn four_strong_signals_stay_under_threshold() {
    let features = FeatureVector::default()
        .with(Feature::HasIpAddress, 1)
        .with(Feature::HasSuspiciousWords, 1)
        .with(Feature::DomainInPath, 1)
        .with(Feature::HasHttps, 0);
    let a = score(&features);
    assert_eq!(a.risk_score, 0.47);
    assert!(!a.is_phishing);
}

#[test]
fn ip_repeated_in_path_is_phishing() {
    let a = analyze_url("http://10.0.0.1/10.0.0.1/login").unwrap();
    let f = &a.features;
    assert_eq!(f[Feature::HasIpAddress], 1);
    assert_eq!(f[Feature::HasSuspiciousWords], 1);
    assert_eq!(f[Feature::DomainInPath], 1);
    assert_eq!(f[Feature::HasHttps], 0);
    assert_eq!(f[Feature::NumDots], 6);
    assert_eq!(a.risk_score, 0.54);
    assert!(a.is_phishing);
    assert_eq!(a.risk_level, RiskLevel::Medium);
}

#[test]
fn malformed_input_cannot_be_assessed() {
    let err = extract("not a url").unwrap_err();
    assert!(matches!(err, AnalysisError::InvalidUrl { ref input, .. } if input == "not a url"));
    assert!(err.to_string().starts_with("cannot analyze 'not a url'"));
}

#[test]
fn long_deceptive_url_is_high_risk() {
    let url = "http://login.secure.account-update.verify.bank.example.com.phish.io/\
               login.secure.account-update.verify.bank.example.com.phish.io/\
               signin//index.php?user=a&session=b&token=c&next=d@e";
    let a = analyze_url(url).unwrap();
    assert!(a.is_phishing);
    assert_eq!(a.risk_level, RiskLevel::High);
    assert!(a.risk_score <= 0.99);
}

#[test]
fn positional_array_matches_named_access() {
    let f = extract("https://a-b.example.com/x/y?z=1").unwrap();
    let array = f.to_array();
    assert_eq!(array.len(), FEATURE_COUNT);
    for (i, feature) in Feature::ALL.iter().enumerate() {
        assert_eq!(array[i], f[*feature]);
        assert_eq!(f.by_name(feature.name()), Some(array[i]));
    }
    assert_eq!(FeatureVector::from_array(array), f);
}
