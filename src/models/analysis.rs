use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;
use std::str::FromStr;
use thiserror::Error;

pub const FEATURE_COUNT: usize = 20;

/// Lexical URL signals, declared in canonical vector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    UrlLength,
    HostnameLength,
    DomainInPath,
    DomainAgeDays,
    NumDots,
    NumHyphens,
    NumAt,
    NumQuestionMarks,
    NumAnd,
    NumEqual,
    NumUnderscore,
    NumTilde,
    NumPercent,
    NumSlash,
    HasIpAddress,
    HasHttps,
    HasSuspiciousWords,
    DirCount,
    PathLength,
    HasDoubleSlash,
}

impl Feature {
    /// The one authoritative ordering, shared by extraction, scoring and display.
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::UrlLength,
        Feature::HostnameLength,
        Feature::DomainInPath,
        Feature::DomainAgeDays,
        Feature::NumDots,
        Feature::NumHyphens,
        Feature::NumAt,
        Feature::NumQuestionMarks,
        Feature::NumAnd,
        Feature::NumEqual,
        Feature::NumUnderscore,
        Feature::NumTilde,
        Feature::NumPercent,
        Feature::NumSlash,
        Feature::HasIpAddress,
        Feature::HasHttps,
        Feature::HasSuspiciousWords,
        Feature::DirCount,
        Feature::PathLength,
        Feature::HasDoubleSlash,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Feature::UrlLength => "url_length",
            Feature::HostnameLength => "hostname_length",
            Feature::DomainInPath => "domain_in_path",
            Feature::DomainAgeDays => "domain_age_days",
            Feature::NumDots => "num_dots",
            Feature::NumHyphens => "num_hyphens",
            Feature::NumAt => "num_at",
            Feature::NumQuestionMarks => "num_question_marks",
            Feature::NumAnd => "num_and",
            Feature::NumEqual => "num_equal",
            Feature::NumUnderscore => "num_underscore",
            Feature::NumTilde => "num_tilde",
            Feature::NumPercent => "num_percent",
            Feature::NumSlash => "num_slash",
            Feature::HasIpAddress => "has_ip_address",
            Feature::HasHttps => "has_https",
            Feature::HasSuspiciousWords => "has_suspicious_words",
            Feature::DirCount => "dir_count",
            Feature::PathLength => "path_length",
            Feature::HasDoubleSlash => "has_double_slash",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// 0/1 flags as opposed to counts and lengths.
    pub fn is_flag(self) -> bool {
        matches!(
            self,
            Feature::DomainInPath
                | Feature::HasIpAddress
                | Feature::HasHttps
                | Feature::HasSuspiciousWords
                | Feature::HasDoubleSlash
        )
    }

    /// Display label, e.g. `HAS IP ADDRESS`.
    pub fn label(self) -> String {
        self.name().replace('_', " ").to_uppercase()
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("unknown feature '{0}'")]
    Unknown(String),
    #[error("missing feature '{0}'")]
    Missing(&'static str),
    #[error("feature '{name}' is a 0/1 flag, got {value}")]
    NotAFlag { name: &'static str, value: u32 },
}

impl FromStr for Feature {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feature::ALL
            .iter()
            .copied()
            .find(|f| f.name() == s)
            .ok_or_else(|| SchemaError::Unknown(s.to_string()))
    }
}

impl Serialize for Feature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Feature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// Fixed-schema numeric summary of a URL. Always carries all 20 features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "BTreeMap<String, u32>")]
pub struct FeatureVector {
    values: [u32; FEATURE_COUNT],
}

impl FeatureVector {
    pub fn from_array(values: [u32; FEATURE_COUNT]) -> Self {
        FeatureVector { values }
    }

    pub fn to_array(&self) -> [u32; FEATURE_COUNT] {
        self.values
    }

    pub fn get(&self, feature: Feature) -> u32 {
        self.values[feature.index()]
    }

    pub fn by_name(&self, name: &str) -> Option<u32> {
        name.parse::<Feature>().ok().map(|f| self.get(f))
    }

    /// Copy of this vector with one feature replaced.
    pub fn with(mut self, feature: Feature, value: u32) -> Self {
        self.values[feature.index()] = value;
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (Feature, u32)> + '_ {
        Feature::ALL.iter().map(move |&f| (f, self.get(f)))
    }
}

impl Index<Feature> for FeatureVector {
    type Output = u32;

    fn index(&self, feature: Feature) -> &u32 {
        &self.values[feature.index()]
    }
}

impl Serialize for FeatureVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FEATURE_COUNT))?;
        for (feature, value) in self.iter() {
            map.serialize_entry(feature.name(), &value)?;
        }
        map.end()
    }
}

impl TryFrom<BTreeMap<String, u32>> for FeatureVector {
    type Error = SchemaError;

    fn try_from(mut named: BTreeMap<String, u32>) -> Result<Self, Self::Error> {
        let mut values = [0; FEATURE_COUNT];
        for feature in Feature::ALL {
            let value = named
                .remove(feature.name())
                .ok_or(SchemaError::Missing(feature.name()))?;
            if feature.is_flag() && value > 1 {
                return Err(SchemaError::NotAFlag { name: feature.name(), value });
            }
            values[feature.index()] = value;
        }
        if let Some(extra) = named.into_keys().next() {
            return Err(SchemaError::Unknown(extra));
        }
        Ok(FeatureVector { values })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_score(score: f64) -> Self {
        if score < 0.3 {
            RiskLevel::Low
        } else if score < 0.6 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub is_phishing: bool,
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    pub features: FeatureVector,
}
