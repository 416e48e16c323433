//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may obtain a copy of the License at
//  http://www.apache.org/licenses/LICENSE-2.0
//
//! Closed-set option types used throughout the management API.
//!
//! Every enumerated server option is modeled as an enum whose serde
//! representation matches the wire token the Management API expects.
//! Parsing an unknown token through [`FromStr`] yields an
//! [`InvalidValue`](crate::MgmtErrorCode::InvalidValue) error; constructing
//! a value in code cannot fail.

use crate::error::{iv_err, MgmtError};
use serde_derive::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Check a bounded integer option, leaving the caller's state untouched on
/// failure.
pub(crate) fn validate_range(value: u32, min: u32, max: u32, what: &str) -> Result<(), MgmtError> {
    if value < min || value > max {
        return iv_err!("{} must be between {} and {}, got {}", what, min, max, value);
    }
    Ok(())
}

/// Scalar type of a range index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScalarType {
    #[serde(rename = "int")]
    Int,
    #[serde(rename = "unsignedInt")]
    UnsignedInt,
    #[serde(rename = "long")]
    Long,
    #[serde(rename = "unsignedLong")]
    UnsignedLong,
    #[serde(rename = "float")]
    Float,
    #[serde(rename = "double")]
    Double,
    #[serde(rename = "decimal")]
    Decimal,
    #[serde(rename = "dateTime")]
    DateTime,
    #[serde(rename = "time")]
    Time,
    #[serde(rename = "date")]
    Date,
    #[serde(rename = "gYearMonth")]
    GYearMonth,
    #[serde(rename = "gYear")]
    GYear,
    #[serde(rename = "gMonth")]
    GMonth,
    #[serde(rename = "gDay")]
    GDay,
    #[serde(rename = "yearMonthDuration")]
    YearMonthDuration,
    #[serde(rename = "dayTimeDuration")]
    DayTimeDuration,
    #[serde(rename = "string")]
    String,
    #[serde(rename = "anyURI")]
    AnyUri,
}

impl ScalarType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarType::Int => "int",
            ScalarType::UnsignedInt => "unsignedInt",
            ScalarType::Long => "long",
            ScalarType::UnsignedLong => "unsignedLong",
            ScalarType::Float => "float",
            ScalarType::Double => "double",
            ScalarType::Decimal => "decimal",
            ScalarType::DateTime => "dateTime",
            ScalarType::Time => "time",
            ScalarType::Date => "date",
            ScalarType::GYearMonth => "gYearMonth",
            ScalarType::GYear => "gYear",
            ScalarType::GMonth => "gMonth",
            ScalarType::GDay => "gDay",
            ScalarType::YearMonthDuration => "yearMonthDuration",
            ScalarType::DayTimeDuration => "dayTimeDuration",
            ScalarType::String => "string",
            ScalarType::AnyUri => "anyURI",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScalarType {
    type Err = MgmtError;
    fn from_str(s: &str) -> Result<Self, MgmtError> {
        match s {
            "int" => Ok(ScalarType::Int),
            "unsignedInt" => Ok(ScalarType::UnsignedInt),
            "long" => Ok(ScalarType::Long),
            "unsignedLong" => Ok(ScalarType::UnsignedLong),
            "float" => Ok(ScalarType::Float),
            "double" => Ok(ScalarType::Double),
            "decimal" => Ok(ScalarType::Decimal),
            "dateTime" => Ok(ScalarType::DateTime),
            "time" => Ok(ScalarType::Time),
            "date" => Ok(ScalarType::Date),
            "gYearMonth" => Ok(ScalarType::GYearMonth),
            "gYear" => Ok(ScalarType::GYear),
            "gMonth" => Ok(ScalarType::GMonth),
            "gDay" => Ok(ScalarType::GDay),
            "yearMonthDuration" => Ok(ScalarType::YearMonthDuration),
            "dayTimeDuration" => Ok(ScalarType::DayTimeDuration),
            "string" => Ok(ScalarType::String),
            "anyURI" => Ok(ScalarType::AnyUri),
            _ => iv_err!("'{}' is not a valid index scalar type", s),
        }
    }
}

/// How the server treats values that cannot be coerced into a range
/// index's scalar type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidValues {
    Ignore,
    #[default]
    Reject,
}

impl fmt::Display for InvalidValues {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InvalidValues::Ignore => f.write_str("ignore"),
            InvalidValues::Reject => f.write_str("reject"),
        }
    }
}

impl FromStr for InvalidValues {
    type Err = MgmtError;
    fn from_str(s: &str) -> Result<Self, MgmtError> {
        match s {
            "ignore" => Ok(InvalidValues::Ignore),
            "reject" => Ok(InvalidValues::Reject),
            _ => iv_err!("'{}' is not a valid action for invalid index values", s),
        }
    }
}

/// Stemmed search support level for a database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StemmedSearches {
    Off,
    #[default]
    Basic,
    Advanced,
    Decompounding,
}

impl fmt::Display for StemmedSearches {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StemmedSearches::Off => f.write_str("off"),
            StemmedSearches::Basic => f.write_str("basic"),
            StemmedSearches::Advanced => f.write_str("advanced"),
            StemmedSearches::Decompounding => f.write_str("decompounding"),
        }
    }
}

impl FromStr for StemmedSearches {
    type Err = MgmtError;
    fn from_str(s: &str) -> Result<Self, MgmtError> {
        match s {
            "off" => Ok(StemmedSearches::Off),
            "basic" => Ok(StemmedSearches::Basic),
            "advanced" => Ok(StemmedSearches::Advanced),
            "decompounding" => Ok(StemmedSearches::Decompounding),
            _ => iv_err!("'{}' is not a valid type of stemmed search", s),
        }
    }
}

/// Directory creation mode for a database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DirectoryCreation {
    #[default]
    Manual,
    Automatic,
    ManualEnforced,
}

impl fmt::Display for DirectoryCreation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DirectoryCreation::Manual => f.write_str("manual"),
            DirectoryCreation::Automatic => f.write_str("automatic"),
            DirectoryCreation::ManualEnforced => f.write_str("manual-enforced"),
        }
    }
}

impl FromStr for DirectoryCreation {
    type Err = MgmtError;
    fn from_str(s: &str) -> Result<Self, MgmtError> {
        match s {
            "manual" => Ok(DirectoryCreation::Manual),
            "automatic" => Ok(DirectoryCreation::Automatic),
            "manual-enforced" => Ok(DirectoryCreation::ManualEnforced),
            _ => iv_err!("'{}' is not a valid directory creation method", s),
        }
    }
}

/// Robustness level for transaction locking and journaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locking {
    Strict,
    #[default]
    Fast,
    Off,
}

impl fmt::Display for Locking {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Locking::Strict => f.write_str("strict"),
            Locking::Fast => f.write_str("fast"),
            Locking::Off => f.write_str("off"),
        }
    }
}

impl FromStr for Locking {
    type Err = MgmtError;
    fn from_str(s: &str) -> Result<Self, MgmtError> {
        match s {
            "strict" => Ok(Locking::Strict),
            "fast" => Ok(Locking::Fast),
            "off" => Ok(Locking::Off),
            _ => iv_err!("'{}' is not a valid locking option", s),
        }
    }
}

/// Range index optimization target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RangeIndexOptimize {
    #[default]
    FacetTime,
    MemorySize,
}

impl fmt::Display for RangeIndexOptimize {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RangeIndexOptimize::FacetTime => f.write_str("facet-time"),
            RangeIndexOptimize::MemorySize => f.write_str("memory-size"),
        }
    }
}

impl FromStr for RangeIndexOptimize {
    type Err = MgmtError;
    fn from_str(s: &str) -> Result<Self, MgmtError> {
        match s {
            "facet-time" => Ok(RangeIndexOptimize::FacetTime),
            "memory-size" => Ok(RangeIndexOptimize::MemorySize),
            _ => iv_err!("'{}' is not a valid range index optimize option", s),
        }
    }
}

/// Version of the on-disk forest format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FormatCompatibility {
    #[default]
    #[serde(rename = "automatic")]
    Automatic,
    #[serde(rename = "5.0")]
    V5_0,
    #[serde(rename = "4.2")]
    V4_2,
    #[serde(rename = "4.1")]
    V4_1,
    #[serde(rename = "4.0")]
    V4_0,
    #[serde(rename = "3.2")]
    V3_2,
}

impl fmt::Display for FormatCompatibility {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FormatCompatibility::Automatic => f.write_str("automatic"),
            FormatCompatibility::V5_0 => f.write_str("5.0"),
            FormatCompatibility::V4_2 => f.write_str("4.2"),
            FormatCompatibility::V4_1 => f.write_str("4.1"),
            FormatCompatibility::V4_0 => f.write_str("4.0"),
            FormatCompatibility::V3_2 => f.write_str("3.2"),
        }
    }
}

impl FromStr for FormatCompatibility {
    type Err = MgmtError;
    fn from_str(s: &str) -> Result<Self, MgmtError> {
        match s {
            "automatic" => Ok(FormatCompatibility::Automatic),
            "5.0" => Ok(FormatCompatibility::V5_0),
            "4.2" => Ok(FormatCompatibility::V4_2),
            "4.1" => Ok(FormatCompatibility::V4_1),
            "4.0" => Ok(FormatCompatibility::V4_0),
            "3.2" => Ok(FormatCompatibility::V3_2),
            _ => iv_err!("'{}' is not a valid on-disk format compatibility option", s),
        }
    }
}

/// How differences between configured and on-disk index settings are
/// handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexDetection {
    #[default]
    Automatic,
    None,
}

impl fmt::Display for IndexDetection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IndexDetection::Automatic => f.write_str("automatic"),
            IndexDetection::None => f.write_str("none"),
        }
    }
}

impl FromStr for IndexDetection {
    type Err = MgmtError;
    fn from_str(s: &str) -> Result<Self, MgmtError> {
        match s {
            "automatic" => Ok(IndexDetection::Automatic),
            "none" => Ok(IndexDetection::None),
            _ => iv_err!("'{}' is not a valid index detection option", s),
        }
    }
}

/// Garbage collection policy for expired timed locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpungeLocks {
    Automatic,
    #[default]
    None,
}

impl fmt::Display for ExpungeLocks {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExpungeLocks::Automatic => f.write_str("automatic"),
            ExpungeLocks::None => f.write_str("none"),
        }
    }
}

impl FromStr for ExpungeLocks {
    type Err = MgmtError;
    fn from_str(s: &str) -> Result<Self, MgmtError> {
        match s {
            "automatic" => Ok(ExpungeLocks::Automatic),
            "none" => Ok(ExpungeLocks::None),
            _ => iv_err!("'{}' is not a valid expunge locks option", s),
        }
    }
}

/// Term frequency normalization applied at query time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TfNormalization {
    UnscaledLog,
    WeakestScaledLog,
    WeaklyScaledLog,
    ModeratelyScaledLog,
    StronglyScaledLog,
    #[default]
    ScaledLog,
}

impl fmt::Display for TfNormalization {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TfNormalization::UnscaledLog => f.write_str("unscaled-log"),
            TfNormalization::WeakestScaledLog => f.write_str("weakest-scaled-log"),
            TfNormalization::WeaklyScaledLog => f.write_str("weakly-scaled-log"),
            TfNormalization::ModeratelyScaledLog => f.write_str("moderately-scaled-log"),
            TfNormalization::StronglyScaledLog => f.write_str("strongly-scaled-log"),
            TfNormalization::ScaledLog => f.write_str("scaled-log"),
        }
    }
}

impl FromStr for TfNormalization {
    type Err = MgmtError;
    fn from_str(s: &str) -> Result<Self, MgmtError> {
        match s {
            "unscaled-log" => Ok(TfNormalization::UnscaledLog),
            "weakest-scaled-log" => Ok(TfNormalization::WeakestScaledLog),
            "weakly-scaled-log" => Ok(TfNormalization::WeaklyScaledLog),
            "moderately-scaled-log" => Ok(TfNormalization::ModeratelyScaledLog),
            "strongly-scaled-log" => Ok(TfNormalization::StronglyScaledLog),
            "scaled-log" => Ok(TfNormalization::ScaledLog),
            _ => iv_err!("'{}' is not a valid term frequency normalization option", s),
        }
    }
}

/// CPU scheduler priority for merges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergePriority {
    #[default]
    Lower,
    Normal,
}

impl fmt::Display for MergePriority {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MergePriority::Lower => f.write_str("lower"),
            MergePriority::Normal => f.write_str("normal"),
        }
    }
}

impl FromStr for MergePriority {
    type Err = MgmtError;
    fn from_str(s: &str) -> Result<Self, MgmtError> {
        match s {
            "lower" => Ok(MergePriority::Lower),
            "normal" => Ok(MergePriority::Normal),
            _ => iv_err!("'{}' is not a valid merge priority option", s),
        }
    }
}

/// Policy for forest assignment and rebalancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentPolicy {
    #[default]
    Bucket,
    Statistical,
    Range,
    Legacy,
}

impl fmt::Display for AssignmentPolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AssignmentPolicy::Bucket => f.write_str("bucket"),
            AssignmentPolicy::Statistical => f.write_str("statistical"),
            AssignmentPolicy::Range => f.write_str("range"),
            AssignmentPolicy::Legacy => f.write_str("legacy"),
        }
    }
}

impl FromStr for AssignmentPolicy {
    type Err = MgmtError;
    fn from_str(s: &str) -> Result<Self, MgmtError> {
        match s {
            "bucket" => Ok(AssignmentPolicy::Bucket),
            "statistical" => Ok(AssignmentPolicy::Statistical),
            "range" => Ok(AssignmentPolicy::Range),
            "legacy" => Ok(AssignmentPolicy::Legacy),
            _ => iv_err!("'{}' is not a valid assignment policy option", s),
        }
    }
}

/// Availability of a forest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    #[default]
    Online,
    Offline,
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Availability::Online => f.write_str("online"),
            Availability::Offline => f.write_str("offline"),
        }
    }
}

impl FromStr for Availability {
    type Err = MgmtError;
    fn from_str(s: &str) -> Result<Self, MgmtError> {
        match s {
            "online" => Ok(Availability::Online),
            "offline" => Ok(Availability::Offline),
            _ => iv_err!("'{}' is not a valid forest availability status", s),
        }
    }
}

/// Authentication scheme of an application server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Authentication {
    #[default]
    Digest,
    Basic,
    ApplicationLevel,
}

impl fmt::Display for Authentication {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Authentication::Digest => f.write_str("digest"),
            Authentication::Basic => f.write_str("basic"),
            Authentication::ApplicationLevel => f.write_str("application-level"),
        }
    }
}

impl FromStr for Authentication {
    type Err = MgmtError;
    fn from_str(s: &str) -> Result<Self, MgmtError> {
        match s {
            "digest" => Ok(Authentication::Digest),
            "basic" => Ok(Authentication::Basic),
            "application-level" => Ok(Authentication::ApplicationLevel),
            _ => iv_err!("'{}' is not a valid authentication scheme", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MgmtErrorCode;

    #[test]
    fn scalar_type_round_trips_wire_tokens() {
        for token in [
            "int",
            "unsignedInt",
            "long",
            "unsignedLong",
            "float",
            "double",
            "decimal",
            "dateTime",
            "time",
            "date",
            "gYearMonth",
            "gYear",
            "gMonth",
            "gDay",
            "yearMonthDuration",
            "dayTimeDuration",
            "string",
            "anyURI",
        ] {
            let st: ScalarType = token.parse().unwrap();
            assert_eq!(st.to_string(), token);
            assert_eq!(serde_json::to_value(st).unwrap(), token);
        }
    }

    #[test]
    fn unknown_tokens_are_invalid_values() {
        let err = "bogus".parse::<ScalarType>().unwrap_err();
        assert_eq!(err.code, MgmtErrorCode::InvalidValue);
        let err = "sometimes".parse::<Availability>().unwrap_err();
        assert_eq!(err.code, MgmtErrorCode::InvalidValue);
        let err = "loose".parse::<Locking>().unwrap_err();
        assert_eq!(err.code, MgmtErrorCode::InvalidValue);
    }

    #[test]
    fn kebab_case_tokens_serialize() {
        assert_eq!(
            serde_json::to_value(DirectoryCreation::ManualEnforced).unwrap(),
            "manual-enforced"
        );
        assert_eq!(
            serde_json::to_value(TfNormalization::WeakestScaledLog).unwrap(),
            "weakest-scaled-log"
        );
        assert_eq!(serde_json::to_value(FormatCompatibility::V4_2).unwrap(), "4.2");
    }

    #[test]
    fn validate_range_bounds() {
        assert!(validate_range(1, 1, 5, "throttle").is_ok());
        assert!(validate_range(5, 1, 5, "throttle").is_ok());
        let err = validate_range(6, 1, 5, "throttle").unwrap_err();
        assert_eq!(err.code, MgmtErrorCode::InvalidValue);
        assert!(err.message.contains("throttle"));
    }
}
