// Copyright 2025 Cowboy AI, LLC.

//! Reference-data code tables
//!
//! Code tables are consumed as immutable enumerations resolved by code string.
//! Free-form codes owned by other systems (legal basis, benefit domain) are
//! kept opaque.

use crate::errors::{DomainError, DomainResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A closed code table resolved by code string
pub trait ReferenceCode: Sized + Copy + 'static {
    /// Name of the code table, used in error messages
    const KIND: &'static str;

    /// Every member of the table
    fn all() -> &'static [Self];

    /// The stable code string of this member
    fn code(&self) -> &'static str;

    /// Resolve a member by its code string
    fn from_code(code: &str) -> DomainResult<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|member| member.code() == code)
            .ok_or_else(|| DomainError::UnknownCode {
                kind: Self::KIND,
                code: code.to_string(),
            })
    }
}

/// Serialize a [`ReferenceCode`] table as its code string
///
/// Deserialization resolves through [`ReferenceCode::from_code`], so an
/// unknown code is rejected with the [`DomainError::UnknownCode`] message.
macro_rules! code_serde {
    ($ty:ty) => {
        impl ::serde::Serialize for $ty {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str($crate::codes::ReferenceCode::code(self))
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $ty {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let code = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                <$ty as $crate::codes::ReferenceCode>::from_code(&code)
                    .map_err(::serde::de::Error::custom)
            }
        }

        impl ::schemars::JsonSchema for $ty {
            fn schema_name() -> String {
                stringify!($ty).to_string()
            }

            fn json_schema(_: &mut ::schemars::gen::SchemaGenerator) -> ::schemars::schema::Schema {
                let codes = <$ty as $crate::codes::ReferenceCode>::all()
                    .iter()
                    .map(|member| {
                        ::serde_json::Value::from($crate::codes::ReferenceCode::code(member))
                    })
                    .collect();
                ::schemars::schema::SchemaObject {
                    instance_type: Some(::schemars::schema::InstanceType::String.into()),
                    enum_values: Some(codes),
                    ..Default::default()
                }
                .into()
            }
        }
    };
}

pub(crate) use code_serde;

/// Coded result of a case or partial treatment ("utfall")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Outcome {
    /// Appeal withdrawn by the appellant
    Withdrawn,
    /// Returned to first instance
    Returned,
    /// Decision reversed by the external court
    CourtReversed,
    /// Upheld in the appellant's favour
    UpheldInFavor,
    /// Partially granted
    PartiallyGranted,
    /// Earlier decision affirmed
    Affirmed,
    /// Upheld against the appellant's favour
    UpheldAgainstFavor,
    /// Appeal rejected
    Rejected,
    /// Recommendation to the external court: affirm
    ProposedAffirmed,
    /// Recommendation to the external court: reject
    ProposedRejected,
    /// Case dismissed
    Dismissed,
    /// Referred back ("henvist")
    ReferredBack,
}

impl ReferenceCode for Outcome {
    const KIND: &'static str = "outcome";

    fn all() -> &'static [Self] {
        use Outcome::*;
        &[
            Withdrawn,
            Returned,
            CourtReversed,
            UpheldInFavor,
            PartiallyGranted,
            Affirmed,
            UpheldAgainstFavor,
            Rejected,
            ProposedAffirmed,
            ProposedRejected,
            Dismissed,
            ReferredBack,
        ]
    }

    fn code(&self) -> &'static str {
        match self {
            Outcome::Withdrawn => "1",
            Outcome::Returned => "2",
            Outcome::CourtReversed => "3",
            Outcome::UpheldInFavor => "4",
            Outcome::PartiallyGranted => "5",
            Outcome::Affirmed => "6",
            Outcome::UpheldAgainstFavor => "7",
            Outcome::Rejected => "8",
            Outcome::ProposedAffirmed => "9",
            Outcome::ProposedRejected => "10",
            Outcome::Dismissed => "11",
            Outcome::ReferredBack => "12",
        }
    }
}

code_serde!(Outcome);

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Kind of party identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartyIdType {
    /// National identity number
    Person,
    /// Organisation number
    Organisation,
}

impl ReferenceCode for PartyIdType {
    const KIND: &'static str = "party id type";

    fn all() -> &'static [Self] {
        &[PartyIdType::Person, PartyIdType::Organisation]
    }

    fn code(&self) -> &'static str {
        match self {
            PartyIdType::Person => "PERSON",
            PartyIdType::Organisation => "VIRKSOMHET",
        }
    }
}

code_serde!(PartyIdType);

/// Unit of a processing-time duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    /// Weeks
    Weeks,
    /// Months
    Months,
}

impl ReferenceCode for TimeUnit {
    const KIND: &'static str = "time unit";

    fn all() -> &'static [Self] {
        &[TimeUnit::Weeks, TimeUnit::Months]
    }

    fn code(&self) -> &'static str {
        match self {
            TimeUnit::Weeks => "1",
            TimeUnit::Months => "2",
        }
    }
}

code_serde!(TimeUnit);

/// Why an assignment was withdrawn ("fradeling")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnassignmentReason {
    /// Case was registered under the wrong legal basis
    WrongLegalBasis,
    /// Assignee lacks the required competence
    LacksCompetence,
    /// Assignee is disqualified
    ConflictOfInterest,
    /// Assignee is absent for an extended period
    ExtendedAbsence,
    /// Reassigned by a team leader
    LeaderReassigned,
    /// Moved directly to another assignee
    Reassigned,
    /// Anything else
    Other,
}

impl ReferenceCode for UnassignmentReason {
    const KIND: &'static str = "unassignment reason";

    fn all() -> &'static [Self] {
        use UnassignmentReason::*;
        &[
            WrongLegalBasis,
            LacksCompetence,
            ConflictOfInterest,
            ExtendedAbsence,
            LeaderReassigned,
            Reassigned,
            Other,
        ]
    }

    fn code(&self) -> &'static str {
        match self {
            UnassignmentReason::WrongLegalBasis => "1",
            UnassignmentReason::LacksCompetence => "2",
            UnassignmentReason::ConflictOfInterest => "3",
            UnassignmentReason::ExtendedAbsence => "4",
            UnassignmentReason::LeaderReassigned => "5",
            UnassignmentReason::Reassigned => "6",
            UnassignmentReason::Other => "7",
        }
    }
}

code_serde!(UnassignmentReason);

/// Opaque legal-basis code ("hjemmel")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "String")]
pub struct LegalBasis(String);

impl LegalBasis {
    /// Wrap a legal-basis code, rejecting blank input
    pub fn new(code: impl Into<String>) -> DomainResult<Self> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err(DomainError::invalid("legal basis code must not be blank"));
        }
        Ok(Self(code))
    }

    /// The code string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for LegalBasis {
    type Error = DomainError;

    fn try_from(code: String) -> DomainResult<Self> {
        Self::new(code)
    }
}

/// Opaque benefit-domain code ("ytelse")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "String")]
pub struct BenefitDomain(String);

impl BenefitDomain {
    /// Wrap a benefit-domain code, rejecting blank input
    pub fn new(code: impl Into<String>) -> DomainResult<Self> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err(DomainError::invalid("benefit domain code must not be blank"));
        }
        Ok(Self(code))
    }

    /// The code string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BenefitDomain {
    type Error = DomainError;

    fn try_from(code: String) -> DomainResult<Self> {
        Self::new(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_outcome_resolves_from_its_own_code() {
        for outcome in Outcome::all() {
            assert_eq!(Outcome::from_code(outcome.code()).unwrap(), *outcome);
        }
    }

    #[test]
    fn test_unknown_code_is_surfaced() {
        let err = Outcome::from_code("42").unwrap_err();
        assert_eq!(
            err,
            DomainError::UnknownCode {
                kind: "outcome",
                code: "42".to_string()
            }
        );
        assert!(TimeUnit::from_code("DAYS").is_err());
    }

    #[test]
    fn test_serde_goes_through_codes() {
        let outcomes: Vec<Outcome> = serde_json::from_str(r#"["1", "11"]"#).unwrap();
        assert_eq!(outcomes, vec![Outcome::Withdrawn, Outcome::Dismissed]);
        assert_eq!(serde_json::to_string(&Outcome::ReferredBack).unwrap(), r#""12""#);
        assert_eq!(
            serde_json::to_string(&PartyIdType::Organisation).unwrap(),
            r#""VIRKSOMHET""#
        );

        for reason in UnassignmentReason::all() {
            let json = serde_json::to_value(reason).unwrap();
            assert_eq!(serde_json::from_value::<UnassignmentReason>(json).unwrap(), *reason);
        }
    }

    #[test]
    fn test_unknown_code_fails_deserialization() {
        let err = serde_json::from_str::<Outcome>(r#""Withdrawn""#).unwrap_err();
        assert!(err.to_string().contains("Unknown outcome code"), "{err}");
        assert!(serde_json::from_str::<TimeUnit>(r#""3""#).is_err());
    }

    #[test]
    fn test_blank_opaque_codes_fail_deserialization() {
        assert!(serde_json::from_str::<LegalBasis>(r#"" ""#).is_err());
        assert!(serde_json::from_str::<BenefitDomain>(r#""""#).is_err());
        let basis: LegalBasis = serde_json::from_str(r#""FTRL_21_12""#).unwrap();
        assert_eq!(basis.as_str(), "FTRL_21_12");
    }

    #[test]
    fn test_codes_are_unique_per_table() {
        let mut codes: Vec<_> = UnassignmentReason::all().iter().map(|r| r.code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), UnassignmentReason::all().len());
    }
}
