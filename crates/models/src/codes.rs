use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};
use strum::{EnumIter, EnumProperty, EnumString};

/// Terms in which a course is offered.
/// Unrecognized codes are kept verbatim in [`Availability::Unknown`].
///
/// Build values from codes with `From<String>`, which never puts a known code
/// into `Unknown`. An `Unknown` holding a known code, e.g. `Unknown("W")`, is
/// invalid and reads back as the known variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, EnumProperty)]
#[serde(from = "String", into = "String")]
pub enum Availability {
    #[strum(serialize = "W", props(full = "winter"))]
    Winter,
    #[strum(serialize = "S", props(full = "summer"))]
    Summer,
    #[strum(serialize = "B", props(full = "both"))]
    Both,
    /// Any unrecognized code
    #[strum(default)]
    Unknown(String),
}

impl Availability {
    pub fn code(&self) -> &str {
        match self {
            Self::Winter => "W",
            Self::Summer => "S",
            Self::Both => "B",
            Self::Unknown(code) => code,
        }
    }

    pub fn as_full_str(&self) -> Option<&'static str> {
        self.get_str("full")
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    pub fn offered_in_winter(&self) -> bool {
        matches!(self, Self::Winter | Self::Both)
    }

    pub fn offered_in_summer(&self) -> bool {
        matches!(self, Self::Summer | Self::Both)
    }
}

impl From<String> for Availability {
    fn from(code: String) -> Self {
        match Self::from_str(&code) {
            Ok(availability) => availability,
            Err(_) => Self::Unknown(code),
        }
    }
}

impl From<Availability> for String {
    fn from(availability: Availability) -> Self {
        match availability {
            Availability::Unknown(code) => code,
            known => known.code().to_string(),
        }
    }
}

impl Display for Availability {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.code())
    }
}

/// How often a course is offered.
///
/// As with [`Availability`], `From<String>` is the way to build a value from
/// a code; `Unknown` is only meant to hold codes that are not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString)]
#[serde(from = "String", into = "String")]
pub enum Frequency {
    #[strum(serialize = "yearly")]
    Yearly,
    #[strum(serialize = "biyearly")]
    Biyearly,
    /// Any unrecognized code
    #[strum(default)]
    Unknown(String),
}

impl Frequency {
    pub fn code(&self) -> &str {
        match self {
            Self::Yearly => "yearly",
            Self::Biyearly => "biyearly",
            Self::Unknown(code) => code,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl From<String> for Frequency {
    fn from(code: String) -> Self {
        match Self::from_str(&code) {
            Ok(frequency) => frequency,
            Err(_) => Self::Unknown(code),
        }
    }
}

impl From<Frequency> for String {
    fn from(frequency: Frequency) -> Self {
        match frequency {
            Frequency::Unknown(code) => code,
            known => known.code().to_string(),
        }
    }
}

impl Display for Frequency {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.code())
    }
}

/// The two wordings in use for [`Required`] codes.
///
/// They do not line up term for term, so neither is treated as canonical.
/// Whoever loads curriculum data picks one and uses it consistently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum RequiredWording {
    /// not required / required in major / required in major & minor
    Major,
    /// Freifach / Wahlfach / Pflichtfach
    German,
}

impl RequiredWording {
    fn labels(self) -> [&'static str; 3] {
        match self {
            Self::Major => [
                "not required",
                "required in major",
                "required in major & minor",
            ],
            Self::German => ["Freifach", "Wahlfach", "Pflichtfach"],
        }
    }
}

/// Raw requirement code of a course, expected to be 0, 1 or 2
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Required(pub i64);

impl Required {
    pub const MIN: i64 = 0;
    pub const MAX: i64 = 2;

    pub fn code(self) -> i64 {
        self.0
    }

    pub fn is_known(self) -> bool {
        (Self::MIN..=Self::MAX).contains(&self.0)
    }

    /// Label for this code in the given wording, `None` for unknown codes
    pub fn label(self, wording: RequiredWording) -> Option<&'static str> {
        let index = usize::try_from(self.0).ok()?;
        wording.labels().get(index).copied()
    }
}

impl From<i64> for Required {
    fn from(code: i64) -> Self {
        Self(code)
    }
}

impl Display for Required {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_availability_from_code() {
        assert_eq!(Availability::from("W".to_string()), Availability::Winter);
        assert_eq!(Availability::from("S".to_string()), Availability::Summer);
        assert_eq!(Availability::from("B".to_string()), Availability::Both);
        assert_eq!(
            Availability::from("w".to_string()),
            Availability::Unknown("w".to_string())
        );
    }

    #[test]
    fn test_availability_terms() {
        assert!(Availability::Both.offered_in_winter());
        assert!(Availability::Both.offered_in_summer());
        assert!(!Availability::Winter.offered_in_summer());
        assert!(!Availability::Unknown("X".to_string()).offered_in_winter());
        assert_eq!(Availability::Summer.as_full_str(), Some("summer"));
        assert_eq!(Availability::Unknown("X".to_string()).as_full_str(), None);
    }

    #[test]
    fn test_unknown_codes_round_trip() {
        let availability: Availability = serde_json::from_str(r#""X""#).unwrap();
        assert!(!availability.is_known());
        assert_eq!(serde_json::to_string(&availability).unwrap(), r#""X""#);

        let frequency: Frequency = serde_json::from_str(r#""monthly""#).unwrap();
        assert_eq!(frequency, Frequency::Unknown("monthly".to_string()));
        assert_eq!(serde_json::to_string(&frequency).unwrap(), r#""monthly""#);
    }

    #[test]
    fn test_known_code_in_unknown_reads_back_as_known() {
        let misfiled = Availability::Unknown("W".to_string());
        assert!(!misfiled.is_known());

        let json = serde_json::to_string(&misfiled).unwrap();
        let decoded: Availability = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, Availability::Winter);
        assert_eq!(Availability::from(String::from(misfiled)), Availability::Winter);

        let misfiled = Frequency::Unknown("yearly".to_string());
        assert_eq!(Frequency::from(String::from(misfiled)), Frequency::Yearly);
    }

    #[test]
    fn test_frequency_display() {
        assert_eq!(Frequency::Yearly.to_string(), "yearly");
        assert_eq!(Frequency::from("biyearly".to_string()), Frequency::Biyearly);
    }

    #[test]
    fn test_required_labels() {
        assert_eq!(Required(0).label(RequiredWording::Major), Some("not required"));
        assert_eq!(Required(1).label(RequiredWording::German), Some("Wahlfach"));
        assert_eq!(
            Required(2).label(RequiredWording::Major),
            Some("required in major & minor")
        );

        for wording in RequiredWording::iter() {
            assert_eq!(Required(3).label(wording), None);
            assert_eq!(Required(-1).label(wording), None);
        }
    }

    #[test]
    fn test_required_is_plain_number_on_the_wire() {
        let required: Required = serde_json::from_str("2").unwrap();
        assert_eq!(required, Required(2));
        assert!(required.is_known());
        assert!(!Required(7).is_known());
        assert_eq!(serde_json::to_string(&Required(1)).unwrap(), "1");
    }
}
