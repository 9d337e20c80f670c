use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// A string did not name a known enum variant.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid {field}: {value}")]
pub struct InvalidEnum {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + FromStr, serialized through its
/// wire string so the JSON form matches what the backend sends.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidEnum;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(D::Error::custom)
            }
        }
    };
}

str_enum!(Role {
    Patient => "ROLE_PATIENT",
    Doctor => "ROLE_DOCTOR",
    Admin => "ROLE_ADMIN",
});

str_enum!(AppointmentStatus {
    Pending => "PENDING",
    Confirmed => "CONFIRMED",
    Completed => "COMPLETED",
    Cancelled => "CANCELLED",
});

str_enum!(MessageRole {
    User => "USER",
    Assistant => "ASSISTANT",
    System => "SYSTEM",
});

str_enum!(RiskLevel {
    Low => "LOW",
    Medium => "MEDIUM",
    High => "HIGH",
});

str_enum!(LabStatus {
    Normal => "NORMAL",
    High => "HIGH",
    Low => "LOW",
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn role_round_trip() {
        for (variant, s) in [
            (Role::Patient, "ROLE_PATIENT"),
            (Role::Doctor, "ROLE_DOCTOR"),
            (Role::Admin, "ROLE_ADMIN"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(Role::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn appointment_status_round_trip() {
        for (variant, s) in [
            (AppointmentStatus::Pending, "PENDING"),
            (AppointmentStatus::Confirmed, "CONFIRMED"),
            (AppointmentStatus::Completed, "COMPLETED"),
            (AppointmentStatus::Cancelled, "CANCELLED"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(AppointmentStatus::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn lab_status_round_trip() {
        for (variant, s) in [
            (LabStatus::Normal, "NORMAL"),
            (LabStatus::High, "HIGH"),
            (LabStatus::Low, "LOW"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(LabStatus::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn serde_uses_wire_strings() {
        let json = serde_json::to_string(&Role::Patient).unwrap();
        assert_eq!(json, "\"ROLE_PATIENT\"");
        let back: Role = serde_json::from_str("\"ROLE_DOCTOR\"").unwrap();
        assert_eq!(back, Role::Doctor);
    }

    #[test]
    fn invalid_enum_returns_error() {
        assert!(Role::from_str("ROLE_NURSE").is_err());
        assert!(AppointmentStatus::from_str("unknown").is_err());
        assert!(LabStatus::from_str("").is_err());
    }
}
