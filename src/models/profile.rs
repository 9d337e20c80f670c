use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Patient-maintained health profile. Everything is optional: the form
/// starts empty and fills in over time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthProfile {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub blood_type: Option<String>,
    #[serde(default)]
    pub allergies: Option<String>,
    #[serde(default)]
    pub chronic_conditions: Option<String>,
    #[serde(default)]
    pub current_medications: Option<String>,
    #[serde(default)]
    pub emergency_contact: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_valid_profile() {
        let profile: HealthProfile = serde_json::from_str("{}").unwrap();
        assert!(profile.age.is_none());
        assert!(profile.blood_type.is_none());
    }
}
