use serde::{Deserialize, Serialize};

/// Directory entry for the "nearby care" flow. Coordinates feed the
/// backend's distance ranking; the client only renders them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: i64,
    pub name: String,
    pub specialization: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}
