use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub full_name: String,
    pub ballot_name: Option<String>,
    pub party_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vote {
    pub id: String,
    pub preferences: String,
    pub created_at: DateTime<Utc>,
}

// A voter's ranked choices: rank ("1".."3") mapped to a candidate id. Kept
// ordered so the serialized form is canonical.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreferenceBallot(pub BTreeMap<String, String>);

impl Candidate {
    pub fn new(
        id: String,
        full_name: String,
        ballot_name: Option<String>,
        party_name: Option<String>,
    ) -> Self {
        Self {
            id,
            full_name,
            ballot_name,
            party_name,
            created_at: Utc::now(),
        }
    }

    // Name printed on the ballot, falling back to the legal name
    pub fn display_name(&self) -> &str {
        self.ballot_name.as_deref().unwrap_or(&self.full_name)
    }

    pub fn party(&self) -> &str {
        self.party_name.as_deref().unwrap_or("Independent")
    }
}

impl Vote {
    pub fn new(preferences: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            preferences,
            created_at: Utc::now(),
        }
    }
}

impl PreferenceBallot {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    // Candidate id this ballot assigns at the given rank, if any
    pub fn choice(&self, rank: u8) -> Option<&str> {
        self.0.get(rank.to_string().as_str()).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_falls_back_to_full_name() {
        let mut candidate = Candidate::new(
            "1".to_string(),
            "Kumara Welgama".to_string(),
            None,
            Some("SJB".to_string()),
        );
        assert_eq!(candidate.display_name(), "Kumara Welgama");

        candidate.ballot_name = Some("K. Welgama".to_string());
        assert_eq!(candidate.display_name(), "K. Welgama");
    }

    #[test]
    fn party_falls_back_to_independent() {
        let candidate = Candidate::new("1".to_string(), "Test".to_string(), None, None);
        assert_eq!(candidate.party(), "Independent");
    }

    #[test]
    fn ballot_choice_lookup() {
        let ballot: PreferenceBallot = serde_json::from_str(r#"{"1": "42", "3": "7"}"#).unwrap();
        assert_eq!(ballot.choice(1), Some("42"));
        assert_eq!(ballot.choice(2), None);
        assert_eq!(ballot.choice(3), Some("7"));
        assert!(!ballot.is_empty());
        assert!(PreferenceBallot::default().is_empty());
    }
}
