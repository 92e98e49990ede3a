use serde::Serialize;

use crate::models::Candidate;

// Candidate decorated for display. Built alongside the entity rather than
// mutating it; nothing here is persisted.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateView {
    pub id: String,
    pub full_name: String,
    pub name: String,
    pub party: String,
    pub color: String,
    pub party_symbol_url: Option<String>,
    pub short_name: String,
}

impl CandidateView {
    pub fn new(candidate: &Candidate, media_url: &str) -> Self {
        let party_name = candidate.party_name.as_deref();
        Self {
            id: candidate.id.clone(),
            full_name: candidate.full_name.clone(),
            name: candidate.display_name().to_string(),
            party: candidate.party().to_string(),
            color: party_color(party_name).to_string(),
            party_symbol_url: party_symbol(party_name)
                .map(|filename| format!("{}party_symbols/{}", media_url, filename)),
            short_name: short_name(&candidate.full_name),
        }
    }
}

// Decorate candidates for the ballot page, preserving store order
pub fn decorate(candidates: &[Candidate], media_url: &str) -> Vec<CandidateView> {
    candidates
        .iter()
        .map(|candidate| CandidateView::new(candidate, media_url))
        .collect()
}

pub fn party_color(party_name: Option<&str>) -> &'static str {
    match party_name {
        Some("SJB") | Some("UNP") => "#008000", // Green
        Some("SLPP") => "#800000",              // Maroon
        Some("NPP") => "#cc0000",               // Red
        Some("SLFP") => "#0000FF",              // Blue
        Some("Independent") => "#808080",       // Grey
        _ => "#666666",
    }
}

// Map party names to their symbol image filenames; parties without a mapped
// symbol get none at all, not an empty path
pub fn party_symbol(party_name: Option<&str>) -> Option<&'static str> {
    match party_name? {
        "SJB" => Some("SJB.png"),
        "SLPP" => Some("SLPP.png"),
        "NPP" => Some("NPP.png"),
        "SLFP" => Some("SLFP.png"),
        "UNP" => Some("Democratic United National Front.png"),
        "MJP" => Some("MJP.png"),
        _ => None,
    }
}

// First and last whitespace-separated tokens of the full name; single-token
// names pass through unchanged
pub fn short_name(full_name: &str) -> String {
    let parts: Vec<&str> = full_name.split_whitespace().collect();
    if parts.len() >= 2 {
        format!("{} {}", parts[0], parts[parts.len() - 1])
    } else {
        full_name.to_string()
    }
}
