pub mod preference;

use serde::Serialize;

// Per-candidate occurrence counts for each rank slot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RankCounts {
    #[serde(rename = "1")]
    pub first: u32,
    #[serde(rename = "2")]
    pub second: u32,
    #[serde(rename = "3")]
    pub third: u32,
}

// One row of the results page
#[derive(Debug, Clone, Serialize)]
pub struct CandidateResult {
    pub name: String,
    pub party: String,
    pub color: String,
    pub counts: RankCounts,
    pub total_first: u32,
}
