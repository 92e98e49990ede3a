use crate::ballot::party_color;
use crate::crypto::BallotCipher;
use crate::models::{Candidate, PreferenceBallot, Vote};
use crate::voting::{CandidateResult, RankCounts};
use log::warn;

// Decrypt every stored vote into a preference ballot. A vote that fails to
// decrypt or whose plaintext is not a valid preference mapping contributes
// nothing anywhere; one bad record must never block the results page.
pub fn decrypt_ballots(cipher: &BallotCipher, votes: &[Vote]) -> Vec<PreferenceBallot> {
    let mut ballots = Vec::with_capacity(votes.len());

    for vote in votes {
        let plaintext = match cipher.decrypt(&vote.preferences) {
            Ok(plaintext) => plaintext,
            Err(e) => {
                warn!("Error decrypting vote {}: {}", vote.id, e);
                continue;
            }
        };

        match serde_json::from_str::<PreferenceBallot>(&plaintext) {
            Ok(ballot) => ballots.push(ballot),
            Err(e) => warn!("Error parsing vote {}: {}", vote.id, e),
        }
    }

    ballots
}

pub fn calculate_results(
    candidates: &[Candidate],
    ballots: &[PreferenceBallot],
) -> Vec<CandidateResult> {
    let mut results: Vec<(String, CandidateResult)> = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let candidate_id = candidate.id.as_str();
        let mut counts = RankCounts::default();

        // Each rank slot is checked independently, so one ballot can count
        // toward several candidates at different ranks
        for ballot in ballots {
            if ballot.choice(1) == Some(candidate_id) {
                counts.first += 1;
            }
            if ballot.choice(2) == Some(candidate_id) {
                counts.second += 1;
            }
            if ballot.choice(3) == Some(candidate_id) {
                counts.third += 1;
            }
        }

        results.push((
            candidate.id.clone(),
            CandidateResult {
                name: candidate.display_name().to_string(),
                party: candidate.party().to_string(),
                color: party_color(candidate.party_name.as_deref()).to_string(),
                counts,
                total_first: counts.first,
            },
        ));
    }

    // Sort by 1st preference count descending; candidate id breaks ties
    results.sort_by(|a, b| {
        b.1.total_first
            .cmp(&a.1.total_first)
            .then_with(|| a.0.cmp(&b.0))
    });

    results.into_iter().map(|(_, result)| result).collect()
}
