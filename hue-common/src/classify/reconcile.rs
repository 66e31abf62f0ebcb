//! Natural hair color reconciliation
//!
//! When the user dyes their hair, the current hair color vote is swapped for
//! the natural one and the ballot is classified again. A different result is
//! reported as a recommendation; the primary season never changes.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::aggregator::VoteTally;
use super::encoder::{EncodedAnswers, TraitId};
use crate::season::Season;

/// Suggestion produced when natural coloring points to another season
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub natural_season: Season,
    pub message: String,
}

impl Recommendation {
    pub fn for_season(natural_season: Season) -> Self {
        Self {
            natural_season,
            message: format!(
                "Your natural hair color suggests you might be a {season} type. \
                 Consider transitioning to a hair color closer to your natural shade \
                 or with {season} undertones for a more harmonious look.",
                season = natural_season
            ),
        }
    }
}

/// Season the ballot would produce with natural hair color
///
/// `None` unless the user reported dyed hair and gave a natural color. A
/// ballot without a current hair color vote is classified unchanged.
pub fn natural_season(encoded: &EncodedAnswers) -> Option<Season> {
    if encoded.natural_hair != Some(false) {
        return None;
    }
    let natural = encoded.natural_hair_color?;

    let mut counterfactual = encoded.ballot.clone();
    match counterfactual.get_mut(&TraitId::CurrentHairColor) {
        Some(vote) => *vote = natural,
        None => debug!("No current hair color vote to substitute"),
    }

    Some(VoteTally::from_votes(counterfactual.values().copied()).winner())
}

/// Recommendation when the natural-color season differs from `primary`
pub fn reconcile(encoded: &EncodedAnswers, primary: Season) -> Option<Recommendation> {
    let natural = natural_season(encoded)?;
    if natural == primary {
        return None;
    }
    debug!(%primary, %natural, "Natural coloring points to a different season");
    Some(Recommendation::for_season(natural))
}
