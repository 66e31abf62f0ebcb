//! Vote aggregation
//!
//! Plurality vote over the four seasons. Ties go to the season that comes
//! first in canonical order, which also makes an empty ballot resolve to
//! spring.

use crate::season::Season;

/// Per-season vote counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VoteTally {
    counts: [usize; 4],
}

impl VoteTally {
    /// Count a sequence of votes (repeats allowed)
    pub fn from_votes<I>(votes: I) -> Self
    where
        I: IntoIterator<Item = Season>,
    {
        let mut tally = Self::default();
        for season in votes {
            tally.counts[season.index()] += 1;
        }
        tally
    }

    pub fn count(&self, season: Season) -> usize {
        self.counts[season.index()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// No season received a vote
    pub fn is_degenerate(&self) -> bool {
        self.total() == 0
    }

    /// Season with the strictly greatest count, earliest canonical season on ties
    pub fn winner(&self) -> Season {
        let mut best = Season::Spring;
        for season in Season::ALL {
            if self.count(season) > self.count(best) {
                best = season;
            }
        }
        best
    }
}

/// Classify a vote sequence
pub fn classify<I>(votes: I) -> Season
where
    I: IntoIterator<Item = Season>,
{
    VoteTally::from_votes(votes).winner()
}

#[cfg(test)]
mod tests {
    use super::*;
    use Season::*;

    #[test]
    fn test_plurality_wins() {
        assert_eq!(classify([Spring, Spring, Summer, Autumn]), Spring);
        assert_eq!(classify([Winter, Autumn, Winter]), Winter);
    }

    #[test]
    fn test_tie_breaks_by_canonical_order() {
        assert_eq!(classify([Spring, Summer]), Spring);
        assert_eq!(classify([Winter, Summer]), Summer);
        assert_eq!(classify([Winter, Autumn, Autumn, Winter]), Autumn);
    }

    #[test]
    fn test_empty_ballot_defaults_to_spring() {
        let tally = VoteTally::from_votes(std::iter::empty());
        assert!(tally.is_degenerate());
        assert_eq!(tally.winner(), Spring);
    }

    #[test]
    fn test_input_order_does_not_matter() {
        assert_eq!(classify([Autumn, Winter, Winter]), classify([Winter, Winter, Autumn]));
    }

    #[test]
    fn test_winner_is_always_a_season_for_all_small_ballots() {
        // Every ballot of up to three votes
        let mut ballots: Vec<Vec<Season>> = vec![vec![]];
        for _ in 0..3 {
            let mut next = Vec::new();
            for ballot in &ballots {
                for season in Season::ALL {
                    let mut extended = ballot.clone();
                    extended.push(season);
                    next.push(extended);
                }
            }
            ballots.extend(next);
        }

        for ballot in ballots {
            let tally = VoteTally::from_votes(ballot.iter().copied());
            let winner = tally.winner();
            assert!(Season::ALL.contains(&winner));
            let max = Season::ALL.iter().map(|s| tally.count(*s)).max().unwrap();
            assert_eq!(tally.count(winner), max);
            // No earlier season shares the maximum
            for earlier in Season::ALL.iter().take(winner.index()) {
                assert!(tally.count(*earlier) < max);
            }
        }
    }
}
