//! Selection and ordering

use crate::config::RankerConfig;
use crate::error::RankerError;
use docket_domain::{Candidate, Polarity};
use std::cmp::Ordering;
use tracing::{debug, info, warn};

/// A candidate selected into the report, with its 1-based rank
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCandidate {
    /// Position in the report, starting at 1
    pub rank: usize,
    /// The selected candidate
    pub candidate: Candidate,
}

/// Report order: confidence descending, then earlier page/line, then lower segment id
pub fn compare_candidates(a: &Candidate, b: &Candidate) -> Ordering {
    b.confidence
        .total_cmp(&a.confidence)
        .then_with(|| (a.page, a.lines.start).cmp(&(b.page, b.lines.start)))
        .then_with(|| a.segment.cmp(&b.segment))
}

/// Ranks candidates into a balanced top-N
#[derive(Debug, Clone)]
pub struct Ranker {
    config: RankerConfig,
}

impl Ranker {
    /// Create a ranker with the given configuration
    pub fn new(config: RankerConfig) -> Result<Self, RankerError> {
        config.validate().map_err(RankerError::Config)?;
        Ok(Self { config })
    }

    /// Active configuration
    pub fn config(&self) -> &RankerConfig {
        &self.config
    }

    /// Select and order the report items
    ///
    /// Neutral candidates are ignored. Fails when fewer than `min_candidates`
    /// arguing candidates exist, or, with `strict_balance`, when either side
    /// cannot fill its minimum.
    pub fn rank(&self, candidates: &[Candidate]) -> Result<Vec<RankedCandidate>, RankerError> {
        let mut ordered: Vec<&Candidate> = candidates
            .iter()
            .filter(|c| c.polarity.is_argument())
            .collect();

        if ordered.len() < self.config.min_candidates {
            return Err(RankerError::InsufficientCandidates {
                found: ordered.len(),
                required: self.config.min_candidates,
            });
        }

        ordered.sort_by(|a, b| compare_candidates(a, b));

        for polarity in [Polarity::For, Polarity::Against] {
            let found = ordered.iter().filter(|c| c.polarity == polarity).count();
            if found < self.config.min_per_polarity {
                if self.config.strict_balance {
                    return Err(RankerError::Unbalanced {
                        polarity,
                        found,
                        required: self.config.min_per_polarity,
                    });
                }
                warn!(
                    "Only {} '{}' candidates, below the minimum of {}",
                    found, polarity, self.config.min_per_polarity
                );
            }
        }

        let picked = self.select(&ordered);
        let ranked: Vec<RankedCandidate> = ordered
            .iter()
            .zip(&picked)
            .filter(|(_, &keep)| keep)
            .enumerate()
            .map(|(idx, (candidate, _))| RankedCandidate {
                rank: idx + 1,
                candidate: (*candidate).clone(),
            })
            .collect();

        info!(
            "Ranked {} of {} candidates ({} for, {} against)",
            ranked.len(),
            ordered.len(),
            ranked.iter().filter(|r| r.candidate.polarity == Polarity::For).count(),
            ranked.iter().filter(|r| r.candidate.polarity == Polarity::Against).count()
        );
        Ok(ranked)
    }

    /// Mark which of the ordered candidates make the cut
    fn select(&self, ordered: &[&Candidate]) -> Vec<bool> {
        let mut picked = vec![false; ordered.len()];
        let mut total = 0;
        let per_side = |polarity: Polarity, picked: &[bool]| {
            ordered
                .iter()
                .zip(picked)
                .filter(|(c, &p)| p && c.polarity == polarity)
                .count()
        };

        // Reserve the best of each side first
        for polarity in [Polarity::For, Polarity::Against] {
            let reserved: Vec<usize> = ordered
                .iter()
                .enumerate()
                .filter(|(_, c)| c.polarity == polarity)
                .map(|(idx, _)| idx)
                .take(self.config.min_per_polarity)
                .collect();
            for idx in reserved {
                picked[idx] = true;
                total += 1;
            }
        }

        // Fill the remaining slots in report order
        for idx in 0..ordered.len() {
            if total >= self.config.top_n {
                break;
            }
            if picked[idx] {
                continue;
            }
            let polarity = ordered[idx].polarity;
            if per_side(polarity, &picked) >= self.config.max_per_polarity {
                debug!(
                    "Skipping {} ({:.3}): '{}' side is full",
                    ordered[idx].segment, ordered[idx].confidence, polarity
                );
                continue;
            }
            picked[idx] = true;
            total += 1;
        }

        picked
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use docket_domain::{LineRange, SegmentId};
    use proptest::prelude::*;

    fn arb_candidates() -> impl Strategy<Value = Vec<Candidate>> {
        prop::collection::vec((any::<bool>(), 0.0f64..=1.0, 1u32..5, 1u32..40), 0..30).prop_map(
            |specs| {
                specs
                    .into_iter()
                    .enumerate()
                    .map(|(idx, (is_for, confidence, page, line))| Candidate {
                        segment: SegmentId::new(idx as u32),
                        page,
                        lines: LineRange::single(line),
                        claim: format!("claim {}", idx),
                        polarity: if is_for { Polarity::For } else { Polarity::Against },
                        confidence,
                    })
                    .collect()
            },
        )
    }

    proptest! {
        /// Property: reports never exceed top_n and stay balanced when both sides can be
        #[test]
        fn test_length_and_balance(candidates in arb_candidates()) {
            let ranker = Ranker::new(RankerConfig::default()).unwrap();
            let Ok(ranked) = ranker.rank(&candidates) else {
                prop_assert!(candidates.len() < 4);
                return Ok(());
            };

            prop_assert!(ranked.len() <= 10);

            let fors = candidates.iter().filter(|c| c.polarity == Polarity::For).count();
            let againsts = candidates.len() - fors;
            let ranked_for = ranked.iter().filter(|r| r.candidate.polarity == Polarity::For).count();
            let ranked_against = ranked.len() - ranked_for;

            prop_assert!(ranked_for <= 7 && ranked_against <= 7);
            if fors >= 3 && againsts >= 3 {
                prop_assert!(ranked_for >= 3, "only {} for", ranked_for);
                prop_assert!(ranked_against >= 3, "only {} against", ranked_against);
            }
        }

        /// Property: the same candidates in any order give the same report
        #[test]
        fn test_deterministic(candidates in arb_candidates(), seed in any::<u64>()) {
            let ranker = Ranker::new(RankerConfig::default()).unwrap();
            let mut shuffled = candidates.clone();
            if !shuffled.is_empty() {
                let len = shuffled.len();
                shuffled.rotate_left((seed as usize) % len);
            }
            prop_assert_eq!(ranker.rank(&candidates), ranker.rank(&shuffled));
        }
    }
}
