//! Score Engine - weighted pass ratios for elements, zones and inspections.
//!
//! All arithmetic is integer and truncating: the weather bonus is
//! `sum_pass * 11 / 10` and ratios are `sum_pass * 100 / sum_judged`. The bonus
//! is deliberately not capped, so a fully passing element under bonus reports
//! 110. Stored and reported scores already rely on that value.

use crate::domain::foundation::Score;
use crate::domain::inspection::{Criterion, Element, Judgment};

/// Weight of a criterion built from its catalog coefficients.
pub fn criterion_weight(element_coef: u32, criterion_coef: u32) -> u32 {
    element_coef.saturating_mul(criterion_coef)
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Tally {
    sum_pass: u64,
    sum_judged: u64,
    judged: usize,
}

impl Tally {
    fn of<'a>(criteria: impl IntoIterator<Item = &'a Criterion>) -> Self {
        criteria.into_iter().fold(Tally::default(), |mut t, c| {
            match c.judgment {
                Judgment::Pass => {
                    t.sum_pass += u64::from(c.weight);
                    t.sum_judged += u64::from(c.weight);
                    t.judged += 1;
                }
                Judgment::Fail => {
                    t.sum_judged += u64::from(c.weight);
                    t.judged += 1;
                }
                Judgment::Unset => {}
            }
            t
        })
    }

    fn ratio(self, weather_bonus: bool) -> Score {
        if self.judged == 0 {
            return Score::NOT_EVALUATED;
        }

        let mut sum_pass = self.sum_pass;
        if weather_bonus && sum_pass > 0 {
            sum_pass = sum_pass * 11 / 10;
        }

        if self.sum_judged == 0 {
            return Score::ZERO;
        }

        let pct = sum_pass * 100 / self.sum_judged;
        Score::new(i32::try_from(pct).unwrap_or(i32::MAX))
    }
}

/// Pure scoring functions. Never fails, never performs I/O.
pub struct ScoreEngine;

impl ScoreEngine {
    /// Score of one element.
    ///
    /// # Edge Cases
    /// - No judged criterion: `-1`
    /// - Judged criteria all weightless: `0`
    /// - Weather bonus: may exceed 100
    pub fn element_score(element: &Element, weather_bonus: bool) -> Score {
        Tally::of(element.criteria.values()).ratio(weather_bonus)
    }

    /// Score of a zone: the same weighted ratio pooled across every criterion
    /// of every element. No bonus is applied at zone level.
    pub fn zone_score(elements: &[Element]) -> Score {
        Tally::of(elements.iter().flat_map(|e| e.criteria.values())).ratio(false)
    }

    /// Overall score: plain truncated mean of the given zone scores.
    ///
    /// Zone catalog coefficients are intentionally ignored. An empty slice
    /// yields `-1`.
    pub fn global_score(zone_scores: &[Score]) -> Score {
        if zone_scores.is_empty() {
            return Score::NOT_EVALUATED;
        }
        let total: i64 = zone_scores.iter().map(|s| i64::from(s.value())).sum();
        let mean = total / zone_scores.len() as i64;
        Score::new(i32::try_from(mean).unwrap_or(i32::MAX))
    }
}
