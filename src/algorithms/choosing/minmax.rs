use std::cmp::Ordering;

use crate::{ChoiceAlgorithm, Cuboid};

pub type MinChoiceAlgorithm = MinMaxChoiceAlgorithm<true>;
pub type MaxChoiceAlgorithm = MinMaxChoiceAlgorithm<false>;

/// Picks the entry with the smallest or largest [`Cuboid::score`].
///
/// Ties go to the entry that comes first in `choices`.
#[doc(hidden)]
#[derive(Debug, Clone, Copy, Default)]
pub struct MinMaxChoiceAlgorithm<const CHOOSE_MIN: bool>;

impl<const CHOOSE_MIN: bool> ChoiceAlgorithm for MinMaxChoiceAlgorithm<CHOOSE_MIN> {
    fn choose<T: Cuboid>(&self, choices: &[&T]) -> Option<usize> {
        choices
            .iter()
            .enumerate()
            .reduce(|best, candidate| {
                let ordering = candidate.1.score().cmp(&best.1.score());
                let better = if CHOOSE_MIN {
                    ordering == Ordering::Less
                } else {
                    ordering == Ordering::Greater
                };
                if better {
                    candidate
                } else {
                    best
                }
            })
            .map(|(i, _)| i)
    }
}
