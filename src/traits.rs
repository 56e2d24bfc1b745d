use crate::collection::Collection;
use crate::entity::{Bin, Item};
use crate::error::Result;
use crate::geometry::Dimensions;
use crate::heuristics::score::dimension_score;
use crate::placement::PlacementEngine;

/// An axis-aligned box with an identity that can sit in a [Collection].
pub trait Cuboid {
    fn id(&self) -> &str;

    fn dims(&self) -> Dimensions;

    /// Returns true once this entry has taken part in a placement.
    fn is_used(&self) -> bool;

    /// The size proxy used when choosing the largest or smallest entry.
    fn score(&self) -> i64 {
        dimension_score(self.dims())
    }
}

pub trait ChoiceAlgorithm {
    /// Chooses an entry from among the given `choices`, returning its index in `choices`.
    ///
    /// Returns `None` if `choices` is empty.
    fn choose<T: Cuboid>(&self, choices: &[&T]) -> Option<usize>;
}

/// What a packing algorithm produced besides the slots it committed to bins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackingOutcome {
    /// Bins and items carry the result; unplaced items are reported as lost.
    Distributed,
    /// The id of the smallest bin able to hold every item, if any.
    Smallest(Option<String>),
}

pub trait PackingAlgorithm {
    /// A short name used in logs and in the run report.
    fn name(&self) -> &'static str;

    /// Checks that the catalogs are acceptable for this algorithm.
    ///
    /// Called before any placement work; a failure leaves both collections untouched.
    fn validate(&self, bins: &Collection<Bin>, items: &Collection<Item>) -> Result<()>;

    /// Runs the algorithm to completion, committing slots into `bins`.
    fn pack(
        &self,
        engine: &PlacementEngine,
        bins: &mut Collection<Bin>,
        items: &mut Collection<Item>,
    ) -> PackingOutcome;
}
