use tracing::debug;

use crate::collection::Collection;
use crate::entity::{Bin, Item};
use crate::heuristics::score::BinScore;
use crate::placement::PlacementEngine;
use crate::{Cuboid, PackingAlgorithm};

pub mod multi;
pub mod single;
pub mod smallest;

pub use multi::MultiFifoPackingAlgorithm;
pub use single::SinglePackingAlgorithm;
pub use smallest::SmallestFitPackingAlgorithm;

/// Selects one of the packing algorithms by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Strategy {
    /// Fill exactly one bin.
    Single,
    /// Fill bins one after another, largest items first.
    Multi,
    /// Find the smallest bin that holds every item.
    Smallest,
}

impl Strategy {
    /// Builds the algorithm for this strategy.
    ///
    /// `prefer_smallest_bins` only affects [`Strategy::Multi`]; `bin_score` only
    /// affects [`Strategy::Smallest`].
    pub fn algorithm(
        self,
        prefer_smallest_bins: bool,
        bin_score: BinScore,
    ) -> Box<dyn PackingAlgorithm> {
        match self {
            Strategy::Single => Box::new(SinglePackingAlgorithm),
            Strategy::Multi => Box::new(MultiFifoPackingAlgorithm {
                prefer_smallest_bins,
            }),
            Strategy::Smallest => Box::new(SmallestFitPackingAlgorithm { bin_score }),
        }
    }
}

/// Offers every item, in insertion order, to `bin`. Returns how many were placed.
///
/// Items already used elsewhere are offered again.
fn fill_in_order(engine: &PlacementEngine, bin: &mut Bin, items: &mut Collection<Item>) -> usize {
    bin.begin();
    items.reset();

    let mut placed = 0;
    while let Some(item) = items.next() {
        if engine.place(bin, item).is_ok() {
            placed += 1;
        }
    }

    bin.finish();
    debug!(bin = bin.id(), placed, "bin filled");
    placed
}
