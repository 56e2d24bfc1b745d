use tracing::debug;

use crate::collection::Collection;
use crate::entity::{Bin, Item};
use crate::error::{PackError, Result};
use crate::heuristics::score::BinScore;
use crate::placement::PlacementEngine;
use crate::{Cuboid, PackingAlgorithm, PackingOutcome};

use super::fill_in_order;

/// Tries the whole item catalog against every bin independently and picks the
/// smallest bin that took every item.
pub struct SmallestFitPackingAlgorithm {
    pub bin_score: BinScore,
}

impl PackingAlgorithm for SmallestFitPackingAlgorithm {
    fn name(&self) -> &'static str {
        "smallest"
    }

    fn validate(&self, bins: &Collection<Bin>, items: &Collection<Item>) -> Result<()> {
        if bins.is_empty() || items.is_empty() {
            return Err(PackError::Configuration(
                "smallest packing needs at least one bin and one item".to_string(),
            ));
        }
        Ok(())
    }

    fn pack(
        &self,
        engine: &PlacementEngine,
        bins: &mut Collection<Bin>,
        items: &mut Collection<Item>,
    ) -> PackingOutcome {
        bins.reset();
        while let Some(bin) = bins.next() {
            fill_in_order(engine, bin, items);
        }

        let total = items.len();
        let smallest = bins
            .iter()
            .filter(|b| b.slots().len() == total)
            .min_by_key(|b| self.bin_score.score(b.dims()))
            .map(|b| b.id().to_string());
        debug!(?smallest, "smallest bin chosen");

        PackingOutcome::Smallest(smallest)
    }
}
