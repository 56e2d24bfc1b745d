use tracing::debug;

use crate::collection::Collection;
use crate::entity::{Bin, Item};
use crate::error::{PackError, Result};
use crate::placement::PlacementEngine;
use crate::{Cuboid, PackingAlgorithm, PackingOutcome};

/// Fills bins one at a time in collection order, offering the largest unplaced
/// items first. A bin is never revisited once the next one has been started.
pub struct MultiFifoPackingAlgorithm {
    /// Take the smallest unused bin next instead of the next one in order.
    pub prefer_smallest_bins: bool,
}

impl PackingAlgorithm for MultiFifoPackingAlgorithm {
    fn name(&self) -> &'static str {
        "multi"
    }

    fn validate(&self, bins: &Collection<Bin>, items: &Collection<Item>) -> Result<()> {
        if items.len() < bins.len() {
            return Err(PackError::Configuration(
                "bins should be less than items".to_string(),
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
        loop {
            let next = if self.prefer_smallest_bins {
                bins.next_smallest()
            } else {
                bins.next()
            };
            let Some(bin) = next else { break };

            bin.begin();
            items.reset();
            let mut placed = 0;
            while let Some(item) = items.next_largest() {
                if engine.place(bin, item).is_ok() {
                    placed += 1;
                }
            }
            bin.finish();
            debug!(bin = bin.id(), placed, "bin filled");
        }
        PackingOutcome::Distributed
    }
}
