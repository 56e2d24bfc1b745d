use crate::collection::Collection;
use crate::entity::{Bin, Item};
use crate::error::{PackError, Result};
use crate::placement::PlacementEngine;
use crate::{PackingAlgorithm, PackingOutcome};

use super::fill_in_order;

/// Packs as many items as possible into a single bin.
pub struct SinglePackingAlgorithm;

impl PackingAlgorithm for SinglePackingAlgorithm {
    fn name(&self) -> &'static str {
        "single"
    }

    fn validate(&self, bins: &Collection<Bin>, _items: &Collection<Item>) -> Result<()> {
        if bins.len() != 1 {
            return Err(PackError::Configuration(format!(
                "single packing needs exactly one bin, got {}",
                bins.len()
            )));
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
        if let Some(bin) = bins.next() {
            fill_in_order(engine, bin, items);
        }
        PackingOutcome::Distributed
    }
}
