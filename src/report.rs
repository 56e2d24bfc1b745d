//! A single packing run and the report it produces.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use tracing::info;

use crate::collection::Collection;
use crate::entity::{Bin, BinCapacity, Item, ItemSummary};
use crate::error::Result;
use crate::geometry::Slot;
use crate::payload::generate_id;
use crate::placement::PlacementEngine;
use crate::{Cuboid, PackingAlgorithm, PackingOutcome};

/// Owns the catalogs for one pass of one algorithm.
///
/// Every run starts from freshly decoded collections; nothing is shared between runs.
pub struct PackingRun {
    id: String,
    bins: Collection<Bin>,
    items: Collection<Item>,
    engine: PlacementEngine,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
}

impl PackingRun {
    pub fn new(bins: Collection<Bin>, items: Collection<Item>, engine: PlacementEngine) -> Self {
        Self {
            id: generate_id(),
            bins,
            items,
            engine,
            started_at: None,
            finished_at: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Validates the catalogs for `algorithm`, runs it and builds the report.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PackError::Configuration`] before any placement if the
    /// catalogs do not suit the algorithm.
    pub fn execute<A: PackingAlgorithm + ?Sized>(mut self, algorithm: &A) -> Result<PackingReport> {
        algorithm.validate(&self.bins, &self.items)?;

        self.started_at = Some(Utc::now());
        info!(
            run = %self.id,
            strategy = algorithm.name(),
            bins = self.bins.len(),
            items = self.items.len(),
            "packing started"
        );

        let outcome = algorithm.pack(&self.engine, &mut self.bins, &mut self.items);

        self.finished_at = Some(Utc::now());
        let placed = self.items.iter().filter(|i| i.is_used()).count();
        info!(
            run = %self.id,
            placed,
            lost = self.items.len() - placed,
            "packing finished"
        );

        Ok(self.report(algorithm.name(), outcome))
    }

    fn report(&self, strategy: &str, outcome: PackingOutcome) -> PackingReport {
        match outcome {
            PackingOutcome::Smallest(id) => PackingReport::Smallest(SmallestReport {
                smallest: id
                    .and_then(|id| self.bins.get(&id))
                    .map(|bin| self.bin_report(bin)),
            }),
            PackingOutcome::Distributed => PackingReport::Distributed(DistributionReport {
                lost: self
                    .items
                    .iter()
                    .filter(|i| !i.is_used())
                    .map(Item::summary)
                    .collect(),
                run: RunSummary {
                    id: self.id.clone(),
                    strategy: strategy.to_string(),
                    started_at: self.started_at.map(|t| t.to_rfc3339()),
                    finished_at: self.finished_at.map(|t| t.to_rfc3339()),
                },
                packed: self
                    .bins
                    .iter()
                    .filter(|b| b.is_used())
                    .map(|b| self.bin_report(b))
                    .collect(),
            }),
        }
    }

    fn bin_report(&self, bin: &Bin) -> BinReport {
        let weight = bin
            .slots()
            .iter()
            .filter_map(|s| self.items.get(&s.id))
            .map(Item::weight)
            .sum();
        BinReport {
            bin: BinSummary {
                id: bin.id().to_string(),
                w: bin.dims().w,
                h: bin.dims().h,
                d: bin.dims().d,
                initial: bin.capacity(),
            },
            slots: bin.slots().to_vec(),
            weight,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PackingReport {
    Smallest(SmallestReport),
    Distributed(DistributionReport),
}

impl PackingReport {
    /// Items that ended up in no bin. Empty for a smallest-bin report.
    pub fn lost(&self) -> &[ItemSummary] {
        match self {
            PackingReport::Distributed(report) => &report.lost,
            PackingReport::Smallest(_) => &[],
        }
    }

    /// Bins holding at least one slot. Empty for a smallest-bin report.
    pub fn packed(&self) -> &[BinReport] {
        match self {
            PackingReport::Distributed(report) => &report.packed,
            PackingReport::Smallest(_) => &[],
        }
    }

    pub fn smallest(&self) -> Option<&BinReport> {
        match self {
            PackingReport::Smallest(report) => report.smallest.as_ref(),
            PackingReport::Distributed(_) => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SmallestReport {
    #[serde(serialize_with = "bin_or_false")]
    pub smallest: Option<BinReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DistributionReport {
    pub lost: Vec<ItemSummary>,
    pub run: RunSummary,
    pub packed: Vec<BinReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub id: String,
    pub strategy: String,
    pub started_at: Option<String>,
    pub finished_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BinReport {
    pub bin: BinSummary,
    pub slots: Vec<Slot>,
    /// Sum of the weights of the items in `slots`.
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BinSummary {
    pub id: String,
    pub w: i64,
    pub h: i64,
    pub d: i64,
    pub initial: BinCapacity,
}

fn bin_or_false<S: Serializer>(
    bin: &Option<BinReport>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match bin {
        Some(bin) => bin.serialize(serializer),
        None => serializer.serialize_bool(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::packing::{
        MultiFifoPackingAlgorithm, SinglePackingAlgorithm, SmallestFitPackingAlgorithm,
    };
    use crate::geometry::Dimensions;
    use crate::heuristics::score::BinScore;
    use crate::PackError;

    fn run(bins: &[(&str, i64)], items: &[(&str, i64, f64)]) -> PackingRun {
        let mut b = Collection::new("bin");
        for &(id, size) in bins {
            b.insert(Bin::new(id, Dimensions::new(size, size, size), 100.0))
                .unwrap();
        }
        let mut i = Collection::new("item");
        for &(id, size, weight) in items {
            i.insert(Item::new(id, Dimensions::new(size, size, size)).with_weight(weight))
                .unwrap();
        }
        PackingRun::new(b, i, PlacementEngine::default()).with_id("run-1")
    }

    #[test]
    fn distributed_report_shape() {
        let report = run(&[("b", 10)], &[("a", 3, 2.5), ("huge", 12, 1.0)])
            .execute(&SinglePackingAlgorithm)
            .unwrap();

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["run"]["id"], "run-1");
        assert_eq!(json["run"]["strategy"], "single");
        assert!(json["run"]["started_at"].is_string());
        assert_eq!(
            json["lost"],
            serde_json::json!([{ "w": 12, "h": 12, "d": 12, "id": "huge" }])
        );

        let packed = &json["packed"][0];
        assert_eq!(packed["bin"]["id"], "b");
        assert_eq!(packed["bin"]["initial"]["max_wg"], 100.0);
        assert_eq!(packed["weight"], 2.5);
        assert_eq!(
            packed["slots"][0],
            serde_json::json!({
                "id": "a", "min_x": 0, "max_x": 3, "min_y": 0, "max_y": 3, "min_z": 0, "max_z": 3
            })
        );
    }

    #[test]
    fn unused_bins_are_not_packed() {
        let report = run(&[("b1", 10), ("b2", 10)], &[("a", 3, 0.0), ("c", 3, 0.0)])
            .execute(&MultiFifoPackingAlgorithm {
                prefer_smallest_bins: false,
            })
            .unwrap();
        assert_eq!(report.packed().len(), 1);
        assert_eq!(report.packed()[0].bin.id, "b1");
        assert!(report.lost().is_empty());
    }

    #[test]
    fn missing_smallest_serialises_as_false() {
        let report = run(&[("b", 2)], &[("a", 3, 0.0)])
            .execute(&SmallestFitPackingAlgorithm {
                bin_score: BinScore::Linear,
            })
            .unwrap();
        assert!(report.smallest().is_none());
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            serde_json::json!({ "smallest": false })
        );
    }

    #[test]
    fn smallest_serialises_as_bin() {
        let report = run(&[("b", 4)], &[("a", 3, 0.0)])
            .execute(&SmallestFitPackingAlgorithm {
                bin_score: BinScore::Linear,
            })
            .unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["smallest"]["bin"]["id"], "b");
        assert_eq!(json["smallest"]["slots"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn validation_happens_before_any_work() {
        let err = run(&[("b1", 10), ("b2", 10)], &[("a", 3, 0.0)])
            .execute(&SinglePackingAlgorithm)
            .err()
            .unwrap();
        assert!(matches!(err, PackError::Configuration(_)));
    }
}
