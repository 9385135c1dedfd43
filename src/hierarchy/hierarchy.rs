use std::fmt;
use std::iter::Flatten;
use std::slice;

use thiserror::Error;
use tracing::{debug, info, trace};

use crate::analysis::importance::ImportanceAggregator;
use crate::analysis::metric::{Accuracy, Metric};
use crate::analysis::ranking;
use crate::hierarchy::config::HierarchyConfig;
use crate::hierarchy::population::{ProviderError, ResultScope, ResultsProvider};
use crate::interval::{GridCoordinates, IndexError, Indexer, Interval};
use crate::types::evaluation::{HierarchyEvaluation, IntervalResult, Ranking};
use crate::types::identifiers::IntervalId;

#[derive(Debug, Error)]
pub enum HierarchyError {
    #[error("Invalid resolution: {0}")]
    InvalidResolution(usize),
    #[error("Resolution {resolution} exceeds {max}, interval labels would collide")]
    ResolutionTooFine { resolution: usize, max: usize },
    #[error(transparent)]
    Index(#[from] IndexError),
    #[error(
        "Grid cell ({length_index}, {start_index}) already holds interval {existing}, \
         interval {incoming} resolved to the same cell"
    )]
    CellOccupied {
        length_index: usize,
        start_index: usize,
        existing: IntervalId,
        incoming: IntervalId,
    },
    #[error("Grid cell ({length_index}, {start_index}) left unpopulated")]
    CellUnpopulated {
        length_index: usize,
        start_index: usize,
    },
    #[error("Unscored interval: {label}")]
    Unscored { label: String },
    #[error("NaN score {score} for interval {label}")]
    InvalidScore { label: String, score: f64 },
    #[error("Failed to fetch result for {key}")]
    Provider {
        key: String,
        #[source]
        source: ProviderError,
    },
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Canonical traversal: shortest intervals first, ascending start within a length.
pub type Iter<'a> = Flatten<slice::Iter<'a, Vec<Interval>>>;

/// Triangular grid holding every sub-range of `[0, 1]` at one resolution.
///
/// Row `length_index` holds `R - length_index` intervals ordered by start
/// index. Row 0 is the finest grain, row `R - 1` is the full domain.
///
/// The ranking and its summary are cached. Attaching results through this
/// type clears both caches and every `outranks_full_domain` flag, so a
/// cached ranking never outlives the scores it was computed from.
#[derive(Debug, Clone)]
pub struct IntervalHierarchy {
    indexer: Indexer,
    cells: Vec<Vec<Interval>>,
    ranking: Option<Ranking>,
    evaluation: Option<HierarchyEvaluation>,
}

impl IntervalHierarchy {
    pub fn build(config: &HierarchyConfig) -> Result<Self, HierarchyError> {
        config.validate()?;
        let indexer = Indexer::new(config.resolution);

        // 1. Allocate rows of R, R-1, ..., 1 cells
        let mut slots: Vec<Vec<Option<Interval>>> = (0..config.resolution)
            .map(|length_index| vec![None; indexer.row_len(length_index)])
            .collect();

        // 2. Place every enumerated interval
        for id in (0..indexer.interval_count()).map(IntervalId::new) {
            let interval = Interval::from_id(&indexer, id)?;
            let GridCoordinates {
                length_index,
                start_index,
            } = indexer.grid_coordinates(interval.start_fraction(), interval.end_fraction())?;

            let slot = &mut slots[length_index][start_index];
            if let Some(existing) = slot {
                return Err(HierarchyError::CellOccupied {
                    length_index,
                    start_index,
                    existing: existing.id(),
                    incoming: id,
                });
            }

            trace!(%id, label = %interval.label(), length_index, start_index, "placed interval");
            *slot = Some(interval);
        }

        // 3. Every cell must now be filled
        let mut cells = Vec::with_capacity(slots.len());
        for (length_index, row) in slots.into_iter().enumerate() {
            let row = row
                .into_iter()
                .enumerate()
                .map(|(start_index, slot)| {
                    slot.ok_or(HierarchyError::CellUnpopulated {
                        length_index,
                        start_index,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            cells.push(row);
        }

        debug!(
            resolution = config.resolution,
            intervals = indexer.interval_count(),
            "built interval hierarchy"
        );

        Ok(IntervalHierarchy {
            indexer,
            cells,
            ranking: None,
            evaluation: None,
        })
    }

    pub fn with_resolution(resolution: usize) -> Result<Self, HierarchyError> {
        Self::build(&HierarchyConfig::with_resolution(resolution))
    }

    pub fn resolution(&self) -> usize {
        self.indexer.resolution()
    }

    pub fn indexer(&self) -> &Indexer {
        &self.indexer
    }

    pub fn len(&self) -> usize {
        self.indexer.interval_count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> Iter<'_> {
        self.cells.iter().flatten()
    }

    /// The `R` length-index-0 intervals, by ascending start.
    pub fn finest_intervals(&self) -> &[Interval] {
        &self.cells[0]
    }

    pub fn full_domain_interval(&self) -> &Interval {
        &self.cells[self.resolution() - 1][0]
    }

    /// Intervals of one length, by ascending start.
    pub fn row(&self, length_index: usize) -> Option<&[Interval]> {
        self.cells.get(length_index).map(Vec::as_slice)
    }

    pub fn lookup(&self, length_index: usize, start_index: usize) -> Result<&Interval, HierarchyError> {
        let coordinates = GridCoordinates {
            length_index,
            start_index,
        };
        self.indexer.check(coordinates)?;
        Ok(&self.cells[length_index][start_index])
    }

    pub fn get(&self, id: IntervalId) -> Result<&Interval, HierarchyError> {
        let GridCoordinates {
            length_index,
            start_index,
        } = self.indexer.coordinates_of(id)?;
        self.lookup(length_index, start_index)
    }

    fn cell_mut(&mut self, coordinates: GridCoordinates) -> Result<&mut Interval, HierarchyError> {
        self.indexer.check(coordinates)?;
        Ok(&mut self.cells[coordinates.length_index][coordinates.start_index])
    }

    /// Attaches (or with `None`, detaches) the result of interval `id`.
    pub fn attach_result(
        &mut self,
        id: IntervalId,
        result: Option<IntervalResult>,
    ) -> Result<(), HierarchyError> {
        let coordinates = self.indexer.coordinates_of(id)?;
        self.invalidate_ranking();
        self.cell_mut(coordinates)?.set_result(result);
        Ok(())
    }

    /// Fetches a result for every interval from `provider`.
    ///
    /// Stops at the first failed fetch; intervals visited before it keep
    /// their new results.
    pub fn populate<P: ResultsProvider + ?Sized>(
        &mut self,
        provider: &P,
        scope: &ResultScope,
    ) -> Result<(), HierarchyError> {
        self.invalidate_ranking();

        for interval in self.cells.iter_mut().flatten() {
            let key = scope.key_for(interval);
            let result = provider
                .fetch(&key)
                .map_err(|source| HierarchyError::Provider {
                    key: key.to_string(),
                    source,
                })?;
            interval.set_result(Some(result));
        }

        info!(
            dataset = %scope.dataset,
            classifier = %scope.base_classifier,
            fold = scope.fold,
            split = %scope.split,
            intervals = self.len(),
            "populated interval hierarchy"
        );
        Ok(())
    }

    /// Drops the cached ranking, the cached summary and all ranking flags.
    pub fn invalidate_ranking(&mut self) {
        self.ranking = None;
        self.evaluation = None;
        self.clear_ranking_flags();
    }

    fn clear_ranking_flags(&mut self) {
        for interval in self.cells.iter_mut().flatten() {
            interval.set_outranks_full_domain(None);
        }
    }

    /// Intervals ranked best first by accuracy, computed on first request.
    ///
    /// Returns the cached ranking as-is if one exists, including one produced
    /// by [`IntervalHierarchy::compute_interval_ordering`] with another metric.
    pub fn ordered_intervals(&mut self) -> Result<&Ranking, HierarchyError> {
        let ranking = match self.ranking.take() {
            Some(ranking) => ranking,
            None => self.rank_with(&Accuracy)?,
        };
        Ok(&*self.ranking.insert(ranking))
    }

    /// Ranks by `metric`, replacing any cached ranking.
    pub fn compute_interval_ordering<M: Metric + ?Sized>(
        &mut self,
        metric: &M,
    ) -> Result<&Ranking, HierarchyError> {
        self.ranking = None;
        let ranking = self.rank_with(metric)?;
        Ok(&*self.ranking.insert(ranking))
    }

    fn rank_with<M: Metric + ?Sized>(&mut self, metric: &M) -> Result<Ranking, HierarchyError> {
        self.evaluation = None;
        self.clear_ranking_flags();

        let ranking = ranking::rank_intervals(self, metric)?;
        for entry in &ranking.intervals {
            let coordinates = GridCoordinates {
                length_index: entry.length_index,
                start_index: entry.start_index,
            };
            self.cell_mut(coordinates)?
                .set_outranks_full_domain(Some(entry.outranks_full_domain));
        }
        Ok(ranking)
    }

    /// Share of intervals scoring at least as well as the full domain.
    /// Ranks by accuracy first if no ranking is cached.
    pub fn hierarchy_evaluation(&mut self) -> Result<&HierarchyEvaluation, HierarchyError> {
        let evaluation = match self.evaluation.take() {
            Some(evaluation) => evaluation,
            None => ranking::evaluate(self.ordered_intervals()?),
        };
        Ok(&*self.evaluation.insert(evaluation))
    }

    pub fn mean_importances(&self) -> Result<Vec<f64>, HierarchyError> {
        ImportanceAggregator::default().compute_mean_importance(self)
    }

    pub fn min_importances(&self) -> Result<Vec<f64>, HierarchyError> {
        ImportanceAggregator::default().compute_min_importance(self)
    }

    /// Sum of build times over every interval, in nanoseconds.
    pub fn total_build_time_nanos(&self) -> Result<u64, HierarchyError> {
        self.iter().try_fold(0u64, |total, interval| -> Result<u64, HierarchyError> {
            let cost = interval.build_cost().ok_or_else(|| HierarchyError::Unscored {
                label: interval.label().as_str().to_string(),
            })?;
            Ok(total.saturating_add(cost))
        })
    }

    pub fn full_domain_build_time_nanos(&self) -> Result<u64, HierarchyError> {
        let full = self.full_domain_interval();
        full.build_cost().ok_or_else(|| HierarchyError::Unscored {
            label: full.label().as_str().to_string(),
        })
    }

    fn write_labels(&self, f: &mut fmt::Formatter<'_>, row: &[Interval]) -> fmt::Result {
        for interval in row {
            write!(f, "{:>8}, ", interval.label())?;
        }
        writeln!(f)
    }

    fn write_scores(&self, f: &mut fmt::Formatter<'_>, row: &[Interval]) -> fmt::Result {
        for interval in row {
            match interval.score() {
                Some(score) => write!(f, "{:.6}, ", score)?,
                None => write!(f, "{:>8}, ", "-")?,
            }
        }
        writeln!(f)
    }
}

impl<'a> IntoIterator for &'a IntervalHierarchy {
    type Item = &'a Interval;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Diagnostic dump, longest intervals first: labels and scores interleaved,
/// then labels only, then scores only.
impl fmt::Display for IntervalHierarchy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.iter().rev() {
            self.write_labels(f, row)?;
            self.write_scores(f, row)?;
            writeln!(f)?;
        }
        writeln!(f)?;

        for row in self.cells.iter().rev() {
            self.write_labels(f, row)?;
        }
        writeln!(f)?;

        for row in self.cells.iter().rev() {
            self.write_scores(f, row)?;
        }
        Ok(())
    }
}
