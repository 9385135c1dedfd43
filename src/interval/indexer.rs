use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::identifiers::{IntervalId, IntervalLabel};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndexError {
    #[error("Interval id {id} out of range: resolution {resolution} has {count} intervals")]
    IdOutOfRange {
        id: usize,
        count: usize,
        resolution: usize,
    },
    #[error("Grid cell ({length_index}, {start_index}) outside the triangle for resolution {resolution}")]
    CoordinatesOutOfRange {
        length_index: usize,
        start_index: usize,
        resolution: usize,
    },
    #[error("Fractional interval [{start}, {end}] is not a sub-range of [0, 1]")]
    FractionOutOfRange { start: f64, end: f64 },
}

/// Cell of the triangular grid. `length_index` is the number of covered
/// units minus one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridCoordinates {
    pub length_index: usize,
    pub start_index: usize,
}

/// Pure mappings between interval ids, fractional bounds and grid cells for
/// one resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indexer {
    resolution: usize,
}

impl Indexer {
    pub fn new(resolution: usize) -> Self {
        Self { resolution }
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// `R * (R + 1) / 2` distinct intervals.
    pub fn interval_count(&self) -> usize {
        self.resolution * (self.resolution + 1) / 2
    }

    /// Number of cells at `length_index`.
    pub fn row_len(&self, length_index: usize) -> usize {
        self.resolution.saturating_sub(length_index)
    }

    pub fn fraction(&self, index: usize) -> f64 {
        index as f64 / self.resolution as f64
    }

    /// Discretized `(start_index, end_index)` of an id.
    ///
    /// Ids walk start indices upward; for each start, end indices run from
    /// `start + 1` to `R`.
    pub fn enumerate_indices(&self, id: IntervalId) -> Result<(usize, usize), IndexError> {
        let out_of_range = IndexError::IdOutOfRange {
            id: id.get(),
            count: self.interval_count(),
            resolution: self.resolution,
        };

        let mut remaining = id.get();
        for start in 0..self.resolution {
            let row = self.resolution - start;
            if remaining < row {
                return Ok((start, start + 1 + remaining));
            }
            remaining -= row;
        }

        Err(out_of_range)
    }

    /// Fractional `(start, end)` bounds of an id.
    pub fn enumerate(&self, id: IntervalId) -> Result<(f64, f64), IndexError> {
        let (start, end) = self.enumerate_indices(id)?;
        Ok((self.fraction(start), self.fraction(end)))
    }

    /// Grid cell for a fractional interval.
    ///
    /// `end - start` is snapped to the nearest multiple of `1 / R` before it
    /// is scaled to a unit count: `0.15 - 0.10` is `0.04999999999999999`.
    pub fn grid_coordinates(&self, start: f64, end: f64) -> Result<GridCoordinates, IndexError> {
        if !(0.0..=1.0).contains(&start) || !(0.0..=1.0).contains(&end) || end <= start {
            return Err(IndexError::FractionOutOfRange { start, end });
        }

        let r = self.resolution as f64;
        let raw_length = end - start;
        let snapped_length = (raw_length * r).round() / r;

        let length_units = (snapped_length * r).round() as usize;
        let start_index = (start * r).round() as usize;

        if length_units == 0 {
            return Err(IndexError::FractionOutOfRange { start, end });
        }

        let coordinates = GridCoordinates {
            length_index: length_units - 1,
            start_index,
        };
        self.check(coordinates)?;
        Ok(coordinates)
    }

    /// Grid cell for an id, via its fractional bounds.
    pub fn coordinates_of(&self, id: IntervalId) -> Result<GridCoordinates, IndexError> {
        let (start, end) = self.enumerate(id)?;
        self.grid_coordinates(start, end)
    }

    pub fn label(&self, start: f64, end: f64) -> IntervalLabel {
        IntervalLabel::from_fractions(start, end)
    }

    /// Fails unless `length_index < R` and `start_index <= R - 1 - length_index`.
    pub fn check(&self, coordinates: GridCoordinates) -> Result<(), IndexError> {
        let GridCoordinates {
            length_index,
            start_index,
        } = coordinates;

        if length_index >= self.resolution || start_index >= self.row_len(length_index) {
            return Err(IndexError::CoordinatesOutOfRange {
                length_index,
                start_index,
                resolution: self.resolution,
            });
        }
        Ok(())
    }
}
