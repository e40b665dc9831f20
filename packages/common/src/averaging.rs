//! Grade aggregation math shared by the server and its tests.
//!
//! Block averages combine three component means (daily qualifications,
//! practice exams, formal exams) with fixed weights. Annual averages take the
//! mean of whatever block slots are populated for the year.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of teaching blocks in an academic year.
pub const BLOCKS_PER_YEAR: usize = 4;

/// Weights applied to the three component averages of a block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradeWeights {
    pub daily: f64,
    pub practice: f64,
    pub exam: f64,
}

impl Default for GradeWeights {
    fn default() -> Self {
        Self {
            daily: 0.3,
            practice: 0.3,
            exam: 0.4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeightsError {
    #[error("{0} weight must be a finite, non-negative number")]
    Invalid(&'static str),
    #[error("grading weights must sum to 1.0, got {0}")]
    BadSum(f64),
}

impl GradeWeights {
    pub fn new(daily: f64, practice: f64, exam: f64) -> Result<Self, WeightsError> {
        for (name, value) in [("daily", daily), ("practice", practice), ("exam", exam)] {
            if !value.is_finite() || value < 0.0 {
                return Err(WeightsError::Invalid(name));
            }
        }
        let sum = daily + practice + exam;
        if (sum - 1.0).abs() > 1e-9 {
            return Err(WeightsError::BadSum(sum));
        }
        Ok(Self {
            daily,
            practice,
            exam,
        })
    }
}

/// Round half away from zero to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Arithmetic mean of `values`, or `0.0` for an empty set.
pub fn mean_or_zero<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let mut sum = 0.0;
    let mut count: usize = 0;
    for v in values {
        sum += v;
        count += 1;
    }
    if count == 0 { 0.0 } else { sum / count as f64 }
}

/// Result of a block average computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct BlockAverageValues {
    /// Mean of active daily qualification ratings (0 when none).
    #[schema(example = 7.0)]
    pub daily_average: f64,
    /// Mean of active practice exam scores (0 when none).
    #[schema(example = 10.0)]
    pub practice_average: f64,
    /// Mean of active formal exam scores (0 when none).
    #[schema(example = 5.0)]
    pub exam_average: f64,
    /// Weighted composite, rounded to 2 decimals.
    #[schema(example = 7.1)]
    pub block_average: f64,
}

impl BlockAverageValues {
    fn from_components(
        daily_average: f64,
        practice_average: f64,
        exam_average: f64,
        weights: &GradeWeights,
    ) -> Self {
        let composite = weights.daily * daily_average
            + weights.practice * practice_average
            + weights.exam * exam_average;
        Self {
            daily_average,
            practice_average,
            exam_average,
            block_average: round2(composite),
        }
    }

    /// Compute a block average from the raw signal sets.
    pub fn compute(ratings: &[f64], practices: &[f64], exams: &[f64], weights: &GradeWeights) -> Self {
        Self::from_components(
            mean_or_zero(ratings.iter().copied()),
            mean_or_zero(practices.iter().copied()),
            mean_or_zero(exams.iter().copied()),
            weights,
        )
    }
}

/// Fixed slots for the block averages of one year, indexed by block ordinal (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BlockSlots([Option<f64>; BLOCKS_PER_YEAR]);

impl BlockSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `value` in the slot for `ordinal`. Returns `false` when the ordinal is out of range.
    pub fn set(&mut self, ordinal: i32, value: f64) -> bool {
        match Self::index(ordinal) {
            Some(idx) => {
                self.0[idx] = Some(value);
                true
            }
            None => false,
        }
    }

    pub fn as_array(&self) -> [Option<f64>; BLOCKS_PER_YEAR] {
        self.0
    }

    /// Mean of the populated, finite slots rounded to 2 decimals, or `None` if there are none.
    pub fn course_average(&self) -> Option<f64> {
        let present: Vec<f64> = self
            .0
            .iter()
            .flatten()
            .copied()
            .filter(|v| v.is_finite())
            .collect();
        if present.is_empty() {
            None
        } else {
            Some(round2(mean_or_zero(present)))
        }
    }

    fn index(ordinal: i32) -> Option<usize> {
        if (1..=BLOCKS_PER_YEAR as i32).contains(&ordinal) {
            Some((ordinal - 1) as usize)
        } else {
            None
        }
    }
}

/// Result of an annual average computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AnnualAverageValues {
    #[schema(example = 6.0)]
    pub block1_average: Option<f64>,
    #[schema(example = json!(null))]
    pub block2_average: Option<f64>,
    #[schema(example = 8.0)]
    pub block3_average: Option<f64>,
    #[schema(example = json!(null))]
    pub block4_average: Option<f64>,
    /// Mean of the populated block slots, rounded to 2 decimals.
    #[schema(example = 7.0)]
    pub course_average: f64,
}

impl AnnualAverageValues {
    /// Build the annual values, or `None` if no slot carries a usable value.
    pub fn from_slots(slots: &BlockSlots) -> Option<Self> {
        let course_average = slots.course_average()?;
        let [block1_average, block2_average, block3_average, block4_average] = slots.as_array();
        Some(Self {
            block1_average,
            block2_average,
            block3_average,
            block4_average,
            course_average,
        })
    }
}
