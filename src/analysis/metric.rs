use crate::types::evaluation::IntervalResult;

/// Maps an attached result to the value intervals are compared by.
///
/// Implementations are called inside O(R²) loops and must be pure and total.
pub trait Metric {
    fn measure(&self, result: &IntervalResult) -> f64;
}

/// Default metric: the result's accuracy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Accuracy;

impl Metric for Accuracy {
    fn measure(&self, result: &IntervalResult) -> f64 {
        result.accuracy
    }
}

/// Build time in nanoseconds, as a float.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildTime;

impl Metric for BuildTime {
    fn measure(&self, result: &IntervalResult) -> f64 {
        result.build_time_nanos as f64
    }
}

impl<F> Metric for F
where
    F: Fn(&IntervalResult) -> f64,
{
    fn measure(&self, result: &IntervalResult) -> f64 {
        self(result)
    }
}
