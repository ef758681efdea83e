//! Chart feed: `{x, y}` records for a plotting widget.

use crate::SeriesResult;
use crate::store::Series;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
}

impl Series {
    /// Pairs `(x, y)` from two columns in series order. Non-finite values
    /// are skipped.
    pub fn chart_points(&self, x: usize, y: usize) -> SeriesResult<Vec<ChartPoint>> {
        let xs = self.column(x)?;
        let ys = self.column(y)?;
        Ok(xs
            .into_iter()
            .zip(ys)
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .map(|(x, y)| ChartPoint { x, y })
            .collect())
    }

    pub fn chart_json(&self, x: usize, y: usize) -> SeriesResult<String> {
        Ok(serde_json::to_string_pretty(&self.chart_points(x, y)?)?)
    }
}
