//! Ordered measurement series with approximate-key upsert.

use crate::types::{MeasurementPoint, SeriesLayout};
use crate::{SeriesError, SeriesResult};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// New point stored at this index
    Inserted(usize),
    /// Existing point at this index was overwritten
    Replaced(usize),
}

impl UpsertOutcome {
    pub fn index(self) -> usize {
        match self {
            Self::Inserted(i) | Self::Replaced(i) => i,
        }
    }
}

/// Points sorted ascending by the layout's primary key, at most one per
/// tolerance band.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    layout: SeriesLayout,
    points: Vec<MeasurementPoint>,
}

impl Series {
    pub fn new(layout: SeriesLayout) -> Self {
        Self {
            layout,
            points: Vec::new(),
        }
    }

    pub fn layout(&self) -> &SeriesLayout {
        &self.layout
    }

    pub fn points(&self) -> &[MeasurementPoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MeasurementPoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Replace the nearest point whose keys all lie within tolerance, or
    /// insert in sorted position.
    ///
    /// A replaced point keeps its stored keys; only value columns are
    /// overwritten.
    pub fn upsert(&mut self, point: impl Into<MeasurementPoint>) -> SeriesResult<UpsertOutcome> {
        let point = point.into();
        self.check(&point)?;

        if let Some(index) = self.nearest_match(&point) {
            let stored = &mut self.points[index];
            for (i, column) in self.layout.columns().iter().enumerate() {
                if !column.is_key() {
                    stored.fields[i] = point.fields[i];
                }
            }
            return Ok(UpsertOutcome::Replaced(index));
        }

        let layout = &self.layout;
        let index = self
            .points
            .partition_point(|p| compare_keys(layout, p, &point).is_le());
        self.points.insert(index, point);
        Ok(UpsertOutcome::Inserted(index))
    }

    /// Points whose key `column` matches `value` within that column's
    /// tolerance.
    pub fn filtered_by(&self, column: usize, value: f64) -> SeriesResult<Series> {
        let spec = self.layout.column(column)?;
        let tolerance = spec.tolerance().ok_or_else(|| SeriesError::NotAKey {
            header: spec.header.clone(),
        })?;
        let points = self
            .points
            .iter()
            .filter(|p| (p.fields[column] - value).abs() < tolerance)
            .cloned()
            .collect();
        Ok(Series {
            layout: self.layout.clone(),
            points,
        })
    }

    /// All values of one column, in series order.
    pub fn column(&self, index: usize) -> SeriesResult<Vec<f64>> {
        self.layout.column(index)?;
        Ok(self.points.iter().map(|p| p.fields[index]).collect())
    }

    /// Whether `point` fits the layout: one field per column and finite
    /// keys. [`Series::upsert`] rejects anything that fails this.
    pub fn check(&self, point: &MeasurementPoint) -> SeriesResult<()> {
        if point.fields.len() != self.layout.len() {
            return Err(SeriesError::LayoutMismatch {
                expected: self.layout.len(),
                got: point.fields.len(),
            });
        }
        for (i, _) in self.layout.keys() {
            let value = point.fields[i];
            if !value.is_finite() {
                return Err(SeriesError::NonFiniteKey {
                    header: self.layout.columns()[i].header.clone(),
                    value,
                });
            }
        }
        Ok(())
    }

    fn nearest_match(&self, point: &MeasurementPoint) -> Option<usize> {
        self.points
            .iter()
            .enumerate()
            .filter_map(|(index, stored)| {
                let mut distance = 0.0;
                for (i, tolerance) in self.layout.keys() {
                    let gap = (stored.fields[i] - point.fields[i]).abs();
                    if gap >= tolerance {
                        return None;
                    }
                    distance += gap / tolerance;
                }
                Some((index, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a MeasurementPoint;
    type IntoIter = std::slice::Iter<'a, MeasurementPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Primary key first, remaining keys as tie-breakers.
fn compare_keys(layout: &SeriesLayout, a: &MeasurementPoint, b: &MeasurementPoint) -> Ordering {
    layout
        .keys()
        .map(|(i, _)| a.fields[i].total_cmp(&b.fields[i]))
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}
