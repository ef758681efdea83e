//! Series layout types.

use crate::{SeriesError, SeriesResult};

/// How a column is rendered in exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberFormat {
    /// Shortest representation that round-trips
    #[default]
    Plain,
    /// Fixed number of decimals
    Fixed(usize),
    /// Scientific notation with this many mantissa decimals
    Exponential(usize),
}

impl NumberFormat {
    pub fn format(self, value: f64) -> String {
        match self {
            Self::Plain => format!("{value}"),
            Self::Fixed(decimals) => format!("{value:.decimals$}"),
            Self::Exponential(decimals) => format!("{value:.decimals$e}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnRole {
    /// Independent variable; two values closer than `tolerance` are the same
    /// setting.
    Key { tolerance: f64 },
    Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub header: String,
    pub format: NumberFormat,
    pub role: ColumnRole,
}

impl Column {
    pub fn key(header: impl Into<String>, tolerance: f64) -> Self {
        Self {
            header: header.into(),
            format: NumberFormat::Plain,
            role: ColumnRole::Key { tolerance },
        }
    }

    pub fn value(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            format: NumberFormat::Plain,
            role: ColumnRole::Value,
        }
    }

    pub fn with_format(mut self, format: NumberFormat) -> Self {
        self.format = format;
        self
    }

    pub fn tolerance(&self) -> Option<f64> {
        match self.role {
            ColumnRole::Key { tolerance } => Some(tolerance),
            ColumnRole::Value => None,
        }
    }

    pub fn is_key(&self) -> bool {
        self.tolerance().is_some()
    }
}

/// Column set of a series. `primary` is the key column the series is
/// sorted by.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesLayout {
    columns: Vec<Column>,
    primary: usize,
}

impl SeriesLayout {
    pub fn new(columns: Vec<Column>, primary: usize) -> SeriesResult<Self> {
        let Some(primary_column) = columns.get(primary) else {
            return Err(SeriesError::ColumnOutOfRange {
                index: primary,
                len: columns.len(),
            });
        };
        if !primary_column.is_key() {
            return Err(SeriesError::NotAKey {
                header: primary_column.header.clone(),
            });
        }
        for column in &columns {
            if let Some(tolerance) = column.tolerance()
                && !(tolerance.is_finite() && tolerance > 0.0)
            {
                return Err(SeriesError::InvalidLayout {
                    what: format!("tolerance of '{}' must be positive", column.header),
                });
            }
        }
        Ok(Self { columns, primary })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn primary(&self) -> usize {
        self.primary
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.header.as_str())
    }

    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.header == header)
    }

    /// Key columns as `(index, tolerance)`, primary first.
    pub fn keys(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        let primary = self.primary;
        let rest = self
            .columns
            .iter()
            .enumerate()
            .filter(move |(i, _)| *i != primary)
            .filter_map(|(i, c)| c.tolerance().map(|t| (i, t)));
        std::iter::once(primary)
            .filter_map(|i| self.columns[i].tolerance().map(|t| (i, t)))
            .chain(rest)
    }

    pub(crate) fn column(&self, index: usize) -> SeriesResult<&Column> {
        self.columns
            .get(index)
            .ok_or(SeriesError::ColumnOutOfRange {
                index,
                len: self.columns.len(),
            })
    }
}

/// One recorded row, aligned with a [`SeriesLayout`].
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementPoint {
    pub fields: Vec<f64>,
}

impl MeasurementPoint {
    pub fn new(fields: Vec<f64>) -> Self {
        Self { fields }
    }

    pub fn get(&self, column: usize) -> Option<f64> {
        self.fields.get(column).copied()
    }
}

impl From<Vec<f64>> for MeasurementPoint {
    fn from(fields: Vec<f64>) -> Self {
        Self::new(fields)
    }
}
