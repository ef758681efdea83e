//! Delimited-text export.

use crate::SeriesResult;
use crate::store::Series;
use std::io::Write;

/// CSV rendering of a series plus optional trailing summary rows.
///
/// Summary rows are padded with empty cells to the header width so every
/// record has the same field count.
#[derive(Debug, Clone)]
pub struct CsvTable<'a> {
    series: &'a Series,
    summary: Vec<Vec<String>>,
}

impl<'a> CsvTable<'a> {
    pub fn new(series: &'a Series) -> Self {
        Self {
            series,
            summary: Vec::new(),
        }
    }

    pub fn with_summary_row(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.summary.push(vec![label.into(), value.into()]);
        self
    }

    pub fn write_to<W: Write>(&self, out: W) -> SeriesResult<()> {
        let layout = self.series.layout();
        let width = layout.len();
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .flexible(true)
            .from_writer(out);

        writer.write_record(layout.headers())?;
        for point in self.series {
            writer.write_record(
                layout
                    .columns()
                    .iter()
                    .zip(&point.fields)
                    .map(|(column, value)| column.format.format(*value)),
            )?;
        }
        for row in &self.summary {
            let mut record = row.clone();
            record.resize(width.max(record.len()), String::new());
            writer.write_record(&record)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn to_csv_string(&self) -> SeriesResult<String> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        Ok(String::from_utf8(buf)?)
    }
}

impl Series {
    /// Header row followed by one row per point.
    pub fn to_csv(&self) -> SeriesResult<String> {
        CsvTable::new(self).to_csv_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Column, NumberFormat, SeriesLayout};

    fn band_gap_series() -> Series {
        let layout = SeriesLayout::new(
            vec![
                Column::key("Temperature (K)", 1.0),
                Column::value("Resistance (Ohm)").with_format(NumberFormat::Fixed(2)),
                Column::value("1/T (K^-1)").with_format(NumberFormat::Exponential(4)),
                Column::value("ln(R)").with_format(NumberFormat::Fixed(4)),
            ],
            0,
        )
        .unwrap();
        Series::new(layout)
    }

    #[test]
    fn empty_series_exports_header_only() {
        let csv = band_gap_series().to_csv().unwrap();
        assert_eq!(csv, "Temperature (K),Resistance (Ohm),1/T (K^-1),ln(R)\n");
    }

    #[test]
    fn rows_use_column_formats() {
        let mut series = band_gap_series();
        series.upsert(vec![300.0, 1234.5678, 1.0 / 300.0, 7.1184]).unwrap();
        let csv = series.to_csv().unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "300,1234.57,3.3333e-3,7.1184");
    }

    #[test]
    fn summary_rows_are_padded() {
        let mut series = band_gap_series();
        series.upsert(vec![300.0, 1.0, 1.0, 0.0]).unwrap();
        let csv = CsvTable::new(&series)
            .with_summary_row("Calculated Band Gap (eV)", "1.1200")
            .to_csv_string()
            .unwrap();
        let last = csv.lines().last().unwrap();
        assert_eq!(last, "Calculated Band Gap (eV),1.1200,,");
    }

    #[test]
    fn headers_with_commas_are_quoted() {
        let layout =
            SeriesLayout::new(vec![Column::key("V, bias", 0.1), Column::value("I")], 0).unwrap();
        let csv = Series::new(layout).to_csv().unwrap();
        assert_eq!(csv, "\"V, bias\",I\n");
    }
}
