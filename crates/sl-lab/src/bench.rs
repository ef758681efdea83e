//! One experiment on the bench: controls, recorded series and sweep driver.

use crate::config::LabConfig;
use crate::controls::{ControlState, ControlValue};
use crate::experiment::{Companion, ExperimentId, ExperimentModel, Reading};
use crate::{LabError, LabResult};
use sl_core::Catalog;
use sl_series::{ChartPoint, CsvTable, MeasurementPoint, Series, UpsertOutcome};
use sl_sweep::{Scheduler, SweepDriver, TickOutcome, TimerId, VirtualScheduler};
use std::borrow::Cow;
use tracing::{debug, warn};

/// Table a chart is drawn from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChartSource<'a> {
    /// Every recorded point
    Series,
    /// Points whose key column `key_header` matches `value`, i.e. one curve
    /// of a store that holds several
    Curve { key_header: &'a str, value: f64 },
    Companion,
}

#[derive(Debug)]
pub struct Bench {
    model: Box<dyn ExperimentModel>,
    controls: ControlState,
    series: Series,
    companion: Option<Companion>,
    driver: SweepDriver,
}

impl Bench {
    /// Set up `id` with configured control defaults applied.
    pub fn new(id: ExperimentId, config: &LabConfig) -> LabResult<Self> {
        Self::with_model(id.model(config), config)
    }

    /// Set up an arbitrary model, e.g. one built outside the catalog.
    pub fn with_model(model: Box<dyn ExperimentModel>, config: &LabConfig) -> LabResult<Self> {
        let mut controls = ControlState::new(model.id().id(), model.controls());
        config.apply_defaults(model.as_ref(), &mut controls)?;
        model.adjust_controls(&mut controls)?;
        let series = Series::new(model.layout()?);
        let companion = model.companion()?;
        Ok(Self {
            model,
            controls,
            series,
            companion,
            driver: SweepDriver::new(),
        })
    }

    pub fn id(&self) -> ExperimentId {
        self.model.id()
    }

    pub fn controls(&self) -> &ControlState {
        &self.controls
    }

    pub fn series(&self) -> &Series {
        &self.series
    }

    /// Second table fed by every recording, if the experiment keeps one.
    pub fn companion(&self) -> Option<&Series> {
        self.companion.as_ref().map(Companion::series)
    }

    /// Set a control from text. Dependent bounds are updated afterwards.
    pub fn set(&mut self, name: &str, raw: &str) -> LabResult<()> {
        self.controls.set_from_str(name, raw)?;
        self.model.adjust_controls(&mut self.controls)
    }

    /// Set a numeric control; returns the clamped, snapped value.
    pub fn set_number(&mut self, name: &str, value: f64) -> LabResult<f64> {
        let stored = self.controls.set_number(name, value)?;
        self.model.adjust_controls(&mut self.controls)?;
        Ok(stored)
    }

    pub fn readout(&self) -> LabResult<Vec<Reading>> {
        self.model.readout(&self.controls)
    }

    /// Record the current operating point into the series.
    pub fn record(&mut self) -> LabResult<Vec<UpsertOutcome>> {
        let points = self.model.measure(&self.controls)?;
        if points.is_empty() {
            warn!(experiment = %self.id(), "nothing to record at current settings");
        }
        let mut outcomes = Vec::with_capacity(points.len());
        for point in points {
            let outcome = self.store(point)?;
            debug!(experiment = %self.id(), ?outcome, len = self.series.len(), "recorded");
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }

    /// Upsert into the main series, then the companion.
    fn store(&mut self, point: MeasurementPoint) -> LabResult<UpsertOutcome> {
        if let Some(companion) = &mut self.companion {
            // checked first so a rejected point touches neither table
            let projected = companion.project(&point);
            self.series.check(&point)?;
            companion.series().check(&projected)?;
            companion.record(&point)?;
        }
        Ok(self.series.upsert(point)?)
    }

    /// Replace the series with the model's generated curve.
    pub fn generate_curve(&mut self) -> LabResult<usize> {
        let Some(points) = self.model.curve(&self.controls)? else {
            return Err(LabError::NoCurve {
                experiment: self.id().to_string(),
            });
        };
        self.clear_tables();
        for point in points {
            self.store(point)?;
        }
        debug!(experiment = %self.id(), len = self.series.len(), "curve generated");
        Ok(self.series.len())
    }

    /// Start the timed sweep from the swept control's current value.
    pub fn start_sweep(&mut self, scheduler: &mut dyn Scheduler) -> LabResult<TimerId> {
        let Some(plan) = self.model.sweep_plan(&self.controls)? else {
            return Err(LabError::NoSweep {
                experiment: self.id().to_string(),
            });
        };
        let start = self.controls.number(&plan.control)?;
        Ok(self.driver.start(plan, start, scheduler)?)
    }

    pub fn stop_sweep(&mut self, scheduler: &mut dyn Scheduler) -> bool {
        self.driver.stop(scheduler)
    }

    pub fn is_sweeping(&self) -> bool {
        self.driver.is_running()
    }

    /// Value the running sweep records at on its next tick.
    pub fn sweep_position(&self) -> Option<f64> {
        self.driver.state().map(|s| s.current)
    }

    /// Handle a timer tick: record at the sweep position and advance the
    /// swept control.
    ///
    /// The driver only advances once the recording succeeded; on error the
    /// sweep keeps running at the same position.
    pub fn on_timer(
        &mut self,
        timer: TimerId,
        scheduler: &mut dyn Scheduler,
    ) -> LabResult<TickOutcome> {
        let Some((control, at)) = self
            .driver
            .state()
            .filter(|s| s.timer == timer)
            .map(|s| (s.plan.control.clone(), s.current))
        else {
            return Ok(TickOutcome::Ignored);
        };
        self.controls.set_number(&control, at)?;
        self.record()?;
        let outcome = self.driver.on_tick(timer, scheduler);
        if let TickOutcome::Recorded { next, .. } = outcome {
            self.controls.set_number(&control, next)?;
        }
        Ok(outcome)
    }

    /// Drive a started sweep to completion on a virtual clock. Returns the
    /// number of ticks handled.
    pub fn run_sweep(&mut self, clock: &mut VirtualScheduler) -> LabResult<usize> {
        let mut ticks = 0;
        while self.is_sweeping() {
            let Some(timer) = clock.advance_to_next() else {
                break;
            };
            if self.on_timer(timer, clock)? != TickOutcome::Ignored {
                ticks += 1;
            }
        }
        Ok(ticks)
    }

    /// Stop any sweep, clear the series and restore default controls.
    pub fn reset(&mut self, scheduler: &mut dyn Scheduler) -> LabResult<()> {
        self.driver.stop(scheduler);
        self.clear_tables();
        self.controls.reset();
        self.model.adjust_controls(&mut self.controls)
    }

    fn clear_tables(&mut self) {
        self.series.clear();
        if let Some(companion) = &mut self.companion {
            companion.clear();
        }
    }

    pub fn summary(&self) -> LabResult<Vec<Reading>> {
        self.model.summary(&self.series, &self.controls)
    }

    /// Header plus one line per recorded point.
    pub fn export_csv(&self) -> LabResult<String> {
        Ok(CsvTable::new(&self.series).to_csv_string()?)
    }

    /// As [`Bench::export_csv`], followed by one row per summary value.
    pub fn export_csv_with_summary(&self) -> LabResult<String> {
        let mut table = CsvTable::new(&self.series);
        for reading in self.summary()? {
            table = table.with_summary_row(reading.label, reading.value_string());
        }
        Ok(table.to_csv_string()?)
    }

    pub fn export_filename(&self) -> String {
        self.id().export_filename()
    }

    /// Companion table as CSV.
    pub fn export_companion_csv(&self) -> LabResult<String> {
        let series = self.companion_series()?;
        Ok(CsvTable::new(series).to_csv_string()?)
    }

    /// `<stem>_<companion>_data.csv`
    pub fn companion_filename(&self) -> LabResult<String> {
        let companion = self.companion.as_ref().ok_or_else(|| self.no_companion())?;
        Ok(format!("{}_{}_data.csv", self.id().file_stem(), companion.name))
    }

    /// Chart points for two columns named by header.
    pub fn chart(&self, x_header: &str, y_header: &str) -> LabResult<Vec<ChartPoint>> {
        self.chart_from(ChartSource::Series, x_header, y_header)
    }

    /// Chart points as pretty-printed JSON.
    pub fn chart_json(&self, x_header: &str, y_header: &str) -> LabResult<String> {
        self.chart_json_from(ChartSource::Series, x_header, y_header)
    }

    pub fn chart_from(
        &self,
        source: ChartSource<'_>,
        x_header: &str,
        y_header: &str,
    ) -> LabResult<Vec<ChartPoint>> {
        let table = self.table(source)?;
        let x = column(&table, x_header)?;
        let y = column(&table, y_header)?;
        Ok(table.chart_points(x, y)?)
    }

    pub fn chart_json_from(
        &self,
        source: ChartSource<'_>,
        x_header: &str,
        y_header: &str,
    ) -> LabResult<String> {
        let table = self.table(source)?;
        let x = column(&table, x_header)?;
        let y = column(&table, y_header)?;
        Ok(table.chart_json(x, y)?)
    }

    /// Points of one curve: those whose key column `key_header` matches
    /// `value` within the column's tolerance.
    pub fn curve_series(&self, key_header: &str, value: f64) -> LabResult<Series> {
        let key = column(&self.series, key_header)?;
        Ok(self.series.filtered_by(key, value)?)
    }

    fn table(&self, source: ChartSource<'_>) -> LabResult<Cow<'_, Series>> {
        match source {
            ChartSource::Series => Ok(Cow::Borrowed(&self.series)),
            ChartSource::Curve { key_header, value } => {
                Ok(Cow::Owned(self.curve_series(key_header, value)?))
            }
            ChartSource::Companion => self.companion_series().map(Cow::Borrowed),
        }
    }

    fn companion_series(&self) -> LabResult<&Series> {
        self.companion().ok_or_else(|| self.no_companion())
    }

    fn no_companion(&self) -> LabError {
        LabError::NoCompanion {
            experiment: self.id().to_string(),
        }
    }

    /// Current value of every control, for display.
    pub fn settings(&self) -> Vec<(&'static str, ControlValue)> {
        self.controls.values().collect()
    }
}

fn column(series: &Series, header: &str) -> LabResult<usize> {
    series
        .layout()
        .column_index(header)
        .ok_or_else(|| LabError::UnknownColumn {
            header: header.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::ControlSpec;
    use sl_series::{Column, SeriesLayout};
    use sl_sweep::SweepPlan;
    use std::time::Duration;

    fn bench(id: ExperimentId) -> Bench {
        Bench::new(id, &LabConfig::default()).unwrap()
    }

    #[test]
    fn record_upserts_by_key() {
        let mut hall = bench(ExperimentId::HallCoefficient);
        let first = hall.record().unwrap();
        assert!(matches!(first[..], [UpsertOutcome::Inserted(0)]));
        let again = hall.record().unwrap();
        assert!(matches!(again[..], [UpsertOutcome::Replaced(0)]));
        hall.set("field_t", "1.0").unwrap();
        hall.record().unwrap();
        assert_eq!(hall.series().len(), 2);
    }

    #[test]
    fn curve_replaces_series() {
        let mut mobility = bench(ExperimentId::CarrierMobility);
        mobility.set("temperature_k", "333").unwrap();
        mobility.record().unwrap();
        assert_eq!(mobility.generate_curve().unwrap(), 21);
        let temps = mobility.series().column(0).unwrap();
        assert!(!temps.contains(&335.0));
    }

    #[test]
    fn experiments_without_curve_or_sweep_say_so() {
        let mut hall = bench(ExperimentId::HallCoefficient);
        let curve = hall.generate_curve();
        assert!(matches!(curve, Err(LabError::NoCurve { .. })));
        let mut clock = VirtualScheduler::new();
        let sweep = hall.start_sweep(&mut clock);
        assert!(matches!(sweep, Err(LabError::NoSweep { .. })));
    }

    #[test]
    fn sweep_records_every_step_then_idles() {
        let mut ldr = bench(ExperimentId::LdrCharacteristics);
        ldr.set("voltage_v", "8").unwrap();
        let mut clock = VirtualScheduler::new();
        ldr.start_sweep(&mut clock).unwrap();
        assert!(ldr.series().is_empty());
        // 8.0, 8.5, ..., 10.0
        assert_eq!(ldr.run_sweep(&mut clock).unwrap(), 5);
        assert!(!ldr.is_sweeping());
        let voltages = ldr.series().column(0).unwrap();
        assert_eq!(voltages, vec![8.0, 8.5, 9.0, 9.5, 10.0]);
        assert_eq!(ldr.controls().number("voltage_v").unwrap(), 10.0);
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn reset_clears_everything() {
        let mut ldr = bench(ExperimentId::LdrCharacteristics);
        let mut clock = VirtualScheduler::new();
        ldr.set("voltage_v", "2").unwrap();
        ldr.record().unwrap();
        ldr.start_sweep(&mut clock).unwrap();
        clock.advance(Duration::from_millis(500));
        ldr.reset(&mut clock).unwrap();
        assert!(!ldr.is_sweeping());
        assert!(ldr.series().is_empty());
        assert_eq!(ldr.controls().number("voltage_v").unwrap(), 5.0);
        assert!(clock.advance(Duration::from_secs(5)).is_empty());
    }

    /// Records fine below `x = 2`, then hands back points with a missing
    /// column.
    #[derive(Debug)]
    struct ShortRowModel;

    impl ExperimentModel for ShortRowModel {
        fn id(&self) -> ExperimentId {
            ExperimentId::LdrCharacteristics
        }

        fn controls(&self) -> Vec<ControlSpec> {
            vec![ControlSpec::range("x", "X", "", (0.0, 10.0, 1.0), 0.0)]
        }

        fn layout(&self) -> LabResult<SeriesLayout> {
            let columns = vec![Column::key("x", 0.5), Column::value("y")];
            Ok(SeriesLayout::new(columns, 0)?)
        }

        fn readout(&self, _controls: &ControlState) -> LabResult<Vec<Reading>> {
            Ok(Vec::new())
        }

        fn measure(&self, controls: &ControlState) -> LabResult<Vec<MeasurementPoint>> {
            let x = controls.number("x")?;
            let fields = if x < 2.0 { vec![x, x * x] } else { vec![x] };
            Ok(vec![MeasurementPoint::new(fields)])
        }

        fn sweep_plan(&self, _controls: &ControlState) -> LabResult<Option<SweepPlan>> {
            let plan = SweepPlan::new("x", 1.0, 10.0, Duration::from_secs(1))?;
            Ok(Some(plan))
        }
    }

    #[test]
    fn failed_recording_does_not_advance_sweep() {
        let mut bench = Bench::with_model(Box::new(ShortRowModel), &LabConfig::default()).unwrap();
        let mut clock = VirtualScheduler::new();
        bench.start_sweep(&mut clock).unwrap();
        let mut fired = Vec::new();
        let err = loop {
            let timer = clock.advance_to_next().unwrap();
            match bench.on_timer(timer, &mut clock) {
                Ok(outcome) => fired.push(outcome),
                Err(err) => break err,
            }
        };
        assert!(matches!(err, LabError::Series(_)));
        assert_eq!(fired.len(), 2);
        assert!(bench.is_sweeping());
        assert_eq!(bench.sweep_position(), Some(2.0));
        assert_eq!(bench.controls().number("x").unwrap(), 2.0);
        assert_eq!(bench.series().column(0).unwrap(), vec![0.0, 1.0]);
    }

    #[test]
    fn companion_follows_records_and_reset() {
        let mut ldr = bench(ExperimentId::LdrCharacteristics);
        for (volts, intensity) in [("1", "70"), ("2", "20"), ("3", "70"), ("1", "45")] {
            ldr.set("voltage_v", volts).unwrap();
            ldr.set("intensity_pct", intensity).unwrap();
            ldr.record().unwrap();
        }
        let table = ldr.companion().unwrap();
        assert_eq!(table.column(0).unwrap(), vec![20.0, 45.0, 70.0]);
        let resistance = table.column(1).unwrap();
        assert!(resistance.windows(2).all(|w| w[0] > w[1]));
        assert_eq!(ldr.companion_filename().unwrap(), "ldr_resistance_data.csv");
        let csv = ldr.export_companion_csv().unwrap();
        assert_eq!(csv.lines().count(), 4);

        ldr.reset(&mut VirtualScheduler::new()).unwrap();
        assert!(ldr.companion().unwrap().is_empty());
    }

    #[test]
    fn experiments_without_companion_say_so() {
        let hall = bench(ExperimentId::HallCoefficient);
        assert!(hall.companion().is_none());
        let filename = hall.companion_filename();
        assert!(matches!(filename, Err(LabError::NoCompanion { .. })));
        let source = ChartSource::Companion;
        let chart = hall.chart_from(source, "Magnetic Field (T)", "Hall Voltage (mV)");
        assert!(matches!(chart, Err(LabError::NoCompanion { .. })));
    }

    #[test]
    fn curve_chart_isolates_one_intensity() {
        let mut ldr = bench(ExperimentId::LdrCharacteristics);
        for intensity in ["30", "70"] {
            ldr.set("intensity_pct", intensity).unwrap();
            for volts in ["1", "2"] {
                ldr.set("voltage_v", volts).unwrap();
                ldr.record().unwrap();
            }
        }
        // the unfiltered feed interleaves both curves
        let all = ldr.chart("Voltage (V)", "Current (mA)").unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(all[0].x, all[1].x);

        let dim = ChartSource::Curve {
            key_header: "Light Intensity (%)",
            value: 30.0,
        };
        let curve = ldr.chart_from(dim, "Voltage (V)", "Current (mA)").unwrap();
        let xs: Vec<f64> = curve.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![1.0, 2.0]);
        assert!(curve[0].y < all[1].y);

        let by_current = ChartSource::Curve {
            key_header: "Current (mA)",
            value: 0.0,
        };
        let err = ldr.chart_from(by_current, "Voltage (V)", "Current (mA)");
        assert!(matches!(err, Err(LabError::Series(_))));
    }

    #[test]
    fn chart_rejects_unknown_header() {
        let hall = bench(ExperimentId::HallCoefficient);
        assert!(matches!(
            hall.chart("Magnetic Field (T)", "Voltage"),
            Err(LabError::UnknownColumn { .. })
        ));
        let empty = hall.chart("Magnetic Field (T)", "Hall Voltage (mV)").unwrap();
        assert!(empty.is_empty());
    }
}
