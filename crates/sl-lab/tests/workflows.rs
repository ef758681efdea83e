use proptest::prelude::*;
use sl_core::Catalog;
use sl_lab::experiments::ldr::INTENSITY_COLUMN;
use sl_lab::experiments::xrd::TWO_THETA_COLUMN;
use sl_lab::{Bench, ExperimentId, LabConfig};
use sl_series::UpsertOutcome;
use sl_sweep::{Scheduler, TickOutcome, VirtualScheduler};
use std::time::Duration;

fn bench(id: ExperimentId) -> Bench {
    Bench::new(id, &LabConfig::default()).unwrap()
}

#[test]
fn silicon_resistance_at_room_temperature() {
    let mut band_gap = bench(ExperimentId::BandGap);
    band_gap.record().unwrap();
    let r = band_gap.series().points()[0].fields[1];
    assert!((r / 2.556e7 - 1.0).abs() < 1e-3, "R = {r}");
}

#[test]
fn band_gap_sweep_recovers_gap() {
    let mut band_gap = bench(ExperimentId::BandGap);
    let mut clock = VirtualScheduler::new();
    band_gap.start_sweep(&mut clock).unwrap();
    let ticks = band_gap.run_sweep(&mut clock).unwrap();

    // 300, 320, ..., 500 K
    assert_eq!(ticks, 11);
    assert_eq!(band_gap.series().len(), 11);
    assert_eq!(clock.now(), Duration::from_secs(11));

    let summary = band_gap.summary().unwrap();
    let eg = summary[0].number().unwrap();
    assert!((eg - 1.12).abs() < 1e-3, "Eg = {eg}");

    let deviation = summary[1].number().unwrap();
    assert!(deviation < 0.1, "deviation = {deviation} %");

    let csv = band_gap.export_csv_with_summary().unwrap();
    let tail: Vec<&str> = csv.lines().rev().take(2).collect();
    assert!(tail[1].starts_with("Calculated Band Gap (eV)"));
    assert!(tail[0].starts_with("Deviation (%)"));
}

#[test]
fn stop_before_first_tick_leaves_series_alone() {
    let mut band_gap = bench(ExperimentId::BandGap);
    band_gap.record().unwrap();
    let before = band_gap.series().clone();

    let mut clock = VirtualScheduler::new();
    let timer = band_gap.start_sweep(&mut clock).unwrap();
    assert!(band_gap.stop_sweep(&mut clock));
    assert!(clock.advance(Duration::from_secs(30)).is_empty());
    assert_eq!(
        band_gap.on_timer(timer, &mut clock).unwrap(),
        TickOutcome::Ignored
    );
    assert_eq!(band_gap.series(), &before);
}

#[test]
fn second_start_while_running_is_rejected() {
    let mut ldr = bench(ExperimentId::LdrCharacteristics);
    let mut clock = VirtualScheduler::new();
    ldr.start_sweep(&mut clock).unwrap();
    assert!(ldr.start_sweep(&mut clock).is_err());
    assert_eq!(clock.pending(), 1);
}

#[test]
fn export_has_header_and_one_line_per_point() {
    let mut diode = bench(ExperimentId::DiodeIv);
    let n = diode.generate_curve().unwrap();
    let csv = diode.export_csv().unwrap();
    assert_eq!(csv.lines().count(), n + 1);
    assert_eq!(
        csv.lines().next().unwrap(),
        "Voltage (V),Current (A),Resistance (Ω)"
    );
    assert_eq!(diode.export_filename(), "diode_iv_data.csv");
}

#[test]
fn ldr_series_filters_by_intensity() {
    let mut ldr = bench(ExperimentId::LdrCharacteristics);
    for intensity in ["30", "70"] {
        ldr.set("intensity_pct", intensity).unwrap();
        for volts in ["1", "2", "3"] {
            ldr.set("voltage_v", volts).unwrap();
            let outcomes = ldr.record().unwrap();
            assert!(matches!(outcomes[..], [UpsertOutcome::Inserted(_)]));
        }
    }
    assert_eq!(ldr.series().len(), 6);

    let dim = ldr.series().filtered_by(INTENSITY_COLUMN, 30.0).unwrap();
    assert_eq!(dim.len(), 3);
    assert!(dim.iter().all(|p| p.fields[INTENSITY_COLUMN] == 30.0));
    assert!(ldr.series().filtered_by(1, 0.1).is_err());
}

#[test]
fn body_centered_pattern_obeys_extinction() {
    let mut xrd = bench(ExperimentId::XrayDiffraction);
    xrd.set("lattice_type", "bcc").unwrap();
    let n = xrd.generate_curve().unwrap();
    assert!(n > 0);
    for p in xrd.series() {
        let sum = p.fields[0] + p.fields[1] + p.fields[2];
        assert_eq!(sum % 2.0, 0.0);
    }
    let angles = xrd.series().column(TWO_THETA_COLUMN).unwrap();
    assert!(angles.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn config_defaults_seed_the_controls() {
    let yaml = "defaults:\n  band-gap:\n    material: germanium\n    temperature_k: 250\n";
    let config: LabConfig = serde_yaml::from_str(yaml).unwrap();
    config.validate().unwrap();
    let band_gap = Bench::new(ExperimentId::BandGap, &config).unwrap();
    assert_eq!(band_gap.controls().number("temperature_k").unwrap(), 250.0);

    let mut clock = VirtualScheduler::new();
    let mut band_gap = band_gap;
    band_gap.start_sweep(&mut clock).unwrap();
    // germanium tops out at 400 K: 250, 270, ..., 390
    assert_eq!(band_gap.run_sweep(&mut clock).unwrap(), 8);
}

#[test]
fn every_experiment_builds_and_reads_out() {
    for id in ExperimentId::ALL {
        let bench = bench(*id);
        assert_eq!(bench.id(), *id);
        bench.readout().unwrap();
        assert!(bench.export_csv().unwrap().ends_with('\n'));
    }
}

#[test]
fn ldr_resistance_curve_follows_intensity() {
    let mut ldr = bench(ExperimentId::LdrCharacteristics);
    for intensity in ["60", "15", "35"] {
        ldr.set("intensity_pct", intensity).unwrap();
        for volts in ["1", "4"] {
            ldr.set("voltage_v", volts).unwrap();
            ldr.record().unwrap();
        }
    }
    assert_eq!(ldr.series().len(), 6);
    let curve = ldr.companion().unwrap();
    assert_eq!(curve.column(0).unwrap(), vec![15.0, 35.0, 60.0]);
    let resistance = curve.column(1).unwrap();
    assert!(resistance.windows(2).all(|w| w[0] > w[1]));

    let csv = ldr.export_companion_csv().unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("Light Intensity (%),Resistance (kΩ)"));
    assert_eq!(lines.count(), 3);
}

proptest! {
    #[test]
    fn recorded_series_stay_sorted_and_distinct(
        settings in prop::collection::vec((0u32..=100, 1u32..=100), 1..40)
    ) {
        let mut ldr = bench(ExperimentId::LdrCharacteristics);
        for (tenths, intensity) in settings {
            ldr.set_number("voltage_v", f64::from(tenths) / 10.0).unwrap();
            ldr.set_number("intensity_pct", f64::from(intensity)).unwrap();
            ldr.record().unwrap();
        }

        let points = ldr.series().points();
        let key = |i: usize| (points[i].fields[0], points[i].fields[INTENSITY_COLUMN]);
        for i in 1..points.len() {
            prop_assert!(key(i - 1) <= key(i));
        }
        for i in 0..points.len() {
            for j in i + 1..points.len() {
                let (vi, ei) = key(i);
                let (vj, ej) = key(j);
                prop_assert!((vi - vj).abs() >= 0.1 || (ei - ej).abs() >= 1.0);
            }
        }

        let intensities = ldr.companion().unwrap().column(0).unwrap();
        prop_assert!(intensities.windows(2).all(|w| w[1] - w[0] >= 1.0));
    }
}
