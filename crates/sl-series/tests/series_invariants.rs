use proptest::prelude::*;
use sl_series::*;

fn layout(tolerance: f64) -> SeriesLayout {
    SeriesLayout::new(
        vec![
            Column::key("x", tolerance),
            Column::value("y").with_format(NumberFormat::Fixed(3)),
            Column::value("z").with_format(NumberFormat::Exponential(2)),
        ],
        0,
    )
    .unwrap()
}

proptest! {
    #[test]
    fn upserts_keep_series_sorted_and_distinct(
        xs in prop::collection::vec(-100.0f64..100.0, 0..60),
        tolerance in 0.05f64..5.0,
    ) {
        let mut series = Series::new(layout(tolerance));
        for (i, x) in xs.iter().enumerate() {
            let before = series.len();
            let outcome = series.upsert(vec![*x, i as f64, 0.0]).unwrap();
            match outcome {
                UpsertOutcome::Inserted(_) => prop_assert_eq!(series.len(), before + 1),
                UpsertOutcome::Replaced(_) => prop_assert_eq!(series.len(), before),
            }
        }
        let keys = series.column(0).unwrap();
        for pair in keys.windows(2) {
            prop_assert!(pair[0] <= pair[1]);
            prop_assert!(pair[1] - pair[0] >= tolerance);
        }
    }

    #[test]
    fn upsert_replaces_iff_within_band(
        xs in prop::collection::vec(-50.0f64..50.0, 1..30),
        probe in -50.0f64..50.0,
    ) {
        let tolerance = 1.0;
        let mut series = Series::new(layout(tolerance));
        for x in &xs {
            series.upsert(vec![*x, 0.0, 0.0]).unwrap();
        }
        let near = series.iter().any(|p| (p.fields[0] - probe).abs() < tolerance);
        let outcome = series.upsert(vec![probe, 1.0, 1.0]).unwrap();
        prop_assert_eq!(matches!(outcome, UpsertOutcome::Replaced(_)), near);
    }

    #[test]
    fn export_has_one_line_per_point_plus_header(
        xs in prop::collection::vec(0.0f64..1000.0, 0..40),
    ) {
        let mut series = Series::new(layout(0.5));
        for x in &xs {
            series.upsert(vec![*x, x.sqrt(), x * 1e-6]).unwrap();
        }
        let csv = series.to_csv().unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        prop_assert_eq!(lines.len(), series.len() + 1);
        let width = lines[0].split(',').count();
        for line in &lines {
            prop_assert_eq!(line.split(',').count(), width);
        }
    }
}

#[test]
fn replacement_keeps_stored_key() {
    let mut series = Series::new(layout(1.0));
    series.upsert(vec![10.0, 1.0, 1.0]).unwrap();
    series.upsert(vec![10.9, 2.0, 2.0]).unwrap();
    // 11.8 is within band of the new value but not of the stored one
    let outcome = series.upsert(vec![11.8, 3.0, 3.0]).unwrap();
    assert_eq!(outcome, UpsertOutcome::Inserted(1));
    assert_eq!(series.column(0).unwrap(), vec![10.0, 11.8]);
}
