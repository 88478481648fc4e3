//! End-to-end checks of the report pipeline through the public API.

use ti_core::analysis::{AdvantageLevel, Formation, MapControlStatus};
use ti_core::{IntelConfig, PlayerPositionSample, ReportAggregator, Side, Vec3};

fn sample(side: Side, health: f64, x: f64, y: f64) -> PlayerPositionSample {
    PlayerPositionSample {
        side,
        health,
        armor: 50.0,
        position: Vec3::new(x, y, 16.0),
        velocity: Vec3::default(),
        flash_duration: 0.0,
        tick: 23040,
        round_number: 14,
        player_id: format!("{}:{}:{}", side, x, y),
        player_name: "player".to_string(),
    }
}

#[test]
fn five_full_health_t_against_three_damaged_ct() {
    let mut samples: Vec<_> = (0..5).map(|i| sample(Side::T, 100.0, -1200.0 + i as f64 * 60.0, 300.0)).collect();
    samples.extend((0..3).map(|i| sample(Side::Ct, 40.0, 900.0 + i as f64 * 400.0, -200.0)));

    let report = ReportAggregator::new(IntelConfig::default()).build_report(&samples);
    let advantage = &report.tactical_advantage;

    assert!((advantage.t_score - 185.0).abs() < 1e-9);
    assert!((advantage.ct_score - 99.0).abs() < 1e-9);
    assert_eq!(advantage.advantage, AdvantageLevel::TStrong);
    assert_eq!(advantage.confidence, 95.0);
}

#[test]
fn single_close_pair_is_one_contested_area() {
    let samples = vec![
        sample(Side::T, 100.0, 0.0, 0.0),
        sample(Side::Ct, 100.0, 0.0, 700.0),
        sample(Side::T, 100.0, -4000.0, 0.0),
        sample(Side::T, 100.0, -4000.0, -3000.0),
        sample(Side::Ct, 100.0, 4000.0, 2000.0),
    ];
    let report = ReportAggregator::default().build_report(&samples);
    assert_eq!(report.map_control.contested_areas, 1);
    assert_eq!(report.map_control.t_control + report.map_control.ct_control, 100.0);
}

#[test]
fn individual_iff_one_alive_teammate() {
    let samples = vec![
        sample(Side::T, 100.0, 0.0, 0.0),
        sample(Side::T, 0.0, 10.0, 0.0),
        sample(Side::Ct, 100.0, 2000.0, 0.0),
        sample(Side::Ct, 100.0, 2010.0, 0.0),
    ];
    let report = ReportAggregator::default().build_report(&samples);
    assert_eq!(report.formations.t_side.formation, Formation::Individual);
    assert_eq!(report.formations.ct_side.formation, Formation::TightStack);
}

#[test]
fn all_dead_snapshot_still_splits_control_evenly() {
    let samples = vec![sample(Side::T, 0.0, 0.0, 0.0), sample(Side::Ct, 0.0, 100.0, 0.0)];
    let report = ReportAggregator::default().build_report(&samples);
    assert_eq!(report.map_control.status, MapControlStatus::Balanced);
    assert_eq!(report.map_control.t_control, 50.0);
    assert_eq!(report.formations.t_side.formation, Formation::Unknown);
}

#[test]
fn nan_coordinates_propagate_instead_of_failing() {
    let samples = vec![
        sample(Side::T, 100.0, f64::NAN, 0.0),
        sample(Side::T, 100.0, 10.0, 0.0),
        sample(Side::Ct, 100.0, 500.0, 0.0),
    ];
    let result = ReportAggregator::default().analyze(&samples).unwrap();
    assert!(result.report.formations.t_side.spread.is_nan());
    assert_eq!(result.data_points, 3);
}

#[test]
fn report_is_independent_of_sample_order() {
    let mut samples: Vec<_> = (0..4).map(|i| sample(Side::T, 90.0, i as f64 * 150.0, 40.0)).collect();
    samples.extend((0..4).map(|i| sample(Side::Ct, 70.0, 1500.0, i as f64 * 220.0)));
    let aggregator = ReportAggregator::default();

    let forward = aggregator.build_report(&samples);
    samples.reverse();
    let reversed = aggregator.build_report(&samples);

    assert_eq!(forward.tactical_advantage, reversed.tactical_advantage);
    assert_eq!(forward.execute_timing, reversed.execute_timing);
    assert_eq!(forward.map_control, reversed.map_control);
    assert!((forward.confidence - reversed.confidence).abs() < 1e-9);
}
