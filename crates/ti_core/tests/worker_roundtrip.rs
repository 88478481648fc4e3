use std::time::Duration;

use jsonschema::JSONSchema;
use ti_core::{
    report_schema, AsyncComputeHost, IntelConfig, PlayerPositionSample, Side, Vec3, WorkerRequest,
    WorkerResponse,
};

fn snapshot(n: usize) -> Vec<PlayerPositionSample> {
    (0..n)
        .map(|i| PlayerPositionSample {
            side: if i % 2 == 0 { Side::T } else { Side::Ct },
            health: 100.0 - (i % 5) as f64 * 15.0,
            armor: 100.0,
            position: Vec3::new(i as f64 * 37.0, (i % 7) as f64 * 90.0, 0.0),
            velocity: Vec3::new((i % 3) as f64 * 90.0, 40.0, 0.0),
            flash_duration: 0.0,
            tick: 1000 + i as u64,
            round_number: 9,
            player_id: i.to_string(),
            player_name: format!("p{}", i),
        })
        .collect()
}

#[test]
fn worker_round_trip_keeps_every_sample() {
    let mut host = AsyncComputeHost::spawn(IntelConfig::default()).unwrap();

    for n in [0usize, 1, 10, 250] {
        let id = host.post(WorkerRequest::analyze(snapshot(n))).unwrap();
        let response = host
            .recv_timeout(Duration::from_secs(10))
            .unwrap()
            .expect("worker replied");
        assert_eq!(response.request_id(), id);
        assert_eq!(response.into_result().unwrap().data_points, n);
    }
}

#[test]
fn reply_survives_json_boundary() {
    let mut host = AsyncComputeHost::spawn(IntelConfig::default()).unwrap();
    let request = serde_json::to_string(&WorkerRequest::analyze(snapshot(12))).unwrap();
    host.post(serde_json::from_str(&request).unwrap()).unwrap();

    let response = host.recv().unwrap();
    let wire = serde_json::to_string(&response).unwrap();
    let decoded: WorkerResponse = serde_json::from_str(&wire).unwrap();
    assert_eq!(decoded.result().unwrap().data_points, 12);
}

#[test]
fn report_matches_exported_schema() {
    let schema_value = report_schema();
    let schema = JSONSchema::compile(&schema_value).expect("schema compiles");

    let mut host = AsyncComputeHost::spawn(IntelConfig::default()).unwrap();
    host.submit(snapshot(20)).unwrap();
    let result = host.recv().unwrap().into_result().unwrap();
    let instance = serde_json::to_value(&result).unwrap();

    assert!(schema.is_valid(&instance));
}
