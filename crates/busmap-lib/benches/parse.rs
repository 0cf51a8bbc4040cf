use std::fmt::Write;
use std::hint::black_box;

use busmap_lib::{Document, Session};
use criterion::{criterion_group, criterion_main, Criterion};

/// Build a request document with `stops` stops and one long bus route.
fn synthetic_document(stops: usize) -> String {
    let mut base = String::new();
    for index in 0..stops {
        let _ = write!(
            base,
            r#"{{"type": "Stop", "name": "stop {index}", "latitude": {lat}, "longitude": {lng}}},"#,
            lat = 43.0 + index as f64 * 0.001,
            lng = 39.0 + index as f64 * 0.002,
        );
    }
    let stop_names: Vec<String> = (0..stops).map(|index| format!("\"stop {index}\"")).collect();
    format!(
        r#"{{"base_requests": [{base}{{"type": "Bus", "name": "1", "stops": [{stops}], "is_roundtrip": true}}], "stat_requests": [{{"id": 1, "type": "Bus", "name": "1"}}]}}"#,
        stops = stop_names.join(", ")
    )
}

fn benchmark_parse(c: &mut Criterion) {
    let document = synthetic_document(500);

    c.bench_function("parse_document_500_stops", |b| {
        b.iter(|| {
            let parsed = Document::parse(&document).expect("document parses");
            black_box(parsed.root().kind())
        });
    });

    c.bench_function("process_requests_500_stops", |b| {
        b.iter(|| {
            let session = Session::from_input(&document).expect("document processes");
            black_box(session.answer_stats().to_string().len())
        });
    });
}

criterion_group!(benches, benchmark_parse);
criterion_main!(benches);
