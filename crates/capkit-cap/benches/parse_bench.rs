use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use capkit_cap::{from_json, parse_alert, to_json, Alert, MsgType};

const MINIMAL_CAP: &str = r#"<alert xmlns="urn:oasis:names:tc:emergency:cap:1.2">
  <identifier>KSTO1055887203</identifier>
  <sender>KSTO@NWS.NOAA.GOV</sender>
  <sent>2003-06-17T14:57:00-07:00</sent>
  <status>Actual</status>
  <msgType>Alert</msgType>
  <scope>Public</scope>
</alert>"#;

const UPDATE_CAP: &str = include_str!("../tests/fixtures/update_alert.xml");

fn create_bench_alert() -> Alert {
    let mut alert = Alert::new();
    alert.identifier = "BENCH-001".to_string();
    alert.sender = "bench@example.com".to_string();
    alert.sent = "2024-01-15T10:30:00+00:00".to_string();
    alert.msg_type = MsgType::Update;
    alert.note = "Flooding & debris on <Route 9>".to_string();

    let info = alert.add_info();
    info.event = "Flood".to_string();
    info.add_category("Met");
    info.add_response_type("Evacuate");
    info.add_parameter("WMOHEADER", "WWUS75");
    let area = info.add_area("Riverside County");
    area.add_polygon("38.47,-120.14 38.34,-119.95 38.52,-119.74 38.62,-119.89 38.47,-120.14");
    area.add_geocode("FIPS6", "006065");
    alert
}

fn bench_xml_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("xml_parsing");

    group.bench_function("minimal_cap", |b| {
        b.iter(|| parse_alert(black_box(MINIMAL_CAP)))
    });

    group.bench_function("update_cap", |b| {
        b.iter(|| parse_alert(black_box(UPDATE_CAP)))
    });

    group.finish();
}

fn bench_xml_serialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("xml_serialization");

    let alert = create_bench_alert();
    group.bench_function("serialize", |b| {
        b.iter(|| black_box(alert.clone()).to_xml())
    });

    group.bench_function("roundtrip", |b| {
        b.iter(|| {
            let mut parsed = parse_alert(black_box(UPDATE_CAP)).unwrap();
            parsed.to_xml()
        })
    });

    group.finish();
}

fn bench_comparison(c: &mut Criterion) {
    let mut group = c.benchmark_group("xml_vs_json");

    let alert = parse_alert(UPDATE_CAP).unwrap();
    let json = to_json(&alert).unwrap();

    group.bench_with_input(
        BenchmarkId::new("xml_parse", "update"),
        &UPDATE_CAP,
        |b, xml| b.iter(|| parse_alert(black_box(xml))),
    );

    group.bench_with_input(
        BenchmarkId::new("json_parse", "update"),
        &json,
        |b, data| b.iter(|| from_json(black_box(data))),
    );

    group.finish();
}

criterion_group!(benches, bench_xml_parsing, bench_xml_serialization, bench_comparison);
criterion_main!(benches);
