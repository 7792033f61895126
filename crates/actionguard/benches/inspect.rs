use actionguard::{inspect, ValueTree};
use codspeed_criterion_compat::{criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::{json, Value};

fn payloads() -> Vec<(&'static str, Value)> {
    vec![
        ("clean_flat", json!({"name": "Alice", "age": 30, "tags": ["a", "b", "c"]})),
        (
            "clean_nested",
            (0..10).fold(json!({"leaf": "value"}), |inner, _| {
                json!({ "level": inner, "items": [1, 2, 3] })
            }),
        ),
        (
            "hostile",
            json!({
                "a": {"__proto__": {"x": 1}},
                "b": "token $B42 seen",
                "c": {"_response": {"d": "new Function('x')"}},
            }),
        ),
    ]
}

fn bench_screen(c: &mut Criterion) {
    for (name, payload) in payloads() {
        let raw = payload.to_string();
        c.bench_with_input(BenchmarkId::new("screen", name), &raw, |b, raw| {
            b.iter(|| {
                let _ = actionguard::screen_payload(raw, "0");
            })
        });
    }
}

fn bench_inspect(c: &mut Criterion) {
    for (name, payload) in payloads() {
        let tree = ValueTree::from_json(&payload);
        c.bench_with_input(BenchmarkId::new("inspect", name), &tree, |b, tree| {
            b.iter_with_large_drop(|| inspect(tree))
        });
    }
}

criterion_group!(benches, bench_screen, bench_inspect);
criterion_main!(benches);
