/// Benchmark runner for the host bridge.
///
/// Times cursor walks over live collections, both directly and through
/// registry dispatch, plus the `Performance` members.

extern crate hostbridge;

use hostbridge::runner::ds::collection::ElementCollection;
use hostbridge::runner::ds::object::object_from_entries;
use hostbridge::runner::ds::value::{JsNumberType, JsValue};
use hostbridge::runner::host::enumerator::Enumerator;
use hostbridge::runner::host::performance::Performance;
use hostbridge::runner::plugin::registry::BuiltInRegistry;
use hostbridge::runner::plugin::types::EvalContext;
use hostbridge::runner::profile::{CapabilitySet, ClientProfile};
use std::time::{Duration, Instant};

fn legacy() -> CapabilitySet {
    CapabilitySet::for_profile(ClientProfile::Ie)
}

fn collection(len: usize, objects: bool) -> JsValue {
    let values = (0..len)
        .map(|i| {
            if objects {
                JsValue::Object(object_from_entries(vec![(
                    "index".to_string(),
                    JsValue::Number(JsNumberType::Integer(i as i64)),
                )]))
            } else {
                JsValue::Number(JsNumberType::Integer(i as i64))
            }
        })
        .collect();
    JsValue::Object(ElementCollection::from_values(values).into_handle())
}

/// Walk the collection with the cursor API directly.
fn bench_direct_walk(len: usize, objects: bool, iterations: u32) -> (Duration, usize) {
    let source = collection(len, objects);
    let caps = legacy();
    let mut seen = 0;
    let start = Instant::now();
    for _ in 0..iterations {
        let mut e = Enumerator::construct(&source, &caps).unwrap_or_else(|_| Enumerator::empty());
        e.move_first();
        while !e.at_end() {
            if !e.item().is_undefined() {
                seen += 1;
            }
            e.move_next();
        }
    }
    (start.elapsed(), seen)
}

/// Walk the collection through registry method dispatch.
fn bench_dispatched_walk(len: usize, iterations: u32) -> (Duration, usize) {
    let source = collection(len, true);
    let caps = legacy();
    let mut ctx = EvalContext::with_capabilities(caps.clone());
    ctx.install_host_builtins(BuiltInRegistry::for_capabilities(&caps));
    let mut seen = 0;
    let start = Instant::now();
    for _ in 0..iterations {
        let cursor = match ctx.construct("Enumerator", vec![source.clone()]) {
            Some(Ok(c)) => c,
            _ => break,
        };
        while let Some(Ok(JsValue::Boolean(false))) = ctx.invoke(&cursor, "atEnd", vec![]) {
            if let Some(Ok(JsValue::Object(_))) = ctx.invoke(&cursor, "item", vec![]) {
                seen += 1;
            }
            let _ = ctx.invoke(&cursor, "moveNext", vec![]);
        }
    }
    (start.elapsed(), seen)
}

fn bench_performance(iterations: u32) -> (Duration, usize) {
    let mut perf = Performance::new(CapabilitySet::default());
    let mut reads = 0;
    let start = Instant::now();
    for _ in 0..iterations {
        if perf.now().is_some() {
            reads += 1;
        }
        if perf.timing(None).is_some() {
            reads += 1;
        }
        if perf.navigation(None).is_some() {
            reads += 1;
        }
    }
    (start.elapsed(), reads)
}

fn main() {
    println!("=======================================================");
    println!("  hostbridge - Host Object Benchmarks");
    println!("=======================================================\n");

    println!("{:<36} {:>14} {:>12}", "Benchmark", "Time", "Ops");
    println!("{}", "-".repeat(64));

    let runs: Vec<(&str, (Duration, usize))> = vec![
        ("Direct walk, 1K primitives x100", bench_direct_walk(1_000, false, 100)),
        ("Direct walk, 1K objects x100", bench_direct_walk(1_000, true, 100)),
        ("Dispatched walk, 1K objects x20", bench_dispatched_walk(1_000, 20)),
        ("Performance members x10K", bench_performance(10_000)),
    ];

    let mut total = Duration::ZERO;
    for (name, (duration, ops)) in &runs {
        total += *duration;
        println!("{:<36} {:>12.2?} {:>12}", name, duration, ops);
    }

    println!("{}", "-".repeat(64));
    println!("{:<36} {:>12.2?}", "TOTAL", total);
}
