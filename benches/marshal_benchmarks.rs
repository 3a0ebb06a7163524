//! Performance benchmarks for marshalling and dispatch.
//!
//! - Forward conversion of lists, dictionaries and results of growing size
//! - Reverse conversion under declared return types
//! - Full dispatch of the sample functions through a native engine
//!
//! ## Profiling with Puffin
//!
//! ```bash
//! cargo bench --features profile-with-puffin -- --profile-time 5
//! ```

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use scriptbridge::dispatch::{ArgumentList, CallerContext, Dispatcher};
use scriptbridge::engine::NativeScriptEngine;
use scriptbridge::export::ExportedFunction;
use scriptbridge::loader::ScriptLoader;
use scriptbridge::marshal::{convert_data_value, convert_to_data_value};
use scriptbridge::registry::FunctionRegistry;
use scriptbridge::{DataType, DataValue, DetailedResult, ResultData, ScriptValue};
use std::hint::black_box;

#[cfg(feature = "profile-with-puffin")]
static FRAME_VIEW: std::sync::OnceLock<puffin::GlobalFrameView> = std::sync::OnceLock::new();

#[cfg(feature = "profile-with-puffin")]
fn setup_profiler() {
    puffin::set_scopes_on(true);
    FRAME_VIEW.get_or_init(puffin::GlobalFrameView::default);
}

#[cfg(not(feature = "profile-with-puffin"))]
fn setup_profiler() {}

#[cfg(feature = "profile-with-puffin")]
fn end_profiling_frame() {
    puffin::GlobalProfiler::lock().new_frame();
}

#[cfg(not(feature = "profile-with-puffin"))]
fn end_profiling_frame() {}

/// Print how many frames the profiler recorded.
#[cfg(feature = "profile-with-puffin")]
fn print_profiling_stats() {
    let Some(frame_view) = FRAME_VIEW.get() else {
        println!("Profiler not initialized");
        return;
    };
    let view = frame_view.lock();
    let frames = view.recent_frames().count();
    println!("\n=== Profiling: {frames} frames recorded ===\n");
}

#[cfg(not(feature = "profile-with-puffin"))]
fn print_profiling_stats() {}

fn host_list(len: usize) -> DataValue {
    DataValue::list((0..len as i64).map(DataValue::Long))
}

fn host_dictionary(len: usize) -> DataValue {
    DataValue::dictionary((0..len).map(|i| (format!("k{i}"), DataValue::Double(i as f64 * 0.5))))
}

fn host_result(len: usize) -> DataValue {
    let values: Vec<DataValue> = (0..len as i64).map(DataValue::Long).collect();
    let details = (0..len).map(|i| i.to_string()).collect::<Vec<_>>().join(" + ");
    DataValue::result(
        ResultData::new((0..len as i64).sum::<i64>())
            .with_detailed_result(details)
            .with_values(values),
    )
}

/// Benchmark host to script conversion.
fn forward_benchmarks(c: &mut Criterion) {
    setup_profiler();
    let mut group = c.benchmark_group("marshal/forward");

    for len in [8usize, 64, 512] {
        group.throughput(Throughput::Elements(len as u64));

        let list = host_list(len);
        group.bench_with_input(BenchmarkId::new("list", len), &list, |b, list| {
            b.iter(|| {
                let converted = convert_data_value(black_box(list));
                end_profiling_frame();
                converted
            });
        });

        let dict = host_dictionary(len);
        group.bench_with_input(BenchmarkId::new("dictionary", len), &dict, |b, dict| {
            b.iter(|| convert_data_value(black_box(dict)));
        });

        let result = host_result(len);
        group.bench_with_input(BenchmarkId::new("result", len), &result, |b, result| {
            b.iter(|| convert_data_value(black_box(result)));
        });
    }

    group.finish();
}

/// Benchmark script to host conversion.
fn reverse_benchmarks(c: &mut Criterion) {
    setup_profiler();
    let mut group = c.benchmark_group("marshal/reverse");

    for len in [8usize, 64, 512] {
        group.throughput(Throughput::Elements(len as u64));

        let array = ScriptValue::array((0..len).map(|i| i as f64));
        group.bench_with_input(BenchmarkId::new("list", len), &array, |b, array| {
            b.iter(|| convert_to_data_value(black_box(array), DataType::List).unwrap());
        });

        let result = ScriptValue::Result(Box::new(
            DetailedResult::builder()
                .set_value(len as i64)
                .set_details("sum")
                .set_individual_values((0..len).map(|i| i as i64))
                .build(),
        ));
        group.bench_with_input(BenchmarkId::new("result", len), &result, |b, result| {
            b.iter(|| convert_to_data_value(black_box(result), DataType::Result).unwrap());
        });
    }

    group.finish();
}

/// Benchmark a full call: binding, marshalling, script invocation, return conversion.
fn dispatch_benchmarks(c: &mut Criterion) {
    setup_profiler();

    let mut registry = FunctionRegistry::new();
    ScriptLoader::new()
        .load(&mut registry, |ctx| {
            let mut f = ExportedFunction::new("listSum", "DOUBLE", "doListSum", None)?;
            f.add_parameter("nums", "List*", None)?;
            f.export(ctx)?;
            Ok(())
        })
        .unwrap();
    registry.close();

    let mut engine = NativeScriptEngine::new();
    engine.register("doListSum", |args| {
        let nums: Vec<f64> = args.arg("nums")?;
        Ok(ScriptValue::Float(nums.iter().sum()))
    });

    let mut group = c.benchmark_group("dispatch");
    let caller = CallerContext::gm();
    let mut dispatcher = Dispatcher::new(&registry, &mut engine);

    for len in [1usize, 16, 256] {
        let args: Vec<DataValue> = (0..len as i64).map(DataValue::Long).collect();
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::new("listSum", len), &args, |b, args| {
            b.iter(|| {
                let value = dispatcher
                    .call("listSum", ArgumentList::positional(args.iter().cloned()), &caller)
                    .unwrap();
                end_profiling_frame();
                black_box(value)
            });
        });
    }

    group.finish();
    print_profiling_stats();
}

criterion_group!(benches, forward_benchmarks, reverse_benchmarks, dispatch_benchmarks);

criterion_main!(benches);
