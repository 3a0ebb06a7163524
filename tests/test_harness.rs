// tests/test_harness.rs
//! Shared fixtures for the integration tests.
//!
//! Provides the sample script functions (`listSum`, `listSumR`, `showResult`,
//! `rollSomeDice`) as a load function plus a [`NativeScriptEngine`] that
//! implements them. Dice rolls are deterministic: the n-th roll of a call
//! sequence is `n % sides + 1`.

#![allow(dead_code)]

use scriptbridge::engine::NativeScriptEngine;
use scriptbridge::export::ExportedFunction;
use scriptbridge::loader::{ExportContext, ScriptLoader};
use scriptbridge::prelude::*;

/// Install a test subscriber so `RUST_LOG`-style output shows up with `--nocapture`.
pub fn init_tracing() {
    tracing_subscriber::fmt().with_test_writer().try_init().ok();
}

/// Export the sample functions.
pub fn load_samples(ctx: &mut ExportContext<'_>) -> Result<(), BridgeError> {
    let mut f = ExportedFunction::new("listSum", "DOUBLE", "doListSum", None)?;
    f.add_parameter("nums", "List*", None)?;
    f.export(ctx)?;

    let mut f = ExportedFunction::new("listSumR", "RESULT", "doListSumR", None)?;
    f.add_parameter("nums", "List*", None)?;
    f.export(ctx)?;

    let mut f = ExportedFunction::new("showResult", "STRING", "doShowResult", None)?;
    f.add_parameter("res", "RESULT", None)?;
    f.export(ctx)?;

    let mut f = ExportedFunction::new("rollSomeDice", "RESULT", "doRollSomeDice", Some("PLAYER"))?;
    f.add_parameter("num", "LONG", Some(ScriptValue::Int(1)))?;
    f.add_parameter("sides", "LONG", None)?;
    f.export(ctx)?;

    Ok(())
}

fn join(values: &[i64], delim: &str) -> String {
    values.iter().map(i64::to_string).collect::<Vec<_>>().join(delim)
}

/// An engine implementing the sample functions.
pub fn sample_engine() -> NativeScriptEngine {
    let mut engine = NativeScriptEngine::new();

    engine.register("doListSum", |args| {
        let nums: Vec<f64> = args.arg("nums")?;
        Ok(ScriptValue::Float(nums.iter().sum()))
    });

    engine.register("doListSumR", |args| {
        let nums: Vec<i64> = args.arg("nums")?;
        let result = DetailedResult::builder()
            .set_value(nums.iter().sum::<i64>())
            .set_details(join(&nums, " + "))
            .set_individual_values(nums)
            .build();
        Ok(ScriptValue::Result(Box::new(result)))
    });

    engine.register("doShowResult", |args| {
        let res: DetailedResult = args.arg("res")?;
        let show = |v: Option<&ScriptValue>| v.map_or_else(|| "undefined".to_string(), ToString::to_string);
        let individual = res
            .individual_values()
            .map_or_else(|| "undefined".to_string(), |v| ScriptValue::Array(v.to_vec()).to_string());
        Ok(ScriptValue::String(format!(
            "Result found: value = {}, details = {}, individual = {}",
            show(res.value()),
            show(res.details()),
            individual
        )))
    });

    let mut rolls = 0i64;
    engine.register("doRollSomeDice", move |args| {
        let times: i64 = args.arg("num")?;
        let sides: i64 = args.arg("sides")?;
        let ivals: Vec<i64> = (0..times)
            .map(|_| {
                let roll = rolls % sides + 1;
                rolls += 1;
                roll
            })
            .collect();

        // Plain object rather than a built result
        Ok(ScriptValue::map([
            ("value", ScriptValue::Int(ivals.iter().sum())),
            ("details", ScriptValue::String(join(&ivals, " + "))),
            ("individual", ScriptValue::array(ivals)),
        ]))
    });

    engine
}

/// A closed registry holding the sample functions.
pub fn sample_registry() -> FunctionRegistry {
    init_tracing();
    let mut registry = FunctionRegistry::new();
    ScriptLoader::new()
        .load(&mut registry, load_samples)
        .expect("sample functions should load");
    registry.close();
    registry
}

/// Shorthand for a list of host longs.
pub fn longs(values: &[i64]) -> Vec<DataValue> {
    values.iter().copied().map(DataValue::Long).collect()
}
