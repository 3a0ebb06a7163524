//! Integration tests for declaring and loading exported functions.

mod test_harness;

use scriptbridge::export::{ExportCollector, ExportedFunction};
use scriptbridge::loader::ScriptLoader;
use scriptbridge::prelude::*;
use scriptbridge::registry::FunctionSource;
use scriptbridge::ParamKind;

// =============================================================================
// Builder validation
// =============================================================================

#[test]
fn test_export_keeps_declared_fields() {
    let cases = [
        ("listSum", "DOUBLE", "doListSum"),
        ("rollSomeDice", "RESULT", "doRollSomeDice"),
        ("greet", "STRING", "doGreet"),
        ("nothing", "NULL", "doNothing"),
    ];

    for (name, return_type, js_function_name) in cases {
        let mut sink = ExportCollector::new();
        ExportedFunction::new(name, return_type, js_function_name, None)
            .unwrap()
            .export(&mut sink)
            .unwrap();

        assert_eq!(sink.len(), 1);
        let descriptor = &sink.descriptors()[0];
        assert_eq!(descriptor.name, name);
        assert_eq!(descriptor.return_type, return_type.parse::<DataType>().unwrap());
        assert_eq!(descriptor.js_function_name, js_function_name);
    }
}

#[test]
fn test_empty_fields_rejected() {
    assert_eq!(
        ExportedFunction::new("", "DOUBLE", "doListSum", None),
        Err(ConfigurationError::EmptyFunctionName)
    );
    assert_eq!(
        ExportedFunction::new("listSum", "", "doListSum", None),
        Err(ConfigurationError::EmptyReturnType)
    );
    assert_eq!(
        ExportedFunction::new("listSum", "DOUBLE", "", None),
        Err(ConfigurationError::EmptyScriptFunctionName)
    );
}

#[test]
fn test_unknown_type_and_permission_rejected() {
    assert!(matches!(
        ExportedFunction::new("listSum", "DECIMAL", "doListSum", None),
        Err(ConfigurationError::UnknownType(_))
    ));
    assert!(matches!(
        ExportedFunction::new("listSum", "DOUBLE", "doListSum", Some("ADMIN")),
        Err(ConfigurationError::UnknownPermission(_))
    ));
}

#[test]
fn test_parameter_after_varargs_always_fails() {
    let attempts: [(&str, &str); 4] = [("sides", "LONG"), ("", "LONG"), ("more", "List*"), ("x", "")];

    for (name, param_type) in attempts {
        let mut f = ExportedFunction::new("listSum", "DOUBLE", "doListSum", None).unwrap();
        f.add_parameter("nums", "List*", None).unwrap();
        assert!(
            matches!(
                f.add_parameter(name, param_type, None),
                Err(ConfigurationError::VarargsNotLast { .. })
            ),
            "adding ({name:?}, {param_type:?}) after varargs should fail"
        );
        assert_eq!(f.parameter_list().len(), 1);
    }
}

#[test]
fn test_varargs_parameter_specs() {
    let mut f = ExportedFunction::new("listSum", "DOUBLE", "doListSum", None).unwrap();
    f.add_parameter("nums", "List*", None).unwrap();
    let spec = &f.parameter_list()[0];
    assert_eq!(spec.param_type, DataType::List);
    assert!(spec.vararg_flag);
    assert_eq!(spec.kind(), ParamKind::ListVarargs);

    let mut f = ExportedFunction::new("describe", "STRING", "doDescribe", None).unwrap();
    f.add_parameter("opts", "Dictionary*", None).unwrap();
    let spec = &f.parameter_list()[0];
    assert_eq!(spec.param_type, DataType::Dictionary);
    assert!(spec.vararg_flag);
    assert_eq!(spec.kind(), ParamKind::DictionaryVarargs);
}

#[test]
fn test_default_converted_to_parameter_type() {
    let mut f = ExportedFunction::new("rollSomeDice", "RESULT", "doRollSomeDice", None).unwrap();
    f.add_parameter("num", "LONG", Some(ScriptValue::Float(2.0))).unwrap();
    f.add_parameter("label", "STRING", Some(ScriptValue::Int(6))).unwrap();
    assert_eq!(f.parameter_list()[0].default_val, Some(DataValue::Long(2)));
    assert_eq!(f.parameter_list()[1].default_val, Some(DataValue::from("6")));

    let err = f
        .add_parameter("sides", "LONG", Some(ScriptValue::String("d6".into())))
        .unwrap_err();
    assert!(matches!(err, ConfigurationError::InvalidDefault { parameter, .. } if parameter == "sides"));
}

#[test]
fn test_set_name_is_inert() {
    let f = ExportedFunction::new("listSum", "DOUBLE", "doListSum", None).unwrap();
    f.set_name("otherSum").unwrap();
    assert_eq!(f.name(), "listSum");
    assert_eq!(f.set_name(""), Err(ConfigurationError::EmptyFunctionName));
}

// =============================================================================
// Loading
// =============================================================================

#[test]
fn test_samples_load_as_script_functions() {
    let registry = test_harness::sample_registry();
    assert_eq!(
        registry.user_function_names(),
        vec!["listSum", "listSumR", "rollSomeDice", "showResult"]
    );

    for entry in registry.entries(FunctionSource::Script) {
        assert!(entry.is_script());
        assert_eq!(
            entry.js_function_name().map(|js| js.trim_start_matches("do").to_lowercase()),
            Some(entry.name().to_lowercase())
        );
    }

    let list_sum = registry.lookup("listSum").unwrap();
    assert_eq!(list_sum.def.parameter_kinds(), vec![ParamKind::ListVarargs]);
    assert!(list_sum.def.positional_consumer().is_some());

    let roll = registry.lookup("rollSomeDice").unwrap();
    assert_eq!(roll.def.required_permission(), PermissionLevel::Player);
}

#[test]
fn test_load_after_close_rejected() {
    let mut registry = test_harness::sample_registry();
    let err = ScriptLoader::new()
        .load(&mut registry, |ctx| {
            ExportedFunction::new("late", "LONG", "doLate", None)?.export(ctx)?;
            Ok(())
        })
        .unwrap_err();

    assert_eq!(
        err,
        BridgeError::Registration(RegistrationError::RegistryClosed {
            name: "late".to_string()
        })
    );
    assert!(registry.lookup("late").is_none());
}

#[test]
fn test_configuration_error_aborts_load() {
    let mut registry = FunctionRegistry::new();
    let err = ScriptLoader::new()
        .load(&mut registry, |ctx| {
            test_harness::load_samples(ctx)?;
            let mut f = ExportedFunction::new("broken", "LONG", "doBroken", None)?;
            f.add_parameter("a", "LONG", None)?;
            f.add_parameter("a", "LONG", None)?;
            f.export(ctx)?;
            Ok(())
        })
        .unwrap_err();

    assert!(err.is_configuration());
    assert!(registry.is_empty());
}

#[test]
fn test_failed_reload_keeps_loaded_functions() {
    let mut registry = FunctionRegistry::new();
    let mut loader = ScriptLoader::new();
    loader.load(&mut registry, test_harness::load_samples).unwrap();
    let before: Vec<String> = registry.user_function_names().into_iter().map(String::from).collect();
    assert_eq!(before.len(), 4);

    let err = loader
        .reload(&mut registry, |_| Err(ConfigurationError::EmptyFunctionName.into()))
        .unwrap_err();
    assert_eq!(err, BridgeError::Configuration(ConfigurationError::EmptyFunctionName));
    assert_eq!(registry.user_function_names(), before);

    registry.close();
    let mut engine = test_harness::sample_engine();
    assert_eq!(
        Dispatcher::new(&registry, &mut engine).call(
            "listSum",
            ArgumentList::positional(test_harness::longs(&[1, 2, 3])),
            &CallerContext::gm()
        ),
        Ok(DataValue::Double(6.0))
    );
}
