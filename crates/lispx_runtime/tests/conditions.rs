use lispx_runtime::{BuiltinClass, TypeSpec, Value, Vm, equal};

#[test]
fn assert_passes_and_fails() {
    let vm = Vm::new();
    assert!(vm.assert(true).is_ok());
    let err = vm.assert(false).unwrap_err();
    assert!(err.is_a(&vm, BuiltinClass::AssertionError));
    assert_eq!(err.message(), "Assertion failed");
    assert!(equal(&err.slot(&vm, "message").unwrap(), &Value::str("Assertion failed")));
}

#[test]
fn assert_with_custom_message() {
    let vm = Vm::new();
    let err = vm.assert_with_message(false, "nope").unwrap_err();
    assert_eq!(err.message(), "nope");
    assert_eq!(err.to_string(), "nope");
}

#[test]
fn abstract_method_signals_error() {
    let vm = Vm::new();
    let err = vm.abstract_method::<Value>().unwrap_err();
    assert_eq!(err.class(), BuiltinClass::Error.id());
    assert!(err.message().starts_with("Congratulations!"));
}

#[test]
fn type_error_slots() {
    let vm = Vm::new();
    let err = vm
        .assert_type(Value::num(12), &TypeSpec::tag("string"))
        .unwrap_err();
    assert!(err.is_a(&vm, BuiltinClass::TypeError));
    assert_eq!(err.message(), "Type assertion failed: expected \"string\"");
    assert!(equal(&err.slot(&vm, "datum").unwrap(), &Value::num(12)));
    assert!(equal(&err.slot(&vm, "expected-type").unwrap(), &Value::str("string")));
}

#[test]
fn type_error_for_class_spec() {
    let vm = Vm::new();
    let err = vm
        .assert_type(Value::str("x"), &TypeSpec::class(BuiltinClass::Number))
        .unwrap_err();
    assert_eq!(err.message(), "Type assertion failed: expected number");
    match err.slot(&vm, "expected-type") {
        Some(Value::Symbol(sym)) => assert_eq!(sym.name(), "number"),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn conditions_are_standard_objects() {
    let vm = Vm::new();
    let err = vm.match_error(Value::num(3));
    let value = err.to_value();
    assert!(vm.is_subclass(vm.class_of(&value), BuiltinClass::StandardObject.id()));
    assert!(vm.is_subclass(err.class(), BuiltinClass::Condition.id()));
    assert!(equal(&err.slot(&vm, "datum").unwrap(), &Value::num(3)));
}

#[test]
fn condition_constructors() {
    let mut vm = Vm::new();
    let m = vm.sym("area");
    let err = vm.unbound_method_error(BuiltinClass::Number.id(), &m);
    assert!(err.is_a(&vm, BuiltinClass::UnboundMethodError));
    assert!(equal(
        &err.slot(&vm, "class").unwrap(),
        &Value::Class(BuiltinClass::Number.id())
    ));
    assert!(equal(&err.slot(&vm, "method-name").unwrap(), &Value::Symbol(m)));
    assert!(err.message().contains("area"));

    let err = vm.prompt_not_found_error(Value::str("p"));
    assert!(err.is_a(&vm, BuiltinClass::PromptNotFoundError));
    assert!(equal(&err.slot(&vm, "prompt").unwrap(), &Value::str("p")));

    let err = vm.reader_error("bad token");
    assert!(err.is_a(&vm, BuiltinClass::ReaderError));
    assert!(err.is_a(&vm, BuiltinClass::Error));

    let err = vm.stream_error(Value::NIL, "broken");
    assert!(err.is_a(&vm, BuiltinClass::StreamError));
    assert!(!err.is_a(&vm, BuiltinClass::EndOfFile));
    assert!(vm.end_of_file(Value::NIL).is_a(&vm, BuiltinClass::StreamError));
}

#[test]
fn make_condition_with_extra_slots() {
    let mut vm = Vm::new();
    let code = vm.sym("code");
    let err = vm.make_condition(BuiltinClass::Condition, "custom", vec![(code, Value::num(7))]);
    assert_eq!(err.message(), "custom");
    assert!(equal(&err.slot(&vm, "code").unwrap(), &Value::num(7)));
    assert!(err.slot(&vm, "never-interned-slot").is_none());
}
