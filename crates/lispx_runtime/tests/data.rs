use lispx_runtime::{BuiltinClass, Namespace, Value, Vm, VmConfig, equal};

fn num(vm: &Vm, text: &str) -> Value {
    vm.num_from_str(text).unwrap()
}

#[test]
fn arithmetic_is_exact() {
    let vm = Vm::new();
    let sum = vm.add(&num(&vm, "0.1"), &num(&vm, "0.2")).unwrap();
    assert!(equal(&sum, &num(&vm, "0.3")));
    let diff = vm.subtract(&num(&vm, "1"), &num(&vm, "0.75")).unwrap();
    assert!(equal(&diff, &num(&vm, "0.25")));
    let prod = vm.multiply(&num(&vm, "1.5"), &num(&vm, "-4")).unwrap();
    assert!(equal(&prod, &num(&vm, "-6")));
}

#[test]
fn division_rounds_to_configured_scale() {
    let vm = Vm::with_config(VmConfig {
        division_scale: 3,
        ..VmConfig::default()
    });
    let q = vm.divide(&num(&vm, "2"), &num(&vm, "3")).unwrap();
    assert!(equal(&q, &num(&vm, "0.667")));
    let q = vm.divide(&num(&vm, "10"), &num(&vm, "4")).unwrap();
    assert!(equal(&q, &num(&vm, "2.5")));
}

#[test]
fn division_by_zero() {
    let vm = Vm::new();
    let err = vm.divide(&num(&vm, "1"), &num(&vm, "0")).unwrap_err();
    assert!(err.is_a(&vm, BuiltinClass::AssertionError));
}

#[test]
fn arithmetic_type_errors() {
    let vm = Vm::new();
    let err = vm.add(&Value::str("1"), &num(&vm, "1")).unwrap_err();
    assert!(err.is_a(&vm, BuiltinClass::TypeError));
    assert!(vm.multiply(&num(&vm, "1"), &Value::host_num(1.0)).is_err());
}

#[test]
fn malformed_numbers_are_reader_errors() {
    let vm = Vm::new();
    for text in ["", "abc", "1.2.3", "--1", "1e"] {
        let err = vm.num_from_str(text).unwrap_err();
        assert!(err.is_a(&vm, BuiltinClass::ReaderError), "{text:?}");
    }
}

#[test]
fn numbers_from_host_floats() {
    let vm = Vm::new();
    assert!(equal(&vm.num_from_f64(0.1).unwrap(), &num(&vm, "0.1")));
    assert!(equal(&vm.num_from_f64(-2.0).unwrap(), &num(&vm, "-2")));
    assert!(vm.num_from_f64(f64::NAN).is_err());
    assert!(vm.num_from_f64(f64::INFINITY).is_err());
}

#[test]
fn compare_numbers_and_strings() {
    let vm = Vm::new();
    assert_eq!(vm.compare(&num(&vm, "1"), &num(&vm, "2")).unwrap(), -1);
    assert_eq!(vm.compare(&num(&vm, "2.0"), &num(&vm, "2")).unwrap(), 0);
    assert_eq!(vm.compare(&num(&vm, "-1"), &num(&vm, "-1.5")).unwrap(), 1);
    assert_eq!(vm.compare(&Value::str("abc"), &Value::str("abd")).unwrap(), -1);
    assert_eq!(vm.compare(&Value::str("b"), &Value::str("b")).unwrap(), 0);
    assert_eq!(vm.compare(&Value::str("b"), &Value::str("a")).unwrap(), 1);
}

#[test]
fn compare_rejects_mixed_operands() {
    let vm = Vm::new();
    let err = vm.compare(&num(&vm, "1"), &Value::str("1")).unwrap_err();
    assert!(err.is_a(&vm, BuiltinClass::TypeError));
    assert_eq!(err.message(), "Type assertion failed: expected number");

    let err = vm.compare(&Value::T, &Value::T).unwrap_err();
    assert_eq!(err.message(), "Type assertion failed: expected (or number string)");
}

#[test]
fn strings_and_symbols() {
    let mut vm = Vm::new();
    let name = Value::str("hello");
    let sym = vm.intern(&name, Namespace::Function).unwrap();
    assert_eq!(sym.namespace(), Namespace::Function);
    assert!(equal(&vm.symbol_string(&sym), &name));
    assert_eq!(sym, vm.fsym("hello"));

    let err = vm.intern(&Value::num(1), Namespace::Variable).unwrap_err();
    assert!(err.is_a(&vm, BuiltinClass::TypeError));
}

#[test]
fn namespace_conversion_through_vm() {
    let mut vm = Vm::new();
    let v = vm.sym("car");
    let f = vm.to_function_symbol(&v);
    assert_eq!(f, vm.fsym("car"));
    let k = vm.to_keyword_symbol(&f);
    assert_eq!(k, vm.kwd("car"));
    assert_eq!(vm.to_class_symbol(&k), vm.csym("car"));
    assert_eq!(vm.to_variable_symbol(&k), v);
}
