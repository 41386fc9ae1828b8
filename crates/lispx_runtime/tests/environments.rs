use lispx_runtime::{BuiltinClass, Value, Vm, equal};

#[test]
fn unbound_symbol_signals_condition() {
    let mut vm = Vm::new();
    let env = vm.make_environment(None);
    let x = vm.sym("x");
    let err = env.lookup(&vm, &x).unwrap_err();
    assert!(err.is_a(&vm, BuiltinClass::UnboundSymbolError));
    assert!(err.is_a(&vm, BuiltinClass::Error));
    assert!(equal(&err.slot(&vm, "symbol").unwrap(), &Value::Symbol(x)));
    match err.slot(&vm, "environment") {
        Some(Value::Environment(e)) => assert!(e.ptr_eq(&env)),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(err.message(), "Unbound variable: x");
}

#[test]
fn undefined_is_a_bindable_value() {
    let mut vm = Vm::new();
    let env = vm.make_environment(None);
    let x = vm.sym("x");
    env.put(x.clone(), Value::UNDEFINED);
    assert!(env.is_bound(&x));
    assert!(env.lookup(&vm, &x).unwrap().is_undefined());
}

#[test]
fn child_shadows_parent() {
    let mut vm = Vm::new();
    let parent = vm.make_environment(None);
    let child = vm.make_environment(Some(&parent));
    let x = vm.sym("x");
    let y = vm.sym("y");
    parent.put(x.clone(), Value::num(1));
    parent.put(y.clone(), Value::num(2));
    child.put(x.clone(), Value::num(10));

    assert!(equal(&child.lookup(&vm, &x).unwrap(), &Value::num(10)));
    assert!(equal(&child.lookup(&vm, &y).unwrap(), &Value::num(2)));
    assert!(equal(&parent.lookup(&vm, &x).unwrap(), &Value::num(1)));
    assert!(child.get_local(&y).is_none());
    assert!(child.parent().is_some_and(|p| p.ptr_eq(&parent)));
}

#[test]
fn parent_mutation_is_visible_to_child() {
    let mut vm = Vm::new();
    let parent = vm.make_environment(None);
    let child = vm.make_environment(Some(&parent));
    let x = vm.sym("x");
    parent.put(x.clone(), Value::num(1));
    parent.put(x.clone(), Value::num(5));
    assert!(equal(&child.lookup(&vm, &x).unwrap(), &Value::num(5)));
}

#[test]
fn namespaces_are_separate() {
    let mut vm = Vm::new();
    let env = vm.make_environment(None);
    let v = vm.sym("foo");
    let f = vm.fsym("foo");
    let c = vm.csym("foo");
    let k = vm.kwd("foo");
    let err = env.lookup(&vm, &c).unwrap_err();
    assert_eq!(err.message(), "Unbound class: foo");

    env.put(v.clone(), Value::num(1));
    env.put(f.clone(), Value::num(2));
    env.put(c.clone(), Value::num(3));
    assert!(equal(&env.lookup(&vm, &v).unwrap(), &Value::num(1)));
    assert!(equal(&env.lookup(&vm, &f).unwrap(), &Value::num(2)));
    assert!(equal(&env.lookup(&vm, &c).unwrap(), &Value::num(3)));
    assert!(!env.is_bound(&k));
    assert_eq!(env.local_len(), 3);
}

#[test]
fn environment_survives_its_parent_handle() {
    let mut vm = Vm::new();
    let x = vm.sym("x");
    let child = {
        let parent = vm.make_environment(None);
        parent.put(x.clone(), Value::str("kept"));
        vm.make_environment(Some(&parent))
    };
    assert!(equal(&child.lookup(&vm, &x).unwrap(), &Value::str("kept")));
}

#[test]
fn define_constant_binds_in_root() {
    let mut vm = Vm::new();
    vm.define_constant("answer", Value::num(42));
    let root = vm.get_environment().clone();
    let child = vm.make_environment(Some(&root));
    let answer = vm.sym("answer");
    assert!(equal(&child.lookup(&vm, &answer).unwrap(), &Value::num(42)));
}
