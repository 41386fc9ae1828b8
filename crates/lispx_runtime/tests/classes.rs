use lispx_runtime::{BuiltinClass, Metaclass, Namespace, Repr, Value, Vm};

#[test]
fn builtin_classes_are_registered_under_class_symbols() {
    let mut vm = Vm::new();
    for name in ["object", "string", "cons", "standard-object", "type-error", "end-of-file"] {
        let key = vm.csym(name);
        let class = vm.get_environment().get(&key).and_then(|v| v.as_class());
        assert!(class.is_some(), "{name}");
        let class = class.unwrap();
        assert_eq!(vm.class_name(class).name(), name);
        assert_eq!(vm.class_name(class).namespace(), Namespace::Variable);
    }
    let key = vm.sym("object");
    assert!(vm.get_environment().get(&key).is_none());
}

#[test]
fn superclass_chain() {
    let vm = Vm::new();
    let object = BuiltinClass::Object.id();
    assert_eq!(vm.class_superclass(object), None);
    assert_eq!(
        vm.class_superclass(BuiltinClass::Cons.id()),
        Some(BuiltinClass::List.id())
    );
    assert_eq!(
        vm.class_superclass(BuiltinClass::EndOfFile.id()),
        Some(BuiltinClass::StreamError.id())
    );
    assert!(vm.is_subclass(BuiltinClass::TypeError.id(), BuiltinClass::Condition.id()));
    assert!(vm.is_subclass(BuiltinClass::Cons.id(), object));
    assert!(vm.is_subclass(BuiltinClass::Cons.id(), BuiltinClass::Cons.id()));
    assert!(!vm.is_subclass(BuiltinClass::List.id(), BuiltinClass::Cons.id()));
}

#[test]
fn metaclasses() {
    let vm = Vm::new();
    assert_eq!(vm.class_metaclass(BuiltinClass::Object.id()), BuiltinClass::BuiltInClass.id());
    assert_eq!(vm.class_metaclass(BuiltinClass::Number.id()), BuiltinClass::BuiltInClass.id());
    assert_eq!(
        vm.class_metaclass(BuiltinClass::StandardObject.id()),
        BuiltinClass::StandardClass.id()
    );
    assert_eq!(
        vm.class_metaclass(BuiltinClass::Error.id()),
        BuiltinClass::StandardClass.id()
    );
    assert_eq!(
        vm.class_record(BuiltinClass::BuiltInClass.id()).metaclass,
        Metaclass::BuiltIn
    );
}

#[test]
fn find_class_by_name() {
    let vm = Vm::new();
    assert_eq!(vm.find_class("number"), Some(BuiltinClass::Number.id()));
    assert_eq!(vm.find_class("no-such-class"), None);
}

#[test]
fn standard_classes_form_a_hierarchy() {
    let mut vm = Vm::new();
    let point_2d = vm.sym("point-2d");
    let point_3d = vm.sym("point-3d");
    let standard_object = Value::Class(BuiltinClass::StandardObject.id());
    let p2 = vm.make_standard_class(&point_2d, &standard_object).unwrap();
    let p3 = vm.make_standard_class(&point_3d, &Value::Class(p2)).unwrap();

    assert_eq!(vm.class_superclass(p3), Some(p2));
    assert_eq!(vm.class_superclass(p2), Some(BuiltinClass::StandardObject.id()));
    assert!(vm.is_subclass(p3, p2));
    assert!(vm.is_subclass(p3, BuiltinClass::Object.id()));
    assert!(!vm.is_subclass(p2, p3));
    assert_eq!(vm.class_metaclass(p3), BuiltinClass::StandardClass.id());
    assert_eq!(vm.class_of(&Value::Class(p3)), BuiltinClass::StandardClass.id());
    assert_eq!(vm.class_name(p3).name(), "point-3d");
    assert_eq!(vm.find_class("point-3d"), Some(p3));
}

#[test]
fn standard_classes_have_distinct_representations() {
    let mut vm = Vm::new();
    let a = vm.sym("a");
    let b = vm.sym("b");
    let so = Value::Class(BuiltinClass::StandardObject.id());
    let ca = vm.make_standard_class(&a, &so).unwrap();
    let cb = vm.make_standard_class(&b, &so).unwrap();
    assert_ne!(vm.class_repr(ca), vm.class_repr(cb));
    assert!(matches!(vm.class_repr(ca), Repr::Standard(_)));
    assert_eq!(
        vm.class_repr(BuiltinClass::Number.id()),
        Repr::BuiltIn(BuiltinClass::Number)
    );
}

#[test]
fn superclass_must_be_a_class() {
    let mut vm = Vm::new();
    let name = vm.sym("bad");
    let err = vm.make_standard_class(&name, &Value::num(1)).unwrap_err();
    assert!(err.is_a(&vm, BuiltinClass::TypeError));
    assert_eq!(err.message(), "Type assertion failed: expected class");
    assert_eq!(vm.find_class("bad"), None);
}

#[test]
fn built_in_superclasses_are_accepted() {
    let mut vm = Vm::new();
    let thing = vm.sym("thing");
    let class = vm
        .make_standard_class(&thing, &Value::Class(BuiltinClass::Object.id()))
        .unwrap();
    assert_eq!(vm.class_superclass(class), Some(BuiltinClass::Object.id()));
    assert_eq!(vm.class_metaclass(class), BuiltinClass::StandardClass.id());

    let counted = vm.sym("counted");
    let class = vm
        .make_standard_class(&counted, &Value::Class(BuiltinClass::Number.id()))
        .unwrap();
    assert!(vm.is_subclass(class, BuiltinClass::Number.id()));
    let instance = vm.make_instance(class, &[]).unwrap();
    assert_eq!(vm.class_of(&instance), class);
}

#[test]
fn class_ids_from_another_vm_do_not_panic() {
    let mut vm1 = Vm::new();
    let name = vm1.sym("only-in-vm1");
    let foreign = vm1
        .make_standard_class(&name, &Value::Class(BuiltinClass::StandardObject.id()))
        .unwrap();
    let instance = vm1.make_instance(foreign, &[]).unwrap();

    let mut vm2 = Vm::new();
    let meta = vm2.class_of(&Value::Class(foreign));
    assert_eq!(meta, BuiltinClass::BuiltInClass.id());
    assert_eq!(vm2.class_name(foreign).name(), "object");
    assert_eq!(vm2.class_of(&instance), BuiltinClass::Object.id());
    assert!(vm2.is_subclass(foreign, BuiltinClass::Object.id()));
    assert!(!vm2.is_subclass(foreign, BuiltinClass::StandardObject.id()));
    assert!(vm2.make_instance(foreign, &[]).is_err());
}

#[test]
fn redefinition_rebinds_the_name() {
    let mut vm = Vm::new();
    let name = vm.sym("thing");
    let so = Value::Class(BuiltinClass::StandardObject.id());
    let old = vm.make_standard_class(&name, &so).unwrap();
    let instance = vm.make_instance(old, &[]).unwrap();
    let new = vm.make_standard_class(&name, &so).unwrap();

    assert_ne!(old, new);
    assert_eq!(vm.find_class("thing"), Some(new));
    assert_eq!(vm.class_of(&instance), old);
    assert_eq!(vm.class_name(old).name(), "thing");
}

#[test]
fn class_names_accept_any_namespace() {
    let mut vm = Vm::new();
    let name = vm.kwd("widget");
    let so = Value::Class(BuiltinClass::StandardObject.id());
    let class = vm.make_standard_class(&name, &so).unwrap();
    assert_eq!(vm.class_name(class).namespace(), Namespace::Variable);
    assert_eq!(vm.find_class("widget"), Some(class));
}

#[test]
fn metaclass_tower_is_finite() {
    let mut vm = Vm::new();
    let name = vm.sym("leaf");
    let leaf = vm
        .make_standard_class(&name, &Value::Class(BuiltinClass::StandardObject.id()))
        .unwrap();
    let builtin_class = BuiltinClass::BuiltInClass.id();
    for class in [BuiltinClass::Object.id(), BuiltinClass::Error.id(), leaf, builtin_class] {
        let meta = vm.class_of(&Value::Class(class));
        assert!(
            meta == builtin_class || meta == BuiltinClass::StandardClass.id(),
            "{class:?}"
        );
        assert_eq!(vm.class_of(&Value::Class(meta)), builtin_class);
    }
}

#[test]
fn only_object_is_above_object() {
    let vm = Vm::new();
    let object = BuiltinClass::Object.id();
    assert!(vm.is_subclass(object, object));
    for class in [BuiltinClass::String, BuiltinClass::Condition, BuiltinClass::Class] {
        assert!(!vm.is_subclass(object, class.id()));
    }
}
