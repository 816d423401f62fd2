//! Tests for the value model: conversions, rendering and container access.

use rustc_hash::FxHashMap;

use crate::{EvalErrorKind, Function, NativeFunction, Value};

fn kind_of<T: std::fmt::Debug>(result: Result<T, crate::EvalError>) -> EvalErrorKind {
    match result {
        Ok(v) => panic!("expected an error, got {v:?}"),
        Err(e) => e.kind,
    }
}

mod conversions {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn to_bool_follows_truthiness() {
        assert!(!Value::Nil.to_bool());
        assert!(!Value::int(0).to_bool());
        assert!(Value::int(-3).to_bool());
        assert!(!Value::float(0.0).to_bool());
        assert!(Value::float(0.5).to_bool());
        assert!(!Value::string("").to_bool());
        assert!(Value::string("0").to_bool());
        assert!(!Value::array(vec![]).to_bool());
        assert!(Value::array(vec![Value::Nil]).to_bool());
        assert!(!Value::empty_map().to_bool());
        let native = NativeFunction::new("f", |_, _, _| Ok(Value::Nil));
        assert!(Value::function(Function::Native(native)).to_bool());
    }

    #[test]
    fn numeric_views() {
        assert_eq!(Value::int(7).to_float(), Ok(7.0));
        assert_eq!(Value::float(2.9).to_int(), Ok(2));
        assert_eq!(Value::float(-2.9).to_int(), Ok(-2));
        assert_eq!(Value::bool(true).to_int(), Ok(1));
        assert_eq!(Value::bool(false).to_float(), Ok(0.0));
    }

    #[test]
    fn strings_parse() {
        assert_eq!(Value::string("42").to_int(), Ok(42));
        assert_eq!(Value::string(" 3.75 ").to_int(), Ok(3));
        assert_eq!(Value::string("3.75").to_float(), Ok(3.75));
        assert_eq!(Value::string("-8").to_float(), Ok(-8.0));
    }

    #[test]
    fn unparseable_string_is_conversion_error() {
        assert_eq!(
            kind_of(Value::string("abc").to_int()),
            EvalErrorKind::Conversion {
                text: "abc".into(),
                target: "int"
            }
        );
        assert_eq!(
            kind_of(Value::string("").to_float()),
            EvalErrorKind::Conversion {
                text: String::new(),
                target: "float"
            }
        );
    }

    #[test]
    fn arrays_never_become_numbers() {
        let array = Value::array(vec![Value::int(1)]);
        assert_eq!(
            kind_of(array.to_int()),
            EvalErrorKind::TypeMismatch {
                expected: "number",
                got: "array"
            }
        );
        assert!(matches!(
            kind_of(array.to_float()),
            EvalErrorKind::TypeMismatch { got: "array", .. }
        ));
        assert!(matches!(
            kind_of(Value::Nil.to_int()),
            EvalErrorKind::TypeMismatch { got: "nil", .. }
        ));
        assert!(matches!(
            kind_of(Value::empty_map().to_float()),
            EvalErrorKind::TypeMismatch { got: "map", .. }
        ));
    }
}

mod rendering {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn scalars() {
        assert_eq!(Value::Nil.to_string(), "nil");
        assert_eq!(Value::int(-12).to_string(), "-12");
        assert_eq!(Value::float(1.5).to_string(), "1.5");
        assert_eq!(Value::float(2.0).to_string(), "2.0");
        assert_eq!(Value::bool(true).to_string(), "true");
        assert_eq!(Value::string("hi").to_string(), "hi");
    }

    #[test]
    fn functions_render_as_placeholder() {
        let native = NativeFunction::new("f", |_, _, _| Ok(Value::Nil));
        assert_eq!(
            Value::function(Function::Native(native)).to_string(),
            "<function>"
        );
    }

    #[test]
    fn nested_containers() {
        let inner = Value::array(vec![Value::string("a"), Value::Nil]);
        let outer = Value::array(vec![Value::int(1), inner]);
        assert_eq!(outer.to_string(), "[1, [a, nil]]");
        assert_eq!(Value::array(vec![]).to_string(), "[]");
    }

    #[test]
    fn maps_render_with_sorted_keys() {
        let mut entries = FxHashMap::default();
        entries.insert("b".to_string(), Value::int(2));
        entries.insert("a".to_string(), Value::string("x"));
        assert_eq!(Value::map(entries).to_string(), "{a: x, b: 2}");
        assert_eq!(Value::empty_map().to_string(), "{}");
    }

    #[test]
    fn self_containing_array_elides_the_cycle() {
        let items = Value::array(vec![Value::int(1)]);
        let Value::Array(storage) = &items else {
            unreachable!()
        };
        storage.borrow_mut().push(items.clone());
        assert_eq!(items.to_string(), "[1, [...]]");
        assert_eq!(format!("{items:?}"), "Array([1, [...]])");
        storage.borrow_mut().clear();
    }

    #[test]
    fn self_containing_map_elides_the_cycle() {
        let map = Value::empty_map();
        map.map_set("k", map.clone()).unwrap();
        map.map_set("n", Value::int(1)).unwrap();
        assert_eq!(map.to_string(), "{k: {...}, n: 1}");
        map.map_set("k", Value::Nil).unwrap();
    }

    #[test]
    fn shared_but_acyclic_values_render_in_full() {
        let inner = Value::array(vec![Value::int(1)]);
        let outer = Value::array(vec![inner.clone(), inner]);
        assert_eq!(outer.to_string(), "[[1], [1]]");
    }
}

mod equality {
    use super::*;

    fn cyclic_array(first: i64) -> Value {
        let items = Value::array(vec![Value::int(first)]);
        if let Value::Array(storage) = &items {
            storage.borrow_mut().push(items.clone());
        }
        items
    }

    fn break_cycle(value: &Value) {
        if let Value::Array(storage) = value {
            storage.borrow_mut().clear();
        }
    }

    #[test]
    fn containers_compare_by_contents() {
        let a = Value::array(vec![Value::int(1), Value::string("x")]);
        let b = Value::array(vec![Value::int(1), Value::string("x")]);
        assert!(a == b);
        assert!(a != Value::array(vec![Value::int(1)]));
        let mut left = FxHashMap::default();
        left.insert("a".to_string(), Value::int(1));
        let mut right = FxHashMap::default();
        right.insert("b".to_string(), Value::int(1));
        assert!(Value::map(left) != Value::map(right));
    }

    #[test]
    fn self_containing_arrays_terminate() {
        let a = cyclic_array(1);
        let b = cyclic_array(1);
        let c = cyclic_array(2);
        assert!(a == a.clone());
        assert!(a == b);
        assert!(a != c);
        for value in [&a, &b, &c] {
            break_cycle(value);
        }
    }
}

mod ranges {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn range_is_a_marked_map() {
        let range = Value::range(1, 3);
        assert_eq!(range.type_name(), "map");
        assert_eq!(range.as_range(), Some((1, 3)));
        assert_eq!(range.map_get("start"), Ok(Value::int(1)));
        assert_eq!(range.map_get(crate::RANGE_MARKER), Ok(Value::bool(true)));
    }

    #[test]
    fn plain_map_is_not_a_range() {
        let map = Value::empty_map();
        let _ = map.map_set("start", Value::int(0));
        let _ = map.map_set("end", Value::int(3));
        assert_eq!(map.as_range(), None);
        assert_eq!(Value::int(3).as_range(), None);
    }
}

mod containers {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn index_in_bounds() {
        let array = Value::array(vec![Value::int(10), Value::int(20)]);
        assert_eq!(array.index(1), Ok(Value::int(20)));
    }

    #[test]
    fn index_out_of_bounds_reports_index_and_length() {
        let array = Value::array(vec![Value::int(10), Value::int(20)]);
        assert_eq!(
            kind_of(array.index(2)),
            EvalErrorKind::IndexOutOfBounds { index: 2, len: 2 }
        );
        assert_eq!(
            kind_of(array.index(-1)),
            EvalErrorKind::IndexOutOfBounds { index: -1, len: 2 }
        );
    }

    #[test]
    fn indexing_a_non_array_is_a_type_error() {
        assert_eq!(
            kind_of(Value::empty_map().index(0)),
            EvalErrorKind::TypeMismatch {
                expected: "array",
                got: "map"
            }
        );
    }

    #[test]
    fn map_reads_are_total() {
        let map = Value::empty_map();
        assert_eq!(map.map_get("nope"), Ok(Value::Nil));
        assert_eq!(map.map_set("k", Value::int(1)), Ok(()));
        assert_eq!(map.map_get("k"), Ok(Value::int(1)));
        assert_eq!(map.map_contains("k"), Ok(true));
    }

    #[test]
    fn map_operations_on_non_maps_fail() {
        assert_eq!(
            kind_of(Value::int(1).map_get("k")),
            EvalErrorKind::NotAMap { type_name: "int" }
        );
        assert!(matches!(
            kind_of(Value::array(vec![]).map_set("k", Value::Nil)),
            EvalErrorKind::NotAMap { type_name: "array" }
        ));
    }

    #[test]
    fn containers_share_storage() {
        let array = Value::array(vec![]);
        let alias = array.clone();
        if let Value::Array(items) = &alias {
            items.borrow_mut().push(Value::int(1));
        }
        assert_eq!(array.to_string(), "[1]");
    }
}
