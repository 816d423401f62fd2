//! Standard natives.

use pretty_assertions::assert_eq;

use super::{err_kind, global, output, parse, session};
use crate::{EvalErrorKind, Interpreter, Value};

#[test]
fn echo_concatenates_without_separator() {
    assert_eq!(output("echo \"a\", 1, 2.5, true\n"), "a12.5true\n");
    assert_eq!(output("echo()\n"), "\n");
    assert_eq!(output("echo([1, \"x\"])\n"), "[1, x]\n");
}

#[test]
fn echo_returns_nil() {
    assert_eq!(global("let r = echo(1)", "r"), Value::Nil);
}

mod len {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn counts_characters_elements_and_entries() {
        assert_eq!(global("let r = len(\"héllo\")", "r"), Value::int(5));
        assert_eq!(global("let r = len([1, 2, 3])", "r"), Value::int(3));
        let source = "\
let m = newMap()
setField(m, \"a\", 1)
setField(m, \"b\", 2)
setField(m, \"a\", 3)
let r = len(m)
";
        assert_eq!(global(source, "r"), Value::int(2));
    }

    #[test]
    fn rejects_scalars() {
        assert_eq!(
            err_kind("let r = len(5)"),
            EvalErrorKind::TypeMismatch {
                expected: "string, array or map",
                got: "int"
            }
        );
    }
}

mod conversions {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn int_float_and_str() {
        assert_eq!(global("let r = int(\"42\")", "r"), Value::int(42));
        assert_eq!(global("let r = int(3.9)", "r"), Value::int(3));
        assert_eq!(global("let r = float(2)", "r"), Value::float(2.0));
        assert_eq!(global("let r = str(12) & \"!\"", "r"), Value::string("12!"));
        assert_eq!(global("let r = str([1, 2])", "r"), Value::string("[1, 2]"));
    }

    #[test]
    fn int_of_garbage_is_a_conversion_error() {
        assert_eq!(
            err_kind("let r = int(\"twelve\")"),
            EvalErrorKind::Conversion {
                text: "twelve".into(),
                target: "int"
            }
        );
    }

    #[test]
    fn stringify_operator_matches_str() {
        assert_eq!(global("let r = $3 == str(3)", "r"), Value::bool(true));
        assert_eq!(global("let r = $1.5", "r"), Value::string("1.5"));
    }
}

mod arrays {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn add_appends_in_place() {
        let source = "\
var xs = []
add(xs, 1)
add(xs, \"two\")
let alias = xs
add(alias, 3)
";
        assert_eq!(global(source, "xs").to_string(), "[1, two, 3]");
    }

    #[test]
    fn add_to_a_non_array_fails() {
        assert_eq!(
            err_kind("add(1, 2)"),
            EvalErrorKind::TypeMismatch {
                expected: "array",
                got: "int"
            }
        );
    }

    #[test]
    fn indexing_in_scripts() {
        assert_eq!(
            global("let xs = [10, 20, 30]\nlet r = xs[1 + 1]\n", "r"),
            Value::int(30)
        );
        assert_eq!(
            err_kind("let xs = [10, 20]\nlet r = xs[2]\n"),
            EvalErrorKind::IndexOutOfBounds { index: 2, len: 2 }
        );
        assert_eq!(
            err_kind("let xs = [10, 20]\nlet r = xs[-1]\n"),
            EvalErrorKind::IndexOutOfBounds { index: -1, len: 2 }
        );
        assert_eq!(
            err_kind("let s = \"abc\"\nlet r = s[0]\n"),
            EvalErrorKind::TypeMismatch {
                expected: "array",
                got: "string"
            }
        );
    }

    #[test]
    fn array_holding_itself_still_prints() {
        let source = "\
var a = [1]
add(a, a)
echo a
echo a & \"!\"
";
        assert_eq!(output(source), "[1, [...]]\n[1, [...]]!\n");
    }
}

mod maps {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn fields_round_trip_and_missing_keys_read_nil() {
        let source = "\
let m = newMap()
setField(m, \"name\", \"nim\")
let a = getField(m, \"name\")
let b = getField(m, \"missing\")
let c = hasKey(m, \"name\")
let d = hasKey(m, \"missing\")
";
        let (_, env) = super::super::run(source);
        assert_eq!(env.get("a"), Ok(Value::string("nim")));
        assert_eq!(env.get("b"), Ok(Value::Nil));
        assert_eq!(env.get("c"), Ok(Value::bool(true)));
        assert_eq!(env.get("d"), Ok(Value::bool(false)));
    }

    #[test]
    fn keys_are_stringified() {
        let source = "\
let m = newMap()
setField(m, 1, \"one\")
let r = getField(m, \"1\")
";
        assert_eq!(global(source, "r"), Value::string("one"));
    }

    #[test]
    fn maps_are_shared_by_reference() {
        let source = "\
let m = newMap()
proc fill(target):
  setField(target, \"k\", 9)
fill(m)
let r = getField(m, \"k\")
";
        assert_eq!(global(source, "r"), Value::int(9));
    }

    #[test]
    fn ranges_are_readable_maps() {
        let source = "\
let r = 2..5
let s = getField(r, \"start\")
let e = getField(r, \"end\")
";
        let (_, env) = super::super::run(source);
        assert_eq!(env.get("s"), Ok(Value::int(2)));
        assert_eq!(env.get("e"), Ok(Value::int(5)));
    }

    #[test]
    fn field_access_on_non_maps_fails() {
        assert_eq!(
            err_kind("getField([1], \"k\")"),
            EvalErrorKind::NotAMap { type_name: "array" }
        );
        assert_eq!(
            err_kind("setField(3, \"k\", 1)"),
            EvalErrorKind::NotAMap { type_name: "int" }
        );
        assert_eq!(
            err_kind("hasKey(\"s\", \"k\")"),
            EvalErrorKind::NotAMap {
                type_name: "string"
            }
        );
    }

    #[test]
    fn map_holding_itself_still_prints() {
        let source = "\
var m = newMap()
setField(m, \"k\", m)
echo m
echo $m
";
        assert_eq!(output(source), "{k: {...}}\n{k: {...}}\n");
    }
}

mod call {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn calls_function_values_with_the_rest() {
        let source = "\
proc add3(a, b, c):
  return a + b + c
let f = add3
let r = call(f, 1, 2, 3)
";
        assert_eq!(global(source, "r"), Value::int(6));
    }

    #[test]
    fn natives_are_first_class_too() {
        assert_eq!(global("let r = call(len, \"abcd\")", "r"), Value::int(4));
    }

    #[test]
    fn calling_a_non_function_fails() {
        assert_eq!(
            err_kind("call(5)"),
            EvalErrorKind::NotCallable {
                name: "<value>".into(),
                type_name: "int"
            }
        );
        assert!(matches!(
            err_kind("call()"),
            EvalErrorKind::NotCallable {
                type_name: "nil",
                ..
            }
        ));
    }
}

mod host_overrides {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn reregistering_replaces_a_builtin() {
        let interp = session();
        interp.register("echo", |interp, _, args| {
            let line: Vec<String> = args.iter().map(ToString::to_string).collect();
            interp.print_handler().println(&format!("> {}", line.join(" ")));
            Ok(Value::Nil)
        });
        assert!(interp.run(&parse("echo 1, 2\n")).is_ok());
        assert_eq!(interp.print_handler().get_output(), "> 1 2\n");
    }

    #[test]
    fn sessions_without_builtins_start_empty() {
        let interp = Interpreter::builder()
            .print_handler(crate::buffer_handler())
            .with_builtins(false)
            .build();
        assert!(interp.native_names().is_empty());
        let err = interp.run(&parse("echo 1\n")).err().map(|e| e.kind);
        assert_eq!(
            err,
            Some(EvalErrorKind::UndefinedVariable {
                name: "echo".into()
            })
        );
    }

    #[test]
    fn builtins_are_listed() {
        let interp = session();
        assert_eq!(
            interp.native_names(),
            vec![
                "add", "call", "echo", "float", "getField", "hasKey", "int", "len", "newMap",
                "setField", "str"
            ]
        );
    }
}
