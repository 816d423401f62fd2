//! Standard natives registered by default.
//!
//! Missing arguments read as nil and extra arguments are ignored, the same
//! as for procs. Hosts can replace any of these by registering the same
//! name again.

#![allow(
    clippy::needless_pass_by_value,
    reason = "every native shares the NativeFn signature"
)]

use crate::environment::Environment;
use crate::errors::{type_mismatch, EvalResult};
use crate::interpreter::Interpreter;
use crate::value::Value;

/// Install every standard native into `interp`.
pub fn register_builtins(interp: &Interpreter) {
    interp.register("echo", echo);
    interp.register("len", len);
    interp.register("int", int);
    interp.register("float", float);
    interp.register("str", stringify);
    interp.register("add", add);
    interp.register("newMap", new_map);
    interp.register("getField", get_field);
    interp.register("setField", set_field);
    interp.register("hasKey", has_key);
    interp.register("call", call);
}

fn arg(args: &[Value], index: usize) -> Value {
    args.get(index).cloned().unwrap_or_default()
}

fn count(n: usize) -> Value {
    Value::Int(i64::try_from(n).unwrap_or(i64::MAX))
}

/// Print the renderings of all arguments, concatenated, then a newline.
fn echo(interp: &Interpreter, _env: &Environment, args: Vec<Value>) -> EvalResult {
    let line: String = args.iter().map(ToString::to_string).collect();
    interp.print_handler().println(&line);
    Ok(Value::Nil)
}

fn len(_interp: &Interpreter, _env: &Environment, args: Vec<Value>) -> EvalResult {
    match &arg(&args, 0) {
        Value::Str(s) => Ok(count(s.chars().count())),
        Value::Array(items) => Ok(count(items.borrow().len())),
        Value::Map(map) => Ok(count(map.borrow().len())),
        other => Err(type_mismatch("string, array or map", other.type_name())),
    }
}

fn int(_interp: &Interpreter, _env: &Environment, args: Vec<Value>) -> EvalResult {
    arg(&args, 0).to_int().map(Value::Int)
}

fn float(_interp: &Interpreter, _env: &Environment, args: Vec<Value>) -> EvalResult {
    arg(&args, 0).to_float().map(Value::Float)
}

fn stringify(_interp: &Interpreter, _env: &Environment, args: Vec<Value>) -> EvalResult {
    Ok(Value::string(arg(&args, 0).to_string()))
}

/// Append to an array in place.
fn add(_interp: &Interpreter, _env: &Environment, args: Vec<Value>) -> EvalResult {
    match &arg(&args, 0) {
        Value::Array(items) => {
            items.borrow_mut().push(arg(&args, 1));
            Ok(Value::Nil)
        }
        other => Err(type_mismatch("array", other.type_name())),
    }
}

fn new_map(_interp: &Interpreter, _env: &Environment, _args: Vec<Value>) -> EvalResult {
    Ok(Value::empty_map())
}

fn get_field(_interp: &Interpreter, _env: &Environment, args: Vec<Value>) -> EvalResult {
    arg(&args, 0).map_get(&arg(&args, 1).to_string())
}

fn set_field(_interp: &Interpreter, _env: &Environment, args: Vec<Value>) -> EvalResult {
    arg(&args, 0).map_set(arg(&args, 1).to_string(), arg(&args, 2))?;
    Ok(Value::Nil)
}

fn has_key(_interp: &Interpreter, _env: &Environment, args: Vec<Value>) -> EvalResult {
    arg(&args, 0)
        .map_contains(&arg(&args, 1).to_string())
        .map(Value::Bool)
}

/// `call(f, args...)`: invoke a function value.
fn call(interp: &Interpreter, env: &Environment, mut args: Vec<Value>) -> EvalResult {
    if args.is_empty() {
        return interp.call_value(&Value::Nil, Vec::new(), env);
    }
    let callee = args.remove(0);
    interp.call_value(&callee, args, env)
}
