//! Function values: host natives and user-defined procs.

use std::fmt;
use std::rc::Rc;

use nimini_ir::Stmt;

use crate::environment::Environment;
use crate::errors::EvalResult;
use crate::interpreter::Interpreter;
use crate::value::Value;

/// Host callable. Receives the session, the caller's environment and the
/// evaluated arguments.
pub type NativeFn = Rc<dyn Fn(&Interpreter, &Environment, Vec<Value>) -> EvalResult>;

/// A named host function.
#[derive(Clone)]
pub struct NativeFunction {
    name: Rc<str>,
    func: NativeFn,
}

impl NativeFunction {
    pub fn new<F>(name: &str, func: F) -> Self
    where
        F: Fn(&Interpreter, &Environment, Vec<Value>) -> EvalResult + 'static,
    {
        NativeFunction {
            name: Rc::from(name),
            func: Rc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn call(&self, interp: &Interpreter, env: &Environment, args: Vec<Value>) -> EvalResult {
        (self.func)(interp, env, args)
    }
}

/// A proc declared in script.
pub struct UserFunction {
    pub name: String,
    pub params: Vec<String>,
    pub body: Rc<[Stmt]>,
    /// Environment active where the proc was declared.
    pub closure: Environment,
}

#[derive(Clone)]
pub enum Function {
    Native(NativeFunction),
    User(Rc<UserFunction>),
}

impl Function {
    pub fn name(&self) -> &str {
        match self {
            Function::Native(native) => native.name(),
            Function::User(user) => &user.name,
        }
    }

    /// Identity comparison.
    pub fn ptr_eq(&self, other: &Function) -> bool {
        match (self, other) {
            (Function::Native(a), Function::Native(b)) => Rc::ptr_eq(&a.func, &b.func),
            (Function::User(a), Function::User(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Function::Native(native) => write!(f, "<native {}>", native.name()),
            Function::User(user) => write!(f, "<proc {}({})>", user.name, user.params.join(", ")),
        }
    }
}
