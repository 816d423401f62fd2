//! Lexically scoped variable environments.
//!
//! An `Environment` is a handle to one scope frame. Frames are shared:
//! closures keep their defining frame alive, and a child frame keeps its
//! parent alive.
//!
//! A proc's closure frame usually holds the proc itself, so closure frames
//! form reference cycles. The interpreter keeps [`WeakEnvironment`]
//! handles to them and empties them with [`Environment::clear`] when the
//! session is reset or dropped.
//!
//! Lookup is strict (`get` fails on a missing name) while assignment is
//! permissive (`set` falls back to defining in the local frame).

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use rustc_hash::FxHashMap;

use crate::errors::{undefined_variable, EvalResult};
use crate::value::Value;

/// A single frame of bindings.
#[derive(Default)]
struct Scope {
    bindings: FxHashMap<String, Value>,
    parent: Option<Environment>,
}

/// Shared handle to a scope frame.
#[derive(Clone, Default)]
pub struct Environment(Rc<RefCell<Scope>>);

impl Environment {
    /// Create a root frame with no parent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty frame whose parent is `self`.
    #[must_use]
    pub fn child(&self) -> Self {
        Environment(Rc::new(RefCell::new(Scope {
            bindings: FxHashMap::default(),
            parent: Some(self.clone()),
        })))
    }

    pub fn parent(&self) -> Option<Environment> {
        self.0.borrow().parent.clone()
    }

    /// Bind `name` in this frame, replacing any existing local binding.
    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.0.borrow_mut().bindings.insert(name.into(), value);
    }

    /// Resolve `name` through the parent chain.
    pub fn get(&self, name: &str) -> EvalResult {
        self.lookup(name).ok_or_else(|| undefined_variable(name))
    }

    /// Like [`get`](Self::get), but `None` when unbound.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        let mut current = self.clone();
        loop {
            let parent = {
                let scope = current.0.borrow();
                if let Some(value) = scope.bindings.get(name) {
                    return Some(value.clone());
                }
                scope.parent.clone()
            };
            current = parent?;
        }
    }

    /// Overwrite the nearest existing binding of `name`, or define it in
    /// this frame if no frame in the chain has one.
    pub fn set(&self, name: &str, value: Value) {
        let mut current = Some(self.clone());
        while let Some(env) = current {
            let mut scope = env.0.borrow_mut();
            if let Some(slot) = scope.bindings.get_mut(name) {
                *slot = value;
                return;
            }
            current = scope.parent.clone();
        }
        self.define(name, value);
    }

    /// Whether `name` is bound in this frame (ignoring parents).
    pub fn has_local(&self, name: &str) -> bool {
        self.0.borrow().bindings.contains_key(name)
    }

    /// Names bound in this frame, sorted.
    pub fn local_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.0.borrow().bindings.keys().cloned().collect();
        names.sort();
        names
    }

    /// Whether both handles refer to the same frame.
    pub fn ptr_eq(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Drop every binding in this frame. The parent link is kept.
    pub fn clear(&self) {
        let bindings = std::mem::take(&mut self.0.borrow_mut().bindings);
        drop(bindings);
    }

    /// Non-owning handle to this frame.
    pub fn downgrade(&self) -> WeakEnvironment {
        WeakEnvironment(Rc::downgrade(&self.0))
    }

    /// Number of frames from here to the root, counting this one.
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut current = self.parent();
        while let Some(env) = current {
            depth += 1;
            current = env.parent();
        }
        depth
    }
}

/// Non-owning handle to a scope frame.
#[derive(Clone)]
pub struct WeakEnvironment(Weak<RefCell<Scope>>);

impl WeakEnvironment {
    /// The frame, if anything still owns it.
    pub fn upgrade(&self) -> Option<Environment> {
        self.0.upgrade().map(Environment)
    }

    pub fn is_live(&self) -> bool {
        self.0.strong_count() > 0
    }

    /// Whether this handle refers to `env`'s frame.
    pub fn points_to(&self, env: &Environment) -> bool {
        std::ptr::eq(self.0.as_ptr(), Rc::as_ptr(&env.0))
    }
}

impl fmt::Debug for WeakEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WeakEnvironment")
            .field(&self.is_live())
            .finish()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("locals", &self.local_names())
            .field("depth", &self.depth())
            .finish()
    }
}
