//! Runtime values.
//!
//! `Value` is the only type that crosses the native-function boundary.
//! Integers and floats are separate kinds; the other numeric view of a
//! number is computed on demand by [`Value::to_int`] and
//! [`Value::to_float`], which always agree with the stored value.
//!
//! Arrays and maps are shared, mutable containers: cloning a `Value`
//! clones the handle, not the contents.

mod function;

pub use function::{Function, NativeFn, NativeFunction, UserFunction};

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::errors::{
    conversion_error, index_out_of_bounds, not_a_map, type_mismatch, EvalError, EvalResult,
};

/// Shared, growable array storage.
pub type ArrayRef = Rc<RefCell<Vec<Value>>>;

/// Shared string-keyed map storage.
pub type MapRef = Rc<RefCell<FxHashMap<String, Value>>>;

/// Key marking a map as a range produced by `..` or `..<`.
pub const RANGE_MARKER: &str = "__range";
const RANGE_START: &str = "start";
const RANGE_END: &str = "end";

#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Nil,
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    Function(Function),
    Map(MapRef),
    Array(ArrayRef),
}

impl Value {
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    #[inline]
    pub fn float(f: f64) -> Self {
        Value::Float(f)
    }

    #[inline]
    pub fn bool(b: bool) -> Self {
        Value::Bool(b)
    }

    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Rc::new(RefCell::new(items)))
    }

    pub fn map(entries: FxHashMap<String, Value>) -> Self {
        Value::Map(Rc::new(RefCell::new(entries)))
    }

    pub fn empty_map() -> Self {
        Value::map(FxHashMap::default())
    }

    pub fn function(function: Function) -> Self {
        Value::Function(function)
    }

    /// Range value covering `start..=end`.
    pub fn range(start: i64, end: i64) -> Self {
        let mut entries = FxHashMap::default();
        entries.insert(RANGE_START.to_string(), Value::Int(start));
        entries.insert(RANGE_END.to_string(), Value::Int(end));
        entries.insert(RANGE_MARKER.to_string(), Value::Bool(true));
        Value::map(entries)
    }

    /// Inclusive bounds, if this is a range value.
    pub fn as_range(&self) -> Option<(i64, i64)> {
        let Value::Map(map) = self else {
            return None;
        };
        let map = map.borrow();
        if !matches!(map.get(RANGE_MARKER), Some(Value::Bool(true))) {
            return None;
        }
        match (map.get(RANGE_START), map.get(RANGE_END)) {
            (Some(Value::Int(start)), Some(Value::Int(end))) => Some((*start, *end)),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Str(_) => "string",
            Value::Function(_) => "function",
            Value::Map(_) => "map",
            Value::Array(_) => "array",
        }
    }

    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn to_bool(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::Bool(b) => *b,
            Value::Str(s) => !s.is_empty(),
            Value::Function(_) => true,
            Value::Map(map) => !map.borrow().is_empty(),
            Value::Array(items) => !items.borrow().is_empty(),
        }
    }

    /// Integer view. Floats truncate toward zero (saturating at the
    /// `i64` bounds); strings are parsed.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "float to int truncation is the language's conversion"
    )]
    pub fn to_int(&self) -> Result<i64, EvalError> {
        match self {
            Value::Int(n) => Ok(*n),
            Value::Float(f) => Ok(*f as i64),
            Value::Bool(b) => Ok(i64::from(*b)),
            Value::Str(s) => {
                let text = s.trim();
                if let Ok(n) = text.parse::<i64>() {
                    return Ok(n);
                }
                text.parse::<f64>()
                    .map(|f| f as i64)
                    .map_err(|_| conversion_error(s, "int"))
            }
            other => Err(type_mismatch("number", other.type_name())),
        }
    }

    /// Float view. Strings are parsed.
    #[expect(
        clippy::cast_precision_loss,
        reason = "int to float follows IEEE-754 rounding"
    )]
    pub fn to_float(&self) -> Result<f64, EvalError> {
        match self {
            Value::Int(n) => Ok(*n as f64),
            Value::Float(f) => Ok(*f),
            Value::Bool(b) => Ok(f64::from(u8::from(*b))),
            Value::Str(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| conversion_error(s, "float")),
            other => Err(type_mismatch("number", other.type_name())),
        }
    }

    /// Element `index` of an array.
    pub fn index(&self, index: i64) -> EvalResult {
        let Value::Array(items) = self else {
            return Err(type_mismatch("array", self.type_name()));
        };
        let items = items.borrow();
        usize::try_from(index)
            .ok()
            .and_then(|i| items.get(i))
            .cloned()
            .ok_or_else(|| index_out_of_bounds(index, items.len()))
    }

    /// Read a map entry. Missing keys read as nil.
    pub fn map_get(&self, key: &str) -> EvalResult {
        match self {
            Value::Map(map) => Ok(map.borrow().get(key).cloned().unwrap_or_default()),
            other => Err(not_a_map(other.type_name())),
        }
    }

    pub fn map_set(&self, key: impl Into<String>, value: Value) -> Result<(), EvalError> {
        match self {
            Value::Map(map) => {
                map.borrow_mut().insert(key.into(), value);
                Ok(())
            }
            other => Err(not_a_map(other.type_name())),
        }
    }

    pub fn map_contains(&self, key: &str) -> Result<bool, EvalError> {
        match self {
            Value::Map(map) => Ok(map.borrow().contains_key(key)),
            other => Err(not_a_map(other.type_name())),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

/// Identity of a shared container, for cycle detection.
type ContainerId = *const ();

fn array_id(items: &ArrayRef) -> ContainerId {
    Rc::as_ptr(items).cast()
}

fn map_id(map: &MapRef) -> ContainerId {
    Rc::as_ptr(map).cast()
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.eq_guarded(other, &mut Vec::new())
    }
}

impl Value {
    /// Structural equality. A pair of containers already being compared
    /// further up counts as equal, so self-containing values terminate.
    #[expect(clippy::float_cmp, reason = "structural equality, not numeric comparison")]
    fn eq_guarded(&self, other: &Self, active: &mut Vec<(ContainerId, ContainerId)>) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Array(a), Value::Array(b)) => {
                let pair = (array_id(a), array_id(b));
                if Rc::ptr_eq(a, b) || active.contains(&pair) {
                    return true;
                }
                let (a, b) = (a.borrow(), b.borrow());
                if a.len() != b.len() {
                    return false;
                }
                active.push(pair);
                let equal = a.iter().zip(b.iter()).all(|(x, y)| x.eq_guarded(y, active));
                active.pop();
                equal
            }
            (Value::Map(a), Value::Map(b)) => {
                let pair = (map_id(a), map_id(b));
                if Rc::ptr_eq(a, b) || active.contains(&pair) {
                    return true;
                }
                let (a, b) = (a.borrow(), b.borrow());
                if a.len() != b.len() {
                    return false;
                }
                active.push(pair);
                let equal = a
                    .iter()
                    .all(|(key, x)| b.get(key).is_some_and(|y| x.eq_guarded(y, active)));
                active.pop();
                equal
            }
            _ => false,
        }
    }

    /// Render into `f`. A container met again while it is still being
    /// rendered prints as `[...]` or `{...}`.
    fn render(&self, f: &mut fmt::Formatter<'_>, active: &mut Vec<ContainerId>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::Function(_) => write!(f, "<function>"),
            Value::Array(items) => {
                let id = array_id(items);
                if active.contains(&id) {
                    return write!(f, "[...]");
                }
                active.push(id);
                write!(f, "[")?;
                for (i, item) in items.borrow().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    item.render(f, active)?;
                }
                active.pop();
                write!(f, "]")
            }
            Value::Map(map) => {
                let id = map_id(map);
                if active.contains(&id) {
                    return write!(f, "{{...}}");
                }
                active.push(id);
                let map = map.borrow();
                let mut entries: Vec<(&String, &Value)> = map.iter().collect();
                entries.sort_by(|a, b| a.0.cmp(b.0));
                write!(f, "{{")?;
                for (i, (key, value)) in entries.into_iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: ")?;
                    value.render(f, active)?;
                }
                active.pop();
                write!(f, "}}")
            }
        }
    }
}

/// Canonical rendering, as used by `$`, `&` and `echo`.
///
/// Map keys are rendered in sorted order.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, &mut Vec::new())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "Nil"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(x) => write!(f, "Float({x:?})"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Str(s) => write!(f, "Str({s:?})"),
            Value::Function(func) => write!(f, "{func:?}"),
            Value::Array(_) => write!(f, "Array({self})"),
            Value::Map(_) => write!(f, "Map({self})"),
        }
    }
}
