//! Native function registry.

use rustc_hash::FxHashMap;

use crate::value::NativeFunction;

/// Natives registered with a session, kept so a reset can reinstall them
/// into a fresh root environment.
#[derive(Clone, Default)]
pub struct NativeRegistry {
    natives: FxHashMap<String, NativeFunction>,
}

impl NativeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a native.
    pub fn insert(&mut self, native: NativeFunction) {
        self.natives.insert(native.name().to_string(), native);
    }

    pub fn get(&self, name: &str) -> Option<&NativeFunction> {
        self.natives.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.natives.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.natives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.natives.is_empty()
    }

    pub fn clear(&mut self) {
        self.natives.clear();
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.natives.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn iter(&self) -> impl Iterator<Item = &NativeFunction> {
        self.natives.values()
    }
}
