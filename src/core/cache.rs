//! Bounded memoization of expression evaluations.
//!
//! Sampling repeatedly evaluates the same expressions at overlapping inputs
//! (a shared x axis across dependent expressions, re-generation after a LOD
//! change). The cache amortizes that with a fixed-capacity map evicting the
//! oldest entry first. It is an explicit object, not module state, so callers
//! own one per evaluation worker and tests can instantiate isolated caches.

use std::collections::{HashMap, VecDeque};

use log::trace;
use ordered_float::OrderedFloat;

use crate::core::expression::{Expression, MAX_VARIABLES};
use crate::errors::EvalError;

/// Default entry capacity.
pub const DEFAULT_CACHE_CAPACITY: usize = 1000;

// Unused binding slots are padded with NaN; OrderedFloat makes that a valid
// hash/eq key, and expression ids keep arities from colliding.
type Key = (u64, [OrderedFloat<f64>; MAX_VARIABLES]);

fn key_for(expr: &Expression, bindings: &[f64]) -> Key {
    let mut vals = [OrderedFloat(f64::NAN); MAX_VARIABLES];
    for (slot, v) in vals.iter_mut().zip(bindings.iter()) {
        *slot = OrderedFloat(*v);
    }
    (expr.id(), vals)
}

/// A bounded FIFO cache of `(expression, bindings) -> value`.
#[derive(Debug)]
pub struct EvalCache {
    entries: HashMap<Key, f64>,
    order: VecDeque<Key>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl Default for EvalCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl EvalCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity.min(DEFAULT_CACHE_CAPACITY)),
            order: VecDeque::with_capacity(capacity.min(DEFAULT_CACHE_CAPACITY)),
            capacity,
            hits: 0,
            misses: 0,
        }
    }

    /// Evaluates `expr` at `bindings`, returning a memoized value when one
    /// exists. Evaluation itself never touches the cache, so no re-entrant
    /// mutation is possible.
    pub fn eval(&mut self, expr: &Expression, bindings: &[f64]) -> Result<f64, EvalError> {
        let key = key_for(expr, bindings);
        if let Some(&v) = self.entries.get(&key) {
            self.hits += 1;
            return Ok(v);
        }
        let v = expr.eval(bindings)?;
        self.misses += 1;
        self.insert(key, v);
        Ok(v)
    }

    fn insert(&mut self, key: Key, value: f64) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
        self.order.push_back(key);
        self.entries.insert(key, value);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// (hits, misses) since construction or the last [`clear`](Self::clear).
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    pub fn clear(&mut self) {
        trace!(
            "clearing eval cache: {} entries, {} hits / {} misses",
            self.entries.len(),
            self.hits,
            self.misses
        );
        self.entries.clear();
        self.order.clear();
        self.hits = 0;
        self.misses = 0;
    }
}
