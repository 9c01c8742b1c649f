//! Count/sum aggregates over amount-bearing entities.

use serde::Serialize;
use std::sync::Arc;

/// Derived `{count, sum}` aggregate.
///
/// Never carries independent state: it is always recomputable from the
/// collection it summarizes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Summary {
    /// Number of entities.
    pub count: usize,
    /// Sum of entity amounts, accumulated left to right.
    pub sum: f64,
}

impl Summary {
    /// The summary of an empty collection.
    pub const EMPTY: Self = Self { count: 0, sum: 0.0 };

    /// Create a summary from parts.
    pub const fn new(count: usize, sum: f64) -> Self {
        Self { count, sum }
    }
}

/// An entity that contributes an amount to its parent's summary.
pub trait HasAmount {
    /// The amount this entity contributes.
    fn amount(&self) -> f64;
}

impl<T: HasAmount + ?Sized> HasAmount for Arc<T> {
    fn amount(&self) -> f64 {
        (**self).amount()
    }
}

impl<T: HasAmount + ?Sized> HasAmount for &T {
    fn amount(&self) -> f64 {
        (**self).amount()
    }
}

/// Summarize an ordered collection.
///
/// `count` is the length; `sum` folds the amounts from `0.0` in sequence
/// order so results are bit-for-bit reproducible.
pub fn summarize<T: HasAmount>(items: &[T]) -> Summary {
    let sum = items.iter().fold(0.0, |acc, item| acc + item.amount());
    Summary {
        count: items.len(),
        sum,
    }
}
