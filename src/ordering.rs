//! Task comparators shared by the strategies and their consumers.
//!
//! # Keys
//!
//! | Comparator | Keys (ascending) | Total? |
//! |------------|------------------|--------|
//! | `greedy_order` | deadline, -priority, name | yes |
//! | `display_order` | deadline, -priority | no |
//!
//! `greedy_order` must be total: task names are not unique identifiers,
//! so only a fully resolved key makes the greedy fill reproducible under
//! input permutation. Tasks equal on all three keys are field-identical
//! apart from difficulty, and either one may come first.

use std::cmp::{Ordering, Reverse};

use crate::models::Task;

/// Earliest deadline first, then highest priority, then smallest name.
pub fn greedy_order(a: &Task, b: &Task) -> Ordering {
    (a.deadline, Reverse(a.priority), a.name.as_str()).cmp(&(
        b.deadline,
        Reverse(b.priority),
        b.name.as_str(),
    ))
}

/// Earliest deadline first, then highest priority. Used for presentation.
pub fn display_order(a: &Task, b: &Task) -> Ordering {
    (a.deadline, Reverse(a.priority)).cmp(&(b.deadline, Reverse(b.priority)))
}
