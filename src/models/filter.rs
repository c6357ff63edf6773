// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Category filter selected in the UI.

use crate::models::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Set of categories currently shown. All categories are active by default.
///
/// An empty set is valid and means "show nothing".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    active: BTreeSet<Category>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self::all()
    }
}

impl FilterState {
    pub fn all() -> Self {
        Self {
            active: Category::ALL.into_iter().collect(),
        }
    }

    pub fn none() -> Self {
        Self {
            active: BTreeSet::new(),
        }
    }

    pub fn is_active(&self, category: Category) -> bool {
        self.active.contains(&category)
    }

    /// Flip one category. Returns whether it is active afterwards.
    pub fn toggle(&mut self, category: Category) -> bool {
        if !self.active.remove(&category) {
            self.active.insert(category);
        }
        self.is_active(category)
    }

    pub fn set(&mut self, category: Category, active: bool) {
        if active {
            self.active.insert(category);
        } else {
            self.active.remove(&category);
        }
    }

    /// Active categories in `Category::ALL` order.
    pub fn active(&self) -> impl Iterator<Item = Category> + '_ {
        self.active.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

impl FromIterator<Category> for FilterState {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        Self {
            active: iter.into_iter().collect(),
        }
    }
}
