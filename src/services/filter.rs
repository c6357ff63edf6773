// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Category filtering of the normalized feature set.

use crate::models::{FilterState, NormalizedFeature};

/// Features whose category is active, in their original order.
///
/// Unknown `custom_type`s were already folded into `Other` at
/// normalization. An empty filter yields an empty subset.
pub fn select_active<'a, I>(features: I, filter: &FilterState) -> Vec<&'a NormalizedFeature>
where
    I: IntoIterator<Item = &'a NormalizedFeature>,
{
    features
        .into_iter()
        .filter(|f| filter.is_active(f.category))
        .collect()
}
