/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

use std::fmt;
use std::fmt::Display;
use std::hash::Hash;

use allocative::Allocative;
use itertools::Itertools;
use starlark_map::small_set::SmallSet;

/// Which edges of a kind `K` an aspect follows from a target to its
/// dependencies: attribute names for attribute edges, toolchain type labels
/// for toolchain edges.
///
/// The set of edges actually present is only known once a target is
/// analyzed, so this is resolved against it with [`select`](Self::select).
#[derive(Debug, Clone, Allocative)]
pub enum AspectPropagationEdges<K> {
    /// Every edge of this kind, e.g. `attr_aspects = ["*"]`.
    All,
    /// Only the named edges. Empty means the aspect does not propagate.
    Explicit(SmallSet<K>),
}

impl<K: Hash + Eq> AspectPropagationEdges<K> {
    pub fn all() -> Self {
        AspectPropagationEdges::All
    }

    pub fn none() -> Self {
        AspectPropagationEdges::Explicit(SmallSet::new())
    }

    pub fn explicit(edges: impl IntoIterator<Item = K>) -> Self {
        AspectPropagationEdges::Explicit(edges.into_iter().collect())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, AspectPropagationEdges::All)
    }

    pub fn is_none(&self) -> bool {
        match self {
            AspectPropagationEdges::All => false,
            AspectPropagationEdges::Explicit(edges) => edges.is_empty(),
        }
    }

    pub fn propagates_along(&self, edge: &K) -> bool {
        match self {
            AspectPropagationEdges::All => true,
            AspectPropagationEdges::Explicit(edges) => edges.contains(edge),
        }
    }

    /// Subset of `available` to propagate along, in the order of `available`.
    pub fn select<'a>(&self, available: impl IntoIterator<Item = &'a K>) -> Vec<&'a K>
    where
        K: 'a,
    {
        available
            .into_iter()
            .filter(|edge| self.propagates_along(edge))
            .collect()
    }
}

impl<K: Eq> PartialEq for AspectPropagationEdges<K> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (AspectPropagationEdges::All, AspectPropagationEdges::All) => true,
            (AspectPropagationEdges::Explicit(a), AspectPropagationEdges::Explicit(b)) => a == b,
            _ => false,
        }
    }
}

impl<K: Eq> Eq for AspectPropagationEdges<K> {}

impl<K: Display> Display for AspectPropagationEdges<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AspectPropagationEdges::All => write!(f, "[\"*\"]"),
            AspectPropagationEdges::Explicit(edges) => {
                write!(f, "[{}]", edges.iter().map(|e| format!("\"{}\"", e)).join(", "))
            }
        }
    }
}
