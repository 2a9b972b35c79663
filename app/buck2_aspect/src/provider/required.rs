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

use allocative::Allocative;
use itertools::Itertools;
use starlark_map::small_set::SmallSet;

use crate::provider::advertised::AdvertisedProviderSet;
use crate::provider::id::ProviderId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Allocative)]
enum Constraint {
    /// Every advertised set satisfies the requirement.
    AcceptAny,
    /// No advertised set satisfies the requirement.
    AcceptNone,
    /// Satisfied when all providers of at least one set are advertised.
    Restricted,
}

/// A requirement over advertised providers, expressed as a disjunction of
/// provider sets: `[[A, B], [C]]` is satisfied by anything advertising both
/// `A` and `B`, or `C`.
#[derive(Debug, Clone, PartialEq, Eq, Allocative)]
pub struct RequiredProviders {
    constraint: Constraint,
    provider_sets: Vec<SmallSet<ProviderId>>,
}

impl RequiredProviders {
    pub fn accept_any() -> RequiredProviders {
        RequiredProviders {
            constraint: Constraint::AcceptAny,
            provider_sets: Vec::new(),
        }
    }

    pub fn accept_none() -> RequiredProviders {
        RequiredProviders {
            constraint: Constraint::AcceptNone,
            provider_sets: Vec::new(),
        }
    }

    /// Builder that accepts anything until the first provider set is added.
    pub fn accept_any_builder() -> RequiredProvidersBuilder {
        RequiredProvidersBuilder {
            constraint: Constraint::AcceptAny,
            provider_sets: Vec::new(),
        }
    }

    /// Builder that accepts nothing until the first provider set is added.
    pub fn accept_none_builder() -> RequiredProvidersBuilder {
        RequiredProvidersBuilder {
            constraint: Constraint::AcceptNone,
            provider_sets: Vec::new(),
        }
    }

    pub fn accepts_any(&self) -> bool {
        self.constraint == Constraint::AcceptAny
    }

    pub fn accepts_none(&self) -> bool {
        self.constraint == Constraint::AcceptNone
    }

    /// The OR-groups of this requirement. Empty unless restricted.
    pub fn provider_sets(&self) -> &[SmallSet<ProviderId>] {
        &self.provider_sets
    }

    pub fn is_satisfied_by(&self, advertised: &AdvertisedProviderSet) -> bool {
        match self.constraint {
            Constraint::AcceptAny => true,
            Constraint::AcceptNone => false,
            Constraint::Restricted => {
                advertised.can_have_any_provider()
                    || self
                        .provider_sets
                        .iter()
                        .any(|set| set.iter().all(|p| advertised.contains(p)))
            }
        }
    }
}

impl Display for RequiredProviders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.constraint {
            Constraint::AcceptAny => write!(f, "<any>"),
            Constraint::AcceptNone => write!(f, "<none>"),
            Constraint::Restricted => write!(
                f,
                "{}",
                self.provider_sets
                    .iter()
                    .map(|set| format!("[{}]", set.iter().join(", ")))
                    .join(" or ")
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RequiredProvidersBuilder {
    constraint: Constraint,
    provider_sets: Vec<SmallSet<ProviderId>>,
}

impl RequiredProvidersBuilder {
    /// Add an OR-group. The requirement becomes restricted even if the set is
    /// empty; callers that want to ignore empty sets must filter them.
    pub fn add_set(&mut self, providers: impl IntoIterator<Item = ProviderId>) -> &mut Self {
        self.constraint = Constraint::Restricted;
        self.provider_sets.push(providers.into_iter().collect());
        self
    }

    /// The builder stays usable after this call.
    pub fn build(&self) -> RequiredProviders {
        RequiredProviders {
            constraint: self.constraint,
            provider_sets: self.provider_sets.clone(),
        }
    }
}
