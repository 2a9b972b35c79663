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

use crate::provider::id::ProviderId;

/// The providers a target or aspect declares it returns.
///
/// A set that "can have any provider" stands for targets whose providers are
/// not statically known (e.g. alias-like rules); it is treated as a superset
/// of every requirement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Allocative)]
pub struct AdvertisedProviderSet {
    can_have_any_provider: bool,
    providers: SmallSet<ProviderId>,
}

impl AdvertisedProviderSet {
    pub fn any() -> AdvertisedProviderSet {
        AdvertisedProviderSet {
            can_have_any_provider: true,
            providers: SmallSet::new(),
        }
    }

    pub fn empty() -> AdvertisedProviderSet {
        AdvertisedProviderSet::default()
    }

    pub fn builder() -> AdvertisedProviderSetBuilder {
        AdvertisedProviderSetBuilder::default()
    }

    pub fn can_have_any_provider(&self) -> bool {
        self.can_have_any_provider
    }

    pub fn providers(&self) -> impl ExactSizeIterator<Item = &ProviderId> {
        self.providers.iter()
    }

    pub fn contains(&self, provider: &ProviderId) -> bool {
        self.can_have_any_provider || self.providers.contains(provider)
    }

    pub fn is_empty(&self) -> bool {
        !self.can_have_any_provider && self.providers.is_empty()
    }
}

impl Display for AdvertisedProviderSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.can_have_any_provider {
            write!(f, "<any>")
        } else {
            write!(f, "[{}]", self.providers.iter().join(", "))
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AdvertisedProviderSetBuilder {
    can_have_any_provider: bool,
    providers: SmallSet<ProviderId>,
}

impl AdvertisedProviderSetBuilder {
    pub fn add(&mut self, provider: ProviderId) -> &mut Self {
        self.providers.insert(provider);
        self
    }

    pub fn add_all(&mut self, providers: impl IntoIterator<Item = ProviderId>) -> &mut Self {
        self.providers.extend(providers);
        self
    }

    pub fn can_have_any_provider(&mut self) -> &mut Self {
        self.can_have_any_provider = true;
        self
    }

    /// The builder stays usable after this call.
    pub fn build(&self) -> AdvertisedProviderSet {
        if self.can_have_any_provider {
            return AdvertisedProviderSet::any();
        }
        AdvertisedProviderSet {
            can_have_any_provider: false,
            providers: self.providers.clone(),
        }
    }
}
