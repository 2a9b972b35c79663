/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

//! Configuration fragments an aspect implementation reads, and what to do
//! when the configuration lacks one of them.

use allocative::Allocative;
use derive_more::Display;
use dupe::Dupe;
use starlark_map::small_map::SmallMap;
use starlark_map::small_set::SmallSet;

#[derive(Debug, Clone, Copy, Dupe, Eq, PartialEq, Hash, Display, Allocative)]
pub enum MissingFragmentPolicy {
    /// Fail the analysis of the target.
    #[display(fmt = "fail_analysis")]
    FailAnalysis,
    /// Create actions that fail at execution time.
    #[display(fmt = "create_fail_actions")]
    CreateFailActions,
    /// Carry on without the fragment.
    #[display(fmt = "ignore")]
    Ignore,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Allocative)]
pub struct ConfigurationFragmentPolicy {
    required_fragments: SmallSet<String>,
    required_starlark_fragments: SmallSet<String>,
    missing_fragment_policy: SmallMap<String, MissingFragmentPolicy>,
}

impl ConfigurationFragmentPolicy {
    pub fn builder() -> ConfigurationFragmentPolicyBuilder {
        ConfigurationFragmentPolicyBuilder::default()
    }

    /// Fragments required by their native name.
    pub fn required_fragments(&self) -> impl ExactSizeIterator<Item = &str> {
        self.required_fragments.iter().map(String::as_str)
    }

    /// Fragments required by the name they are exposed to Starlark under.
    pub fn required_starlark_fragments(&self) -> impl ExactSizeIterator<Item = &str> {
        self.required_starlark_fragments.iter().map(String::as_str)
    }

    pub fn is_legal_configuration_fragment(&self, fragment: &str) -> bool {
        self.required_fragments.contains(fragment)
            || self.required_starlark_fragments.contains(fragment)
    }

    pub fn missing_fragment_policy(&self, fragment: &str) -> MissingFragmentPolicy {
        self.missing_fragment_policy
            .get(fragment)
            .copied()
            .unwrap_or(MissingFragmentPolicy::FailAnalysis)
    }

    pub fn is_empty(&self) -> bool {
        self.required_fragments.is_empty()
            && self.required_starlark_fragments.is_empty()
            && self.missing_fragment_policy.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigurationFragmentPolicyBuilder {
    policy: ConfigurationFragmentPolicy,
}

impl ConfigurationFragmentPolicyBuilder {
    pub fn requires_configuration_fragments<'a>(
        &mut self,
        fragments: impl IntoIterator<Item = &'a str>,
    ) -> &mut Self {
        self.policy
            .required_fragments
            .extend(fragments.into_iter().map(str::to_owned));
        self
    }

    pub fn requires_configuration_fragments_by_starlark_builtin_name<'a>(
        &mut self,
        fragments: impl IntoIterator<Item = &'a str>,
    ) -> &mut Self {
        self.policy
            .required_starlark_fragments
            .extend(fragments.into_iter().map(str::to_owned));
        self
    }

    pub fn set_missing_fragment_policy(
        &mut self,
        fragment: &str,
        policy: MissingFragmentPolicy,
    ) -> &mut Self {
        self.policy
            .missing_fragment_policy
            .insert(fragment.to_owned(), policy);
        self
    }

    pub fn build(&self) -> ConfigurationFragmentPolicy {
        self.policy.clone()
    }
}
