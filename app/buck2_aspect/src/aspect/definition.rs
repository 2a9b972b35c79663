/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

use allocative::Allocative;
use starlark_map::small_map::SmallMap;
use starlark_map::small_set::SmallSet;

use crate::aspect::builder::AspectDefinitionBuilder;
use crate::aspect::class::AspectClass;
use crate::aspect::exec_group::DeclaredExecGroup;
use crate::aspect::fragments::ConfigurationFragmentPolicy;
use crate::aspect::predicate::AspectPropagationPredicate;
use crate::aspect::propagation::AspectPropagationEdges;
use crate::aspect::subrule::SubruleId;
use crate::aspect::toolchain::ToolchainTypeRequirement;
use crate::aspect::Aspect;
use crate::attrs::attr::Attribute;
use crate::label::TargetLabel;
use crate::provider::advertised::AdvertisedProviderSet;
use crate::provider::required::RequiredProviders;

/// The definition of an aspect.
///
/// Holds what graph construction needs to know about an aspect without
/// running its implementation:
///
/// * which targets it can be applied to (required providers, propagation
///   predicate, files or generating rules),
/// * which edges it propagates along,
/// * the dependencies the aspect itself has, through its implicit and
///   late-bound attributes,
/// * the aspects it requires to be applied before it.
///
/// Created by [`AspectDefinitionBuilder::build`], immutable afterwards and
/// shared between all analyses that apply the aspect.
#[derive(Debug, Allocative)]
pub struct AspectDefinition {
    pub(crate) aspect_class: AspectClass,
    pub(crate) advertised_providers: AdvertisedProviderSet,
    pub(crate) required_providers: RequiredProviders,
    pub(crate) required_providers_for_aspects: RequiredProviders,
    pub(crate) attributes: SmallMap<String, Attribute>,
    pub(crate) toolchain_types: SmallSet<ToolchainTypeRequirement>,
    pub(crate) attribute_propagation: AspectPropagationEdges<String>,
    pub(crate) toolchain_propagation: AspectPropagationEdges<TargetLabel>,
    pub(crate) configuration_fragment_policy: ConfigurationFragmentPolicy,
    pub(crate) apply_to_files: bool,
    pub(crate) apply_to_generating_rules: bool,
    pub(crate) required_aspect_classes: SmallSet<AspectClass>,
    pub(crate) propagation_predicate: Option<AspectPropagationPredicate>,
    pub(crate) exec_compatible_with: SmallSet<TargetLabel>,
    pub(crate) exec_groups: SmallMap<String, DeclaredExecGroup>,
    pub(crate) subrules: SmallSet<SubruleId>,
}

static_assertions::assert_impl_all!(AspectDefinition: Send, Sync);

impl AspectDefinition {
    pub fn builder(aspect_class: AspectClass) -> AspectDefinitionBuilder {
        AspectDefinitionBuilder::new(aspect_class)
    }

    pub fn aspect_class(&self) -> &AspectClass {
        &self.aspect_class
    }

    pub fn name(&self) -> String {
        self.aspect_class.name()
    }

    pub fn advertised_providers(&self) -> &AdvertisedProviderSet {
        &self.advertised_providers
    }

    /// Providers a target must advertise for this aspect to be applied to it.
    ///
    /// Targets that do not satisfy these are skipped, which is not an error.
    pub fn required_providers(&self) -> &RequiredProviders {
        &self.required_providers
    }

    /// This aspect only depends on other aspects applied to the same target
    /// if they advertise providers satisfying this.
    pub fn required_providers_for_aspects(&self) -> &RequiredProviders {
        &self.required_providers_for_aspects
    }

    /// Attributes in declaration order. All of them are implicit, late-bound,
    /// or public with a restricted set of values.
    pub fn attributes(&self) -> &SmallMap<String, Attribute> {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    pub fn toolchain_types(&self) -> impl ExactSizeIterator<Item = &ToolchainTypeRequirement> {
        self.toolchain_types.iter()
    }

    /// Attribute edges the aspect propagates along.
    pub fn attribute_propagation(&self) -> &AspectPropagationEdges<String> {
        &self.attribute_propagation
    }

    /// Toolchain types whose resolved toolchains the aspect propagates to.
    pub fn toolchain_propagation(&self) -> &AspectPropagationEdges<TargetLabel> {
        &self.toolchain_propagation
    }

    pub fn configuration_fragment_policy(&self) -> &ConfigurationFragmentPolicy {
        &self.configuration_fragment_policy
    }

    /// Whether the aspect applies to output files. Only meaningful for
    /// top-level aspects.
    pub fn apply_to_files(&self) -> bool {
        self.apply_to_files
    }

    /// Whether the aspect, when it would apply to an output file, applies to
    /// the rule generating that file instead.
    pub fn apply_to_generating_rules(&self) -> bool {
        self.apply_to_generating_rules
    }

    pub fn required_aspect_classes(&self) -> impl ExactSizeIterator<Item = &AspectClass> {
        self.required_aspect_classes.iter()
    }

    pub fn propagation_predicate(&self) -> Option<&AspectPropagationPredicate> {
        self.propagation_predicate.as_ref()
    }

    /// Constraints an execution platform must satisfy to run this aspect's
    /// actions.
    pub fn exec_compatible_with(&self) -> impl ExactSizeIterator<Item = &TargetLabel> {
        self.exec_compatible_with.iter()
    }

    pub fn exec_groups(&self) -> &SmallMap<String, DeclaredExecGroup> {
        &self.exec_groups
    }

    pub fn subrules(&self) -> impl ExactSizeIterator<Item = &SubruleId> {
        self.subrules.iter()
    }

    /// Whether `aspect` can be applied to a target advertising `advertised`.
    pub fn satisfies(aspect: &Aspect, advertised: &AdvertisedProviderSet) -> bool {
        aspect
            .definition()
            .required_providers
            .is_satisfied_by(advertised)
    }

    /// Whether `maybe_required` must be applied before this aspect.
    pub fn requires(&self, maybe_required: &Aspect) -> bool {
        self.required_aspect_classes
            .contains(maybe_required.aspect_class())
    }
}
