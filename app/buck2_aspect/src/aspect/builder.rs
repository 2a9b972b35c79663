/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

use starlark_map::small_map;
use starlark_map::small_map::SmallMap;
use starlark_map::small_set::SmallSet;

use crate::aspect::class::AspectClass;
use crate::aspect::definition::AspectDefinition;
use crate::aspect::exec_group::validate_exec_group_name;
use crate::aspect::exec_group::DeclaredExecGroup;
use crate::aspect::exec_group::ExecGroupError;
use crate::aspect::fragments::ConfigurationFragmentPolicy;
use crate::aspect::fragments::ConfigurationFragmentPolicyBuilder;
use crate::aspect::fragments::MissingFragmentPolicy;
use crate::aspect::predicate::AspectPropagationPredicate;
use crate::aspect::propagation::AspectPropagationEdges;
use crate::aspect::subrule::SubruleId;
use crate::aspect::toolchain::ToolchainTypeRequirement;
use crate::attrs::attr::Attribute;
use crate::attrs::attr_type::AttrType;
use crate::attrs::attr_type::LabelClass;
use crate::label::TargetLabel;
use crate::provider::advertised::AdvertisedProviderSet;
use crate::provider::advertised::AdvertisedProviderSetBuilder;
use crate::provider::id::ProviderId;
use crate::provider::required::RequiredProviders;
use crate::provider::required::RequiredProvidersBuilder;

/// An attribute cannot be declared on an aspect.
#[derive(Debug, thiserror::Error)]
pub enum InvalidAttributeError {
    #[error(
        "{aspect}: Invalid attribute `{attribute}` ({attr_type}): public aspect attributes \
        must be `bool`, or `int` or `string` with a list of allowed values"
    )]
    InvalidPublicAttribute {
        aspect: String,
        attribute: String,
        attr_type: AttrType,
    },
    #[error("{aspect}: Invalid attribute `{attribute}` ({attr_type}) with computed default dependencies")]
    ComputedDefaultDependency {
        aspect: String,
        attribute: String,
        attr_type: AttrType,
    },
    #[error("{aspect}: An attribute with the name `{attribute}` already exists")]
    DuplicateAttribute { aspect: String, attribute: String },
}

/// Settings of a builder that cannot be combined.
#[derive(Debug, thiserror::Error)]
pub enum InconsistentDefinitionError {
    #[error(
        "{0}: An aspect cannot simultaneously have required providers and apply to generating rules"
    )]
    RequiredProvidersWithGeneratingRules(String),
    #[error(
        "{0}: An aspect cannot simultaneously have a propagation predicate and apply to generating rules"
    )]
    PredicateWithGeneratingRules(String),
    #[error("{0}: An aspect cannot simultaneously have required providers and apply to files")]
    RequiredProvidersWithFiles(String),
    #[error("{0}: An aspect cannot simultaneously have a propagation predicate and apply to files")]
    PredicateWithFiles(String),
}

/// Mutable assembly of an [`AspectDefinition`].
///
/// Setters can be called in any order; settings that depend on each other are
/// only checked by [`build`](Self::build). The builder can be used again after
/// `build`, and later definitions see everything added so far.
#[derive(Debug, Clone)]
pub struct AspectDefinitionBuilder {
    aspect_class: AspectClass,
    attributes: SmallMap<String, Attribute>,
    advertised_providers: AdvertisedProviderSetBuilder,
    required_providers: RequiredProvidersBuilder,
    required_aspect_providers: RequiredProvidersBuilder,
    attribute_propagation: AspectPropagationEdges<String>,
    toolchain_propagation: AspectPropagationEdges<TargetLabel>,
    configuration_fragment_policy: ConfigurationFragmentPolicyBuilder,
    apply_to_files: bool,
    apply_to_generating_rules: bool,
    toolchain_types: SmallSet<ToolchainTypeRequirement>,
    required_aspect_classes: SmallSet<AspectClass>,
    propagation_predicate: Option<AspectPropagationPredicate>,
    exec_compatible_with: SmallSet<TargetLabel>,
    exec_groups: SmallMap<String, DeclaredExecGroup>,
    subrules: SmallSet<SubruleId>,
}

impl AspectDefinitionBuilder {
    pub fn new(aspect_class: AspectClass) -> AspectDefinitionBuilder {
        AspectDefinitionBuilder {
            aspect_class,
            attributes: SmallMap::new(),
            advertised_providers: AdvertisedProviderSet::builder(),
            required_providers: RequiredProviders::accept_any_builder(),
            required_aspect_providers: RequiredProviders::accept_none_builder(),
            attribute_propagation: AspectPropagationEdges::all(),
            // Toolchains are only propagated to when asked for explicitly.
            toolchain_propagation: AspectPropagationEdges::none(),
            configuration_fragment_policy: ConfigurationFragmentPolicy::builder(),
            apply_to_files: false,
            apply_to_generating_rules: false,
            toolchain_types: SmallSet::new(),
            required_aspect_classes: SmallSet::new(),
            propagation_predicate: None,
            exec_compatible_with: SmallSet::new(),
            exec_groups: SmallMap::new(),
            subrules: SmallSet::new(),
        }
    }

    pub fn aspect_class(&self) -> &AspectClass {
        &self.aspect_class
    }

    /// Require the provider sets of `required_providers` from targets.
    pub fn require_providers(&mut self, required_providers: &RequiredProviders) -> &mut Self {
        self.require_provider_sets(required_providers.provider_sets().iter().cloned())
    }

    /// The aspect is only applied to targets that advertise all providers of
    /// at least one of the sets. Empty sets are ignored.
    pub fn require_provider_sets(
        &mut self,
        provider_sets: impl IntoIterator<Item = impl IntoIterator<Item = ProviderId>>,
    ) -> &mut Self {
        for set in provider_sets {
            let set: Vec<ProviderId> = set.into_iter().collect();
            if !set.is_empty() {
                self.required_providers.add_set(set);
            }
        }
        self
    }

    /// The aspect is only applied to targets that advertise all of `providers`.
    pub fn require_providers_list(
        &mut self,
        providers: impl IntoIterator<Item = ProviderId>,
    ) -> &mut Self {
        self.required_providers.add_set(providers);
        self
    }

    /// Aspects that must be applied to a target before this one.
    pub fn required_aspect_classes(
        &mut self,
        required_aspect_classes: impl IntoIterator<Item = AspectClass>,
    ) -> &mut Self {
        self.required_aspect_classes = required_aspect_classes.into_iter().collect();
        self
    }

    pub fn propagation_predicate(&mut self, predicate: AspectPropagationPredicate) -> &mut Self {
        self.propagation_predicate = Some(predicate);
        self
    }

    /// This aspect sees other aspects applied to the same target only if they
    /// advertise all providers of at least one of the sets. Empty sets are
    /// ignored.
    pub fn require_aspects_with_providers(
        &mut self,
        provider_sets: impl IntoIterator<Item = impl IntoIterator<Item = ProviderId>>,
    ) -> &mut Self {
        for set in provider_sets {
            let set: Vec<ProviderId> = set.into_iter().collect();
            if !set.is_empty() {
                self.required_aspect_providers.add_set(set);
            }
        }
        self
    }

    pub fn advertise_providers(
        &mut self,
        providers: impl IntoIterator<Item = ProviderId>,
    ) -> &mut Self {
        self.advertised_providers.add_all(providers);
        self
    }

    pub fn propagate_to_attributes(&mut self, edges: AspectPropagationEdges<String>) -> &mut Self {
        self.attribute_propagation = edges;
        self
    }

    pub fn propagate_to_toolchain_types(
        &mut self,
        edges: AspectPropagationEdges<TargetLabel>,
    ) -> &mut Self {
        self.toolchain_propagation = edges;
        self
    }

    /// Add an attribute to the aspect.
    ///
    /// Implicit (`$`) and late-bound (`:`) attributes may have any type.
    /// Public attributes must be `bool`, or `int` or `string` restricted to a
    /// list of allowed values, because their value is given where the aspect
    /// is requested, not per target.
    ///
    /// Dependency attributes cannot have computed defaults: their labels must
    /// be known without a target, so that dependencies of the aspect can be
    /// listed (e.g. by query) before analysis.
    ///
    /// On error the builder is unchanged.
    pub fn add(&mut self, attribute: Attribute) -> anyhow::Result<&mut Self> {
        let attr_type = attribute.coercer();
        let public_allowed = match attr_type {
            AttrType::Bool => true,
            AttrType::Int | AttrType::String => attribute.check_allowed_values(),
            _ => false,
        };
        if !(attribute.is_implicit() || attribute.is_late_bound() || public_allowed) {
            return Err(InvalidAttributeError::InvalidPublicAttribute {
                aspect: self.aspect_class.name(),
                attribute: attribute.name().to_owned(),
                attr_type,
            }
            .into());
        }

        if attribute.label_class() == LabelClass::Dependency && attribute.has_computed_default() {
            return Err(InvalidAttributeError::ComputedDefaultDependency {
                aspect: self.aspect_class.name(),
                attribute: attribute.name().to_owned(),
                attr_type,
            }
            .into());
        }

        match self.attributes.entry(attribute.name().to_owned()) {
            small_map::Entry::Vacant(e) => {
                e.insert(attribute);
            }
            small_map::Entry::Occupied(e) => {
                return Err(InvalidAttributeError::DuplicateAttribute {
                    aspect: self.aspect_class.name(),
                    attribute: e.key().to_owned(),
                }
                .into());
            }
        }
        Ok(self)
    }

    /// Configuration fragments the aspect implementation reads.
    pub fn requires_configuration_fragments<'a>(
        &mut self,
        fragments: impl IntoIterator<Item = &'a str>,
    ) -> &mut Self {
        self.configuration_fragment_policy
            .requires_configuration_fragments(fragments);
        self
    }

    /// Like [`requires_configuration_fragments`](Self::requires_configuration_fragments),
    /// with the names fragments are exposed to Starlark under.
    pub fn requires_configuration_fragments_by_starlark_builtin_name<'a>(
        &mut self,
        fragments: impl IntoIterator<Item = &'a str>,
    ) -> &mut Self {
        self.configuration_fragment_policy
            .requires_configuration_fragments_by_starlark_builtin_name(fragments);
        self
    }

    pub fn set_missing_fragment_policy(
        &mut self,
        fragment: &str,
        policy: MissingFragmentPolicy,
    ) -> &mut Self {
        self.configuration_fragment_policy
            .set_missing_fragment_policy(fragment, policy);
        self
    }

    /// Apply the aspect to output files. Only supported for top-level
    /// aspects. Default is `false`.
    pub fn apply_to_files(&mut self, apply_to_files: bool) -> &mut Self {
        self.apply_to_files = apply_to_files;
        self
    }

    /// When the aspect would be applied to an output file, apply it to the
    /// rule generating that file instead. Default is `false`.
    pub fn apply_to_generating_rules(&mut self, apply_to_generating_rules: bool) -> &mut Self {
        self.apply_to_generating_rules = apply_to_generating_rules;
        self
    }

    pub fn add_toolchain_types(
        &mut self,
        toolchain_types: impl IntoIterator<Item = ToolchainTypeRequirement>,
    ) -> &mut Self {
        self.toolchain_types.extend(toolchain_types);
        self
    }

    /// Constraint values an execution platform must have for this aspect.
    pub fn exec_compatible_with(
        &mut self,
        constraints: impl IntoIterator<Item = TargetLabel>,
    ) -> &mut Self {
        self.exec_compatible_with = constraints.into_iter().collect();
        self
    }

    /// Execution groups available to actions of this aspect.
    ///
    /// Replaces previously set groups. Fails without changing the builder if
    /// a name is invalid or repeated.
    pub fn exec_groups(
        &mut self,
        exec_groups: impl IntoIterator<Item = (String, DeclaredExecGroup)>,
    ) -> anyhow::Result<&mut Self> {
        let mut groups: SmallMap<String, DeclaredExecGroup> = SmallMap::new();
        for (name, group) in exec_groups {
            validate_exec_group_name(&name)?;
            match groups.entry(name) {
                small_map::Entry::Vacant(e) => {
                    e.insert(group);
                }
                small_map::Entry::Occupied(e) => {
                    return Err(ExecGroupError::DuplicateName(e.key().to_owned()).into());
                }
            }
        }
        self.exec_groups = groups;
        Ok(self)
    }

    pub fn subrules(&mut self, subrules: impl IntoIterator<Item = SubruleId>) -> &mut Self {
        self.subrules = subrules.into_iter().collect();
        self
    }

    fn check_consistency(&self, required_providers: &RequiredProviders) -> anyhow::Result<()> {
        if self.apply_to_generating_rules {
            if !required_providers.accepts_any() {
                return Err(
                    InconsistentDefinitionError::RequiredProvidersWithGeneratingRules(
                        self.aspect_class.name(),
                    )
                    .into(),
                );
            }
            if self.propagation_predicate.is_some() {
                return Err(InconsistentDefinitionError::PredicateWithGeneratingRules(
                    self.aspect_class.name(),
                )
                .into());
            }
        }

        if self.apply_to_files {
            if !required_providers.accepts_any() {
                return Err(InconsistentDefinitionError::RequiredProvidersWithFiles(
                    self.aspect_class.name(),
                )
                .into());
            }
            if self.propagation_predicate.is_some() {
                return Err(InconsistentDefinitionError::PredicateWithFiles(
                    self.aspect_class.name(),
                )
                .into());
            }
        }

        Ok(())
    }

    /// Build the definition. The builder can be used again afterwards.
    pub fn build(&self) -> anyhow::Result<AspectDefinition> {
        let required_providers = self.required_providers.build();
        self.check_consistency(&required_providers)?;

        tracing::debug!(
            "Built definition of aspect `{}` with {} attributes",
            self.aspect_class,
            self.attributes.len()
        );

        Ok(AspectDefinition {
            aspect_class: self.aspect_class.clone(),
            advertised_providers: self.advertised_providers.build(),
            required_providers,
            required_providers_for_aspects: self.required_aspect_providers.build(),
            attributes: self.attributes.clone(),
            toolchain_types: self.toolchain_types.clone(),
            attribute_propagation: self.attribute_propagation.clone(),
            toolchain_propagation: self.toolchain_propagation.clone(),
            configuration_fragment_policy: self.configuration_fragment_policy.build(),
            apply_to_files: self.apply_to_files,
            apply_to_generating_rules: self.apply_to_generating_rules,
            required_aspect_classes: self.required_aspect_classes.clone(),
            propagation_predicate: self.propagation_predicate.clone(),
            exec_compatible_with: self.exec_compatible_with.clone(),
            exec_groups: self.exec_groups.clone(),
            subrules: self.subrules.clone(),
        })
    }
}
