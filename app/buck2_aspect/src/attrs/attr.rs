/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

use std::fmt;
use std::fmt::Debug;
use std::fmt::Display;
use std::sync::Arc;

use allocative::Allocative;
use dupe::Dupe;
use itertools::Itertools;

use crate::attrs::attr_type::AttrType;
use crate::attrs::attr_type::LabelClass;
use crate::attrs::value::AttrValue;
use crate::label::TargetLabel;

/// Prefix of implicit attributes, which users cannot set.
pub const IMPLICIT_PREFIX: char = '$';
/// Prefix of late-bound attributes, whose value comes from the configuration.
pub const LATE_BOUND_PREFIX: char = ':';

#[derive(Debug, thiserror::Error)]
pub enum AttributeError {
    #[error("Attribute `{name}` of type `{attr_type}` has default `{default}` of a different type")]
    DefaultTypeMismatch {
        name: String,
        attr_type: AttrType,
        default: AttrValue,
    },
    #[error("Attribute `{name}` of type `{attr_type}` has allowed value `{value}` of a different type")]
    AllowedValueTypeMismatch {
        name: String,
        attr_type: AttrType,
        value: AttrValue,
    },
    #[error("Default `{default}` of attribute `{name}` is not one of the allowed values: {}", .allowed.iter().join(", "))]
    DefaultNotAllowed {
        name: String,
        default: AttrValue,
        allowed: Vec<AttrValue>,
    },
    #[error("Late-bound attribute `{0}` must be named with a `:` prefix")]
    LateBoundName(String),
    #[error("Attribute `{0}` is named as late-bound but has no late-bound default")]
    NotLateBound(String),
    #[error("Attribute name must not be empty")]
    EmptyName,
}

/// A default computed from the target the attribute is evaluated for.
///
/// Never evaluated by aspect definitions: they only need to know that the
/// default is not a literal.
#[derive(Clone, Dupe, Allocative)]
pub struct ComputedDefault {
    description: Arc<str>,
    #[allocative(skip)]
    compute: Arc<dyn Fn(&TargetLabel) -> AttrValue + Send + Sync>,
}

impl ComputedDefault {
    pub fn new(
        description: &str,
        compute: impl Fn(&TargetLabel) -> AttrValue + Send + Sync + 'static,
    ) -> ComputedDefault {
        ComputedDefault {
            description: Arc::from(description),
            compute: Arc::new(compute),
        }
    }

    pub fn compute(&self, target: &TargetLabel) -> AttrValue {
        (self.compute)(target)
    }
}

impl Debug for ComputedDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComputedDefault")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// A default resolved from a configuration fragment at analysis time.
///
/// `fallback` is the value used when the attribute is inspected without a
/// configuration, e.g. for dependency discovery.
#[derive(Debug, Clone, Eq, PartialEq, Allocative)]
pub struct LateBoundDefault {
    pub fragment: String,
    pub fallback: AttrValue,
}

#[derive(Debug, Clone, Allocative)]
pub enum AttrDefault {
    Literal(AttrValue),
    Computed(ComputedDefault),
    LateBound(LateBoundDefault),
}

/// A named, typed attribute of an aspect.
#[derive(Debug, Clone, Dupe, Allocative)]
pub struct Attribute(Arc<AttributeData>);

#[derive(Debug, Allocative)]
struct AttributeData {
    name: String,
    coercer: AttrType,
    default: AttrDefault,
    allowed_values: Option<Vec<AttrValue>>,
    doc: String,
}

impl Attribute {
    pub fn builder(name: &str, coercer: AttrType) -> AttributeBuilder {
        AttributeBuilder {
            name: name.to_owned(),
            coercer,
            default: None,
            allowed_values: None,
            doc: String::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn coercer(&self) -> AttrType {
        self.0.coercer
    }

    pub fn label_class(&self) -> LabelClass {
        self.0.coercer.label_class()
    }

    pub fn doc(&self) -> &str {
        &self.0.doc
    }

    pub fn default(&self) -> &AttrDefault {
        &self.0.default
    }

    /// The default as known without a target or configuration: the literal,
    /// or the fallback of a late-bound default. `None` for computed defaults.
    pub fn static_default(&self) -> Option<&AttrValue> {
        match &self.0.default {
            AttrDefault::Literal(v) => Some(v),
            AttrDefault::LateBound(l) => Some(&l.fallback),
            AttrDefault::Computed(_) => None,
        }
    }

    pub fn has_computed_default(&self) -> bool {
        matches!(self.0.default, AttrDefault::Computed(_))
    }

    pub fn is_implicit(&self) -> bool {
        self.0.name.starts_with(IMPLICIT_PREFIX)
    }

    pub fn is_late_bound(&self) -> bool {
        self.0.name.starts_with(LATE_BOUND_PREFIX)
    }

    /// Whether the attribute restricts its values to an explicit list.
    pub fn check_allowed_values(&self) -> bool {
        self.0.allowed_values.is_some()
    }

    pub fn allowed_values(&self) -> Option<&[AttrValue]> {
        self.0.allowed_values.as_deref()
    }
}

impl Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.0.name, self.0.coercer)?;
        match &self.0.default {
            AttrDefault::Literal(v) => write!(f, " = {}", v),
            AttrDefault::LateBound(l) => write!(f, " = <late bound from {}>", l.fragment),
            AttrDefault::Computed(c) => write!(f, " = <computed: {}>", c.description),
        }
    }
}

pub struct AttributeBuilder {
    name: String,
    coercer: AttrType,
    default: Option<AttrDefault>,
    allowed_values: Option<Vec<AttrValue>>,
    doc: String,
}

impl AttributeBuilder {
    pub fn default_value(mut self, value: AttrValue) -> Self {
        self.default = Some(AttrDefault::Literal(value));
        self
    }

    pub fn computed_default(mut self, default: ComputedDefault) -> Self {
        self.default = Some(AttrDefault::Computed(default));
        self
    }

    pub fn late_bound_default(mut self, fragment: &str, fallback: AttrValue) -> Self {
        self.default = Some(AttrDefault::LateBound(LateBoundDefault {
            fragment: fragment.to_owned(),
            fallback,
        }));
        self
    }

    pub fn allowed_values(mut self, values: impl IntoIterator<Item = AttrValue>) -> Self {
        self.allowed_values = Some(values.into_iter().collect());
        self
    }

    pub fn doc(mut self, doc: &str) -> Self {
        self.doc = doc.to_owned();
        self
    }

    pub fn build(self) -> anyhow::Result<Attribute> {
        let name = self.name;
        if name.is_empty() {
            return Err(AttributeError::EmptyName.into());
        }
        let default = self
            .default
            .unwrap_or_else(|| AttrDefault::Literal(self.coercer.default_value()));

        match &default {
            AttrDefault::LateBound(_) if !name.starts_with(LATE_BOUND_PREFIX) => {
                return Err(AttributeError::LateBoundName(name).into());
            }
            AttrDefault::Literal(_) | AttrDefault::Computed(_)
                if name.starts_with(LATE_BOUND_PREFIX) =>
            {
                return Err(AttributeError::NotLateBound(name).into());
            }
            _ => {}
        }

        let static_default = match &default {
            AttrDefault::Literal(v) => Some(v),
            AttrDefault::LateBound(l) => Some(&l.fallback),
            AttrDefault::Computed(_) => None,
        };
        if let Some(v) = static_default {
            if !self.coercer.matches(v) {
                return Err(AttributeError::DefaultTypeMismatch {
                    name,
                    attr_type: self.coercer,
                    default: v.clone(),
                }
                .into());
            }
        }

        if let Some(allowed) = &self.allowed_values {
            if let Some(value) = allowed.iter().find(|v| !self.coercer.matches(v)) {
                return Err(AttributeError::AllowedValueTypeMismatch {
                    name,
                    attr_type: self.coercer,
                    value: value.clone(),
                }
                .into());
            }
            if let AttrDefault::Literal(v) = &default {
                if !allowed.contains(v) {
                    return Err(AttributeError::DefaultNotAllowed {
                        name,
                        default: v.clone(),
                        allowed: allowed.clone(),
                    }
                    .into());
                }
            }
        }

        Ok(Attribute(Arc::new(AttributeData {
            name,
            coercer: self.coercer,
            default,
            allowed_values: self.allowed_values,
            doc: self.doc,
        })))
    }
}

pub mod testing {
    use crate::attrs::attr::Attribute;
    use crate::attrs::attr_type::AttrType;
    use crate::attrs::value::AttrValue;
    use crate::label::TargetLabel;

    pub trait AttributeExt {
        fn testing_label(name: &str, label: &str) -> Self;
        fn testing_label_list(name: &str, labels: &[&str]) -> Self;
    }

    impl AttributeExt for Attribute {
        fn testing_label(name: &str, label: &str) -> Attribute {
            Attribute::builder(name, AttrType::Label)
                .default_value(AttrValue::Label(TargetLabel::testing_parse(label)))
                .build()
                .unwrap()
        }

        fn testing_label_list(name: &str, labels: &[&str]) -> Attribute {
            Attribute::builder(name, AttrType::LabelList)
                .default_value(AttrValue::label_list(
                    labels.iter().map(|l| TargetLabel::testing_parse(l)),
                ))
                .build()
                .unwrap()
        }
    }
}
