/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

//! Listing the dependencies an aspect has through its own attributes.
//!
//! Only default values are inspected: aspect dependency attributes are
//! implicit or late-bound, and cannot have computed defaults, so their labels
//! are the same for every target the aspect is applied to.

use dupe::Dupe;
use starlark_map::small_map::SmallMap;

use crate::aspect::Aspect;
use crate::attrs::attr::Attribute;
use crate::attrs::attr_type::LabelClass;
use crate::label::TargetLabel;

/// Selects which attributes of an aspect contribute dependencies.
pub trait DependencyFilter {
    fn test(&self, aspect: &Aspect, attribute: &Attribute) -> bool;
}

impl<F> DependencyFilter for F
where
    F: Fn(&Aspect, &Attribute) -> bool,
{
    fn test(&self, aspect: &Aspect, attribute: &Attribute) -> bool {
        self(aspect, attribute)
    }
}

/// Every attribute.
pub struct AllDeps;

impl DependencyFilter for AllDeps {
    fn test(&self, _aspect: &Aspect, _attribute: &Attribute) -> bool {
        true
    }
}

/// Skips implicit (`$`-prefixed) attributes.
pub struct NoImplicitDeps;

impl DependencyFilter for NoImplicitDeps {
    fn test(&self, _aspect: &Aspect, attribute: &Attribute) -> bool {
        !attribute.is_implicit()
    }
}

/// Call `consumer` with every dependency label in attributes of `aspect`
/// accepted by `dependency_filter`.
///
/// Attributes are visited in declaration order and labels in value order, so
/// the output is the same for the same definition and filter. Empty label
/// slots (e.g. `None` in a label list) are skipped.
pub fn for_each_label_dep_from_all_attributes_of_aspect(
    aspect: &Aspect,
    dependency_filter: &dyn DependencyFilter,
    consumer: &mut dyn FnMut(&Attribute, &TargetLabel),
) {
    for attribute in aspect.definition().attributes().values() {
        if !dependency_filter.test(aspect, attribute) {
            continue;
        }
        if attribute.label_class() != LabelClass::Dependency {
            continue;
        }
        // Computed defaults are rejected for dependency attributes when added.
        let Some(default) = attribute.static_default() else {
            continue;
        };
        attribute
            .coercer()
            .visit_labels(default, &mut |label: Option<&TargetLabel>| match label {
                Some(label) => {
                    tracing::trace!(
                        "Aspect `{}` depends on `{}` via `{}`",
                        aspect,
                        label,
                        attribute.name()
                    );
                    consumer(attribute, label);
                }
                None => {
                    tracing::trace!("Empty label in `{}` of `{}`", attribute.name(), aspect);
                }
            });
    }
}

/// Collect the dependency labels of `aspect`, keyed by attribute name.
pub fn add_all_attributes_of_aspect(
    labels: &mut SmallMap<String, Vec<TargetLabel>>,
    aspect: &Aspect,
    dependency_filter: &dyn DependencyFilter,
) {
    for_each_label_dep_from_all_attributes_of_aspect(
        aspect,
        dependency_filter,
        &mut |attribute, label| match labels.get_mut(attribute.name()) {
            Some(existing) => existing.push(label.dupe()),
            None => {
                labels.insert(attribute.name().to_owned(), vec![label.dupe()]);
            }
        },
    );
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use starlark_map::small_map::SmallMap;

    use crate::aspect::class::AspectClass;
    use crate::aspect::definition::AspectDefinition;
    use crate::aspect::discovery::add_all_attributes_of_aspect;
    use crate::aspect::discovery::for_each_label_dep_from_all_attributes_of_aspect;
    use crate::aspect::discovery::AllDeps;
    use crate::aspect::discovery::DependencyFilter;
    use crate::aspect::discovery::NoImplicitDeps;
    use crate::aspect::Aspect;
    use crate::attrs::attr::testing::AttributeExt;
    use crate::attrs::attr::Attribute;
    use crate::attrs::attr_type::AttrType;
    use crate::attrs::value::AttrValue;
    use crate::label::TargetLabel;

    fn collect(aspect: &Aspect, filter: &dyn DependencyFilter) -> Vec<(String, String)> {
        let mut deps = Vec::new();
        for_each_label_dep_from_all_attributes_of_aspect(aspect, filter, &mut |attr, label| {
            deps.push((attr.name().to_owned(), label.to_string()))
        });
        deps
    }

    fn pairs(expected: &[(&str, &str)]) -> Vec<(String, String)> {
        expected
            .iter()
            .map(|(a, l)| ((*a).to_owned(), (*l).to_owned()))
            .collect()
    }

    fn aspect_with(attributes: Vec<Attribute>) -> anyhow::Result<Aspect> {
        let mut builder = AspectDefinition::builder(AspectClass::testing_new("deps_aspect"));
        for attribute in attributes {
            builder.add(attribute)?;
        }
        Ok(Aspect::new(Arc::new(builder.build()?)))
    }

    #[test]
    fn test_declaration_order() -> anyhow::Result<()> {
        let aspect = aspect_with(vec![
            Attribute::testing_label("$runtime", "//tools:runtime"),
            Attribute::testing_label_list("$data", &["//tools:a", "//tools:b"]),
        ])?;
        assert_eq!(
            pairs(&[
                ("$runtime", "//tools:runtime"),
                ("$data", "//tools:a"),
                ("$data", "//tools:b"),
            ]),
            collect(&aspect, &AllDeps)
        );
        // Same input, same output.
        assert_eq!(collect(&aspect, &AllDeps), collect(&aspect, &AllDeps));
        Ok(())
    }

    #[test]
    fn test_filter() -> anyhow::Result<()> {
        let aspect = aspect_with(vec![
            Attribute::testing_label("$runtime", "//tools:runtime"),
            Attribute::builder(":cc_toolchain", AttrType::Label)
                .late_bound_default(
                    "cpp",
                    AttrValue::Label(TargetLabel::testing_parse("//tools:cc")),
                )
                .build()?,
        ])?;
        assert_eq!(
            pairs(&[(":cc_toolchain", "//tools:cc")]),
            collect(&aspect, &NoImplicitDeps)
        );
        let only_runtime = |_: &Aspect, attr: &Attribute| attr.name() == "$runtime";
        assert_eq!(
            pairs(&[("$runtime", "//tools:runtime")]),
            collect(&aspect, &only_runtime)
        );
        Ok(())
    }

    #[test]
    fn test_skips_non_dependencies() -> anyhow::Result<()> {
        let aspect = aspect_with(vec![
            Attribute::builder("$ref", AttrType::NodepLabel)
                .default_value(AttrValue::Label(TargetLabel::testing_parse("//tools:ref")))
                .build()?,
            Attribute::builder("$out", AttrType::Output)
                .default_value(AttrValue::Label(TargetLabel::testing_parse("//out:file")))
                .build()?,
            Attribute::builder("$names", AttrType::StringList)
                .default_value(AttrValue::List(vec![AttrValue::string("//not:a_dep")]))
                .build()?,
            Attribute::testing_label("$dep", "//tools:dep"),
        ])?;
        assert_eq!(pairs(&[("$dep", "//tools:dep")]), collect(&aspect, &AllDeps));
        Ok(())
    }

    #[test]
    fn test_skips_empty_slots() -> anyhow::Result<()> {
        let aspect = aspect_with(vec![
            Attribute::builder("$optional", AttrType::Label).build()?,
            Attribute::builder("$data", AttrType::LabelList)
                .default_value(AttrValue::List(vec![
                    AttrValue::None,
                    AttrValue::Label(TargetLabel::testing_parse("//tools:a")),
                    AttrValue::None,
                ]))
                .build()?,
        ])?;
        assert_eq!(pairs(&[("$data", "//tools:a")]), collect(&aspect, &AllDeps));
        Ok(())
    }

    #[test]
    fn test_label_keyed_dict() -> anyhow::Result<()> {
        let aspect = aspect_with(vec![
            Attribute::builder("$tools", AttrType::LabelKeyedStringDict)
                .default_value(AttrValue::Dict(vec![
                    (
                        AttrValue::Label(TargetLabel::testing_parse("//tools:x")),
                        AttrValue::string("x"),
                    ),
                    (
                        AttrValue::Label(TargetLabel::testing_parse("//tools:y")),
                        AttrValue::string("y"),
                    ),
                ]))
                .build()?,
        ])?;
        assert_eq!(
            pairs(&[("$tools", "//tools:x"), ("$tools", "//tools:y")]),
            collect(&aspect, &AllDeps)
        );
        Ok(())
    }

    #[test]
    fn test_add_all_attributes_of_aspect() -> anyhow::Result<()> {
        let aspect = aspect_with(vec![
            Attribute::testing_label_list("$data", &["//tools:a", "//tools:b"]),
            Attribute::testing_label("$runtime", "//tools:runtime"),
        ])?;
        let mut labels = SmallMap::new();
        add_all_attributes_of_aspect(&mut labels, &aspect, &AllDeps);
        assert_eq!(
            vec!["$data", "$runtime"],
            labels.keys().map(String::as_str).collect::<Vec<_>>()
        );
        assert_eq!(
            Some(&vec![
                TargetLabel::testing_parse("//tools:a"),
                TargetLabel::testing_parse("//tools:b"),
            ]),
            labels.get("$data")
        );
        Ok(())
    }
}
