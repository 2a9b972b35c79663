/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

use std::sync::Arc;

use buck2_aspect::aspect::builder::InconsistentDefinitionError;
use buck2_aspect::aspect::builder::InvalidAttributeError;
use buck2_aspect::aspect::class::AspectClass;
use buck2_aspect::aspect::definition::AspectDefinition;
use buck2_aspect::aspect::discovery::for_each_label_dep_from_all_attributes_of_aspect;
use buck2_aspect::aspect::discovery::AllDeps;
use buck2_aspect::aspect::Aspect;
use buck2_aspect::attrs::attr::Attribute;
use buck2_aspect::attrs::attr_type::AttrType;
use buck2_aspect::attrs::value::AttrValue;
use buck2_aspect::label::TargetLabel;
use buck2_aspect::provider::id::ProviderId;

fn label(s: &str) -> TargetLabel {
    TargetLabel::testing_parse(s)
}

fn aspect_of(definition: AspectDefinition) -> Aspect {
    Aspect::new(Arc::new(definition))
}

#[test]
fn test_discovery_of_implicit_dependencies() -> anyhow::Result<()> {
    let mut builder = AspectDefinition::builder(AspectClass::testing_new("runtime_aspect"));
    builder
        .add(
            Attribute::builder("$runtime", AttrType::Label)
                .default_value(AttrValue::Label(label("//tools:runtime")))
                .build()?,
        )?
        .add(
            Attribute::builder("$data", AttrType::LabelList)
                .default_value(AttrValue::label_list([label("//tools:a"), label("//tools:b")]))
                .build()?,
        )?;
    let aspect = aspect_of(builder.build()?);

    let mut deps = Vec::new();
    for_each_label_dep_from_all_attributes_of_aspect(&aspect, &AllDeps, &mut |attr, label| {
        deps.push(format!("{} -> {}", attr.name(), label))
    });
    assert_eq!(
        vec![
            "$runtime -> //tools:runtime",
            "$data -> //tools:a",
            "$data -> //tools:b",
        ],
        deps
    );
    Ok(())
}

#[test]
fn test_public_attributes() -> anyhow::Result<()> {
    let mut builder = AspectDefinition::builder(AspectClass::testing_new("public_aspect"));
    builder.add(
        Attribute::builder("level", AttrType::Int)
            .default_value(AttrValue::Int(1))
            .allowed_values([AttrValue::Int(1), AttrValue::Int(2)])
            .build()?,
    )?;

    let err = builder
        .add(Attribute::builder("mode", AttrType::Label).build()?)
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<InvalidAttributeError>(),
        Some(InvalidAttributeError::InvalidPublicAttribute { attribute, .. }) if attribute == "mode"
    ));
    assert_eq!(
        "root//testing:defs.bzl%public_aspect: Invalid attribute `mode` (label): public aspect \
        attributes must be `bool`, or `int` or `string` with a list of allowed values",
        err.to_string()
    );

    let definition = builder.build()?;
    assert!(definition.attribute("level").is_some());
    assert!(definition.attribute("mode").is_none());
    Ok(())
}

#[test]
fn test_apply_to_files_with_required_providers() {
    let mut builder = AspectDefinition::builder(AspectClass::testing_new("files_aspect"));
    builder
        .apply_to_files(true)
        .require_providers_list([ProviderId::new(Some("root//x:defs.bzl"), "X")]);
    let err = builder.build().unwrap_err();
    assert!(matches!(
        err.downcast_ref::<InconsistentDefinitionError>(),
        Some(InconsistentDefinitionError::RequiredProvidersWithFiles(_))
    ));
}

#[test]
fn test_duplicate_attribute() -> anyhow::Result<()> {
    let mut builder = AspectDefinition::builder(AspectClass::testing_new("dup_aspect"));
    builder.add(
        Attribute::builder("$x", AttrType::Label)
            .default_value(AttrValue::Label(label("//first:x")))
            .build()?,
    )?;
    let err = builder
        .add(Attribute::builder("$x", AttrType::String).build()?)
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<InvalidAttributeError>(),
        Some(InvalidAttributeError::DuplicateAttribute { .. })
    ));

    let definition = builder.build()?;
    assert_eq!(1, definition.attributes().len());
    assert_eq!(
        AttrType::Label,
        definition.attribute("$x").map(|a| a.coercer()).unwrap()
    );
    Ok(())
}

#[test]
fn test_requires() -> anyhow::Result<()> {
    let mut builder = AspectDefinition::builder(AspectClass::testing_new("a"));
    builder.required_aspect_classes([AspectClass::testing_new("b")]);
    let a = builder.build()?;

    let b = aspect_of(AspectDefinition::builder(AspectClass::testing_new("b")).build()?);
    let c = aspect_of(AspectDefinition::builder(AspectClass::testing_new("c")).build()?);
    assert!(a.requires(&b));
    assert!(!a.requires(&c));
    Ok(())
}
