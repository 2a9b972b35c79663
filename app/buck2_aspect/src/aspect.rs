/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

//! Aspects: cross-cutting analysis attached to targets in addition to their
//! own rule implementation.

pub mod builder;
pub mod class;
pub mod definition;
pub mod discovery;
pub mod exec_group;
pub mod fragments;
pub mod predicate;
pub mod propagation;
pub mod subrule;
pub mod toolchain;

use std::fmt;
use std::fmt::Display;
use std::sync::Arc;

use allocative::Allocative;
use dupe::Dupe;

use crate::aspect::class::AspectClass;
use crate::aspect::definition::AspectDefinition;

/// An aspect as applied during analysis: its class together with the
/// definition registered for it.
#[derive(Debug, Clone, Dupe, Allocative)]
pub struct Aspect {
    definition: Arc<AspectDefinition>,
}

impl Aspect {
    pub fn new(definition: Arc<AspectDefinition>) -> Aspect {
        Aspect { definition }
    }

    pub fn aspect_class(&self) -> &AspectClass {
        self.definition.aspect_class()
    }

    pub fn definition(&self) -> &AspectDefinition {
        &self.definition
    }

    pub fn definition_arc(&self) -> &Arc<AspectDefinition> {
        &self.definition
    }
}

impl Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.aspect_class())
    }
}
