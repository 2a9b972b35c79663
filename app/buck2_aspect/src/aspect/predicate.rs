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
use std::sync::Arc;

use allocative::Allocative;
use dupe::Dupe;

use crate::label::TargetLabel;

/// What a propagation predicate gets to see about a candidate target.
#[derive(Debug, Clone, Copy)]
pub struct PropagationTarget<'a> {
    pub label: &'a TargetLabel,
    pub rule_kind: &'a str,
}

/// User supplied gate deciding whether an aspect propagates to a target.
#[derive(Clone, Dupe, Allocative)]
pub struct AspectPropagationPredicate {
    description: Arc<str>,
    #[allocative(skip)]
    predicate: Arc<dyn Fn(PropagationTarget<'_>) -> bool + Send + Sync>,
}

impl AspectPropagationPredicate {
    pub fn new(
        description: &str,
        predicate: impl Fn(PropagationTarget<'_>) -> bool + Send + Sync + 'static,
    ) -> AspectPropagationPredicate {
        AspectPropagationPredicate {
            description: Arc::from(description),
            predicate: Arc::new(predicate),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn evaluate(&self, target: PropagationTarget<'_>) -> bool {
        (self.predicate)(target)
    }
}

impl Debug for AspectPropagationPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AspectPropagationPredicate")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}
