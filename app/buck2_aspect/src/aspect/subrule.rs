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
use std::sync::Arc;

use allocative::Allocative;
use dupe::Dupe;

/// Identity of a subrule an aspect implementation may call.
#[derive(Debug, Clone, Dupe, Hash, Eq, PartialEq, Ord, PartialOrd, Allocative)]
pub struct SubruleId(Arc<SubruleIdData>);

#[derive(Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Allocative)]
struct SubruleIdData {
    bzl: String,
    name: String,
}

impl SubruleId {
    pub fn new(bzl: &str, name: &str) -> SubruleId {
        SubruleId(Arc::new(SubruleIdData {
            bzl: bzl.to_owned(),
            name: name.to_owned(),
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }
}

impl Display for SubruleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%{}", self.0.bzl, self.0.name)
    }
}
