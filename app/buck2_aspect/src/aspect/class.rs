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

/// Identity of an aspect.
///
/// Two aspects are the same aspect iff their classes are equal; this is the
/// key used for caching definitions and for `required_aspects` lookups.
#[derive(Debug, Clone, Dupe, Hash, Eq, PartialEq, Ord, PartialOrd, Allocative)]
pub struct AspectClass(Arc<AspectClassData>);

#[derive(Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Allocative)]
enum AspectClassData {
    /// Built into the build tool.
    Native { name: String },
    /// Declared by `aspect()` in a `.bzl` file and exported under `name`.
    Starlark { bzl: String, name: String },
}

impl AspectClass {
    pub fn native(name: &str) -> AspectClass {
        AspectClass(Arc::new(AspectClassData::Native {
            name: name.to_owned(),
        }))
    }

    pub fn starlark(bzl: &str, name: &str) -> AspectClass {
        AspectClass(Arc::new(AspectClassData::Starlark {
            bzl: bzl.to_owned(),
            name: name.to_owned(),
        }))
    }

    /// The name used in error messages, e.g. `root//cc:defs.bzl%headers_aspect`.
    pub fn name(&self) -> String {
        self.to_string()
    }

    pub fn exported_name(&self) -> &str {
        match &*self.0 {
            AspectClassData::Native { name } => name,
            AspectClassData::Starlark { name, .. } => name,
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(&*self.0, AspectClassData::Native { .. })
    }

    pub fn testing_new(name: &str) -> AspectClass {
        AspectClass::starlark("root//testing:defs.bzl", name)
    }
}

impl Display for AspectClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.0 {
            AspectClassData::Native { name } => f.write_str(name),
            AspectClassData::Starlark { bzl, name } => write!(f, "{}%{}", bzl, name),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::aspect::class::AspectClass;

    #[test]
    fn test_identity() {
        assert_eq!(
            AspectClass::starlark("root//cc:defs.bzl", "headers"),
            AspectClass::starlark("root//cc:defs.bzl", "headers")
        );
        assert_ne!(
            AspectClass::starlark("root//cc:defs.bzl", "headers"),
            AspectClass::starlark("root//java:defs.bzl", "headers")
        );
        assert_ne!(AspectClass::native("headers"), AspectClass::testing_new("headers"));
    }

    #[test]
    fn test_name() {
        assert_eq!(
            "root//cc:defs.bzl%headers",
            AspectClass::starlark("root//cc:defs.bzl", "headers").name()
        );
        assert_eq!("headers", AspectClass::native("headers").name());
        assert!(AspectClass::native("headers").is_native());
        assert_eq!("headers", AspectClass::testing_new("headers").exported_name());
    }
}
