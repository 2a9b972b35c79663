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

#[derive(Debug, thiserror::Error)]
pub enum LabelError {
    #[error("Label `{0}` must contain `//`")]
    MissingSeparator(String),
    #[error("Label `{0}` has an empty target name")]
    EmptyName(String),
    #[error("Label `{0}` contains whitespace")]
    Whitespace(String),
}

/// A label of a target, e.g. `root//tools:runtime` or `//tools:runtime`.
///
/// Used for attribute dependencies, toolchain types and execution platform
/// constraints. Cheap to clone.
#[derive(Clone, Dupe, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Allocative)]
pub struct TargetLabel(Arc<TargetLabelData>);

#[derive(Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Allocative)]
struct TargetLabelData {
    cell: String,
    package: String,
    name: String,
}

impl TargetLabel {
    pub fn new(cell: &str, package: &str, name: &str) -> TargetLabel {
        TargetLabel(Arc::new(TargetLabelData {
            cell: cell.to_owned(),
            package: package.to_owned(),
            name: name.to_owned(),
        }))
    }

    /// Parse `[cell]//package[:name]`. Without `:name` the last package
    /// component is the target name.
    pub fn parse(label: &str) -> anyhow::Result<TargetLabel> {
        if label.chars().any(char::is_whitespace) {
            return Err(LabelError::Whitespace(label.to_owned()).into());
        }
        let (cell, rest) = label
            .split_once("//")
            .ok_or_else(|| LabelError::MissingSeparator(label.to_owned()))?;
        let (package, name) = match rest.rsplit_once(':') {
            Some((package, name)) => (package, name),
            None => (rest, rest.rsplit('/').next().unwrap_or(rest)),
        };
        if name.is_empty() {
            return Err(LabelError::EmptyName(label.to_owned()).into());
        }
        Ok(TargetLabel::new(cell, package, name))
    }

    pub fn cell(&self) -> &str {
        &self.0.cell
    }

    pub fn package(&self) -> &str {
        &self.0.package
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn testing_parse(label: &str) -> TargetLabel {
        TargetLabel::parse(label).unwrap()
    }
}

impl Display for TargetLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}//{}:{}", self.0.cell, self.0.package, self.0.name)
    }
}
