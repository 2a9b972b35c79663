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

use allocative::Allocative;

use crate::label::TargetLabel;

/// A toolchain type the aspect implementation needs resolved.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Allocative)]
pub struct ToolchainTypeRequirement {
    toolchain_type: TargetLabel,
    /// If not mandatory, a missing toolchain leaves the aspect without it
    /// instead of failing resolution.
    mandatory: bool,
}

impl ToolchainTypeRequirement {
    pub fn mandatory(toolchain_type: TargetLabel) -> ToolchainTypeRequirement {
        ToolchainTypeRequirement {
            toolchain_type,
            mandatory: true,
        }
    }

    pub fn optional(toolchain_type: TargetLabel) -> ToolchainTypeRequirement {
        ToolchainTypeRequirement {
            toolchain_type,
            mandatory: false,
        }
    }

    pub fn toolchain_type(&self) -> &TargetLabel {
        &self.toolchain_type
    }

    pub fn is_mandatory(&self) -> bool {
        self.mandatory
    }
}

impl Display for ToolchainTypeRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mandatory {
            write!(f, "{}", self.toolchain_type)
        } else {
            write!(f, "{} (optional)", self.toolchain_type)
        }
    }
}
