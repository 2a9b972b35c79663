/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

use allocative::Allocative;
use starlark_map::small_set::SmallSet;

use crate::aspect::toolchain::ToolchainTypeRequirement;
use crate::label::TargetLabel;

/// Name of the exec group actions use when they do not name one.
pub const DEFAULT_EXEC_GROUP_NAME: &str = "default-exec-group";

#[derive(Debug, thiserror::Error)]
pub enum ExecGroupError {
    #[error("Exec group name `{0}` is not a valid name")]
    InvalidName(String),
    #[error("Exec group name `{0}` is reserved")]
    ReservedName(String),
    #[error("Exec group `{0}` is declared more than once")]
    DuplicateName(String),
}

/// Exec group names are identifiers, possibly containing `-`.
pub fn validate_exec_group_name(name: &str) -> anyhow::Result<()> {
    if name == DEFAULT_EXEC_GROUP_NAME {
        return Err(ExecGroupError::ReservedName(name.to_owned()).into());
    }
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        }
        _ => false,
    };
    if !valid {
        return Err(ExecGroupError::InvalidName(name.to_owned()).into());
    }
    Ok(())
}

/// An execution group as declared by `exec_groups = {...}`: the toolchains
/// and platform constraints its actions need.
#[derive(Debug, Clone, Default, PartialEq, Eq, Allocative)]
pub struct DeclaredExecGroup {
    toolchain_types: SmallSet<ToolchainTypeRequirement>,
    exec_compatible_with: SmallSet<TargetLabel>,
}

impl DeclaredExecGroup {
    pub fn new(
        toolchain_types: impl IntoIterator<Item = ToolchainTypeRequirement>,
        exec_compatible_with: impl IntoIterator<Item = TargetLabel>,
    ) -> DeclaredExecGroup {
        DeclaredExecGroup {
            toolchain_types: toolchain_types.into_iter().collect(),
            exec_compatible_with: exec_compatible_with.into_iter().collect(),
        }
    }

    pub fn toolchain_types(&self) -> impl ExactSizeIterator<Item = &ToolchainTypeRequirement> {
        self.toolchain_types.iter()
    }

    pub fn exec_compatible_with(&self) -> impl ExactSizeIterator<Item = &TargetLabel> {
        self.exec_compatible_with.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::aspect::exec_group::validate_exec_group_name;
    use crate::aspect::exec_group::ExecGroupError;
    use crate::aspect::exec_group::DEFAULT_EXEC_GROUP_NAME;

    #[test]
    fn test_validate_name() {
        assert!(validate_exec_group_name("link").is_ok());
        assert!(validate_exec_group_name("_compile-x86").is_ok());

        for bad in ["", "1link", "li nk", "link!"] {
            let err = validate_exec_group_name(bad).unwrap_err();
            assert!(
                matches!(
                    err.downcast_ref::<ExecGroupError>(),
                    Some(ExecGroupError::InvalidName(_))
                ),
                "{}",
                bad
            );
        }
        assert!(matches!(
            validate_exec_group_name(DEFAULT_EXEC_GROUP_NAME)
                .unwrap_err()
                .downcast_ref::<ExecGroupError>(),
            Some(ExecGroupError::ReservedName(_))
        ));
    }
}
