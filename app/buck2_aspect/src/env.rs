/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

//! Configuration read from the environment.

use std::env;
use std::env::VarError;
use std::str::FromStr;

use anyhow::Context;
use once_cell::sync::OnceCell;

/// Filter for the logs of this crate, in `tracing_subscriber::EnvFilter`
/// syntax, e.g. `BUCK2_ASPECT_LOG=buck2_aspect=trace`.
pub static BUCK2_ASPECT_LOG: EnvHelper<String> = EnvHelper::new("BUCK2_ASPECT_LOG");

/// An environment variable, parsed on first access and cached for the
/// lifetime of the process.
pub struct EnvHelper<T> {
    var: &'static str,
    parse: fn(&str) -> anyhow::Result<T>,
    cell: OnceCell<Option<T>>,
}

impl<T> EnvHelper<T> {
    pub const fn new(var: &'static str) -> Self
    where
        T: FromStr,
        anyhow::Error: From<<T as FromStr>::Err>,
    {
        fn parse<T>(v: &str) -> anyhow::Result<T>
        where
            T: FromStr,
            anyhow::Error: From<<T as FromStr>::Err>,
        {
            Ok(T::from_str(v)?)
        }

        EnvHelper {
            var,
            parse: parse::<T>,
            cell: OnceCell::new(),
        }
    }

    pub fn var(&self) -> &'static str {
        self.var
    }

    /// `None` if the variable is not set.
    pub fn get(&'static self) -> anyhow::Result<Option<&T>> {
        self.cell
            .get_or_try_init(|| self.read(env::var(self.var)))
            .map(Option::as_ref)
            .with_context(|| format!("Invalid value for ${}", self.var))
    }

    fn read(&self, value: Result<String, VarError>) -> anyhow::Result<Option<T>> {
        match value {
            Ok(v) => {
                tracing::info!("Env override found: ${} = {}", self.var, v);
                Ok(Some((self.parse)(&v)?))
            }
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(..)) => Err(anyhow::anyhow!("Variable is not unicode")),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::env::VarError;

    use crate::env::EnvHelper;

    #[test]
    fn test_read() -> anyhow::Result<()> {
        let helper = EnvHelper::<u32>::new("BUCK2_ASPECT_TEST_VAR");
        assert_eq!(Some(17), helper.read(Ok("17".to_owned()))?);
        assert_eq!(None, helper.read(Err(VarError::NotPresent))?);
        assert!(helper.read(Ok("seventeen".to_owned())).is_err());
        Ok(())
    }

    #[test]
    fn test_get_unset() -> anyhow::Result<()> {
        static UNSET: EnvHelper<String> = EnvHelper::new("BUCK2_ASPECT_SURELY_UNSET_VAR");
        assert_eq!(None, UNSET.get()?);
        assert_eq!("BUCK2_ASPECT_SURELY_UNSET_VAR", UNSET.var());
        Ok(())
    }
}
