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

/// Identity of a provider an aspect can require or advertise.
///
/// For example:
/// ```ignore
/// CcHeadersInfo = provider(fields=["headers"])
///
/// headers_aspect = aspect(
///     impl = _impl,
///     required_providers = [CcInfo],
///     provides = [CcHeadersInfo],
/// )
/// ```
#[derive(Debug, Clone, Dupe, Hash, Eq, PartialEq, Ord, PartialOrd, Allocative)]
pub struct ProviderId(Arc<ProviderIdData>);

#[derive(Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Allocative)]
struct ProviderIdData {
    /// The `.bzl` file the provider is declared in. `None` for native providers.
    path: Option<String>,
    name: String,
}

impl ProviderId {
    pub fn new(path: Option<&str>, name: &str) -> ProviderId {
        ProviderId(Arc::new(ProviderIdData {
            path: path.map(str::to_owned),
            name: name.to_owned(),
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn path(&self) -> Option<&str> {
        self.0.path.as_deref()
    }
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.path {
            Some(path) => write!(f, "{}%{}", path, self.0.name),
            None => f.write_str(&self.0.name),
        }
    }
}

pub mod testing {
    use crate::provider::id::ProviderId;

    pub trait ProviderIdExt {
        fn testing_new(name: &str) -> Self;
    }

    impl ProviderIdExt for ProviderId {
        fn testing_new(name: &str) -> ProviderId {
            ProviderId::new(Some("root//testing:defs.bzl"), name)
        }
    }
}
