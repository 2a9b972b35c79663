/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::filter::Filtered;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::reload;
use tracing_subscriber::reload::Handle;
use tracing_subscriber::EnvFilter;

use crate::env::BUCK2_ASPECT_LOG;

/// Filter used when `$BUCK2_ASPECT_LOG` is not set.
const DEFAULT_FILTER: &str = "warn";

pub trait LogConfigurationReloadHandle: Send + Sync + 'static {
    fn update_log_filter(&self, filter: &str) -> anyhow::Result<()>;
}

impl<L, R> LogConfigurationReloadHandle for Handle<Filtered<L, EnvFilter, R>, R>
where
    L: Send + Sync + 'static,
    R: Send + Sync + 'static,
{
    fn update_log_filter(&self, raw: &str) -> anyhow::Result<()> {
        let filter = EnvFilter::try_new(raw).context("Invalid log filter")?;
        self.modify(|layer| *layer.filter_mut() = filter)
            .context("Error updating log filter")?;
        tracing::debug!("Log filter was updated to: `{}`", raw);
        Ok(())
    }
}

fn initial_filter() -> anyhow::Result<EnvFilter> {
    match BUCK2_ASPECT_LOG.get()? {
        Some(v) => EnvFilter::try_new(v).with_context(|| {
            format!("Failed to parse ${} as a filter", BUCK2_ASPECT_LOG.var())
        }),
        None => Ok(EnvFilter::new(DEFAULT_FILTER)),
    }
}

/// Install a global subscriber writing to `writer`, for tools embedding aspect
/// definitions. Fails if a global subscriber is already set.
pub fn init_tracing_for_writer<W>(writer: W) -> anyhow::Result<Arc<dyn LogConfigurationReloadHandle>>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_filter(initial_filter()?);
    let (layer, handle) = reload::Layer::new(layer);

    tracing_subscriber::registry()
        .with(layer)
        .try_init()
        .context("Failed to initialize tracing")?;

    Ok(Arc::new(handle) as _)
}
