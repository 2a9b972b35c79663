/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

//! Aspect definitions.
//!
//! An aspect attaches additional analysis to targets, independent of the
//! rules of those targets, and propagates along their dependencies. This
//! crate holds the static description of an aspect ([`AspectDefinition`]),
//! the builder that checks it is consistent, and the listing of the
//! dependencies the aspect itself has.
//!
//! [`AspectDefinition`]: crate::aspect::definition::AspectDefinition

pub mod aspect;
pub mod attrs;
pub mod env;
pub mod label;
pub mod logging;
pub mod provider;
