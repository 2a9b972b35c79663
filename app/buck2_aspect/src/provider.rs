/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

//! Providers as seen by aspects: what an aspect (or target) advertises, and
//! what an aspect requires from the targets and aspects it is applied with.

pub mod advertised;
pub mod id;
pub mod required;
