/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

//! The subset of the attribute model aspects depend on: an attribute's type,
//! its label class, and the labels contained in its default value.

pub mod attr;
pub mod attr_type;
pub mod traversal;
pub mod value;
