/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

use crate::label::TargetLabel;

/// Receives every label slot of an attribute value.
///
/// A slot is `None` when an optional label was intentionally left empty,
/// e.g. `attrs.option(attrs.dep())` with no value, or a `None` entry of a
/// label list.
pub trait AttrLabelTraversal {
    fn label(&mut self, label: Option<&TargetLabel>);
}

impl<F> AttrLabelTraversal for F
where
    F: FnMut(Option<&TargetLabel>),
{
    fn label(&mut self, label: Option<&TargetLabel>) {
        self(label)
    }
}
