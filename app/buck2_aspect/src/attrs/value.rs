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
use itertools::Itertools;

use crate::label::TargetLabel;

/// A literal attribute value, as written in an aspect declaration.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Allocative)]
pub enum AttrValue {
    None,
    Bool(bool),
    Int(i64),
    String(String),
    Label(TargetLabel),
    List(Vec<AttrValue>),
    Dict(Vec<(AttrValue, AttrValue)>),
}

impl AttrValue {
    pub fn string(s: &str) -> AttrValue {
        AttrValue::String(s.to_owned())
    }

    pub fn label_list(labels: impl IntoIterator<Item = TargetLabel>) -> AttrValue {
        AttrValue::List(labels.into_iter().map(AttrValue::Label).collect())
    }

    pub fn as_label(&self) -> Option<&TargetLabel> {
        match self {
            AttrValue::Label(label) => Some(label),
            _ => None,
        }
    }
}

impl Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::None => write!(f, "None"),
            AttrValue::Bool(true) => write!(f, "True"),
            AttrValue::Bool(false) => write!(f, "False"),
            AttrValue::Int(i) => write!(f, "{}", i),
            AttrValue::String(s) => write!(f, "\"{}\"", s),
            AttrValue::Label(l) => write!(f, "\"{}\"", l),
            AttrValue::List(items) => write!(f, "[{}]", items.iter().join(", ")),
            AttrValue::Dict(entries) => write!(
                f,
                "{{{}}}",
                entries
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k, v))
                    .join(", ")
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::attrs::value::AttrValue;
    use crate::label::TargetLabel;

    #[test]
    fn test_display() {
        let value = AttrValue::Dict(vec![(
            AttrValue::Label(TargetLabel::testing_parse("//a:b")),
            AttrValue::List(vec![AttrValue::Bool(true), AttrValue::Int(3)]),
        )]);
        assert_eq!("{\"//a:b\": [True, 3]}", value.to_string());
        assert_eq!("\"x\"", AttrValue::string("x").to_string());
    }
}
