/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

use allocative::Allocative;
use derive_more::Display;
use dupe::Dupe;

use crate::attrs::traversal::AttrLabelTraversal;
use crate::attrs::value::AttrValue;

/// What the labels inside an attribute value mean for the build graph.
#[derive(Debug, Clone, Copy, Dupe, Eq, PartialEq, Hash, Display, Allocative)]
pub enum LabelClass {
    /// The value carries no labels.
    #[display(fmt = "none")]
    None,
    /// Labels are edges of the build graph.
    #[display(fmt = "dependency")]
    Dependency,
    /// Labels are referenced, but not depended upon.
    #[display(fmt = "nondep_reference")]
    NonDepReference,
    /// Labels name files the owner produces.
    #[display(fmt = "output")]
    Output,
}

#[derive(Debug, Clone, Copy, Dupe, Eq, PartialEq, Hash, Display, Allocative)]
pub enum AttrType {
    #[display(fmt = "bool")]
    Bool,
    #[display(fmt = "int")]
    Int,
    #[display(fmt = "string")]
    String,
    #[display(fmt = "string_list")]
    StringList,
    #[display(fmt = "string_dict")]
    StringDict,
    #[display(fmt = "label")]
    Label,
    #[display(fmt = "label_list")]
    LabelList,
    #[display(fmt = "label_keyed_string_dict")]
    LabelKeyedStringDict,
    #[display(fmt = "nodep_label")]
    NodepLabel,
    #[display(fmt = "output")]
    Output,
    #[display(fmt = "output_list")]
    OutputList,
}

impl AttrType {
    pub fn label_class(self) -> LabelClass {
        match self {
            AttrType::Bool
            | AttrType::Int
            | AttrType::String
            | AttrType::StringList
            | AttrType::StringDict => LabelClass::None,
            AttrType::Label | AttrType::LabelList | AttrType::LabelKeyedStringDict => {
                LabelClass::Dependency
            }
            AttrType::NodepLabel => LabelClass::NonDepReference,
            AttrType::Output | AttrType::OutputList => LabelClass::Output,
        }
    }

    /// The value an attribute of this type takes when none is given.
    pub fn default_value(self) -> AttrValue {
        match self {
            AttrType::Bool => AttrValue::Bool(false),
            AttrType::Int => AttrValue::Int(0),
            AttrType::String => AttrValue::String(String::new()),
            AttrType::StringList | AttrType::LabelList | AttrType::OutputList => {
                AttrValue::List(Vec::new())
            }
            AttrType::StringDict | AttrType::LabelKeyedStringDict => AttrValue::Dict(Vec::new()),
            AttrType::Label | AttrType::NodepLabel | AttrType::Output => AttrValue::None,
        }
    }

    /// Whether `value` has the shape of this type.
    pub fn matches(self, value: &AttrValue) -> bool {
        fn is_label_slot(v: &AttrValue) -> bool {
            matches!(v, AttrValue::Label(_) | AttrValue::None)
        }
        fn is_string(v: &AttrValue) -> bool {
            matches!(v, AttrValue::String(_))
        }

        match (self, value) {
            (AttrType::Bool, AttrValue::Bool(_)) => true,
            (AttrType::Int, AttrValue::Int(_)) => true,
            (AttrType::String, AttrValue::String(_)) => true,
            (AttrType::StringList, AttrValue::List(items)) => items.iter().all(is_string),
            (AttrType::StringDict, AttrValue::Dict(entries)) => entries
                .iter()
                .all(|(k, v)| is_string(k) && is_string(v)),
            (AttrType::Label | AttrType::NodepLabel | AttrType::Output, v) => is_label_slot(v),
            (AttrType::LabelList | AttrType::OutputList, AttrValue::List(items)) => {
                items.iter().all(is_label_slot)
            }
            (AttrType::LabelKeyedStringDict, AttrValue::Dict(entries)) => entries
                .iter()
                .all(|(k, v)| matches!(k, AttrValue::Label(_)) && is_string(v)),
            _ => false,
        }
    }

    /// Report every label slot of `value` to `traversal`, in value order.
    ///
    /// `value` must match this type; parts that are not labels of this type
    /// (e.g. the string values of a label keyed dict) are not reported.
    pub fn visit_labels(self, value: &AttrValue, traversal: &mut dyn AttrLabelTraversal) {
        fn slot(value: &AttrValue, traversal: &mut dyn AttrLabelTraversal) {
            match value {
                AttrValue::Label(label) => traversal.label(Some(label)),
                AttrValue::None => traversal.label(None),
                _ => {}
            }
        }

        match (self, value) {
            (AttrType::Label | AttrType::NodepLabel | AttrType::Output, v) => slot(v, traversal),
            (AttrType::LabelList | AttrType::OutputList, AttrValue::List(items)) => {
                for item in items {
                    slot(item, traversal);
                }
            }
            (AttrType::LabelKeyedStringDict, AttrValue::Dict(entries)) => {
                for (key, _) in entries {
                    slot(key, traversal);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::attrs::attr_type::AttrType;
    use crate::attrs::attr_type::LabelClass;
    use crate::attrs::value::AttrValue;
    use crate::label::TargetLabel;

    fn collect(attr_type: AttrType, value: &AttrValue) -> Vec<Option<String>> {
        let mut labels = Vec::new();
        attr_type.visit_labels(value, &mut |l: Option<&TargetLabel>| {
            labels.push(l.map(|l| l.to_string()))
        });
        labels
    }

    #[test]
    fn test_label_class() {
        assert_eq!(LabelClass::Dependency, AttrType::LabelList.label_class());
        assert_eq!(LabelClass::None, AttrType::StringList.label_class());
        assert_eq!(LabelClass::Output, AttrType::Output.label_class());
        assert_eq!(
            LabelClass::NonDepReference,
            AttrType::NodepLabel.label_class()
        );
    }

    #[test]
    fn test_matches() {
        let a = AttrValue::Label(TargetLabel::testing_parse("//a:a"));
        assert!(AttrType::Label.matches(&a));
        assert!(AttrType::Label.matches(&AttrValue::None));
        assert!(!AttrType::Label.matches(&AttrValue::string("//a:a")));
        assert!(AttrType::LabelList.matches(&AttrValue::List(vec![a.clone(), AttrValue::None])));
        assert!(!AttrType::StringList.matches(&AttrValue::List(vec![a])));
        assert!(!AttrType::Int.matches(&AttrValue::Bool(true)));
        for t in [AttrType::Bool, AttrType::StringDict, AttrType::OutputList] {
            assert!(t.matches(&t.default_value()), "{}", t);
        }
    }

    #[test]
    fn test_visit_labels() {
        let list = AttrValue::List(vec![
            AttrValue::Label(TargetLabel::testing_parse("//tools:a")),
            AttrValue::None,
            AttrValue::Label(TargetLabel::testing_parse("//tools:b")),
        ]);
        assert_eq!(
            vec![Some("//tools:a".to_owned()), None, Some("//tools:b".to_owned())],
            collect(AttrType::LabelList, &list)
        );

        let dict = AttrValue::Dict(vec![(
            AttrValue::Label(TargetLabel::testing_parse("//tools:k")),
            AttrValue::string("//not:a_label"),
        )]);
        assert_eq!(
            vec![Some("//tools:k".to_owned())],
            collect(AttrType::LabelKeyedStringDict, &dict)
        );
        assert!(collect(AttrType::String, &AttrValue::string("//x:y")).is_empty());
    }
}
