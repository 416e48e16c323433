//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may obtain a copy of the License at
//  http://www.apache.org/licenses/LICENSE-2.0
//
//! Range index and field descriptors nested inside a
//! [`Database`](crate::Database) configuration.

use crate::types::{InvalidValues, ScalarType};
use serde_derive::{Deserialize, Serialize};

/// A range index over element values.
///
/// ```
/// use marklogic_mgmt_rust_sdk::ElementRangeIndex;
/// use marklogic_mgmt_rust_sdk::types::ScalarType;
///
/// let idx = ElementRangeIndex::new("order-id", ScalarType::Int)
///     .namespace_uri("http://example.com/orders");
/// assert_eq!(idx.localname(), "order-id");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ElementRangeIndex {
    scalar_type: ScalarType,
    namespace_uri: String,
    localname: String,
    collation: String,
    range_value_positions: bool,
    invalid_values: InvalidValues,
}

impl Default for ElementRangeIndex {
    fn default() -> Self {
        ElementRangeIndex {
            scalar_type: ScalarType::String,
            namespace_uri: String::new(),
            localname: String::new(),
            collation: String::new(),
            range_value_positions: false,
            invalid_values: InvalidValues::Reject,
        }
    }
}

impl ElementRangeIndex {
    pub fn new(localname: &str, scalar_type: ScalarType) -> ElementRangeIndex {
        ElementRangeIndex {
            localname: localname.to_string(),
            scalar_type,
            ..Default::default()
        }
    }

    pub fn namespace_uri(mut self, uri: &str) -> Self {
        self.namespace_uri = uri.to_string();
        self
    }

    pub fn collation(mut self, collation: &str) -> Self {
        self.collation = collation.to_string();
        self
    }

    pub fn range_value_positions(mut self, enabled: bool) -> Self {
        self.range_value_positions = enabled;
        self
    }

    pub fn invalid_values(mut self, action: InvalidValues) -> Self {
        self.invalid_values = action;
        self
    }

    pub fn localname(&self) -> &str {
        &self.localname
    }

    pub fn scalar_type(&self) -> ScalarType {
        self.scalar_type
    }
}

/// A range index over attribute values of a named element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ElementAttributeRangeIndex {
    scalar_type: ScalarType,
    collation: String,
    parent_namespace_uri: String,
    parent_localname: String,
    namespace_uri: String,
    localname: String,
    range_value_positions: bool,
    invalid_values: InvalidValues,
}

impl Default for ElementAttributeRangeIndex {
    fn default() -> Self {
        ElementAttributeRangeIndex {
            scalar_type: ScalarType::String,
            collation: String::new(),
            parent_namespace_uri: String::new(),
            parent_localname: String::new(),
            namespace_uri: String::new(),
            localname: String::new(),
            range_value_positions: false,
            invalid_values: InvalidValues::Reject,
        }
    }
}

impl ElementAttributeRangeIndex {
    /// `parent_localname` names the element; `localname` the attribute.
    pub fn new(
        parent_localname: &str,
        localname: &str,
        scalar_type: ScalarType,
    ) -> ElementAttributeRangeIndex {
        ElementAttributeRangeIndex {
            parent_localname: parent_localname.to_string(),
            localname: localname.to_string(),
            scalar_type,
            ..Default::default()
        }
    }

    pub fn parent_namespace_uri(mut self, uri: &str) -> Self {
        self.parent_namespace_uri = uri.to_string();
        self
    }

    pub fn namespace_uri(mut self, uri: &str) -> Self {
        self.namespace_uri = uri.to_string();
        self
    }

    pub fn collation(mut self, collation: &str) -> Self {
        self.collation = collation.to_string();
        self
    }

    pub fn range_value_positions(mut self, enabled: bool) -> Self {
        self.range_value_positions = enabled;
        self
    }

    pub fn invalid_values(mut self, action: InvalidValues) -> Self {
        self.invalid_values = action;
        self
    }

    pub fn parent_localname(&self) -> &str {
        &self.parent_localname
    }

    pub fn localname(&self) -> &str {
        &self.localname
    }

    pub fn scalar_type(&self) -> ScalarType {
        self.scalar_type
    }
}

/// A range index over the values of a [`Field`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct FieldRangeIndex {
    scalar_type: ScalarType,
    collation: String,
    field_name: String,
    range_value_positions: bool,
    invalid_values: InvalidValues,
}

impl Default for FieldRangeIndex {
    fn default() -> Self {
        FieldRangeIndex {
            scalar_type: ScalarType::String,
            collation: String::new(),
            field_name: String::new(),
            range_value_positions: false,
            invalid_values: InvalidValues::Reject,
        }
    }
}

impl FieldRangeIndex {
    pub fn new(field_name: &str, scalar_type: ScalarType) -> FieldRangeIndex {
        FieldRangeIndex {
            field_name: field_name.to_string(),
            scalar_type,
            ..Default::default()
        }
    }

    pub fn collation(mut self, collation: &str) -> Self {
        self.collation = collation.to_string();
        self
    }

    pub fn range_value_positions(mut self, enabled: bool) -> Self {
        self.range_value_positions = enabled;
        self
    }

    pub fn invalid_values(mut self, action: InvalidValues) -> Self {
        self.invalid_values = action;
        self
    }

    pub fn name(&self) -> &str {
        &self.field_name
    }

    pub fn scalar_type(&self) -> ScalarType {
        self.scalar_type
    }
}

/// A range index definition of any kind, ready to be added to a database
/// with [`Database::add_index()`](crate::Database::add_index()).
///
/// Each variant lands in its own index list in the database configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum RangeIndex {
    Element(ElementRangeIndex),
    ElementAttribute(ElementAttributeRangeIndex),
    Field(FieldRangeIndex),
}

impl From<ElementRangeIndex> for RangeIndex {
    fn from(idx: ElementRangeIndex) -> Self {
        RangeIndex::Element(idx)
    }
}

impl From<ElementAttributeRangeIndex> for RangeIndex {
    fn from(idx: ElementAttributeRangeIndex) -> Self {
        RangeIndex::ElementAttribute(idx)
    }
}

impl From<FieldRangeIndex> for RangeIndex {
    fn from(idx: FieldRangeIndex) -> Self {
        RangeIndex::Field(idx)
    }
}

/// Reference to an element (optionally one of its attributes) included in
/// or excluded from a [`Field`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct FieldReference {
    namespace_uri: String,
    localname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    attribute_namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    attribute_name: Option<String>,
}

impl FieldReference {
    pub fn new(namespace_uri: &str, localname: &str) -> FieldReference {
        FieldReference {
            namespace_uri: namespace_uri.to_string(),
            localname: localname.to_string(),
            ..Default::default()
        }
    }

    pub fn attribute_namespace(mut self, uri: &str) -> Self {
        self.attribute_namespace = Some(uri.to_string());
        self
    }

    pub fn attribute_name(mut self, name: &str) -> Self {
        self.attribute_name = Some(name.to_string());
        self
    }

    pub fn namespace_uri(&self) -> &str {
        &self.namespace_uri
    }

    pub fn localname(&self) -> &str {
        &self.localname
    }

    pub fn get_attribute_namespace(&self) -> Option<&str> {
        self.attribute_namespace.as_deref()
    }

    pub fn get_attribute_name(&self) -> Option<&str> {
        self.attribute_name.as_deref()
    }
}

/// A weighted document path contributing to a [`Field`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldPath {
    pub path: String,
    pub weight: f64,
}

/// A named, user-defined combination of document paths and element
/// references indexed together as a unit.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Field {
    field_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field_path: Option<Vec<FieldPath>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    included_elements: Option<Vec<FieldReference>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    excluded_elements: Option<Vec<FieldReference>>,
}

impl Field {
    pub fn new(name: &str) -> Field {
        Field {
            field_name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.field_name
    }

    /// Add a weighted path to the field.
    pub fn add_path(mut self, path: &str, weight: f64) -> Self {
        self.field_path
            .get_or_insert_with(Vec::new)
            .push(FieldPath {
                path: path.to_string(),
                weight,
            });
        self
    }

    pub fn paths(&self) -> &[FieldPath] {
        self.field_path.as_deref().unwrap_or(&[])
    }

    /// Include an element reference in the field.
    pub fn include(mut self, reference: FieldReference) -> Self {
        self.included_elements
            .get_or_insert_with(Vec::new)
            .push(reference);
        self
    }

    /// Exclude an element reference from the field.
    pub fn exclude(mut self, reference: FieldReference) -> Self {
        self.excluded_elements
            .get_or_insert_with(Vec::new)
            .push(reference);
        self
    }

    pub fn includes(&self) -> &[FieldReference] {
        self.included_elements.as_deref().unwrap_or(&[])
    }

    pub fn excludes(&self) -> &[FieldReference] {
        self.excluded_elements.as_deref().unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_range_index_wire_defaults() {
        let idx = ElementRangeIndex::new("order-id", ScalarType::Int);
        let v = serde_json::to_value(&idx).unwrap();
        assert_eq!(v["scalar-type"], "int");
        assert_eq!(v["localname"], "order-id");
        assert_eq!(v["namespace-uri"], "");
        assert_eq!(v["collation"], "");
        assert_eq!(v["range-value-positions"], false);
        assert_eq!(v["invalid-values"], "reject");
    }

    #[test]
    fn attribute_range_index_names_both_parts() {
        let idx = ElementAttributeRangeIndex::new("customer", "id", ScalarType::Int)
            .parent_namespace_uri("http://example.com/ns");
        let v = serde_json::to_value(&idx).unwrap();
        assert_eq!(v["parent-localname"], "customer");
        assert_eq!(v["localname"], "id");
        assert_eq!(v["parent-namespace-uri"], "http://example.com/ns");
        assert_eq!(v["namespace-uri"], "");
    }

    #[test]
    fn field_includes_report_constructor_inputs() {
        let field = Field::new("invoice-id")
            .include(FieldReference::new("http://foo.bar.com/invoice", "id"))
            .include(FieldReference::new("http://foo.bar.com/billing", "bill"));

        assert_eq!(field.includes().len(), 2);
        assert_eq!(field.includes()[0].namespace_uri(), "http://foo.bar.com/invoice");
        assert_eq!(field.includes()[0].localname(), "id");
        assert_eq!(field.includes()[1].namespace_uri(), "http://foo.bar.com/billing");
        assert_eq!(field.includes()[1].localname(), "bill");
        assert!(field.excludes().is_empty());
    }

    #[test]
    fn field_reference_attributes() {
        let r = FieldReference::new("http://foo.bar.com/invoice", "id")
            .attribute_namespace("http://foo.bar.com/billing")
            .attribute_name("bill");
        assert_eq!(r.get_attribute_name(), Some("bill"));
        assert_eq!(r.get_attribute_namespace(), Some("http://foo.bar.com/billing"));

        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["attribute-name"], "bill");

        let bare = FieldReference::new("ns", "x");
        let v = serde_json::to_value(&bare).unwrap();
        assert!(v.get("attribute-name").is_none());
    }

    #[test]
    fn field_paths_carry_weights() {
        let field = Field::new("invoice-id")
            .add_path("bill:invoice-id", 1.0)
            .add_path("inv:id", 2.0);
        assert_eq!(field.paths().len(), 2);
        assert_eq!(field.paths()[0].path, "bill:invoice-id");
        assert_eq!(field.paths()[1].weight, 2.0);
    }
}
