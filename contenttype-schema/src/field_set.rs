//! FieldSet — the validated field collection of one content type.
//!
//! Cross-field invariants live here, not on [`Field`]:
//! one-per-content-type kinds, unique variables and unique sort orders.
//! Fields are kept ordered by sort order, stable for ties.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, SchemaError};
use crate::field::Field;
use crate::types::FieldKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<Field>", into = "Vec<Field>")]
pub struct FieldSet {
    fields: Vec<Field>,
    variable_index: HashMap<String, usize>,
}

impl FieldSet {
    /// Validate a complete field collection.
    pub fn new(fields: Vec<Field>) -> Result<Self> {
        validate(&fields)?;

        let mut fields = fields;
        fields.sort_by_key(Field::sort_order);
        let variable_index = index_variables(&fields);

        debug!(fields = fields.len(), "field set validated");

        Ok(Self {
            fields,
            variable_index,
        })
    }

    /// An empty set.
    pub fn empty() -> Self {
        Self {
            fields: Vec::new(),
            variable_index: HashMap::new(),
        }
    }

    /// Attach one more field, returning the enlarged set.
    ///
    /// A field with an unassigned sort order is placed after the current
    /// last field. The existing set is left untouched on failure.
    pub fn attach(&self, field: Field) -> Result<Self> {
        let field = if field.sort_order() == 0 {
            let next = self.next_sort_order()?;
            field.to_builder().sort_order(next).build()?
        } else {
            field
        };

        let variable = field.variable().to_string();
        let mut fields = self.fields.clone();
        fields.push(field);

        Self::new(fields).inspect_err(|err| {
            warn!(%variable, error = %err, "rejected field attachment");
        })
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Look up a field by its variable.
    pub fn get(&self, variable: &str) -> Option<&Field> {
        self.variable_index.get(variable).map(|&i| &self.fields[i])
    }

    pub fn contains_kind(&self, kind: FieldKind) -> bool {
        self.fields.iter().any(|f| f.kind() == kind)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    pub fn into_fields(self) -> Vec<Field> {
        self.fields
    }

    fn next_sort_order(&self) -> Result<i32> {
        let last = self
            .fields
            .iter()
            .map(Field::sort_order)
            .max()
            .unwrap_or(0);
        last.checked_add(1)
            .ok_or(SchemaError::SortOrderOverflow { sort_order: last })
    }
}

// The variable index is derived from `fields`.
impl PartialEq for FieldSet {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl Eq for FieldSet {}

impl Default for FieldSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a> IntoIterator for &'a FieldSet {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl TryFrom<Vec<Field>> for FieldSet {
    type Error = SchemaError;

    fn try_from(fields: Vec<Field>) -> Result<Self> {
        Self::new(fields)
    }
}

impl From<FieldSet> for Vec<Field> {
    fn from(set: FieldSet) -> Self {
        set.fields
    }
}

fn validate(fields: &[Field]) -> Result<()> {
    let mut kinds: Vec<FieldKind> = Vec::new();
    let mut variables: HashSet<&str> = HashSet::new();
    let mut sort_orders: HashSet<i32> = HashSet::new();

    for field in fields {
        let kind = field.kind();
        if kind.is_one_per_content_type() {
            if kinds.contains(&kind) {
                return Err(SchemaError::DuplicateOnePerContentTypeField { kind });
            }
            kinds.push(kind);
        }

        if !variables.insert(field.variable()) {
            return Err(SchemaError::DuplicateVariable {
                variable: field.variable().to_string(),
            });
        }

        let sort_order = field.sort_order();
        if sort_order != 0 && !sort_orders.insert(sort_order) {
            return Err(SchemaError::DuplicateSortOrder { sort_order });
        }
    }

    Ok(())
}

fn index_variables(fields: &[Field]) -> HashMap<String, usize> {
    fields
        .iter()
        .enumerate()
        .map(|(i, f)| (f.variable().to_string(), i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DataType;

    fn field(kind: FieldKind, variable: &str, sort_order: i32) -> Field {
        Field::builder(kind)
            .name(variable)
            .variable(variable)
            .sort_order(sort_order)
            .build()
            .unwrap()
    }

    #[test]
    fn orders_by_sort_order() {
        let set = FieldSet::new(vec![
            field(FieldKind::Text, "b", 2),
            field(FieldKind::Text, "a", 1),
            field(FieldKind::Text, "c", 3),
        ])
        .unwrap();
        let vars: Vec<&str> = set.iter().map(Field::variable).collect();
        assert_eq!(vars, vec!["a", "b", "c"]);
        assert_eq!(set.get("b").unwrap().sort_order(), 2);
        assert!(set.get("missing").is_none());
    }

    #[test]
    fn rejects_two_relationships_tabs() {
        let err = FieldSet::new(vec![
            field(FieldKind::RelationshipsTab, "tab1", 1),
            field(FieldKind::RelationshipsTab, "tab2", 2),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            SchemaError::DuplicateOnePerContentTypeField {
                kind: FieldKind::RelationshipsTab
            }
        ));
    }

    #[test]
    fn allows_many_text_fields() {
        let set = FieldSet::new(vec![
            field(FieldKind::Text, "one", 1),
            field(FieldKind::Text, "two", 2),
            field(FieldKind::RelationshipsTab, "tab", 3),
        ])
        .unwrap();
        assert_eq!(set.len(), 3);
        assert!(set.contains_kind(FieldKind::RelationshipsTab));
    }

    #[test]
    fn rejects_duplicate_variable() {
        let err = FieldSet::new(vec![
            field(FieldKind::Text, "title", 1),
            field(FieldKind::Custom, "title", 2),
        ])
        .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateVariable { variable } if variable == "title"));
    }

    #[test]
    fn rejects_duplicate_sort_order() {
        let err = FieldSet::new(vec![
            field(FieldKind::Text, "a", 1),
            field(FieldKind::Text, "b", 1),
        ])
        .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateSortOrder { sort_order: 1 }));
    }

    #[test]
    fn unassigned_sort_orders_do_not_collide() {
        let set = FieldSet::new(vec![
            field(FieldKind::Text, "a", 0),
            field(FieldKind::Text, "b", 0),
        ])
        .unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test_log::test]
    fn attach_assigns_next_sort_order() {
        let set = FieldSet::new(vec![field(FieldKind::Text, "a", 1)]).unwrap();
        let bigger = set
            .attach(
                Field::builder(FieldKind::Select)
                    .name("Kind")
                    .variable("kind")
                    .data_type(DataType::Integer)
                    .build()
                    .unwrap(),
            )
            .unwrap();
        assert_eq!(bigger.len(), 2);
        assert_eq!(bigger.get("kind").unwrap().sort_order(), 2);
        assert_eq!(set.len(), 1);
    }

    #[test_log::test]
    fn attaching_second_relationships_tab_fails() {
        let set = FieldSet::empty()
            .attach(field(FieldKind::RelationshipsTab, "tab", 0))
            .unwrap();
        let err = set
            .attach(field(FieldKind::RelationshipsTab, "otherTab", 0))
            .unwrap_err();
        assert!(matches!(
            err,
            SchemaError::DuplicateOnePerContentTypeField { .. }
        ));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn attach_after_max_sort_order_fails_instead_of_wrapping() {
        let set = FieldSet::new(vec![field(FieldKind::Text, "last", i32::MAX)]).unwrap();
        let err = set.attach(field(FieldKind::Text, "next", 0)).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::SortOrderOverflow {
                sort_order: i32::MAX
            }
        ));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn negative_sort_orders_sort_before_unassigned() {
        let set = FieldSet::new(vec![
            field(FieldKind::Text, "zero", 0),
            field(FieldKind::Text, "negative", -1),
            field(FieldKind::Text, "one", 1),
        ])
        .unwrap();
        let vars: Vec<&str> = set.iter().map(Field::variable).collect();
        assert_eq!(vars, vec!["negative", "zero", "one"]);
    }

    #[test]
    fn equality_ignores_input_order() {
        let a = FieldSet::new(vec![
            field(FieldKind::Text, "a", 1),
            field(FieldKind::Text, "b", 2),
        ])
        .unwrap();
        let b = FieldSet::new(vec![
            field(FieldKind::Text, "b", 2),
            field(FieldKind::Text, "a", 1),
        ])
        .unwrap();
        assert_eq!(a, b);
        assert_ne!(a, FieldSet::empty());
    }

    #[test]
    fn json_round_trip_reruns_validation() {
        let set = FieldSet::new(vec![
            field(FieldKind::Text, "a", 1),
            field(FieldKind::RelationshipsTab, "tab", 2),
        ])
        .unwrap();
        let json = serde_json::to_string(&set).unwrap();
        let parsed: FieldSet = serde_json::from_str(&json).unwrap();
        assert_eq!(set, parsed);

        let dup = format!(
            "[{0},{0}]",
            serde_json::to_string(&field(FieldKind::RelationshipsTab, "tab", 1)).unwrap()
        );
        assert!(serde_json::from_str::<FieldSet>(&dup).is_err());
    }
}
