//! Field definitions and their builder.
//!
//! A [`Field`] is immutable: every attribute is set through [`FieldBuilder`]
//! and read back through accessors. Deserialized fields go through the same
//! builder, so an invalid definition never becomes a `Field`.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{Result, SchemaError};
use crate::types::{DataType, FieldKind, SelectOption};

/// A field definition — one named, typed attribute of a content type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "FieldRecord", rename_all = "camelCase")]
pub struct Field {
    #[serde(rename = "type")]
    kind: FieldKind,
    name: String,
    variable: String,
    data_type: DataType,
    required: bool,
    fixed: bool,
    listed: bool,
    indexed: bool,
    searchable: bool,
    read_only: bool,
    unique: bool,
    sort_order: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    values: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    regex_check: Option<String>,
}

impl Field {
    /// Start building a field of the given kind.
    pub fn builder(kind: FieldKind) -> FieldBuilder {
        FieldBuilder::new(kind)
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn accepted_data_types(&self) -> &'static [DataType] {
        self.kind.accepted_data_types()
    }

    pub fn required(&self) -> bool {
        self.required
    }

    pub fn fixed(&self) -> bool {
        self.fixed
    }

    pub fn listed(&self) -> bool {
        self.listed
    }

    pub fn indexed(&self) -> bool {
        self.indexed
    }

    pub fn searchable(&self) -> bool {
        self.searchable
    }

    pub fn read_only(&self) -> bool {
        self.read_only
    }

    pub fn unique(&self) -> bool {
        self.unique
    }

    /// Position within the owning content type; `0` means unassigned.
    pub fn sort_order(&self) -> i32 {
        self.sort_order
    }

    pub fn values(&self) -> Option<&str> {
        self.values.as_deref()
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    pub fn regex_check(&self) -> Option<&str> {
        self.regex_check.as_deref()
    }

    /// Decoded options of a select field. Empty for every other kind.
    pub fn select_options(&self) -> Vec<SelectOption> {
        match (self.kind, self.values.as_deref()) {
            (FieldKind::Select, Some(values)) => SelectOption::parse_list(values),
            _ => Vec::new(),
        }
    }

    /// A builder pre-filled with this field's attributes.
    pub fn to_builder(&self) -> FieldBuilder {
        FieldBuilder {
            kind: self.kind,
            name: Some(self.name.clone()),
            variable: Some(self.variable.clone()),
            data_type: Some(self.data_type),
            required: self.required,
            fixed: self.fixed,
            listed: self.listed,
            indexed: self.indexed,
            searchable: self.searchable,
            read_only: self.read_only,
            unique: self.unique,
            sort_order: self.sort_order,
            values: self.values.clone(),
            hint: self.hint.clone(),
            default_value: self.default_value.clone(),
            regex_check: self.regex_check.clone(),
        }
    }
}

/// Builder for [`Field`]. Created by [`Field::builder`].
#[derive(Debug, Clone)]
pub struct FieldBuilder {
    kind: FieldKind,
    name: Option<String>,
    variable: Option<String>,
    data_type: Option<DataType>,
    required: bool,
    fixed: bool,
    listed: bool,
    indexed: bool,
    searchable: bool,
    read_only: bool,
    unique: bool,
    sort_order: i32,
    values: Option<String>,
    hint: Option<String>,
    default_value: Option<String>,
    regex_check: Option<String>,
}

impl FieldBuilder {
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            name: None,
            variable: None,
            data_type: None,
            required: false,
            fixed: false,
            listed: false,
            indexed: false,
            searchable: false,
            read_only: false,
            unique: false,
            sort_order: 0,
            values: None,
            hint: None,
            default_value: None,
            regex_check: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn variable(mut self, variable: impl Into<String>) -> Self {
        self.variable = Some(variable.into());
        self
    }

    /// Ignored for kinds with a fixed data type.
    pub fn data_type(mut self, data_type: DataType) -> Self {
        self.data_type = Some(data_type);
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn fixed(mut self, fixed: bool) -> Self {
        self.fixed = fixed;
        self
    }

    pub fn listed(mut self, listed: bool) -> Self {
        self.listed = listed;
        self
    }

    pub fn indexed(mut self, indexed: bool) -> Self {
        self.indexed = indexed;
        self
    }

    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    pub fn sort_order(mut self, sort_order: i32) -> Self {
        self.sort_order = sort_order;
        self
    }

    pub fn values(mut self, values: impl Into<String>) -> Self {
        self.values = Some(values.into());
        self
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn default_value(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    pub fn regex_check(mut self, regex_check: impl Into<String>) -> Self {
        self.regex_check = Some(regex_check.into());
        self
    }

    /// Validate and produce the field.
    ///
    /// Checks, in order: non-empty name, non-empty variable, variable is an
    /// identifier, data type accepted by the kind.
    pub fn build(self) -> Result<Field> {
        let name = non_empty(self.name, "name")?;
        let variable = non_empty(self.variable, "variable")?;
        if !is_valid_variable(&variable) {
            return Err(SchemaError::InvalidVariableName { variable });
        }

        let kind = self.kind;
        let data_type = match self.data_type {
            Some(requested) if kind.has_fixed_data_type() => {
                if requested != kind.default_data_type() {
                    trace!(%kind, %requested, "ignoring data type for fixed kind");
                }
                kind.default_data_type()
            }
            Some(requested) => requested,
            None => kind.default_data_type(),
        };
        if !kind.accepts(data_type) {
            return Err(SchemaError::InvalidDataType {
                variable,
                data_type,
                kind,
            });
        }

        debug!(%kind, %variable, %data_type, sort_order = self.sort_order, "built field");

        Ok(Field {
            kind,
            name,
            variable,
            data_type,
            required: self.required,
            fixed: self.fixed,
            listed: self.listed,
            indexed: self.indexed,
            searchable: self.searchable,
            read_only: self.read_only,
            unique: self.unique,
            sort_order: self.sort_order,
            values: self.values,
            hint: self.hint,
            default_value: self.default_value,
            regex_check: self.regex_check,
        })
    }
}

pub(crate) fn non_empty(value: Option<String>, attribute: &'static str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(SchemaError::MissingAttribute { attribute }),
    }
}

/// An ASCII letter followed by ASCII letters, digits or underscores.
pub(crate) fn is_valid_variable(variable: &str) -> bool {
    let mut chars = variable.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Wire form of a field; converted back through [`FieldBuilder`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FieldRecord {
    #[serde(rename = "type")]
    kind: FieldKind,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    variable: Option<String>,
    #[serde(default)]
    data_type: Option<DataType>,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    fixed: bool,
    #[serde(default)]
    listed: bool,
    #[serde(default)]
    indexed: bool,
    #[serde(default)]
    searchable: bool,
    #[serde(default)]
    read_only: bool,
    #[serde(default)]
    unique: bool,
    #[serde(default)]
    sort_order: i32,
    #[serde(default)]
    values: Option<String>,
    #[serde(default)]
    hint: Option<String>,
    #[serde(default)]
    default_value: Option<String>,
    #[serde(default)]
    regex_check: Option<String>,
}

impl TryFrom<FieldRecord> for Field {
    type Error = SchemaError;

    fn try_from(record: FieldRecord) -> Result<Self> {
        FieldBuilder {
            kind: record.kind,
            name: record.name,
            variable: record.variable,
            data_type: record.data_type,
            required: record.required,
            fixed: record.fixed,
            listed: record.listed,
            indexed: record.indexed,
            searchable: record.searchable,
            read_only: record.read_only,
            unique: record.unique,
            sort_order: record.sort_order,
            values: record.values,
            hint: record.hint,
            default_value: record.default_value,
            regex_check: record.regex_check,
        }
        .build()
    }
}
