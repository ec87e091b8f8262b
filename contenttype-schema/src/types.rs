//! Shared enums for the schema model.
//!
//! Data types, field kinds and base content types are closed sets. The
//! derived attributes of a field kind (accepted data types, default data
//! type, one-per-content-type) are lookup tables keyed on the tag.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The storage type of a field value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataType {
    Text,
    LongText,
    Integer,
    Float,
    Boolean,
    Date,
    /// Marker fields that carry no user data.
    System,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Text => "TEXT",
            DataType::LongText => "LONG_TEXT",
            DataType::Integer => "INTEGER",
            DataType::Float => "FLOAT",
            DataType::Boolean => "BOOLEAN",
            DataType::Date => "DATE",
            DataType::System => "SYSTEM",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of a field — determines which data types it may hold.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FieldKind {
    #[serde(rename = "TextField")]
    Text,
    #[serde(rename = "SelectField")]
    Select,
    /// Value rendered by an opaque directive held in `values`.
    #[serde(rename = "CustomField")]
    Custom,
    /// UI-only grouping marker, at most one per content type.
    #[serde(rename = "RelationshipsTabField")]
    RelationshipsTab,
}

impl FieldKind {
    /// All field kinds, in declaration order.
    pub const ALL: [FieldKind; 4] = [
        FieldKind::Text,
        FieldKind::Select,
        FieldKind::Custom,
        FieldKind::RelationshipsTab,
    ];

    /// Stable identity tag used by serialization and dispatch.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Text => "TextField",
            FieldKind::Select => "SelectField",
            FieldKind::Custom => "CustomField",
            FieldKind::RelationshipsTab => "RelationshipsTabField",
        }
    }

    /// Data types a field of this kind may hold.
    pub fn accepted_data_types(&self) -> &'static [DataType] {
        match self {
            FieldKind::Text => &[DataType::Text, DataType::Integer, DataType::Float],
            FieldKind::Select => &[
                DataType::Text,
                DataType::Boolean,
                DataType::Integer,
                DataType::Float,
            ],
            FieldKind::Custom => &[DataType::Text],
            FieldKind::RelationshipsTab => &[DataType::System],
        }
    }

    /// Data type used when the builder is not given one.
    pub fn default_data_type(&self) -> DataType {
        match self {
            FieldKind::Text | FieldKind::Select | FieldKind::Custom => DataType::Text,
            FieldKind::RelationshipsTab => DataType::System,
        }
    }

    /// Kinds whose data type cannot be overridden by the builder.
    pub fn has_fixed_data_type(&self) -> bool {
        matches!(self, FieldKind::RelationshipsTab)
    }

    /// Kinds limited to a single occurrence within one content type.
    pub fn is_one_per_content_type(&self) -> bool {
        matches!(self, FieldKind::RelationshipsTab)
    }

    pub fn accepts(&self, data_type: DataType) -> bool {
        self.accepted_data_types().contains(&data_type)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Broad category of a content type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BaseContentType {
    #[serde(rename = "ANY")]
    Any,
    #[serde(rename = "CONTENT")]
    Content,
    #[serde(rename = "WIDGET")]
    Widget,
    #[serde(rename = "FORM")]
    Form,
    #[serde(rename = "FILEASSET")]
    FileAsset,
    #[serde(rename = "HTMLPAGE")]
    HtmlPage,
    #[serde(rename = "PERSONA")]
    Persona,
    #[serde(rename = "VANITY_URL")]
    VanityUrl,
}

impl BaseContentType {
    /// Stable numeric id of the category.
    pub fn id(&self) -> u8 {
        match self {
            BaseContentType::Any => 0,
            BaseContentType::Content => 1,
            BaseContentType::Widget => 2,
            BaseContentType::Form => 3,
            BaseContentType::FileAsset => 4,
            BaseContentType::HtmlPage => 5,
            BaseContentType::Persona => 6,
            BaseContentType::VanityUrl => 7,
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(BaseContentType::Any),
            1 => Some(BaseContentType::Content),
            2 => Some(BaseContentType::Widget),
            3 => Some(BaseContentType::Form),
            4 => Some(BaseContentType::FileAsset),
            5 => Some(BaseContentType::HtmlPage),
            6 => Some(BaseContentType::Persona),
            7 => Some(BaseContentType::VanityUrl),
            _ => None,
        }
    }
}

/// A single `label|value` option of a select field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    /// Decode the line-separated `label|value` pairs of a select field.
    ///
    /// Blank lines are skipped. A line without `|` is used as both label
    /// and value. Only the first `|` separates label from value.
    pub fn parse_list(values: &str) -> Vec<SelectOption> {
        values
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| match line.split_once('|') {
                Some((label, value)) => SelectOption {
                    label: label.trim().to_string(),
                    value: value.trim().to_string(),
                },
                None => SelectOption {
                    label: line.to_string(),
                    value: line.to_string(),
                },
            })
            .collect()
    }
}
