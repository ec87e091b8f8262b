//! Content types — named schemas with a fixed base type and required fields.
//!
//! A [`ContentType`] pairs descriptive metadata with a [`ContentTypeKind`].
//! The kind decides the base type and the required fields; nothing about
//! the required fields is stored, they are recomputed on every call.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SchemaError};
use crate::field::{is_valid_variable, non_empty, Field};
use crate::field_set::FieldSet;
use crate::types::BaseContentType;
use crate::vanity_url::VanityUrlContentType;

/// Plain content with no required fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimpleContentType;

impl SimpleContentType {
    pub fn base_type(&self) -> BaseContentType {
        BaseContentType::Content
    }

    pub fn required_fields(&self) -> Result<Vec<Field>> {
        Ok(Vec::new())
    }
}

/// The content type variants known to this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentTypeKind {
    Simple(SimpleContentType),
    VanityUrl(VanityUrlContentType),
}

impl ContentTypeKind {
    /// The variant for a base type, if one exists.
    pub fn for_base_type(base_type: BaseContentType) -> Result<Self> {
        match base_type {
            BaseContentType::Content => Ok(ContentTypeKind::Simple(SimpleContentType)),
            BaseContentType::VanityUrl => Ok(ContentTypeKind::VanityUrl(VanityUrlContentType)),
            other => Err(SchemaError::UnsupportedBaseType { base_type: other }),
        }
    }

    pub fn base_type(&self) -> BaseContentType {
        match self {
            ContentTypeKind::Simple(ct) => ct.base_type(),
            ContentTypeKind::VanityUrl(ct) => ct.base_type(),
        }
    }

    pub fn required_fields(&self) -> Result<Vec<Field>> {
        match self {
            ContentTypeKind::Simple(ct) => ct.required_fields(),
            ContentTypeKind::VanityUrl(ct) => ct.required_fields(),
        }
    }
}

/// A registered content type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "ContentTypeRecord", into = "ContentTypeRecord")]
pub struct ContentType {
    kind: ContentTypeKind,
    name: String,
    variable: String,
    description: Option<String>,
    fixed: bool,
    system: bool,
}

impl ContentType {
    /// Start building a content type of the given base type.
    pub fn builder(base_type: BaseContentType) -> ContentTypeBuilder {
        ContentTypeBuilder::new(base_type)
    }

    pub fn kind(&self) -> ContentTypeKind {
        self.kind
    }

    pub fn base_type(&self) -> BaseContentType {
        self.kind.base_type()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn fixed(&self) -> bool {
        self.fixed
    }

    pub fn system(&self) -> bool {
        self.system
    }

    /// Fields every instance of this content type must carry.
    ///
    /// Each call returns a fresh, value-equal sequence.
    pub fn required_fields(&self) -> Result<Vec<Field>> {
        self.kind.required_fields()
    }

    /// The required fields as a validated set, ready for further attachments.
    pub fn field_set(&self) -> Result<FieldSet> {
        FieldSet::new(self.required_fields()?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }
}

/// Builder for [`ContentType`]. Created by [`ContentType::builder`].
#[derive(Debug, Clone)]
pub struct ContentTypeBuilder {
    base_type: BaseContentType,
    name: Option<String>,
    variable: Option<String>,
    description: Option<String>,
    fixed: bool,
    system: bool,
}

impl ContentTypeBuilder {
    pub fn new(base_type: BaseContentType) -> Self {
        Self {
            base_type,
            name: None,
            variable: None,
            description: None,
            fixed: false,
            system: false,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Defaults to the ASCII letters and digits of the name.
    pub fn variable(mut self, variable: impl Into<String>) -> Self {
        self.variable = Some(variable.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn fixed(mut self, fixed: bool) -> Self {
        self.fixed = fixed;
        self
    }

    pub fn system(mut self, system: bool) -> Self {
        self.system = system;
        self
    }

    /// Validate metadata and the required field set, then produce the content type.
    ///
    /// A required field that fails validation aborts registration.
    pub fn build(self) -> Result<ContentType> {
        let kind = ContentTypeKind::for_base_type(self.base_type)?;

        let name = non_empty(self.name, "name")?;
        let variable = match self.variable {
            Some(variable) => non_empty(Some(variable), "variable")?,
            None => variable_from_name(&name),
        };
        if !is_valid_variable(&variable) {
            return Err(SchemaError::InvalidVariableName { variable });
        }

        let required = FieldSet::new(kind.required_fields()?)?;

        debug!(
            base_type = ?kind.base_type(),
            %variable,
            required_fields = required.len(),
            "built content type"
        );

        Ok(ContentType {
            kind,
            name,
            variable,
            description: self.description,
            fixed: self.fixed,
            system: self.system,
        })
    }
}

fn variable_from_name(name: &str) -> String {
    name.chars().filter(char::is_ascii_alphanumeric).collect()
}

/// Wire form of a content type; converted back through [`ContentTypeBuilder`].
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContentTypeRecord {
    base_type: BaseContentType,
    name: String,
    variable: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default)]
    fixed: bool,
    #[serde(default)]
    system: bool,
}

impl TryFrom<ContentTypeRecord> for ContentType {
    type Error = SchemaError;

    fn try_from(record: ContentTypeRecord) -> Result<Self> {
        let mut builder = ContentType::builder(record.base_type)
            .name(record.name)
            .variable(record.variable)
            .fixed(record.fixed)
            .system(record.system);
        if let Some(description) = record.description {
            builder = builder.description(description);
        }
        builder.build()
    }
}

impl From<ContentType> for ContentTypeRecord {
    fn from(ct: ContentType) -> Self {
        ContentTypeRecord {
            base_type: ct.base_type(),
            name: ct.name,
            variable: ct.variable,
            description: ct.description,
            fixed: ct.fixed,
            system: ct.system,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldKind;

    fn vanity_url() -> ContentType {
        ContentType::builder(BaseContentType::VanityUrl)
            .name("Vanity URL")
            .description("Alternate paths to pages and files")
            .fixed(true)
            .system(true)
            .build()
            .unwrap()
    }

    #[test]
    fn variable_defaults_from_name() {
        let ct = vanity_url();
        assert_eq!(ct.variable(), "VanityURL");
        assert_eq!(ct.base_type(), BaseContentType::VanityUrl);
        assert!(matches!(ct.kind(), ContentTypeKind::VanityUrl(_)));
    }

    #[test]
    fn missing_name_is_rejected() {
        let err = ContentType::builder(BaseContentType::Content)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            SchemaError::MissingAttribute { attribute: "name" }
        ));
    }

    #[test]
    fn empty_variable_is_rejected() {
        let err = ContentType::builder(BaseContentType::Content)
            .name("Blog")
            .variable("")
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            SchemaError::MissingAttribute {
                attribute: "variable"
            }
        ));
    }

    #[test]
    fn blank_variable_is_missing_like_field_builder() {
        let err = ContentType::builder(BaseContentType::Content)
            .name("Blog")
            .variable("   ")
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            SchemaError::MissingAttribute {
                attribute: "variable"
            }
        ));

        let field_err = Field::builder(FieldKind::Text)
            .name("Blog")
            .variable("   ")
            .build()
            .unwrap_err();
        assert_eq!(err.to_string(), field_err.to_string());
    }

    #[test]
    fn name_starting_with_digit_needs_explicit_variable() {
        let err = ContentType::builder(BaseContentType::Content)
            .name("2024 News")
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidVariableName { .. }));

        let ct = ContentType::builder(BaseContentType::Content)
            .name("2024 News")
            .variable("news2024")
            .build()
            .unwrap();
        assert_eq!(ct.variable(), "news2024");
    }

    #[test]
    fn unsupported_base_type_is_rejected() {
        let err = ContentType::builder(BaseContentType::Widget)
            .name("Widget")
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            SchemaError::UnsupportedBaseType {
                base_type: BaseContentType::Widget
            }
        ));
    }

    #[test]
    fn simple_content_type_has_no_required_fields() {
        let ct = ContentType::builder(BaseContentType::Content)
            .name("Blog")
            .build()
            .unwrap();
        assert_eq!(ct.base_type(), BaseContentType::Content);
        assert!(ct.required_fields().unwrap().is_empty());
        assert!(ct.field_set().unwrap().is_empty());
    }

    #[test]
    fn field_set_starts_from_required_fields() {
        let set = vanity_url().field_set().unwrap();
        assert_eq!(set.len(), 6);
        assert!(!set.contains_kind(FieldKind::RelationshipsTab));
        assert_eq!(set.get("action").unwrap().kind(), FieldKind::Select);
    }

    #[test]
    fn json_round_trip() {
        let ct = vanity_url();
        let json = ct.to_json().unwrap();
        assert!(json.contains("\"baseType\": \"VANITY_URL\""));
        assert_eq!(ContentType::from_json(&json).unwrap(), ct);
    }

    #[test]
    fn yaml_round_trip() {
        let ct = vanity_url();
        let yaml = ct.to_yaml().unwrap();
        assert!(yaml.contains("baseType: VANITY_URL"));
        assert_eq!(ContentType::from_yaml(&yaml).unwrap(), ct);
    }

    #[test]
    fn yaml_with_unsupported_base_type_fails() {
        let yaml = "baseType: PERSONA\nname: Persona\nvariable: persona\n";
        assert!(ContentType::from_yaml(yaml).is_err());
    }
}
