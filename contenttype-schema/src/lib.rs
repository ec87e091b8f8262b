//! Content type schema model
//!
//! `contenttype-schema` describes the structure of content: content types
//! declare a base type and the fields every instance must carry, fields
//! declare the data types they accept. It is schema-only; storing,
//! rendering and routing content happen elsewhere.
//!
//! # Architecture
//!
//! - **Builders only**: [`Field`] and [`ContentType`] are immutable and built
//!   through validating builders; a build either succeeds or returns an error
//! - **Tags, not hierarchies**: [`FieldKind`] and [`ContentTypeKind`] carry the
//!   per-variant rules as lookup tables
//! - **Aggregate checks**: [`FieldSet`] enforces cross-field invariants such as
//!   one relationships tab per content type
//! - **Interchange**: every type round-trips through serde; deserialization
//!   re-runs the builders

pub mod content_type;
pub mod error;
pub mod field;
pub mod field_set;
pub mod types;
pub mod vanity_url;

pub use content_type::{ContentType, ContentTypeBuilder, ContentTypeKind, SimpleContentType};
pub use error::{Result, SchemaError};
pub use field::{Field, FieldBuilder};
pub use field_set::FieldSet;
pub use types::{BaseContentType, DataType, FieldKind, SelectOption};
pub use vanity_url::{VanityUrlAction, VanityUrlContentType};
