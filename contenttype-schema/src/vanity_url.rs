//! The Vanity URL content type.
//!
//! Vanity URLs are alternate paths to internal or external URLs. Each
//! vanity URL entry maps a URI on a site to a forward target together with
//! an action (forward, redirect or an error status).

use std::fmt;

use tracing::debug;

use crate::error::{Result, SchemaError};
use crate::field::Field;
use crate::types::{BaseContentType, DataType, FieldKind, SelectOption};

/// What a vanity URL rule does when its URI is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VanityUrlAction {
    Forward,
    PermanentRedirect,
    TemporaryRedirect,
    AuthRequired,
    AuthFailed,
    Missing,
    Error,
}

impl VanityUrlAction {
    /// The closed set of actions, in option order.
    pub const ALL: [VanityUrlAction; 7] = [
        VanityUrlAction::Forward,
        VanityUrlAction::PermanentRedirect,
        VanityUrlAction::TemporaryRedirect,
        VanityUrlAction::AuthRequired,
        VanityUrlAction::AuthFailed,
        VanityUrlAction::Missing,
        VanityUrlAction::Error,
    ];

    /// HTTP status code stored in the Action field.
    pub fn code(&self) -> u16 {
        match self {
            VanityUrlAction::Forward => 200,
            VanityUrlAction::PermanentRedirect => 301,
            VanityUrlAction::TemporaryRedirect => 307,
            VanityUrlAction::AuthRequired => 401,
            VanityUrlAction::AuthFailed => 403,
            VanityUrlAction::Missing => 404,
            VanityUrlAction::Error => 500,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VanityUrlAction::Forward => "Forward",
            VanityUrlAction::PermanentRedirect => "Permanent Redirect",
            VanityUrlAction::TemporaryRedirect => "Temporary Redirect",
            VanityUrlAction::AuthRequired => "Auth Required",
            VanityUrlAction::AuthFailed => "Auth Failed",
            VanityUrlAction::Missing => "Missing",
            VanityUrlAction::Error => "Error",
        }
    }

    pub fn from_code(code: u16) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|action| action.code() == code)
            .ok_or_else(|| SchemaError::UnknownAction {
                value: code.to_string(),
            })
    }

    /// Decode one option of the Action select field.
    pub fn from_option(option: &SelectOption) -> Result<Self> {
        let code = option
            .value
            .parse::<u16>()
            .map_err(|_| SchemaError::UnknownAction {
                value: option.value.clone(),
            })?;
        Self::from_code(code)
    }

    /// The `label|code` lines of the Action field, joined with CRLF.
    fn select_values() -> String {
        Self::ALL
            .iter()
            .map(|action| format!("{}|{}", action.label(), action.code()))
            .collect::<Vec<_>>()
            .join("\r\n")
    }
}

impl fmt::Display for VanityUrlAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.code())
    }
}

/// Schema of the Vanity URL content type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VanityUrlContentType;

impl VanityUrlContentType {
    pub const TITLE_FIELD_VAR: &'static str = "title";
    pub const SITE_FIELD_VAR: &'static str = "site";
    pub const URI_FIELD_VAR: &'static str = "uri";
    pub const FORWARD_TO_FIELD_VAR: &'static str = "forwardTo";
    pub const ACTION_FIELD_VAR: &'static str = "action";
    pub const ORDER_FIELD_VAR: &'static str = "order";

    pub fn base_type(&self) -> BaseContentType {
        BaseContentType::VanityUrl
    }

    /// The six fields every vanity URL carries, sort orders 1 through 6.
    pub fn required_fields(&self) -> Result<Vec<Field>> {
        let mut order = 0;
        let mut next_order = || {
            order += 1;
            order
        };

        let title = Field::builder(FieldKind::Text)
            .name("Title")
            .variable(Self::TITLE_FIELD_VAR)
            .data_type(DataType::Text)
            .required(true)
            .fixed(true)
            .listed(true)
            .indexed(true)
            .searchable(true)
            .sort_order(next_order())
            .build()?;

        let site = Field::builder(FieldKind::Custom)
            .name("Site")
            .variable(Self::SITE_FIELD_VAR)
            .data_type(DataType::Text)
            .required(true)
            .fixed(true)
            .listed(true)
            .indexed(true)
            .values("$velutil.mergeTemplate('/static/content/site_selector_field_render.vtl')")
            .sort_order(next_order())
            .build()?;

        let uri = Field::builder(FieldKind::Text)
            .name("URI")
            .variable(Self::URI_FIELD_VAR)
            .data_type(DataType::Text)
            .required(true)
            .fixed(true)
            .listed(true)
            .indexed(true)
            .searchable(true)
            .sort_order(next_order())
            .build()?;

        let forward_to = Field::builder(FieldKind::Custom)
            .name("Forward To")
            .variable(Self::FORWARD_TO_FIELD_VAR)
            .data_type(DataType::Text)
            .required(true)
            .fixed(true)
            .listed(true)
            .indexed(true)
            .values("$velutil.mergeTemplate('/static/content/file_browser_field_render.vtl')")
            .sort_order(next_order())
            .build()?;

        let action = Field::builder(FieldKind::Select)
            .name("Action")
            .variable(Self::ACTION_FIELD_VAR)
            .data_type(DataType::Integer)
            .required(true)
            .fixed(true)
            .indexed(true)
            .searchable(true)
            .values(VanityUrlAction::select_values())
            .sort_order(next_order())
            .build()?;

        let order_field = Field::builder(FieldKind::Text)
            .name("Order")
            .variable(Self::ORDER_FIELD_VAR)
            .data_type(DataType::Integer)
            .required(true)
            .fixed(true)
            .indexed(true)
            .searchable(true)
            .sort_order(next_order())
            .build()?;

        let fields = vec![title, site, uri, forward_to, action, order_field];
        debug!(fields = fields.len(), "vanity url required fields");
        Ok(fields)
    }

    /// Decode the Action field's options into actions.
    pub fn actions(&self) -> Result<Vec<VanityUrlAction>> {
        self.required_fields()?
            .iter()
            .filter(|f| f.variable() == Self::ACTION_FIELD_VAR)
            .flat_map(Field::select_options)
            .map(|option| VanityUrlAction::from_option(&option))
            .collect()
    }
}
