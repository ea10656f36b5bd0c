//! Action routing: name lookup, per-action validation, default injection.
//!
//! The router is intentionally a static lookup table — one enum variant
//! per action, with the required fields, injected defaults, and upstream
//! target hanging off the variant. Keeping the table exhaustive in one
//! place makes the dispatch contract easy to test and hard to drift.

use serde_json::Value;

use crate::types::Payload;

/// Default `limit` for search requests that don't supply one.
pub(crate) const SEARCH_DEFAULT_LIMIT: &str = "10";

/// Default `offset` for search requests that don't supply one.
pub(crate) const SEARCH_DEFAULT_OFFSET: &str = "0";

/// A recognized action and its routing data.
///
/// Every variant except [`Action::Search`] forwards to the generic JSON
/// API with the variant's name as the `action` query tag; `Search` is
/// addressed to the dedicated search API via GET.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ArticleDetails,
    Articles,
    Properties,
    Location,
    Currency,
    NewsDetails,
    News,
    Search,
}

impl Action {
    /// Look up an action by its wire name. `None` for unrecognized names.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "article_details" => Some(Self::ArticleDetails),
            "articles" => Some(Self::Articles),
            "properties" => Some(Self::Properties),
            "location" => Some(Self::Location),
            "currency" => Some(Self::Currency),
            "news_details" => Some(Self::NewsDetails),
            "news" => Some(Self::News),
            "search" => Some(Self::Search),
            _ => None,
        }
    }

    /// Wire name, also the `action` tag sent to the generic API.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ArticleDetails => "article_details",
            Self::Articles => "articles",
            Self::Properties => "properties",
            Self::Location => "location",
            Self::Currency => "currency",
            Self::NewsDetails => "news_details",
            Self::News => "news",
            Self::Search => "search",
        }
    }

    /// Fields that must be present in the payload for this action.
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            Self::ArticleDetails => &["block_id", "article_id"],
            Self::NewsDetails => &["block_id", "news_id"],
            Self::Articles | Self::Properties | Self::Location | Self::Currency | Self::News => {
                &["block_id"]
            }
            Self::Search => &["query"],
        }
    }

    /// Defaults injected into the forwarded payload when absent.
    ///
    /// Only `articles` carries payload defaults; search defaults apply to
    /// the query string, not the payload.
    fn payload_defaults(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Articles => &[("ctx", "STORIES"), ("sort_type", "RANK")],
            _ => &[],
        }
    }

    /// Whether this action routes to the dedicated search API.
    pub fn is_search(&self) -> bool {
        matches!(self, Self::Search)
    }

    /// Check required fields, returning the client-facing message on failure.
    ///
    /// A field is present when its key exists with a non-null value; an
    /// explicit `null` counts as absent. Value types are otherwise
    /// forwarded as-is. Joint checks produce the generic message,
    /// single-field checks name the field.
    pub fn validate(&self, payload: &Payload) -> Result<(), &'static str> {
        let required = self.required_fields();
        let missing = required
            .iter()
            .any(|f| !payload.get(*f).is_some_and(|v| !v.is_null()));
        if !missing {
            return Ok(());
        }
        if required.len() >= 2 {
            Err("Required parameters are missing")
        } else {
            Err(match required[0] {
                "block_id" => "Block ID is missing",
                "query" => "Query is missing",
                other => {
                    debug_assert!(false, "unlabelled required field: {other}");
                    "Required parameters are missing"
                }
            })
        }
    }

    /// Build the payload forwarded upstream: the original plus this
    /// action's defaults for any absent keys. Null-coalescing, like the
    /// presence rule in [`validate`](Self::validate): an explicit `null`
    /// takes the default too. The original is never mutated — the cache
    /// key is derived from it before this runs.
    pub fn forwarded_payload(&self, payload: &Payload) -> Payload {
        let mut forwarded = payload.clone();
        for (key, value) in self.payload_defaults() {
            let absent = !forwarded.get(*key).is_some_and(|v| !v.is_null());
            if absent {
                forwarded.insert((*key).to_string(), Value::from(*value));
            }
        }
        forwarded
    }
}

/// Render a payload value as a query-string parameter.
///
/// The upstream contract is permissive about types: strings and numbers
/// pass through as written by the client, anything else (or absence) takes
/// the default.
pub(crate) fn query_param<'a>(payload: &'a Payload, key: &str, default: &'a str) -> String {
    match payload.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => default.to_string(),
    }
}
