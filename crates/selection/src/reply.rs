//! Structured replies returned to the dispatcher

use printify_agent_common::{CatalogItem, CatalogKind, UpstreamError};
use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Value of the `type` field on every reply
pub const REPLY_TYPE: &str = "printify";

/// What a turn did, so callers can branch without reading the message
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Outcome {
    /// A list was fetched and is now awaiting a choice
    Shortlist,
    Selected,
    Completed,
    NoMatches,
    InvalidSelection,
    StageMismatch,
    UpstreamFailure,
    RateLimited,
}

/// Identifiers of a fully configured product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub blueprint_id: i64,
    pub print_provider_id: i64,
    pub variant_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    #[serde(rename = "type")]
    pub reply_type: String,
    pub message: String,
    pub outcome: Outcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blueprints: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub print_providers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variants: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductSummary>,
}

impl Reply {
    pub fn new(outcome: Outcome, message: impl Into<String>) -> Self {
        Self {
            reply_type: REPLY_TYPE.to_string(),
            message: message.into(),
            outcome,
            blueprints: None,
            print_providers: None,
            variants: None,
            product: None,
        }
    }

    /// Attach the full title list for `kind`
    pub fn with_titles(mut self, kind: CatalogKind, items: &[CatalogItem]) -> Self {
        let titles = Some(items.iter().map(|item| item.title.clone()).collect());
        match kind {
            CatalogKind::Blueprint => self.blueprints = titles,
            CatalogKind::PrintProvider => self.print_providers = titles,
            CatalogKind::Variant => self.variants = titles,
        }
        self
    }

    pub fn with_product(mut self, product: ProductSummary) -> Self {
        self.product = Some(product);
        self
    }

    /// Title list attached for `kind`, if any
    pub fn titles(&self, kind: CatalogKind) -> Option<&[String]> {
        match kind {
            CatalogKind::Blueprint => self.blueprints.as_deref(),
            CatalogKind::PrintProvider => self.print_providers.as_deref(),
            CatalogKind::Variant => self.variants.as_deref(),
        }
    }

    pub fn no_matches(message: impl Into<String>) -> Self {
        Self::new(Outcome::NoMatches, message)
    }

    /// A `select_*` call arrived while no list of `kind` is awaited
    pub fn nothing_awaited(kind: CatalogKind) -> Self {
        Self::new(
            Outcome::StageMismatch,
            format!("No {} selection is currently awaited.", kind),
        )
    }

    /// A fetch was requested before its prerequisite choice was made
    pub fn select_first(missing: &str) -> Self {
        Self::new(
            Outcome::StageMismatch,
            format!("Please select {} first.", missing),
        )
    }

    pub fn invalid_selection(kind: CatalogKind, available: usize) -> Self {
        Self::new(
            Outcome::InvalidSelection,
            format!(
                "Invalid {} selection. Please choose a number between 1 and {}, e.g. \"{}\".",
                kind,
                available,
                kind.selection_phrase(1)
            ),
        )
    }

    /// Fold an exhausted upstream failure into a reply.
    ///
    /// Only the status reaches the user; the response body stays in logs.
    pub fn upstream_failure(kind: CatalogKind, err: &UpstreamError) -> Self {
        if err.is_rate_limited() {
            Self::new(
                Outcome::RateLimited,
                format!(
                    "The catalog service is rate limiting requests, so the {} could not be loaded. Please wait a moment and try again.",
                    kind.plural()
                ),
            )
        } else {
            let cause = match err.status {
                Some(status) => format!("HTTP {}", status),
                None => "network error".to_string(),
            };
            Self::new(
                Outcome::UpstreamFailure,
                format!(
                    "Sorry, the {} could not be loaded from the catalog service ({}). Please try again.",
                    kind.plural(),
                    cause
                ),
            )
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(
            self.outcome,
            Outcome::Shortlist | Outcome::Selected | Outcome::Completed
        )
    }
}
