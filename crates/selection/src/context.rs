//! Per-session funnel state
//!
//! The awaited stage owns the candidate list the user was shown, so a list
//! and its "awaiting" marker can only be set and cleared together. What has
//! been chosen so far lives in [`Selection`], which cannot hold a print
//! provider without a blueprint or a variant without both.

use printify_agent_common::{CatalogItem, CatalogKind};
use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Position of a session within the funnel
#[derive(Display, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    #[default]
    Idle,
    AwaitingBlueprintSelection { candidates: Vec<CatalogItem> },
    /// Blueprint chosen; print providers not fetched yet
    BlueprintSelected,
    AwaitingPrintProviderSelection { candidates: Vec<CatalogItem> },
    /// Print provider chosen; variants not fetched yet
    PrintProviderSelected,
    AwaitingVariantSelection { candidates: Vec<CatalogItem> },
    Complete,
}

impl Stage {
    /// Which list the user is currently choosing from, if any
    pub fn awaiting(&self) -> Option<CatalogKind> {
        match self {
            Self::AwaitingBlueprintSelection { .. } => Some(CatalogKind::Blueprint),
            Self::AwaitingPrintProviderSelection { .. } => Some(CatalogKind::PrintProvider),
            Self::AwaitingVariantSelection { .. } => Some(CatalogKind::Variant),
            _ => None,
        }
    }

    /// Candidates shown for `kind`, empty unless that selection is awaited
    pub fn candidates(&self, kind: CatalogKind) -> &[CatalogItem] {
        match (self, kind) {
            (Self::AwaitingBlueprintSelection { candidates }, CatalogKind::Blueprint)
            | (Self::AwaitingPrintProviderSelection { candidates }, CatalogKind::PrintProvider)
            | (Self::AwaitingVariantSelection { candidates }, CatalogKind::Variant) => candidates,
            _ => &[],
        }
    }
}

/// Items confirmed so far, always a prefix of the funnel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Selection {
    #[default]
    Empty,
    Blueprint {
        blueprint: CatalogItem,
    },
    PrintProvider {
        blueprint: CatalogItem,
        print_provider: CatalogItem,
    },
    Variant {
        blueprint: CatalogItem,
        print_provider: CatalogItem,
        variant: CatalogItem,
    },
}

impl Selection {
    pub fn blueprint(&self) -> Option<&CatalogItem> {
        match self {
            Self::Empty => None,
            Self::Blueprint { blueprint }
            | Self::PrintProvider { blueprint, .. }
            | Self::Variant { blueprint, .. } => Some(blueprint),
        }
    }

    pub fn print_provider(&self) -> Option<&CatalogItem> {
        match self {
            Self::PrintProvider { print_provider, .. } | Self::Variant { print_provider, .. } => {
                Some(print_provider)
            }
            _ => None,
        }
    }

    pub fn variant(&self) -> Option<&CatalogItem> {
        match self {
            Self::Variant { variant, .. } => Some(variant),
            _ => None,
        }
    }
}

/// Everything the funnel remembers about one conversation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionContext {
    pub(crate) stage: Stage,
    pub(crate) selection: Selection,
    pub(crate) last_prompt: Option<String>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Last raw user text, kept for diagnostics
    pub fn last_prompt(&self) -> Option<&str> {
        self.last_prompt.as_deref()
    }

    pub fn candidate_blueprints(&self) -> &[CatalogItem] {
        self.stage.candidates(CatalogKind::Blueprint)
    }

    pub fn candidate_print_providers(&self) -> &[CatalogItem] {
        self.stage.candidates(CatalogKind::PrintProvider)
    }

    pub fn candidate_variants(&self) -> &[CatalogItem] {
        self.stage.candidates(CatalogKind::Variant)
    }

    pub fn selected_blueprint(&self) -> Option<&CatalogItem> {
        self.selection.blueprint()
    }

    pub fn selected_print_provider(&self) -> Option<&CatalogItem> {
        self.selection.print_provider()
    }

    pub fn selected_variant(&self) -> Option<&CatalogItem> {
        self.selection.variant()
    }

    pub fn is_complete(&self) -> bool {
        self.stage == Stage::Complete
    }
}
