//! The six funnel operations, addressable by name

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// A state machine operation as named by the dispatcher
#[derive(
    Display, AsRefStr, EnumString, EnumIter, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ToolCall {
    SearchBlueprints,
    SelectBlueprint,
    GetPrintProviders,
    SelectPrintProvider,
    GetVariants,
    SelectVariant,
}

impl ToolCall {
    /// Whether the operation reads the user's text
    pub fn uses_text(&self) -> bool {
        !matches!(self, Self::GetPrintProviders | Self::GetVariants)
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::SearchBlueprints => "search the catalog for blueprints matching the text",
            Self::SelectBlueprint => "choose a blueprint from the shortlist by number",
            Self::GetPrintProviders => "list print providers for the chosen blueprint",
            Self::SelectPrintProvider => "choose a print provider by number",
            Self::GetVariants => "list variants for the chosen blueprint and provider",
            Self::SelectVariant => "choose a variant by number",
        }
    }
}
