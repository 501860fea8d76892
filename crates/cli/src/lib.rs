//! Shared CLI utilities and types

pub mod completions;
pub mod display;
pub mod interactive;
pub mod oneshot;

use anyhow::Result;
use printify_agent_catalog::CatalogClient;
use printify_agent_common::SystemConfig;
use printify_agent_selection::SelectionStateMachine;

/// Wire a state machine to the configured catalog service
pub fn build_machine(config: &SystemConfig) -> Result<SelectionStateMachine> {
    let catalog = CatalogClient::from_config(config)?;
    Ok(SelectionStateMachine::new(catalog, &config.selection))
}
