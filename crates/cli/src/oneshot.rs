use anyhow::Context;
use printify_agent_common::SystemConfig;
use printify_agent_selection::{SessionContext, ToolCall};

use crate::{build_machine, display};

/// Run a blueprint search in a throwaway session and print the reply
pub async fn execute(config: &SystemConfig, query: &str, json: bool) -> anyhow::Result<()> {
    let machine = build_machine(config)?;
    let mut ctx = SessionContext::new();

    let reply = machine
        .handle(&mut ctx, ToolCall::SearchBlueprints, query)
        .await
        .context("Blueprint search failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&reply)?);
    } else {
        println!("{}", display::format_reply(&reply));
    }
    Ok(())
}
