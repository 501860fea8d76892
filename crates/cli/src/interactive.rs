use anyhow::{anyhow, Result};
use printify_agent_common::{SessionId, SystemConfig};
use printify_agent_selection::{
    InMemorySessionStore, SelectionStateMachine, SessionContextStore, ToolCall,
};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use strum::IntoEnumIterator;
use tracing::{error, info};

use crate::{build_machine, display};

pub async fn run(config: &SystemConfig) -> Result<()> {
    let machine = build_machine(config)?;
    let store = InMemorySessionStore::new();
    let session = SessionId::new();
    let mut rl = DefaultEditor::new()?;

    info!(session = %session, "Interactive session started");
    println!("Printify product selection - Interactive Mode");
    print_help();

    loop {
        match rl.readline("printify> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                match line {
                    "exit" | "quit" => break,
                    ":help" => print_help(),
                    ":state" => {
                        let ctx = store.get(&session).await;
                        println!("{}", display::format_context(&ctx));
                    }
                    ":refresh" => {
                        machine.catalog().cache().invalidate().await;
                        println!("Blueprint cache cleared");
                    }
                    _ => process_turn(&machine, &store, &session, line).await,
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}

async fn process_turn(
    machine: &SelectionStateMachine,
    store: &InMemorySessionStore,
    session: &SessionId,
    line: &str,
) {
    let (call, text) = match parse_line(line) {
        Ok(parsed) => parsed,
        Err(e) => {
            println!("{}", e);
            return;
        }
    };

    match machine.handle_turn(store, session, call, text).await {
        Ok(reply) => println!("{}", display::format_reply(&reply)),
        Err(e) => {
            error!("Turn failed: {}", e);
            println!("Error: {}", e);
        }
    }
}

/// Split `<tool_name> <text>` into the operation and its text
fn parse_line(line: &str) -> Result<(ToolCall, &str)> {
    let line = line.trim();
    let (name, text) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let call = name
        .parse::<ToolCall>()
        .map_err(|_| anyhow!("Unknown tool '{}'. Type :help for the list.", name))?;
    Ok((call, text.trim()))
}

fn print_help() {
    println!("Enter `<tool> <text>`, e.g. `search_blueprints coffee mug`. Tools:");
    for call in ToolCall::iter() {
        println!("  {:<22} {}", call.to_string(), call.description());
    }
    println!("Commands: :state, :refresh, :help, exit");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_splits_tool_and_text() {
        let (call, text) = parse_line("search_blueprints  coffee mug ").unwrap();
        assert_eq!(call, ToolCall::SearchBlueprints);
        assert_eq!(text, "coffee mug");
    }

    #[test]
    fn test_parse_line_without_text() {
        let (call, text) = parse_line("get_variants").unwrap();
        assert_eq!(call, ToolCall::GetVariants);
        assert_eq!(text, "");
    }

    #[test]
    fn test_parse_line_rejects_unknown_tool() {
        let err = parse_line("buy_mug now").unwrap_err();
        assert!(err.to_string().contains("buy_mug"));
    }
}
