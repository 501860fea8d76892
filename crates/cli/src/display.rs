//! Terminal rendering of replies, contexts and configuration

use printify_agent_common::{SystemConfig, API_TOKEN_ENV};
use printify_agent_selection::{Outcome, Reply, SessionContext};

pub fn format_reply(reply: &Reply) -> String {
    let mut out = match reply.outcome {
        Outcome::UpstreamFailure | Outcome::RateLimited => format!("! {}", reply.message),
        Outcome::InvalidSelection | Outcome::StageMismatch => format!("? {}", reply.message),
        _ => reply.message.clone(),
    };
    if let Some(product) = &reply.product {
        out.push_str(&format!(
            "\n  blueprint {} / print provider {} / variant {}",
            product.blueprint_id, product.print_provider_id, product.variant_id
        ));
    }
    out
}

pub fn format_context(ctx: &SessionContext) -> String {
    let mut lines = vec![format!("stage: {}", ctx.stage())];
    let chosen = [
        ("blueprint", ctx.selected_blueprint()),
        ("print provider", ctx.selected_print_provider()),
        ("variant", ctx.selected_variant()),
    ];
    for (label, item) in chosen {
        if let Some(item) = item {
            lines.push(format!("{}: {}", label, item));
        }
    }
    if let Some(kind) = ctx.stage().awaiting() {
        lines.push(format!(
            "awaiting {} selection from {} candidate(s)",
            kind,
            ctx.stage().candidates(kind).len()
        ));
    }
    if let Some(prompt) = ctx.last_prompt() {
        lines.push(format!("last prompt: {:?}", prompt));
    }
    lines.join("\n")
}

pub fn format_config(config: &SystemConfig) -> String {
    let catalog = &config.catalog;
    let credential = match config.api_token() {
        Ok(_) => "configured".to_string(),
        Err(_) => format!("missing (set {} or catalog.api_token)", API_TOKEN_ENV),
    };
    [
        "Configuration is valid".to_string(),
        format!("  Catalog: {}", catalog.base_url),
        format!("  Credential: {}", credential),
        format!(
            "  Retry: {} attempt(s), backoff {}ms -> {}ms",
            catalog.retry.max_attempts, catalog.retry.initial_backoff_ms, catalog.retry.max_backoff_ms
        ),
        format!("  Blueprint cache TTL: {}s", catalog.cache.blueprint_ttl_secs),
        format!(
            "  Shortlist: {}, summary: {} item(s)",
            config.selection.shortlist_size, config.selection.summary_max_items
        ),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use printify_agent_selection::ProductSummary;

    #[test]
    fn test_failures_are_marked() {
        let reply = Reply::new(Outcome::RateLimited, "slow down");
        assert_eq!(format_reply(&reply), "! slow down");

        let reply = Reply::new(Outcome::StageMismatch, "not now");
        assert_eq!(format_reply(&reply), "? not now");
    }

    #[test]
    fn test_completed_reply_shows_ids() {
        let reply = Reply::new(Outcome::Completed, "done").with_product(ProductSummary {
            blueprint_id: 3,
            print_provider_id: 5,
            variant_id: 12100,
        });
        assert_eq!(
            format_reply(&reply),
            "done\n  blueprint 3 / print provider 5 / variant 12100"
        );
    }

    #[test]
    fn test_idle_context() {
        assert_eq!(format_context(&SessionContext::new()), "stage: idle");
    }

    #[test]
    fn test_config_summary_mentions_limits() {
        let text = format_config(&SystemConfig::default());
        assert!(text.contains("3 attempt(s)"));
        assert!(text.contains("3600s"));
    }
}
