//! The blueprint -> print provider -> variant selection funnel
//!
//! Each operation takes the session's context by `&mut` and returns a
//! [`Reply`]. Upstream failures, unparsable indices and out-of-order calls
//! become replies and leave the context untouched; only a malformed catalog
//! payload escapes as `Err`.

use printify_agent_catalog::matcher;
use printify_agent_catalog::summarizer;
use printify_agent_catalog::CatalogClient;
use printify_agent_common::{
    CatalogError, CatalogItem, CatalogKind, SelectionConfig, SessionId,
};
use tracing::{debug, info, instrument, warn};

use crate::context::{Selection, SessionContext, Stage};
use crate::dispatch::ToolCall;
use crate::reply::{Outcome, ProductSummary, Reply};
use crate::store::SessionContextStore;

#[derive(Debug, Clone)]
pub struct SelectionStateMachine {
    catalog: CatalogClient,
    shortlist_size: usize,
    summary_max_items: usize,
}

impl SelectionStateMachine {
    pub fn new(catalog: CatalogClient, config: &SelectionConfig) -> Self {
        Self::with_limits(catalog, config.shortlist_size, config.summary_max_items)
    }

    pub fn with_limits(catalog: CatalogClient, shortlist_size: usize, summary_max_items: usize) -> Self {
        Self {
            catalog,
            shortlist_size: shortlist_size.max(1),
            summary_max_items: summary_max_items.max(1),
        }
    }

    pub fn catalog(&self) -> &CatalogClient {
        &self.catalog
    }

    /// Route a named operation, recording the raw text as the last prompt
    #[instrument(skip(self, ctx, text), fields(call = %call, stage = %ctx.stage))]
    pub async fn handle(
        &self,
        ctx: &mut SessionContext,
        call: ToolCall,
        text: &str,
    ) -> Result<Reply, CatalogError> {
        ctx.last_prompt = Some(text.to_string());

        match call {
            ToolCall::SearchBlueprints => self.search_blueprints(ctx, text).await,
            ToolCall::SelectBlueprint => Ok(self.select_blueprint(ctx, text)),
            ToolCall::GetPrintProviders => self.get_print_providers(ctx).await,
            ToolCall::SelectPrintProvider => Ok(self.select_print_provider(ctx, text)),
            ToolCall::GetVariants => self.get_variants(ctx).await,
            ToolCall::SelectVariant => Ok(self.select_variant(ctx, text)),
        }
    }

    /// Load the session's context, run one turn, and store it back.
    ///
    /// The store's turn lock for `session` is held for the whole turn, so
    /// concurrent turns of one session run one after the other.
    pub async fn handle_turn<S>(
        &self,
        store: &S,
        session: &SessionId,
        call: ToolCall,
        text: &str,
    ) -> Result<Reply, CatalogError>
    where
        S: SessionContextStore + ?Sized,
    {
        let lock = store.turn_lock(session);
        let _turn = lock.lock().await;

        let mut ctx = store.get(session).await;
        let reply = self.handle(&mut ctx, call, text).await;
        store.put(session, ctx).await;
        reply
    }

    /// Rank the blueprint catalog against `query` and offer the shortlist.
    ///
    /// A non-empty shortlist supersedes whatever the session was doing.
    #[instrument(skip(self, ctx))]
    pub async fn search_blueprints(
        &self,
        ctx: &mut SessionContext,
        query: &str,
    ) -> Result<Reply, CatalogError> {
        if query.trim().is_empty() {
            return Ok(Reply::no_matches(
                "Tell me what kind of product you are looking for, e.g. \"coffee mug\".",
            ));
        }

        let catalog = match self.catalog.fetch_blueprints().await {
            Ok(items) => items,
            Err(err) => return upstream_reply(CatalogKind::Blueprint, err),
        };

        let candidates = matcher::shortlist(&catalog, query, self.shortlist_size);
        if candidates.is_empty() {
            debug!(catalog_size = catalog.len(), "No blueprint matched");
            return Ok(Reply::no_matches(format!(
                "No blueprints match \"{}\". Try different keywords.",
                query.trim()
            )));
        }

        let message = self.list_prompt(
            CatalogKind::Blueprint,
            format!("Blueprints matching \"{}\"", query.trim()),
            &candidates,
        );
        let reply = Reply::new(Outcome::Shortlist, message)
            .with_titles(CatalogKind::Blueprint, &candidates);

        info!(candidates = candidates.len(), "Awaiting blueprint selection");
        ctx.selection = Selection::Empty;
        ctx.stage = Stage::AwaitingBlueprintSelection { candidates };
        Ok(reply)
    }

    #[instrument(skip(self, ctx))]
    pub fn select_blueprint(&self, ctx: &mut SessionContext, text: &str) -> Reply {
        let Stage::AwaitingBlueprintSelection { candidates } = &ctx.stage else {
            return Reply::nothing_awaited(CatalogKind::Blueprint);
        };
        let Some(index) = parse_index(text, candidates.len()) else {
            debug!(text, available = candidates.len(), "Rejected blueprint selection");
            return Reply::invalid_selection(CatalogKind::Blueprint, candidates.len());
        };

        let blueprint = candidates[index].clone();
        info!(blueprint_id = blueprint.id, "Blueprint selected");
        let reply = Reply::new(
            Outcome::Selected,
            format!(
                "You selected the {} blueprint (ID {}). Next I can list its print providers.",
                blueprint.title, blueprint.id
            ),
        );

        ctx.selection = Selection::Blueprint { blueprint };
        ctx.stage = Stage::BlueprintSelected;
        reply
    }

    /// Fetch (uncached) the print providers for the selected blueprint
    #[instrument(skip(self, ctx))]
    pub async fn get_print_providers(&self, ctx: &mut SessionContext) -> Result<Reply, CatalogError> {
        let Some(blueprint) = ctx.selection.blueprint() else {
            return Ok(Reply::select_first("a blueprint"));
        };

        let providers = match self.catalog.fetch_print_providers(blueprint.id).await {
            Ok(items) => items,
            Err(err) => return upstream_reply(CatalogKind::PrintProvider, err),
        };
        if providers.is_empty() {
            return Ok(Reply::no_matches(format!(
                "No print providers offer the {} blueprint.",
                blueprint.title
            )));
        }

        let message = self.list_prompt(
            CatalogKind::PrintProvider,
            format!("Print providers for {}", blueprint.title),
            &providers,
        );
        let reply = Reply::new(Outcome::Shortlist, message)
            .with_titles(CatalogKind::PrintProvider, &providers);

        info!(
            blueprint_id = blueprint.id,
            candidates = providers.len(),
            "Awaiting print provider selection"
        );
        ctx.stage = Stage::AwaitingPrintProviderSelection {
            candidates: providers,
        };
        Ok(reply)
    }

    #[instrument(skip(self, ctx))]
    pub fn select_print_provider(&self, ctx: &mut SessionContext, text: &str) -> Reply {
        let Stage::AwaitingPrintProviderSelection { candidates } = &ctx.stage else {
            return Reply::nothing_awaited(CatalogKind::PrintProvider);
        };
        let Some(blueprint) = ctx.selection.blueprint() else {
            return Reply::select_first("a blueprint");
        };
        let Some(index) = parse_index(text, candidates.len()) else {
            debug!(text, available = candidates.len(), "Rejected print provider selection");
            return Reply::invalid_selection(CatalogKind::PrintProvider, candidates.len());
        };

        let blueprint = blueprint.clone();
        let print_provider = candidates[index].clone();
        info!(print_provider_id = print_provider.id, "Print provider selected");
        let reply = Reply::new(
            Outcome::Selected,
            format!(
                "You selected {} (ID {}) to print your {}. Next I can list the available variants.",
                print_provider.title, print_provider.id, blueprint.title
            ),
        );

        ctx.selection = Selection::PrintProvider {
            blueprint,
            print_provider,
        };
        ctx.stage = Stage::PrintProviderSelected;
        reply
    }

    /// Fetch (uncached) the variants for the selected blueprint and provider
    #[instrument(skip(self, ctx))]
    pub async fn get_variants(&self, ctx: &mut SessionContext) -> Result<Reply, CatalogError> {
        let (Some(blueprint), Some(print_provider)) =
            (ctx.selection.blueprint(), ctx.selection.print_provider())
        else {
            return Ok(Reply::select_first("a blueprint and a print provider"));
        };

        let variants = match self
            .catalog
            .fetch_variants(blueprint.id, print_provider.id)
            .await
        {
            Ok(items) => items,
            Err(err) => return upstream_reply(CatalogKind::Variant, err),
        };
        if variants.is_empty() {
            return Ok(Reply::no_matches(format!(
                "{} has no variants of the {} blueprint.",
                print_provider.title, blueprint.title
            )));
        }

        let message = self.list_prompt(
            CatalogKind::Variant,
            format!("Variants of {} from {}", blueprint.title, print_provider.title),
            &variants,
        );
        let reply =
            Reply::new(Outcome::Shortlist, message).with_titles(CatalogKind::Variant, &variants);

        info!(candidates = variants.len(), "Awaiting variant selection");
        ctx.stage = Stage::AwaitingVariantSelection {
            candidates: variants,
        };
        Ok(reply)
    }

    #[instrument(skip(self, ctx))]
    pub fn select_variant(&self, ctx: &mut SessionContext, text: &str) -> Reply {
        let Stage::AwaitingVariantSelection { candidates } = &ctx.stage else {
            return Reply::nothing_awaited(CatalogKind::Variant);
        };
        let (Some(blueprint), Some(print_provider)) =
            (ctx.selection.blueprint(), ctx.selection.print_provider())
        else {
            return Reply::select_first("a blueprint and a print provider");
        };
        let Some(index) = parse_index(text, candidates.len()) else {
            debug!(text, available = candidates.len(), "Rejected variant selection");
            return Reply::invalid_selection(CatalogKind::Variant, candidates.len());
        };

        let blueprint = blueprint.clone();
        let print_provider = print_provider.clone();
        let variant = candidates[index].clone();
        let product = ProductSummary {
            blueprint_id: blueprint.id,
            print_provider_id: print_provider.id,
            variant_id: variant.id,
        };
        info!(?product, "Product configuration complete");
        let reply = Reply::new(
            Outcome::Completed,
            format!(
                "Your product is configured: {} from {}, variant {}.",
                blueprint.title, print_provider.title, variant.title
            ),
        )
        .with_product(product);

        ctx.selection = Selection::Variant {
            blueprint,
            print_provider,
            variant,
        };
        ctx.stage = Stage::Complete;
        reply
    }

    /// Summary line, numbered entries, then how to choose
    fn list_prompt(&self, kind: CatalogKind, heading: String, items: &[CatalogItem]) -> String {
        let mut lines = vec![format!(
            "{}: {}",
            heading,
            summarizer::summarize(items, self.summary_max_items)
        )];
        lines.extend(
            items
                .iter()
                .take(self.summary_max_items)
                .enumerate()
                .map(|(i, item)| format!("{}. {}", i + 1, item)),
        );
        lines.push(format!(
            "Reply with the number of your choice, e.g. \"{}\".",
            kind.selection_phrase(1)
        ));
        lines.join("\n")
    }
}

/// 1-based index from the last whitespace-delimited token, as a 0-based
/// index into a list of `len` entries
fn parse_index(text: &str, len: usize) -> Option<usize> {
    let n: usize = text.split_whitespace().last()?.parse().ok()?;
    (1..=len).contains(&n).then(|| n - 1)
}

fn upstream_reply(kind: CatalogKind, err: CatalogError) -> Result<Reply, CatalogError> {
    match err {
        CatalogError::Upstream(upstream) => {
            warn!(
                status = ?upstream.status,
                attempts = upstream.attempts,
                "Could not load {}: {}",
                kind.plural(),
                upstream.message
            );
            Ok(Reply::upstream_failure(kind, &upstream))
        }
        other => Err(other),
    }
}
