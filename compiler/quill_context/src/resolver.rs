//! Request entry points.

use quill_grammar::Grammar;
use quill_ir::{Position, Symbol, TokenKind};
use tracing::debug;

use crate::cache::{CacheKey, CallSignature, SignatureCache};
use crate::target::{callee_start, CallTargetResolver, SyntacticResolver};
use crate::{call_site, completion_name, driver, locator, walker, ContextError, Document, ResolverConfig};

/// What may be typed at a cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Completion<'g> {
    /// The identifier fragment already typed before the cursor.
    pub name: String,
    pub keywords: Vec<&'g str>,
    pub tokens: Vec<TokenKind>,
    /// Rules open at the cursor, outermost first.
    pub symbols: Vec<Symbol>,
}

impl Completion<'_> {
    /// The cursor is inside a rule of this kind.
    pub fn within(&self, symbol: Symbol) -> bool {
        self.symbols.contains(&symbol)
    }
}

/// Answers completion and signature-help requests against document
/// snapshots. One resolver is shared by all requests; only its signature
/// cache carries state between them.
pub struct ContextResolver<'g, R: CallTargetResolver = SyntacticResolver> {
    grammar: &'g Grammar,
    config: ResolverConfig,
    targets: R,
    cache: SignatureCache<R::Target>,
}

impl<'g> ContextResolver<'g> {
    pub fn new(grammar: &'g Grammar, config: ResolverConfig) -> Self {
        Self::with_resolver(grammar, config, SyntacticResolver)
    }
}

impl<'g, R: CallTargetResolver> ContextResolver<'g, R> {
    pub fn with_resolver(grammar: &'g Grammar, config: ResolverConfig, targets: R) -> Self {
        let cache = SignatureCache::new(config.signature_validity);
        ContextResolver {
            grammar,
            config,
            targets,
            cache,
        }
    }

    #[inline]
    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    #[inline]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    #[inline]
    pub fn cache(&self) -> &SignatureCache<R::Target> {
        &self.cache
    }

    /// Keywords and tokens that may legally come next at `position`.
    #[tracing::instrument(level = "debug", skip_all, fields(%position))]
    pub fn completion(&self, document: &Document, position: Position) -> Result<Completion<'g>, ContextError> {
        check_position(document, position)?;
        let stack = driver::stack_at_position(self.grammar, document.lines(), document.tree(), position)?;
        let found = walker::possible_continuations(self.grammar, &stack);
        debug!(
            keywords = found.keywords.len(),
            tokens = found.tokens.len(),
            depth = stack.len(),
            "completion"
        );
        Ok(Completion {
            name: completion_name(document.lines(), position).to_owned(),
            keywords: found.keywords,
            tokens: found.tokens,
            symbols: stack.symbols().collect(),
        })
    }

    /// The open call at `position`, if any, with its resolved target.
    ///
    /// The call is located afresh on every request. Documents with a module
    /// identity reuse a cached target when the call's text is unchanged and
    /// caching is enabled.
    #[tracing::instrument(level = "debug", skip_all, fields(%position))]
    pub fn signature(
        &self,
        document: &Document,
        position: Position,
    ) -> Result<Option<CallSignature<R::Target>>, ContextError> {
        check_position(document, position)?;
        let tree = document.tree();
        locator::locate(tree, position)?;
        let Some(site) = call_site(tree, position) else {
            debug!("no enclosing call");
            return Ok(None);
        };

        let key = document
            .module()
            .filter(|_| self.config.cache_signatures)
            .and_then(|module| {
                CacheKey::new(
                    module.clone(),
                    document.lines(),
                    callee_start(tree, site.bracket),
                    site.details.bracket,
                    position,
                )
            });
        if let Some(cached) = key.as_ref().and_then(|key| self.cache.get(key)) {
            if cached.details == site.details {
                return Ok(Some(cached));
            }
        }

        let signature = CallSignature {
            target: self.targets.resolve(tree, site.bracket),
            details: site.details,
        };
        if let Some(key) = key {
            self.cache.store(key, signature.clone());
        }
        Ok(Some(signature))
    }
}

fn check_position(document: &Document, position: Position) -> Result<(), ContextError> {
    if document.lines().contains(position) {
        Ok(())
    } else {
        Err(ContextError::PositionOutOfRange { position })
    }
}
