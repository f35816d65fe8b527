//! End-to-end behaviour of the resolver on small documents.

#![allow(clippy::unwrap_used)]

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use quill_context::{
    CallSignature, CallTarget, ContextError, ContextResolver, Document, ModuleId, ResolverConfig,
    UnresolvableReason,
};
use quill_grammar::Grammar;
use quill_ir::{Position, TokenKind};

fn grammar() -> &'static Grammar {
    Grammar::bundled().unwrap()
}

fn document(source: &str) -> Document {
    Document::parse(grammar(), Some(ModuleId::new("app/main.py")), source)
}

fn signature_at_end(source: &str) -> Option<CallSignature<CallTarget>> {
    let doc = document(source);
    let end = doc.lines().end();
    ContextResolver::new(grammar(), ResolverConfig::default())
        .signature(&doc, end)
        .unwrap()
}

#[test]
fn test_fresh_call() {
    let signature = signature_at_end("foo(").unwrap();
    assert_eq!(signature.details.bracket, Position::new(1, 3));
    assert_eq!(signature.details.call_index, 0);
    assert_eq!(signature.details.keyword_name, None);
    assert_eq!(signature.target.name.as_deref(), Some("foo"));
}

#[test]
fn test_keyword_argument_being_typed() {
    let signature = signature_at_end("foo(a, b=").unwrap();
    assert_eq!(signature.details.call_index, 1);
    assert_eq!(signature.details.keyword_name.as_deref(), Some("b"));
}

#[test]
fn test_nested_call_is_innermost() {
    let signature = signature_at_end("foo(a, bar(").unwrap();
    assert_eq!(signature.details.bracket, Position::new(1, 10));
    assert_eq!(signature.details.call_index, 0);
    assert_eq!(signature.target.name.as_deref(), Some("bar"));
}

#[test]
fn test_definition_header_is_not_a_call() {
    assert_eq!(signature_at_end("def f("), None);
    assert_eq!(signature_at_end("class C("), None);
}

#[test]
fn test_string_is_unresolvable_on_both_paths() {
    let doc = document("x = 'abc");
    let resolver = ContextResolver::new(grammar(), ResolverConfig::default());
    let position = Position::new(1, 8);
    let completion = resolver.completion(&doc, position).unwrap_err();
    let signature = resolver.signature(&doc, position).unwrap_err();
    assert!(completion.is_unresolvable());
    assert_eq!(completion, signature);
    assert_eq!(
        completion,
        ContextError::Unresolvable {
            position,
            reason: UnresolvableReason::InsideString,
        }
    );
}

#[test]
fn test_completion_after_dot_and_in_call() {
    let resolver = ContextResolver::new(grammar(), ResolverConfig::default());
    let doc = document("import os\nos.");
    let completion = resolver.completion(&doc, Position::new(2, 3)).unwrap();
    assert_eq!(completion.tokens, vec![TokenKind::Name]);
    assert!(completion.keywords.is_empty());

    let doc = document("print(");
    let completion = resolver.completion(&doc, Position::new(1, 6)).unwrap();
    assert!(completion.tokens.contains(&TokenKind::RPar));
    assert!(completion.keywords.contains(&"lambda"));
}

#[test]
fn test_completion_at_statement_start() {
    let resolver = ContextResolver::new(grammar(), ResolverConfig::default());
    let doc = document("x = 1\n");
    let completion = resolver.completion(&doc, Position::new(2, 0)).unwrap();
    for keyword in ["def", "class", "import", "if", "return"] {
        assert!(completion.keywords.contains(&keyword), "missing {keyword}");
    }
}

const SAMPLE: &str = "\
import os

def join(a, b):
    return os.path.join(a, b)

result = join(1, max(2, key=
";

#[test]
fn test_repeated_requests_agree() {
    let doc = document(SAMPLE);
    let resolver = ContextResolver::new(grammar(), ResolverConfig::default());
    let positions = [
        Position::new(4, 24),
        Position::new(4, 27),
        Position::new(6, 16),
        Position::new(6, 28),
    ];
    for position in positions {
        let first = resolver.signature(&doc, position);
        let second = resolver.signature(&doc, position);
        assert_eq!(first, second, "at {position}");
        assert_eq!(resolver.completion(&doc, position), resolver.completion(&doc, position));
    }
}

#[test]
fn test_cache_is_transparent() {
    let doc = document(SAMPLE);
    let cached = ContextResolver::new(grammar(), ResolverConfig::default());
    let uncached = ContextResolver::new(grammar(), ResolverConfig::uncached());
    let end = doc.lines().end();
    for line in 1..=end.line {
        let width = doc.lines().line(line).map_or(0, |text| text.chars().count());
        for column in 0..=u32::try_from(width).unwrap() {
            let position = Position::new(line, column);
            let warm = cached.signature(&doc, position);
            let hot = cached.signature(&doc, position);
            let cold = uncached.signature(&doc, position);
            assert_eq!(warm, cold, "at {position}");
            assert_eq!(hot, cold, "at {position}");
        }
    }
    assert!(uncached.cache().is_empty());
}

#[test]
fn test_keyword_inside_nested_call() {
    let doc = document(SAMPLE);
    let resolver = ContextResolver::new(grammar(), ResolverConfig::default());
    let signature = resolver.signature(&doc, Position::new(6, 28)).unwrap().unwrap();
    assert_eq!(signature.details.bracket, Position::new(6, 20));
    assert_eq!(signature.details.call_index, 1);
    assert_eq!(signature.details.keyword_name.as_deref(), Some("key"));
    assert_eq!(signature.target.name.as_deref(), Some("max"));
}

#[test]
fn test_edits_between_requests_are_seen() {
    let resolver = ContextResolver::new(grammar(), ResolverConfig::default());
    let cursor = Position::new(1, 7);
    let first = resolver.signature(&document("print(a"), cursor).unwrap().unwrap();
    assert_eq!(first.target.name.as_deref(), Some("print"));

    // Same bracket position and argument text, different surroundings.
    assert_eq!(resolver.signature(&document("def f(a"), cursor), Ok(None));
    assert_eq!(resolver.signature(&document("ab = (a"), cursor), Ok(None));
    let renamed = resolver.signature(&document("fooba(a"), cursor).unwrap().unwrap();
    assert_eq!(renamed.details, first.details);
    assert_eq!(renamed.target.name.as_deref(), Some("fooba"));
    assert_eq!(
        resolver.signature(&document("x = '(a"), cursor),
        Err(ContextError::Unresolvable {
            position: cursor,
            reason: UnresolvableReason::InsideString,
        })
    );

    let again = resolver.signature(&document("print(a"), cursor).unwrap().unwrap();
    assert_eq!(again, first);
}

#[test]
fn test_edits_match_a_fresh_computation() {
    let cached = ContextResolver::new(grammar(), ResolverConfig::default());
    let uncached = ContextResolver::new(grammar(), ResolverConfig::uncached());
    let versions = [
        "result = join(1, max(2, key=",
        "result = join(1, min(2, key=",
        "result = join(1, (2, key=",
        "result = join(1, 'max(2, key=",
        "result = max(1, max(2, key=",
    ];
    for _ in 0..2 {
        for source in versions {
            let doc = document(source);
            let end = doc.lines().end();
            assert_eq!(cached.signature(&doc, end), uncached.signature(&doc, end), "{source}");
        }
    }
}

proptest! {
    #[test]
    fn prop_completion_is_total(source in "[a-z0-9 ()=:,.\\[\\]\n]{0,40}") {
        let doc = Document::parse(grammar(), None, &source);
        let resolver = ContextResolver::new(grammar(), ResolverConfig::default());
        match resolver.completion(&doc, doc.lines().end()) {
            Ok(completion) => {
                prop_assert!(!completion.keywords.is_empty() || !completion.tokens.is_empty());
            }
            Err(error) => prop_assert!(error.is_unresolvable()),
        }
    }

    #[test]
    fn prop_signature_never_panics(source in "[a-z(),= \n]{0,30}") {
        let doc = document(&source);
        let resolver = ContextResolver::new(grammar(), ResolverConfig::default());
        let end = doc.lines().end();
        let first = resolver.signature(&doc, end);
        prop_assert_eq!(first, resolver.signature(&doc, end));
    }
}
