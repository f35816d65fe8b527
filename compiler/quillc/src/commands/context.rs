//! Cursor-context commands: `complete` and `signature`.

use quill_context::{ContextError, ContextResolver, Document, ModuleId, ResolverConfig};
use quill_ir::Position;

use super::{grammar, read_file};

/// Show what may be typed at `position` in a file.
pub fn complete_file(path: &str, position: Position) {
    let content = read_file(path);
    let grammar = grammar();
    let document = Document::parse(grammar, Some(ModuleId::new(path)), &content);
    let resolver = ContextResolver::new(grammar, ResolverConfig::default());

    let completion = match resolver.completion(&document, position) {
        Ok(completion) => completion,
        Err(error) => report(&error),
    };

    println!("Completion at {position} in '{path}':");
    if !completion.name.is_empty() {
        println!("  typed: {}", completion.name);
    }
    let rules: Vec<String> = completion.symbols.iter().map(ToString::to_string).collect();
    println!("  rules: {}", rules.join(" > "));
    println!("  keywords: {}", completion.keywords.join(" "));
    let tokens: Vec<&str> = completion.tokens.iter().map(|kind| kind.name()).collect();
    println!("  tokens: {}", tokens.join(" "));
}

/// Show the open call around `position` in a file.
pub fn signature_file(path: &str, position: Position, cached: bool) {
    let content = read_file(path);
    let grammar = grammar();
    let document = Document::parse(grammar, Some(ModuleId::new(path)), &content);
    let config = if cached {
        ResolverConfig::default()
    } else {
        ResolverConfig::uncached()
    };
    let resolver = ContextResolver::new(grammar, config);

    let signature = match resolver.signature(&document, position) {
        Ok(Some(signature)) => signature,
        Ok(None) => {
            println!("no enclosing call at {position}");
            return;
        }
        Err(error) => report(&error),
    };

    let details = &signature.details;
    println!("Call signature at {position} in '{path}':");
    println!("  callee: {}", signature.target);
    println!("  bracket: {}", details.bracket);
    println!("  argument: {}", details.call_index);
    if let Some(keyword) = &details.keyword_name {
        println!("  keyword: {keyword}");
    }
}

/// Unresolvable cursors are an answer, not a failure.
fn report(error: &ContextError) -> ! {
    if error.is_unresolvable() {
        println!("{error}");
        std::process::exit(0);
    }
    eprintln!("error: {error}");
    std::process::exit(1);
}
