//! Parsing the code before the cursor and capturing the parser's stack.

use quill_grammar::Grammar;
use quill_ir::{CodeLines, Position, SyntaxTree};
use quill_parse::{Feed, Mode, ParseStack, Parser};
use tracing::{debug, trace};

use crate::bounded::{BoundedTokens, Step};
use crate::{locator, source_window, ContextError};

/// The parser stack after the code from the start of the statement at
/// `position` up to `position`.
#[tracing::instrument(level = "debug", skip_all, fields(%position))]
pub fn stack_at_position<'g>(
    grammar: &'g Grammar,
    lines: &CodeLines,
    tree: &SyntaxTree,
    position: Position,
) -> Result<ParseStack<'g>, ContextError> {
    let statement = locator::locate(tree, position)?;
    let start = tree.start(statement);
    let window = if start < position {
        source_window(lines, start, position)?
    } else {
        String::new()
    };
    let code = normalize(&window);
    trace!(code, "prefix");
    Ok(parse_prefix(grammar, code))
}

/// Trailing blanks carry no information about what may follow, and a lone
/// `;` cannot start a statement.
fn normalize(code: &str) -> &str {
    let code = code.trim_matches([' ', '\t']);
    if code == ";" {
        ""
    } else {
        code
    }
}

/// Feed `code` to a recovering parser and return its stack when the
/// input runs out.
pub fn parse_prefix<'g>(grammar: &'g Grammar, code: &str) -> ParseStack<'g> {
    let mut parser = Parser::new(grammar, Mode::Recover);
    for step in BoundedTokens::new(code) {
        let Step::Token(token) = step else {
            break;
        };
        match parser.add_token(token) {
            Ok(Feed::Continue) => {}
            Ok(Feed::Accepted) => break,
            Err(error) => {
                debug!(%error, "prefix parse stopped");
                break;
            }
        }
    }
    parser.into_stack()
}

#[cfg(test)]
mod tests;
