//! Statement-level error recovery.
//!
//! When a token fits nowhere, the parser looks for the innermost frame that
//! can absorb damage: the file itself, an indented block, or a statement
//! line that already holds more than one node (which is closed early and
//! kept). Every frame above that point is discarded and its nodes are
//! flattened into one error node. If anything was discarded the token is
//! tried again against the repaired stack.

use quill_ir::{Symbol, TokenKind};
use tracing::debug;

use crate::parser::Parser;

impl Parser<'_> {
    /// Repair the stack for a rejected token. Returns whether the token
    /// should be retried.
    pub(crate) fn recover(&mut self, kind: TokenKind) -> bool {
        let depth = self.stack.len();
        let (mut index, symbol) = if kind == TokenKind::EndMarker {
            // End of input: everything still open is damage.
            (0, self.grammar().start())
        } else {
            self.current_suite()
        };

        if symbol == Symbol::SimpleStmt && index > 0 {
            let nodes = std::mem::take(&mut self.stack[index].nodes);
            let mut target = index - 1;
            if target > 0 && self.stack[target].symbol() == Symbol::Stmt {
                target -= 1;
            }
            let statement = self.arena.alloc_node(Symbol::SimpleStmt, nodes);
            self.stack[target].nodes.push(statement);
            index = target;
        }

        debug!(?kind, depth, keep = index + 1, rule = %symbol, "error recovery");
        self.remove_stack(index + 1);
        self.stack.len() < depth
    }

    /// Innermost frame that survives recovery.
    fn current_suite(&self) -> (usize, Symbol) {
        for (index, frame) in self.stack.iter().enumerate().rev() {
            let symbol = frame.symbol();
            let keeps = match symbol {
                Symbol::FileInput => true,
                Symbol::Suite => frame.indented,
                Symbol::SimpleStmt => frame.nodes.len() > 1,
                _ => false,
            };
            if keeps {
                return (index, symbol);
            }
        }
        (0, self.grammar().start())
    }

    /// Drop frames from `start` upward, moving their nodes into one error
    /// node on the frame below.
    fn remove_stack(&mut self, start: usize) {
        if start == 0 || start >= self.stack.len() {
            return;
        }
        let nodes: Vec<_> = self
            .stack
            .drain(start..)
            .flat_map(|frame| frame.nodes)
            .collect();
        if nodes.is_empty() {
            return;
        }
        let error = self.arena.alloc_error_node(nodes);
        if let Some(frame) = self.stack.last_mut() {
            frame.nodes.push(error);
        }
    }
}

#[cfg(test)]
mod tests;
