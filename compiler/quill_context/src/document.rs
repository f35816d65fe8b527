//! A parsed document snapshot.

use std::fmt;
use std::path::{Path, PathBuf};

use quill_grammar::Grammar;
use quill_ir::{CodeLines, SyntaxTree};
use quill_parse::parse_document;

/// Stable identity of a module, used to key cached signatures.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId(PathBuf);

impl ModuleId {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ModuleId(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Lines and tree of one version of a document.
///
/// Documents without a module identity (scratch buffers, snippets) are
/// never cached.
#[derive(Clone, Debug)]
pub struct Document {
    module: Option<ModuleId>,
    lines: CodeLines,
    tree: SyntaxTree,
}

impl Document {
    pub fn parse(grammar: &Grammar, module: Option<ModuleId>, source: &str) -> Self {
        Document {
            module,
            lines: CodeLines::new(source),
            tree: parse_document(grammar, source),
        }
    }

    #[inline]
    pub fn module(&self) -> Option<&ModuleId> {
        self.module.as_ref()
    }

    #[inline]
    pub fn lines(&self) -> &CodeLines {
        &self.lines
    }

    #[inline]
    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }
}
