//! Reader for grammar rule text.
//!
//! ```text
//! rule: NAME ':' rhs NEWLINE
//! rhs:  alt ('|' alt)*
//! alt:  item+
//! item: '[' rhs ']' | atom ['+' | '*']
//! atom: '(' rhs ')' | NAME | STRING
//! ```
//!
//! Line breaks inside brackets continue the current rule. Each rule is
//! compiled to an NFA whose unlabelled arcs are epsilon moves.

use quill_stack::ensure_sufficient_stack;

use crate::GrammarError;

/// An NFA state. `None` labels are epsilon arcs.
#[derive(Clone, Debug, Default)]
pub(crate) struct NfaState {
    pub(crate) arcs: Vec<(Option<String>, usize)>,
}

/// The NFA of one rule.
#[derive(Clone, Debug)]
pub(crate) struct RuleNfa {
    pub(crate) name: String,
    pub(crate) states: Vec<NfaState>,
    pub(crate) start: usize,
    pub(crate) finish: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum MetaToken {
    Name(String),
    /// Quoted string, quotes included.
    Str(String),
    Op(char),
    Newline,
    Eof,
}

fn lex(text: &str) -> Result<Vec<(MetaToken, u32)>, GrammarError> {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();
    let mut line = 1;
    let mut depth = 0u32;

    while let Some(c) = chars.next() {
        match c {
            '#' => {
                while chars.next_if(|&c| c != '\n').is_some() {}
            }
            '\n' => {
                if depth == 0 && !matches!(tokens.last(), None | Some((MetaToken::Newline, _))) {
                    tokens.push((MetaToken::Newline, line));
                }
                line += 1;
            }
            c if c.is_whitespace() => {}
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut name = String::from(c);
                while let Some(c) = chars.next_if(|&c| c.is_ascii_alphanumeric() || c == '_') {
                    name.push(c);
                }
                tokens.push((MetaToken::Name(name), line));
            }
            '\'' => {
                let mut literal = String::from('\'');
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some('\n') | None => {
                            return Err(GrammarError::Syntax {
                                line,
                                message: "unterminated string".to_owned(),
                            });
                        }
                        Some(c) => literal.push(c),
                    }
                }
                literal.push('\'');
                tokens.push((MetaToken::Str(literal), line));
            }
            '(' | '[' => {
                depth += 1;
                tokens.push((MetaToken::Op(c), line));
            }
            ')' | ']' => {
                depth = depth.saturating_sub(1);
                tokens.push((MetaToken::Op(c), line));
            }
            ':' | '|' | '*' | '+' => tokens.push((MetaToken::Op(c), line)),
            other => {
                return Err(GrammarError::Syntax {
                    line,
                    message: format!("unexpected character {other:?}"),
                });
            }
        }
    }

    if !matches!(tokens.last(), None | Some((MetaToken::Newline, _))) {
        tokens.push((MetaToken::Newline, line));
    }
    tokens.push((MetaToken::Eof, line));
    Ok(tokens)
}

/// Parse rule text into one NFA per rule, in definition order.
pub(crate) fn parse(text: &str) -> Result<Vec<RuleNfa>, GrammarError> {
    let mut parser = MetaParser {
        tokens: lex(text)?,
        pos: 0,
        states: Vec::new(),
    };
    let mut rules = Vec::new();
    loop {
        match parser.current() {
            MetaToken::Eof => return Ok(rules),
            MetaToken::Newline => parser.pos += 1,
            _ => rules.push(parser.rule()?),
        }
    }
}

struct MetaParser {
    tokens: Vec<(MetaToken, u32)>,
    pos: usize,
    states: Vec<NfaState>,
}

impl MetaParser {
    fn current(&self) -> &MetaToken {
        self.tokens
            .get(self.pos)
            .map_or(&MetaToken::Eof, |(token, _)| token)
    }

    fn line(&self) -> u32 {
        self.tokens
            .get(self.pos)
            .or(self.tokens.last())
            .map_or(1, |&(_, line)| line)
    }

    fn error(&self, message: impl Into<String>) -> GrammarError {
        GrammarError::Syntax {
            line: self.line(),
            message: message.into(),
        }
    }

    fn at_op(&self, op: char) -> bool {
        *self.current() == MetaToken::Op(op)
    }

    fn expect_op(&mut self, op: char) -> Result<(), GrammarError> {
        if self.at_op(op) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(format!("expected '{op}', found {:?}", self.current())))
        }
    }

    fn new_state(&mut self) -> usize {
        self.states.push(NfaState::default());
        self.states.len() - 1
    }

    fn add_arc(&mut self, from: usize, label: Option<String>, to: usize) {
        self.states[from].arcs.push((label, to));
    }

    fn rule(&mut self) -> Result<RuleNfa, GrammarError> {
        let MetaToken::Name(name) = self.current().clone() else {
            return Err(self.error(format!("expected rule name, found {:?}", self.current())));
        };
        self.pos += 1;
        self.expect_op(':')?;
        self.states.clear();
        let (start, finish) = self.rhs()?;
        match self.current() {
            MetaToken::Newline => self.pos += 1,
            MetaToken::Eof => {}
            other => return Err(self.error(format!("expected end of rule, found {other:?}"))),
        }
        Ok(RuleNfa {
            name,
            states: std::mem::take(&mut self.states),
            start,
            finish,
        })
    }

    fn rhs(&mut self) -> Result<(usize, usize), GrammarError> {
        ensure_sufficient_stack(|| {
            let (a, z) = self.alt()?;
            if !self.at_op('|') {
                return Ok((a, z));
            }
            let start = self.new_state();
            let finish = self.new_state();
            self.add_arc(start, None, a);
            self.add_arc(z, None, finish);
            while self.at_op('|') {
                self.pos += 1;
                let (a, z) = self.alt()?;
                self.add_arc(start, None, a);
                self.add_arc(z, None, finish);
            }
            Ok((start, finish))
        })
    }

    fn alt(&mut self) -> Result<(usize, usize), GrammarError> {
        let (start, mut end) = self.item()?;
        while self.starts_item() {
            let (a, z) = self.item()?;
            self.add_arc(end, None, a);
            end = z;
        }
        Ok((start, end))
    }

    fn starts_item(&self) -> bool {
        matches!(
            self.current(),
            MetaToken::Name(_) | MetaToken::Str(_) | MetaToken::Op('(' | '[')
        )
    }

    fn item(&mut self) -> Result<(usize, usize), GrammarError> {
        if self.at_op('[') {
            self.pos += 1;
            let (a, z) = self.rhs()?;
            self.expect_op(']')?;
            self.add_arc(a, None, z);
            return Ok((a, z));
        }
        let (a, z) = self.atom()?;
        if self.at_op('+') {
            self.pos += 1;
            self.add_arc(z, None, a);
            return Ok((a, z));
        }
        if self.at_op('*') {
            self.pos += 1;
            self.add_arc(z, None, a);
            return Ok((a, a));
        }
        Ok((a, z))
    }

    fn atom(&mut self) -> Result<(usize, usize), GrammarError> {
        let label = match self.current().clone() {
            MetaToken::Op('(') => {
                self.pos += 1;
                let inner = self.rhs()?;
                self.expect_op(')')?;
                return Ok(inner);
            }
            MetaToken::Name(text) | MetaToken::Str(text) => text,
            other => return Err(self.error(format!("expected an item, found {other:?}"))),
        };
        self.pos += 1;
        let a = self.new_state();
        let z = self.new_state();
        self.add_arc(a, Some(label), z);
        Ok((a, z))
    }
}
