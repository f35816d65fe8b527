//! Grammar nonterminals.
//!
//! Every rule of the bundled grammar has a [`Symbol`]. Symbol numbers start
//! at 256 so they never collide with token numbers in label tables.

use std::fmt;

macro_rules! symbols {
    ($($variant:ident => $name:literal),* $(,)?) => {
        /// A grammar nonterminal.
        #[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
        pub enum Symbol {
            $($variant,)*
        }

        impl Symbol {
            /// All symbols, in declaration order.
            pub const ALL: &'static [Symbol] = &[$(Symbol::$variant,)*];

            /// Rule name as written in grammar files.
            pub const fn name(self) -> &'static str {
                match self {
                    $(Symbol::$variant => $name,)*
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(Symbol::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

symbols! {
    FileInput => "file_input",
    Decorator => "decorator",
    Decorators => "decorators",
    Decorated => "decorated",
    Funcdef => "funcdef",
    Parameters => "parameters",
    Typedargslist => "typedargslist",
    Tfpdef => "tfpdef",
    Varargslist => "varargslist",
    Vfpdef => "vfpdef",
    Stmt => "stmt",
    SimpleStmt => "simple_stmt",
    SmallStmt => "small_stmt",
    ExprStmt => "expr_stmt",
    TestlistStarExpr => "testlist_star_expr",
    Augassign => "augassign",
    DelStmt => "del_stmt",
    PassStmt => "pass_stmt",
    FlowStmt => "flow_stmt",
    BreakStmt => "break_stmt",
    ContinueStmt => "continue_stmt",
    ReturnStmt => "return_stmt",
    YieldStmt => "yield_stmt",
    RaiseStmt => "raise_stmt",
    ImportStmt => "import_stmt",
    ImportName => "import_name",
    ImportFrom => "import_from",
    ImportAsName => "import_as_name",
    DottedAsName => "dotted_as_name",
    ImportAsNames => "import_as_names",
    DottedAsNames => "dotted_as_names",
    DottedName => "dotted_name",
    GlobalStmt => "global_stmt",
    NonlocalStmt => "nonlocal_stmt",
    AssertStmt => "assert_stmt",
    CompoundStmt => "compound_stmt",
    IfStmt => "if_stmt",
    WhileStmt => "while_stmt",
    ForStmt => "for_stmt",
    TryStmt => "try_stmt",
    WithStmt => "with_stmt",
    WithItem => "with_item",
    ExceptClause => "except_clause",
    Suite => "suite",
    Test => "test",
    TestNocond => "test_nocond",
    Lambdef => "lambdef",
    LambdefNocond => "lambdef_nocond",
    OrTest => "or_test",
    AndTest => "and_test",
    NotTest => "not_test",
    Comparison => "comparison",
    CompOp => "comp_op",
    StarExpr => "star_expr",
    Expr => "expr",
    XorExpr => "xor_expr",
    AndExpr => "and_expr",
    ShiftExpr => "shift_expr",
    ArithExpr => "arith_expr",
    Term => "term",
    Factor => "factor",
    Power => "power",
    Atom => "atom",
    TestlistComp => "testlist_comp",
    Trailer => "trailer",
    Subscriptlist => "subscriptlist",
    Subscript => "subscript",
    Sliceop => "sliceop",
    Exprlist => "exprlist",
    Testlist => "testlist",
    Dictorsetmaker => "dictorsetmaker",
    Classdef => "classdef",
    Arglist => "arglist",
    Argument => "argument",
    CompIter => "comp_iter",
    CompFor => "comp_for",
    CompIf => "comp_if",
    YieldExpr => "yield_expr",
    YieldArg => "yield_arg",
}

impl Symbol {
    /// First symbol number; everything below is a token number.
    pub const FIRST_NUMBER: u16 = 256;

    /// Dense index, for tables indexed by symbol.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Numeric identity, `256 + index`.
    #[inline]
    pub const fn number(self) -> u16 {
        Self::FIRST_NUMBER + self as u16
    }

    pub fn from_number(number: u16) -> Option<Self> {
        let index = number.checked_sub(Self::FIRST_NUMBER)?;
        Self::ALL.get(usize::from(index)).copied()
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
