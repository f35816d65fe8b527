//! Cursor-context resolution.
//!
//! Given a document snapshot and a cursor, this crate answers two
//! questions while the code around the cursor is still being typed:
//!
//! - **Completion**: which keywords and tokens may legally come next. The
//!   code from the start of the cursor's statement up to the cursor is
//!   re-parsed on its own ([`stack_at_position`]) and the parser's stack
//!   is walked through the grammar tables ([`possible_continuations`]).
//! - **Signature help**: whether the cursor is inside an open call, and
//!   in which argument ([`call_site`]). Resolved call targets are
//!   memoized per module in a [`SignatureCache`].
//!
//! [`ContextResolver`] ties both paths together.
//!
//! # Failure
//!
//! A cursor inside a string literal or unparseable text yields
//! [`ContextError::Unresolvable`]. Everything else produces an answer:
//! broken code before the cursor is recovered, and "no enclosing call" is
//! `Ok(None)`.

mod bounded;
mod cache;
mod config;
mod document;
mod driver;
mod error;
mod locator;
mod resolver;
mod signature;
mod target;
mod walker;
mod window;

pub use bounded::{BoundedTokens, Step};
pub use cache::{CacheKey, CallSignature, SignatureCache};
pub use config::ResolverConfig;
pub use document::{Document, ModuleId};
pub use driver::{parse_prefix, stack_at_position};
pub use error::{ContextError, UnresolvableReason};
pub use locator::{locate, statement_at};
pub use resolver::{Completion, ContextResolver};
pub use signature::{call_site, CallSignatureDetails, CallSite};
pub use target::{CallTarget, CallTargetResolver, SyntacticResolver};
pub use walker::{possible_continuations, Continuations};
pub use window::{completion_name, source_window};
