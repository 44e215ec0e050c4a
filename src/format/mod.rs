//! The dbspicfg text format.
//!
//! The grammar, as exported by `dbspicfg -e` and accepted by `dbspicfg -i`:
//!
//! ```text
//! SYNTAX_VERSION <n>
//!
//! ORACLE
//!   HOME "<path>"
//!     DATABASE "<name>" CONNECT "<str>"
//!       LOGFILE "<path>"
//!       FILTER <metric> "<where clause>"
//!   LISTENER "<name>" CONNECT "<str>"
//! ```
//!
//! Tokens are separated by whitespace, blank lines and `#` comments, and are
//! either double-quoted strings or bare words. Indentation carries no meaning
//! when reading; it is reproduced on output for readability.

pub mod lexer;
mod parser;
mod serializer;


pub use lexer::{Lexer, Token, TokenKind, tokenize};
pub use parser::{ParseOutput, parse};
pub use serializer::{RenderOutput, serialize};
