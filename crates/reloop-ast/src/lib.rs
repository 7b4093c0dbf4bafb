/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! # Reloop-AST
//!
//! The *A*bstract *S*yntax *T*ree of the JavaScript subset reloop understands.
//!
//! The node kinds follow the ESTree naming, so a [Program] reads like the output of
//! `Reflect.parse`. Statements live in [stmt], expressions in [expr]. Any syntax a parser
//! accepts but this AST can not express is kept as an [UnknownNode], that way a program
//! can always be represented, even if parts of it can't be printed again.
//!
//! The AST itself does not know how to parse source code. That's the job of a [JsParser]
//! implementation, for instance the one in `reloop-tree-sitter-parser`.
//!
//! Use [util::AstVisitor] to inspect, and [util::AstTransformer] to rewrite a tree in place.

use std::error::Error;

use reloop_common::{FileString, ReloopError, Span};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod error;
pub mod expr;
pub mod stmt;
pub mod util;

pub use error::AstError;
use stmt::Stmt;

///A construct that was parsed, but has no AST representation. `kind` is the
/// parser's name for it, for instance `arrow_function`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct UnknownNode {
    pub span: Span,
    pub kind: String,
}

///Root of a parsed source file.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Program {
    pub span: Span,
    pub body: Vec<Stmt>,
}

///Anything that can turn source code into a [Program].
pub trait JsParser {
    type Error: Error;
    ///Parses `bytes`. `src_file` is attached to all spans, if given.
    fn parse_from_bytes(
        &self,
        src_file: Option<FileString>,
        bytes: &[u8],
    ) -> Result<Program, Vec<ReloopError<Self::Error>>>;
}

impl Program {
    pub fn empty() -> Self {
        Program::default()
    }

    ///Parses `source` with `parser`, without any file association.
    pub fn new_from_str<P: JsParser>(
        source: &str,
        parser: &P,
    ) -> Result<Self, Vec<ReloopError<AstError>>> {
        parser
            .parse_from_bytes(None, source.as_bytes())
            .map_err(|errs| errs.into_iter().map(AstError::from_parser_error).collect())
    }
}
