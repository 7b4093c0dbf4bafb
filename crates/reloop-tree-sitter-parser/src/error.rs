/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
use std::str::Utf8Error;

use reloop_common::ReloopError;
use thiserror::Error;
use tree_sitter::Node;

use crate::ParserCtx;

#[derive(Debug, Error, Clone)]
pub enum ParserError {
    #[error("{0}")]
    Other(String),
    #[error("Could not run tree-sitter")]
    TreeSitterFailed,
    #[error("Failed to load the JavaScript grammar: {0}")]
    LanguageError(String),
    #[error("File Error occured: {0}")]
    FSError(String),
    #[error("Syntax error")]
    SyntaxError,
    #[error("Missing {kind}")]
    MissingNode { kind: String },
    #[error("Unexpected AstNode: {kind}, expected {expected}")]
    UnexpectedAstNode { kind: String, expected: String },
    #[error("Expected child \"{field}\" on {kind} but got none")]
    NoChildAvailable { kind: String, field: String },
    #[error("Unknown operator {op} in {kind}")]
    UnknownOperator { op: String, kind: String },
    ///Syntax that is valid JavaScript, but can not be represented at this position.
    /// Statement level parsers turn this into an unknown node.
    #[error("Unsupported syntax {kind}")]
    Unsupported { kind: String },

    #[error("UTF8 parser error: {0}")]
    Utf8ParseError(Utf8Error),
    #[error("Parsing number literal {literal} failed")]
    ParseNumberLiteral { literal: String },
}

impl ParserError {
    pub fn assert_node_kind(
        ctx: &mut ParserCtx,
        node: &Node,
        kind: &str,
    ) -> Result<(), ReloopError<Self>> {
        if node.kind() != kind {
            let error = Self::UnexpectedAstNode {
                kind: node.kind().to_owned(),
                expected: kind.to_owned(),
            };
            Err(ReloopError::error_here(
                error,
                ctx.span(node),
                format!("expected node of kind \"{kind}\""),
            ))
        } else {
            Ok(())
        }
    }

    ///Returns the child named `field` of `node`, or an error, if there is none.
    pub fn expect_field<'t>(
        ctx: &mut ParserCtx,
        node: &Node<'t>,
        field: &str,
    ) -> Result<Node<'t>, ReloopError<Self>> {
        node.child_by_field_name(field).ok_or_else(|| {
            ReloopError::error_here(
                Self::NoChildAvailable {
                    kind: node.kind().to_owned(),
                    field: field.to_owned(),
                },
                ctx.span(node),
                "in here",
            )
        })
    }

    pub fn unsupported(ctx: &mut ParserCtx, node: &Node) -> ReloopError<Self> {
        ReloopError::error_here(
            Self::Unsupported {
                kind: node.kind().to_owned(),
            },
            ctx.span(node),
            "can not be represented",
        )
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }
}
