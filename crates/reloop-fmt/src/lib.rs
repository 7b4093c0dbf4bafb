/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! # Reloop-Fmt
//!
//! Prints an AST back to JavaScript source.
//!
//! The output is not pretty, but it re-parses into the same tree. Binary expressions are always
//! parenthesized, other operands only where their position would change the meaning.
//!
//! Nodes that can't be printed (unknown kinds) are rendered as an empty string. Each of them is
//! logged and collected as a [RenderError], rendering continues with the siblings.

use std::fmt::Display;

use reloop_ast::{expr::Expr, stmt::Stmt, Program};
use reloop_common::{ReloopError, Span};

mod error;
mod expr;
mod stmt;

pub use error::RenderError;

///Source text of a program, and everything that could not be rendered.
#[derive(Debug)]
pub struct Rendered {
    pub text: String,
    pub errors: Vec<ReloopError<RenderError>>,
}

impl Rendered {
    ///True if every node was rendered.
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Display for Rendered {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

///Recursive printer. Collects diagnostics while rendering.
#[derive(Debug, Default)]
pub struct Renderer {
    errors: Vec<ReloopError<RenderError>>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render_program(&mut self, program: &Program) -> String {
        let mut text = String::new();
        for stmt in &program.body {
            text.push_str(&self.render_stmt(stmt));
        }
        text
    }

    ///All errors collected so far.
    pub fn errors(&self) -> &[ReloopError<RenderError>] {
        &self.errors
    }

    pub fn take_errors(&mut self) -> Vec<ReloopError<RenderError>> {
        std::mem::take(&mut self.errors)
    }

    ///Logs and records `error` for the node at `span`. Returns the replacement text for that node.
    fn unrenderable(&mut self, error: RenderError, span: &Span) -> String {
        log::error!("{error}, rendering as empty string");
        let err = if span.is_empty() {
            ReloopError::new(error)
        } else {
            ReloopError::error_here(error, span.clone(), "can not be rendered")
        };
        self.errors.push(err);
        String::new()
    }
}

///Renders `program`, returning the text and all diagnostics.
pub fn render(program: &Program) -> Rendered {
    let mut renderer = Renderer::new();
    let text = renderer.render_program(program);
    Rendered {
        text,
        errors: renderer.take_errors(),
    }
}

///Renders a single statement. Diagnostics are only logged.
pub fn render_stmt(stmt: &Stmt) -> String {
    Renderer::new().render_stmt(stmt)
}

///Renders a single expression. Diagnostics are only logged.
pub fn render_expr(expr: &Expr) -> String {
    Renderer::new().render_expr(expr)
}
