/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! JavaScript frontend based on `tree-sitter-javascript`.
//!
//! The syntax tree is lowered into a [Program] by the [FromTreeSitter] implementations in [stmt] and [expr].
//! Valid syntax the AST has no representation for becomes an [UnknownNode](reloop_ast::UnknownNode),
//! syntax errors are collected and returned next to the partially parsed program.

use error::ParserError;
use reloop_ast::{expr::Expr, stmt::Stmt, Program};
use reloop_common::{FileString, ReloopError, Span};
use std::path::Path;
use tree_sitter::{Node, Parser};

pub use tree_sitter_javascript;

pub mod common;
pub mod error;
pub mod expr;
pub mod stmt;

///Context on the parser, like the current src file, and errors that occured, but are ignored.
pub struct ParserCtx {
    deep_errors: Vec<ReloopError<ParserError>>,
    src_file: FileString,
}

impl ParserCtx {
    pub fn new(file: FileString) -> ParserCtx {
        ParserCtx {
            deep_errors: Vec::new(),
            src_file: file,
        }
    }
    pub fn new_fileless() -> ParserCtx {
        ParserCtx {
            deep_errors: Vec::new(),
            src_file: FileString::default(),
        }
    }
    ///Creates a new span for `node` on this context.
    pub fn span(&self, node: &Node) -> Span {
        Span::from(node).with_file(&self.src_file)
    }
}

pub trait FromTreeSitter {
    fn parse(
        ctx: &mut ParserCtx,
        dta: &[u8],
        node: &tree_sitter::Node,
    ) -> Result<Self, ReloopError<ParserError>>
    where
        Self: Sized;
}

///All named children of `node`, without comments.
pub(crate) fn named_children<'t>(node: &Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|n| !n.is_extra())
        .collect()
}

///True if `node` has an anonymous child token `token`, for instance `async`.
pub(crate) fn has_token(node: &Node, token: &str) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|n| !n.is_named() && n.kind() == token);
    found
}

///Parses `file`. Returns the [Program] on success, or a partially parsed program, and the reported errors, if any
/// parsing errors happened.
pub fn parse_file(
    file: impl AsRef<Path>,
) -> Result<Program, (Program, Vec<ReloopError<ParserError>>)> {
    let dta = match std::fs::read(file.as_ref()) {
        Ok(dta) => dta,
        Err(e) => {
            let err = ReloopError::new(ParserError::FSError(e.to_string()));
            return Err((Program::empty(), vec![err]));
        }
    };
    let file_src_str = file.as_ref().to_str().unwrap_or("NonUnicodeFilename");
    parse_data(&dta, Some(file_src_str.into()))
}

///Parses `string`. Returns the [Program] on success, or a partially parsed program, and the reported errors, if any
/// parsing errors happened.
pub fn parse_string(string: &str) -> Result<Program, (Program, Vec<ReloopError<ParserError>>)> {
    parse_data(string.as_bytes(), None)
}

pub fn parse_from_bytes(bytes: &[u8]) -> Result<Program, (Program, Vec<ReloopError<ParserError>>)> {
    parse_data(bytes, None)
}

///Tries to parse an element `E` from the given string. `content` must contain exactly one statement,
/// which is handed to `E`. If you are unsure, use a helper like [parse_expr] or [parse_stmt] instead.
pub fn parse_element<E: FromTreeSitter>(content: &str) -> Result<E, ReloopError<ParserError>> {
    let mut parser = parser()?;
    let syn_tree = match parser.parse(content.as_bytes(), None) {
        None => {
            return Err(ReloopError::new(ParserError::TreeSitterFailed));
        }
        Some(syntree) => syntree,
    };
    let mut ctx = ParserCtx::new_fileless();
    let root = syn_tree.root_node();
    if root.has_error() {
        let mut errors = Vec::new();
        collect_syntax_errors(&ctx, &root, &mut errors);
        if let Some(first) = errors.into_iter().next() {
            return Err(first);
        }
    }

    let statements = named_children(&root);
    if statements.len() != 1 {
        return Err(ReloopError::new(ParserError::Other(format!(
            "Expected one statement, had {}\n{}",
            statements.len(),
            root.to_sexp()
        ))));
    }

    E::parse(&mut ctx, content.as_bytes(), &statements[0])
}

///Tries to parse `content` into a valid expression, for instance `a + b`.
pub fn parse_expr(content: &str) -> Result<Expr, ReloopError<ParserError>> {
    parse_element::<Expr>(content)
}

pub fn parse_stmt(content: &str) -> Result<Stmt, ReloopError<ParserError>> {
    parse_element::<Stmt>(content)
}

//load the javascript tree-sitter grammar / parser
fn parser() -> Result<Parser, ReloopError<ParserError>> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_javascript::LANGUAGE.into())
        .map_err(|e| ReloopError::new(ParserError::LanguageError(e.to_string())))?;
    Ok(parser)
}

pub struct TreeSitterParser;

impl reloop_ast::JsParser for TreeSitterParser {
    type Error = ParserError;
    fn parse_from_bytes(
        &self,
        src_file: Option<FileString>,
        bytes: &[u8],
    ) -> Result<Program, Vec<ReloopError<Self::Error>>> {
        parse_data(bytes, src_file).map_err(|(_rest_program, e)| e)
    }
}

///Pushes an error for each ERROR or MISSING node below `node`.
fn collect_syntax_errors(ctx: &ParserCtx, node: &Node, errors: &mut Vec<ReloopError<ParserError>>) {
    if node.is_missing() {
        errors.push(ReloopError::error_here(
            ParserError::MissingNode {
                kind: node.kind().to_owned(),
            },
            ctx.span(node),
            format!("expected \"{}\" here", node.kind()),
        ));
        return;
    }
    if node.is_error() {
        errors.push(ReloopError::error_here(
            ParserError::SyntaxError,
            ctx.span(node),
            "could not parse this",
        ));
        return;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() {
            collect_syntax_errors(ctx, &child, errors);
        }
    }
}

///Internal parser implementation
fn parse_data(
    data: &[u8],
    src_file: Option<FileString>,
) -> Result<Program, (Program, Vec<ReloopError<ParserError>>)> {
    let mut ctx = if let Some(src) = src_file {
        ParserCtx::new(src)
    } else {
        ParserCtx::new_fileless()
    };

    let mut program = Program::empty();

    let mut parser = match parser() {
        Ok(p) => p,
        Err(e) => return Err((program, vec![e])),
    };
    let syn_tree = match parser.parse(data, None) {
        None => {
            return Err((
                program,
                vec![ReloopError::new(ParserError::TreeSitterFailed)],
            ));
        }
        Some(syntree) => syntree,
    };

    let root = syn_tree.root_node();
    program.span = ctx.span(&root);

    //recursively parse all nodes
    for node in named_children(&root) {
        match Stmt::parse(&mut ctx, data, &node) {
            Ok(stmt) => program.body.push(stmt),
            Err(e) => ctx.deep_errors.push(e),
        }
    }

    if root.has_error() {
        let mut syntax_errors = Vec::new();
        collect_syntax_errors(&ctx, &root, &mut syntax_errors);
        ctx.deep_errors.append(&mut syntax_errors);
    }

    if !ctx.deep_errors.is_empty() {
        Err((program, ctx.deep_errors))
    } else {
        Ok(program)
    }
}

#[cfg(test)]
mod test {
    use reloop_ast::{
        expr::{Expr, LiteralValue},
        stmt::Stmt,
    };

    use crate::{parse_element, parse_expr, parse_string};

    #[test]
    fn parse_literal_number() {
        let e = parse_expr("1.5").unwrap();
        if let Expr::Literal(lit) = e {
            assert_eq!(lit.value, LiteralValue::Number(1.5));
        } else {
            panic!("expected literal, got {e:?}");
        }
    }

    #[test]
    fn parse_binary_expr() {
        let e = parse_element::<Expr>("1 + 1").unwrap();
        assert!(matches!(e, Expr::Binary(_)));
    }

    #[test]
    fn parse_stmt_expr() {
        let s = parse_element::<Stmt>("var a = 1 + 1;").unwrap();
        assert!(matches!(s, Stmt::VariableDeclaration(_)));
    }

    #[test]
    fn comments_are_skipped() {
        let program = parse_string("// head\nvar a; /* tail */").unwrap();
        assert_eq!(program.body.len(), 1);
    }

    #[test]
    fn syntax_error_keeps_partial_program() {
        let (partial, errors) = parse_string("var a = 1;\nvar = ;").unwrap_err();
        assert!(!errors.is_empty());
        assert!(!partial.body.is_empty());
    }
}
