/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Statement related parser portion.

use reloop_ast::{
    expr::{Expr, Identifier},
    stmt::{
        BlockStatement, DeclKind, ExpressionStatement, ForInit, ForStatement,
        FunctionDeclaration, IfStatement, ReturnStatement, Stmt, ThrowStatement,
        VariableDeclaration, VariableDeclarator, WhileStatement,
    },
    UnknownNode,
};
use reloop_common::ReloopError;
use smallvec::SmallVec;
use tree_sitter::Node;

use crate::{
    common::node_text, error::ParserError, expr::parse_params, has_token, named_children,
    FromTreeSitter, ParserCtx,
};

impl FromTreeSitter for Stmt {
    ///Parses any statement node. Statements the AST can not represent are returned as [Stmt::Unknown].
    fn parse(ctx: &mut ParserCtx, dta: &[u8], node: &Node) -> Result<Self, ReloopError<ParserError>>
    where
        Self: Sized,
    {
        match parse_stmt_node(ctx, dta, node) {
            Err(e) if e.error.is_unsupported() => {
                log::warn!(
                    "lowering unsupported statement {} to unknown node: {e:?}",
                    node.kind()
                );
                Ok(Stmt::Unknown(UnknownNode {
                    span: ctx.span(node),
                    kind: node.kind().to_owned(),
                }))
            }
            other => other,
        }
    }
}

fn parse_stmt_node(
    ctx: &mut ParserCtx,
    dta: &[u8],
    node: &Node,
) -> Result<Stmt, ReloopError<ParserError>> {
    let span = ctx.span(node);
    let stmt = match node.kind() {
        "expression_statement" => Stmt::Expression(ExpressionStatement {
            span,
            expression: Expr::parse(ctx, dta, node)?,
        }),
        "variable_declaration" | "lexical_declaration" => {
            Stmt::VariableDeclaration(VariableDeclaration::parse(ctx, dta, node)?)
        }
        "function_declaration" => {
            Stmt::FunctionDeclaration(FunctionDeclaration::parse(ctx, dta, node)?)
        }
        "statement_block" => Stmt::Block(BlockStatement::parse(ctx, dta, node)?),
        "return_statement" => {
            let argument = match named_children(node).into_iter().next() {
                Some(arg) => Some(Expr::parse(ctx, dta, &arg)?),
                None => None,
            };
            Stmt::Return(ReturnStatement { span, argument })
        }
        "throw_statement" => {
            let arg = named_children(node).into_iter().next().ok_or_else(|| {
                ReloopError::error_here(
                    ParserError::NoChildAvailable {
                        kind: node.kind().to_owned(),
                        field: "argument".to_owned(),
                    },
                    span.clone(),
                    "throw without argument",
                )
            })?;
            Stmt::Throw(ThrowStatement {
                span,
                argument: Expr::parse(ctx, dta, &arg)?,
            })
        }
        "empty_statement" => Stmt::Empty(span),
        "break_statement" | "continue_statement" => {
            //labeled jumps have no representation
            if node.child_by_field_name("label").is_some() {
                return Err(ParserError::unsupported(ctx, node));
            }
            if node.kind() == "break_statement" {
                Stmt::Break(span)
            } else {
                Stmt::Continue(span)
            }
        }
        "for_statement" => Stmt::For(ForStatement::parse(ctx, dta, node)?),
        "while_statement" => {
            let test_node = ParserError::expect_field(ctx, node, "condition")?;
            let body_node = ParserError::expect_field(ctx, node, "body")?;
            Stmt::While(WhileStatement {
                span,
                test: Expr::parse(ctx, dta, &test_node)?,
                body: Box::new(Stmt::parse(ctx, dta, &body_node)?),
            })
        }
        "if_statement" => {
            let test_node = ParserError::expect_field(ctx, node, "condition")?;
            let cons_node = ParserError::expect_field(ctx, node, "consequence")?;
            let alternate = match node.child_by_field_name("alternative") {
                Some(else_clause) => {
                    let alt = named_children(&else_clause)
                        .into_iter()
                        .next()
                        .ok_or_else(|| ParserError::unsupported(ctx, &else_clause))?;
                    Some(Box::new(Stmt::parse(ctx, dta, &alt)?))
                }
                None => None,
            };
            Stmt::If(IfStatement {
                span,
                test: Expr::parse(ctx, dta, &test_node)?,
                consequent: Box::new(Stmt::parse(ctx, dta, &cons_node)?),
                alternate,
            })
        }
        _ => return Err(ParserError::unsupported(ctx, node)),
    };

    Ok(stmt)
}

impl FromTreeSitter for BlockStatement {
    fn parse(ctx: &mut ParserCtx, dta: &[u8], node: &Node) -> Result<Self, ReloopError<ParserError>>
    where
        Self: Sized,
    {
        ParserError::assert_node_kind(ctx, node, "statement_block")?;
        let mut body = Vec::new();
        for child in named_children(node) {
            body.push(Stmt::parse(ctx, dta, &child)?);
        }
        Ok(BlockStatement {
            span: ctx.span(node),
            body,
        })
    }
}

impl FromTreeSitter for VariableDeclaration {
    ///Parses `var`, `let` and `const` declarations.
    fn parse(ctx: &mut ParserCtx, dta: &[u8], node: &Node) -> Result<Self, ReloopError<ParserError>>
    where
        Self: Sized,
    {
        let kind = match node.kind() {
            "variable_declaration" => DeclKind::Var,
            "lexical_declaration" => {
                let kind_node = ParserError::expect_field(ctx, node, "kind")?;
                match node_text(ctx, dta, &kind_node)? {
                    "let" => DeclKind::Let,
                    "const" => DeclKind::Const,
                    _ => return Err(ParserError::unsupported(ctx, &kind_node)),
                }
            }
            other => {
                return Err(ReloopError::error_here(
                    ParserError::UnexpectedAstNode {
                        kind: other.to_owned(),
                        expected: "variable_declaration".to_owned(),
                    },
                    ctx.span(node),
                    "expected a declaration",
                ))
            }
        };

        let mut declarations = SmallVec::new();
        for declarator in named_children(node) {
            declarations.push(VariableDeclarator::parse(ctx, dta, &declarator)?);
        }

        Ok(VariableDeclaration {
            span: ctx.span(node),
            kind,
            declarations,
        })
    }
}

impl FromTreeSitter for VariableDeclarator {
    fn parse(ctx: &mut ParserCtx, dta: &[u8], node: &Node) -> Result<Self, ReloopError<ParserError>>
    where
        Self: Sized,
    {
        ParserError::assert_node_kind(ctx, node, "variable_declarator")?;
        let name_node = ParserError::expect_field(ctx, node, "name")?;
        //destructuring patterns are not representable
        if name_node.kind() != "identifier" {
            return Err(ParserError::unsupported(ctx, &name_node));
        }
        let id = Identifier::parse(ctx, dta, &name_node)?;
        let init = match node.child_by_field_name("value") {
            Some(value) => Some(Expr::parse(ctx, dta, &value)?),
            None => None,
        };
        Ok(VariableDeclarator {
            span: ctx.span(node),
            id,
            init,
        })
    }
}

impl FromTreeSitter for FunctionDeclaration {
    fn parse(ctx: &mut ParserCtx, dta: &[u8], node: &Node) -> Result<Self, ReloopError<ParserError>>
    where
        Self: Sized,
    {
        ParserError::assert_node_kind(ctx, node, "function_declaration")?;
        if has_token(node, "async") {
            return Err(ParserError::unsupported(ctx, node));
        }
        let name_node = ParserError::expect_field(ctx, node, "name")?;
        let params_node = ParserError::expect_field(ctx, node, "parameters")?;
        let body_node = ParserError::expect_field(ctx, node, "body")?;
        Ok(FunctionDeclaration {
            span: ctx.span(node),
            id: Identifier::parse(ctx, dta, &name_node)?,
            params: parse_params(ctx, dta, &params_node)?,
            body: BlockStatement::parse(ctx, dta, &body_node)?,
        })
    }
}

///Parses a clause of a for-header. Depending on the grammar version a clause is an
/// empty statement, an expression statement, or the bare expression followed by `;`.
fn for_clause(
    ctx: &mut ParserCtx,
    dta: &[u8],
    clause: Option<Node>,
) -> Result<Option<Expr>, ReloopError<ParserError>> {
    match clause {
        None => Ok(None),
        Some(n) if n.kind() == "empty_statement" || n.kind() == ";" => Ok(None),
        Some(n) => Ok(Some(Expr::parse(ctx, dta, &n)?)),
    }
}

impl FromTreeSitter for ForStatement {
    fn parse(ctx: &mut ParserCtx, dta: &[u8], node: &Node) -> Result<Self, ReloopError<ParserError>>
    where
        Self: Sized,
    {
        ParserError::assert_node_kind(ctx, node, "for_statement")?;

        let init = match node.child_by_field_name("initializer") {
            Some(decl)
                if decl.kind() == "variable_declaration" || decl.kind() == "lexical_declaration" =>
            {
                Some(ForInit::Declaration(VariableDeclaration::parse(
                    ctx, dta, &decl,
                )?))
            }
            other => for_clause(ctx, dta, other)?.map(ForInit::Expression),
        };
        let test = for_clause(ctx, dta, node.child_by_field_name("condition"))?;
        let update = match node.child_by_field_name("increment") {
            Some(inc) => Some(Expr::parse(ctx, dta, &inc)?),
            None => None,
        };
        let body_node = ParserError::expect_field(ctx, node, "body")?;

        Ok(ForStatement {
            span: ctx.span(node),
            init,
            test,
            update,
            body: Box::new(Stmt::parse(ctx, dta, &body_node)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use reloop_ast::stmt::{DeclKind, ForInit, Stmt};

    use crate::{parse_stmt, parse_string};

    #[test]
    fn lexical_declarations() {
        let Stmt::VariableDeclaration(decl) = parse_stmt("const a = 1, b;").unwrap() else {
            panic!("expected declaration");
        };
        assert_eq!(decl.kind, DeclKind::Const);
        assert_eq!(decl.declarations.len(), 2);
        assert!(decl.declarations[1].init.is_none());
    }

    #[test]
    fn for_header_clauses() {
        let Stmt::For(f) = parse_stmt("for (var i = 0; i < n; i++) {}").unwrap() else {
            panic!("expected for");
        };
        assert!(matches!(f.init, Some(ForInit::Declaration(_))));
        assert!(f.test.is_some());
        assert!(f.update.is_some());

        let Stmt::For(empty) = parse_stmt("for (;;) {}").unwrap() else {
            panic!("expected for");
        };
        assert!(empty.init.is_none());
        assert!(empty.test.is_none());
        assert!(empty.update.is_none());

        let Stmt::For(expr_init) = parse_stmt("for (i = 0; i < n;) x();").unwrap() else {
            panic!("expected for");
        };
        assert!(matches!(expr_init.init, Some(ForInit::Expression(_))));
        assert!(expr_init.update.is_none());
    }

    #[test]
    fn if_else_chain() {
        let Stmt::If(i) = parse_stmt("if (a) b(); else if (c) d(); else e();").unwrap() else {
            panic!("expected if");
        };
        assert!(matches!(i.alternate.as_deref(), Some(Stmt::If(_))));
    }

    #[test]
    fn unsupported_statements_become_unknown() {
        let program =
            parse_string("class A {}\nvar {a} = b;\nouter: for (;;) { break outer; }\nx();")
                .unwrap();
        assert_eq!(program.body.len(), 4);
        assert_eq!(program.body[0].kind(), "class_declaration");
        assert_eq!(program.body[1].kind(), "variable_declaration");
        assert_eq!(program.body[2].kind(), "labeled_statement");
        assert_eq!(program.body[3].kind(), "ExpressionStatement");
    }
}
