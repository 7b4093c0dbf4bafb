/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Expression related parser portion.

use reloop_ast::{
    expr::{
        AccessKind, ArrayExpression, AssignOp, AssignmentExpression, BinaryExpression, BinaryOp,
        CallExpression, ConditionalExpression, Expr, FunctionExpression, Identifier, Literal,
        MemberExpression, NewExpression, ObjectExpression, Property, SequenceExpression,
        UnaryExpression, UnaryOp, UpdateExpression, UpdateOp,
    },
    stmt::BlockStatement,
    UnknownNode,
};
use reloop_common::ReloopError;
use smallvec::SmallVec;
use tree_sitter::Node;

use crate::{
    common::node_text, error::ParserError, has_token, named_children, FromTreeSitter, ParserCtx,
};

impl FromTreeSitter for Expr {
    ///Parses any expression node. Syntax the AST can not represent is returned as [Expr::Unknown].
    ///
    /// An `expression_statement` is accepted as well, in which case its expression is parsed.
    fn parse(ctx: &mut ParserCtx, dta: &[u8], node: &Node) -> Result<Self, ReloopError<ParserError>>
    where
        Self: Sized,
    {
        match parse_expr_node(ctx, dta, node) {
            Err(e) if e.error.is_unsupported() => {
                log::warn!(
                    "lowering unsupported expression {} to unknown node: {e:?}",
                    node.kind()
                );
                Ok(Expr::Unknown(UnknownNode {
                    span: ctx.span(node),
                    kind: node.kind().to_owned(),
                }))
            }
            other => other,
        }
    }
}

fn binary_operator(
    ctx: &mut ParserCtx,
    dta: &[u8],
    node: &Node,
) -> Result<String, ReloopError<ParserError>> {
    let op_node = ParserError::expect_field(ctx, node, "operator")?;
    Ok(node_text(ctx, dta, &op_node)?.to_owned())
}

fn unknown_operator(ctx: &mut ParserCtx, node: &Node, op: &str) -> ReloopError<ParserError> {
    ReloopError::error_here(
        ParserError::UnknownOperator {
            op: op.to_owned(),
            kind: node.kind().to_owned(),
        },
        ctx.span(node),
        "this operator",
    )
}

///Optional chains (`a?.b`) have no representation.
fn reject_optional_chain(ctx: &mut ParserCtx, node: &Node) -> Result<(), ReloopError<ParserError>> {
    if node.child_by_field_name("optional_chain").is_some() {
        Err(ParserError::unsupported(ctx, node))
    } else {
        Ok(())
    }
}

fn parse_field(
    ctx: &mut ParserCtx,
    dta: &[u8],
    node: &Node,
    field: &str,
) -> Result<Box<Expr>, ReloopError<ParserError>> {
    let child = ParserError::expect_field(ctx, node, field)?;
    Ok(Box::new(Expr::parse(ctx, dta, &child)?))
}

///Parses a call's or `new`'s argument list.
fn parse_arguments(
    ctx: &mut ParserCtx,
    dta: &[u8],
    node: &Node,
) -> Result<SmallVec<[Expr; 3]>, ReloopError<ParserError>> {
    ParserError::assert_node_kind(ctx, node, "arguments")?;
    let mut args = SmallVec::new();
    for arg in named_children(node) {
        args.push(Expr::parse(ctx, dta, &arg)?);
    }
    Ok(args)
}

fn parse_expr_node(
    ctx: &mut ParserCtx,
    dta: &[u8],
    node: &Node,
) -> Result<Expr, ReloopError<ParserError>> {
    let span = ctx.span(node);
    let expr = match node.kind() {
        "parenthesized_expression" | "expression_statement" => {
            let inner = named_children(node).into_iter().next().ok_or_else(|| {
                ReloopError::error_here(
                    ParserError::NoChildAvailable {
                        kind: node.kind().to_owned(),
                        field: "expression".to_owned(),
                    },
                    span.clone(),
                    "expected an expression in here",
                )
            })?;
            return Expr::parse(ctx, dta, &inner);
        }
        "identifier" | "undefined" => Expr::Identifier(Identifier::parse(ctx, dta, node)?),
        "this" => Expr::This(span),
        "number" | "string" | "regex" | "true" | "false" | "null" => {
            Expr::Literal(Literal::parse(ctx, dta, node)?)
        }
        "assignment_expression" => Expr::Assignment(AssignmentExpression {
            span,
            op: AssignOp::Assign,
            left: parse_field(ctx, dta, node, "left")?,
            right: parse_field(ctx, dta, node, "right")?,
        }),
        "augmented_assignment_expression" => {
            let op_text = binary_operator(ctx, dta, node)?;
            let op = AssignOp::from_token(&op_text)
                .ok_or_else(|| unknown_operator(ctx, node, &op_text))?;
            Expr::Assignment(AssignmentExpression {
                span,
                op,
                left: parse_field(ctx, dta, node, "left")?,
                right: parse_field(ctx, dta, node, "right")?,
            })
        }
        "binary_expression" => {
            let op_text = binary_operator(ctx, dta, node)?;
            let op = BinaryOp::from_token(&op_text)
                .ok_or_else(|| unknown_operator(ctx, node, &op_text))?;
            Expr::Binary(BinaryExpression {
                span,
                op,
                left: parse_field(ctx, dta, node, "left")?,
                right: parse_field(ctx, dta, node, "right")?,
            })
        }
        "unary_expression" => {
            let op_text = binary_operator(ctx, dta, node)?;
            let op = UnaryOp::from_token(&op_text)
                .ok_or_else(|| unknown_operator(ctx, node, &op_text))?;
            Expr::Unary(UnaryExpression {
                span,
                op,
                argument: parse_field(ctx, dta, node, "argument")?,
            })
        }
        "update_expression" => {
            let op_node = ParserError::expect_field(ctx, node, "operator")?;
            let arg_node = ParserError::expect_field(ctx, node, "argument")?;
            let op_text = node_text(ctx, dta, &op_node)?;
            let op = UpdateOp::from_token(op_text)
                .ok_or_else(|| unknown_operator(ctx, node, op_text))?;
            Expr::Update(UpdateExpression {
                span,
                op,
                prefix: op_node.start_byte() < arg_node.start_byte(),
                argument: Box::new(Expr::parse(ctx, dta, &arg_node)?),
            })
        }
        "sequence_expression" => {
            let mut expressions = Vec::new();
            flatten_sequence(ctx, dta, node, &mut expressions)?;
            Expr::Sequence(SequenceExpression { span, expressions })
        }
        "ternary_expression" => Expr::Conditional(ConditionalExpression {
            span,
            test: parse_field(ctx, dta, node, "condition")?,
            consequent: parse_field(ctx, dta, node, "consequence")?,
            alternate: parse_field(ctx, dta, node, "alternative")?,
        }),
        "function_expression" | "function" => {
            Expr::Function(Box::new(FunctionExpression::parse(ctx, dta, node)?))
        }
        "call_expression" => {
            reject_optional_chain(ctx, node)?;
            let args_node = ParserError::expect_field(ctx, node, "arguments")?;
            //tagged templates
            if args_node.kind() == "template_string" {
                return Err(ParserError::unsupported(ctx, node));
            }
            let callee = parse_field(ctx, dta, node, "function")?;
            Expr::Call(Box::new(CallExpression {
                span,
                callee,
                arguments: parse_arguments(ctx, dta, &args_node)?,
            }))
        }
        "new_expression" => {
            let callee = parse_field(ctx, dta, node, "constructor")?;
            let arguments = match node.child_by_field_name("arguments") {
                Some(args) => parse_arguments(ctx, dta, &args)?,
                None => SmallVec::new(),
            };
            Expr::New(Box::new(NewExpression {
                span,
                callee,
                arguments,
            }))
        }
        "member_expression" => {
            reject_optional_chain(ctx, node)?;
            let prop_node = ParserError::expect_field(ctx, node, "property")?;
            let property = Expr::Identifier(Identifier::parse(ctx, dta, &prop_node)?);
            Expr::Member(MemberExpression {
                span,
                object: parse_field(ctx, dta, node, "object")?,
                property: Box::new(property),
                access: AccessKind::Dot,
            })
        }
        "subscript_expression" => {
            reject_optional_chain(ctx, node)?;
            Expr::Member(MemberExpression {
                span,
                object: parse_field(ctx, dta, node, "object")?,
                property: parse_field(ctx, dta, node, "index")?,
                access: AccessKind::Bracket,
            })
        }
        "object" => Expr::Object(ObjectExpression::parse(ctx, dta, node)?),
        "array" => Expr::Array(ArrayExpression::parse(ctx, dta, node)?),
        _ => return Err(ParserError::unsupported(ctx, node)),
    };

    Ok(expr)
}

///Collects the operands of (possibly nested) sequence expressions in source order.
fn flatten_sequence(
    ctx: &mut ParserCtx,
    dta: &[u8],
    node: &Node,
    expressions: &mut Vec<Expr>,
) -> Result<(), ReloopError<ParserError>> {
    for child in named_children(node) {
        if child.kind() == "sequence_expression" {
            flatten_sequence(ctx, dta, &child, expressions)?;
        } else {
            expressions.push(Expr::parse(ctx, dta, &child)?);
        }
    }
    Ok(())
}

///Parses a `formal_parameters` list. Anything but a plain identifier becomes an unknown node.
pub fn parse_params(
    ctx: &mut ParserCtx,
    dta: &[u8],
    node: &Node,
) -> Result<SmallVec<[Expr; 3]>, ReloopError<ParserError>> {
    ParserError::assert_node_kind(ctx, node, "formal_parameters")?;
    let mut params = SmallVec::new();
    for param in named_children(node) {
        let param = match param.kind() {
            "identifier" => Expr::Identifier(Identifier::parse(ctx, dta, &param)?),
            _ => {
                log::warn!("lowering parameter {} to unknown node", param.kind());
                Expr::Unknown(UnknownNode {
                    span: ctx.span(&param),
                    kind: param.kind().to_owned(),
                })
            }
        };
        params.push(param);
    }
    Ok(params)
}

impl FromTreeSitter for FunctionExpression {
    fn parse(ctx: &mut ParserCtx, dta: &[u8], node: &Node) -> Result<Self, ReloopError<ParserError>>
    where
        Self: Sized,
    {
        if has_token(node, "async") {
            return Err(ParserError::unsupported(ctx, node));
        }
        let id = match node.child_by_field_name("name") {
            Some(name) => Some(Identifier::parse(ctx, dta, &name)?),
            None => None,
        };
        let params_node = ParserError::expect_field(ctx, node, "parameters")?;
        let params = parse_params(ctx, dta, &params_node)?;
        let body_node = ParserError::expect_field(ctx, node, "body")?;
        let body = BlockStatement::parse(ctx, dta, &body_node)?;

        Ok(FunctionExpression {
            span: ctx.span(node),
            id,
            params,
            body,
        })
    }
}

impl FromTreeSitter for ObjectExpression {
    ///Parses an object literal. Computed keys, methods, getters and spreads are not
    /// representable, and turn the whole object into an unknown node.
    fn parse(ctx: &mut ParserCtx, dta: &[u8], node: &Node) -> Result<Self, ReloopError<ParserError>>
    where
        Self: Sized,
    {
        ParserError::assert_node_kind(ctx, node, "object")?;
        let mut properties = Vec::new();
        for prop in named_children(node) {
            match prop.kind() {
                "pair" => {
                    let key_node = ParserError::expect_field(ctx, &prop, "key")?;
                    let key = match key_node.kind() {
                        "property_identifier" => {
                            Expr::Identifier(Identifier::parse(ctx, dta, &key_node)?)
                        }
                        "string" | "number" => Expr::Literal(Literal::parse(ctx, dta, &key_node)?),
                        _ => return Err(ParserError::unsupported(ctx, &key_node)),
                    };
                    let value_node = ParserError::expect_field(ctx, &prop, "value")?;
                    properties.push(Property {
                        span: ctx.span(&prop),
                        key,
                        value: Expr::parse(ctx, dta, &value_node)?,
                    });
                }
                "shorthand_property_identifier" => {
                    let ident = Identifier::parse(ctx, dta, &prop)?;
                    properties.push(Property {
                        span: ctx.span(&prop),
                        key: Expr::Identifier(ident.clone()),
                        value: Expr::Identifier(ident),
                    });
                }
                _ => return Err(ParserError::unsupported(ctx, &prop)),
            }
        }

        Ok(ObjectExpression {
            span: ctx.span(node),
            properties,
        })
    }
}

impl FromTreeSitter for ArrayExpression {
    fn parse(ctx: &mut ParserCtx, dta: &[u8], node: &Node) -> Result<Self, ReloopError<ParserError>>
    where
        Self: Sized,
    {
        ParserError::assert_node_kind(ctx, node, "array")?;

        //Holes are only visible through the comma tokens, so walk all children.
        let mut children = Vec::new();
        {
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                if !child.is_extra() {
                    children.push(child);
                }
            }
        }

        let mut elements = Vec::new();
        let mut current = None;
        for child in children {
            if child.is_named() {
                current = Some(Expr::parse(ctx, dta, &child)?);
                continue;
            }
            match child.kind() {
                "," => elements.push(current.take()),
                "]" => {
                    if let Some(last) = current.take() {
                        elements.push(Some(last));
                    }
                }
                _ => {}
            }
        }

        Ok(ArrayExpression {
            span: ctx.span(node),
            elements,
        })
    }
}

#[cfg(test)]
mod tests {
    use reloop_ast::expr::{AccessKind, BinaryOp, Expr, UpdateOp};

    use crate::parse_expr;

    #[test]
    fn update_prefix_and_postfix() {
        let Expr::Update(pre) = parse_expr("++i").unwrap() else {
            panic!("expected update");
        };
        assert!(pre.prefix);
        assert_eq!(pre.op, UpdateOp::Increment);

        let Expr::Update(post) = parse_expr("i--").unwrap() else {
            panic!("expected update");
        };
        assert!(!post.prefix);
        assert_eq!(post.op, UpdateOp::Decrement);
    }

    #[test]
    fn parens_are_dropped() {
        let Expr::Binary(bin) = parse_expr("(a + b) * c").unwrap() else {
            panic!("expected binary");
        };
        assert_eq!(bin.op, BinaryOp::Mul);
        assert!(matches!(*bin.left, Expr::Binary(_)));
    }

    #[test]
    fn member_access_kinds() {
        let Expr::Member(dot) = parse_expr("a.b").unwrap() else {
            panic!("expected member");
        };
        assert_eq!(dot.access, AccessKind::Dot);
        assert_eq!(dot.property.as_identifier().unwrap().name, "b");

        let Expr::Member(bracket) = parse_expr("a[0]").unwrap() else {
            panic!("expected member");
        };
        assert_eq!(bracket.access, AccessKind::Bracket);
    }

    #[test]
    fn sequence_is_flat() {
        let Expr::Sequence(seq) = parse_expr("a, b, c").unwrap() else {
            panic!("expected sequence");
        };
        assert_eq!(seq.expressions.len(), 3);
    }

    #[test]
    fn array_holes() {
        let Expr::Array(arr) = parse_expr("[a, , b]").unwrap() else {
            panic!("expected array");
        };
        assert_eq!(arr.elements.len(), 3);
        assert!(arr.elements[1].is_none());

        let Expr::Array(trailing) = parse_expr("[a, b,]").unwrap() else {
            panic!("expected array");
        };
        assert_eq!(trailing.elements.len(), 2);
    }

    #[test]
    fn arrow_function_is_unknown() {
        let e = parse_expr("(x) => x").unwrap();
        assert_eq!(e.kind(), "arrow_function");
    }

    #[test]
    fn computed_key_makes_object_unknown() {
        let e = parse_expr("({[k]: 1})").unwrap();
        assert_eq!(e.kind(), "object");
    }
}
