/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
use reloop_ast::expr::{
    AccessKind, BinaryOp, Expr, FunctionExpression, Literal, LiteralValue, MemberExpression,
};

use crate::{RenderError, Renderer};

///Expressions that bind looser than any operator position, so they need parentheses there.
fn is_loose(expr: &Expr) -> bool {
    matches!(
        expr,
        Expr::Assignment(_) | Expr::Conditional(_) | Expr::Sequence(_) | Expr::Function(_)
    )
}

///True if `expr` needs parentheses as a member object or callee. `! a()` would call `a`, `1.b` is
/// read as a number.
fn is_ambiguous_target(expr: &Expr) -> bool {
    match expr {
        Expr::Unary(_) | Expr::Update(_) => true,
        Expr::Literal(Literal {
            value: LiteralValue::Number(_),
            ..
        }) => true,
        other => is_loose(other),
    }
}

///`-a ** b` is a syntax error, so signed bases of `**` are wrapped.
fn is_signed(expr: &Expr) -> bool {
    match expr {
        Expr::Unary(_) => true,
        Expr::Literal(Literal {
            value: LiteralValue::Number(n),
            ..
        }) => n.is_sign_negative(),
        _ => false,
    }
}

///A `new` callee must not contain a call, otherwise the arguments would be attached to that call.
fn is_plain_new_callee(expr: &Expr) -> bool {
    match expr {
        Expr::Identifier(_) | Expr::This(_) => true,
        Expr::Member(m) => is_plain_new_callee(&m.object),
        _ => false,
    }
}

fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_owned()
    } else if value.is_infinite() {
        if value.is_sign_positive() {
            "Infinity".to_owned()
        } else {
            "-Infinity".to_owned()
        }
    } else {
        format!("{value}")
    }
}

impl Renderer {
    pub fn render_expr(&mut self, expr: &Expr) -> String {
        match expr {
            Expr::Assignment(a) => {
                let left = self.render_expr(&a.left);
                let right = self.render_listed(&a.right);
                format!("{left} {} {right}", a.op)
            }
            Expr::Binary(b) => {
                let left = if b.op == BinaryOp::Exp && is_signed(&b.left) {
                    self.render_wrapped(&b.left)
                } else {
                    self.render_operand(&b.left)
                };
                let right = self.render_operand(&b.right);
                format!("({left} {} {right})", b.op)
            }
            Expr::Unary(u) => {
                let argument = self.render_operand(&u.argument);
                format!("{} {argument}", u.op)
            }
            Expr::Update(u) => {
                let argument = self.render_operand(&u.argument);
                if u.prefix {
                    format!("{}{argument}", u.op)
                } else {
                    format!("{argument}{}", u.op)
                }
            }
            Expr::Sequence(s) => {
                let parts = s
                    .expressions
                    .iter()
                    .map(|e| self.render_expr(e))
                    .collect::<Vec<_>>();
                parts.join(", ")
            }
            Expr::Function(f) => self.render_function(f),
            Expr::Call(c) => {
                let callee = if is_ambiguous_target(&c.callee) {
                    self.render_wrapped(&c.callee)
                } else {
                    self.render_expr(&c.callee)
                };
                let args = self.render_list(c.arguments.iter());
                format!("{callee}({args})")
            }
            Expr::New(n) => {
                let callee = if is_plain_new_callee(&n.callee) {
                    self.render_expr(&n.callee)
                } else {
                    self.render_wrapped(&n.callee)
                };
                let args = self.render_list(n.arguments.iter());
                format!("new {callee}({args})")
            }
            Expr::Conditional(c) => {
                let test = self.render_operand(&c.test);
                let consequent = self.render_listed(&c.consequent);
                let alternate = self.render_listed(&c.alternate);
                format!("{test}?{consequent} : {alternate}")
            }
            Expr::Member(m) => self.render_member(m),
            Expr::Object(o) => {
                let properties = o
                    .properties
                    .iter()
                    .map(|p| {
                        let key = self.render_expr(&p.key);
                        let value = self.render_listed(&p.value);
                        format!("{key}: {value}")
                    })
                    .collect::<Vec<_>>();
                format!("{{{}}}", properties.join(", "))
            }
            Expr::Array(a) => {
                let elements = a
                    .elements
                    .iter()
                    .map(|e| match e {
                        Some(e) => self.render_listed(e),
                        None => String::new(),
                    })
                    .collect::<Vec<_>>();
                //a trailing hole needs its own comma, `[a, ]` has only one element
                let trailing = if matches!(a.elements.last(), Some(None)) {
                    ","
                } else {
                    ""
                };
                format!("[{}{trailing}]", elements.join(", "))
            }
            Expr::This(_) => "this".to_owned(),
            Expr::Identifier(i) => i.name.clone(),
            Expr::Literal(l) => self.render_literal(l),
            Expr::Unknown(unknown) => self.unrenderable(
                RenderError::UnknownNodeKind {
                    kind: unknown.kind.clone(),
                },
                &unknown.span,
            ),
        }
    }

    pub fn render_function(&mut self, func: &FunctionExpression) -> String {
        let name = func.id.as_ref().map(|i| i.name.as_str()).unwrap_or("");
        let params = self.render_list(func.params.iter());
        let body = self.render_block(&func.body);
        format!("function {name}({params}){body}")
    }

    fn render_member(&mut self, member: &MemberExpression) -> String {
        let object = if is_ambiguous_target(&member.object) {
            self.render_wrapped(&member.object)
        } else {
            self.render_expr(&member.object)
        };
        match &member.access {
            AccessKind::Dot => {
                let property = self.render_expr(&member.property);
                format!("{object}.{property}")
            }
            AccessKind::Bracket => {
                let property = self.render_expr(&member.property);
                format!("{object}[{property}]")
            }
            AccessKind::Other(kind) => self.unrenderable(
                RenderError::UnknownAccessKind { kind: kind.clone() },
                &member.span,
            ),
        }
    }

    pub fn render_literal(&mut self, literal: &Literal) -> String {
        match &literal.value {
            LiteralValue::String(raw) => format!("\"{raw}\""),
            LiteralValue::Number(n) => format_number(*n),
            LiteralValue::Boolean(b) => format!("{b}"),
            LiteralValue::RegExp(raw) => raw.clone(),
            LiteralValue::Null => "null".to_owned(),
            LiteralValue::Other { kind, .. } => self.unrenderable(
                RenderError::UnknownLiteralKind { kind: kind.clone() },
                &literal.span,
            ),
        }
    }

    fn render_wrapped(&mut self, expr: &Expr) -> String {
        format!("({})", self.render_expr(expr))
    }

    ///Renders `expr` in an operator position (operand, test).
    fn render_operand(&mut self, expr: &Expr) -> String {
        if is_loose(expr) {
            self.render_wrapped(expr)
        } else {
            self.render_expr(expr)
        }
    }

    ///Renders `expr` as an element of a comma separated list.
    pub(crate) fn render_listed(&mut self, expr: &Expr) -> String {
        if let Expr::Sequence(_) = expr {
            self.render_wrapped(expr)
        } else {
            self.render_expr(expr)
        }
    }

    pub(crate) fn render_list<'a>(&mut self, exprs: impl Iterator<Item = &'a Expr>) -> String {
        exprs
            .map(|e| self.render_listed(e))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use reloop_ast::expr::{
        AccessKind, BinaryExpression, BinaryOp, CallExpression, Expr, Literal, LiteralValue,
        MemberExpression, UnaryExpression, UnaryOp,
    };
    use reloop_common::Span;
    use smallvec::SmallVec;

    use crate::{render_expr, Renderer};

    fn member(object: Expr, property: Expr, access: AccessKind) -> Expr {
        Expr::Member(MemberExpression {
            span: Span::empty(),
            object: Box::new(object),
            property: Box::new(property),
            access,
        })
    }

    #[test]
    fn numbers() {
        assert_eq!(render_expr(&Expr::number(3.0)), "3");
        assert_eq!(render_expr(&Expr::number(0.25)), "0.25");
        assert_eq!(render_expr(&Expr::number(f64::INFINITY)), "Infinity");
        assert_eq!(render_expr(&Expr::number(f64::NAN)), "NaN");
    }

    #[test]
    fn number_member_object_is_wrapped() {
        let e = member(Expr::number(1.0), Expr::ident("toString"), AccessKind::Dot);
        assert_eq!(render_expr(&e), "(1).toString");
    }

    #[test]
    fn unary_callee_is_wrapped() {
        let e = Expr::Call(Box::new(CallExpression {
            span: Span::empty(),
            callee: Box::new(Expr::Unary(UnaryExpression {
                span: Span::empty(),
                op: UnaryOp::Not,
                argument: Box::new(Expr::ident("a")),
            })),
            arguments: SmallVec::new(),
        }));
        assert_eq!(render_expr(&e), "(! a)()");
    }

    #[test]
    fn negative_base_of_exponent_is_wrapped() {
        let e = Expr::Binary(BinaryExpression {
            span: Span::empty(),
            op: BinaryOp::Exp,
            left: Box::new(Expr::Unary(UnaryExpression {
                span: Span::empty(),
                op: UnaryOp::Neg,
                argument: Box::new(Expr::ident("a")),
            })),
            right: Box::new(Expr::number(2.0)),
        });
        assert_eq!(render_expr(&e), "((- a) ** 2)");
    }

    #[test]
    fn unknown_access_kind_is_reported() {
        let e = member(
            Expr::ident("a"),
            Expr::ident("b"),
            AccessKind::Other("Optional".to_owned()),
        );
        let mut renderer = Renderer::new();
        assert_eq!(renderer.render_expr(&e), "");
        assert_eq!(renderer.errors().len(), 1);
    }

    #[test]
    fn unknown_literal_kind_is_reported() {
        let e = Expr::Literal(Literal {
            span: Span::empty(),
            value: LiteralValue::Other {
                kind: "BigInt".to_owned(),
                raw: "1n".to_owned(),
            },
        });
        let mut renderer = Renderer::new();
        assert_eq!(renderer.render_expr(&e), "");
        assert_eq!(
            renderer.errors()[0].error.to_string(),
            "Unknown literal kind BigInt"
        );
    }
}
