/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Detection of `array.forEach(function(x){...})` and the indexed loop that replaces it.

use reloop_ast::{
    expr::{
        AccessKind, BinaryExpression, BinaryOp, CallExpression, Expr, Identifier, Literal,
        LiteralValue, MemberExpression, UnaryExpression, UnaryOp, UpdateExpression, UpdateOp,
    },
    stmt::{
        BlockStatement, DeclKind, ForInit, ForStatement, Stmt, VariableDeclaration,
        VariableDeclarator,
    },
};
use reloop_common::Span;
use smallvec::smallvec;

///True if the callee is `<receiver>.forEach` or `<receiver>["forEach"]`.
fn callee_is_for_each(callee: &Expr) -> bool {
    let Expr::Member(member) = callee else {
        return false;
    };
    match (&member.access, member.property.as_ref()) {
        (AccessKind::Dot, Expr::Identifier(i)) => i.name == "forEach",
        (
            AccessKind::Bracket,
            Expr::Literal(Literal {
                value: LiteralValue::String(s),
                ..
            }),
        ) => s == "forEach",
        _ => false,
    }
}

///True if a `return` in `stmts` would leave the callback. Nested functions have their own returns.
fn returns_from_callback(stmts: &[Stmt]) -> bool {
    stmts.iter().any(|stmt| match stmt {
        Stmt::Return(_) => true,
        Stmt::Block(block) => returns_from_callback(&block.body),
        Stmt::For(f) => returns_from_callback(std::slice::from_ref(f.body.as_ref())),
        Stmt::While(w) => returns_from_callback(std::slice::from_ref(w.body.as_ref())),
        Stmt::If(i) => {
            returns_from_callback(std::slice::from_ref(i.consequent.as_ref()))
                || i.alternate
                    .as_deref()
                    .is_some_and(|alt| returns_from_callback(std::slice::from_ref(alt)))
        }
        _ => false,
    })
}

///Checks whether `call` is `receiver.forEach(function(elem, index, array){...})`, optionally with `this`
/// as the second argument. All callback parameters must be plain identifiers, so they can be bound with `var`.
/// A callback that uses `return` is not matched, inside a loop it would leave the enclosing function.
pub fn is_for_each(call: &CallExpression) -> bool {
    if !callee_is_for_each(&call.callee) {
        return false;
    }
    if call.arguments.is_empty() || call.arguments.len() > 2 {
        return false;
    }
    let Expr::Function(callback) = &call.arguments[0] else {
        return false;
    };
    if let Some(this_arg) = call.arguments.get(1) {
        if !matches!(this_arg, Expr::This(_)) {
            return false;
        }
    }

    callback.params.iter().all(|p| p.as_identifier().is_some())
        && !returns_from_callback(&callback.body.body)
}

///The parts of a matched forEach call the loop is built from.
pub struct ForEachParts {
    pub receiver: Expr,
    ///Callback parameters: element, index, array.
    pub params: Vec<Identifier>,
    pub body: BlockStatement,
}

///Takes the receiver, the parameters and the callback body out of `call`, if it is a forEach call.
pub fn take_for_each(call: &mut CallExpression) -> Option<ForEachParts> {
    if !is_for_each(call) {
        return None;
    }
    let Expr::Member(member) = call.callee.as_ref() else {
        return None;
    };
    let receiver = member.object.as_ref().clone();
    let Expr::Function(callback) = &mut call.arguments[0] else {
        return None;
    };
    let params = callback
        .params
        .iter()
        .filter_map(|p| p.as_identifier().cloned())
        .collect();
    let body = std::mem::take(&mut callback.body);

    Some(ForEachParts {
        receiver,
        params,
        body,
    })
}

fn var_decl(name: &str, init: Expr) -> Stmt {
    Stmt::VariableDeclaration(VariableDeclaration {
        span: Span::empty(),
        kind: DeclKind::Var,
        declarations: smallvec![VariableDeclarator {
            span: Span::empty(),
            id: Identifier::synthesized(name),
            init: Some(init),
        }],
    })
}

fn member(object: Expr, property: Expr, access: AccessKind) -> Expr {
    Expr::Member(MemberExpression {
        span: Span::empty(),
        object: Box::new(object),
        property: Box::new(property),
        access,
    })
}

///Builds
///```js
///for (var <index> = 0, <length> = <receiver>.length; <index> < <length>; <index>++) {
///    var <element> = <receiver>[<index>];
///    <body>
///}
///```
/// The element binding is left out if there are no parameters. A second and third parameter
/// are bound to the index and the receiver, any further parameter to `void 0`.
pub fn build_indexed_loop(parts: ForEachParts, index: &str, length: &str) -> ForStatement {
    let ForEachParts {
        receiver,
        params,
        body,
    } = parts;

    let init = VariableDeclaration {
        span: Span::empty(),
        kind: DeclKind::Var,
        declarations: smallvec![
            VariableDeclarator {
                span: Span::empty(),
                id: Identifier::synthesized(index),
                init: Some(Expr::number(0.0)),
            },
            VariableDeclarator {
                span: Span::empty(),
                id: Identifier::synthesized(length),
                init: Some(member(
                    receiver.clone(),
                    Expr::ident("length"),
                    AccessKind::Dot
                )),
            },
        ],
    };

    let test = Expr::Binary(BinaryExpression {
        span: Span::empty(),
        op: BinaryOp::Lt,
        left: Box::new(Expr::ident(index)),
        right: Box::new(Expr::ident(length)),
    });

    let update = Expr::Update(UpdateExpression {
        span: Span::empty(),
        op: UpdateOp::Increment,
        prefix: false,
        argument: Box::new(Expr::ident(index)),
    });

    let mut statements = Vec::with_capacity(body.body.len() + params.len());
    let mut params = params.into_iter();
    if let Some(element) = params.next() {
        statements.push(var_decl(
            &element.name,
            member(receiver.clone(), Expr::ident(index), AccessKind::Bracket),
        ));
    }
    if let Some(index_param) = params.next() {
        statements.push(var_decl(&index_param.name, Expr::ident(index)));
    }
    if let Some(array_param) = params.next() {
        statements.push(var_decl(&array_param.name, receiver));
    }
    for unused in params {
        statements.push(var_decl(
            &unused.name,
            Expr::Unary(UnaryExpression {
                span: Span::empty(),
                op: UnaryOp::Void,
                argument: Box::new(Expr::number(0.0)),
            }),
        ));
    }
    statements.extend(body.body);

    ForStatement {
        span: Span::empty(),
        init: Some(ForInit::Declaration(init)),
        test: Some(test),
        update: Some(update),
        body: Box::new(Stmt::Block(BlockStatement {
            span: body.span,
            body: statements,
        })),
    }
}
