/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Statements and declarations.

use std::fmt::Display;

use reloop_common::Span;
use smallvec::SmallVec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    expr::{Expr, Identifier},
    UnknownNode,
};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeclKind {
    Var,
    Let,
    Const,
}

impl Display for DeclKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeclKind::Var => write!(f, "var"),
            DeclKind::Let => write!(f, "let"),
            DeclKind::Const => write!(f, "const"),
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct VariableDeclarator {
    pub span: Span,
    pub id: Identifier,
    pub init: Option<Expr>,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct VariableDeclaration {
    pub span: Span,
    pub kind: DeclKind,
    pub declarations: SmallVec<[VariableDeclarator; 2]>,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDeclaration {
    pub span: Span,
    pub id: Identifier,
    pub params: SmallVec<[Expr; 3]>,
    pub body: BlockStatement,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Default)]
pub struct BlockStatement {
    pub span: Span,
    pub body: Vec<Stmt>,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct ReturnStatement {
    pub span: Span,
    pub argument: Option<Expr>,
}

///The first clause of a `for` header.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub enum ForInit {
    Declaration(VariableDeclaration),
    Expression(Expr),
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct ForStatement {
    pub span: Span,
    pub init: Option<ForInit>,
    pub test: Option<Expr>,
    pub update: Option<Expr>,
    pub body: Box<Stmt>,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct WhileStatement {
    pub span: Span,
    pub test: Expr,
    pub body: Box<Stmt>,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct IfStatement {
    pub span: Span,
    pub test: Expr,
    pub consequent: Box<Stmt>,
    ///_else_ branch, if there is any
    pub alternate: Option<Box<Stmt>>,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct ThrowStatement {
    pub span: Span,
    pub argument: Expr,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct ExpressionStatement {
    pub span: Span,
    pub expression: Expr,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    VariableDeclaration(VariableDeclaration),
    FunctionDeclaration(FunctionDeclaration),
    Block(BlockStatement),
    Return(ReturnStatement),
    For(ForStatement),
    While(WhileStatement),
    If(IfStatement),
    Break(Span),
    Continue(Span),
    Throw(ThrowStatement),
    Empty(Span),
    Expression(ExpressionStatement),
    ///Some statement the AST has no representation for.
    Unknown(UnknownNode),
}

impl Stmt {
    pub fn span(&self) -> &Span {
        match self {
            Stmt::VariableDeclaration(s) => &s.span,
            Stmt::FunctionDeclaration(s) => &s.span,
            Stmt::Block(s) => &s.span,
            Stmt::Return(s) => &s.span,
            Stmt::For(s) => &s.span,
            Stmt::While(s) => &s.span,
            Stmt::If(s) => &s.span,
            Stmt::Break(span) | Stmt::Continue(span) | Stmt::Empty(span) => span,
            Stmt::Throw(s) => &s.span,
            Stmt::Expression(s) => &s.span,
            Stmt::Unknown(s) => &s.span,
        }
    }

    ///The kind tag of this node, as it would be named in an ESTree AST.
    pub fn kind(&self) -> &str {
        match self {
            Stmt::VariableDeclaration(_) => "VariableDeclaration",
            Stmt::FunctionDeclaration(_) => "FunctionDeclaration",
            Stmt::Block(_) => "BlockStatement",
            Stmt::Return(_) => "ReturnStatement",
            Stmt::For(_) => "ForStatement",
            Stmt::While(_) => "WhileStatement",
            Stmt::If(_) => "IfStatement",
            Stmt::Break(_) => "BreakStatement",
            Stmt::Continue(_) => "ContinueStatement",
            Stmt::Throw(_) => "ThrowStatement",
            Stmt::Empty(_) => "EmptyStatement",
            Stmt::Expression(_) => "ExpressionStatement",
            Stmt::Unknown(u) => &u.kind,
        }
    }
}
