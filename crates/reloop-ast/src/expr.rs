/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! The expression part of the AST.

use std::fmt::Display;

use reloop_common::Span;
use smallvec::SmallVec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{stmt::BlockStatement, UnknownNode};

///Declares an operator enum that is parsed from, and printed as its source token.
macro_rules! token_enum {
    ($(#[$attr:meta])* $name:ident { $($variant:ident => $token:literal),+ $(,)? }) => {
        $(#[$attr])*
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            ///Returns the operator for the source `token`, if there is any.
            pub fn from_token(token: &str) -> Option<Self> {
                match token {
                    $($token => Some(Self::$variant),)+
                    _ => None,
                }
            }

            pub fn token(&self) -> &'static str {
                match self {
                    $(Self::$variant => $token),+
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.token())
            }
        }
    };
}

token_enum!(
    ///Binary operators, including the logical short-circuit ones.
    BinaryOp {
        Add => "+",
        Sub => "-",
        Mul => "*",
        Div => "/",
        Mod => "%",
        Exp => "**",
        Eq => "==",
        NotEq => "!=",
        StrictEq => "===",
        StrictNotEq => "!==",
        Lt => "<",
        Lte => "<=",
        Gt => ">",
        Gte => ">=",
        Shl => "<<",
        Shr => ">>",
        UShr => ">>>",
        BitAnd => "&",
        BitOr => "|",
        BitXor => "^",
        And => "&&",
        Or => "||",
        Nullish => "??",
        In => "in",
        InstanceOf => "instanceof",
    }
);

token_enum!(
    AssignOp {
        Assign => "=",
        AddAssign => "+=",
        SubAssign => "-=",
        MulAssign => "*=",
        DivAssign => "/=",
        ModAssign => "%=",
        ExpAssign => "**=",
        ShlAssign => "<<=",
        ShrAssign => ">>=",
        UShrAssign => ">>>=",
        BitAndAssign => "&=",
        BitOrAssign => "|=",
        BitXorAssign => "^=",
        AndAssign => "&&=",
        OrAssign => "||=",
        NullishAssign => "??=",
    }
);

token_enum!(
    UnaryOp {
        Not => "!",
        BitNot => "~",
        Neg => "-",
        Plus => "+",
        TypeOf => "typeof",
        Void => "void",
        Delete => "delete",
    }
);

token_enum!(
    UpdateOp {
        Increment => "++",
        Decrement => "--",
    }
);

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Identifier {
    pub span: Span,
    pub name: String,
}

impl Identifier {
    ///Identifier that does not originate from any source file.
    pub fn synthesized(name: impl Into<String>) -> Self {
        Identifier {
            span: Span::empty(),
            name: name.into(),
        }
    }
}

///The category of a literal value. Decides how the literal is printed.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub enum LiteralValue {
    ///The raw string content, without the surrounding quotes. Escape sequences are kept as written.
    String(String),
    Number(f64),
    Boolean(bool),
    ///The whole regex literal, including slashes and flags.
    RegExp(String),
    Null,
    ///A value-kind tag outside the known ones.
    Other { kind: String, raw: String },
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Literal {
    pub span: Span,
    pub value: LiteralValue,
}

///How the property of a [MemberExpression] is accessed.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AccessKind {
    ///`object.property`
    Dot,
    ///`object[property]`
    Bracket,
    ///An access-kind tag outside the known ones.
    Other(String),
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct MemberExpression {
    pub span: Span,
    pub object: Box<Expr>,
    pub property: Box<Expr>,
    pub access: AccessKind,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct AssignmentExpression {
    pub span: Span,
    pub op: AssignOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct BinaryExpression {
    pub span: Span,
    pub op: BinaryOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct UnaryExpression {
    pub span: Span,
    pub op: UnaryOp,
    pub argument: Box<Expr>,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateExpression {
    pub span: Span,
    pub op: UpdateOp,
    ///`++i` if true, `i++` otherwise.
    pub prefix: bool,
    pub argument: Box<Expr>,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct SequenceExpression {
    pub span: Span,
    pub expressions: Vec<Expr>,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct ConditionalExpression {
    pub span: Span,
    pub test: Box<Expr>,
    pub consequent: Box<Expr>,
    pub alternate: Box<Expr>,
}

///`function name(params) { body }` in expression position.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionExpression {
    pub span: Span,
    pub id: Option<Identifier>,
    ///Plain identifiers, anything else is kept as [Expr::Unknown].
    pub params: SmallVec<[Expr; 3]>,
    pub body: BlockStatement,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct CallExpression {
    pub span: Span,
    pub callee: Box<Expr>,
    pub arguments: SmallVec<[Expr; 3]>,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct NewExpression {
    pub span: Span,
    pub callee: Box<Expr>,
    pub arguments: SmallVec<[Expr; 3]>,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Property {
    pub span: Span,
    ///Either an [Identifier] or a string / number [Literal].
    pub key: Expr,
    pub value: Expr,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectExpression {
    pub span: Span,
    pub properties: Vec<Property>,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayExpression {
    pub span: Span,
    ///`None` marks a hole, like in `[a, , b]`.
    pub elements: Vec<Option<Expr>>,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Assignment(AssignmentExpression),
    Binary(BinaryExpression),
    Unary(UnaryExpression),
    Sequence(SequenceExpression),
    Update(UpdateExpression),
    Function(Box<FunctionExpression>),
    Call(Box<CallExpression>),
    New(Box<NewExpression>),
    Conditional(ConditionalExpression),
    Member(MemberExpression),
    Object(ObjectExpression),
    Array(ArrayExpression),
    This(Span),
    Identifier(Identifier),
    Literal(Literal),
    ///Some syntax the AST has no representation for.
    Unknown(UnknownNode),
}

impl Expr {
    pub fn span(&self) -> &Span {
        match self {
            Expr::Assignment(e) => &e.span,
            Expr::Binary(e) => &e.span,
            Expr::Unary(e) => &e.span,
            Expr::Sequence(e) => &e.span,
            Expr::Update(e) => &e.span,
            Expr::Function(e) => &e.span,
            Expr::Call(e) => &e.span,
            Expr::New(e) => &e.span,
            Expr::Conditional(e) => &e.span,
            Expr::Member(e) => &e.span,
            Expr::Object(e) => &e.span,
            Expr::Array(e) => &e.span,
            Expr::This(span) => span,
            Expr::Identifier(e) => &e.span,
            Expr::Literal(e) => &e.span,
            Expr::Unknown(e) => &e.span,
        }
    }

    ///The kind tag of this node, as it would be named in an ESTree AST.
    pub fn kind(&self) -> &str {
        match self {
            Expr::Assignment(_) => "AssignmentExpression",
            Expr::Binary(_) => "BinaryExpression",
            Expr::Unary(_) => "UnaryExpression",
            Expr::Sequence(_) => "SequenceExpression",
            Expr::Update(_) => "UpdateExpression",
            Expr::Function(_) => "FunctionExpression",
            Expr::Call(_) => "CallExpression",
            Expr::New(_) => "NewExpression",
            Expr::Conditional(_) => "ConditionalExpression",
            Expr::Member(_) => "MemberExpression",
            Expr::Object(_) => "ObjectExpression",
            Expr::Array(_) => "ArrayExpression",
            Expr::This(_) => "ThisExpression",
            Expr::Identifier(_) => "Identifier",
            Expr::Literal(_) => "Literal",
            Expr::Unknown(u) => &u.kind,
        }
    }

    pub fn as_identifier(&self) -> Option<&Identifier> {
        if let Expr::Identifier(i) = self {
            Some(i)
        } else {
            None
        }
    }

    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Identifier(Identifier::synthesized(name))
    }

    pub fn number(value: f64) -> Self {
        Expr::Literal(Literal {
            span: Span::empty(),
            value: LiteralValue::Number(value),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{AssignOp, BinaryOp, UnaryOp, UpdateOp};

    #[test]
    fn operator_tokens_roundtrip() {
        for token in ["+", "===", ">>>", "instanceof", "??", "&&"] {
            let op = BinaryOp::from_token(token).unwrap();
            assert_eq!(op.to_string(), token);
        }
        assert_eq!(AssignOp::from_token(">>>="), Some(AssignOp::UShrAssign));
        assert_eq!(UnaryOp::from_token("typeof"), Some(UnaryOp::TypeOf));
        assert_eq!(UpdateOp::from_token("--"), Some(UpdateOp::Decrement));
        assert!(BinaryOp::from_token("=>").is_none());
    }
}
