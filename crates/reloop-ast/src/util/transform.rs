/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
use crate::{
    expr::{Expr, FunctionExpression},
    stmt::{
        BlockStatement, ForInit, ForStatement, FunctionDeclaration, IfStatement, Stmt,
        VariableDeclaration, WhileStatement,
    },
    Program,
};

///Allows an implementor to traverse the AST, which calls the respective methode on each node.
///
/// Each hook is called _before_ the node's children are traversed. A hook may replace the node
/// it is handed (for instance `*stmt = Stmt::Empty(..)`), traversal then continues on the children
/// of the replacement.
#[allow(unused_variables)]
pub trait AstTransformer {
    fn program(&mut self, program: &mut Program) {}
    fn stmt(&mut self, stmt: &mut Stmt) {}
    fn block(&mut self, block: &mut BlockStatement) {}
    fn var_decl(&mut self, decl: &mut VariableDeclaration) {}
    fn function_decl(&mut self, func: &mut FunctionDeclaration) {}
    fn for_stmt(&mut self, for_stmt: &mut ForStatement) {}
    fn while_stmt(&mut self, while_stmt: &mut WhileStatement) {}
    fn if_stmt(&mut self, if_stmt: &mut IfStatement) {}
    fn function(&mut self, func: &mut FunctionExpression) {}
    fn expr(&mut self, expr: &mut Expr) {}
}

impl Program {
    pub fn traverse_trans<T: AstTransformer>(&mut self, transformer: &mut T) {
        transformer.program(self);
        for stmt in &mut self.body {
            stmt.traverse_trans(transformer);
        }
    }
}

impl Stmt {
    pub fn traverse_trans<T: AstTransformer>(&mut self, transformer: &mut T) {
        transformer.stmt(self);
        match self {
            Stmt::VariableDeclaration(decl) => decl.traverse_trans(transformer),
            Stmt::FunctionDeclaration(f) => f.traverse_trans(transformer),
            Stmt::Block(blk) => blk.traverse_trans(transformer),
            Stmt::Return(ret) => {
                if let Some(arg) = &mut ret.argument {
                    arg.traverse_trans(transformer)
                }
            }
            Stmt::For(f) => f.traverse_trans(transformer),
            Stmt::While(w) => w.traverse_trans(transformer),
            Stmt::If(i) => i.traverse_trans(transformer),
            Stmt::Throw(t) => t.argument.traverse_trans(transformer),
            Stmt::Expression(e) => e.expression.traverse_trans(transformer),
            Stmt::Break(_) | Stmt::Continue(_) | Stmt::Empty(_) | Stmt::Unknown(_) => {}
        }
    }
}

impl BlockStatement {
    pub fn traverse_trans<T: AstTransformer>(&mut self, transformer: &mut T) {
        transformer.block(self);
        for stmt in &mut self.body {
            stmt.traverse_trans(transformer);
        }
    }
}

impl VariableDeclaration {
    pub fn traverse_trans<T: AstTransformer>(&mut self, transformer: &mut T) {
        transformer.var_decl(self);
        for declarator in &mut self.declarations {
            if let Some(init) = &mut declarator.init {
                init.traverse_trans(transformer);
            }
        }
    }
}

impl FunctionDeclaration {
    pub fn traverse_trans<T: AstTransformer>(&mut self, transformer: &mut T) {
        transformer.function_decl(self);
        for param in &mut self.params {
            param.traverse_trans(transformer);
        }
        self.body.traverse_trans(transformer);
    }
}

impl ForStatement {
    pub fn traverse_trans<T: AstTransformer>(&mut self, transformer: &mut T) {
        transformer.for_stmt(self);
        match &mut self.init {
            Some(ForInit::Declaration(decl)) => decl.traverse_trans(transformer),
            Some(ForInit::Expression(expr)) => expr.traverse_trans(transformer),
            None => {}
        }
        if let Some(test) = &mut self.test {
            test.traverse_trans(transformer);
        }
        if let Some(update) = &mut self.update {
            update.traverse_trans(transformer);
        }
        self.body.traverse_trans(transformer);
    }
}

impl WhileStatement {
    pub fn traverse_trans<T: AstTransformer>(&mut self, transformer: &mut T) {
        transformer.while_stmt(self);
        self.test.traverse_trans(transformer);
        self.body.traverse_trans(transformer);
    }
}

impl IfStatement {
    pub fn traverse_trans<T: AstTransformer>(&mut self, transformer: &mut T) {
        transformer.if_stmt(self);
        self.test.traverse_trans(transformer);
        self.consequent.traverse_trans(transformer);
        if let Some(alt) = &mut self.alternate {
            alt.traverse_trans(transformer);
        }
    }
}

impl FunctionExpression {
    pub fn traverse_trans<T: AstTransformer>(&mut self, transformer: &mut T) {
        transformer.function(self);
        for param in &mut self.params {
            param.traverse_trans(transformer);
        }
        self.body.traverse_trans(transformer);
    }
}

impl Expr {
    pub fn traverse_trans<T: AstTransformer>(&mut self, transformer: &mut T) {
        transformer.expr(self);
        match self {
            Expr::Assignment(a) => {
                a.left.traverse_trans(transformer);
                a.right.traverse_trans(transformer);
            }
            Expr::Binary(b) => {
                b.left.traverse_trans(transformer);
                b.right.traverse_trans(transformer);
            }
            Expr::Unary(u) => u.argument.traverse_trans(transformer),
            Expr::Update(u) => u.argument.traverse_trans(transformer),
            Expr::Sequence(s) => {
                for e in &mut s.expressions {
                    e.traverse_trans(transformer);
                }
            }
            Expr::Function(f) => f.traverse_trans(transformer),
            Expr::Call(c) => {
                c.callee.traverse_trans(transformer);
                for arg in &mut c.arguments {
                    arg.traverse_trans(transformer);
                }
            }
            Expr::New(n) => {
                n.callee.traverse_trans(transformer);
                for arg in &mut n.arguments {
                    arg.traverse_trans(transformer);
                }
            }
            Expr::Conditional(c) => {
                c.test.traverse_trans(transformer);
                c.consequent.traverse_trans(transformer);
                c.alternate.traverse_trans(transformer);
            }
            Expr::Member(m) => {
                m.object.traverse_trans(transformer);
                m.property.traverse_trans(transformer);
            }
            Expr::Object(o) => {
                for prop in &mut o.properties {
                    prop.key.traverse_trans(transformer);
                    prop.value.traverse_trans(transformer);
                }
            }
            Expr::Array(a) => {
                for element in a.elements.iter_mut().flatten() {
                    element.traverse_trans(transformer);
                }
            }
            Expr::This(_) | Expr::Identifier(_) | Expr::Literal(_) | Expr::Unknown(_) => {}
        }
    }
}
