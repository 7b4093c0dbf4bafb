/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
use crate::{
    expr::{Expr, FunctionExpression, Identifier},
    stmt::{
        BlockStatement, ForInit, ForStatement, FunctionDeclaration, IfStatement, Stmt,
        VariableDeclaration, VariableDeclarator, WhileStatement,
    },
    Program,
};

///Allows an implementor to traverse the AST, which calls the respective methode on each node.
///If you want to mutate the AST, see [AstTransformer](crate::util::AstTransformer).
#[allow(unused_variables)]
pub trait AstVisitor {
    fn program(&mut self, program: &Program) {}
    fn stmt(&mut self, stmt: &Stmt) {}
    fn block(&mut self, block: &BlockStatement) {}
    fn var_decl(&mut self, decl: &VariableDeclaration) {}
    fn declarator(&mut self, declarator: &VariableDeclarator) {}
    fn function_decl(&mut self, func: &FunctionDeclaration) {}
    fn for_stmt(&mut self, for_stmt: &ForStatement) {}
    fn while_stmt(&mut self, while_stmt: &WhileStatement) {}
    fn if_stmt(&mut self, if_stmt: &IfStatement) {}
    fn function(&mut self, func: &FunctionExpression) {}
    fn expr(&mut self, expr: &Expr) {}
    ///Called for every binding and reference, including declarator and function names.
    fn identifier(&mut self, ident: &Identifier) {}
}

impl Program {
    pub fn traverse_visit<V: AstVisitor>(&self, visitor: &mut V) {
        visitor.program(self);
        for stmt in &self.body {
            stmt.traverse_visit(visitor);
        }
    }
}

impl Stmt {
    pub fn traverse_visit<V: AstVisitor>(&self, visitor: &mut V) {
        visitor.stmt(self);
        match self {
            Stmt::VariableDeclaration(decl) => decl.traverse_visit(visitor),
            Stmt::FunctionDeclaration(f) => f.traverse_visit(visitor),
            Stmt::Block(blk) => blk.traverse_visit(visitor),
            Stmt::Return(ret) => {
                if let Some(arg) = &ret.argument {
                    arg.traverse_visit(visitor)
                }
            }
            Stmt::For(f) => f.traverse_visit(visitor),
            Stmt::While(w) => w.traverse_visit(visitor),
            Stmt::If(i) => i.traverse_visit(visitor),
            Stmt::Throw(t) => t.argument.traverse_visit(visitor),
            Stmt::Expression(e) => e.expression.traverse_visit(visitor),
            Stmt::Break(_) | Stmt::Continue(_) | Stmt::Empty(_) | Stmt::Unknown(_) => {}
        }
    }
}

impl BlockStatement {
    pub fn traverse_visit<V: AstVisitor>(&self, visitor: &mut V) {
        visitor.block(self);
        for stmt in &self.body {
            stmt.traverse_visit(visitor);
        }
    }
}

impl VariableDeclaration {
    pub fn traverse_visit<V: AstVisitor>(&self, visitor: &mut V) {
        visitor.var_decl(self);
        for declarator in &self.declarations {
            visitor.declarator(declarator);
            visitor.identifier(&declarator.id);
            if let Some(init) = &declarator.init {
                init.traverse_visit(visitor);
            }
        }
    }
}

impl FunctionDeclaration {
    pub fn traverse_visit<V: AstVisitor>(&self, visitor: &mut V) {
        visitor.function_decl(self);
        visitor.identifier(&self.id);
        for param in &self.params {
            param.traverse_visit(visitor);
        }
        self.body.traverse_visit(visitor);
    }
}

impl ForStatement {
    pub fn traverse_visit<V: AstVisitor>(&self, visitor: &mut V) {
        visitor.for_stmt(self);
        match &self.init {
            Some(ForInit::Declaration(decl)) => decl.traverse_visit(visitor),
            Some(ForInit::Expression(expr)) => expr.traverse_visit(visitor),
            None => {}
        }
        if let Some(test) = &self.test {
            test.traverse_visit(visitor);
        }
        if let Some(update) = &self.update {
            update.traverse_visit(visitor);
        }
        self.body.traverse_visit(visitor);
    }
}

impl WhileStatement {
    pub fn traverse_visit<V: AstVisitor>(&self, visitor: &mut V) {
        visitor.while_stmt(self);
        self.test.traverse_visit(visitor);
        self.body.traverse_visit(visitor);
    }
}

impl IfStatement {
    pub fn traverse_visit<V: AstVisitor>(&self, visitor: &mut V) {
        visitor.if_stmt(self);
        self.test.traverse_visit(visitor);
        self.consequent.traverse_visit(visitor);
        if let Some(alt) = &self.alternate {
            alt.traverse_visit(visitor);
        }
    }
}

impl FunctionExpression {
    pub fn traverse_visit<V: AstVisitor>(&self, visitor: &mut V) {
        visitor.function(self);
        if let Some(id) = &self.id {
            visitor.identifier(id);
        }
        for param in &self.params {
            param.traverse_visit(visitor);
        }
        self.body.traverse_visit(visitor);
    }
}

impl Expr {
    pub fn traverse_visit<V: AstVisitor>(&self, visitor: &mut V) {
        visitor.expr(self);
        match self {
            Expr::Assignment(a) => {
                a.left.traverse_visit(visitor);
                a.right.traverse_visit(visitor);
            }
            Expr::Binary(b) => {
                b.left.traverse_visit(visitor);
                b.right.traverse_visit(visitor);
            }
            Expr::Unary(u) => u.argument.traverse_visit(visitor),
            Expr::Update(u) => u.argument.traverse_visit(visitor),
            Expr::Sequence(s) => {
                for e in &s.expressions {
                    e.traverse_visit(visitor);
                }
            }
            Expr::Function(f) => f.traverse_visit(visitor),
            Expr::Call(c) => {
                c.callee.traverse_visit(visitor);
                for arg in &c.arguments {
                    arg.traverse_visit(visitor);
                }
            }
            Expr::New(n) => {
                n.callee.traverse_visit(visitor);
                for arg in &n.arguments {
                    arg.traverse_visit(visitor);
                }
            }
            Expr::Conditional(c) => {
                c.test.traverse_visit(visitor);
                c.consequent.traverse_visit(visitor);
                c.alternate.traverse_visit(visitor);
            }
            Expr::Member(m) => {
                m.object.traverse_visit(visitor);
                m.property.traverse_visit(visitor);
            }
            Expr::Object(o) => {
                for prop in &o.properties {
                    prop.key.traverse_visit(visitor);
                    prop.value.traverse_visit(visitor);
                }
            }
            Expr::Array(a) => {
                for element in a.elements.iter().flatten() {
                    element.traverse_visit(visitor);
                }
            }
            Expr::Identifier(i) => visitor.identifier(i),
            Expr::This(_) | Expr::Literal(_) | Expr::Unknown(_) => {}
        }
    }
}
