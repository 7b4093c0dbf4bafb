/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
use reloop_ast::stmt::{
    BlockStatement, ForInit, ForStatement, FunctionDeclaration, IfStatement, Stmt,
    VariableDeclaration, VariableDeclarator,
};

use crate::{RenderError, Renderer};

///True if `stmt` ends in an `if` without `else`. An `else` following it would bind to that inner `if`.
fn ends_in_open_if(stmt: &Stmt) -> bool {
    match stmt {
        Stmt::If(i) => match &i.alternate {
            None => true,
            Some(alt) => ends_in_open_if(alt),
        },
        Stmt::For(f) => ends_in_open_if(&f.body),
        Stmt::While(w) => ends_in_open_if(&w.body),
        _ => false,
    }
}

impl Renderer {
    pub fn render_stmt(&mut self, stmt: &Stmt) -> String {
        match stmt {
            Stmt::VariableDeclaration(decl) => self.render_var_decl(decl, false),
            Stmt::FunctionDeclaration(func) => self.render_function_decl(func),
            Stmt::Block(block) => self.render_block(block),
            Stmt::Return(ret) => {
                let argument = match &ret.argument {
                    Some(arg) => self.render_expr(arg),
                    None => String::new(),
                };
                format!("return {argument};\n")
            }
            Stmt::For(for_stmt) => self.render_for(for_stmt),
            Stmt::While(w) => {
                let test = self.render_expr(&w.test);
                let body = self.render_stmt(&w.body);
                format!("while ({test}){body}")
            }
            Stmt::If(if_stmt) => self.render_if(if_stmt),
            Stmt::Break(_) => "break;\n".to_owned(),
            Stmt::Continue(_) => "continue;\n".to_owned(),
            Stmt::Throw(t) => {
                let argument = self.render_expr(&t.argument);
                format!("throw {argument};\n")
            }
            Stmt::Empty(_) => ";\n".to_owned(),
            Stmt::Expression(e) => {
                let expr = self.render_expr(&e.expression);
                //would be parsed as a function declaration or block otherwise
                if expr.starts_with("function ") || expr.starts_with('{') {
                    format!("({expr});\n")
                } else {
                    format!("{expr};\n")
                }
            }
            Stmt::Unknown(unknown) => self.unrenderable(
                RenderError::UnknownNodeKind {
                    kind: unknown.kind.clone(),
                },
                &unknown.span,
            ),
        }
    }

    pub fn render_block(&mut self, block: &BlockStatement) -> String {
        let mut text = String::from("{\n");
        for stmt in &block.body {
            text.push_str(&self.render_stmt(stmt));
        }
        text.push('}');
        text
    }

    ///Renders a declaration. Inside a for-header the trailing `;\n` is left out.
    pub fn render_var_decl(&mut self, decl: &VariableDeclaration, in_for_header: bool) -> String {
        let declarators = decl
            .declarations
            .iter()
            .map(|d| self.render_declarator(d))
            .collect::<Vec<_>>()
            .join(", ");
        if in_for_header {
            format!("{} {declarators}", decl.kind)
        } else {
            format!("{} {declarators};\n", decl.kind)
        }
    }

    fn render_declarator(&mut self, declarator: &VariableDeclarator) -> String {
        match &declarator.init {
            Some(init) => format!("{} = {}", declarator.id.name, self.render_listed(init)),
            None => declarator.id.name.clone(),
        }
    }

    fn render_function_decl(&mut self, func: &FunctionDeclaration) -> String {
        let params = self.render_list(func.params.iter());
        let body = self.render_block(&func.body);
        format!("function {}({params}){body}\n", func.id.name)
    }

    fn render_for(&mut self, for_stmt: &ForStatement) -> String {
        let init = match &for_stmt.init {
            Some(ForInit::Declaration(decl)) => self.render_var_decl(decl, true),
            Some(ForInit::Expression(expr)) => self.render_expr(expr),
            None => String::new(),
        };
        let test = match &for_stmt.test {
            Some(test) => self.render_expr(test),
            None => String::new(),
        };
        let update = match &for_stmt.update {
            Some(update) => self.render_expr(update),
            None => String::new(),
        };
        let body = self.render_stmt(&for_stmt.body);
        format!("for ({init};{test};{update}){body}")
    }

    fn render_if(&mut self, if_stmt: &IfStatement) -> String {
        let test = self.render_expr(&if_stmt.test);
        let mut consequent = self.render_stmt(&if_stmt.consequent);
        let alternate = match &if_stmt.alternate {
            Some(alt) => self.render_stmt(alt),
            None => String::new(),
        };

        if alternate.is_empty() {
            format!("if ({test}){consequent}")
        } else {
            if ends_in_open_if(&if_stmt.consequent) {
                consequent = format!("{{\n{consequent}}}");
            }
            format!("if ({test}){consequent} else {alternate}")
        }
    }
}

#[cfg(test)]
mod tests {
    use reloop_ast::{
        expr::Expr,
        stmt::{
            BlockStatement, DeclKind, ExpressionStatement, ForInit, ForStatement, IfStatement,
            ReturnStatement, Stmt, VariableDeclaration, VariableDeclarator,
        },
        UnknownNode,
    };
    use reloop_common::Span;
    use smallvec::smallvec;

    use crate::{render_stmt, Renderer};

    fn expr_stmt(expr: Expr) -> Stmt {
        Stmt::Expression(ExpressionStatement {
            span: Span::empty(),
            expression: expr,
        })
    }

    fn declaration() -> VariableDeclaration {
        VariableDeclaration {
            span: Span::empty(),
            kind: DeclKind::Var,
            declarations: smallvec![
                VariableDeclarator {
                    span: Span::empty(),
                    id: reloop_ast::expr::Identifier::synthesized("a"),
                    init: Some(Expr::number(1.0)),
                },
                VariableDeclarator {
                    span: Span::empty(),
                    id: reloop_ast::expr::Identifier::synthesized("b"),
                    init: None,
                },
            ],
        }
    }

    #[test]
    fn declaration_rules() {
        assert_eq!(
            render_stmt(&Stmt::VariableDeclaration(declaration())),
            "var a = 1, b;\n"
        );
    }

    #[test]
    fn for_header_drops_declaration_end() {
        let for_stmt = Stmt::For(ForStatement {
            span: Span::empty(),
            init: Some(ForInit::Declaration(declaration())),
            test: None,
            update: None,
            body: Box::new(Stmt::Block(BlockStatement::default())),
        });
        assert_eq!(render_stmt(&for_stmt), "for (var a = 1, b;;){\n}");
    }

    #[test]
    fn return_without_argument() {
        let ret = Stmt::Return(ReturnStatement {
            span: Span::empty(),
            argument: None,
        });
        assert_eq!(render_stmt(&ret), "return ;\n");
    }

    #[test]
    fn if_alternate_presence_uses_rendered_text() {
        let unknown = Stmt::Unknown(UnknownNode {
            span: Span::empty(),
            kind: "class_declaration".to_owned(),
        });
        let if_stmt = Stmt::If(IfStatement {
            span: Span::empty(),
            test: Expr::ident("a"),
            consequent: Box::new(expr_stmt(Expr::ident("b"))),
            alternate: Some(Box::new(unknown)),
        });
        let mut renderer = Renderer::new();
        assert_eq!(renderer.render_stmt(&if_stmt), "if (a)b;\n");
        assert_eq!(renderer.errors().len(), 1);
    }

    #[test]
    fn dangling_else_gets_a_block() {
        let inner = Stmt::If(IfStatement {
            span: Span::empty(),
            test: Expr::ident("b"),
            consequent: Box::new(expr_stmt(Expr::ident("c"))),
            alternate: None,
        });
        let outer = Stmt::If(IfStatement {
            span: Span::empty(),
            test: Expr::ident("a"),
            consequent: Box::new(inner),
            alternate: Some(Box::new(expr_stmt(Expr::ident("d")))),
        });
        assert_eq!(
            render_stmt(&outer),
            "if (a){\nif (b)c;\n} else d;\n"
        );
    }
}
