use reloop_ast::{
    expr::{Expr, Identifier},
    stmt::Stmt,
    util::{AstTransformer, AstVisitor},
    Program,
};
use reloop_tree_sitter_parser::TreeSitterParser;

const SRC: &str = "var a = b + c;\nfunction f(x) { while (x) { x = g(x, a); } return x; }";

fn program() -> Program {
    Program::new_from_str(SRC, &TreeSitterParser).unwrap()
}

#[derive(Default)]
struct Names(Vec<String>);

impl AstVisitor for Names {
    fn identifier(&mut self, ident: &Identifier) {
        self.0.push(ident.name.clone());
    }
}

#[test]
fn visitor_sees_bindings_and_references() {
    let mut names = Names::default();
    program().traverse_visit(&mut names);
    assert_eq!(
        names.0,
        ["a", "b", "c", "f", "x", "x", "x", "g", "x", "a", "x"]
    );
}

struct RenameA;

impl AstTransformer for RenameA {
    fn expr(&mut self, expr: &mut Expr) {
        if let Expr::Identifier(i) = expr {
            if i.name == "a" {
                i.name = "renamed".to_owned();
            }
        }
    }
}

struct DropWhile;

impl AstTransformer for DropWhile {
    fn stmt(&mut self, stmt: &mut Stmt) {
        if let Stmt::While(w) = stmt {
            *stmt = Stmt::Empty(w.span.clone());
        }
    }
}

#[test]
fn transformer_rewrites_in_place() {
    let mut program = program();
    program.traverse_trans(&mut RenameA);
    program.traverse_trans(&mut DropWhile);

    let mut names = Names::default();
    program.traverse_visit(&mut names);
    //the declaration's binding is not an expression, the use inside the loop is gone
    assert_eq!(names.0, ["a", "b", "c", "f", "x", "x"]);

    let Stmt::FunctionDeclaration(f) = &program.body[1] else {
        panic!("expected function");
    };
    assert!(matches!(f.body.body[0], Stmt::Empty(_)));
}

#[test]
fn serializes_as_sexpr() {
    let program = program();
    let sexpr = serde_lexpr::to_string(&program).unwrap();
    let back: Program = serde_lexpr::from_str(&sexpr).unwrap();
    assert_eq!(program, back);
}
