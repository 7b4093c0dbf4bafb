use reloop_ast::{
    expr::{Expr, LiteralValue},
    stmt::Stmt,
    JsParser, Program,
};
use reloop_tree_sitter_parser::{parse_file, TreeSitterParser};

const SOURCE: &str = r#"
function sum(arr) {
    var total = 0;
    arr.forEach(function (x) {
        total += x;
    });
    return total;
}
var label = 'it\'s';
"#;

#[test]
fn parse_through_trait() {
    let program = Program::new_from_str(SOURCE, &TreeSitterParser).unwrap();
    assert_eq!(program.body.len(), 2);

    let Stmt::FunctionDeclaration(sum) = &program.body[0] else {
        panic!("expected function declaration");
    };
    assert_eq!(sum.id.name, "sum");
    assert_eq!(sum.body.body.len(), 3);

    let Stmt::VariableDeclaration(decl) = &program.body[1] else {
        panic!("expected declaration");
    };
    let Some(Expr::Literal(lit)) = &decl.declarations[0].init else {
        panic!("expected literal");
    };
    assert_eq!(lit.value, LiteralValue::String("it's".to_owned()));
}

#[test]
fn spans_carry_file_name() {
    let program = TreeSitterParser
        .parse_from_bytes(Some("input.js".into()), b"x = 1;")
        .unwrap();
    let span = program.body[0].span();
    assert_eq!(span.get_file(), Some("input.js"));
    assert_eq!(span.byte_start, 0);
    assert_eq!(span.byte_end, 6);
}

#[test]
fn syntax_errors_are_reported_with_span() {
    let errors = TreeSitterParser
        .parse_from_bytes(None, b"var a = ;\nfoo(")
        .unwrap_err();
    assert!(!errors.is_empty());
    assert!(errors.iter().all(|e| e.source_span.is_some()));
}

#[test]
fn missing_file_is_an_error() {
    let (program, errors) = parse_file("this/file/does/not/exist.js").unwrap_err();
    assert!(program.body.is_empty());
    assert_eq!(errors.len(), 1);
}
