use reloop_ast::stmt::Stmt;
use reloop_fmt::{render, render_stmt};
use reloop_opt::{Config, CounterScope, Optimizer};
use reloop_tree_sitter_parser::parse_string;

fn optimize_src(optimizer: &mut Optimizer, src: &str) -> String {
    let _ = pretty_env_logger::try_init();
    let program = optimizer.optimize(parse_string(src).unwrap());
    let rendered = render(&program);
    assert!(rendered.is_complete(), "{:?}", rendered.errors);
    rendered.text
}

fn optimized(src: &str) -> String {
    optimize_src(&mut Optimizer::default(), src)
}

#[test]
fn converts_simple_for_each() {
    assert_eq!(
        optimized("arr.forEach(function (x) { f(x); });"),
        "for (var $i1 = 0, $len2 = arr.length;($i1 < $len2);$i1++){\nvar x = arr[$i1];\nf(x);\n}"
    );
}

#[test]
fn converts_nested_calls_in_one_pass() {
    assert_eq!(
        optimized("a.forEach(function (x) { x.forEach(function (y) { g(y); }); });"),
        "for (var $i1 = 0, $len2 = a.length;($i1 < $len2);$i1++){\nvar x = a[$i1];\n\
         for (var $i3 = 0, $len4 = x.length;($i3 < $len4);$i3++){\nvar y = x[$i3];\ng(y);\n}}"
    );
}

#[test]
fn siblings_get_unique_names() {
    assert_eq!(
        optimized("a.forEach(function (x) {});\nb.forEach(function (y) {});"),
        "for (var $i1 = 0, $len2 = a.length;($i1 < $len2);$i1++){\nvar x = a[$i1];\n}\
         for (var $i3 = 0, $len4 = b.length;($i3 < $len4);$i3++){\nvar y = b[$i3];\n}"
    );
}

#[test]
fn inside_function_bodies() {
    assert_eq!(
        optimized("function f(list) { list.forEach(function (x) { log(x); }); return list; }"),
        "function f(list){\nfor (var $i1 = 0, $len2 = list.length;($i1 < $len2);$i1++){\n\
         var x = list[$i1];\nlog(x);\n}return list;\n}\n"
    );
}

#[test]
fn callback_variants() {
    assert_eq!(
        optimized("a.forEach(function () { tick(); });"),
        "for (var $i1 = 0, $len2 = a.length;($i1 < $len2);$i1++){\ntick();\n}"
    );
    assert_eq!(
        optimized("a.forEach(function (x, i, all) { f(x, i, all); });"),
        "for (var $i1 = 0, $len2 = a.length;($i1 < $len2);$i1++){\nvar x = a[$i1];\n\
         var i = $i1;\nvar all = a;\nf(x, i, all);\n}"
    );
    assert_eq!(
        optimized("a.forEach(function (x, i, all, rest) { g(rest); });"),
        "for (var $i1 = 0, $len2 = a.length;($i1 < $len2);$i1++){\nvar x = a[$i1];\n\
         var i = $i1;\nvar all = a;\nvar rest = void 0;\ng(rest);\n}"
    );
    assert_eq!(
        optimized("a.forEach(function (x) { this.add(x); }, this);"),
        "for (var $i1 = 0, $len2 = a.length;($i1 < $len2);$i1++){\nvar x = a[$i1];\nthis.add(x);\n}"
    );
    assert_eq!(
        optimized("get().items['forEach'](function (x) {});"),
        "for (var $i1 = 0, $len2 = get().items.length;($i1 < $len2);$i1++){\n\
         var x = get().items[$i1];\n}"
    );
}

#[test]
fn non_matching_calls_are_kept() {
    for src in [
        "a.forEach(function (x) {}, customObj);",
        "a.forEach(f);",
        "a.map(function (x) { return x; });",
        "var n = 1;\nwhile (n < 10) { n = n * 2; }",
        "function f(a) { a.forEach(function (x) { if (x) return; g(x); }); }",
    ] {
        let program = parse_string(src).unwrap();
        let before = render(&program).text;
        let after = render(&Optimizer::default().optimize(program)).text;
        assert_eq!(before, after);
    }
}

#[test]
fn expression_position_is_not_converted() {
    assert_eq!(
        optimized("var r = a.forEach(function (x) { b.forEach(function (y) {}); });"),
        "var r = a.forEach(function (x){\nfor (var $i1 = 0, $len2 = b.length;($i1 < $len2);$i1++){\n\
         var y = b[$i1];\n}});\n"
    );
}

#[test]
fn user_dollar_names_are_avoided() {
    assert_eq!(
        optimized("var $i1 = 0;\na.forEach(function (x) {});"),
        "var $i1 = 0;\nfor (var $i2 = 0, $len3 = a.length;($i2 < $len3);$i2++){\nvar x = a[$i2];\n}"
    );
}

#[test]
fn counter_scope() {
    let src = "a.forEach(function (x) {});";

    let mut batch = Optimizer::default();
    optimize_src(&mut batch, src);
    assert!(optimize_src(&mut batch, src).contains("$i3"));
    assert_eq!(batch.converted(), 2);

    let mut per_file = Optimizer::new(Config {
        counter_scope: CounterScope::PerFile,
        ..Default::default()
    });
    optimize_src(&mut per_file, src);
    assert!(optimize_src(&mut per_file, src).contains("$i1"));
}

#[test]
fn custom_prefixes() {
    let mut optimizer = Optimizer::new(Config {
        index_prefix: "idx".to_owned(),
        length_prefix: "n".to_owned(),
        ..Default::default()
    });
    assert_eq!(
        optimize_src(&mut optimizer, "a.forEach(function (x) {});"),
        "for (var $idx1 = 0, $n2 = a.length;($idx1 < $n2);$idx1++){\nvar x = a[$idx1];\n}"
    );
}

#[test]
fn optimized_output_reparses() {
    let out = optimized(
        "a.forEach(function (x) { if (x) { x.forEach(function (y) { s += y; }); } else n++; });",
    );
    let again = render(&parse_string(&out).unwrap()).text;
    assert_eq!(out, again);
}

#[test]
fn optimizes_a_statement_list() {
    let mut program =
        parse_string("if (c) { a.forEach(function (x) { x.forEach(function (y) {}); }); }").unwrap();
    let Stmt::If(if_stmt) = &mut program.body[0] else {
        panic!("expected if");
    };
    let Stmt::Block(block) = if_stmt.consequent.as_mut() else {
        panic!("expected block");
    };

    let mut optimizer = Optimizer::default();
    optimizer.optimize_stmts(&mut block.body);
    assert_eq!(optimizer.converted(), 2);
    assert_eq!(
        render_stmt(&block.body[0]),
        "for (var $i1 = 0, $len2 = a.length;($i1 < $len2);$i1++){\nvar x = a[$i1];\n\
         for (var $i3 = 0, $len4 = x.length;($i3 < $len4);$i3++){\nvar y = x[$i3];\n}}"
    );
}
