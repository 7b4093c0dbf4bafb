use reloopc::{
    reloop_ast::Program, reloop_opt::CounterScope, reloop_tree_sitter_parser::parse_string,
    Pipeline, PipelineError,
};

///Debug form of `program` without spans.
fn shape(program: &Program) -> String {
    let debug = format!("{program:?}");
    let mut out = String::with_capacity(debug.len());
    let mut rest = debug.as_str();
    while let Some(start) = rest.find("Span {") {
        out.push_str(&rest[..start]);
        let end = rest[start..].find('}').unwrap();
        rest = &rest[start + end + 1..];
    }
    out.push_str(rest);
    out
}

#[test]
fn converts_a_file() {
    let mut pipeline = Pipeline::new();
    let output = pipeline.execute_on_file(&"tests/js/single.js").unwrap();
    assert_eq!(
        output.text(),
        "for (var $i1 = 0, $len2 = list.length;($i1 < $len2);$i1++){\nvar item = list[$i1];\nprint(item);\n}"
    );
    assert!(output.file.is_some());
}

#[test]
fn converts_nested_calls() {
    let mut pipeline = Pipeline::new();
    let output = pipeline.execute_on_file(&"tests/js/nested.js").unwrap();
    assert_eq!(
        output.text(),
        "function total(table){\nvar sum = 0;\n\
         for (var $i1 = 0, $len2 = table.length;($i1 < $len2);$i1++){\nvar row = table[$i1];\n\
         for (var $i3 = 0, $len4 = row.length;($i3 < $len4);$i3++){\nvar cell = row[$i3];\n\
         sum += cell;\n}}return sum;\n}\n"
    );
}

#[test]
fn plain_code_is_not_changed_by_the_optimizer() {
    let mut with_opt = Pipeline::new();
    let mut without_opt = Pipeline::new();
    without_opt.optimize = false;

    let optimized = with_opt.execute_on_file(&"tests/js/plain.js").unwrap();
    let rendered = without_opt.execute_on_file(&"tests/js/plain.js").unwrap();
    assert_eq!(optimized.text(), rendered.text());
}

#[test]
fn batch_continues_after_a_broken_file() {
    let mut pipeline = Pipeline::new();
    let results = pipeline.execute_on_files(&[
        "tests/js/single.js",
        "tests/js/nested.js",
        "tests/js/broken.js",
        "tests/js/does_not_exist.js",
        "tests/js/single.js",
    ]);
    assert_eq!(results.len(), 5);
    assert!(results[0].is_ok());
    assert!(results[1].is_ok());
    assert!(matches!(
        results[2],
        Err(PipelineError::ParserErrors { .. })
    ));
    assert!(matches!(results[3], Err(PipelineError::IoErr(_))));

    //names are shared over the whole batch
    let last = results[4].as_ref().unwrap();
    assert!(last.text().contains("$i7"));
    assert!(last.text().contains("$len8"));
}

#[test]
fn per_file_counter() {
    let mut pipeline = Pipeline::new();
    pipeline.opt_config.counter_scope = CounterScope::PerFile;
    pipeline.execute_on_file(&"tests/js/nested.js").unwrap();
    let second = pipeline.execute_on_file(&"tests/js/single.js").unwrap();
    assert!(second.text().contains("$i1"));
}

#[test]
fn output_reparses_to_itself() {
    let mut pipeline = Pipeline::new();
    let first = pipeline.execute_on_file(&"tests/js/nested.js").unwrap();

    let mut render_only = Pipeline::new();
    render_only.optimize = false;
    let second = render_only.execute_on_string(first.text()).unwrap();
    assert_eq!(first.text(), second.text());

    //the synthesized loops read back as the same tree
    let reparsed = parse_string(first.text()).unwrap();
    assert_eq!(shape(&first.program), shape(&reparsed));
}

#[test]
fn diagnostics_do_not_stop_rendering() {
    let mut pipeline = Pipeline::new();
    let output = pipeline
        .execute_on_string("var a = 1;\nclass B {}\nvar c = `t`;")
        .unwrap();
    assert_eq!(output.text(), "var a = 1;\nvar c = ;\n");
    assert_eq!(output.rendered.errors.len(), 2);
}
