use bolt_init::args::{ArgValue, ResolvedArgs};
use bolt_init::markers::{MarkerTransformer, BLOCK_MARKUP, HTML_COMMENT, LINE_COMMENT};

const NO_EXCLUDES: [&str; 0] = [];

fn transformer() -> MarkerTransformer {
    MarkerTransformer::new().unwrap()
}

fn args(pairs: &[(&str, &str)]) -> ResolvedArgs {
    pairs.iter().map(|(k, v)| (k.to_string(), ArgValue::from(*v))).collect()
}

#[test]
fn test_marker_free_text_is_unchanged() {
    let t = transformer();
    let samples = [
        ("ts", "const a = 1;\n// a plain comment\nconst url = \"https://example.com\";\n"),
        ("tsx", "<div>{/* just a note */}</div>\n<App />"),
        ("html", "<!-- a note -->\n<p>hi</p>\n"),
    ];
    for (ext, text) in samples {
        assert_eq!(t.transform(text, ext, &["REACT"], &ResolvedArgs::new()), text);
    }
}

#[test]
fn test_exclusion_removes_regions_and_only_lines() {
    let input = "import a from \"a\";\n\
                 // BOLT_VUE_START\n\
                 import vue from \"vue\";\n\
                 // BOLT_VUE_END\n\
                 import b from \"b\";\n\
                 const x = 1; // BOLT_VUE_ONLY\n";
    let out = transformer().transform(input, "ts", &["VUE"], &ResolvedArgs::new());
    assert_eq!(out, "import a from \"a\";\nimport b from \"b\";\n");
}

#[test]
fn test_inclusion_keeps_body_and_removes_sentinels() {
    let input = "import a from \"a\";\n\
                 // BOLT_VUE_START\n\
                 import vue from \"vue\";\n\
                 \x20 vue.use(x);\n\
                 // BOLT_VUE_END\n\
                 const x = 1; // BOLT_VUE_ONLY\n";
    let out = transformer().transform(input, "ts", &["REACT"], &ResolvedArgs::new());
    assert_eq!(out, "import a from \"a\";\nimport vue from \"vue\";\n  vue.use(x);\nconst x = 1;\n");
}

#[test]
fn test_block_markup_regions() {
    let input = "<App>\n  {/* BOLT_REACT_START */}\n  <ReactThing />\n  {/* BOLT_REACT_END */}\n  <Other />\n</App>\n";
    let t = transformer();
    assert_eq!(
        t.transform(input, "tsx", &["REACT"], &ResolvedArgs::new()),
        "<App>\n  <Other />\n</App>\n"
    );
    assert_eq!(
        t.transform(input, "tsx", &NO_EXCLUDES, &ResolvedArgs::new()),
        "<App>\n  <ReactThing />\n  <Other />\n</App>\n"
    );
}

#[test]
fn test_inline_block_markup_region() {
    let input = "<div>{/* BOLT_VUE_START */}<Vue />{/* BOLT_VUE_END */}</div>\n";
    let t = transformer();
    assert_eq!(t.transform(input, "tsx", &["VUE"], &ResolvedArgs::new()), "<div></div>\n");
    assert_eq!(
        t.transform(input, "tsx", &NO_EXCLUDES, &ResolvedArgs::new()),
        "<div><Vue /></div>\n"
    );
}

#[test]
fn test_inline_region_leaves_a_single_space() {
    let input = "keep(); {/* BOLT_X_START */} drop(); {/* BOLT_X_END */} tail();\n";
    let t = transformer();
    assert_eq!(t.transform(input, "tsx", &["X"], &ResolvedArgs::new()), "keep(); tail();\n");
    assert_eq!(
        t.transform(input, "tsx", &NO_EXCLUDES, &ResolvedArgs::new()),
        "keep();  drop();  tail();\n"
    );

    let multiline = "<A>\n  {/* BOLT_X_START */}\n  <B />\n  {/* BOLT_X_END */}   <C />\n</A>\n";
    assert_eq!(
        t.transform(multiline, "tsx", &["X"], &ResolvedArgs::new()),
        "<A>\n  <C />\n</A>\n"
    );
}

#[test]
fn test_html_comment_regions_and_only_lines() {
    let input = "<body>\n  <!-- BOLT_VUE_START -->\n  <div id=\"vue\"></div>\n  <!-- BOLT_VUE_END -->\n  <div id=\"app\"></div>\n  <p>vue</p> <!-- BOLT_VUE_ONLY -->\n</body>\n";
    let out = transformer().transform(input, "html", &["VUE"], &ResolvedArgs::new());
    assert_eq!(out, "<body>\n  <div id=\"app\"></div>\n</body>\n");
}

#[test]
fn test_replace_rewrites_trailing_literal() {
    let input = "export default {\n  label: \"X\", // BOLT_NAME_REPLACE\n};\n";
    let out = transformer().transform(
        input,
        "ts",
        &NO_EXCLUDES,
        &args(&[("name", "my-plugin")]),
    );
    assert_eq!(out, "export default {\n  label: \"my-plugin\",\n};\n");
}

#[test]
fn test_replace_preserves_quote_style() {
    let t = transformer();
    let values = args(&[("id", "com.bolt.demo")]);
    assert_eq!(
        t.transform("  id: 'com.example', // BOLT_ID_REPLACE\n", "ts", &NO_EXCLUDES, &values),
        "  id: 'com.bolt.demo',\n"
    );
    assert_eq!(
        t.transform("  id: \"com.example\", // BOLT_ID_REPLACE\n", "ts", &NO_EXCLUDES, &values),
        "  id: \"com.bolt.demo\",\n"
    );
}

#[test]
fn test_replace_targets_literal_nearest_line_end() {
    let input = "{ label: \"Name\", value: \"old\" }, // BOLT_NAME_REPLACE\n";
    let out = transformer().transform(input, "ts", &NO_EXCLUDES, &args(&[("NAME", "new")]));
    assert_eq!(out, "{ label: \"Name\", value: \"new\" },\n");
}

#[test]
fn test_replace_without_matching_argument_only_strips_marker() {
    let input = "  version: \"1.0.0\", // BOLT_VERSION_REPLACE\n";
    let out = transformer().transform(input, "ts", &NO_EXCLUDES, &args(&[("name", "x")]));
    assert_eq!(out, "  version: \"1.0.0\",\n");
}

#[test]
fn test_replace_stringifies_lists_and_booleans() {
    let mut values = ResolvedArgs::new();
    values.insert("plugins".to_string(), ArgValue::from(vec!["a".to_string(), "b".to_string()]));
    values.insert("demo".to_string(), ArgValue::Bool(true));
    let input = "const p = \"\"; // BOLT_PLUGINS_REPLACE\nconst d = \"\"; // BOLT_DEMO_REPLACE\n";
    let out = transformer().transform(input, "ts", &NO_EXCLUDES, &values);
    assert_eq!(out, "const p = \"a,b\";\nconst d = \"true\";\n");
}

#[test]
fn test_nested_regions() {
    let input = "// BOLT_REACT_START\nreact();\n// BOLT_DEMO_START\ndemo();\n// BOLT_DEMO_END\n// BOLT_REACT_END\ndone();\n";
    let t = transformer();
    assert_eq!(t.transform(input, "ts", &["DEMO"], &ResolvedArgs::new()), "react();\ndone();\n");
    assert_eq!(t.transform(input, "ts", &["REACT"], &ResolvedArgs::new()), "done();\n");
}

#[test]
fn test_unpaired_start_never_deletes_text() {
    let input = "// BOLT_VUE_START\nkept();\nalso_kept();\n";
    let out = transformer().transform(input, "ts", &["VUE"], &ResolvedArgs::new());
    assert_eq!(out, "kept();\nalso_kept();\n");
}

#[test]
fn test_unknown_keyword_is_treated_as_included() {
    let input = "// BOLT_RETIRED_START\nold();\n// BOLT_RETIRED_END\n";
    let out = transformer().transform(input, "ts", &["VUE"], &ResolvedArgs::new());
    assert_eq!(out, "old();\n");
}

#[test]
fn test_keywords_ignore_case() {
    let input = "// BOLT_Vue_START\nvue();\n// BOLT_Vue_END\nrest();\n";
    let out = transformer().transform(input, "ts", &["vue"], &ResolvedArgs::new());
    assert_eq!(out, "rest();\n");
}

#[test]
fn test_crlf_line_endings_are_kept() {
    let input = "a\r\n// BOLT_X_START\r\nb\r\n// BOLT_X_END\r\nc\r\n";
    let t = transformer();
    assert_eq!(t.transform(input, "ts", &["X"], &ResolvedArgs::new()), "a\r\nc\r\n");
    assert_eq!(t.transform(input, "ts", &NO_EXCLUDES, &ResolvedArgs::new()), "a\r\nb\r\nc\r\n");
}

#[test]
fn test_cleanup_is_idempotent() {
    let input = "<div>\n{/* BOLT_REACT_START */}\n<A />\n{/* BOLT_REACT_END */}\n<!-- BOLT_VUE_ONLY -->\n</div>\n";
    let t = transformer();
    let once = t.clean(input, &["VUE"], &ResolvedArgs::new());
    let twice = t.clean(&once, &["VUE"], &ResolvedArgs::new());
    assert_eq!(once, twice);
    assert!(!once.contains("BOLT_"));
}

#[test]
fn test_html_scripts_are_enabled() {
    let input = "<head>\n<!-- Uncomment to debug the desired template -->\n<!-- <script type=\"module\" src=\"/src/main.ts\"></script> -->\n</head>\n";
    let t = transformer();
    let html = t.transform(input, "html", &NO_EXCLUDES, &ResolvedArgs::new());
    assert!(html.contains("<script type=\"module\" src=\"/src/main.ts\"></script>"));
    assert!(!html.contains("<!--"));

    let other = t.transform(input, "ts", &NO_EXCLUDES, &ResolvedArgs::new());
    assert_eq!(other, input);
}

#[test]
fn test_restricted_syntaxes() {
    let t = MarkerTransformer::with_syntaxes(&[HTML_COMMENT]).unwrap();
    let input = "// BOLT_VUE_ONLY\n<!-- BOLT_VUE_ONLY -->\n";
    assert_eq!(t.transform(input, "txt", &["VUE"], &ResolvedArgs::new()), "// BOLT_VUE_ONLY\n");

    let all = MarkerTransformer::with_syntaxes(&[LINE_COMMENT, BLOCK_MARKUP, HTML_COMMENT]).unwrap();
    assert_eq!(all.transform(input, "txt", &["VUE"], &ResolvedArgs::new()), "");
}
