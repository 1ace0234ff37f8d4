use bolt_init::args::{ArgValue, ResolvedArgs};
use bolt_init::config::parse_config;
use bolt_init::features::resolve_features;

const CONFIG: &str = r#"
base:
  global_includes: ["package.json", "src/shared/**"]
  global_excludes: ["**/.DS_Store"]
args:
  - name: framework
    type: select
    options:
      - value: react
        files: ["src/react/**"]
      - value: vue
        files: ["src/vue/**"]
  - name: plugins
    type: multiselect
    options:
      - value: reactsupport
        files: ["src/plugins/react/**"]
      - value: vuesupport
        files: ["src/plugins/vue/**"]
      - value: svelteSupport
        files: ["src/plugins/svelte/**"]
  - name: demo
    type: boolean
    options:
      - value: "true"
        files: ["src/demo/**"]
      - value: "false"
        files: ["src/blank/**"]
  - name: github
    type: boolean
  - name: id
    type: string
"#;

fn answers(framework: &str, plugins: &[&str], demo: bool) -> ResolvedArgs {
    let mut args = ResolvedArgs::new();
    args.insert("framework".to_string(), ArgValue::from(framework));
    args.insert(
        "plugins".to_string(),
        ArgValue::from(plugins.iter().map(|p| p.to_string()).collect::<Vec<_>>()),
    );
    args.insert("demo".to_string(), ArgValue::Bool(demo));
    args.insert("id".to_string(), ArgValue::from("com.bolt.demo"));
    args
}

#[test]
fn test_every_option_is_sorted() {
    let config = parse_config(CONFIG).unwrap();
    let features = resolve_features(&config, &answers("react", &["reactsupport"], true));

    assert_eq!(
        features.file_includes,
        vec!["package.json", "src/shared/**", "src/react/**", "src/plugins/react/**", "src/demo/**"]
    );
    assert_eq!(
        features.file_excludes,
        vec![
            "**/.DS_Store",
            "src/vue/**",
            "src/plugins/vue/**",
            "src/plugins/svelte/**",
            "src/blank/**"
        ]
    );
    assert_eq!(features.keyword_includes, vec!["REACT", "REACTSUPPORT", "DEMO"]);
    assert_eq!(features.keyword_excludes, vec!["VUE", "VUESUPPORT", "SVELTESUPPORT", "GITHUB"]);
}

#[test]
fn test_boolean_false_branch() {
    let config = parse_config(CONFIG).unwrap();
    let features = resolve_features(&config, &answers("vue", &[], false));

    assert!(features.file_includes.contains(&"src/blank/**".to_string()));
    assert!(features.file_excludes.contains(&"src/demo/**".to_string()));
    assert!(features.is_excluded("demo"));
    assert!(features.is_excluded("REACTSUPPORT"));
    assert!(!features.is_excluded("VUE"));
}

#[test]
fn test_select_matches_case_insensitively() {
    let config = parse_config(CONFIG).unwrap();
    let features = resolve_features(&config, &answers("React", &["SvelteSupport"], true));

    assert!(features.keyword_includes.contains(&"REACT".to_string()));
    assert!(features.keyword_includes.contains(&"SVELTESUPPORT".to_string()));
    assert!(features.keyword_excludes.contains(&"VUE".to_string()));
}

#[test]
fn test_unanswered_arguments_are_excluded() {
    let config = parse_config(CONFIG).unwrap();
    let features = resolve_features(&config, &ResolvedArgs::new());

    assert!(features.keyword_includes.is_empty());
    assert_eq!(
        features.keyword_excludes,
        vec!["REACT", "VUE", "REACTSUPPORT", "VUESUPPORT", "SVELTESUPPORT", "DEMO", "GITHUB"]
    );
    assert_eq!(features.file_includes, vec!["package.json", "src/shared/**", "src/blank/**"]);
}
