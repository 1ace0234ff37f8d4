use bolt_init::paths::{relative_key, resolve_paths, PathPatterns};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, relative).unwrap();
}

fn selected(stem: &Path, includes: &[&str], excludes: &[&str]) -> Vec<String> {
    let patterns = PathPatterns::new(includes, excludes).unwrap();
    resolve_paths(stem, &patterns)
        .unwrap()
        .iter()
        .map(|path| relative_key(stem, path).unwrap())
        .collect()
}

fn template() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for file in [
        "package.json",
        "src/index.ts",
        "src/react-only/App.tsx",
        "src/react-only/nested/deep.ts",
        "src/shared/util.ts",
        "src/.env.example",
        "public/fonts/a.woff",
        "public/index.html",
        "README.md",
    ] {
        touch(temp_dir.path(), file);
    }
    temp_dir
}

#[test]
fn test_excludes_override_includes() {
    let temp_dir = template();
    let paths = selected(temp_dir.path(), &["src/**"], &["src/react-only/**"]);
    assert_eq!(paths, vec!["src/.env.example", "src/index.ts", "src/shared/util.ts"]);
}

#[test]
fn test_exclude_order_does_not_matter() {
    let temp_dir = template();
    let first = selected(temp_dir.path(), &["src/react-only/**", "src/**"], &["src/react-only/**"]);
    let second = selected(temp_dir.path(), &["src/**", "src/react-only/**"], &["src/react-only/**"]);
    assert_eq!(first, second);
    assert!(first.iter().all(|path| !path.starts_with("src/react-only/")));
}

#[test]
fn test_excluded_directory_is_pruned() {
    let temp_dir = template();
    let paths = selected(temp_dir.path(), &["**"], &["src/react-only"]);
    assert!(paths.contains(&"README.md".to_string()));
    assert!(paths.iter().all(|path| !path.starts_with("src/react-only")));
}

#[test]
fn test_literal_directory_is_selected_whole() {
    let temp_dir = template();
    let paths = selected(temp_dir.path(), &["public", "package.json"], &[]);
    assert_eq!(paths, vec!["package.json", "public"]);
}

#[test]
fn test_hidden_files_are_included() {
    let temp_dir = template();
    let paths = selected(temp_dir.path(), &["src/*"], &[]);
    assert_eq!(paths, vec!["src/.env.example", "src/index.ts"]);
}

#[test]
fn test_no_includes_selects_nothing() {
    let temp_dir = template();
    assert!(selected(temp_dir.path(), &[], &["**/*.md"]).is_empty());
}

#[test]
fn test_leading_dot_slash_is_ignored() {
    let temp_dir = template();
    assert_eq!(selected(temp_dir.path(), &["./README.md"], &[]), vec!["README.md"]);
}

#[cfg(unix)]
#[test]
fn test_symlinked_directories_are_followed() {
    let temp_dir = template();
    let shared = TempDir::new().unwrap();
    touch(shared.path(), "linked.ts");
    std::os::unix::fs::symlink(shared.path(), temp_dir.path().join("src/link")).unwrap();

    let paths = selected(temp_dir.path(), &["src/link/**"], &[]);
    assert_eq!(paths, vec!["src/link/linked.ts"]);
}

#[test]
fn test_invalid_pattern_is_an_error() {
    assert!(PathPatterns::new(&["src/[a"], &[]).is_err());
}
