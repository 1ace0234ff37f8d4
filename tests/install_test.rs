use bolt_init::{
    error::Error,
    install::{install_dependencies, package_manager_from_agent},
};
use tempfile::TempDir;

#[test]
fn test_package_manager_from_agent() {
    assert_eq!(
        package_manager_from_agent(Some("pnpm/8.6.0 npm/? node/v18.16.0 darwin arm64")),
        "pnpm"
    );
    assert_eq!(package_manager_from_agent(Some("yarn/1.22.19 npm/? node/v18.16.0")), "yarn");
    assert_eq!(package_manager_from_agent(Some("bun/1.0.0 npm/? node/v20.0.0")), "bun");
    assert_eq!(package_manager_from_agent(Some("npm/9.5.1 node/v18.16.0")), "npm");
    assert_eq!(package_manager_from_agent(Some("deno/1.0")), "npm");
    assert_eq!(package_manager_from_agent(None), "npm");
}

#[test]
fn test_unknown_package_manager_fails() {
    let temp_dir = TempDir::new().unwrap();
    let err = install_dependencies(temp_dir.path(), "bolt-init-missing-manager").unwrap_err();
    assert!(matches!(err, Error::IoError(_)));
}

#[cfg(unix)]
#[test]
fn test_failed_install_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let err = install_dependencies(temp_dir.path(), "false").unwrap_err();
    assert!(matches!(err, Error::InstallError(_)));
}
