//! Dependency installation in the materialized project.

use std::path::Path;
use std::process::{Command, Stdio};

use log::debug;

use crate::constants::{DEFAULT_PACKAGE_MANAGER, USER_AGENT_ENV};
use crate::error::{Error, Result};

const KNOWN_MANAGERS: [&str; 4] = ["pnpm", "yarn", "bun", "npm"];

/// Picks the package manager from a user agent such as
/// `pnpm/8.6.0 npm/? node/v18.16.0 darwin arm64`.
pub fn package_manager_from_agent(agent: Option<&str>) -> &'static str {
    agent
        .and_then(|agent| agent.split('/').next())
        .and_then(|name| KNOWN_MANAGERS.into_iter().find(|known| *known == name.trim()))
        .unwrap_or(DEFAULT_PACKAGE_MANAGER)
}

/// Package manager that launched this process, npm when unknown.
pub fn detect_package_manager() -> &'static str {
    package_manager_from_agent(std::env::var(USER_AGENT_ENV).ok().as_deref())
}

/// Runs `<package_manager> install` in the output directory and waits for it.
///
/// # Errors
/// * `Error::InstallError` if the package manager exits unsuccessfully
pub fn install_dependencies<P: AsRef<Path>>(output_dir: P, package_manager: &str) -> Result<()> {
    let output_dir = output_dir.as_ref();
    debug!("Running '{package_manager} install' in {}", output_dir.display());

    let status = Command::new(package_manager)
        .arg("install")
        .current_dir(output_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()?;

    if !status.success() {
        return Err(Error::InstallError(format!(
            "'{package_manager} install' failed with status: {status}"
        )));
    }

    Ok(())
}
