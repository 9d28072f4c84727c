// File: src/manifest.rs
// Purpose: Reads the host package manifest for the version prefix

use std::fs;
use std::path::Path;

use serde::Deserialize;

const FALLBACK_VERSION: &str = "1.0.0";

#[derive(Deserialize)]
struct Manifest {
    package: Option<PackageSection>,
}

#[derive(Deserialize)]
struct PackageSection {
    version: Option<String>,
}

/// Version string of the host package's `Cargo.toml` in the working
/// directory. Falls back to `1.0.0` when the manifest is missing, malformed
/// or carries no literal version.
///
/// Called once per router build; the result is resolved into the options and
/// passed down, never cached process-wide.
pub fn package_version() -> String {
    read_version(Path::new("Cargo.toml")).unwrap_or_else(|| FALLBACK_VERSION.to_string())
}

/// Major component of a version string, e.g. `1.6.7` -> `1`.
pub fn major_version(version: &str) -> &str {
    version.split('.').next().unwrap_or(version)
}

fn read_version(path: &Path) -> Option<String> {
    let raw = fs::read_to_string(path).ok()?;
    let manifest: Manifest = toml::from_str(&raw).ok()?;
    manifest.package?.version
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_the_package_version() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[package]\nname = \"demo\"\nversion = \"2.4.1\"\n").unwrap();

        assert_eq!(read_version(file.path()).as_deref(), Some("2.4.1"));
    }

    #[test]
    fn missing_or_malformed_manifest_falls_back() {
        assert_eq!(read_version(Path::new("does/not/exist.toml")), None);

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not toml at all [").unwrap();
        assert_eq!(read_version(file.path()), None);
    }

    #[test]
    fn inherited_workspace_version_falls_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[package]\nname = \"demo\"\nversion.workspace = true\n").unwrap();

        assert_eq!(read_version(file.path()), None);
    }

    #[test]
    fn extracts_the_major_component() {
        assert_eq!(major_version("1.6.7"), "1");
        assert_eq!(major_version("0.1.0"), "0");
        assert_eq!(major_version("nonsense"), "nonsense");
    }
}
