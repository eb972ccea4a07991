//! Toolchain configuration (ccfix.toml format).
//!
//! The defaults match the Debian mingw-w64 packages and the MSVC/Windows SDK
//! versions the cross setup was built against. A TOML file can override any
//! of them:
//!
//! ```toml
//! [mingw]
//! prefix = "/usr/lib/gcc/x86_64-w64-mingw32/12-posix"
//!
//! [msvc]
//! version = "14.42.34433"
//! sdk_version = "10.0.22621.0"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default MinGW GCC install prefix.
pub const DEFAULT_MINGW_PREFIX: &str = "/usr/lib/gcc/x86_64-w64-mingw32/10-posix";

/// Default MSVC tools version.
pub const DEFAULT_MSVC_VERSION: &str = "14.42.34433";

/// Default Windows 10 SDK version.
pub const DEFAULT_WINDOWS_SDK_VERSION: &str = "10.0.22621.0";

/// Root toolchain configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolchainConfig {
    /// MinGW settings.
    pub mingw: MinGwConfig,

    /// MSVC settings.
    pub msvc: MsvcConfig,
}

/// MinGW settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MinGwConfig {
    /// GCC install prefix containing `include/c++`.
    pub prefix: String,
}

/// MSVC settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MsvcConfig {
    /// Version directory under `VC/Tools/MSVC`.
    pub version: String,

    /// Version directory under `Windows Kits/10/Include`.
    pub sdk_version: String,
}

impl Default for MinGwConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_MINGW_PREFIX.to_string(),
        }
    }
}

impl Default for MsvcConfig {
    fn default() -> Self {
        Self {
            version: DEFAULT_MSVC_VERSION.to_string(),
            sdk_version: DEFAULT_WINDOWS_SDK_VERSION.to_string(),
        }
    }
}

impl ToolchainConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::FixError::io(path, e))?;
        toml::from_str(&content).map_err(|source| crate::FixError::ParseConfig {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
[mingw]
prefix = "/usr/lib/gcc/x86_64-w64-mingw32/12-posix"

[msvc]
sdk_version = "10.0.26100.0"
        "#;

        let config: ToolchainConfig = toml::from_str(toml).unwrap();

        assert_eq!(config.mingw.prefix, "/usr/lib/gcc/x86_64-w64-mingw32/12-posix");
        assert_eq!(config.msvc.version, DEFAULT_MSVC_VERSION);
        assert_eq!(config.msvc.sdk_version, "10.0.26100.0");
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: ToolchainConfig = toml::from_str("").unwrap();
        assert_eq!(config, ToolchainConfig::default());
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(toml::from_str::<ToolchainConfig>("[clang]\nprefix = \"/x\"\n").is_err());
        assert!(toml::from_str::<ToolchainConfig>("[msvc]\nroot = \"/x\"\n").is_err());
    }

    #[test]
    fn test_from_file_errors() {
        let dir = tempfile::TempDir::new().expect("Failed to create temp dir");

        let missing = ToolchainConfig::from_file(&dir.path().join("nope.toml")).unwrap_err();
        assert!(missing.is_io());

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "[mingw\n").unwrap();
        let err = ToolchainConfig::from_file(&bad).unwrap_err();
        assert!(matches!(err, crate::FixError::ParseConfig { .. }));
    }
}
