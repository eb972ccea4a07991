//! The compile_commands.json fix pipeline.
//!
//! Reads `<build>/compile_commands.json`, expands response files, appends
//! toolchain include flags, then writes the result over the input and the
//! untouched original text to `compile_commands_fixed.json`. Nothing is
//! written until every entry has been transformed.

use crate::compile_commands::{CompileCommands, CompileEntry};
use crate::config::ToolchainConfig;
use crate::response_file;
use crate::toolchain::Toolchain;
use std::path::{Path, PathBuf};

/// Name of the compilation database inside the build directory.
pub const COMPILE_COMMANDS: &str = "compile_commands.json";

/// Name of the file that receives the original, pre-fix database text.
pub const COMPILE_COMMANDS_BACKUP: &str = "compile_commands_fixed.json";

/// Summary of a fix run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixReport {
    /// Rewritten database path.
    pub output: PathBuf,
    /// Path holding the original text.
    pub backup: PathBuf,
    /// Number of entries processed.
    pub entries: usize,
    /// Response-file references expanded across all entries.
    pub response_files: usize,
    /// Entries that received MinGW flags.
    pub mingw_entries: usize,
    /// Entries that received MSVC flags.
    pub msvc_entries: usize,
}

/// Rewrites compilation databases for clangd.
#[derive(Debug, Clone, Default)]
pub struct Fixer {
    config: ToolchainConfig,
}

impl Fixer {
    /// Create a fixer with the built-in toolchain constants.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fixer with overridden toolchain constants.
    pub fn with_config(config: ToolchainConfig) -> Self {
        Self { config }
    }

    /// Fix `<build_dir>/compile_commands.json` in place.
    pub fn fix(&self, build_dir: &Path) -> crate::Result<FixReport> {
        let input = build_dir.join(COMPILE_COMMANDS);
        let backup = build_dir.join(COMPILE_COMMANDS_BACKUP);

        log::info!("reading {}", input.display());
        let (mut commands, original) = CompileCommands::from_file(&input)?;

        let mut report = FixReport {
            output: input.clone(),
            backup: backup.clone(),
            entries: commands.len(),
            ..FixReport::default()
        };

        for entry in commands.entries_mut() {
            let toolchain = self.fix_entry(entry, &mut report)?;
            match toolchain {
                Some(Toolchain::MinGw) => report.mingw_entries += 1,
                Some(Toolchain::Msvc) => report.msvc_entries += 1,
                None => {}
            }
        }

        log::info!("writing {}", input.display());
        commands.write_to(&input)?;
        std::fs::write(&backup, &original).map_err(|e| crate::FixError::io(&backup, e))?;

        Ok(report)
    }

    /// Rewrite one entry's command and return the toolchain it matched.
    pub fn fix_entry(
        &self,
        entry: &mut CompileEntry,
        report: &mut FixReport,
    ) -> crate::Result<Option<Toolchain>> {
        let original = entry.command();
        let expansion = response_file::expand(original, entry.directory())?;
        report.response_files += expansion.files.len();

        let toolchain = Toolchain::detect(original);
        let command = match toolchain {
            Some(toolchain) => {
                log::debug!(
                    "adding {} includes for {}",
                    toolchain.marker(),
                    entry.file().unwrap_or(entry.directory())
                );
                toolchain.augment(&expansion.command, &self.config)
            }
            None => expansion.command,
        };

        entry.set_command(command);
        Ok(toolchain)
    }
}

/// Fix `<build_dir>/compile_commands.json` with the built-in toolchain constants.
pub fn fix(build_dir: &Path) -> crate::Result<FixReport> {
    Fixer::new().fix(build_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fix_entry_plain() {
        let mut entry = CompileEntry::new("/build", "g++ -c main.cc");
        let mut report = FixReport::default();

        let toolchain = Fixer::new().fix_entry(&mut entry, &mut report).unwrap();

        assert_eq!(toolchain, None);
        assert_eq!(entry.command(), "g++ -c main.cc");
        assert_eq!(report.response_files, 0);
    }

    #[test]
    fn test_fix_entry_uses_config() {
        let mut config = ToolchainConfig::default();
        config.mingw.prefix = "/opt/mingw".to_string();
        let mut entry = CompileEntry::new("/build", "x86_64-w64-mingw32-g++ -c main.cc");
        let mut report = FixReport::default();

        let toolchain = Fixer::with_config(config)
            .fix_entry(&mut entry, &mut report)
            .unwrap();

        assert_eq!(toolchain, Some(Toolchain::MinGw));
        assert_eq!(
            entry.command(),
            "x86_64-w64-mingw32-g++ -c main.cc -I/opt/mingw/include/c++ \
             -I/opt/mingw/include/c++/x86_64-w64-mingw32 -D_GLIBCXX_HAS_GTHREADS"
        );
    }

    #[test]
    fn test_marker_only_in_response_file_is_ignored() {
        let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        std::fs::write(dir.path().join("flags.rsp"), "-I/opt/mingw/include").unwrap();
        let mut entry = CompileEntry::new(dir.path().to_str().unwrap(), "g++ @flags.rsp -c a.cc");
        let mut report = FixReport::default();

        let toolchain = Fixer::new().fix_entry(&mut entry, &mut report).unwrap();

        assert_eq!(toolchain, None);
        assert_eq!(entry.command(), "g++ -I/opt/mingw/include -c a.cc");
        assert_eq!(report.response_files, 1);
    }
}
