//! Toolchain detection and the system include flags each toolchain needs.
//!
//! clangd does not know where a cross toolchain keeps its C++ and SDK
//! headers, so entries compiled by MinGW or MSVC get those directories
//! appended explicitly.

use crate::config::ToolchainConfig;

/// Marker in the compiler path that identifies the MSVC install root.
pub const MSVC_CL_ANCHOR: &str = "/bin/x64/cl ";

/// Windows SDK include subdirectories, in the order they are appended.
pub const WINDOWS_SDK_SUBDIRS: [&str; 3] = ["ucrt", "um", "shared"];

/// A toolchain that needs extra include flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Toolchain {
    /// GCC cross compiler for x86_64-w64-mingw32.
    MinGw,
    /// Microsoft cl.exe driven through a mounted Windows install.
    Msvc,
}

impl Toolchain {
    /// All known toolchains, in detection order.
    pub const ALL: [Toolchain; 2] = [Toolchain::MinGw, Toolchain::Msvc];

    /// Substring of the compile command that selects this toolchain.
    pub fn marker(self) -> &'static str {
        match self {
            Toolchain::MinGw => "mingw",
            Toolchain::Msvc => "msvc",
        }
    }

    /// Detect the toolchain of an unmodified compile command.
    ///
    /// The first toolchain whose marker appears in the command wins.
    pub fn detect(command: &str) -> Option<Toolchain> {
        Self::ALL
            .into_iter()
            .find(|toolchain| command.contains(toolchain.marker()))
    }

    /// Flags to append to `command` (already response-file expanded).
    pub fn extra_flags(self, command: &str, config: &ToolchainConfig) -> Vec<String> {
        match self {
            Toolchain::MinGw => {
                let prefix = &config.mingw.prefix;
                vec![
                    format!("-I{prefix}/include/c++"),
                    format!("-I{prefix}/include/c++/x86_64-w64-mingw32"),
                    "-D_GLIBCXX_HAS_GTHREADS".to_string(),
                ]
            }
            Toolchain::Msvc => {
                let root = msvc_root(command);
                let version = &config.msvc.version;
                let sdk = &config.msvc.sdk_version;

                let mut flags = vec![format!("-external:I{root}/VC/Tools/MSVC/{version}/include")];
                flags.extend(WINDOWS_SDK_SUBDIRS.iter().map(|subdir| {
                    format!("-external:I{root}/Windows\\ Kits/10/Include/{sdk}/{subdir}")
                }));
                flags
            }
        }
    }

    /// Append this toolchain's flags to `command`, space separated.
    pub fn augment(self, command: &str, config: &ToolchainConfig) -> String {
        let mut out = command.to_string();
        for flag in self.extra_flags(command, config) {
            out.push(' ');
            out.push_str(&flag);
        }
        out
    }
}

/// Everything before `/bin/x64/cl ` in the command.
///
/// Without the anchor the command minus its last character is used, which
/// is what a `find` returning -1 slices to.
pub fn msvc_root(command: &str) -> &str {
    match command.find(MSVC_CL_ANCHOR) {
        Some(ix) => &command[..ix],
        None => {
            log::warn!(
                "msvc command has no `{}` anchor, include root will be wrong: {}",
                MSVC_CL_ANCHOR.trim_end(),
                command
            );
            match command.char_indices().next_back() {
                Some((ix, _)) => &command[..ix],
                None => command,
            }
        }
    }
}
