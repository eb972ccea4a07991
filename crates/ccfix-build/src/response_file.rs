//! Inline expansion of `@file` response-file references.

use regex::Regex;
use std::path::PathBuf;
use std::sync::OnceLock;

fn token_regex() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| Regex::new(r"@\S+").expect("response file pattern is valid"))
}

/// All `@file` tokens in `command`, left to right, duplicates included.
pub fn find_tokens(command: &str) -> Vec<&str> {
    token_regex()
        .find_iter(command)
        .map(|m| m.as_str())
        .collect()
}

/// Path a token refers to, relative to the entry's working directory.
pub fn resolve(directory: &str, token: &str) -> PathBuf {
    let name = token.strip_prefix('@').unwrap_or(token);
    PathBuf::from(format!("{directory}/{name}"))
}

/// Result of expanding one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    /// The command with every token replaced by its file contents.
    pub command: String,
    /// Response files read, in token order.
    pub files: Vec<PathBuf>,
}

/// Replace every `@file` token in `command` with the trimmed contents of
/// `<directory>/<file>`.
///
/// Tokens are collected from the unmodified command before any replacement,
/// then each one replaces all of its literal occurrences in turn.
pub fn expand(command: &str, directory: &str) -> crate::Result<Expansion> {
    let mut expanded = command.to_string();
    let mut files = Vec::new();

    for token in find_tokens(command) {
        let path = resolve(directory, token);
        let content =
            std::fs::read_to_string(&path).map_err(|e| crate::FixError::io(&path, e))?;
        log::debug!("expanding {} from {}", token, path.display());
        expanded = expanded.replace(token, content.trim());
        files.push(path);
    }

    Ok(Expansion {
        command: expanded,
        files,
    })
}
