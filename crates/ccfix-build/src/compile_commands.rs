//! compile_commands.json model.
//!
//! CMake and other generators write a compile_commands.json file that
//! contains the exact compilation command for each source file. Entries
//! are kept as their original JSON objects so that fields this crate does
//! not know about survive a rewrite unchanged and in their original order.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};

/// A single entry from compile_commands.json.
///
/// `directory` and `command` are required to be strings; every other key
/// (`file`, `output`, `arguments`, ...) is passed through verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct CompileEntry {
    fields: Map<String, Value>,
}

/// Why a JSON object was rejected as a compile entry.
#[derive(Debug)]
pub struct InvalidEntry(&'static str);

impl fmt::Display for InvalidEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "compile entry is missing string field `{}`", self.0)
    }
}

impl TryFrom<Map<String, Value>> for CompileEntry {
    type Error = InvalidEntry;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        for key in ["directory", "command"] {
            if !matches!(fields.get(key), Some(Value::String(_))) {
                return Err(InvalidEntry(key));
            }
        }
        Ok(Self { fields })
    }
}

impl From<CompileEntry> for Map<String, Value> {
    fn from(entry: CompileEntry) -> Self {
        entry.fields
    }
}

impl CompileEntry {
    /// Create an entry with just a working directory and a command.
    pub fn new(directory: impl Into<String>, command: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("directory".to_string(), Value::String(directory.into()));
        fields.insert("command".to_string(), Value::String(command.into()));
        Self { fields }
    }

    /// The working directory for compilation.
    pub fn directory(&self) -> &str {
        self.string_field("directory")
    }

    /// The full compilation command line.
    pub fn command(&self) -> &str {
        self.string_field("command")
    }

    /// Replace the command line, keeping the key in its original position.
    pub fn set_command(&mut self, command: String) {
        self.fields.insert("command".to_string(), Value::String(command));
    }

    /// Look up a passthrough field by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// The source file, if the entry names one.
    pub fn file(&self) -> Option<&str> {
        self.fields.get("file").and_then(Value::as_str)
    }

    /// Keys of the entry in their original order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    fn string_field(&self, key: &str) -> &str {
        // Both keys are validated on construction and only ever replaced
        // with strings.
        self.fields.get(key).and_then(Value::as_str).unwrap_or_default()
    }
}

/// Collection of compile commands (from compile_commands.json).
#[derive(Debug, Clone, PartialEq)]
pub struct CompileCommands {
    entries: Vec<CompileEntry>,
}

impl CompileCommands {
    /// Load compile commands from a JSON file, returning the raw text with them.
    pub fn from_file(path: &Path) -> crate::Result<(Self, String)> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::FixError::io(path, e))?;
        let commands = Self::parse(&content, path)?;
        Ok((commands, content))
    }

    /// Parse compile commands from JSON text; `path` is used for error reports.
    pub fn parse(json: &str, path: &Path) -> crate::Result<Self> {
        let entries: Vec<CompileEntry> =
            serde_json::from_str(json).map_err(|source| crate::FixError::Parse {
                path: PathBuf::from(path),
                source,
            })?;
        Ok(Self { entries })
    }

    /// Get all entries.
    pub fn entries(&self) -> &[CompileEntry] {
        &self.entries
    }

    /// Mutable access to the entries, in file order.
    pub fn entries_mut(&mut self) -> &mut [CompileEntry] {
        &mut self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the database has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize with 4-space indentation and ASCII-only output.
    pub fn to_json_string(&self) -> crate::Result<String> {
        crate::json::to_string_pretty_ascii(&self.entries)
    }

    /// Write the serialized database to `path`, replacing its contents.
    pub fn write_to(&self, path: &Path) -> crate::Result<()> {
        let json = self.to_json_string()?;
        std::fs::write(path, json).map_err(|e| crate::FixError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> crate::Result<CompileCommands> {
        CompileCommands::parse(json, Path::new("compile_commands.json"))
    }

    #[test]
    fn test_parse_compile_commands() {
        let json = r#"[
            {
                "directory": "/home/user/project/build",
                "command": "g++ -I/usr/include -DDEBUG=1 -std=c++23 -c main.cc",
                "file": "/home/user/project/src/main.cc"
            },
            {
                "directory": "/home/user/project/build",
                "command": "g++ -DNDEBUG -c utils.cc",
                "file": "/home/user/project/src/utils.cc",
                "output": "utils.o"
            }
        ]"#;

        let cmds = parse(json).unwrap();

        assert_eq!(cmds.len(), 2);
        assert_eq!(cmds.entries()[0].directory(), "/home/user/project/build");
        assert_eq!(cmds.entries()[1].command(), "g++ -DNDEBUG -c utils.cc");
        assert_eq!(
            cmds.entries()[1].get("output"),
            Some(&Value::String("utils.o".to_string()))
        );
    }

    #[test]
    fn test_key_order_preserved() {
        let json = r#"[{"file": "a.c", "zeta": 1, "command": "cc a.c", "directory": "/b"}]"#;
        let mut cmds = parse(json).unwrap();
        cmds.entries_mut()[0].set_command("cc -O2 a.c".to_string());

        let keys: Vec<&str> = cmds.entries()[0].keys().collect();
        assert_eq!(keys, vec!["file", "zeta", "command", "directory"]);
        assert_eq!(cmds.entries()[0].command(), "cc -O2 a.c");
    }

    #[test]
    fn test_missing_command_is_parse_error() {
        let err = parse(r#"[{"directory": "/b", "arguments": ["cc"]}]"#).unwrap_err();
        assert!(err.is_parse());
        assert!(err.to_string().contains("`command`"));
    }

    #[test]
    fn test_not_an_array_is_parse_error() {
        assert!(parse(r#"{"directory": "/b", "command": "cc"}"#)
            .unwrap_err()
            .is_parse());
        assert!(parse("[{").unwrap_err().is_parse());
    }

    #[test]
    fn test_large_numbers_kept_exact() {
        let json = r#"[{"directory": "/b", "command": "cc", "n": 100000000000000000000}]"#;
        let cmds = parse(json).unwrap();

        let out = cmds.to_json_string().unwrap();

        assert!(out.contains("\"n\": 100000000000000000000"));
    }

    #[test]
    fn test_from_file_returns_raw_text() {
        let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("compile_commands.json");
        let text = "[ {\"directory\": \"/b\", \"command\": \"cc\"} ]\n";
        std::fs::write(&path, text).unwrap();

        let (cmds, raw) = CompileCommands::from_file(&path).unwrap();

        assert_eq!(raw, text);
        assert_eq!(cmds.len(), 1);
        assert!(CompileCommands::from_file(&dir.path().join("missing.json"))
            .unwrap_err()
            .is_io());
    }
}
