/**
Entry procedure discovery

The code generator emits the main procedure as a parameterless
`define void @Name()` in the IR module. Runtime builtins never appear as
definitions, but they are filtered anyway in case a module inlines one.
*/
use super::{LinkError, LinkResult};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Void builtins provided by the runtime
const RUNTIME_PROCEDURES: &[&str] = &[
    "Put_Line",
    "Put",
    "Put_Integer",
    "Put_Real",
    "New_Line",
    "Get_Line",
    "Get",
    "Get_Real",
    "Debug_Print",
    "Debug_Print_Int",
    "Debug_Print_Real",
];

// Linkage and visibility keywords may sit between `define` and the type.
static DEFINE_VOID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*define\s+(?:[a-z_]+\s+)*void\s+@([A-Z][A-Za-z0-9_]*)\(\s*\)")
        .expect("entry pattern is valid")
});

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("identifier pattern is valid"));

/// First defined procedure that can serve as the program entry
pub fn find_entry_procedure(ir: &str) -> Option<&str> {
    DEFINE_VOID
        .captures_iter(ir)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .find(|name| !RUNTIME_PROCEDURES.contains(name))
}

/// Read an IR file and find its entry procedure
pub fn entry_procedure_in_file(path: &Path) -> LinkResult<String> {
    let ir = fs::read_to_string(path).map_err(|source| LinkError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    find_entry_procedure(&ir)
        .map(str::to_string)
        .ok_or_else(|| LinkError::NoEntryProcedure {
            path: path.to_path_buf(),
        })
}

/// Reject names that are not plain identifiers before they reach the linker
pub fn validate_entry_name(name: &str) -> LinkResult<()> {
    if IDENTIFIER.is_match(name) {
        Ok(())
    } else {
        Err(LinkError::InvalidEntryName(name.to_string()))
    }
}
