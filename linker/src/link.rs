/**
Linker integration - calls clang to produce executables

This module handles:
- Building the runtime static library with the entry shim enabled
- Mapping the program's entry procedure onto the `Main` symbol the shim calls
- Invoking clang on the IR module and the runtime
*/
use super::entry::validate_entry_name;
use super::{LinkError, LinkResult};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Entry symbol the runtime shim calls
pub const SHIM_ENTRY_SYMBOL: &str = "Main";

/// Where `cargo build --release` leaves the runtime archive
pub const DEFAULT_RUNTIME_LIB: &str = "target/release/libada_runtime.a";

/// Everything needed for one link
#[derive(Debug, Clone)]
pub struct LinkOptions {
    pub ir_file: PathBuf,
    pub runtime_lib: PathBuf,
    pub output: PathBuf,
    pub entry: String,
    pub cc: String,
}

/// Validate a file path to prevent command injection
///
/// Rejects paths that:
/// - Start with '-' (would be interpreted as flags)
/// - Contain '..' (directory traversal)
pub fn validate_path(path: &Path) -> LinkResult<()> {
    let text = path.to_string_lossy();
    if text.starts_with('-') {
        return Err(LinkError::InvalidPath {
            path: text.into_owned(),
            reason: "cannot start with '-'",
        });
    }

    for component in path.components() {
        if component.as_os_str() == ".." {
            return Err(LinkError::InvalidPath {
                path: text.into_owned(),
                reason: "cannot contain '..'",
            });
        }
    }

    Ok(())
}

/// Linker arguments that make `Main` resolve to `entry`
///
/// Empty when the program already defines `Main`.
pub fn entry_alias_args(entry: &str, target_os: &str) -> Vec<String> {
    if entry == SHIM_ENTRY_SYMBOL {
        return Vec::new();
    }
    match target_os {
        "macos" | "ios" => vec![format!("-Wl,-alias,_{entry},_{SHIM_ENTRY_SYMBOL}")],
        _ => vec![format!("-Wl,--defsym={SHIM_ENTRY_SYMBOL}={entry}")],
    }
}

/// Full clang argument list for `options` on `target_os`
pub fn clang_args(options: &LinkOptions, target_os: &str) -> Vec<String> {
    let mut args = vec![
        options.ir_file.display().to_string(),
        options.runtime_lib.display().to_string(),
        "-o".to_string(),
        options.output.display().to_string(),
        "-O2".to_string(),
        "-Wno-override-module".to_string(), // Suppress target triple override warning
    ];
    args.extend(entry_alias_args(&options.entry, target_os));
    if target_os == "linux" {
        // Rust std inside the runtime archive needs these at link time
        args.extend(["-lpthread", "-ldl", "-lm"].map(String::from));
    }
    args
}

/// Link an LLVM IR module with the runtime to produce an executable
///
/// # Example
/// ```no_run
/// use ada_link::link::{LinkOptions, link_program};
///
/// let options = LinkOptions {
///     ir_file: "hello.ll".into(),
///     runtime_lib: "target/release/libada_runtime.a".into(),
///     output: "hello".into(),
///     entry: "Hello".into(),
///     cc: "clang".into(),
/// };
/// link_program(&options).unwrap();
/// ```
pub fn link_program(options: &LinkOptions) -> LinkResult<()> {
    validate_path(&options.ir_file)?;
    validate_path(&options.runtime_lib)?;
    validate_path(&options.output)?;
    validate_entry_name(&options.entry)?;

    let status = Command::new(&options.cc)
        .args(clang_args(options, std::env::consts::OS))
        .status()
        .map_err(|e| LinkError::ToolFailed {
            tool: options.cc.clone(),
            message: format!("could not execute: {}", e),
        })?;

    if !status.success() {
        return Err(LinkError::ToolFailed {
            tool: options.cc.clone(),
            message: format!("exited with status: {}", status),
        });
    }

    Ok(())
}

/// Build the runtime archive with the entry shim compiled in
pub fn build_runtime() -> LinkResult<PathBuf> {
    let status = Command::new("cargo")
        .args([
            "build",
            "--release",
            "-p",
            "ada-runtime",
            "--features",
            "entry-shim",
        ])
        .status()
        .map_err(|e| LinkError::ToolFailed {
            tool: "cargo".to_string(),
            message: format!("could not execute: {}", e),
        })?;

    if !status.success() {
        return Err(LinkError::ToolFailed {
            tool: "cargo".to_string(),
            message: format!("runtime build exited with status: {}", status),
        });
    }

    Ok(PathBuf::from(DEFAULT_RUNTIME_LIB))
}

/// Verify that the C toolchain is available
pub fn check_cc(cc: &str) -> LinkResult<String> {
    let output = Command::new(cc)
        .arg("--version")
        .output()
        .map_err(|e| LinkError::ToolFailed {
            tool: cc.to_string(),
            message: format!("not found. Please install LLVM/clang: {}", e),
        })?;

    let version = String::from_utf8_lossy(&output.stdout);
    Ok(version.lines().next().unwrap_or("unknown").to_string())
}
