//! Synchronous shell-out to the external stylesheet compiler.

use std::fs::File;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::BuildError;

/// Invokes `carto` (or a substitute) on a manifest, capturing its stdout
/// into a destination file.
///
/// The invocation is `<command> -n -l <manifest>`. One invocation per
/// output variant; a failure is fatal for the build, there are no retries.
#[derive(Debug, Clone)]
pub struct CartoCompiler {
    command: String,
}

impl CartoCompiler {
    /// Creates an invoker for the given compiler command name or path.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// The configured compiler command.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Compiles `manifest`, writing the compiler's stdout to `output`.
    ///
    /// Blocks until the compiler exits. The output file is created (or
    /// truncated) before the compiler starts; on failure it is left behind
    /// in whatever state the compiler produced, matching the behavior of a
    /// plain shell redirection.
    pub fn compile(&self, manifest: &Path, output: &Path) -> Result<(), BuildError> {
        let stdout = File::create(output).map_err(|e| BuildError::Io {
            path: output.to_path_buf(),
            source: e,
        })?;

        let child = Command::new(&self.command)
            .arg("-n")
            .arg("-l")
            .arg(manifest)
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| BuildError::CompilerSpawn {
                command: self.command.clone(),
                source: e,
            })?;

        let result = child.wait_with_output().map_err(|e| BuildError::CompilerSpawn {
            command: self.command.clone(),
            source: e,
        })?;

        if !result.status.success() {
            return Err(BuildError::CompilerFailed {
                manifest: manifest.to_path_buf(),
                status: result.status.to_string(),
                stderr: BuildError::format_stderr(&result.stderr),
            });
        }
        Ok(())
    }
}
