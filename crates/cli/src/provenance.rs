//! Provenance sidecars.
//!
//! Every file the CLI writes gets a `<stem>.provenance.json` beside it: the code
//! revision, the `fovcheck` version, the command parameters, the files read, and
//! the source line that wrote the artifact.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::ffi::OsStr;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// What went into an artifact. Serializes on its own for `cli report`.
#[derive(Debug, Serialize)]
pub struct Provenance {
    code_rev: String,
    fovcheck_version: &'static str,
    params: Value,
    inputs: Vec<String>,
}

#[derive(Serialize)]
struct Sidecar<'a> {
    #[serde(flatten)]
    record: &'a Provenance,
    callsite: Callsite,
    outputs: [String; 1],
}

#[derive(Serialize)]
struct Callsite {
    file: &'static str,
    line: u32,
}

impl Provenance {
    pub fn new(params: Value) -> Self {
        Self {
            code_rev: current_git_rev(),
            fovcheck_version: fovcheck::VERSION,
            params,
            inputs: Vec::new(),
        }
    }

    /// Record a file the artifact was derived from.
    pub fn input(mut self, path: impl AsRef<Path>) -> Self {
        self.inputs.push(path.as_ref().display().to_string());
        self
    }

    /// Write the sidecar for `artifact`, creating its directory if needed.
    /// The callsite recorded is the caller's.
    #[track_caller]
    pub fn write_next_to(&self, artifact: &Path) -> Result<PathBuf> {
        let caller = Location::caller();
        let sidecar = Sidecar {
            record: self,
            callsite: Callsite {
                file: caller.file(),
                line: caller.line(),
            },
            outputs: [artifact.display().to_string()],
        };
        let path = sidecar_path(artifact);
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        }
        let bytes = serde_json::to_vec_pretty(&sidecar)?;
        fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }
}

/// `dir/labels.parquet` → `dir/labels.provenance.json`.
pub fn sidecar_path(artifact: &Path) -> PathBuf {
    let mut name = artifact
        .file_stem()
        .unwrap_or_else(|| OsStr::new("artifact"))
        .to_os_string();
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

/// `GIT_COMMIT` baked in at build time or set at run time, else the checkout's HEAD.
pub fn current_git_rev() -> String {
    option_env!("GIT_COMMIT")
        .map(str::to_owned)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|rev| !rev.is_empty())
        .or_else(git_head)
        .unwrap_or_else(|| "unknown".to_owned())
}

fn git_head() -> Option<String> {
    let out = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
    if !out.status.success() {
        return None;
    }
    let rev = String::from_utf8(out.stdout).ok()?;
    Some(rev.trim().to_owned()).filter(|r| !r.is_empty())
}
