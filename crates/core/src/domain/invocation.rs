// Invocation Domain Model
// Everything here lives for exactly one call to the adapter.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Name of the simulated claims file, placed beside the tool's program path.
pub const CLAIMS_FILE_NAME: &str = "_claims.txt";

/// Suffix of the companion file the tool may try to write after analysis.
pub const MARKED_SUFFIX: &str = ".marked";

/// One invocation of the lint tool: the claims text it should see as its
/// input file, plus extra command-line tokens forwarded verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvocationRequest {
    pub claims_text: String,

    #[serde(default)]
    pub extra_args: Vec<String>,
}

impl InvocationRequest {
    pub fn new(claims_text: impl Into<String>) -> Self {
        Self {
            claims_text: claims_text.into(),
            extra_args: Vec::new(),
        }
    }

    pub fn with_extra_args(mut self, extra_args: Vec<String>) -> Self {
        self.extra_args = extra_args;
        self
    }

    /// Effective argv the tool is "launched" with:
    /// `[program_path, claims_path, extra_args...]`, in that order.
    pub fn argv(&self, program_path: &Path, claims_path: &Path) -> Vec<String> {
        let mut argv = Vec::with_capacity(2 + self.extra_args.len());
        argv.push(program_path.to_string_lossy().into_owned());
        argv.push(claims_path.to_string_lossy().into_owned());
        argv.extend(self.extra_args.iter().cloned());
        argv
    }
}

/// The two logical path identifiers of one invocation. Never backed by real
/// files; both are normalized to absolute form so the tool's own path
/// handling cannot escape the interception.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatedPaths {
    claims_path: PathBuf,
    marked_path: PathBuf,
}

impl SimulatedPaths {
    /// Claims file placed beside the tool's program path, the location a
    /// file-oriented tool expects its input next to itself.
    pub fn beside(program_path: &Path) -> Self {
        let dir = program_path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_claims_path(dir.join(CLAIMS_FILE_NAME))
    }

    pub fn from_claims_path(claims_path: impl Into<PathBuf>) -> Self {
        let claims_path = normalize(&claims_path.into());
        let mut marked = claims_path.clone().into_os_string();
        marked.push(MARKED_SUFFIX);
        Self {
            claims_path,
            marked_path: PathBuf::from(marked),
        }
    }

    pub fn claims_path(&self) -> &Path {
        &self.claims_path
    }

    pub fn marked_path(&self) -> &Path {
        &self.marked_path
    }
}

/// Normalize a path for interception comparisons. Falls back to the path as
/// given when the platform cannot produce an absolute form.
pub(crate) fn normalize(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// The two output streams captured during one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedOutput {
    pub stdout: String,
    pub stderr: String,
}

impl CapturedOutput {
    pub fn from_buffers(stdout: Vec<u8>, stderr: Vec<u8>) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&stdout).into_owned(),
            stderr: String::from_utf8_lossy(&stderr).into_owned(),
        }
    }

    /// Stdout content immediately followed by stderr content, the fixed
    /// order of the returned string.
    pub fn combined(&self) -> String {
        let mut combined = String::with_capacity(self.stdout.len() + self.stderr.len());
        combined.push_str(&self.stdout);
        combined.push_str(&self.stderr);
        combined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argv_keeps_extra_args_after_claims_path() {
        let request =
            InvocationRequest::new("claim 1.").with_extra_args(vec!["--some-flag".to_string()]);
        let argv = request.argv(Path::new("/opt/tool/lint"), Path::new("/opt/tool/_claims.txt"));

        assert_eq!(
            argv,
            vec![
                "/opt/tool/lint".to_string(),
                "/opt/tool/_claims.txt".to_string(),
                "--some-flag".to_string(),
            ]
        );
    }

    #[test]
    fn simulated_paths_are_siblings_of_the_program() {
        let paths = SimulatedPaths::beside(Path::new("/opt/tool/lint"));

        assert_eq!(paths.claims_path(), Path::new("/opt/tool/_claims.txt"));
        assert_eq!(
            paths.marked_path(),
            Path::new("/opt/tool/_claims.txt.marked")
        );
    }

    #[test]
    fn relative_claims_path_is_normalized_to_absolute() {
        let paths = SimulatedPaths::from_claims_path("relative/_claims.txt");

        assert!(paths.claims_path().is_absolute());
        assert!(paths
            .marked_path()
            .to_string_lossy()
            .ends_with("_claims.txt.marked"));
    }

    #[test]
    fn combined_output_is_stdout_then_stderr() {
        let output = CapturedOutput {
            stdout: "analysis\n".to_string(),
            stderr: "warning\n".to_string(),
        };

        assert_eq!(output.combined(), "analysis\nwarning\n");
    }

    #[test]
    fn combined_output_of_empty_buffers_is_empty() {
        let output = CapturedOutput::from_buffers(Vec::new(), Vec::new());

        assert_eq!(output.combined(), "");
    }
}
