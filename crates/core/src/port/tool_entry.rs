// Tool Entry Point Port
// Boundary to the analyzed lint tool. The tool is an opaque collaborator:
// its parsing and domain rules are not this crate's business. It only gets
// an explicit context instead of process globals.

use std::io::Write;
use std::path::PathBuf;

use crate::port::FileStore;

/// Failure the tool reports when it neither completes nor requests exit.
pub type ToolError = Box<dyn std::error::Error + Send + Sync>;

/// Unwind payload raised by [`ToolContext::exit`]. Crate-private: only the
/// adapter's interception layer may consume it.
pub(crate) struct ExitSignal {
    pub(crate) code: i32,
}

/// Everything the tool may touch during one invocation: the argv list it
/// was "launched" with, file access, and the two output streams. Replaces
/// the process-global bindings a real command-line start would give it.
pub struct ToolContext<'a> {
    argv: Vec<String>,
    fs: &'a dyn FileStore,
    stdout: &'a mut dyn Write,
    stderr: &'a mut dyn Write,
}

impl<'a> ToolContext<'a> {
    pub fn new(
        argv: Vec<String>,
        fs: &'a dyn FileStore,
        stdout: &'a mut dyn Write,
        stderr: &'a mut dyn Write,
    ) -> Self {
        Self {
            argv,
            fs,
            stdout,
            stderr,
        }
    }

    /// The effective argument list: `[program_path, input_path, flags...]`.
    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    /// File access for this invocation.
    pub fn fs(&self) -> &dyn FileStore {
        self.fs
    }

    /// The tool's standard output stream.
    pub fn stdout(&mut self) -> &mut dyn Write {
        &mut *self.stdout
    }

    /// The tool's standard error stream.
    pub fn stderr(&mut self) -> &mut dyn Write {
        &mut *self.stderr
    }

    /// Request termination of the whole process with `code`. Never returns.
    /// The adapter intercepts the request and unwinds only the current
    /// invocation; the calling process keeps running.
    pub fn exit(&self, code: i32) -> ! {
        std::panic::panic_any(ExitSignal { code })
    }
}

/// Tool Entry Point trait
///
/// Implementations run their whole command-line entry logic against the
/// context, exactly as if launched fresh with `ctx.argv()`.
pub trait ToolEntryPoint: Send + Sync {
    /// Identity the tool expects as argv[0]. The simulated claims file is
    /// placed beside it.
    fn program_path(&self) -> PathBuf {
        std::env::current_exe().unwrap_or_else(|_| PathBuf::from("claims-tool"))
    }

    /// Run the entry point to completion.
    ///
    /// # Errors
    /// Any `Err` is treated as an unexpected failure of the tool itself and
    /// passed through to the adapter's caller unchanged.
    fn run(&self, ctx: &mut ToolContext<'_>) -> Result<(), ToolError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::path::Path;
    use std::sync::Mutex;

    /// How a scripted tool ends after writing its fixed output.
    #[derive(Debug, Clone)]
    pub enum ScriptedEnd {
        /// Return normally
        Return,
        /// Request process termination with this code
        Exit(i32),
        /// Fail with an error (unexpected failure path)
        Fail(String),
        /// Panic (defect in the tool; must cross the adapter unchanged)
        Panic(String),
    }

    /// Tool that writes fixed text to both streams, then ends as scripted.
    pub struct ScriptedTool {
        stdout_text: String,
        stderr_text: String,
        end: ScriptedEnd,
        call_count: Mutex<usize>,
    }

    impl ScriptedTool {
        pub fn new(
            stdout_text: impl Into<String>,
            stderr_text: impl Into<String>,
            end: ScriptedEnd,
        ) -> Self {
            Self {
                stdout_text: stdout_text.into(),
                stderr_text: stderr_text.into(),
                end,
                call_count: Mutex::new(0),
            }
        }

        pub fn completing(stdout_text: impl Into<String>, stderr_text: impl Into<String>) -> Self {
            Self::new(stdout_text, stderr_text, ScriptedEnd::Return)
        }

        pub fn exiting(
            code: i32,
            stdout_text: impl Into<String>,
            stderr_text: impl Into<String>,
        ) -> Self {
            Self::new(stdout_text, stderr_text, ScriptedEnd::Exit(code))
        }

        pub fn failing(message: impl Into<String>) -> Self {
            Self::new("", "", ScriptedEnd::Fail(message.into()))
        }

        pub fn panicking(message: impl Into<String>) -> Self {
            Self::new("", "", ScriptedEnd::Panic(message.into()))
        }

        pub fn call_count(&self) -> usize {
            *self.call_count.lock().unwrap()
        }
    }

    impl ToolEntryPoint for ScriptedTool {
        fn program_path(&self) -> PathBuf {
            // Deterministic location so tests can predict the claims path
            PathBuf::from("/opt/claimrun/scripted-tool")
        }

        fn run(&self, ctx: &mut ToolContext<'_>) -> Result<(), ToolError> {
            *self.call_count.lock().unwrap() += 1;

            write!(ctx.stdout(), "{}", self.stdout_text)?;
            write!(ctx.stderr(), "{}", self.stderr_text)?;

            match &self.end {
                ScriptedEnd::Return => Ok(()),
                ScriptedEnd::Exit(code) => ctx.exit(*code),
                ScriptedEnd::Fail(message) => Err(message.clone().into()),
                ScriptedEnd::Panic(message) => panic!("{}", message),
            }
        }
    }

    /// Tool that echoes its argv and the claims file it was pointed at.
    /// Exercises argv order, existence checks and read routing end to end.
    pub struct EchoTool;

    impl ToolEntryPoint for EchoTool {
        fn program_path(&self) -> PathBuf {
            PathBuf::from("/opt/claimrun/echo-tool")
        }

        fn run(&self, ctx: &mut ToolContext<'_>) -> Result<(), ToolError> {
            let argv = ctx.argv().to_vec();
            writeln!(ctx.stdout(), "argv: {}", argv.join(" "))?;

            if let Some(input) = argv.get(1) {
                let path = Path::new(input);
                let exists = ctx.fs().is_file(path);
                writeln!(ctx.stdout(), "exists: {}", exists)?;
                let text = ctx.fs().read_to_string(path)?;
                writeln!(ctx.stdout(), "claims: {}", text)?;
            }

            Ok(())
        }
    }
}
