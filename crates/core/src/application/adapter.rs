// Execution Adapter
// Presents an in-memory string as a readable file to an unmodified
// file-oriented lint tool, runs the tool's full entry point synchronously,
// and returns whatever the tool would have printed. No real file is
// created, read or modified through the simulated paths.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info};
use uuid::Uuid;

use crate::application::exit_guard::{run_intercepted, ExitHookGuard, InterceptOutcome};
use crate::application::sim_store::SimulatedFileStore;
use crate::domain::{CapturedOutput, InvocationRequest, RunReport, SimulatedPaths, Termination};
use crate::error::{AdapterError, Result};
use crate::port::{Clock, FileStore, ToolContext, ToolEntryPoint};

// The panic-hook filter is process-wide state, so at most one invocation
// may be in flight per process. Every call serializes here.
static RUN_LOCK: Mutex<()> = Mutex::new(());

/// Runs the lint tool against in-memory claims text.
pub struct ExecutionAdapter {
    tool: Arc<dyn ToolEntryPoint>,
    file_store: Arc<dyn FileStore>,
    clock: Arc<dyn Clock>,
}

impl ExecutionAdapter {
    /// Create a new adapter
    ///
    /// # Arguments
    /// * `tool` - The entry point of the tool being wrapped
    /// * `file_store` - Fallback store for every path the tool opens that
    ///   is not one of the simulated ones
    /// * `clock` - Clock for duration tracking (injected for determinism)
    pub fn new(
        tool: Arc<dyn ToolEntryPoint>,
        file_store: Arc<dyn FileStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            tool,
            file_store,
            clock,
        }
    }

    /// Run the tool against `claims_text` with `extra_args` forwarded after
    /// the simulated input path, and return everything it printed: captured
    /// stdout immediately followed by captured stderr.
    ///
    /// A termination request from the tool is ordinary completion here; the
    /// diagnostics it printed on the way out are part of the returned
    /// string. Blocks until the tool finishes.
    pub fn run(&self, claims_text: &str, extra_args: &[String]) -> Result<String> {
        let request = InvocationRequest::new(claims_text).with_extra_args(extra_args.to_vec());
        Ok(self.run_report(&request)?.combined_output())
    }

    /// Same as [`run`](Self::run), but returns the full report: captured
    /// streams separately, the intercepted termination status, and the
    /// invocation duration.
    ///
    /// # Errors
    /// - `AdapterError::Tool` when the tool fails without requesting exit;
    ///   the failure is passed through unchanged.
    pub fn run_report(&self, request: &InvocationRequest) -> Result<RunReport> {
        // One invocation at a time per process. A tool panic that crossed
        // the previous call leaves the lock poisoned; the guarded state was
        // already restored on unwind, so recover and keep going.
        let _serial = RUN_LOCK.lock().unwrap_or_else(PoisonError::into_inner);

        let invocation_id = Uuid::new_v4();
        let program_path = self.tool.program_path();
        let paths = SimulatedPaths::beside(&program_path);
        let argv = request.argv(&program_path, paths.claims_path());

        debug!(
            invocation = %invocation_id,
            claims_path = %paths.claims_path().display(),
            extra_args = request.extra_args.len(),
            "Starting lint tool invocation"
        );

        let store = SimulatedFileStore::new(Arc::clone(&self.file_store))
            .with_content(paths.claims_path(), request.claims_text.clone())
            .with_discard(paths.marked_path());

        let mut stdout_buf: Vec<u8> = Vec::new();
        let mut stderr_buf: Vec<u8> = Vec::new();

        let started = self.clock.now_millis();
        let outcome = {
            let _hook = ExitHookGuard::install();
            let mut ctx = ToolContext::new(argv, &store, &mut stdout_buf, &mut stderr_buf);
            run_intercepted(|| self.tool.run(&mut ctx))
            // `_hook` drops here on every path, restoring the prior hook
            // even when a tool defect unwinds through `run_intercepted`.
        };
        let duration_ms = self.clock.now_millis() - started;

        let termination = match outcome {
            InterceptOutcome::Completed(Ok(())) => Termination::Completed,
            InterceptOutcome::Completed(Err(source)) => return Err(AdapterError::Tool(source)),
            InterceptOutcome::Exited(code) => Termination::RequestedExit(code),
        };

        let output = CapturedOutput::from_buffers(stdout_buf, stderr_buf);

        info!(
            invocation = %invocation_id,
            duration_ms,
            termination = %termination,
            stdout_bytes = output.stdout.len(),
            stderr_bytes = output.stderr.len(),
            "Lint tool invocation finished"
        );

        Ok(RunReport {
            output,
            termination,
            duration_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::clock::mocks::FixedClock;
    use crate::port::file_store::mocks::NullFileStore;
    use crate::port::tool_entry::mocks::{EchoTool, ScriptedTool};

    fn adapter_with(tool: Arc<dyn ToolEntryPoint>) -> ExecutionAdapter {
        ExecutionAdapter::new(tool, Arc::new(NullFileStore), Arc::new(FixedClock(1000)))
    }

    #[test]
    fn output_is_stdout_then_stderr() {
        let adapter = adapter_with(Arc::new(ScriptedTool::completing("analysis\n", "warning\n")));

        let output = adapter.run("claim 1.", &[]).unwrap();

        assert_eq!(output, "analysis\nwarning\n");
    }

    #[test]
    fn run_is_idempotent_across_calls() {
        let tool = Arc::new(ScriptedTool::completing("same output\n", ""));
        let adapter = adapter_with(tool.clone());

        let first = adapter.run("claim 1.", &[]).unwrap();
        let second = adapter.run("claim 1.", &[]).unwrap();

        assert_eq!(first, second);
        assert_eq!(tool.call_count(), 2);
    }

    #[test]
    fn exit_request_is_ordinary_completion_with_the_code_surfaced() {
        let adapter = adapter_with(Arc::new(ScriptedTool::exiting(2, "", "malformed claims\n")));

        let report = adapter
            .run_report(&InvocationRequest::new("garbage"))
            .unwrap();

        assert_eq!(report.termination, Termination::RequestedExit(2));
        assert_eq!(report.combined_output(), "malformed claims\n");
    }

    #[test]
    fn tool_failure_propagates_as_an_error() {
        let adapter = adapter_with(Arc::new(ScriptedTool::failing("unreadable state")));

        let err = adapter.run("claim 1.", &[]).unwrap_err();

        assert!(matches!(err, AdapterError::Tool(_)));
        assert!(err.to_string().contains("unreadable state"));
    }

    #[test]
    fn tool_panic_crosses_run_and_later_calls_still_work() {
        let panicking = adapter_with(Arc::new(ScriptedTool::panicking("tool defect")));

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _ = panicking.run("claim 1.", &[]);
        }));
        assert!(result.is_err());

        // The run lock recovers from the poison left by the unwind.
        let healthy = adapter_with(Arc::new(ScriptedTool::completing("ok\n", "")));
        assert_eq!(healthy.run("claim 1.", &[]).unwrap(), "ok\n");
    }

    #[test]
    fn tool_sees_the_claims_text_at_the_simulated_path() {
        let adapter = adapter_with(Arc::new(EchoTool));

        let output = adapter.run("claim 1.\nclaim 2.", &[]).unwrap();

        // EchoTool pins its program path, so the claims path is predictable.
        assert!(output.contains("argv: /opt/claimrun/echo-tool /opt/claimrun/_claims.txt"));
        assert!(output.contains("exists: true"));
        assert!(output.contains("claims: claim 1.\nclaim 2."));
    }

    #[test]
    fn extra_args_follow_the_simulated_path_in_order() {
        let adapter = adapter_with(Arc::new(EchoTool));

        let output = adapter
            .run(
                "claim 1.",
                &["--some-flag".to_string(), "--other".to_string()],
            )
            .unwrap();

        assert!(output
            .contains("argv: /opt/claimrun/echo-tool /opt/claimrun/_claims.txt --some-flag --other"));
    }

    #[test]
    fn empty_claims_text_still_yields_a_string_result() {
        let adapter = adapter_with(Arc::new(EchoTool));

        let output = adapter.run("", &[]).unwrap();

        assert!(output.contains("claims: \n"));
    }

    #[test]
    fn duration_uses_the_injected_clock() {
        let adapter = adapter_with(Arc::new(ScriptedTool::completing("", "")));

        let report = adapter.run_report(&InvocationRequest::new("x")).unwrap();

        assert_eq!(report.duration_ms, 0);
    }
}
