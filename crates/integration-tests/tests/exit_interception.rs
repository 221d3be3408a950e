//! Exit interception tests
//!
//! The tool's "end the process now" must unwind only the invocation, and
//! every process-wide override must be back in place afterwards. The panic
//! hook is process-wide, so all observations live in one sequential test;
//! parallel tests would race on the hit counts.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use claimrun_core::application::ExecutionAdapter;
use claimrun_core::domain::{InvocationRequest, Termination};
use claimrun_core::port::clock::mocks::FixedClock;
use claimrun_core::port::file_store::mocks::NullFileStore;
use claimrun_core::port::tool_entry::mocks::ScriptedTool;
use claimrun_core::port::ToolEntryPoint;

fn adapter_with(tool: Arc<dyn ToolEntryPoint>) -> ExecutionAdapter {
    ExecutionAdapter::new(tool, Arc::new(NullFileStore), Arc::new(FixedClock(0)))
}

#[test]
fn overrides_are_reverted_on_every_exit_path() {
    static HITS: AtomicUsize = AtomicUsize::new(0);
    std::panic::set_hook(Box::new(|_| {
        HITS.fetch_add(1, Ordering::SeqCst);
    }));

    // 1. A non-zero exit request comes back as an ordinary string result,
    //    with the code surfaced in the report, and stays silent: the
    //    counting hook (the "prior" hook during the run) never sees it.
    let exiting = adapter_with(Arc::new(ScriptedTool::exiting(2, "", "malformed claim set\n")));
    assert_eq!(exiting.run("garbage input", &[]).unwrap(), "malformed claim set\n");
    let report = exiting
        .run_report(&InvocationRequest::new("garbage input"))
        .unwrap();
    assert_eq!(report.termination, Termination::RequestedExit(2));
    assert_eq!(HITS.load(Ordering::SeqCst), 0);

    // 2. A tool defect is forwarded to the prior hook and crosses `run`
    //    unchanged.
    let broken = adapter_with(Arc::new(ScriptedTool::panicking("tool defect")));
    let result = catch_unwind(AssertUnwindSafe(|| {
        let _ = broken.run("x", &[]);
    }));
    assert!(result.is_err());
    assert_eq!(HITS.load(Ordering::SeqCst), 1);

    // 3. After the runs, the counting hook is the active hook again: a
    //    plain panic outside any invocation reaches it directly.
    let result = catch_unwind(|| panic!("outside any invocation"));
    assert!(result.is_err());
    assert_eq!(HITS.load(Ordering::SeqCst), 2);

    // 4. And the adapter still works: the poisoned run lock recovered.
    let healthy = adapter_with(Arc::new(ScriptedTool::completing("fine\n", "")));
    assert_eq!(healthy.run("x", &[]).unwrap(), "fine\n");

    let _ = std::panic::take_hook();
}
