// Exit interception for the adapter
// Converts the tool's "end the process now" request into a value, without
// letting it take the calling process down.

use std::panic::{catch_unwind, resume_unwind, AssertUnwindSafe, PanicHookInfo};
use std::sync::Arc;

use crate::port::tool_entry::ExitSignal;

/// Result of an intercepted execution
#[derive(Debug)]
pub enum InterceptOutcome<T> {
    /// The closure returned normally
    Completed(T),
    /// The closure requested process termination with this status code
    Exited(i32),
}

/// Run a closure, intercepting termination requests raised through
/// [`crate::port::ToolContext::exit`].
///
/// Any other panic is a defect in the tool, not a termination request, and
/// is resumed unchanged so the caller sees it exactly as thrown.
pub fn run_intercepted<F, T>(f: F) -> InterceptOutcome<T>
where
    F: FnOnce() -> T,
{
    // The capture buffers behind the context may be mid-write when an exit
    // request unwinds; that partial content is exactly the "output so far"
    // the report carries.
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => InterceptOutcome::Completed(value),
        Err(payload) => match payload.downcast::<ExitSignal>() {
            Ok(signal) => InterceptOutcome::Exited(signal.code),
            Err(payload) => resume_unwind(payload),
        },
    }
}

type PanicHook = Box<dyn Fn(&PanicHookInfo<'_>) + Sync + Send + 'static>;

/// Scoped panic-hook override.
///
/// While installed, the process-wide hook stays silent for [`ExitSignal`]
/// payloads (a termination request is not a fault worth a backtrace) and
/// delegates every other panic to the hook that was active before. Drop
/// restores the prior hook on every exit path, unwind included.
pub(crate) struct ExitHookGuard {
    prev: Option<Arc<PanicHook>>,
}

impl ExitHookGuard {
    pub(crate) fn install() -> Self {
        let prev: Arc<PanicHook> = Arc::new(std::panic::take_hook());
        let delegate = Arc::clone(&prev);
        std::panic::set_hook(Box::new(move |info| {
            if info.payload().downcast_ref::<ExitSignal>().is_none() {
                (*delegate)(info);
            }
        }));
        Self { prev: Some(prev) }
    }
}

impl Drop for ExitHookGuard {
    fn drop(&mut self) {
        // Discard the filter hook; its clone of `prev` goes with it.
        drop(std::panic::take_hook());
        if let Some(prev) = self.prev.take() {
            match Arc::try_unwrap(prev) {
                Ok(hook) => std::panic::set_hook(hook),
                Err(shared) => std::panic::set_hook(Box::new(move |info| (*shared)(info))),
            }
        }
    }
}
