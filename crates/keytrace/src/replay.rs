//! Drive an engine through a trace and report what it did.

use hotkey_engine::{HotkeyEngine, Outcome, test_support::record_dispatches};
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::{Result, trace::TraceStep};

/// Feed `steps` through `engine` and return one report line per effect.
///
/// Each dispatched action (including hold repeats fired during `wait`
/// steps) produces a `dispatch` line with its context. Capture commits,
/// cancellations and swallowed keys produce their own lines. Events the
/// engine let through or only tracked produce nothing.
///
/// Must run inside a tokio runtime for hold repeat to be active.
pub async fn replay(engine: &mut HotkeyEngine, steps: &[TraceStep]) -> Result<Vec<String>> {
    let log = record_dispatches(engine);
    let mut lines = Vec::new();

    for (idx, step) in steps.iter().enumerate() {
        let n = idx + 1;
        let mut outcome = None;
        match step {
            TraceStep::FocusOn(spec) => engine.set_focus(spec.clone().into()),
            TraceStep::Select(id) => engine.set_selection(id.as_deref()),
            TraceStep::Mode(mode) => engine.set_mode(*mode),
            TraceStep::Capture(action) => {
                if let Err(e) = engine.begin_capture(*action) {
                    warn!(step = n, "{e}");
                    lines.push(format!("{n:>3}  {step}: {e}"));
                }
            }
            TraceStep::Wait(_) => {
                if let Some(d) = step.delay() {
                    sleep(d).await;
                }
                let ran = engine.pump_repeats();
                debug!(step = n, repeats = ran, "pumped");
            }
            _ => {
                if let Some(ev) = step.to_event()? {
                    outcome = Some(engine.handle_event(&ev));
                }
            }
        }

        for (action, ctx) in log.borrow_mut().drain(..) {
            lines.push(format!(
                "{n:>3}  {step}: dispatch {action} @{}",
                ctx.as_deref().unwrap_or("-")
            ));
        }
        if let Some(
            o @ (Outcome::Captured { .. } | Outcome::CaptureCancelled | Outcome::Swallowed),
        ) = outcome
        {
            lines.push(format!("{n:>3}  {step}: {o}"));
        }
    }
    Ok(lines)
}
