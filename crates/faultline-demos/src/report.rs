//! Shared reporting for contained violations.

use faultline_core::{Console, Containment, DemoError, ViolationClass, ViolationError};
use tracing::{info, warn};

/// Report a fault a checked primitive rejected at runtime.
pub(crate) fn caught(
    class: ViolationClass,
    console: &mut dyn Console,
    err: ViolationError,
) -> Containment {
    warn!(%class, error = %err, "violation contained");
    emit(class, console, Containment::Caught(err))
}

/// Report a violation that only exists as a non-compiling snippet.
pub(crate) fn compile_time(
    class: ViolationClass,
    console: &mut dyn Console,
    case: &'static str,
    error_code: &'static str,
) -> Containment {
    info!(%class, case, error_code, "violation rejected at compile time");
    emit(class, console, Containment::CompileTime { case, error_code })
}

/// Turn the result of a deliberately violating call into the fault it
/// must have produced.
pub(crate) fn expect_fault<T>(
    class: ViolationClass,
    result: Result<T, ViolationError>,
    detail: &str,
) -> Result<ViolationError, DemoError> {
    match result {
        Err(err) => Ok(err),
        Ok(_) => Err(DemoError::Uncontained {
            class,
            detail: detail.to_string(),
        }),
    }
}

fn emit(
    class: ViolationClass,
    console: &mut dyn Console,
    containment: Containment,
) -> Containment {
    console.line(&format!("[{class}] {containment}"));
    containment
}
