//! Crash reports and diagnostic logging.
//!
//! - **Panic hook**: prints a boxed crash report naming the operation in flight
//! - **Operation context**: thread-local record of what the CLI is doing
//! - **Logging**: `tracing` subscriber writing to stderr, filtered by `RUST_LOG`
//!   or the `-v` count
//!
//! ```ignore
//! use cognibank::observability::{init_logging, install_panic_hook, set_operation, Operation};
//!
//! install_panic_hook();
//! init_logging(1);
//! let _op = set_operation(Operation::Calculate);
//! ```

pub mod context;
mod logging;
pub mod panic_hook;

pub use context::{
    current_operation, get_current_context, set_loan_type, set_operation, Operation,
    OperationContext, ContextGuard,
};
pub use logging::{filter_directive, init_logging};
pub use panic_hook::install_panic_hook;
