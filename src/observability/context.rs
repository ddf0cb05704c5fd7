//! Thread-local context tracking for crash reports.
//!
//! Records which CLI operation is running and for which loan type, so a
//! panic report can say what was happening. Guards restore the previous
//! context on drop, so contexts nest.

use crate::calculator::LoanType;
use std::cell::RefCell;

thread_local! {
    static CURRENT_CONTEXT: RefCell<OperationContext> = const { RefCell::new(OperationContext::new()) };
}

/// Snapshot of what the CLI was doing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationContext {
    pub operation: Option<Operation>,
    pub loan_type: Option<LoanType>,
}

impl OperationContext {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            operation: None,
            loan_type: None,
        }
    }
}

/// Top-level operations the CLI performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ConfigLoad,
    Calculate,
    Catalog,
    Chat,
    AdminStats,
    AdminApplications,
    AdminExports,
    ExportDownload,
    ReportGeneration,
    HealthCheck,
    Init,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::ConfigLoad => "config_load",
            Self::Calculate => "calculate",
            Self::Catalog => "catalog",
            Self::Chat => "chat",
            Self::AdminStats => "admin_stats",
            Self::AdminApplications => "admin_applications",
            Self::AdminExports => "admin_exports",
            Self::ExportDownload => "export_download",
            Self::ReportGeneration => "report_generation",
            Self::HealthCheck => "health_check",
            Self::Init => "init",
        };
        f.write_str(name)
    }
}

/// Restores the previous context on drop.
pub struct ContextGuard {
    previous: OperationContext,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        CURRENT_CONTEXT.with(|ctx| {
            *ctx.borrow_mut() = self.previous.clone();
        });
    }
}

fn update(apply: impl FnOnce(&mut OperationContext)) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = ctx.borrow().clone();
        apply(&mut ctx.borrow_mut());
        ContextGuard { previous }
    })
}

/// Mark `operation` as running until the guard drops.
#[must_use]
pub fn set_operation(operation: Operation) -> ContextGuard {
    update(|ctx| ctx.operation = Some(operation))
}

#[must_use]
pub fn set_loan_type(loan_type: LoanType) -> ContextGuard {
    update(|ctx| ctx.loan_type = Some(loan_type))
}

pub fn current_operation() -> Option<Operation> {
    CURRENT_CONTEXT.with(|ctx| ctx.borrow().operation)
}

/// Called by the panic hook.
#[must_use]
pub fn get_current_context() -> OperationContext {
    CURRENT_CONTEXT.with(|ctx| ctx.borrow().clone())
}
