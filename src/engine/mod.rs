//! Hybrid condition-assessment engine
//!
//! Four pure stages, composed by [`Assessor`]:
//!
//! 1. [`spc::classify_by_rms`]: RMS breakpoints → coarse state
//! 2. [`reconciler::reconcile`]: priority-ordered override rules → final state
//! 3. [`rul::reconcile_rul`]: state-dependent RUL band
//! 4. [`gate::should_generate_report`]: report only when actionable
//!
//! No stage holds state or performs I/O. Thresholds are passed explicitly;
//! [`EngineHandle`] is the only place they can change.

pub mod assessor;
pub mod gate;
pub mod handle;
pub mod reconciler;
pub mod rul;
pub mod spc;

pub use assessor::{evaluate, AssessError, Assessor, ErrorKind, Verdict};
pub use gate::should_generate_report;
pub use handle::EngineHandle;
pub use reconciler::{reconcile, reconcile_with_trace, Reconciliation, RULES};
pub use rul::{decay_factor, reconcile_rul};
pub use spc::classify_by_rms;
