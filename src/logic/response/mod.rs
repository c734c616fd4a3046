//! Response Module - Actuation for the authoritative result

pub mod indicator;
pub mod reconciler;

pub use indicator::{Indicator, IndicatorState, LogIndicator};
pub use reconciler::{Reconciliation, ResultReconciler};
