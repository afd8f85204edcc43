//! Core business logic - framework-agnostic rules linking products, kits and timesheet works.

/// Analytic accounts and their hierarchical full name
pub mod account;
/// Execution context passed to operations
pub mod context;
/// Kit line cascades and reassignment guard
pub mod kit;
/// Product work eligibility, generation and consistency
pub mod product;
/// Product template writes that regenerate works
pub mod template;
/// Timesheet lines logged against works
pub mod timesheet;
/// Timesheet work display name and delete guard
pub mod work;
