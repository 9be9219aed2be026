//! Report renderers for the risk register.
//!
//! - [`terminal`] — colored summary with statistics box and risk table;
//!   respects `--worst` / `--verbose` / `--quiet`.
//! - [`matrix`] — 5×5 probability×impact grid with per-cell counts.
//! - [`analysis`] — detail view for a single risk, with alert banner.
//! - [`pdf`] — multi-page PDF with cover, severity summary, matrix, and a
//!   full risk table.

pub mod analysis;
pub mod matrix;
pub mod pdf;
pub mod terminal;

use crate::models::Severity;

/// Shared severity → terminal color mapping for the text renderers.
pub(crate) fn severity_color(severity: Severity) -> comfy_table::Color {
    match severity {
        Severity::Low => comfy_table::Color::Green,
        Severity::Medium => comfy_table::Color::Yellow,
        Severity::High => comfy_table::Color::Magenta,
        Severity::Critical => comfy_table::Color::Red,
    }
}
