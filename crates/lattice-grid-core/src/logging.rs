//! Logging facilities for Lattice Grid.
//!
//! Lattice Grid uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("lattice_grid::header=debug,lattice_grid::sort=warn")
//!         .init();
//! }
//! ```
//!
//! Configuration problems (an invalid sort cycle, say) are reported at `warn`.
//! Header cell lifecycle steps are `debug`. Per-event traffic (signal
//! emission, drag progress) is `trace`.

/// Span names used throughout Lattice Grid for tracing.
pub mod span_names {
    /// Header cell activation span.
    pub const HEADER_ACTIVATE: &str = "lattice_grid::header::activate";
    /// Header cell destruction span.
    pub const HEADER_DESTROY: &str = "lattice_grid::header::destroy";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "lattice_grid_core::signal";
    /// Teardown registry target.
    pub const TEARDOWN: &str = "lattice_grid_core::teardown";
    /// Header cell controller target.
    pub const HEADER: &str = "lattice_grid::header";
    /// Sort cycling target.
    pub const SORT: &str = "lattice_grid::sort";
    /// Column resizing target.
    pub const RESIZE: &str = "lattice_grid::resize";
    /// Header menu target.
    pub const MENU: &str = "lattice_grid::menu";
    /// Column model target.
    pub const COLUMN: &str = "lattice_grid::column";
    /// Drag gesture target.
    pub const DRAG: &str = "lattice_grid::drag";
    /// Configuration loading target.
    pub const CONFIG: &str = "lattice_grid::config";
}
