//! Shared rendering machinery for the quire back-ends.
//!
//! - [`DispatchTable`] and [`project`]: one data model, many targets
//! - [`ResolvedTheme`] and [`RenderContext`]: what every renderer reads
//! - [`RenderFallback`]: locally recovered problems, logged not propagated

mod context;
mod dispatch;
mod fallback;
pub mod presets;
mod theme;

pub use context::RenderContext;
pub use dispatch::{ColumnOutput, DispatchTable, LeafFn, project, project_element, section_inner_width};
pub use fallback::RenderFallback;
pub use theme::{ResolvedTheme, ThemeDefaults};
