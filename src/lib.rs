//! xyspec
//!
//! A small Rust library for assembling declarative **Vega v5** scatter-plot
//! specifications ("XY plots") for dimensionality-reduction coordinates such as
//! MDS or PCA output. Pairs with the `xyspec` CLI.
//!
//! ### Features
//! - Per-point status colouring over the fixed status domain `-1, 0, 1`
//! - Hover tooltips listing every configured column
//! - Click capture signal and an empty `selected_points` sink for the runtime's selection wiring
//! - Load parameters/rows from JSON or CSV and save the resulting spec as JSON
//!
//! ### Example
//! ```no_run
//! use xyspec::{CanvasDimensions, spec, storage};
//!
//! let params = storage::load_params("params.json")?;
//! let rows = storage::load_rows("mds.csv")?;
//! let vis = spec::build(&params, &rows, CanvasDimensions::new(1000.0, 800.0));
//! storage::save_spec(&vis, "mds.vg.json")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod error;
mod expr;
pub mod models;
pub mod spec;
pub mod stats;
pub mod storage;
pub mod tooltip;

pub use error::SpecError;
pub use models::{CanvasDimensions, LayoutMode, PlotParameters, Row, RowTable};
pub use spec::{VisualizationSpec, build, build_checked};
pub use tooltip::{TooltipDescriptor, build_tooltip_fields};
