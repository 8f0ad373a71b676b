//! Grid layer: selection, header interaction, and column configuration.
//!
//! A [`Grid`] is built once over a data source and then driven through two
//! interaction surfaces: [`GridSelector`] for selection and one
//! [`HeaderController`] per column for sorting and filtering. Templates turn
//! the coordinated state into [`CellContent`] for a presentation layer.

mod cell;
mod column;
mod container;
mod header;
mod selector;

pub use cell::{
    BodyContext, CellContent, ColumnKind, ColumnTemplate, CustomTemplate, DefaultTemplate,
    ExpanderTemplate, HeaderContext, SelectorTemplate,
};
pub use column::GridColumn;
pub use container::{Grid, GridBuilder, SelectionCallback, SelectionMode};
pub use header::HeaderController;
pub use selector::GridSelector;
