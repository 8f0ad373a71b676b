//! Cell templates: the seam between grid state and a presentation layer.
//!
//! The grid never draws anything. A [`ColumnTemplate`] turns coordinated
//! state into a thin [`CellContent`] description, and whatever presentation
//! layer hosts the grid decides what a checkbox or an expander toggle looks
//! like.

use std::sync::Arc;

use crate::data::Value;

use super::column::GridColumn;
use super::container::{Grid, SelectionMode};

/// Presentational output of a template, one cell's worth.
#[derive(Debug, Clone, PartialEq)]
pub enum CellContent {
    /// Nothing to show.
    None,
    /// Plain text.
    Text(String),
    /// A checkbox reflecting a selection state.
    Checkbox {
        /// Whether the checkbox is ticked.
        checked: bool,
    },
    /// A row-expansion toggle.
    Expander {
        /// Whether the row is currently expanded.
        expanded: bool,
    },
}

/// What a template sees when rendering a header cell.
pub struct HeaderContext<'a, T> {
    /// The grid the column belongs to.
    pub grid: &'a Grid<T>,
    /// The column being rendered.
    pub column: &'a GridColumn<T>,
}

/// What a template sees when rendering a body cell.
///
/// Row-expansion state is owned by the presentation layer; it passes the
/// state in rather than the grid tracking it.
pub struct BodyContext<'a, T> {
    /// The grid the column belongs to.
    pub grid: &'a Grid<T>,
    /// The column being rendered.
    pub column: &'a GridColumn<T>,
    /// Whether the row can be expanded at all.
    pub expandable: bool,
    /// Whether the row is currently expanded.
    pub expanded: bool,
}

/// Renders one column's cells from grid state.
pub trait ColumnTemplate<T>: Send + Sync {
    /// Renders the column's header cell.
    fn render_header(&self, context: &HeaderContext<'_, T>) -> CellContent;

    /// Renders the column's body cell for one item.
    fn render_body(&self, item: &T, context: &BodyContext<'_, T>) -> CellContent;
}

/// The built-in template variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Title in the header, the field's value in the body.
    Default,
    /// Row-expansion toggle column.
    Expander,
    /// Row-selection checkbox column.
    Selector,
    /// Caller-supplied template.
    Custom,
}

pub(super) fn template_for<T>(kind: ColumnKind) -> Arc<dyn ColumnTemplate<T>>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    match kind {
        ColumnKind::Expander => Arc::new(ExpanderTemplate),
        ColumnKind::Selector => Arc::new(SelectorTemplate),
        ColumnKind::Default | ColumnKind::Custom => Arc::new(DefaultTemplate),
    }
}

/// Title in the header, the extracted field value in the body.
pub struct DefaultTemplate;

impl<T: Clone + PartialEq + Send + Sync + 'static> ColumnTemplate<T> for DefaultTemplate {
    fn render_header(&self, context: &HeaderContext<'_, T>) -> CellContent {
        CellContent::Text(context.column.title.clone())
    }

    fn render_body(&self, item: &T, context: &BodyContext<'_, T>) -> CellContent {
        match context.column.value_of(context.grid, item) {
            Value::None => CellContent::None,
            value => CellContent::Text(value.to_string()),
        }
    }
}

/// Selection checkboxes: select-all in the header, per-row in the body.
///
/// The header checkbox only exists under [`SelectionMode::Multiple`];
/// select-all has no meaning for single or disabled selection.
pub struct SelectorTemplate;

impl<T: Clone + PartialEq + Send + Sync + 'static> ColumnTemplate<T> for SelectorTemplate {
    fn render_header(&self, context: &HeaderContext<'_, T>) -> CellContent {
        if context.grid.selection_mode() != SelectionMode::Multiple {
            return CellContent::None;
        }
        CellContent::Checkbox {
            checked: context.grid.selector().is_all_selected(),
        }
    }

    fn render_body(&self, item: &T, context: &BodyContext<'_, T>) -> CellContent {
        CellContent::Checkbox {
            checked: context.grid.selector().is_selected(item),
        }
    }
}

/// Row-expansion toggles; the header stays empty.
pub struct ExpanderTemplate;

impl<T: Clone + PartialEq + Send + Sync + 'static> ColumnTemplate<T> for ExpanderTemplate {
    fn render_header(&self, _context: &HeaderContext<'_, T>) -> CellContent {
        CellContent::None
    }

    fn render_body(&self, _item: &T, context: &BodyContext<'_, T>) -> CellContent {
        if !context.expandable {
            return CellContent::None;
        }
        CellContent::Expander {
            expanded: context.expanded,
        }
    }
}

/// Caller-supplied render closures.
pub struct CustomTemplate<T> {
    header: Box<dyn Fn(&HeaderContext<'_, T>) -> CellContent + Send + Sync>,
    body: Box<dyn Fn(&T, &BodyContext<'_, T>) -> CellContent + Send + Sync>,
}

impl<T> CustomTemplate<T> {
    /// Creates a template from header and body closures.
    pub fn new(
        header: impl Fn(&HeaderContext<'_, T>) -> CellContent + Send + Sync + 'static,
        body: impl Fn(&T, &BodyContext<'_, T>) -> CellContent + Send + Sync + 'static,
    ) -> Self {
        Self {
            header: Box::new(header),
            body: Box::new(body),
        }
    }
}

impl<T: Send + Sync> ColumnTemplate<T> for CustomTemplate<T> {
    fn render_header(&self, context: &HeaderContext<'_, T>) -> CellContent {
        (self.header)(context)
    }

    fn render_body(&self, item: &T, context: &BodyContext<'_, T>) -> CellContent {
        (self.body)(item, context)
    }
}
