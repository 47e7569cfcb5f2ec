//! Field catalogs and the display-ready table shape.
//!
//! `Table` is what the table widget and the CSV export both consume:
//! column descriptors plus a row-major grid of strings whose column order
//! matches the descriptors.

use serde::{Deserialize, Serialize};

/// Union of field names seen across a record collection, deduplicated,
/// in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldCatalog {
    names: Vec<String>,
}

impl FieldCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `name` unless already present. Returns whether it was new.
    pub fn insert(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.names.push(name.to_string());
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.names.iter()
    }
}

impl<S: AsRef<str>> FromIterator<S> for FieldCatalog {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut catalog = FieldCatalog::new();
        for name in iter {
            catalog.insert(name.as_ref());
        }
        catalog
    }
}

/// Rendering hint attached to a column instead of plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellRenderer {
    /// Wrap the cell in a styled container.
    StyledContainer,
}

impl CellRenderer {
    /// Empty cells render as nothing at all, not as an empty container.
    pub fn applies_to(&self, cell: &str) -> bool {
        match self {
            CellRenderer::StyledContainer => !cell.is_empty(),
        }
    }
}

impl std::fmt::Display for CellRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellRenderer::StyledContainer => f.write_str("styled_container"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Raw field name the column was built from.
    pub key: String,
    pub label: String,
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renderer: Option<CellRenderer>,
}

/// Display-ready table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<ColumnDescriptor>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.label.as_str()).collect()
    }

    pub fn column(&self, key: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.key == key)
    }

    /// Positions of the visible columns, in column order.
    pub fn visible_indices(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.visible)
            .map(|(i, _)| i)
            .collect()
    }

    /// Renderer for one cell: the column's renderer, unless it skips the
    /// cell's text.
    pub fn cell_renderer(&self, row: usize, col: usize) -> Option<CellRenderer> {
        let renderer = self.columns.get(col)?.renderer?;
        let cell = self.rows.get(row)?.get(col).map(String::as_str).unwrap_or("");
        renderer.applies_to(cell).then_some(renderer)
    }

    /// All cells of one column, top to bottom.
    pub fn column_values(&self, key: &str) -> Option<Vec<&str>> {
        let idx = self.columns.iter().position(|c| c.key == key)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(idx).map(String::as_str).unwrap_or(""))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_dedups_in_first_seen_order() {
        let catalog: FieldCatalog = ["b", "a", "b", "c", "a"].into_iter().collect();
        assert_eq!(catalog.names(), &["b", "a", "c"]);
        assert_eq!(catalog.index_of("c"), Some(2));
        assert!(!catalog.contains("d"));
    }

    #[test]
    fn styled_container_skips_empty_cells() {
        assert!(CellRenderer::StyledContainer.applies_to("12 Main St"));
        assert!(!CellRenderer::StyledContainer.applies_to(""));
    }

    #[test]
    fn visible_indices_and_column_values() {
        let table = Table {
            columns: vec![
                ColumnDescriptor {
                    key: "id".into(),
                    label: "Id".into(),
                    visible: true,
                    renderer: None,
                },
                ColumnDescriptor {
                    key: "geometry".into(),
                    label: "Geometry".into(),
                    visible: false,
                    renderer: None,
                },
            ],
            rows: vec![vec!["1".into(), "g".into()], vec!["2".into()]],
        };
        assert_eq!(table.visible_indices(), vec![0]);
        assert_eq!(table.column_values("geometry"), Some(vec!["g", ""]));
        assert_eq!(table.column_values("missing"), None);
    }

    #[test]
    fn cell_renderer_skips_empty_cells() {
        let table = Table {
            columns: vec![
                ColumnDescriptor {
                    key: "id".into(),
                    label: "Id".into(),
                    visible: true,
                    renderer: None,
                },
                ColumnDescriptor {
                    key: "MANUFACTURER_ADDRESS".into(),
                    label: "Manufacturer Address".into(),
                    visible: true,
                    renderer: Some(CellRenderer::StyledContainer),
                },
            ],
            rows: vec![
                vec!["1".into(), "12 Main St".into()],
                vec!["2".into(), "".into()],
                vec!["3".into()],
            ],
        };
        assert_eq!(table.cell_renderer(0, 1), Some(CellRenderer::StyledContainer));
        assert_eq!(table.cell_renderer(1, 1), None);
        assert_eq!(table.cell_renderer(2, 1), None);
        assert_eq!(table.cell_renderer(0, 0), None);
        assert_eq!(table.cell_renderer(9, 1), None);
    }
}
