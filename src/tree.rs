//! Rendered Tree
//!
//! Arena-plus-index bookkeeping for the reconciler. The tree mirrors what
//! the render backend currently shows: one section node per aisle, one row
//! node per label. Backend handles are kept across renders so surviving
//! nodes stay the same backend object.

use std::collections::HashMap;

/// Render backend seam. The browser implementation lives in `dom.rs`; tests
/// drive the reconciler through an in-memory backend instead.
pub trait Surface {
    type Section;
    type Row;

    /// Insert a section before `anchor` (or at the end when `None`), with
    /// its title and initial expanded state.
    fn create_section(
        &mut self,
        aisle: &str,
        expanded: bool,
        anchor: Option<&Self::Section>,
    ) -> Self::Section;
    fn remove_section(&mut self, section: &Self::Section);
    fn set_expanded(&mut self, section: &Self::Section, expanded: bool);
    /// Append a row to the end of a section's list.
    fn create_row(&mut self, section: &Self::Section, label: &str, needed: bool) -> Self::Row;
    fn remove_row(&mut self, section: &Self::Section, row: &Self::Row);
    fn set_needed(&mut self, row: &Self::Row, needed: bool);
}

pub struct RowNode<S: Surface> {
    pub label: String,
    pub needed: bool,
    pub handle: S::Row,
}

pub struct SectionNode<S: Surface> {
    pub aisle: String,
    pub expanded: bool,
    pub handle: S::Section,
    pub rows: Vec<RowNode<S>>,
    /// label -> position in `rows`
    pub row_index: HashMap<String, usize>,
}

impl<S: Surface> SectionNode<S> {
    pub fn new(aisle: String, expanded: bool, handle: S::Section) -> Self {
        Self {
            aisle,
            expanded,
            handle,
            rows: Vec::new(),
            row_index: HashMap::new(),
        }
    }

    pub fn reindex_rows(&mut self) {
        self.row_index = self
            .rows
            .iter()
            .enumerate()
            .map(|(at, row)| (row.label.clone(), at))
            .collect();
    }
}

pub struct ListTree<S: Surface> {
    /// Sections in display order
    pub sections: Vec<SectionNode<S>>,
    /// aisle -> position in `sections`
    pub section_index: HashMap<String, usize>,
}

impl<S: Surface> ListTree<S> {
    pub fn new() -> Self {
        Self {
            sections: Vec::new(),
            section_index: HashMap::new(),
        }
    }

    pub fn insert_section(&mut self, at: usize, node: SectionNode<S>) {
        self.sections.insert(at, node);
        self.reindex();
    }

    pub fn reindex(&mut self) {
        self.section_index = self
            .sections
            .iter()
            .enumerate()
            .map(|(at, section)| (section.aisle.clone(), at))
            .collect();
    }
}
