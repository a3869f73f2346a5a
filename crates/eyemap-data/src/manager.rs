//! Grouping and filtering of columns by soma side.
//!
//! Two grouping entry points, intentionally distinct in strictness:
//! [`ColumnDataManager::organize_by_side`] accepts any external side
//! spelling and lives at the outermost ingestion edge;
//! [`ColumnDataManager::organize_structured_by_side`] requires the
//! [`SomaSide`] variant type, so a free-form string cannot reach it;
//! passing one is a compile error, not a runtime check.

use std::collections::HashMap;

use tracing::warn;

use crate::raw::fields;
use crate::{ColumnData, RawColumnRecord, Result, SomaSide};

/// Groups and filters canonical columns by side.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnDataManager;

impl ColumnDataManager {
    pub fn new() -> Self {
        Self
    }

    /// Group raw records by canonical side code, selecting the sides
    /// named by a flexible `side_spec` spelling ("left", "bilateral",
    /// "*", …).
    ///
    /// Records whose own side field cannot be resolved are skipped
    /// with a warning rather than failing the whole ingestion; the
    /// strict check happens later at the adapter boundary.
    pub fn organize_by_side(
        &self,
        raw: &[RawColumnRecord],
        side_spec: &str,
    ) -> Result<HashMap<char, Vec<RawColumnRecord>>> {
        let selector = SomaSide::parse(side_spec)?;
        let selected = selector.selected_codes();

        let mut groups: HashMap<char, Vec<RawColumnRecord>> = HashMap::new();
        for record in raw {
            let spelling = match record.require_str(fields::SIDE) {
                Ok(s) => s,
                Err(e) => {
                    warn!(error = %e, "skipping record without usable side field");
                    continue;
                }
            };
            let side = match SomaSide::parse(spelling) {
                Ok(s) => s,
                Err(e) => {
                    warn!(error = %e, "skipping record with unresolvable side");
                    continue;
                }
            };
            let Some(code) = side.canonical_code() else {
                warn!(
                    side = %side,
                    "skipping record with selector pseudo-side stored as data"
                );
                continue;
            };
            if selected.contains(&code) {
                groups.entry(code).or_default().push(record.clone());
            }
        }
        Ok(groups)
    }

    /// Group canonical columns by side code, selecting the sides named
    /// by the canonical variant. `Combined` selects L and R; `All`
    /// selects everything.
    pub fn organize_structured_by_side(
        &self,
        columns: &[ColumnData],
        side: SomaSide,
    ) -> HashMap<char, Vec<ColumnData>> {
        let selected = side.selected_codes();
        let mut groups: HashMap<char, Vec<ColumnData>> = HashMap::new();
        for col in columns {
            let code = col.side_code();
            if selected.contains(&code) {
                groups.entry(code).or_default().push(col.clone());
            }
        }
        groups
    }

    /// The subset of columns matching exactly one canonical code.
    pub fn filter_by_side(&self, columns: &[ColumnData], code: char) -> Result<Vec<ColumnData>> {
        // Reject ad hoc codes up front so a typo'd 'l' or 'left' char
        // never silently matches nothing.
        SomaSide::from_code(code)?;
        Ok(columns
            .iter()
            .filter(|c| c.side_code() == code)
            .cloned()
            .collect())
    }
}
