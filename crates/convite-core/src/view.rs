//! Read-only projections of a guest list for display.
//!
//! Projection never mutates the store: filter by normalized substring match
//! on the name, then group by the numeric table projection, ascending, with
//! table 0 (unassigned) first. Record order inside a group is the list's
//! insertion order.

use std::collections::BTreeMap;

use crate::record::GuestRecord;
use crate::text::normalize;

/// One table's slice of the projected view.
#[derive(Debug, Clone, PartialEq)]
pub struct TableGroup {
    /// Normalized table number; 0 means unassigned.
    pub table: u32,
    pub members: Vec<GuestRecord>,
}

impl TableGroup {
    pub fn count(&self) -> usize {
        self.members.len()
    }
}

/// Build the display view: records whose name matches `query` (empty query
/// matches everything), grouped by table, ordered ascending by table number.
pub fn project(records: &[GuestRecord], query: &str) -> Vec<TableGroup> {
    let needle = normalize(query);
    let mut groups: BTreeMap<u32, Vec<GuestRecord>> = BTreeMap::new();
    for record in records {
        if !needle.is_empty() && !normalize(&record.name).contains(&needle) {
            continue;
        }
        groups
            .entry(record.table_number_normalized())
            .or_default()
            .push(record.clone());
    }
    groups
        .into_iter()
        .map(|(table, members)| TableGroup { table, members })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Attendance, Category, GuestId};

    fn guest(table: &str, name: &str) -> GuestRecord {
        GuestRecord {
            id: GuestId::generate(),
            table_number: table.to_string(),
            name: name.to_string(),
            category: Category::Major,
            notes: String::new(),
            attended: Attendance::No,
        }
    }

    #[test]
    fn empty_query_groups_everything() {
        let records = vec![guest("2", "ANA"), guest("1", "LUIS"), guest("2", "MARTA")];
        let view = project(&records, "");
        assert_eq!(view.len(), 2);
        assert_eq!(view[0].table, 1);
        assert_eq!(view[1].table, 2);
        assert_eq!(view[1].count(), 2);
    }

    #[test]
    fn unassigned_table_sorts_first() {
        let records = vec![guest("5", "ANA"), guest("0", "LUIS"), guest("terraza", "EVA")];
        let view = project(&records, "");
        assert_eq!(view[0].table, 0);
        // "terraza" normalizes to 0 and lands in the unassigned group.
        assert_eq!(view[0].count(), 2);
    }

    #[test]
    fn search_is_accent_and_case_insensitive() {
        let records = vec![guest("1", "JUAN PÉREZ"), guest("1", "MARTA")];
        let view = project(&records, "jua");
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].members.len(), 1);
        assert_eq!(view[0].members[0].name, "JUAN PÉREZ");
    }

    #[test]
    fn insertion_order_is_kept_inside_a_group() {
        let records = vec![guest("3", "ZOE"), guest("3", "ANA"), guest("3", "MIA")];
        let view = project(&records, "");
        let names: Vec<&str> = view[0].members.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["ZOE", "ANA", "MIA"]);
    }

    #[test]
    fn projecting_does_not_mutate_the_input() {
        let records = vec![guest("1", "ANA")];
        let before = records.clone();
        let _ = project(&records, "an");
        assert_eq!(records, before);
    }
}
