//! Filter and sort stages of the student list pipeline.
//!
//! All functions here are pure: they read a snapshot and return a new list.

use std::cmp::Ordering;

use crate::collate::Collator;
use crate::model::Student;

const ALL_GROUPS_VALUE: &str = "all";
const GROUP_VALUE_PREFIX: &str = "group:";

/// Group filter; `All` is the "all groups" sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GroupFilter {
    #[default]
    All,
    Group(String),
}

impl GroupFilter {
    /// Parse a `<select>` value. Group values carry a prefix so that no
    /// group name, the empty one included, can collide with "all".
    pub fn from_select_value(value: &str) -> Self {
        match value.strip_prefix(GROUP_VALUE_PREFIX) {
            Some(group) => GroupFilter::Group(group.to_string()),
            None => GroupFilter::All,
        }
    }

    pub fn select_value(&self) -> String {
        match self {
            GroupFilter::All => ALL_GROUPS_VALUE.to_string(),
            GroupFilter::Group(g) => format!("{}{}", GROUP_VALUE_PREFIX, g),
        }
    }

    pub fn matches(&self, student: &Student) -> bool {
        match self {
            GroupFilter::All => true,
            GroupFilter::Group(g) => student.group_name == *g,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// "Surname given-name", case-insensitive.
    Name,
    /// Group name, then name.
    Group,
}

pub fn filter_students(snapshot: &[Student], filter: &GroupFilter) -> Vec<Student> {
    snapshot
        .iter()
        .filter(|s| filter.matches(s))
        .cloned()
        .collect()
}

pub fn compare_names<C: Collator + ?Sized>(collator: &C, a: &Student, b: &Student) -> Ordering {
    collator.compare(
        &a.sort_name().to_lowercase(),
        &b.sort_name().to_lowercase(),
    )
}

/// Group order; distinct groups never compare equal so they stay contiguous.
pub fn compare_groups<C: Collator + ?Sized>(collator: &C, a: &str, b: &str) -> Ordering {
    collator.compare(a, b).then_with(|| a.cmp(b))
}

/// Stable sort of `students` by `key`; `None` keeps load order.
pub fn sort_students<C: Collator + ?Sized>(
    students: &mut [Student],
    key: Option<SortKey>,
    collator: &C,
) {
    match key {
        None => {}
        Some(SortKey::Name) => students.sort_by(|a, b| compare_names(collator, a, b)),
        Some(SortKey::Group) => students.sort_by(|a, b| {
            compare_groups(collator, &a.group_name, &b.group_name)
                .then_with(|| compare_names(collator, a, b))
        }),
    }
}

/// One independently filtered and sorted projection of the snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentView {
    filter: GroupFilter,
    sort: Option<SortKey>,
    derived: Vec<Student>,
}

impl StudentView {
    pub fn filter(&self) -> &GroupFilter {
        &self.filter
    }

    pub fn sort(&self) -> Option<SortKey> {
        self.sort
    }

    pub fn derived(&self) -> &[Student] {
        &self.derived
    }

    /// Replace the filter and rebuild, reapplying the current sort.
    pub fn set_filter<C: Collator + ?Sized>(
        &mut self,
        filter: GroupFilter,
        snapshot: &[Student],
        collator: &C,
    ) {
        self.filter = filter;
        self.rebuild(snapshot, collator);
    }

    pub fn set_sort<C: Collator + ?Sized>(
        &mut self,
        key: Option<SortKey>,
        snapshot: &[Student],
        collator: &C,
    ) {
        self.sort = key;
        self.rebuild(snapshot, collator);
    }

    /// Drop the derived list and recompute it from `snapshot`.
    pub fn rebuild<C: Collator + ?Sized>(&mut self, snapshot: &[Student], collator: &C) {
        let mut derived = filter_students(snapshot, &self.filter);
        sort_students(&mut derived, self.sort, collator);
        self.derived = derived;
    }

    /// A new snapshot arrived: forget a filter whose group vanished, then rebuild.
    pub fn reload<C: Collator + ?Sized>(&mut self, snapshot: &[Student], collator: &C) {
        if let GroupFilter::Group(g) = &self.filter {
            if !snapshot.iter().any(|s| s.group_name == *g) {
                self.filter = GroupFilter::All;
            }
        }
        self.rebuild(snapshot, collator);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collate::FoldedCollator;
    use crate::model::StudentId;

    fn student(id: i64, name: &str, surname: &str, group: &str) -> Student {
        Student {
            id: StudentId(id),
            name: name.to_string(),
            surname: surname.to_string(),
            group_name: group.to_string(),
        }
    }

    fn sample() -> Vec<Student> {
        vec![
            student(1, "Anna", "Ivanova", "A1"),
            student(2, "Boris", "Petrov", "B2"),
            student(3, "Clara", "adams", "B2"),
            student(4, "Denis", "Adams", "A1"),
            student(5, "Anna", "Petrova", "A1"),
        ]
    }

    fn ids(list: &[Student]) -> Vec<i64> {
        list.iter().map(|s| s.id.0).collect()
    }

    #[test]
    fn test_filter_all_is_identity() {
        let snapshot = sample();
        assert_eq!(filter_students(&snapshot, &GroupFilter::All), snapshot);
    }

    #[test]
    fn test_filter_group_keeps_only_members() {
        let snapshot = sample();
        let filtered = filter_students(&snapshot, &GroupFilter::Group("A1".into()));
        assert_eq!(ids(&filtered), vec![1, 4, 5]);
        assert!(filtered.iter().all(|s| s.group_name == "A1"));
    }

    #[test]
    fn test_filter_unknown_group_is_empty() {
        let filtered = filter_students(&sample(), &GroupFilter::Group("Z9".into()));
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_select_value_round_trip() {
        assert_eq!(GroupFilter::from_select_value("all"), GroupFilter::All);
        assert_eq!(
            GroupFilter::from_select_value("group:B2"),
            GroupFilter::Group("B2".into())
        );
        assert_eq!(GroupFilter::Group("B2".into()).select_value(), "group:B2");
    }

    #[test]
    fn test_empty_group_name_is_not_all() {
        let mut snapshot = sample();
        snapshot.push(student(6, "Fedor", "Nogroup", ""));

        let value = GroupFilter::Group(String::new()).select_value();
        assert_ne!(value, GroupFilter::All.select_value());

        let filter = GroupFilter::from_select_value(&value);
        assert_eq!(filter, GroupFilter::Group(String::new()));
        assert_eq!(ids(&filter_students(&snapshot, &filter)), vec![6]);
    }

    #[test]
    fn test_group_named_all_is_not_the_sentinel() {
        let value = GroupFilter::Group("all".into()).select_value();
        assert_eq!(
            GroupFilter::from_select_value(&value),
            GroupFilter::Group("all".into())
        );
    }

    #[test]
    fn test_sort_by_name_is_case_insensitive_surname_first() {
        let mut list = sample();
        sort_students(&mut list, Some(SortKey::Name), &FoldedCollator);
        // "adams clara" < "adams denis" < "ivanova anna" < "petrov boris" < "petrova anna"
        assert_eq!(ids(&list), vec![3, 4, 1, 2, 5]);
    }

    #[test]
    fn test_sort_by_name_idempotent() {
        let mut once = sample();
        sort_students(&mut once, Some(SortKey::Name), &FoldedCollator);
        let mut twice = once.clone();
        sort_students(&mut twice, Some(SortKey::Name), &FoldedCollator);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_sort_by_name_stable_on_equal_names() {
        let mut list = vec![
            student(10, "Ivan", "Orlov", "B"),
            student(11, "ivan", "orlov", "A"),
            student(12, "IVAN", "ORLOV", "C"),
        ];
        sort_students(&mut list, Some(SortKey::Name), &FoldedCollator);
        assert_eq!(ids(&list), vec![10, 11, 12]);
    }

    #[test]
    fn test_sort_by_group_contiguous_and_ascending() {
        let mut list = sample();
        list.push(student(6, "Egor", "Zaitsev", "a1"));
        sort_students(&mut list, Some(SortKey::Group), &FoldedCollator);

        let groups: Vec<&str> = list.iter().map(|s| s.group_name.as_str()).collect();
        assert_eq!(groups, vec!["a1", "A1", "A1", "A1", "B2", "B2"]);
        // Within A1: Adams Denis, Ivanova Anna, Petrova Anna
        assert_eq!(ids(&list)[1..4], [4, 1, 5]);
    }

    #[test]
    fn test_no_sort_key_keeps_load_order() {
        let mut list = sample();
        sort_students(&mut list, None, &FoldedCollator);
        assert_eq!(ids(&list), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_view_reapplies_sort_on_filter_change() {
        let snapshot = sample();
        let mut view = StudentView::default();
        view.set_sort(Some(SortKey::Name), &snapshot, &FoldedCollator);
        view.set_filter(GroupFilter::Group("A1".into()), &snapshot, &FoldedCollator);
        assert_eq!(ids(view.derived()), vec![4, 1, 5]);
        assert_eq!(view.sort(), Some(SortKey::Name));
    }

    #[test]
    fn test_view_scenario_single_match() {
        let snapshot = vec![
            student(1, "Anna", "Ivanova", "A1"),
            student(2, "Boris", "Petrov", "B2"),
        ];
        let mut view = StudentView::default();
        view.set_filter(GroupFilter::Group("B2".into()), &snapshot, &FoldedCollator);
        assert_eq!(ids(view.derived()), vec![2]);
        view.set_sort(Some(SortKey::Name), &snapshot, &FoldedCollator);
        assert_eq!(ids(view.derived()), vec![2]);
    }

    #[test]
    fn test_view_reload_drops_vanished_group() {
        let snapshot = sample();
        let mut view = StudentView::default();
        view.set_filter(GroupFilter::Group("B2".into()), &snapshot, &FoldedCollator);

        let without_b2: Vec<Student> = snapshot
            .into_iter()
            .filter(|s| s.group_name != "B2")
            .collect();
        view.reload(&without_b2, &FoldedCollator);
        assert_eq!(view.filter(), &GroupFilter::All);
        assert_eq!(view.derived().len(), 3);
    }

    #[test]
    fn test_view_reload_keeps_existing_group() {
        let snapshot = sample();
        let mut view = StudentView::default();
        view.set_filter(GroupFilter::Group("B2".into()), &snapshot, &FoldedCollator);
        view.reload(&snapshot, &FoldedCollator);
        assert_eq!(view.filter(), &GroupFilter::Group("B2".into()));
        assert_eq!(ids(view.derived()), vec![2, 3]);
    }
}
