//! Render-ready shapes built from the derived list and the snapshot.

use std::collections::HashMap;

use crate::collate::Collator;
use crate::model::{Grade, Student, StudentId};
use crate::view::compare_groups;

pub const EMPTY_LIST_MESSAGE: &str = "No students found";
pub const UNKNOWN_STUDENT: &str = "Unknown";

/// Students of one group, in derived-list order.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSection {
    pub name: String,
    pub students: Vec<Student>,
}

/// What the grouped list shows: either the placeholder or sections.
#[derive(Debug, Clone, PartialEq)]
pub enum Listing {
    Placeholder(&'static str),
    Sections(Vec<GroupSection>),
}

/// Partition the derived list by group and order sections by group name.
pub fn group_sections<C: Collator + ?Sized>(derived: &[Student], collator: &C) -> Listing {
    if derived.is_empty() {
        return Listing::Placeholder(EMPTY_LIST_MESSAGE);
    }

    let mut sections: Vec<GroupSection> = Vec::new();
    for student in derived {
        if let Some(section) = sections.iter_mut().find(|s| s.name == student.group_name) {
            section.students.push(student.clone());
        } else {
            sections.push(GroupSection {
                name: student.group_name.clone(),
                students: vec![student.clone()],
            });
        }
    }
    sections.sort_by(|a, b| compare_groups(collator, &a.name, &b.name));
    Listing::Sections(sections)
}

/// Distinct group names of the snapshot, ascending.
pub fn group_options<C: Collator + ?Sized>(snapshot: &[Student], collator: &C) -> Vec<String> {
    let mut groups: Vec<String> = Vec::new();
    for s in snapshot {
        if !groups.contains(&s.group_name) {
            groups.push(s.group_name.clone());
        }
    }
    groups.sort_by(|a, b| compare_groups(collator, a, b));
    groups
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Flat student picker for the prediction lookup, built from the full snapshot.
pub fn student_options(snapshot: &[Student]) -> Vec<SelectOption> {
    snapshot
        .iter()
        .map(|s| SelectOption {
            value: s.id.to_string(),
            label: format!("{} {} ({})", s.surname, s.name, s.group_name),
        })
        .collect()
}

/// Student picker inside grade forms.
pub fn grade_student_options(snapshot: &[Student]) -> Vec<SelectOption> {
    snapshot
        .iter()
        .map(|s| SelectOption {
            value: s.id.to_string(),
            label: s.display_name(),
        })
        .collect()
}

/// A grade joined with the name of its student.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeRow {
    pub grade: Grade,
    pub student_label: String,
}

impl GradeRow {
    pub fn exam_label(&self) -> String {
        self.grade
            .exam_result
            .map(|e| e.to_string())
            .unwrap_or_else(|| "None".to_string())
    }
}

/// Grades in load order, each labelled with its student or [`UNKNOWN_STUDENT`].
pub fn grade_rows(grades: &[Grade], students: &[Student]) -> Vec<GradeRow> {
    let names: HashMap<StudentId, String> = students
        .iter()
        .map(|s| (s.id, s.display_name()))
        .collect();

    grades
        .iter()
        .map(|g| GradeRow {
            grade: g.clone(),
            student_label: names
                .get(&g.student_id)
                .cloned()
                .unwrap_or_else(|| UNKNOWN_STUDENT.to_string()),
        })
        .collect()
}

/// Format a percentage the way grade cards show it ("87.5%").
pub fn percent_label(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{:.0}%", rounded)
    } else {
        format!("{:.1}%", rounded)
    }
}
