//! Client-side state container.
//!
//! Consistency model: every mutation is followed by a full resync of both
//! collections. Nothing is patched in place; the derived lists are rebuilt
//! from whichever snapshot landed last.

use crate::collate::Collator;
use crate::model::{Grade, Student};
use crate::view::{GroupFilter, SortKey, StudentView};

/// Both collections as fetched in one load cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub students: Vec<Student>,
    pub grades: Vec<Grade>,
}

/// Which of the two student lists an entry point targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListView {
    /// Read-only directory on the dashboard.
    Directory,
    /// Editable list inside the admin panel.
    Admin,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientState {
    students: Vec<Student>,
    grades: Vec<Grade>,
    directory: StudentView,
    admin: StudentView,
    stale: bool,
}

impl ClientState {
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn grades(&self) -> &[Grade] {
        &self.grades
    }

    pub fn view(&self, which: ListView) -> &StudentView {
        match which {
            ListView::Directory => &self.directory,
            ListView::Admin => &self.admin,
        }
    }

    /// True between an accepted mutation and the next student load.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    fn view_mut(&mut self, which: ListView) -> &mut StudentView {
        match which {
            ListView::Directory => &mut self.directory,
            ListView::Admin => &mut self.admin,
        }
    }

    /// Replace the student snapshot and rebuild both derived lists.
    pub fn students_loaded<C: Collator + ?Sized>(&mut self, students: Vec<Student>, collator: &C) {
        self.students = students;
        self.stale = false;
        self.directory.reload(&self.students, collator);
        self.admin.reload(&self.students, collator);
    }

    pub fn grades_loaded(&mut self, grades: Vec<Grade>) {
        self.grades = grades;
    }

    /// Apply a full load cycle.
    pub fn data_loaded<C: Collator + ?Sized>(&mut self, snapshot: Snapshot, collator: &C) {
        self.students_loaded(snapshot.students, collator);
        self.grades_loaded(snapshot.grades);
    }

    pub fn filter_changed<C: Collator + ?Sized>(
        &mut self,
        which: ListView,
        filter: GroupFilter,
        collator: &C,
    ) {
        let students = std::mem::take(&mut self.students);
        self.view_mut(which).set_filter(filter, &students, collator);
        self.students = students;
    }

    pub fn sort_changed<C: Collator + ?Sized>(
        &mut self,
        which: ListView,
        key: Option<SortKey>,
        collator: &C,
    ) {
        let students = std::mem::take(&mut self.students);
        self.view_mut(which).set_sort(key, &students, collator);
        self.students = students;
    }

    /// The backend accepted a mutation; the lists are outdated until the
    /// resync lands.
    pub fn mutation_completed(&mut self) {
        self.stale = true;
    }
}
