//! Form drafts for the admin modals and the mutations they turn into.

use crate::error::FormError;
use crate::model::{Grade, GradeId, Student, StudentId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentFields {
    pub name: String,
    pub surname: String,
    pub group_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GradeFields {
    pub student_id: StudentId,
    pub subject: String,
    pub grade: u8,
    pub semester: i32,
    pub attendance: f64,
    pub assignment: f64,
    pub exam_result: Option<u8>,
}

/// A write request against one of the admin endpoints.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    AddStudent(StudentFields),
    UpdateStudent(StudentId, StudentFields),
    DeleteStudent(StudentId),
    AddGrade(GradeFields),
    UpdateGrade(GradeId, GradeFields),
    DeleteGrade(GradeId),
}

impl Mutation {
    pub fn path(&self) -> &'static str {
        match self {
            Mutation::AddStudent(_) => "/api/admin/students/add",
            Mutation::UpdateStudent(..) => "/api/admin/students/update",
            Mutation::DeleteStudent(_) => "/api/admin/students/delete",
            Mutation::AddGrade(_) => "/api/admin/grades/add",
            Mutation::UpdateGrade(..) => "/api/admin/grades/update",
            Mutation::DeleteGrade(_) => "/api/admin/grades/delete",
        }
    }

    /// Form-encoded body, `session_id` first.
    pub fn form_fields(&self, session_token: &str) -> Vec<(&'static str, String)> {
        let mut fields = vec![("session_id", session_token.to_string())];
        match self {
            Mutation::AddStudent(s) => push_student(&mut fields, s),
            Mutation::UpdateStudent(id, s) => {
                fields.push(("id", id.to_string()));
                push_student(&mut fields, s);
            }
            Mutation::DeleteStudent(id) => fields.push(("id", id.to_string())),
            Mutation::AddGrade(g) => push_grade(&mut fields, g),
            Mutation::UpdateGrade(id, g) => {
                fields.push(("id", id.to_string()));
                push_grade(&mut fields, g);
            }
            Mutation::DeleteGrade(id) => fields.push(("id", id.to_string())),
        }
        fields
    }

    /// Text of the blocking notification when the backend refuses.
    pub fn failure_notice(&self) -> &'static str {
        match self {
            Mutation::AddStudent(_) => "Failed to add student",
            Mutation::AddGrade(_) => "Failed to add grade",
            Mutation::UpdateStudent(..) | Mutation::UpdateGrade(..) => "Failed to save changes",
            Mutation::DeleteStudent(_) | Mutation::DeleteGrade(_) => "Failed to delete",
        }
    }
}

fn push_student(fields: &mut Vec<(&'static str, String)>, s: &StudentFields) {
    fields.push(("name", s.name.clone()));
    fields.push(("surname", s.surname.clone()));
    fields.push(("group_name", s.group_name.clone()));
}

fn push_grade(fields: &mut Vec<(&'static str, String)>, g: &GradeFields) {
    fields.push(("student_id", g.student_id.to_string()));
    fields.push(("subject", g.subject.clone()));
    fields.push(("grade", g.grade.to_string()));
    fields.push(("semester", g.semester.to_string()));
    fields.push(("attendance", g.attendance.to_string()));
    fields.push(("assignment", g.assignment.to_string()));
    // The backend stores a missing exam as 0
    fields.push(("exam_result", g.exam_result.unwrap_or(0).to_string()));
}

/// Editable contents of a modal form.
pub trait FormDraft: Clone {
    /// Identifier of the record being edited.
    type Target: Copy + std::fmt::Debug + PartialEq;

    /// Validate and build the add (no target) or update mutation.
    fn to_mutation(&self, target: Option<Self::Target>) -> Result<Mutation, FormError>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentDraft {
    pub name: String,
    pub surname: String,
    pub group_name: String,
}

impl StudentDraft {
    pub fn from_student(s: &Student) -> Self {
        Self {
            name: s.name.clone(),
            surname: s.surname.clone(),
            group_name: s.group_name.clone(),
        }
    }

    fn fields(&self) -> Result<StudentFields, FormError> {
        Ok(StudentFields {
            name: required("Name", &self.name)?,
            surname: required("Surname", &self.surname)?,
            group_name: required("Group", &self.group_name)?,
        })
    }
}

impl FormDraft for StudentDraft {
    type Target = StudentId;

    fn to_mutation(&self, target: Option<StudentId>) -> Result<Mutation, FormError> {
        let fields = self.fields()?;
        Ok(match target {
            Some(id) => Mutation::UpdateStudent(id, fields),
            None => Mutation::AddStudent(fields),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GradeDraft {
    pub student_id: String,
    pub subject: String,
    pub grade: String,
    pub semester: String,
    pub attendance: String,
    pub assignment: String,
    /// Empty means no exam result.
    pub exam_result: String,
}

impl GradeDraft {
    /// Blank draft with the student picker preset.
    pub fn for_student(student: Option<StudentId>) -> Self {
        Self {
            student_id: student.map(|id| id.to_string()).unwrap_or_default(),
            ..Self::default()
        }
    }

    pub fn from_grade(g: &Grade) -> Self {
        Self {
            student_id: g.student_id.to_string(),
            subject: g.subject.clone(),
            grade: g.grade.to_string(),
            semester: g.semester.to_string(),
            attendance: g.attendance_percent.to_string(),
            assignment: g.assignment_completion.to_string(),
            exam_result: g.exam_result.map(|e| e.to_string()).unwrap_or_default(),
        }
    }

    fn fields(&self) -> Result<GradeFields, FormError> {
        let student_id = required("Student", &self.student_id)?;
        let student_id = student_id
            .parse::<StudentId>()
            .map_err(|_| FormError::NotANumber {
                field: "Student",
                value: student_id.clone(),
            })?;

        let exam_result = if self.exam_result.trim().is_empty() {
            None
        } else {
            Some(int_in_range("Exam result", &self.exam_result, 1, 5)? as u8)
        };

        Ok(GradeFields {
            student_id,
            subject: required("Subject", &self.subject)?,
            grade: int_in_range("Grade", &self.grade, 1, 5)? as u8,
            semester: int_in_range("Semester", &self.semester, 1, i64::from(i32::MAX))? as i32,
            attendance: percent("Attendance", &self.attendance)?,
            assignment: percent("Assignment completion", &self.assignment)?,
            exam_result,
        })
    }
}

impl FormDraft for GradeDraft {
    type Target = GradeId;

    fn to_mutation(&self, target: Option<GradeId>) -> Result<Mutation, FormError> {
        let fields = self.fields()?;
        Ok(match target {
            Some(id) => Mutation::UpdateGrade(id, fields),
            None => Mutation::AddGrade(fields),
        })
    }
}

/// Credentials typed into the login page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginDraft {
    pub username: String,
    pub password: String,
}

impl LoginDraft {
    /// Username is trimmed; the password is sent exactly as typed.
    pub fn validate(&self) -> Result<(String, String), FormError> {
        let username = required("Username", &self.username)?;
        if self.password.is_empty() {
            return Err(FormError::Missing("Password"));
        }
        Ok((username, self.password.clone()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterDraft {
    pub username: String,
    pub password: String,
    pub email: String,
}

impl RegisterDraft {
    pub fn validate(&self) -> Result<(String, String, String), FormError> {
        let username = required("Username", &self.username)?;
        if self.password.is_empty() {
            return Err(FormError::Missing("Password"));
        }
        let email = required("Email", &self.email)?;
        Ok((username, self.password.clone(), email))
    }
}

fn required(field: &'static str, value: &str) -> Result<String, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FormError::Missing(field));
    }
    Ok(trimmed.to_string())
}

fn int_in_range(field: &'static str, value: &str, min: i64, max: i64) -> Result<i64, FormError> {
    let raw = required(field, value)?;
    let parsed = raw.parse::<i64>().map_err(|_| FormError::NotANumber {
        field,
        value: raw.clone(),
    })?;
    if parsed < min || parsed > max {
        return Err(FormError::OutOfRange {
            field,
            min: min.to_string(),
            max: max.to_string(),
        });
    }
    Ok(parsed)
}

fn percent(field: &'static str, value: &str) -> Result<f64, FormError> {
    let raw = required(field, value)?;
    let parsed = raw
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| FormError::NotANumber {
            field,
            value: raw.clone(),
        })?;
    if !(0.0..=100.0).contains(&parsed) {
        return Err(FormError::OutOfRange {
            field,
            min: "0".to_string(),
            max: "100".to_string(),
        });
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grade_draft() -> GradeDraft {
        GradeDraft {
            student_id: "4".into(),
            subject: " Physics ".into(),
            grade: "5".into(),
            semester: "2".into(),
            attendance: "87.5".into(),
            assignment: "90".into(),
            exam_result: String::new(),
        }
    }

    #[test]
    fn test_student_add_fields() {
        let draft = StudentDraft {
            name: "Anna".into(),
            surname: "Ivanova".into(),
            group_name: "A1".into(),
        };
        let mutation = draft.to_mutation(None).unwrap();
        assert_eq!(mutation.path(), "/api/admin/students/add");
        assert_eq!(
            mutation.form_fields("tok"),
            vec![
                ("session_id", "tok".to_string()),
                ("name", "Anna".to_string()),
                ("surname", "Ivanova".to_string()),
                ("group_name", "A1".to_string()),
            ]
        );
    }

    #[test]
    fn test_student_update_carries_id() {
        let draft = StudentDraft {
            name: "Anna".into(),
            surname: "Ivanova".into(),
            group_name: "A2".into(),
        };
        let mutation = draft.to_mutation(Some(StudentId(9))).unwrap();
        assert_eq!(mutation.path(), "/api/admin/students/update");
        let fields = mutation.form_fields("tok");
        assert_eq!(fields[1], ("id", "9".to_string()));
    }

    #[test]
    fn test_student_missing_field() {
        let draft = StudentDraft {
            name: "Anna".into(),
            surname: "   ".into(),
            group_name: "A1".into(),
        };
        assert_eq!(draft.to_mutation(None), Err(FormError::Missing("Surname")));
    }

    #[test]
    fn test_whitespace_only_field_is_missing() {
        let draft = StudentDraft {
            name: "   ".into(),
            surname: " Ivanova ".into(),
            group_name: "A1".into(),
        };
        assert_eq!(draft.to_mutation(None), Err(FormError::Missing("Name")));

        let draft = StudentDraft {
            name: "Anna".into(),
            ..draft
        };
        let fields = draft.to_mutation(None).unwrap().form_fields("tok");
        assert!(fields.contains(&("surname", "Ivanova".to_string())));
    }

    #[test]
    fn test_grade_fields_and_absent_exam() {
        let mutation = grade_draft().to_mutation(None).unwrap();
        let fields = mutation.form_fields("tok");
        let get = |k: &str| fields.iter().find(|(n, _)| *n == k).map(|(_, v)| v.clone());
        assert_eq!(get("student_id").as_deref(), Some("4"));
        assert_eq!(get("subject").as_deref(), Some("Physics"));
        assert_eq!(get("attendance").as_deref(), Some("87.5"));
        assert_eq!(get("assignment").as_deref(), Some("90"));
        assert_eq!(get("exam_result").as_deref(), Some("0"));
        assert!(get("id").is_none());
    }

    #[test]
    fn test_grade_out_of_range() {
        let mut draft = grade_draft();
        draft.grade = "6".into();
        assert!(matches!(
            draft.to_mutation(None),
            Err(FormError::OutOfRange { field: "Grade", .. })
        ));

        let mut draft = grade_draft();
        draft.attendance = "100.5".into();
        assert!(matches!(
            draft.to_mutation(None),
            Err(FormError::OutOfRange { field: "Attendance", .. })
        ));

        let mut draft = grade_draft();
        draft.exam_result = "0".into();
        assert!(matches!(
            draft.to_mutation(None),
            Err(FormError::OutOfRange { field: "Exam result", .. })
        ));
    }

    #[test]
    fn test_grade_not_a_number() {
        let mut draft = grade_draft();
        draft.semester = "spring".into();
        assert_eq!(
            draft.to_mutation(None),
            Err(FormError::NotANumber {
                field: "Semester",
                value: "spring".into()
            })
        );
    }

    #[test]
    fn test_grade_draft_from_grade_round_trips_to_update() {
        let grade = Grade {
            id: GradeId(12),
            student_id: StudentId(3),
            subject: "Chemistry".into(),
            grade: 4,
            semester: 1,
            attendance_percent: 75.5,
            assignment_completion: 80.0,
            exam_result: Some(4),
        };
        let draft = GradeDraft::from_grade(&grade);
        assert_eq!(draft.exam_result, "4");
        assert_eq!(draft.attendance, "75.5");

        match draft.to_mutation(Some(grade.id)).unwrap() {
            Mutation::UpdateGrade(id, fields) => {
                assert_eq!(id, GradeId(12));
                assert_eq!(fields.student_id, StudentId(3));
                assert_eq!(fields.exam_result, Some(4));
                assert_eq!(fields.assignment, 80.0);
            }
            other => panic!("expected update, got {:?}", other),
        }
    }

    #[test]
    fn test_login_draft_requires_both_fields() {
        let draft = LoginDraft {
            username: " admin ".into(),
            password: String::new(),
        };
        assert_eq!(draft.validate(), Err(FormError::Missing("Password")));

        let draft = LoginDraft {
            username: " admin ".into(),
            password: " secret".into(),
        };
        assert_eq!(
            draft.validate(),
            Ok(("admin".to_string(), " secret".to_string()))
        );
    }

    #[test]
    fn test_register_draft_requires_email() {
        let draft = RegisterDraft {
            username: "anna".into(),
            password: "pw".into(),
            email: "".into(),
        };
        assert_eq!(draft.validate(), Err(FormError::Missing("Email")));
    }

    #[test]
    fn test_delete_fields() {
        let fields = Mutation::DeleteGrade(GradeId(5)).form_fields("tok");
        assert_eq!(
            fields,
            vec![("session_id", "tok".to_string()), ("id", "5".to_string())]
        );
        assert_eq!(
            Mutation::DeleteStudent(StudentId(1)).path(),
            "/api/admin/students/delete"
        );
    }
}
