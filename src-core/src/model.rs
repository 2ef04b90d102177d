//! Records returned by the gradebook backend.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Backend identifier of a student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(pub i64);

/// Backend identifier of a grade record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GradeId(pub i64);

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for GradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for StudentId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(StudentId)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    /// Given name.
    pub name: String,
    pub surname: String,
    pub group_name: String,
}

impl Student {
    /// "Given-name surname", as shown on cards.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }

    /// "Surname given-name", the key used for name ordering.
    pub fn sort_name(&self) -> String {
        format!("{} {}", self.surname, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    pub id: GradeId,
    pub student_id: StudentId,
    pub subject: String,
    /// Grade value, 1 to 5.
    pub grade: u8,
    pub semester: i32,
    pub attendance_percent: f64,
    pub assignment_completion: f64,
    /// The backend reports a missing exam as `0` or `null`.
    #[serde(default, deserialize_with = "exam_from_wire")]
    pub exam_result: Option<u8>,
}

fn exam_from_wire<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<u8>::deserialize(deserializer)?;
    Ok(raw.filter(|v| *v != 0))
}

/// Role string stored next to the session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Admin,
    Other(String),
}

impl Role {
    pub fn parse(raw: &str) -> Self {
        if raw == "admin" {
            Role::Admin
        } else {
            Role::Other(raw.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::Other(s) => s,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}
