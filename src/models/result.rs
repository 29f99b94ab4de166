//! Exam result records from the third-party result service

use serde::{Deserialize, Deserializer, Serialize};

/// One subject row of one student's exam
///
/// The result service sends numbers as strings, but not always; every field
/// is read leniently into a string.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SubjectResult {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub student_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub student_roll: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub class_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub group: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub section: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub shift: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub exam_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub year: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub subject: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub full_marks: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub short_marks: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub total_marks: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub grade: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub gpa: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub school_code: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub action: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub created_at: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub updated_at: String,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

/// Lookup parameters for one student's result
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StudentResultQuery {
    #[serde(default)]
    pub student_id: String,
    #[serde(default)]
    pub exam_name: String,
    #[serde(default)]
    pub year: String,
}

impl StudentResultQuery {
    /// Trimmed copy with the exam name lowercased, as the result service expects
    pub fn normalized(&self) -> Self {
        Self {
            student_id: self.student_id.trim().to_string(),
            exam_name: self.exam_name.trim().to_lowercase(),
            year: self.year.trim().to_string(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.student_id.trim().is_empty()
            && !self.exam_name.trim().is_empty()
            && !self.year.trim().is_empty()
    }
}

/// Options for the result search form
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SchoolResultInfo {
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub sections: Vec<String>,
    #[serde(default)]
    pub academic_years: Vec<String>,
    #[serde(default)]
    pub exam_names: Vec<String>,
}

/// Overall letter grade derived from an average GPA
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "F")]
    F,
}

impl Grade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::AMinus => "A-",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentInfo {
    pub name: String,
    pub student_id: String,
    pub roll: String,
    #[serde(rename = "class")]
    pub class_name: String,
    pub section: String,
    pub group: String,
    pub shift: String,
    pub exam_name: String,
    pub year: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectRow {
    pub name: String,
    pub full_marks: String,
    pub obtained_marks: String,
    pub grade: String,
    pub gpa: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultSummary {
    pub total_marks: i64,
    pub average_gpa: f64,
    pub overall_grade: Grade,
    pub total_subjects: usize,
}

/// Aggregated view of one student's exam
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedResult {
    pub student_info: StudentInfo,
    pub subjects: Vec<SubjectRow>,
    pub summary: ResultSummary,
}
