//! Individual exam result lookup and aggregation

use std::sync::Arc;

use super::{ServiceError, ServiceResult};
use crate::backend::ResultSource;
use crate::models::{
    Grade, ProcessedResult, ResultSummary, SchoolResultInfo, StudentInfo, StudentResultQuery,
    SubjectResult, SubjectRow,
};

#[derive(Clone)]
pub struct ResultService {
    source: Arc<dyn ResultSource>,
}

impl ResultService {
    pub fn new(source: Arc<dyn ResultSource>) -> Self {
        Self { source }
    }

    pub async fn school_info(&self) -> ServiceResult<SchoolResultInfo> {
        Ok(self.source.school_info().await?)
    }

    /// Fetch and aggregate one student's result; `None` when nothing matched
    pub async fn lookup(&self, query: &StudentResultQuery) -> ServiceResult<Option<ProcessedResult>> {
        if !query.is_complete() {
            return Err(ServiceError::ValidationError(
                "Student ID, exam and year are required".to_string(),
            ));
        }

        let rows = self.source.student_result(query).await?;
        tracing::debug!("Result lookup for {} returned {} rows", query.student_id.trim(), rows.len());
        Ok(process_results(&rows))
    }
}

/// Aggregate subject rows into one result
///
/// Student details come from the first row. Marks and GPAs that don't parse
/// count as zero.
pub fn process_results(results: &[SubjectResult]) -> Option<ProcessedResult> {
    let first = results.first()?;

    let total_marks = results
        .iter()
        .map(|r| parse_int_prefix(&r.total_marks))
        .fold(0i64, i64::saturating_add);
    let total_gpa: f64 = results.iter().map(|r| parse_float_prefix(&r.gpa)).sum();
    let average_gpa = round2(total_gpa / results.len() as f64);

    Some(ProcessedResult {
        student_info: StudentInfo {
            name: first.name.clone(),
            student_id: first.student_id.clone(),
            roll: first.student_roll.clone(),
            class_name: first.class_name.clone(),
            section: first.section.clone(),
            group: first.group.clone(),
            shift: first.shift.clone(),
            exam_name: first.exam_name.clone(),
            year: first.year.clone(),
        },
        subjects: results
            .iter()
            .map(|r| SubjectRow {
                name: r.subject.clone(),
                full_marks: r.full_marks.clone(),
                obtained_marks: r.total_marks.clone(),
                grade: r.grade.clone(),
                gpa: r.gpa.clone(),
            })
            .collect(),
        summary: ResultSummary {
            total_marks,
            average_gpa,
            overall_grade: overall_grade(average_gpa),
            total_subjects: results.len(),
        },
    })
}

/// Letter grade for an average GPA; thresholds are inclusive
pub fn overall_grade(average_gpa: f64) -> Grade {
    if average_gpa >= 5.0 {
        Grade::APlus
    } else if average_gpa >= 4.0 {
        Grade::A
    } else if average_gpa >= 3.5 {
        Grade::AMinus
    } else if average_gpa >= 3.0 {
        Grade::B
    } else if average_gpa >= 2.0 {
        Grade::C
    } else if average_gpa >= 1.0 {
        Grade::D
    } else {
        Grade::F
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Leading integer of a string: `"85.5"` is 85, `" 72abc"` is 72, `"abc"` is 0.
/// Digit runs beyond the `i64` range saturate.
pub fn parse_int_prefix(value: &str) -> i64 {
    let value = value.trim_start();
    let (sign, digits) = split_sign(value);

    digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |n, d| {
            n.saturating_mul(10)
                .saturating_add(sign * i64::from(d - b'0'))
        })
}

/// Leading decimal number of a string: `"4.50"` is 4.5, `"3.2x"` is 3.2,
/// `".5"` is 0.5, `"abc"` is 0
pub fn parse_float_prefix(value: &str) -> f64 {
    let value = value.trim_start();
    let (sign, rest) = split_sign(value);

    let mut end = 0;
    let mut seen_dot = false;
    let mut seen_digit = false;
    for (i, c) in rest.char_indices() {
        match c {
            '0'..='9' => {
                seen_digit = true;
                end = i + 1;
            }
            '.' if !seen_dot => {
                seen_dot = true;
            }
            _ => break,
        }
    }

    if !seen_digit {
        return 0.0;
    }
    rest[..end]
        .parse::<f64>()
        .map(|n| sign as f64 * n)
        .unwrap_or(0.0)
}

fn split_sign(value: &str) -> (i64, &str) {
    if let Some(rest) = value.strip_prefix('-') {
        (-1, rest)
    } else if let Some(rest) = value.strip_prefix('+') {
        (1, rest)
    } else {
        (1, value)
    }
}
