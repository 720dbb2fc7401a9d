use crate::{
    course::Course,
    curriculum::Curriculum,
    variants::{Shape, Variants},
};
use std::{collections::HashMap, fmt::Display};
use thiserror::Error;

/// A single problem found in curriculum data.
/// Nothing is repaired; the data loader decides what to do about it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Two list-shaped parallel fields of a course have different lengths
    #[error("course {course}: `{field}` has {found} variant(s) but `{reference}` has {expected}")]
    MalformedCourseData {
        course: String,
        field: &'static str,
        reference: &'static str,
        expected: usize,
        found: usize,
    },

    /// A coded field holds a value outside its known set
    #[error("course {course}: `{field}` holds unknown code {value:?}")]
    InvalidEnumerationValue {
        course: String,
        field: &'static str,
        value: String,
    },

    /// A parallel field is an empty list
    #[error("course {course}: `{field}` lists no variants")]
    NoVariants { course: String, field: &'static str },

    /// Several curriculum modules share a code
    #[error("module code {code:?} is used by {count} modules")]
    DuplicateModuleCode { code: String, count: usize },
}

/// Every problem found while validating a course or curriculum
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} validation issue(s): {}", .0.len(), join_issues(.0))]
pub struct ValidationErrors(Vec<ValidationError>);

fn join_issues(issues: &[ValidationError]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    /// `Ok` if there are no issues
    pub fn check(issues: Vec<ValidationError>) -> Result<(), Self> {
        if issues.is_empty() {
            Ok(())
        } else {
            Err(Self(issues))
        }
    }

    pub fn issues(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<ValidationError> {
        self.0
    }
}

/// Flags every value of a coded field that is not a known code
fn unknown_codes<T: Display>(
    course: &str,
    field: &'static str,
    values: &Variants<T>,
    is_known: impl Fn(&T) -> bool,
    issues: &mut Vec<ValidationError>,
) {
    issues.extend(
        values
            .iter()
            .filter(|value| !is_known(*value))
            .map(|value| ValidationError::InvalidEnumerationValue {
                course: course.to_string(),
                field,
                value: value.to_string(),
            }),
    );
}

impl Course {
    /// Length mismatches between list-shaped parallel fields. The reference
    /// is the first field with the most common non-zero length. Empty lists
    /// are reported as [`ValidationError::NoVariants`] instead, and scalars
    /// apply to every variant so they never mismatch.
    pub fn alignment_issues(&self) -> Vec<ValidationError> {
        let lists: Vec<(&'static str, usize)> = self
            .parallel_fields()
            .into_iter()
            .filter(|(_, shape, len)| *shape == Shape::List && *len > 0)
            .map(|(field, _, len)| (field, len))
            .collect();

        let mut counts: HashMap<usize, usize> = HashMap::new();
        for (_, len) in &lists {
            *counts.entry(*len).or_default() += 1;
        }
        let most_common = counts.values().copied().max();
        let Some(&(reference, expected)) = lists
            .iter()
            .find(|(_, len)| counts.get(len).copied() == most_common)
        else {
            return Vec::new();
        };

        lists
            .into_iter()
            .filter(|(_, found)| *found != expected)
            .map(|(field, found)| ValidationError::MalformedCourseData {
                course: self.label(),
                field,
                reference,
                expected,
                found,
            })
            .collect()
    }

    /// Parallel fields that are empty lists
    pub(crate) fn empty_lists(&self) -> Vec<ValidationError> {
        self.parallel_fields()
            .into_iter()
            .filter(|(_, _, len)| *len == 0)
            .map(|(field, _, _)| ValidationError::NoVariants {
                course: self.label(),
                field,
            })
            .collect()
    }

    /// Every issue with this course and, recursively, its prerequisites
    pub fn issues(&self) -> Vec<ValidationError> {
        let mut issues = Vec::new();
        self.collect_issues(&mut issues);
        issues
    }

    fn collect_issues(&self, issues: &mut Vec<ValidationError>) {
        let course = self.label();

        issues.extend(self.empty_lists());
        issues.extend(self.alignment_issues());

        unknown_codes(&course, "required", &self.required, |r| r.is_known(), issues);
        unknown_codes(&course, "availability", &self.availability, |a| a.is_known(), issues);
        unknown_codes(&course, "frequency", &self.frequency, |f| f.is_known(), issues);

        for prerequisite in &self.prerequisites {
            prerequisite.collect_issues(issues);
        }
    }

    /// # Errors
    /// All issues found by [`Course::issues`]
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        ValidationErrors::check(self.issues())
    }
}

impl Curriculum {
    /// Every issue with the modules and courses of this curriculum.
    /// `credits` is not compared against the credits of its parts.
    pub fn issues(&self) -> Vec<ValidationError> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for module in &self.modules {
            *counts.entry(module.code.as_str()).or_default() += 1;
        }

        // keep declaration order so reports are stable
        let mut issues: Vec<ValidationError> = Vec::new();
        for module in &self.modules {
            let count = counts.remove(module.code.as_str()).unwrap_or_default();
            if count > 1 {
                issues.push(ValidationError::DuplicateModuleCode {
                    code: module.code.clone(),
                    count,
                });
            }
        }

        for course in &self.courses {
            course.collect_issues(&mut issues);
        }

        issues
    }

    /// # Errors
    /// All issues found by [`Curriculum::issues`]
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        ValidationErrors::check(self.issues())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        codes::{Availability, Frequency, Required},
        course::tests::intro_course,
        module::Module,
    };

    #[test]
    fn test_aligned_course_is_valid() {
        assert!(intro_course().validate().is_ok());
    }

    #[test]
    fn test_flags_misaligned_lists() {
        let mut course = intro_course();
        course.name = Variants::from(vec!["Intro to CS", "Introduction", "Einführung"]);
        course.url = Variants::from(vec!["https://example.org/cs101"]);

        let issues = course.alignment_issues();
        assert_eq!(
            issues,
            vec![
                ValidationError::MalformedCourseData {
                    course: "CS101".to_string(),
                    field: "name",
                    reference: "id",
                    expected: 2,
                    found: 3,
                },
                ValidationError::MalformedCourseData {
                    course: "CS101".to_string(),
                    field: "url",
                    reference: "id",
                    expected: 2,
                    found: 1,
                },
            ]
        );
    }

    #[test]
    fn test_reference_is_most_common_length() {
        let mut course = intro_course();
        course.id = Variants::from(vec!["CS101", "CS101-old", "CS101-new"]);

        assert_eq!(
            course.alignment_issues(),
            vec![ValidationError::MalformedCourseData {
                course: "CS101".to_string(),
                field: "id",
                reference: "name",
                expected: 2,
                found: 3,
            }]
        );
    }

    #[test]
    fn test_empty_list_reported_once() {
        let mut course = intro_course();
        course.id = Variants::many(Vec::new());

        assert_eq!(
            course.issues(),
            vec![ValidationError::NoVariants {
                course: "<no id>".to_string(),
                field: "id",
            }]
        );
    }

    #[test]
    fn test_independent_fields_do_not_misalign() {
        let mut course = intro_course();
        course.kind = Variants::from(vec!["Lecture", "Exercise", "Lab"]);
        course.subcategory = Variants::from(Vec::<String>::new());
        course.language = Variants::from("de");

        assert_eq!(course.issues(), Vec::new());
    }

    #[test]
    fn test_flags_unknown_codes() {
        let mut course = intro_course();
        course.required = Variants::many(vec![Required(1), Required(3)]);
        course.availability = Variants::single(Availability::Unknown("X".to_string()));
        course.frequency = Variants::single(Frequency::Unknown("weekly".to_string()));

        let issues = course.issues();
        assert_eq!(issues.len(), 3);
        assert!(issues.contains(&ValidationError::InvalidEnumerationValue {
            course: "CS101".to_string(),
            field: "required",
            value: "3".to_string(),
        }));
        assert!(issues.contains(&ValidationError::InvalidEnumerationValue {
            course: "CS101".to_string(),
            field: "availability",
            value: "X".to_string(),
        }));
    }

    #[test]
    fn test_checks_prerequisites() {
        let mut prerequisite = intro_course();
        prerequisite.required = Variants::single(Required(9));
        let mut course = intro_course();
        course.prerequisites.push(prerequisite);

        let err = course.validate().unwrap_err();
        assert_eq!(err.issues().len(), 1);
        assert!(err.to_string().starts_with("1 validation issue(s): course CS101"));
    }

    #[test]
    fn test_curriculum_duplicate_modules() {
        let curriculum = Curriculum::new(
            180.0,
            vec![
                Module::new("M1", "Module 1", 10.0),
                Module::new("M2", "Module 2", 10.0),
                Module::new("M1", "Module 1 (new)", 12.0),
            ],
            vec![intro_course()],
        );

        assert_eq!(
            curriculum.validate().unwrap_err().into_inner(),
            vec![ValidationError::DuplicateModuleCode {
                code: "M1".to_string(),
                count: 2,
            }]
        );
    }

    #[test]
    fn test_credits_are_not_checked() {
        let curriculum = Curriculum::new(1.0, Vec::new(), vec![intro_course()]);
        assert!(curriculum.validate().is_ok());
    }
}
