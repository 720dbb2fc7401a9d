use crate::{
    codes::{Availability, Frequency, Required},
    module::Module,
    validation::ValidationError,
    variants::{Shape, Variants},
};
use serde::{Deserialize, Serialize};

/// Label used in validation messages for a course without any id
pub(crate) const NO_ID: &str = "<no id>";

/// An academic course.
///
/// A course may bundle several variants, e.g. the same course offered under
/// different ids or names over the years. The parallel fields (`id`, `name`,
/// `credits`, `required`, `availability`, `recommended_semester`,
/// `frequency`, `language`, `description`, `url`) then hold one entry per
/// variant, index-aligned: position `i` of every list-shaped parallel field
/// describes variant `i`. A parallel field written as a bare scalar applies
/// to every variant. `subcategory`, `kind` and `module` are independent of
/// the variants.
///
/// Building the struct literally does not check alignment; use
/// [`Course::from_variants`] for that, or [`Course::validate`] afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: Variants<String>,
    pub name: Variants<String>,
    pub module: Vec<Module>,
    pub subcategory: Variants<String>,
    #[serde(rename = "type")]
    pub kind: Variants<String>,
    pub credits: Variants<f64>,
    pub required: Variants<Required>,
    pub availability: Variants<Availability>,
    pub recommended_semester: Variants<u32>,
    /// Courses that must be taken first, embedded by value
    pub prerequisites: Vec<Course>,
    pub frequency: Variants<Frequency>,
    pub language: Variants<String>,
    pub description: Variants<String>,
    pub url: Variants<String>,
}

/// One variant of a [`Course`]: a single row across all parallel fields
#[derive(Debug, Clone, PartialEq)]
pub struct CourseVariant {
    pub id: String,
    pub name: String,
    pub credits: f64,
    pub required: Required,
    pub availability: Availability,
    pub recommended_semester: u32,
    pub frequency: Frequency,
    pub language: String,
    pub description: String,
    pub url: String,
}

/// The fields of a [`Course`] that are not tied to its variants
#[derive(Debug, Clone, PartialEq)]
pub struct CourseShared {
    pub module: Vec<Module>,
    pub subcategory: Variants<String>,
    pub kind: Variants<String>,
    pub prerequisites: Vec<Course>,
}

impl CourseShared {
    pub fn new(subcategory: impl Into<Variants<String>>, kind: impl Into<Variants<String>>) -> Self {
        Self {
            module: Vec::new(),
            subcategory: subcategory.into(),
            kind: kind.into(),
            prerequisites: Vec::new(),
        }
    }

    pub fn with_module(mut self, module: Module) -> Self {
        self.module.push(module);
        self
    }

    pub fn with_prerequisite(mut self, course: Course) -> Self {
        self.prerequisites.push(course);
        self
    }
}

impl Course {
    /// Builds a course from its variants. Every parallel field gets exactly
    /// one entry per variant, so the result is aligned by construction.
    /// A single variant is stored as bare scalars.
    ///
    /// # Errors
    /// [`ValidationError::NoVariants`] if `variants` is empty
    pub fn from_variants(
        variants: Vec<CourseVariant>,
        shared: CourseShared,
    ) -> Result<Self, ValidationError> {
        if variants.is_empty() {
            return Err(ValidationError::NoVariants {
                course: NO_ID.to_string(),
                field: "id",
            });
        }

        let count = variants.len();
        let mut id = Vec::with_capacity(count);
        let mut name = Vec::with_capacity(count);
        let mut credits = Vec::with_capacity(count);
        let mut required = Vec::with_capacity(count);
        let mut availability = Vec::with_capacity(count);
        let mut recommended_semester = Vec::with_capacity(count);
        let mut frequency = Vec::with_capacity(count);
        let mut language = Vec::with_capacity(count);
        let mut description = Vec::with_capacity(count);
        let mut url = Vec::with_capacity(count);

        for variant in variants {
            id.push(variant.id);
            name.push(variant.name);
            credits.push(variant.credits);
            required.push(variant.required);
            availability.push(variant.availability);
            recommended_semester.push(variant.recommended_semester);
            frequency.push(variant.frequency);
            language.push(variant.language);
            description.push(variant.description);
            url.push(variant.url);
        }

        Ok(Self {
            id: Variants::collapse(id),
            name: Variants::collapse(name),
            module: shared.module,
            subcategory: shared.subcategory,
            kind: shared.kind,
            credits: Variants::collapse(credits),
            required: Variants::collapse(required),
            availability: Variants::collapse(availability),
            recommended_semester: Variants::collapse(recommended_semester),
            prerequisites: shared.prerequisites,
            frequency: Variants::collapse(frequency),
            language: Variants::collapse(language),
            description: Variants::collapse(description),
            url: Variants::collapse(url),
        })
    }

    /// Name, shape and length of every parallel field
    pub(crate) fn parallel_fields(&self) -> [(&'static str, Shape, usize); 10] {
        fn describe<T>(name: &'static str, field: &Variants<T>) -> (&'static str, Shape, usize) {
            (name, field.shape(), field.len())
        }

        [
            describe("id", &self.id),
            describe("name", &self.name),
            describe("credits", &self.credits),
            describe("required", &self.required),
            describe("availability", &self.availability),
            describe("recommended_semester", &self.recommended_semester),
            describe("frequency", &self.frequency),
            describe("language", &self.language),
            describe("description", &self.description),
            describe("url", &self.url),
        ]
    }

    /// Number of variants this course describes: the common length of its
    /// list-shaped parallel fields, or 1 if all of them are scalars.
    /// `None` if the lists disagree.
    pub fn variant_count(&self) -> Option<usize> {
        let mut lengths = self
            .parallel_fields()
            .into_iter()
            .filter(|(_, shape, _)| *shape == Shape::List)
            .map(|(_, _, len)| len);

        match lengths.next() {
            None => Some(1),
            Some(first) => lengths.all(|len| len == first).then_some(first),
        }
    }

    /// Variant `index`, with scalar fields applied to every variant
    pub fn variant(&self, index: usize) -> Option<CourseVariant> {
        if index >= self.variant_count()? {
            return None;
        }

        Some(CourseVariant {
            id: self.id.resolve(index)?.clone(),
            name: self.name.resolve(index)?.clone(),
            credits: *self.credits.resolve(index)?,
            required: *self.required.resolve(index)?,
            availability: self.availability.resolve(index)?.clone(),
            recommended_semester: *self.recommended_semester.resolve(index)?,
            frequency: self.frequency.resolve(index)?.clone(),
            language: self.language.resolve(index)?.clone(),
            description: self.description.resolve(index)?.clone(),
            url: self.url.resolve(index)?.clone(),
        })
    }

    /// All variants of this course in order
    ///
    /// # Errors
    /// The first empty parallel list or alignment problem found
    pub fn variants(&self) -> Result<Vec<CourseVariant>, ValidationError> {
        if let Some(issue) = self
            .empty_lists()
            .into_iter()
            .chain(self.alignment_issues())
            .next()
        {
            return Err(issue);
        }

        let count = self.variant_count().unwrap_or_default();
        Ok((0..count).filter_map(|index| self.variant(index)).collect())
    }

    pub fn ids(&self) -> &[String] {
        self.id.as_slice()
    }

    pub fn primary_id(&self) -> Option<&str> {
        self.id.first().map(String::as_str)
    }

    /// Whether any variant of this course goes by `id`
    pub fn has_id(&self, id: &str) -> bool {
        self.id.iter().any(|own| own == id)
    }

    /// Label used to point at this course in messages
    pub(crate) fn label(&self) -> String {
        self.primary_id().unwrap_or(NO_ID).to_string()
    }
}
