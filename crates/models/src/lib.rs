//! Data model for curriculum planning: modules, courses and the curriculum
//! that ties them together.

pub mod codes;
pub mod course;
pub mod curriculum;
pub mod module;
pub mod validation;
pub mod variants;

pub use codes::{Availability, Frequency, Required, RequiredWording};
pub use course::{Course, CourseShared, CourseVariant};
pub use curriculum::Curriculum;
pub use module::Module;
pub use validation::{ValidationError, ValidationErrors};
pub use variants::{Shape, Variants};
