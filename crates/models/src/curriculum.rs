use crate::{course::Course, module::Module};
use serde::{Deserialize, Serialize};

/// A whole curriculum: its modules and the courses that fill them.
///
/// `credits` is set independently and is not derived from the modules or
/// courses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Curriculum {
    pub credits: f64,
    pub modules: Vec<Module>,
    pub courses: Vec<Course>,
}

impl Curriculum {
    pub fn new(credits: f64, modules: Vec<Module>, courses: Vec<Course>) -> Self {
        Self {
            credits,
            modules,
            courses,
        }
    }

    /// Module with the given code, the first one if the code is duplicated
    pub fn module(&self, code: &str) -> Option<&Module> {
        self.modules.iter().find(|module| module.code == code)
    }

    /// Top-level course with a variant going by `id`
    pub fn course(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|course| course.has_id(id))
    }
}
