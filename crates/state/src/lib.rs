//! Session-wide reactive store holding the current curriculum.

pub mod config;
pub mod store;

pub use config::StoreConfig;
pub use store::{CurriculumStore, Subscription};

thread_local! {
    static SESSION_STORE: CurriculumStore = CurriculumStore::new();
}

/// The store shared by everything running on this thread.
/// Every call returns a handle to the same store.
///
/// It starts with [`StoreConfig::default`]; the application applies its own
/// settings with [`CurriculumStore::configure`], e.g. from
/// [`StoreConfig::from_env`] at startup.
pub fn curriculum_store() -> CurriculumStore {
    SESSION_STORE.with(CurriculumStore::clone)
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::Curriculum;

    #[test]
    fn test_session_store_is_shared() {
        let writer = curriculum_store();
        let reader = curriculum_store();

        writer.set(Curriculum::new(120.0, Vec::new(), Vec::new()));
        assert_eq!(reader.get().credits, 120.0);

        writer.set(Curriculum::default());
        assert_eq!(*reader.get(), Curriculum::default());
    }

    #[test]
    fn test_session_store_starts_unconfigured() {
        let store = curriculum_store();
        assert_eq!(store.config(), StoreConfig::default());

        store.configure(StoreConfig { audit_writes: true });
        assert!(curriculum_store().config().audit_writes);
    }
}
