use crate::config::StoreConfig;
use log::{debug, trace, warn};
use models::{Curriculum, ValidationErrors};
use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    fmt::{Debug, Formatter, Result as FmtResult},
    rc::{Rc, Weak},
};

type Observer = Rc<RefCell<dyn FnMut(&Curriculum)>>;

struct Slot {
    id: u64,
    observer: Observer,
}

struct Inner {
    config: Cell<StoreConfig>,
    value: RefCell<Rc<Curriculum>>,
    subscribers: RefCell<Vec<Slot>>,
    next_id: Cell<u64>,
    /// Snapshots still to be announced, one per write
    pending: RefCell<VecDeque<Rc<Curriculum>>>,
    /// Set while observers are being called
    dispatching: Cell<bool>,
}

impl Inner {
    fn is_subscribed(&self, id: u64) -> bool {
        self.subscribers.borrow().iter().any(|slot| slot.id == id)
    }

    fn remove(&self, id: u64) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|slot| slot.id != id);
        subscribers.len() != before
    }
}

/// Clears the dispatch flag even if an observer panics
struct DispatchGuard<'a>(&'a Inner);

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.0.pending.borrow_mut().clear();
        }
        self.0.dispatching.set(false);
    }
}

/// Observable holder of the current [`Curriculum`].
///
/// Cloning gives another handle to the same store. The store is meant for a
/// single-threaded UI context and is neither `Send` nor `Sync`.
///
/// Every write is followed by one notification round that calls each
/// observer once, in subscription order, with an immutable snapshot. A write
/// made from inside an observer is stored at once, but its round is queued
/// until the current round has finished, so rounds never interleave.
#[derive(Clone)]
pub struct CurriculumStore {
    inner: Rc<Inner>,
}

impl CurriculumStore {
    /// An empty store: no credits, no modules, no courses
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            inner: Rc::new(Inner {
                config: Cell::new(config),
                value: RefCell::new(Rc::new(Curriculum::default())),
                subscribers: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
                pending: RefCell::new(VecDeque::new()),
                dispatching: Cell::new(false),
            }),
        }
    }

    pub fn config(&self) -> StoreConfig {
        self.inner.config.get()
    }

    /// Replaces the configuration for all later writes
    pub fn configure(&self, config: StoreConfig) {
        debug!("Store configured: {config:?}");
        self.inner.config.set(config);
    }

    /// Snapshot of the current value
    pub fn get(&self) -> Rc<Curriculum> {
        Rc::clone(&self.inner.value.borrow())
    }

    /// Registers `observer`, calls it right away with the current value and
    /// again after every write until [`Subscription::unsubscribe`] is called
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: FnMut(&Curriculum) + 'static,
    {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);

        let observer: Observer = Rc::new(RefCell::new(observer));
        self.inner.subscribers.borrow_mut().push(Slot {
            id,
            observer: Rc::clone(&observer),
        });
        debug!("Subscriber {id} added ({} total)", self.subscriber_count());

        let current = self.get();
        self.dispatch(|| (&mut *observer.borrow_mut())(&current));

        Subscription {
            id,
            store: Rc::downgrade(&self.inner),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }

    /// Replaces the current value and notifies every observer
    pub fn set(&self, value: Curriculum) {
        if self.inner.config.get().audit_writes {
            audit(&value);
        }
        self.replace(value);
    }

    /// Replaces the current value with `transform` applied to it and
    /// notifies every observer
    pub fn update<F>(&self, transform: F)
    where
        F: FnOnce(&Curriculum) -> Curriculum,
    {
        let current = self.get();
        self.set(transform(&current));
    }

    /// Like [`CurriculumStore::set`], but only if `value` passes validation
    ///
    /// # Errors
    /// Every validation issue of `value`; the store is left untouched
    pub fn try_set(&self, value: Curriculum) -> Result<(), ValidationErrors> {
        if let Err(err) = value.validate() {
            debug!("Rejected write: {err}");
            return Err(err);
        }
        self.replace(value);
        Ok(())
    }

    /// Like [`CurriculumStore::update`], but only if the transformed value
    /// passes validation
    ///
    /// # Errors
    /// Every validation issue of the new value; the store is left untouched
    pub fn try_update<F>(&self, transform: F) -> Result<(), ValidationErrors>
    where
        F: FnOnce(&Curriculum) -> Curriculum,
    {
        let current = self.get();
        self.try_set(transform(&current))
    }

    fn replace(&self, value: Curriculum) {
        let snapshot = Rc::new(value);
        debug!(
            "Curriculum replaced: {} credits, {} modules, {} courses",
            snapshot.credits,
            snapshot.modules.len(),
            snapshot.courses.len()
        );
        *self.inner.value.borrow_mut() = Rc::clone(&snapshot);
        self.inner.pending.borrow_mut().push_back(snapshot);

        self.dispatch(|| ());
    }

    /// Runs `call` and then announces every pending write. If observers are
    /// already being called further up the stack, `call` runs directly and
    /// the outer dispatch picks up whatever it queued.
    fn dispatch(&self, call: impl FnOnce()) {
        if self.inner.dispatching.replace(true) {
            call();
            return;
        }
        let _guard = DispatchGuard(&self.inner);

        call();
        loop {
            let next = self.inner.pending.borrow_mut().pop_front();
            let Some(snapshot) = next else {
                break;
            };
            self.notify(&snapshot);
        }
    }

    fn notify(&self, snapshot: &Curriculum) {
        let round: Vec<(u64, Observer)> = self
            .inner
            .subscribers
            .borrow()
            .iter()
            .map(|slot| (slot.id, Rc::clone(&slot.observer)))
            .collect();
        trace!("Notifying {} subscriber(s)", round.len());

        for (id, observer) in round {
            // dropped by an earlier observer in this round
            if !self.inner.is_subscribed(id) {
                continue;
            }
            (&mut *observer.borrow_mut())(snapshot);
        }
    }
}

impl Default for CurriculumStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for CurriculumStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CurriculumStore")
            .field("config", &self.inner.config.get())
            .field("value", &self.get())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

fn audit(value: &Curriculum) {
    for issue in value.issues() {
        warn!("Storing curriculum with issue: {issue}");
    }
}

/// Registration of one observer on a [`CurriculumStore`].
///
/// Dropping it leaves the observer registered. It does not keep the store
/// alive.
#[must_use = "the observer stays registered; keep this to unsubscribe later"]
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    store: Weak<Inner>,
}

impl Subscription {
    /// Stops further notifications. Returns `false` if the observer was
    /// already gone or the store no longer exists.
    pub fn unsubscribe(self) -> bool {
        let Some(inner) = self.store.upgrade() else {
            return false;
        };
        let removed = inner.remove(self.id);
        if removed {
            debug!("Subscriber {} removed", self.id);
        }
        removed
    }

    pub fn is_active(&self) -> bool {
        self.store
            .upgrade()
            .is_some_and(|inner| inner.is_subscribed(self.id))
    }
}
