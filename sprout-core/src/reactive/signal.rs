//! Signal Implementation
//!
//! A Signal is the fundamental reactive primitive. It holds a value and the
//! ordered set of effects to re-run when that value is replaced.
//!
//! # How Signals Work
//!
//! 1. Effects are registered explicitly with [`Signal::add_effect`]. The
//!    effect runs once right away and is then stored, keyed by its
//!    [`EffectId`], in registration order.
//!
//! 2. [`Signal::set`] always stores the new value and then runs every stored
//!    effect, in order, before returning. There is no equality check: setting
//!    a value equal to the current one still notifies.
//!
//! 3. Effects are never unregistered, so a signal's effect set only grows.
//!
//! # Re-entrancy
//!
//! No lock is held while an effect runs. The effect list is copied out before
//! the pass starts, so an effect may read this signal, set it again (a nested
//! pass completes before the outer one continues) or register new effects
//! (they run at registration and join from the next `set` on).
//!
//! # Panics in Effects
//!
//! A panicking effect unwinds out of `set`. Effects after it are skipped for
//! that pass; the new value stays stored and the signal keeps working.

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use indexmap::IndexMap;
use parking_lot::{Mutex, RwLock};

use super::effect::{Effect, EffectId, Observable};

/// Counter for generating unique signal IDs.
static SIGNAL_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate a new unique signal ID.
fn next_signal_id() -> u64 {
    SIGNAL_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// A reactive signal holding a value of type T.
///
/// Cloning a signal yields another handle to the same value and effect set.
///
/// # Example
///
/// ```rust
/// use sprout_core::reactive::Signal;
///
/// let count = Signal::new(0);
/// assert_eq!(count.cur(), 0);
///
/// // Update the value (notifies effects)
/// count.set(5);
/// assert_eq!(count.cur(), 5);
/// ```
pub struct Signal<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Unique identifier for this signal.
    id: u64,

    value: Arc<RwLock<T>>,

    /// Registered effects in registration order, deduplicated by identity.
    effects: Arc<Mutex<IndexMap<EffectId, Effect>>>,
}

impl<T> Signal<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a new signal with the given initial value.
    pub fn new(value: T) -> Self {
        Self {
            id: next_signal_id(),
            value: Arc::new(RwLock::new(value)),
            effects: Arc::new(Mutex::new(IndexMap::new())),
        }
    }

    /// Get the signal's unique ID.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Get a clone of the current value.
    pub fn cur(&self) -> T {
        self.value.read().clone()
    }

    /// Borrow the current value without cloning it.
    ///
    /// `f` must not set or update this signal.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&*self.value.read())
    }

    /// Replace the value and run every registered effect.
    pub fn set(&self, value: T) {
        *self.value.write() = value;
        self.notify();
    }

    /// Mutate the value in place, then run every registered effect.
    ///
    /// `f` runs under the write lock, so it must not read or set this signal.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut *self.value.write());
        self.notify();
    }

    /// Mutate the value in place without notifying anyone.
    ///
    /// As with [`update`](Self::update), `f` must not read or set this signal.
    /// Effects keep showing the old state until the next [`set`](Self::set)
    /// or [`update`](Self::update).
    pub fn update_untracked(&self, f: impl FnOnce(&mut T)) {
        f(&mut *self.value.write());
    }

    /// Run `effect` once now and on every later `set`.
    ///
    /// Registering the same effect again runs it again now, but it is still
    /// only stored, and therefore notified, once.
    pub fn add_effect(&self, effect: &Effect) {
        effect.execute();

        let mut effects = self.effects.lock();
        let fresh = effects.insert(effect.id(), effect.clone()).is_none();
        tracing::trace!(
            signal = self.id,
            effect = effect.id().raw(),
            fresh,
            "effect registered"
        );
    }

    /// Create a handle that does not keep the signal alive.
    ///
    /// Effects that read the signal they are registered on should hold one of
    /// these; a strong clone would form a reference cycle through the effect
    /// set. The upgrade always succeeds while the signal is running them.
    pub fn downgrade(&self) -> WeakSignal<T> {
        WeakSignal {
            id: self.id,
            value: Arc::downgrade(&self.value),
            effects: Arc::downgrade(&self.effects),
        }
    }

    /// Get the number of distinct registered effects.
    pub fn effect_count(&self) -> usize {
        self.effects.lock().len()
    }

    /// Run all registered effects in registration order.
    fn notify(&self) {
        let effects: Vec<Effect> = self.effects.lock().values().cloned().collect();
        tracing::trace!(signal = self.id, effects = effects.len(), "signal set");

        for effect in &effects {
            effect.execute();
        }
    }
}

impl<T> Observable for Signal<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn add_effect(&self, effect: &Effect) {
        Signal::add_effect(self, effect);
    }
}

impl<T> Clone for Signal<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            value: Arc::clone(&self.value),
            effects: Arc::clone(&self.effects),
        }
    }
}

/// A non-owning handle to a [`Signal`].
pub struct WeakSignal<T>
where
    T: Clone + Send + Sync + 'static,
{
    id: u64,
    value: Weak<RwLock<T>>,
    effects: Weak<Mutex<IndexMap<EffectId, Effect>>>,
}

impl<T> WeakSignal<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Get a strong handle, if the signal is still alive.
    pub fn upgrade(&self) -> Option<Signal<T>> {
        Some(Signal {
            id: self.id,
            value: self.value.upgrade()?,
            effects: self.effects.upgrade()?,
        })
    }
}

impl<T> Clone for WeakSignal<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            value: Weak::clone(&self.value),
            effects: Weak::clone(&self.effects),
        }
    }
}

impl<T> Default for Signal<T>
where
    T: Clone + Default + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Debug for Signal<T>
where
    T: Clone + Send + Sync + Debug + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("id", &self.id)
            .field("value", &*self.value.read())
            .field("effect_count", &self.effect_count())
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use std::sync::atomic::AtomicI32;

    fn recorder(log: &Arc<Mutex<Vec<&'static str>>>, name: &'static str) -> Effect {
        let log = log.clone();
        Effect::new(move || log.lock().push(name))
    }

    #[test]
    fn signal_cur_and_set() {
        let signal = Signal::new(0);
        assert_eq!(signal.cur(), 0);

        signal.set(42);
        assert_eq!(signal.cur(), 42);
    }

    #[test]
    fn add_effect_runs_immediately() {
        let signal = Signal::new(0);
        let call_count = Arc::new(AtomicI32::new(0));
        let call_count_clone = call_count.clone();

        signal.add_effect(&Effect::new(move || {
            call_count_clone.fetch_add(1, Ordering::SeqCst);
        }));

        assert_eq!(call_count.load(Ordering::SeqCst), 1);

        signal.set(1);
        assert_eq!(call_count.load(Ordering::SeqCst), 2);

        signal.set(2);
        assert_eq!(call_count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn set_notifies_even_when_value_is_unchanged() {
        let signal = Signal::new(7);
        let effect = Effect::new(|| {});
        signal.add_effect(&effect);

        signal.set(7);
        signal.set(7);
        assert_eq!(effect.run_count(), 3);
    }

    #[test]
    fn effects_run_in_registration_order() {
        let signal = Signal::new(());
        let log = Arc::new(Mutex::new(Vec::new()));

        signal.add_effect(&recorder(&log, "first"));
        signal.add_effect(&recorder(&log, "second"));
        signal.add_effect(&recorder(&log, "third"));
        log.lock().clear();

        signal.set(());
        assert_eq!(*log.lock(), vec!["first", "second", "third"]);
    }

    #[test]
    fn duplicate_registration_is_stored_once() {
        let signal = Signal::new(0);
        let effect = Effect::new(|| {});

        signal.add_effect(&effect);
        signal.add_effect(&effect.clone());

        // Both registrations ran it immediately
        assert_eq!(effect.run_count(), 2);
        assert_eq!(signal.effect_count(), 1);

        signal.set(1);
        assert_eq!(effect.run_count(), 3);
    }

    #[test]
    fn update_mutates_and_notifies() {
        let signal = Signal::new(vec![1, 2]);
        let effect = Effect::new(|| {});
        signal.add_effect(&effect);

        signal.update(|v| v.push(3));
        assert_eq!(signal.cur(), vec![1, 2, 3]);
        assert_eq!(effect.run_count(), 2);
    }

    #[test]
    fn update_untracked_does_not_notify() {
        let signal = Signal::new(vec![1, 2]);
        let effect = Effect::new(|| {});
        signal.add_effect(&effect);

        signal.update_untracked(|v| v[0] = 10);
        assert_eq!(signal.cur(), vec![10, 2]);
        assert_eq!(effect.run_count(), 1);
    }

    #[test]
    fn with_borrows_current_value() {
        let signal = Signal::new(String::from("hello"));
        assert_eq!(signal.with(|s| s.len()), 5);
    }

    #[test]
    fn signal_clone_shares_state() {
        let signal1 = Signal::new(0);
        let signal2 = signal1.clone();

        signal1.set(42);
        assert_eq!(signal2.cur(), 42);

        signal2.set(100);
        assert_eq!(signal1.cur(), 100);
        assert_eq!(signal1.id(), signal2.id());
    }

    #[test]
    fn signal_ids_are_unique() {
        let s1 = Signal::new(0);
        let s2 = Signal::new(0);
        let s3 = Signal::new(0);

        assert_ne!(s1.id(), s2.id());
        assert_ne!(s2.id(), s3.id());
        assert_ne!(s1.id(), s3.id());
    }

    #[test]
    fn effect_may_set_the_signal_it_observes() {
        let signal = Signal::new(0);
        let writer = signal.clone();

        signal.add_effect(&Effect::new(move || {
            let value = writer.cur();
            if value > 0 && value < 3 {
                writer.set(value + 1);
            }
        }));

        signal.set(1);
        // Nested passes ran to completion before the outer set returned
        assert_eq!(signal.cur(), 3);
    }

    #[test]
    fn effect_registered_during_a_pass_waits_for_the_next_set() {
        let signal = Signal::new(0);
        let late = Effect::new(|| {});

        let target = signal.clone();
        let late_clone = late.clone();
        signal.add_effect(&Effect::new(move || {
            if target.cur() == 1 {
                target.add_effect(&late_clone);
            }
        }));

        signal.set(1);
        // Ran at registration only
        assert_eq!(late.run_count(), 1);

        signal.set(2);
        assert_eq!(late.run_count(), 2);
    }

    #[test]
    fn panicking_effect_stops_the_pass() {
        let signal = Signal::new(0);
        let log = Arc::new(Mutex::new(Vec::new()));

        signal.add_effect(&recorder(&log, "before"));
        let reader = signal.clone();
        signal.add_effect(&Effect::new(move || {
            if reader.cur() == 1 {
                panic!("effect failed");
            }
        }));
        signal.add_effect(&recorder(&log, "after"));
        log.lock().clear();

        let result = catch_unwind(AssertUnwindSafe(|| signal.set(1)));
        assert!(result.is_err());
        assert_eq!(*log.lock(), vec!["before"]);

        // The value was stored and the signal still works
        assert_eq!(signal.cur(), 1);
        log.lock().clear();
        signal.set(2);
        assert_eq!(*log.lock(), vec!["before", "after"]);
    }

    #[test]
    fn weak_signal_upgrades_while_alive() {
        let signal = Signal::new(5);
        let weak = signal.downgrade();

        let upgraded = weak.upgrade().unwrap();
        assert_eq!(upgraded.cur(), 5);
        assert_eq!(upgraded.id(), signal.id());

        drop(upgraded);
        drop(signal);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn weak_signal_does_not_leak_through_effects() {
        let signal = Signal::new(0);
        let weak = signal.downgrade();
        let reader = signal.downgrade();
        signal.add_effect(&Effect::new(move || {
            let _ = reader.upgrade().map(|s| s.cur());
        }));

        drop(signal);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn debug_shows_value_and_effect_count() {
        let signal = Signal::new(3);
        signal.add_effect(&Effect::new(|| {}));
        let rendered = format!("{signal:?}");
        assert!(rendered.contains("value: 3"));
        assert!(rendered.contains("effect_count: 1"));
    }
}
