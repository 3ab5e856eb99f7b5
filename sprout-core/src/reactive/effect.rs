//! Effect Implementation
//!
//! An Effect is a side-effecting computation that re-runs whenever one of the
//! signals it was registered on is set.
//!
//! # How Effects Work
//!
//! 1. An effect is created from a zero-argument callback. Creating it does not
//!    run it.
//!
//! 2. Registering it on a signal runs it once immediately, so whatever it
//!    renders or derives is in place without a separate bootstrap call.
//!
//! 3. Every later `set` on that signal runs it again, synchronously.
//!
//! # Identity
//!
//! Closures cannot be compared, so each effect carries an [`EffectId`]. Clones
//! of an [`Effect`] share the id, and signals deduplicate registrations by it.
//!
//! # Explicit Dependencies
//!
//! There is no tracking context. The caller enumerates the signals an effect
//! depends on, either by calling [`Signal::add_effect`] directly or through
//! [`add_effect`] for several signals at once.
//!
//! [`Signal::add_effect`]: super::Signal::add_effect

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

/// Unique identifier for an effect.
///
/// Signals key their effect sets by this id, which is what makes registering
/// the same effect twice a no-op for later notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EffectId(u64);

impl EffectId {
    /// Generate a new unique effect ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl Default for EffectId {
    fn default() -> Self {
        Self::new()
    }
}

/// A side-effecting computation registered on one or more signals.
///
/// # Example
///
/// ```rust
/// use sprout_core::reactive::{Effect, Signal};
///
/// let count = Signal::new(0);
///
/// let reader = count.clone();
/// let effect = Effect::new(move || {
///     println!("Count is: {}", reader.cur());
/// });
///
/// count.add_effect(&effect); // Prints: "Count is: 0"
/// count.set(5);              // Prints: "Count is: 5"
/// assert_eq!(effect.run_count(), 2);
/// ```
pub struct Effect {
    id: EffectId,

    /// The effect function.
    run: Arc<dyn Fn() + Send + Sync>,

    /// Number of times the effect has run, shared across clones.
    run_count: Arc<AtomicUsize>,
}

impl Effect {
    /// Wrap a callback as an effect. The callback is not run until the effect
    /// is registered on a signal.
    pub fn new<F>(run: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            id: EffectId::new(),
            run: Arc::new(run),
            run_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get the effect's unique ID.
    pub fn id(&self) -> EffectId {
        self.id
    }

    /// Run the effect function once.
    ///
    /// The run is counted before the callback is invoked, so a callback that
    /// panics still shows up in [`run_count`](Self::run_count).
    pub fn execute(&self) {
        self.run_count.fetch_add(1, Ordering::SeqCst);
        (self.run)();
    }

    /// Get the number of times the effect has run.
    pub fn run_count(&self) -> usize {
        self.run_count.load(Ordering::SeqCst)
    }
}

impl Clone for Effect {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            run: Arc::clone(&self.run),
            run_count: Arc::clone(&self.run_count),
        }
    }
}

impl std::fmt::Debug for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Effect")
            .field("id", &self.id)
            .field("run_count", &self.run_count())
            .finish()
    }
}

/// Anything an effect can be registered on.
///
/// Object safe, so signals holding different value types can be listed
/// together when one effect depends on all of them.
pub trait Observable {
    /// Run `effect` once now and re-run it on every later change.
    fn add_effect(&self, effect: &Effect);
}

/// Register one effect on every given signal.
///
/// Each registration runs the effect immediately, so with `n` signals the
/// effect has run `n` times before any of them changes.
///
/// ```rust
/// use sprout_core::reactive::{add_effect, Effect, Signal};
///
/// let first = Signal::new("a".to_string());
/// let second = Signal::new(1);
///
/// let effect = Effect::new(|| {});
/// add_effect(&effect, &[&first, &second]);
/// assert_eq!(effect.run_count(), 2);
///
/// second.set(2);
/// assert_eq!(effect.run_count(), 3);
/// ```
pub fn add_effect(effect: &Effect, signals: &[&dyn Observable]) {
    for signal in signals {
        signal.add_effect(effect);
    }
}

/// Create an effect from `run` and register it on every given signal.
pub fn effect<F>(run: F, signals: &[&dyn Observable]) -> Effect
where
    F: Fn() + Send + Sync + 'static,
{
    let effect = Effect::new(run);
    add_effect(&effect, signals);
    effect
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::Signal;
    use std::sync::atomic::AtomicI32;

    #[test]
    fn effect_ids_are_unique() {
        let id1 = EffectId::new();
        let id2 = EffectId::new();
        let id3 = EffectId::new();

        assert_ne!(id1, id2);
        assert_ne!(id2, id3);
        assert_ne!(id1, id3);
    }

    #[test]
    fn effect_does_not_run_on_creation() {
        let run_count = Arc::new(AtomicI32::new(0));
        let run_count_clone = run_count.clone();

        let effect = Effect::new(move || {
            run_count_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(run_count.load(Ordering::SeqCst), 0);
        assert_eq!(effect.run_count(), 0);

        effect.execute();
        assert_eq!(run_count.load(Ordering::SeqCst), 1);
        assert_eq!(effect.run_count(), 1);
    }

    #[test]
    fn effect_clone_shares_state() {
        let effect1 = Effect::new(|| {});
        let effect2 = effect1.clone();

        assert_eq!(effect1.id(), effect2.id());

        effect1.execute();
        assert_eq!(effect1.run_count(), 1);
        assert_eq!(effect2.run_count(), 1);

        effect2.execute();
        assert_eq!(effect1.run_count(), 2);
    }

    #[test]
    fn add_effect_runs_once_per_signal() {
        let a = Signal::new(0);
        let b = Signal::new(String::new());
        let c = Signal::new(false);

        let effect = Effect::new(|| {});
        add_effect(&effect, &[&a, &b, &c]);

        // Not coalesced into a single initial run
        assert_eq!(effect.run_count(), 3);

        // Each signal re-runs it independently
        a.set(1);
        assert_eq!(effect.run_count(), 4);
        c.set(true);
        assert_eq!(effect.run_count(), 5);
    }

    #[test]
    fn add_effect_with_no_signals_never_runs() {
        let effect = effect(|| {}, &[]);
        assert_eq!(effect.run_count(), 0);
    }

    #[test]
    fn effect_helper_registers_and_runs() {
        let signal = Signal::new(1);
        let seen = Arc::new(AtomicI32::new(0));

        let reader = signal.clone();
        let seen_clone = seen.clone();
        let handle = effect(
            move || seen_clone.store(reader.cur(), Ordering::SeqCst),
            &[&signal],
        );

        assert_eq!(seen.load(Ordering::SeqCst), 1);
        signal.set(7);
        assert_eq!(seen.load(Ordering::SeqCst), 7);
        assert_eq!(handle.run_count(), 2);
    }
}
