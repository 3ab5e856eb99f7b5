//! Reactive Primitives
//!
//! This module implements the reactive core: signals and effects.
//!
//! # Concepts
//!
//! ## Signals
//!
//! A Signal is a container for mutable state plus the list of effects that
//! must re-run when that state is replaced. Every `set` notifies, whether or
//! not the value actually changed.
//!
//! ## Effects
//!
//! An Effect is a zero-argument callback meaning "recompute or re-render now".
//! Effects are registered on signals explicitly and run once at registration.
//!
//! # Implementation Notes
//!
//! Dependencies are declared, not discovered: reading a signal inside an
//! effect does not subscribe to it. The caller lists every signal an effect
//! depends on. Propagation is synchronous and happens entirely inside `set`,
//! so there is no scheduler and no batching.

mod effect;
mod signal;

pub use effect::{add_effect, effect, Effect, EffectId, Observable};
pub use signal::{Signal, WeakSignal};
