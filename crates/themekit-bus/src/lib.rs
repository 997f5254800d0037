/*
 * themekit-bus
 * Copyright (c) 2025 Posit, PBC
 *
 * Event bus abstraction shared by themekit plugins.
 *
 * Plugins never call each other directly. They publish events, subscribe
 * to events, and issue requests that wait for a single (possibly
 * aggregated) reply. This crate defines that capability set as a trait so
 * consumers can depend on it without binding to a particular runtime:
 *
 * - EventBus: publish / subscribe / request-one-reply
 * - EventHandler: a listener registered for one event name
 * - LocalBus: in-process implementation used by composition roots and tests
 */

mod local;
mod traits;

pub use local::LocalBus;
pub use traits::{BoxError, BusError, BusResult, EventBus, EventHandler, FnHandler, handler_fn};
