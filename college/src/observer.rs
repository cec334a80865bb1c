/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Grade-change notifications.
//!
//! Every [`Student`](crate::student::Student) owns an [`ObserverList`].
//! Listeners register through [`ObserverList::subscribe`] and get back a
//! [`Subscription`]; dropping the subscription removes the listener again, so
//! a listener can never outlive the code that registered it without that code
//! asking for it ([`Subscription::detach`]).
//!
//! # Delivery
//! * Synchronous, on the thread that changed the grade.
//! * Registration order.  No duplicate check: subscribing the same observer
//!   twice delivers twice.
//! * The list lock is released before any listener runs, so a listener may
//!   subscribe or unsubscribe without deadlocking.
//! * A panicking listener unwinds into the caller of `enroll` / `update_wam`.

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

/// `current` value carried by the notification fired on first enrollment.
pub const ENROLLMENT_SENTINEL: f32 = 0.0;

// ── Event ─────────────────────────────────────────────────────────────────────

/// A course score changed for one student.
///
/// `previous` is `None` both on first enrollment and on the first grade of a
/// course; `current` is [`ENROLLMENT_SENTINEL`] for the enrollment event.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeChange {
    pub student_id: String,
    pub course_id: String,
    pub previous: Option<f32>,
    pub current: f32,
}

// ── Observer trait ────────────────────────────────────────────────────────────

/// Receives [`GradeChange`] events.
///
/// Implemented for every `Fn(&GradeChange) + Send + Sync` closure.
pub trait GradeObserver: Send + Sync {
    fn on_grade_change(&self, change: &GradeChange);
}

impl<F> GradeObserver for F
where
    F: Fn(&GradeChange) + Send + Sync,
{
    fn on_grade_change(&self, change: &GradeChange) {
        self(change)
    }
}

// ── ObserverList ──────────────────────────────────────────────────────────────

#[derive(Default)]
struct Slots {
    next_id: u64,
    entries: Vec<(u64, Arc<dyn GradeObserver>)>,
}

/// Ordered set of listeners guarded by its own lock.
#[derive(Default)]
pub struct ObserverList {
    slots: Arc<Mutex<Slots>>,
}

impl ObserverList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `observer` and return the handle that keeps it registered.
    pub fn subscribe(&self, observer: Arc<dyn GradeObserver>) -> Subscription {
        let mut slots = self.slots.lock();
        let id = slots.next_id;
        slots.next_id += 1;
        slots.entries.push((id, observer));

        Subscription {
            slots: Arc::downgrade(&self.slots),
            id,
            attached: true,
        }
    }

    /// Deliver `change` to every registered listener, in registration order.
    pub fn notify(&self, change: &GradeChange) {
        let listeners: Vec<Arc<dyn GradeObserver>> = self
            .slots
            .lock()
            .entries
            .iter()
            .map(|(_, o)| Arc::clone(o))
            .collect();

        for listener in listeners {
            listener.on_grade_change(change);
        }
    }

    pub fn len(&self) -> usize {
        self.slots.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for ObserverList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverList")
            .field("listeners", &self.len())
            .finish()
    }
}

// ── Subscription ──────────────────────────────────────────────────────────────

/// Owned registration handle returned by [`ObserverList::subscribe`].
///
/// Holds only a weak reference to the list: if the student is dropped first
/// the handle becomes inert.
#[must_use = "dropping a Subscription unregisters the observer immediately"]
pub struct Subscription {
    slots: Weak<Mutex<Slots>>,
    id: u64,
    attached: bool,
}

impl Subscription {
    /// Leave the observer registered for as long as the list lives.
    pub fn detach(mut self) {
        self.attached = false;
    }

    /// `true` while the listener is still registered on a live list.
    pub fn is_active(&self) -> bool {
        self.slots
            .upgrade()
            .map(|slots| slots.lock().entries.iter().any(|(id, _)| *id == self.id))
            .unwrap_or(false)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if !self.attached {
            return;
        }
        if let Some(slots) = self.slots.upgrade() {
            slots.lock().entries.retain(|(id, _)| *id != self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("attached", &self.attached)
            .finish()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
