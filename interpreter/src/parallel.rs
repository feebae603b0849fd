// Copyright (C) 2019-2022 The Railway Team.
// This file is part of the Railway library.

// The Railway library is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// The Railway library is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with the Railway library. If not, see <https://www.gnu.org/licenses/>.

//! Synchronisation for parallel calls: named barriers and the directional
//! mutex.
//!
//! The directional mutex is what keeps parallel programs reversible: lanes
//! pass in ascending TID order while time runs forwards and descending
//! order while it runs backwards, so a backward execution re-serialises
//! every guarded mutation in exactly the opposite order.

use railway_errors::{InterpreterError, RailwayError, Result};
use railway_span::Span;

use parking_lot::{Condvar, Mutex};
use std::collections::HashMap;

/// The lane a statement is executing on: its TID, the lane count, and the
/// synchronisation state shared with its siblings.
///
/// Sequential execution is the one-lane case with no shared state.
#[derive(Copy, Clone)]
pub(crate) struct Lane<'a> {
    pub tid: usize,
    pub count: usize,
    pub sync: Option<&'a SharedSync>,
}

impl Lane<'_> {
    /// The lane of all sequential execution: TID 0 of 1.
    pub fn sequential() -> Lane<'static> {
        Lane { tid: 0, count: 1, sync: None }
    }
}

#[derive(Default)]
struct BarrierState {
    arrived: usize,
    generation: u64,
}

struct MutexState {
    /// The time direction latched by the first entrant of the batch.
    direction: Option<bool>,
    /// The TID allowed to enter next.
    next: usize,
    /// Lanes that have completed their passage this batch.
    passed: usize,
    /// Is some lane currently inside the critical section?
    held: bool,
}

#[derive(Default)]
struct SyncState {
    /// The first error any lane hit; siblings are cancelled against it.
    poison: Option<RailwayError>,
    barriers: HashMap<String, BarrierState>,
    mutexes: HashMap<String, MutexState>,
}

/// The synchronisation state shared by all lanes of one parallel call.
pub(crate) struct SharedSync {
    lanes: usize,
    state: Mutex<SyncState>,
    condvar: Condvar,
}

impl SharedSync {
    pub fn new(lanes: usize) -> Self {
        Self {
            lanes,
            state: Mutex::new(SyncState::default()),
            condvar: Condvar::new(),
        }
    }

    /// Records a lane failure and wakes every waiter so siblings can
    /// cancel. The first error wins; later ones are usually sympathetic.
    pub fn fail(&self, error: RailwayError) {
        let mut state = self.state.lock();
        state.poison.get_or_insert(error);
        self.condvar.notify_all();
    }

    /// Takes the original failure out of the context, if any.
    pub fn take_failure(&self) -> Option<RailwayError> {
        self.state.lock().poison.take()
    }

    /// Blocks until every lane has arrived at a barrier of this name.
    pub fn barrier(&self, name: &str, tid: usize, span: Span) -> Result<()> {
        let mut state = self.state.lock();
        let barrier = state.barriers.entry(name.to_string()).or_default();
        let generation = barrier.generation;

        barrier.arrived += 1;
        if barrier.arrived == self.lanes {
            barrier.arrived = 0;
            barrier.generation += 1;
            self.condvar.notify_all();
            return Ok(());
        }

        loop {
            if state.poison.is_some() {
                return Err(InterpreterError::lane_cancelled(tid, span).into());
            }
            if state.barriers[name].generation != generation {
                return Ok(());
            }
            self.condvar.wait(&mut state);
        }
    }

    /// Blocks until it is this lane's turn to enter the named mutex.
    ///
    /// The first entrant of a batch latches the direction; a lane arriving
    /// against the latch is a mutex-direction error, which poisons the
    /// whole context.
    pub fn mutex_enter(&self, name: &str, tid: usize, backwards: bool, span: Span) -> Result<()> {
        let mut state = self.state.lock();

        let lanes = self.lanes;
        let mutex = state.mutexes.entry(name.to_string()).or_insert_with(|| MutexState {
            direction: None,
            next: 0,
            passed: 0,
            held: false,
        });
        if mutex.direction.is_none() {
            mutex.direction = Some(backwards);
            mutex.next = if backwards { lanes - 1 } else { 0 };
        }
        if mutex.direction != Some(backwards) {
            drop(state);
            let error: RailwayError = InterpreterError::mutex_direction(name, span).into();
            self.fail(error.clone());
            return Err(error);
        }

        loop {
            if state.poison.is_some() {
                return Err(InterpreterError::lane_cancelled(tid, span).into());
            }
            let mutex = &state.mutexes[name];
            if !mutex.held && mutex.next == tid {
                state.mutexes.get_mut(name).expect("present above").held = true;
                return Ok(());
            }
            self.condvar.wait(&mut state);
        }
    }

    /// Releases the named mutex and hands it to the next lane in the
    /// latched direction, resetting the latch once all lanes have passed.
    pub fn mutex_exit(&self, name: &str, tid: usize, backwards: bool) {
        let mut state = self.state.lock();
        if let Some(mutex) = state.mutexes.get_mut(name) {
            mutex.held = false;
            mutex.passed += 1;
            if mutex.passed == self.lanes {
                mutex.direction = None;
                mutex.next = 0;
                mutex.passed = 0;
            } else if backwards {
                mutex.next = tid.wrapping_sub(1);
            } else {
                mutex.next = tid + 1;
            }
        }
        self.condvar.notify_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn barrier_releases_all_lanes_together() {
        let sync = SharedSync::new(3);
        let before = AtomicUsize::new(0);

        std::thread::scope(|scope| {
            for tid in 0..3 {
                let sync = &sync;
                let before = &before;
                scope.spawn(move || {
                    before.fetch_add(1, Ordering::SeqCst);
                    sync.barrier("sync", tid, Span::dummy()).unwrap();
                    // Nobody passes until everyone arrived.
                    assert_eq!(before.load(Ordering::SeqCst), 3);
                });
            }
        });
    }

    #[test]
    fn mutex_passes_in_tid_order() {
        for (backwards, expected) in [(false, vec![0, 1, 2]), (true, vec![2, 1, 0])] {
            let sync = SharedSync::new(3);
            let order = Mutex::new(Vec::new());

            std::thread::scope(|scope| {
                for tid in 0..3 {
                    let sync = &sync;
                    let order = &order;
                    scope.spawn(move || {
                        sync.mutex_enter("guard", tid, backwards, Span::dummy()).unwrap();
                        order.lock().push(tid);
                        sync.mutex_exit("guard", tid, backwards);
                    });
                }
            });

            assert_eq!(*order.lock(), expected, "backwards = {backwards}");
        }
    }

    #[test]
    fn opposing_directions_poison_the_context() {
        let sync = SharedSync::new(2);

        let results = std::thread::scope(|scope| {
            let first = scope.spawn(|| sync.mutex_enter("guard", 0, false, Span::dummy()).map(|()| {
                sync.mutex_exit("guard", 0, false);
            }));
            let second = scope.spawn(|| sync.mutex_enter("guard", 1, true, Span::dummy()).map(|()| {
                sync.mutex_exit("guard", 1, true);
            }));
            [first.join().unwrap(), second.join().unwrap()]
        });

        // One lane latched a direction; the other must have failed, either
        // with the direction error or a sympathetic cancellation.
        assert!(results.iter().any(|result| result.is_err()));
        assert!(sync.take_failure().is_some());
    }
}
