//! The multi-mode reader/writer/remover lock (C3, §4.1).
//!
//! A direct port of the source implementation's `readers_writers.c`: one `Mutex`-protected
//! counter set (`rc`/`wc`/`rw`/`ww`/`change`) and three condition variables, one per class of
//! waiter, so a release wakes exactly the class the release policy intends to hand off to.
//!
//! Built on `parking_lot::{Mutex, Condvar}` rather than `std::sync`'s poisoning primitives:
//! `parking_lot` never poisons, which matches this primitive's contract of exposing no failures
//! to callers (§4.1) — there is nothing sensible to do with a poison error here other than
//! propagate it anyway, so a non-poisoning lock removes a needless `Result` at every call site.

use log::trace;
use parking_lot::{Condvar, Mutex, MutexGuard};

/// Internal counters guarded by `DirLock::state`.
struct State {
    /// Active readers.
    rc: u32,
    /// Active writers (0 or 1).
    wc: u32,
    /// Waiting readers.
    rw: u32,
    /// Waiting writers.
    ww: u32,
    /// Hand-off intent: `0` neutral, `k > 0` the next `k` admissions must be readers, `-1` the
    /// next admission must be the writer.
    change: i64,
}

impl State {
    fn new() -> Self {
        State {
            rc: 0,
            wc: 0,
            rw: 0,
            ww: 0,
            change: 0,
        }
    }
}

/// Per-node multi-mode lock: readers, a single writer, or a single quiescence-gated remover.
pub struct DirLock {
    state: Mutex<State>,
    readers: Condvar,
    writers: Condvar,
    removers: Condvar,
}

impl DirLock {
    /// A fresh, neutral lock (no holders, no waiters).
    pub fn new() -> Self {
        DirLock {
            state: Mutex::new(State::new()),
            readers: Condvar::new(),
            writers: Condvar::new(),
            removers: Condvar::new(),
        }
    }

    /// Block until a read-mode slot is admitted.
    pub fn before_read(&self) {
        let mut state = self.state.lock();
        while state.change <= 0 && state.wc + state.ww > 0 {
            state.rw += 1;
            self.readers.wait(&mut state);
            state.rw -= 1;
        }
        if state.change > 0 {
            state.change -= 1;
        }
        state.rc += 1;
        if state.change > 0 {
            // Cascade-wake the rest of this reader cohort.
            self.readers.notify_one();
        }
        trace!("before_read: rc={} wc={} rw={} ww={}", state.rc, state.wc, state.rw, state.ww);
    }

    /// Release a previously acquired read-mode slot.
    pub fn after_read(&self) {
        let mut state = self.state.lock();
        state.rc -= 1;
        if state.rc == 0 && state.ww > 0 {
            state.change = -1;
            self.writers.notify_one();
        } else if state.rc == 0 {
            self.removers.notify_one();
        }
        trace!("after_read: rc={} ww={}", state.rc, state.ww);
    }

    /// Block until the write-mode slot is admitted.
    pub fn before_write(&self) {
        let mut state = self.state.lock();
        while state.change != -1 && state.wc + state.rc > 0 {
            state.ww += 1;
            self.writers.wait(&mut state);
            state.ww -= 1;
        }
        state.change = 0;
        state.wc += 1;
        trace!("before_write: rc={} wc={} rw={} ww={}", state.rc, state.wc, state.rw, state.ww);
    }

    /// Release the write-mode slot.
    pub fn after_write(&self) {
        let mut state = self.state.lock();
        state.wc -= 1;
        if state.rw > 0 {
            state.change = state.rw as i64;
            self.readers.notify_one();
        } else if state.ww > 0 {
            state.change = -1;
            self.writers.notify_one();
        } else {
            self.removers.notify_one();
        }
        trace!("after_write: wc={} rw={} ww={}", state.wc, state.rw, state.ww);
    }

    /// Block until the node is fully quiescent, then hold it in remove mode.
    ///
    /// There is no `after_remove`: the caller is about to destroy the node (or, per O1, may
    /// abandon the acquisition without mutating any state — see `ops::remove`).
    pub fn before_remove(&self) {
        let mut state: MutexGuard<'_, State> = self.state.lock();
        while state.rw + state.rc + state.ww + state.wc > 0 {
            self.removers.wait(&mut state);
        }
        trace!("before_remove: quiescent");
    }
}

impl Default for DirLock {
    fn default() -> Self {
        DirLock::new()
    }
}
