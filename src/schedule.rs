// Cooperative scheduler for the game's two clocks.
// Frame callbacks are one-shot (re-requested every tick); intervals repeat at a
// fixed period. Both are cancellable by handle, and `poll` hands back whatever
// is due so the owner can dispatch on a single thread.

use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IntervalHandle(u64);

/// One due callback, in dispatch order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tick {
    Interval(IntervalHandle),
    Frame(FrameHandle, Duration),
}

struct Interval {
    id: u64,
    period: Duration,
    next_due: Duration,
}

#[derive(Default)]
pub struct Scheduler {
    next_id: u64,
    frames: Vec<u64>,
    intervals: Vec<Interval>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn fresh_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Ask for one callback on the next poll.
    pub fn request_frame(&mut self) -> FrameHandle {
        let id = self.fresh_id();
        self.frames.push(id);
        FrameHandle(id)
    }

    pub fn cancel_frame(&mut self, handle: FrameHandle) {
        self.frames.retain(|&id| id != handle.0);
    }

    /// Fire every `period`, first at `now + period`.
    pub fn set_interval(&mut self, period: Duration, now: Duration) -> IntervalHandle {
        let id = self.fresh_id();
        self.intervals.push(Interval { id, period, next_due: now + period });
        IntervalHandle(id)
    }

    pub fn clear_interval(&mut self, handle: IntervalHandle) {
        self.intervals.retain(|i| i.id != handle.0);
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn active_intervals(&self) -> usize {
        self.intervals.len()
    }

    /// Collect everything due at `now`. Each interval fires at most once per
    /// poll; frame requests are consumed.
    pub fn poll(&mut self, now: Duration) -> Vec<Tick> {
        let mut due = Vec::new();
        for interval in &mut self.intervals {
            if now >= interval.next_due {
                interval.next_due += interval.period;
                due.push(Tick::Interval(IntervalHandle(interval.id)));
            }
        }
        due.extend(self.frames.drain(..).map(|id| Tick::Frame(FrameHandle(id), now)));
        due
    }
}
