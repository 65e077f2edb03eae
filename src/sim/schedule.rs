//! Deferred actions keyed by simulation time
//!
//! Delays (death-effect expiry, the pause between rounds) are queued here and
//! fired by the tick once the simulation clock passes them. No host timers,
//! so replays are deterministic and tests never wait on a wall clock.

/// Something to do later
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduledAction {
    /// Remove the death effects with these ids (missing ids are ignored)
    ExpireDeathEffects { ids: Vec<u32> },
    /// Start the next round, if the session and round still match
    AdvanceRound { session: u32, round: u32 },
}

/// A queued action with its fire time
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledEvent {
    /// Simulation time (seconds) at or after which the action fires
    pub fire_at: f64,
    /// Insertion order, breaks ties between equal fire times
    seq: u64,
    pub action: ScheduledAction,
}

/// Queue of pending actions
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    events: Vec<ScheduledEvent>,
    next_seq: u64,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `action` to fire once the clock reaches `fire_at`
    pub fn push(&mut self, fire_at: f64, action: ScheduledAction) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.events.push(ScheduledEvent {
            fire_at,
            seq,
            action,
        });
    }

    /// Remove and return every action due at `now`, oldest fire time first
    pub fn drain_due(&mut self, now: f64) -> Vec<ScheduledAction> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.events.drain(..).partition(|e| e.fire_at <= now);
        self.events = pending;
        due.sort_by(|a, b| a.fire_at.total_cmp(&b.fire_at).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|e| e.action).collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
