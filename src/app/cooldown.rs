// chat_composer — Terminal chat composer components and snapshot harness
// Copyright (C) 2025  Simon Peter Rothgang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::time::{Duration, Instant};

/// Slow mode countdown. Remaining time is tracked in whole seconds, which is
/// the resolution the composer displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cooldown {
    total_secs: u32,
    started_at: Option<Instant>,
    remaining_secs: u32,
}

impl Cooldown {
    /// A countdown frozen at `secs`. Used for fixtures, where wall time must
    /// not leak into the rendering.
    #[must_use]
    pub const fn fixed(secs: u32) -> Self {
        Self { total_secs: secs, started_at: None, remaining_secs: secs }
    }

    /// Start counting down from `secs` at `now`. Zero clears the cooldown.
    pub fn start(&mut self, secs: u32, now: Instant) {
        self.total_secs = secs;
        self.remaining_secs = secs;
        self.started_at = (secs > 0).then_some(now);
    }

    /// Recompute the remaining seconds. Returns `true` when the displayed
    /// value changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(started) = self.started_at else {
            return false;
        };
        let elapsed = now.saturating_duration_since(started).as_secs();
        let remaining =
            u32::try_from(u64::from(self.total_secs).saturating_sub(elapsed)).unwrap_or(0);
        if remaining == 0 {
            self.started_at = None;
        }
        let changed = remaining != self.remaining_secs;
        self.remaining_secs = remaining;
        changed
    }

    #[must_use]
    pub const fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.remaining_secs > 0
    }

    /// Time until the displayed value next changes, for scheduling redraws.
    #[must_use]
    pub fn until_next_change(&self, now: Instant) -> Option<Duration> {
        let started = self.started_at?;
        let elapsed = now.saturating_duration_since(started);
        let next = Duration::from_secs(elapsed.as_secs() + 1);
        Some(next.saturating_sub(elapsed))
    }
}
