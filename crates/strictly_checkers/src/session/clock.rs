//! Per-side thinking time.

use crate::types::Side;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Time used by each side.
///
/// The clock never reads the wall clock; the driver charges elapsed time
/// through [`GameSession::tick`](super::GameSession::tick).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clock {
    red: Duration,
    black: Duration,
}

impl Clock {
    /// Time charged to `side`.
    pub fn elapsed(&self, side: Side) -> Duration {
        match side {
            Side::Red => self.red,
            Side::Black => self.black,
        }
    }

    pub(crate) fn charge(&mut self, side: Side, elapsed: Duration) {
        let slot = match side {
            Side::Red => &mut self.red,
            Side::Black => &mut self.black,
        };
        *slot = slot.saturating_add(elapsed);
    }
}
