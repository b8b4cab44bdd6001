use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Staleness tag attached to every issued request.
///
/// Tags are monotonic per request kind within one session. A completion is
/// only applied when it carries the latest issued tag for its kind.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct RequestTag(u64);

impl RequestTag {
    /// Tag that no request has ever carried.
    pub const fn initial() -> Self {
        Self(0)
    }

    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl Display for RequestTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for RequestTag {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Tracks the latest issued tag and whether it is still outstanding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestTracker {
    latest: RequestTag,
    in_flight: bool,
}

impl RequestTracker {
    /// Allocate a new tag; every earlier tag becomes stale.
    pub fn issue(&mut self) -> RequestTag {
        self.latest = self.latest.next();
        self.in_flight = true;
        self.latest
    }

    /// Invalidate whatever is outstanding without issuing a request.
    pub fn supersede(&mut self) {
        self.latest = self.latest.next();
        self.in_flight = false;
    }

    pub fn is_latest(&self, tag: RequestTag) -> bool {
        self.latest == tag
    }

    /// Mark `tag` as completed. Returns false for stale tags, which leave the
    /// tracker untouched.
    pub fn settle(&mut self, tag: RequestTag) -> bool {
        if !self.is_latest(tag) {
            return false;
        }
        self.in_flight = false;
        true
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn latest(&self) -> RequestTag {
        self.latest
    }
}
