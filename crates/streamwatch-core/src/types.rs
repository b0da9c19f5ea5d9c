/// One viewership observation: when it was taken and how many concurrent
/// viewers the platform reported at that instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    /// Unix timestamp of the poll tick, in whole seconds.
    pub epoch_secs: i64,
    /// Concurrent viewer count reported by the platform.
    pub viewers: u64,
}

/// The maximum viewer count over a series and where it first occurred,
/// measured from the broadcast's start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeakStat {
    pub viewers: u64,
    /// Offset of the first occurrence of the maximum, in whole seconds
    /// from broadcast start.
    pub offset_secs: i64,
}

impl PeakStat {
    /// Display offset in whole minutes (truncated).
    #[must_use]
    pub fn offset_mins(&self) -> i64 {
        self.offset_secs / 60
    }
}
