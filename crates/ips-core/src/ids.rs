//! Strongly typed sensor identifier.
//!
//! A `SensorId` is the slot of a sensor inside its suite.  It indexes the
//! suite's `SensorRngs` and feeds the per-sensor seed mix, so two sensors of
//! the same suite never draw from the same stream.

/// Index of a sensor within a sensor suite.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorId(pub u32);

impl SensorId {
    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
