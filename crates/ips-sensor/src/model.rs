//! The `SensorModel` trait: one random sampling operation per sensor.

use ips_core::SensorRng;

use crate::Reading;

/// A stateless virtual sensor.
///
/// Each call to [`sample`][Self::sample] is independent of every earlier
/// call: the only state consumed is the entropy of the `rng` handed in,
/// which the engine keeps per sensor slot.
///
/// # Example
///
/// ```rust,ignore
/// let mut rng = SensorRng::new(42, SensorId(0));
/// let heading: f64 = RotationSensor.sample(&mut rng);
/// assert!((0.0..360.0).contains(&heading));
/// ```
pub trait SensorModel {
    /// The typed value this sensor produces.
    type Output: Copy;

    /// Column/sensor name used in records and logs.
    fn name(&self) -> &'static str;

    /// Draw one reading.
    fn sample(&self, rng: &mut SensorRng) -> Self::Output;

    /// Wrap a typed value in the type-erased [`Reading`] enum.
    fn to_reading(&self, value: Self::Output) -> Reading;

    /// Sample and wrap in one call.
    fn read(&self, rng: &mut SensorRng) -> Reading {
        let value = self.sample(rng);
        self.to_reading(value)
    }
}
