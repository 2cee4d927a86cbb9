use fugit::HertzU32;

/// Inclusive band of tone frequencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyRange {
    pub min: HertzU32,
    pub max: HertzU32,
}

impl FrequencyRange {
    pub const fn new(min_hz: u32, max_hz: u32) -> Self {
        Self {
            min: HertzU32::from_raw(min_hz),
            max: HertzU32::from_raw(max_hz),
        }
    }

    pub fn contains(&self, frequency: HertzU32) -> bool {
        self.min <= frequency && frequency <= self.max
    }

    /// Walks the band from `min` upwards in `step` increments, never past `max`.
    pub fn steps(&self, step: HertzU32) -> impl Iterator<Item = HertzU32> {
        let stride = step.raw().max(1) as usize;
        (self.min.raw()..=self.max.raw())
            .step_by(stride)
            .map(HertzU32::from_raw)
    }
}
