use foundation::time::Time;

/// One step of a fixed-timestep loop.
///
/// Frame time is derived from the index, never accumulated, so two loops
/// stepped the same number of times agree exactly.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    pub index: u64,
    pub dt_s: f64,
    /// Loop time at the start of this frame.
    pub time: Time,
}

impl Frame {
    pub fn new(index: u64, dt_s: f64) -> Self {
        Self {
            index,
            dt_s,
            time: Time(index as f64 * dt_s),
        }
    }

    pub fn first(dt_s: f64) -> Self {
        Self::new(0, dt_s)
    }

    pub fn next(self) -> Self {
        Self::new(self.index + 1, self.dt_s)
    }

    pub fn seconds(&self) -> f64 {
        self.time.seconds()
    }
}
