/// xorshift32 generator used for spawn placement, so a match replays from its seed.
#[derive(Clone, Copy, Debug)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 0xDEAD_BEEF } else { seed },
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        self.state
    }

    /// Integer in `[0, max)`. An empty range yields 0.
    pub fn next_int(&mut self, max: u32) -> u32 {
        self.next_u32().checked_rem(max).unwrap_or(0)
    }

    /// Uniform integer in `[0, max]`, returned as a coordinate.
    pub fn next_coordinate(&mut self, max: f64) -> f64 {
        let span = max.max(0.0).floor() as u32;
        f64::from(self.next_int(span.saturating_add(1)))
    }
}
