/// Game state owned by the frame loop. Holds no game logic yet.
#[derive(Debug, Default)]
pub struct GameState {
    ticks: u64,
}

impl GameState {
    pub fn tick(&mut self) {
        self.ticks += 1;
    }

    /// Frames simulated so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
