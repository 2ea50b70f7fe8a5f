use std::time::Duration;

/// Per-process play statistics shown in the header. Nothing here outlives
/// the process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameMetrics {
    pub best_score: u32,
    pub games_played: u32,
    pub last_score: Option<u32>,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_game_start(&mut self) {
        self.games_played += 1;
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.last_score = Some(final_score);
        if final_score > self.best_score {
            self.best_score = final_score;
        }
    }

    /// Game time implied by `steps` ticks of length `tick`, as `mm:ss`
    pub fn format_time(steps: u32, tick: Duration) -> String {
        let total_secs = (tick * steps).as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}
