/// Default voice stability.
pub const DEFAULT_STABILITY: f64 = 0.5;
/// Default similarity boost.
pub const DEFAULT_SIMILARITY_BOOST: f64 = 0.8;
/// Default speaking speed multiplier.
pub const DEFAULT_SPEED: f64 = 1.0;

/// Voice tuning sent once with the init message of a stream.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VoiceSettings {
    /// 0.0 - 1.0
    stability: f64,
    /// 0.0 - 1.0
    similarity_boost: f64,
    speed: f64,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: DEFAULT_STABILITY,
            similarity_boost: DEFAULT_SIMILARITY_BOOST,
            speed: DEFAULT_SPEED,
        }
    }
}

impl VoiceSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stability(mut self, stability: f64) -> Self {
        self.stability = stability;
        self
    }

    pub fn with_similarity_boost(mut self, similarity_boost: f64) -> Self {
        self.similarity_boost = similarity_boost;
        self
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub fn stability(&self) -> f64 {
        self.stability
    }

    pub fn similarity_boost(&self) -> f64 {
        self.similarity_boost
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }
}
