use std::fmt;

/// All tunable parameters, exposed as overrides in the server API.
#[derive(Clone, Debug)]
pub struct Params {
    // Wire growth
    pub max_wire_len: usize,
    pub min_wire_len: usize,
    pub straightness: f32,
    pub wrap_x: bool,
    pub wrap_y: bool,

    // Rasterization
    pub cell_size: usize,
    pub trace_width: f32,
    pub pad_radius: f32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            max_wire_len: 24,
            min_wire_len: 3,
            straightness: 2.0,
            wrap_x: false,
            wrap_y: false,
            cell_size: 12,
            trace_width: 4.0,
            pad_radius: 5.0,
        }
    }
}

/// Rejected configuration. Surfaced before generation starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    EmptyPattern,
    ZeroWireLength,
    StraightnessBelowOne,
    ZeroCellSize,
    ZeroStrokeSize,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyPattern => write!(f, "pattern dimensions must be positive"),
            ConfigError::ZeroWireLength => write!(f, "wire lengths must be positive"),
            ConfigError::StraightnessBelowOne => write!(f, "straightness must be >= 1"),
            ConfigError::ZeroCellSize => write!(f, "cell size must be positive"),
            ConfigError::ZeroStrokeSize => write!(f, "trace width and pad radius must be positive"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Params {
    /// Check the full run configuration, pattern dimensions included.
    pub fn validate(&self, w: usize, h: usize) -> Result<(), ConfigError> {
        if w == 0 || h == 0 {
            return Err(ConfigError::EmptyPattern);
        }
        if self.max_wire_len == 0 || self.min_wire_len == 0 {
            return Err(ConfigError::ZeroWireLength);
        }
        if !(self.straightness >= 1.0) {
            return Err(ConfigError::StraightnessBelowOne);
        }
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if !(self.trace_width > 0.0) || !(self.pad_radius > 0.0) {
            return Err(ConfigError::ZeroStrokeSize);
        }
        Ok(())
    }
}
