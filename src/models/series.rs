// Raw per-interval bitrate observations, one series per ASN and direction

/// Traffic direction relative to the local vantage network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Inbound,
    Outbound,
}

impl Direction {
    /// Wire/database form ("in" / "out").
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Inbound => "in",
            Direction::Outbound => "out",
        }
    }
}

/// Ordered bitrate samples (bits/s) for one ASN and direction, one per
/// fixed-width interval. Missing intervals are simply absent; an explicit
/// zero sample means "measured, no traffic".
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSeries {
    pub direction: Direction,
    pub samples: Vec<f64>,
}

impl SampleSeries {
    /// Empty series: no intervals sampled for this direction.
    pub fn empty(direction: Direction) -> Self {
        Self {
            direction,
            samples: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
