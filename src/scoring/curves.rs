use serde::{Deserialize, Serialize};

/// One end of an interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Open(f64),
    Closed(f64),
    Unbounded,
}

impl Edge {
    fn admits_above(&self, value: f64) -> bool {
        match self {
            Edge::Open(n) => value > *n,
            Edge::Closed(n) => value >= *n,
            Edge::Unbounded => true,
        }
    }

    fn admits_below(&self, value: f64) -> bool {
        match self {
            Edge::Open(n) => value < *n,
            Edge::Closed(n) => value <= *n,
            Edge::Unbounded => true,
        }
    }
}

/// Points awarded once a band matches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Points {
    Fixed(f64),
    /// `max(0, intercept + slope * x)`
    Linear { intercept: f64, slope: f64 },
}

impl Points {
    pub fn at(&self, x: f64) -> f64 {
        match self {
            Points::Fixed(n) => *n,
            Points::Linear { intercept, slope } => (intercept + slope * x).max(0.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub low: Edge,
    pub high: Edge,
    pub points: Points,
}

impl Band {
    pub fn new(low: Edge, high: Edge, points: Points) -> Self {
        Self { low, high, points }
    }

    pub fn matches(&self, value: f64) -> bool {
        self.low.admits_above(value) && self.high.admits_below(value)
    }
}

/// What the curve reads from the raw indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Input {
    Raw,
    Magnitude,
}

/// Piecewise step function mapping a raw indicator onto a 0-100 score.
///
/// Bands are checked in order and the first match wins, so overlapping
/// bands resolve towards the earlier entry. Values no band admits (including
/// NaN) fall through to `otherwise`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    pub input: Input,
    pub bands: Vec<Band>,
    pub otherwise: Points,
}

impl Curve {
    pub fn score(&self, value: f64) -> f64 {
        let x = match self.input {
            Input::Raw => value,
            Input::Magnitude => value.abs(),
        };
        self.bands
            .iter()
            .find(|band| band.matches(x))
            .map(|band| band.points.at(x))
            .unwrap_or_else(|| self.otherwise.at(x))
    }

    /// Output gap (percent of potential GDP). Zero gap is ideal.
    pub fn output_gap() -> Self {
        use Edge::*;
        Self {
            input: Input::Magnitude,
            bands: vec![
                Band::new(Unbounded, Closed(1.0), Points::Fixed(100.0)),
                Band::new(Unbounded, Closed(2.0), Points::Fixed(90.0)),
                Band::new(Unbounded, Closed(3.0), Points::Fixed(75.0)),
                Band::new(Unbounded, Closed(5.0), Points::Fixed(60.0)),
                Band::new(Unbounded, Closed(7.0), Points::Fixed(40.0)),
            ],
            otherwise: Points::Linear {
                intercept: 100.0,
                slope: -10.0,
            },
        }
    }

    /// Unemployment rate, lower is better: `max(0, 100 - 2u)`.
    pub fn unemployment() -> Self {
        Self {
            input: Input::Raw,
            bands: Vec::new(),
            otherwise: Points::Linear {
                intercept: 100.0,
                slope: -2.0,
            },
        }
    }

    /// Annual inflation; 2-3% is the target band, deflation scores 50.
    pub fn inflation() -> Self {
        use Edge::*;
        Self {
            input: Input::Raw,
            bands: vec![
                Band::new(Closed(2.0), Closed(3.0), Points::Fixed(100.0)),
                Band::new(Closed(1.0), Open(2.0), Points::Fixed(85.0)),
                Band::new(Open(3.0), Closed(4.0), Points::Fixed(85.0)),
                Band::new(Open(4.0), Closed(5.0), Points::Fixed(70.0)),
                Band::new(Open(5.0), Closed(7.0), Points::Fixed(50.0)),
                Band::new(Open(7.0), Closed(10.0), Points::Fixed(30.0)),
                Band::new(
                    Open(10.0),
                    Unbounded,
                    Points::Linear {
                        intercept: 100.0,
                        slope: -5.0,
                    },
                ),
                Band::new(Closed(0.0), Open(1.0), Points::Fixed(70.0)),
            ],
            otherwise: Points::Fixed(50.0),
        }
    }

    /// Year-over-year GDP growth; 2-4% is ideal, above 6% is overheating.
    pub fn gdp_growth() -> Self {
        use Edge::*;
        Self {
            input: Input::Raw,
            bands: vec![
                Band::new(Closed(2.0), Closed(4.0), Points::Fixed(100.0)),
                Band::new(Closed(1.0), Open(2.0), Points::Fixed(80.0)),
                Band::new(Open(4.0), Closed(6.0), Points::Fixed(85.0)),
                Band::new(Open(6.0), Unbounded, Points::Fixed(70.0)),
                Band::new(Closed(0.0), Open(1.0), Points::Fixed(60.0)),
                Band::new(Closed(-2.0), Open(0.0), Points::Fixed(30.0)),
            ],
            otherwise: Points::Linear {
                intercept: 50.0,
                slope: 5.0,
            },
        }
    }

    /// Identity for indicators already on a 0-100 scale.
    pub fn identity() -> Self {
        Self {
            input: Input::Raw,
            bands: Vec::new(),
            otherwise: Points::Linear {
                intercept: 0.0,
                slope: 1.0,
            },
        }
    }
}
