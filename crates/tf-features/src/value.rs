use std::fmt;

/// One computed feature cell.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FeatureValue {
    Number(f64),
    Flag(bool),
}

impl FeatureValue {
    pub fn as_number(self) -> Option<f64> {
        match self {
            FeatureValue::Number(v) => Some(v),
            FeatureValue::Flag(_) => None,
        }
    }

    pub fn as_flag(self) -> Option<bool> {
        match self {
            FeatureValue::Flag(b) => Some(b),
            FeatureValue::Number(_) => None,
        }
    }
}

impl From<f64> for FeatureValue {
    fn from(v: f64) -> Self {
        FeatureValue::Number(v)
    }
}

impl From<bool> for FeatureValue {
    fn from(b: bool) -> Self {
        FeatureValue::Flag(b)
    }
}

/// Numbers print with Rust's shortest round-trip formatting (`3600`, `12.5`,
/// `-1`); flags print as `true`/`false`.
impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Number(v) => write!(f, "{v}"),
            FeatureValue::Flag(b) => write!(f, "{b}"),
        }
    }
}
