//! Error type shared by the table, the genetic operators and the engine.

use std::fmt;

/// Errors raised while building a distance table or running the algorithm
#[derive(Debug)]
pub enum TspError {
    /// No cost registered between two known cities
    MissingCost { from: String, to: String },
    /// City never registered in the table
    UnknownCity(String),
    /// Attempt to set a distance from a city to itself
    SelfDistance(String),
    /// Negative, NaN or infinite cost
    InvalidCost { from: String, to: String, cost: f64 },
    /// Fewer than two cities to order
    TooFewCities(usize),
    /// Configuration outside its allowed range
    InvalidConfig(String),
    /// Crossover parents are not permutations of the same city set
    MalformedParents,
    /// Syntax error in a table file
    Parse { line: usize, message: String },
    /// Underlying I/O failure
    Io(std::io::Error),
}

pub type Result<T> = std::result::Result<T, TspError>;

impl fmt::Display for TspError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TspError::MissingCost { from, to } => {
                write!(f, "No cost registered between {} and {}", from, to)
            }
            TspError::UnknownCity(city) => write!(f, "Unknown city: {}", city),
            TspError::SelfDistance(city) => {
                write!(f, "Cannot set a distance from {} to itself", city)
            }
            TspError::InvalidCost { from, to, cost } => {
                write!(f, "Invalid cost {} between {} and {}", cost, from, to)
            }
            TspError::TooFewCities(n) => {
                write!(f, "At least 2 cities are required, got {}", n)
            }
            TspError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            TspError::MalformedParents => {
                write!(f, "Crossover parents are not permutations of the same cities")
            }
            TspError::Parse { line, message } => write!(f, "Line {}: {}", line, message),
            TspError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for TspError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TspError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TspError {
    fn from(e: std::io::Error) -> Self {
        TspError::Io(e)
    }
}

impl From<csv::Error> for TspError {
    fn from(e: csv::Error) -> Self {
        TspError::Io(e.into())
    }
}

impl From<serde_json::Error> for TspError {
    fn from(e: serde_json::Error) -> Self {
        TspError::Io(e.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_cost_message() {
        let err = TspError::MissingCost { from: "A".into(), to: "B".into() };
        assert_eq!(err.to_string(), "No cost registered between A and B");
    }

    #[test]
    fn test_io_source() {
        use std::error::Error;
        let err: TspError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(err.source().is_some());
    }
}
