use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    TooManyReceivers { max: usize, actual: usize },
    InvalidDate { field: &'static str, input: String },
    InvertedDateRange { start: String, end: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::TooManyReceivers { max, actual } => {
                write!(f, "too many receivers: {actual} (max {max})")
            }
            Self::InvalidDate { field, input } => {
                write!(f, "{field} is not a valid date: {input:?}")
            }
            Self::InvertedDateRange { start, end } => {
                write!(f, "start date {start} is after end date {end}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
