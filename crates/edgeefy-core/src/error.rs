use core::fmt;

/// Coarse classification of [`Error`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A caller broke an argument contract (even lengths, mismatched grids, bad ratios).
    InvalidArgument,
    /// The image has zero width or height.
    EmptyImage,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    EvenLength {
        len: usize,
    },
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    DirectionOutOfRange {
        angle: f32,
    },
    InvalidRatio {
        min: f64,
        max: f64,
    },
    SizeMismatch {
        expected: usize,
        actual: usize,
    },
    EmptyImage,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyImage => ErrorKind::EmptyImage,
            Self::EvenLength { .. }
            | Self::DimensionMismatch { .. }
            | Self::DirectionOutOfRange { .. }
            | Self::InvalidRatio { .. }
            | Self::SizeMismatch { .. } => ErrorKind::InvalidArgument,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EvenLength { len } => write!(f, "length must be odd, got {len}"),
            Self::DimensionMismatch { expected, actual } => write!(
                f,
                "dimension mismatch: expected {}x{}, got {}x{}",
                expected.0, expected.1, actual.0, actual.1
            ),
            Self::DirectionOutOfRange { angle } => {
                write!(f, "direction {angle} out of range [-90, 90]")
            }
            Self::InvalidRatio { min, max } => write!(
                f,
                "invalid threshold ratios: need 0 < min < max < 1, got min {min}, max {max}"
            ),
            Self::SizeMismatch { expected, actual } => {
                write!(f, "size mismatch: expected {expected}, got {actual}")
            }
            Self::EmptyImage => write!(f, "image has zero width or height"),
        }
    }
}

impl std::error::Error for Error {}
