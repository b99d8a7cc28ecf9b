use thiserror::Error;

/// The four ways an engine call can fail, independent of which module
/// raised the error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A tick, sqrt price or spacing argument is outside its valid bound.
    OutOfRange,
    /// Liquidity (or another divisor) is zero where a division is required.
    DivisionByZero,
    /// An intermediate or final value does not fit its declared width.
    Overflow,
    /// A withdrawal would push the price past a mathematically valid bound.
    Underflow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MathError {
    #[error("Math error - overflow")]
    Overflow,
    #[error("Math error - underflow")]
    Underflow,
    #[error("Math error - division by zero")]
    DivisionByZero,
    #[error("BitMath error - zero input value")]
    ZeroValue,
}

impl MathError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MathError::Overflow => ErrorKind::Overflow,
            MathError::Underflow => ErrorKind::Underflow,
            MathError::DivisionByZero => ErrorKind::DivisionByZero,
            MathError::ZeroValue => ErrorKind::OutOfRange,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("State error - tick out of bounds")]
    TickOutOfBounds,
    #[error("State error - sqrtPrice out of bounds")]
    SqrtPriceOutOfBounds,
    #[error("State error - sqrtPrice is 0")]
    SqrtPriceIsZero,
    #[error("State error - liquidity is 0")]
    LiquidityIsZero,
    #[error("State error - requested amount exceeds pool reserves")]
    InsufficientReserves,
    #[error("State error - tick is not a multiple of the tick spacing")]
    TickNotAligned,
    #[error("State error - tick spacing must be positive")]
    InvalidTickSpacing,
    #[error("State error - price must be finite and non-negative")]
    InvalidPrice,
}

impl StateError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StateError::LiquidityIsZero => ErrorKind::DivisionByZero,
            StateError::InsufficientReserves => ErrorKind::Underflow,
            StateError::TickOutOfBounds
            | StateError::SqrtPriceOutOfBounds
            | StateError::SqrtPriceIsZero
            | StateError::TickNotAligned
            | StateError::InvalidTickSpacing
            | StateError::InvalidPrice => ErrorKind::OutOfRange,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    MathError(#[from] crate::error::MathError),

    #[error(transparent)]
    StateError(#[from] crate::error::StateError),
}

impl Error {
    /// Collapses the error into one of the four engine-level failure kinds.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MathError(e) => e.kind(),
            Error::StateError(e) => e.kind(),
        }
    }
}
