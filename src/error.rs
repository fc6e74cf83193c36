// SPDX-License-Identifier: MPL-2.0
use crate::feedback::FeedbackKind;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Io(String),
    Config(String),
    InvalidOptions(OptionsError),
    UnknownAdapter(String),
    MissingSlot {
        adapter: String,
        kind: FeedbackKind,
    },
}

/// Reasons `FeedbackManager::add` rejects a set of options.
///
/// These are programmer errors: they describe a call site that builds
/// options the target kind cannot display, and are expected to surface
/// during development rather than in production flows.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionsError {
    /// The kind requires a non-empty message (toasts, alerts, dialogs...).
    MissingMessage(FeedbackKind),

    /// The kind requires a non-empty title (result pages).
    MissingTitle(FeedbackKind),

    /// An action sheet was created without any action.
    NoActions,

    /// Progress values must lie within `0.0..=100.0`.
    ProgressOutOfRange(f32),

    /// Sheet snap points must be sorted, unique and within `(0.0, 1.0]`.
    InvalidSnapPoints,
}

impl fmt::Display for OptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionsError::MissingMessage(kind) => {
                write!(f, "{} requires a non-empty message", kind)
            }
            OptionsError::MissingTitle(kind) => write!(f, "{} requires a non-empty title", kind),
            OptionsError::NoActions => write!(f, "action sheet requires at least one action"),
            OptionsError::ProgressOutOfRange(value) => {
                write!(f, "progress {} is outside 0..=100", value)
            }
            OptionsError::InvalidSnapPoints => write!(
                f,
                "snap points must be strictly increasing fractions in (0, 1]"
            ),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::InvalidOptions(e) => write!(f, "Invalid Options: {}", e),
            Error::UnknownAdapter(name) => write!(f, "Unknown Adapter: {}", name),
            Error::MissingSlot { adapter, kind } => {
                write!(f, "Adapter '{}' has no slot for {}", adapter, kind)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<OptionsError> for Error {
    fn from(err: OptionsError) -> Self {
        Error::InvalidOptions(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
