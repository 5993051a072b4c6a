use thiserror::Error;

/// Failures of a filter pass. Both abort the current packaging run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    /// A unit set `toDeploy` to something other than a boolean.
    #[error("toDeploy property must be a boolean")]
    Configuration { unit: String },

    /// The store enumerated a unit it could not return.
    #[error("unit '{0}' was listed by the registry but could not be fetched")]
    UnknownUnit(String),
}

impl FilterError {
    /// Name of the unit that caused the failure.
    pub fn unit(&self) -> &str {
        match self {
            Self::Configuration { unit } => unit,
            Self::UnknownUnit(unit) => unit,
        }
    }
}
