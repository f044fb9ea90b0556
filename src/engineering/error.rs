//! Engineering error types
//!
//! Every failure is reported synchronously at the command that caused it.
//! Nothing here is transient, so nothing is retried.

use thiserror::Error;

/// What kind of catalog record a lookup was for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Template,
    Item,
    Effect,
    Class,
    Attribute,
}

impl LookupKind {
    pub fn name(&self) -> &'static str {
        match self {
            LookupKind::Template => "template",
            LookupKind::Item => "item",
            LookupKind::Effect => "special effect",
            LookupKind::Class => "item class",
            LookupKind::Attribute => "attribute",
        }
    }
}

/// Errors raised by the catalog, the item facade and the modifications menu
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineeringError {
    /// Grade outside the template's defined range.
    /// Pickers only offer catalog grades, so this is a programmer error.
    #[error("grade {grade} is not defined for template '{template}'")]
    InvalidGrade { template: String, grade: u8 },

    /// Roll quality outside [0, 1]; the item is left untouched
    #[error("roll quality {0} is outside [0, 1]")]
    OutOfRange(f64),

    /// Unknown or inapplicable catalog identifier
    #[error("unknown {} '{id}'", .kind.name())]
    CatalogLookup { kind: LookupKind, id: String },

    /// Menu transition that the current item cannot support
    #[error("invalid menu transition: {0}")]
    InvalidTransition(&'static str),
}

impl EngineeringError {
    pub fn lookup(kind: LookupKind, id: impl Into<String>) -> Self {
        EngineeringError::CatalogLookup { kind, id: id.into() }
    }
}

pub type EngineeringResult<T> = Result<T, EngineeringError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = EngineeringError::lookup(LookupKind::Effect, "thermal_vent");
        assert_eq!(err.to_string(), "unknown special effect 'thermal_vent'");

        let err = EngineeringError::InvalidGrade { template: "overcharged".into(), grade: 9 };
        assert_eq!(err.to_string(), "grade 9 is not defined for template 'overcharged'");

        assert_eq!(EngineeringError::OutOfRange(1.2).to_string(), "roll quality 1.2 is outside [0, 1]");
    }
}
