use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Gender of a collector, as recorded on credit and change documents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl TryFrom<&str> for Gender {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            other => Err(EngineError::InvalidInput(format!(
                "invalid gender: {other}"
            ))),
        }
    }
}
