use crate::errors::FisherError;
use crate::utils::items_to_strings;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Alternative hypothesis, selecting which tail is reported.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alternative {
    /// The observed cell is smaller than expected under the null.
    Less,
    /// The observed cell is larger than expected under the null.
    Greater,
    /// Any table no more probable than the observed one.
    #[default]
    TwoSided,
}

impl FromStr for Alternative {
    type Err = FisherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "less" | "left" => Ok(Alternative::Less),
            "greater" | "right" => Ok(Alternative::Greater),
            "two-sided" | "two_sided" | "two.sided" | "two" => Ok(Alternative::TwoSided),
            _ => Err(FisherError::ParseString(
                s.to_string(),
                "Alternative".to_string(),
                items_to_strings(&["less", "greater", "two-sided"]),
            )),
        }
    }
}

impl fmt::Display for Alternative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Alternative::Less => "less",
            Alternative::Greater => "greater",
            Alternative::TwoSided => "two-sided",
        };
        f.write_str(name)
    }
}
