//! Run identifier parsing.
//!
//! The tool is invoked with one identifier shaped like `a_b_c_tag_rank`.
//! The first four tokens name the dump series; the rank is carried along
//! but does not select anything.

use crate::utils::config::{OUTPUT_SUFFIX, RUN_ID_TOKENS};
use crate::utils::error::RunIdError;
use std::fmt;

/// Parsed `a_b_c_tag_rank` identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunId {
    prefix: [String; 3],
    dataset_tag: String,
    rank: String,
}

impl RunId {
    /// Split an identifier into its five tokens
    pub fn parse(id: &str) -> Result<Self, RunIdError> {
        let tokens: Vec<&str> = id.split('_').collect();

        if tokens.len() != RUN_ID_TOKENS {
            return Err(RunIdError::WrongTokenCount {
                id: id.to_string(),
                expected: RUN_ID_TOKENS,
                found: tokens.len(),
            });
        }

        if tokens.iter().any(|t| t.is_empty()) {
            return Err(RunIdError::EmptyToken(id.to_string()));
        }

        Ok(Self {
            prefix: [
                tokens[0].to_string(),
                tokens[1].to_string(),
                tokens[2].to_string(),
            ],
            dataset_tag: tokens[3].to_string(),
            rank: tokens[4].to_string(),
        })
    }

    /// Name shared by every dump of the series (`a_b_c_tag`)
    pub fn base_name(&self) -> String {
        format!("{}_{}", self.prefix.join("_"), self.dataset_tag)
    }

    /// `<base>_all.vsh5`
    pub fn output_file_name(&self) -> String {
        format!("{}{}", self.base_name(), OUTPUT_SUFFIX)
    }

    pub fn dataset_tag(&self) -> &str {
        &self.dataset_tag
    }

    pub fn rank(&self) -> &str {
        &self.rank
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.base_name(), self.rank)
    }
}
