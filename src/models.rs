use serde::{Deserialize, Serialize};

use crate::types::{ContributorDto, RepositoryDto};

/// Repository of an organization, reduced to what the contributor lookup needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub name: String,
}

/// Contribution count of one login within a single repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contributor {
    pub login: String,
    pub contributions: u64,
}

/// Merged contribution count of one login across an organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorTotal {
    pub login: String,
    pub contributions: u64,
}

impl Repository {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Contributor {
    pub fn new(login: impl Into<String>, contributions: u64) -> Self {
        Self {
            login: login.into(),
            contributions,
        }
    }
}

impl ContributorTotal {
    pub fn new(login: impl Into<String>, contributions: u64) -> Self {
        Self {
            login: login.into(),
            contributions,
        }
    }
}

impl From<RepositoryDto> for Repository {
    fn from(dto: RepositoryDto) -> Self {
        Self { name: dto.name }
    }
}

impl From<ContributorDto> for Contributor {
    fn from(dto: ContributorDto) -> Self {
        Self {
            login: dto.login,
            contributions: dto.contributions,
        }
    }
}
