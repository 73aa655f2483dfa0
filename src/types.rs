use serde::Deserialize;

// GitHub API response structures. Fields beyond the ones below are ignored.
#[derive(Debug, Deserialize)]
pub struct RepositoryDto {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ContributorDto {
    pub login: String,
    pub contributions: u64,
}
