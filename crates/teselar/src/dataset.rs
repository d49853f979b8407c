//! Built-in dataset descriptors.

use serde::{Deserialize, Serialize};

/// The three hosted freeCodeCamp treemap datasets.
///
/// Each variant carries the display title and description shown above the
/// diagram, and the URL the JSON document is fetched from. Fetching itself
/// is the caller's concern; the descriptor only names the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dataset {
    /// Top video game sales, grouped by platform.
    #[default]
    VideoGames,
    /// Top grossing movies, grouped by genre.
    Movies,
    /// Most pledged Kickstarter campaigns, grouped by category.
    Kickstarter,
}

impl Dataset {
    /// Display title for the diagram header.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::VideoGames => "Video Game Sales",
            Self::Movies => "Movie Sales",
            Self::Kickstarter => "Kickstarter Pledges",
        }
    }

    /// One-line description shown under the title.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::VideoGames => "Top 100 Most Sold Video Games Grouped by Platform",
            Self::Movies => "Top 100 Highest Grossing Movies Grouped By Genre",
            Self::Kickstarter => {
                "Top 100 Most Pledged Kickstarter Campaigns Grouped By Category"
            }
        }
    }

    /// Source URL of the dataset JSON.
    #[must_use]
    pub fn url(self) -> &'static str {
        match self {
            Self::VideoGames => {
                "https://cdn.rawgit.com/freeCodeCamp/testable-projects-fcc/a80ce8f9/src/data/tree_map/video-game-sales-data.json"
            }
            Self::Movies => {
                "https://cdn.rawgit.com/freeCodeCamp/testable-projects-fcc/a80ce8f9/src/data/tree_map/movie-data.json"
            }
            Self::Kickstarter => {
                "https://cdn.rawgit.com/freeCodeCamp/testable-projects-fcc/a80ce8f9/src/data/tree_map/kickstarter-funding-data.json"
            }
        }
    }

    /// Resolve a `data` query parameter; unknown or absent values fall back
    /// to the default dataset.
    #[must_use]
    pub fn from_query(param: Option<&str>) -> Self {
        match param {
            Some("videogames") => Self::VideoGames,
            Some("movies") => Self::Movies,
            Some("kickstarter") => Self::Kickstarter,
            _ => Self::default(),
        }
    }
}
