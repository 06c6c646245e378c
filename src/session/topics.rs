//! Built-in debate topics and the sides a user can take.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which side of the motion the user argues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Supporting,
    Opposing,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Supporting => "supporting",
            Self::Opposing => "opposing",
        }
    }

    /// The side the automated opponent takes.
    pub fn opposite(&self) -> Self {
        match self {
            Self::Supporting => Self::Opposing,
            Self::Opposing => Self::Supporting,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "supporting" | "support" | "pro" => Ok(Self::Supporting),
            "opposing" | "oppose" | "con" => Ok(Self::Opposing),
            other => Err(format!(
                "invalid side '{other}': expected 'supporting' or 'opposing'"
            )),
        }
    }
}

/// A motion users can practice debating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DebateTopic {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
}

const TOPICS: [DebateTopic; 7] = [
    DebateTopic {
        id: 1,
        title: "Climate Policy",
        description: "Renewable energy must be adopted immediately to protect our planet.",
    },
    DebateTopic {
        id: 2,
        title: "Artificial Intelligence",
        description: "Strict AI ethics are needed to safeguard human rights.",
    },
    DebateTopic {
        id: 3,
        title: "Healthcare Reform",
        description: "Universal healthcare should be affordable and accessible.",
    },
    DebateTopic {
        id: 4,
        title: "Economic Policy",
        description: "Progressive taxation is key to reducing income inequality.",
    },
    DebateTopic {
        id: 5,
        title: "Education Systems",
        description: "Modern education must leverage tech and personalization.",
    },
    DebateTopic {
        id: 6,
        title: "Global Security",
        description: "International cooperation and strong defense are essential.",
    },
    DebateTopic {
        id: 7,
        title: "Social Justice",
        description: "Eliminating bias and ensuring equal rights is vital.",
    },
];

impl DebateTopic {
    /// All built-in topics, ordered by id.
    pub fn all() -> &'static [DebateTopic] {
        &TOPICS
    }

    pub fn find(id: u32) -> Option<&'static DebateTopic> {
        TOPICS.iter().find(|topic| topic.id == id)
    }
}

impl fmt::Display for DebateTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}
