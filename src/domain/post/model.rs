use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub blog_id: String,
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    pub pub_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl Post {
    /// Published and not scheduled for the future
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.is_published && self.pub_date <= now
    }

    pub fn is_visible(&self, include_unpublished: bool, now: DateTime<Utc>) -> bool {
        include_unpublished || self.is_live(now)
    }

    pub fn has_category(&self, category: &str) -> bool {
        let wanted = normalize_category(category);
        self.categories
            .iter()
            .any(|c| normalize_category(c) == wanted)
    }
}

/// Trimmed, lowercased form used for category matching and grouping
pub fn normalize_category(category: &str) -> String {
    category.trim().to_lowercase()
}

/// One page of posts plus the number of matches before paging
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PagedResult {
    pub data: Vec<Post>,
    pub total_items: usize,
}

/// A post looked up by slug, with its published neighbours in time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostResult {
    pub post: Option<Post>,
    pub previous_post: Option<Post>,
    pub next_post: Option<Post>,
}

/// Page coordinates. A `page_size` of zero or less disables paging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page_number: i32,
    pub page_size: i32,
}

impl PageRequest {
    pub fn new(page_number: i32, page_size: i32) -> Self {
        Self {
            page_number,
            page_size,
        }
    }

    pub fn all() -> Self {
        Self::new(1, 0)
    }

    pub fn is_paged(&self) -> bool {
        self.page_size > 0
    }

    pub fn offset(&self) -> usize {
        if !self.is_paged() || self.page_number <= 1 {
            return 0;
        }
        (self.page_size as usize).saturating_mul((self.page_number - 1) as usize)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, 10)
    }
}

/// Calendar window over `pub_date`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateWindow {
    Year(i32),
    Month { year: i32, month: u32 },
    Day { year: i32, month: u32, day: u32 },
}

impl DateWindow {
    /// Picks the granularity from which parts are set: a day only counts when the
    /// month is set too, and a zero month or day means "not set".
    pub fn from_parts(year: i32, month: u32, day: u32) -> Self {
        match (month, day) {
            (m, d) if m > 0 && d > 0 => Self::Day {
                year,
                month: m,
                day: d,
            },
            (m, _) if m > 0 => Self::Month { year, month: m },
            _ => Self::Year(year),
        }
    }

    pub fn contains(&self, date: DateTime<Utc>) -> bool {
        match *self {
            Self::Year(year) => date.year() == year,
            Self::Month { year, month } => date.year() == year && date.month() == month,
            Self::Day { year, month, day } => {
                date.year() == year && date.month() == month && date.day() == day
            }
        }
    }

    pub fn is_year_only(&self) -> bool {
        matches!(self, Self::Year(_))
    }
}

impl std::fmt::Display for DateWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Year(year) => write!(f, "{}", year),
            Self::Month { year, month } => write!(f, "{}/{:02}", year, month),
            Self::Day { year, month, day } => write!(f, "{}/{:02}/{:02}", year, month, day),
        }
    }
}

/// Selects how uniformly the visibility predicate is applied across listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterPolicy {
    /// Visibility applies to every listing and totals are scoped to the filtered set
    #[default]
    Uniform,
    /// Uncategorized pages and year-only windows skip visibility, and dated
    /// listings report the blog-wide post count as their total
    Legacy,
}

impl std::str::FromStr for FilterPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "uniform" => Ok(Self::Uniform),
            "legacy" => Ok(Self::Legacy),
            other => Err(format!("unknown filter policy: {}", other)),
        }
    }
}
