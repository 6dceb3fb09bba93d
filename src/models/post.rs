//! Post record extracted from one listing row.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Author shown when a row carries no nickname.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// When a post was written, as far as the listing tells us.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostedAt {
    /// Listing showed a calendar date
    Day(NaiveDate),
    /// Listing showed only a time of day, meaning it was posted today
    Today { date: NaiveDate, time: NaiveTime },
}

impl PostedAt {
    /// Calendar date of the post.
    pub fn date(&self) -> NaiveDate {
        match self {
            PostedAt::Day(date) => *date,
            PostedAt::Today { date, .. } => *date,
        }
    }
}

/// A single post summary from a listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    /// Post number as shown in the listing
    pub number: String,

    /// Subject with decorations stripped
    pub title: String,

    /// Nickname, or [`UNKNOWN_AUTHOR`]
    pub author: String,

    /// `None` when the row has no date element
    pub posted_at: Option<PostedAt>,

    /// Pinned or announcement row
    pub is_notice: bool,
}

impl PostRecord {
    /// Calendar date of the post, if the row had one.
    pub fn date(&self) -> Option<NaiveDate> {
        self.posted_at.map(|p| p.date())
    }

    /// Format the post for display using a template.
    ///
    /// Supported placeholders: `{number}`, `{author}`, `{title}`, `{date}`
    pub fn format(&self, template: &str) -> String {
        let date = self
            .date()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        template
            .replace("{number}", &self.number)
            .replace("{author}", &self.author)
            .replace("{title}", &self.title)
            .replace("{date}", &date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post() -> PostRecord {
        PostRecord {
            number: "1024".to_string(),
            title: "▇ 버서커 너프 ▇".to_string(),
            author: "모코코".to_string(),
            posted_at: Some(PostedAt::Day(NaiveDate::from_ymd_opt(2024, 10, 17).unwrap())),
            is_notice: false,
        }
    }

    #[test]
    fn test_format() {
        let post = sample_post();
        let result = post.format("글 번호: {number} | 작성자: {author} ({date})");
        assert_eq!(result, "글 번호: 1024 | 작성자: 모코코 (2024-10-17)");
    }

    #[test]
    fn test_today_resolves_to_its_date() {
        let date = NaiveDate::from_ymd_opt(2024, 10, 18).unwrap();
        let posted = PostedAt::Today {
            date,
            time: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
        };
        assert_eq!(posted.date(), date);
    }
}
