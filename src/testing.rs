//! Fixture builders shared by unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use url::Url;

use crate::error::Result;
use crate::services::PageSource;

/// Fixed "today" for every fixture.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 10, 18).unwrap()
}

/// One listing row.
#[derive(Debug, Clone)]
pub struct FixtureRow {
    number: String,
    title: String,
    date: String,
    author: bool,
    has_number: bool,
    has_title: bool,
}

impl FixtureRow {
    pub fn new(number: &str, title: &str, date: &str) -> Self {
        Self {
            number: number.to_string(),
            title: title.to_string(),
            date: date.to_string(),
            author: true,
            has_number: true,
            has_title: true,
        }
    }

    pub fn without_author(mut self) -> Self {
        self.author = false;
        self
    }

    pub fn without_number(mut self) -> Self {
        self.has_number = false;
        self
    }

    pub fn without_title(mut self) -> Self {
        self.has_title = false;
        self
    }
}

/// Render a row the way the board listing does.
pub fn row(fixture: FixtureRow) -> String {
    let number = if fixture.has_number {
        format!(r#"<td class="num"><span>{}</span></td>"#, fixture.number)
    } else {
        r#"<td class="num"></td>"#.to_string()
    };
    let title = if fixture.has_title {
        format!(
            r#"<td class="tit"><a class="subject-link" href="/board/lostark/5339/{n}"><span class="category">[잡담]</span> {t} <span class="con-comment">[3]</span></a></td>"#,
            n = fixture.number,
            t = fixture.title
        )
    } else {
        r#"<td class="tit"></td>"#.to_string()
    };
    let author = if fixture.author {
        format!(
            r#"<td class="user"><span class="layerNickName">닉네임{}</span></td>"#,
            fixture.number
        )
    } else {
        r#"<td class="user"></td>"#.to_string()
    };
    format!(
        r#"<tr>{number}{title}{author}<td class="date">{}</td></tr>"#,
        fixture.date
    )
}

/// Wrap rows in the listing container.
pub fn listing_page(rows: &[String]) -> String {
    format!(
        r#"<html><body><div class="board-list"><table><thead><tr><th>번호</th></tr></thead><tbody>{}</tbody></table></div></body></html>"#,
        rows.concat()
    )
}

/// Page without the listing container.
pub fn maintenance_page() -> String {
    "<html><body><p>점검 중입니다</p></body></html>".to_string()
}

/// In-memory [`PageSource`] that records every URL it serves.
#[derive(Default)]
pub struct FixtureSource {
    pages: HashMap<String, String>,
    fetched: Mutex<Vec<String>>,
}

impl FixtureSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), html.into());
        self
    }

    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageSource for FixtureSource {
    async fn fetch(&self, url: &Url) -> Result<String> {
        self.fetched.lock().unwrap().push(url.to_string());
        // Unknown pages behave like a board past its last page.
        Ok(self
            .pages
            .get(url.as_str())
            .cloned()
            .unwrap_or_else(maintenance_page))
    }
}
