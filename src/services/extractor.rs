// src/services/extractor.rs

//! Listing page row extraction.
//!
//! Turns one listing page into [`PostRecord`]s using the selectors from
//! [`ListingConfig`]. Rows without a post number or subject link are layout
//! rows and are dropped silently; rows whose date cannot be read are dropped
//! and counted in [`ExtractedPage::skipped`].

use chrono::{Datelike, NaiveDate, NaiveTime};
use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{ListingConfig, ListingMode, PostRecord, PostedAt, UNKNOWN_AUTHOR};

/// Rows found on one listing page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedPage {
    /// Parsed rows in page order, notices included
    pub posts: Vec<PostRecord>,

    /// Rows dropped because their date matched no accepted format
    pub skipped: usize,

    /// Strict mode only: the listing table was not on the page
    pub missing_container: bool,
}

impl ExtractedPage {
    fn missing() -> Self {
        Self {
            missing_container: true,
            ..Self::default()
        }
    }

    /// Rows that take part in counting.
    pub fn countable(&self, skip_notices: bool) -> impl Iterator<Item = &PostRecord> {
        self.posts
            .iter()
            .filter(move |post| !(skip_notices && post.is_notice))
    }

    /// No listing table, or no row at all beyond notices.
    ///
    /// Rows dropped for an unreadable date still make the page non-empty.
    pub fn is_empty(&self, skip_notices: bool) -> bool {
        self.missing_container
            || (self.skipped == 0 && self.countable(skip_notices).next().is_none())
    }
}

/// Why a candidate row produced no record.
#[derive(Debug)]
enum RowSkip {
    NoNumber,
    NoTitle,
    BadDate(String),
}

struct ListingSelectors {
    rows: Selector,
    container: Selector,
    container_rows: Selector,
    number_cell: Selector,
    number: Selector,
    notice_marker: Selector,
    title: Selector,
    title_strip: Selector,
    author_cell: Selector,
    author_name: Selector,
    date: Selector,
}

impl ListingSelectors {
    fn compile(config: &ListingConfig) -> Result<Self> {
        Ok(Self {
            rows: parse_selector(&config.row_selector)?,
            container: parse_selector(&config.container_selector)?,
            container_rows: parse_selector(&config.container_row_selector)?,
            number_cell: parse_selector(&config.number_cell_selector)?,
            number: parse_selector(&config.number_selector)?,
            notice_marker: parse_selector(&config.notice_marker_selector)?,
            title: parse_selector(&config.title_selector)?,
            title_strip: parse_selector(&config.title_strip_selector)?,
            author_cell: parse_selector(&config.author_cell_selector)?,
            author_name: parse_selector(&config.author_name_selector)?,
            date: parse_selector(&config.date_selector)?,
        })
    }
}

/// Parses listing pages into post records.
pub struct RowExtractor {
    selectors: ListingSelectors,
    mode: ListingMode,
    notice_labels: Vec<String>,
    today: NaiveDate,
}

impl RowExtractor {
    /// Compile the listing selectors.
    ///
    /// `today` anchors `MM-DD` dates to a year and `HH:MM` times to a day.
    pub fn new(config: &ListingConfig, today: NaiveDate) -> Result<Self> {
        Ok(Self {
            selectors: ListingSelectors::compile(config)?,
            mode: config.mode,
            notice_labels: config.notice_labels.clone(),
            today,
        })
    }

    /// Extract every row of a listing page.
    pub fn extract(&self, markup: &str) -> ExtractedPage {
        let document = Html::parse_document(markup);

        let rows: Vec<ElementRef> = match self.mode {
            ListingMode::Lenient => document.select(&self.selectors.rows).collect(),
            ListingMode::Strict => match document.select(&self.selectors.container).next() {
                Some(container) => container.select(&self.selectors.container_rows).collect(),
                None => {
                    log::debug!("Listing container not found");
                    return ExtractedPage::missing();
                }
            },
        };

        let mut page = ExtractedPage::default();
        for row in rows {
            match self.parse_row(row) {
                Ok(post) => page.posts.push(post),
                Err(RowSkip::BadDate(raw)) => {
                    log::debug!("Skipping row with unreadable date '{raw}'");
                    page.skipped += 1;
                }
                Err(skip) => log::trace!("Skipping row: {skip:?}"),
            }
        }
        page
    }

    fn parse_row(&self, row: ElementRef) -> std::result::Result<PostRecord, RowSkip> {
        let sel = &self.selectors;

        let number_cell = row.select(&sel.number_cell).next().ok_or(RowSkip::NoNumber)?;
        let number = number_cell
            .select(&sel.number)
            .next()
            .map(element_text)
            .ok_or(RowSkip::NoNumber)?;
        let is_notice = number_cell.select(&sel.notice_marker).next().is_some()
            || self.notice_labels.iter().any(|label| {
                *label == number || *label == element_text(number_cell)
            });

        let title_elem = row.select(&sel.title).next().ok_or(RowSkip::NoTitle)?;
        let title = stripped_text(title_elem, &sel.title_strip);

        let author = row
            .select(&sel.author_cell)
            .next()
            .and_then(|cell| cell.select(&sel.author_name).next())
            .map(element_text)
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());

        let posted_at = match row.select(&sel.date).next() {
            Some(elem) => {
                let raw = element_text(elem);
                let parsed = parse_posted_at(&raw, self.today);
                Some(parsed.ok_or(RowSkip::BadDate(raw))?)
            }
            None => None,
        };

        Ok(PostRecord {
            number,
            title,
            author,
            posted_at,
            is_notice,
        })
    }
}

/// Parse a listing date.
///
/// Accepts `HH:MM` (posted today), `YYYY-MM-DD`, and `MM-DD`. A month-day
/// is placed in the year of `today`, or the year before when that would put
/// it after `today`.
pub fn parse_posted_at(raw: &str, today: NaiveDate) -> Option<PostedAt> {
    let raw = raw.trim();

    if let Ok(time) = NaiveTime::parse_from_str(raw, "%H:%M") {
        return Some(PostedAt::Today { date: today, time });
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(PostedAt::Day(date));
    }

    let in_year = |year: i32| NaiveDate::parse_from_str(&format!("{year}-{raw}"), "%Y-%m-%d").ok();
    match in_year(today.year()) {
        Some(date) if date > today => in_year(today.year() - 1),
        Some(date) => Some(date),
        // 02-29 read in a non-leap year
        None => in_year(today.year() - 1),
    }
    .map(PostedAt::Day)
}

/// Compile a CSS selector.
pub fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

fn element_text(elem: ElementRef) -> String {
    normalize_whitespace(&elem.text().collect::<String>())
}

/// Text of `elem` without the text of descendants matching `strip`.
fn stripped_text(elem: ElementRef, strip: &Selector) -> String {
    let root = (*elem).id();
    let mut text = String::new();
    for node in elem.descendants() {
        let Some(piece) = node.value().as_text() else {
            continue;
        };
        let decorated = node
            .ancestors()
            .take_while(|ancestor| ancestor.id() != root)
            .filter_map(ElementRef::wrap)
            .any(|ancestor| strip.matches(&ancestor));
        if !decorated {
            text.push_str(piece);
        }
    }
    normalize_whitespace(&text)
}

fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{listing_page, row, today, FixtureRow};

    fn extractor(mode: ListingMode) -> RowExtractor {
        let config = ListingConfig {
            mode,
            ..ListingConfig::default()
        };
        RowExtractor::new(&config, today()).unwrap()
    }

    #[test]
    fn test_extracts_basic_row() {
        let html = listing_page(&[row(FixtureRow::new("1001", "▇ 버서커 살려줘", "10-17"))]);
        let page = extractor(ListingMode::Strict).extract(&html);

        assert!(!page.missing_container);
        assert_eq!(page.posts.len(), 1);
        let post = &page.posts[0];
        assert_eq!(post.number, "1001");
        assert_eq!(post.title, "▇ 버서커 살려줘");
        assert_eq!(post.author, "닉네임1001");
        assert_eq!(
            post.posted_at,
            Some(PostedAt::Day(NaiveDate::from_ymd_opt(2024, 10, 17).unwrap()))
        );
        assert!(!post.is_notice);
    }

    #[test]
    fn test_title_decorations_are_stripped() {
        let html = r#"
            <div class="board-list"><table><tbody>
              <tr>
                <td class="num"><span>7</span></td>
                <td class="tit"><a class="subject-link" href="/7">
                  <span class="category">[잡담]</span> 오늘의 █ 패치 <span class="con-comment">[12]</span>
                </a></td>
                <td class="user"><span class="layerNickName">작성자</span></td>
                <td class="date">09:15</td>
              </tr>
            </tbody></table></div>"#;
        let page = extractor(ListingMode::Strict).extract(html);

        assert_eq!(page.posts[0].title, "오늘의 █ 패치");
    }

    #[test]
    fn test_missing_author_defaults_to_unknown() {
        let html = listing_page(&[row(FixtureRow::new("5", "제목", "10-17").without_author())]);
        let page = extractor(ListingMode::Strict).extract(&html);

        assert_eq!(page.posts[0].author, UNKNOWN_AUTHOR);
    }

    #[test]
    fn test_row_without_number_is_dropped() {
        let html = listing_page(&[
            row(FixtureRow::new("", "제목 없음", "10-17").without_number()),
            row(FixtureRow::new("8", "제목", "10-17")),
        ]);
        let page = extractor(ListingMode::Strict).extract(&html);

        assert_eq!(page.posts.len(), 1);
        assert_eq!(page.posts[0].number, "8");
        assert_eq!(page.skipped, 0);
    }

    #[test]
    fn test_row_without_title_is_dropped() {
        let html = listing_page(&[row(FixtureRow::new("9", "", "10-17").without_title())]);
        let page = extractor(ListingMode::Strict).extract(&html);

        assert!(page.posts.is_empty());
    }

    #[test]
    fn test_notice_rows_are_flagged() {
        let html = listing_page(&[
            row(FixtureRow::new("공지", "필독 공지", "2023-01-01")),
            row(FixtureRow::new("10", "일반 글", "10-17")),
        ]);
        let page = extractor(ListingMode::Strict).extract(&html);

        assert!(page.posts[0].is_notice);
        assert!(!page.posts[1].is_notice);
        assert_eq!(page.countable(true).count(), 1);
        assert_eq!(page.countable(false).count(), 2);
    }

    #[test]
    fn test_unreadable_date_skips_row() {
        let html = listing_page(&[
            row(FixtureRow::new("1", "어제 글", "어제")),
            row(FixtureRow::new("2", "정상 글", "10-16")),
        ]);
        let page = extractor(ListingMode::Strict).extract(&html);

        assert_eq!(page.skipped, 1);
        assert_eq!(page.posts.len(), 1);
        assert_eq!(page.posts[0].number, "2");
    }

    #[test]
    fn test_strict_mode_reports_missing_container() {
        let html = "<html><body><p>점검 중입니다</p></body></html>";
        let page = extractor(ListingMode::Strict).extract(html);

        assert!(page.missing_container);
        assert!(page.is_empty(true));
    }

    #[test]
    fn test_lenient_mode_reads_classless_rows_anywhere() {
        let html = r#"
            <table>
              <tr class="notice"><td class="num"><span>공지</span></td>
                <td><a class="subject-link">공지</a></td></tr>
              <tr><td class="num"><span>3</span></td>
                <td><a class="subject-link">▅ 제목</a></td>
                <td class="user"><span class="layerNickName">a</span></td>
                <td><span class="date">10-17</span></td></tr>
              <tr class=""><td class="num"><span>2</span></td>
                <td><a class="subject-link">제목</a></td>
                <td class="user"><span class="layerNickName">b</span></td>
                <td><span class="date">10-16</span></td></tr>
            </table>"#;
        let page = extractor(ListingMode::Lenient).extract(html);

        assert!(!page.missing_container);
        let numbers: Vec<_> = page.posts.iter().map(|p| p.number.as_str()).collect();
        assert_eq!(numbers, ["3", "2"]);
    }

    #[test]
    fn test_parse_posted_at_formats() {
        let today = today();
        assert_eq!(
            parse_posted_at("10-01", today),
            Some(PostedAt::Day(NaiveDate::from_ymd_opt(2024, 10, 1).unwrap()))
        );
        assert_eq!(
            parse_posted_at(" 13:05 ", today),
            Some(PostedAt::Today {
                date: today,
                time: NaiveTime::from_hms_opt(13, 5, 0).unwrap(),
            })
        );
        assert_eq!(
            parse_posted_at("2023-12-31", today),
            Some(PostedAt::Day(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()))
        );
        assert_eq!(parse_posted_at("02-30", today), None);
        assert_eq!(parse_posted_at("2024.10.17", today), None);
        assert_eq!(parse_posted_at("", today), None);
    }

    #[test]
    fn test_month_day_after_today_is_last_year() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        assert_eq!(
            parse_posted_at("12-20", today),
            Some(PostedAt::Day(NaiveDate::from_ymd_opt(2024, 12, 20).unwrap()))
        );
        assert_eq!(
            parse_posted_at("01-02", today),
            Some(PostedAt::Day(today))
        );
    }

    #[test]
    fn test_leap_day_outside_leap_year() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert_eq!(
            parse_posted_at("02-29", today),
            Some(PostedAt::Day(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()))
        );
    }

    #[test]
    fn test_page_with_only_unreadable_dates_is_not_empty() {
        let html = listing_page(&[
            row(FixtureRow::new("2", "글", "어제")),
            row(FixtureRow::new("1", "글", "그저께")),
        ]);
        let page = extractor(ListingMode::Strict).extract(&html);

        assert_eq!(page.skipped, 2);
        assert!(page.posts.is_empty());
        assert!(!page.is_empty(true));
    }

    #[test]
    fn test_parse_selector_invalid() {
        assert!(parse_selector("td.num").is_ok());
        assert!(parse_selector("[[invalid").is_err());
    }
}
