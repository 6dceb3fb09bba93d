//! Board discovery service.
//!
//! Resolves a class keyword to its board by scanning the links of the
//! forum landing page.

use scraper::{Html, Selector};
use url::Url;

use crate::error::Result;
use crate::models::ForumConfig;
use crate::services::PageSource;
use crate::utils::resolve_link;

/// Service for finding a class board from a keyword.
pub struct BoardLocator<'a> {
    source: &'a dyn PageSource,
    landing_url: Url,
    link_base: Url,
}

impl<'a> BoardLocator<'a> {
    /// Create a locator for the configured forum.
    pub fn new(source: &'a dyn PageSource, forum: &ForumConfig) -> Result<Self> {
        Ok(Self {
            source,
            landing_url: Url::parse(&forum.landing_url)?,
            link_base: Url::parse(&forum.link_base)?,
        })
    }

    /// Fetch the landing page and return the board whose link text contains
    /// `keyword`, or `None` when no link matches.
    pub async fn locate(&self, keyword: &str) -> Result<Option<Url>> {
        let html = self.source.fetch(&self.landing_url).await?;
        let document = Html::parse_document(&html);

        let board = find_board_link(&document, keyword, &self.link_base);
        match &board {
            Some(url) => log::info!("Board for '{keyword}': {url}"),
            None => log::warn!("No board link contains '{keyword}'"),
        }
        Ok(board)
    }
}

/// First link, in document order, whose text contains `keyword`.
///
/// Matching is a case-sensitive substring test on the link's full text.
/// Links whose href cannot be resolved are passed over.
pub fn find_board_link(document: &Html, keyword: &str, link_base: &Url) -> Option<Url> {
    let link_selector = Selector::parse("a[href]").ok()?;

    document.select(&link_selector).find_map(|element| {
        let text: String = element.text().collect();
        if !text.contains(keyword) {
            return None;
        }
        let href = element.value().attr("href")?;
        resolve_link(link_base, href)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FixtureSource;

    const LANDING: &str = r#"
        <html><body>
          <ul class="class-menu">
            <li><a href="/board/lostark/5338">워로드</a></li>
            <li><a href="/board/lostark/5339"><span>버서커</span> 게시판</a></li>
            <li><a href="https://www.inven.co.kr/board/lostark/5340">디스트로이어</a></li>
            <li><a href="/board/lostark/9999">버서커 공략</a></li>
            <li><a>건슬링어</a></li>
          </ul>
        </body></html>"#;

    fn base() -> Url {
        Url::parse("https://www.inven.co.kr").unwrap()
    }

    #[test]
    fn test_first_match_in_document_order_wins() {
        let document = Html::parse_document(LANDING);
        let url = find_board_link(&document, "버서커", &base()).unwrap();
        assert_eq!(url.as_str(), "https://www.inven.co.kr/board/lostark/5339");
    }

    #[test]
    fn test_absolute_link_passes_through() {
        let document = Html::parse_document(LANDING);
        let url = find_board_link(&document, "디스트로이어", &base()).unwrap();
        assert_eq!(url.as_str(), "https://www.inven.co.kr/board/lostark/5340");
    }

    #[test]
    fn test_anchor_without_href_is_not_a_match() {
        let document = Html::parse_document(LANDING);
        assert!(find_board_link(&document, "건슬링어", &base()).is_none());
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let document = Html::parse_document(r#"<a href="/b/1">Berserker</a>"#);
        assert!(find_board_link(&document, "berserker", &base()).is_none());
        assert!(find_board_link(&document, "Berserker", &base()).is_some());
    }

    #[tokio::test]
    async fn test_locate_fetches_landing_page_once() {
        let forum = ForumConfig::default();
        let source = FixtureSource::new().with_page(&forum.landing_url, LANDING);
        let locator = BoardLocator::new(&source, &forum).unwrap();

        let found = locator.locate("워로드").await.unwrap();
        let missing = locator.locate("바드").await.unwrap();

        assert_eq!(
            found.unwrap().as_str(),
            "https://www.inven.co.kr/board/lostark/5338"
        );
        assert!(missing.is_none());
        assert_eq!(source.fetched().len(), 2);
    }
}
