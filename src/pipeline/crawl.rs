// src/pipeline/crawl.rs

//! Board crawling pipeline.
//!
//! One run resolves the board once, then walks its listing pages strictly
//! forward (1, 2, 3, ...). Each page is fetched, extracted and evaluated in
//! full before the next request goes out.

use chrono::NaiveDate;
use url::Url;

use crate::error::Result;
use crate::models::{Config, CrawlState, Messages, PostRecord, StopSignal};
use crate::pipeline::{CrawlRequest, CrawlSummary, Reporter};
use crate::services::{BoardLocator, PageFetcher, PageSource, RowExtractor};
use crate::utils;

/// How a run ended when no transport error occurred.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// No landing page link matched the keyword; nothing was crawled
    BoardNotFound,
    Completed(CrawlSummary),
}

/// Locate the board for `request.keyword` and crawl it.
///
/// `today` is the run date used to read `MM-DD` and `HH:MM` listing dates.
pub async fn run_crawler(
    config: &Config,
    request: &CrawlRequest,
    source: &dyn PageSource,
    today: NaiveDate,
    reporter: &mut dyn Reporter,
) -> Result<RunOutcome> {
    request.validate(&config.crawler)?;
    let extractor = RowExtractor::new(&config.listing, today)?;

    utils::log::header(&format!("Crawling '{}' ({})", request.keyword, request.policy));

    let locator = BoardLocator::new(source, &config.forum)?;
    let Some(board) = locator.locate(&request.keyword).await? else {
        reporter.append(&config.messages.board_not_found);
        return Ok(RunOutcome::BoardNotFound);
    };
    reporter.append(&config.messages.board_found.replace("{url}", board.as_str()));

    let summary = crawl_board(config, request, &board, source, &extractor, today, reporter).await?;
    report_totals(&config.messages, &summary, reporter);
    reporter.finish(&summary);

    utils::log::summary(
        "Crawl finished",
        &[
            ("Pages", summary.pages_fetched.to_string()),
            ("Total", summary.state.total_count.to_string()),
            ("Marked", summary.state.marked_count.to_string()),
            ("Skipped rows", summary.skipped_rows.to_string()),
            ("Stop", format!("{:?}", summary.stop)),
        ],
    );

    Ok(RunOutcome::Completed(summary))
}

/// Walk the listing pages of `board` until the stop policy fires.
pub async fn crawl_board(
    config: &Config,
    request: &CrawlRequest,
    board: &Url,
    source: &dyn PageSource,
    extractor: &RowExtractor,
    today: NaiveDate,
    reporter: &mut dyn Reporter,
) -> Result<CrawlSummary> {
    let messages = &config.messages;
    let skip_notices = config.listing.skip_notices;
    let fetcher = PageFetcher::new(source, &config.forum.page_param);

    let mut state = CrawlState::new(request.bucket_by_date);
    let mut skipped_rows = 0;
    let mut page_no: u32 = 0;

    let stop = loop {
        if page_no >= config.crawler.max_pages {
            log::warn!("Page cap of {} reached", config.crawler.max_pages);
            break StopSignal::PageCapReached;
        }
        if page_no > 0 {
            utils::log::separator();
        }
        page_no += 1;

        reporter.append(&messages.page_started.replace("{page}", &page_no.to_string()));
        let markup = fetcher.fetch_page(board, page_no).await?;
        let page = extractor.extract(&markup);
        skipped_rows += page.skipped;
        log::info!(
            "Page {page_no}: {} row(s), {} skipped",
            page.posts.len(),
            page.skipped
        );

        let signal = request.policy.on_page(&page, skip_notices);
        if signal.is_stop() {
            break signal;
        }
        if page.missing_container {
            reporter.append(&messages.no_data);
        }

        let rows: Vec<&PostRecord> = page.countable(skip_notices).collect();
        let signal = count_rows(request, &rows, &mut state, messages, reporter);
        if signal.is_stop() {
            break signal;
        }

        let signal = request.policy.after_page(page_no);
        if signal.is_stop() {
            break signal;
        }
    };

    match stop {
        StopSignal::DateReached => reporter.append(&messages.date_reached),
        StopSignal::EmptyPage => reporter.append(&messages.no_data),
        StopSignal::PageCapReached => reporter.append(
            &messages
                .page_cap_reached
                .replace("{pages}", &config.crawler.max_pages.to_string()),
        ),
        StopSignal::PageLimitReached | StopSignal::Continue => {}
    }

    Ok(CrawlSummary {
        keyword: request.keyword.clone(),
        board_url: board.to_string(),
        policy: request.policy,
        glyphs: request.glyphs.to_string(),
        run_date: today,
        pages_fetched: page_no,
        skipped_rows,
        stop,
        state,
    })
}

/// Count one page's rows in order, stopping at the first row past the
/// threshold date. Rows after that one are discarded.
fn count_rows(
    request: &CrawlRequest,
    rows: &[&PostRecord],
    state: &mut CrawlState,
    messages: &Messages,
    reporter: &mut dyn Reporter,
) -> StopSignal {
    for (index, post) in rows.iter().enumerate() {
        let signal = request.policy.on_row(post);
        if signal.is_stop() {
            log::debug!(
                "Stopping at post {}; {} later row(s) on this page discarded",
                post.number,
                rows.len() - index - 1
            );
            return signal;
        }

        let marked = request.glyphs.is_marked(&post.title);
        state.record(post, marked);
        if marked {
            reporter.append(&post.format(&messages.marked_post));
        }
    }
    StopSignal::Continue
}

/// Final totals, appended once the loop is done.
fn report_totals(messages: &Messages, summary: &CrawlSummary, reporter: &mut dyn Reporter) {
    let state = &summary.state;
    reporter.append(&messages.crawl_complete);
    reporter.append(
        &messages
            .total_titles
            .replace("{count}", &state.total_count.to_string()),
    );
    reporter.append(
        &messages
            .marked_titles
            .replace("{count}", &state.marked_count.to_string()),
    );

    if let Some(buckets) = &state.marked_by_date {
        for (date, count) in buckets.iter().rev() {
            reporter.append(
                &messages
                    .marked_on_date
                    .replace("{date}", &date.format("%Y-%m-%d").to_string())
                    .replace("{count}", &count.to_string()),
            );
        }
    }
}
