//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test the full
//! crawl cycle end-to-end, plus a scripted in-process fetcher for the cases
//! where exact request ordering matters.

use article_harvester::config::Config;
use article_harvester::crawler::{Coordinator, FetchError, Fetcher};
use article_harvester::models::{Article, DEFAULT_COMMENTS, UNKNOWN_CATEGORY, UNKNOWN_DATE};
use article_harvester::state::{PageOutcome, RunState, TerminationReason};
use article_harvester::storage::{load_articles, JsonFileStorage, MemoryStorage};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SITE: &str = "https://news.test";

/// Serves canned pages from memory and records every requested URL
#[derive(Default)]
struct ScriptedFetcher {
    pages: HashMap<String, String>,
    stalled: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    fn page(mut self, path: &str, html: impl Into<String>) -> Self {
        self.pages.insert(format!("{}{}", SITE, path), html.into());
        self
    }

    fn stall(mut self, path: &str) -> Self {
        self.stalled.insert(format!("{}{}", SITE, path));
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Fetcher for ScriptedFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());
        if self.stalled.contains(url) {
            std::future::pending::<()>().await;
        }
        self.pages.get(url).cloned().ok_or(FetchError::Status(404))
    }
}

/// Creates a test configuration crawling the scripted site
fn create_test_config(max_articles: usize, interval: usize) -> Config {
    let mut config = Config::default();
    config.crawler.max_articles = max_articles;
    config.crawler.checkpoint_interval = interval;
    config.seeds.urls = vec![SITE.to_string()];
    config.seeds.article_patterns = vec!["news.test/clanek".to_string()];
    config
}

fn links(hrefs: &[&str]) -> String {
    hrefs
        .iter()
        .map(|href| format!(r#"<a href="{}">odkaz</a>"#, href))
        .collect()
}

fn article_html(title: &str, hrefs: &[&str]) -> String {
    format!(
        "<html><body><h1>{}</h1><p>Obsah.</p>{}</body></html>",
        title,
        links(hrefs)
    )
}

fn home_html(hrefs: &[&str]) -> String {
    format!("<html><body><h1>Titulní strana</h1>{}</body></html>", links(hrefs))
}

fn urls(articles: &[Article]) -> Vec<&str> {
    articles.iter().map(|a| a.url.as_str()).collect()
}

#[tokio::test]
async fn test_full_crawl_over_http() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let host = base_url.trim_start_matches("http://").to_string();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(format!(
                    r#"<html><body>
                    <a href="{}/clanek/1">Absolutní</a>
                    <a href="/clanek/2">Relativní</a>
                    <a href="/o-nas">O nás</a>
                    <a href="mailto:redakce@example.com">Napište nám</a>
                    </body></html>"#,
                    base_url
                ))
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/clanek/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(
                    r##"<html><head><meta name="category" content="Domácí"></head><body>
                    <h1>  Velký titulek  </h1>
                    <time datetime="2024-03-01T10:00:00+01:00">1. března</time>
                    <a class="c_at c_al e_dW" href="#diskuse">42</a>
                    <img src="a.jpg"><img src="b.jpg">
                    <p>První odstavec.</p><p>   </p><p>Druhý odstavec.</p>
                    <a href="/clanek/2">Související</a>
                    </body></html>"##,
                )
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/clanek/2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(
                    r#"<html><body><h1>Druhý</h1>
                    <a href="/clanek/1">Zpět</a>
                    <a href="/clanek/smazany">Smazaný</a>
                    </body></html>"#,
                )
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/clanek/smazany"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/o-nas"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<h1>O nás</h1>"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let articles_path = temp_dir.path().join("out").join("articles.json");

    let mut config = create_test_config(100, 5);
    config.seeds.urls = vec![base_url.clone()];
    config.seeds.article_patterns = vec![format!("{}/clanek", host)];
    config.output.articles_path = articles_path.display().to_string();

    let mut coordinator = Coordinator::from_config(&config).unwrap();
    let stats = coordinator.run().await.unwrap();

    assert_eq!(stats.termination, Some(TerminationReason::FrontierExhausted));
    assert_eq!(stats.pages_visited, 4);
    assert_eq!(stats.articles_saved(), 2);
    assert_eq!(stats.count(PageOutcome::FetchFailed), 1);
    assert_eq!(stats.count(PageOutcome::NotArticle), 1);

    let saved = load_articles(&articles_path).unwrap();
    assert_eq!(saved, coordinator.articles());
    assert_eq!(
        urls(&saved),
        vec![
            format!("{}/clanek/1", base_url),
            format!("{}/clanek/2", base_url)
        ]
    );

    let first = &saved[0];
    assert_eq!(first.title, "Velký titulek");
    assert_eq!(first.category, "Domácí");
    assert_eq!(first.comments, "42");
    assert_eq!(first.images, 2);
    assert_eq!(first.content, "První odstavec.  Druhý odstavec.");
    assert_eq!(first.date, "2024-03-01T10:00:00+01:00");

    let second = &saved[1];
    assert_eq!(second.title, "Druhý");
    assert_eq!(second.category, UNKNOWN_CATEGORY);
    assert_eq!(second.comments, DEFAULT_COMMENTS);
    assert_eq!(second.images, 0);
    assert_eq!(second.content, "");
    assert_eq!(second.date, UNKNOWN_DATE);

    // Non-ASCII text is written literally with a 4-space indent
    let raw = std::fs::read_to_string(&articles_path).unwrap();
    assert!(raw.contains("Velký titulek"));
    assert!(raw.contains("\n    {"));
}

#[tokio::test]
async fn test_no_url_is_fetched_twice() {
    let fetcher = ScriptedFetcher::default()
        .page("", home_html(&["/clanek/a", "/clanek/b", "/clanek/a", "/clanek/a#x"]))
        .page("/clanek/a", article_html("A", &["/clanek/b", "/", "/clanek/a"]))
        .page("/clanek/b", article_html("B", &["/clanek/a", "/clanek/c"]))
        .page("/clanek/c", article_html("C", &["/clanek/b"]));

    let mut coordinator =
        Coordinator::new(&create_test_config(100, 5), fetcher, MemoryStorage::new());
    coordinator.run().await.unwrap();

    let calls = coordinator.fetcher().calls();
    let unique: HashSet<&String> = calls.iter().collect();
    assert_eq!(unique.len(), calls.len());
    assert_eq!(
        calls,
        vec![
            "https://news.test",
            "https://news.test/clanek/a",
            "https://news.test/clanek/b",
            "https://news.test/clanek/c",
        ]
    );
}

#[tokio::test]
async fn test_only_article_links_are_followed() {
    let fetcher = ScriptedFetcher::default()
        .page(
            "",
            home_html(&[
                "/clanek/1",
                "/sport/zapas",
                "https://other.test/clanek/2",
                "javascript:void(0)",
            ]),
        )
        .page("/clanek/1", article_html("Jedna", &["/kontakt"]));

    let mut coordinator =
        Coordinator::new(&create_test_config(100, 5), fetcher, MemoryStorage::new());
    let stats = coordinator.run().await.unwrap();

    assert_eq!(
        coordinator.fetcher().calls(),
        vec!["https://news.test", "https://news.test/clanek/1"]
    );
    assert_eq!(stats.links_enqueued, 1);
    assert_eq!(stats.links_discovered, 4);
    assert!(coordinator.frontier().is_empty());
}

#[tokio::test]
async fn test_cap_bounds_result_set() {
    let hrefs: Vec<String> = (0..10).map(|i| format!("/clanek/{}", i)).collect();
    let href_refs: Vec<&str> = hrefs.iter().map(String::as_str).collect();

    let mut fetcher = ScriptedFetcher::default().page("", home_html(&href_refs));
    for href in &hrefs {
        fetcher = fetcher.page(href, article_html(href, &[]));
    }

    let mut coordinator =
        Coordinator::new(&create_test_config(3, 2), fetcher, MemoryStorage::new());
    let stats = coordinator.run().await.unwrap();

    assert_eq!(coordinator.articles().len(), 3);
    assert_eq!(stats.termination, Some(TerminationReason::ArticleCap));
    assert_eq!(coordinator.fetcher().calls().len(), 4);
    assert_eq!(coordinator.sink().snapshot_sizes(), vec![2, 3]);
}

#[tokio::test]
async fn test_checkpoints_grow_monotonically() {
    let hrefs: Vec<String> = (0..12).map(|i| format!("/clanek/{}", i)).collect();
    let href_refs: Vec<&str> = hrefs.iter().map(String::as_str).collect();

    let mut fetcher = ScriptedFetcher::default().page("", home_html(&href_refs));
    for href in &hrefs {
        fetcher = fetcher.page(href, article_html(href, &[]));
    }

    let mut coordinator =
        Coordinator::new(&create_test_config(100, 5), fetcher, MemoryStorage::new());
    let stats = coordinator.run().await.unwrap();

    let sink = coordinator.sink();
    assert_eq!(sink.snapshot_sizes(), vec![5, 10, 12]);
    for pair in sink.snapshots().windows(2) {
        assert_eq!(pair[0][..], pair[1][..pair[0].len()]);
    }
    assert_eq!(stats.checkpoints_written, 3);
}

#[tokio::test]
async fn test_failed_checkpoint_does_not_stop_crawl() {
    let hrefs: Vec<String> = (0..6).map(|i| format!("/clanek/{}", i)).collect();
    let href_refs: Vec<&str> = hrefs.iter().map(String::as_str).collect();

    let mut fetcher = ScriptedFetcher::default().page("", home_html(&href_refs));
    for href in &hrefs {
        fetcher = fetcher.page(href, article_html(href, &[]));
    }

    let mut storage = MemoryStorage::new();
    storage.fail_next(1);

    let mut coordinator = Coordinator::new(&create_test_config(100, 5), fetcher, storage);
    let stats = coordinator.run().await.unwrap();

    assert_eq!(coordinator.articles().len(), 6);
    // The write at 5 fails, the retry at 6 succeeds, then the final save
    assert_eq!(coordinator.sink().snapshot_sizes(), vec![6, 6]);
    assert_eq!(stats.checkpoint_failures, 1);
}

#[tokio::test]
async fn test_malformed_page_does_not_stop_crawl() {
    let broken = r#"<html><head><meta name="category"></head><body>
        <h1>Rozbitý</h1><a href="/clanek/dalsi">Další</a></body></html>"#;

    let fetcher = ScriptedFetcher::default()
        .page("", home_html(&["/clanek/rozbity", "/clanek/chybi"]))
        .page("/clanek/rozbity", broken)
        .page("/clanek/dalsi", article_html("Další", &[]));

    let mut coordinator =
        Coordinator::new(&create_test_config(100, 5), fetcher, MemoryStorage::new());
    let stats = coordinator.run().await.unwrap();

    assert_eq!(stats.count(PageOutcome::ExtractFailed), 1);
    assert_eq!(stats.count(PageOutcome::FetchFailed), 1);
    assert_eq!(urls(coordinator.articles()), vec!["https://news.test/clanek/dalsi"]);
    assert_eq!(
        coordinator.state(),
        RunState::Done(TerminationReason::FrontierExhausted)
    );
}

#[tokio::test]
async fn test_concurrent_fetches_keep_sequential_order() {
    fn site() -> ScriptedFetcher {
        ScriptedFetcher::default()
            .page("", home_html(&["/clanek/1", "/clanek/2", "/clanek/3"]))
            .page("/clanek/1", article_html("1", &["/clanek/4", "/clanek/2"]))
            .page("/clanek/2", article_html("2", &["/clanek/5"]))
            .page("/clanek/3", article_html("3", &["/clanek/1"]))
            .page("/clanek/4", article_html("4", &[]))
            .page("/clanek/5", article_html("5", &["/clanek/6"]))
            .page("/clanek/6", article_html("6", &[]))
    }

    let sequential_config = create_test_config(5, 2);
    let mut parallel_config = create_test_config(5, 2);
    parallel_config.crawler.max_concurrent_fetches = 4;

    let mut sequential = Coordinator::new(&sequential_config, site(), MemoryStorage::new());
    sequential.run().await.unwrap();

    let mut parallel = Coordinator::new(&parallel_config, site(), MemoryStorage::new());
    parallel.run().await.unwrap();

    assert_eq!(sequential.articles(), parallel.articles());
    assert_eq!(parallel.articles().len(), 5);
    assert_eq!(
        sequential.sink().snapshot_sizes(),
        parallel.sink().snapshot_sizes()
    );
}

#[tokio::test]
async fn test_cancellation_persists_partial_results() {
    let fetcher = ScriptedFetcher::default()
        .page("", home_html(&["/clanek/1", "/clanek/2", "/clanek/visi", "/clanek/3"]))
        .page("/clanek/1", article_html("1", &[]))
        .page("/clanek/2", article_html("2", &[]))
        .page("/clanek/3", article_html("3", &[]))
        .stall("/clanek/visi");

    let temp_dir = TempDir::new().unwrap();
    let articles_path = temp_dir.path().join("articles.json");

    let mut coordinator = Coordinator::new(
        &create_test_config(100, 5),
        fetcher,
        JsonFileStorage::new(&articles_path),
    );
    let stats = coordinator
        .run_until(tokio::time::sleep(Duration::from_millis(50)))
        .await
        .unwrap();

    assert_eq!(stats.termination, Some(TerminationReason::Cancelled));
    let saved = load_articles(&articles_path).unwrap();
    assert_eq!(
        urls(&saved),
        vec!["https://news.test/clanek/1", "https://news.test/clanek/2"]
    );
    assert!(!coordinator
        .fetcher()
        .calls()
        .contains(&"https://news.test/clanek/3".to_string()));
}

#[tokio::test]
async fn test_empty_frontier_writes_empty_array() {
    let temp_dir = TempDir::new().unwrap();
    let articles_path = temp_dir.path().join("articles.json");

    let mut coordinator = Coordinator::new(
        &create_test_config(100, 5),
        ScriptedFetcher::default(),
        JsonFileStorage::new(&articles_path),
    );
    let stats = coordinator.run().await.unwrap();

    assert_eq!(stats.count(PageOutcome::FetchFailed), 1);
    assert!(load_articles(&articles_path).unwrap().is_empty());
    assert_eq!(std::fs::read_to_string(&articles_path).unwrap().trim(), "[]");
}
