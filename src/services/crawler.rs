// src/services/crawler.rs

//! Section crawler service.
//!
//! Walks each statute lineage from its seed URL, following the single
//! "next section" link until it runs out, and writes one PDF per page.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use reqwest::Client;
use scraper::Html;

use crate::error::Result;
use crate::models::{Config, CrawlOutcome, LineageOutcome, PageRecord, Statute, Termination};
use crate::render::PdfRenderer;
use crate::services::extract::FieldExtractor;
use crate::services::normalize::normalize_fragment;
use crate::storage::LocalStore;
use crate::utils::http;
use crate::utils::resolve_url;

/// What one page visit yields: its record plus the link to follow next.
struct PageVisit {
    record: PageRecord,
    next_url: Option<String>,
}

/// Service for crawling statute sections into PDF artifacts.
pub struct SectionCrawler {
    config: Arc<Config>,
    client: Client,
    extractor: FieldExtractor,
    renderer: PdfRenderer,
    store: LocalStore,
}

impl SectionCrawler {
    /// Create a new section crawler with the given configuration and store.
    pub fn new(config: Arc<Config>, store: LocalStore) -> Result<Self> {
        let client = http::create_async_client(&config.crawler)?;
        let extractor = FieldExtractor::new()?;
        let renderer = PdfRenderer::new(config.layout);

        Ok(Self {
            config,
            client,
            extractor,
            renderer,
            store,
        })
    }

    /// Crawl all configured statutes, lineages bounded by the configured
    /// concurrency, and return the per-lineage outcomes.
    pub async fn crawl_all(&self) -> CrawlOutcome {
        let concurrency = self.config.crawler.max_concurrent.max(1);

        let lineages = stream::iter(self.config.statutes.iter())
            .map(|statute| self.crawl_lineage(statute))
            .buffer_unordered(concurrency)
            .collect::<Vec<_>>()
            .await;

        CrawlOutcome { lineages }
    }

    /// Walk one statute from its seed URL to the end of its sections.
    async fn crawl_lineage(&self, statute: &Statute) -> LineageOutcome {
        let delay = Duration::from_millis(self.config.crawler.request_delay_ms);
        let mut visited: HashSet<String> = HashSet::new();
        let mut pages = Vec::new();
        let mut current = statute.seed_url.clone();

        log::info!("Starting lineage {} at {}", statute.name, current);

        let termination = loop {
            if !visited.insert(current.clone()) {
                log::error!(
                    "Lineage {} revisited {}; stopping to break the cycle",
                    statute.name,
                    current
                );
                break Termination::CycleDetected(current);
            }

            match self.visit_page(statute, &current).await {
                Ok(visit) => {
                    pages.push(visit.record);
                    match visit.next_url {
                        Some(next) => current = next,
                        None => break Termination::EndOfStatute,
                    }
                }
                Err(error) => {
                    log::warn!("Lineage {} failed at {}: {}", statute.name, current, error);
                    pages.push(PageRecord::failed(&current, &error));
                    break Termination::Failed(error.to_string());
                }
            }

            if delay.as_millis() > 0 {
                tokio::time::sleep(delay).await;
            }
        };

        let outcome = LineageOutcome {
            statute: statute.name.clone(),
            pages,
            termination,
        };
        log::info!(
            "Lineage {} done: {} written, {} failed",
            statute.name,
            outcome.pages_written(),
            outcome.pages_failed()
        );
        outcome
    }

    /// Fetch one page and run it through the normalize → extract →
    /// render → write chain.
    ///
    /// A fetch failure is an error and ends the lineage; a render or
    /// write failure is recorded on the page and the next link is still
    /// followed.
    async fn visit_page(&self, statute: &Statute, url: &str) -> Result<PageVisit> {
        let document = http::fetch_page_async(&self.client, url).await?;

        let next_url = self
            .extractor
            .next_href(&document)
            .map(|href| resolve_url(url, &href));

        let record = match self.export_page(statute, url, &document).await {
            Ok(file) => PageRecord::written(url, file),
            Err(error) => {
                log::warn!("Failed to export {}: {}", url, error);
                PageRecord::failed(url, &error)
            }
        };

        Ok(PageVisit { record, next_url })
    }

    /// Normalize, name, render, and write one page's PDF.
    async fn export_page(&self, statute: &Statute, url: &str, document: &Html) -> Result<String> {
        let fragment = self.extractor.body_fragment(document).unwrap_or_default();
        let text = normalize_fragment(&fragment);

        let identity = self.extractor.identity(document, &text);
        if identity.is_anonymous() {
            log::warn!("No section or schedule heading found at {}", url);
        }

        let stem = identity.stem(&statute.abbr);
        let bytes = self.renderer.render(&text)?;
        let file = self
            .store
            .write_artifact(&statute.name, &stem, &bytes)
            .await?;

        log::debug!("Wrote {}", file);
        Ok(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use tempfile::TempDir;

    /// Serve fixed HTML bodies from a local listener; unknown paths get
    /// a 404. The accept loop runs until the test process exits.
    fn spawn_server(routes: Vec<(&'static str, String)>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        std::thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { continue };
                let mut reader = BufReader::new(stream.try_clone().unwrap());

                let mut request_line = String::new();
                if reader.read_line(&mut request_line).is_err() {
                    continue;
                }
                loop {
                    let mut header = String::new();
                    match reader.read_line(&mut header) {
                        Ok(0) | Err(_) => break,
                        Ok(_) if header == "\r\n" => break,
                        Ok(_) => {}
                    }
                }

                let path = request_line.split_whitespace().nth(1).unwrap_or("/");
                let response = match routes.iter().find(|(p, _)| *p == path) {
                    Some((_, body)) => format!(
                        "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\n\
                         Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                        body.len(),
                        body
                    ),
                    None => "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\n\
                             Connection: close\r\n\r\n"
                        .to_string(),
                };
                let _ = stream.write_all(response.as_bytes());
            }
        });

        format!("http://{}", addr)
    }

    fn section_page(title: &str, section: &str, next_href: Option<&str>) -> String {
        let toolbar = next_href
            .map(|href| {
                format!(
                    "<ul class=\"navigation-toolbar\">\
                     <li><a href=\"/prev\">Previous</a></li>\
                     <li><a href=\"{href}\">Next</a></li></ul>"
                )
            })
            .unwrap_or_default();
        format!(
            "<html><body><h1 class=\"content-title\">{title}</h1>{toolbar}\
             <div id=\"act\"><a name=\"s{section}\"></a>\
             <p><b>{section}.</b> Provision text.</p></div></body></html>"
        )
    }

    fn test_config(name: &str, abbr: &str, seed_url: String) -> Config {
        let mut config = Config::default();
        config.crawler.request_delay_ms = 0;
        config.statutes = vec![Statute {
            name: name.to_string(),
            abbr: abbr.to_string(),
            seed_url,
        }];
        config
    }

    async fn crawl_one(config: Config, root: &std::path::Path) -> LineageOutcome {
        let store = LocalStore::new(root);
        store.ensure_folders(&config.statutes).await.unwrap();
        let crawler = SectionCrawler::new(Arc::new(config), store).unwrap();
        let mut outcome = crawler.crawl_all().await;
        assert_eq!(outcome.lineages.len(), 1);
        outcome.lineages.remove(0)
    }

    #[tokio::test]
    async fn test_cycle_guard_terminates_lineage() {
        let base = spawn_server(vec![(
            "/s1",
            section_page("Loop Act 1997", "1", Some("/s1")),
        )]);
        let seed = format!("{base}/s1");
        let tmp = TempDir::new().unwrap();

        let lineage = crawl_one(test_config("LoopAct", "loop", seed.clone()), tmp.path()).await;

        assert_eq!(lineage.termination, Termination::CycleDetected(seed));
        assert_eq!(lineage.pages_written(), 1);
        assert!(tmp.path().join("LoopAct/s1_loop1997.pdf").is_file());
    }

    #[tokio::test]
    async fn test_page_failure_continues_lineage() {
        let base = spawn_server(vec![
            ("/s1", section_page("Fail Act 1997", "1", Some("/s2"))),
            ("/s2", section_page("Fail Act 1997", "2", None)),
        ]);
        let tmp = TempDir::new().unwrap();
        // A directory squatting on the first artifact's path makes its
        // write fail while the second page stays writable.
        std::fs::create_dir_all(tmp.path().join("FailAct/s1_fail1997.pdf")).unwrap();

        let config = test_config("FailAct", "fail", format!("{base}/s1"));
        let lineage = crawl_one(config, tmp.path()).await;

        assert_eq!(lineage.termination, Termination::EndOfStatute);
        assert_eq!(lineage.pages.len(), 2);
        assert_eq!(lineage.pages_failed(), 1);
        assert!(lineage.pages[0].error.is_some());
        assert!(tmp.path().join("FailAct/s2_fail1997.pdf").is_file());
    }

    #[tokio::test]
    async fn test_fetch_failure_ends_lineage() {
        let base = spawn_server(vec![(
            "/s1",
            section_page("Gone Act 1997", "1", Some("/missing")),
        )]);
        let tmp = TempDir::new().unwrap();

        let config = test_config("GoneAct", "gone", format!("{base}/s1"));
        let lineage = crawl_one(config, tmp.path()).await;

        assert!(matches!(lineage.termination, Termination::Failed(_)));
        assert_eq!(lineage.pages.len(), 2);
        assert_eq!(lineage.pages_written(), 1);
        assert!(lineage.pages[1].error.is_some());
    }
}
