use crate::domain::model::{ParserMode, Report};
use crate::domain::ports::{PageFetcher, Pipeline};
use crate::utils::error::Result;
use crate::utils::html::{attr, find_all, find_tag, root, text_of};
use crate::utils::progress::page_progress;
use async_trait::async_trait;
use scraper::Html;
use url::Url;

/// Release-notes articles linked from the "What's New" index.
pub struct WhatsNewPipeline<F: PageFetcher> {
    fetcher: F,
    docs_url: Url,
}

impl<F: PageFetcher> WhatsNewPipeline<F> {
    pub fn new(fetcher: F, docs_url: Url) -> Self {
        Self { fetcher, docs_url }
    }
}

/// Article links from the index toctree, resolved against `page_url`.
pub fn parse_whats_new_index(document: &Html, page_url: &Url) -> Result<Vec<Url>> {
    let main_section = find_tag(root(document), "section", &[("id", "what-s-new-in-python")])?;
    let toctree = find_tag(main_section, "div", &[("class", "toctree-wrapper")])?;

    let mut links = Vec::new();
    for item in find_all(toctree, "li", &[("class", "toctree-l1")])? {
        let anchor = find_tag(item, "a", &[])?;
        links.push(page_url.join(attr(anchor, "href")?)?);
    }
    Ok(links)
}

/// Title and editor/author line of one article.
pub fn parse_article(document: &Html) -> Result<(String, String)> {
    let h1 = find_tag(root(document), "h1", &[])?;
    let dl = find_tag(root(document), "dl", &[])?;
    Ok((text_of(h1), text_of(dl).replace('\n', " ")))
}

#[async_trait]
impl<F: PageFetcher> Pipeline for WhatsNewPipeline<F> {
    fn mode(&self) -> ParserMode {
        ParserMode::WhatsNew
    }

    async fn extract(&self) -> Result<Option<Report>> {
        let whats_new_url = self.docs_url.join("whatsnew/")?;
        let mut report = Report::new(["Article link", "Title", "Editor, author"]);

        let Some(page) = self.fetcher.fetch(&whats_new_url).await else {
            return Ok(Some(report));
        };
        let links = parse_whats_new_index(&page.document(), &page.url)?;
        tracing::info!("📋 Found {} release notes", links.len());

        let progress = page_progress(links.len(), "Release notes");
        for link in links {
            progress.inc(1);
            let Some(article) = self.fetcher.fetch(&link).await else {
                continue;
            };
            let parsed = parse_article(&article.document());
            match parsed {
                Ok((title, editors)) => report.push([link.to_string(), title, editors]),
                Err(e) => tracing::error!("{}: {}; skipping", link, e),
            }
        }
        progress.finish_and_clear();

        Ok(Some(report))
    }
}
