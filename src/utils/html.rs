//! Element lookup on parsed pages.
//!
//! Missing elements come back as [`ScrapeError::TagNotFound`]; whether that
//! aborts the run or only skips one page is up to the caller.

use crate::utils::error::{Result, ScrapeError};
use scraper::{ElementRef, Html, Selector};

/// Builds a CSS selector for `tag` with attribute filters.
///
/// `class` matches one word of the element's class list, like BeautifulSoup
/// does; every other attribute must match exactly.
pub fn tag_selector(tag: &str, attrs: &[(&str, &str)]) -> String {
    let mut selector = tag.to_string();
    for (name, value) in attrs {
        let op = if *name == "class" { "~=" } else { "=" };
        selector.push_str(&format!("[{}{}\"{}\"]", name, op, value.replace('"', "\\\"")));
    }
    selector
}

pub fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::ProcessingError {
        message: format!("invalid selector '{}': {:?}", css, e),
    })
}

/// First descendant of `container` matching a CSS selector.
pub fn find_tag_by_selector<'a>(container: ElementRef<'a>, css: &str) -> Result<ElementRef<'a>> {
    let selector = parse_selector(css)?;
    container
        .select(&selector)
        .next()
        .ok_or_else(|| ScrapeError::tag_not_found(css))
}

pub fn find_tag<'a>(
    container: ElementRef<'a>,
    tag: &str,
    attrs: &[(&str, &str)],
) -> Result<ElementRef<'a>> {
    find_tag_by_selector(container, &tag_selector(tag, attrs))
}

pub fn find_all<'a>(
    container: ElementRef<'a>,
    tag: &str,
    attrs: &[(&str, &str)],
) -> Result<Vec<ElementRef<'a>>> {
    let selector = parse_selector(&tag_selector(tag, attrs))?;
    Ok(container.select(&selector).collect())
}

pub fn attr<'a>(element: ElementRef<'a>, name: &str) -> Result<&'a str> {
    element
        .value()
        .attr(name)
        .ok_or_else(|| ScrapeError::MissingAttribute {
            tag: element.value().name().to_string(),
            attribute: name.to_string(),
        })
}

/// Concatenated text of all descendant text nodes, untouched.
pub fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect()
}

pub fn root(document: &Html) -> ElementRef<'_> {
    document.root_element()
}
