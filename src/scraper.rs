use html5ever::driver::{parse_document, ParseOpts};
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use reqwest::header::HeaderMap;
use reqwest::Method;
use scraper::Html;
use scraper::node::Node;

use crate::error::{AppError, Result};
use crate::http::{self, SCRAPE_TIMEOUT};

/// Elements whose content never counts as page text.
const SKIPPED_ELEMENTS: [&str; 5] = ["script", "style", "nav", "footer", "header"];

const ELLIPSIS: &str = "...";

pub async fn fetch_page(url: &str) -> Result<Vec<u8>> {
    let response = http::send(Method::GET, url, HeaderMap::new(), None, SCRAPE_TIMEOUT, true)
        .await
        .map_err(AppError::from_page)?;
    Ok(response.body)
}

/// Turns an HTML document into plain text: one visible text block per line,
/// fragments separated by double spaces split apart, then cut to `max_length`
/// characters. `None` and `Some(0)` both mean no limit.
pub fn normalize(html: &[u8], max_length: Option<usize>) -> String {
    let document = parse_html(&String::from_utf8_lossy(html));

    let blocks: Vec<&str> = document
        .tree
        .root()
        .descendants()
        .filter_map(|node| match node.value() {
            Node::Text(text) => {
                let mut ancestors = node.ancestors().filter_map(|a| a.value().as_element());
                let hidden = ancestors.any(|e| SKIPPED_ELEMENTS.contains(&e.name()));
                (!hidden).then_some(text.trim())
            }
            _ => None,
        })
        .filter(|block| !block.is_empty())
        .collect();
    let text = blocks.join("\n");

    let text = text
        .split(is_line_break)
        .map(str::trim)
        .flat_map(|line| line.split("  "))
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    truncate(text, max_length)
}

/// Parses with scripting disabled so `<noscript>` children become elements
/// instead of one raw text node holding their markup.
fn parse_html(html: &str) -> Html {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            scripting_enabled: false,
            ..Default::default()
        },
        ..Default::default()
    };
    parse_document(Html::new_document(), opts).one(html)
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

fn truncate(text: String, max_length: Option<usize>) -> String {
    let limit = match max_length {
        Some(limit) if limit > 0 => limit,
        _ => return text,
    };

    match text.char_indices().nth(limit) {
        Some((cut, _)) => {
            let mut truncated = String::with_capacity(cut + ELLIPSIS.len());
            truncated.push_str(&text[..cut]);
            truncated.push_str(ELLIPSIS);
            truncated
        }
        None => text,
    }
}
