//! Framez CLI — simulate a frame load against a host document and print
//! the resulting DOM.
//!
//! The harness parses a host page, registers its first `<iframe>` with a
//! [`Page`], commits a navigation carrying the content document and the
//! given address, then dispatches the load event and drains the task
//! queue exactly as an embedding host would.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use framez_common::{Address, resolve};
use framez_dom::{DomTree, NodeId, NodeType, print_tree};
use framez_html::parse_document;
use framez_page::{Page, TaskQueue, handle_frame_load};
use framez_select::{parse_selector, query_selector};
use owo_colors::OwoColorize;

/// Framez — fragment-targeted DOM swapping from the command line
#[derive(Parser, Debug)]
#[command(name = "framez")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Swap #target with the content body, frame address carries the fragment
    framez host.html --content rows.html --url 'http://example.com/rows#target'

    # Inline markup instead of files
    framez --host-html '<div id="t">old</div><iframe></iframe>' \
           --content-html '<p>new</p>' --url 'http://x/p#t'

    # Relative frame URL, resolved against the host page's address
    framez host.html --content rows.html --url 'rows#target' --base 'http://x/page'

    # Dump the resulting document as JSON
    framez host.html --content rows.html --url 'http://x/rows#target' --json
"#)]
struct Cli {
    /// Path to the host HTML file (must contain an <iframe>)
    #[arg(value_name = "FILE")]
    host: Option<PathBuf>,

    /// Host HTML string instead of a file
    #[arg(long, value_name = "HTML", conflicts_with = "host")]
    host_html: Option<String>,

    /// Path to the HTML file loaded inside the frame
    #[arg(long, value_name = "FILE")]
    content: Option<PathBuf>,

    /// Frame content HTML string instead of a file
    #[arg(long, value_name = "HTML", conflicts_with = "content")]
    content_html: Option<String>,

    /// Address the frame navigated to; the fragment selects the swap target
    #[arg(long, default_value = "about:blank")]
    url: String,

    /// Base address to resolve a relative --url against, the way frame
    /// markup resolves relative hrefs
    #[arg(long, value_name = "URL")]
    base: Option<String>,

    /// Output the resulting document as JSON instead of a tree dump
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let host_html = read_input(cli.host.as_deref(), cli.host_html.as_deref())
        .context("no host document given (pass a FILE or --host-html)")?;
    let content_html = read_input(cli.content.as_deref(), cli.content_html.as_deref())
        .unwrap_or_default();

    let document = parse_document(&host_html);
    let iframe_selector = parse_selector("iframe").context("internal selector")?;
    let Some(iframe) = query_selector(&document, NodeId::ROOT, &iframe_selector) else {
        bail!("host document contains no <iframe> element");
    };

    let mut page = Page::new(document);
    let frame = page.insert_frame(iframe);

    let raw_url = match &cli.base {
        Some(base) => {
            let base: Address = base.parse().context("invalid --base")?;
            resolve(&cli.url, &base)
        }
        None => cli.url.clone(),
    };
    let address: Address = raw_url.parse().context("invalid --url")?;
    if !address.is_blank() {
        page.commit_navigation(frame, address, parse_document(&content_html));
    }

    let mut tasks = TaskQueue::new();
    handle_frame_load(&page, frame, &mut tasks);
    tasks.run_until_idle(&mut page);

    if cli.json {
        let json = dom_to_json(page.document(), NodeId::ROOT);
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        println!("{}", "=== DOM Tree ===".green().bold());
        print_tree(page.document(), NodeId::ROOT, 0);
    }

    Ok(())
}

fn read_input(path: Option<&std::path::Path>, inline: Option<&str>) -> Result<String> {
    if let Some(html) = inline {
        return Ok(html.to_string());
    }
    let Some(path) = path else {
        bail!("no input");
    };
    fs::read_to_string(path).with_context(|| format!("reading '{}'", path.display()))
}

fn dom_to_json(tree: &DomTree, id: NodeId) -> serde_json::Value {
    let mut obj = serde_json::Map::new();

    let Some(node) = tree.get(id) else {
        return serde_json::Value::Object(obj);
    };

    match &node.node_type {
        NodeType::Document => {
            let _ = obj.insert("type".to_string(), serde_json::json!("document"));
        }
        NodeType::Element(data) => {
            let _ = obj.insert("type".to_string(), serde_json::json!("element"));
            let _ = obj.insert("tagName".to_string(), serde_json::json!(data.tag_name));

            let attrs: serde_json::Map<String, serde_json::Value> = data
                .attrs
                .iter()
                .map(|(k, v)| (k.clone(), serde_json::json!(v)))
                .collect();
            let _ = obj.insert(
                "attributes".to_string(),
                serde_json::Value::Object(attrs),
            );
        }
        NodeType::Text(text) => {
            let _ = obj.insert("type".to_string(), serde_json::json!("text"));
            let _ = obj.insert("content".to_string(), serde_json::json!(text));
        }
        NodeType::Comment(text) => {
            let _ = obj.insert("type".to_string(), serde_json::json!("comment"));
            let _ = obj.insert("content".to_string(), serde_json::json!(text));
        }
    }

    let children: Vec<serde_json::Value> = tree
        .children(id)
        .iter()
        .map(|&child| dom_to_json(tree, child))
        .collect();
    if !children.is_empty() {
        let _ = obj.insert("children".to_string(), serde_json::Value::Array(children));
    }

    serde_json::Value::Object(obj)
}
