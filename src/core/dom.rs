// src/core/dom.rs
//! Tolerant HTML → element tree builder.
//!
//! Both portals render markup that is close to, but not quite, well formed:
//! unclosed `<td>`/`<li>`, stray close tags, inline scripts. The builder
//! never fails; it repairs what it can and drops what it cannot:
//! - tag and attribute names are lowercased,
//! - `script`/`style` bodies are skipped entirely,
//! - void elements (`input`, `br`, …) and `<x/>` never take children,
//! - a close tag with no open counterpart is ignored,
//! - `td`/`th`/`tr`/`tbody`/`li`/`p` are implicitly closed the way browsers do.
//!
//! Lookups (`find`, `find_all`) walk descendants in document order, which
//! is what the extractors rely on when they pair collections by position.

use super::sanitize::{normalize_entities, normalize_ws};

/// How an element is looked up on a page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Locator {
    /// Element name, case-insensitive (`h1`, `tbody`, `ladok-paketering`).
    Tag(String),
    /// One or more space-separated classes; an element must carry all of them.
    Class(String),
    /// Exact `id` attribute.
    Id(String),
}

impl Locator {
    pub fn tag(name: &str) -> Self { Locator::Tag(s!(name)) }
    pub fn class(name: &str) -> Self { Locator::Class(s!(name)) }
    pub fn id(name: &str) -> Self { Locator::Id(s!(name)) }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Locator::Tag(t) => write!(f, "<{t}>"),
            Locator::Class(c) => write!(f, ".{}", c.split_whitespace().collect::<Vec<_>>().join(".")),
            Locator::Id(i) => write!(f, "#{i}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

const DOCUMENT_TAG: &str = "#document";

const VOID: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track", "wbr",
];

const SKIPPED: &[&str] = &["script", "style"];

/// Elements whose boundaries separate words in rendered text.
const BLOCK: &[&str] = &[
    "address", "article", "br", "dd", "div", "dl", "dt", "footer", "form", "h1", "h2", "h3", "h4",
    "h5", "h6", "header", "hr", "li", "main", "nav", "ol", "p", "section", "table", "tbody", "td",
    "tfoot", "th", "thead", "tr", "ul",
];

impl Element {
    fn new(tag: String, attrs: Vec<(String, String)>) -> Self {
        Self { tag, attrs, children: Vec::new() }
    }

    pub fn tag(&self) -> &str { &self.tag }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|list| list.split_whitespace().any(|c| c == class))
    }

    /// Direct element children, in order.
    pub fn children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Rendered text of the subtree: entities decoded, whitespace collapsed.
    pub fn text(&self) -> String {
        let mut buf = s!();
        self.collect_text(&mut buf);
        normalize_ws(&buf)
    }

    fn collect_text(&self, buf: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(t) => buf.push_str(t),
                Node::Element(e) => {
                    let block = BLOCK.contains(&e.tag.as_str());
                    if block { buf.push(' '); }
                    e.collect_text(buf);
                    if block { buf.push(' '); }
                }
            }
        }
    }

    pub fn matches(&self, locator: &Locator) -> bool {
        match locator {
            Locator::Tag(t) => self.tag.eq_ignore_ascii_case(t),
            Locator::Class(c) => {
                let mut wanted = c.split_whitespace().peekable();
                wanted.peek().is_some() && wanted.all(|w| self.has_class(w))
            }
            Locator::Id(id) => self.attr("id") == Some(id.as_str()),
        }
    }

    /// First matching descendant (never `self`).
    pub fn find(&self, locator: &Locator) -> Option<&Element> {
        let mut out = Vec::with_capacity(1);
        self.walk(locator, &mut out, true);
        out.pop()
    }

    /// All matching descendants in document order (never `self`).
    pub fn find_all(&self, locator: &Locator) -> Vec<&Element> {
        let mut out = Vec::new();
        self.walk(locator, &mut out, false);
        out
    }

    fn walk<'a>(&'a self, locator: &Locator, out: &mut Vec<&'a Element>, first_only: bool) -> bool {
        for child in self.children() {
            if child.matches(locator) {
                out.push(child);
                if first_only { return true; }
            }
            if child.walk(locator, out, first_only) { return true; }
        }
        false
    }
}

/* ---------------- Parsing ---------------- */

/// Build the tree for a whole document. The returned root is a synthetic
/// `#document` element holding the top-level nodes.
pub fn parse(html: &str) -> Element {
    let bytes = html.as_bytes();
    let n = bytes.len();
    let mut stack: Vec<Element> = vec![Element::new(s!(DOCUMENT_TAG), Vec::new())];
    let mut i = 0usize;
    let mut text_start = 0usize;

    while i < n {
        if bytes[i] != b'<' {
            i += 1;
            continue;
        }
        let rest = &html[i..];
        let next = bytes.get(i + 1).copied();

        let consumed_to = if rest.starts_with("<!--") {
            push_text(&mut stack, &html[text_start..i]);
            rest.find("-->").map_or(n, |e| i + e + 3)
        } else if next == Some(b'!') || next == Some(b'?') {
            push_text(&mut stack, &html[text_start..i]);
            rest.find('>').map_or(n, |e| i + e + 1)
        } else if next == Some(b'/') {
            push_text(&mut stack, &html[text_start..i]);
            let end = rest.find('>').map_or(n, |e| i + e);
            let name = tag_name(&html[(i + 2).min(end)..end]);
            close_tag(&mut stack, &name);
            (end + 1).min(n)
        } else if next.is_some_and(|b| b.is_ascii_alphabetic()) {
            push_text(&mut stack, &html[text_start..i]);
            let end = find_tag_end(bytes, i + 1);
            let (name, attrs, self_closing) = parse_open_tag(&html[i + 1..end]);
            let after = (end + 1).min(n);

            if SKIPPED.contains(&name.as_str()) {
                skip_raw_body(html, after, &name)
            } else {
                implicit_close(&mut stack, &name);
                let el = Element::new(name, attrs);
                if self_closing || VOID.contains(&el.tag.as_str()) {
                    append(&mut stack, Node::Element(el));
                } else {
                    stack.push(el);
                }
                after
            }
        } else {
            // A bare '<' in text
            i += 1;
            continue;
        };

        i = consumed_to;
        text_start = i;
    }
    push_text(&mut stack, &html[text_start.min(n)..]);

    while stack.len() > 1 {
        pop_into_parent(&mut stack);
    }
    stack.pop().unwrap_or_else(|| Element::new(s!(DOCUMENT_TAG), Vec::new()))
}

fn push_text(stack: &mut [Element], raw: &str) {
    if raw.is_empty() { return; }
    let text = normalize_entities(raw);
    if let Some(top) = stack.last_mut() {
        top.children.push(Node::Text(text));
    }
}

fn append(stack: &mut [Element], node: Node) {
    if let Some(top) = stack.last_mut() {
        top.children.push(node);
    }
}

fn pop_into_parent(stack: &mut Vec<Element>) {
    if stack.len() < 2 { return; }
    if let Some(el) = stack.pop() {
        append(stack, Node::Element(el));
    }
}

/// Close the innermost open `name`, closing anything opened inside it.
fn close_tag(stack: &mut Vec<Element>, name: &str) {
    let Some(pos) = stack.iter().rposition(|e| e.tag == name) else { return };
    if pos == 0 { return; }
    while stack.len() > pos {
        pop_into_parent(stack);
    }
}

/// Close the innermost open element in `targets`, unless a `boundary` element comes first.
fn close_if_open(stack: &mut Vec<Element>, targets: &[&str], boundary: &[&str]) {
    for (idx, el) in stack.iter().enumerate().rev() {
        if idx == 0 { return; }
        let tag = el.tag.as_str();
        if targets.contains(&tag) {
            while stack.len() > idx {
                pop_into_parent(stack);
            }
            return;
        }
        if boundary.contains(&tag) { return; }
    }
}

fn implicit_close(stack: &mut Vec<Element>, opening: &str) {
    match opening {
        "td" | "th" => close_if_open(stack, &["td", "th"], &["tr", "table"]),
        "tr" => close_if_open(stack, &["tr"], &["tbody", "thead", "tfoot", "table"]),
        "tbody" | "thead" | "tfoot" => close_if_open(stack, &["tbody", "thead", "tfoot"], &["table"]),
        "li" => close_if_open(stack, &["li"], &["ul", "ol"]),
        "p" => close_if_open(stack, &["p"], &["div", "td", "th", "li", "body", "section"]),
        _ => {}
    }
}

/// Index of the `>` ending the tag opened at `from`, honoring quoted attribute values.
fn find_tag_end(bytes: &[u8], from: usize) -> usize {
    let mut quote: Option<u8> = None;
    let mut i = from;
    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if b == b'"' || b == b'\'' => quote = Some(b),
            None if b == b'>' => return i,
            None => {}
        }
        i += 1;
    }
    bytes.len()
}

fn skip_raw_body(html: &str, from: usize, name: &str) -> usize {
    let close = join!("</", name);
    let lc = html[from..].to_ascii_lowercase();
    match lc.find(&close) {
        Some(p) => {
            let stop = from + p;
            html[stop..].find('>').map_or(html.len(), |e| stop + e + 1)
        }
        None => html.len(),
    }
}

fn tag_name(s: &str) -> String {
    s.trim_start()
        .chars()
        .take_while(|c| !c.is_whitespace() && *c != '/' && *c != '>')
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Split `name attr="v" attr2='w' flag` into parts. Returns (name, attrs, self_closing).
fn parse_open_tag(inner: &str) -> (String, Vec<(String, String)>, bool) {
    let name = tag_name(inner);
    let self_closing = inner.trim_end().ends_with('/');
    let mut attrs = Vec::new();

    let rest = &inner[name.len().min(inner.len())..];
    let chars: Vec<char> = rest.chars().collect();
    let mut i = 0usize;
    while i < chars.len() {
        while i < chars.len() && (chars[i].is_whitespace() || chars[i] == '/') {
            i += 1;
        }
        if i >= chars.len() { break; }

        let start = i;
        while i < chars.len() && !chars[i].is_whitespace() && chars[i] != '=' && chars[i] != '/' {
            i += 1;
        }
        let key: String = chars[start..i].iter().collect::<String>().to_ascii_lowercase();
        while i < chars.len() && chars[i].is_whitespace() {
            i += 1;
        }

        let mut value = s!();
        if i < chars.len() && chars[i] == '=' {
            i += 1;
            while i < chars.len() && chars[i].is_whitespace() {
                i += 1;
            }
            if i < chars.len() && (chars[i] == '"' || chars[i] == '\'') {
                let q = chars[i];
                i += 1;
                let vs = i;
                while i < chars.len() && chars[i] != q {
                    i += 1;
                }
                value = chars[vs..i].iter().collect();
                i += 1;
            } else {
                let vs = i;
                while i < chars.len() && !chars[i].is_whitespace() {
                    i += 1;
                }
                value = chars[vs..i].iter().collect();
            }
        }
        if !key.is_empty() {
            attrs.push((key, normalize_entities(&value)));
        }
    }
    (name, attrs, self_closing)
}
