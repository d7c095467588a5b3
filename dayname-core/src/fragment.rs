//! Fragment walking over a parsed markup tree.
//!
//! The page wraps its event lines in whatever markup the editor of the day
//! produced (`<p>`, `<br>`-separated text, stray `<span>`s). Instead of
//! selecting specific elements we walk every node under the root and let an
//! acceptance predicate decide which text nodes are event lines.

use ego_tree::NodeRef;
use scraper::{ElementRef, Node, Selector};
use serde::{Deserialize, Serialize};

/// What kind of node a fragment was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Text,
    Element,
    Other,
}

impl NodeKind {
    fn of(node: &Node) -> Self {
        match node {
            Node::Text(_) => NodeKind::Text,
            Node::Element(_) => NodeKind::Element,
            _ => NodeKind::Other,
        }
    }
}

/// A piece of text eligible for tokenizing, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Position among the fragments emitted by one walk
    pub index: usize,
    pub text: String,
    pub parent_tag: Option<String>,
    pub kind: NodeKind,
}

impl Fragment {
    /// Build a standalone text fragment (no tree context).
    pub fn from_text(text: &str) -> Self {
        Fragment {
            index: 0,
            text: text.trim().to_string(),
            parent_tag: None,
            kind: NodeKind::Text,
        }
    }
}

/// Walk the subtree below `root`, returning the fragments of every node
/// `accept` approves.
///
/// Nodes are emitted after all of their descendants (post-order), siblings left
/// to right. The tree is never modified, so repeated walks give equal results.
pub fn walk<'a, F>(root: NodeRef<'a, Node>, accept: F) -> Vec<Fragment>
where
    F: Fn(NodeRef<'a, Node>) -> bool,
{
    let mut fragments = Vec::new();

    // (node, children already pushed)
    let mut stack: Vec<(NodeRef<'a, Node>, bool)> =
        root.children().rev().map(|child| (child, false)).collect();

    while let Some((node, expanded)) = stack.pop() {
        if !expanded && node.has_children() {
            stack.push((node, true));
            stack.extend(node.children().rev().map(|child| (child, false)));
            continue;
        }

        if accept(node) {
            fragments.push(Fragment {
                index: fragments.len(),
                text: node_text(node),
                parent_tag: parent_tag(node),
                kind: NodeKind::of(node.value()),
            });
        }
    }

    fragments
}

fn node_text(node: NodeRef<'_, Node>) -> String {
    match node.value() {
        Node::Text(text) => text.text.trim().to_string(),
        _ => ElementRef::wrap(node)
            .map(|element| element.text().collect::<String>().trim().to_string())
            .unwrap_or_default(),
    }
}

fn parent_tag(node: NodeRef<'_, Node>) -> Option<String> {
    node.parent()
        .and_then(|parent| parent.value().as_element().map(|e| e.name().to_lowercase()))
}

/// Which text nodes count as event lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AcceptPredicate {
    /// Any non-blank text node
    #[default]
    Text,
    /// Non-blank text nodes whose parent element has one of these tags
    TextUnder(Vec<String>),
}

/// An acceptance predicate plus the subtree to leave out (e.g. a heading).
#[derive(Debug, Clone)]
pub struct Acceptance {
    predicate: AcceptPredicate,
    exclude: Option<Selector>,
}

impl Acceptance {
    pub fn new(predicate: AcceptPredicate, exclude: Option<Selector>) -> Self {
        Acceptance { predicate, exclude }
    }

    pub fn accepts(&self, node: NodeRef<'_, Node>) -> bool {
        let Node::Text(text) = node.value() else {
            return false;
        };

        if text.text.trim().is_empty() {
            return false;
        }

        if let AcceptPredicate::TextUnder(tags) = &self.predicate {
            let allowed = parent_tag(node)
                .is_some_and(|parent| tags.iter().any(|tag| tag.eq_ignore_ascii_case(&parent)));
            if !allowed {
                return false;
            }
        }

        !self.is_excluded(node)
    }

    fn is_excluded(&self, node: NodeRef<'_, Node>) -> bool {
        let Some(exclude) = &self.exclude else {
            return false;
        };

        node.ancestors()
            .filter_map(ElementRef::wrap)
            .any(|ancestor| exclude.matches(&ancestor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    const PAGE: &str = r#"
        <div id="dayname">
            <div class="titreday">It's Your Day!</div>
            <p>3/14/24: Pi Day</p>
            <p><span>3/15/24: <b>ignored bold</b></span></p>
            3/16/24: Loose Text
            <p>   </p>
        </div>"#;

    fn root(html: &Html) -> NodeRef<'_, Node> {
        let selector = Selector::parse("#dayname").unwrap();
        *html.select(&selector).next().expect("root element")
    }

    fn texts(fragments: &[Fragment]) -> Vec<&str> {
        fragments.iter().map(|f| f.text.as_str()).collect()
    }

    #[test]
    fn test_walk_emits_text_in_document_order() {
        let html = Html::parse_fragment(PAGE);
        let acceptance = Acceptance::new(AcceptPredicate::Text, None);

        let fragments = walk(root(&html), |node| acceptance.accepts(node));

        assert_eq!(
            texts(&fragments),
            vec![
                "It's Your Day!",
                "3/14/24: Pi Day",
                "3/15/24:",
                "ignored bold",
                "3/16/24: Loose Text",
            ]
        );
        let indexes: Vec<usize> = fragments.iter().map(|f| f.index).collect();
        assert_eq!(indexes, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_walk_is_reproducible() {
        let html = Html::parse_fragment(PAGE);
        let acceptance = Acceptance::new(AcceptPredicate::Text, None);

        let first = walk(root(&html), |node| acceptance.accepts(node));
        let second = walk(root(&html), |node| acceptance.accepts(node));

        assert_eq!(first, second);
    }

    #[test]
    fn test_walk_is_post_order() {
        let html = Html::parse_fragment("<div id=\"dayname\"><p>a<span>b</span>c</p></div>");

        let tags: Vec<String> = walk(root(&html), |node| node.value().is_element())
            .into_iter()
            .map(|f| format!("{}:{}", f.parent_tag.unwrap_or_default(), f.text))
            .collect();

        // <span> is emitted before its parent <p>
        assert_eq!(tags, vec!["p:b", "div:abc"]);
    }

    #[test]
    fn test_exclude_skips_heading_subtree() {
        let html = Html::parse_fragment(PAGE);
        let exclude = Selector::parse(".titreday").unwrap();
        let acceptance = Acceptance::new(AcceptPredicate::Text, Some(exclude));

        let fragments = walk(root(&html), |node| acceptance.accepts(node));

        assert!(
            !texts(&fragments).contains(&"It's Your Day!"),
            "Heading text should be excluded. Got: {:?}",
            texts(&fragments)
        );
        assert_eq!(fragments.len(), 4);
    }

    #[test]
    fn test_text_under_filters_by_parent_tag() {
        let html = Html::parse_fragment(PAGE);
        let acceptance = Acceptance::new(AcceptPredicate::TextUnder(vec!["P".to_string()]), None);

        let fragments = walk(root(&html), |node| acceptance.accepts(node));

        assert_eq!(texts(&fragments), vec!["3/14/24: Pi Day"]);
        assert_eq!(fragments[0].parent_tag.as_deref(), Some("p"));
        assert_eq!(fragments[0].kind, NodeKind::Text);
    }
}
