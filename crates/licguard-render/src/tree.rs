use crate::RenderableTreeNode;

/// Render walk records as an indented text tree, root first.
///
/// `nodes` are in the walker's deepest-first order; they are reversed here.
pub fn render_tree_text(nodes: &[RenderableTreeNode]) -> String {
    let mut out = String::new();
    for node in nodes.iter().rev() {
        for _ in 0..node.level {
            out.push_str("  ");
        }
        out.push_str(&format!(
            "{} [{}] {}",
            node.name,
            node.license,
            node.status.as_str()
        ));
        if !node.incompatible_licenses.is_empty() {
            out.push_str(&format!(" ({})", node.incompatible_licenses.join(", ")));
        }
        if node.reused {
            out.push_str(" (reused)");
        }
        out.push('\n');
    }
    out
}

/// Render walk records as nested HTML lists, root first.
///
/// A list opens on each level increase and closes on each decrease. Every `<li>` carries
/// the node status (`ok`, `culprit`, `incompatible`) as its class.
pub fn render_tree_html(nodes: &[RenderableTreeNode]) -> String {
    let mut out = String::from("<ul class=\"licguard-tree\">\n");
    let mut prev: Option<u32> = None;

    for node in nodes.iter().rev() {
        match prev {
            None => {}
            Some(p) if node.level > p => {
                for _ in p..node.level {
                    out.push_str("<ul>\n");
                }
            }
            Some(p) => {
                out.push_str("</li>\n");
                for _ in node.level..p {
                    out.push_str("</ul>\n</li>\n");
                }
            }
        }

        out.push_str(&format!(
            "<li class=\"{status}\" title=\"{path}\"><span class=\"name\">{name}</span> \
             <span class=\"license\">{license}</span> <span class=\"status\">{status}</span>",
            status = node.status.as_str(),
            path = escape(&node.full_path),
            name = escape(&node.name),
            license = escape(&node.license),
        ));
        if !node.incompatible_licenses.is_empty() {
            let list: Vec<String> = node.incompatible_licenses.iter().map(|l| escape(l)).collect();
            out.push_str(&format!(
                " <span class=\"incompatible-licenses\">{}</span>",
                list.join(", ")
            ));
        }
        if node.reused {
            out.push_str(" <span class=\"reused\">reused</span>");
        }
        out.push('\n');
        prev = Some(node.level);
    }

    if let Some(p) = prev {
        out.push_str("</li>\n");
        for _ in 0..p {
            out.push_str("</ul>\n</li>\n");
        }
    }
    out.push_str("</ul>\n");
    out
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RenderableNodeStatus;

    fn node(
        level: u32,
        name: &str,
        license: &str,
        status: RenderableNodeStatus,
    ) -> RenderableTreeNode {
        RenderableTreeNode {
            level,
            name: name.to_string(),
            full_path: format!("/usr/lib/{name}"),
            license: license.to_string(),
            status,
            incompatible_licenses: Vec::new(),
            reused: false,
        }
    }

    fn chain() -> Vec<RenderableTreeNode> {
        let mut libfoo = node(1, "libfoo", "MIT", RenderableNodeStatus::Incompatible);
        libfoo.incompatible_licenses = vec!["GPL".to_string()];
        let mut app = node(0, "app", "MIT", RenderableNodeStatus::Incompatible);
        app.incompatible_licenses = vec!["GPL".to_string()];
        vec![
            node(2, "libbar", "GPL", RenderableNodeStatus::Culprit),
            libfoo,
            app,
        ]
    }

    #[test]
    fn text_tree_is_root_first_and_indented() {
        insta::assert_snapshot!(render_tree_text(&chain()), @r"
        app [MIT] incompatible (GPL)
          libfoo [MIT] incompatible (GPL)
            libbar [GPL] culprit
        ");
    }

    #[test]
    fn html_tree_nests_and_closes_lists() {
        let html = render_tree_html(&chain());
        assert_eq!(html.matches("<ul").count(), html.matches("</ul>").count());
        assert_eq!(html.matches("<li").count(), html.matches("</li>").count());
        assert_eq!(html.matches("<li").count(), 3);
        assert!(html.contains("<li class=\"culprit\" title=\"/usr/lib/libbar\">"));
        let app = html.find("app").expect("app");
        let libbar = html.find("libbar").expect("libbar");
        assert!(app < libbar);
    }

    #[test]
    fn html_closes_lists_when_the_level_drops() {
        // Deepest-first: d (1), c (2), b (1), a (0). Rendered: a, b, c, d.
        let nodes = vec![
            node(1, "d", "MIT", RenderableNodeStatus::Ok),
            node(2, "c", "MIT", RenderableNodeStatus::Ok),
            node(1, "b", "MIT", RenderableNodeStatus::Ok),
            node(0, "a", "MIT", RenderableNodeStatus::Ok),
        ];
        let html = render_tree_html(&nodes);
        assert!(html.contains("</li>\n</ul>\n</li>\n<li class=\"ok\" title=\"/usr/lib/d\">"));
        assert!(html.ends_with("</li>\n</ul>\n</li>\n</ul>\n"));
        assert_eq!(html.matches("<ul").count(), 3);
        assert_eq!(html.matches("</ul>").count(), 3);
    }

    #[test]
    fn html_escapes_names() {
        let nodes = vec![node(0, "a<b>&\"c\"", "MIT", RenderableNodeStatus::Ok)];
        let html = render_tree_html(&nodes);
        assert!(html.contains("a&lt;b&gt;&amp;&quot;c&quot;"));
    }

    #[test]
    fn reused_nodes_are_marked() {
        let mut n = node(1, "liba", "MIT", RenderableNodeStatus::Ok);
        n.reused = true;
        let nodes = vec![n, node(0, "app", "MIT", RenderableNodeStatus::Ok)];
        assert_eq!(
            render_tree_text(&nodes),
            "app [MIT] ok\n  liba [MIT] ok (reused)\n"
        );
    }
}
