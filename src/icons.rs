//! Block icons as declarative trees
//!
//! Icons are immutable attribute/children trees, converted to terminal
//! glyphs by a plain recursive walk. Only `element` nodes contribute; a
//! node's `text` attribute is its visible glyph and children are walked in
//! document order.

/// One node of a declarative icon tree.
#[derive(Debug, PartialEq, Eq)]
pub struct IconNode {
    pub name: &'static str,
    pub attributes: &'static [(&'static str, &'static str)],
    pub children: &'static [IconNode],
}

impl IconNode {
    pub fn attribute(&self, key: &str) -> Option<&'static str> {
        self.attributes
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }
}

/// A named icon with its tree.
#[derive(Debug)]
pub struct Icon {
    pub name: &'static str,
    pub tree: IconNode,
}

/// Flatten an icon tree into its glyph string.
pub fn render(node: &IconNode) -> String {
    let mut out = String::new();
    walk(node, &mut out);
    out
}

fn walk(node: &IconNode, out: &mut String) {
    if node.name != "element" {
        return;
    }
    if let Some(text) = node.attribute("text") {
        out.push_str(text);
    }
    for child in node.children {
        walk(child, out);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Builtin icons
// ─────────────────────────────────────────────────────────────────────────────

pub static HOME: Icon = Icon {
    name: "home",
    tree: IconNode {
        name: "element",
        attributes: &[("role", "icon")],
        children: &[IconNode {
            name: "element",
            attributes: &[("text", "⌂")],
            children: &[],
        }],
    },
};

pub static LLM: Icon = Icon {
    name: "llm",
    tree: IconNode {
        name: "element",
        attributes: &[("role", "icon")],
        children: &[IconNode {
            name: "element",
            attributes: &[("text", "✦")],
            children: &[],
        }],
    },
};

pub static ANSWER: Icon = Icon {
    name: "answer",
    tree: IconNode {
        name: "element",
        attributes: &[("role", "icon")],
        children: &[IconNode {
            name: "element",
            attributes: &[("text", "◎")],
            children: &[],
        }],
    },
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_icons_render_one_glyph() {
        assert_eq!(render(&HOME.tree), "⌂");
        assert_eq!(render(&LLM.tree), "✦");
        assert_eq!(render(&ANSWER.tree), "◎");
    }

    #[test]
    fn test_children_walked_in_order() {
        static TREE: IconNode = IconNode {
            name: "element",
            attributes: &[],
            children: &[
                IconNode {
                    name: "element",
                    attributes: &[("text", "a")],
                    children: &[IconNode {
                        name: "element",
                        attributes: &[("text", "b")],
                        children: &[],
                    }],
                },
                IconNode {
                    name: "element",
                    attributes: &[("text", "c")],
                    children: &[],
                },
            ],
        };
        assert_eq!(render(&TREE), "abc");
    }

    #[test]
    fn test_non_element_nodes_are_skipped() {
        static TREE: IconNode = IconNode {
            name: "element",
            attributes: &[],
            children: &[IconNode {
                name: "comment",
                attributes: &[("text", "ignored")],
                children: &[],
            }],
        };
        assert_eq!(render(&TREE), "");
    }
}
