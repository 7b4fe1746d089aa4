use crate::tree::TreeNode;

/// Render a tree as text: the root label, then one line per node with guides.
///
/// Labels spanning several lines are continued under their own guide.
#[must_use]
pub fn render(tree: &TreeNode) -> String {
    let mut lines: Vec<String> = tree.label.lines().map(str::to_string).collect();
    render_children(&tree.nodes, "", &mut lines);
    lines
        .iter()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_children(nodes: &[TreeNode], prefix: &str, lines: &mut Vec<String>) {
    for (i, node) in nodes.iter().enumerate() {
        let is_last = i + 1 == nodes.len();
        let (connector, guide) = if is_last {
            ("└─ ", "   ")
        } else {
            ("├─ ", "│  ")
        };
        let child_prefix = format!("{prefix}{guide}");

        let mut label = node.label.lines();
        lines.push(format!(
            "{prefix}{connector}{}",
            label.next().unwrap_or_default()
        ));
        let continuation = if node.nodes.is_empty() { "" } else { "│ " };
        for line in label {
            lines.push(format!("{child_prefix}{continuation}{line}"));
        }

        render_children(&node.nodes, &child_prefix, lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(label: &str, nodes: Vec<TreeNode>) -> TreeNode {
        TreeNode {
            label: label.to_string(),
            nodes,
        }
    }

    #[test]
    fn test_render_nested() {
        let tree = node(
            "3 scripts",
            vec![
                node(
                    "build",
                    vec![
                        TreeNode::leaf("prebuild"),
                        node("copy", vec![TreeNode::leaf("mkdir")]),
                    ],
                ),
                TreeNode::leaf("lint"),
                node("test", vec![TreeNode::leaf("test:unit")]),
            ],
        );
        let expected = [
            "3 scripts",
            "├─ build",
            "│  ├─ prebuild",
            "│  └─ copy",
            "│     └─ mkdir",
            "├─ lint",
            "└─ test",
            "   └─ test:unit",
        ];
        assert_eq!(render(&tree), expected.join("\n"));
    }

    #[test]
    fn test_render_root_only() {
        assert_eq!(render(&TreeNode::leaf("0 scripts")), "0 scripts");
    }

    #[test]
    fn test_render_multiline_label() {
        let tree = node(
            "2 scripts",
            vec![
                node("a → echo 1\necho 2", vec![TreeNode::leaf("b")]),
                TreeNode::leaf("c → one\ntwo"),
            ],
        );
        let expected = [
            "2 scripts",
            "├─ a → echo 1",
            "│  │ echo 2",
            "│  └─ b",
            "└─ c → one",
            "   two",
        ];
        assert_eq!(render(&tree), expected.join("\n"));
    }
}
