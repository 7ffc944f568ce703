//! Icon mapping for the treeviz format

/// Unicode icon for a node type name (see [`crate::ir::nodes::Block::node_type`]).
pub fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "Document" => "⧉",
        "Cover" => "▣",
        "Heading" => "§",
        "Paragraph" => "¶",
        "BulletList" => "☰",
        "LearningPath" => "⇢",
        "ListItem" => "•",
        "Quote" => "\"",
        "Separator" => "⎯",
        "Text" => "◦",
        "Link" => "⊕",
        "Furniture" => "⌂",
        _ => "○",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::nodes::Block;

    #[test]
    fn test_every_block_has_an_icon() {
        let blocks = [
            Block::heading(1, "t"),
            Block::Paragraph { content: vec![] },
            Block::BulletList { items: vec![] },
            Block::LearningPath { items: vec![] },
            Block::Quote { content: vec![] },
            Block::Separator,
        ];
        for block in blocks {
            assert_ne!(get_icon(block.node_type()), "○", "{}", block.node_type());
        }
    }

    #[test]
    fn test_unknown_node_type() {
        assert_eq!(get_icon("UnknownType"), "○");
    }
}
