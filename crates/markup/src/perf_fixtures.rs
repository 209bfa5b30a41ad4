pub const BLOCK_TEMPLATE: &str =
    r#"<item id="block" kind='card'><title>hello</title><icon src="x"/><body>text</body></item>"#;

/// Single-root document made of `blocks` copies of `BLOCK_TEMPLATE`.
pub fn make_blocks(blocks: usize) -> String {
    let mut markup = String::with_capacity(BLOCK_TEMPLATE.len() * blocks + 16);
    markup.push_str("<doc>");
    for _ in 0..blocks {
        markup.push_str(BLOCK_TEMPLATE);
    }
    markup.push_str("</doc>");
    markup
}

/// `depth` nested elements, innermost carrying text.
pub fn make_nested(depth: usize) -> String {
    let mut markup = String::with_capacity(depth * 8 + 4);
    for _ in 0..depth {
        markup.push_str("<n>");
    }
    markup.push_str("leaf");
    for _ in 0..depth {
        markup.push_str("</n>");
    }
    markup
}
