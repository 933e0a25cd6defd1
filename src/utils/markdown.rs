/// Characters Telegram's MarkdownV2 treats as markup.
const RESERVED: &[char] = &[
    '\\', '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
];

/// Escapes text so it renders literally under MarkdownV2 parse mode.
///
/// Inline answers carry guidebook text, which is full of URLs and
/// punctuation; every reserved character gets a backslash.
///
/// # Example
/// ```
/// use refugee_help_bot::utils::markdown::escape_markdown;
///
/// assert_eq!(escape_markdown("Chat (Berlin) - t.me/x"), "Chat \\(Berlin\\) \\- t\\.me/x");
/// ```
pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if RESERVED.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
