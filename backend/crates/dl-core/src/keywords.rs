use std::collections::BTreeSet;

/// Search keywords for a display name.
///
/// Every prefix of the lowercased full name plus every prefix of each
/// whitespace-separated word, so "Ada Lovelace" is found by typing "ada",
/// "lov" or "ada lo".
pub fn generate_keywords(display_name: &str) -> BTreeSet<String> {
    let name = display_name.trim().to_lowercase();
    let mut keywords = BTreeSet::new();

    push_prefixes(&name, &mut keywords);
    for word in name.split_whitespace() {
        push_prefixes(word, &mut keywords);
    }

    keywords
}

fn push_prefixes(text: &str, keywords: &mut BTreeSet<String>) {
    for (index, ch) in text.char_indices() {
        let end = index + ch.len_utf8();
        let prefix = text[..end].trim_end();
        if !prefix.is_empty() {
            keywords.insert(prefix.to_string());
        }
    }
}
