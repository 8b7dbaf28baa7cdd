//! Name inflection helpers.

/// Convert a type name into its table form (`BlogPost` -> `blog_post`).
///
/// An underscore goes before every uppercase letter that follows a word
/// character, then the whole name is lowercased. Consecutive capitals are
/// split one by one (`HTMLPage` -> `h_t_m_l_page`), as ORM table naming does.
pub fn tableize(word: &str) -> String {
    let mut out = String::with_capacity(word.len() + 4);
    let mut prev: Option<char> = None;

    for c in word.chars() {
        if c.is_uppercase() && prev.is_some_and(is_word_char) {
            out.push('_');
        }
        out.extend(c.to_lowercase());
        prev = Some(c);
    }

    out
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Last path segment of a fully-qualified class name
pub fn short_class_name(class_name: &str) -> &str {
    class_name
        .rsplit(|c: char| matches!(c, '\\' | ':' | '/' | '.'))
        .next()
        .unwrap_or(class_name)
}

/// Entity name used by the admin panel for a class (`App\Entity\BlogPost` -> `blog_post`)
pub fn entity_name(class_name: &str) -> String {
    tableize(short_class_name(class_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tableize() {
        assert_eq!(tableize("BlogPost"), "blog_post");
        assert_eq!(tableize("Post"), "post");
        assert_eq!(tableize("post"), "post");
        assert_eq!(tableize("HTMLPage"), "h_t_m_l_page");
        assert_eq!(tableize("Post2Comment"), "post2_comment");
        assert_eq!(tableize("already_Snake"), "already__snake");
        assert_eq!(tableize(""), "");
    }

    #[test]
    fn test_short_class_name() {
        assert_eq!(short_class_name("App\\Entity\\BlogPost"), "BlogPost");
        assert_eq!(short_class_name("blog::models::Comment"), "Comment");
        assert_eq!(short_class_name("com.example.Tag"), "Tag");
        assert_eq!(short_class_name("User"), "User");
    }

    #[test]
    fn test_entity_name() {
        assert_eq!(entity_name("App\\Entity\\Post"), "post");
        assert_eq!(entity_name("Acme\\BlogBundle\\Entity\\BlogPost"), "blog_post");
    }
}
