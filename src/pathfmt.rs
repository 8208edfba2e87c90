use std::path::Path;

/// Replaces a leading `home` with `~`. Only whole components match, so
/// `/home/user2` is left alone for home `/home/user`.
pub fn tilde_path(path: &str, home: &Path) -> String {
    let home_str = home.display().to_string();
    let home_str = home_str.trim_end_matches('/');
    if home_str.is_empty() {
        return path.to_string();
    }
    if path == home_str {
        return "~".to_string();
    }
    match path.strip_prefix(&format!("{home_str}/")) {
        Some(rest) => format!("~/{rest}"),
        None => path.to_string(),
    }
}

/// First `max_chars` characters of `s`.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => s[..end].to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_replaces_whole_home_only() {
        let home = Path::new("/home/user");
        assert_eq!(tilde_path("/home/user", home), "~");
        assert_eq!(tilde_path("/home/user/src/app", home), "~/src/app");
        assert_eq!(tilde_path("/home/user2/app", home), "/home/user2/app");
        assert_eq!(tilde_path("/srv/home/user", home), "/srv/home/user");
        assert_eq!(tilde_path("/home/user/x", Path::new("/home/user/")), "~/x");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("ab", 3), "ab");
        assert_eq!(truncate_chars("\u{e62b} nvim", 2), "\u{e62b} ");
        assert_eq!(truncate_chars("naïve", 3), "naï");
        assert_eq!(truncate_chars("abc", 0), "");
    }
}
