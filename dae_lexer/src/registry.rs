//! Metadata a host tool uses to select this lexer

use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexerInfo {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    /// Glob patterns of the `*.ext` form
    pub filenames: &'static [&'static str],
}

pub const DAEDALUS: LexerInfo = LexerInfo {
    name: "Daedalus",
    aliases: &["pbd", "dae"],
    filenames: &["*.d", "*.D"],
};

const LEXERS: &[LexerInfo] = &[DAEDALUS];

impl LexerInfo {
    pub fn has_alias(&self, alias: &str) -> bool {
        self.aliases.iter().any(|a| a.eq_ignore_ascii_case(alias))
    }

    /// Match the final path component against the filename patterns
    pub fn matches_filename<P: AsRef<Path>>(&self, path: P) -> bool {
        let Some(name) = path.as_ref().file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        self.filenames
            .iter()
            .any(|pattern| glob_match(pattern, name))
    }
}

/// `*` matches any run of characters; everything else is literal
fn glob_match(pattern: &str, name: &str) -> bool {
    match pattern.split_once('*') {
        None => pattern == name,
        Some((prefix, suffix)) => {
            name.len() >= prefix.len() + suffix.len()
                && name.starts_with(prefix)
                && name.ends_with(suffix)
        }
    }
}

pub fn all() -> &'static [LexerInfo] {
    LEXERS
}

pub fn find_by_alias(alias: &str) -> Option<&'static LexerInfo> {
    LEXERS
        .iter()
        .find(|info| info.has_alias(alias) || info.name.eq_ignore_ascii_case(alias))
}

pub fn find_by_filename<P: AsRef<Path>>(path: P) -> Option<&'static LexerInfo> {
    LEXERS.iter().find(|info| info.matches_filename(path.as_ref()))
}

/// Whether the Daedalus lexer claims `path`
pub fn matches_filename<P: AsRef<Path>>(path: P) -> bool {
    DAEDALUS.matches_filename(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_lookup() {
        assert_eq!(find_by_alias("dae"), Some(&DAEDALUS));
        assert_eq!(find_by_alias("PBD"), Some(&DAEDALUS));
        assert_eq!(find_by_alias("daedalus"), Some(&DAEDALUS));
        assert_eq!(find_by_alias("rust"), None);
    }

    #[test]
    fn test_filename_patterns() {
        assert!(matches_filename("Story/B_Story.d"));
        assert!(matches_filename("GOTHIC.D"));
        assert!(matches_filename(".d"));
        assert!(!matches_filename("script.dd"));
        assert!(!matches_filename("notes.md"));
        assert_eq!(find_by_filename("content/gothic.src.d"), Some(&DAEDALUS));
        assert_eq!(find_by_filename("x.rs"), None);
    }

    #[test]
    fn test_glob_match() {
        assert!(glob_match("*.d", "a.d"));
        assert!(!glob_match("*.d", "a.D"));
        assert!(glob_match("exact", "exact"));
        assert!(!glob_match("a*a", "a"));
    }
}
