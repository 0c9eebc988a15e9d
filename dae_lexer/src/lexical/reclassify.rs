//! Post-pass turning plain identifiers into builtin categories

use super::builtins::{classify_builtin, has_other_prefix};
use crate::tokens::{Token, TokenCategory};

/// Reclassify one raw token.
///
/// Call-style identifiers keep `Name.Builtin.Other` only with a known
/// extension prefix; every plain `Name` is then looked up in the engine
/// and zParserExtender sets.
pub fn reclassify(token: Token<'_>) -> Token<'_> {
    let mut category = token.category;

    if category == TokenCategory::NameBuiltinOther && !has_other_prefix(token.lexeme) {
        category = TokenCategory::Name;
    }

    if category == TokenCategory::Name {
        if let Some(builtin) = classify_builtin(token.lexeme) {
            category = builtin;
        }
    }

    token.with_category(category)
}

/// Iterator adapter applying [`reclassify`] lazily
#[derive(Debug, Clone)]
pub struct Reclassified<I> {
    inner: I,
}

impl<I> Reclassified<I> {
    pub fn new(inner: I) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &I {
        &self.inner
    }

    pub fn into_inner(self) -> I {
        self.inner
    }
}

impl<'src, I> Iterator for Reclassified<I>
where
    I: Iterator<Item = Token<'src>>,
{
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(reclassify)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

pub trait ReclassifyExt<'src>: Iterator<Item = Token<'src>> + Sized {
    fn reclassified(self) -> Reclassified<Self> {
        Reclassified::new(self)
    }
}

impl<'src, I: Iterator<Item = Token<'src>>> ReclassifyExt<'src> for I {}

#[cfg(test)]
mod tests {
    use super::*;

    fn category_of(category: TokenCategory, lexeme: &str) -> TokenCategory {
        reclassify(Token::new(category, lexeme, 0)).category
    }

    #[test]
    fn test_call_style_names() {
        use TokenCategory::*;
        assert_eq!(category_of(NameBuiltinOther, "AI_LOOKAT"), NameBuiltinExternals);
        assert_eq!(category_of(NameBuiltinOther, "ai_LookAt"), NameBuiltinExternals);
        assert_eq!(category_of(NameBuiltinOther, "B_Greet"), Name);
        assert_eq!(category_of(NameBuiltinOther, "MEM_Alloc"), NameBuiltinOther);
        assert_eq!(category_of(NameBuiltinOther, "mem_alloc"), Name);
        assert_eq!(category_of(NameBuiltinOther, "LeGo_Init"), NameBuiltinOther);
        assert_eq!(
            category_of(NameBuiltinOther, "Wld_ChangeLevel"),
            NameBuiltinZParserExtender
        );
    }

    #[test]
    fn test_plain_names_and_others_untouched() {
        use TokenCategory::*;
        assert_eq!(category_of(Name, "Hlp_Random"), NameBuiltinExternals);
        assert_eq!(category_of(Name, "my_counter"), Name);
        // only Name is looked up
        assert_eq!(category_of(NameFunction, "AI_LOOKAT"), NameFunction);
        assert_eq!(category_of(Text, "AI_LOOKAT"), Text);
        assert_eq!(category_of(NameBuiltinPseudo, "hero"), NameBuiltinPseudo);
    }

    #[test]
    fn test_lexeme_and_offset_preserved() {
        let token = reclassify(Token::new(TokenCategory::Name, "npc_GetDistToNpc", 12));
        assert_eq!(token.lexeme, "npc_GetDistToNpc");
        assert_eq!(token.offset, 12);
        assert_eq!(token.category, TokenCategory::NameBuiltinExternals);
    }

    #[test]
    fn test_adapter() {
        let raw = vec![
            Token::new(TokenCategory::NameBuiltinOther, "Foo", 0),
            Token::new(TokenCategory::Punctuation, "(", 3),
        ];
        let out: Vec<_> = raw.into_iter().reclassified().map(|t| t.category).collect();
        assert_eq!(out, [TokenCategory::Name, TokenCategory::Punctuation]);
    }
}
