//! Token categories
//!
//! Categories mirror the dotted hierarchy used by Pygments-style
//! highlighters, so `Literal.Number.Integer` is a subtype of
//! `Literal.Number`, which is a subtype of `Literal`. The two
//! `Name.Builtin.*` leaves for engine externals are specific to Daedalus.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenCategory {
    Text,
    Whitespace,
    Error,
    Keyword,
    KeywordConstant,
    KeywordDeclaration,
    KeywordReserved,
    KeywordType,
    Name,
    NameBuiltin,
    NameBuiltinPseudo,
    NameBuiltinOther,
    NameBuiltinExternals,
    NameBuiltinZParserExtender,
    NameClass,
    NameFunction,
    NameLabel,
    NameNamespace,
    NameVariable,
    NameVariableInstance,
    Literal,
    Number,
    NumberInteger,
    NumberFloat,
    String,
    Comment,
    CommentMultiline,
    Punctuation,
    Operator,
}

impl TokenCategory {
    pub const ALL: [TokenCategory; 29] = [
        TokenCategory::Text,
        TokenCategory::Whitespace,
        TokenCategory::Error,
        TokenCategory::Keyword,
        TokenCategory::KeywordConstant,
        TokenCategory::KeywordDeclaration,
        TokenCategory::KeywordReserved,
        TokenCategory::KeywordType,
        TokenCategory::Name,
        TokenCategory::NameBuiltin,
        TokenCategory::NameBuiltinPseudo,
        TokenCategory::NameBuiltinOther,
        TokenCategory::NameBuiltinExternals,
        TokenCategory::NameBuiltinZParserExtender,
        TokenCategory::NameClass,
        TokenCategory::NameFunction,
        TokenCategory::NameLabel,
        TokenCategory::NameNamespace,
        TokenCategory::NameVariable,
        TokenCategory::NameVariableInstance,
        TokenCategory::Literal,
        TokenCategory::Number,
        TokenCategory::NumberInteger,
        TokenCategory::NumberFloat,
        TokenCategory::String,
        TokenCategory::Comment,
        TokenCategory::CommentMultiline,
        TokenCategory::Punctuation,
        TokenCategory::Operator,
    ];

    /// Dotted path without the `Token.` root
    pub fn path(&self) -> &'static str {
        match self {
            TokenCategory::Text => "Text",
            TokenCategory::Whitespace => "Text.Whitespace",
            TokenCategory::Error => "Error",
            TokenCategory::Keyword => "Keyword",
            TokenCategory::KeywordConstant => "Keyword.Constant",
            TokenCategory::KeywordDeclaration => "Keyword.Declaration",
            TokenCategory::KeywordReserved => "Keyword.Reserved",
            TokenCategory::KeywordType => "Keyword.Type",
            TokenCategory::Name => "Name",
            TokenCategory::NameBuiltin => "Name.Builtin",
            TokenCategory::NameBuiltinPseudo => "Name.Builtin.Pseudo",
            TokenCategory::NameBuiltinOther => "Name.Builtin.Other",
            TokenCategory::NameBuiltinExternals => "Name.Builtin.Externals",
            TokenCategory::NameBuiltinZParserExtender => "Name.Builtin.ZParserExtender",
            TokenCategory::NameClass => "Name.Class",
            TokenCategory::NameFunction => "Name.Function",
            TokenCategory::NameLabel => "Name.Label",
            TokenCategory::NameNamespace => "Name.Namespace",
            TokenCategory::NameVariable => "Name.Variable",
            TokenCategory::NameVariableInstance => "Name.Variable.Instance",
            TokenCategory::Literal => "Literal",
            TokenCategory::Number => "Literal.Number",
            TokenCategory::NumberInteger => "Literal.Number.Integer",
            TokenCategory::NumberFloat => "Literal.Number.Float",
            TokenCategory::String => "Literal.String",
            TokenCategory::Comment => "Comment",
            TokenCategory::CommentMultiline => "Comment.Multiline",
            TokenCategory::Punctuation => "Punctuation",
            TokenCategory::Operator => "Operator",
        }
    }

    /// Direct parent in the hierarchy, `None` for top-level categories
    pub fn parent(&self) -> Option<TokenCategory> {
        use TokenCategory::*;
        match self {
            Text | Error | Keyword | Name | Literal | Comment | Punctuation | Operator => None,
            Whitespace => Some(Text),
            KeywordConstant | KeywordDeclaration | KeywordReserved | KeywordType => Some(Keyword),
            NameBuiltin | NameClass | NameFunction | NameLabel | NameNamespace | NameVariable => {
                Some(Name)
            }
            NameBuiltinPseudo
            | NameBuiltinOther
            | NameBuiltinExternals
            | NameBuiltinZParserExtender => Some(NameBuiltin),
            NameVariableInstance => Some(NameVariable),
            Number | String => Some(Literal),
            NumberInteger | NumberFloat => Some(Number),
            CommentMultiline => Some(Comment),
        }
    }

    /// Reflexive subtype check
    pub fn is_subtype_of(&self, other: TokenCategory) -> bool {
        let mut current = Some(*self);
        while let Some(category) = current {
            if category == other {
                return true;
            }
            current = category.parent();
        }
        false
    }

    pub fn is_whitespace(&self) -> bool {
        *self == TokenCategory::Whitespace
    }

    pub fn is_comment(&self) -> bool {
        self.is_subtype_of(TokenCategory::Comment)
    }

    pub fn is_builtin(&self) -> bool {
        self.is_subtype_of(TokenCategory::NameBuiltin)
    }
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token.{}", self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown token category: {0}")]
pub struct UnknownCategory(pub std::string::String);

impl FromStr for TokenCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = s.strip_prefix("Token.").unwrap_or(s);
        TokenCategory::ALL
            .iter()
            .copied()
            .find(|category| category.path() == path)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl Serialize for TokenCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.path())
    }
}

impl<'de> Deserialize<'de> for TokenCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = std::string::String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_unique_and_parse_back() {
        for category in TokenCategory::ALL {
            assert_eq!(category.path().parse::<TokenCategory>(), Ok(category));
            assert_eq!(category.to_string().parse::<TokenCategory>(), Ok(category));
        }
    }

    #[test]
    fn test_parent_path_is_prefix() {
        for category in TokenCategory::ALL {
            if let Some(parent) = category.parent() {
                let expected = format!("{}.", parent.path());
                assert!(category.path().starts_with(&expected), "{}", category);
            } else {
                assert!(!category.path().contains('.'), "{}", category);
            }
        }
    }

    #[test]
    fn test_subtype_relation() {
        assert!(TokenCategory::NumberInteger.is_subtype_of(TokenCategory::Literal));
        assert!(TokenCategory::NameBuiltinExternals.is_subtype_of(TokenCategory::Name));
        assert!(TokenCategory::Name.is_subtype_of(TokenCategory::Name));
        assert!(!TokenCategory::Name.is_subtype_of(TokenCategory::NameBuiltin));
        assert!(TokenCategory::CommentMultiline.is_comment());
        assert!(TokenCategory::NameBuiltinPseudo.is_builtin());
        assert!(!TokenCategory::Text.is_whitespace());
    }

    #[test]
    fn test_display_and_unknown() {
        assert_eq!(TokenCategory::Whitespace.to_string(), "Token.Text.Whitespace");
        assert!("Token.Name.Nope".parse::<TokenCategory>().is_err());
    }

    #[test]
    fn test_serde_uses_dotted_path() {
        let json = serde_json::to_string(&TokenCategory::NumberFloat).unwrap();
        assert_eq!(json, "\"Literal.Number.Float\"");
        let back: TokenCategory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TokenCategory::NumberFloat);
    }
}
