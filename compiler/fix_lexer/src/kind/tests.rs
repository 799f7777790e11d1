use super::*;
use pretty_assertions::assert_eq;

#[test]
fn names_are_unique() {
    let mut names: Vec<&str> = TokenKind::ALL.iter().map(|k| k.name()).collect();
    names.sort_unstable();
    let before = names.len();
    names.dedup();
    assert_eq!(before, names.len());
}

#[test]
fn from_name_inverts_name() {
    for &kind in TokenKind::ALL {
        assert_eq!(TokenKind::from_name(kind.name()), Some(kind));
    }
    assert_eq!(TokenKind::from_name("T_NOPE"), None);
}

#[test]
fn keywords_resolve_case_insensitively() {
    assert_eq!(TokenKind::keyword("function"), Some(TokenKind::Function));
    assert_eq!(TokenKind::keyword("FUNCTION"), Some(TokenKind::Function));
    assert_eq!(TokenKind::keyword("Echo"), Some(TokenKind::Echo));
    assert_eq!(TokenKind::keyword("die"), Some(TokenKind::Exit));
    assert_eq!(TokenKind::keyword("__CLASS__"), Some(TokenKind::ClassC));
    assert_eq!(TokenKind::keyword("foo"), None);
    assert_eq!(TokenKind::keyword("a_very_long_identifier_name"), None);
}

#[test]
fn casts_resolve_aliases() {
    assert_eq!(TokenKind::cast("integer"), Some(TokenKind::IntCast));
    assert_eq!(TokenKind::cast("REAL"), Some(TokenKind::DoubleCast));
    assert_eq!(TokenKind::cast("bool"), Some(TokenKind::BoolCast));
    assert_eq!(TokenKind::cast("resource"), None);
}

#[test]
fn category_ranges() {
    assert!(TokenKind::Abstract.is_keyword());
    assert!(TokenKind::Yield.is_keyword());
    assert!(!TokenKind::String.is_keyword());
    assert!(!TokenKind::ClassC.is_keyword());

    assert!(TokenKind::Dir.is_magic_constant());
    assert!(!TokenKind::Function.is_magic_constant());

    assert!(TokenKind::UnsetCast.is_cast());
    assert!(!TokenKind::AndEqual.is_cast());

    assert!(TokenKind::ArraySquareBraceOpen.is_custom());
    assert!(TokenKind::BraceClassInstantiationClose.is_custom());
    assert!(!TokenKind::XorEqual.is_custom());

    assert!(TokenKind::Enum.is_classy());
    assert!(TokenKind::DocComment.is_trivia());
    assert!(!TokenKind::InlineHtml.is_trivia());
}

#[test]
fn every_keyword_word_round_trips_through_name() {
    for &kind in TokenKind::ALL.iter().filter(|k| k.is_keyword()) {
        assert!(kind.name().starts_with("T_"), "{kind:?}");
    }
    for &kind in TokenKind::ALL.iter().filter(|k| k.is_custom()) {
        assert!(kind.name().starts_with("CT::T_"), "{kind:?}");
    }
}
