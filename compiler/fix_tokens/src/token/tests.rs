use super::*;
use pretty_assertions::assert_eq;

// === Construction ===

#[test]
fn bare_token_has_no_kind() {
    let token = Token::bare(';');
    assert_eq!(token.kind(), None);
    assert_eq!(token.content(), ";");
    assert_eq!(token.name(), None);
    assert!(!token.is_array());
    assert_eq!(token.kind_key(), KindKey::Char(';'));
}

#[test]
fn from_raw_unit() {
    assert_eq!(Token::from(RawUnit::Char('(')), Token::bare('('));
    assert_eq!(
        Token::from(RawUnit::Token(TokenKind::Echo, "echo".to_owned())),
        Token::new(TokenKind::Echo, "echo")
    );
}

// === Whitespace and comments ===

#[test]
fn whitespace_uses_default_charset() {
    assert!(Token::whitespace(" \n\t").is_whitespace(None));
    assert!(!Token::whitespace(" \n").is_whitespace(Some(" ")));
    assert!(Token::whitespace("  ").is_whitespace(Some(" ")));
}

#[test]
fn kind_tagged_non_whitespace_is_never_whitespace() {
    assert!(!Token::new(TokenKind::InlineHtml, "   ").is_whitespace(None));
    assert!(!Token::bare(';').is_whitespace(None));
}

#[test]
fn empty_content_counts_as_whitespace() {
    assert!(Token::whitespace("").is_whitespace(None));
    assert!(!Token::whitespace("").is_meaningful());
}

#[test]
fn comment_kinds() {
    let line = Token::new(TokenKind::Comment, "// x");
    let block = Token::new(TokenKind::Comment, "/* x */");
    let doc = Token::new(TokenKind::DocComment, "/** x */");
    assert!(line.is_comment() && block.is_comment() && doc.is_comment());
    assert!(line.is_single_line_comment());
    assert!(Token::new(TokenKind::Comment, "# x").is_single_line_comment());
    assert!(!block.is_single_line_comment());
    assert!(!doc.is_single_line_comment());
    assert!(!line.is_meaningful());
}

// === Classification ===

#[test]
fn classification_helpers() {
    assert!(Token::new(TokenKind::Function, "function").is_keyword());
    assert!(Token::new(TokenKind::IntCast, "(int)").is_cast());
    assert!(Token::new(TokenKind::Trait, "trait").is_classy());
    assert!(Token::new(TokenKind::Line, "__LINE__").is_magic_constant());
    assert!(Token::new(TokenKind::NullsafeObjectOperator, "?->").is_object_operator());
    assert!(!Token::new(TokenKind::DoubleColon, "::").is_object_operator());
}

#[test]
fn native_constants_ignore_case() {
    assert!(Token::new(TokenKind::String, "NULL").is_native_constant());
    assert!(Token::new(TokenKind::String, "True").is_native_constant());
    assert!(!Token::new(TokenKind::String, "nil").is_native_constant());
    assert!(!Token::new(TokenKind::Variable, "$null").is_native_constant());
}

#[test]
fn kind_among() {
    let token = Token::new(TokenKind::Echo, "echo");
    assert!(token.is_kind_among(&[TokenKind::Print, TokenKind::Echo]));
    assert!(!token.is_kind_among(&[]));
    assert!(!Token::bare('x').is_kind_among(&[TokenKind::Echo]));
}

// === Prototype comparison ===

#[test]
fn equals_char_prototype() {
    assert!(Token::bare('(').equals(&Prototype::char('('), true));
    assert!(!Token::bare('(').equals(&Prototype::char(')'), true));
    assert!(!Token::new(TokenKind::String, "(").equals(&Prototype::char('('), true));
}

#[test]
fn equals_kind_prototype_ignores_content() {
    let token = Token::new(TokenKind::Function, "FUNCTION");
    assert!(token.equals(&Prototype::kind(TokenKind::Function), true));
    assert!(!token.equals(&Prototype::kind(TokenKind::Fn), true));
    assert!(!Token::bare('f').equals(&Prototype::kind(TokenKind::Function), true));
}

#[test]
fn equals_kind_text_prototype_honors_case() {
    let token = Token::new(TokenKind::Function, "FUNCTION");
    let prototype = Prototype::kind_text(TokenKind::Function, "function");
    assert!(!token.equals(&prototype, true));
    assert!(token.equals(&prototype, false));
}

#[test]
fn equals_any() {
    let token = Token::bare(';');
    let prototypes = [Prototype::char(','), Prototype::char(';')];
    assert!(token.equals_any(&prototypes, true));
    assert!(!token.equals_any(&prototypes[..1], true));
    assert!(!token.equals_any(&[], true));
}

#[test]
fn prototype_from_token_matches_token() {
    for token in [
        Token::bare('{'),
        Token::new(TokenKind::Variable, "$a"),
        Token::whitespace("\n"),
    ] {
        assert!(token.equals(&token.prototype(), true));
    }
}

#[test]
fn prototype_meaningfulness() {
    assert!(Prototype::char('(').is_meaningful());
    assert!(!Prototype::char(' ').is_meaningful());
    assert!(!Prototype::char('\n').is_meaningful());
    assert!(Prototype::kind(TokenKind::Function).is_meaningful());
    assert!(!Prototype::kind(TokenKind::Whitespace).is_meaningful());
    assert!(!Prototype::kind(TokenKind::DocComment).is_meaningful());
    assert!(!Prototype::kind_text(TokenKind::String, "").is_meaningful());
}

#[test]
fn prototype_kind_keys() {
    assert_eq!(Prototype::char(';').kind_key(), KindKey::Char(';'));
    assert_eq!(
        Prototype::kind_text(TokenKind::Echo, "echo").kind_key(),
        KindKey::Kind(TokenKind::Echo)
    );
    assert_eq!(KindKey::from(TokenKind::Echo).to_string(), "T_ECHO");
    assert_eq!(KindKey::from(';').to_string(), "';'");
}

// === Case sensitivity ===

#[test]
fn per_element_case_sensitivity_defaults_to_sensitive() {
    let mut map = FxHashMap::default();
    map.insert(1, false);
    let sensitivity = CaseSensitivity::PerElement(map);
    assert!(sensitivity.is_key_case_sensitive(0));
    assert!(!sensitivity.is_key_case_sensitive(1));
    assert!(!CaseSensitivity::from(false).is_key_case_sensitive(7));
    assert!(CaseSensitivity::default().is_key_case_sensitive(7));
}
