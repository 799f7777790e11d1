use super::*;
use pretty_assertions::assert_eq;

/// Helper: scan a source string and collect all units.
fn scan(source: &str) -> Vec<RawUnit> {
    RawScanner::new(source).collect()
}

/// Helper: scan and return kinds only (`None` for bare characters).
fn scan_kinds(source: &str) -> Vec<Option<TokenKind>> {
    scan(source).iter().map(RawUnit::kind).collect()
}

fn tok(kind: TokenKind, text: &str) -> RawUnit {
    RawUnit::Token(kind, text.to_owned())
}

// ─── Property Tests ────────────────────────────────────────────

#[test]
fn concatenated_units_reproduce_source() {
    let sources = [
        "",
        "plain html",
        "<?php echo 1;",
        "<?php\n$a = [1, 2];\n// c\n/* d */\n/** e */\n?>\n<b>tail</b>",
        "<?= $x ?>",
        "<?php $a?->b ?? $c <=> $d;",
        "<?php 'unterminated",
        "<?php /* unterminated",
        "<?php $é = 'ü';",
    ];
    for source in sources {
        let mut out = String::new();
        for unit in scan(source) {
            assert!(!unit.is_empty(), "empty unit in {source:?}");
            unit.push_to(&mut out);
        }
        assert_eq!(out, source);
    }
}

// ─── Markup and tags ───────────────────────────────────────────

#[test]
fn open_tag_includes_one_whitespace() {
    assert_eq!(
        scan("<?php echo 1;"),
        vec![
            tok(TokenKind::OpenTag, "<?php "),
            tok(TokenKind::Echo, "echo"),
            tok(TokenKind::Whitespace, " "),
            tok(TokenKind::LNumber, "1"),
            RawUnit::Char(';'),
        ]
    );
}

#[test]
fn open_tag_includes_crlf_as_one_line_ending() {
    let units = scan("<?php\r\n\r\necho");
    assert_eq!(units[0], tok(TokenKind::OpenTag, "<?php\r\n"));
    assert_eq!(units[1], tok(TokenKind::Whitespace, "\r\n"));
}

#[test]
fn open_tag_at_eof() {
    assert_eq!(scan("<?php"), vec![tok(TokenKind::OpenTag, "<?php")]);
}

#[test]
fn php_prefix_without_whitespace_is_markup() {
    assert_eq!(
        scan("<?phpx"),
        vec![tok(TokenKind::InlineHtml, "<?phpx")]
    );
}

#[test]
fn markup_before_and_after_code() {
    assert_eq!(
        scan_kinds("<p><?php $a ?>\n</p>"),
        vec![
            Some(TokenKind::InlineHtml),
            Some(TokenKind::OpenTag),
            Some(TokenKind::Variable),
            Some(TokenKind::Whitespace),
            Some(TokenKind::CloseTag),
            Some(TokenKind::InlineHtml),
        ]
    );
    let units = scan("<?php $a ?>\n</p>");
    assert_eq!(units[3], tok(TokenKind::CloseTag, "?>\n"));
}

#[test]
fn short_echo_tag() {
    assert_eq!(
        scan("<?=$a"),
        vec![
            tok(TokenKind::OpenTagWithEcho, "<?="),
            tok(TokenKind::Variable, "$a"),
        ]
    );
}

// ─── Comments ──────────────────────────────────────────────────

#[test]
fn single_line_comment_excludes_newline() {
    assert_eq!(
        scan("<?php // note\n$a"),
        vec![
            tok(TokenKind::OpenTag, "<?php "),
            tok(TokenKind::Comment, "// note"),
            tok(TokenKind::Whitespace, "\n"),
            tok(TokenKind::Variable, "$a"),
        ]
    );
}

#[test]
fn hash_comment_ends_at_close_tag() {
    let kinds = scan_kinds("<?php # x ?>y");
    assert_eq!(
        kinds,
        vec![
            Some(TokenKind::OpenTag),
            Some(TokenKind::Comment),
            Some(TokenKind::CloseTag),
            Some(TokenKind::InlineHtml),
        ]
    );
}

#[test]
fn doc_comment_requires_whitespace_after_marker() {
    assert_eq!(
        scan_kinds("<?php /** a */ /**/ /* b */"),
        vec![
            Some(TokenKind::OpenTag),
            Some(TokenKind::DocComment),
            Some(TokenKind::Whitespace),
            Some(TokenKind::Comment),
            Some(TokenKind::Whitespace),
            Some(TokenKind::Comment),
        ]
    );
}

// ─── Names and keywords ────────────────────────────────────────

#[test]
fn keywords_are_case_insensitive() {
    assert_eq!(
        scan_kinds("<?php FUNCTION foo"),
        vec![
            Some(TokenKind::OpenTag),
            Some(TokenKind::Function),
            Some(TokenKind::Whitespace),
            Some(TokenKind::String),
        ]
    );
}

#[test]
fn keyword_after_object_operator_is_a_name() {
    let units = scan("<?php $a->list");
    assert_eq!(units[3], tok(TokenKind::String, "list"));
    let units = scan("<?php $a -> /* c */ class");
    assert_eq!(units[7], tok(TokenKind::String, "class"));
}

#[test]
fn lone_dollar_is_a_bare_char() {
    assert_eq!(
        scan("<?php ${'a'}")[1..].to_vec(),
        vec![
            RawUnit::Char('$'),
            RawUnit::Char('{'),
            tok(TokenKind::ConstantEncapsedString, "'a'"),
            RawUnit::Char('}'),
        ]
    );
}

#[test]
fn namespace_separator() {
    assert_eq!(
        scan_kinds("<?php \\Foo\\Bar")[1..].to_vec(),
        vec![
            Some(TokenKind::NsSeparator),
            Some(TokenKind::String),
            Some(TokenKind::NsSeparator),
            Some(TokenKind::String),
        ]
    );
}

// ─── Literals ──────────────────────────────────────────────────

#[test]
fn numbers() {
    let units = scan("<?php 1 1.5 .5 1e3 0x1F 0b1_0 1_000 2E-2");
    let numbers: Vec<RawUnit> = units
        .into_iter()
        .filter(|u| !u.is_trivia() && !u.is_kind(TokenKind::OpenTag))
        .collect();
    assert_eq!(
        numbers,
        vec![
            tok(TokenKind::LNumber, "1"),
            tok(TokenKind::DNumber, "1.5"),
            tok(TokenKind::DNumber, ".5"),
            tok(TokenKind::DNumber, "1e3"),
            tok(TokenKind::LNumber, "0x1F"),
            tok(TokenKind::LNumber, "0b1_0"),
            tok(TokenKind::LNumber, "1_000"),
            tok(TokenKind::DNumber, "2E-2"),
        ]
    );
}

#[test]
fn strings_honor_escapes() {
    assert_eq!(
        scan(r#"<?php "a\"b" 'c\'d'"#)[1..].to_vec(),
        vec![
            tok(TokenKind::ConstantEncapsedString, r#""a\"b""#),
            tok(TokenKind::Whitespace, " "),
            tok(TokenKind::ConstantEncapsedString, r"'c\'d'"),
        ]
    );
}

// ─── Operators and casts ───────────────────────────────────────

#[test]
fn longest_operator_wins() {
    assert_eq!(
        scan_kinds("<?php === !== ?? ??= -> ?-> => ...")
            .into_iter()
            .filter(|k| *k != Some(TokenKind::Whitespace))
            .collect::<Vec<_>>(),
        vec![
            Some(TokenKind::OpenTag),
            Some(TokenKind::IsIdentical),
            Some(TokenKind::IsNotIdentical),
            Some(TokenKind::Coalesce),
            Some(TokenKind::CoalesceEqual),
            Some(TokenKind::ObjectOperator),
            Some(TokenKind::NullsafeObjectOperator),
            Some(TokenKind::DoubleArrow),
            Some(TokenKind::Ellipsis),
        ]
    );
}

#[test]
fn casts_allow_inner_blanks() {
    assert_eq!(
        scan("<?php ( int )$a")[1],
        tok(TokenKind::IntCast, "( int )")
    );
    assert_eq!(scan("<?php (foo)")[1], RawUnit::Char('('));
    assert_eq!(scan("<?php ()")[1], RawUnit::Char('('));
}

#[test]
fn single_chars_are_bare() {
    assert_eq!(
        scan("<?php ;,=")[1..].to_vec(),
        vec![RawUnit::Char(';'), RawUnit::Char(','), RawUnit::Char('=')]
    );
}
