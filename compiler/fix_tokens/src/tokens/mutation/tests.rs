use super::*;
use crate::{ContentCache, TokensConfig};
use pretty_assertions::assert_eq;

fn code(source: &str) -> Tokens {
    Tokens::from_code_in(&ContentCache::new(), source)
}

fn contents(tokens: &Tokens) -> Vec<String> {
    tokens
        .slots()
        .iter()
        .map(|slot| slot.content().to_owned())
        .collect()
}

fn numbered(count: usize) -> Tokens {
    Tokens::from_tokens((0..count).map(|i| Token::new(TokenKind::LNumber, i.to_string()))).unwrap()
}

// === insert_at ===

#[test]
fn insert_two_into_five_shifts_tail() {
    let mut tokens = numbered(5);
    tokens
        .insert_at(3, vec![Token::bare('a'), Token::bare('b')])
        .unwrap();
    assert_eq!(contents(&tokens), vec!["0", "1", "2", "a", "b", "3", "4"]);
    assert!(tokens.is_changed());
    assert_eq!(tokens.count_token_kind('a'), 1);
    assert_eq!(tokens.count_token_kind(TokenKind::LNumber), 5);
}

#[test]
fn insert_at_len_appends() {
    let mut tokens = numbered(2);
    tokens.insert_at(2, vec![Token::bare(';')]).unwrap();
    assert_eq!(contents(&tokens), vec!["0", "1", ";"]);
}

#[test]
fn insert_beyond_len_fails_without_change() {
    let mut tokens = numbered(2);
    assert_eq!(
        tokens.insert_at(3, vec![Token::bare(';')]),
        Err(TokensError::IndexOutOfRange { index: 3, len: 2 })
    );
    assert_eq!(tokens.len(), 2);
    assert!(!tokens.is_changed());
}

#[test]
fn insert_rejects_empty_token() {
    let mut tokens = numbered(2);
    assert_eq!(
        tokens.insert_at(1, vec![Token::bare(';'), Token::whitespace("")]),
        Err(TokensError::EmptyToken { index: 2 })
    );
    assert_eq!(tokens.len(), 2);
}

#[test]
fn insert_nothing_is_a_no_op() {
    let mut tokens = numbered(2);
    tokens.insert_at(1, Vec::new()).unwrap();
    assert!(!tokens.is_changed());
}

#[test]
fn insert_invalidates_block_edges() {
    let mut tokens = code("<?php f(1);");
    assert_eq!(tokens.find_block_end(crate::BlockType::Parenthesis, 2), Ok(4));
    tokens.insert_at(2, vec![Token::bare('(')]).unwrap();
    // The old pair (2, 4) must not be served from the memo.
    assert_eq!(
        tokens.find_block_end(crate::BlockType::Parenthesis, 3),
        Ok(5)
    );
    assert!(tokens.find_block_end(crate::BlockType::Parenthesis, 2).is_err());
}

// === insert_slices ===

#[test]
fn insert_slices_uses_original_indices() {
    let mut tokens = numbered(5);
    let mut slices = BTreeMap::new();
    slices.insert(1, vec![Token::bare('a')]);
    slices.insert(3, vec![Token::bare('b'), Token::bare('c')]);
    slices.insert(5, vec![Token::bare('d')]);
    tokens.insert_slices(slices).unwrap();
    assert_eq!(
        contents(&tokens),
        vec!["0", "a", "1", "2", "b", "c", "3", "4", "d"]
    );
}

#[test]
fn insert_slices_validates_farthest_index() {
    let mut tokens = numbered(2);
    let mut slices = BTreeMap::new();
    slices.insert(0, vec![Token::bare('a')]);
    slices.insert(4, vec![Token::bare('b')]);
    assert_eq!(
        tokens.insert_slices(slices),
        Err(TokensError::IndexOutOfRange { index: 4, len: 2 })
    );
    assert_eq!(contents(&tokens), vec!["0", "1"]);
}

// === override_range ===

#[test]
fn override_single_slot_with_two_grows_by_one() {
    let mut tokens = numbered(4);
    tokens
        .override_range(2, 2, vec![Token::bare('a'), Token::bare('b')])
        .unwrap();
    assert_eq!(tokens.len(), 5);
    assert_eq!(tokens.generate_code(), "01ab3");
}

#[test]
fn override_with_fewer_items_clears_the_rest() {
    let mut tokens = numbered(5);
    tokens.override_range(1, 3, vec![Token::bare('x')]).unwrap();
    assert_eq!(contents(&tokens), vec!["0", "x", "", "", "4"]);
    assert!(tokens.is_empty_at(2) && tokens.is_empty_at(3));
    assert_eq!(tokens.count_token_kind(TokenKind::LNumber), 2);
}

#[test]
fn override_with_identical_rendering_is_a_full_no_op() {
    let mut tokens = code("<?php $a = 1;");
    let generation = tokens.generation();
    // Different boundaries, same text.
    tokens
        .override_range(
            1,
            3,
            vec![
                Token::new(TokenKind::Variable, "$a"),
                Token::whitespace(" "),
                Token::bare('='),
            ],
        )
        .unwrap();
    tokens
        .override_range(1, 2, vec![Token::new(TokenKind::String, "$a ")])
        .unwrap();
    assert!(!tokens.is_changed());
    assert_eq!(tokens.generation(), generation);
}

#[test]
fn override_range_validates_bounds() {
    let mut tokens = numbered(3);
    assert_eq!(
        tokens.override_range(1, 3, vec![Token::bare('x')]),
        Err(TokensError::IndexOutOfRange { index: 3, len: 3 })
    );
    assert!(tokens.override_range(2, 1, vec![Token::bare('x')]).is_err());
}

// === clear_range ===

#[test]
fn clear_range_is_inclusive() {
    let mut tokens = numbered(4);
    tokens.clear_range(1, 2).unwrap();
    assert_eq!(contents(&tokens), vec!["0", "", "", "3"]);
}

// === clear_token_and_merge_surrounding_whitespace ===

#[test]
fn merge_into_previous_whitespace() {
    let mut tokens = code("<?php $a  /* x */\n$b");
    // 0 open tag, 1 $a, 2 "  ", 3 comment, 4 "\n", 5 $b
    tokens.clear_token_and_merge_surrounding_whitespace(3).unwrap();
    assert_eq!(tokens.get(2).map(Token::content), Some("  \n"));
    assert!(tokens.is_empty_at(3) && tokens.is_empty_at(4));
    assert_eq!(tokens.generate_code(), "<?php $a  \n$b");
}

#[test]
fn move_whitespace_into_cleared_slot() {
    let mut tokens = code("<?php f(1) ;");
    // 0 open tag, 1 f, 2 (, 3 1, 4 ), 5 " ", 6 ;
    tokens.clear_token_and_merge_surrounding_whitespace(4).unwrap();
    assert_eq!(tokens.get(4), Some(&Token::whitespace(" ")));
    assert!(tokens.is_empty_at(5));
}

#[test]
fn clearing_last_token_does_not_merge() {
    let mut tokens = code("<?php $a ;");
    let last = tokens.len() - 1;
    tokens.clear_token_and_merge_surrounding_whitespace(last).unwrap();
    assert_eq!(tokens.generate_code(), "<?php $a ");
}

// === ensure_whitespace_at_index ===

#[test]
fn ensure_replaces_existing_whitespace() {
    let mut tokens = code("<?php $a  = 1;");
    assert_eq!(tokens.ensure_whitespace_at_index(2, 0, " "), Ok(false));
    assert_eq!(tokens.generate_code(), "<?php $a = 1;");
}

#[test]
fn ensure_inserts_missing_whitespace() {
    let mut tokens = code("<?php $a=1;");
    assert_eq!(tokens.ensure_whitespace_at_index(1, 1, " "), Ok(true));
    assert_eq!(tokens.generate_code(), "<?php $a =1;");
    assert_eq!(tokens.ensure_whitespace_at_index(4, 0, " "), Ok(true));
    assert_eq!(tokens.generate_code(), "<?php $a = 1;");
}

#[test]
fn ensure_with_empty_whitespace_clears() {
    let mut tokens = code("<?php $a = 1;");
    assert_eq!(tokens.ensure_whitespace_at_index(2, 0, ""), Ok(false));
    assert_eq!(tokens.generate_code(), "<?php $a= 1;");
}

#[test]
fn ensure_after_open_tag_folds_line_ending() {
    let mut tokens = code("<?php $a;");
    assert_eq!(tokens.ensure_whitespace_at_index(0, 1, "\n\n"), Ok(true));
    assert_eq!(tokens.get(0).map(Token::content), Some("<?php\n"));
    assert_eq!(tokens.get(1), Some(&Token::whitespace("\n")));
    assert_eq!(tokens.generate_code(), "<?php\n\n$a;");
}

#[test]
fn ensure_after_open_tag_folds_crlf_whole() {
    let mut tokens = code("<?php $a;");
    assert_eq!(tokens.ensure_whitespace_at_index(0, 1, "\r\n"), Ok(false));
    assert_eq!(tokens.generate_code(), "<?php\r\n$a;");
    assert_eq!(tokens.len(), 3);
}

#[test]
fn ensure_on_whitespace_after_open_tag_folds_too() {
    let mut tokens = code("<?php\n  $a;");
    // 0 "<?php\n", 1 "  ", 2 $a
    assert_eq!(tokens.ensure_whitespace_at_index(1, 1, "\n    "), Ok(false));
    assert_eq!(tokens.generate_code(), "<?php\n    $a;");
}

// === remove_leading / remove_trailing_whitespace ===

#[test]
fn remove_trailing_whitespace() {
    let mut tokens = code("<?php $a   ;");
    tokens.remove_trailing_whitespace(1, None);
    assert_eq!(tokens.generate_code(), "<?php $a;");
}

#[test]
fn remove_leading_whitespace_skips_empty_slots() {
    let mut tokens = code("<?php $a ;");
    tokens.insert_at(3, vec![Token::bare(',')]).unwrap();
    tokens.clear_at(3).unwrap();
    // 2 " ", 3 empty, 4 ;
    tokens.remove_leading_whitespace(4, None);
    assert_eq!(tokens.generate_code(), "<?php $a;");
}

#[test]
fn charset_restricts_removal() {
    let mut tokens = code("<?php $a \n;");
    tokens.remove_trailing_whitespace(1, Some(" "));
    assert_eq!(tokens.generate_code(), "<?php $a \n;");
    tokens.remove_trailing_whitespace(1, Some(" \n"));
    assert_eq!(tokens.generate_code(), "<?php $a;");
}

#[test]
fn single_line_comment_keeps_its_line_ending() {
    let mut tokens = code("<?php // note\n    $a;");
    // 0 open tag, 1 comment, 2 "\n    ", 3 $a
    tokens.remove_leading_whitespace(3, None);
    assert_eq!(tokens.generate_code(), "<?php // note\n$a;");
}

#[test]
fn single_line_comment_with_bare_line_ending_is_untouched() {
    let mut tokens = code("<?php // note\n$a;");
    tokens.remove_leading_whitespace(3, None);
    assert_eq!(tokens.generate_code(), "<?php // note\n$a;");
    assert!(!tokens.is_changed());
}

#[test]
fn block_comment_whitespace_is_removed_entirely() {
    let mut tokens = code("<?php /* note */\n$a;");
    tokens.remove_leading_whitespace(3, None);
    assert_eq!(tokens.generate_code(), "<?php /* note */$a;");
}

#[test]
fn line_endings_are_configurable() {
    let mut tokens = code("<?php // note\r\n    $a;");
    tokens.set_config(TokensConfig::default().with_line_endings(["\n"]));
    // "\r\n" is not a recognized ending now, so nothing is kept back.
    tokens.remove_leading_whitespace(3, None);
    assert_eq!(tokens.generate_code(), "<?php // note$a;");
}

#[test]
fn configured_whitespace_chars_limit_removal() {
    let mut tokens = Tokens::from_tokens(vec![
        Token::new(TokenKind::Variable, "$a"),
        Token::whitespace("\t"),
        Token::bare(';'),
    ])
    .unwrap();
    tokens.set_config(TokensConfig::default().with_whitespace_chars(" "));
    tokens.remove_trailing_whitespace(0, None);
    assert!(!tokens.is_empty_at(1));
    assert!(!tokens.is_changed());

    tokens.remove_trailing_whitespace(0, Some(" \t"));
    assert!(!tokens.is_empty_at(1));

    tokens.set_config(TokensConfig::default());
    tokens.remove_trailing_whitespace(0, None);
    assert!(tokens.is_empty_at(1));
}

#[test]
fn configured_whitespace_chars_decide_merge() {
    let mut tokens = Tokens::from_tokens(vec![
        Token::new(TokenKind::Variable, "$a"),
        Token::whitespace(" "),
        Token::bare(';'),
        Token::whitespace("\t"),
        Token::new(TokenKind::Variable, "$b"),
    ])
    .unwrap();
    tokens.set_config(TokensConfig::default().with_whitespace_chars(" "));
    tokens.clear_token_and_merge_surrounding_whitespace(2).unwrap();
    assert_eq!(contents(&tokens), vec!["$a", " ", "", "\t", "$b"]);
}
