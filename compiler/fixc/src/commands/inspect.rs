//! Inspection commands: `dump`, `kinds`, `blocks` and `roundtrip`.

use fix_tokens::BlockType;

use super::load;

/// Print every slot as a JSON record.
pub fn dump_file(path: &str) -> bool {
    let Some((_, tokens)) = load(path) else {
        return false;
    };
    match tokens.to_json() {
        Ok(json) => {
            println!("{json}");
            true
        }
        Err(e) => {
            eprintln!("error: cannot serialize tokens of '{path}': {e}");
            false
        }
    }
}

/// Print the found-kind index, one kind per line.
pub fn list_kinds(path: &str) -> bool {
    let Some((_, tokens)) = load(path) else {
        return false;
    };
    let kinds = tokens.found_kinds().sorted();
    println!(
        "Kinds for '{path}' ({} slots, {} kinds):",
        tokens.len(),
        kinds.len()
    );
    for (key, count) in kinds {
        println!("  {count:>6}  {key}");
    }
    true
}

/// Print the partner of every opening block edge.
///
/// Unbalanced blocks are reported and make the command fail.
pub fn list_blocks(path: &str) -> bool {
    let Some((_, tokens)) = load(path) else {
        return false;
    };
    let mut ok = true;
    println!("Blocks for '{path}':");
    for (index, token) in tokens.iter() {
        let Some(edge) = BlockType::detect(token) else {
            continue;
        };
        if !edge.is_start {
            continue;
        }
        match tokens.find_block_end(edge.block_type, index) {
            Ok(end) => println!("  {index:>6}..{end:<6} {}", edge.block_type),
            Err(e) => {
                eprintln!("  error: {e}");
                ok = false;
            }
        }
    }
    ok
}

/// Check that rendering the collection gives back the file unchanged.
pub fn check_round_trip(path: &str) -> bool {
    let Some((content, mut tokens)) = load(path) else {
        return false;
    };
    let rendered = tokens.generate_code();
    if rendered == content {
        println!("'{path}': {} slots, rendering matches", tokens.len());
        return true;
    }
    let at = rendered
        .bytes()
        .zip(content.bytes())
        .position(|(a, b)| a != b)
        .unwrap_or_else(|| rendered.len().min(content.len()));
    eprintln!("'{path}': rendering differs from the file at byte {at}");
    false
}
