//! Debug dump of a collection.

use serde::Serialize;

use super::Tokens;

/// One slot of a dump. Empty slots appear with no kind and no content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TokenRecord {
    pub kind: Option<&'static str>,
    pub content: String,
}

impl Tokens {
    /// Every slot as a `{kind, content}` record, in order.
    pub fn dump(&self) -> Vec<TokenRecord> {
        self.slots
            .iter()
            .map(|slot| TokenRecord {
                kind: slot.token().and_then(crate::Token::name),
                content: slot.content().to_owned(),
            })
            .collect()
    }

    /// [`Tokens::dump`] as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.dump())
    }
}
