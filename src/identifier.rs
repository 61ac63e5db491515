//! Exchange identifiers
//!
//! Identifiers are festive three-word PascalCase names such as
//! `JollyCinnamonSleigh`, shared with participants so they can find their
//! exchange again.

use crate::error::ExchangeError;
use rand::seq::SliceRandom;
use rand::Rng;

const FIRST_WORDS: &[&str] = &[
    "Santa", "Elf", "Reindeer", "Rudolph", "Dasher", "Dancer", "Prancer", "Vixen", "Comet",
    "Cupid", "Donner", "Blitzen", "Snowman", "Gingerbread", "Nutcracker", "Angel", "Cherub",
    "Caroler", "Krampus", "Scrooge", "Frosty", "Jolly", "Merry", "Cheerful", "Magical", "Festive",
    "Sparkly", "Twinkling", "Shimmering", "Glowing", "Bright", "Radiant", "Gleaming", "Dazzling",
    "Luminous", "Enchanted", "Whimsical", "Joyful", "Jolting", "Singing", "Dancing", "Prancing",
    "Leaping", "Galloping", "Trotting", "Hopping", "Skipping", "Waltzing", "Spinning", "Twirling",
];

const SECOND_WORDS: &[&str] = &[
    "Cinnamon", "Nutmeg", "Clementine", "Peppermint", "Gingerbread", "Candy", "Caramel",
    "Chocolate", "Vanilla", "Eggnog", "Cranberry", "Orange", "Lemon", "Honey", "Molasses",
    "Allspice", "Cardamom", "Anise", "Clove", "Ginger", "Hazelnut", "Almond", "Walnut", "Pine",
    "Cedar", "Fir", "Spruce", "Holly", "Mistletoe", "Frankincense", "Myrrh", "Rose", "Licorice",
    "Butterscotch", "Toffee", "Fudge", "Praline", "Nougat", "Truffle", "Ganache", "Frosting",
    "Icing", "Fondant", "Glaze", "Sugar", "Spice", "Mace", "Sage", "Coriander", "Cumin",
];

const THIRD_WORDS: &[&str] = &[
    "Ornament", "Tinsel", "Garland", "Wreath", "Lights", "Candle", "Lantern", "Star", "Snowflake",
    "Icicle", "Stocking", "Ribbon", "Bow", "Gift", "Present", "Package", "Bell", "Chime", "Carol",
    "Song", "Hymn", "Choir", "Feast", "Dinner", "Supper", "Cake", "Cookie", "Pie", "Pudding",
    "Custard", "Compote", "Sauce", "Treat", "Sweet", "Dessert", "Beverage", "Punch", "Cocoa",
    "Coffee", "Tea", "Wassail", "Mulled", "Spiced", "Roasted", "Baked", "Glazed", "Tree", "Angel",
    "Sleigh", "Mittens",
];

/// Minimum number of capitalized words in an identifier
pub const MIN_IDENTIFIER_WORDS: usize = 3;

/// Generate a random three-word PascalCase identifier
pub fn generate_identifier<R: Rng + ?Sized>(rng: &mut R) -> String {
    [FIRST_WORDS, SECOND_WORDS, THIRD_WORDS]
        .iter()
        .filter_map(|words| words.choose(&mut *rng))
        .copied()
        .collect()
}

/// Check that an identifier is PascalCase of at least three words
///
/// Each word is one uppercase ASCII letter followed by one or more lowercase
/// ASCII letters.
pub fn validate_identifier(identifier: &str) -> Result<(), ExchangeError> {
    let invalid = |reason: &str| ExchangeError::InvalidIdentifier {
        identifier: identifier.to_string(),
        reason: reason.to_string(),
    };

    let words = split_words(identifier).ok_or_else(|| {
        invalid("must be three or more words in PascalCase (e.g. SnowyLittleReindeer)")
    })?;

    if words.len() < MIN_IDENTIFIER_WORDS {
        return Err(invalid(
            "must be three or more words in PascalCase (e.g. SnowyLittleReindeer)",
        ));
    }

    Ok(())
}

/// Split a PascalCase string into its words, or `None` if it is not PascalCase
fn split_words(identifier: &str) -> Option<Vec<&str>> {
    let mut words = Vec::new();
    let mut start = 0;

    for (idx, ch) in identifier.char_indices() {
        if ch.is_ascii_uppercase() {
            if idx > 0 {
                words.push(&identifier[start..idx]);
            }
            start = idx;
        } else if !ch.is_ascii_lowercase() || idx == 0 {
            return None;
        }
    }
    if identifier.is_empty() {
        return None;
    }
    words.push(&identifier[start..]);

    // every word needs at least one lowercase letter after its capital
    if words.iter().any(|word| word.len() < 2) {
        return None;
    }

    Some(words)
}
