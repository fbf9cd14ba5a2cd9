//! Filename grammar parser.
//!
//! A data filename is `<entities>_<suffix>.<ext>` where `<entities>` is
//! underscore-separated `key-value` pairs in the fixed order
//! `sub → ses → task → run` and `<suffix>` is the bare final token.
//! Parsing is all-or-nothing: any violation rejects the whole name, and
//! the caller reports exactly one invalid-filename issue for it.

use prism_model::entities::{EntitySet, ParseError, split_extension};

const KEY_SUB: &str = "sub";
const KEY_SES: &str = "ses";
const KEY_TASK: &str = "task";
const KEY_RUN: &str = "run";

fn key_rank(key: &str) -> Option<u8> {
    match key {
        KEY_SUB => Some(0),
        KEY_SES => Some(1),
        KEY_TASK => Some(2),
        KEY_RUN => Some(3),
        _ => None,
    }
}

fn is_label(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Parse a filename into an ordered entity set, or reject it.
pub fn parse(filename: &str) -> Result<EntitySet, ParseError> {
    let (stem, extension) = split_extension(filename);
    if stem.is_empty() {
        return Err(ParseError::Empty);
    }

    let tokens: Vec<&str> = stem.split('_').collect();
    let (&suffix, entity_tokens) = tokens.split_last().ok_or(ParseError::Empty)?;

    if suffix.is_empty() {
        return Err(ParseError::MissingSuffix);
    }
    // A trailing entity token (e.g. `..._run-02.png`) means the suffix is
    // missing, not that the suffix is literally "run-02".
    if let Some((key, _)) = suffix.split_once('-')
        && key_rank(key).is_some()
    {
        return Err(ParseError::MissingSuffix);
    }

    let mut subject = None;
    let mut session = None;
    let mut task = None;
    let mut run = None;
    let mut last_rank: i16 = -1;

    for token in entity_tokens {
        let Some((key, value)) = token.split_once('-') else {
            return Err(ParseError::UnknownKey {
                key: (*token).to_string(),
            });
        };
        let Some(rank) = key_rank(key) else {
            return Err(ParseError::UnknownKey {
                key: key.to_string(),
            });
        };
        if i16::from(rank) == last_rank {
            return Err(ParseError::DuplicateKey {
                key: key.to_string(),
            });
        }
        if i16::from(rank) < last_rank {
            return Err(ParseError::OutOfOrder {
                key: key.to_string(),
            });
        }
        last_rank = i16::from(rank);

        match key {
            KEY_RUN => {
                let valid = !value.is_empty() && value.chars().all(|c| c.is_ascii_digit());
                let index = valid.then(|| value.parse::<u32>().ok()).flatten();
                match index {
                    Some(index) if index > 0 => run = Some(index),
                    _ => {
                        return Err(ParseError::InvalidRun {
                            value: value.to_string(),
                        });
                    }
                }
            }
            _ => {
                if !is_label(value) {
                    return Err(ParseError::InvalidLabel {
                        key: key.to_string(),
                        value: value.to_string(),
                    });
                }
                match key {
                    KEY_SUB => subject = Some(value.to_string()),
                    KEY_SES => session = Some(value.to_string()),
                    KEY_TASK => task = Some(value.to_string()),
                    _ => unreachable!("rank check covers all known keys"),
                }
            }
        }
    }

    let Some(subject) = subject else {
        return Err(ParseError::MissingSubject);
    };

    Ok(EntitySet {
        subject,
        session,
        task,
        run,
        suffix: suffix.to_string(),
        extension: extension.to_string(),
    })
}
