//! XML entity decoding.
//!
//! Only the five predefined entities and numeric character references exist
//! in XML without a DTD; anything else is left verbatim.

use std::borrow::Cow;

fn predefined(name: &str) -> Option<char> {
    match name {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => None,
    }
}

fn numeric(reference: &str) -> Option<char> {
    let code = if let Some(hex) = reference
        .strip_prefix("#x")
        .or_else(|| reference.strip_prefix("#X"))
    {
        u32::from_str_radix(hex, 16).ok()?
    } else {
        reference.strip_prefix('#')?.parse::<u32>().ok()?
    };
    char::from_u32(code)
}

/// Longest entity body we look at before giving up on a `&`.
const MAX_ENTITY_LEN: usize = 12;

/// Decode entity and character references.
///
/// Borrows the input when it contains no `&`.
pub fn decode_entities(input: &str) -> Cow<'_, str> {
    if !input.contains('&') {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let decoded = after
            .find(';')
            .filter(|&semi| semi <= MAX_ENTITY_LEN)
            .and_then(|semi| {
                let body = &after[..semi];
                predefined(body)
                    .or_else(|| numeric(body))
                    .map(|c| (c, semi + 1))
            });
        match decoded {
            Some((c, consumed)) => {
                out.push(c);
                rest = &after[consumed..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}
