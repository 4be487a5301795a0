//! Escape-aware encoding of name components
//!
//! A packed name is a single string whose components are separated by a
//! delimiter character. An escape character makes the following character
//! literal, so components can contain the delimiter (and the escape
//! character itself, written twice). Everything here is pure: the
//! delimiter/escape pair is passed in, never read from configuration.

/// Split a packed string into escaped components.
///
/// The escape character always consumes exactly one following character.
/// A delimiter splits only when it is not consumed by an escape. Splitting
/// the empty string yields one empty component; a packed string with `n`
/// unescaped delimiters yields `n + 1` components.
///
/// Components come back in their escaped spelling, untouched.
pub fn split(packed: &str, delimiter: char, escape: char) -> Vec<String> {
    let mut components = Vec::new();
    let mut current = String::new();
    let mut chars = packed.chars();

    while let Some(ch) = chars.next() {
        if ch == escape {
            current.push(ch);
            if let Some(next) = chars.next() {
                current.push(next);
            }
        } else if ch == delimiter {
            components.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }
    components.push(current);
    components
}

/// Join escaped components back into a packed string.
pub fn join(components: &[String], delimiter: char) -> String {
    components.join(&delimiter.to_string())
}

/// Remove one level of escaping, recovering the literal component text.
pub fn unescape(component: &str, escape: char) -> String {
    let mut out = String::with_capacity(component.len());
    let mut chars = component.chars();
    while let Some(ch) = chars.next() {
        if ch == escape {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(ch);
        }
    }
    out
}

/// Escape literal component text for storage under the given delimiter.
///
/// Escape characters and delimiters in `raw` each get an escape prefix;
/// everything else passes through. `unescape(escape(raw)) == raw` for any
/// input, and the result never contains an unescaped delimiter.
pub fn escape(raw: &str, delimiter: char, escape: char) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if ch == escape || ch == delimiter {
            out.push(escape);
        }
        out.push(ch);
    }
    out
}

/// Whether a component is properly escaped for the given delimiter.
///
/// Rejects unescaped delimiters (the component would split) and a trailing
/// escape with nothing after it (the escape would swallow the delimiter
/// that follows in a packed string).
pub fn is_properly_escaped(component: &str, delimiter: char, escape: char) -> bool {
    let mut chars = component.chars();
    while let Some(ch) = chars.next() {
        if ch == escape {
            if chars.next().is_none() {
                return false;
            }
        } else if ch == delimiter {
            return false;
        }
    }
    true
}

/// Whether a packed string is well-formed: every escape character is
/// followed by a character to escape.
pub fn is_well_formed(packed: &str, escape: char) -> bool {
    let mut chars = packed.chars();
    while let Some(ch) = chars.next() {
        if ch == escape && chars.next().is_none() {
            return false;
        }
    }
    true
}
