//! Line classification and tokenisation
//!
//! The source grammar is line-oriented: a line is either empty, a comment
//! (`#` anywhere makes the whole line a comment), a label (`name:` alone on
//! the line), or an instruction (`mnemonic arg1[, arg2[, arg3]]`).

const MAX_IMMEDIATE: i64 = 32767;
const MIN_IMMEDIATE: i64 = -32768;
const MAX_ADDRESS: u64 = 1 << 26;

/// Comments are line-level: a `#` anywhere skips the whole line
pub fn is_comment(line: &str) -> bool {
    line.contains('#')
}

pub fn is_label(line: &str) -> bool {
    line.contains(':')
}

/// The label name is everything before the first `:`
pub fn label_name(line: &str) -> &str {
    &line[..line.find(':').unwrap_or_else(|| line.len())]
}

/// Split an instruction line into mnemonic and arguments.
///
/// The mnemonic is everything up to the first whitespace; the remainder is
/// split on `,` with each token trimmed.
///
/// `"add $t0, $t1, $t2"` becomes `["add", "$t0", "$t1", "$t2"]`.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut parts = line.splitn(2, char::is_whitespace);
    let mnemonic = parts.next().unwrap_or_default().trim();
    let mut tokens = vec![mnemonic.to_string()];

    if let Some(arguments) = parts.next() {
        tokens.extend(arguments.split(',').map(|token| token.trim().to_string()));
    }

    tokens
}

/// Parse a register token. Only the `$t` family is accepted; the digit is
/// the register index.
pub fn parse_register(token: &str) -> Option<u8> {
    let bytes = token.as_bytes();

    if bytes.len() == 3 && bytes[0] == b'$' && bytes[1] == b't' && bytes[2].is_ascii_digit() {
        Some(bytes[2] - b'0')
    } else {
        None
    }
}

/// Parse an immediate token: optional sign, decimal digits, 16-bit signed
/// range.
pub fn parse_immediate(token: &str) -> Option<i16> {
    let digits = token.strip_prefix('-').unwrap_or(token);

    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }

    match token.parse::<i64>() {
        Ok(value) if (MIN_IMMEDIATE..=MAX_IMMEDIATE).contains(&value) => Some(value as i16),
        _ => None,
    }
}

/// Parse a jump address token: unsigned decimal digits below 2^26
pub fn parse_address(token: &str) -> Option<u32> {
    if token.is_empty() || !token.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }

    match token.parse::<u64>() {
        Ok(value) if value < MAX_ADDRESS => Some(value as u32),
        _ => None,
    }
}
