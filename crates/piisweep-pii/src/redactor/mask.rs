//! Masking transforms
//!
//! All masks work on chars rather than bytes and clamp for short inputs, so
//! they are total over any string.

fn repeat(mask: char, count: usize) -> String {
    std::iter::repeat_n(mask, count).collect()
}

/// Keep the first and last two characters, mask the middle
pub fn mask_phone(text: &str, mask: char) -> String {
    let chars: Vec<char> = text.chars().collect();
    let head = chars.len().min(2);
    let tail = (chars.len() - head).min(2);
    let hidden = chars.len() - head - tail;

    let mut out = String::with_capacity(text.len());
    out.extend(&chars[..head]);
    out.push_str(&repeat(mask, hidden));
    out.extend(&chars[chars.len() - tail..]);
    out
}

/// Prefix for masked national IDs; fixed regardless of the mask character
pub const NATIONAL_ID_PREFIX: &str = "XXXX XXXX ";

/// Fixed masked prefix followed by the last four characters
pub fn mask_national_id(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let last_four: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("{NATIONAL_ID_PREFIX}{last_four}")
}

/// Keep two characters of the local part, mask the rest, keep the domain.
///
/// Used for email addresses and payment handles. A value without `@` is
/// treated as a bare local part.
pub fn mask_handle(text: &str, mask: char) -> String {
    let mask_local = |local: &str| {
        let kept: String = local.chars().take(2).collect();
        let hidden = local.chars().count().saturating_sub(2);
        format!("{kept}{}", repeat(mask, hidden))
    };

    match text.split_once('@') {
        Some((local, domain)) => format!("{}@{domain}", mask_local(local)),
        None => mask_local(text),
    }
}

/// Keep the first character, mask the rest
pub fn mask_name(text: &str, mask: char) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(text.len());
            out.push(first);
            out.push_str(&repeat(mask, chars.count()));
            out
        }
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_mask_keeps_edges() {
        assert_eq!(mask_phone("9876543210", 'X'), "98XXXXXX10");
    }

    #[test]
    fn test_phone_mask_short_inputs() {
        assert_eq!(mask_phone("", 'X'), "");
        assert_eq!(mask_phone("7", 'X'), "7");
        assert_eq!(mask_phone("123", 'X'), "123");
        assert_eq!(mask_phone("12345", 'X'), "12X45");
    }

    #[test]
    fn test_phone_mask_preserves_length() {
        let masked = mask_phone("n/a-unknown", 'X');
        assert_eq!(masked.chars().count(), "n/a-unknown".chars().count());
    }

    #[test]
    fn test_national_id_mask() {
        assert_eq!(mask_national_id("1234 5678 9012"), "XXXX XXXX 9012");
        assert_eq!(mask_national_id("123456789012"), "XXXX XXXX 9012");
        assert_eq!(mask_national_id("12"), "XXXX XXXX 12");
    }

    #[test]
    fn test_handle_mask_email() {
        assert_eq!(mask_handle("john.doe@example.com", 'X'), "joXXXXXX@example.com");
        assert_eq!(mask_handle("j@x.com", 'X'), "j@x.com");
    }

    #[test]
    fn test_handle_mask_splits_at_first_at() {
        assert_eq!(mask_handle("abcd@ef@paytm", 'X'), "abXX@ef@paytm");
    }

    #[test]
    fn test_handle_mask_without_at() {
        assert_eq!(mask_handle("unknown", 'X'), "unXXXXX");
    }

    #[test]
    fn test_name_mask() {
        assert_eq!(mask_name("John", 'X'), "JXXX");
        assert_eq!(mask_name("J", 'X'), "J");
        assert_eq!(mask_name("", 'X'), "");
    }

    #[test]
    fn test_masks_respect_char_boundaries() {
        assert_eq!(mask_name("Éloïse", '*'), "É*****");
        assert_eq!(mask_handle("ñandú@ybl", '*'), "ña***@ybl");
        assert_eq!(mask_phone("अबकडई", '*'), "अब*डई");
    }
}
