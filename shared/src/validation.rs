//! Validation and normalization rules for the Ombor warehouse tracker
//!
//! Names arrive from operators and from bulk-imported spreadsheets, in
//! Uzbek Latin (which uses the apostrophe, e.g. "O'lchov") or Cyrillic
//! script, so the character classes accept both alphabets.

// ============================================================================
// Normalization
// ============================================================================

/// Collapse runs of whitespace into single spaces and trim the ends
pub fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First letter upper-cased, the rest lower-cased
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
        None => String::new(),
    }
}

/// Capitalize every whitespace-separated word
pub fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize a unit-of-measure or product name: whitespace collapsed,
/// first letter upper-cased, the rest lower-cased
pub fn normalize_name(name: &str) -> String {
    capitalize(&collapse_whitespace(name))
}

/// Normalize a recipient name: whitespace collapsed, title-cased
pub fn normalize_recipient(recipient: &str) -> String {
    title_case(&collapse_whitespace(recipient))
}

/// Normalize a destination: whitespace collapsed, upper-cased
pub fn normalize_destination(destination: &str) -> String {
    collapse_whitespace(destination).to_uppercase()
}

// ============================================================================
// Character-class checks
// ============================================================================

fn is_name_char(c: char) -> bool {
    c.is_alphabetic() || c == '\'' || c == 'ʼ'
}

/// Validate a unit-of-measure or product name (letters and apostrophes,
/// spaces between words; no digits or special characters)
pub fn validate_name(name: &str) -> Result<(), &'static str> {
    if name.is_empty() {
        return Err("Name must not be empty");
    }
    if !name.chars().all(|c| is_name_char(c) || c == ' ') {
        return Err("Name must contain only letters");
    }
    Ok(())
}

/// Validate a recipient (letters and spaces only)
pub fn validate_recipient(recipient: &str) -> Result<(), &'static str> {
    if recipient.is_empty() {
        return Err("Recipient must not be empty");
    }
    if !recipient.chars().all(|c| c.is_alphabetic() || c == ' ') {
        return Err("Recipient must contain only letters and spaces");
    }
    Ok(())
}

/// Validate a destination (letters, digits and spaces)
pub fn validate_destination(destination: &str) -> Result<(), &'static str> {
    if destination.is_empty() {
        return Err("Destination must not be empty");
    }
    if !destination.chars().all(|c| c.is_alphanumeric() || c == ' ') {
        return Err("Destination must contain only letters, digits and spaces");
    }
    Ok(())
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Normalization Tests
    // ========================================================================

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  bolt   m8  "), "bolt m8");
        assert_eq!(collapse_whitespace("bolt"), "bolt");
        assert_eq!(collapse_whitespace("   "), "");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("bolt"), "Bolt");
        assert_eq!(capitalize("BOLT"), "Bolt");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("o'lchov"), "O'lchov");
    }

    #[test]
    fn test_capitalize_cyrillic() {
        assert_eq!(capitalize("болт"), "Болт");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("ali valiyev"), "Ali Valiyev");
        assert_eq!(title_case("ALI  VALIYEV"), "Ali Valiyev");
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  dona "), "Dona");
        assert_eq!(normalize_name("KILOGRAMM"), "Kilogramm");
    }

    #[test]
    fn test_normalize_recipient() {
        assert_eq!(normalize_recipient(" ali  karimov "), "Ali Karimov");
    }

    #[test]
    fn test_normalize_destination() {
        assert_eq!(normalize_destination(" warehouse  b "), "WAREHOUSE B");
        assert_eq!(normalize_destination("sklad 3"), "SKLAD 3");
    }

    // ========================================================================
    // Character-Class Tests
    // ========================================================================

    #[test]
    fn test_validate_name_valid() {
        assert!(validate_name("Bolt").is_ok());
        assert!(validate_name("O'lchov").is_ok());
        assert!(validate_name("Болт").is_ok());
    }

    #[test]
    fn test_validate_name_invalid() {
        assert!(validate_name("").is_err());
        assert!(validate_name("Bolt8").is_err()); // Digits
        assert!(validate_name("Bolt-M").is_err()); // Special char
    }

    #[test]
    fn test_validate_recipient_valid() {
        assert!(validate_recipient("Ali").is_ok());
        assert!(validate_recipient("Ali Karimov").is_ok());
    }

    #[test]
    fn test_validate_recipient_invalid() {
        assert!(validate_recipient("").is_err());
        assert!(validate_recipient("Ali 3").is_err()); // Digits
        assert!(validate_recipient("Ali!").is_err()); // Special char
    }

    #[test]
    fn test_validate_destination_valid() {
        assert!(validate_destination("WAREHOUSE B").is_ok());
        assert!(validate_destination("SKLAD 3").is_ok());
    }

    #[test]
    fn test_validate_destination_invalid() {
        assert!(validate_destination("").is_err());
        assert!(validate_destination("SKLAD #3").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("staff@example.com").is_ok());
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("no@domain").is_err());
    }
}
