use serde::de::DeserializeOwned;
use std::io::{self, Read};

/// Deserialise piped stdin as `T`. An interactive TTY or blank input yields
/// `None` so the caller can fall back to flags.
pub fn read_stdin_as<T: DeserializeOwned>() -> Result<Option<T>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    parse_piped(&buffer)
}

fn parse_piped<T: DeserializeOwned>(text: &str) -> Result<Option<T>, Box<dyn std::error::Error>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let value = serde_json::from_str(trimmed).map_err(|e| format!("Failed to parse stdin: {e}"))?;
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use personal_finance_core::mortgage::lending::MortgageApplicant;

    #[test]
    fn test_blank_input_falls_back() {
        let parsed: Option<MortgageApplicant> = parse_piped("  \n").unwrap();
        assert!(parsed.is_none());
    }

    #[test]
    fn test_piped_applicant_parsed() {
        let parsed: Option<MortgageApplicant> =
            parse_piped(r#"{"salary": "60000", "age": 45, "is_senior": true}"#).unwrap();
        let applicant = parsed.unwrap();
        assert_eq!(applicant.age, 45);
        assert!(applicant.is_senior);
        assert!(!applicant.has_minimum_balance);
    }

    #[test]
    fn test_malformed_input_reported() {
        let err = parse_piped::<MortgageApplicant>("{salary").unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse stdin"));
    }
}
