use anyhow::{Context, Result};

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Parse a comma separated list of starting currencies.
///
/// Negative or non-numeric tokens are rejected here; range checks belong to
/// [`joinwars_game::GameConstants::validate`].
pub fn parse_currency_list(s: &str) -> Result<Vec<u64>> {
    split_csv(s)
        .iter()
        .map(|token| {
            token
                .parse::<u64>()
                .with_context(|| format!("invalid starting currency '{token}'"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_csv_trims_and_drops_empty_tokens() {
        assert_eq!(split_csv(" 10, 20 ,,30 "), vec!["10", "20", "30"]);
        assert!(split_csv("").is_empty());
    }

    #[test]
    fn parse_currency_list_accepts_numbers() {
        assert_eq!(parse_currency_list("10,20, 50").unwrap(), vec![10, 20, 50]);
    }

    #[test]
    fn parse_currency_list_rejects_negative_and_text() {
        let err = parse_currency_list("10,-5").unwrap_err();
        assert!(err.to_string().contains("-5"));
        assert!(parse_currency_list("ten").is_err());
    }
}
