//! Run input: the list of ASINs to process.

use anyhow::Context;

/// Parses the positional ASIN argument.
///
/// The argument is either an inline JSON array of strings or the path to a
/// file containing one; anything that does not start with `[` is treated
/// as a path. Both failure modes error out before any processing starts.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the content is not a
/// JSON array of strings.
pub(crate) fn parse_asin_list(arg: &str) -> anyhow::Result<Vec<String>> {
    let raw = if arg.trim_start().starts_with('[') {
        arg.to_owned()
    } else {
        std::fs::read_to_string(arg)
            .with_context(|| format!("failed to read ASIN list file {arg}"))?
    };

    let asins: Vec<String> =
        serde_json::from_str(&raw).context("ASIN list is not a JSON array of strings")?;
    Ok(asins)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_inline_json_array() {
        let asins = parse_asin_list(r#"["B00W0I6TIM", "B00TEST"]"#).expect("valid input");
        assert_eq!(asins, vec!["B00W0I6TIM", "B00TEST"]);
    }

    #[test]
    fn parses_inline_array_with_leading_whitespace() {
        let asins = parse_asin_list(r#"  ["B00W0I6TIM"]"#).expect("valid input");
        assert_eq!(asins, vec!["B00W0I6TIM"]);
    }

    #[test]
    fn parses_empty_array() {
        let asins = parse_asin_list("[]").expect("valid input");
        assert!(asins.is_empty());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(parse_asin_list(r#"["B00W0I6TIM""#).is_err());
    }

    #[test]
    fn rejects_non_string_elements() {
        assert!(parse_asin_list("[1, 2, 3]").is_err());
    }

    #[test]
    fn rejects_missing_file() {
        let err = parse_asin_list("/nonexistent/asins.json").unwrap_err();
        assert!(err.to_string().contains("failed to read ASIN list file"));
    }

    #[test]
    fn reads_array_from_file() {
        let path = std::env::temp_dir().join(format!("revstat-asins-{}.json", std::process::id()));
        std::fs::write(&path, r#"["B00W0I6TIM"]"#).expect("temp file writable");

        let asins = parse_asin_list(path.to_str().expect("utf-8 path")).expect("valid file");
        assert_eq!(asins, vec!["B00W0I6TIM"]);

        std::fs::remove_file(&path).ok();
    }
}
