/// Expands a lone `a..b` or `a:b` token into its parts. Anything else is
/// returned unchanged.
#[must_use]
pub fn expand_range_token(revisions: &[String]) -> Vec<String> {
    let separator = match revisions {
        [token] if token.contains("..") => "..",
        [token] if token.contains(':') => ":",
        _ => return revisions.to_vec(),
    };
    revisions[0].split(separator).map(str::to_owned).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn dot_range_splits_in_two() {
        assert_eq!(expand_range_token(&tokens(&["3..7"])), tokens(&["3", "7"]));
    }

    #[test]
    fn colon_range_splits_in_two() {
        assert_eq!(expand_range_token(&tokens(&["3:7"])), tokens(&["3", "7"]));
    }

    #[test]
    fn longer_ranges_keep_every_part() {
        assert_eq!(
            expand_range_token(&tokens(&["1:2:3"])),
            tokens(&["1", "2", "3"])
        );
    }

    #[test]
    fn plain_and_multiple_tokens_are_untouched() {
        assert_eq!(expand_range_token(&tokens(&["5"])), tokens(&["5"]));
        assert_eq!(
            expand_range_token(&tokens(&["1:2", "3"])),
            tokens(&["1:2", "3"])
        );
        assert!(expand_range_token(&[]).is_empty());
    }
}
