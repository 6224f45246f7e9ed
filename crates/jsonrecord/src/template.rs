use alloc::string::{String, ToString};

/// Substitutes every `%d` in `template` with the decimal rendering of `n`.
pub(crate) fn render(template: &str, n: u128) -> String {
    if template == "%d" {
        return n.to_string();
    }
    template.replace("%d", &n.to_string())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::render;

    #[rstest]
    #[case("%d", 7, "7")]
    #[case("rec-%d", 12, "rec-12")]
    #[case("%d/%d", 3, "3/3")]
    #[case("fixed", 9, "fixed")]
    #[case("", 1, "")]
    #[case("id-%d", u128::from(u64::MAX) + 1, "id-18446744073709551616")]
    fn renders(#[case] template: &str, #[case] n: u128, #[case] expected: &str) {
        assert_eq!(render(template, n), expected);
    }
}
