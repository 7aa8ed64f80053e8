//! Environment lookups used to build `DbConfig` and the CLI defaults.
//!
//! A variable set to an empty or all-blank string counts as unset, so
//! `POSTGRES_PORT=` in a compose file or `.env` falls back without a warning.

/// Read a string variable, treating an empty value the same as an unset one.
pub fn env_non_empty(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}

/// Parse `var`, or return `default` when it is unset or blank. A value that
/// does not parse is logged at warn level and replaced by `default`.
pub fn env_parse_with_default<T: std::str::FromStr + std::fmt::Display>(
    var: &str,
    default: T,
) -> T {
    let Some(raw) = env_non_empty(var) else {
        return default;
    };
    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(var, value = %raw, fallback = %default, "unparsable env var, using fallback");
            default
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test owns a distinct variable name, so parallel runs don't race.
    fn set(var: &str, value: &str) {
        unsafe { std::env::set_var(var, value) };
    }

    fn unset(var: &str) {
        unsafe { std::env::remove_var(var) };
    }

    #[test]
    fn test_env_parse_valid_value() {
        let var_name = "VECSTORE_TEST_ENV_PARSE_VALID_41021";
        set(var_name, "6543");
        let result: u16 = env_parse_with_default(var_name, 5432);
        assert_eq!(result, 6543);
        unset(var_name);
    }

    #[test]
    fn test_env_parse_invalid_value() {
        let var_name = "VECSTORE_TEST_ENV_PARSE_INVALID_41022";
        set(var_name, "not-a-port");
        let result: u16 = env_parse_with_default(var_name, 5432);
        assert_eq!(result, 5432);
        unset(var_name);
    }

    #[test]
    fn test_env_parse_out_of_range_value() {
        let var_name = "VECSTORE_TEST_ENV_PARSE_RANGE_41023";
        set(var_name, "70000");
        let result: u16 = env_parse_with_default(var_name, 5432);
        assert_eq!(result, 5432);
        unset(var_name);
    }

    #[test]
    fn test_env_parse_missing_var() {
        let var_name = "VECSTORE_TEST_ENV_PARSE_MISSING_41024";
        unset(var_name);
        let result: usize = env_parse_with_default(var_name, 3);
        assert_eq!(result, 3);
    }

    #[test]
    fn test_env_parse_blank_and_padded_values() {
        let var_name = "VECSTORE_TEST_ENV_PARSE_BLANK_41026";
        set(var_name, "  ");
        let result: u16 = env_parse_with_default(var_name, 5432);
        assert_eq!(result, 5432);
        set(var_name, " 6000 ");
        let result: u16 = env_parse_with_default(var_name, 5432);
        assert_eq!(result, 6000);
        unset(var_name);
    }

    #[test]
    fn test_env_non_empty_treats_blank_as_unset() {
        let var_name = "VECSTORE_TEST_ENV_NON_EMPTY_41025";
        set(var_name, "   ");
        assert_eq!(env_non_empty(var_name), None);
        set(var_name, "vectors");
        assert_eq!(env_non_empty(var_name).as_deref(), Some("vectors"));
        unset(var_name);
    }
}
