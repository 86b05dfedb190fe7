//! Utility functions

use crate::constants::USER_ID_SEPARATOR;

/// Joins user ids into the comma separated form used by bulk queries.
pub fn join_user_ids<S: AsRef<str>>(user_ids: &[S]) -> String {
    user_ids
        .iter()
        .map(|id| id.as_ref())
        .collect::<Vec<_>>()
        .join(&USER_ID_SEPARATOR.to_string())
}

/// Splits a comma separated id list, dropping blanks and surrounding spaces.
pub fn split_user_ids(raw: &str) -> Vec<String> {
    raw.split(USER_ID_SEPARATOR)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_user_ids() {
        assert_eq!(join_user_ids(&["u1", "u2", "u3"]), "u1,u2,u3");
        assert_eq!(join_user_ids::<&str>(&[]), "");
    }

    #[test]
    fn test_split_user_ids_skips_blanks() {
        assert_eq!(split_user_ids(" u1, ,u2,"), vec!["u1".to_string(), "u2".to_string()]);
        assert!(split_user_ids("").is_empty());
    }
}
