/// Name of the unique constraint on `short_links.link_key`.
pub const LINK_KEY_CONSTRAINT: &str = "short_links_link_key_key";

pub fn is_unique_violation_on_key(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(LINK_KEY_CONSTRAINT))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_error_is_not_a_key_violation() {
        assert!(!is_unique_violation_on_key(&sqlx::Error::PoolTimedOut));
        assert!(!is_unique_violation_on_key(&sqlx::Error::RowNotFound));
    }
}
