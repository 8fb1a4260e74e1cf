//! Sort-field whitelisting
//!
//! Sort parameters arrive as free-form strings (`"title"` or `"title,desc"`).
//! Only whitelisted fields may reach the store; anything else is dropped and
//! the entity's default ordering is used instead.

/// A validated sort order, safe to splice into SQL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub column: &'static str,
    pub descending: bool,
}

impl SortOrder {
    pub fn asc(column: &'static str) -> Self {
        Self {
            column,
            descending: false,
        }
    }

    /// SQL fragment for this ordering, e.g. `title DESC`
    pub fn to_sql(&self) -> String {
        format!(
            "{} {}",
            self.column,
            if self.descending { "DESC" } else { "ASC" }
        )
    }
}

/// Sortable fields for films, API name to column
pub const FILM_SORT_FIELDS: &[(&str, &str)] = &[
    ("id", "id"),
    ("title", "title"),
    ("release_date", "release_date"),
];

/// Sortable fields for people
pub const PERSON_SORT_FIELDS: &[(&str, &str)] = &[
    ("id", "id"),
    ("name", "name"),
    ("date_of_birth", "date_of_birth"),
];

/// Resolve a requested sort against a whitelist.
///
/// Accepts `field` or `field,desc` / `field,asc`. Fields not present in
/// `allowed` are ignored, falling back to ascending `id`.
pub fn filter_sort(requested: Option<&str>, allowed: &[(&'static str, &'static str)]) -> SortOrder {
    let Some(raw) = requested else {
        return SortOrder::asc("id");
    };

    let mut parts = raw.splitn(2, ',');
    let field = parts.next().unwrap_or("").trim();
    let descending = parts
        .next()
        .map(|d| d.trim().eq_ignore_ascii_case("desc"))
        .unwrap_or(false);

    match allowed.iter().find(|(name, _)| *name == field) {
        Some(&(_, column)) => SortOrder { column, descending },
        None => {
            tracing::debug!(field, "Ignoring non-sortable field");
            SortOrder::asc("id")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitelisted_field_is_used() {
        let order = filter_sort(Some("title"), FILM_SORT_FIELDS);
        assert_eq!(order, SortOrder::asc("title"));
    }

    #[test]
    fn descending_direction_is_parsed() {
        let order = filter_sort(Some("name,desc"), PERSON_SORT_FIELDS);
        assert_eq!(
            order,
            SortOrder {
                column: "name",
                descending: true
            }
        );
        assert_eq!(order.to_sql(), "name DESC");
    }

    #[test]
    fn unknown_field_falls_back_to_id() {
        // A non-sortable field must never reach the store
        let order = filter_sort(Some("synopsis"), FILM_SORT_FIELDS);
        assert_eq!(order, SortOrder::asc("id"));

        // Including anything that looks like SQL
        let order = filter_sort(Some("title; DROP TABLE films"), FILM_SORT_FIELDS);
        assert_eq!(order, SortOrder::asc("id"));
    }

    #[test]
    fn missing_sort_uses_default() {
        assert_eq!(filter_sort(None, PERSON_SORT_FIELDS), SortOrder::asc("id"));
    }

    #[test]
    fn column_names_are_whitelist_values() {
        // date_of_birth maps to its column, not the raw request string
        let order = filter_sort(Some("date_of_birth,desc"), PERSON_SORT_FIELDS);
        assert_eq!(order.column, "date_of_birth");
        assert!(order.descending);
    }
}
