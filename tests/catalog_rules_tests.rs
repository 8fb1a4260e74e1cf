//! Integration tests for the catalog access and paging rules
//!
//! These tests verify the cross-cutting rules of the catalog API:
//! - Which requests require the admin role
//! - Sort field whitelisting
//! - Page window arithmetic
//! - Cascade ordering when films and people are deleted

// ============================================================================
// Access Control Tests
// ============================================================================

/// Outcome of the write guard for a given request
#[derive(Debug, PartialEq)]
enum Access {
    Allowed,
    Unauthorized,
    Forbidden,
}

/// Caller identity as seen by the guard
#[derive(Debug, Clone, Copy)]
enum Caller {
    Anonymous,
    User,
    Admin,
}

mod write_guard {
    use super::*;

    const MUTATING_METHODS: &[&str] = &["POST", "PUT", "PATCH", "DELETE"];

    /// Guard decision: reads are open, writes need an admin token
    fn check(method: &str, caller: Caller) -> Access {
        if !MUTATING_METHODS.contains(&method) {
            return Access::Allowed;
        }
        match caller {
            Caller::Anonymous => Access::Unauthorized,
            Caller::User => Access::Forbidden,
            Caller::Admin => Access::Allowed,
        }
    }

    #[test]
    fn test_reads_are_anonymous() {
        assert_eq!(check("GET", Caller::Anonymous), Access::Allowed);
        assert_eq!(check("GET", Caller::User), Access::Allowed);
        assert_eq!(check("HEAD", Caller::Anonymous), Access::Allowed);
    }

    #[test]
    fn test_writes_without_token_are_unauthorized() {
        for method in MUTATING_METHODS {
            assert_eq!(
                check(method, Caller::Anonymous),
                Access::Unauthorized,
                "{} without a token must yield 401",
                method
            );
        }
    }

    #[test]
    fn test_writes_with_non_admin_token_are_forbidden() {
        for method in MUTATING_METHODS {
            assert_eq!(
                check(method, Caller::User),
                Access::Forbidden,
                "{} with a plain user token must yield 403",
                method
            );
        }
    }

    #[test]
    fn test_admin_can_write() {
        for method in MUTATING_METHODS {
            assert_eq!(check(method, Caller::Admin), Access::Allowed);
        }
    }
}

// ============================================================================
// Sort Whitelisting Tests
// ============================================================================

mod sort_whitelist {
    const FILM_SORT_FIELDS: &[&str] = &["id", "title", "release_date"];
    const PERSON_SORT_FIELDS: &[&str] = &["id", "name", "date_of_birth"];

    /// Resolve a requested sort expression against a whitelist.
    /// Unknown fields fall back to ascending id instead of erroring.
    fn resolve(requested: Option<&str>, allowed: &[&str]) -> (String, bool) {
        let fallback = ("id".to_string(), false);
        let Some(requested) = requested else {
            return fallback;
        };
        let mut parts = requested.splitn(2, ',');
        let field = parts.next().unwrap_or("").trim();
        let descending = parts
            .next()
            .map(|d| d.trim().eq_ignore_ascii_case("desc"))
            .unwrap_or(false);
        if allowed.contains(&field) {
            (field.to_string(), descending)
        } else {
            fallback
        }
    }

    #[test]
    fn test_known_fields_pass_through() {
        assert_eq!(
            resolve(Some("title"), FILM_SORT_FIELDS),
            ("title".to_string(), false)
        );
        assert_eq!(
            resolve(Some("release_date,desc"), FILM_SORT_FIELDS),
            ("release_date".to_string(), true)
        );
        assert_eq!(
            resolve(Some("name,asc"), PERSON_SORT_FIELDS),
            ("name".to_string(), false)
        );
    }

    #[test]
    fn test_unknown_fields_fall_back_to_id() {
        assert_eq!(
            resolve(Some("password_hash"), FILM_SORT_FIELDS),
            ("id".to_string(), false)
        );
        assert_eq!(
            resolve(Some("title; DROP TABLE films"), FILM_SORT_FIELDS),
            ("id".to_string(), false)
        );
    }

    #[test]
    fn test_missing_sort_defaults_to_id() {
        assert_eq!(resolve(None, PERSON_SORT_FIELDS), ("id".to_string(), false));
    }

    #[test]
    fn test_whitelists_are_per_entity() {
        // "name" sorts people but not films, and vice versa for "title"
        assert_eq!(
            resolve(Some("name"), FILM_SORT_FIELDS),
            ("id".to_string(), false)
        );
        assert_eq!(
            resolve(Some("title"), PERSON_SORT_FIELDS),
            ("id".to_string(), false)
        );
    }
}

// ============================================================================
// Page Window Tests
// ============================================================================

mod page_window {
    const DEFAULT_PAGE_SIZE: i64 = 20;
    const MAX_PAGE_SIZE: i64 = 100;

    /// Compute (offset, limit) for a page request, or None when out of range
    fn window(page: Option<i64>, size: Option<i64>) -> Option<(i64, i64)> {
        let page = page.unwrap_or(0);
        let size = size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page < 0 || size < 1 || size > MAX_PAGE_SIZE {
            return None;
        }
        Some((page * size, size))
    }

    fn total_pages(total: i64, size: i64) -> i64 {
        if total == 0 { 0 } else { (total + size - 1) / size }
    }

    #[test]
    fn test_defaults() {
        assert_eq!(window(None, None), Some((0, 20)));
    }

    #[test]
    fn test_offset_is_page_times_size() {
        assert_eq!(window(Some(3), Some(25)), Some((75, 25)));
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert_eq!(window(Some(-1), None), None);
        assert_eq!(window(None, Some(0)), None);
        assert_eq!(window(None, Some(101)), None);
        assert_eq!(window(None, Some(100)), Some((0, 100)));
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(total_pages(1, 20), 1);
        assert_eq!(total_pages(20, 20), 1);
        assert_eq!(total_pages(21, 20), 2);
    }
}

// ============================================================================
// Cascade Delete Tests
// ============================================================================

/// Catalog tables touched by a cascading delete, in execution order
mod cascade_order {
    fn film_delete_order() -> Vec<&'static str> {
        vec!["roles", "film_directors", "films"]
    }

    fn person_delete_order() -> Vec<&'static str> {
        vec!["roles", "film_directors", "people"]
    }

    #[test]
    fn test_dependents_are_removed_before_the_entity() {
        for order in [film_delete_order(), person_delete_order()] {
            let entity = *order.last().unwrap();
            for dependent in &order[..order.len() - 1] {
                assert!(
                    order.iter().position(|t| t == dependent)
                        < order.iter().position(|t| *t == entity),
                    "{} rows must go before the {} row",
                    dependent,
                    entity
                );
            }
        }
    }

    #[test]
    fn test_both_cascades_clear_roles_and_director_links() {
        assert!(film_delete_order().contains(&"roles"));
        assert!(film_delete_order().contains(&"film_directors"));
        assert!(person_delete_order().contains(&"roles"));
        assert!(person_delete_order().contains(&"film_directors"));
    }
}

// ============================================================================
// Lookup and Update Semantics Tests
// ============================================================================

mod batch_lookup {
    /// Batch lookup returns only rows whose id exists in the store
    fn lookup(store: &[i64], requested: &[i64]) -> Vec<i64> {
        requested
            .iter()
            .copied()
            .filter(|id| store.contains(id))
            .collect()
    }

    #[test]
    fn test_unknown_ids_are_silently_dropped() {
        // Asking for {1, 2, 3} against a store holding {1, 2} yields {1, 2}
        assert_eq!(lookup(&[1, 2], &[1, 2, 3]), vec![1, 2]);
    }

    #[test]
    fn test_empty_request_yields_empty_result() {
        assert!(lookup(&[1, 2], &[]).is_empty());
    }
}

mod update_semantics {
    /// Update touches an existing row or reports its absence; it never
    /// creates a new one.
    fn update(store: &mut Vec<(i64, String)>, id: i64, title: &str) -> Option<()> {
        let row = store.iter_mut().find(|(row_id, _)| *row_id == id)?;
        row.1 = title.to_string();
        Some(())
    }

    #[test]
    fn test_update_of_unknown_id_is_not_found_and_never_inserts() {
        let mut store = vec![(1, "Alien".to_string())];

        assert!(update(&mut store, 2, "Aliens").is_none());
        assert_eq!(store.len(), 1, "a failed update must not insert a row");
    }

    #[test]
    fn test_update_of_known_id_replaces_in_place() {
        let mut store = vec![(1, "Alien".to_string())];

        assert!(update(&mut store, 1, "Alien (Director's Cut)").is_some());
        assert_eq!(store.len(), 1);
        assert_eq!(store[0].1, "Alien (Director's Cut)");
    }
}

// ============================================================================
// Delete Semantics Tests
// ============================================================================

mod delete_semantics {
    /// Whether deleting a missing entity is an error, per entity kind
    fn missing_delete_is_error(entity: &str) -> bool {
        match entity {
            // Film and person deletes are idempotent no-ops
            "film" | "person" => false,
            // A missing role is reported as not found
            "role" => true,
            other => panic!("unknown entity {}", other),
        }
    }

    #[test]
    fn test_film_and_person_deletes_are_idempotent() {
        assert!(!missing_delete_is_error("film"));
        assert!(!missing_delete_is_error("person"));
    }

    #[test]
    fn test_role_delete_reports_missing() {
        assert!(missing_delete_is_error("role"));
    }
}
