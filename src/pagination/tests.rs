//! Tests for pagination module

use super::*;
use crate::types::StringMap;
use serde_json::json;
use test_case::test_case;

// ============================================================================
// NextPage Tests
// ============================================================================

#[test]
fn test_next_page_with_param() {
    let next = NextPage::with_param("next_cursor", "abc");
    assert!(!next.is_done());

    let (has_more, params) = next.into_parts();
    assert!(has_more);
    assert_eq!(params.len(), 1);
    assert_eq!(params.get("next_cursor"), Some(&"abc".to_string()));
}

#[test]
fn test_next_page_done() {
    let next = NextPage::Done;
    assert!(next.is_done());
    assert_eq!(next.into_parts(), (false, StringMap::new()));
}

// ============================================================================
// CursorPaginator Tests
// ============================================================================

#[test]
fn test_cursor_present() {
    let paginator = CursorPaginator::default();
    let next = paginator.next_page(&json!({"next_cursor": "abc"}));

    let (has_more, params) = next.into_parts();
    assert!(has_more);
    assert_eq!(params, StringMap::from([("next_cursor".to_string(), "abc".to_string())]));
}

#[test_case(json!({"next_cursor": null}) ; "null cursor")]
#[test_case(json!({}) ; "missing cursor")]
#[test_case(json!({"records": [], "cursor": "abc"}) ; "different field")]
#[test_case(json!([1, 2]) ; "array response")]
#[test_case(json!("next_cursor") ; "string response")]
#[test_case(json!({"next_cursor": {"id": 1}}) ; "object cursor")]
#[test_case(json!({"next_cursor": true}) ; "bool cursor")]
fn test_cursor_absent_or_malformed_is_done(response: serde_json::Value) {
    let paginator = CursorPaginator::default();
    assert_eq!(
        paginator.next_page(&response).into_parts(),
        (false, StringMap::new())
    );
}

#[test]
fn test_numeric_cursor() {
    let paginator = CursorPaginator::default();
    let next = paginator.next_page(&json!({"next_cursor": 1234}));
    assert_eq!(next, NextPage::with_param("next_cursor", "1234"));
}

#[test]
fn test_empty_string_cursor_still_continues() {
    let paginator = CursorPaginator::default();
    let next = paginator.next_page(&json!({"next_cursor": ""}));
    assert_eq!(next, NextPage::with_param("next_cursor", ""));
}

#[test]
fn test_custom_cursor_param() {
    let paginator = CursorPaginator::default().with_cursor_param("start_cursor");
    let next = paginator.next_page(&json!({"next_cursor": "xyz", "records": [{"id": 1}]}));
    assert_eq!(next, NextPage::with_param("start_cursor", "xyz"));
}

#[test]
fn test_custom_cursor_field() {
    let paginator = CursorPaginator::new("cursor", "meta_cursor");
    assert!(paginator.next_page(&json!({"next_cursor": "a"})).is_done());
    assert_eq!(
        paginator.next_page(&json!({"meta_cursor": "a"})),
        NextPage::with_param("cursor", "a")
    );
}

// ============================================================================
// SyncState Tests
// ============================================================================

#[test]
fn test_sync_state_starts_with_initial_params() {
    let initial = StringMap::from([("per_page".to_string(), "100".to_string())]);
    let state = SyncState::new(initial.clone());
    assert!(state.has_more);
    assert_eq!(state.params, initial);
    assert_eq!(state.pages, 0);
}

#[test]
fn test_sync_state_cursor_replaces_params() {
    let initial = StringMap::from([("per_page".to_string(), "100".to_string())]);
    let mut state = SyncState::new(initial);

    state.advance(NextPage::with_param("next_cursor", "abc"));
    assert!(state.has_more);
    assert_eq!(state.pages, 1);
    assert_eq!(state.params.get("per_page"), None);
    assert_eq!(state.params.get("next_cursor"), Some(&"abc".to_string()));

    state.advance(NextPage::Done);
    assert!(!state.has_more);
    assert!(state.params.is_empty());
    assert_eq!(state.pages, 2);
}

#[test]
fn test_sync_state_finish() {
    let mut state = SyncState::new(StringMap::from([("a".to_string(), "1".to_string())]));
    state.finish();
    assert!(!state.has_more);
    assert!(state.params.is_empty());
    assert_eq!(state.pages, 0);
}
