//! Unit tests for the identifier types
//!
//! Covers creation, parsing, serialization and the key-safety rules
//! enforced on user ids.

use core_kernel::{ExpenseId, UserId};
use uuid::Uuid;

mod expense_id_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        let id1 = ExpenseId::new();
        let id2 = ExpenseId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = ExpenseId::from_uuid(uuid);
        assert_eq!(*id.as_uuid(), uuid);
    }

    #[test]
    fn test_from_str_rejects_garbage() {
        assert!("not-a-uuid".parse::<ExpenseId>().is_err());
    }

    #[test]
    fn test_json_serialization_is_bare_string() {
        let uuid = Uuid::new_v4();
        let id = ExpenseId::from(uuid);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid));
        let back: ExpenseId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}

mod user_id_tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let id = UserId::parse("testUser").unwrap();
        assert_eq!(id.as_str(), "testUser");
        assert_eq!(id.to_string(), "testUser");
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(UserId::parse("").is_err());
    }

    #[test]
    fn test_parse_rejects_key_delimiter() {
        assert!(UserId::parse("a#b").is_err());
        assert!("USER#x".parse::<UserId>().is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        assert!(serde_json::from_str::<UserId>("\"alice\"").is_ok());
        assert!(serde_json::from_str::<UserId>("\"al#ice\"").is_err());
    }
}
