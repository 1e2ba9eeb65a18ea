//! Partial update builder for expenses

use core_kernel::temporal::truncate_to_seconds;
use core_kernel::{ExpenseId, UserId};

use crate::error::FinanceError;
use crate::expense::ExpensePatch;
use crate::mapping::{date_attributes, expense_key};
use crate::table::{attr, AttributeValue, ItemUpdate, WriteCondition};

/// Builds one conditional update writing only the supplied fields
///
/// A date change also rewrites `EXPENSE_USER_DATE` and `EXPENSE_USER_YEAR` in
/// the same update, so the record moves to its new month and year partitions
/// atomically. The update only applies to an existing record.
pub fn build_expense_update(
    user: &UserId,
    id: &ExpenseId,
    patch: &ExpensePatch,
) -> Result<ItemUpdate, FinanceError> {
    patch.validate()?;

    let mut update = ItemUpdate::new(expense_key(user, id)).with_condition(WriteCondition::ItemExists);

    if let Some(name) = &patch.name {
        update = update.set(attr::EXPENSE_NAME, name.as_str());
    }
    if let Some(amount) = patch.amount {
        update = update.set(attr::EXPENSE_AMOUNT, amount);
    }
    if let Some(date) = patch.date {
        for (name, value) in date_attributes(user, &truncate_to_seconds(date)) {
            update = update.set(name, value);
        }
    }
    if let Some(category) = patch.category {
        update = update.set(attr::EXPENSE_CATEGORY, AttributeValue::S(category.code().to_string()));
    }

    Ok(update)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expense::Category;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn user() -> UserId {
        UserId::parse("carol").unwrap()
    }

    #[test]
    fn test_only_supplied_fields_are_set() {
        let id = ExpenseId::new();
        let patch = ExpensePatch {
            name: Some("Rent".into()),
            category: Some(Category::Housing),
            ..Default::default()
        };
        let update = build_expense_update(&user(), &id, &patch).unwrap();

        let mut names: Vec<_> = update.attribute_names().collect();
        names.sort();
        assert_eq!(names, vec![attr::EXPENSE_CATEGORY, attr::EXPENSE_NAME]);
        assert_eq!(update.condition, WriteCondition::ItemExists);
        assert_eq!(update.key.sk, format!("EXPENSE#{}", id));
    }

    #[test]
    fn test_date_change_rewrites_derived_keys() {
        let patch = ExpensePatch {
            date: Some(Utc.with_ymd_and_hms(2023, 12, 31, 23, 0, 0).unwrap()),
            ..Default::default()
        };
        let update = build_expense_update(&user(), &ExpenseId::new(), &patch).unwrap();

        assert_eq!(update.set[attr::EXPENSE_USER_DATE], AttributeValue::S("carol#2023#12".into()));
        assert_eq!(update.set[attr::EXPENSE_USER_YEAR], AttributeValue::S("carol#2023".into()));
        assert!(update.set.contains_key(attr::EXPENSE_DATE));
        assert!(!update.set.contains_key(attr::EXPENSE_AMOUNT));
    }

    #[test]
    fn test_amount_without_date_leaves_keys_alone() {
        let patch = ExpensePatch {
            amount: Some(dec!(9.99)),
            ..Default::default()
        };
        let update = build_expense_update(&user(), &ExpenseId::new(), &patch).unwrap();
        assert!(!update.set.contains_key(attr::EXPENSE_USER_DATE));
        assert_eq!(update.set[attr::EXPENSE_AMOUNT], AttributeValue::N(dec!(9.99)));
    }

    #[test]
    fn test_invalid_patches_rejected() {
        assert!(build_expense_update(&user(), &ExpenseId::new(), &ExpensePatch::default()).is_err());
        let negative = ExpensePatch {
            amount: Some(dec!(-3)),
            ..Default::default()
        };
        assert!(build_expense_update(&user(), &ExpenseId::new(), &negative).is_err());
    }
}
