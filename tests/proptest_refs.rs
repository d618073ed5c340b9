//! Property-based tests for issue reference resolution.
//!
//! Verifies that:
//! - `shorten` output always resolves back to the same id
//! - resolution never panics on arbitrary tokens
//! - bare numbers always land in the acting user's namespace

use ishu::model::IssueId;
use ishu::util::IdResolver;
use proptest::prelude::*;
use std::collections::BTreeSet;

fn username() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

fn user_set() -> impl Strategy<Value = BTreeSet<String>> {
    proptest::collection::btree_set(username(), 1..6)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 200,
        ..Default::default()
    })]

    /// Property: shortening any known id produces a token that resolves
    /// back to exactly that id.
    #[test]
    fn shorten_resolve_round_trip(
        users in user_set(),
        acting_index in 0usize..6,
        target_index in 0usize..6,
        num in 1u32..10_000,
    ) {
        let names: Vec<&String> = users.iter().collect();
        let acting = names[acting_index % names.len()];
        let target = names[target_index % names.len()];
        let resolver = IdResolver::new(acting, &users);

        let id = IssueId::new(target.clone(), num);
        let short = resolver.shorten(&id);
        let resolved = resolver.resolve(&short, false, |_| true).unwrap();
        prop_assert_eq!(resolved, id);
    }

    /// Property: arbitrary tokens either resolve or error, never panic,
    /// and a resolved user is always a known one.
    #[test]
    fn resolve_never_panics(
        users in user_set(),
        acting_index in 0usize..6,
        token in "\\PC{0,12}",
    ) {
        let names: Vec<&String> = users.iter().collect();
        let acting = names[acting_index % names.len()];
        let resolver = IdResolver::new(acting, &users);

        if let Ok(id) = resolver.resolve(&token, false, |_| true) {
            prop_assert!(users.contains(&id.user));
        }
    }

    /// Property: bare digit tokens stay in the acting user's namespace.
    #[test]
    fn bare_number_is_own_namespace(
        users in user_set(),
        acting_index in 0usize..6,
        num in 1u32..10_000,
    ) {
        let names: Vec<&String> = users.iter().collect();
        let acting = names[acting_index % names.len()];
        let resolver = IdResolver::new(acting, &users);

        let id = resolver.resolve(&num.to_string(), false, |_| true).unwrap();
        prop_assert_eq!(id.user.as_str(), acting.as_str());
        prop_assert_eq!(id.num, num);
    }
}
