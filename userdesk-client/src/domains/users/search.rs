use userdesk_model::User;

/// Filter the cached list by first or last name, ignoring case.
///
/// An empty term, or a term nothing matches, gives back the whole list so the
/// table never goes blank.
pub fn search_users(cached: &[User], term: &str) -> Vec<User> {
    let needle = term.to_lowercase();
    if needle.is_empty() {
        return cached.to_vec();
    }

    let results: Vec<User> = cached
        .iter()
        .filter(|user| user.name_contains(&needle))
        .cloned()
        .collect();

    if results.is_empty() {
        cached.to_vec()
    } else {
        results
    }
}
