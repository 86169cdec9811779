//! Input validation for the create form.

/// Returns true if `email` looks like a deliverable address.
///
/// This is a shape check only: one `@`, a non-empty local part, and a
/// domain made of at least two non-empty dot-separated labels. Surrounding
/// whitespace is ignored, inner whitespace is not.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}
