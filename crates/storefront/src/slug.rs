/// Derive a URL slug from a product name.
///
/// Lowercases, collapses every run of characters outside `[a-z0-9]` into a
/// single `-`, and trims dashes from both ends.
///
/// # Example
///
/// ```
/// use storefront::generate_slug;
///
/// assert_eq!(generate_slug("Leather Tote  (Large)"), "leather-tote-large");
/// assert_eq!(generate_slug("  --Eau de Parfum--  "), "eau-de-parfum");
/// ```
pub fn generate_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}
