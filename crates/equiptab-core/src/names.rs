//! Field-name normalization shared by the allow-list and the order resolver.

/// Lower-case `name` and strip whitespace and underscores.
///
/// `"MANUFACTURER_ADDRESS"`, `"Manufacturer Address"` and
/// `"manufacturerAddress"` all normalize to `"manufactureraddress"`.
pub fn normalize_field_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}
