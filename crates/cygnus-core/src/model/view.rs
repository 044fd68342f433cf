use strum::{Display, EnumIter, EnumString};

/// The two synchronized renderings of the device set.
///
/// Hosts select a view by its lowercase name (`"cards"`, `"table"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum View {
    #[default]
    Cards,
    Table,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn parses_selector_strings() {
        assert_eq!(View::from_str("cards").unwrap(), View::Cards);
        assert_eq!(View::from_str("Table").unwrap(), View::Table);
        assert!(View::from_str("grid").is_err());
        assert_eq!(View::Table.to_string(), "table");
    }
}
