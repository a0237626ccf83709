use url::form_urlencoded;

/// Search filters, each optional. Empty strings are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub product_id: String,
    pub rec_product_id: String,
    pub rec_type: String,
}

impl SearchQuery {
    pub fn new(
        product_id: impl Into<String>,
        rec_product_id: impl Into<String>,
        rec_type: impl Into<String>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            rec_product_id: rec_product_id.into(),
            rec_type: rec_type.into(),
        }
    }

    /// Non-empty filters in their fixed order.
    pub fn pairs(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("product_id", self.product_id.as_str()),
            ("rec_product_id", self.rec_product_id.as_str()),
            ("type", self.rec_type.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
    }

    pub fn is_unfiltered(&self) -> bool {
        self.pairs().next().is_none()
    }

    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.pairs() {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::SearchQuery;

    #[test]
    fn single_middle_field_has_no_separators() {
        let query = SearchQuery::new("", "5", "");
        assert_eq!(query.to_query_string(), "rec_product_id=5");
    }

    #[test]
    fn all_empty_yields_empty_string() {
        let query = SearchQuery::default();
        assert!(query.is_unfiltered());
        assert_eq!(query.to_query_string(), "");
    }

    #[test]
    fn all_fields_keep_fixed_order() {
        let query = SearchQuery::new("10", "20", "3");
        assert_eq!(
            query.to_query_string(),
            "product_id=10&rec_product_id=20&type=3"
        );
    }

    #[test]
    fn first_and_last_fields_join_with_one_separator() {
        let query = SearchQuery::new("10", "", "1");
        assert_eq!(query.to_query_string(), "product_id=10&type=1");
    }

    #[test]
    fn values_are_encoded() {
        let query = SearchQuery::new("a b&c=d", "", "");
        assert_eq!(query.to_query_string(), "product_id=a+b%26c%3Dd");
    }
}
