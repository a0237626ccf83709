use crate::domain::{ProductId, Recommendation, RecommendationDraft, RecommendationType, RecordId};
use crate::error::CoreError;
use crate::query::SearchQuery;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Id,
    ProductId,
    RecProductId,
    Type,
    Interested,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Id,
        FormField::ProductId,
        FormField::RecProductId,
        FormField::Type,
        FormField::Interested,
    ];

    /// Field identifier shared with the wire format.
    pub fn name(self) -> &'static str {
        match self {
            FormField::Id => "id",
            FormField::ProductId => "product_id",
            FormField::RecProductId => "rec_product_id",
            FormField::Type => "type",
            FormField::Interested => "interested",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Id => "ID",
            FormField::ProductId => "Product ID",
            FormField::RecProductId => "Recommendation Product ID",
            FormField::Type => "Type",
            FormField::Interested => "Interested Count",
        }
    }

    /// `interested` is server-owned; it is shown but never sent.
    pub fn is_editable(self) -> bool {
        !matches!(self, FormField::Interested)
    }
}

/// Raw text of every field. Nothing here is validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub id: String,
    pub product_id: String,
    pub rec_product_id: String,
    pub rec_type: String,
    pub interested: String,
}

impl FormFields {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Id => &self.id,
            FormField::ProductId => &self.product_id,
            FormField::RecProductId => &self.rec_product_id,
            FormField::Type => &self.rec_type,
            FormField::Interested => &self.interested,
        }
    }

    pub fn get_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Id => &mut self.id,
            FormField::ProductId => &mut self.product_id,
            FormField::RecProductId => &mut self.rec_product_id,
            FormField::Type => &mut self.rec_type,
            FormField::Interested => &mut self.interested,
        }
    }

    pub fn is_blank(&self) -> bool {
        FormField::ALL
            .into_iter()
            .all(|field| self.get(field).is_empty())
    }
}

impl From<&Recommendation> for FormFields {
    fn from(record: &Recommendation) -> Self {
        Self {
            id: record.id.to_string(),
            product_id: record.product_id.to_string(),
            rec_product_id: record.rec_product_id.to_string(),
            rec_type: record.rec_type.form_text(),
            interested: record.interested.to_string(),
        }
    }
}

/// The panel's form: editable field text plus the last record written into it.
///
/// `populate` and `clear` are the only writers of `current`, so `id` is blank
/// exactly when no record is loaded unless the user types one in.
#[derive(Debug, Clone, Default)]
pub struct Form {
    fields: FormFields,
    current: Option<Recommendation>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn value(&self, field: FormField) -> &str {
        self.fields.get(field)
    }

    pub fn value_mut(&mut self, field: FormField) -> &mut String {
        self.fields.get_mut(field)
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        *self.fields.get_mut(field) = value.into();
    }

    pub fn current(&self) -> Option<&Recommendation> {
        self.current.as_ref()
    }

    pub fn populate(&mut self, record: Recommendation) {
        self.fields = FormFields::from(&record);
        self.current = Some(record);
    }

    pub fn clear(&mut self) {
        self.fields = FormFields::default();
        self.current = None;
    }

    pub fn is_blank(&self) -> bool {
        self.fields.is_blank()
    }

    /// Id addressed by retrieve, update, delete and increment.
    pub fn target_id(&self) -> Result<RecordId, CoreError> {
        let trimmed = self.fields.id.trim();
        if trimmed.is_empty() {
            return Err(CoreError::MissingRecordId);
        }
        Ok(RecordId::from(trimmed))
    }

    pub fn draft(&self) -> Result<RecommendationDraft, CoreError> {
        Ok(RecommendationDraft {
            product_id: ProductId::from(self.fields.product_id.as_str()),
            rec_product_id: ProductId::from(self.fields.rec_product_id.as_str()),
            rec_type: RecommendationType::parse_field(&self.fields.rec_type)?,
        })
    }

    /// Search filters from the form, with the type label turned into its code.
    pub fn search_query(&self) -> Result<SearchQuery, CoreError> {
        let rec_type = RecommendationType::parse_field(&self.fields.rec_type)?
            .map(|kind| kind.code().to_string())
            .unwrap_or_default();
        Ok(SearchQuery::new(
            self.fields.product_id.trim(),
            self.fields.rec_product_id.trim(),
            rec_type,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::{Form, FormField};
    use crate::domain::{ProductId, Recommendation, RecommendationType, RecordId, TypeCode};
    use crate::error::CoreError;

    fn record(code: i64) -> Recommendation {
        Recommendation {
            id: RecordId::from("8"),
            product_id: ProductId::from("100"),
            rec_product_id: ProductId::from("150"),
            rec_type: TypeCode(code),
            interested: 3,
        }
    }

    #[test]
    fn populate_maps_each_code_to_its_label() {
        let mut form = Form::new();
        for kind in RecommendationType::ALL {
            form.populate(record(kind.code()));
            assert_eq!(form.value(FormField::Type), kind.label());
        }
    }

    #[test]
    fn populate_writes_out_of_range_code_verbatim() {
        let mut form = Form::new();
        form.populate(record(11));
        assert_eq!(form.value(FormField::Type), "11");
    }

    #[test]
    fn populate_replaces_every_field() {
        let mut form = Form::new();
        form.set(FormField::ProductId, "stale");
        form.set(FormField::Interested, "99");
        form.populate(record(0));
        assert_eq!(form.value(FormField::Id), "8");
        assert_eq!(form.value(FormField::ProductId), "100");
        assert_eq!(form.value(FormField::RecProductId), "150");
        assert_eq!(form.value(FormField::Type), "Generic");
        assert_eq!(form.value(FormField::Interested), "3");
        assert_eq!(form.current(), Some(&record(0)));
    }

    #[test]
    fn clear_populate_clear_leaves_form_blank() {
        let mut form = Form::new();
        form.clear();
        form.populate(record(2));
        form.clear();
        assert!(form.is_blank());
        assert!(form.current().is_none());
    }

    #[test]
    fn any_text_is_accepted_into_any_field() {
        let mut form = Form::new();
        for field in FormField::ALL {
            form.set(field, "not a number");
            assert_eq!(form.value(field), "not a number");
        }
    }

    #[test]
    fn target_id_requires_text() {
        let mut form = Form::new();
        assert_eq!(form.target_id(), Err(CoreError::MissingRecordId));
        form.set(FormField::Id, " 12 ");
        assert_eq!(form.target_id().expect("id").as_str(), "12");
    }

    #[test]
    fn draft_reads_label_and_rejects_unknown_type() {
        let mut form = Form::new();
        form.set(FormField::ProductId, "1");
        form.set(FormField::RecProductId, "2");
        form.set(FormField::Type, "CrossSell");
        let draft = form.draft().expect("draft");
        assert_eq!(draft.rec_type, Some(RecommendationType::CrossSell));

        form.set(FormField::Type, "Sideways");
        assert_eq!(
            form.draft(),
            Err(CoreError::InvalidRecommendationType("Sideways".to_string()))
        );
    }

    #[test]
    fn draft_sends_product_text_unchanged() {
        let mut form = Form::new();
        form.set(FormField::ProductId, " 1 ");
        form.set(FormField::RecProductId, "sku 9");
        let draft = form.draft().expect("draft");
        assert_eq!(draft.product_id, ProductId::from(" 1 "));
        assert_eq!(draft.rec_product_id, ProductId::from("sku 9"));
        assert_eq!(draft.rec_type, None);
    }

    #[test]
    fn search_query_uses_type_code() {
        let mut form = Form::new();
        form.set(FormField::RecProductId, "5");
        form.set(FormField::Type, "UpSell");
        let query = form.search_query().expect("query");
        assert_eq!(query.to_query_string(), "rec_product_id=5&type=3");
    }
}
