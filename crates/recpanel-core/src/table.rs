use crate::domain::Recommendation;

pub const RESULT_HEADER: [&str; 5] = [
    "ID",
    "Product ID",
    "Recommendation Product ID",
    "Type",
    "Interested Count",
];

/// Search results as display rows. `type` stays the raw code here, unlike the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultTable {
    rows: Vec<[String; 5]>,
}

impl ResultTable {
    pub fn render(records: &[Recommendation]) -> Self {
        let rows = records
            .iter()
            .map(|record| {
                [
                    record.id.to_string(),
                    record.product_id.to_string(),
                    record.rec_product_id.to_string(),
                    record.rec_type.to_string(),
                    record.interested.to_string(),
                ]
            })
            .collect();
        Self { rows }
    }

    pub fn header(&self) -> [&'static str; 5] {
        RESULT_HEADER
    }

    pub fn rows(&self) -> &[[String; 5]] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Plain-text rendering with columns padded to their widest cell.
    pub fn to_text(&self) -> String {
        let mut widths = RESULT_HEADER.map(str::len);
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        push_line(&mut out, RESULT_HEADER.iter().copied(), &widths);
        for row in &self.rows {
            push_line(&mut out, row.iter().map(String::as_str), &widths);
        }
        out
    }
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize; 5]) {
    let line = cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}
