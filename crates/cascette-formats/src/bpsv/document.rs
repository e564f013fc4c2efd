use crate::bpsv::schema::BpsvSchema;
use crate::bpsv::types::{BpsvError, BpsvValue};

/// A single row of BPSV data.
///
/// Only the cell count is checked when a row is read. Cells are typed on
/// demand through [`BpsvRow::values`], so a malformed row does not prevent
/// reading the rest of the document.
#[derive(Debug, Clone)]
pub struct BpsvRow {
    /// Raw cell text as received
    raw_values: Vec<String>,
}

impl BpsvRow {
    /// Check raw cells against the schema's field count.
    ///
    /// `line` is only used for error reporting.
    pub fn parse(
        raw_values: Vec<String>,
        schema: &BpsvSchema,
        line: usize,
    ) -> Result<Self, BpsvError> {
        if raw_values.len() != schema.field_count() {
            return Err(BpsvError::FieldCountMismatch {
                line,
                expected: schema.field_count(),
                actual: raw_values.len(),
            });
        }

        Ok(Self { raw_values })
    }

    /// Parse every cell according to its declared type
    pub fn values(&self, schema: &BpsvSchema) -> Result<Vec<BpsvValue>, BpsvError> {
        self.raw_values
            .iter()
            .enumerate()
            .map(|(index, raw)| match schema.get_field(index) {
                Some(field) => BpsvValue::parse(raw, field.field_type),
                None => Err(BpsvError::InvalidFieldSpec(format!("no field at index {index}"))),
            })
            .collect()
    }

    /// Get raw string value by index
    #[must_use]
    pub fn get_raw(&self, index: usize) -> Option<&str> {
        self.raw_values.get(index).map(String::as_str)
    }

    /// Get raw string value by field name
    #[must_use]
    pub fn get_raw_by_name<'a>(&'a self, name: &str, schema: &BpsvSchema) -> Option<&'a str> {
        schema
            .get_field_index(name)
            .and_then(|index| self.get_raw(index))
    }

    /// Number of cells
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw_values.len()
    }

    /// Check if the row has no cells
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw_values.is_empty()
    }
}

/// A complete BPSV document with schema and data rows
#[derive(Debug, Clone)]
pub struct BpsvDocument {
    schema: BpsvSchema,
    rows: Vec<BpsvRow>,
    /// Value of the `## seqn = N` line, if present
    sequence_number: Option<u32>,
}

impl BpsvDocument {
    /// Create a new empty document with schema
    #[must_use]
    pub fn new(schema: BpsvSchema) -> Self {
        Self {
            schema,
            rows: Vec::new(),
            sequence_number: None,
        }
    }

    /// Parse and append a row of raw cells
    pub fn add_raw_row(&mut self, values: Vec<String>, line: usize) -> Result<(), BpsvError> {
        let row = BpsvRow::parse(values, &self.schema, line)?;
        self.rows.push(row);
        Ok(())
    }

    /// Get the document schema
    #[must_use]
    pub fn schema(&self) -> &BpsvSchema {
        &self.schema
    }

    /// Get all rows in document order
    #[must_use]
    pub fn rows(&self) -> &[BpsvRow] {
        &self.rows
    }

    /// Number of data rows
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the document has no data rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sequence number, if the document carried one
    #[must_use]
    pub fn sequence_number(&self) -> Option<u32> {
        self.sequence_number
    }

    /// Set the sequence number
    pub fn set_sequence_number(&mut self, seqn: u32) {
        self.sequence_number = Some(seqn);
    }

    /// First row whose `field` equals `value` exactly
    #[must_use]
    pub fn find_row(&self, field: &str, value: &str) -> Option<&BpsvRow> {
        let index = self.schema.get_field_index(field)?;
        self.rows
            .iter()
            .find(|row| row.get_raw(index) == Some(value))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn schema() -> BpsvSchema {
        BpsvSchema::parse("Region!STRING:0|BuildId!DEC:4").expect("valid header")
    }

    #[test]
    fn test_row_access_by_name() {
        let schema = schema();
        let row = BpsvRow::parse(vec!["us".to_string(), "61559".to_string()], &schema, 2)
            .expect("valid row");

        assert_eq!(row.len(), 2);
        assert_eq!(row.get_raw_by_name("region", &schema), Some("us"));
        assert_eq!(row.get_raw_by_name("Missing", &schema), None);
        assert_eq!(
            row.values(&schema).unwrap(),
            vec![BpsvValue::String("us".to_string()), BpsvValue::Dec(61559)]
        );
    }

    #[test]
    fn test_row_cells_are_typed_on_demand() {
        let schema = schema();
        let row = BpsvRow::parse(vec!["xx".to_string(), "n/a".to_string()], &schema, 2)
            .expect("cell count matches");

        assert_eq!(row.get_raw(1), Some("n/a"));
        assert!(matches!(
            row.values(&schema),
            Err(BpsvError::InvalidDecValue(value)) if value == "n/a"
        ));
    }

    #[test]
    fn test_row_field_count_mismatch() {
        let result = BpsvRow::parse(vec!["us".to_string()], &schema(), 3);
        assert!(matches!(
            result,
            Err(BpsvError::FieldCountMismatch {
                line: 3,
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_find_row_returns_first_match() {
        let mut doc = BpsvDocument::new(schema());
        doc.add_raw_row(vec!["eu".to_string(), "1".to_string()], 2)
            .unwrap();
        doc.add_raw_row(vec!["us".to_string(), "2".to_string()], 3)
            .unwrap();
        doc.add_raw_row(vec!["us".to_string(), "3".to_string()], 4)
            .unwrap();

        let row = doc.find_row("Region", "us").expect("us row");
        assert_eq!(row.get_raw(1), Some("2"));
        assert!(doc.find_row("Region", "kr").is_none());
        assert!(doc.find_row("Unknown", "us").is_none());
    }
}
