use crate::bpsv::types::{BpsvError, BpsvField};
use std::collections::HashMap;

/// BPSV document schema defining field structure
#[derive(Debug, Clone)]
pub struct BpsvSchema {
    /// Ordered list of fields
    fields: Vec<BpsvField>,
    /// Lowercased field name to index
    field_map: HashMap<String, usize>,
}

impl BpsvSchema {
    /// Create a new schema from fields
    #[must_use]
    pub fn new(fields: Vec<BpsvField>) -> Self {
        let field_map = fields
            .iter()
            .enumerate()
            .map(|(index, field)| (field.name.to_ascii_lowercase(), index))
            .collect();

        Self { fields, field_map }
    }

    /// Parse schema from a header line
    pub fn parse(header: &str) -> Result<Self, BpsvError> {
        if header.is_empty() {
            return Err(BpsvError::EmptyDocument);
        }
        if !header.contains('!') {
            return Err(BpsvError::InvalidHeader(
                "Header must contain field type specifications".to_string(),
            ));
        }

        let fields = header
            .split('|')
            .map(BpsvField::parse)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(fields))
    }

    /// Get the number of fields
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Get field by index
    #[must_use]
    pub fn get_field(&self, index: usize) -> Option<&BpsvField> {
        self.fields.get(index)
    }

    /// Get field index by name, ignoring ASCII case
    #[must_use]
    pub fn get_field_index(&self, name: &str) -> Option<usize> {
        self.field_map.get(&name.to_ascii_lowercase()).copied()
    }

    /// Check if schema has a field with given name
    #[must_use]
    pub fn has_field(&self, name: &str) -> bool {
        self.get_field_index(name).is_some()
    }

    /// Get field names in header order
    #[must_use]
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }
}
