//! Customer API data types.
//!
//! This module contains the wire types exchanged with the customer API:
//! the open-ended [`Record`] returned by the list endpoint, the
//! [`CustomerDraft`] posted to the create endpoint, and the
//! [`CreateResponse`] envelope that confirms or rejects a creation.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Field holding the backend's internal customer identifier.
pub const ID_FIELD: &str = "cod_cliente";

/// Field holding the customer status flag.
pub const STATUS_FIELD: &str = "estado";

/// Status value assigned to newly created customers (active).
pub const ACTIVE_STATUS: i64 = 1;

/// Fields that are always present on a record but never shown in the table.
pub const HIDDEN_FIELDS: [&str; 2] = [ID_FIELD, STATUS_FIELD];

/// A single scalar value inside a [`Record`].
///
/// Nested arrays and objects are not scalars; a payload containing them
/// fails to deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => Ok(()),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(n) => write!(f, "{}", n),
            Scalar::Float(n) => write!(f, "{}", n),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

/// One row of backend data.
///
/// Field order follows the order of the keys in the JSON object, which is
/// what the table uses to order its columns. Inserting an existing key
/// replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Scalar)>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, keeping the position of an existing key.
    pub fn insert(&mut self, key: impl Into<String>, value: Scalar) {
        let key = key.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Builder-style variant of [`Record::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.insert(key, value.into());
        self
    }

    /// Get a field value by name.
    pub fn get(&self, key: &str) -> Option<&Scalar> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Field names in key order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Render a cell for the given column; missing fields render empty.
    pub fn cell(&self, column: &str) -> String {
        self.get(column).map(ToString::to_string).unwrap_or_default()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = Record;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of scalar fields")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Record, A::Error> {
                let mut record = Record::new();
                while let Some((key, value)) = map.next_entry::<String, Scalar>()? {
                    record.insert(key, value);
                }
                Ok(record)
            }
        }

        deserializer.deserialize_map(RecordVisitor)
    }
}

/// A field of the customer creation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    Nombre,
    Apellidos,
    FechaNacimiento,
    Ci,
    Nit,
    Direccion,
    Telefono,
    Email,
    Estado,
}

impl DraftField {
    /// The fields shown in the form, in tab order. `estado` keeps its default.
    pub const EDITABLE: [DraftField; 8] = [
        DraftField::Nombre,
        DraftField::Apellidos,
        DraftField::FechaNacimiento,
        DraftField::Ci,
        DraftField::Nit,
        DraftField::Direccion,
        DraftField::Telefono,
        DraftField::Email,
    ];

    /// Fields that must be non-empty before a draft may be submitted.
    pub const REQUIRED: [DraftField; 3] =
        [DraftField::Nombre, DraftField::Apellidos, DraftField::Ci];

    /// The JSON key used on the wire.
    pub fn wire_name(&self) -> &'static str {
        match self {
            DraftField::Nombre => "nombre",
            DraftField::Apellidos => "apellidos",
            DraftField::FechaNacimiento => "fecha_nacimiento",
            DraftField::Ci => "ci",
            DraftField::Nit => "nit",
            DraftField::Direccion => "direccion",
            DraftField::Telefono => "telefono",
            DraftField::Email => "email",
            DraftField::Estado => STATUS_FIELD,
        }
    }

    /// The label shown next to the input.
    pub fn label(&self) -> &'static str {
        match self {
            DraftField::Nombre => "Name",
            DraftField::Apellidos => "Surname",
            DraftField::FechaNacimiento => "Birth date",
            DraftField::Ci => "National ID (CI)",
            DraftField::Nit => "Tax ID (NIT)",
            DraftField::Direccion => "Address",
            DraftField::Telefono => "Phone",
            DraftField::Email => "Email",
            DraftField::Estado => "Status",
        }
    }

    /// Placeholder hint for the input.
    pub fn placeholder(&self) -> &'static str {
        match self {
            DraftField::FechaNacimiento => "YYYY-MM-DD",
            DraftField::Ci | DraftField::Nit | DraftField::Telefono => "digits",
            DraftField::Email => "name@example.com",
            _ => "",
        }
    }

    /// Check if the field is required.
    pub fn is_required(&self) -> bool {
        Self::REQUIRED.contains(self)
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Raised when a draft is missing one of its required fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Name, surname and national ID are required fields")]
pub struct ValidationError {
    /// The required fields that were empty.
    pub missing: Vec<DraftField>,
}

/// The in-progress customer backing the creation form.
///
/// Serializes to exactly the body expected by the create endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerDraft {
    pub nombre: String,
    pub apellidos: String,
    pub fecha_nacimiento: String,
    pub ci: String,
    pub nit: String,
    pub direccion: String,
    pub telefono: String,
    pub email: String,
    pub estado: Scalar,
}

impl Default for CustomerDraft {
    fn default() -> Self {
        Self {
            nombre: String::new(),
            apellidos: String::new(),
            fecha_nacimiento: String::new(),
            ci: String::new(),
            nit: String::new(),
            direccion: String::new(),
            telefono: String::new(),
            email: String::new(),
            estado: Scalar::Int(ACTIVE_STATUS),
        }
    }
}

impl CustomerDraft {
    /// Get the current value of a field as text.
    pub fn get(&self, field: DraftField) -> String {
        match field {
            DraftField::Estado => self.estado.to_string(),
            other => self.text_slot(other).map(String::clone).unwrap_or_default(),
        }
    }

    /// Set one field. Last write wins; no per-field validation happens here.
    ///
    /// `estado` stays numeric when the value parses as an integer.
    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        if field == DraftField::Estado {
            self.estado = match value.parse::<i64>() {
                Ok(n) => Scalar::Int(n),
                Err(_) => Scalar::Text(value),
            };
        } else if let Some(slot) = self.text_slot_mut(field) {
            *slot = value;
        }
    }

    /// Check the required fields are present.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let missing: Vec<DraftField> = DraftField::REQUIRED
            .iter()
            .copied()
            .filter(|f| self.get(*f).is_empty())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { missing })
        }
    }

    fn text_slot(&self, field: DraftField) -> Option<&String> {
        match field {
            DraftField::Nombre => Some(&self.nombre),
            DraftField::Apellidos => Some(&self.apellidos),
            DraftField::FechaNacimiento => Some(&self.fecha_nacimiento),
            DraftField::Ci => Some(&self.ci),
            DraftField::Nit => Some(&self.nit),
            DraftField::Direccion => Some(&self.direccion),
            DraftField::Telefono => Some(&self.telefono),
            DraftField::Email => Some(&self.email),
            DraftField::Estado => None,
        }
    }

    fn text_slot_mut(&mut self, field: DraftField) -> Option<&mut String> {
        match field {
            DraftField::Nombre => Some(&mut self.nombre),
            DraftField::Apellidos => Some(&mut self.apellidos),
            DraftField::FechaNacimiento => Some(&mut self.fecha_nacimiento),
            DraftField::Ci => Some(&mut self.ci),
            DraftField::Nit => Some(&mut self.nit),
            DraftField::Direccion => Some(&mut self.direccion),
            DraftField::Telefono => Some(&mut self.telefono),
            DraftField::Email => Some(&mut self.email),
            DraftField::Estado => None,
        }
    }
}

/// Response body of the create endpoint.
///
/// A creation is confirmed only when `mensaje` is present and non-empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateResponse {
    #[serde(default)]
    pub mensaje: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl CreateResponse {
    /// The confirmation message, if the backend sent one.
    pub fn confirmation(&self) -> Option<&str> {
        self.mensaje.as_deref().filter(|m| !m.is_empty())
    }

    /// The backend's error text, if any.
    pub fn error_text(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_preserves_key_order() {
        let json = r#"{"cod_cliente":1,"nombre":"Ana","apellidos":"Rios","estado":1}"#;
        let record: Record = serde_json::from_str(json).unwrap();
        let keys: Vec<&str> = record.keys().collect();
        assert_eq!(keys, vec!["cod_cliente", "nombre", "apellidos", "estado"]);
    }

    #[test]
    fn test_record_scalar_variants() {
        let json = r#"{"a":null,"b":true,"c":42,"d":1.5,"e":"x"}"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.get("a"), Some(&Scalar::Null));
        assert_eq!(record.get("b"), Some(&Scalar::Bool(true)));
        assert_eq!(record.get("c"), Some(&Scalar::Int(42)));
        assert_eq!(record.get("d"), Some(&Scalar::Float(1.5)));
        assert_eq!(record.get("e"), Some(&Scalar::Text("x".to_string())));
    }

    #[test]
    fn test_record_rejects_nested_values() {
        let json = r#"{"nombre":{"first":"Ana"}}"#;
        assert!(serde_json::from_str::<Record>(json).is_err());
    }

    #[test]
    fn test_record_duplicate_key_keeps_position() {
        let json = r#"{"a":1,"b":2,"a":3}"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(record.get("a"), Some(&Scalar::Int(3)));
    }

    #[test]
    fn test_record_cell_rendering() {
        let record = Record::new()
            .with("nombre", "Ana")
            .with("ci", 123_i64)
            .with("nit", Scalar::Null);
        assert_eq!(record.cell("nombre"), "Ana");
        assert_eq!(record.cell("ci"), "123");
        assert_eq!(record.cell("nit"), "");
        assert_eq!(record.cell("missing"), "");
    }

    #[test]
    fn test_record_serializes_in_order() {
        let record = Record::new().with("z", 1_i64).with("a", "b");
        assert_eq!(serde_json::to_string(&record).unwrap(), r#"{"z":1,"a":"b"}"#);
    }

    #[test]
    fn test_draft_defaults() {
        let draft = CustomerDraft::default();
        assert!(draft.nombre.is_empty());
        assert!(draft.email.is_empty());
        assert_eq!(draft.estado, Scalar::Int(ACTIVE_STATUS));
    }

    #[test]
    fn test_draft_wire_format() {
        let mut draft = CustomerDraft::default();
        draft.set(DraftField::Nombre, "Ana");
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["nombre"], "Ana");
        assert_eq!(value["estado"], 1);
        for key in [
            "apellidos",
            "fecha_nacimiento",
            "ci",
            "nit",
            "direccion",
            "telefono",
            "email",
        ] {
            assert_eq!(value[key], "", "{} should default to empty", key);
        }
    }

    #[test]
    fn test_draft_set_last_write_wins() {
        let mut draft = CustomerDraft::default();
        draft.set(DraftField::Ci, "1");
        draft.set(DraftField::Ci, "12");
        assert_eq!(draft.get(DraftField::Ci), "12");
    }

    #[test]
    fn test_draft_set_estado() {
        let mut draft = CustomerDraft::default();
        draft.set(DraftField::Estado, "0");
        assert_eq!(draft.estado, Scalar::Int(0));
        draft.set(DraftField::Estado, "inactive");
        assert_eq!(draft.estado, Scalar::Text("inactive".to_string()));
    }

    #[test]
    fn test_draft_validate_missing_fields() {
        let mut draft = CustomerDraft::default();
        draft.set(DraftField::Apellidos, "X");
        draft.set(DraftField::Ci, "1");
        let err = draft.validate().unwrap_err();
        assert_eq!(err.missing, vec![DraftField::Nombre]);
    }

    #[test]
    fn test_draft_validate_complete() {
        let mut draft = CustomerDraft::default();
        draft.set(DraftField::Nombre, "Ana");
        draft.set(DraftField::Apellidos, "Rios");
        draft.set(DraftField::Ci, "123");
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_draft_field_display_uses_wire_name() {
        assert_eq!(DraftField::Nombre.to_string(), "nombre");
        assert_eq!(DraftField::FechaNacimiento.to_string(), "fecha_nacimiento");
        assert_eq!(DraftField::Estado.to_string(), "estado");
    }

    #[test]
    fn test_create_response_confirmation() {
        let ok: CreateResponse = serde_json::from_str(r#"{"mensaje":"Cliente añadido"}"#).unwrap();
        assert_eq!(ok.confirmation(), Some("Cliente añadido"));

        let empty: CreateResponse = serde_json::from_str(r#"{"mensaje":""}"#).unwrap();
        assert_eq!(empty.confirmation(), None);

        let err: CreateResponse = serde_json::from_str(r#"{"error":"CI duplicado"}"#).unwrap();
        assert_eq!(err.confirmation(), None);
        assert_eq!(err.error_text(), Some("CI duplicado"));
    }
}
