// src/models/schema.rs
//
// Descripción declarativa de cada colección y el validador genérico que la
// interpreta. `validate` nunca lanza: devuelve el documento normalizado o la
// lista estructurada de errores por campo.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde_json::{Map, Number, Value};
use uuid::Uuid;
use validator::{ValidationError, ValidationErrors};

use super::collection::Collection;

/// Un documento tal como viaja en JSON y se guarda en el store.
pub type Document = Map<String, Value>;

/// Campo con el identificador opaco de cada documento.
pub const ID_FIELD: &str = "_id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text { max_len: Option<usize> },
    Number,
    Date,
    /// Identificador de un documento de otra colección.
    Reference(Collection),
}

/// Campo de un esquema. Todos los campos son obligatorios.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn text(name: &'static str, max_len: Option<usize>) -> Self {
        Self { name, kind: FieldKind::Text { max_len } }
    }

    pub const fn number(name: &'static str) -> Self {
        Self { name, kind: FieldKind::Number }
    }

    pub const fn date(name: &'static str) -> Self {
        Self { name, kind: FieldKind::Date }
    }

    pub const fn reference(name: &'static str, target: Collection) -> Self {
        Self { name, kind: FieldKind::Reference(target) }
    }
}

#[derive(Debug)]
pub struct Schema {
    pub collection: Collection,
    pub fields: &'static [FieldSpec],
    /// Campos con índice único.
    pub unique: &'static [&'static str],
}

impl Schema {
    /// Campos de referencia y la colección a la que apuntan.
    pub fn references(&self) -> impl Iterator<Item = (&'static str, Collection)> + '_ {
        self.fields.iter().filter_map(|field| match field.kind {
            FieldKind::Reference(target) => Some((field.name, target)),
            _ => None,
        })
    }
}

/// Valida `input` contra `schema` y devuelve una copia normalizada.
///
/// - todo campo del esquema es obligatorio; `null` y `""` cuentan como ausentes;
/// - campos desconocidos (y `_id`) se descartan;
/// - números aceptan también strings numéricos;
/// - fechas aceptan `YYYY-MM-DD`, RFC 3339 o milisegundos epoch y se
///   guardan como RFC 3339 UTC con milisegundos;
/// - referencias deben ser identificadores bien formados (o un documento
///   expandido con `_id`).
pub fn validate(schema: &Schema, input: &Document) -> Result<Document, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let mut output = Document::new();

    for field in schema.fields {
        let Some(raw) = input.get(field.name).filter(|value| !is_blank(value)) else {
            errors.add(field.name, required_error(field.name));
            continue;
        };

        match normalize(field, raw) {
            Ok(value) => {
                output.insert(field.name.to_string(), value);
            }
            Err(e) => errors.add(field.name, e),
        }
    }

    if errors.is_empty() {
        Ok(output)
    } else {
        Err(errors)
    }
}

/// Lee el `_id` de un documento ya persistido.
pub fn document_id(document: &Document) -> Option<Uuid> {
    document
        .get(ID_FIELD)
        .and_then(Value::as_str)
        .and_then(|raw| Uuid::parse_str(raw).ok())
}

/// Parsea el identificador recibido en la ruta.
pub fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}

// Solo `null` y `""` cuentan como ausentes; los espacios son un valor.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn normalize(field: &FieldSpec, raw: &Value) -> Result<Value, ValidationError> {
    match field.kind {
        FieldKind::Text { max_len } => {
            let text = match raw {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => return Err(type_error(field.name, "texto")),
            };
            if let Some(max) = max_len {
                if text.chars().count() > max {
                    return Err(length_error(field.name, max));
                }
            }
            Ok(Value::String(text))
        }

        FieldKind::Number => {
            let number = match raw {
                Value::Number(n) => Some(n.clone()),
                Value::String(s) => parse_number(s.trim()),
                _ => None,
            };
            number
                .map(Value::Number)
                .ok_or_else(|| type_error(field.name, "número"))
        }

        FieldKind::Date => {
            let parsed = match raw {
                Value::String(s) => parse_date(s.trim()),
                Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
                _ => None,
            };
            parsed
                .map(|date| Value::String(date.to_rfc3339_opts(SecondsFormat::Millis, true)))
                .ok_or_else(|| type_error(field.name, "fecha"))
        }

        FieldKind::Reference(target) => {
            let raw_id = match raw {
                Value::String(s) => Some(s.as_str()),
                Value::Object(expanded) => expanded.get(ID_FIELD).and_then(Value::as_str),
                _ => None,
            };
            raw_id
                .and_then(parse_id)
                .map(|id| Value::String(id.to_string()))
                .ok_or_else(|| reference_error(field.name, target))
        }
    }
}

fn parse_number(raw: &str) -> Option<Number> {
    if let Ok(integer) = raw.parse::<i64>() {
        return Some(Number::from(integer));
    }
    raw.parse::<f64>().ok().and_then(Number::from_f64)
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(date_time) = DateTime::parse_from_rfc3339(raw) {
        return Some(date_time.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

// ---
// Errores por campo
// ---

fn field_error(code: &'static str, message: String) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Owned(message));
    err
}

fn required_error(name: &str) -> ValidationError {
    field_error("required", format!("El campo `{name}` es obligatorio."))
}

fn length_error(name: &str, max: usize) -> ValidationError {
    let mut err = field_error(
        "length",
        format!("El campo `{name}` excede el máximo permitido ({max})."),
    );
    err.add_param("max".into(), &max);
    err
}

fn type_error(name: &str, expected: &str) -> ValidationError {
    field_error("type", format!("El campo `{name}` debe ser de tipo {expected}."))
}

fn reference_error(name: &str, target: Collection) -> ValidationError {
    field_error(
        "reference",
        format!("El campo `{name}` debe ser un identificador de {} válido.", target.label()),
    )
}

/// Error para una referencia bien formada que no existe en el store.
pub fn dangling_reference_error(name: &str, target: Collection, id: Uuid) -> ValidationError {
    field_error(
        "reference_not_found",
        format!("No existe {} con id {id} (campo `{name}`).", target.label()),
    )
}
