//! The SEP-001 schema, as data, and a validator over it.
//!
//! The schema is the draft-07 SEP-001 schema reduced to what it actually
//! constrains: object shapes, primitive member types, required members and
//! whether extra members are allowed. Validation collects every violation in
//! schema order instead of stopping at the first.

use std::fmt;

use serde_json::{Map, Value};

use crate::error::ValidationError;

/// The type a member must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Number,
    Object(&'static ObjectSchema),
}

impl FieldType {
    fn name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Object(_) => "object",
        }
    }
}

/// One member of an object schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub ty: FieldType,
    pub required: bool,
}

const fn required(name: &'static str, ty: FieldType) -> Field {
    Field {
        name,
        ty,
        required: true,
    }
}

const fn optional(name: &'static str, ty: FieldType) -> Field {
    Field {
        name,
        ty,
        required: false,
    }
}

/// Shape of a JSON object.
#[derive(Debug, PartialEq, Eq)]
pub struct ObjectSchema {
    pub name: &'static str,
    pub fields: &'static [Field],
    pub additional_properties: bool,
}

static JWK_FIELDS: [Field; 6] = [
    required("kty", FieldType::String),
    required("use", FieldType::String),
    required("alg", FieldType::String),
    required("crv", FieldType::String),
    required("x", FieldType::String),
    required("y", FieldType::String),
];

/// JSON Web Key.
pub static JWK_SCHEMA: ObjectSchema = ObjectSchema {
    name: "JWK",
    fields: &JWK_FIELDS,
    additional_properties: true,
};

static HEADER_FIELDS: [Field; 3] = [
    required("typ", FieldType::String),
    required("alg", FieldType::String),
    required("jwk", FieldType::Object(&JWK_SCHEMA)),
];

/// SEP-001 header.
pub static HEADER_SCHEMA: ObjectSchema = ObjectSchema {
    name: "Header",
    fields: &HEADER_FIELDS,
    additional_properties: false,
};

static STRUCTURAL_FIELDS: [Field; 2] = [
    required("cid", FieldType::String),
    optional("path", FieldType::String),
];

/// Structural claim.
pub static STRUCTURAL_SCHEMA: ObjectSchema = ObjectSchema {
    name: "Structural",
    fields: &STRUCTURAL_FIELDS,
    additional_properties: false,
};

static DESCRIPTIVE_FIELDS: [Field; 2] = [
    required("title", FieldType::String),
    required("description", FieldType::String),
];

/// Descriptive claim.
pub static DESCRIPTIVE_SCHEMA: ObjectSchema = ObjectSchema {
    name: "Descriptive",
    fields: &DESCRIPTIVE_FIELDS,
    additional_properties: true,
};

static TECHNICAL_FIELDS: [Field; 4] = [
    optional("size", FieldType::Number),
    optional("width", FieldType::Number),
    optional("height", FieldType::Number),
    optional("length", FieldType::Number),
];

/// Technical claim.
pub static TECHNICAL_SCHEMA: ObjectSchema = ObjectSchema {
    name: "Technical",
    fields: &TECHNICAL_FIELDS,
    additional_properties: true,
};

static PAYLOAD_FIELDS: [Field; 3] = [
    required("s", FieldType::Object(&STRUCTURAL_SCHEMA)),
    required("d", FieldType::Object(&DESCRIPTIVE_SCHEMA)),
    required("t", FieldType::Object(&TECHNICAL_SCHEMA)),
];

/// SEP-001 payload.
pub static PAYLOAD_SCHEMA: ObjectSchema = ObjectSchema {
    name: "Payload",
    fields: &PAYLOAD_FIELDS,
    additional_properties: false,
};

static SEP001_FIELDS: [Field; 2] = [
    required("header", FieldType::Object(&HEADER_SCHEMA)),
    required("payload", FieldType::Object(&PAYLOAD_SCHEMA)),
];

/// The complete SEP-001 document.
pub static SEP001_SCHEMA: ObjectSchema = ObjectSchema {
    name: "SEP-001",
    fields: &SEP001_FIELDS,
    additional_properties: true,
};

/// A single schema failure: where, and what.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// JSON pointer to the offending value; empty for the document root.
    pub path: String,
    pub message: String,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "document {}", self.message)
        } else {
            write!(f, "{} {}", self.path, self.message)
        }
    }
}

/// Validates documents against a fixed object schema.
#[derive(Debug, Clone, Copy)]
pub struct SchemaValidator {
    schema: &'static ObjectSchema,
}

impl SchemaValidator {
    pub const fn new(schema: &'static ObjectSchema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &'static ObjectSchema {
        self.schema
    }

    /// Every violation in `document`, in schema order.
    pub fn violations(&self, document: &Value) -> Vec<SchemaViolation> {
        let mut violations = Vec::new();
        check_object(self.schema, document, "", &mut violations);
        violations
    }

    pub fn is_valid(&self, document: &Value) -> bool {
        self.violations(document).is_empty()
    }

    /// Validate, returning the violations as an error.
    pub fn validate(&self, document: &Value) -> Result<(), ValidationError> {
        let violations = self.violations(document);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::Schema(violations))
        }
    }
}

impl Default for SchemaValidator {
    fn default() -> Self {
        Self::new(&SEP001_SCHEMA)
    }
}

fn check_object(
    schema: &ObjectSchema,
    value: &Value,
    path: &str,
    violations: &mut Vec<SchemaViolation>,
) {
    let Some(object) = value.as_object() else {
        violations.push(violation(path, "must be object".into()));
        return;
    };

    for field in schema.fields {
        match object.get(field.name) {
            Some(member) => {
                let member_path = format!("{path}/{}", field.name);
                check_field(field.ty, member, &member_path, violations);
            }
            None if field.required => violations.push(violation(
                path,
                format!("must have required property '{}'", field.name),
            )),
            None => {}
        }
    }

    if !schema.additional_properties {
        check_additional(schema, object, path, violations);
    }
}

fn check_field(ty: FieldType, value: &Value, path: &str, violations: &mut Vec<SchemaViolation>) {
    let matches = match ty {
        FieldType::String => value.is_string(),
        FieldType::Number => value.is_number(),
        FieldType::Object(schema) => return check_object(schema, value, path, violations),
    };
    if !matches {
        violations.push(violation(path, format!("must be {}", ty.name())));
    }
}

fn check_additional(
    schema: &ObjectSchema,
    object: &Map<String, Value>,
    path: &str,
    violations: &mut Vec<SchemaViolation>,
) {
    for key in object.keys() {
        if !schema.fields.iter().any(|f| f.name == key) {
            violations.push(violation(
                path,
                format!("must NOT have additional property '{key}'"),
            ));
        }
    }
}

fn violation(path: &str, message: String) -> SchemaViolation {
    SchemaViolation {
        path: path.to_owned(),
        message,
    }
}
