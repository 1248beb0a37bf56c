//! Schema tree shared by both notations
//!
//! Supported kinds:
//! - string: optional length range and regex pattern
//! - integer / number: optional inclusive or exclusive bounds
//! - boolean, null, any
//! - object: ordered properties plus an additional-properties policy
//! - array: a single item schema or positional (tuple) item schemas
//! - union: two or more alternatives
//!
//! Facets common to every kind (description, enumeration, default,
//! requires, optional, opaque extensions) live on `SchemaNode`.

use serde_json::{Map, Value};

use super::range::{LengthRange, NumericRange};

/// What a container accepts beyond its declared members
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Additional {
    /// Undeclared members are accepted without constraint
    Allowed,
    /// Undeclared members are rejected
    #[default]
    Forbidden,
    /// Undeclared members must match this schema
    Typed(Box<SchemaNode>),
}

impl Additional {
    pub fn describe(&self) -> &'static str {
        match self {
            Additional::Allowed => "allowed",
            Additional::Forbidden => "forbidden",
            Additional::Typed(_) => "typed",
        }
    }
}

/// Item typing of an array
#[derive(Debug, Clone, PartialEq)]
pub enum Items {
    /// Every element matches the same schema
    List(Box<SchemaNode>),
    /// Elements match positionally
    Tuple {
        positions: Vec<SchemaNode>,
        additional: Additional,
    },
}

/// String facets
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StringSchema {
    pub length: LengthRange,
    pub pattern: Option<String>,
}

/// Object facets
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectSchema {
    pub properties: Vec<PropertyDef>,
    pub additional: Additional,
}

impl ObjectSchema {
    pub fn property(&self, name: &str) -> Option<&PropertyDef> {
        self.properties.iter().find(|p| p.name == name)
    }
}

/// Array facets
#[derive(Debug, Clone, PartialEq)]
pub struct ArraySchema {
    pub items: Items,
    pub count: LengthRange,
    pub unique: bool,
}

/// The kind of a schema node and its kind-specific facets
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    String(StringSchema),
    Integer(NumericRange),
    Number(NumericRange),
    Boolean,
    Null,
    Any,
    Object(ObjectSchema),
    Array(ArraySchema),
    Union(Vec<SchemaNode>),
}

impl SchemaKind {
    /// Type name as written in both notations (`union` is Orderly only)
    pub fn type_name(&self) -> &'static str {
        match self {
            SchemaKind::String(_) => "string",
            SchemaKind::Integer(_) => "integer",
            SchemaKind::Number(_) => "number",
            SchemaKind::Boolean => "boolean",
            SchemaKind::Null => "null",
            SchemaKind::Any => "any",
            SchemaKind::Object(_) => "object",
            SchemaKind::Array(_) => "array",
            SchemaKind::Union(_) => "union",
        }
    }

    /// Kind for a bare JSON-Schema type name
    pub fn from_type_name(name: &str) -> Option<Self> {
        let kind = match name {
            "string" => SchemaKind::String(StringSchema::default()),
            "integer" => SchemaKind::Integer(NumericRange::default()),
            "number" => SchemaKind::Number(NumericRange::default()),
            "boolean" => SchemaKind::Boolean,
            "null" => SchemaKind::Null,
            "any" => SchemaKind::Any,
            "object" => SchemaKind::Object(ObjectSchema {
                properties: Vec::new(),
                additional: Additional::Allowed,
            }),
            "array" => SchemaKind::Array(ArraySchema {
                items: Items::List(Box::new(SchemaNode::any())),
                count: LengthRange::default(),
                unique: false,
            }),
            _ => return None,
        };
        Some(kind)
    }
}

/// A node in the schema tree
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    pub kind: SchemaKind,
    pub description: Option<String>,
    pub enum_values: Option<Vec<Value>>,
    pub default: Option<Value>,
    /// Sibling properties that must be present alongside this one
    pub requires: Vec<String>,
    pub optional: bool,
    /// Keywords with no typed slot, kept in source order
    pub extensions: Map<String, Value>,
}

impl SchemaNode {
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            description: None,
            enum_values: None,
            default: None,
            requires: Vec::new(),
            optional: false,
            extensions: Map::new(),
        }
    }

    pub fn string() -> Self {
        Self::new(SchemaKind::String(StringSchema::default()))
    }

    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self::new(SchemaKind::String(StringSchema {
            length: LengthRange::default(),
            pattern: Some(pattern.into()),
        }))
    }

    pub fn integer(range: NumericRange) -> Self {
        Self::new(SchemaKind::Integer(range))
    }

    pub fn number(range: NumericRange) -> Self {
        Self::new(SchemaKind::Number(range))
    }

    pub fn boolean() -> Self {
        Self::new(SchemaKind::Boolean)
    }

    pub fn null() -> Self {
        Self::new(SchemaKind::Null)
    }

    pub fn any() -> Self {
        Self::new(SchemaKind::Any)
    }

    /// Closed object, the Orderly default
    pub fn object(properties: Vec<PropertyDef>) -> Self {
        Self::new(SchemaKind::Object(ObjectSchema {
            properties,
            additional: Additional::Forbidden,
        }))
    }

    pub fn list(item: SchemaNode) -> Self {
        Self::new(SchemaKind::Array(ArraySchema {
            items: Items::List(Box::new(item)),
            count: LengthRange::default(),
            unique: false,
        }))
    }

    /// Closed tuple
    pub fn tuple(positions: Vec<SchemaNode>) -> Self {
        Self::new(SchemaKind::Array(ArraySchema {
            items: Items::Tuple {
                positions,
                additional: Additional::Forbidden,
            },
            count: LengthRange::default(),
            unique: false,
        }))
    }

    pub fn union(alternatives: Vec<SchemaNode>) -> Self {
        Self::new(SchemaKind::Union(alternatives))
    }

    /// Mark optional
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn with_enum(mut self, values: Vec<Value>) -> Self {
        self.enum_values = Some(values);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    /// Mutable string facets, if this is a string node
    pub fn string_facets_mut(&mut self) -> Option<&mut StringSchema> {
        match &mut self.kind {
            SchemaKind::String(s) => Some(s),
            _ => None,
        }
    }
}

/// A named member of an object
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDef {
    pub name: String,
    pub schema: SchemaNode,
}

impl PropertyDef {
    pub fn new(name: impl Into<String>, schema: SchemaNode) -> Self {
        Self {
            name: name.into(),
            schema,
        }
    }

    /// Whether the property must be present in an instance
    pub fn is_required(&self) -> bool {
        !self.schema.optional
    }

    pub fn default(&self) -> Option<&Value> {
        self.schema.default.as_ref()
    }
}
