//! Documentation model — what the browser consumes.
//!
//! Every type here serializes to the JSON payload embedded in the generated
//! page. Field order is the serialization order.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Root of the model: namespace buckets plus the flat search index.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentationModel {
    /// In first-discovery order.
    #[serde(default)]
    pub packages: Vec<PackageNode>,
    /// Only valid after `PackageTree::build_search_index`.
    #[serde(default)]
    pub search_index: Vec<SearchIndexEntry>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageNode {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub javadoc: Option<DocComment>,
    /// In insertion order, never sorted.
    #[serde(default)]
    pub types: Vec<TypeDeclaration>,
}

impl PackageNode {
    pub fn new(name: impl Into<String>) -> Self {
        PackageNode {
            name: name.into(),
            ..Default::default()
        }
    }
}

// -- Type declarations --------------------------------------------------------

/// Kind tag written into the `kind` field of every type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Annotation,
}

impl TypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Interface => "interface",
            TypeKind::Enum => "enum",
            TypeKind::Annotation => "annotation",
        }
    }
}

/// A converted type. The variant is the kind; it cannot drift after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TypeDeclaration {
    Class(ClassDecl),
    Interface(InterfaceDecl),
    Enum(EnumDecl),
    Annotation(AnnotationDecl),
}

impl TypeDeclaration {
    pub fn kind(&self) -> TypeKind {
        match self {
            TypeDeclaration::Class(_) => TypeKind::Class,
            TypeDeclaration::Interface(_) => TypeKind::Interface,
            TypeDeclaration::Enum(_) => TypeKind::Enum,
            TypeDeclaration::Annotation(_) => TypeKind::Annotation,
        }
    }

    /// Attributes shared by every kind.
    pub fn header(&self) -> &TypeHeader {
        match self {
            TypeDeclaration::Class(c) => &c.header,
            TypeDeclaration::Interface(i) => &i.header,
            TypeDeclaration::Enum(e) => &e.header,
            TypeDeclaration::Annotation(a) => &a.header,
        }
    }

    pub fn name(&self) -> &str {
        &self.header().name
    }

    pub fn qualified_name(&self) -> &str {
        &self.header().qualified_name
    }
}

/// Shared attributes of all type declarations.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeHeader {
    pub name: String,
    pub qualified_name: String,
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub javadoc: Option<DocComment>,
    #[serde(default)]
    pub annotations: Vec<AnnotationUsage>,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameter>,
    /// Reserved; nested types are not populated yet.
    #[serde(default)]
    pub inner_types: Vec<TypeDeclaration>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDecl {
    #[serde(flatten)]
    pub header: TypeHeader,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub super_class: Option<String>,
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub constructors: Vec<Constructor>,
    #[serde(default)]
    pub methods: Vec<Method>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceDecl {
    #[serde(flatten)]
    pub header: TypeHeader,
    #[serde(default)]
    pub super_interfaces: Vec<String>,
    /// Constants only.
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub methods: Vec<Method>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumDecl {
    #[serde(flatten)]
    pub header: TypeHeader,
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub constants: Vec<Enumerant>,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub constructors: Vec<Constructor>,
    #[serde(default)]
    pub methods: Vec<Method>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationDecl {
    #[serde(flatten)]
    pub header: TypeHeader,
    #[serde(default)]
    pub elements: Vec<AnnotationElement>,
}

// -- Members ------------------------------------------------------------------

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub javadoc: Option<DocComment>,
    #[serde(default)]
    pub annotations: Vec<AnnotationUsage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constant_value: Option<String>,
}

/// Constructor; `name` is the enclosing type's simple name.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constructor {
    pub name: String,
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub javadoc: Option<DocComment>,
    #[serde(default)]
    pub annotations: Vec<AnnotationUsage>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub exceptions: Vec<String>,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameter>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Method {
    pub name: String,
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub javadoc: Option<DocComment>,
    #[serde(default)]
    pub annotations: Vec<AnnotationUsage>,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameter>,
    pub return_type: String,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub exceptions: Vec<String>,
    #[serde(default)]
    pub is_default: bool,
}

impl Method {
    /// `name(T1, T2)`; `name()` when there are no parameters.
    pub fn signature(&self) -> String {
        let types: Vec<&str> = self
            .parameters
            .iter()
            .map(|p| p.type_name.as_str())
            .collect();
        format!("{}({})", self.name, types.join(", "))
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enumerant {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub javadoc: Option<DocComment>,
    #[serde(default)]
    pub annotations: Vec<AnnotationUsage>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationElement {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub javadoc: Option<DocComment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub annotations: Vec<AnnotationUsage>,
    /// Only ever true for the last parameter of a variadic signature.
    #[serde(default)]
    pub is_var_args: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeParameter {
    pub name: String,
    #[serde(default)]
    pub bounds: Vec<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationUsage {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub values: BTreeMap<String, Value>,
}

// -- Doc comments -------------------------------------------------------------

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocComment {
    /// Markup-preserving text, trimmed.
    pub description: String,
    #[serde(default)]
    pub tags: Vec<DocTag>,
}

/// Block tag; only the fields meaningful for `kind` are set.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocTag {
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl DocTag {
    pub fn new(kind: impl Into<String>) -> Self {
        DocTag {
            kind: kind.into(),
            ..Default::default()
        }
    }
}

// -- Search index -------------------------------------------------------------

/// One flat, denormalized search record.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchIndexEntry {
    /// Type kind, `"method"` or `"field"`.
    pub category: String,
    pub name: String,
    pub qualified_name: String,
    pub package_name: String,
    /// Enclosing type's simple name (members only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    /// Methods only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    /// Method return type, or field / element type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method(name: &str, params: &[&str]) -> Method {
        Method {
            name: name.to_string(),
            return_type: "void".to_string(),
            parameters: params
                .iter()
                .enumerate()
                .map(|(i, t)| Parameter {
                    name: format!("arg{}", i),
                    type_name: t.to_string(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn signature_with_parameters() {
        assert_eq!(method("foo", &["String", "int"]).signature(), "foo(String, int)");
    }

    #[test]
    fn signature_without_parameters() {
        assert_eq!(method("bar", &[]).signature(), "bar()");
    }

    #[test]
    fn kind_is_written_first() {
        let decl = TypeDeclaration::Enum(EnumDecl {
            header: TypeHeader {
                name: "Status".into(),
                qualified_name: "a.Status".into(),
                ..Default::default()
            },
            ..Default::default()
        });
        let json = serde_json::to_string(&decl).unwrap();
        assert!(json.starts_with(r#"{"kind":"enum","name":"Status","qualifiedName":"a.Status""#));
        assert_eq!(decl.kind(), TypeKind::Enum);
    }

    #[test]
    fn absent_options_are_omitted() {
        let tag = DocTag {
            description: Some("the id".into()),
            name: Some("id".into()),
            ..DocTag::new("param")
        };
        let json = serde_json::to_string(&tag).unwrap();
        assert_eq!(json, r#"{"kind":"param","name":"id","description":"the id"}"#);
    }

    #[test]
    fn flags_use_browser_key_names() {
        let param = Parameter {
            name: "values".into(),
            type_name: "int...".into(),
            is_var_args: true,
            ..Default::default()
        };
        let json = serde_json::to_value(&param).unwrap();
        assert_eq!(json["isVarArgs"], serde_json::json!(true));
        assert_eq!(json["type"], serde_json::json!("int..."));
    }
}
