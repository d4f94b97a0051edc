//! Declaration snapshot — the raw input handed over by the host compiler.
//!
//! The converter only reads these types. They mirror what an introspection
//! API exposes per declaration: kind, names, modifiers, super types, direct
//! members, attached annotations and an optional doc comment tree.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

/// One complete input snapshot.
#[derive(Debug, Default, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub packages: Vec<SourcePackage>,
    #[serde(default)]
    pub declarations: Vec<SourceDeclaration>,
}

/// Namespace-level documentation.
#[derive(Debug, Clone, Deserialize)]
pub struct SourcePackage {
    pub name: String,
    #[serde(default)]
    pub doc: Option<CommentTree>,
}

/// Declaration kind as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Class,
    Interface,
    Enum,
    AnnotationType,
    Record,
    Module,
    Package,
    #[serde(other)]
    Other,
}

impl ElementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Class => "class",
            ElementKind::Interface => "interface",
            ElementKind::Enum => "enum",
            ElementKind::AnnotationType => "annotation_type",
            ElementKind::Record => "record",
            ElementKind::Module => "module",
            ElementKind::Package => "package",
            ElementKind::Other => "other",
        }
    }

    /// Kinds the converter knows how to turn into a type declaration.
    pub fn is_supported(&self) -> bool {
        matches!(
            self,
            ElementKind::Class
                | ElementKind::Interface
                | ElementKind::Enum
                | ElementKind::AnnotationType
        )
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceDeclaration {
    pub kind: ElementKind,
    pub name: String,
    pub qualified_name: String,
    /// Enclosing namespace; derived from the qualified name when absent.
    #[serde(default)]
    pub package: Option<String>,
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default)]
    pub superclass: Option<String>,
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub type_parameters: Vec<SourceTypeParameter>,
    #[serde(default)]
    pub annotations: Vec<SourceAnnotation>,
    #[serde(default)]
    pub doc: Option<CommentTree>,
    #[serde(default)]
    pub members: Vec<SourceMember>,
}

impl SourceDeclaration {
    /// Namespace the declaration belongs to.
    ///
    /// `a.b.C` → `a.b`; a declaration in the unnamed namespace yields `""`.
    ///
    /// Without an explicit `package` the namespace is whatever precedes the
    /// simple name, so a nested type `a.Outer.Inner` lands in `a.Outer`.
    /// Hosts must send `package` for nested types.
    pub fn package_name(&self) -> String {
        if let Some(ref pkg) = self.package {
            return pkg.clone();
        }
        let suffix = format!(".{}", self.name);
        let derived = self.qualified_name.strip_suffix(&suffix).unwrap_or("");
        if looks_like_type(derived) {
            tracing::warn!(
                name = %self.qualified_name,
                package = derived,
                "no package given for what looks like a nested type"
            );
        }
        derived.to_string()
    }
}

/// Last segment starts upper-case, as type names conventionally do.
fn looks_like_type(qualified: &str) -> bool {
    qualified
        .rsplit('.')
        .next()
        .and_then(|segment| segment.chars().next())
        .map_or(false, char::is_uppercase)
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceTypeParameter {
    pub name: String,
    #[serde(default)]
    pub bounds: Vec<String>,
}

/// Direct member of a declaration.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceMember {
    Field(SourceField),
    Constructor(SourceExecutable),
    /// Annotation-type elements are reported as methods by most hosts.
    #[serde(alias = "annotation_element")]
    Method(SourceExecutable),
    EnumConstant(SourceEnumConstant),
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceField {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default)]
    pub annotations: Vec<SourceAnnotation>,
    #[serde(default)]
    pub doc: Option<CommentTree>,
    #[serde(default)]
    pub constant_value: Option<AnnotationValue>,
}

/// Constructor or method signature.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceExecutable {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default)]
    pub annotations: Vec<SourceAnnotation>,
    #[serde(default)]
    pub type_parameters: Vec<SourceTypeParameter>,
    #[serde(default)]
    pub return_type: Option<String>,
    #[serde(default)]
    pub parameters: Vec<SourceParameter>,
    #[serde(default)]
    pub thrown: Vec<String>,
    #[serde(default)]
    pub varargs: bool,
    #[serde(default)]
    pub default: bool,
    #[serde(default)]
    pub default_value: Option<AnnotationValue>,
    #[serde(default)]
    pub doc: Option<CommentTree>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub annotations: Vec<SourceAnnotation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceEnumConstant {
    pub name: String,
    #[serde(default)]
    pub annotations: Vec<SourceAnnotation>,
    #[serde(default)]
    pub doc: Option<CommentTree>,
}

// -- Annotations --------------------------------------------------------------

/// An annotation applied to a declaration, member or parameter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SourceAnnotation {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub values: BTreeMap<String, AnnotationValue>,
}

impl fmt::Display for SourceAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.type_name)?;
        if self.values.is_empty() {
            return Ok(());
        }
        f.write_str("(")?;
        for (i, (key, value)) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        f.write_str(")")
    }
}

/// Raw annotation element value.
///
/// Anything the host emits that is not one of the tagged shapes lands in
/// `Other` and is carried through verbatim.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Char(char),
    String(String),
    List(Vec<AnnotationValue>),
    EnumConstant { enclosing_type: String, name: String },
    /// Class literal.
    Type(String),
    Annotation(SourceAnnotation),
    /// Value wrapper around another value.
    Wrapped(Box<AnnotationValue>),
    #[serde(untagged)]
    Other(serde_json::Value),
}

/// Simple name of a possibly qualified, possibly generic type reference.
pub fn simple_name(type_ref: &str) -> &str {
    let base = type_ref.split('<').next().unwrap_or(type_ref);
    base.rsplit('.').next().unwrap_or(base)
}

impl fmt::Display for AnnotationValue {
    /// Constant-expression form, as it would appear in source.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotationValue::Boolean(b) => write!(f, "{}", b),
            AnnotationValue::Integer(n) => write!(f, "{}", n),
            // Debug keeps the fractional part of whole numbers: `1.0`, not `1`.
            AnnotationValue::Float(n) => write!(f, "{:?}", n),
            AnnotationValue::Char(c) => {
                f.write_str("'")?;
                write_escaped(f, *c)?;
                f.write_str("'")
            }
            AnnotationValue::String(s) => {
                f.write_str("\"")?;
                for c in s.chars() {
                    write_escaped(f, c)?;
                }
                f.write_str("\"")
            }
            AnnotationValue::List(items) => {
                f.write_str("{")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("}")
            }
            AnnotationValue::EnumConstant {
                enclosing_type,
                name,
            } => write!(f, "{}.{}", enclosing_type, name),
            AnnotationValue::Type(t) => write!(f, "{}.class", t),
            AnnotationValue::Annotation(a) => write!(f, "{}", a),
            AnnotationValue::Wrapped(inner) => write!(f, "{}", inner),
            AnnotationValue::Other(v) => write!(f, "{}", v),
        }
    }
}

/// Literal escapes: printable ASCII as is, everything else as `\uXXXX`
/// per UTF-16 unit.
fn write_escaped(f: &mut fmt::Formatter<'_>, c: char) -> fmt::Result {
    match c {
        '\u{8}' => f.write_str("\\b"),
        '\t' => f.write_str("\\t"),
        '\n' => f.write_str("\\n"),
        '\u{c}' => f.write_str("\\f"),
        '\r' => f.write_str("\\r"),
        '"' => f.write_str("\\\""),
        '\'' => f.write_str("\\'"),
        '\\' => f.write_str("\\\\"),
        ' '..='~' => write!(f, "{}", c),
        _ => {
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                write!(f, "\\u{:04x}", unit)?;
            }
            Ok(())
        }
    }
}

// -- Comment trees ------------------------------------------------------------

/// Parsed documentation comment: body nodes followed by block tags.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CommentTree {
    #[serde(default)]
    pub body: Vec<DocNode>,
    #[serde(default)]
    pub block_tags: Vec<BlockTag>,
}

/// Inline content node.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DocNode {
    Text { text: String },
    /// Raw HTML element or entity, e.g. `<b>` or `&amp;`.
    Markup { text: String },
    /// `{@link ref label}` / `{@linkplain ref label}`.
    Link {
        reference: String,
        #[serde(default)]
        label: Vec<DocNode>,
    },
    /// `{@literal ...}`
    Literal { body: String },
    /// `{@code ...}`
    Code { body: String },
    /// Any other inline tag, e.g. `{@inheritDoc}` or `{@value X}`.
    InlineTag {
        name: String,
        #[serde(default)]
        text: String,
    },
}

impl fmt::Display for DocNode {
    /// Textual form of the node as it appears in the comment.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocNode::Text { text } | DocNode::Markup { text } => f.write_str(text),
            DocNode::Link { reference, label } => {
                write!(f, "{{@link {}", reference)?;
                for node in label {
                    write!(f, " {}", node)?;
                }
                f.write_str("}")
            }
            DocNode::Literal { body } => write!(f, "{{@literal {}}}", body),
            DocNode::Code { body } => write!(f, "{{@code {}}}", body),
            DocNode::InlineTag { name, text } if text.is_empty() => write!(f, "{{@{}}}", name),
            DocNode::InlineTag { name, text } => write!(f, "{{@{} {}}}", name, text),
        }
    }
}

/// Block tag such as `@param`, `@return` or `@see`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BlockTag {
    /// Tag name without the leading `@`.
    pub kind: String,
    /// Parameter or serial-field name.
    #[serde(default)]
    pub name: Option<String>,
    /// Thrown type for `@throws` / `@exception`.
    #[serde(default)]
    pub exception: Option<String>,
    /// Reference part for `@see`, `@uses`, `@provides`, `@serialField`, `@spec`.
    #[serde(default)]
    pub reference: Vec<DocNode>,
    #[serde(default)]
    pub body: Vec<DocNode>,
    /// The tag exactly as written, when the host supplies it.
    #[serde(default)]
    pub text: Option<String>,
}

impl BlockTag {
    /// Raw textual form of the whole tag.
    pub fn raw_text(&self) -> String {
        if let Some(ref text) = self.text {
            return text.clone();
        }
        let mut out = format!("@{}", self.kind);
        for part in [&self.name, &self.exception].into_iter().flatten() {
            out.push(' ');
            out.push_str(part);
        }
        let rest: String = self
            .reference
            .iter()
            .chain(self.body.iter())
            .map(|n| n.to_string())
            .collect();
        if !rest.trim().is_empty() {
            out.push(' ');
            out.push_str(rest.trim());
        }
        out
    }
}
