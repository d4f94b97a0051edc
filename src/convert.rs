//! Declaration converter — snapshot declarations into model types.
//!
//! Dispatches on the declaration kind, fills the attributes every type
//! shares, then the members the kind carries. Doc comments go through
//! [`crate::comment`], annotation values through [`crate::normalize`].

use crate::comment;
use crate::error::ConvertError;
use crate::model::*;
use crate::normalize::normalize;
use crate::source::*;

/// Bound every type parameter has implicitly; listing it says nothing.
const UNIVERSAL_BOUNDS: &[&str] = &["java.lang.Object", "Object"];

/// Convert one declaration into the matching [`TypeDeclaration`] variant.
pub fn convert(decl: &SourceDeclaration) -> Result<TypeDeclaration, ConvertError> {
    let converted = match decl.kind {
        ElementKind::Class => TypeDeclaration::Class(convert_class(decl)),
        ElementKind::Interface => TypeDeclaration::Interface(convert_interface(decl)),
        ElementKind::Enum => TypeDeclaration::Enum(convert_enum(decl)),
        ElementKind::AnnotationType => TypeDeclaration::Annotation(convert_annotation(decl)),
        kind => {
            return Err(ConvertError::UnsupportedKind {
                kind,
                name: decl.qualified_name.clone(),
            })
        }
    };
    tracing::debug!(
        kind = converted.kind().as_str(),
        name = %decl.qualified_name,
        "converted declaration"
    );
    Ok(converted)
}

// -- Per-kind conversion ------------------------------------------------------

fn convert_class(decl: &SourceDeclaration) -> ClassDecl {
    let members = Members::collect(decl);
    ClassDecl {
        header: convert_header(decl),
        super_class: decl.superclass.clone(),
        interfaces: decl.interfaces.clone(),
        fields: members.fields,
        constructors: members.constructors,
        methods: members.methods,
    }
}

fn convert_interface(decl: &SourceDeclaration) -> InterfaceDecl {
    let members = Members::collect(decl);
    InterfaceDecl {
        header: convert_header(decl),
        super_interfaces: decl.interfaces.clone(),
        fields: members.fields,
        methods: members.methods,
    }
}

fn convert_enum(decl: &SourceDeclaration) -> EnumDecl {
    let members = Members::collect(decl);
    EnumDecl {
        header: convert_header(decl),
        interfaces: decl.interfaces.clone(),
        constants: members.constants,
        fields: members.fields,
        constructors: members.constructors,
        methods: members.methods,
    }
}

fn convert_annotation(decl: &SourceDeclaration) -> AnnotationDecl {
    let elements = decl
        .members
        .iter()
        .filter_map(|member| match member {
            SourceMember::Method(m) => Some(convert_element(m)),
            _ => None,
        })
        .collect();
    AnnotationDecl {
        header: convert_header(decl),
        elements,
    }
}

/// Attributes shared by every kind.
fn convert_header(decl: &SourceDeclaration) -> TypeHeader {
    TypeHeader {
        name: decl.name.clone(),
        qualified_name: decl.qualified_name.clone(),
        modifiers: convert_modifiers(&decl.modifiers),
        javadoc: comment::parse(decl.doc.as_ref()),
        annotations: convert_annotations(&decl.annotations),
        type_parameters: convert_type_parameters(&decl.type_parameters),
        inner_types: Vec::new(),
    }
}

// -- Members ------------------------------------------------------------------

/// Direct members of a declaration, split by kind.
#[derive(Default)]
struct Members {
    fields: Vec<Field>,
    constructors: Vec<Constructor>,
    methods: Vec<Method>,
    constants: Vec<Enumerant>,
}

impl Members {
    fn collect(decl: &SourceDeclaration) -> Self {
        let mut members = Members::default();
        for member in &decl.members {
            match member {
                SourceMember::Field(f) => members.fields.push(convert_field(f)),
                SourceMember::Constructor(c) => {
                    members.constructors.push(convert_constructor(c, &decl.name))
                }
                SourceMember::Method(m) => members.methods.push(convert_method(m)),
                SourceMember::EnumConstant(e) => members.constants.push(convert_enumerant(e)),
            }
        }
        members
    }
}

fn convert_field(field: &SourceField) -> Field {
    Field {
        name: field.name.clone(),
        type_name: field.type_name.clone(),
        modifiers: convert_modifiers(&field.modifiers),
        javadoc: comment::parse(field.doc.as_ref()),
        annotations: convert_annotations(&field.annotations),
        constant_value: field.constant_value.as_ref().map(|v| v.to_string()),
    }
}

fn convert_constructor(ctor: &SourceExecutable, type_name: &str) -> Constructor {
    Constructor {
        name: type_name.to_string(),
        modifiers: convert_modifiers(&ctor.modifiers),
        javadoc: comment::parse(ctor.doc.as_ref()),
        annotations: convert_annotations(&ctor.annotations),
        parameters: convert_parameters(ctor),
        exceptions: ctor.thrown.clone(),
        type_parameters: convert_type_parameters(&ctor.type_parameters),
    }
}

fn convert_method(method: &SourceExecutable) -> Method {
    Method {
        name: method.name.clone(),
        modifiers: convert_modifiers(&method.modifiers),
        javadoc: comment::parse(method.doc.as_ref()),
        annotations: convert_annotations(&method.annotations),
        type_parameters: convert_type_parameters(&method.type_parameters),
        return_type: return_type(method),
        parameters: convert_parameters(method),
        exceptions: method.thrown.clone(),
        is_default: method.default,
    }
}

fn convert_enumerant(constant: &SourceEnumConstant) -> Enumerant {
    Enumerant {
        name: constant.name.clone(),
        javadoc: comment::parse(constant.doc.as_ref()),
        annotations: convert_annotations(&constant.annotations),
    }
}

fn convert_element(element: &SourceExecutable) -> AnnotationElement {
    AnnotationElement {
        name: element.name.clone(),
        type_name: return_type(element),
        javadoc: comment::parse(element.doc.as_ref()),
        default_value: element.default_value.as_ref().map(normalize),
    }
}

fn return_type(method: &SourceExecutable) -> String {
    method
        .return_type
        .clone()
        .unwrap_or_else(|| "void".to_string())
}

/// Only the last parameter of a variadic signature is variadic.
fn convert_parameters(exec: &SourceExecutable) -> Vec<Parameter> {
    let last = exec.parameters.len().saturating_sub(1);
    exec.parameters
        .iter()
        .enumerate()
        .map(|(i, p)| Parameter {
            name: p.name.clone(),
            type_name: p.type_name.clone(),
            annotations: convert_annotations(&p.annotations),
            is_var_args: exec.varargs && i == last,
        })
        .collect()
}

// -- Shared pieces ------------------------------------------------------------

fn convert_modifiers(modifiers: &[String]) -> Vec<String> {
    modifiers.iter().map(|m| m.to_lowercase()).collect()
}

fn convert_annotations(annotations: &[SourceAnnotation]) -> Vec<AnnotationUsage> {
    annotations
        .iter()
        .map(|a| AnnotationUsage {
            type_name: a.type_name.clone(),
            values: a
                .values
                .iter()
                .map(|(name, value)| (name.clone(), normalize(value)))
                .collect(),
        })
        .collect()
}

fn convert_type_parameters(params: &[SourceTypeParameter]) -> Vec<TypeParameter> {
    params
        .iter()
        .map(|p| TypeParameter {
            name: p.name.clone(),
            bounds: p
                .bounds
                .iter()
                .filter(|b| !UNIVERSAL_BOUNDS.contains(&b.as_str()))
                .cloned()
                .collect(),
        })
        .collect()
}
