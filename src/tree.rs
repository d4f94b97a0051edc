//! Package tree — groups converted types by namespace and builds the
//! search index.
//!
//! Usage is two-pass: `add_type` every declaration first, then call
//! `build_search_index` once. The index is a snapshot; later insertions are
//! not reflected until it is rebuilt.

use crate::model::*;

#[derive(Debug, Default)]
pub struct PackageTree {
    model: DocumentationModel,
}

impl PackageTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_model(model: DocumentationModel) -> Self {
        PackageTree { model }
    }

    pub fn model(&self) -> &DocumentationModel {
        &self.model
    }

    pub fn into_model(self) -> DocumentationModel {
        self.model
    }

    pub fn packages(&self) -> &[PackageNode] {
        &self.model.packages
    }

    /// Append a pre-built bucket as is.
    pub fn add_package(&mut self, package: PackageNode) {
        self.model.packages.push(package);
    }

    /// Append `decl` to the bucket named `package`, creating the bucket if needed.
    pub fn add_type(&mut self, package: &str, decl: TypeDeclaration) {
        self.find_or_create_package(package).types.push(decl);
    }

    /// Attach namespace-level documentation to an existing bucket.
    ///
    /// Returns `false`, leaving the tree untouched, when no type has been
    /// added under `package`.
    pub fn set_package_doc(&mut self, package: &str, doc: DocComment) -> bool {
        match self.model.packages.iter_mut().find(|p| p.name == package) {
            Some(node) => {
                node.javadoc = Some(doc);
                true
            }
            None => false,
        }
    }

    /// Linear lookup by exact name; new buckets go to the end.
    fn find_or_create_package(&mut self, name: &str) -> &mut PackageNode {
        let packages = &mut self.model.packages;
        let pos = match packages.iter().position(|p| p.name == name) {
            Some(pos) => pos,
            None => {
                tracing::debug!(package = name, "new package");
                packages.push(PackageNode::new(name));
                packages.len() - 1
            }
        };
        &mut packages[pos]
    }

    pub fn is_empty(&self) -> bool {
        self.model.packages.is_empty()
    }

    pub fn package_count(&self) -> usize {
        self.model.packages.len()
    }

    pub fn type_count(&self) -> usize {
        self.model.packages.iter().map(|p| p.types.len()).sum()
    }

    /// Display title derived from the shortest (root-most) package name.
    ///
    /// Ties go to the lexicographically smallest name. The unnamed package
    /// is the shortest of all and yields the generic title.
    pub fn project_name(&self) -> String {
        self.model
            .packages
            .iter()
            .map(|p| p.name.as_str())
            .min_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)))
            .filter(|root| !root.is_empty())
            .map(|root| format!("{} Documentation", root))
            .unwrap_or_else(|| "API Documentation".to_string())
    }

    /// Rebuild the flat search index from scratch.
    ///
    /// One entry per type, then per member: methods and fields for classes
    /// and enums, methods for interfaces, elements (as fields) for
    /// annotations. Constructors and enum constants are not indexed.
    pub fn build_search_index(&mut self) {
        let mut index = Vec::new();

        for package in &self.model.packages {
            let pkg = package.name.as_str();
            for decl in &package.types {
                index.push(type_entry(decl, pkg));
                match decl {
                    TypeDeclaration::Class(c) => {
                        index.extend(c.methods.iter().map(|m| method_entry(m, decl, pkg)));
                        index.extend(c.fields.iter().map(|f| field_entry(f, decl, pkg)));
                    }
                    TypeDeclaration::Interface(i) => {
                        index.extend(i.methods.iter().map(|m| method_entry(m, decl, pkg)));
                    }
                    TypeDeclaration::Enum(e) => {
                        index.extend(e.methods.iter().map(|m| method_entry(m, decl, pkg)));
                        index.extend(e.fields.iter().map(|f| field_entry(f, decl, pkg)));
                    }
                    TypeDeclaration::Annotation(a) => {
                        index.extend(a.elements.iter().map(|el| element_entry(el, decl, pkg)));
                    }
                }
            }
        }

        tracing::info!(
            packages = self.model.packages.len(),
            entries = index.len(),
            "search index built"
        );
        self.model.search_index = index;
    }
}

// -- Index entries ------------------------------------------------------------

fn type_entry(decl: &TypeDeclaration, package: &str) -> SearchIndexEntry {
    SearchIndexEntry {
        category: decl.kind().as_str().to_string(),
        name: decl.name().to_string(),
        qualified_name: decl.qualified_name().to_string(),
        package_name: package.to_string(),
        ..Default::default()
    }
}

fn member_entry(
    category: &str,
    name: &str,
    parent: &TypeDeclaration,
    package: &str,
) -> SearchIndexEntry {
    SearchIndexEntry {
        category: category.to_string(),
        name: name.to_string(),
        qualified_name: format!("{}.{}", parent.qualified_name(), name),
        package_name: package.to_string(),
        type_name: Some(parent.name().to_string()),
        ..Default::default()
    }
}

fn method_entry(method: &Method, parent: &TypeDeclaration, package: &str) -> SearchIndexEntry {
    SearchIndexEntry {
        signature: Some(method.signature()),
        return_type: Some(method.return_type.clone()),
        ..member_entry("method", &method.name, parent, package)
    }
}

fn field_entry(field: &Field, parent: &TypeDeclaration, package: &str) -> SearchIndexEntry {
    SearchIndexEntry {
        return_type: Some(field.type_name.clone()),
        ..member_entry("field", &field.name, parent, package)
    }
}

/// Annotation elements are searched as fields.
fn element_entry(
    element: &AnnotationElement,
    parent: &TypeDeclaration,
    package: &str,
) -> SearchIndexEntry {
    SearchIndexEntry {
        return_type: Some(element.type_name.clone()),
        ..member_entry("field", &element.name, parent, package)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(name: &str, qualified: &str) -> TypeHeader {
        TypeHeader {
            name: name.to_string(),
            qualified_name: qualified.to_string(),
            ..Default::default()
        }
    }

    fn class(name: &str, qualified: &str) -> TypeDeclaration {
        TypeDeclaration::Class(ClassDecl {
            header: header(name, qualified),
            ..Default::default()
        })
    }

    fn field(name: &str, ty: &str) -> Field {
        Field {
            name: name.to_string(),
            type_name: ty.to_string(),
            ..Default::default()
        }
    }

    fn method(name: &str, ret: &str, params: &[&str]) -> Method {
        Method {
            name: name.to_string(),
            return_type: ret.to_string(),
            parameters: params
                .iter()
                .map(|t| Parameter {
                    name: "p".to_string(),
                    type_name: t.to_string(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    /// One of each kind with members that are and are not indexed.
    fn sample_tree() -> PackageTree {
        let mut tree = PackageTree::new();
        tree.add_type(
            "a.b",
            TypeDeclaration::Class(ClassDecl {
                header: header("C", "a.b.C"),
                fields: vec![field("count", "int"), field("name", "String")],
                constructors: vec![Constructor {
                    name: "C".into(),
                    ..Default::default()
                }],
                methods: vec![method("foo", "void", &["String", "int"])],
                ..Default::default()
            }),
        );
        tree.add_type(
            "a.b",
            TypeDeclaration::Interface(InterfaceDecl {
                header: header("I", "a.b.I"),
                fields: vec![field("CONSTANT", "int")],
                methods: vec![method("bar", "long", &[]), method("baz", "I", &["I"])],
                ..Default::default()
            }),
        );
        tree.add_type(
            "a",
            TypeDeclaration::Enum(EnumDecl {
                header: header("E", "a.E"),
                constants: vec![Enumerant {
                    name: "ONE".into(),
                    ..Default::default()
                }],
                fields: vec![field("level", "int")],
                constructors: vec![Constructor {
                    name: "E".into(),
                    ..Default::default()
                }],
                methods: vec![method("getLevel", "int", &[])],
                ..Default::default()
            }),
        );
        tree.add_type(
            "a",
            TypeDeclaration::Annotation(AnnotationDecl {
                header: header("A", "a.A"),
                elements: vec![AnnotationElement {
                    name: "value".into(),
                    type_name: "String".into(),
                    ..Default::default()
                }],
            }),
        );
        tree
    }

    #[test]
    fn grouping_preserves_insertion_order() {
        let mut tree = PackageTree::new();
        tree.add_type("a.b", class("T1", "a.b.T1"));
        tree.add_type("a.b", class("T2", "a.b.T2"));
        assert_eq!(tree.package_count(), 1);
        assert_eq!(tree.packages()[0].name, "a.b");
        let names: Vec<_> = tree.packages()[0].types.iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["T1", "T2"]);

        tree.add_type("a.c", class("T3", "a.c.T3"));
        tree.add_type("a.b", class("T4", "a.b.T4"));
        assert_eq!(tree.package_count(), 2);
        assert_eq!(tree.packages()[1].name, "a.c");
        assert_eq!(tree.packages()[0].types.len(), 3);
        assert_eq!(tree.type_count(), 4);
    }

    fn doc(text: &str) -> DocComment {
        DocComment {
            description: text.into(),
            tags: vec![],
        }
    }

    #[test]
    fn package_doc_attaches_to_existing_bucket() {
        let mut tree = PackageTree::new();
        tree.add_type("a.b", class("T1", "a.b.T1"));
        assert!(tree.set_package_doc("a.b", doc("Core types.")));
        assert_eq!(tree.package_count(), 1);
        assert_eq!(
            tree.packages()[0].javadoc.as_ref().unwrap().description,
            "Core types."
        );
    }

    #[test]
    fn package_doc_without_types_adds_no_bucket() {
        let mut tree = PackageTree::new();
        assert!(!tree.set_package_doc("a.empty", doc("Nothing here.")));
        assert!(tree.is_empty());

        tree.add_type("a.b", class("T1", "a.b.T1"));
        assert!(!tree.set_package_doc("a.empty", doc("Nothing here.")));
        assert_eq!(tree.package_count(), 1);
        assert_eq!(tree.packages()[0].javadoc, None);
    }

    #[test]
    fn index_counts() {
        let mut tree = sample_tree();
        tree.build_search_index();
        let index = &tree.model().search_index;
        // 4 types, 3 fields (class 2 + enum 1), 4 methods, 1 element
        assert_eq!(index.len(), 4 + 3 + 4 + 1);
        let fields = index.iter().filter(|e| e.category == "field").count();
        let methods = index.iter().filter(|e| e.category == "method").count();
        assert_eq!(fields, 4);
        assert_eq!(methods, 4);
        // Interface constants, constructors and enum constants are not indexed.
        assert!(!index.iter().any(|e| e.name == "CONSTANT" || e.name == "ONE"));
        assert_eq!(index.iter().filter(|e| e.name == "C").count(), 1);
    }

    #[test]
    fn index_order_is_type_then_methods_then_fields() {
        let mut tree = sample_tree();
        tree.build_search_index();
        let names: Vec<_> = tree
            .model()
            .search_index
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["C", "foo", "count", "name", "I", "bar", "baz", "E", "getLevel", "level", "A", "value"]
        );
    }

    #[test]
    fn entry_contents() {
        let mut tree = sample_tree();
        tree.build_search_index();
        let index = &tree.model().search_index;

        let ty = &index[0];
        assert_eq!(ty.category, "class");
        assert_eq!(ty.qualified_name, "a.b.C");
        assert_eq!(ty.package_name, "a.b");
        assert_eq!(ty.type_name, None);
        assert_eq!(ty.signature, None);

        let count = index.iter().find(|e| e.name == "count").unwrap();
        assert_eq!(count.qualified_name, "a.b.C.count");
        assert_eq!(count.type_name.as_deref(), Some("C"));
        assert_eq!(count.return_type.as_deref(), Some("int"));
        assert_eq!(count.signature, None);

        let foo = index.iter().find(|e| e.name == "foo").unwrap();
        assert_eq!(foo.signature.as_deref(), Some("foo(String, int)"));
        assert_eq!(foo.return_type.as_deref(), Some("void"));

        let bar = index.iter().find(|e| e.name == "bar").unwrap();
        assert_eq!(bar.signature.as_deref(), Some("bar()"));

        let value = index.iter().find(|e| e.name == "value").unwrap();
        assert_eq!(value.category, "field");
        assert_eq!(value.qualified_name, "a.A.value");
        assert_eq!(value.return_type.as_deref(), Some("String"));

        let e = index.iter().find(|e| e.name == "E").unwrap();
        assert_eq!(e.category, "enum");
        let a = index.iter().find(|e| e.name == "A").unwrap();
        assert_eq!(a.category, "annotation");
    }

    #[test]
    fn rebuilding_is_idempotent() {
        let mut tree = sample_tree();
        tree.build_search_index();
        let first = tree.model().search_index.clone();
        tree.build_search_index();
        assert_eq!(tree.model().search_index, first);
    }

    #[test]
    fn index_is_stale_until_rebuilt() {
        let mut tree = PackageTree::new();
        tree.add_type("a", class("T1", "a.T1"));
        assert!(tree.model().search_index.is_empty());
        tree.build_search_index();
        tree.add_type("a", class("T2", "a.T2"));
        assert_eq!(tree.model().search_index.len(), 1);
        tree.build_search_index();
        assert_eq!(tree.model().search_index.len(), 2);
    }

    #[test]
    fn project_name_uses_root_package() {
        let mut tree = PackageTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.project_name(), "API Documentation");

        tree.add_type("at.videc.dummy", class("User", "at.videc.dummy.User"));
        tree.add_type("at.videc", class("BOMB", "at.videc.BOMB"));
        assert_eq!(tree.project_name(), "at.videc Documentation");
    }

    #[test]
    fn project_name_breaks_length_ties_by_name() {
        let mut tree = PackageTree::new();
        tree.add_type("b.x", class("T1", "b.x.T1"));
        tree.add_type("a.y", class("T2", "a.y.T2"));
        assert_eq!(tree.project_name(), "a.y Documentation");
    }

    #[test]
    fn project_name_for_unnamed_package_is_generic() {
        let mut tree = PackageTree::new();
        tree.add_type("com.example", class("App", "com.example.App"));
        tree.add_type("", class("Main", "Main"));
        assert_eq!(tree.project_name(), "API Documentation");
    }

    #[test]
    fn add_package_appends_without_merging() {
        let mut tree = PackageTree::new();
        tree.add_type("a", class("T1", "a.T1"));
        tree.add_package(PackageNode::new("a"));
        assert_eq!(tree.package_count(), 2);
        // Lookup still finds the first bucket.
        tree.add_type("a", class("T2", "a.T2"));
        assert_eq!(tree.packages()[0].types.len(), 2);
        assert!(tree.packages()[1].types.is_empty());
    }
}
