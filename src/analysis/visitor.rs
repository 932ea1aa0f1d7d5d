//! Top-level declaration visitor.

use crate::syntax::{CommentGroup, Declaration, GroupToken, Ident, SourceFile, Spec};

use super::{DeclarationKind, ExportRecord};

/// Collect a record for every exported top-level name in `file`, in source order.
///
/// A name counts as documented when its declaration owns any comment group,
/// or when its own spec (or func) doc comment has text. A comment anywhere in
/// a parenthesized group therefore covers every member of the group.
pub fn collect_exports(file: &SourceFile) -> Vec<ExportRecord> {
    let mut exports = Vec::new();

    for decl in &file.declarations {
        let decl_has_comment = !decl.comments().is_empty();

        match decl {
            Declaration::Group { token, specs, .. } => {
                for spec in specs {
                    let has_doc = decl_has_comment || has_doc_text(spec.doc());
                    match spec {
                        Spec::Value { names, .. } => {
                            let kind = match token {
                                GroupToken::Const => DeclarationKind::Constant,
                                _ => DeclarationKind::Variable,
                            };
                            for name in names.iter().filter(|n| n.is_exported()) {
                                exports.push(record(file, name, kind, has_doc));
                            }
                        }
                        Spec::Type { name, shape, .. } => {
                            if name.is_exported() {
                                exports.push(record(
                                    file,
                                    name,
                                    DeclarationKind::Type(*shape),
                                    has_doc,
                                ));
                            }
                        }
                    }
                }
            }
            Declaration::Func {
                name,
                receivers,
                doc,
                ..
            } => {
                if name.is_exported() {
                    let kind = if *receivers > 0 {
                        DeclarationKind::Method
                    } else {
                        DeclarationKind::Function
                    };
                    let has_doc = decl_has_comment || has_doc_text(doc.as_ref());
                    exports.push(record(file, name, kind, has_doc));
                }
            }
        }
    }

    exports
}

fn has_doc_text(doc: Option<&CommentGroup>) -> bool {
    doc.is_some_and(CommentGroup::has_text)
}

fn record(file: &SourceFile, name: &Ident, kind: DeclarationKind, has_doc: bool) -> ExportRecord {
    ExportRecord {
        file: file.path.clone(),
        line: name.position.line,
        name: name.name.clone(),
        kind,
        has_doc,
    }
}
