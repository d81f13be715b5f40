//! TypeScript/TSX declaration extractor using Tree-sitter.

use tree_sitter::{Language, Node, Parser};

use crate::extractor::{DeclKind, Declaration, DeclarationExtractor, Dialect, ExtractError};

/// Loaded TypeScript and TSX grammars.
#[derive(Clone)]
pub struct TypeScriptExtractor {
    typescript: Language,
    tsx: Language,
}

impl TypeScriptExtractor {
    /// Loads both grammars and checks that a parser accepts them.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Grammar`] if either grammar is incompatible
    /// with the linked Tree-sitter runtime.
    pub fn load() -> Result<Self, ExtractError> {
        let extractor = Self {
            typescript: tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            tsx: tree_sitter_typescript::LANGUAGE_TSX.into(),
        };
        extractor.parser(Dialect::TypeScript)?;
        extractor.parser(Dialect::Tsx)?;
        Ok(extractor)
    }

    fn parser(&self, dialect: Dialect) -> Result<Parser, ExtractError> {
        let language = match dialect {
            Dialect::TypeScript => &self.typescript,
            Dialect::Tsx => &self.tsx,
        };
        let mut parser = Parser::new();
        parser
            .set_language(language)
            .map_err(|e| ExtractError::Grammar(e.to_string()))?;
        Ok(parser)
    }

    fn text<'a>(node: &Node<'_>, src: &'a str) -> &'a str {
        src.get(node.start_byte()..node.end_byte()).unwrap_or("")
    }

    fn classify(node: &Node<'_>) -> Option<DeclKind> {
        match node.kind() {
            "interface_declaration" => Some(DeclKind::Interface),
            "type_alias_declaration" => Some(DeclKind::TypeAlias),
            "enum_declaration" => Some(DeclKind::Enum),
            _ => None,
        }
    }
}

impl std::fmt::Debug for TypeScriptExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeScriptExtractor").finish_non_exhaustive()
    }
}

impl DeclarationExtractor for TypeScriptExtractor {
    fn strategy(&self) -> &'static str {
        "tree-sitter"
    }

    fn extract(&self, source: &str, dialect: Dialect) -> Result<Vec<Declaration>, ExtractError> {
        let mut parser = self.parser(dialect)?;
        let tree = parser.parse(source, None).ok_or(ExtractError::NoTree)?;
        let root = tree.root_node();
        if root.has_error() {
            return Err(ExtractError::Syntax);
        }

        let mut found = Vec::new();
        let mut cursor = root.walk();
        'walk: loop {
            let node = cursor.node();
            if let Some(kind) = Self::classify(&node) {
                let name = node
                    .child_by_field_name("name")
                    .map_or("", |n| Self::text(&n, source));
                found.push(Declaration::at(kind, name, source, node.start_byte()));
            }

            if cursor.goto_first_child() {
                continue;
            }
            while !cursor.goto_next_sibling() {
                if !cursor.goto_parent() {
                    break 'walk;
                }
            }
        }

        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(src: &str, dialect: Dialect) -> Vec<Declaration> {
        TypeScriptExtractor::load()
            .unwrap()
            .extract(src, dialect)
            .unwrap()
    }

    #[test]
    fn extracts_all_kinds() {
        let src = "interface A { x: number }\ntype B = string;\nenum C { One }\n";
        let found = extract(src, Dialect::TypeScript);
        let kinds: Vec<_> = found.iter().map(|d| (d.kind, d.name.as_str())).collect();
        assert_eq!(
            kinds,
            vec![
                (DeclKind::Interface, "A"),
                (DeclKind::TypeAlias, "B"),
                (DeclKind::Enum, "C"),
            ]
        );
        assert_eq!((found[1].line, found[1].column), (2, 1));
    }

    #[test]
    fn exported_declaration_reports_at_keyword() {
        let found = extract("export interface Props { a: string }\n", Dialect::TypeScript);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].column, 8);
    }

    #[test]
    fn ignores_comments_and_strings() {
        let src = "// interface A {}\nconst s = \"type B = 1\";\nconst t = `enum C {}`;\n";
        assert!(extract(src, Dialect::TypeScript).is_empty());
    }

    #[test]
    fn parses_tsx() {
        let src = "type Props = { a: string };\nexport const X = (p: Props) => <div>{p.a}</div>;\n";
        let found = extract(src, Dialect::Tsx);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Props");
    }

    #[test]
    fn syntax_errors_are_reported() {
        let result = TypeScriptExtractor::load()
            .unwrap()
            .extract("interface {{{ ", Dialect::TypeScript);
        assert!(matches!(result, Err(ExtractError::Syntax)));
    }
}
