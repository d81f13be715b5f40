//! Rule enforcing downward-only references between layers.
//!
//! A file may reference a module in its own layer or in any lower-ranked
//! layer. A reference from a lower rank to a strictly higher rank is
//! flagged at the specifier. Unranked layers never take part.

use fla_lint_core::{collect_edges, FileContext, FileRule, LintContext, Violation};

/// Rule code for layer-reference.
pub const CODE: &str = "FLA003";

/// Rule name for layer-reference.
pub const NAME: &str = "layer-reference";

/// Forbids references from a lower layer into a higher one.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayerReference;

impl LayerReference {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl FileRule for LayerReference {
    fn id(&self) -> &'static str {
        CODE
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Forbids imports from a lower-ranked layer into a higher-ranked layer"
    }

    fn check(&self, file: &FileContext<'_>, ctx: &LintContext) -> Vec<Violation> {
        if !file.is_parseable() {
            return Vec::new();
        }

        collect_edges(ctx, file.path, file.content)
            .into_iter()
            .filter(|edge| matches!((edge.source.rank, edge.target.rank), (Some(s), Some(t)) if s < t))
            .map(|edge| {
                file.violation(
                    CODE,
                    edge.line,
                    edge.column,
                    format!(
                        "Invalid upward reference from {} to {} via '{}'.",
                        edge.source.layer, edge.target.layer, edge.specifier
                    ),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{context, context_with, run};
    use fla_lint_core::{Config, LintRule};

    fn check(files: &[(&str, &str)]) -> Vec<Violation> {
        run(&LintRule::file(LayerReference::new()), &context(files))
    }

    #[test]
    fn test_downward_reference_is_allowed() {
        let found = check(&[(
            "src/_pages/home/home.tsx",
            "import { Button } from '../../_components/button/button';\n",
        )]);
        assert!(found.is_empty());
    }

    #[test]
    fn test_upward_reference_is_flagged() {
        let found = check(&[(
            "src/_apis/user/user.ts",
            "import { Home } from '../../_pages/home/home';\n",
        )]);
        assert_eq!(found.len(), 1);
        assert_eq!(
            found[0].message,
            "Invalid upward reference from _apis to _pages via '../../_pages/home/home'."
        );
        assert_eq!((found[0].location.line, found[0].location.column), (1, 23));
    }

    #[test]
    fn test_same_layer_is_allowed() {
        let found = check(&[(
            "src/_components/card/card.tsx",
            "import { Button } from '../button/button';\n",
        )]);
        assert!(found.is_empty());
    }

    #[test]
    fn test_noise_in_strings_and_templates_is_ignored() {
        let src = r#"import { Home } from "../../_pages/home/home";

const a = "import x from '../../_pages/other/other'";
const b = `
  import y from "../../_pages/other/other";
  ${require("../../_pages/other/other")}
`;
// import z from "../../_pages/other/other";
"#;
        let found = check(&[("src/_components/widget/widget.tsx", src)]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].location.line, 1);
    }

    #[test]
    fn test_require_and_dynamic_import() {
        let src = "const a = require('../../_states/cart/cart');\nconst b = import(\"../../_containers/x/x\");\n";
        let found = check(&[("src/_components/widget/widget.tsx", src)]);
        assert_eq!(found.len(), 2);
        assert!(found[0].message.contains("to _states"));
        assert!(found[1].message.contains("to _containers"));
    }

    #[test]
    fn test_aliases_resolve_before_ranking() {
        let mut config = Config::default();
        config.path_aliases.insert("@/*".into(), "src/*".into());
        let ctx = context_with(
            config,
            &[("src/_utils/date/date.ts", "import { s } from '@/_states/session/session';\n")],
            &[],
        );
        let found = run(&LintRule::file(LayerReference::new()), &ctx);
        assert_eq!(found.len(), 1);
        assert!(found[0].message.contains("from _utils to _states"));
    }
}
