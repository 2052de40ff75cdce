//! Nested `MatchExpr` trees embedded in full statements.

use fabryk_sphinxql::{Combinator, MatchExpr, QueryBuilder, QueryOptions};

#[test]
fn test_or_and_and_roots() {
    let mut or = MatchExpr::with_combinator(Combinator::Or);
    let root = or.root();
    or.add_text(root, "mary", QueryOptions::new())
        .add_text(root, "jane", QueryOptions::new());
    assert_eq!(or.to_string(), "( mary | jane )");

    let mut and = MatchExpr::new();
    let root = and.root();
    and.add_text(root, "mary", QueryOptions::new())
        .add_text(root, "jane", QueryOptions::new());
    assert_eq!(and.to_string(), "( mary jane )");
}

#[test]
fn test_all_empty_tree_contributes_nothing() {
    let mut expr = MatchExpr::new();
    let root = expr.root();
    let a = expr.step_into_or(root);
    expr.add_text(a, "", QueryOptions::new());
    let b = expr.step_into_and(root);
    expr.add_terms(b, "title", 0, QueryOptions::new().escape(), ["!!!"]);
    assert!(expr.is_empty());

    let before = QueryBuilder::new("idx").match_text("x");
    let after = before.clone().match_expr(&expr);
    assert_eq!(after.match_query(), before.match_query());
    assert_eq!(after.build(), before.build());
}

#[test]
fn test_deep_tree_in_statement() {
    // (title:rust OR (body:async AND NOT tags:deprecated)) MAYBE "tokio"
    let mut expr = MatchExpr::with_combinator(Combinator::Maybe);
    let root = expr.root();

    let either = expr.step_into_or(root);
    expr.add_terms(either, "title", 0, QueryOptions::new(), ["rust"]);
    let both = expr.step_into_and(either);
    expr.add_terms(both, "body", 10, QueryOptions::new(), ["async"])
        .add_terms(both, "tags", 0, QueryOptions::new().ignore(), ["deprecated"]);
    let back = expr.step_out(both);
    assert_eq!(back, either);
    let top = expr.step_out(either);
    assert_eq!(top, root);

    expr.add_text(top, "tokio", QueryOptions::new());

    assert_eq!(
        expr.to_string(),
        "( ( @(title) (rust) | ( @(body)[10] (async) @!(tags) (deprecated) ) ) MAYBE tokio )"
    );

    let sql = QueryBuilder::new("docs").match_expr(&expr).build();
    assert!(sql.starts_with(
        "SELECT *, weight() AS w FROM docs WHERE MATCH('( ( @(title) (rust) | "
    ));
}

#[test]
fn test_empty_sibling_quirk_in_statement() {
    let mut expr = MatchExpr::with_combinator(Combinator::Or);
    let root = expr.root();
    expr.add_text(root, "solo", QueryOptions::new());
    expr.step_into_and(root);

    // Two children in total, one empty: parentheses but no separator.
    let sql = QueryBuilder::new("idx").match_expr(&expr).build();
    assert!(sql.contains("MATCH('( solo )')"));
}

#[test]
fn test_rendering_twice_is_identical() {
    let mut expr = MatchExpr::with_combinator(Combinator::Or);
    let root = expr.root();
    expr.add_terms(root, "*", 0, QueryOptions::new().no_spaces(), ["new york", "boston"]);
    let inner = expr.step_into_and(root);
    expr.add_text(inner, "a b", QueryOptions::new())
        .add_text(inner, "c", QueryOptions::new());

    let builder = QueryBuilder::new("idx").match_expr(&expr).match_expr(&expr);
    assert_eq!(
        builder.match_query(),
        "( @* (new_york | boston) | ( ( a b ) c ) ) ( @* (new_york | boston) | ( ( a b ) c ) )"
    );
}

#[test]
fn test_step_out_of_root_then_extend() {
    let mut expr = MatchExpr::with_combinator(Combinator::Or);
    let root = expr.root();
    expr.add_text(root, "a", QueryOptions::new())
        .add_text(root, "b", QueryOptions::new());

    let wrapper = expr.step_out(root);
    expr.add_terms(wrapper, "tags", 0, QueryOptions::new(), ["x"]);

    assert_eq!(expr.root(), wrapper);
    assert_eq!(expr.to_string(), "( ( a | b ) @(tags) (x) )");
}

#[test]
fn test_graft_prebuilt_expression() {
    let mut names = MatchExpr::with_combinator(Combinator::Or);
    let names_root = names.root();
    names.add_terms(names_root, "author", 0, QueryOptions::new(), ["knuth"])
        .add_terms(names_root, "editor", 0, QueryOptions::new(), ["knuth"]);

    let mut expr = MatchExpr::new();
    let root = expr.root();
    expr.add_text(root, "algorithms", QueryOptions::new())
        .add_expr(root, names);

    assert_eq!(
        expr.to_string(),
        "( algorithms ( @(author) (knuth) | @(editor) (knuth) ) )"
    );
}
