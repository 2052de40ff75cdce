//! Whole-statement rendering through `QueryBuilder`.

use fabryk_sphinxql::{BuilderConfig, Error, QueryBuilder, QueryOptions, DEFAULT_SORT};

fn bare(index: &str) -> String {
    format!("SELECT *, weight() AS w FROM {index} ORDER BY {DEFAULT_SORT} LIMIT 0,0")
}

#[test]
fn test_unconfigured_builder_renders_bare_select() {
    for index in ["idx", "products", "dist_main"] {
        assert_eq!(QueryBuilder::new(index).build(), bare(index));
    }
}

#[test]
fn test_full_statement_clause_order() {
    let sql = QueryBuilder::new("products")
        .field("brand_id")
        .match_terms("title", QueryOptions::new().escape(), ["phone", "case!"])
        .match_text_with("cheap", QueryOptions::new().maybe())
        .filter("in_stock", 1, false)
        .filter_range("price", 10, 100, false)
        .unwrap()
        .group_by("brand_id")
        .within_group_order_by("price ASC")
        .sort_mode("w DESC")
        .limits(20, 10)
        .option("ranker", "sph04")
        .option("max_matches", 500)
        .facet("brand_id")
        .build();

    assert_eq!(
        sql,
        "SELECT *, weight() AS w, brand_id FROM products \
         WHERE MATCH('@(title) (phone | case) MAYBE cheap') AND in_stock=1 \
         AND (price BETWEEN 10 AND 100) \
         GROUP BY brand_id WITHIN GROUP ORDER BY price ASC ORDER BY w DESC \
         LIMIT 20,10 OPTION ranker=sph04, max_matches=500 FACET brand_id"
    );
}

#[test]
fn test_exclusive_range_fails_loudly() {
    let err = QueryBuilder::new("people")
        .filter_range("age", 18, 30, true)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Unsupported {
            operation: "filter_range",
            ..
        }
    ));
}

#[test]
fn test_empty_exclude_filter_leaves_where_untouched() {
    let base = QueryBuilder::new("idx").filter("status", 2, false);
    let with_empty = base.clone().filter_in("status", Vec::<u32>::new(), true);
    assert_eq!(with_empty.build(), base.build());

    let only_empty = QueryBuilder::new("idx").filter_in("status", [0u32; 0], true);
    assert!(!only_empty.build().contains("WHERE"));
}

#[test]
fn test_sanitized_away_group_is_absent() {
    let sql = QueryBuilder::new("idx")
        .match_text("keep")
        .match_terms("title", QueryOptions::new().escape().or().maybe(), ["?!", "[]", "  "])
        .build();

    assert!(sql.contains("MATCH('keep')"));
    assert!(!sql.contains("@(title)"));
    assert!(!sql.contains("MAYBE"));
    assert!(!sql.contains('|'));
}

#[test]
fn test_whitespace_left_by_escape_is_not_a_term() {
    let only = QueryBuilder::new("idx")
        .match_terms("title", QueryOptions::new().escape(), ["( )"])
        .build();
    assert_eq!(only, bare("idx"));
    assert!(!only.contains("MATCH"));

    let mixed = QueryBuilder::new("idx")
        .match_terms("title", QueryOptions::new().escape(), ["( )", " (rust) "])
        .build();
    assert!(mixed.contains("MATCH('@(title) (rust)')"));
}

#[test]
fn test_clone_then_mutate_leaves_original() {
    let original = QueryBuilder::new("idx")
        .match_text("alpha")
        .filter_in("cat", [1, 2], false)
        .option("ranker", "bm25")
        .facet("cat");
    let rendered = original.build();

    let changed = original
        .clone()
        .field("extra")
        .where_clause("id > 5")
        .option("ranker", "none")
        .facet("brand")
        .limits(0, 50);

    assert_eq!(original.build(), rendered);
    assert!(changed.build().contains(", extra FROM"));
    assert!(!original.build().contains("extra"));
}

#[test]
fn test_match_payload_is_quoted_safely() {
    let sql = QueryBuilder::new("idx")
        .match_text("it's a \\ test\n")
        .build();
    assert!(sql.contains("MATCH('it\\'s a \\\\ test\\\n')"));
}

#[test]
fn test_where_without_match() {
    let sql = QueryBuilder::new("idx").where_clause("id=1").build();
    assert_eq!(
        sql,
        format!("SELECT *, weight() AS w FROM idx WHERE id=1 ORDER BY {DEFAULT_SORT} LIMIT 0,0")
    );
}

#[test]
fn test_builder_from_toml_config() {
    let config = BuilderConfig::from_toml_str(
        r#"
        sort = "id DESC"
        limit_to = 100

        [options]
        max_matches = 100
        "#,
    )
    .unwrap();

    let sql = QueryBuilder::with_config("idx", &config)
        .option("max_matches", 200)
        .build();

    assert_eq!(
        sql,
        "SELECT *, weight() AS w FROM idx ORDER BY id DESC LIMIT 0,100 OPTION max_matches=200"
    );
}
