//! Search Module Tests
//!
//! Validates the query pipeline: tokenization, clause parsing with field
//! value validation, filter compilation, and predicate matching semantics.
//!
//! ## Test Scopes
//! - **Tokenizer**: Quoting, exclusion markers, field-clause recognition.
//! - **Parser**: Typed clause lists and the validation error taxonomy.
//! - **Compiler**: One-to-one clause/filter mapping and idempotence.
//! - **Predicates**: The per-field match rules against single documents.

#[cfg(test)]
mod tests {
    use crate::search::compiler::compile_filters;
    use crate::search::parser::parse_query;
    use crate::search::tokenizer::tokenize;
    use crate::search::types::{
        Clause, ErrorKind, FieldName, Predicate, SearchError, Searchable, TokenKind,
    };
    use chrono::NaiveDate;

    /// Minimal document for predicate tests.
    struct TestDoc {
        title: String,
        body: String,
        tags: Vec<String>,
        author: String,
        posted: NaiveDate,
        score: i64,
    }

    impl Default for TestDoc {
        fn default() -> Self {
            Self {
                title: "The Care and Feeding of Cats".to_string(),
                body: "Cats are obligate carnivores.".to_string(),
                tags: vec!["Pets".to_string(), "cats".to_string()],
                author: "Alice".to_string(),
                posted: NaiveDate::from_ymd_opt(2020, 6, 15).unwrap(),
                score: 7,
            }
        }
    }

    impl Searchable for TestDoc {
        fn title(&self) -> &str {
            &self.title
        }

        fn body(&self) -> &str {
            &self.body
        }

        fn tags(&self) -> &[String] {
            &self.tags
        }

        fn author(&self) -> &str {
            &self.author
        }

        fn posted_on(&self) -> NaiveDate {
            self.posted
        }

        fn score(&self) -> i64 {
            self.score
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ============================================================
    // TOKENIZER TESTS
    // ============================================================

    #[test]
    fn test_tokenize_whitespace_split() {
        let tokens = tokenize("cats dogs  birds").unwrap();

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].kind, TokenKind::Word("cats".to_string()));
        assert_eq!(tokens[1].kind, TokenKind::Word("dogs".to_string()));
        assert_eq!(tokens[2].kind, TokenKind::Word("birds".to_string()));
    }

    #[test]
    fn test_tokenize_empty_string() {
        let tokens = tokenize("").unwrap();
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_tokenize_quoted_phrase_preserves_interior() {
        let tokens = tokenize(r#""hello,  world!""#).unwrap();

        assert_eq!(tokens.len(), 1);
        assert_eq!(
            tokens[0].kind,
            TokenKind::Phrase("hello,  world!".to_string())
        );
    }

    #[test]
    fn test_tokenize_exclude_marker_glued_to_word() {
        let tokens = tokenize("-spam").unwrap();

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, TokenKind::Exclude);
        assert_eq!(tokens[1].kind, TokenKind::Word("spam".to_string()));
    }

    #[test]
    fn test_tokenize_standalone_dash_is_literal() {
        let tokens = tokenize("cats - dogs").unwrap();

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1].kind, TokenKind::Word("-".to_string()));
    }

    #[test]
    fn test_tokenize_trailing_dash_is_literal() {
        let tokens = tokenize("cats -").unwrap();

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].kind, TokenKind::Word("-".to_string()));
    }

    #[test]
    fn test_tokenize_interior_hyphen_stays_in_word() {
        let tokens = tokenize("well-known").unwrap();

        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Word("well-known".to_string()));
    }

    #[test]
    fn test_tokenize_field_clause() {
        let tokens = tokenize("tag:cats").unwrap();

        assert_eq!(tokens.len(), 1);
        assert_eq!(
            tokens[0].kind,
            TokenKind::Field {
                name: FieldName::Tag,
                value: "cats".to_string()
            }
        );
    }

    #[test]
    fn test_tokenize_empty_field_value_fails() {
        let err = tokenize("tag:").unwrap_err();

        assert_eq!(
            err,
            SearchError::EmptyFieldValue {
                field: "tag".to_string(),
                position: 0
            }
        );
        assert_eq!(err.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn test_tokenize_unterminated_quote_fails_with_position() {
        let err = tokenize(r#"a "b c"#).unwrap_err();

        assert_eq!(err, SearchError::UnterminatedQuote { position: 2 });
        assert_eq!(err.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn test_tokenize_unrecognized_field_is_word() {
        let tokens = tokenize("color:red").unwrap();

        assert_eq!(tokens[0].kind, TokenKind::Word("color:red".to_string()));
    }

    // ============================================================
    // PARSER TESTS
    // ============================================================

    #[test]
    fn test_parse_bare_word_is_free_text() {
        let clauses = parse_query("carnivores").unwrap();

        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].clause, Clause::FreeText("carnivores".to_string()));
        assert!(!clauses[0].exclude);
    }

    #[test]
    fn test_parse_quoted_phrase_strips_quotes() {
        let clauses = parse_query(r#""hello world""#).unwrap();

        assert_eq!(clauses.len(), 1);
        assert_eq!(
            clauses[0].clause,
            Clause::FreeText("hello world".to_string())
        );
    }

    #[test]
    fn test_parse_excluded_tag_clause() {
        let clauses = parse_query("-tag:cats").unwrap();

        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].clause, Clause::Tag("cats".to_string()));
        assert!(clauses[0].exclude);
    }

    #[test]
    fn test_parse_exclude_applies_to_following_clause_only() {
        let clauses = parse_query("cats -dogs birds").unwrap();

        assert_eq!(clauses.len(), 3);
        assert!(!clauses[0].exclude);
        assert!(clauses[1].exclude);
        assert!(!clauses[2].exclude);
    }

    #[test]
    fn test_parse_excluded_phrase() {
        let clauses = parse_query(r#"-"bad phrase""#).unwrap();

        assert_eq!(clauses.len(), 1);
        assert_eq!(
            clauses[0].clause,
            Clause::FreeText("bad phrase".to_string())
        );
        assert!(clauses[0].exclude);
    }

    #[test]
    fn test_parse_date_fields() {
        let clauses = parse_query("before:2021-01-31 after:2019-12-01").unwrap();

        assert_eq!(clauses[0].clause, Clause::Before(date(2021, 1, 31)));
        assert_eq!(clauses[1].clause, Clause::After(date(2019, 12, 1)));
    }

    #[test]
    fn test_parse_invalid_calendar_date_fails() {
        let err = parse_query("before:2020-13-40").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        match err {
            SearchError::InvalidFieldValue { field, value, .. } => {
                assert_eq!(field, "before");
                assert_eq!(value, "2020-13-40");
            }
            other => panic!("expected InvalidFieldValue, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_malformed_date_fails() {
        let err = parse_query("after:yesterday").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_parse_score_bounds() {
        let clauses = parse_query("score_gte:5 score_lte:-2").unwrap();

        assert_eq!(clauses[0].clause, Clause::ScoreGte(5));
        assert_eq!(clauses[1].clause, Clause::ScoreLte(-2));
    }

    #[test]
    fn test_parse_non_integer_score_fails() {
        let err = parse_query("score_gte:five").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        match err {
            SearchError::InvalidFieldValue { field, value, .. } => {
                assert_eq!(field, "score_gte");
                assert_eq!(value, "five");
            }
            other => panic!("expected InvalidFieldValue, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_repeated_field_gives_two_clauses() {
        let clauses = parse_query("tag:a tag:b").unwrap();

        assert_eq!(clauses.len(), 2);
        assert_eq!(clauses[0].clause, Clause::Tag("a".to_string()));
        assert_eq!(clauses[1].clause, Clause::Tag("b".to_string()));
    }

    #[test]
    fn test_parse_preserves_input_order() {
        let clauses = parse_query("author:alice cats score_gte:3").unwrap();

        assert_eq!(clauses[0].clause, Clause::Author("alice".to_string()));
        assert_eq!(clauses[1].clause, Clause::FreeText("cats".to_string()));
        assert_eq!(clauses[2].clause, Clause::ScoreGte(3));
    }

    #[test]
    fn test_parse_first_error_aborts() {
        // The bad date comes after two valid clauses; nothing is returned.
        let err = parse_query("cats tag:pets before:nope").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_error_codes_by_kind() {
        assert_eq!(
            parse_query("tag:").unwrap_err().code(),
            "search_query_syntax"
        );
        assert_eq!(
            parse_query("score_lte:x").unwrap_err().code(),
            "search_query_validation"
        );
        assert_eq!(SearchError::MissingQuery.code(), "search_query_missing");
    }

    // ============================================================
    // COMPILER TESTS
    // ============================================================

    #[test]
    fn test_compile_same_length_and_order() {
        let clauses = parse_query("tag:a -author:b cats score_lte:9").unwrap();
        let filters = compile_filters(&clauses);

        assert_eq!(filters.len(), clauses.len());
        assert_eq!(filters[0].predicate, Predicate::TagEquals("a".to_string()));
        assert!(!filters[0].exclude);
        assert_eq!(
            filters[1].predicate,
            Predicate::AuthorEquals("b".to_string())
        );
        assert!(filters[1].exclude);
        assert_eq!(
            filters[2].predicate,
            Predicate::TextContains("cats".to_string())
        );
        assert_eq!(filters[3].predicate, Predicate::ScoreAtMost(9));
    }

    #[test]
    fn test_compile_is_idempotent() {
        let raw = r#"tag:Cats -author:Bob "exact phrase" score_gte:2 before:2022-05-01"#;

        let first = compile_filters(&parse_query(raw).unwrap());
        let second = compile_filters(&parse_query(raw).unwrap());

        assert_eq!(first, second);
    }

    #[test]
    fn test_compile_lowercases_text_payloads() {
        let clauses = parse_query("tag:CATS title:MiXeD").unwrap();
        let filters = compile_filters(&clauses);

        assert_eq!(
            filters[0].predicate,
            Predicate::TagEquals("cats".to_string())
        );
        assert_eq!(
            filters[1].predicate,
            Predicate::TitleContains("mixed".to_string())
        );
    }

    #[test]
    fn test_compile_empty_query_is_empty_list() {
        let filters = compile_filters(&parse_query("").unwrap());
        assert!(filters.is_empty());
    }

    // ============================================================
    // PREDICATE MATCHING TESTS
    // ============================================================

    #[test]
    fn test_predicate_tag_exact_case_insensitive() {
        let doc = TestDoc::default();

        assert!(Predicate::TagEquals("pets".to_string()).matches(&doc));
        assert!(Predicate::TagEquals("cats".to_string()).matches(&doc));
        // Exact, not substring.
        assert!(!Predicate::TagEquals("pet".to_string()).matches(&doc));
    }

    #[test]
    fn test_predicate_author_exact_not_substring() {
        let doc = TestDoc::default();

        assert!(Predicate::AuthorEquals("alice".to_string()).matches(&doc));
        assert!(!Predicate::AuthorEquals("ali".to_string()).matches(&doc));
    }

    #[test]
    fn test_predicate_title_substring() {
        let doc = TestDoc::default();

        assert!(Predicate::TitleContains("feeding".to_string()).matches(&doc));
        assert!(!Predicate::TitleContains("carnivores".to_string()).matches(&doc));
    }

    #[test]
    fn test_predicate_free_text_title_or_body() {
        let doc = TestDoc::default();

        // In the title only.
        assert!(Predicate::TextContains("feeding".to_string()).matches(&doc));
        // In the body only.
        assert!(Predicate::TextContains("carnivores".to_string()).matches(&doc));
        assert!(!Predicate::TextContains("dogs".to_string()).matches(&doc));
    }

    #[test]
    fn test_predicate_dates_are_strict() {
        let doc = TestDoc::default(); // posted 2020-06-15

        assert!(Predicate::PostedBefore(date(2020, 6, 16)).matches(&doc));
        assert!(!Predicate::PostedBefore(date(2020, 6, 15)).matches(&doc));
        assert!(Predicate::PostedAfter(date(2020, 6, 14)).matches(&doc));
        assert!(!Predicate::PostedAfter(date(2020, 6, 15)).matches(&doc));
    }

    #[test]
    fn test_predicate_score_bounds_inclusive() {
        let doc = TestDoc::default(); // score 7

        assert!(Predicate::ScoreAtLeast(7).matches(&doc));
        assert!(!Predicate::ScoreAtLeast(8).matches(&doc));
        assert!(Predicate::ScoreAtMost(7).matches(&doc));
        assert!(!Predicate::ScoreAtMost(6).matches(&doc));
    }

    // ============================================================
    // SEARCH ENDPOINT TESTS
    // ============================================================

    mod endpoints {
        use crate::content::types::{Comment, Post};
        use crate::engagement::types::Tag;
        use crate::search::handlers::{
            SearchParams, handle_search_comments, handle_search_posts,
        };
        use crate::search::types::SearchResponse;
        use crate::storage::memory::MemoryStore;
        use axum::extract::{Extension, Query};
        use axum::http::StatusCode;
        use axum::response::Response;
        use chrono::Utc;
        use serde::de::DeserializeOwned;
        use std::sync::Arc;
        use uuid::Uuid;

        async fn body_json<T: DeserializeOwned>(resp: Response) -> T {
            let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
                .await
                .unwrap();
            serde_json::from_slice(&bytes).unwrap()
        }

        fn post(id: &str, author: &str, title: &str, body: &str, score: i64) -> Post {
            Post {
                id: id.to_string(),
                posted_at: Utc::now(),
                author: author.to_string(),
                title: title.to_string(),
                url: None,
                slug: String::new(),
                body: body.to_string(),
                base_score: score,
                vote_count: 0,
                comment_count: 0,
                view_count: 0,
                draft: false,
            }
        }

        fn tag(document_id: &str, text: &str) -> Tag {
            Tag {
                id: Uuid::new_v4().to_string(),
                author: "tagger".to_string(),
                document_id: document_id.to_string(),
                doc_type: "post".to_string(),
                created_at: Utc::now(),
                text: text.to_string(),
            }
        }

        fn comment(id: &str, author: &str, body: &str, deleted: bool) -> Comment {
            Comment {
                id: id.to_string(),
                author: author.to_string(),
                post_id: "p1".to_string(),
                parent_comment_id: None,
                posted_at: Utc::now(),
                base_score: 1,
                body: body.to_string(),
                is_deleted: deleted,
            }
        }

        #[tokio::test]
        async fn test_missing_query_param_is_400() {
            let posts = Arc::new(MemoryStore::<Post>::new());
            let tags = Arc::new(MemoryStore::<Tag>::new());

            let resp = handle_search_posts(
                Query(SearchParams { query: None }),
                Extension(posts),
                Extension(tags),
            )
            .await;

            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            let err: crate::api::ErrorBody = body_json(resp).await;
            assert_eq!(err.code, "search_query_missing");
            assert_eq!(err.blame, "client");
        }

        #[tokio::test]
        async fn test_invalid_query_is_400_with_user_blame() {
            let posts = Arc::new(MemoryStore::<Post>::new());
            let tags = Arc::new(MemoryStore::<Tag>::new());

            let resp = handle_search_posts(
                Query(SearchParams {
                    query: Some("before:2020-13-40".to_string()),
                }),
                Extension(posts),
                Extension(tags),
            )
            .await;

            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            let err: crate::api::ErrorBody = body_json(resp).await;
            assert_eq!(err.code, "search_query_validation");
            assert_eq!(err.blame, "user");
        }

        #[tokio::test]
        async fn test_post_search_narrows_and_excludes() {
            let posts = Arc::new(MemoryStore::new());
            let tags = Arc::new(MemoryStore::new());
            posts.insert(post("p1", "alice", "High spam", "junk", 9));
            posts.insert(post("p2", "bob", "High clean", "useful", 8));
            posts.insert(post("p3", "carol", "Low spam", "junk", 2));
            tags.insert(tag("p1", "spam"));
            tags.insert(tag("p3", "spam"));

            let resp = handle_search_posts(
                Query(SearchParams {
                    query: Some("score_gte:5 -tag:spam".to_string()),
                }),
                Extension(posts),
                Extension(tags),
            )
            .await;

            assert_eq!(resp.status(), StatusCode::OK);
            let body: SearchResponse<Post> = body_json(resp).await;
            assert_eq!(body.total_count, 3);
            assert_eq!(body.count, 1);
            assert_eq!(body.results[0].id, "p2");
        }

        #[tokio::test]
        async fn test_post_search_tag_hydration_is_case_insensitive() {
            let posts = Arc::new(MemoryStore::new());
            let tags = Arc::new(MemoryStore::new());
            posts.insert(post("p1", "alice", "Tagged", "text", 1));
            tags.insert(tag("p1", "Rationality"));

            let resp = handle_search_posts(
                Query(SearchParams {
                    query: Some("tag:rationality".to_string()),
                }),
                Extension(posts),
                Extension(tags),
            )
            .await;

            let body: SearchResponse<Post> = body_json(resp).await;
            assert_eq!(body.count, 1);
        }

        #[tokio::test]
        async fn test_comment_search_skips_soft_deleted() {
            let comments = Arc::new(MemoryStore::new());
            let tags = Arc::new(MemoryStore::<Tag>::new());
            comments.insert(comment("c1", "bob", "cats are great", false));
            comments.insert(comment("c2", "bob", "cats are terrible", true));

            let resp = handle_search_comments(
                Query(SearchParams {
                    query: Some("cats".to_string()),
                }),
                Extension(comments),
                Extension(tags),
            )
            .await;

            let body: SearchResponse<Comment> = body_json(resp).await;
            // The deleted comment was never a candidate.
            assert_eq!(body.total_count, 1);
            assert_eq!(body.count, 1);
            assert_eq!(body.results[0].id, "c1");
        }

        #[tokio::test]
        async fn test_comment_search_by_author() {
            let comments = Arc::new(MemoryStore::new());
            let tags = Arc::new(MemoryStore::<Tag>::new());
            comments.insert(comment("c1", "Alice", "one", false));
            comments.insert(comment("c2", "bob", "two", false));

            let resp = handle_search_comments(
                Query(SearchParams {
                    query: Some("author:alice".to_string()),
                }),
                Extension(comments),
                Extension(tags),
            )
            .await;

            let body: SearchResponse<Comment> = body_json(resp).await;
            assert_eq!(body.count, 1);
            assert_eq!(body.results[0].id, "c1");
        }

        #[tokio::test]
        async fn test_empty_query_returns_everything_newest_first() {
            let posts = Arc::new(MemoryStore::new());
            let tags = Arc::new(MemoryStore::<Tag>::new());
            let mut older = post("p1", "alice", "Older", "a", 1);
            older.posted_at = Utc::now() - chrono::Duration::hours(1);
            posts.insert(older);
            posts.insert(post("p2", "bob", "Newer", "b", 1));

            let resp = handle_search_posts(
                Query(SearchParams {
                    query: Some("".to_string()),
                }),
                Extension(posts),
                Extension(tags),
            )
            .await;

            let body: SearchResponse<Post> = body_json(resp).await;
            assert_eq!(body.count, 2);
            assert_eq!(body.results[0].id, "p2");
            assert_eq!(body.results[1].id, "p1");
        }
    }
}
