//! Integration tests for the BV-BRC client against a mock Data API
//!
//! Covers:
//! - request shape (path, headers, RQL body) for each handle method
//! - relayed HTTP errors
//! - the download precondition firing before any request
//! - token and caller `Authorization` precedence
//! - typed decoding

use bvbrc_client::api::{Genome, Taxonomy};
use bvbrc_client::{
    create_client, BvbrcClient, BvbrcError, ClientConfig, ClientOverrides, FieldFilter,
    QueryOptions, Resource,
};
use chrono::NaiveDate;
use serde_json::json;
use wiremock::{
    matchers::{body_string, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

const RQL_CONTENT_TYPE: &str = "application/rqlquery+x-www-form-urlencoded";

fn client_for(server: &MockServer) -> BvbrcClient {
    let config = ClientConfig::new(format!("{}/api", server.uri())).unwrap();
    BvbrcClient::new(config).unwrap()
}

fn genome_rows() -> serde_json::Value {
    json!([
        {
            "genome_id": "83332.12",
            "genome_name": "Mycobacterium tuberculosis H37Rv",
            "taxon_id": 83332,
            "genome_length": 4411532
        }
    ])
}

// ============================================================================
// Request Shape
// ============================================================================

#[tokio::test]
async fn test_get_by_id_posts_rql_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/genome/"))
        .and(header("content-type", RQL_CONTENT_TYPE))
        .and(header("accept", "application/json"))
        .and(body_string("eq(genome_id,83332.12)&limit(1000)"))
        .respond_with(ResponseTemplate::new(200).set_body_json(genome_rows()))
        .expect(1)
        .mount(&server)
        .await;

    let rows = client_for(&server)
        .genome()
        .get_by_id("83332.12", &QueryOptions::new())
        .await
        .unwrap();

    assert_eq!(rows[0]["genome_name"], "Mycobacterium tuberculosis H37Rv");
}

#[tokio::test]
async fn test_query_by_with_options() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/genome_feature/"))
        .and(body_string(
            "and(eq(genome_id,83332.12),eq(strand,%22-%22))&select(feature_id,product)&sort(+start)&limit(5)",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let options = QueryOptions::new()
        .select(["feature_id", "product"])
        .sort("+start")
        .limit(5);

    let rows = client_for(&server)
        .genome_feature()
        .query_by([("genome_id", "83332.12"), ("strand", "-")], &options)
        .await
        .unwrap();

    assert_eq!(rows, json!([]));
}

#[tokio::test]
async fn test_query_where_mixed_operators() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/genome/"))
        .and(body_string(
            "and(eq(genus,Salmonella),gt(genome_length,4000000),ne(genome_status,Plasmid))&limit(1000)",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(genome_rows()))
        .expect(1)
        .mount(&server)
        .await;

    let filters = [
        FieldFilter::eq("genus", "Salmonella"),
        FieldFilter::gt("genome_length", 4_000_000),
        FieldFilter::ne("genome_status", "Plasmid"),
    ];

    client_for(&server)
        .genome()
        .query_where(&filters, &QueryOptions::new())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_search_range_and_in_helpers() {
    let server = MockServer::start().await;

    for body in [
        "keyword(beta%20lactamase)&limit(1000)",
        "and(gt(na_length,100),lt(na_length,500))&limit(1000)",
        "and(ge(date_inserted,2024-01-01T00%3A00%3A00Z),le(date_inserted,2024-06-30T00%3A00%3A00Z))&limit(1000)",
        "in(genome_id,(83332.12,224308.43))&limit(1000)",
        "eq(gene,katG)&limit(1000)",
    ] {
        Mock::given(method("POST"))
            .and(body_string(body))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = client_for(&server);
    let options = QueryOptions::new();
    let features = client.genome_feature();

    features.search_by_keyword("beta lactamase", &options).await.unwrap();
    features.get_by_range("na_length", 100, 500, &options).await.unwrap();
    client
        .genome()
        .get_by_date_range(
            "date_inserted",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
            &options,
        )
        .await
        .unwrap();
    client
        .genome()
        .get_by_any("genome_id", ["83332.12", "224308.43"], &options)
        .await
        .unwrap();
    features.get_by("gene", "katG", &options).await.unwrap();
}

#[tokio::test]
async fn test_http_download_with_sort() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/taxonomy/"))
        .and(body_string("sort(+taxon_id)&limit(1000)&http_download=true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .taxonomy()
        .get_all(&QueryOptions::new().sort("+taxon_id").http_download(true))
        .await
        .unwrap();
}

// ============================================================================
// Errors
// ============================================================================

#[tokio::test]
async fn test_not_found_is_relayed_with_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let options = QueryOptions::new();

    let errors = [
        client.genome().get_by_id("1", &options).await.unwrap_err(),
        client.taxonomy().get_all(&options).await.unwrap_err(),
        client.experiment().search_by_keyword("x", &options).await.unwrap_err(),
        client.sp_gene().get_by("gene", "mecA", &options).await.unwrap_err(),
    ];

    for err in errors {
        assert!(err.to_string().contains("404"), "unexpected message: {}", err);
        assert!(err.is_http_status(404));
    }
}

#[tokio::test]
async fn test_server_error_status_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .genome()
        .get_all(&QueryOptions::new())
        .await
        .unwrap_err();

    match err {
        BvbrcError::Http {
            status,
            status_text,
            resource,
        } => {
            assert_eq!(status, 503);
            assert_eq!(status_text, "Service Unavailable");
            assert_eq!(resource, "genome");
        },
        other => panic!("expected Http error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_non_standard_status_has_empty_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(599))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .taxonomy()
        .get_all(&QueryOptions::new())
        .await
        .unwrap_err();

    assert!(err.is_http_status(599));
    match err {
        BvbrcError::Http { status_text, .. } => assert_eq!(status_text, ""),
        other => panic!("expected Http error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_download_without_sort_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    for handle in client.resources().values() {
        let err = handle
            .get_all(&QueryOptions::new().http_download(true))
            .await
            .unwrap_err();
        assert!(matches!(err, BvbrcError::SortRequired { .. }));
    }
}

#[tokio::test]
async fn test_malformed_json_is_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .genome()
        .get_all(&QueryOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(err, BvbrcError::Transport(_)));
}

// ============================================================================
// Authorization
// ============================================================================

#[tokio::test]
async fn test_token_is_sent_as_authorization() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header("authorization", "un=alice@patricbrc.org|tokenid=abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::new(format!("{}/api", server.uri()))
        .unwrap()
        .with_auth_token("un=alice@patricbrc.org|tokenid=abc");

    BvbrcClient::new(config)
        .unwrap()
        .genome()
        .get_all(&QueryOptions::new())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_caller_authorization_is_not_overridden() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header("authorization", "caller"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::TempDir::new().unwrap();
    let client = create_client(
        ClientOverrides::new()
            .config_path(dir.path().join("config.json"))
            .base_url(format!("{}/api", server.uri()))
            .auth_token("from-config")
            .header("Authorization", "caller"),
    )
    .unwrap();

    client.genome().get_all(&QueryOptions::new()).await.unwrap();
}

// ============================================================================
// Typed Decoding And Factory
// ============================================================================

#[tokio::test]
async fn test_typed_rows() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/genome/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(genome_rows()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/taxonomy/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"taxon_id": 1773, "taxon_name": "Mycobacterium tuberculosis", "taxon_rank": "species"}
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let genomes: Vec<Genome> = client
        .genome()
        .get_all_as(&QueryOptions::new())
        .await
        .unwrap();
    assert_eq!(genomes[0].genome_length, Some(4_411_532));

    let taxa: Vec<Taxonomy> = client
        .taxonomy()
        .get_by_id_as(1773, &QueryOptions::new())
        .await
        .unwrap();
    assert_eq!(taxa[0].taxon_rank.as_deref(), Some("species"));
}

#[tokio::test]
async fn test_typed_decoding_mismatch_is_json_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .genome()
        .get_all_as::<Vec<Genome>>(&QueryOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, BvbrcError::Json(_)));
}

#[test]
fn test_factory_exposes_every_resource() {
    let dir = tempfile::TempDir::new().unwrap();
    let client = create_client(
        ClientOverrides::new()
            .config_path(dir.path().join("config.json"))
            .base_url("http://localhost:9/api"),
    )
    .unwrap();

    let names: Vec<&str> = client.resources().keys().copied().collect();
    let expected: Vec<&str> = Resource::names().collect();
    assert_eq!(names, expected);
    assert!(names.contains(&"genome"));
    assert!(names.contains(&"protein_structure"));
    assert!(names.contains(&"surveillance"));
}
