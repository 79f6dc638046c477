//! End-to-end tests of the greeting routes over a real socket.

use std::time::Duration;

use reqwest::header::HeaderValue;
use reqwest::StatusCode;

mod common;

#[tokio::test]
async fn test_root_ignores_query_and_headers() {
    let server = common::start_server().await;
    let client = common::client();

    for url in [server.url("/"), server.url("/?username=alice")] {
        let res = client
            .get(url)
            .header("username", "bob")
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers()["content-type"],
            "text/plain; charset=utf-8"
        );
        assert_eq!(res.text().await.unwrap(), "Hello world!\n");
    }
}

#[tokio::test]
async fn test_me_returns_fixed_identity() {
    let server = common::start_server().await;
    let client = common::client();

    let res = client
        .get(server.url("/me?username=alice"))
        .header("username", "bob")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.text().await.unwrap(),
        "dicoding_username : firmansyw30 \n"
    );
}

#[tokio::test]
async fn test_usr_greets_query_username() {
    let server = common::start_server().await;

    let res = common::client()
        .get(server.url("/usr?username=alice"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "Hello, alice!\n");
}

#[tokio::test]
async fn test_usr_falls_back_to_header() {
    let server = common::start_server().await;

    let res = common::client()
        .get(server.url("/usr"))
        .header("username", "bob")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "Hello, bob!\n");
}

#[tokio::test]
async fn test_usr_query_takes_precedence_over_header() {
    let server = common::start_server().await;

    let res = common::client()
        .get(server.url("/usr?username=alice"))
        .header("username", "bob")
        .send()
        .await
        .unwrap();
    assert_eq!(res.text().await.unwrap(), "Hello, alice!\n");
}

#[tokio::test]
async fn test_usr_without_username_is_unauthorized() {
    let server = common::start_server().await;
    let client = common::client();

    for url in [server.url("/usr"), server.url("/usr?username=")] {
        let res = client.get(url).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            res.text().await.unwrap(),
            "Unauthorized: No username provided"
        );
    }
}

#[tokio::test]
async fn test_usr_empty_query_uses_header() {
    let server = common::start_server().await;

    let res = common::client()
        .get(server.url("/usr?username="))
        .header("username", "bob")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "Hello, bob!\n");
}

#[tokio::test]
async fn test_usr_empty_header_is_unauthorized() {
    let server = common::start_server().await;

    let res = common::client()
        .get(server.url("/usr"))
        .header("username", "")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_usr_echoes_value_verbatim() {
    let server = common::start_server().await;
    let client = common::client();

    let cases = [
        ("%3Cb%3Ehi%3C%2Fb%3E", "<b>hi</b>"),
        ("a%20b", "a b"),
        ("caf%C3%A9", "café"),
        ("x%26y%3Dz", "x&y=z"),
    ];
    for (encoded, decoded) in cases {
        let res = client
            .get(server.url(&format!("/usr?username={encoded}")))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.text().await.unwrap(), format!("Hello, {decoded}!\n"));
    }
}

#[tokio::test]
async fn test_usr_header_high_bytes_are_echoed_as_latin1() {
    let server = common::start_server().await;

    let res = common::client()
        .get(server.url("/usr"))
        .header("username", HeaderValue::from_bytes(b"caf\xe9").unwrap())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "Hello, caf\u{e9}!\n");
}

#[tokio::test]
async fn test_usr_undecodable_query_is_echoed_raw() {
    let server = common::start_server().await;
    let client = common::client();

    for raw in ["%FF", "50%25%zz"] {
        let res = client
            .get(server.url(&format!("/usr?username={raw}")))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.text().await.unwrap(), format!("Hello, {raw}!\n"));
    }
}

#[tokio::test]
async fn test_usr_duplicate_query_last_value_wins() {
    let server = common::start_server().await;

    let res = common::client()
        .get(server.url("/usr?username=first&username=second"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.text().await.unwrap(), "Hello, second!\n");
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let server = common::start_server().await;
    let client = common::client();

    for path in ["/unknown-path", "/usr/extra", "/ME"] {
        let res = client.get(server.url(path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "{path}");
    }
}

#[tokio::test]
async fn test_non_get_method_is_not_found() {
    let server = common::start_server().await;

    let res = common::client()
        .post(server.url("/usr?username=alice"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_oversized_json_body_is_rejected() {
    let mut config = greeting_server::ServerConfig::default();
    config.listener.host = "127.0.0.1".into();
    config.listener.port = 0;
    config.limits.body_limit_bytes = 16;
    let server = common::start_server_with(config).await;

    let res = common::client()
        .get(server.url("/"))
        .header("content-type", "application/json")
        .body(format!("{{\"pad\":\"{}\"}}", "x".repeat(1024)))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_large_text_body_on_root_is_ignored() {
    let server = common::start_server().await;

    let res = common::client()
        .get(server.url("/"))
        .header("content-type", "text/plain")
        .body(vec![b'x'; 150_000])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "Hello world!\n");
}

#[tokio::test]
async fn test_shutdown_stops_server() {
    let server = common::start_server().await;

    let res = common::client().get(server.url("/")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    server.shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), server.handle)
        .await
        .expect("server did not stop")
        .unwrap();
    assert!(result.is_ok());
}
