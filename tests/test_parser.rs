use wicket::http::parser::{ParseError, parse_http_request};
use wicket::http::request::Method;

#[test]
fn test_parse_simple_get_request() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::GET);
    assert_eq!(parsed.path, "/");
    assert_eq!(parsed.version, "HTTP/1.1");
    assert_eq!(parsed.headers, vec!["Host: example.com".to_string()]);
    assert!(parsed.body.is_none());
}

#[test]
fn test_parse_request_without_headers() {
    let parsed = parse_http_request(b"GET /missing HTTP/1.1\r\n\r\n").unwrap();

    assert_eq!(parsed.path, "/missing");
    assert!(parsed.headers.is_empty());
}

#[test]
fn test_parse_preserves_header_order() {
    let req = b"GET /path HTTP/1.1\r\nHost: example.com\r\nUser-Agent: test-client\r\nAccept: */*\r\n\r\n";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(
        parsed.headers,
        vec![
            "Host: example.com".to_string(),
            "User-Agent: test-client".to_string(),
            "Accept: */*".to_string(),
        ]
    );
}

#[test]
fn test_parse_header_without_colon_is_kept_raw() {
    let req = b"GET / HTTP/1.1\r\nBrokenHeader\r\n\r\n";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.headers, vec!["BrokenHeader".to_string()]);
    assert_eq!(parsed.header("BrokenHeader"), None);
}

#[test]
fn test_parse_strips_query_string_from_path() {
    let req = b"GET /search?q=rust&q=tokio&page=2 HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.path, "/search");
    assert_eq!(parsed.query_param("q"), vec!["rust", "tokio"]);
    assert_eq!(parsed.query_params.get("page"), Some("2"));
}

#[test]
fn test_parse_query_percent_and_plus_decoding() {
    let req = b"GET /s?name=John+Doe&city=S%C3%A3o%20Paulo HTTP/1.1\r\n\r\n";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.query_params.get("name"), Some("John Doe"));
    assert_eq!(parsed.query_params.get("city"), Some("São Paulo"));
}

#[test]
fn test_parse_query_skips_undecodable_pair() {
    let req = b"GET /s?bad=%C3%28&good=1 HTTP/1.1\r\n\r\n";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.query_params.len(), 1);
    assert_eq!(parsed.query_params.get("good"), Some("1"));
}

#[test]
fn test_parse_post_form_body() {
    // "a=b&c": c has no '=' and decodes to an empty value
    let req = b"POST /messages HTTP/1.1\r\nContent-Length: 5\r\n\r\na=b&c";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::POST);
    assert_eq!(parsed.body, Some(b"a=b&c".to_vec()));
    assert_eq!(parsed.post_params.len(), 2);
    assert_eq!(parsed.post_params.get("a"), Some("b"));
    assert_eq!(parsed.post_params.get("c"), Some(""));
}

#[test]
fn test_parse_post_ignores_bytes_past_content_length() {
    let req = b"POST /api HTTP/1.1\r\nContent-Length: 3\r\n\r\nx=1&y=2";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.body, Some(b"x=1".to_vec()));
    assert_eq!(parsed.post_params.get("y"), None);
}

#[test]
fn test_parse_post_truncates_short_body() {
    let req = b"POST /api HTTP/1.1\r\nContent-Length: 10\r\n\r\nhello";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.body, Some(b"hello".to_vec()));
}

#[test]
fn test_parse_post_without_content_length_has_no_body() {
    let req = b"POST /api HTTP/1.1\r\nHost: x\r\n\r\na=b";
    let parsed = parse_http_request(req).unwrap();

    assert!(parsed.body.is_none());
    assert!(parsed.post_params.is_empty());
}

#[test]
fn test_parse_post_invalid_content_length_has_no_body() {
    for value in ["abc", "-5"] {
        let req = format!("POST /api HTTP/1.1\r\nContent-Length: {}\r\n\r\na=b", value);
        let parsed = parse_http_request(req.as_bytes()).unwrap();
        assert!(parsed.body.is_none(), "Content-Length {value}");
    }
}

#[test]
fn test_parse_first_content_length_wins() {
    let req = b"POST /api HTTP/1.1\r\ncontent-length: 1\r\nContent-Length: 3\r\n\r\nabc";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.body, Some(b"a".to_vec()));
}

#[test]
fn test_parse_get_ignores_body() {
    let req = b"GET /api HTTP/1.1\r\nContent-Length: 3\r\n\r\na=b";
    let parsed = parse_http_request(req).unwrap();

    assert!(parsed.body.is_none());
    assert!(parsed.post_params.is_empty());
}

#[test]
fn test_parse_post_non_form_content_type() {
    let req = b"POST /api HTTP/1.1\r\nContent-Type: application/json\r\nContent-Length: 7\r\n\r\n{\"a\":1}";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.body, Some(b"{\"a\":1}".to_vec()));
    assert!(parsed.post_params.is_empty());
}

#[test]
fn test_parse_post_form_content_type_with_charset() {
    let req = b"POST /api HTTP/1.1\r\nContent-Type: Application/X-WWW-Form-Urlencoded; charset=utf-8\r\nContent-Length: 3\r\n\r\nk=v";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.post_params.get("k"), Some("v"));
}

#[test]
fn test_parse_binary_body() {
    let req = b"POST /upload HTTP/1.1\r\nContent-Type: application/octet-stream\r\nContent-Length: 4\r\n\r\n\x00\x01\x02\x03";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.body, Some(vec![0, 1, 2, 3]));
}

#[test]
fn test_parse_missing_request_line_terminator() {
    let result = parse_http_request(b"GET / HTTP/1.1");
    assert_eq!(result.unwrap_err(), ParseError::MissingRequestLine);
}

#[test]
fn test_parse_missing_header_terminator() {
    let result = parse_http_request(b"GET / HTTP/1.1\r\nHost: example.com\r\n");
    assert_eq!(result.unwrap_err(), ParseError::MissingHeaderTerminator);
}

#[test]
fn test_parse_single_token_request_line() {
    let result = parse_http_request(b"BADLINE\r\n\r\n");
    assert_eq!(result.unwrap_err(), ParseError::InvalidRequestLine);
}

#[test]
fn test_parse_wrong_token_counts() {
    let lines = [
        "GET /\r\n\r\n",
        "GET / HTTP/1.1 extra\r\n\r\n",
        "GET  / HTTP/1.1\r\n\r\n",
        "GET / HTTP/1.1 \r\n\r\n",
        "\r\n\r\n",
    ];

    for line in lines {
        let result = parse_http_request(line.as_bytes());
        assert_eq!(result.unwrap_err(), ParseError::InvalidRequestLine, "{line:?}");
    }
}

#[test]
fn test_parse_disallowed_methods() {
    for method in ["PUT", "DELETE", "HEAD", "OPTIONS", "PATCH", "get", "INVALID"] {
        let req = format!("{} / HTTP/1.1\r\n\r\n", method);
        let result = parse_http_request(req.as_bytes());
        assert_eq!(result.unwrap_err(), ParseError::InvalidMethod, "{method}");
    }
}

#[test]
fn test_parse_path_must_start_with_slash() {
    for target in ["index.html", "*", "http://example.com/", "?q=1"] {
        let req = format!("GET {} HTTP/1.1\r\n\r\n", target);
        let result = parse_http_request(req.as_bytes());
        assert_eq!(result.unwrap_err(), ParseError::InvalidPath, "{target}");
    }
}

#[test]
fn test_parse_non_utf8_request_line() {
    let result = parse_http_request(b"GET /\xff HTTP/1.1\r\n\r\n");
    assert_eq!(result.unwrap_err(), ParseError::InvalidRequestLine);
}

#[test]
fn test_parse_truncated_oversized_headers_is_malformed() {
    // What a 4096-byte read leaves of a request whose headers do not fit.
    let mut req = b"GET / HTTP/1.1\r\nX-Big: ".to_vec();
    req.resize(4096, b'a');

    let result = parse_http_request(&req);
    assert_eq!(result.unwrap_err(), ParseError::MissingHeaderTerminator);
}

#[test]
fn test_parse_never_panics_on_garbage() {
    let inputs: [&[u8]; 6] = [
        b"",
        b"\r\n",
        b"\r\n\r\n",
        b"\x00\x01\x02\r\n\r\n",
        b"POST / HTTP/1.1\r\nContent-Length: 99999999999999999999\r\n\r\n",
        b"POST / HTTP/1.1\r\nContent-Length: 5\r\n\r\n",
    ];

    for input in inputs {
        let _ = parse_http_request(input);
    }
}
