use super::*;

fn test_client(base_url: &str) -> YoutubeClient {
    YoutubeClient::with_base_url("test-key", 30, "ytsent-test/0.1", base_url)
        .expect("client construction should not fail")
}

#[test]
fn comment_threads_url_has_expected_query() {
    let client = test_client("https://www.googleapis.com/youtube/v3");
    let url = client.comment_threads_url("abc123", 20, None).unwrap();
    assert_eq!(
        url.as_str(),
        "https://www.googleapis.com/youtube/v3/commentThreads?key=test-key&textFormat=plainText&part=snippet&videoId=abc123&maxResults=20&order=relevance"
    );
}

#[test]
fn comment_threads_url_appends_page_token() {
    let client = test_client("https://www.googleapis.com/youtube/v3/");
    let url = client
        .comment_threads_url("abc123", 100, Some("TOKEN+1"))
        .unwrap();
    assert!(
        url.as_str().ends_with("&pageToken=TOKEN%2B1"),
        "page token should be appended and encoded: {url}"
    );
}

#[test]
fn comment_threads_url_clamps_page_size() {
    let client = test_client("https://www.googleapis.com/youtube/v3");
    let url = client.comment_threads_url("abc", 5000, None).unwrap();
    assert!(url.as_str().contains("maxResults=100"), "{url}");
}

#[test]
fn invalid_base_url_is_rejected() {
    let result = YoutubeClient::with_base_url("k", 30, "ua", "not a url");
    assert!(matches!(result, Err(CommentsError::InvalidBaseUrl { .. })));
}
