//! Integration tests for the terminal browser
//!
//! Drives a full session from scripted input and checks both the rendered
//! text and the router state it leaves behind.

mod helpers;

use cratedig_browser::browse::BrowseSession;
use cratedig_browser::router::{Location, SessionState};
use helpers::{fixture_catalog, opera_resolver};

/// Run `script` from `start`; returns the final router state and all output
async fn run_script(start: &str, script: &str) -> (SessionState, String) {
    let mut session =
        BrowseSession::start(fixture_catalog().await, opera_resolver(), Vec::new(), start).await;
    session
        .run(script.as_bytes())
        .await
        .expect("Should read scripted input");

    let state = session.router().state().clone();
    let output = String::from_utf8(session.into_output()).unwrap();
    (state, output)
}

#[tokio::test]
async fn test_search_open_and_back() {
    let (state, output) = run_script("/", "/queen\nopen 1\nback\nquit\n").await;

    assert!(output.contains("All records"));
    assert!(output.contains("5 result(s) found"));
    assert!(output.contains("Search: queen"));
    assert!(output.contains("2 result(s) found"));
    assert!(output.contains("== A Night at the Opera =="));
    assert!(output.contains("fourth studio album"));
    assert!(output.contains("Bohemian Rhapsody"));

    assert_eq!(state.location, Location::Home);
    assert_eq!(state.query, "queen");
    assert_eq!(state.current_page, 1);
}

#[tokio::test]
async fn test_forward_reopens_details() {
    let (state, _) = run_script("/", "open queen-a-night-at-the-opera\nb\nf\n").await;

    assert_eq!(
        state.location,
        Location::Details("queen-a-night-at-the-opera".into())
    );
}

#[tokio::test]
async fn test_unresolved_details_show_fallback_copy() {
    let (_, output) = run_script("/#miles-davis-kind-of-blue", "quit\n").await;

    assert!(output.contains("== Kind of Blue =="));
    assert!(output.contains("No description found."));
    assert!(output.contains("No tracklist found."));
}

#[tokio::test]
async fn test_unknown_start_fragment_falls_back_to_list() {
    let (state, output) = run_script("/#not-a-record", "").await;

    assert_eq!(state.location, Location::Home);
    assert!(output.contains("All records"));
}

#[tokio::test]
async fn test_no_results_and_unknown_command() {
    let (_, output) = run_script("/", "/beatles\ndance\nback\n").await;

    assert!(output.contains("No results found"));
    assert!(output.contains("0 result(s) found"));
    assert!(output.contains("Unknown command: dance"));
    assert!(output.contains("Already at the oldest entry"));
}
