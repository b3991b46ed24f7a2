// ABOUTME: Tests for interactive server selection from the numbered menu
// Verifies auto-selection, re-prompting on bad input and the EOF abort path

use enterthematrix::app::ContainerSelector;
use enterthematrix::models::Container;
use enterthematrix::EnterError;
use pretty_assertions::assert_eq;
use std::io::{BufRead, BufReader, Cursor, Read, Write};

fn servers(names: &[&str]) -> Vec<Container> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| Container::new(format!("id{}", i), vec![format!("/{}", name)]))
        .collect()
}

fn select(candidates: Vec<Container>, input: &str) -> (Result<Container, EnterError>, String) {
    let mut output = Vec::new();
    let result = ContainerSelector::new(Cursor::new(input.as_bytes()), &mut output).select(candidates);
    (result, String::from_utf8(output).unwrap())
}

#[test]
fn test_single_candidate_is_selected_without_reading_input() {
    // BEHAVIOR: the lone server is chosen and the input stream is left untouched
    let mut input = Cursor::new(b"leftover\n".to_vec());
    let mut output = Vec::new();

    let chosen = ContainerSelector::new(&mut input, &mut output)
        .select(servers(&["web_deadbeef"]))
        .unwrap();

    assert_eq!(chosen.id, "id0");
    assert_eq!(
        String::from_utf8(output).unwrap(),
        "Automatically selected web_deadbeef, as it's the only running server.\n"
    );

    let mut rest = String::new();
    input.read_to_string(&mut rest).unwrap();
    assert_eq!(rest, "leftover\n");
}

#[test]
fn test_menu_lists_candidates_in_order() {
    let (result, output) = select(servers(&["web_deadbeef", "api_0badc0de", "jobs_12345678"]), "2\n");

    assert_eq!(result.unwrap().id, "id2");
    assert_eq!(
        output,
        "There are 3 running servers:\n [0] web_deadbeef\n [1] api_0badc0de\n [2] jobs_12345678\n\nChoice: "
    );
}

#[test]
fn test_invalid_input_is_retried_until_valid() {
    // BEHAVIOR: garbage and out-of-range input never end the loop
    let (result, output) = select(servers(&["web_deadbeef", "api_0badc0de"]), "abc\n\n7\n-3\n1\n");

    assert_eq!(result.unwrap().id, "id1");
    assert_eq!(output.matches("Choice: ").count(), 5);
    assert_eq!(output.matches("doesn't look like a number").count(), 2);
    assert_eq!(
        output.matches("Please enter a number between 0 and 1 inclusive.").count(),
        2
    );
}

#[test]
fn test_first_valid_choice_wins() {
    let (result, _) = select(servers(&["a_00000000", "b_11111111", "c_22222222"]), "0\n2\n");
    assert_eq!(result.unwrap().id, "id0");
}

#[test]
fn test_choice_with_surrounding_whitespace() {
    let (result, _) = select(servers(&["a_00000000", "b_11111111"]), "  1  \r\n");
    assert_eq!(result.unwrap().id, "id1");
}

#[test]
fn test_input_closed_before_choice_aborts() {
    let (result, output) = select(servers(&["a_00000000", "b_11111111"]), "nope\n");

    assert!(matches!(result, Err(EnterError::SelectionAborted(_))));
    assert!(output.contains("doesn't look like a number"));
}

#[test]
fn test_no_candidates_is_an_error() {
    let (result, output) = select(Vec::new(), "0\n");
    assert!(matches!(result, Err(EnterError::NoCandidates)));
    assert!(output.is_empty());
}

#[test]
fn test_selection_consumes_only_the_chosen_line() {
    let mut input = Cursor::new(b"1\nls\n".to_vec());
    let mut output = Vec::new();

    ContainerSelector::new(&mut input, &mut output)
        .select(servers(&["a_00000000", "b_11111111"]))
        .unwrap();

    let mut rest = String::new();
    input.read_line(&mut rest).unwrap();
    assert_eq!(rest, "ls\n");
}

#[cfg(unix)]
#[test]
fn test_input_past_the_choice_stays_with_the_reader() {
    // BEHAVIOR: a buffered reader over a real fd may read ahead of the chosen line;
    // those bytes must come back with the reader instead of being dropped
    let (mut typist, prompt_fd) = std::os::unix::net::UnixStream::pair().unwrap();
    typist.write_all(b"1\necho hi\n").unwrap();
    drop(typist);

    let mut output = Vec::new();
    let mut selector = ContainerSelector::new(BufReader::new(prompt_fd), &mut output);
    let chosen = selector
        .select(servers(&["a_00000000", "b_11111111"]))
        .unwrap();
    assert_eq!(chosen.id, "id1");

    let mut rest = Vec::new();
    selector.into_input().read_to_end(&mut rest).unwrap();
    assert_eq!(rest, b"echo hi\n".to_vec());
}
