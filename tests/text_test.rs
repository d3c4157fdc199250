use email_reply_extract::*;

fn patterns(raw: &[&str]) -> TextPatternList {
    TextPatternList::compile(raw).unwrap()
}

fn window(lines: usize) -> LineWindow {
    LineWindow::new(lines).unwrap()
}

fn strip<'a>(text: &'a str, raw_patterns: &[&str], lines: usize) -> Vec<&'a str> {
    strip_quoted_text(
        text,
        DEFAULT_REPLY_MARKER,
        &patterns(raw_patterns),
        window(lines),
    )
}

// --- Line splitting ---

#[test]
fn test_split_lines_mixed_terminators() {
    let lines: Vec<&str> = split_lines("a\r\nb\rc\nd").collect();
    assert_eq!(lines, vec!["a", "b", "c", "d"]);
}

#[test]
fn test_split_lines_keeps_blank_lines() {
    let lines: Vec<&str> = split_lines("a\n\nb\n").collect();
    assert_eq!(lines, vec!["a", "", "b"]);
}

#[test]
fn test_split_lines_empty() {
    assert_eq!(split_lines("").count(), 0);
}

#[test]
fn test_split_lines_unicode_and_control_breaks() {
    let lines: Vec<&str> = split_lines("a\u{2028}b\u{2029}c\x0cd\x0be\u{85}f\x1cg").collect();
    assert_eq!(lines, vec!["a", "b", "c", "d", "e", "f", "g"]);
}

#[test]
fn test_line_separator_attribution_is_found() {
    let text = "Hi\u{2028}On Mon Bob wrote:\u{2028}> old";
    assert_eq!(extract_reply(&EmailBody::text(text)), "Hi");
}

#[test]
fn test_form_feed_separates_lines() {
    let text = "Thanks\x0c-----Original Message-----\x0cFrom: Bob";
    let lines = strip_quoted_text(
        text,
        DEFAULT_REPLY_MARKER,
        &TextPatternList::defaults(),
        LineWindow::default(),
    );
    assert_eq!(lines, vec!["Thanks"]);
}

// --- Explicit marker ---

#[test]
fn test_marker_cuts_at_its_line() {
    let text = "Approved\nthanks\n- Please type your reply above this line -\nRequest #42";
    assert_eq!(strip(text, &[], 2), vec!["Approved", "thanks"]);
}

#[test]
fn test_marker_as_substring() {
    let text = "Done\n## - Please type your reply above this line - ##\nold";
    assert_eq!(strip(text, &[], 2), vec!["Done"]);
}

#[test]
fn test_marker_on_first_line_keeps_nothing() {
    let text = "- Please type your reply above this line -\nold";
    assert!(strip(text, &[r"^old$"], 2).is_empty());
}

#[test]
fn test_marker_ignores_later_pattern() {
    let text = "Reply\n- Please type your reply above this line -\nOn Monday Bob wrote:";
    assert_eq!(strip(text, &[r"wrote:"], 2), vec!["Reply"]);
}

#[test]
fn test_pattern_before_marker_stops_first() {
    let text = "Reply\nOn Monday Bob wrote:\n- Please type your reply above this line -";
    assert_eq!(strip(text, &[r"wrote:"], 2), vec!["Reply"]);
}

#[test]
fn test_empty_marker_is_ignored() {
    let text = "one\ntwo";
    let lines = strip_quoted_text(text, "", &TextPatternList::default(), window(2));
    assert_eq!(lines, vec!["one", "two"]);
}

// --- Regex patterns ---

#[test]
fn test_no_match_keeps_everything() {
    let text = "Hello\n\nJust checking in.\nBob";
    assert_eq!(
        strip(text, &[r"wrote:$"], 2),
        vec!["Hello", "", "Just checking in.", "Bob"]
    );
}

#[test]
fn test_wrapped_header_joined_without_separator() {
    let text = "Onhas\nJan 1 wrote:\nhello";
    // Only the joined window "OnhasJan 1 wrote:" matches, so the cut lands
    // on the first line of the window
    assert!(strip(text, &[r"On.*wrote:"], 2).is_empty());
}

#[test]
fn test_wrapped_header_missed_with_single_line_window() {
    let text = "Onhas\nJan 1 wrote:\nhello";
    assert_eq!(
        strip(text, &[r"On.*wrote:"], 1),
        vec!["Onhas", "Jan 1 wrote:", "hello"]
    );
}

#[test]
fn test_realistic_wrapped_attribution() {
    let text = "Sure, Friday works.\n\
                \n\
                On Mon, Jan 6, 2025 at 9:00 AM Bob Smith <bob@example.com>\n\
                wrote:\n\
                > Can we meet?";
    let lines = strip_quoted_text(
        text,
        DEFAULT_REPLY_MARKER,
        &TextPatternList::defaults(),
        LineWindow::default(),
    );
    assert_eq!(lines, vec!["Sure, Friday works.", ""]);
}

#[test]
fn test_tightest_window_wins_for_a_pattern() {
    // "beta" alone matches, so the two-line window is never considered
    let text = "keep\nalpha\nbeta";
    assert_eq!(strip(text, &[r"beta"], 2), vec!["keep", "alpha"]);
}

#[test]
fn test_earliest_offset_wins_across_patterns() {
    let text = "keep\nalpha\nbeta";
    let expected = vec!["keep"];
    assert_eq!(strip(text, &[r"^beta$", r"^alphabeta$"], 2), expected);
    assert_eq!(strip(text, &[r"^alphabeta$", r"^beta$"], 2), expected);
}

#[test]
fn test_window_never_exceeds_available_lines() {
    let text = "On Monday Bob wrote:\nold";
    assert!(strip(text, &[r"wrote:"], 3).is_empty());
}

#[test]
fn test_default_patterns_original_message() {
    let text = "See attached.\n-----Original Message-----\nFrom: Bob";
    let lines = strip_quoted_text(
        text,
        DEFAULT_REPLY_MARKER,
        &TextPatternList::defaults(),
        LineWindow::default(),
    );
    assert_eq!(lines, vec!["See attached."]);
}

#[test]
fn test_default_patterns_outlook_header() {
    let text = "Will do.\nFrom: Bob Smith\nSent: Monday, January 6, 2025 9:00 AM\nTo: Alice";
    let lines = strip_quoted_text(
        text,
        DEFAULT_REPLY_MARKER,
        &TextPatternList::defaults(),
        LineWindow::default(),
    );
    assert_eq!(lines, vec!["Will do."]);
}

#[test]
fn test_default_patterns_french_attribution() {
    let text = "Merci !\nLe 6 janv. 2025 à 09:00, Bob a écrit :\n> Salut";
    let lines = strip_quoted_text(
        text,
        DEFAULT_REPLY_MARKER,
        &TextPatternList::defaults(),
        LineWindow::default(),
    );
    assert_eq!(lines, vec!["Merci !"]);
}

#[test]
fn test_invalid_pattern_rejected() {
    let err = TextPatternList::compile(["(unclosed"]).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidPattern { ref pattern, .. } if pattern == "(unclosed"));
}

#[test]
fn test_line_window_bounds() {
    assert!(LineWindow::new(0).is_err());
    assert!(LineWindow::new(MAX_LINE_WINDOW + 1).is_err());
    assert_eq!(LineWindow::new(MAX_LINE_WINDOW).unwrap().get(), MAX_LINE_WINDOW);
    assert_eq!(LineWindow::default().get(), DEFAULT_LINE_WINDOW);
}

// --- Normalization ---

#[test]
fn test_normalize_escapes_and_joins() {
    assert_eq!(normalize_lines(&["a b", "<c>"]), "a&nbsp;b<br>&lt;c&gt;");
}

#[test]
fn test_normalize_quotes_and_ampersand() {
    let result = normalize_lines(&["\"x\" & y"]);
    assert_eq!(result, "&quot;x&quot;&nbsp;&amp;&nbsp;y");
}

#[test]
fn test_normalize_empty_lines() {
    assert_eq!(normalize_lines(&["a", "", "b"]), "a<br><br>b");
    assert_eq!(normalize_lines::<&str>(&[]), "");
}

