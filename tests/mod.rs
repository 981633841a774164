mod helpers;

#[test]
fn fixtures_are_present_and_readable() {
    let config = helpers::read_fixture("rupiah.json");
    let events = helpers::read_fixture("rupiah_typing.jsonl");
    let expected = helpers::read_fixture("rupiah_typing.expected");

    assert!(config.contains("\"decimalDigits\""));
    assert!(events.lines().all(|line| line.is_empty() || line.starts_with('{')));
    assert_eq!(
        expected.lines().count(),
        events.lines().filter(|line| !line.is_empty()).count()
    );
}
