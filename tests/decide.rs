use gavel::{Options, Record, Table, Value};

fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.iter().map(|s| (*s).to_owned()).collect())
        .collect()
}

fn routing_table(options: Options) -> Table {
    Table::parse(
        grid(&[
            &["in:topic", "in:region", "out:team"],
            &["sports", "Europe", "Alice"],
            &["sports", "", "Bob"],
            &["", "", "Carol"],
        ]),
        options,
    )
    .unwrap()
}

#[test]
fn first_match_plain_strings() {
    let table = routing_table(Options::default());

    let result = table.decide(&Record::new().set("topic", "sports").set("region", "Europe"));
    assert_eq!(result, Record::new().set("team", "Alice"));

    let result = table.decide(&Record::new().set("topic", "sports").set("region", "USA"));
    assert_eq!(result, Record::new().set("team", "Bob"));

    let result = table.decide(&Record::new().set("topic", "finance"));
    assert_eq!(result, Record::new().set("team", "Carol"));
}

#[test]
fn accumulate_no_predicates() {
    let table = Table::parse(
        grid(&[
            &["accumulate"],
            &["in:topic", "in:region", "out:team"],
            &["sports", "Europe", "Alice"],
            &["sports", "", "Bob"],
            &["", "", "Carol"],
        ]),
        Options::default(),
    )
    .unwrap();

    let result = table.decide(&Record::new().set("topic", "sports").set("region", "Europe"));
    assert_eq!(
        result,
        Record::new().set("team", vec!["Alice", "Bob", "Carol"])
    );
}

#[test]
fn accumulate_option_equivalent_to_options_row() {
    // The logical option set round-trips: passing accumulate through
    // `Options` behaves like the pre-header row.
    let by_option = routing_table(Options {
        first_match: false,
        ..Options::default()
    });
    let input = Record::new().set("topic", "sports").set("region", "Europe");
    assert_eq!(
        by_option.decide(&input),
        Record::new().set("team", vec!["Alice", "Bob", "Carol"])
    );
}

#[test]
fn pattern_matcher_explicit() {
    let table = Table::parse(
        grid(&[
            &["in:state", "out:verdict"],
            &["=~ ^hot|cold$", "extreme"],
        ]),
        Options::default(),
    )
    .unwrap();

    assert_eq!(
        table.decide(&Record::new().set("state", "hot")),
        Record::new().set("verdict", "extreme")
    );
    assert!(table.decide(&Record::new().set("state", "warm")).is_empty());
}

#[test]
fn if_output_guard_gates_rows() {
    let table = Table::parse(
        grid(&[
            &["in:x", "out:y", "if:"],
            &["1", "10", ":y == 10"],
            &["1", "20", ":y == 10"],
        ]),
        Options::default(),
    )
    .unwrap();

    // Row 0 is tested first and already satisfies its own guard.
    assert_eq!(
        table.decide(&Record::new().set("x", 1_i64)),
        Record::new().set("y", 10_i64)
    );
}

#[test]
fn if_output_guard_rejection_resumes_scan() {
    let table = Table::parse(
        grid(&[
            &["in:x", "out:y", "if:"],
            &["1", "20", ":y == 10"],
            &["1", "10", ":y == 10"],
        ]),
        Options::default(),
    )
    .unwrap();

    assert_eq!(
        table.decide(&Record::new().set("x", 1_i64)),
        Record::new().set("y", 10_i64)
    );
}

#[test]
fn index_partitions_constant_key_column() {
    // Column in:country is constant per row; the other input column is a
    // predicate, so the index keys on country alone.
    let mut rows: Vec<Vec<String>> = vec![
        vec!["in:country".into(), "in:age".into(), "out:bucket".into()],
    ];
    let countries = ["JP", "US", "DE", "FR"];
    for i in 0..1000 {
        let country = countries[i % countries.len()];
        rows.push(vec![
            country.to_owned(),
            format!(">= {}", (i / countries.len()) % 100),
            format!("b{i}"),
        ]);
    }
    let table = Table::parse(rows, Options::default()).unwrap();
    assert!(table.indexed());

    let result = table.decide(&Record::new().set("country", "JP").set("age", 1000_i64));
    // Row 0 is the first JP row and matches ">= 0".
    assert_eq!(result, Record::new().set("bucket", "b0"));

    let result = table.decide(&Record::new().set("country", "XX").set("age", 1000_i64));
    assert!(result.is_empty());
}

#[test]
fn index_handles_non_contiguous_key_runs() {
    let table = Table::parse(
        grid(&[
            &["in:country", "in:age", "out:bucket"],
            &["JP", "> 10", "a"],
            &["JP", "> 20", "b"],
            &["US", "> 10", "c"],
            &["JP", "> 30", "d"],
        ]),
        Options {
            first_match: false,
            ..Options::default()
        },
    )
    .unwrap();
    assert!(table.indexed());

    // JP rows sit at 0, 1, and 3; the index must visit both runs in order.
    let input = Record::new().set("country", "JP").set("age", 25_i64);
    assert_eq!(table.decide(&input), Record::new().set("bucket", vec!["a", "b"]));

    let input = Record::new().set("country", "US").set("age", 25_i64);
    assert_eq!(table.decide(&input), Record::new().set("bucket", "c"));
}

#[test]
fn predicate_country_column_disables_index_same_semantics() {
    let table = Table::parse(
        grid(&[
            &["in:country", "in:age", "out:bucket"],
            &[":country", "> 10", "a"],
            &[":country", "> 20", "b"],
        ]),
        Options {
            first_match: false,
            ..Options::default()
        },
    )
    .unwrap();
    assert!(!table.indexed());

    let input = Record::new().set("country", "JP").set("age", 25_i64);
    assert_eq!(table.decide(&input), Record::new().set("bucket", vec!["a", "b"]));
}

#[test]
fn path_table_first_match_in_declaration_order() {
    let table = Table::parse(
        grid(&[
            &["path:", "in:status", "out:queue"],
            &["user", "new", "onboarding"],
            &["order", "new", "fulfillment"],
        ]),
        Options::default(),
    )
    .unwrap();

    let input = Record::new()
        .set("user.status", "new")
        .set("order.status", "new");
    assert_eq!(
        table.decide(&input),
        Record::new().set("queue", "onboarding")
    );

    let input = Record::new()
        .set("user.status", "known")
        .set("order.status", "new");
    assert_eq!(
        table.decide(&input),
        Record::new().set("queue", "fulfillment")
    );

    assert!(table.decide(&Record::new()).is_empty());
}

#[test]
fn output_symbol_copies_input_field() {
    let table = Table::parse(
        grid(&[&["in:topic", "out:original"], &["sports", ":topic"]]),
        Options::default(),
    )
    .unwrap();

    assert_eq!(
        table.decide(&Record::new().set("topic", "sports")),
        Record::new().set("original", "sports")
    );
}

#[test]
fn guard_column_filters_on_whole_record() {
    let table = Table::parse(
        grid(&[
            &["in:product", "guard:", "out:desk"],
            &["bond", ":region == 'EU'", "frankfurt"],
            &["bond", ":region == 'US'", "chicago"],
            &["bond", "", "fallback"],
        ]),
        Options::default(),
    )
    .unwrap();

    let result = table.decide(&Record::new().set("product", "bond").set("region", "US"));
    assert_eq!(result, Record::new().set("desk", "chicago"));

    let result = table.decide(&Record::new().set("product", "bond"));
    assert_eq!(result, Record::new().set("desk", "fallback"));
}

#[test]
fn set_defaults_feed_matching() {
    let table = Table::parse(
        grid(&[
            &["set/nil:region", "in:region", "out:desk"],
            &["EU", "EU", "frankfurt"],
            &["", "US", "chicago"],
        ]),
        Options::default(),
    )
    .unwrap();

    // Missing region defaults to EU before scanning.
    assert_eq!(
        table.decide(&Record::new()),
        Record::new().set("desk", "frankfurt")
    );
    assert_eq!(
        table.decide(&Record::new().set("region", "US")),
        Record::new().set("desk", "chicago")
    );
}

#[test]
fn typed_outputs() {
    let table = Table::parse(
        grid(&[
            &["in:tier", "out:limit", "out:flag"],
            &["gold", "10000", "true"],
            &["basic", "100", "false"],
        ]),
        Options::default(),
    )
    .unwrap();

    let result = table.decide(&Record::new().set("tier", "gold"));
    assert_eq!(result.get("limit"), Some(&Value::Int(10000)));
    assert_eq!(result.get("flag"), Some(&Value::Bool(true)));
}

#[test]
fn decide_is_deterministic() {
    let table = routing_table(Options {
        first_match: false,
        ..Options::default()
    });
    let input = Record::new().set("topic", "sports").set("region", "Europe");
    let first = table.decide(&input);
    for _ in 0..5 {
        assert_eq!(table.decide(&input), first);
    }
}

#[test]
fn concurrent_queries_share_one_table() {
    use std::sync::Arc;

    let table = Arc::new(routing_table(Options::default()));
    let mut handles = Vec::new();
    for i in 0..4 {
        let table = Arc::clone(&table);
        handles.push(std::thread::spawn(move || {
            let topic = if i % 2 == 0 { "sports" } else { "finance" };
            let result = table.decide(&Record::new().set("topic", topic));
            assert!(!result.is_empty());
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }
}
