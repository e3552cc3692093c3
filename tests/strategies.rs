use gavel::{Options, Record, Table, Value};
use proptest::prelude::*;

// --- Fixed table schema ---
// in:topic  : one of {"sports", "finance", "politics"} or empty (wildcard)
// in:region : one of {"eu", "us", "ap"} or empty (wildcard)
// out:team  : one of a small pool of names

pub const TOPICS: &[&str] = &["sports", "finance", "politics"];
pub const REGIONS: &[&str] = &["eu", "us", "ap"];
pub const TEAMS: &[&str] = &["Alice", "Bob", "Carol", "Dave", "Eve"];

/// One generated data row: topic cell, region cell, team cell.
#[derive(Debug, Clone)]
pub struct GenRow {
    pub topic: String,
    pub region: String,
    pub team: String,
}

/// A generated constant-only decision table.
#[derive(Debug, Clone)]
pub struct GenTable {
    pub rows: Vec<GenRow>,
}

impl GenTable {
    fn grid(&self, accumulate: bool) -> Vec<Vec<String>> {
        let mut grid: Vec<Vec<String>> = Vec::new();
        if accumulate {
            grid.push(vec!["accumulate".to_owned()]);
        }
        grid.push(vec![
            "in:topic".to_owned(),
            "in:region".to_owned(),
            "out:team".to_owned(),
        ]);
        for row in &self.rows {
            grid.push(vec![row.topic.clone(), row.region.clone(), row.team.clone()]);
        }
        grid
    }

    /// Compile in first-match mode.
    ///
    /// # Panics
    ///
    /// Panics if the generated grid fails to compile (should not happen with
    /// valid generators).
    #[must_use]
    pub fn compile_first_match(&self) -> Table {
        Table::parse(self.grid(false), Options::default()).expect("generated table should compile")
    }

    /// Compile in accumulate mode (via a pre-header options row).
    #[must_use]
    pub fn compile_accumulate(&self) -> Table {
        Table::parse(self.grid(true), Options::default()).expect("generated table should compile")
    }

    /// Brute-force oracle: the teams of every row matching the input, in row
    /// order. An empty cell matches anything.
    #[must_use]
    pub fn matching_teams(&self, topic: &str, region: &str) -> Vec<String> {
        self.rows
            .iter()
            .filter(|row| {
                (row.topic.is_empty() || row.topic == topic)
                    && (row.region.is_empty() || row.region == region)
            })
            .map(|row| row.team.clone())
            .collect()
    }
}

/// What the engine should return for a list of picked teams.
#[must_use]
pub fn expected_accumulate(teams: &[String]) -> Record {
    match teams {
        [] => Record::new(),
        [team] => Record::new().set("team", team.as_str()),
        many => Record::new().set(
            "team",
            Value::List(many.iter().map(|t| Value::from(t.as_str())).collect()),
        ),
    }
}

fn arb_cell(choices: &'static [&'static str]) -> impl Strategy<Value = String> {
    prop_oneof![
        3 => prop::sample::select(choices).prop_map(str::to_owned),
        1 => Just(String::new()),
    ]
}

fn arb_row() -> impl Strategy<Value = GenRow> {
    (
        arb_cell(TOPICS),
        arb_cell(REGIONS),
        prop::sample::select(TEAMS),
    )
        .prop_map(|(topic, region, team)| GenRow {
            topic,
            region,
            team: team.to_owned(),
        })
}

/// Generate a table of 1..=12 constant rows. Tables whose topic and region
/// columns happen to have no empty cells exercise the indexed scan; the rest
/// exercise the linear scan.
pub fn arb_table() -> impl Strategy<Value = GenTable> {
    prop::collection::vec(arb_row(), 1..=12).prop_map(|rows| GenTable { rows })
}

/// Generate an input record over the schema, sometimes missing fields.
pub fn arb_input() -> impl Strategy<Value = (String, String)> {
    (
        prop_oneof![
            4 => prop::sample::select(TOPICS).prop_map(str::to_owned),
            1 => Just("other".to_owned()),
        ],
        prop_oneof![
            4 => prop::sample::select(REGIONS).prop_map(str::to_owned),
            1 => Just("elsewhere".to_owned()),
        ],
    )
}

/// Build the engine-side input record.
#[must_use]
pub fn input_record(topic: &str, region: &str) -> Record {
    Record::new().set("topic", topic).set("region", region)
}
