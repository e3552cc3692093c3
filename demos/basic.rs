use gavel::{Options, Record, Table};

fn main() {
    // A routing table: first matching row wins.
    let table = Table::from_csv(
        "in:topic, in:region, out:team\n\
         sports,   Europe,    Alice\n\
         sports,   ,          Bob\n\
         ,         ,          Carol\n",
        Options::default(),
    )
    .expect("failed to compile table");

    println!("{table}");

    for (topic, region) in [("sports", "Europe"), ("sports", "USA"), ("finance", "Asia")] {
        let input = Record::new().set("topic", topic).set("region", region);
        let result = table.decide(&input);
        println!("topic={topic} region={region} -> {result}");
    }
}
