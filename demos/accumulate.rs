use gavel::{Options, Record, Table};

fn main() {
    // Accumulate mode collects every matching row; guard columns filter on
    // the whole input record.
    let table = Table::from_csv(
        "accumulate\n\
         in:product, guard:,            out:desk\n\
         bond,       :region == 'EU',   frankfurt\n\
         bond,       ,                  treasury\n\
         equity,     :notional > 1000,  block\n\
         equity,     ,                  cash\n",
        Options::default(),
    )
    .expect("failed to compile table");

    println!("{table}");

    let input = Record::new().set("product", "bond").set("region", "EU");
    println!("bond/EU      -> {}", table.decide(&input));

    let input = Record::new()
        .set("product", "equity")
        .set("notional", 5000_i64);
    println!("equity/5000  -> {}", table.decide(&input));

    let input = Record::new().set("product", "equity").set("notional", 10_i64);
    println!("equity/10    -> {}", table.decide(&input));
}
