use std::fmt::{Display, Formatter};

use mkp_rs::eval::Report;

/// Console rendering of a [`Report`]: one block per used bin followed by the evaluation.
pub struct ConsoleReport<'a> {
    pub title: &'a str,
    pub report: &'a Report,
    /// Whether optimality of the underlying solution was proven
    pub optimal: bool,
}

impl Display for ConsoleReport<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let Report { bins, evaluation } = self.report;

        if bins.is_empty() {
            return writeln!(f, "The problem does not have an optimal solution.");
        }

        writeln!(f, "Results for {}:", self.title)?;
        if !self.optimal {
            writeln!(f, "(search was cut off, the solution below is not proven optimal)")?;
        }
        for bin in bins {
            writeln!(f)?;
            writeln!(f, "Bin {}", bin.bin)?;
            writeln!(f, "Total weight: {:.2}", bin.total_weight)?;
            writeln!(f, "Total price: {:.2}", bin.total_price)?;
            writeln!(f, "Total rating: {:.2}", bin.total_rating)?;
            for item in &bin.items {
                writeln!(
                    f,
                    "Item: {}, Weight: {:.2}, Price: {:.2}, Rating: {:.2}",
                    item.item, item.weight, item.price, item.rating
                )?;
            }
        }

        writeln!(f)?;
        writeln!(f, "Solution Evaluation:")?;
        writeln!(f, "Total Rating: {:.2}", evaluation.total_rating)?;
        writeln!(f, "Total Weight: {:.2}", evaluation.total_weight)?;
        writeln!(f, "Total Price: {:.2}", evaluation.total_price)?;
        writeln!(f, "Items Used: {}", evaluation.items_used)?;
        writeln!(f, "Bins Used: {}", evaluation.bins_used)?;
        for (metric, value) in evaluation.utilizations() {
            let label = capitalize(&metric.to_string());
            match value {
                Ok(v) => writeln!(f, "{label} (%): {v:.2}")?,
                Err(_) => writeln!(f, "{label} (%): undefined (division by zero)")?,
            }
        }
        Ok(())
    }
}

fn capitalize(label: &str) -> String {
    label
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
