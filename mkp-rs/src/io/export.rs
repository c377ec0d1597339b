use crate::entities::{Catalog, Placement, Solution};
use crate::eval::{Evaluation, ExportRow, Report};
use crate::io::ext_repr::{ExtBin, ExtEvaluation, ExtPlacedItem, ExtSolution};
use std::io::Write;

/// Header of the flattened CSV export.
pub const CSV_HEADER: [&str; 5] = ["Bin", "Item", "Weight", "Price", "Rating"];

/// Exports a [`Solution`] by composing an [`ExtSolution`] from its [`Report`].
pub fn export_solution(catalog: &Catalog, solution: &Solution) -> ExtSolution {
    let report = Report::new(catalog, solution);

    let bins = report
        .bins
        .iter()
        .map(|b| ExtBin {
            bin: b.bin,
            items: b
                .items
                .iter()
                .map(|i| ExtPlacedItem {
                    item: i.item.clone(),
                    weight: i.weight,
                    price: i.price,
                    rating: i.rating,
                })
                .collect(),
            total_weight: b.total_weight,
            total_price: b.total_price,
            total_rating: b.total_rating,
        })
        .collect();

    let unassigned = solution
        .assignment
        .placements()
        .iter()
        .enumerate()
        .filter(|(_, p)| **p == Placement::Unassigned)
        .map(|(id, _)| catalog.item(id).name.clone())
        .collect();

    ExtSolution {
        group: catalog.group.clone(),
        num_bins: solution.num_bins(),
        max_weight: solution.capacity.weight,
        max_price: solution.capacity.price,
        optimal: solution.optimal,
        bins,
        unassigned,
        evaluation: export_evaluation(&report.evaluation),
    }
}

pub fn export_evaluation(eval: &Evaluation) -> ExtEvaluation {
    ExtEvaluation {
        total_rating: eval.total_rating,
        total_weight: eval.total_weight,
        total_price: eval.total_price,
        items_used: eval.items_used,
        bins_used: eval.bins_used,
        weight_utilization: eval.weight_utilization.ok(),
        price_utilization: eval.price_utilization.ok(),
        item_utilization: eval.item_utilization.ok(),
        bin_utilization: eval.bin_utilization.ok(),
    }
}

/// Writes the flattened rows as CSV, preceded by [`CSV_HEADER`].
pub fn write_csv_rows(rows: &[ExportRow], mut writer: impl Write) -> std::io::Result<()> {
    writeln!(writer, "{}", CSV_HEADER.join(","))?;
    for row in rows {
        writeln!(
            writer,
            "{},{},{},{},{}",
            row.bin,
            csv_field(&row.item),
            row.weight,
            row.price,
            row.rating
        )?;
    }
    writer.flush()
}

fn csv_field(value: &str) -> String {
    match value.contains([',', '"', '\n', '\r']) {
        true => format!("\"{}\"", value.replace('"', "\"\"")),
        false => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Assignment, MKProblem};

    #[test]
    fn csv_quotes_awkward_names() {
        let rows = vec![
            ExportRow {
                bin: 1,
                item: "Cafe \"De Post\", terrace".into(),
                weight: 1.5,
                price: 2.0,
                rating: 4.0,
            },
            ExportRow {
                bin: 2,
                item: "Belfry".into(),
                weight: 3.0,
                price: 0.0,
                rating: 8.5,
            },
        ];
        let mut buffer = Vec::new();
        write_csv_rows(&rows, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "Bin,Item,Weight,Price,Rating");
        assert_eq!(lines[1], "1,\"Cafe \"\"De Post\"\", terrace\",1.5,2,4");
        assert_eq!(lines[2], "2,Belfry,3,0,8.5");
    }

    #[test]
    fn export_lists_unassigned_items_and_null_metrics() {
        let mut catalog = Catalog::new(None);
        catalog
            .add_item("a", 1.0, 0.0, 2.0)
            .unwrap()
            .add_item("b", 1.0, 0.0, 1.0)
            .unwrap();
        let problem = MKProblem::new(&catalog, 1, 1.0, 0.0).unwrap();
        let assignment = Assignment::from(vec![Placement::Bin(0), Placement::Unassigned]);
        let solution = Solution::new(&problem, assignment, true);

        let ext = export_solution(&catalog, &solution);
        assert_eq!(ext.unassigned, vec!["b".to_string()]);
        assert_eq!(ext.bins.len(), 1);
        assert_eq!(ext.evaluation.price_utilization, None);
        assert_eq!(ext.evaluation.weight_utilization, Some(100.0));
    }
}
