use anyhow::{Context, Result};
use log::info;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// External (serializable) representations of the entities within the library.
pub mod ext_repr;

/// All logic for converting external representations into internal ones
pub mod import;

/// All logic for exporting internal representations into external ones
pub mod export;

mod dataset;

#[doc(inline)]
pub use dataset::Dataset;

/// Reads a dataset from disk.
///
/// Files with a `.json` extension are parsed as an [`ExtDataset`](ext_repr::ExtDataset),
/// anything else is parsed as CSV (see [`Dataset::from_csv`]).
pub fn read_dataset(path: &Path) -> Result<Dataset> {
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let dataset = match is_json {
        true => {
            let file = File::open(path)
                .with_context(|| format!("could not open dataset file: {}", path.display()))?;
            let ext_dataset: ext_repr::ExtDataset = serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("could not parse dataset file: {}", path.display()))?;
            let mut dataset = Dataset::from(ext_dataset);
            if dataset.name.is_empty() {
                dataset.name = name;
            }
            dataset
        }
        false => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("could not read dataset file: {}", path.display()))?;
            Dataset::from_csv(name, &text)
                .with_context(|| format!("could not parse dataset file: {}", path.display()))?
        }
    };

    info!(
        "[IO] read dataset '{}' with {} items from {}",
        dataset.name,
        dataset.items.len(),
        path.display()
    );
    Ok(dataset)
}
