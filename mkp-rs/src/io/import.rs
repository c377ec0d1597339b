use crate::entities::Catalog;
use crate::io::ext_repr::ExtItem;
use anyhow::{Context, Result};

/// Converts the external items belonging to `group` into a [`Catalog`].
///
/// With `group == None` every item is taken, regardless of its group.
/// The relative order of the items is preserved.
pub fn import_catalog<'a>(
    ext_items: impl IntoIterator<Item = &'a ExtItem>,
    group: Option<&str>,
) -> Result<Catalog> {
    let mut catalog = Catalog::new(group.map(String::from));

    let selected = ext_items
        .into_iter()
        .filter(|ei| group.is_none_or(|g| ei.group.as_deref() == Some(g)));

    for ext_item in selected {
        catalog
            .add_item(
                ext_item.name.clone(),
                ext_item.weight,
                ext_item.price,
                ext_item.rating,
            )
            .with_context(|| format!("could not import item '{}'", ext_item.name))?;
    }

    Ok(catalog)
}
